//! Sample records as accepted by the spreadsheet collaborator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::models::fields::ExtractedFields;

/// Column headers of the sample sheet, in row order.
pub const ROW_HEADERS: [&str; 6] = [
    "Timestamp",
    "Well",
    "Company",
    "Depth From",
    "Depth To",
    "Box Code",
];

/// Timestamp layout used in the first sheet column.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A complete sample ready to be appended as one row.
///
/// Unlike [`ExtractedFields`], both depths are required and ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRecord {
    pub well: String,
    pub company: String,
    pub depth_from: f64,
    pub depth_to: f64,
    pub box_code: String,
}

impl SampleRecord {
    /// Render the record as a sheet row stamped with `recorded_at`.
    pub fn to_row(&self, recorded_at: NaiveDateTime) -> [String; 6] {
        [
            recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            self.well.clone(),
            self.company.clone(),
            self.depth_from.to_string(),
            self.depth_to.to_string(),
            self.box_code.clone(),
        ]
    }
}

impl TryFrom<ExtractedFields> for SampleRecord {
    type Error = RecordError;

    fn try_from(fields: ExtractedFields) -> Result<Self, Self::Error> {
        let well = fields.well.trim();
        if well.is_empty() {
            return Err(RecordError::MissingWell);
        }

        let (depth_from, depth_to) = match (fields.depth_from, fields.depth_to) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(RecordError::MissingDepth),
        };

        if depth_from > depth_to {
            return Err(RecordError::InvertedDepth {
                from: depth_from,
                to: depth_to,
            });
        }

        Ok(Self {
            well: well.to_string(),
            company: fields.company.trim().to_string(),
            depth_from,
            depth_to,
            box_code: fields.box_code.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fields() -> ExtractedFields {
        ExtractedFields {
            well: "  PL-7 ".to_string(),
            company: "Petro Co ".to_string(),
            depth_from: Some(2480.0),
            depth_to: Some(2490.5),
            box_code: "040.BB.020".to_string(),
        }
    }

    #[test]
    fn test_accepts_complete_fields() {
        let record = SampleRecord::try_from(fields()).unwrap();
        assert_eq!(record.well, "PL-7");
        assert_eq!(record.company, "Petro Co");
        assert_eq!(record.depth_to, 2490.5);
    }

    #[test]
    fn test_company_and_box_code_may_be_empty() {
        let record = SampleRecord::try_from(ExtractedFields {
            company: String::new(),
            box_code: String::new(),
            ..fields()
        })
        .unwrap();
        assert_eq!(record.company, "");
        assert_eq!(record.box_code, "");
    }

    #[test]
    fn test_rejects_incomplete_fields() {
        let blank_well = ExtractedFields {
            well: "   ".to_string(),
            ..fields()
        };
        assert_eq!(SampleRecord::try_from(blank_well), Err(RecordError::MissingWell));

        let no_depth = ExtractedFields {
            depth_to: None,
            ..fields()
        };
        assert_eq!(SampleRecord::try_from(no_depth), Err(RecordError::MissingDepth));

        let inverted = ExtractedFields {
            depth_from: Some(10.0),
            depth_to: Some(5.0),
            ..fields()
        };
        assert_eq!(
            SampleRecord::try_from(inverted),
            Err(RecordError::InvertedDepth { from: 10.0, to: 5.0 })
        );
    }

    #[test]
    fn test_row_layout() {
        let record = SampleRecord::try_from(fields()).unwrap();
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();

        assert_eq!(
            record.to_row(at),
            [
                "09/03/2024, 14:05:00".to_string(),
                "PL-7".to_string(),
                "Petro Co".to_string(),
                "2480".to_string(),
                "2490.5".to_string(),
                "040.BB.020".to_string(),
            ]
        );
    }
}
