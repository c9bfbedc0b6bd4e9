//! Depth range extraction.

use serde::{Deserialize, Serialize};

use super::patterns::{DEPTH_FROM, DEPTH_RANGE, DEPTH_TO, NUMBER_PAIR};

/// Smallest value accepted by the unlabeled fallback.
pub const MIN_PLAUSIBLE_DEPTH: f64 = 100.0;

/// Largest value accepted by the unlabeled fallback.
pub const MAX_PLAUSIBLE_DEPTH: f64 = 50000.0;

/// Depth interval read from a label. Either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    pub from: Option<f64>,
    pub to: Option<f64>,
}

/// Which strategy produced a [`DepthRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthTier {
    /// "Depth: X - Y"
    Labeled,
    /// Separate "From:" and "To:" anchors.
    FromTo,
    /// First unlabeled pair inside the plausible range.
    Fallback,
}

/// Parse a number, dropping comma grouping ("2,480" -> 2480).
pub fn parse_number(text: &str) -> Option<f64> {
    text.replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Whether the fallback tier would accept `value` as a depth.
pub fn is_plausible_depth(value: f64) -> bool {
    (MIN_PLAUSIBLE_DEPTH..=MAX_PLAUSIBLE_DEPTH).contains(&value)
}

/// Extract the depth range; both sides are `None` when no tier matches.
pub fn parse_depth(text: &str) -> DepthRange {
    parse_depth_with_tier(text)
        .map(|(range, _)| range)
        .unwrap_or_default()
}

/// Extract the depth range and report which tier matched.
pub fn parse_depth_with_tier(text: &str) -> Option<(DepthRange, DepthTier)> {
    if let Some(caps) = DEPTH_RANGE.captures(text) {
        let range = DepthRange {
            from: parse_number(&caps[1]),
            to: parse_number(&caps[2]),
        };
        return Some((range, DepthTier::Labeled));
    }

    let from = DEPTH_FROM.captures(text).map(|caps| parse_number(&caps[1]));
    let to = DEPTH_TO.captures(text).map(|caps| parse_number(&caps[1]));
    if from.is_some() || to.is_some() {
        let range = DepthRange {
            from: from.flatten(),
            to: to.flatten(),
        };
        return Some((range, DepthTier::FromTo));
    }

    NUMBER_PAIR.captures_iter(text).find_map(|caps| {
        let from = parse_number(&caps[1])?;
        let to = parse_number(&caps[2])?;
        if is_plausible_depth(from) && is_plausible_depth(to) {
            Some((
                DepthRange {
                    from: Some(from),
                    to: Some(to),
                },
                DepthTier::Fallback,
            ))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(from: Option<f64>, to: Option<f64>) -> DepthRange {
        DepthRange { from, to }
    }

    #[test]
    fn test_labeled_with_commas() {
        assert_eq!(parse_depth("Depth: 2,480 - 2,490"), range(Some(2480.0), Some(2490.0)));
    }

    #[test]
    fn test_labeled_variants() {
        assert_eq!(parse_depth("Depth: 2480-2490"), range(Some(2480.0), Some(2490.0)));
        assert_eq!(parse_depth("DEPTH 2480 to 2490"), range(Some(2480.0), Some(2490.0)));
        assert_eq!(parse_depth("Depth: 2480.5 – 2490.25"), range(Some(2480.5), Some(2490.25)));
        assert_eq!(parse_depth("Depth:2480—2490 m"), range(Some(2480.0), Some(2490.0)));
    }

    #[test]
    fn test_labeled_range_is_not_filtered() {
        let (found, tier) = parse_depth_with_tier("Depth: 5 - 10").unwrap();
        assert_eq!(found, range(Some(5.0), Some(10.0)));
        assert_eq!(tier, DepthTier::Labeled);
    }

    #[test]
    fn test_from_only() {
        assert_eq!(parse_depth("From: 2480"), range(Some(2480.0), None));
    }

    #[test]
    fn test_from_and_to_on_separate_lines() {
        let (found, tier) = parse_depth_with_tier("From: 1,200\nTo: 1,250.5").unwrap();
        assert_eq!(found, range(Some(1200.0), Some(1250.5)));
        assert_eq!(tier, DepthTier::FromTo);
    }

    #[test]
    fn test_to_only() {
        assert_eq!(parse_depth("Box 1\nTo: 900"), range(None, Some(900.0)));
    }

    #[test]
    fn test_fallback_picks_first_plausible_pair() {
        let (found, tier) = parse_depth_with_tier("run 3-4 sample 2480 - 2490").unwrap();
        assert_eq!(found, range(Some(2480.0), Some(2490.0)));
        assert_eq!(tier, DepthTier::Fallback);
    }

    #[test]
    fn test_fallback_rejects_out_of_range_pairs() {
        assert_eq!(parse_depth("Sample 12-2024, id 045-046"), range(None, None));
        assert_eq!(parse_depth("id 99-100"), range(None, None));
        assert_eq!(parse_depth("ref 50000-50001"), range(None, None));
    }

    #[test]
    fn test_fallback_range_is_inclusive() {
        assert_eq!(parse_depth("id 100-50000"), range(Some(100.0), Some(50000.0)));
    }

    #[test]
    fn test_no_depth() {
        assert_eq!(parse_depth("Well: A-1"), DepthRange::default());
        assert_eq!(parse_depth_with_tier(""), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("2,480"), Some(2480.0));
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number(","), None);
        assert_eq!(parse_number("inf"), None);
    }
}
