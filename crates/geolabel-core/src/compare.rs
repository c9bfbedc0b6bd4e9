//! Side-by-side comparison of every known provider on one image.

use std::time::{Duration, Instant};

use futures_util::future::join_all;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::{LabelError, ProviderError, Result};
use crate::models::config::{CostConfig, Credentials, LabelConfig};
use crate::models::fields::ExtractedFields;
use crate::providers::{build_provider, ProviderKind, VisionProvider};

/// Result of running one provider during a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOutcome {
    pub provider: ProviderKind,
    pub success: bool,
    pub data: Option<ExtractedFields>,
    pub error: Option<String>,
    pub response_time_ms: u64,
    /// Estimated USD cost of the call; zero unless it succeeded.
    pub estimated_cost: f64,
}

impl ProviderOutcome {
    fn succeeded(provider: ProviderKind, data: ExtractedFields, response_time_ms: u64, estimated_cost: f64) -> Self {
        Self {
            provider,
            success: true,
            data: Some(data),
            error: None,
            response_time_ms,
            estimated_cost,
        }
    }

    fn failed(provider: ProviderKind, error: String, response_time_ms: u64) -> Self {
        Self {
            provider,
            success: false,
            data: None,
            error: Some(error),
            response_time_ms,
            estimated_cost: 0.0,
        }
    }

    fn not_configured(provider: ProviderKind) -> Self {
        Self::failed(
            provider,
            format!("{} is not configured", provider.credential_variable()),
            0,
        )
    }

    /// Cost as `$0.000050`, or `$0` for free or failed calls.
    pub fn format_cost(&self) -> String {
        format_usd(self.estimated_cost)
    }
}

/// Render a USD amount the way comparison output shows it.
pub fn format_usd(amount: f64) -> String {
    if amount == 0.0 {
        "$0".to_string()
    } else {
        format!("${:.6}", amount)
    }
}

/// Aggregate counts, derived from the outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_cost: f64,
}

/// Outcomes of one comparison, in provider enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub results: Vec<ProviderOutcome>,
}

impl ComparisonReport {
    pub fn summary(&self) -> ComparisonSummary {
        let successful = self.results.iter().filter(|r| r.success).count();
        ComparisonSummary {
            total: self.results.len(),
            successful,
            failed: self.results.len() - successful,
            total_cost: self.results.iter().map(|r| r.estimated_cost).sum(),
        }
    }

    pub fn outcome(&self, provider: ProviderKind) -> Option<&ProviderOutcome> {
        self.results.iter().find(|r| r.provider == provider)
    }
}

impl Serialize for ComparisonReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ComparisonReport", 2)?;
        state.serialize_field("results", &self.results)?;
        state.serialize_field("summary", &self.summary())?;
        state.end()
    }
}

enum Slot {
    Configured(Box<dyn VisionProvider>),
    NotConfigured(ProviderKind),
    /// Credential present but the adapter could not be built.
    Unavailable(ProviderKind, String),
}

/// Runs every known provider on the same image and records each outcome.
///
/// One provider failing, hanging past the timeout, or lacking credentials
/// never affects the others' entries.
pub struct ComparisonHarness {
    slots: Vec<Slot>,
    costs: CostConfig,
    concurrent: bool,
    timeout: Option<Duration>,
}

impl ComparisonHarness {
    /// Build adapters for every provider whose credential is present.
    ///
    /// A provider whose adapter cannot be set up is reported as a failed
    /// outcome on every run instead of aborting the comparison.
    pub fn from_config(credentials: &Credentials, config: &LabelConfig) -> Self {
        let slots = Self::assemble(credentials, |kind| build_provider(kind, credentials, config));

        Self::from_slots(slots)
            .with_costs(config.costs.clone())
            .concurrent(config.compare.concurrent)
            .timeout(config.compare.timeout_secs.map(Duration::from_secs))
    }

    /// Use the given providers; kinds not among them count as not configured.
    pub fn with_providers(mut providers: Vec<Box<dyn VisionProvider>>) -> Self {
        let slots = ProviderKind::ALL
            .into_iter()
            .map(|kind| match providers.iter().position(|p| p.kind() == kind) {
                Some(index) => Slot::Configured(providers.swap_remove(index)),
                None => Slot::NotConfigured(kind),
            })
            .collect();

        Self::from_slots(slots)
    }

    fn assemble<F>(credentials: &Credentials, mut build: F) -> Vec<Slot>
    where
        F: FnMut(ProviderKind) -> Result<Box<dyn VisionProvider>>,
    {
        ProviderKind::ALL
            .into_iter()
            .map(|kind| {
                if !credentials.has(kind) {
                    return Slot::NotConfigured(kind);
                }
                match build(kind) {
                    Ok(provider) => Slot::Configured(provider),
                    Err(e) => {
                        warn!("Could not set up {}: {}", kind, e);
                        Slot::Unavailable(kind, e.to_string())
                    }
                }
            })
            .collect()
    }

    fn from_slots(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            costs: CostConfig::default(),
            concurrent: true,
            timeout: None,
        }
    }

    pub fn with_costs(mut self, costs: CostConfig) -> Self {
        self.costs = costs;
        self
    }

    pub fn concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run all providers on `image` and collect their outcomes.
    pub async fn compare_all(&self, image: &str) -> Result<ComparisonReport> {
        if image.trim().is_empty() {
            return Err(LabelError::MissingImage);
        }

        let results = if self.concurrent {
            join_all(self.slots.iter().map(|slot| self.run(slot, image))).await
        } else {
            let mut results = Vec::with_capacity(self.slots.len());
            for slot in &self.slots {
                results.push(self.run(slot, image).await);
            }
            results
        };

        let report = ComparisonReport { results };
        let summary = report.summary();
        info!(
            "Compared {} providers: {} succeeded, {} failed",
            summary.total, summary.successful, summary.failed
        );

        Ok(report)
    }

    async fn run(&self, slot: &Slot, image: &str) -> ProviderOutcome {
        let provider = match slot {
            Slot::Configured(provider) => provider,
            Slot::NotConfigured(kind) => {
                debug!("Skipping {}: no credential", kind);
                return ProviderOutcome::not_configured(*kind);
            }
            Slot::Unavailable(kind, error) => return ProviderOutcome::failed(*kind, error.clone(), 0),
        };

        let kind = provider.kind();
        let started = Instant::now();
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, provider.recognize(image)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(limit)),
            },
            None => provider.recognize(image).await,
        };
        let elapsed = started.elapsed().as_millis() as u64;

        match result {
            Ok(data) => {
                debug!("{} answered in {} ms", kind, elapsed);
                ProviderOutcome::succeeded(kind, data, elapsed, self.costs.for_kind(kind))
            }
            Err(e) => {
                warn!("{} failed after {} ms: {}", kind, elapsed, e);
                ProviderOutcome::failed(kind, e.to_string(), elapsed)
            }
        }
    }
}
