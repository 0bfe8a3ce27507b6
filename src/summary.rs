//! Summary result type returned by the relay.

use crate::settings::{Provider, SummaryType};
use serde::{Deserialize, Serialize};

/// A completed summary with its provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Title of the summarised article
    pub title: String,
    /// The summary text as returned by the provider, trimmed
    pub summary: String,
    /// Source URL
    pub url: String,
    /// Estimated minutes saved by reading the summary instead
    pub time_saved: u32,
    /// Which provider produced the summary
    pub provider: Provider,
    pub summary_type: SummaryType,
    /// Model that produced the summary
    pub model: String,
}

/// Minutes saved by reading the summary instead of the article, assuming the
/// summary itself takes about two minutes. Never less than 1.
pub fn time_saved(reading_time: u32) -> u32 {
    reading_time.saturating_sub(2).max(1)
}
