//! What a run hands back: records, warnings and counters.

use std::fmt;

use placescan_core::ResultRecord;
use serde::Serialize;

/// A recoverable failure. The run carried on without the affected work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// A nearby-search page failed; remaining pages for the keyword were skipped.
    SearchFailed { keyword: String, message: String },
    /// A details lookup failed; the place is missing from the output.
    DetailsFailed {
        keyword: String,
        place_id: String,
        message: String,
    },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::SearchFailed { keyword, message } => {
                write!(f, "search for '{keyword}' failed: {message}")
            }
            RunWarning::DetailsFailed {
                keyword,
                place_id,
                message,
            } => write!(
                f,
                "details for place {place_id} (keyword '{keyword}') failed: {message}"
            ),
        }
    }
}

/// Counters collected while a run progresses.
///
/// `records <= unique_candidates <= raw_results` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub keywords: usize,
    pub pages_fetched: usize,
    /// Every search hit across all keywords and pages.
    pub raw_results: usize,
    pub outside_radius: usize,
    /// Hits inside the radius whose place was already admitted.
    pub duplicates: usize,
    /// Places admitted for a details lookup.
    pub unique_candidates: usize,
    pub detail_failures: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<ResultRecord>,
    pub warnings: Vec<RunWarning>,
    pub stats: RunStats,
    /// Whether rows carry a website column.
    pub include_website: bool,
}

impl RunReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
