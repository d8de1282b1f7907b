//! Search aggregation pipeline.
//!
//! For each keyword, pages through nearby search, drops candidates outside
//! the radius, skips places already seen in the run, fetches details, splits
//! the address and assembles one [`placescan_core::ResultRecord`] per place.
//! The finished [`RunReport`] can be written to an `.xlsx` workbook with
//! [`export`].

pub mod error;
pub mod export;
pub mod pipeline;
pub mod report;

pub use error::ExportError;
pub use export::{column_headers, save_workbook, write_workbook, XLSX_CONTENT_TYPE};
pub use pipeline::{KeywordHook, RunOptions, SearchPipeline};
pub use report::{RunReport, RunStats, RunWarning};
