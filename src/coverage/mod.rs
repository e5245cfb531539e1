//! Point-coverage queries: validation, the backend client, the response
//! model and the result renderer.

mod client;
mod panel;
mod query;
mod result;

pub use client::{parse_coverage, CoverageClient, COVERAGE_PATH};
pub use panel::{CoverageReport, EventItem, ResultPanel, StatsBlock};
pub use query::CoverageQuery;
pub use result::{CoverageEvent, CoverageResult, QueryPoint, SatellitePosition};
