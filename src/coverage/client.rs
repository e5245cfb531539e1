use std::sync::Arc;

use super::result::CoveragePayload;
use super::{CoverageQuery, CoverageResult};
use crate::error::SatVizError;
use crate::net::{HttpResponse, HttpTransport};

/// Endpoint computing revisit statistics for a ground point.
pub const COVERAGE_PATH: &str = "/api/calculate_revisit_time";

/// Sends coverage queries to the backend.
pub struct CoverageClient {
    transport: Arc<dyn HttpTransport>,
}

impl CoverageClient {
    /// Client issuing requests over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Run `query`. One request, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Query`] on transport failure, a non-2xx status,
    /// an embedded `error` field or an unparseable body.
    pub fn fetch(&self, query: &CoverageQuery) -> Result<CoverageResult, SatVizError> {
        log::info!(
            "coverage query at ({:.4}, {:.4}), side angle {}°",
            query.latitude,
            query.longitude,
            query.side_angle_deg
        );
        let params = query.params();
        let response = self
            .transport
            .get(COVERAGE_PATH, &params)
            .map_err(|e| SatVizError::Query {
                status: None,
                message: e.to_string(),
            })?;
        parse_coverage(&response)
    }
}

/// Parse a revisit-time endpoint response.
///
/// # Errors
///
/// Returns [`SatVizError::Query`] for a non-2xx status (carrying the status
/// and the backend's message), an embedded `error` field, or a malformed
/// body.
pub fn parse_coverage(response: &HttpResponse) -> Result<CoverageResult, SatVizError> {
    let payload = serde_json::from_str::<CoveragePayload>(&response.body);

    if !response.is_success() {
        let message = match payload {
            Ok(CoveragePayload::Error { error }) => error,
            _ => response.body.trim().to_owned(),
        };
        return Err(SatVizError::Query {
            status: Some(response.status),
            message,
        });
    }

    match payload {
        Ok(CoveragePayload::Result(result)) => {
            log::info!(
                "coverage: {} events ({} listed)",
                result.total_coverage_events,
                result.coverage_times.len()
            );
            Ok(result)
        }
        Ok(CoveragePayload::Error { error }) => Err(SatVizError::Query {
            status: None,
            message: error,
        }),
        Err(e) => Err(SatVizError::Query {
            status: None,
            message: format!("malformed coverage response: {e}"),
        }),
    }
}
