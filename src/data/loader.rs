use std::sync::Arc;

use super::record::{WirePayload, WireRecord};
use super::TrajectoryRecord;
use crate::error::SatVizError;
use crate::net::{HttpResponse, HttpTransport};

/// Endpoint serving the trajectory dataset.
pub const TRAJECTORY_PATH: &str = "/get_satellite_data";

/// Fetches trajectory datasets for a side-swing angle.
///
/// One request per call, no retries. A reload is simply another call.
pub struct TrajectoryLoader {
    transport: Arc<dyn HttpTransport>,
}

impl TrajectoryLoader {
    /// Loader issuing requests over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetch and parse the dataset for `side_angle_deg`.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Data`] on transport failure, a non-2xx status,
    /// an embedded `error` field or an unparseable body. An empty dataset is
    /// `Ok(vec![])`.
    pub fn load(
        &self,
        side_angle_deg: f64,
    ) -> Result<Vec<TrajectoryRecord>, SatVizError> {
        log::info!("loading trajectories (side angle {side_angle_deg}°)");
        let response = self
            .transport
            .get(TRAJECTORY_PATH, &[("side_angle", side_angle_deg.to_string())])
            .map_err(|e| SatVizError::Data(e.to_string()))?;
        let records = parse_trajectories(&response)?;
        log::info!("received {} trajectory records", records.len());
        Ok(records)
    }
}

/// Parse a trajectory endpoint response.
///
/// # Errors
///
/// Returns [`SatVizError::Data`] for a non-2xx status, an embedded `error`
/// field or a body that is neither a record list nor an error object.
pub fn parse_trajectories(
    response: &HttpResponse,
) -> Result<Vec<TrajectoryRecord>, SatVizError> {
    let payload = serde_json::from_str::<WirePayload>(&response.body);

    if !response.is_success() {
        let detail = match payload {
            Ok(WirePayload::Error { error }) => error,
            _ => response.body.trim().to_owned(),
        };
        return Err(SatVizError::Data(format!(
            "HTTP {}: {detail}",
            response.status
        )));
    }

    match payload {
        Ok(WirePayload::Records(records)) => Ok(records
            .into_iter()
            .enumerate()
            .map(|(index, value)| WireRecord::decode(index, value))
            .collect()),
        Ok(WirePayload::Error { error }) => Err(SatVizError::Data(error)),
        Err(e) => Err(SatVizError::Data(format!(
            "malformed trajectory payload: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::net::mock::MockTransport;

    fn loader(mock: &Arc<MockTransport>) -> TrajectoryLoader {
        TrajectoryLoader::new(mock.clone())
    }

    #[test]
    fn angle_is_sent_as_query_parameter() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(TRAJECTORY_PATH, 200, &fixtures::payload(2));
        let records = loader(&mock).load(35.5).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "SAT-1");
        assert_eq!(records[0].positions.len(), 4);
        assert_eq!(records[0].left_swath.as_ref().map(Vec::len), Some(2));

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, TRAJECTORY_PATH);
        assert_eq!(
            calls[0].1,
            vec![("side_angle".to_owned(), "35.5".to_owned())]
        );
    }

    #[test]
    fn empty_dataset_is_not_an_error() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(TRAJECTORY_PATH, 200, "[]");
        assert!(loader(&mock).load(20.0).unwrap().is_empty());
    }

    #[test]
    fn embedded_error_is_data_error() {
        let response = HttpResponse::ok(r#"{"error": "no TLE file"}"#);
        match parse_trajectories(&response) {
            Err(SatVizError::Data(msg)) => assert_eq!(msg, "no TLE file"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn non_success_status_is_data_error() {
        let response = HttpResponse {
            status: 500,
            body: r#"{"error": "propagation failed"}"#.to_owned(),
        };
        match parse_trajectories(&response) {
            Err(SatVizError::Data(msg)) => {
                assert_eq!(msg, "HTTP 500: propagation failed");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn garbage_body_is_data_error() {
        let response = HttpResponse::ok("<html>oops</html>");
        assert!(matches!(
            parse_trajectories(&response),
            Err(SatVizError::Data(_))
        ));
    }

    #[test]
    fn bad_record_does_not_abort_the_batch() {
        let response = HttpResponse::ok(
            r#"[{"name": "GOOD", "positions": [0, 0, 1, 1, 1, 1, 2, 2, 2]},
                {"name": "BAD", "positions": [0, 0, 1, null, 1, 1, 2, 2, 2]},
                {"name": 7, "positions": [0, 0, 1, 1, 1, 1]},
                null]"#,
        );
        let records = parse_trajectories(&response).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].name, "GOOD");
        assert!(records[0].decode_error.is_none());
        assert_eq!(records[0].positions.len(), 3);
        assert_eq!(records[1].name, "BAD");
        assert!(records[1].decode_error.is_some());
        assert_eq!(records[2].name, "satellite-2");
        assert!(records[2].decode_error.is_some());
        assert_eq!(records[3].name, "satellite-3");
        assert!(records[3].decode_error.is_some());
    }

    #[test]
    fn missing_swaths_stay_absent() {
        let response = HttpResponse::ok(
            r#"[{"name": "X", "positions": [0, 0, 1, 1, 1, 1, 2, 2, 2]}]"#,
        );
        let records = parse_trajectories(&response).unwrap();
        assert_eq!(records[0].positions.len(), 3);
        assert!(records[0].left_swath.is_none());
        assert!(records[0].right_swath.is_none());
    }
}
