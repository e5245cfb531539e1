//! Coverage query controller.
//!
//! A query annotates the map and moves the camera as soon as it is
//! dispatched; neither is undone if the backend call fails. The results
//! panel shows "pending" until the matching completion arrives.

use super::SatVizEngine;
use crate::coverage::{CoverageQuery, CoverageResult, ResultPanel};
use crate::error::SatVizError;
use crate::geo::Geodetic;
use crate::net::NetRequest;
use crate::scene::{LabelSpec, ObjectId, PointSpec, SceneInterface, SceneObject};

#[derive(Debug, Default)]
pub(super) struct QueryState {
    generation: u64,
    pending: Option<u64>,
    panel: ResultPanel,
    point: Option<ObjectId>,
    event_points: Vec<ObjectId>,
    last: Option<CoverageQuery>,
}

impl QueryState {
    pub(super) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget the in-flight query, if any. Returns whether one was pending.
    pub(super) fn abandon(&mut self, reason: &str) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.panel = ResultPanel::Error(reason.to_owned());
        true
    }
}

impl<S: SceneInterface> SatVizEngine<S> {
    /// Query revisit statistics for a ground point at the current
    /// side-swing angle.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] for non-finite or out-of-range
    /// coordinates and [`SatVizError::Transport`] without a connection. No
    /// request is sent and nothing changes in either case.
    pub fn query_coverage(&mut self, latitude: f64, longitude: f64) -> Result<(), SatVizError> {
        let query = CoverageQuery::new(latitude, longitude, self.view.side_swing_angle_deg)?;
        self.ensure_connected()?;
        let generation = self.begin_query(query);
        self.dispatch(NetRequest::Coverage { generation, query })
    }

    /// Synchronous half of a query: replace the query-point annotation, fly
    /// the camera above it and show the pending panel. Returns the
    /// generation the response must carry.
    pub fn begin_query(&mut self, query: CoverageQuery) -> u64 {
        self.clear_query_annotations();

        let point = self.query_point_object(&query);
        self.query.point = self
            .scene
            .add_object(point)
            .inspect_err(|e| log::warn!("query point not drawn: {e}"))
            .ok();

        let camera = &self.options.camera;
        self.scene.fly_camera(
            Geodetic::new(query.longitude, query.latitude, camera.query_altitude_m),
            camera.query_duration,
        );

        self.query.generation += 1;
        self.query.pending = Some(self.query.generation);
        self.query.panel = ResultPanel::Pending;
        self.query.last = Some(query);
        self.query.generation
    }

    /// Apply a coverage response. Returns `false` (and changes nothing) if
    /// `generation` is not the query currently awaited.
    pub fn complete_query(
        &mut self,
        generation: u64,
        result: Result<CoverageResult, SatVizError>,
    ) -> bool {
        if self.query.pending != Some(generation) {
            log::warn!(
                "discarding stale coverage response #{generation} (awaiting {:?})",
                self.query.pending
            );
            return false;
        }
        self.query.pending = None;

        match result {
            Ok(result) => {
                self.query.panel = ResultPanel::from_result(&result, &self.options.camera);
                if self.options.query.annotate_events {
                    self.annotate_events(&result);
                }
            }
            Err(e) => {
                log::error!("coverage query failed: {e}");
                self.query.panel = ResultPanel::from_error(&e);
            }
        }
        true
    }

    /// Fly to listed coverage event `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] if the panel lists no such event.
    pub fn activate_result(&mut self, index: usize) -> Result<(), SatVizError> {
        self.query.panel.activate(index, &mut self.scene)
    }

    /// What the results panel shows.
    #[must_use]
    pub fn result_panel(&self) -> &ResultPanel {
        &self.query.panel
    }

    /// Handle of the query-point annotation, if one is drawn.
    #[must_use]
    pub fn query_point(&self) -> Option<ObjectId> {
        self.query.point
    }

    /// Handles of the event sub-point annotations.
    #[must_use]
    pub fn event_points(&self) -> &[ObjectId] {
        &self.query.event_points
    }

    /// The most recently dispatched query.
    #[must_use]
    pub fn last_query(&self) -> Option<&CoverageQuery> {
        self.query.last.as_ref()
    }

    fn query_point_object(&self, query: &CoverageQuery) -> SceneObject {
        let colors = &self.options.colors;
        let markers = &self.options.markers;
        SceneObject::Point(PointSpec {
            name: "Query point".to_owned(),
            position: query.point(),
            pixel_size: markers.query_point_size,
            color: colors.query_point,
            outline: colors.query_point_outline,
            outline_width: 2.0,
            label: Some(LabelSpec {
                text: format!(
                    "Query point: {:.4}°, {:.4}°",
                    query.latitude, query.longitude
                ),
                fill: colors.query_label,
                outline: colors.label_outline,
                outline_width: colors.label_outline_width,
                pixel_offset: markers.query_label_offset,
                show: true,
            }),
        })
    }

    fn annotate_events(&mut self, result: &CoverageResult) {
        for event in &result.coverage_times {
            let position = Geodetic::from(event.satellite_position);
            let point = SceneObject::Point(PointSpec {
                name: format!("{} at {}", event.satellite, event.time),
                position: Geodetic::on_surface(position.lon_deg, position.lat_deg),
                pixel_size: self.options.markers.event_point_size,
                color: self.options.colors.event_point,
                outline: self.options.colors.query_point_outline,
                outline_width: 1.0,
                label: None,
            });
            if let Ok(id) = self
                .scene
                .add_object(point)
                .inspect_err(|e| log::warn!("event sub-point not drawn: {e}"))
            {
                self.query.event_points.push(id);
            }
        }
        log::debug!("{} event sub-points drawn", self.query.event_points.len());
    }

    fn clear_query_annotations(&mut self) {
        let ids = self.query.point.take().into_iter().chain(self.query.event_points.drain(..));
        for id in ids {
            let _ = self.scene.remove_object(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::tests::{engine, loaded, session, t0};
    use super::*;
    use crate::coverage::{parse_coverage, COVERAGE_PATH};
    use crate::net::mock::MockTransport;
    use crate::net::HttpResponse;
    use crate::options::Options;
    use crate::scene::{CameraFlight, MemoryScene};

    const ZERO_EVENTS: &str = r#"{"total_coverage_events": 0,
        "query_point": {"latitude": 45.1234, "longitude": -122.6789},
        "coverage_times": []}"#;

    fn truncated(total: u64, listed: usize) -> String {
        let events: Vec<String> = (0..listed)
            .map(|i| {
                format!(
                    r#"{{"satellite": "SAT-{i}", "time": "2024-01-01T0{}:00:00",
                    "distance_km": 12.5,
                    "satellite_position": {{"longitude": 10, "latitude": 20, "altitude": 500000}}}}"#,
                    i % 10
                )
            })
            .collect();
        format!(
            r#"{{"total_coverage_events": {total}, "average_revisit_hours": 2.0,
            "query_point": {{"latitude": 10, "longitude": 20}},
            "coverage_times": [{}]}}"#,
            events.join(",")
        )
    }

    fn query(lat: f64, lon: f64) -> CoverageQuery {
        CoverageQuery::new(lat, lon, 20.0).unwrap()
    }

    #[test]
    fn out_of_range_latitude_sends_nothing() {
        let mock = Arc::new(MockTransport::new());
        let mut engine = loaded(2);
        engine.connect(mock.clone()).unwrap();
        let objects = engine.scene().object_count();

        assert!(engine.query_coverage(91.0, 0.0).unwrap_err().is_validation());
        assert!(engine.query_coverage(f64::NAN, 0.0).unwrap_err().is_validation());
        assert!(engine.query_coverage(0.0, 181.0).unwrap_err().is_validation());

        assert_eq!(mock.call_count(), 0);
        assert_eq!(engine.result_panel(), &ResultPanel::Empty);
        assert_eq!(engine.scene().object_count(), objects);
        assert!(engine.scene().flights().is_empty());
    }

    #[test]
    fn zero_events_against_mock_backend_renders_no_coverage() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(COVERAGE_PATH, 200, ZERO_EVENTS);
        let mut engine = engine();
        engine.connect(mock.clone()).unwrap();

        engine.query_coverage(45.1234, -122.6789).unwrap();
        assert_eq!(engine.result_panel(), &ResultPanel::Pending);
        assert!(engine.wait(std::time::Duration::from_secs(5)));

        assert_eq!(engine.result_panel(), &ResultPanel::NoCoverage);
        assert!(engine.result_panel().events().is_empty());
        assert_eq!(
            mock.calls()[0].1,
            vec![
                ("latitude".to_owned(), "45.1234".to_owned()),
                ("longitude".to_owned(), "-122.6789".to_owned()),
                ("side_angle".to_owned(), "20".to_owned()),
            ]
        );
    }

    #[test]
    fn dispatch_annotates_and_flies_before_the_response() {
        let mut engine = engine();
        let _ = engine.begin_query(query(45.1234, -122.6789));

        let point = engine.query_point().unwrap();
        let entry = engine.scene().entry(point).unwrap();
        let SceneObject::Point(spec) = &entry.object else {
            panic!("query point should be a point");
        };
        assert_eq!(
            spec.label.as_ref().unwrap().text,
            "Query point: 45.1234°, -122.6789°"
        );
        assert_eq!(
            engine.scene().last_flight(),
            Some(&CameraFlight::ToPosition {
                destination: Geodetic::new(-122.6789, 45.1234, 1_000_000.0),
                duration: 1.0,
            })
        );
        assert!(engine.is_busy());
    }

    #[test]
    fn new_query_replaces_the_point() {
        let mut engine = engine();
        let _ = engine.begin_query(query(1.0, 2.0));
        let first = engine.query_point().unwrap();
        let _ = engine.begin_query(query(3.0, 4.0));
        let second = engine.query_point().unwrap();
        assert_ne!(first, second);
        assert!(!engine.scene().contains(first));
        assert_eq!(engine.scene().ids_named("Query point"), [second]);
    }

    #[test]
    fn failure_keeps_annotation_and_reports_status() {
        let mut engine = engine();
        let generation = engine.begin_query(query(1.0, 2.0));
        let response = HttpResponse {
            status: 400,
            body: r#"{"error": "no valid satellite data"}"#.to_owned(),
        };
        assert!(engine.complete_query(generation, parse_coverage(&response)));
        assert_eq!(
            engine.result_panel().to_string(),
            "Query failed: no valid satellite data (HTTP 400)"
        );
        assert!(engine.query_point().is_some());
        assert_eq!(engine.scene().flights().len(), 1);
    }

    #[test]
    fn truncated_result_shows_notice_and_activates_events() {
        let mut engine = engine();
        let generation = engine.begin_query(query(10.0, 20.0));
        let response = HttpResponse::ok(truncated(35, 3));
        assert!(engine.complete_query(generation, parse_coverage(&response)));

        let text = engine.result_panel().to_string();
        assert!(text.ends_with("... showing the first 3 of 35 events"));
        assert_eq!(engine.result_panel().events().len(), 3);

        engine.activate_result(2).unwrap();
        assert_eq!(
            engine.scene().last_flight(),
            Some(&CameraFlight::ToPosition {
                destination: Geodetic::new(10.0, 20.0, 600_000.0),
                duration: 1.5,
            })
        );
        assert!(engine.activate_result(3).unwrap_err().is_validation());
    }

    #[test]
    fn stale_query_response_is_discarded() {
        let mut engine = engine();
        let first = engine.begin_query(query(1.0, 2.0));
        let second = engine.begin_query(query(3.0, 4.0));
        let late = parse_coverage(&HttpResponse::ok(truncated(5, 5)));
        assert!(!engine.complete_query(first, late));
        assert_eq!(engine.result_panel(), &ResultPanel::Pending);

        let zero = parse_coverage(&HttpResponse::ok(ZERO_EVENTS));
        assert!(engine.complete_query(second, zero));
        assert_eq!(engine.result_panel(), &ResultPanel::NoCoverage);
        assert_eq!(engine.last_query(), Some(&query(3.0, 4.0)));
    }

    #[test]
    fn event_sub_points_are_optional() {
        let mut options = Options::default();
        options.query.annotate_events = true;
        let mut engine =
            SatVizEngine::new(MemoryScene::new(t0()), options, &session(), t0()).unwrap();

        let generation = engine.begin_query(query(10.0, 20.0));
        let result = parse_coverage(&HttpResponse::ok(truncated(4, 4)));
        assert!(engine.complete_query(generation, result));
        assert_eq!(engine.event_points().len(), 4);
        let sub_point = engine.scene().entry(engine.event_points()[0]).unwrap();
        let SceneObject::Point(spec) = &sub_point.object else {
            panic!("sub-point should be a point");
        };
        assert_eq!(spec.position, Geodetic::on_surface(10.0, 20.0));

        let _ = engine.begin_query(query(0.0, 0.0));
        assert!(engine.event_points().is_empty());
        assert_eq!(engine.scene().object_count(), 1);
    }
}
