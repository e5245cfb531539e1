//! Dataset (re)loading: clear, fetch, rebuild.
//!
//! All objects of the previous dataset are removed and the registry emptied
//! before the request is even sent, so nothing from an older dataset can
//! survive a reload. The rebuild happens when the matching completion
//! arrives; completions for superseded reloads are dropped.

use std::fmt;

use super::SatVizEngine;
use crate::data::TrajectoryRecord;
use crate::entity::BuildReport;
use crate::error::SatVizError;
use crate::net::NetRequest;
use crate::scene::SceneInterface;
use crate::view::validate_side_swing_angle;

/// Loading-status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No load requested yet.
    #[default]
    Idle,
    /// A reload is in flight.
    Loading,
    /// The dataset was built.
    Loaded {
        /// Number of records in the dataset (placeholders included).
        satellites: usize,
    },
    /// The backend returned an empty dataset.
    NoData,
    /// The load failed.
    Failed(String),
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Waiting for satellite data"),
            Self::Loading => write!(f, "Loading satellite trajectories from the server..."),
            Self::Loaded { satellites } => write!(f, "Loaded {satellites} satellites"),
            Self::NoData => write!(f, "No satellite data found"),
            Self::Failed(message) => write!(f, "Failed to load satellite data: {message}"),
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct LoadState {
    pub(super) generation: u64,
    pub(super) pending: Option<u64>,
    pub(super) status: LoadStatus,
    pub(super) report: Option<BuildReport>,
    pub(super) loaded_angle: Option<f64>,
}

impl LoadState {
    /// Forget the in-flight reload, if any. Returns whether one was pending.
    pub(super) fn abandon(&mut self, reason: &str) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.status = LoadStatus::Failed(reason.to_owned());
        true
    }
}

impl<S: SceneInterface> SatVizEngine<S> {
    /// Reload the dataset at the current side-swing angle.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Transport`] if no request processor is
    /// connected; nothing is cleared in that case.
    pub fn reload(&mut self) -> Result<(), SatVizError> {
        self.ensure_connected()?;
        let generation = self.begin_reload();
        self.dispatch(NetRequest::LoadTrajectories {
            generation,
            side_angle_deg: self.view.side_swing_angle_deg,
        })
    }

    /// Validate and apply a new side-swing angle, then reload.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] for an angle outside `[0, 60]` and
    /// [`SatVizError::Transport`] without a connection; in both cases the
    /// angle is unchanged and nothing is reloaded.
    pub fn set_side_swing_angle(&mut self, angle_deg: f64) -> Result<(), SatVizError> {
        let angle_deg = validate_side_swing_angle(angle_deg)?;
        self.ensure_connected()?;
        log::info!(
            "side-swing angle {}° -> {angle_deg}°",
            self.view.side_swing_angle_deg
        );
        self.view.side_swing_angle_deg = angle_deg;
        self.reload()
    }

    /// Synchronous half of a reload: remove every object of the current
    /// dataset, empty the registry, reset focus and selection, and mark the
    /// load as in flight. Returns the generation the response must carry.
    pub fn begin_reload(&mut self) -> u64 {
        let removed = self.registry.clear(&mut self.scene);
        self.view.reset_mode();
        self.load.generation += 1;
        self.load.pending = Some(self.load.generation);
        self.load.status = LoadStatus::Loading;
        self.load.report = None;
        log::info!(
            "reload #{} at side-swing angle {}° ({removed} objects removed)",
            self.load.generation,
            self.view.side_swing_angle_deg
        );
        self.load.generation
    }

    /// Apply a dataset response. Returns `false` (and changes nothing) if
    /// `generation` is not the reload currently awaited.
    pub fn complete_reload(
        &mut self,
        generation: u64,
        side_angle_deg: f64,
        result: Result<Vec<TrajectoryRecord>, SatVizError>,
    ) -> bool {
        if self.load.pending != Some(generation) {
            log::warn!(
                "discarding stale trajectory response #{generation} (awaiting {:?})",
                self.load.pending
            );
            return false;
        }
        self.load.pending = None;

        let records = match result {
            Ok(records) => records,
            Err(e) => {
                log::error!("trajectory load failed: {e}");
                self.load.status = LoadStatus::Failed(match e {
                    SatVizError::Data(message) => message,
                    other => other.to_string(),
                });
                return true;
            }
        };

        self.load.loaded_angle = Some(side_angle_deg);
        if records.is_empty() {
            log::warn!("backend returned no satellites");
            self.load.status = LoadStatus::NoData;
            return true;
        }

        // Nothing may have been added since begin_reload, but the registry
        // must be empty before the rebuild.
        let _ = self.registry.clear(&mut self.scene);
        let clock = self.playback.clock().clone();
        let report = self.factory.build_all(
            &mut self.scene,
            &mut self.registry,
            &records,
            &clock,
            &self.view,
        );
        self.load.status = LoadStatus::Loaded {
            satellites: records.len(),
        };
        self.load.report = Some(report);
        true
    }

    /// Current loading-status line.
    #[must_use]
    pub fn load_status(&self) -> &LoadStatus {
        &self.load.status
    }

    /// Outcome of the last successful build, including per-record failures.
    #[must_use]
    pub fn build_report(&self) -> Option<&BuildReport> {
        self.load.report.as_ref()
    }

    /// Summary of the simulated window once a dataset is loaded.
    #[must_use]
    pub fn time_window_summary(&self) -> Option<String> {
        let LoadStatus::Loaded { satellites } = self.load.status else {
            return None;
        };
        let hours = self.playback.clock().window_seconds() / 3600.0;
        let angle = self
            .load
            .loaded_angle
            .unwrap_or(self.view.side_swing_angle_deg);
        Some(format!(
            "Simulated window: {hours} h ({satellites} satellites, side-swing angle {angle}°)"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{engine, loaded};
    use super::*;
    use crate::data::fixtures::record;
    use crate::data::parse_trajectories;
    use crate::net::HttpResponse;

    #[test]
    fn collections_stay_index_aligned_with_placeholders() {
        let mut engine = engine();
        let generation = engine.begin_reload();
        let records = vec![
            record("A", 5),
            record("B", 2),
            record("C", 4),
            record("D", 0),
        ];
        assert!(engine.complete_reload(generation, 20.0, Ok(records)));

        let registry = engine.registry();
        assert_eq!(registry.marker_handles().len(), 4);
        assert_eq!(registry.orbit_handles().len(), 4);
        assert_eq!(registry.swath_handles().len(), 8);
        let placeholders: Vec<usize> = registry
            .marker_handles()
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_none())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(placeholders, [1, 3]);
        assert!(registry.swath_handles()[2].is_none());
        assert!(registry.swath_handles()[3].is_none());

        let report = engine.build_report().unwrap();
        assert_eq!(report.built, 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(engine.load_status(), &LoadStatus::Loaded { satellites: 4 });
    }

    #[test]
    fn malformed_entry_becomes_a_reported_placeholder() {
        let body = r#"[
            {"name": "GOOD", "positions": [0, 0, 500000, 10, 1, 500000, 20, 2, 500000]},
            {"name": "BAD", "positions": [0, 0, 1, null, 1, 1, 2, 2, 2]},
            {"name": "ALSO-GOOD", "positions": [0, 0, 500000, 10, 1, 500000]}
        ]"#;
        let records = parse_trajectories(&HttpResponse::ok(body)).unwrap();

        let mut engine = engine();
        let generation = engine.begin_reload();
        assert!(engine.complete_reload(generation, 20.0, Ok(records)));

        assert_eq!(engine.load_status(), &LoadStatus::Loaded { satellites: 3 });
        assert!(engine.registry().visual(1).is_none());
        assert!(engine.registry().visual(0).is_some());
        assert!(engine.registry().visual(2).is_some());
        let report = engine.build_report().unwrap();
        assert_eq!(report.built, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].name, "BAD");
        assert!(report.failures[0].message.starts_with("malformed record"));
    }

    #[test]
    fn reload_leaves_no_object_from_previous_dataset() {
        let mut engine = loaded(3);
        let old = engine.scene().ids();
        assert!(!old.is_empty());

        let generation = engine.begin_reload();
        assert_eq!(engine.scene().object_count(), 0);
        let records = vec![record("X", 5), record("Y", 5)];
        assert!(engine.complete_reload(generation, 35.0, Ok(records)));

        assert!(old.iter().all(|id| !engine.scene().contains(*id)));
        assert_eq!(engine.registry().len(), 2);
        assert_eq!(engine.scene().object_count(), engine.registry().object_count());
    }

    #[test]
    fn reload_resets_focus_and_reapplies_toggles() {
        let mut engine = loaded(3);
        let _ = engine.toggle_orbits();
        engine.focus_on(1).unwrap();

        let generation = engine.begin_reload();
        assert_eq!(engine.view().focused(), None);
        let records = (0..3).map(|i| record(&format!("SAT-{i}"), 5)).collect();
        assert!(engine.complete_reload(generation, 20.0, Ok(records)));

        for (_, visual) in engine.registry().visuals() {
            assert_eq!(engine.scene().is_visible(visual.marker), Some(true));
            assert_eq!(engine.scene().is_visible(visual.orbit), Some(false));
        }
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut engine = engine();
        let first = engine.begin_reload();
        let second = engine.begin_reload();
        assert!(!engine.complete_reload(first, 20.0, Ok(vec![record("OLD", 5)])));
        assert!(engine.registry().is_empty());
        assert_eq!(engine.load_status(), &LoadStatus::Loading);

        assert!(engine.complete_reload(second, 30.0, Ok(vec![record("NEW", 5)])));
        assert_eq!(engine.registry().index_of("NEW"), Some(0));
        assert!(!engine.complete_reload(second, 30.0, Ok(vec![record("AGAIN", 5)])));
        assert_eq!(engine.registry().len(), 1);
    }

    #[test]
    fn empty_dataset_is_no_data() {
        let mut engine = engine();
        let generation = engine.begin_reload();
        assert!(engine.complete_reload(generation, 20.0, Ok(Vec::new())));
        assert_eq!(engine.load_status(), &LoadStatus::NoData);
        assert_eq!(engine.load_status().to_string(), "No satellite data found");
        assert!(engine.time_window_summary().is_none());
    }

    #[test]
    fn failure_is_reported_in_status() {
        let mut engine = loaded(2);
        let generation = engine.begin_reload();
        let err = SatVizError::Data("HTTP 500: boom".to_owned());
        assert!(engine.complete_reload(generation, 20.0, Err(err)));
        assert_eq!(
            engine.load_status().to_string(),
            "Failed to load satellite data: HTTP 500: boom"
        );
        assert!(engine.registry().is_empty());
    }

    #[test]
    fn window_summary_names_count_and_angle() {
        let engine = loaded(4);
        assert_eq!(
            engine.time_window_summary().as_deref(),
            Some("Simulated window: 24 h (4 satellites, side-swing angle 20°)")
        );
    }

    #[test]
    fn bad_angle_changes_nothing() {
        let mut engine = loaded(2);
        let before = engine.scene().object_count();
        assert!(engine.set_side_swing_angle(75.0).unwrap_err().is_validation());
        assert!(engine.set_side_swing_angle(-1.0).unwrap_err().is_validation());
        assert_eq!(engine.view().side_swing_angle_deg, 20.0);
        assert_eq!(engine.scene().object_count(), before);
        assert_eq!(engine.load_status(), &LoadStatus::Loaded { satellites: 2 });
    }
}
