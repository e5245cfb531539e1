//! Trajectory record → scene objects.
//!
//! Each record becomes an orbit polyline, up to two ground-clamped swath
//! polylines and a marker bound to a [`SampledTrack`]. Records are built
//! independently: a record that is too short or that the scene refuses
//! leaves a placeholder and the batch carries on.

use std::sync::Arc;

use super::{EntityRegistry, SampledTrack};
use crate::clock::ClockState;
use crate::data::TrajectoryRecord;
use crate::error::SatVizError;
use crate::geo::Geodetic;
use crate::options::{ColorOptions, MarkerOptions, Options};
use crate::scene::{
    LabelSpec, MarkerSpec, ModelSpec, ObjectId, PolylineSpec, Rgba,
    SceneError, SceneInterface, SceneObject,
};
use crate::view::ViewState;

/// Fewest positions a record needs to be drawn.
pub const MIN_TRACK_POINTS: usize = 3;

/// Scene handles owned by one satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatelliteVisual {
    /// Moving marker with label.
    pub marker: ObjectId,
    /// Full orbit path.
    pub orbit: ObjectId,
    /// Left ground swath, if the record had one.
    pub left_swath: Option<ObjectId>,
    /// Right ground swath, if the record had one.
    pub right_swath: Option<ObjectId>,
}

impl SatelliteVisual {
    /// Swath handles that exist, left first.
    pub fn swaths(&self) -> impl Iterator<Item = ObjectId> {
        self.left_swath.into_iter().chain(self.right_swath)
    }

    /// Every handle owned by this satellite.
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> {
        [self.marker, self.orbit].into_iter().chain(self.swaths())
    }
}

/// A record that ended up as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Record index in the dataset.
    pub index: usize,
    /// Satellite name.
    pub name: String,
    /// Why it was not drawn.
    pub message: String,
}

/// Outcome of building a whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Satellites built successfully.
    pub built: usize,
    /// Records left as placeholders, in index order.
    pub failures: Vec<RecordFailure>,
}

impl BuildReport {
    /// Number of records processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.built + self.failures.len()
    }
}

/// Builds satellite visuals into a scene.
pub struct EntityFactory {
    colors: ColorOptions,
    markers: MarkerOptions,
    model_uri: String,
}

impl EntityFactory {
    /// Factory styled by `options`, drawing `model_uri` for every marker.
    #[must_use]
    pub fn new(options: &Options, model_uri: impl Into<String>) -> Self {
        Self {
            colors: options.colors.clone(),
            markers: options.markers.clone(),
            model_uri: model_uri.into(),
        }
    }

    /// Restyle after an options change. Affects satellites built afterwards.
    pub fn set_options(&mut self, options: &Options) {
        self.colors = options.colors.clone();
        self.markers = options.markers.clone();
    }

    /// Build every record into `scene`, appending one entry per record to
    /// `registry` (a placeholder where construction failed).
    ///
    /// `registry` is expected to be empty; the caller clears it (and the
    /// scene) before a rebuild.
    pub fn build_all<S: SceneInterface>(
        &self,
        scene: &mut S,
        registry: &mut EntityRegistry,
        records: &[TrajectoryRecord],
        clock: &ClockState,
        view: &ViewState,
    ) -> BuildReport {
        let mut report = BuildReport::default();
        for (index, record) in records.iter().enumerate() {
            match self.build(scene, index, record, clock, view) {
                Ok(visual) => {
                    log::debug!("built satellite {index}: {}", record.name);
                    let _ = registry.push(&record.name, Some(visual));
                    report.built += 1;
                }
                Err(e) => {
                    log::warn!("satellite {index} ({}) skipped: {e}", record.name);
                    let _ = registry.push(&record.name, None);
                    report.failures.push(RecordFailure {
                        index,
                        name: record.name.clone(),
                        message: match e {
                            SatVizError::Record { message, .. } => message,
                            other => other.to_string(),
                        },
                    });
                }
            }
        }
        log::info!(
            "built {} of {} satellites ({} placeholders)",
            report.built,
            report.total(),
            report.failures.len()
        );
        report
    }

    /// Build one record. On failure every object already added for this
    /// record is removed again.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Record`] if the record has fewer than
    /// [`MIN_TRACK_POINTS`] positions or the scene refuses one of its
    /// objects.
    pub fn build<S: SceneInterface>(
        &self,
        scene: &mut S,
        index: usize,
        record: &TrajectoryRecord,
        clock: &ClockState,
        view: &ViewState,
    ) -> Result<SatelliteVisual, SatVizError> {
        let record_error = |message: String| SatVizError::Record {
            name: record.name.clone(),
            message,
        };

        if let Some(message) = &record.decode_error {
            return Err(record_error(message.clone()));
        }
        if record.positions.len() < MIN_TRACK_POINTS {
            return Err(record_error(format!(
                "needs at least {MIN_TRACK_POINTS} positions, got {}",
                record.positions.len()
            )));
        }

        let mut added = Vec::new();
        let result = self.attach_all(scene, &mut added, index, record, clock, view);
        if result.is_err() {
            for id in added {
                let _ = scene.remove_object(id);
            }
        }
        result.map_err(|e| record_error(e.to_string()))
    }

    fn attach_all<S: SceneInterface>(
        &self,
        scene: &mut S,
        added: &mut Vec<ObjectId>,
        index: usize,
        record: &TrajectoryRecord,
        clock: &ClockState,
        view: &ViewState,
    ) -> Result<SatelliteVisual, SceneError> {
        let color = self.colors.palette_color(index);
        let visibility = view.visibility_for(index);

        let orbit = attach(
            scene,
            added,
            SceneObject::Polyline(PolylineSpec {
                name: format!("{} orbit", record.name),
                positions: record.positions.clone(),
                width: self.colors.orbit_width,
                color: color.with_alpha(self.colors.orbit_alpha),
                clamp_to_ground: false,
                show: visibility.orbit,
            }),
        )?;

        let left_swath = record
            .left()
            .map(|points| {
                attach(
                    scene,
                    added,
                    self.swath(&record.name, "left", points, visibility.swaths),
                )
            })
            .transpose()?;
        let right_swath = record
            .right()
            .map(|points| {
                attach(
                    scene,
                    added,
                    self.swath(&record.name, "right", points, visibility.swaths),
                )
            })
            .transpose()?;

        let track = SampledTrack::from_geodetic(
            clock.start,
            clock.window_seconds(),
            &record.positions,
        );
        let marker = attach(
            scene,
            added,
            SceneObject::Marker(MarkerSpec {
                name: record.name.clone(),
                track: Arc::new(track),
                model: ModelSpec {
                    uri: self.model_uri.clone(),
                    scale: self.markers.model_scale,
                    minimum_pixel_size: self.markers.minimum_pixel_size,
                    maximum_scale: self.markers.maximum_scale,
                    color,
                    color_blend: self.markers.color_blend,
                },
                label: LabelSpec {
                    text: record.name.clone(),
                    fill: color,
                    outline: self.colors.label_outline,
                    outline_width: self.colors.label_outline_width,
                    pixel_offset: self.markers.label_offset,
                    show: visibility.label,
                },
                availability: (clock.start, clock.stop),
                show: visibility.marker,
            }),
        )?;

        Ok(SatelliteVisual {
            marker,
            orbit,
            left_swath,
            right_swath,
        })
    }

    fn swath(
        &self,
        name: &str,
        side: &str,
        points: &[Geodetic],
        show: bool,
    ) -> SceneObject {
        SceneObject::Polyline(PolylineSpec {
            name: format!("{name} {side} swath"),
            positions: points.to_vec(),
            width: self.colors.swath_width,
            color: self.colors.swath,
            clamp_to_ground: true,
            show,
        })
    }

    /// Color assigned to record `index`.
    #[must_use]
    pub fn color_for(&self, index: usize) -> Rgba {
        self.colors.palette_color(index)
    }
}

fn attach<S: SceneInterface>(
    scene: &mut S,
    added: &mut Vec<ObjectId>,
    object: SceneObject,
) -> Result<ObjectId, SceneError> {
    let id = scene.add_object(object)?;
    added.push(id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{parse_timestamp, WINDOW_SECONDS};
    use crate::data::fixtures;
    use crate::scene::MemoryScene;
    use crate::view::Focus;

    fn setup() -> (MemoryScene, EntityFactory, ClockState) {
        let start = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        let scene = MemoryScene::new(start);
        let factory = EntityFactory::new(&Options::default(), "sat.glb");
        (scene, factory, ClockState::new(start, WINDOW_SECONDS, 60.0))
    }

    #[test]
    fn full_record_creates_four_objects() {
        let (mut scene, factory, clock) = setup();
        let visual = factory
            .build(&mut scene, 0, &fixtures::record("A", 5), &clock, &ViewState::default())
            .unwrap();
        assert_eq!(scene.object_count(), 4);
        assert_eq!(visual.object_ids().count(), 4);

        let Some(SceneObject::Polyline(swath)) =
            visual.left_swath.and_then(|id| scene.entry(id)).map(|e| &e.object)
        else {
            panic!("left swath missing");
        };
        assert!(swath.clamp_to_ground);
        assert_eq!(swath.color, Rgba::rgb(1.0, 1.0, 1.0).with_alpha(0.6));

        let Some(SceneObject::Polyline(orbit)) =
            scene.entry(visual.orbit).map(|e| &e.object)
        else {
            panic!("orbit missing");
        };
        assert!(!orbit.clamp_to_ground);
        assert_eq!(orbit.color.alpha(), 0.7);
    }

    #[test]
    fn marker_track_spans_window() {
        let (mut scene, factory, clock) = setup();
        let visual = factory
            .build(&mut scene, 0, &fixtures::record("A", 8), &clock, &ViewState::default())
            .unwrap();
        let Some(SceneObject::Marker(marker)) =
            scene.entry(visual.marker).map(|e| &e.object)
        else {
            panic!("marker missing");
        };
        assert_eq!(marker.track.step_seconds(), WINDOW_SECONDS / 8.0);
        assert_eq!(marker.availability, (clock.start, clock.stop));
        assert_eq!(marker.label.text, "A");
        assert_eq!(marker.model.uri, "sat.glb");
    }

    #[test]
    fn empty_swaths_are_skipped() {
        let (mut scene, factory, clock) = setup();
        let mut record = fixtures::record("A", 4);
        record.left_swath = Some(Vec::new());
        record.right_swath = None;
        let visual = factory
            .build(&mut scene, 0, &record, &clock, &ViewState::default())
            .unwrap();
        assert_eq!(visual.swaths().count(), 0);
        assert_eq!(scene.object_count(), 2);
    }

    #[test]
    fn short_record_is_rejected_without_objects() {
        let (mut scene, factory, clock) = setup();
        let err = factory
            .build(&mut scene, 0, &fixtures::record("A", 2), &clock, &ViewState::default())
            .unwrap_err();
        assert!(matches!(err, SatVizError::Record { .. }));
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn partial_failure_rolls_back() {
        let (mut scene, factory, clock) = setup();
        // The marker is added last; refusing it must undo the polylines.
        scene.reject_objects_named("A");
        let err = factory
            .build(&mut scene, 0, &fixtures::record("A", 4), &clock, &ViewState::default())
            .unwrap_err();
        assert!(matches!(err, SatVizError::Record { ref name, .. } if name == "A"));
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn batch_continues_past_failures() {
        let (mut scene, factory, clock) = setup();
        scene.reject_objects_named("B right swath");
        let records = vec![
            fixtures::record("A", 4),
            fixtures::record("B", 4),
            fixtures::record("C", 1),
            fixtures::record("D", 4),
        ];
        let mut registry = EntityRegistry::new();
        let report = factory.build_all(
            &mut scene,
            &mut registry,
            &records,
            &clock,
            &ViewState::default(),
        );
        assert_eq!(report.built, 2);
        assert_eq!(
            report.failures.iter().map(|f| f.index).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.marker_handles().len(), 4);
        assert_eq!(registry.swath_handles().len(), 8);
        assert!(registry.visual(1).is_none());
        assert!(registry.visual(3).is_some());
        assert_eq!(scene.object_count(), 8);
    }

    #[test]
    fn construction_honours_current_toggles() {
        let (mut scene, factory, clock) = setup();
        let mut view = ViewState::default();
        view.show_orbits = false;
        view.show_labels = false;
        view.mode = Focus::All;
        let visual = factory
            .build(&mut scene, 0, &fixtures::record("A", 4), &clock, &view)
            .unwrap();
        assert_eq!(scene.is_visible(visual.orbit), Some(false));
        assert_eq!(scene.is_visible(visual.marker), Some(true));
        assert_eq!(scene.is_label_visible(visual.marker), Some(false));
        for id in visual.swaths() {
            assert_eq!(scene.is_visible(id), Some(true));
        }
    }

    #[test]
    fn palette_wraps_every_ten_records() {
        let (_, factory, _) = setup();
        assert_eq!(factory.color_for(0), factory.color_for(10));
        assert_ne!(factory.color_for(0), factory.color_for(9));
    }
}
