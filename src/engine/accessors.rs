//! Read-only query methods and lifecycle helpers for [`SatVizEngine`].

use super::SatVizEngine;
use crate::entity::EntityRegistry;
use crate::options::Options;
use crate::scene::{Rgba, SceneInterface};
use crate::view::ViewState;

/// One row of the satellite list.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SatelliteSummary {
    /// Record index.
    pub index: usize,
    /// Satellite name.
    pub name: String,
    /// Whether the satellite was drawn (not a placeholder).
    pub valid: bool,
    /// Whether the entry is highlighted.
    pub selected: bool,
    /// Whether the satellite is the focused one.
    pub focused: bool,
    /// Palette color of the satellite.
    pub color: Rgba,
}

// ── Scene access ──

impl<S: SceneInterface> SatVizEngine<S> {
    /// Read-only access to the scene.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene.
    ///
    /// Objects owned by the registry must not be removed through this
    /// handle; a later reload would find them already detached.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Satellite entries in dataset order.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }
}

// ── State access ──

impl<S: SceneInterface> SatVizEngine<S> {
    /// Current view state.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Rows for the satellite list.
    #[must_use]
    pub fn satellites(&self) -> Vec<SatelliteSummary> {
        let focused = self.view.focused();
        self.registry
            .iter()
            .enumerate()
            .map(|(index, entry)| SatelliteSummary {
                index,
                name: entry.name.clone(),
                valid: entry.visual.is_some(),
                selected: self.view.selection == Some(index),
                focused: focused == Some(index),
                color: self.factory.color_for(index),
            })
            .collect()
    }

    /// Loading status, with the time-window summary once loaded.
    #[must_use]
    pub fn status_text(&self) -> String {
        self.time_window_summary()
            .map_or_else(|| self.load.status.to_string(), |summary| {
                format!("{}. {summary}", self.load.status)
            })
    }
}

// ── Lifecycle ──

impl<S: SceneInterface> SatVizEngine<S> {
    /// Stop the background request processor without waiting for it. A
    /// reload or query still in flight is marked failed; a later network
    /// operation needs [`connect`](Self::connect).
    pub fn shutdown(&mut self) {
        if self.processor.take().is_some() {
            self.abandon_pending();
            log::debug!("request processor stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::tests::loaded;
    use crate::net::mock::MockTransport;
    use crate::options::ColorOptions;

    #[test]
    fn summaries_track_selection_and_focus() {
        let mut engine = loaded(3);
        engine.focus_on(2).unwrap();
        engine.select(0).unwrap();

        let rows = engine.satellites();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].name, "SAT-1");
        assert!(rows.iter().all(|r| r.valid));
        assert!(rows[0].selected && !rows[0].focused);
        assert!(rows[2].focused && !rows[2].selected);
        assert_eq!(rows[1].color, ColorOptions::default().palette[1]);
    }

    #[test]
    fn status_text_includes_window_summary() {
        let engine = loaded(2);
        assert_eq!(
            engine.status_text(),
            "Loaded 2 satellites. Simulated window: 24 h (2 satellites, side-swing angle 20°)"
        );
    }

    #[test]
    fn shutdown_disconnects() {
        let mut engine = loaded(1);
        engine.shutdown();
        assert!(!engine.is_connected());
        assert!(engine.reload().is_err());
    }

    #[test]
    fn shutdown_fails_an_in_flight_reload() {
        let mut engine = loaded(1);
        engine.connect(Arc::new(MockTransport::new())).unwrap();
        let generation = engine.begin_reload();
        engine.shutdown();

        assert!(!engine.is_busy());
        assert_eq!(engine.load_status().to_string(), "Failed to load satellite data: disconnected");
        assert!(!engine.complete_reload(generation, 20.0, Ok(Vec::new())));
    }
}
