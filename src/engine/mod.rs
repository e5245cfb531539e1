//! The satellite visualization engine and its controllers.
//!
//! [`SatVizEngine`] owns the scene and all interactive state. Its methods
//! are split by concern: view control, playback, dataset reloads, coverage
//! queries and read accessors. [`SatVizCommand`] is the complete user
//! vocabulary routed through [`SatVizEngine::execute`].

mod accessors;
mod command;
mod playback;
mod query;
mod reload;
mod view_control;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use self::accessors::SatelliteSummary;
pub use self::command::SatVizCommand;
pub use self::playback::PlaybackController;
pub use self::reload::LoadStatus;
use self::query::QueryState;
use self::reload::LoadState;
use crate::clock::ClockState;
use crate::entity::{EntityFactory, EntityRegistry};
use crate::error::SatVizError;
use crate::net::{HttpTransport, NetRequest, NetResponse, RequestProcessor};
use crate::options::{Options, SessionConfig};
use crate::scene::SceneInterface;
use crate::view::ViewState;

/// The satellite visualization engine.
///
/// Owns the scene, the satellite registry and every piece of interactive
/// state (view, playback, loading, query). All mutation happens through
/// `&mut self` methods on the caller's thread; network work is delegated to
/// a [`RequestProcessor`] whose completions are applied in [`Self::poll`].
///
/// Each asynchronous operation is split into a `begin_*` step that
/// performs the synchronous side effects and returns a generation number,
/// and a `complete_*` step that applies the response. [`Self::poll`] wires
/// the two together; embedders with their own I/O can call them directly.
pub struct SatVizEngine<S: SceneInterface> {
    scene: S,
    options: Options,
    factory: EntityFactory,
    registry: EntityRegistry,
    view: ViewState,
    playback: PlaybackController,
    processor: Option<RequestProcessor>,
    load: LoadState,
    query: QueryState,
}

impl<S: SceneInterface> SatVizEngine<S> {
    /// Create an engine over `scene`.
    ///
    /// The simulated clock starts at the session's initial time (or `now`
    /// when none is configured), paused, with the configured multiplier and
    /// window. It is pushed to the scene immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Initialization`] if the session has no model
    /// URI for satellite markers.
    pub fn new(
        mut scene: S,
        options: Options,
        session: &SessionConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, SatVizError> {
        let model_uri = session.model_uri()?;
        if !session.has_access_token() {
            log::warn!("no access token configured; base imagery may be unavailable");
        }

        let start = session.start_time(now);
        let clock = ClockState::new(
            start,
            options.playback.window_seconds(),
            options.playback.multiplier,
        );
        scene.set_clock(clock.clone());
        log::info!(
            "engine initialized: window {} to {}, {}x",
            clock.start,
            clock.stop,
            clock.multiplier
        );

        Ok(Self {
            factory: EntityFactory::new(&options, model_uri),
            registry: EntityRegistry::new(),
            view: ViewState::new(&options.display),
            playback: PlaybackController::new(clock),
            processor: None,
            load: LoadState::default(),
            query: QueryState::default(),
            scene,
            options,
        })
    }

    /// Start the background request processor over `transport`.
    ///
    /// Replaces any previous processor. A reload or query still awaited
    /// from the old one can no longer complete and is marked failed.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::ThreadSpawn`] if the worker thread fails to
    /// start.
    pub fn connect(&mut self, transport: Arc<dyn HttpTransport>) -> Result<(), SatVizError> {
        let processor = RequestProcessor::new(transport)?;
        if self.processor.replace(processor).is_some() {
            self.abandon_pending();
        }
        log::debug!("request processor connected");
        Ok(())
    }

    /// Mark whatever the dropped processor still owed us as failed.
    fn abandon_pending(&mut self) {
        const REASON: &str = "disconnected";
        if self.load.abandon(REASON) {
            log::warn!("reload abandoned: request processor {REASON}");
        }
        if self.query.abandon(REASON) {
            log::warn!("coverage query abandoned: request processor {REASON}");
        }
    }

    /// Whether a request processor is running.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.processor.is_some()
    }

    fn ensure_connected(&self) -> Result<(), SatVizError> {
        if self.processor.is_some() {
            Ok(())
        } else {
            Err(SatVizError::Transport(
                "no backend connection; call connect() first".to_owned(),
            ))
        }
    }

    fn dispatch(&self, request: NetRequest) -> Result<(), SatVizError> {
        self.ensure_connected()?;
        if let Some(processor) = &self.processor {
            processor.submit(request);
        }
        Ok(())
    }

    /// Apply every completed network request. Returns how many were
    /// handled (stale ones included).
    pub fn poll(&mut self) -> usize {
        let Some(processor) = &self.processor else {
            return 0;
        };
        let responses: Vec<NetResponse> =
            std::iter::from_fn(|| processor.try_recv()).collect();
        let count = responses.len();
        for response in responses {
            self.handle_response(response);
        }
        count
    }

    /// Block up to `timeout` for one completion and apply it. Returns
    /// whether a completion arrived.
    pub fn wait(&mut self, timeout: std::time::Duration) -> bool {
        let Some(response) = self
            .processor
            .as_ref()
            .and_then(|processor| processor.recv_timeout(timeout))
        else {
            return false;
        };
        self.handle_response(response);
        true
    }

    fn handle_response(&mut self, response: NetResponse) {
        match response {
            NetResponse::Trajectories {
                generation,
                side_angle_deg,
                result,
            } => {
                let _ = self.complete_reload(generation, side_angle_deg, result);
            }
            NetResponse::Coverage {
                generation,
                query: _,
                result,
            } => {
                let _ = self.complete_query(generation, result);
            }
        }
    }

    /// Whether a reload or query is still awaiting its response.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.load.status == LoadStatus::Loading || self.query.is_pending()
    }

    /// Execute a user-level command.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation; validation
    /// failures leave all state untouched.
    pub fn execute(&mut self, command: SatVizCommand) -> Result<(), SatVizError> {
        match command {
            SatVizCommand::FocusOn(index) => self.focus_on(index),
            SatVizCommand::Select(index) => self.select(index),
            SatVizCommand::ShowAll => {
                self.show_all();
                Ok(())
            }
            SatVizCommand::ResetView => {
                self.reset_view();
                Ok(())
            }
            SatVizCommand::ToggleOrbits => {
                let _ = self.toggle_orbits();
                Ok(())
            }
            SatVizCommand::ToggleProjections => {
                let _ = self.toggle_projections();
                Ok(())
            }
            SatVizCommand::ToggleLabels => {
                let _ = self.toggle_labels();
                Ok(())
            }
            SatVizCommand::SetSideSwingAngle(angle) => self.set_side_swing_angle(angle),
            SatVizCommand::Reload => self.reload(),
            SatVizCommand::TogglePlayPause => {
                let _ = self.toggle_play_pause();
                Ok(())
            }
            SatVizCommand::ResetTime => {
                self.reset_time();
                Ok(())
            }
            SatVizCommand::ChangeSpeed(multiplier) => self.change_speed(multiplier),
            SatVizCommand::JumpToTime(input) => self.jump_to_time(&input),
            SatVizCommand::EnableRealTime => {
                self.enable_real_time(Utc::now());
                Ok(())
            }
            SatVizCommand::QueryCoverage {
                latitude,
                longitude,
            } => self.query_coverage(latitude, longitude),
            SatVizCommand::ActivateResult(index) => self.activate_result(index),
        }
    }

    /// Replace the runtime options. Display toggles and playback settings
    /// take effect on the next reload; colors and marker styling apply to
    /// satellites built from then on.
    pub fn set_options(&mut self, options: Options) {
        self.factory.set_options(&options);
        self.options = options;
    }
}
