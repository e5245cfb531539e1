//! Background request processor for non-blocking network calls.
//!
//! The engine mutates state on one thread only. Network calls are handed to
//! this worker and their completions are drained by the engine's `poll`,
//! which plays the role of the completion continuation. Requests are served
//! in submission order and never cancelled; the engine tags each one with a
//! generation so a late completion for a superseded request can be dropped.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use super::HttpTransport;
use crate::coverage::{CoverageClient, CoverageQuery, CoverageResult};
use crate::data::{TrajectoryLoader, TrajectoryRecord};
use crate::error::SatVizError;

/// Work submitted to the processor thread.
#[derive(Debug, Clone, PartialEq)]
pub enum NetRequest {
    /// Fetch the trajectory dataset for a side-swing angle.
    LoadTrajectories {
        /// Reload generation this request belongs to.
        generation: u64,
        /// Side-swing angle in degrees.
        side_angle_deg: f64,
    },
    /// Run a point-coverage query.
    Coverage {
        /// Query generation this request belongs to.
        generation: u64,
        /// Validated query.
        query: CoverageQuery,
    },
    /// Stop the worker.
    Shutdown,
}

/// Completion delivered back to the engine.
#[derive(Debug)]
pub enum NetResponse {
    /// Trajectory dataset arrived (or failed).
    Trajectories {
        /// Generation of the originating request.
        generation: u64,
        /// Angle the dataset was computed for.
        side_angle_deg: f64,
        /// Records or a data error.
        result: Result<Vec<TrajectoryRecord>, SatVizError>,
    },
    /// Coverage query finished (or failed).
    Coverage {
        /// Generation of the originating request.
        generation: u64,
        /// The query that was sent.
        query: CoverageQuery,
        /// Parsed result or a query error.
        result: Result<CoverageResult, SatVizError>,
    },
}

/// Background thread that performs HTTP calls off the UI thread.
pub struct RequestProcessor {
    request_tx: mpsc::Sender<NetRequest>,
    response_rx: mpsc::Receiver<NetResponse>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl RequestProcessor {
    /// Spawn the worker thread over `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::ThreadSpawn`] if the thread fails to spawn.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Result<Self, SatVizError> {
        let (request_tx, request_rx) = mpsc::channel::<NetRequest>();
        let (response_tx, response_rx) = mpsc::channel::<NetResponse>();

        let thread = std::thread::Builder::new()
            .name("request-processor".into())
            .spawn(move || {
                Self::thread_loop(&transport, &request_rx, &response_tx);
            })
            .map_err(SatVizError::ThreadSpawn)?;

        Ok(Self {
            request_tx,
            response_rx,
            thread: Some(thread),
        })
    }

    /// Queue a request (non-blocking send).
    pub fn submit(&self, request: NetRequest) {
        if self.request_tx.send(request).is_err() {
            log::error!("request processor has stopped; request dropped");
        }
    }

    /// Non-blocking check for a completed request.
    #[must_use]
    pub fn try_recv(&self) -> Option<NetResponse> {
        self.response_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next completion.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<NetResponse> {
        self.response_rx.recv_timeout(timeout).ok()
    }

    /// Shut down the worker and wait for it to finish its current request.
    ///
    /// Blocks for up to one request timeout. Dropping the processor stops
    /// the worker without waiting.
    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(NetRequest::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }

    fn thread_loop(
        transport: &Arc<dyn HttpTransport>,
        request_rx: &mpsc::Receiver<NetRequest>,
        response_tx: &mpsc::Sender<NetResponse>,
    ) {
        let loader = TrajectoryLoader::new(Arc::clone(transport));
        let client = CoverageClient::new(Arc::clone(transport));

        while let Ok(request) = request_rx.recv() {
            let response = match request {
                NetRequest::Shutdown => break,
                NetRequest::LoadTrajectories {
                    generation,
                    side_angle_deg,
                } => NetResponse::Trajectories {
                    generation,
                    side_angle_deg,
                    result: loader.load(side_angle_deg),
                },
                NetRequest::Coverage { generation, query } => {
                    let result = client.fetch(&query);
                    NetResponse::Coverage {
                        generation,
                        query,
                        result,
                    }
                }
            };
            if response_tx.send(response).is_err() {
                // Engine dropped the receiver.
                break;
            }
        }
    }
}

impl Drop for RequestProcessor {
    fn drop(&mut self) {
        // Detach: the worker exits after its current request, once it sees
        // the shutdown message or the closed response channel.
        let _ = self.request_tx.send(NetRequest::Shutdown);
    }
}
