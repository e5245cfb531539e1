//! Crate-level error types.

use std::fmt;

use crate::scene::SceneError;

/// Errors produced by the satviz crate.
#[derive(Debug)]
pub enum SatVizError {
    /// Rendering backend unavailable or misconfigured. Fatal to the whole
    /// visualization.
    Initialization(String),
    /// Trajectory endpoint failure or an embedded `error` field.
    Data(String),
    /// One satellite's visuals could not be constructed.
    Record {
        /// Satellite name from the trajectory record.
        name: String,
        /// What went wrong.
        message: String,
    },
    /// Rejected user input (time, angle, coordinates, selection).
    Validation(String),
    /// Coverage query failure.
    Query {
        /// HTTP status, when the failure came from a response.
        status: Option<u16>,
        /// Backend or transport message.
        message: String,
    },
    /// Network-level failure before any response arrived.
    Transport(String),
    /// The scene rejected an operation.
    Scene(SceneError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for SatVizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialization(msg) => {
                write!(f, "initialization error: {msg}")
            }
            Self::Data(msg) => write!(f, "data error: {msg}"),
            Self::Record { name, message } => {
                write!(f, "failed to build satellite '{name}': {message}")
            }
            Self::Validation(msg) => write!(f, "invalid input: {msg}"),
            Self::Query {
                status: Some(status),
                message,
            } => write!(f, "query failed (HTTP {status}): {message}"),
            Self::Query {
                status: None,
                message,
            } => write!(f, "query failed: {message}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Scene(e) => write!(f, "scene error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SatVizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scene(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SceneError> for SatVizError {
    fn from(e: SceneError) -> Self {
        Self::Scene(e)
    }
}

impl From<std::io::Error> for SatVizError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl SatVizError {
    /// Whether the error must be shown to the user synchronously (blocking
    /// confirmation) rather than in a status area.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_display_includes_status() {
        let err = SatVizError::Query {
            status: Some(500),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "query failed (HTTP 500): boom");
    }

    #[test]
    fn scene_error_is_source() {
        use std::error::Error;
        let err = SatVizError::from(SceneError::UnknownObject(7));
        assert!(err.source().is_some());
        assert!(!err.is_validation());
    }
}
