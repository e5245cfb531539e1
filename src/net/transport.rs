use crate::error::SatVizError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Response with status 200.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking GET transport to the backend service.
///
/// Implementations must return non-2xx responses as `Ok` so callers can read
/// the embedded `error` field; only failures that produced no response at
/// all are `Err`.
pub trait HttpTransport: Send + Sync {
    /// Issue `GET {base}{path}?{query}`.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Transport`] when no response was received.
    fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, SatVizError>;
}

#[cfg(feature = "http")]
mod ureq_transport {
    use std::time::Duration;

    use super::{HttpResponse, HttpTransport};
    use crate::error::SatVizError;

    /// Upper bound on a response body; trajectory payloads for large
    /// constellations run to tens of megabytes.
    const BODY_LIMIT: u64 = 128 * 1024 * 1024;

    /// [`HttpTransport`] backed by a shared `ureq` agent.
    pub struct UreqTransport {
        base_url: String,
        agent: ureq::Agent,
    }

    impl UreqTransport {
        /// Transport rooted at `base_url` (e.g. `http://localhost:5000`).
        #[must_use]
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
            let config = ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .http_status_as_error(false)
                .build();
            Self {
                base_url: base_url.into().trim_end_matches('/').to_owned(),
                agent: ureq::Agent::new_with_config(config),
            }
        }

        /// Base URL requests are issued against.
        #[must_use]
        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    impl HttpTransport for UreqTransport {
        fn get(
            &self,
            path: &str,
            query: &[(&str, String)],
        ) -> Result<HttpResponse, SatVizError> {
            let url = format!("{}{path}", self.base_url);
            let mut request = self.agent.get(&url);
            for (key, value) in query {
                request = request.query(*key, value.as_str());
            }
            log::debug!("GET {url} {query:?}");

            let response = request
                .call()
                .map_err(|e| SatVizError::Transport(format!("GET {url}: {e}")))?;
            let status = response.status().as_u16();
            let body = response
                .into_body()
                .with_config()
                .limit(BODY_LIMIT)
                .read_to_string()
                .map_err(|e| {
                    SatVizError::Transport(format!(
                        "failed to read response from {url}: {e}"
                    ))
                })?;
            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "http")]
pub use ureq_transport::UreqTransport;
