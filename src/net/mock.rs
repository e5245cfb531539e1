//! Canned-response transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use rustc_hash::FxHashMap;

use super::{HttpResponse, HttpTransport};
use crate::error::SatVizError;

#[derive(Clone)]
enum Reply {
    Response(HttpResponse),
    Fail(String),
}

/// Replies are queued per path; the last reply for a path repeats.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<FxHashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, path: &str, status: u16, body: &str) {
        self.push(
            path,
            Reply::Response(HttpResponse {
                status,
                body: body.to_owned(),
            }),
        );
    }

    pub(crate) fn fail(&self, path: &str, message: &str) {
        self.push(path, Reply::Fail(message.to_owned()));
    }

    fn push(&self, path: &str, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.entry(path.to_owned()).or_default().push_back(reply);
        }
    }

    /// Every request issued so far as `(path, query)`.
    pub(crate) fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls().len()
    }
}

impl HttpTransport for MockTransport {
    fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, SatVizError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((
                path.to_owned(),
                query
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), v.clone()))
                    .collect(),
            ));
        }
        let reply = self.replies.lock().ok().and_then(|mut replies| {
            let queue = replies.get_mut(path)?;
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(SatVizError::Transport(message)),
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"error": "not found"}"#.to_owned(),
            }),
        }
    }
}
