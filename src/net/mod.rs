//! Network plumbing: the blocking HTTP transport seam and the background
//! thread that keeps it off the engine's thread.

#[cfg(test)]
pub(crate) mod mock;
mod processor;
mod transport;

pub use processor::{NetRequest, NetResponse, RequestProcessor};
#[cfg(feature = "http")]
pub use transport::UreqTransport;
pub use transport::{HttpResponse, HttpTransport};
