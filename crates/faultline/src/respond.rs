//! axum integration: the handler adapter.
//!
//! With [`Error`] implementing [`IntoResponse`], a fallible handler
//! (`async fn(..) -> Result<T, Error>`) conforms to axum's infallible
//! handler shape with no further glue: a returned `Err` runs the abort
//! sequence and the routing layer sees an ordinary response.

use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::error::Error;
use crate::sink::{ResponseSink, TracingSink};

/// Buffered [`ResponseSink`] that converts into an axum [`Response`].
///
/// The first write wins, mirroring the transport's one-terminal-response
/// contract. When nothing was written (a send aborted on an unrecognized
/// status), the buffer converts into an empty 200 response — the same thing
/// the transport produces when a handler finishes without writing.
#[derive(Debug, Default)]
pub struct ResponseBuffer {
    written: Option<(StatusCode, String)>,
}

impl ResponseBuffer {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffered status and body, if a write happened.
    #[must_use]
    pub fn written(&self) -> Option<(StatusCode, &str)> {
        self.written.as_ref().map(|(status, body)| (*status, body.as_str()))
    }
}

impl ResponseSink for ResponseBuffer {
    fn write_error(&mut self, status: StatusCode, body: &str) {
        if self.written.is_none() {
            self.written = Some((status, body.to_owned()));
        }
    }
}

impl From<ResponseBuffer> for Response {
    fn from(buffer: ResponseBuffer) -> Self {
        match buffer.written {
            Some((status, body)) => (status, body).into_response(),
            None => ().into_response(),
        }
    }
}

impl IntoResponse for Error {
    /// The abort sequence as a response conversion: send into a
    /// [`ResponseBuffer`], then log through the default [`TracingSink`]
    /// (depth hint 3), then hand the buffered response to axum.
    fn into_response(mut self) -> Response {
        let mut buffer = ResponseBuffer::new();
        self.send(&mut buffer);
        self.log_at(&TracingSink::default(), 3);
        buffer.into()
    }
}
