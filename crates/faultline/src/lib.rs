//! Error-handling adapter for request pipelines.
//!
//! A handler returns one [`Error`] carrying an HTTP status code, a log
//! severity, an optional client-facing message override, and an "already
//! reported" flag. That single value becomes one client response and one
//! log record — exactly once each, no matter how many call sites touch it.
//!
//! ```
//! use faultline::{fault, MessageSource, Opt};
//!
//! let error = fault!("lookup failed: id={}", 5)
//!     .with([Opt::Status(404), Opt::Message(MessageSource::ErrorText)]);
//! assert_eq!(error.status(), 404);
//! assert_eq!(error.render(), "lookup failed: id=5");
//! ```
//!
//! Absence of failure is modeled as `Option`/`Ok`; every free function here
//! treats `None` as a universal no-op, so plumbing code never has to branch
//! on "did anything actually go wrong".

mod error;
mod options;
mod respond;
mod sink;

pub use error::Error;
pub use options::{MessageSource, Opt, Severity};
pub use respond::ResponseBuffer;
pub use sink::{LogSink, ResponseSink, TracingSink};

/// Convenience alias for fallible handlers.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Build a fresh [`Error`] from format arguments, with the same defaults as
/// [`Error::new`].
#[macro_export]
macro_rules! fault {
    ($($arg:tt)*) => {
        $crate::Error::from_cause($crate::__private::anyhow!($($arg)*))
    };
}

#[doc(hidden)]
pub mod __private {
    pub use anyhow::anyhow;
}

/// Convert any failure into an [`Error`], propagating absence.
///
/// `None` stays `None`. An existing [`Error`] passes through as-is — it is
/// never wrapped a second time — while a plain failure is wrapped without
/// losing its text. Options are then applied in order.
#[must_use]
pub fn wrap<E>(error: Option<E>, options: impl IntoIterator<Item = Opt>) -> Option<Error>
where
    E: Into<Error>,
{
    error.map(|e| e.into().with(options))
}

/// [`wrap`] followed by an immediate log emission (depth hint 2), for
/// callers that log at the point of detection rather than at the point of
/// response.
pub fn wrap_and_log<E>(
    error: Option<E>,
    sink: &dyn LogSink,
    options: impl IntoIterator<Item = Opt>,
) -> Option<Error>
where
    E: Into<Error>,
{
    wrap(error, options).map(|mut e| {
        e.log_at(sink, 2);
        e
    })
}

/// Apply options to an error that may be absent; `None` in, `None` out.
#[must_use]
pub fn apply(error: Option<Error>, options: impl IntoIterator<Item = Opt>) -> Option<Error> {
    error.map(|e| e.with(options))
}

/// Prepend context to a failure that may be absent. With `None` there is
/// nothing to preserve, so the text alone becomes a fresh [`Error`].
#[must_use]
pub fn annotate(error: Option<Error>, text: impl Into<String>) -> Error {
    match error {
        Some(e) => e.annotate(text),
        None => Error::new(text),
    }
}

/// Run the abort sequence on a failure that may be absent: wrap, respond,
/// then log (depth hint 3), in that fixed order. `None` means the handler
/// succeeded, and nothing touches either sink.
pub fn abort<E>(
    response: &mut dyn ResponseSink,
    log: &dyn LogSink,
    error: Option<E>,
    options: impl IntoIterator<Item = Opt>,
) -> Option<Error>
where
    E: Into<Error>,
{
    wrap(error, options).map(|e| e.abort(response, log))
}
