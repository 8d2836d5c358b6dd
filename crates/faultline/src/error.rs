//! The error value and its two idempotent emissions.

use std::borrow::Cow;
use std::fmt;

use http::StatusCode;

use crate::options::{MessageSource, Opt, Severity};
use crate::sink::{LogSink, ResponseSink};

/// A failure tagged for transport: an HTTP status code, a log severity, an
/// optional client-facing message override, and an "already reported" flag.
///
/// One `Error` is created per failure occurrence and consumed within a
/// single request cycle. After construction and option application, the only
/// state that moves is the logged flag (set by [`Error::log`], cleared by
/// [`Error::annotate`]) and the wrapped failure text (rewritten by
/// [`Error::annotate`]).
///
/// Like `anyhow::Error`, this type deliberately does not implement
/// `std::error::Error`, so that any ordinary error converts into it with
/// `?` via the blanket `From` impl.
#[derive(Debug)]
#[must_use]
pub struct Error {
    pub(crate) status: u16,
    pub(crate) severity: Severity,
    pub(crate) logged: bool,
    pub(crate) source: anyhow::Error,
    pub(crate) message: MessageSource,
}

impl Error {
    /// Build a fresh error from literal text with the defaults: status 500,
    /// severity [`Severity::Error`], canonical status text for the client.
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_source(anyhow::Error::msg(text.into()))
    }

    /// Build an error around an existing failure without losing its text or
    /// cause chain, with the same defaults as [`Error::new`].
    ///
    /// Ordinary errors also convert through the blanket `From` impl (and
    /// therefore through `?`); this constructor additionally accepts
    /// `anyhow::Error` values, which `From` cannot cover.
    pub fn from_cause(cause: impl Into<anyhow::Error>) -> Self {
        Self::from_source(cause.into())
    }

    fn from_source(source: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            severity: Severity::default(),
            logged: false,
            source,
            message: MessageSource::default(),
        }
    }

    /// Apply options in order. Later options override earlier ones when
    /// they target the same field.
    pub fn with(mut self, options: impl IntoIterator<Item = Opt>) -> Self {
        for option in options {
            option.apply(&mut self);
        }
        self
    }

    /// The HTTP status code as currently set. May hold an unrecognized
    /// value; validity is only checked by [`Error::send`].
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// The log severity as currently set.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Whether a log emission has already consumed this error.
    #[must_use]
    pub const fn logged(&self) -> bool {
        self.logged
    }

    /// The wrapped failure's rendered text, annotation chain included
    /// (`outer: inner`).
    #[must_use]
    pub fn render(&self) -> String {
        format!("{:#}", self.source)
    }

    /// Prepend context to the wrapped failure, rendering as
    /// `text: previous`, and clear the logged flag: the message materially
    /// changed, so it deserves a fresh record if logged again.
    pub fn annotate(mut self, text: impl Into<String>) -> Self {
        self.source = self.source.context(text.into());
        self.logged = false;
        self
    }

    /// Write the status code and resolved message to `sink`, exactly once —
    /// unless the status code is unrecognized, in which case nothing at all
    /// is written rather than a malformed status line.
    ///
    /// Message precedence: non-empty [`MessageSource::Alternate`] text, then
    /// the failure's own text for [`MessageSource::ErrorText`], then the
    /// canonical reason phrase (which is also the fallback for an empty
    /// alternate).
    ///
    /// Unlike [`Error::log`], `send` is not self-guarding: calling it twice
    /// writes twice unless the sink refuses the second write.
    pub fn send(&self, sink: &mut dyn ResponseSink) -> &Self {
        let Ok(status) = StatusCode::from_u16(self.status) else {
            return self;
        };
        let Some(reason) = status.canonical_reason() else {
            return self;
        };

        let body: Cow<'_, str> = match &self.message {
            MessageSource::Alternate(text) if !text.is_empty() => Cow::Borrowed(text),
            MessageSource::ErrorText => Cow::Owned(self.render()),
            MessageSource::StatusText | MessageSource::Alternate(_) => Cow::Borrowed(reason),
        };

        sink.write_error(status, &body);
        self
    }

    /// Emit one log record for this error, at most once over its lifetime.
    ///
    /// Equivalent to [`Error::log_at`] with a depth hint of 2: one frame for
    /// this method, one for the caller that detected the failure.
    pub fn log(&mut self, sink: &dyn LogSink) -> &mut Self {
        self.log_at(sink, 2)
    }

    /// Emit one log record with an explicit call-depth hint.
    ///
    /// No-ops if the error has already been logged, or if the failure
    /// renders to empty text (nothing to log). [`Severity::None`] suppresses
    /// the record but still marks the error logged. [`Severity::Verbose`]
    /// emits at info level only when the sink's verbosity gate admits it,
    /// and marks the error logged either way — the guarantee is "at most
    /// once ever", so a later severity change does not resurrect the
    /// record; only [`Error::annotate`] does.
    pub fn log_at(&mut self, sink: &dyn LogSink, depth: usize) -> &mut Self {
        if self.logged {
            return self;
        }
        let message = self.render();
        if message.is_empty() {
            return self;
        }

        match self.severity {
            Severity::None => {}
            Severity::Verbose(level) => {
                if sink.verbose_enabled(level) {
                    sink.emit(Severity::Info, depth + 1, &message);
                }
            }
            severity => sink.emit(severity, depth + 1, &message),
        }
        self.logged = true;
        self
    }

    /// Run the abort sequence for an error already in hand: respond first,
    /// then log (depth hint 3), in that fixed order — the client never
    /// waits on log I/O.
    pub fn abort(mut self, response: &mut dyn ResponseSink, log: &dyn LogSink) -> Self {
        self.send(response);
        self.log_at(log, 3);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.source)
    }
}

impl<E> From<E> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(source: E) -> Self {
        Self::from_source(anyhow::Error::new(source))
    }
}
