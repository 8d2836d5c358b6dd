//! Options applied to an [`Error`]: status code, log severity, and the
//! client-facing message strategy.

use crate::error::Error;

/// Log severity attached to an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Suppress the log record entirely. The error is still marked logged.
    None,
    /// Conditional record: emitted at info level only when the log sink's
    /// verbosity gate admits the given level, and suppressed (but still
    /// marked logged) otherwise.
    Verbose(u8),
    /// Informational record.
    Info,
    /// Warning record.
    Warning,
    /// Error record (the default).
    #[default]
    Error,
    /// Fatal record. How fatal is handled is the sink's business; the
    /// default tracing sink reports it as an error-level event tagged
    /// `fatal = true`.
    Fatal,
}

/// How the client-facing response body is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MessageSource {
    /// The canonical reason phrase for the status code (the default).
    #[default]
    StatusText,
    /// The wrapped failure's own rendered text.
    ErrorText,
    /// Caller-supplied literal text. An empty string falls back to the
    /// canonical reason phrase.
    Alternate(String),
}

/// A single customization applied to an [`Error`].
///
/// Options are stateless values: applying the same option twice is
/// idempotent, and when several target the same field the last one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opt {
    /// Set the HTTP status code. Validity is only checked at send time.
    Status(u16),
    /// Set the log severity.
    Severity(Severity),
    /// Set the message strategy.
    Message(MessageSource),
}

impl Opt {
    pub(crate) fn apply(self, error: &mut Error) {
        match self {
            Self::Status(code) => error.status = code,
            Self::Severity(severity) => error.severity = severity,
            Self::Message(message) => error.message = message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_option_twice_is_idempotent() {
        let error = Error::new("boom").with([Opt::Status(404), Opt::Status(404)]);
        assert_eq!(error.status(), 404);
    }

    #[test]
    fn last_option_wins_per_field() {
        let error = Error::new("boom").with([
            Opt::Status(400),
            Opt::Severity(Severity::Warning),
            Opt::Status(422),
        ]);
        assert_eq!(error.status(), 422);
        assert_eq!(error.severity(), Severity::Warning);
    }

    #[test]
    fn options_target_independent_fields() {
        let error = Error::new("boom").with([
            Opt::Message(MessageSource::ErrorText),
            Opt::Severity(Severity::Info),
        ]);
        assert_eq!(error.status(), 500);
        assert_eq!(error.severity(), Severity::Info);
    }
}
