//! Collaborator contracts: where responses and log records go.

use http::StatusCode;

use crate::options::Severity;

/// Terminal error-response writer.
///
/// A transport accepts one terminal response per request cycle; whether a
/// second write is ignored or clobbers the first is the sink's business.
/// [`Error::send`](crate::Error::send) itself does not guard against being
/// called twice.
pub trait ResponseSink {
    /// Write one terminal error response.
    fn write_error(&mut self, status: StatusCode, body: &str);
}

/// Log-record writer with an explicit verbosity gate.
///
/// Sinks are expected to be usable across requests concurrently; a single
/// [`Error`](crate::Error) is not.
pub trait LogSink {
    /// Emit one record. `depth` is a call-depth hint for source-location
    /// attribution: the number of frames between this call and the code that
    /// detected the failure.
    fn emit(&self, severity: Severity, depth: usize, message: &str);

    /// Whether conditional records at the given verbosity level are
    /// currently enabled.
    fn verbose_enabled(&self, verbosity: u8) -> bool;
}

/// [`LogSink`] backed by the `tracing` ecosystem.
///
/// `tracing` attributes source location statically, so the depth hint is
/// carried as a `depth` field on each event rather than used to walk stack
/// frames. `tracing` also has no fatal level; [`Severity::Fatal`] maps to an
/// error-level event tagged `fatal = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    /// Gate for [`Severity::Verbose`] records: only levels at or below this
    /// value are emitted. Defaults to 0.
    pub verbosity: u8,
}

impl TracingSink {
    /// A sink admitting conditional records up to `verbosity`.
    #[must_use]
    pub const fn with_verbosity(verbosity: u8) -> Self {
        Self { verbosity }
    }
}

impl LogSink for TracingSink {
    fn emit(&self, severity: Severity, depth: usize, message: &str) {
        match severity {
            Severity::Info | Severity::Verbose(_) => tracing::info!(depth, "{message}"),
            Severity::Warning => tracing::warn!(depth, "{message}"),
            Severity::Error => tracing::error!(depth, "{message}"),
            Severity::Fatal => tracing::error!(depth, fatal = true, "{message}"),
            Severity::None => {}
        }
    }

    fn verbose_enabled(&self, verbosity: u8) -> bool {
        verbosity <= self.verbosity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_gate_admits_at_or_below() {
        let sink = TracingSink::with_verbosity(2);
        assert!(sink.verbose_enabled(1));
        assert!(sink.verbose_enabled(2));
        assert!(!sink.verbose_enabled(3));
    }

    #[test]
    fn default_gate_is_closed() {
        let sink = TracingSink::default();
        assert!(!sink.verbose_enabled(1));
    }
}
