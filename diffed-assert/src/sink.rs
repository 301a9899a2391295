//! Where assertion failures are reported.

use core::fmt;
use core::panic::Location;
use std::sync::{Mutex, PoisonError};

use crate::{DiffTheme, Error};

/// Why an assertion did not pass.
#[derive(Debug)]
pub enum Failure {
    /// The values differ. Holds the user's message (if any), a newline, and
    /// the unified diff body without its header lines.
    Mismatch(String),
    /// The assertion machinery itself failed: an expression errored, JSON did
    /// not parse, the diff could not be computed, and so on.
    Harness(Error),
}

impl Failure {
    /// Whether this is a genuine mismatch rather than a harness failure.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Failure::Mismatch(_))
    }

    /// The harness error, if this is not a mismatch.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Failure::Mismatch(_) => None,
            Failure::Harness(e) => Some(e),
        }
    }
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::Harness(e)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Mismatch(message) => f.write_str(message),
            Failure::Harness(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// Receives assertion failures.
///
/// This decouples the evaluator from any particular test framework. Every
/// failing assertion is reported exactly once.
pub trait FailureSink {
    /// Report `failure`, raised by the assertion at `location`.
    fn report(&self, failure: Failure, location: &'static Location<'static>);
}

impl<S: FailureSink + ?Sized> FailureSink for &S {
    fn report(&self, failure: Failure, location: &'static Location<'static>) {
        (**self).report(failure, location)
    }
}

/// Fails the current test by panicking, which is how the built-in test
/// harness learns about failures.
///
/// The panic is raised inside [`FailureSink::report`], so the location the
/// harness prints is this crate's. The assertion's own location is the first
/// thing in the panic message: `diffed assertion failed at <file:line:col>`.
#[derive(Debug, Clone, Default)]
pub struct PanicSink {
    theme: Option<DiffTheme>,
}

impl PanicSink {
    /// A sink that panics with a plain-text message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint diff bodies with `theme` before panicking.
    pub fn with_theme(theme: Option<DiffTheme>) -> Self {
        Self { theme }
    }

    /// The panic message for `failure`, without the location prefix.
    ///
    /// Only the diff body of a mismatch is painted. The user's message on the
    /// first line is left as written, even if it starts with `-` or `+`.
    fn render(&self, failure: &Failure) -> String {
        match (&self.theme, failure) {
            (Some(theme), Failure::Mismatch(message)) => match message.split_once('\n') {
                Some((head, body)) => format!("{head}\n{}", theme.paint(body)),
                None => message.clone(),
            },
            _ => failure.to_string(),
        }
    }
}

impl FailureSink for PanicSink {
    fn report(&self, failure: Failure, location: &'static Location<'static>) {
        panic!("diffed assertion failed at {location}: {}", self.render(&failure));
    }
}

/// A failure together with the location of the assertion that raised it.
#[derive(Debug)]
pub struct Report {
    /// What went wrong.
    pub failure: Failure,
    /// Where the assertion was written.
    pub location: &'static Location<'static>,
}

/// Collects failures instead of failing.
///
/// Useful for testing assertions themselves, or for building a summary of
/// several checks before failing once.
///
/// ```
/// use diffed_assert::{AssertOptions, RecordingSink, assert_equal};
/// use std::convert::Infallible;
///
/// let sink = RecordingSink::new();
/// assert_equal(
///     || Ok::<_, Infallible>("a\nb"),
///     || Ok::<_, Infallible>("a\nc"),
///     || None,
///     &sink,
///     &AssertOptions::default(),
/// );
/// let reports = sink.take();
/// assert_eq!(reports.len(), 1);
/// assert_eq!(reports[0].failure.to_string(), "\n@@ -1,2 +1,2 @@\n a\n-b\n\\ No newline at end of file\n+c\n\\ No newline at end of file\n");
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<Report>>,
}

impl RecordingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of failures reported so far.
    pub fn len(&self) -> usize {
        self.reports().len()
    }

    /// Whether nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return everything reported so far.
    pub fn take(&self) -> Vec<Report> {
        core::mem::take(&mut *self.reports())
    }

    fn reports(&self) -> std::sync::MutexGuard<'_, Vec<Report>> {
        // A panicking reader cannot leave the vector half-updated.
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FailureSink for RecordingSink {
    fn report(&self, failure: Failure, location: &'static Location<'static>) {
        tracing::debug!(%location, mismatch = failure.is_mismatch(), "recorded assertion failure");
        self.reports().push(Report { failure, location });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn recording_sink_collects_in_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());
        sink.report(Failure::Mismatch("first".into()), Location::caller());
        sink.report(Error::DegenerateMismatch.into(), Location::caller());
        assert_eq!(sink.len(), 2);

        let reports = sink.take();
        assert!(reports[0].failure.is_mismatch());
        assert!(matches!(
            reports[1].failure.error(),
            Some(Error::DegenerateMismatch)
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn harness_failures_display_their_error() {
        let failure = Failure::from(Error::Expression {
            side: Side::Right,
            message: "boom".into(),
        });
        assert_eq!(failure.to_string(), "expression 2 failed: boom");
    }

    #[test]
    #[should_panic(expected = "diffed assertion failed at")]
    fn panic_sink_panics() {
        PanicSink::new().report(Failure::Mismatch("\n-a\n+b\n".into()), Location::caller());
    }

    #[test]
    fn only_the_diff_body_is_painted() {
        let sink = PanicSink::with_theme(Some(DiffTheme::default()));
        let failure = Failure::Mismatch("- not a removal\n@@ -1 +1 @@\n-a\n+b\n".into());

        let rendered = sink.render(&failure);
        let (head, body) = rendered.split_once('\n').unwrap();
        assert_eq!(head, "- not a removal");
        assert!(body.starts_with("\x1b["));
        assert!(body.contains("-a"));
    }

    #[test]
    fn plain_sink_renders_the_message_as_is() {
        let failure = Failure::Mismatch("+ user text\n-a\n+b\n".into());
        assert_eq!(PanicSink::new().render(&failure), "+ user text\n-a\n+b\n");

        let harness = Failure::from(Error::DegenerateMismatch);
        let themed = PanicSink::with_theme(Some(DiffTheme::default()));
        assert_eq!(themed.render(&harness), harness.to_string());
    }
}
