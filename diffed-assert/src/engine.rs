//! The seam between the assertion evaluator and whatever computes the diff.

use core::fmt;

use crate::Error;

/// Number of unchanged lines shown around each change, as in `diff -u`.
pub const DEFAULT_CONTEXT: usize = 3;

/// Result of diffing two texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// The texts are identical.
    Identical,
    /// The texts differ. Holds the complete unified diff, starting with the
    /// `---` and `+++` header lines.
    Changed(String),
}

/// Something that can produce a unified diff of two texts.
///
/// [`LineDiff`](crate::LineDiff) computes the diff in-process and is the
/// default. [`ExternalDiff`](crate::ExternalDiff) shells out to a `diff`
/// program.
pub trait DiffEngine: fmt::Debug + Send + Sync {
    /// Diff `left` against `right`, showing `context` unchanged lines around
    /// each change.
    ///
    /// # Errors
    ///
    /// Any error means no diff could be produced, which is distinct from the
    /// texts being different.
    fn unified_diff(&self, left: &str, right: &str, context: usize)
    -> Result<DiffOutcome, Error>;
}

/// Drop the two header lines (`---` and `+++`) from a unified diff.
///
/// Those lines name the inputs, which are meaningless temporary paths or
/// placeholders. Returns `None` if the text has fewer than two
/// newline-terminated lines.
///
/// ```
/// use diffed_assert::strip_diff_header;
///
/// let diff = "--- a\n+++ b\n@@ -1 +1 @@\n-x\n+y\n";
/// assert_eq!(strip_diff_header(diff), Some("@@ -1 +1 @@\n-x\n+y\n"));
/// assert_eq!(strip_diff_header("--- a\n+++ b"), None);
/// ```
pub fn strip_diff_header(diff: &str) -> Option<&str> {
    let mut parts = diff.splitn(3, '\n');
    let _old = parts.next()?;
    let _new = parts.next()?;
    parts.next()
}
