//! Configuration for assertions.

use std::sync::Arc;

use crate::{DEFAULT_CONTEXT, DiffEngine, DiffTheme, ExternalDiff, LineDiff};

/// Options for customizing how a mismatch is diffed and reported.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use diffed_assert::{AssertOptions, ExternalDiff};
///
/// let options = AssertOptions::new()
///     .context(5)
///     .engine(ExternalDiff::default());
/// assert_eq!(options.context_lines(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct AssertOptions {
    /// Unchanged lines shown around each change.
    context: usize,

    /// What computes the diff.
    engine: Arc<dyn DiffEngine>,

    /// If set, panic messages paint the diff with these colors.
    theme: Option<DiffTheme>,
}

impl Default for AssertOptions {
    fn default() -> Self {
        Self {
            context: DEFAULT_CONTEXT,
            engine: Arc::new(LineDiff),
            theme: None,
        }
    }
}

impl AssertOptions {
    /// Default settings: three lines of context, in-process diffing, no colors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the environment. This is what the assertion macros
    /// use.
    ///
    /// - `DIFFED_ENGINE=external` diffs with the `diff` program on `PATH`.
    /// - `DIFFED_CONTEXT=<n>` shows `n` lines of context.
    /// - `DIFFED_COLOR=1` (or `always`) colors panic messages.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();

        if lookup("DIFFED_ENGINE").as_deref() == Some("external") {
            options = options.engine(ExternalDiff::default());
        }

        if let Some(raw) = lookup("DIFFED_CONTEXT") {
            match raw.trim().parse() {
                Ok(context) => options.context = context,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring DIFFED_CONTEXT"),
            }
        }

        if matches!(lookup("DIFFED_COLOR").as_deref(), Some("1" | "always")) {
            options.theme = Some(DiffTheme::default());
        }

        options
    }

    /// Show `lines` unchanged lines around each change.
    pub fn context(mut self, lines: usize) -> Self {
        self.context = lines;
        self
    }

    /// Compute diffs with `engine`.
    pub fn engine(mut self, engine: impl DiffEngine + 'static) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Paint panic messages with `theme`.
    pub fn theme(mut self, theme: DiffTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Never paint panic messages.
    pub fn plain(mut self) -> Self {
        self.theme = None;
        self
    }

    /// Unchanged lines shown around each change.
    pub fn context_lines(&self) -> usize {
        self.context
    }

    /// The engine that computes diffs.
    pub fn diff_engine(&self) -> &dyn DiffEngine {
        &*self.engine
    }

    /// The color theme for panic messages, if any.
    pub fn color_theme(&self) -> Option<&DiffTheme> {
        self.theme.as_ref()
    }
}
