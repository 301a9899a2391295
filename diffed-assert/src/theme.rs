//! Colors for diff output in panic messages.

use owo_colors::{OwoColorize, Rgb};

/// Color theme used by [`PanicSink`](crate::PanicSink) to paint unified diffs.
///
/// Only panic output is colored; [`Failure`](crate::Failure) messages are
/// always plain text. The default uses Tokyo Night colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTheme {
    /// Color for removed lines (default: red)
    pub deleted: Rgb,

    /// Color for added lines (default: green)
    pub inserted: Rgb,

    /// Color for `@@` hunk headers (default: blue)
    pub hunk: Rgb,

    /// Color for `\ No newline at end of file` markers (default: gray)
    pub note: Rgb,
}

impl Default for DiffTheme {
    fn default() -> Self {
        Self::TOKYO_NIGHT
    }
}

impl DiffTheme {
    /// Tokyo Night color theme (default).
    pub const TOKYO_NIGHT: Self = Self {
        deleted: Rgb(247, 118, 142),  // red
        inserted: Rgb(158, 206, 106), // green
        hunk: Rgb(122, 162, 247),     // blue
        note: Rgb(86, 95, 137),       // gray
    };

    /// Paint the lines of a unified diff body. Context lines and any text
    /// that is not part of the diff are left alone.
    pub fn paint(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let color = if line.starts_with("@@") {
                Some(self.hunk)
            } else if line.starts_with('\\') {
                Some(self.note)
            } else if line.starts_with('-') {
                Some(self.deleted)
            } else if line.starts_with('+') {
                Some(self.inserted)
            } else {
                None
            };
            match color {
                Some(color) => out.push_str(&line.color(color).to_string()),
                None => out.push_str(line),
            }
        }
        out
    }
}
