//! In-process unified diff rendering.

use similar::{Algorithm, TextDiff};

use crate::{DiffEngine, DiffOutcome, Error};

/// Computes unified diffs in-process, without touching the filesystem.
///
/// Lines are compared with Myers' algorithm. The output follows GNU `diff -u`
/// conventions: a line count of 1 is left out of hunk headers, an empty range
/// points at the line before it, and a last line without a trailing newline
/// is followed by `\ No newline at end of file`.
///
/// ```
/// use diffed_assert::{DiffEngine, DiffOutcome, LineDiff};
///
/// let outcome = LineDiff.unified_diff("a\nb\n", "a\nc\n", 3).unwrap();
/// assert_eq!(
///     outcome,
///     DiffOutcome::Changed("--- left\n+++ right\n@@ -1,2 +1,2 @@\n a\n-b\n+c\n".into())
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LineDiff;

impl DiffEngine for LineDiff {
    fn unified_diff(
        &self,
        left: &str,
        right: &str,
        context: usize,
    ) -> Result<DiffOutcome, Error> {
        if left == right {
            return Ok(DiffOutcome::Identical);
        }

        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_lines(left, right);

        tracing::debug!(
            left_lines = diff.old_slices().len(),
            right_lines = diff.new_slices().len(),
            ops = diff.ops().len(),
            "computed line diff"
        );

        let rendered = diff
            .unified_diff()
            .context_radius(context)
            .missing_newline_hint(true)
            .header("left", "right")
            .to_string();
        Ok(DiffOutcome::Changed(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn changed(left: &str, right: &str, context: usize) -> String {
        match LineDiff.unified_diff(left, right, context).unwrap() {
            DiffOutcome::Changed(diff) => diff,
            DiffOutcome::Identical => panic!("expected a diff"),
        }
    }

    #[test]
    fn identical_texts() {
        assert_eq!(
            LineDiff.unified_diff("same\n", "same\n", 3).unwrap(),
            DiffOutcome::Identical
        );
    }

    #[test]
    fn insertion_into_empty_text() {
        assert_eq!(
            changed("", "x\n", 3),
            "--- left\n+++ right\n@@ -0,0 +1 @@\n+x\n"
        );
    }

    #[test]
    fn deletion_at_end_keeps_leading_context() {
        assert_eq!(
            changed("1\n2\n3\n4\n5\n6\n", "1\n2\n3\n4\n5\n", 3),
            "--- left\n+++ right\n@@ -3,4 +3,3 @@\n 3\n 4\n 5\n-6\n"
        );
    }

    #[test]
    fn distant_changes_get_separate_hunks() {
        let left = indoc! {"
            a
            b
            c
            d
            e
            f
            g
            h
            i
            j
        "};
        let right = left.replace("b\n", "B\n").replace("i\n", "I\n");
        insta::assert_snapshot!(changed(left, &right, 1), @r"
--- left
+++ right
@@ -1,3 +1,3 @@
 a
-b
+B
 c
@@ -8,3 +8,3 @@
 h
-i
+I
 j
");
    }

    #[test]
    fn nearby_changes_share_a_hunk() {
        let left = "a\nb\nc\nd\ne\n";
        let right = "A\nb\nc\nd\nE\n";
        assert_eq!(
            changed(left, right, 2),
            "--- left\n+++ right\n@@ -1,5 +1,5 @@\n-a\n+A\n b\n c\n d\n-e\n+E\n"
        );
    }

    #[test]
    fn missing_trailing_newline_is_marked() {
        assert_eq!(
            changed("a\nb", "a\nc", 3),
            "--- left\n+++ right\n@@ -1,2 +1,2 @@\n a\n-b\n\\ No newline at end of file\n+c\n\\ No newline at end of file\n"
        );
    }

    #[test]
    fn zero_context() {
        assert_eq!(
            changed("a\nb\nc\n", "a\nx\nc\n", 0),
            "--- left\n+++ right\n@@ -2 +2 @@\n-b\n+x\n"
        );
    }

    #[test]
    fn changes_at_both_ends_of_a_long_text() {
        let left: String = (0..50_000).map(|i| format!("    item {i},\n")).collect();
        let right = format!("[\n{left}]\n");

        let diff = changed(&left, &right, 3);
        let headers: Vec<&str> = diff.lines().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers, ["@@ -1,3 +1,4 @@", "@@ -49998,3 +49999,4 @@"]);
        assert!(diff.ends_with("     item 49999,\n+]\n"));
    }
}
