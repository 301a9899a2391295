//! The subprocess-backed engine. Tests that need a `diff` program skip
//! themselves when none is installed.

use std::convert::Infallible;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use diffed_assert::{
    AssertOptions, DiffEngine, DiffOutcome, ExternalDiff, LineDiff, RecordingSink, assert_equal,
    strip_diff_header,
};
use diffed_testhelpers::test;

fn diff_available() -> bool {
    let found = Command::new("diff")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success());
    if !found {
        eprintln!("skipping: no `diff` program on PATH");
    }
    found
}

/// Wait for background cleanup to empty `dir`.
fn wait_until_empty(dir: &Path) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let remaining = std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0);
        if remaining == 0 {
            return true;
        }
        if Instant::now() > deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

fn body(outcome: DiffOutcome) -> String {
    match outcome {
        DiffOutcome::Changed(diff) => strip_diff_header(&diff).unwrap().to_owned(),
        DiffOutcome::Identical => panic!("expected a diff"),
    }
}

#[test]
fn identical_texts() {
    if !diff_available() {
        return;
    }
    let outcome = ExternalDiff::default()
        .unified_diff("same\n", "same\n", 3)
        .unwrap();
    assert_eq!(outcome, DiffOutcome::Identical);
}

#[test]
fn agrees_with_the_in_process_engine() {
    if !diff_available() {
        return;
    }
    let cases = [
        ("a\nb\nc\nd\ne\nf\ng\nh\n", "a\nb\nc\nD\ne\nf\ng\nh\n"),
        ("a\nb", "a\nc"),
        ("", "only right\n"),
        ("1\n2\n3\n4\n5\n6\n", "1\n2\n3\n4\n5\n"),
    ];
    for (left, right) in cases {
        let external = body(ExternalDiff::default().unified_diff(left, right, 3).unwrap());
        let internal = body(LineDiff.unified_diff(left, right, 3).unwrap());
        assert_eq!(external, internal, "left: {left:?}, right: {right:?}");
    }
}

#[test]
fn staged_files_are_removed() {
    if !diff_available() {
        return;
    }
    let scratch = tempfile::tempdir().unwrap();
    let engine = ExternalDiff::default().scratch_dir(scratch.path());

    for i in 0..20 {
        let outcome = engine
            .unified_diff(&format!("run {i}\n"), "run x\n", 3)
            .unwrap();
        assert!(matches!(outcome, DiffOutcome::Changed(_)));
    }

    assert!(
        wait_until_empty(scratch.path()),
        "staged inputs were not cleaned up"
    );
}

#[test]
fn staged_files_are_removed_when_the_program_fails() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = ExternalDiff::new("/nonexistent/diffed-assert/diff").scratch_dir(scratch.path());

    assert!(engine.unified_diff("a\n", "b\n", 3).is_err());
    assert!(
        wait_until_empty(scratch.path()),
        "staged inputs were not cleaned up"
    );
}

#[test]
fn drives_an_assertion() {
    if !diff_available() {
        return;
    }
    let sink = RecordingSink::new();
    let options = AssertOptions::new().engine(ExternalDiff::default());
    assert_equal(
        || Ok::<_, Infallible>(vec!["north", "south"]),
        || Ok::<_, Infallible>(vec!["north", "west"]),
        || Some("compass".into()),
        &sink,
        &options,
    );

    let reports = sink.take();
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].failure.to_string(),
        "compass\n@@ -1,4 +1,4 @@\n [\n     \"north\",\n-    \"south\",\n+    \"west\",\n ]\n\\ No newline at end of file\n"
    );
}
