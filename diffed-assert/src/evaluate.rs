//! Evaluating an assertion and shaping its failure message.

use core::fmt::{Debug, Display};
use core::panic::Location;

use crate::{
    AssertOptions, DiffOutcome, Error, Failure, FailureSink, Side, dump, strip_diff_header,
};

/// Compare the values produced by two deferred expressions.
///
/// `left` is evaluated first; if it fails, `right` is never evaluated. If both
/// succeed and the values differ, both are rendered with [`dump`] and diffed
/// with the engine from `options`. `message` is only evaluated on mismatch.
///
/// # Errors
///
/// - [`Failure::Mismatch`] with the user's message, a newline, and the diff
///   body (without the `---`/`+++` header lines).
/// - [`Failure::Harness`] with [`Error::Expression`] if an expression failed,
///   any error from the diff engine, or [`Error::DegenerateMismatch`] if the
///   values differ but render identically.
pub fn check_equal<T, E1, E2>(
    left: impl FnOnce() -> Result<T, E1>,
    right: impl FnOnce() -> Result<T, E2>,
    message: impl FnOnce() -> Option<String>,
    options: &AssertOptions,
) -> Result<(), Failure>
where
    T: PartialEq + Debug + 'static,
    E1: Display,
    E2: Display,
{
    let left = left().map_err(|e| expression_failed(Side::Left, e))?;
    let right = right().map_err(|e| expression_failed(Side::Right, e))?;

    if left == right {
        return Ok(());
    }

    tracing::debug!(type_name = core::any::type_name::<T>(), "values differ");
    let diff = options.diff_engine().unified_diff(
        &dump(&left),
        &dump(&right),
        options.context_lines(),
    )?;

    let body = match &diff {
        DiffOutcome::Identical => return Err(Error::DegenerateMismatch.into()),
        DiffOutcome::Changed(diff) => strip_diff_header(diff)
            .ok_or_else(|| Error::diff_failed("diff output is missing its header"))?,
    };

    let mut final_message = message().unwrap_or_default();
    final_message.push('\n');
    final_message.push_str(body);
    Err(Failure::Mismatch(final_message))
}

/// Like [`check_equal`], but reports a failure to `sink` instead of returning
/// it. The failure is reported at the caller's location.
#[track_caller]
pub fn assert_equal<T, E1, E2>(
    left: impl FnOnce() -> Result<T, E1>,
    right: impl FnOnce() -> Result<T, E2>,
    message: impl FnOnce() -> Option<String>,
    sink: &dyn FailureSink,
    options: &AssertOptions,
) where
    T: PartialEq + Debug + 'static,
    E1: Display,
    E2: Display,
{
    let location = Location::caller();
    if let Err(failure) = check_equal(left, right, message, options) {
        sink.report(failure, location);
    }
}

/// Compare a JSON document against the JSON encoding of `actual`.
///
/// Both sides are canonicalized (sorted keys, pretty-printed) first, so
/// whitespace and key order do not matter. `expected` is the left side of the
/// diff.
///
/// # Errors
///
/// As [`check_equal`], plus [`Error::InvalidUtf8`] or [`Error::InvalidJson`]
/// if `expected` is not a JSON document, and [`Error::Serialization`] if
/// `actual` cannot be encoded.
#[cfg(feature = "json")]
pub fn check_json_equal<T: serde::Serialize + ?Sized>(
    expected: impl AsRef<[u8]>,
    actual: &T,
    message: impl FnOnce() -> Option<String>,
    options: &AssertOptions,
) -> Result<(), Failure> {
    use crate::{canonicalize_json, encode_json};
    use core::convert::Infallible;

    let expected = canonicalize_json("expected", expected)?;
    let actual = canonicalize_json("actual", encode_json(actual)?)?;
    check_equal(
        || Ok::<_, Infallible>(expected),
        || Ok::<_, Infallible>(actual),
        message,
        options,
    )
}

/// Like [`check_json_equal`], but reports a failure to `sink` at the caller's
/// location.
#[cfg(feature = "json")]
#[track_caller]
pub fn assert_json_equal<T: serde::Serialize + ?Sized>(
    expected: impl AsRef<[u8]>,
    actual: &T,
    message: impl FnOnce() -> Option<String>,
    sink: &dyn FailureSink,
    options: &AssertOptions,
) {
    let location = Location::caller();
    if let Err(failure) = check_json_equal(expected, actual, message, options) {
        sink.report(failure, location);
    }
}

fn expression_failed(side: Side, error: impl Display) -> Error {
    Error::Expression {
        side,
        message: error.to_string(),
    }
}
