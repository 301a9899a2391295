#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod dump;
mod engine;
mod error;
mod evaluate;
mod external;
mod options;
mod sink;
mod theme;
mod unified;

#[cfg(feature = "json")]
pub use dump::{canonicalize_json, encode_json};
pub use dump::dump;
pub use engine::{DEFAULT_CONTEXT, DiffEngine, DiffOutcome, strip_diff_header};
pub use error::{Error, Side};
#[cfg(feature = "json")]
pub use evaluate::{assert_json_equal, check_json_equal};
pub use evaluate::{assert_equal, check_equal};
pub use external::ExternalDiff;
pub use options::AssertOptions;
pub use sink::{Failure, FailureSink, PanicSink, RecordingSink, Report};
pub use theme::DiffTheme;
pub use unified::LineDiff;

// =============================================================================
// assert_diffed_eq! - infallible expressions (the common case)
// =============================================================================

/// Asserts that two values are equal, showing a unified diff if they are not.
///
/// Both values are moved into the assertion. They must be `PartialEq`,
/// `Debug` and `'static`; strings are diffed line by line as-is, everything
/// else is diffed in its `{:#?}` form.
///
/// Settings come from the environment, see [`AssertOptions::from_env`].
///
/// # Panics
///
/// Panics if the values differ, with the optional message followed by the
/// diff. Also panics if the diff cannot be computed.
///
/// # Example
///
/// ```
/// use diffed_assert::assert_diffed_eq;
///
/// let rendered = ["a", "b"].join("\n");
/// assert_diffed_eq!(rendered, "a\nb".to_string());
/// assert_diffed_eq!(vec![1, 2], vec![1, 2], "lists differ for {}", "ints");
/// ```
#[macro_export]
macro_rules! assert_diffed_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::try_assert_diffed_eq!(
            ::core::result::Result::Ok::<_, ::core::convert::Infallible>($left),
            ::core::result::Result::Ok::<_, ::core::convert::Infallible>($right)
        )
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::try_assert_diffed_eq!(
            ::core::result::Result::Ok::<_, ::core::convert::Infallible>($left),
            ::core::result::Result::Ok::<_, ::core::convert::Infallible>($right),
            $($arg)+
        )
    };
}

/// Asserts that two values are equal, where each side is a `Result`.
///
/// The left expression is evaluated first. If it is an `Err`, the right
/// expression is never evaluated and the assertion fails with
/// `expression 1 failed: <error>`; an `Err` on the right fails with
/// `expression 2 failed: <error>`.
///
/// # Panics
///
/// Panics if either expression fails or the values differ.
///
/// # Example
///
/// ```
/// use diffed_assert::try_assert_diffed_eq;
///
/// try_assert_diffed_eq!("42".parse::<u32>(), Ok::<u32, std::num::ParseIntError>(42));
/// ```
#[macro_export]
macro_rules! try_assert_diffed_eq {
    ($left:expr, $right:expr $(,)?) => {{
        let options = $crate::AssertOptions::from_env();
        $crate::assert_equal(
            || $left,
            || $right,
            || ::core::option::Option::None,
            &$crate::PanicSink::with_theme(options.color_theme().cloned()),
            &options,
        )
    }};
    ($left:expr, $right:expr, $($arg:tt)+) => {{
        let options = $crate::AssertOptions::from_env();
        $crate::assert_equal(
            || $left,
            || $right,
            || ::core::option::Option::Some(::std::format!($($arg)+)),
            &$crate::PanicSink::with_theme(options.color_theme().cloned()),
            &options,
        )
    }};
}

/// Asserts that two values are equal (debug builds only).
///
/// Like [`assert_diffed_eq!`], but only enabled in debug builds.
#[macro_export]
macro_rules! debug_assert_diffed_eq {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::assert_diffed_eq!($($arg)*);
        }
    };
}

// =============================================================================
// assert_json_diffed_eq! - JSON text against a serializable value
// =============================================================================

/// Asserts that a JSON document equals the JSON encoding of a value,
/// ignoring whitespace and object key order.
///
/// The expected document can be anything that is `AsRef<[u8]>`. The actual
/// value only needs to be `serde::Serialize`; it is borrowed, not moved.
///
/// # Panics
///
/// Panics if the documents differ, showing a diff of both sides with sorted
/// keys. Also panics if the expected document is not valid UTF-8 or JSON, or
/// the actual value cannot be encoded.
///
/// # Example
///
/// ```
/// use diffed_assert::assert_json_diffed_eq;
///
/// #[derive(serde::Serialize)]
/// struct Greeting {
///     hello: &'static str,
/// }
///
/// assert_json_diffed_eq!(r#"{ "hello": "world" }"#, Greeting { hello: "world" });
/// ```
#[cfg(feature = "json")]
#[macro_export]
macro_rules! assert_json_diffed_eq {
    ($expected:expr, $actual:expr $(,)?) => {{
        let options = $crate::AssertOptions::from_env();
        $crate::assert_json_equal(
            $expected,
            &$actual,
            || ::core::option::Option::None,
            &$crate::PanicSink::with_theme(options.color_theme().cloned()),
            &options,
        )
    }};
    ($expected:expr, $actual:expr, $($arg:tt)+) => {{
        let options = $crate::AssertOptions::from_env();
        $crate::assert_json_equal(
            $expected,
            &$actual,
            || ::core::option::Option::Some(::std::format!($($arg)+)),
            &$crate::PanicSink::with_theme(options.color_theme().cloned()),
            &options,
        )
    }};
}
