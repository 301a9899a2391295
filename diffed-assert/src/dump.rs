//! Turning values into text that can be diffed line by line.

use core::any::Any;
use core::fmt::Debug;
use std::borrow::Cow;

#[cfg(feature = "json")]
use crate::Error;

/// Render `value` as text suitable for a line diff.
///
/// Plain strings (`String`, `&'static str`, `Box<str>`, `Cow<'static, str>`)
/// are emitted verbatim so that a multi-line string diffs line by line.
/// Everything else goes through the alternate `Debug` form (`{:#?}`), which
/// puts every field and collection element on its own line.
///
/// The output is deterministic as long as the value's `Debug` impl is. Types
/// like `HashMap` iterate in an unspecified order; compare a `BTreeMap` instead
/// if the diff must be stable.
///
/// ```
/// use diffed_assert::dump;
///
/// assert_eq!(dump(&String::from("a\nb")), "a\nb");
/// assert_eq!(dump(&Some(1)), "Some(\n    1,\n)");
/// ```
pub fn dump<T: Debug + 'static>(value: &T) -> String {
    match as_plain_str(value) {
        Some(text) => text.to_owned(),
        None => format!("{value:#?}"),
    }
}

fn as_plain_str<T: 'static>(value: &T) -> Option<&str> {
    let any = value as &dyn Any;
    if let Some(s) = any.downcast_ref::<String>() {
        return Some(s);
    }
    if let Some(s) = any.downcast_ref::<&'static str>() {
        return Some(s);
    }
    if let Some(s) = any.downcast_ref::<Box<str>>() {
        return Some(s);
    }
    if let Some(s) = any.downcast_ref::<Cow<'static, str>>() {
        return Some(s);
    }
    None
}

/// Parse `input` as JSON and re-emit it with sorted object keys and two-space
/// indentation.
///
/// Two documents that differ only in key order or whitespace canonicalize to
/// the same text. `input` names the document in error messages, typically
/// `"expected"` or `"actual"`.
///
/// # Errors
///
/// [`Error::InvalidUtf8`] if the bytes are not UTF-8, [`Error::InvalidJson`] if
/// they are not a JSON document.
#[cfg(feature = "json")]
pub fn canonicalize_json(input: &'static str, json: impl AsRef<[u8]>) -> Result<String, Error> {
    let text = core::str::from_utf8(json.as_ref())
        .map_err(|source| Error::InvalidUtf8 { input, source })?;
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| Error::InvalidJson { input, source })?;
    serde_json::to_string_pretty(&sort_keys(value)).map_err(Error::Serialization)
}

/// Encode any serializable value as compact JSON.
///
/// # Errors
///
/// [`Error::Serialization`] if the value cannot be represented as JSON, for
/// example a map whose keys are not strings.
#[cfg(feature = "json")]
pub fn encode_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(Error::Serialization)
}

/// Rebuild every object with its keys in lexicographic order.
///
/// `serde_json::Map` is only sorted when the `preserve_order` feature is off,
/// and any crate in the build graph may turn it on.
#[cfg(feature = "json")]
fn sort_keys(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
