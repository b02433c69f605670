//! Quoted key=value credential fields

use std::collections::HashMap;

/// Lower-cased field name to unquoted value
pub type FieldMap = HashMap<String, String>;

/// Split key/value authorization parameters.
///
/// Parses `email="test@example.com", key="abcdefg"` into
/// `{email: test@example.com, key: abcdefg}`.
///
/// Commas always split, even inside quotes. Segments without `=` are
/// dropped and a repeated key keeps its last value.
pub fn split_fields(text: &str) -> FieldMap {
    text.split(',')
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            Some((
                key.trim().to_lowercase(),
                strip_quotes(value.trim()).to_string(),
            ))
        })
        .collect()
}

/// Remove at most one `"` from each end, balanced or not
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
