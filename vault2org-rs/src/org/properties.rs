//! Org property drawer handling.

/// Opening marker of a property drawer.
pub const PROPERTIES_OPEN: &str = ":PROPERTIES:";
/// Closing marker of a property drawer.
pub const PROPERTIES_CLOSE: &str = ":END:";

/// Remove every `:PROPERTIES:` ... `:END:` span from converted text.
///
/// Spans are removed inclusively, one at a time from the front, until no
/// opener with a later closer remains. Must run before the canonical header
/// is inserted.
pub fn strip_property_blocks(text: &str) -> String {
    let mut result = text.to_string();

    while let Some(start) = result.find(PROPERTIES_OPEN) {
        let Some(close) = result[start..].find(PROPERTIES_CLOSE) else {
            break;
        };
        let end = start + close + PROPERTIES_CLOSE.len();
        result.replace_range(start..end, "");
    }

    result
}
