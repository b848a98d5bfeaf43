//! Embedded `PAGE_MODEL` extraction from listing detail pages.
//!
//! Detail pages carry their data as a script assignment,
//! `window.PAGE_MODEL = {...}`, with no delimiter after the object other than
//! whatever JavaScript follows. The object is located by brace probing: try a
//! strict JSON decode at each `{` after the marker and keep the first one
//! that decodes. Non-JSON braces (unquoted keys, template syntax, truncated
//! literals) simply fail to decode and are skipped.
//!
//! This is a heuristic. A syntactically valid JSON object that sits between
//! the marker and the intended payload is returned instead of the payload.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Deserializer, Value};

/// Assignment marker that identifies the script holding the page model.
pub const PAGE_MODEL_MARKER: &str = "PAGE_MODEL = ";

/// Key of the listing payload inside the page model.
pub const PROPERTY_DATA_KEY: &str = "propertyData";

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex"));

/// Returns the text of the first `<script>` element containing `marker`.
#[must_use]
pub fn find_script_with_marker<'a>(html: &'a str, marker: &str) -> Option<&'a str> {
    SCRIPT_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .find(|text| text.contains(marker))
}

/// Iterator over every JSON object that can be decoded from `text`, scanning
/// left to right.
///
/// After a successful decode the cursor moves past the consumed object; after
/// a failed one it moves one byte past the `{` that was tried.
pub struct JsonObjects<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> JsonObjects<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }
}

impl Iterator for JsonObjects<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        while self.cursor < self.text.len() {
            let start = self.cursor + self.text[self.cursor..].find('{')?;
            match decode_prefix(&self.text[start..]) {
                Some((value, consumed)) => {
                    self.cursor = start + consumed;
                    return Some(value);
                }
                // `{` is one byte, so `start + 1` is always a char boundary.
                None => self.cursor = start + 1,
            }
        }
        None
    }
}

/// Strictly decodes one JSON value at the start of `text`, returning it with
/// the number of bytes consumed. Trailing input is left alone.
fn decode_prefix(text: &str) -> Option<(Value, usize)> {
    let mut stream = Deserializer::from_str(text).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Some((value, stream.byte_offset())),
        _ => None,
    }
}

/// Finds the page model in a detail page and returns its listing payload.
///
/// Returns `None` when the page has no script with the marker (not a listing
/// page), when nothing after the marker decodes, or when the decoded object
/// has no `propertyData`.
#[must_use]
pub fn extract_property_data(html: &str) -> Option<Value> {
    let script = find_script_with_marker(html, PAGE_MODEL_MARKER)?;
    let marker_at = script.find(PAGE_MODEL_MARKER)?;
    let after_marker = &script[marker_at + PAGE_MODEL_MARKER.len()..];

    let mut model = JsonObjects::new(after_marker).next()?;
    match model.get_mut(PROPERTY_DATA_KEY).map(Value::take) {
        Some(Value::Null) | None => {
            tracing::debug!("page model has no {PROPERTY_DATA_KEY}");
            None
        }
        Some(data) => Some(data),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_property_data_after_marker() {
        let html = r#"<script>var PAGE_MODEL = {"propertyData":{"id":1}};</script>"#;
        assert_eq!(extract_property_data(html), Some(json!({"id": 1})));
    }

    #[test]
    fn script_without_marker_is_not_found() {
        let html = r#"<html><script>var OTHER = {"propertyData":{"id":1}};</script></html>"#;
        assert_eq!(extract_property_data(html), None);
    }

    #[test]
    fn page_without_scripts_is_not_found() {
        let html = "<html><body>gone</body></html>";
        assert_eq!(extract_property_data(html), None);
    }

    #[test]
    fn invalid_decoy_before_marker_is_irrelevant() {
        let html = r#"<script>var x = {"decoy": tru}; window.PAGE_MODEL = {"propertyData":{"id":2}}</script>"#;
        assert_eq!(extract_property_data(html), Some(json!({"id": 2})));
    }

    #[test]
    fn valid_object_before_marker_is_ignored() {
        let html = r#"<script>var cfg = {"propertyData":{"id":99}}; window.PAGE_MODEL = {"propertyData":{"id":3}}</script>"#;
        assert_eq!(extract_property_data(html), Some(json!({"id": 3})));
    }

    #[test]
    fn non_json_braces_after_marker_are_skipped() {
        let html = r#"<script>window.PAGE_MODEL = fn({a: 1}, {"decoy": tru}, {"propertyData":{"id":4}});</script>"#;
        assert_eq!(extract_property_data(html), Some(json!({"id": 4})));
    }

    #[test]
    fn first_valid_object_after_marker_wins_even_if_unintended() {
        let html = r#"<script>window.PAGE_MODEL = wrap({"meta":true}, {"propertyData":{"id":5}});</script>"#;
        // The first decodable object has no propertyData, so nothing is found.
        assert_eq!(extract_property_data(html), None);
    }

    #[test]
    fn marker_in_later_script_is_found() {
        let html = concat!(
            r#"<script src="/app.js"></script>"#,
            r#"<script type="text/javascript">window.dataLayer = [];</script>"#,
            "<SCRIPT>\n  window.PAGE_MODEL = {\"propertyData\": {\"id\": 6, \"bedrooms\": 2}}\n</SCRIPT>",
        );
        assert_eq!(
            extract_property_data(html),
            Some(json!({"id": 6, "bedrooms": 2}))
        );
    }

    #[test]
    fn model_without_property_data_is_not_found() {
        let html = r#"<script>window.PAGE_MODEL = {"isAuthenticated": false}</script>"#;
        assert_eq!(extract_property_data(html), None);
    }

    #[test]
    fn unterminated_model_is_not_found() {
        let html = r#"<script>window.PAGE_MODEL = {"propertyData": {"id": 7</script>"#;
        assert_eq!(extract_property_data(html), None);
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_decoder() {
        let html = r#"<script>window.PAGE_MODEL = {"propertyData":{"text":"a } and { b"}}</script>"#;
        assert_eq!(
            extract_property_data(html),
            Some(json!({"text": "a } and { b"}))
        );
    }

    #[test]
    fn json_objects_yields_every_decodable_object() {
        let text = r#"x {bad} {"a":1} y {"b":{"c":2}} {oops"#;
        let found: Vec<Value> = JsonObjects::new(text).collect();
        assert_eq!(found, vec![json!({"a": 1}), json!({"b": {"c": 2}})]);
    }

    #[test]
    fn json_objects_skips_nested_objects_of_a_consumed_value() {
        let text = r#"{"outer":{"inner":1}}"#;
        let found: Vec<Value> = JsonObjects::new(text).collect();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn json_objects_handles_multibyte_text() {
        let text = "£1,200 pcm – {\"price\":\"£1,200\"}";
        let found: Vec<Value> = JsonObjects::new(text).collect();
        assert_eq!(found, vec![json!({"price": "£1,200"})]);
    }

    #[test]
    fn json_objects_on_text_without_braces() {
        assert_eq!(JsonObjects::new("no objects here").count(), 0);
    }
}
