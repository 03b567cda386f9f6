// Shared helper for `type`-tagged configuration records
use serde::de::Error as _;
use serde_json::Value;

/// Reads the `type` discriminant of a configuration record.
///
/// Known tags are matched by the caller; unknown tags are kept so the
/// builder can reject them with the offending name.
pub(crate) fn type_tag(value: &Value) -> Result<String, serde_json::Error> {
    match value.get("type") {
        Some(Value::String(tag)) => Ok(tag.clone()),
        Some(other) => Err(serde_json::Error::custom(format!(
            "`type` must be a string, got {other}"
        ))),
        None => Err(serde_json::Error::missing_field("type")),
    }
}

/// Pulls a string field out of a record whose tag was not recognized.
pub(crate) fn string_field(value: &Value, field: &'static str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
