use serde_json::Value;
use std::collections::HashMap;

use crate::error::QueryError;
use crate::models::CanonicalRecord;

/// Read a string field, accepting numeric ids as well
fn string_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn bool_field(raw: &Value, key: &str) -> Option<bool> {
    raw.get(key).and_then(Value::as_bool)
}

/// Normalize one raw element into a [`CanonicalRecord`].
///
/// Never fails: anything missing or of the wrong type becomes `None`
/// (or `""` for the name and creation timestamp).
pub fn transform_record(raw: &Value) -> CanonicalRecord {
    CanonicalRecord {
        id: string_field(raw, "id"),
        created_at: string_field(raw, "createdAt").unwrap_or_default(),
        updated_at: string_field(raw, "updatedAt"),
        name: string_field(raw, "name").unwrap_or_default(),
        meta_record_id: string_field(raw, "metaRecordId"),
        record_type_id: string_field(raw, "recordTypeId"),
        data: raw.get("data").and_then(Value::as_object).cloned(),
        active: bool_field(raw, "active"),
        archived: bool_field(raw, "archived"),
        public: bool_field(raw, "public"),
    }
}

/// Convert a full response body into records keyed by identifier.
///
/// The payload lives under `data` and maps ids to raw records. A null
/// body, a missing `data` or `data: null` all mean zero records.
pub fn records_from_response(body: &Value) -> Result<HashMap<String, CanonicalRecord>, QueryError> {
    let payload = match body {
        Value::Null => return Ok(HashMap::new()),
        Value::Object(map) => map.get("data"),
        other => {
            return Err(QueryError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(other)
            )))
        }
    };

    let raw_records = match payload {
        None | Some(Value::Null) => return Ok(HashMap::new()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(QueryError::MalformedResponse(format!(
                "expected `data` to be an object keyed by record id, got {}",
                json_kind(other)
            )))
        }
    };

    let mut records = HashMap::with_capacity(raw_records.len());
    for (key, raw) in raw_records {
        let record = transform_record(raw);
        // Projections carry no id of their own; fall back to the response key
        let id = record.id.clone().unwrap_or_else(|| key.clone());
        records.insert(id, record);
    }
    Ok(records)
}

/// Normalized query text echoed back by the service, if any
pub fn parsed_query(body: &Value) -> Option<String> {
    body.get("parsedQuery")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
