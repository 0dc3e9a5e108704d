use serde_json::Value;

use crate::{
    error::{GatewayError, Result},
    models::ClientRecord,
};

const ID_KEYS: [&str; 3] = ["_id", "id", "uuid"];

/// Shapes the upstream uses for a collection response.
#[derive(Debug)]
pub enum ListBody {
    /// `{"data": [...]}`
    Wrapped(Vec<Value>),
    /// `[...]`
    Bare(Vec<Value>),
    /// `{...}` without an array under `data`; treated as a one-record listing.
    Single(Value),
}

impl ListBody {
    pub fn classify(body: Value) -> Result<Self> {
        match body {
            Value::Array(items) => Ok(Self::Bare(items)),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => Ok(Self::Wrapped(items)),
                Some(other) => {
                    map.insert("data".to_string(), other);
                    Ok(Self::Single(Value::Object(map)))
                }
                None => Ok(Self::Single(Value::Object(map))),
            },
            other => Err(GatewayError::UnexpectedShape(format!(
                "expected an object or array from the list endpoint, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn into_records(self) -> Vec<Value> {
        match self {
            Self::Wrapped(items) | Self::Bare(items) => items,
            Self::Single(item) => vec![item],
        }
    }
}

/// Picks the record out of a single-entity response: `data` when present and non-null,
/// otherwise the whole body.
pub fn single_record(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(Value::Null) => {
                map.insert("data".to_string(), Value::Null);
                Value::Object(map)
            }
            _ => Value::Object(map),
        },
        other => other,
    }
}

pub fn normalize(raw: Value) -> ClientRecord {
    let record = match &raw {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };

    ClientRecord {
        id: ID_KEYS.iter().find_map(|key| id_field(record, key)),
        name: present_field(record, "name"),
        email: present_field(record, "email"),
        phone: present_field(record, "phone"),
        company: present_field(record, "company"),
        status: present_field(record, "status"),
        raw,
    }
}

/// Any present, non-null value, including empty strings.
fn present_field(record: &Value, key: &str) -> Option<Value> {
    record.get(key).filter(|v| !v.is_null()).cloned()
}

fn id_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_ids_normalize_to_none() {
        let record = normalize(json!({"name": "Ana", "email": "ana@example.com"}));
        assert_eq!(record.id, None);
        assert_eq!(record.name, Some(json!("Ana")));
        assert_eq!(record.email, Some(json!("ana@example.com")));
        assert_eq!(record.phone, None);
        assert_eq!(record.raw, json!({"name": "Ana", "email": "ana@example.com"}));
    }

    #[test]
    fn id_prefers_underscore_id_then_id_then_uuid() {
        assert_eq!(
            normalize(json!({"_id": "a", "id": "b", "uuid": "c"})).id.as_deref(),
            Some("a")
        );
        assert_eq!(normalize(json!({"id": "b", "uuid": "c"})).id.as_deref(), Some("b"));
        assert_eq!(
            normalize(json!({"_id": null, "id": "", "uuid": "c"})).id.as_deref(),
            Some("c")
        );
        assert_eq!(normalize(json!({"id": 42})).id.as_deref(), Some("42"));
    }

    #[test]
    fn non_object_input_never_panics() {
        for raw in [json!(null), json!("text"), json!(7), json!([]), json!([1, 2])] {
            let record = normalize(raw.clone());
            assert_eq!(record.id, None);
            assert_eq!(record.name, None);
            assert_eq!(record.raw, raw);
        }
    }

    #[test]
    fn single_element_array_is_unwrapped_but_raw_kept() {
        let raw = json!([{"uuid": "u-1", "status": "active"}]);
        let record = normalize(raw.clone());
        assert_eq!(record.id.as_deref(), Some("u-1"));
        assert_eq!(record.status, Some(json!("active")));
        assert_eq!(record.raw, raw);
    }

    #[test]
    fn non_id_fields_are_copied_when_present() {
        let record = normalize(json!({
            "_id": "1",
            "name": "",
            "company": {"n": "X"},
            "phone": 5551234,
            "status": null
        }));
        assert_eq!(record.id.as_deref(), Some("1"));
        assert_eq!(record.name, Some(json!("")));
        assert_eq!(record.company, Some(json!({"n": "X"})));
        assert_eq!(record.phone, Some(json!(5551234)));
        assert_eq!(record.status, None);
        assert_eq!(record.email, None);
    }

    #[test]
    fn serializes_absent_fields_as_null() {
        let value = serde_json::to_value(normalize(json!({"_id": "1", "name": "Ana"})))
            .expect("serialize");
        assert_eq!(
            value,
            json!({
                "id": "1",
                "name": "Ana",
                "email": null,
                "phone": null,
                "company": null,
                "status": null,
                "raw": {"_id": "1", "name": "Ana"}
            })
        );
    }

    #[test]
    fn list_shapes_keep_order_and_length() {
        let wrapped = ListBody::classify(json!({"data": [{"id": "1"}, {"id": "2"}]}))
            .expect("wrapped")
            .into_records();
        assert_eq!(wrapped, vec![json!({"id": "1"}), json!({"id": "2"})]);

        let bare = ListBody::classify(json!([{"id": "3"}, {"id": "4"}, {"id": "5"}]))
            .expect("bare")
            .into_records();
        assert_eq!(bare.len(), 3);
        assert_eq!(bare[2], json!({"id": "5"}));

        let single = ListBody::classify(json!({"id": "6", "data": {"nested": true}}))
            .expect("single")
            .into_records();
        assert_eq!(single, vec![json!({"id": "6", "data": {"nested": true}})]);
    }

    #[test]
    fn scalar_list_bodies_are_rejected() {
        for body in [json!(null), json!("oops"), json!(3)] {
            let err = ListBody::classify(body).expect_err("scalar body");
            assert!(matches!(err, GatewayError::UnexpectedShape(_)));
        }
    }

    #[test]
    fn single_record_prefers_data() {
        assert_eq!(
            single_record(json!({"data": {"id": "1"}, "meta": 1})),
            json!({"id": "1"})
        );
        assert_eq!(
            single_record(json!({"id": "42", "name": "Bob"})),
            json!({"id": "42", "name": "Bob"})
        );
        assert_eq!(
            single_record(json!({"id": "42", "data": null})),
            json!({"id": "42", "data": null})
        );
    }
}
