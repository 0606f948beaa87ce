//! Conversions between `serde_json::Value` and the `google.protobuf.Value`
//! well-known type used by attribute maps.

use prost_types::value::Kind;
use prost_types::{ListValue, NullValue, Struct, Value};

/// Converts a JSON value into its protobuf equivalent.
pub fn json_to_proto(value: serde_json::Value) -> Value {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(NullValue::NullValue as i32),
        serde_json::Value::Bool(value) => Kind::BoolValue(value),
        serde_json::Value::Number(number) => Kind::NumberValue(number.as_f64().unwrap_or_default()),
        serde_json::Value::String(value) => Kind::StringValue(value),
        serde_json::Value::Array(values) => Kind::ListValue(ListValue {
            values: values.into_iter().map(json_to_proto).collect(),
        }),
        serde_json::Value::Object(fields) => Kind::StructValue(Struct {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key, json_to_proto(value)))
                .collect(),
        }),
    };
    Value { kind: Some(kind) }
}

/// Converts a protobuf value back into JSON. Numbers with no JSON
/// representation (NaN, infinities) become `null`.
pub fn proto_to_json(value: Value) -> serde_json::Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(value)) => serde_json::Value::Bool(value),
        Some(Kind::NumberValue(number)) => serde_json::Number::from_f64(number)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(value)) => serde_json::Value::String(value),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(proto_to_json).collect())
        }
        Some(Kind::StructValue(fields)) => serde_json::Value::Object(
            fields
                .fields
                .into_iter()
                .map(|(key, value)| (key, proto_to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trips_through_proto() {
        let json = serde_json::json!({
            "owner": "alice",
            "public": false,
            "tags": ["beach", "sunset"],
            "views": 42.0,
            "deleted_at": null,
            "geo": { "lat": 1.5, "lon": -3.25 },
        });

        assert_eq!(proto_to_json(json_to_proto(json.clone())), json);
    }

    #[test]
    fn non_finite_numbers_become_null() {
        let value = Value {
            kind: Some(Kind::NumberValue(f64::NAN)),
        };
        assert_eq!(proto_to_json(value), serde_json::Value::Null);
    }
}
