//! Serde helpers for the protojson-compatible surface of the policy and
//! schema bindings.

/// `skip_serializing_if` helper for proto3 bools.
pub fn is_false(value: &bool) -> bool {
    !*value
}

/// `skip_serializing_if` helper for enum fields stored as `i32`.
pub fn enum_unspecified(value: &i32) -> bool {
    *value == 0
}

/// Serializes [`Effect`](crate::effect::v1::Effect) fields as their value
/// names and accepts either a value name or the raw number on input, the
/// way protojson does.
pub mod effect_name {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::effect::v1::Effect;

    pub fn serialize<S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match Effect::try_from(*value) {
            Ok(effect) => serializer.serialize_str(effect.as_str_name()),
            Err(_) => serializer.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NameOrNumber {
            Name(String),
            Number(i32),
        }

        match NameOrNumber::deserialize(deserializer)? {
            NameOrNumber::Name(name) => Effect::from_str_name(&name)
                .map(|effect| effect as i32)
                .ok_or_else(|| {
                    serde::de::Error::unknown_variant(
                        &name,
                        &[
                            "EFFECT_UNSPECIFIED",
                            "EFFECT_ALLOW",
                            "EFFECT_DENY",
                            "EFFECT_NO_MATCH",
                        ],
                    )
                }),
            NameOrNumber::Number(number) => Ok(number),
        }
    }
}

/// Serializes `bytes` fields as base64, accepting both the standard and
/// URL-safe alphabets on input.
pub mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(&encoded)
            .or_else(|_| URL_SAFE.decode(&encoded))
            .map_err(serde::de::Error::custom)
    }
}
