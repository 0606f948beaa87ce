//! Bindings for the `verdict.schema.v1` package.

pub mod v1 {
    use crate::serde_ext;

    /// A JSON schema used to validate principal or resource attributes.
    /// In protojson form the definition travels as a base64 string.
    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct Schema {
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub id: String,
        #[prost(bytes = "vec", tag = "2")]
        #[serde(
            with = "serde_ext::base64_bytes",
            skip_serializing_if = "Vec::is_empty"
        )]
        pub definition: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ValidationError {
        #[prost(string, tag = "1")]
        pub path: String,
        #[prost(string, tag = "2")]
        pub message: String,
        #[prost(enumeration = "validation_error::Source", tag = "3")]
        pub source: i32,
    }

    pub mod validation_error {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum Source {
            Unspecified = 0,
            Principal = 1,
            Resource = 2,
        }

        impl Source {
            /// Returns the value name used in the Protobuf definition.
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Self::Unspecified => "SOURCE_UNSPECIFIED",
                    Self::Principal => "SOURCE_PRINCIPAL",
                    Self::Resource => "SOURCE_RESOURCE",
                }
            }

            /// Parses a value name used in the Protobuf definition.
            pub fn from_str_name(value: &str) -> Option<Self> {
                match value {
                    "SOURCE_UNSPECIFIED" => Some(Self::Unspecified),
                    "SOURCE_PRINCIPAL" => Some(Self::Principal),
                    "SOURCE_RESOURCE" => Some(Self::Resource),
                    _ => None,
                }
            }
        }
    }
}
