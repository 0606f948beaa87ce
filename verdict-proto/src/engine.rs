//! Bindings for the `verdict.engine.v1` package.

pub mod v1 {
    use std::collections::HashMap;

    /// The entity performing actions.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Principal {
        #[prost(string, tag = "1")]
        pub id: String,
        #[prost(string, tag = "2")]
        pub policy_version: String,
        #[prost(string, repeated, tag = "3")]
        pub roles: Vec<String>,
        #[prost(map = "string, message", tag = "4")]
        pub attr: HashMap<String, ::prost_types::Value>,
        #[prost(string, tag = "5")]
        pub scope: String,
    }

    /// The entity actions are performed on.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Resource {
        #[prost(string, tag = "1")]
        pub kind: String,
        #[prost(string, tag = "2")]
        pub policy_version: String,
        #[prost(string, tag = "3")]
        pub id: String,
        #[prost(map = "string, message", tag = "4")]
        pub attr: HashMap<String, ::prost_types::Value>,
        #[prost(string, tag = "5")]
        pub scope: String,
    }

    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct PlanResourcesInput {}

    pub mod plan_resources_input {
        use std::collections::HashMap;

        /// Resource descriptor for query planning. Unlike
        /// [`Resource`](super::Resource) it describes a set of resources, so
        /// it carries no identifier.
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Resource {
            #[prost(string, tag = "1")]
            pub kind: String,
            #[prost(map = "string, message", tag = "2")]
            pub attr: HashMap<String, ::prost_types::Value>,
            #[prost(string, tag = "3")]
            pub policy_version: String,
            #[prost(string, tag = "4")]
            pub scope: String,
        }
    }

    /// Filter produced by the query planner.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct PlanResourcesFilter {
        #[prost(enumeration = "plan_resources_filter::Kind", tag = "1")]
        pub kind: i32,
        /// Populated only when `kind` is [`Kind::Conditional`](plan_resources_filter::Kind::Conditional).
        #[prost(message, optional, tag = "2")]
        pub condition: Option<plan_resources_filter::expression::Operand>,
    }

    pub mod plan_resources_filter {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum Kind {
            Unspecified = 0,
            AlwaysAllowed = 1,
            AlwaysDenied = 2,
            Conditional = 3,
        }

        impl Kind {
            /// Returns the value name used in the Protobuf definition.
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Self::Unspecified => "KIND_UNSPECIFIED",
                    Self::AlwaysAllowed => "KIND_ALWAYS_ALLOWED",
                    Self::AlwaysDenied => "KIND_ALWAYS_DENIED",
                    Self::Conditional => "KIND_CONDITIONAL",
                }
            }

            /// Parses a value name used in the Protobuf definition.
            pub fn from_str_name(value: &str) -> Option<Self> {
                match value {
                    "KIND_UNSPECIFIED" => Some(Self::Unspecified),
                    "KIND_ALWAYS_ALLOWED" => Some(Self::AlwaysAllowed),
                    "KIND_ALWAYS_DENIED" => Some(Self::AlwaysDenied),
                    "KIND_CONDITIONAL" => Some(Self::Conditional),
                    _ => None,
                }
            }
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Expression {
            #[prost(string, tag = "1")]
            pub operator: String,
            #[prost(message, repeated, tag = "2")]
            pub operands: Vec<expression::Operand>,
        }

        pub mod expression {
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Operand {
                #[prost(oneof = "operand::Node", tags = "1, 2, 3")]
                pub node: Option<operand::Node>,
            }

            pub mod operand {
                #[derive(Clone, PartialEq, ::prost::Oneof)]
                pub enum Node {
                    #[prost(message, tag = "1")]
                    Value(::prost_types::Value),
                    #[prost(message, tag = "2")]
                    Expression(super::super::Expression),
                    #[prost(string, tag = "3")]
                    Variable(String),
                }
            }
        }
    }
}
