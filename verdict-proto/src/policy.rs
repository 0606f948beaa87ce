//! Bindings for the `verdict.policy.v1` package.
//!
//! Policy documents are authored as JSON or YAML, so these types carry a
//! protojson-compatible serde implementation on top of the wire encoding:
//! camelCase field names, effects as value names, defaults omitted and
//! unknown fields rejected.

pub mod v1 {
    use std::collections::HashMap;

    use crate::serde_ext;

    /// A policy document. Exactly one of `resource_policy`,
    /// `principal_policy` or `derived_roles` is expected to be populated.
    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct Policy {
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub api_version: String,
        #[prost(bool, tag = "2")]
        #[serde(skip_serializing_if = "serde_ext::is_false")]
        pub disabled: bool,
        #[prost(string, tag = "3")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub description: String,
        #[prost(message, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub metadata: Option<Metadata>,
        #[prost(message, optional, tag = "5")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub resource_policy: Option<ResourcePolicy>,
        #[prost(message, optional, tag = "6")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub principal_policy: Option<PrincipalPolicy>,
        #[prost(message, optional, tag = "7")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub derived_roles: Option<DerivedRoles>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct Metadata {
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub source_file: String,
        #[prost(map = "string, string", tag = "2")]
        #[serde(skip_serializing_if = "HashMap::is_empty")]
        pub annotations: HashMap<String, String>,
        #[prost(string, tag = "3")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub store_identifier: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct ResourcePolicy {
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub resource: String,
        #[prost(string, tag = "2")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub version: String,
        #[prost(string, repeated, tag = "3")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub import_derived_roles: Vec<String>,
        #[prost(message, repeated, tag = "4")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub rules: Vec<ResourceRule>,
        #[prost(string, tag = "5")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub scope: String,
        #[prost(message, optional, tag = "6")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub schemas: Option<Schemas>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct ResourceRule {
        #[prost(string, repeated, tag = "1")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub actions: Vec<String>,
        #[prost(string, repeated, tag = "2")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub derived_roles: Vec<String>,
        #[prost(string, repeated, tag = "3")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub roles: Vec<String>,
        #[prost(message, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub condition: Option<Condition>,
        #[prost(enumeration = "crate::effect::v1::Effect", tag = "5")]
        #[serde(
            with = "serde_ext::effect_name",
            skip_serializing_if = "serde_ext::enum_unspecified"
        )]
        pub effect: i32,
        #[prost(string, tag = "6")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub name: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct PrincipalPolicy {
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub principal: String,
        #[prost(string, tag = "2")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub version: String,
        #[prost(message, repeated, tag = "3")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub rules: Vec<PrincipalRule>,
        #[prost(string, tag = "4")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub scope: String,
    }

    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct PrincipalRule {
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub resource: String,
        #[prost(message, repeated, tag = "2")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub actions: Vec<principal_rule::Action>,
    }

    pub mod principal_rule {
        use crate::serde_ext;

        #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
        #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
        pub struct Action {
            #[prost(string, tag = "1")]
            #[serde(skip_serializing_if = "String::is_empty")]
            pub action: String,
            #[prost(message, optional, tag = "2")]
            #[serde(skip_serializing_if = "Option::is_none")]
            pub condition: Option<super::Condition>,
            #[prost(enumeration = "crate::effect::v1::Effect", tag = "3")]
            #[serde(
                with = "serde_ext::effect_name",
                skip_serializing_if = "serde_ext::enum_unspecified"
            )]
            pub effect: i32,
            #[prost(string, tag = "4")]
            #[serde(skip_serializing_if = "String::is_empty")]
            pub name: String,
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct DerivedRoles {
        #[prost(string, tag = "1")]
        #[serde(skip_serializing_if = "String::is_empty")]
        pub name: String,
        #[prost(message, repeated, tag = "2")]
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub definitions: Vec<derived_roles::Definition>,
    }

    pub mod derived_roles {
        #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
        #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
        pub struct Definition {
            #[prost(string, tag = "1")]
            #[serde(skip_serializing_if = "String::is_empty")]
            pub name: String,
            #[prost(string, repeated, tag = "2")]
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub parent_roles: Vec<String>,
            #[prost(message, optional, tag = "3")]
            #[serde(skip_serializing_if = "Option::is_none")]
            pub condition: Option<super::Condition>,
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct Condition {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub r#match: Option<Match>,
    }

    /// A boolean expression tree. At most one of the fields is expected to
    /// be populated.
    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct Match {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub all: Option<r#match::List>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub any: Option<r#match::List>,
        #[prost(message, optional, tag = "3")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub none: Option<r#match::List>,
        #[prost(string, optional, tag = "4")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub expr: Option<String>,
    }

    pub mod r#match {
        #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
        #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
        pub struct List {
            #[prost(message, repeated, tag = "1")]
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub of: Vec<super::Match>,
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
    pub struct Schemas {
        #[prost(message, optional, tag = "1")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub principal_schema: Option<schemas::Schema>,
        #[prost(message, optional, tag = "2")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub resource_schema: Option<schemas::Schema>,
    }

    pub mod schemas {
        #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
        #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
        pub struct IgnoreWhen {
            #[prost(string, repeated, tag = "1")]
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub actions: Vec<String>,
        }

        #[derive(Clone, PartialEq, ::prost::Message, serde::Serialize, serde::Deserialize)]
        #[serde(default, rename_all = "camelCase", deny_unknown_fields)]
        pub struct Schema {
            #[prost(string, tag = "1")]
            #[serde(skip_serializing_if = "String::is_empty")]
            pub r#ref: String,
            #[prost(message, optional, tag = "2")]
            #[serde(skip_serializing_if = "Option::is_none")]
            pub ignore_when: Option<IgnoreWhen>,
        }
    }
}
