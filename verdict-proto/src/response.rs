//! Bindings for the `verdict.response.v1` package.

pub mod v1 {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct PlanResourcesResponse {
        #[prost(string, tag = "1")]
        pub request_id: String,
        #[prost(string, repeated, tag = "2")]
        pub actions: Vec<String>,
        #[prost(string, tag = "3")]
        pub resource_kind: String,
        #[prost(string, tag = "4")]
        pub policy_version: String,
        #[prost(message, optional, tag = "5")]
        pub filter: Option<crate::engine::v1::PlanResourcesFilter>,
        #[prost(message, optional, tag = "6")]
        pub meta: Option<plan_resources_response::Meta>,
        #[prost(message, repeated, tag = "7")]
        pub validation_errors: Vec<crate::schema::v1::ValidationError>,
    }

    pub mod plan_resources_response {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Meta {
            #[prost(string, tag = "1")]
            pub filter_debug: String,
            #[prost(string, tag = "2")]
            pub matched_scope: String,
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CheckResourcesResponse {
        #[prost(string, tag = "1")]
        pub request_id: String,
        #[prost(message, repeated, tag = "2")]
        pub results: Vec<check_resources_response::ResultEntry>,
    }

    pub mod check_resources_response {
        use std::collections::HashMap;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResultEntry {
            #[prost(message, optional, tag = "1")]
            pub resource: Option<result_entry::Resource>,
            #[prost(map = "string, enumeration(crate::effect::v1::Effect)", tag = "2")]
            pub actions: HashMap<String, i32>,
            #[prost(message, repeated, tag = "3")]
            pub validation_errors: Vec<crate::schema::v1::ValidationError>,
            #[prost(message, optional, tag = "4")]
            pub meta: Option<result_entry::Meta>,
        }

        pub mod result_entry {
            use std::collections::HashMap;

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Resource {
                #[prost(string, tag = "1")]
                pub kind: String,
                #[prost(string, tag = "2")]
                pub policy_version: String,
                #[prost(string, tag = "3")]
                pub id: String,
                #[prost(string, tag = "4")]
                pub scope: String,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Meta {
                #[prost(map = "string, message", tag = "1")]
                pub actions: HashMap<String, meta::EffectMeta>,
                #[prost(string, repeated, tag = "2")]
                pub effective_derived_roles: Vec<String>,
            }

            pub mod meta {
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct EffectMeta {
                    #[prost(string, tag = "1")]
                    pub matched_policy: String,
                    #[prost(string, tag = "2")]
                    pub matched_scope: String,
                }
            }
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ServerInfoResponse {
        #[prost(string, tag = "1")]
        pub version: String,
        #[prost(string, tag = "2")]
        pub commit: String,
        #[prost(string, tag = "3")]
        pub build_date: String,
    }
}
