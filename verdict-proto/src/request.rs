//! Bindings for the `verdict.request.v1` package.

pub mod v1 {
    /// Auxiliary data attached to a request, made available to policy
    /// conditions during evaluation.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AuxData {
        #[prost(message, optional, tag = "1")]
        pub jwt: Option<aux_data::Jwt>,
    }

    pub mod aux_data {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Jwt {
            #[prost(string, tag = "1")]
            pub token: String,
            #[prost(string, tag = "2")]
            pub key_set_id: String,
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct PlanResourcesRequest {
        #[prost(string, tag = "1")]
        pub request_id: String,
        #[prost(string, repeated, tag = "2")]
        pub actions: Vec<String>,
        #[prost(message, optional, tag = "3")]
        pub principal: Option<crate::engine::v1::Principal>,
        #[prost(message, optional, tag = "4")]
        pub resource: Option<crate::engine::v1::plan_resources_input::Resource>,
        #[prost(message, optional, tag = "5")]
        pub aux_data: Option<AuxData>,
        #[prost(bool, tag = "6")]
        pub include_meta: bool,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CheckResourcesRequest {
        #[prost(string, tag = "1")]
        pub request_id: String,
        #[prost(bool, tag = "2")]
        pub include_meta: bool,
        #[prost(message, optional, tag = "3")]
        pub principal: Option<crate::engine::v1::Principal>,
        #[prost(message, repeated, tag = "4")]
        pub resources: Vec<check_resources_request::ResourceEntry>,
        #[prost(message, optional, tag = "5")]
        pub aux_data: Option<AuxData>,
    }

    pub mod check_resources_request {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ResourceEntry {
            #[prost(message, optional, tag = "1")]
            pub resource: Option<crate::engine::v1::Resource>,
            #[prost(string, repeated, tag = "2")]
            pub actions: Vec<String>,
        }
    }

    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct ServerInfoRequest {}
}
