//! # Verdict Protocol Bindings
//!
//! Typed message and service bindings for the Verdict policy decision API
//! (the `verdict.*.v1` Protobuf packages). The `.proto` sources under
//! `proto/` are the schema of record; the Rust definitions here are
//! maintained by hand to match them, which keeps downstream builds free of
//! a `protoc` dependency.
//!
//! ## Layout
//!
//! Each Protobuf package maps to a module of the same name, so
//! `verdict.engine.v1.Principal` lives at [`engine::v1::Principal`] and the
//! service stubs at [`svc::v1`].
//!
//! ## JSON
//!
//! Policy documents are authored as JSON or YAML, so the [`policy`] and
//! [`schema`] types carry a protojson-compatible serde implementation:
//! camelCase field names, effects as value names, bytes as base64, unknown
//! fields rejected. [`value`] converts attribute maps between
//! `serde_json::Value` and `google.protobuf.Value`.
pub mod effect;
pub mod engine;
pub mod policy;
pub mod request;
pub mod response;
pub mod schema;
pub mod serde_ext;
pub mod svc;
pub mod value;
