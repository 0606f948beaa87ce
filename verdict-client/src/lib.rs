//! # Verdict Client SDK
//!
//! `verdict-client` is a client SDK for the Verdict policy decision
//! service. Applications describe who is doing what to which resource and
//! the server answers with allow or deny decisions, or with a query plan
//! for listing the resources a principal may act on.
//!
//! ## Key components
//!
//! * **[`Client`]:** the entry point. It connects to a server and exposes
//!   one method per RPC, plus [`Client::is_allowed`] for the common single
//!   resource and action question.
//! * **[`Principal`], [`Resource`] and [`ResourceBatch`]:** builder-style
//!   request objects, validated before anything is sent.
//! * **[`ClientOptions`]:** connection configuration covering TLS,
//!   timeouts, retries and request metadata.
//! * **[`read_policy`] and [`read_schema`]:** load policy and schema
//!   documents from YAML or JSON sources.
//!
//! ## Example
//!
//! ```no_run
//! use verdict_client::{Client, ClientOptions, Principal, Resource, ResourceBatch};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_basic_auth(
//!     "https://verdict.example.com:3593",
//!     "admin",
//!     "hunter2",
//!     ClientOptions::default(),
//! )?;
//!
//! let principal = Principal::new("alice", ["employee"])
//!     .with_attr("department", "marketing".into());
//!
//! let batch = ResourceBatch::new()
//!     .add(Resource::new("leave_request", "XX125"), ["view", "approve"]);
//!
//! let decisions = client.check_resources(principal, batch).await?;
//! if let Some(entry) = decisions.find("XX125") {
//!     println!("approve: {}", entry.is_allowed("approve"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Credentials
//!
//! [`Client::with_basic_auth`] resolves its arguments against the
//! `VERDICT_SERVER`, `VERDICT_USERNAME` and `VERDICT_PASSWORD` environment
//! variables and falls back to the netrc file, so deployments can configure
//! credentials without code changes. See the [`auth`] module.
//!
//! ## Re-exports
//!
//! This crate re-exports `tonic` and the `verdict-proto` bindings (as
//! [`proto`]) to ensure that consumers use compatible versions of these
//! underlying dependencies.
pub mod auth;
pub mod channel;
pub mod client;
pub mod decode;
pub mod model;
pub mod retry;

pub use auth::{AuthError, BasicAuth, Environment, OsEnvironment, load_basic_auth};
pub use channel::{
    BoxInterceptor, ChannelInterceptor, ClientOptions, ConnectError, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_TIMEOUT, Transport, build_channel,
};
pub use client::{Client, ClientError, PrincipalContext, RequestOptions};
pub use decode::{
    DecodeError, read_policy, read_policy_from_file, read_schema, read_schema_from_file,
};
pub use model::{
    AuxData, CheckResourcesResult, CheckResultEntry, PlanResourcesResult, Principal, Resource,
    ResourceBatch, ServerInfo, Validatable, ValidationError,
};
pub use retry::{CallObserver, CallStats};

// Re-exports
pub use tonic;
pub use verdict_proto as proto;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
