//! # Request and response model
//!
//! Builder-style wrappers around the wire types. [`Principal`], [`Resource`]
//! and [`ResourceBatch`] are what callers construct; the client validates
//! them before sending. [`CheckResourcesResult`] and friends wrap responses
//! with accessors for the common questions, leaving the raw message
//! reachable through `into_inner`.

use std::collections::HashMap;

use thiserror::Error;
use verdict_proto::effect::v1::Effect;
use verdict_proto::engine;
use verdict_proto::engine::v1::plan_resources_filter;
use verdict_proto::request;
use verdict_proto::request::v1::check_resources_request::ResourceEntry;
use verdict_proto::response;
use verdict_proto::response::v1::check_resources_response;
use verdict_proto::schema;
use verdict_proto::value::json_to_proto;

/// A request object that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {problem}")]
pub struct ValidationError {
    field: String,
    problem: &'static str,
}

impl ValidationError {
    fn new(field: impl Into<String>, problem: &'static str) -> Self {
        Self {
            field: field.into(),
            problem,
        }
    }

    /// Path of the offending field, e.g. `resources[2].actions`.
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// Request objects that can be checked for completeness before being sent.
pub trait Validatable {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// The entity performing actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal(engine::v1::Principal);

impl Principal {
    pub fn new(
        id: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self(engine::v1::Principal {
            id: id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
            ..Default::default()
        })
    }

    pub fn with_policy_version(mut self, version: impl Into<String>) -> Self {
        self.0.policy_version = version.into();
        self
    }

    /// Adds roles to the principal, keeping any set previously.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.0.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.0.scope = scope.into();
        self
    }

    /// Sets an attribute made available to policy conditions.
    pub fn with_attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.0.attr.insert(key.into(), json_to_proto(value));
        self
    }

    pub fn into_proto(self) -> engine::v1::Principal {
        self.0
    }

    pub fn as_proto(&self) -> &engine::v1::Principal {
        &self.0
    }
}

impl From<engine::v1::Principal> for Principal {
    fn from(principal: engine::v1::Principal) -> Self {
        Self(principal)
    }
}

impl Validatable for Principal {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.id.is_empty() {
            return Err(ValidationError::new("id", "must not be empty"));
        }
        if self.0.roles.is_empty() {
            return Err(ValidationError::new("roles", "must not be empty"));
        }
        Ok(())
    }
}

/// The entity actions are performed on.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource(engine::v1::Resource);

impl Resource {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self(engine::v1::Resource {
            kind: kind.into(),
            id: id.into(),
            ..Default::default()
        })
    }

    pub fn with_policy_version(mut self, version: impl Into<String>) -> Self {
        self.0.policy_version = version.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.0.scope = scope.into();
        self
    }

    /// Sets an attribute made available to policy conditions.
    pub fn with_attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.0.attr.insert(key.into(), json_to_proto(value));
        self
    }

    pub fn into_proto(self) -> engine::v1::Resource {
        self.0
    }

    pub fn as_proto(&self) -> &engine::v1::Resource {
        &self.0
    }
}

impl From<engine::v1::Resource> for Resource {
    fn from(resource: engine::v1::Resource) -> Self {
        Self(resource)
    }
}

impl Validatable for Resource {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.kind.is_empty() {
            return Err(ValidationError::new("kind", "must not be empty"));
        }
        if self.0.id.is_empty() {
            return Err(ValidationError::new("id", "must not be empty"));
        }
        Ok(())
    }
}

/// A set of resources to check in a single request, each with its own list
/// of actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceBatch(Vec<ResourceEntry>);

impl ResourceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        mut self,
        resource: Resource,
        actions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.0.push(ResourceEntry {
            resource: Some(resource.into_proto()),
            actions: actions.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<ResourceEntry> {
        self.0
    }
}

impl Validatable for ResourceBatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::new("resources", "must not be empty"));
        }

        for (index, entry) in self.0.iter().enumerate() {
            if entry.actions.is_empty() {
                return Err(ValidationError::new(
                    format!("resources[{index}].actions"),
                    "must not be empty",
                ));
            }

            let Some(resource) = &entry.resource else {
                return Err(ValidationError::new(
                    format!("resources[{index}].resource"),
                    "is missing",
                ));
            };
            if resource.kind.is_empty() {
                return Err(ValidationError::new(
                    format!("resources[{index}].resource.kind"),
                    "must not be empty",
                ));
            }
            if resource.id.is_empty() {
                return Err(ValidationError::new(
                    format!("resources[{index}].resource.id"),
                    "must not be empty",
                ));
            }
        }

        Ok(())
    }
}

/// Auxiliary data attached to requests, made available to policy conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxData(request::v1::AuxData);

impl AuxData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a JWT to be verified and exposed to policy conditions. Pass
    /// an empty `key_set_id` if the server has a single key set configured.
    pub fn with_jwt(mut self, token: impl Into<String>, key_set_id: impl Into<String>) -> Self {
        self.0.jwt = Some(request::v1::aux_data::Jwt {
            token: token.into(),
            key_set_id: key_set_id.into(),
        });
        self
    }

    pub(crate) fn into_proto(self) -> request::v1::AuxData {
        self.0
    }
}

/// Outcome of a `CheckResources` call.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResourcesResult(response::v1::CheckResourcesResponse);

impl CheckResourcesResult {
    pub(crate) fn new(response: response::v1::CheckResourcesResponse) -> Self {
        Self(response)
    }

    pub fn request_id(&self) -> &str {
        &self.0.request_id
    }

    /// Per-resource results, in request order.
    pub fn entries(&self) -> impl Iterator<Item = CheckResultEntry<'_>> {
        self.0.results.iter().map(CheckResultEntry)
    }

    /// Finds the result for the resource with the given id.
    pub fn find(&self, resource_id: &str) -> Option<CheckResultEntry<'_>> {
        self.entries()
            .find(|entry| entry.resource().is_some_and(|r| r.id == resource_id))
    }

    /// Finds the first result whose resource matches the predicate. Useful
    /// when the id alone is ambiguous, e.g. batches mixing resource kinds.
    pub fn find_with_predicate(
        &self,
        predicate: impl Fn(&check_resources_response::result_entry::Resource) -> bool,
    ) -> Option<CheckResultEntry<'_>> {
        self.entries()
            .find(|entry| entry.resource().is_some_and(&predicate))
    }

    pub fn into_inner(self) -> response::v1::CheckResourcesResponse {
        self.0
    }
}

/// Decision for a single resource within a [`CheckResourcesResult`].
#[derive(Debug, Clone, Copy)]
pub struct CheckResultEntry<'a>(&'a check_resources_response::ResultEntry);

impl<'a> CheckResultEntry<'a> {
    pub fn resource(&self) -> Option<&'a check_resources_response::result_entry::Resource> {
        self.0.resource.as_ref()
    }

    /// Whether the given action was allowed. Actions missing from the
    /// response are treated as denied.
    pub fn is_allowed(&self, action: &str) -> bool {
        self.0.actions.get(action).copied() == Some(Effect::Allow as i32)
    }

    /// Raw action to effect map.
    pub fn actions(&self) -> &'a HashMap<String, i32> {
        &self.0.actions
    }

    pub fn validation_errors(&self) -> &'a [schema::v1::ValidationError] {
        &self.0.validation_errors
    }

    pub fn raw(&self) -> &'a check_resources_response::ResultEntry {
        self.0
    }
}

/// Outcome of a `PlanResources` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResourcesResult(response::v1::PlanResourcesResponse);

impl PlanResourcesResult {
    pub(crate) fn new(response: response::v1::PlanResourcesResponse) -> Self {
        Self(response)
    }

    pub fn request_id(&self) -> &str {
        &self.0.request_id
    }

    pub fn actions(&self) -> &[String] {
        &self.0.actions
    }

    pub fn resource_kind(&self) -> &str {
        &self.0.resource_kind
    }

    pub fn policy_version(&self) -> &str {
        &self.0.policy_version
    }

    pub fn filter_kind(&self) -> plan_resources_filter::Kind {
        self.0
            .filter
            .as_ref()
            .and_then(|filter| plan_resources_filter::Kind::try_from(filter.kind).ok())
            .unwrap_or(plan_resources_filter::Kind::Unspecified)
    }

    /// The policy allows the actions unconditionally; no filtering is needed.
    pub fn is_always_allowed(&self) -> bool {
        self.filter_kind() == plan_resources_filter::Kind::AlwaysAllowed
    }

    /// The policy denies the actions unconditionally; no resources match.
    pub fn is_always_denied(&self) -> bool {
        self.filter_kind() == plan_resources_filter::Kind::AlwaysDenied
    }

    pub fn is_conditional(&self) -> bool {
        self.filter_kind() == plan_resources_filter::Kind::Conditional
    }

    /// The filter condition to apply to the data source, when the outcome
    /// is conditional.
    pub fn condition(&self) -> Option<&plan_resources_filter::expression::Operand> {
        self.0.filter.as_ref().and_then(|f| f.condition.as_ref())
    }

    pub fn validation_errors(&self) -> &[schema::v1::ValidationError] {
        &self.0.validation_errors
    }

    pub fn meta(&self) -> Option<&response::v1::plan_resources_response::Meta> {
        self.0.meta.as_ref()
    }

    pub fn into_inner(self) -> response::v1::PlanResourcesResponse {
        self.0
    }
}

/// Version information reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerInfo(response::v1::ServerInfoResponse);

impl ServerInfo {
    pub(crate) fn new(response: response::v1::ServerInfoResponse) -> Self {
        Self(response)
    }

    pub fn version(&self) -> &str {
        &self.0.version
    }

    pub fn commit(&self) -> &str {
        &self.0.commit
    }

    pub fn build_date(&self) -> &str {
        &self.0.build_date
    }

    pub fn into_inner(self) -> response::v1::ServerInfoResponse {
        self.0
    }
}
