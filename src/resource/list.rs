//! SCIM ListResponse envelope.

use crate::error::{ScimFailure, ScimResult};
use serde::Deserialize;
use serde_json::Value;

/// `urn:ietf:params:scim:api:messages:2.0:ListResponse`, as far as the client
/// needs it. A missing or null `Resources` decodes as an empty page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub start_index: Option<u64>,
    #[serde(default)]
    pub items_per_page: Option<u64>,
    #[serde(default, rename = "Resources")]
    resources: Option<Vec<Value>>,
}

impl ListResponse {
    /// Decode a list body. Anything but a JSON object with the expected
    /// field types is an invalid response body.
    pub fn from_value(body: Value) -> ScimResult<Self> {
        if !body.is_object() {
            return Err(ScimFailure::invalid_response_body());
        }
        serde_json::from_value(body).map_err(|_| ScimFailure::invalid_response_body())
    }

    pub fn resources(&self) -> &[Value] {
        self.resources.as_deref().unwrap_or_default()
    }

    pub fn into_resources(self) -> Vec<Value> {
        self.resources.unwrap_or_default()
    }

    /// True when the service reports more results than it returned.
    pub fn is_truncated(&self) -> bool {
        self.total_results
            .is_some_and(|total| total > self.resources().len() as u64)
    }
}
