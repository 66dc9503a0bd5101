//! User operations.

use super::core::ScimClient;
use crate::error::{ScimFailure, ScimResult, ValidationError};
use crate::filter::Filter;
use crate::resource::value_objects::ResourceType;
use crate::resource::{NewUser, generate_password};
use reqwest::Method;
use serde_json::{Value, json};

impl ScimClient {
    /// List users.
    ///
    /// Returns the `Resources` of a single `GET /Users` response.
    pub fn get_users(&self) -> ScimResult<Vec<Value>> {
        self.log_operation(format_args!("get_users()"));
        self.get_list(self.collection_url(ResourceType::User))
    }

    /// Fetch one user by its service-assigned id.
    pub fn get_user(&self, id: &str) -> ScimResult<Value> {
        self.log_operation(format_args!("get_user({id})"));
        let url = self.resource_url(ResourceType::User, id)?;
        self.get(url)
    }

    /// Search users with `filter=<field> eq "<value>"`.
    ///
    /// Typical fields are `userName`, `emails.value`, `name.givenName` and
    /// `name.familyName`. The filter is applied by the service.
    pub fn find_users(&self, field: &str, value: &str) -> ScimResult<Vec<Value>> {
        self.log_operation(format_args!("find_users({field}, {value})"));
        let filter = Filter::eq(field, value)?;
        self.get_list(self.filtered_url(ResourceType::User, &filter))
    }

    /// Create a user with `POST /Users`.
    ///
    /// A 10 character alphanumeric password is generated when the input has
    /// none. An empty or malformed e-mail is rejected without a request.
    pub fn create_user(&self, user: &NewUser) -> ScimResult<Value> {
        self.log_operation(format_args!("create_user({})", user.email()));
        let body = user.to_scim_json(generate_password)?;
        self.send_json(Method::POST, self.collection_url(ResourceType::User), &body)
    }

    /// Replace a user with `PUT /Users/{id}`.
    ///
    /// `data` is sent as-is and is normally the full user object previously
    /// returned by the service, with modifications applied.
    pub fn update_user(&self, id: &str, data: &Value) -> ScimResult<Value> {
        self.log_operation(format_args!("update_user({id})"));
        let url = self.resource_url(ResourceType::User, id)?;
        ensure_object(data, "update_user")?;
        self.send_json(Method::PUT, url, data)
    }

    /// Disable a user. Same request as `update_user(id, {"active": false})`.
    pub fn disable_user(&self, id: &str) -> ScimResult<Value> {
        self.log_operation(format_args!("disable_user({id})"));
        self.update_user(id, &json!({ "active": false }))
    }
}

pub(super) fn ensure_object(data: &Value, operation: &str) -> Result<(), ScimFailure> {
    if data.is_object() {
        Ok(())
    } else {
        Err(ValidationError::ExpectedObject {
            operation: operation.to_string(),
        }
        .into())
    }
}
