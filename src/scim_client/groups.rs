//! Group operations.

use super::core::ScimClient;
use super::users::ensure_object;
use crate::error::{ScimResult, ValidationError};
use crate::filter::Filter;
use crate::resource::value_objects::{GroupMember, ResourceType};
use crate::resource::{NewGroup, PatchOpKind, PatchRequest};
use reqwest::Method;
use serde_json::{Value, json};

impl ScimClient {
    /// List groups.
    pub fn get_groups(&self) -> ScimResult<Vec<Value>> {
        self.log_operation(format_args!("get_groups()"));
        self.get_list(self.collection_url(ResourceType::Group))
    }

    /// Fetch one group, including its members.
    pub fn get_group(&self, id: &str) -> ScimResult<Value> {
        self.log_operation(format_args!("get_group({id})"));
        let url = self.resource_url(ResourceType::Group, id)?;
        self.get(url)
    }

    /// Search groups by `displayName`. Normally yields zero or one group.
    pub fn find_group(&self, display_name: &str) -> ScimResult<Vec<Value>> {
        self.log_operation(format_args!("find_group({display_name})"));
        let filter = Filter::eq("displayName", display_name)?;
        self.get_list(self.filtered_url(ResourceType::Group, &filter))
    }

    /// Create a group with `POST /Groups`.
    pub fn create_group(&self, group: &NewGroup) -> ScimResult<Value> {
        self.log_operation(format_args!("create_group({})", group.display_name()));
        let body = group.to_scim_json()?;
        self.send_json(Method::POST, self.collection_url(ResourceType::Group), &body)
    }

    /// Replace a group with `PUT /Groups/{id}`.
    pub fn update_group(&self, id: &str, data: &Value) -> ScimResult<Value> {
        self.log_operation(format_args!("update_group({id})"));
        let url = self.resource_url(ResourceType::Group, id)?;
        ensure_object(data, "update_group")?;
        self.send_json(Method::PUT, url, data)
    }

    /// Rename a group. Same request as `update_group(id, {"displayName": new_name})`.
    pub fn rename_group(&self, id: &str, new_name: &str) -> ScimResult<Value> {
        self.log_operation(format_args!("rename_group({id})"));
        if new_name.trim().is_empty() {
            return Err(ValidationError::missing_required("displayName").into());
        }
        self.update_group(id, &json!({ "displayName": new_name }))
    }

    /// Disable a group. Same request as `update_group(id, {"active": false})`.
    pub fn disable_group(&self, id: &str) -> ScimResult<Value> {
        self.log_operation(format_args!("disable_group({id})"));
        self.update_group(id, &json!({ "active": false }))
    }

    /// Add members with a PATCH `add` operation on `members`.
    pub fn add_members(&self, id: &str, members: &[GroupMember]) -> ScimResult<Value> {
        self.log_operation(format_args!("add_members({id})"));
        self.patch_members(id, PatchOpKind::Add, members)
    }

    /// Remove members with a PATCH `remove` operation on `members`.
    pub fn remove_members(&self, id: &str, members: &[GroupMember]) -> ScimResult<Value> {
        self.log_operation(format_args!("remove_members({id})"));
        self.patch_members(id, PatchOpKind::Remove, members)
    }

    fn patch_members(&self, id: &str, op: PatchOpKind, members: &[GroupMember]) -> ScimResult<Value> {
        let url = self.resource_url(ResourceType::Group, id)?;
        let patch = PatchRequest::members(op, members)?;
        self.send_json(Method::PATCH, url, &patch)
    }
}
