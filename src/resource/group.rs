//! Group request payloads and read views.

use crate::error::{ValidationError, ValidationResult};
use crate::resource::GROUP_SCHEMA;
use crate::resource::value_objects::{GroupMember, Meta};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input for [`ScimClient::create_group`](crate::ScimClient::create_group).
///
/// ```rust
/// use cato_scim::{GroupMember, NewGroup};
///
/// let group = NewGroup::new("Engineering", "okta-00g1")
///     .member(GroupMember::new("6283630dfd7ec758a8bf4b61"));
/// assert_eq!(group.members().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    display_name: String,
    external_id: String,
    members: Vec<GroupMember>,
}

impl NewGroup {
    pub fn new(display_name: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            external_id: external_id.into(),
            members: Vec::new(),
        }
    }

    pub fn member(mut self, member: GroupMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn members_from(mut self, members: impl IntoIterator<Item = GroupMember>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub(crate) fn to_scim_json(&self) -> ValidationResult<Value> {
        if self.display_name.trim().is_empty() {
            return Err(ValidationError::missing_required("displayName"));
        }
        for member in &self.members {
            member.validate()?;
        }

        let body = CreateGroupBody {
            schemas: [GROUP_SCHEMA],
            display_name: &self.display_name,
            external_id: &self.external_id,
            members: &self.members,
        };
        serde_json::to_value(body).map_err(|e| ValidationError::custom(e.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateGroupBody<'a> {
    schemas: [&'static str; 1],
    display_name: &'a str,
    external_id: &'a str,
    members: &'a [GroupMember],
}

/// Typed view of a Group resource returned by the service.
///
/// Members keep the order in which the service returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub members: Vec<GroupMember>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl Group {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Group::deserialize(value)
    }

    pub fn created(&self) -> Option<&str> {
        self.created
            .as_deref()
            .or_else(|| self.meta.as_ref().and_then(|m| m.created.as_deref()))
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified
            .as_deref()
            .or_else(|| self.meta.as_ref().and_then(|m| m.last_modified.as_deref()))
    }
}
