//! Multi-step administration workflows.
//!
//! These compose the single-request operations of [`ScimClient`] into the
//! procedures an operator runs from the command line: look a user or group up
//! by name, toggle a user's status, set a password, and manage membership.
//! Each step is still one request; a workflow stops at the first failure.

use crate::ScimClient;
use crate::error::ScimFailure;
use crate::resource::{Group, GroupMember, User};
use log::warn;
use serde::Serialize;
use serde_json::Value;

/// Failure of an administration workflow.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// A request failed
    #[error("{context}: {failure}")]
    Scim {
        context: String,
        #[source]
        failure: ScimFailure,
    },

    /// Lookup returned nothing
    #[error("No {resource_type} found with {attribute}: {value}")]
    NotFound {
        resource_type: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// Lookup that must be unique returned several resources
    #[error("Multiple {resource_type}s found with {attribute}: {value}")]
    Ambiguous {
        resource_type: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// A returned resource lacks an attribute the workflow needs
    #[error("{resource_type} returned by the service has no '{attribute}'")]
    MalformedResource {
        resource_type: &'static str,
        attribute: &'static str,
    },
}

impl AdminError {
    fn scim(context: impl Into<String>) -> impl FnOnce(ScimFailure) -> Self {
        let context = context.into();
        move |failure| Self::Scim { context, failure }
    }

    /// The underlying request failure, if any.
    pub fn failure(&self) -> Option<&ScimFailure> {
        match self {
            Self::Scim { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

/// Current status of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStatus {
    pub username: String,
    pub user_id: String,
    pub active: bool,
}

impl UserStatus {
    pub fn label(&self) -> &'static str {
        if self.active { "enabled" } else { "disabled" }
    }
}

/// Outcome of [`set_user_active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The user already had the requested status; nothing was sent
    AlreadyInState,
    /// The user was updated
    Changed,
}

/// A group member with a resolved label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub id: String,
    pub display: String,
}

/// Members of a group, in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMembers {
    pub group: String,
    pub members: Vec<MemberSummary>,
}

/// The `id` attribute of a returned resource.
pub fn resource_id<'a>(resource: &'a Value, resource_type: &'static str) -> AdminResult<&'a str> {
    resource
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(AdminError::MalformedResource {
            resource_type,
            attribute: "id",
        })
}

/// Find exactly one user by `userName`.
pub fn find_unique_user(client: &ScimClient, username: &str) -> AdminResult<Value> {
    let users = client
        .find_users("userName", username)
        .map_err(AdminError::scim("Error searching for user"))?;
    exactly_one(users, "user", "username", username)
}

/// Find exactly one group by `displayName`.
pub fn find_unique_group(client: &ScimClient, group_name: &str) -> AdminResult<Value> {
    let groups = client
        .find_group(group_name)
        .map_err(AdminError::scim("Error searching for group"))?;
    exactly_one(groups, "group", "name", group_name)
}

fn exactly_one(
    mut found: Vec<Value>,
    resource_type: &'static str,
    attribute: &'static str,
    value: &str,
) -> AdminResult<Value> {
    match found.len() {
        0 => Err(AdminError::NotFound {
            resource_type,
            attribute,
            value: value.to_string(),
        }),
        1 => Ok(found.remove(0)),
        _ => Err(AdminError::Ambiguous {
            resource_type,
            attribute,
            value: value.to_string(),
        }),
    }
}

/// First match of a search, warning when the search was not unique.
fn first_match(
    mut found: Vec<Value>,
    resource_type: &'static str,
    attribute: &'static str,
    value: &str,
) -> AdminResult<Value> {
    if found.is_empty() {
        return Err(AdminError::NotFound {
            resource_type,
            attribute,
            value: value.to_string(),
        });
    }
    if found.len() > 1 {
        warn!(
            "Found {} {resource_type}s with {attribute} {value}; using the first",
            found.len()
        );
    }
    Ok(found.remove(0))
}

/// Look a user up by id, or by `userName` when `by_id` is false.
///
/// A non-unique `userName` search yields the first match with a warning.
pub fn lookup_user(client: &ScimClient, identifier: &str, by_id: bool) -> AdminResult<Value> {
    if by_id {
        return client
            .get_user(identifier)
            .map_err(AdminError::scim("Error retrieving user"));
    }
    let users = client
        .find_users("userName", identifier)
        .map_err(AdminError::scim("Error searching for user"))?;
    first_match(users, "user", "username", identifier)
}

/// Look a group up by id, or by `displayName` when `by_id` is false.
///
/// A name search is followed by a fetch by id so that members are included.
pub fn lookup_group(client: &ScimClient, identifier: &str, by_id: bool) -> AdminResult<Value> {
    let id = if by_id {
        identifier.to_string()
    } else {
        let groups = client
            .find_group(identifier)
            .map_err(AdminError::scim("Error searching for group"))?;
        let group = first_match(groups, "group", "display name", identifier)?;
        resource_id(&group, "group")?.to_string()
    };
    client
        .get_group(&id)
        .map_err(AdminError::scim("Error retrieving group"))
}

/// Report whether a user is enabled.
pub fn user_status(client: &ScimClient, username: &str) -> AdminResult<UserStatus> {
    let user = find_unique_user(client, username)?;
    let user_id = resource_id(&user, "user")?.to_string();
    let full_user = client
        .get_user(&user_id)
        .map_err(AdminError::scim("Error retrieving user details"))?;
    let active = full_user
        .get("active")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(UserStatus {
        username: username.to_string(),
        user_id,
        active,
    })
}

/// Enable or disable a user, sending the full user object back with `active`
/// changed. Nothing is sent when the user already has the requested status.
pub fn set_user_active(client: &ScimClient, username: &str, enable: bool) -> AdminResult<StatusChange> {
    let user = find_unique_user(client, username)?;
    let user_id = resource_id(&user, "user")?.to_string();
    let mut full_user = client
        .get_user(&user_id)
        .map_err(AdminError::scim("Error retrieving user details"))?;

    let current = full_user
        .get("active")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if current == enable {
        return Ok(StatusChange::AlreadyInState);
    }

    set_attribute(&mut full_user, "active", Value::Bool(enable))?;
    let action = if enable { "enabling" } else { "disabling" };
    client
        .update_user(&user_id, &full_user)
        .map_err(AdminError::scim(format!("Error {action} user")))?;
    Ok(StatusChange::Changed)
}

/// Set a user's password by sending the full user object back.
pub fn update_password(client: &ScimClient, username: &str, password: &str) -> AdminResult<()> {
    let user = find_unique_user(client, username)?;
    let user_id = resource_id(&user, "user")?.to_string();
    let mut full_user = client
        .get_user(&user_id)
        .map_err(AdminError::scim("Error retrieving user details"))?;

    set_attribute(&mut full_user, "password", Value::String(password.to_string()))?;
    client
        .update_user(&user_id, &full_user)
        .map_err(AdminError::scim("Error updating user password"))?;
    Ok(())
}

fn set_attribute(resource: &mut Value, attribute: &'static str, value: Value) -> AdminResult<()> {
    match resource.as_object_mut() {
        Some(object) => {
            object.insert(attribute.to_string(), value);
            Ok(())
        }
        None => Err(AdminError::MalformedResource {
            resource_type: "user",
            attribute,
        }),
    }
}

/// Add a user to a group, both identified by name.
pub fn add_member(client: &ScimClient, group_name: &str, username: &str) -> AdminResult<()> {
    let (group_id, member) = resolve_membership(client, group_name, username)?;
    client
        .add_members(&group_id, &[member])
        .map_err(AdminError::scim("Error adding user to group"))?;
    Ok(())
}

/// Remove a user from a group, both identified by name.
pub fn remove_member(client: &ScimClient, group_name: &str, username: &str) -> AdminResult<()> {
    let (group_id, member) = resolve_membership(client, group_name, username)?;
    client
        .remove_members(&group_id, &[member])
        .map_err(AdminError::scim("Error removing user from group"))?;
    Ok(())
}

fn resolve_membership(
    client: &ScimClient,
    group_name: &str,
    username: &str,
) -> AdminResult<(String, GroupMember)> {
    let group = find_unique_group(client, group_name)?;
    let user = find_unique_user(client, username)?;

    let group_id = resource_id(&group, "group")?.to_string();
    let user_id = resource_id(&user, "user")?;
    let display = user
        .get("userName")
        .and_then(Value::as_str)
        .unwrap_or(username);

    Ok((group_id, GroupMember::new(user_id).with_display(display)))
}

/// List the members of a group identified by name.
pub fn list_members(client: &ScimClient, group_name: &str) -> AdminResult<GroupMembers> {
    let group = find_unique_group(client, group_name)?;
    let group_id = resource_id(&group, "group")?;
    let full_group = client
        .get_group(group_id)
        .map_err(AdminError::scim("Error retrieving group details"))?;

    let members = group_members(&full_group);
    Ok(GroupMembers {
        group: group_name.to_string(),
        members: resolve_member_displays(client, &members),
    })
}

/// Members of a returned group; an undecodable member list is empty.
pub fn group_members(group: &Value) -> Vec<GroupMember> {
    match Group::from_value(group) {
        Ok(group) => group.members,
        Err(e) => {
            warn!("Could not decode group members: {e}");
            Vec::new()
        }
    }
}

/// Label each member with its `display`, or else the user's `userName`
/// fetched by id, or else the id itself.
///
/// Lookups that fail fall back to the id and do not abort the listing.
pub fn resolve_member_displays(client: &ScimClient, members: &[GroupMember]) -> Vec<MemberSummary> {
    members
        .iter()
        .map(|member| {
            let display = match member.display.as_deref().filter(|d| !d.is_empty()) {
                Some(display) => display.to_string(),
                None => client
                    .get_user(&member.value)
                    .ok()
                    .and_then(|user| User::from_value(&user).ok())
                    .and_then(|user| user.user_name)
                    .unwrap_or_else(|| member.value.clone()),
            };
            MemberSummary {
                id: member.value.clone(),
                display,
            }
        })
        .collect()
}
