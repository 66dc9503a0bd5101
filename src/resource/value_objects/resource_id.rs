//! Service-assigned identifiers of users and groups.
//!
//! Identifiers are assigned by the service. The client only checks that an id
//! is present before it is placed into a request path.

use crate::error::{ValidationError, ValidationResult};
use serde::Serialize;
use std::fmt;

/// The SCIM resource types exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceType {
    User,
    Group,
}

impl ResourceType {
    /// Endpoint path segment, relative to the base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceType::User => "Users",
            ResourceType::Group => "Groups",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceType::User => "User",
            ResourceType::Group => "Group",
        })
    }
}

/// A non-empty, service-assigned resource identifier.
///
/// ## Examples
///
/// ```rust
/// use cato_scim::resource::value_objects::{ResourceId, ResourceType};
///
/// let id = ResourceId::new(ResourceType::Group, "6283630dfd7ec758a8bf4b61").unwrap();
/// assert_eq!(id.as_str(), "6283630dfd7ec758a8bf4b61");
///
/// assert!(ResourceId::new(ResourceType::Group, "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    resource_type: ResourceType,
    value: String,
}

impl ResourceId {
    /// Wraps `value` for use in a request path.
    ///
    /// Surrounding whitespace is not trimmed; an id that is empty or only
    /// whitespace is rejected.
    pub fn new(resource_type: ResourceType, value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_id(resource_type.to_string()));
        }
        Ok(Self {
            resource_type,
            value,
        })
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
