//! Member references carried by Cato groups.
//!
//! A member reference carries the member's resource id in `value` and an
//! optional `display` label. The same shape is used in create-group bodies,
//! membership PATCH operations and group responses.
//!
//! ```rust
//! use cato_scim::resource::value_objects::GroupMember;
//!
//! let member = GroupMember::new("6283630dfd7ec758a8bf4b61").with_display("joe.chip@example.com");
//! assert_eq!(member.effective_display_name(), "joe.chip@example.com");
//! ```

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// A single member reference of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    /// The id of the member resource
    pub value: String,
    /// Human-readable label for the member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl GroupMember {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// The display label if present and non-empty, otherwise the member id.
    pub fn effective_display_name(&self) -> &str {
        self.display
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.value)
    }

    /// Check the reference before it is sent.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.value.trim().is_empty() {
            return Err(ValidationError::missing_required("members.value"));
        }
        Ok(())
    }
}

impl From<&str> for GroupMember {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GroupMember {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
