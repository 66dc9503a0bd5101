//! Entries of the `emails` list on a Cato user.

use serde::{Deserialize, Serialize};

/// One entry of the multi-valued `emails` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub email_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

impl EmailAddress {
    /// The primary address entry sent when a user is created.
    pub fn primary(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            email_type: None,
            primary: Some(true),
        }
    }

    pub fn is_primary(&self) -> bool {
        self.primary.unwrap_or(false)
    }
}
