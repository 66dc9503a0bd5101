//! UserName value object for SCIM user identifiers.
//!
//! The Cato service uses the user's e-mail address as `userName`, so a user
//! name must look like an address before a create request is sent.

use crate::error::{ValidationError, ValidationResult};
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated, e-mail shaped SCIM user name.
///
/// Accepted values are non-blank, free of whitespace, and hold exactly one
/// `@` with a non-empty local part and domain.
///
/// ## Examples
///
/// ```rust
/// use cato_scim::resource::value_objects::UserName;
///
/// let username = UserName::new("joe.chip@example.com").unwrap();
/// assert_eq!(username.as_str(), "joe.chip@example.com");
///
/// assert!(UserName::new("").is_err());
/// assert!(UserName::new("joe.chip").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Checks `value` and wraps it.
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        Self::check(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn check(value: &str) -> ValidationResult<()> {
        if value.chars().all(char::is_whitespace) {
            return Err(ValidationError::missing_required("userName"));
        }

        if value.chars().any(char::is_whitespace) {
            let message = format!("userName '{value}' must not contain whitespace");
            return Err(ValidationError::custom(message));
        }

        match value.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(())
            }
            _ => Err(ValidationError::custom(format!("userName '{value}' must be an e-mail address"))),
        }
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for UserName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl TryFrom<&str> for UserName {
    type Error = ValidationError;

    fn try_from(value: &str) -> ValidationResult<Self> {
        UserName::new(value.to_owned())
    }
}
