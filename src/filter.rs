//! SCIM filter expressions sent with list requests.
//!
//! Searches are delegated to the service through the `filter` query parameter
//! rather than filtering a full listing locally. Only the equality operator is
//! needed:
//!
//! ```rust
//! use cato_scim::filter::Filter;
//!
//! let filter = Filter::eq("userName", "a@b.com").unwrap();
//! assert_eq!(filter.to_string(), r#"userName eq "a@b.com""#);
//! ```
//!
//! Values are written as JSON strings (RFC 7644 section 3.4.2.2), so `"` and
//! `\` inside a value are escaped and plain values appear verbatim.

use crate::error::{ValidationError, ValidationResult};
use serde_json::Value;
use std::fmt;

/// An `<attribute> eq "<value>"` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    attribute: String,
    value: String,
}

impl Filter {
    /// Build an equality filter.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFilterAttribute`] when the attribute
    /// path is empty or contains characters outside `[A-Za-z0-9._:$-]`.
    pub fn eq(attribute: impl Into<String>, value: impl Into<String>) -> ValidationResult<Self> {
        let attribute = attribute.into();
        if !is_attribute_path(&attribute) {
            return Err(ValidationError::InvalidFilterAttribute { attribute });
        }
        Ok(Self {
            attribute,
            value: value.into(),
        })
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted = Value::String(self.value.clone());
        write!(f, "{} eq {}", self.attribute, quoted)
    }
}

fn is_attribute_path(attribute: &str) -> bool {
    !attribute.is_empty()
        && attribute
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '$' | '-'))
}
