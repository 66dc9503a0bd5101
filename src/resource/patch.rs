//! SCIM PATCH request bodies.
//!
//! Only member additions and removals are sent as PATCH; attribute updates go
//! through PUT.

use crate::error::{ValidationError, ValidationResult};
use crate::resource::PATCH_OP_SCHEMA;
use crate::resource::value_objects::GroupMember;
use serde::Serialize;

/// PATCH operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOpKind {
    Add,
    Remove,
}

/// A single entry of `Operations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchOperation<'a> {
    pub op: PatchOpKind,
    pub path: &'static str,
    pub value: &'a [GroupMember],
}

/// `urn:ietf:params:scim:api:messages:2.0:PatchOp` message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchRequest<'a> {
    pub schemas: [&'static str; 1],
    #[serde(rename = "Operations")]
    pub operations: Vec<PatchOperation<'a>>,
}

impl<'a> PatchRequest<'a> {
    /// A PATCH adding or removing `members`.
    ///
    /// At least one member is required and every member needs a value.
    pub fn members(op: PatchOpKind, members: &'a [GroupMember]) -> ValidationResult<Self> {
        if members.is_empty() {
            return Err(ValidationError::EmptyMembers);
        }
        for member in members {
            member.validate()?;
        }
        Ok(Self {
            schemas: [PATCH_OP_SCHEMA],
            operations: vec![PatchOperation {
                op,
                path: "members",
                value: members,
            }],
        })
    }
}
