//! SCIM resource model used by the client.
//!
//! # Key Components
//!
//! * [`NewUser`] / [`NewGroup`] - validated inputs for create requests
//! * [`User`] / [`Group`] - lenient typed views of returned resources
//! * [`PatchRequest`] - membership PATCH bodies
//! * [`ListResponse`] - list and search envelope
//! * [`value_objects`] - attribute-level primitives (ids, user names, members)

pub mod group;
pub mod list;
pub mod patch;
pub mod user;
pub mod value_objects;

pub use group::{Group, NewGroup};
pub use list::ListResponse;
pub use patch::{PatchOpKind, PatchOperation, PatchRequest};
pub use user::{NewUser, User, generate_password};
pub use value_objects::{
    EmailAddress, GroupMember, Meta, Name, ResourceId, ResourceType, UserName,
};

/// Core User schema URN.
pub const USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
/// Core Group schema URN.
pub const GROUP_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
/// PATCH message schema URN.
pub const PATCH_OP_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:PatchOp";
