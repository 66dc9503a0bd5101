//! Typed attribute values used in Cato request bodies and responses.
//!
//! Values the client sends are validated when constructed, so a request body
//! is only built from values that passed local precondition checks. Values
//! read back from the service are plain serde types and are not validated.
//!
//! ```rust
//! use cato_scim::resource::value_objects::{ResourceId, ResourceType};
//!
//! let id = ResourceId::new(ResourceType::User, "6236d20907a2c5128551028f").unwrap();
//! assert_eq!(id.resource_type().endpoint(), "Users");
//! ```

mod email_address;
mod group_member;
mod meta;
mod name;
mod resource_id;
mod user_name;

pub use email_address::EmailAddress;
pub use group_member::GroupMember;
pub use meta::Meta;
pub use name::Name;
pub use resource_id::{ResourceId, ResourceType};
pub use user_name::UserName;
