//! Blocking SCIM client for the Cato SCIM service.
//!
//! Every public operation performs at most one HTTP round-trip and returns a
//! [`ScimResult`](crate::ScimResult). There is no retry, backoff or
//! pagination loop; a failed call is reported to the caller as-is.
//!
//! # Module Organization
//!
//! * [`core`] - ScimClient struct, construction, URL building and logging
//! * [`transport`] - request dispatch and response classification
//! * [`users`] - User operations
//! * [`groups`] - Group operations
//! * `tests` - unit tests for request construction and call accounting

pub mod core;
pub mod groups;
pub mod transport;
pub mod users;


pub use core::ScimClient;
pub use transport::classify_response;
