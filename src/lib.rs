//! SCIM 2.0 client library for the Cato Networks SCIM service.
//!
//! Provides blocking CRUD operations for users and groups. Every operation
//! issues at most one HTTP request and returns a [`ScimResult`], whose failure
//! side distinguishes HTTP errors, transport errors and local rejections.
//!
//! # Core Components
//!
//! - [`ScimClient`] - User and group operations against one service
//! - [`ClientConfiguration`] / [`ConfigResolver`] - credential resolution
//! - [`ScimFailure`] - the three failure shapes
//! - [`admin`] - multi-step workflows used by the `cato-scim` CLI
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cato_scim::{NewUser, ScimClient};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads CATO_SCIM_URL and CATO_SCIM_TOKEN from the environment or ./.env
//! let client = ScimClient::from_env()?;
//!
//! let user = NewUser::new("joe.chip@example.com", "Joe", "Chip", "00u3bbaucx0satWBP357");
//! match client.create_user(&user) {
//!     Ok(created) => println!("created {}", created["id"]),
//!     Err(failure) => eprintln!("create failed: {}", serde_json::to_string(&failure)?),
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod resource;
pub mod scim_client;

// Re-export commonly used types for convenience
pub use config::{ClientConfiguration, ConfigResolver, LogLevel};
pub use error::{ConfigurationError, ScimFailure, ScimResult, ValidationError};
pub use resource::{Group, GroupMember, NewGroup, NewUser, User};
pub use scim_client::ScimClient;
