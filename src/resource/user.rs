//! User request payloads and read views.

use crate::error::{ValidationError, ValidationResult};
use crate::resource::USER_SCHEMA;
use crate::resource::value_objects::{EmailAddress, Meta, Name, UserName};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Length of passwords generated for users created without one.
pub const GENERATED_PASSWORD_LENGTH: usize = 10;

/// Input for [`ScimClient::create_user`](crate::ScimClient::create_user).
///
/// ```rust
/// use cato_scim::NewUser;
///
/// let user = NewUser::new("joe.chip@example.com", "Joe", "Chip", "00u3bbaucx0satWBP357")
///     .password("correct-horse")
///     .active(false);
/// assert!(!user.is_active());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    email: String,
    given_name: String,
    family_name: String,
    external_id: String,
    password: Option<String>,
    active: bool,
}

impl NewUser {
    /// A new, active user. A password is generated at creation time unless
    /// one is set with [`NewUser::password`].
    pub fn new(
        email: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            external_id: external_id.into(),
            password: None,
            active: true,
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the password only when one is supplied.
    pub fn maybe_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Build the SCIM create body after validating the required fields.
    ///
    /// `generated_password` is used only when no password was set.
    pub(crate) fn to_scim_json(&self, generated_password: impl FnOnce() -> String) -> ValidationResult<Value> {
        let user_name = UserName::new(self.email.as_str())?;
        if self.password.as_deref() == Some("") {
            return Err(ValidationError::missing_required("password"));
        }
        let password = self.password.clone().unwrap_or_else(generated_password);

        let body = CreateUserBody {
            schemas: [USER_SCHEMA],
            user_name: &user_name,
            name: Name::new(self.given_name.as_str(), self.family_name.as_str()),
            emails: [EmailAddress::primary(user_name.as_str())],
            external_id: &self.external_id,
            password: &password,
            active: self.active,
        };
        serde_json::to_value(body).map_err(|e| ValidationError::custom(e.to_string()))
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("given_name", &self.given_name)
            .field("family_name", &self.family_name)
            .field("external_id", &self.external_id)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("active", &self.active)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserBody<'a> {
    schemas: [&'static str; 1],
    user_name: &'a UserName,
    name: Name,
    emails: [EmailAddress; 1],
    external_id: &'a str,
    password: &'a str,
    active: bool,
}

/// Random alphanumeric password from the thread-local CSPRNG.
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

/// Typed view of a User resource returned by the service.
///
/// Every attribute is optional so that partial or unusual responses still
/// decode; unknown attributes are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<Name>,
    #[serde(default)]
    pub emails: Vec<EmailAddress>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl User {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        User::deserialize(value)
    }

    pub fn given_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| n.given_name.as_deref())
    }

    pub fn family_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| n.family_name.as_deref())
    }

    /// Creation timestamp from the top level or from `meta`.
    pub fn created(&self) -> Option<&str> {
        self.created
            .as_deref()
            .or_else(|| self.meta.as_ref().and_then(|m| m.created.as_deref()))
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified
            .as_deref()
            .or_else(|| self.meta.as_ref().and_then(|m| m.last_modified.as_deref()))
    }
}
