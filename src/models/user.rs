use serde::{Deserialize, Serialize};

/// Role of an authenticated identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Only set for doctors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Avatar URL or data URI
    #[serde(default)]
    pub image: String,
}

impl User {
    pub fn new(id: String, name: String, email: String, role: Role, image: String) -> Self {
        Self {
            id,
            name,
            email,
            role,
            specialty: None,
            image,
        }
    }
}

/// A self-registered patient as kept by the mock resolver.
///
/// The password is stored and compared in plaintext. Never hand this type
/// to callers; use [`RegisteredUser::without_password`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisteredUser {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}

impl RegisteredUser {
    pub fn without_password(&self) -> User {
        self.user.clone()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Account type picked on the registration screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    #[serde(rename = "PACIENTE")]
    Patient,
    #[serde(rename = "ADMIN")]
    Admin,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "userType", default)]
    pub account_type: AccountType,
}

/// Token and user pair representing an authenticated identity.
/// This is also the backend's login/register response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}
