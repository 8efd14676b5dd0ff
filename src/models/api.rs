use serde::{Deserialize, Serialize};

use crate::models::user::{Role, User};

/// Specialty shown for doctors whose backend record has none
pub const UNKNOWN_SPECIALTY: &str = "Specialty not informed";

/// Generic avatar used for administrators
pub const ADMIN_AVATAR: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTAwIiBoZWlnaHQ9IjEwMCIgdmlld0JveD0iMCAwIDEwMCAxMDAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+CjxjaXJjbGUgY3g9IjUwIiBjeT0iNTAiIHI9IjUwIiBmaWxsPSIjNjY2NjY2Ii8+CjxjaXJjbGUgY3g9IjUwIiBjeT0iMzUiIHI9IjE1IiBmaWxsPSJ3aG10ZSIvPgo8cGF0aCBkPSJNNTAgNjVDMzUgNjUgMjUgNzUgMjUgODVWOTVINZVWODVDNzUgNzUgNjUgNjUgNTAgNjVaIiBmaWxsPSJ3aG10ZSIvPgo8L3N2Zz4K";

/// User type as the backend spells it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiUserKind {
    #[serde(rename = "MEDICO")]
    Doctor,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "PACIENTE")]
    Patient,
    #[serde(other, rename = "DESCONHECIDO")]
    Unknown,
}

/// User record returned by the backend's user endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "tipo")]
    pub kind: ApiUserKind,
    #[serde(rename = "especialidade", default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// Placeholder portrait. Even numbers pick the men's set.
pub fn portrait_url(even: bool, index: u64) -> String {
    let set = if even { "men" } else { "women" };
    format!("https://randomuser.me/api/portraits/{}/{}.jpg", set, index)
}

/// Convert a backend user into the app's user record
pub fn map_api_user(api_user: &ApiUser) -> User {
    let image = match api_user.kind {
        ApiUserKind::Admin => ADMIN_AVATAR.to_string(),
        _ => portrait_url(api_user.id % 2 == 0, api_user.id % 10 + 1),
    };

    let mut user = User::new(
        api_user.id.to_string(),
        api_user.name.clone(),
        api_user.email.clone(),
        Role::Patient,
        image,
    );

    match api_user.kind {
        ApiUserKind::Doctor => {
            user.role = Role::Doctor;
            user.specialty = Some(
                api_user
                    .specialty
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| UNKNOWN_SPECIALTY.to_string()),
            );
        }
        ApiUserKind::Admin => user.role = Role::Admin,
        ApiUserKind::Patient | ApiUserKind::Unknown => {}
    }

    user
}
