//! In-process resolver standing in for the real backend.
//!
//! Sign-in checks, in order: the configured admin, the doctor directory
//! (one shared password for every doctor), then self-registered patients.
//! Passwords are compared in plaintext; this is development scaffolding,
//! not real authentication.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::directory::DoctorDirectory;
use crate::auth::service::AuthService;
use crate::core::config::MockConfig;
use crate::core::error::AuthError;
use crate::models::api::{map_api_user, portrait_url};
use crate::models::user::{Credentials, RegisterData, RegisteredUser, Role, Session, User};
use crate::stores::kv::{keys, KeyValueStore};
use crate::stores::registered_users::RegisteredUsers;
use crate::stores::session::SessionStore;
use crate::utils::auth::secrets_match;

pub const ADMIN_TOKEN: &str = "admin-token";
const DOCTOR_TOKEN_PREFIX: &str = "doctor-token-";
const PATIENT_TOKEN_PREFIX: &str = "patient-token-";

/// Fixed credentials recognised by the mock resolver
#[derive(Clone, Debug)]
pub struct MockSettings {
    pub admin_email: String,
    pub admin_password: String,
    pub doctor_password: String,
}

impl From<&MockConfig> for MockSettings {
    fn from(config: &MockConfig) -> Self {
        Self {
            admin_email: config.admin_email.clone(),
            admin_password: config.admin_password.clone(),
            doctor_password: config.doctor_password.clone(),
        }
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self::from(&MockConfig::default())
    }
}

pub struct MockAuthService {
    settings: MockSettings,
    admin: User,
    doctors: Arc<dyn DoctorDirectory>,
    registered: RegisteredUsers,
    storage: Arc<dyn KeyValueStore>,
    sessions: SessionStore,
}

impl MockAuthService {
    pub fn new(
        settings: MockSettings,
        doctors: Arc<dyn DoctorDirectory>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let admin = User::new(
            "admin".to_string(),
            "Administrator".to_string(),
            settings.admin_email.clone(),
            Role::Admin,
            portrait_url(true, 3),
        );

        Self {
            settings,
            admin,
            doctors,
            registered: RegisteredUsers::new(),
            sessions: SessionStore::new(Arc::clone(&storage)),
            storage,
        }
    }

    pub fn admin(&self) -> &User {
        &self.admin
    }

    pub fn registered_users(&self) -> &RegisteredUsers {
        &self.registered
    }

    /// Doctor list from the directory. Failures are logged and read as empty.
    async fn fetch_doctors(&self) -> Vec<User> {
        match self.doctors.all_doctors().await {
            Ok(doctors) => doctors.iter().map(map_api_user).collect(),
            Err(e) => {
                warn!(error = %e, "Failed to fetch doctors, continuing without them");
                Vec::new()
            }
        }
    }

    pub async fn doctors_by_specialty(&self, specialty: &str) -> Vec<User> {
        match self.doctors.doctors_by_specialty(specialty).await {
            Ok(doctors) => doctors.iter().map(map_api_user).collect(),
            Err(e) => {
                warn!(error = %e, specialty = %specialty, "Failed to fetch doctors by specialty");
                Vec::new()
            }
        }
    }

    /// Doctors followed by registered patients
    pub async fn all_users(&self) -> Vec<User> {
        let mut users = self.fetch_doctors().await;
        users.extend(self.registered_patients());
        users
    }

    /// Registered patients without their passwords
    pub fn registered_patients(&self) -> Vec<User> {
        self.registered
            .with_users(|users| users.iter().map(RegisteredUser::without_password).collect())
    }

    /// Resolve credentials without touching the persisted session
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if credentials.email == self.settings.admin_email
            && secrets_match(&credentials.password, &self.settings.admin_password)
        {
            debug!(email = %credentials.email, "Admin signed in");
            return Ok(Session {
                user: self.admin.clone(),
                token: ADMIN_TOKEN.to_string(),
            });
        }

        let doctor = self.fetch_doctors().await.into_iter().find(|d| {
            d.email == credentials.email
                && secrets_match(&credentials.password, &self.settings.doctor_password)
        });
        if let Some(doctor) = doctor {
            debug!(doctor_id = %doctor.id, "Doctor signed in");
            let token = format!("{}{}", DOCTOR_TOKEN_PREFIX, doctor.id);
            return Ok(Session { user: doctor, token });
        }

        if let Some(patient) = self.registered.find_by_email(&credentials.email) {
            if secrets_match(&credentials.password, &patient.password) {
                debug!(patient_id = %patient.user.id, "Patient signed in");
                return Ok(Session {
                    token: format!("{}{}", PATIENT_TOKEN_PREFIX, patient.user.id),
                    user: patient.without_password(),
                });
            }
        }

        warn!(email = %credentials.email, "Sign-in rejected");
        Err(AuthError::InvalidCredentials)
    }

    /// Register a new patient and persist the full registered list.
    ///
    /// The account type on `data` is ignored: self-registration always
    /// creates a patient.
    pub async fn register_patient(&self, data: &RegisterData) -> Result<Session, AuthError> {
        let doctors = self.fetch_doctors().await;
        if data.email == self.settings.admin_email || doctors.iter().any(|d| d.email == data.email) {
            warn!(email = %data.email, "Registration rejected, email in use");
            return Err(AuthError::EmailInUse);
        }

        let patient = self
            .registered
            .insert_unique(&data.email, |count| {
                let number = count + 1;
                RegisteredUser {
                    user: User::new(
                        format!("patient-{}", number),
                        data.name.clone(),
                        data.email.clone(),
                        Role::Patient,
                        portrait_url(count % 2 == 0, number as u64),
                    ),
                    password: data.password.clone(),
                }
            })
            .ok_or_else(|| {
                warn!(email = %data.email, "Registration rejected, email in use");
                AuthError::EmailInUse
            })?;

        self.persist_registered()?;

        info!(
            patient_id = %patient.user.id,
            registered = self.registered.len(),
            "Patient registered"
        );

        Ok(Session {
            token: format!("{}{}", PATIENT_TOKEN_PREFIX, patient.user.id),
            user: patient.without_password(),
        })
    }

    fn persist_registered(&self) -> Result<(), AuthError> {
        self.registered.with_users(|users| -> Result<(), AuthError> {
            let json = serde_json::to_string(users)
                .map_err(|e| AuthError::storage(e.into()))?;
            self.storage
                .set_item(keys::REGISTERED_USERS, &json)
                .map_err(AuthError::storage)
        })
    }

    /// Replace the in-memory list with the persisted one.
    ///
    /// Returns the number of users loaded. Storage and parse failures are
    /// logged and leave the current list untouched.
    pub fn load_registered_users(&self) -> usize {
        let raw = match self.storage.get_item(keys::REGISTERED_USERS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0,
            Err(e) => {
                warn!(error = %e, "Failed to read registered users");
                return 0;
            }
        };

        match serde_json::from_str::<Vec<RegisteredUser>>(&raw) {
            Ok(users) => {
                let count = users.len();
                self.registered.replace(users);
                count
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse registered users");
                0
            }
        }
    }

    /// Map an issued token back to its user
    pub async fn user_for_token(&self, token: &str) -> Option<User> {
        if token == ADMIN_TOKEN {
            return Some(self.admin.clone());
        }

        if let Some(id) = token.strip_prefix(DOCTOR_TOKEN_PREFIX) {
            return self.fetch_doctors().await.into_iter().find(|d| d.id == id);
        }

        token
            .strip_prefix(PATIENT_TOKEN_PREFIX)
            .and_then(|id| self.registered.find_by_id(id))
            .map(|patient| patient.without_password())
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.authenticate(credentials).await?;
        self.sessions.save(&session).map_err(AuthError::storage)?;
        Ok(session)
    }

    async fn register(&self, data: &RegisterData) -> Result<Session, AuthError> {
        self.register_patient(data).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sessions.clear().map_err(AuthError::storage)
    }

    async fn stored_user(&self) -> Option<User> {
        match self.sessions.user() {
            Ok(user) => user,
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(error = %message, "Failed to read stored user");
                None
            }
        }
    }

    async fn all_doctors(&self) -> Vec<User> {
        self.fetch_doctors().await
    }

    async fn patients(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.registered_patients())
    }
}
