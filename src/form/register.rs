//! Registration screen state, independent of any rendering toolkit.

use tracing::{debug, warn};

use crate::auth::service::AuthService;
use crate::core::error::{AuthError, FormError};
use crate::models::user::{AccountType, RegisterData, Session};

/// Screens the registration form can send the user to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
}

pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

#[derive(Debug, Default)]
pub struct RegistrationForm {
    name: String,
    email: String,
    password: String,
    account_type: AccountType,
    loading: bool,
    error: Option<FormError>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn select_account_type(&mut self, account_type: AccountType) {
        self.account_type = account_type;
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message to render under the fields, if any
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Validate and register.
    ///
    /// Only emptiness is checked. On success the navigator is sent to the
    /// login screen; any failure from `auth` shows the same generic message.
    pub async fn submit<A, N>(&mut self, auth: &A, navigator: &mut N) -> Result<Session, FormError>
    where
        A: AuthService + ?Sized,
        N: Navigator + ?Sized,
    {
        let data = self.begin_submit()?;
        let result = auth.register(&data).await;
        self.finish_submit(result, navigator)
    }

    /// First half of [`submit`](Self::submit) for callers that drive the
    /// request themselves. `is_loading` stays true until `finish_submit`.
    pub fn begin_submit(&mut self) -> Result<RegisterData, FormError> {
        self.error = None;

        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            self.error = Some(FormError::MissingFields);
            return Err(FormError::MissingFields);
        }

        self.loading = true;
        Ok(RegisterData {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            account_type: self.account_type,
        })
    }

    pub fn finish_submit<N>(
        &mut self,
        result: Result<Session, AuthError>,
        navigator: &mut N,
    ) -> Result<Session, FormError>
    where
        N: Navigator + ?Sized,
    {
        self.loading = false;

        match result {
            Ok(session) => {
                debug!(user_id = %session.user.id, "Registered, returning to login");
                navigator.navigate(Route::Login);
                Ok(session)
            }
            Err(e) => {
                warn!(error = %e, "Registration from form failed");
                self.error = Some(FormError::RegistrationFailed);
                Err(FormError::RegistrationFailed)
            }
        }
    }

    pub fn back_to_login<N: Navigator + ?Sized>(&self, navigator: &mut N) {
        navigator.navigate(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::directory::StaticDirectory;
    use crate::auth::mock::{MockAuthService, MockSettings};
    use crate::models::api::{ApiUser, ApiUserKind};
    use crate::stores::kv::MemoryStore;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Vec<Route>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, route: Route) {
            self.routes.push(route);
        }
    }

    fn auth() -> MockAuthService {
        MockAuthService::new(
            MockSettings::default(),
            Arc::new(StaticDirectory::new(vec![ApiUser {
                id: 1,
                name: "Dr. Joao".to_string(),
                email: "joao@clinic.com".to_string(),
                kind: ApiUserKind::Doctor,
                specialty: None,
            }])),
            Arc::new(MemoryStore::new()),
        )
    }

    fn filled(email: &str) -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_name("Ana Souza");
        form.set_email(email);
        form.set_password("s3cret");
        form
    }

    #[tokio::test]
    async fn test_submit_success_navigates_to_login() {
        let auth = auth();
        let mut navigator = RecordingNavigator::default();
        let mut form = filled("ana@example.com");

        let session = form.submit(&auth, &mut navigator).await.unwrap();

        assert_eq!(session.user.email, "ana@example.com");
        assert_eq!(navigator.routes, vec![Route::Login]);
        assert!(form.error().is_none());
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_blank_field_is_rejected_locally() {
        let auth = auth();
        let mut navigator = RecordingNavigator::default();
        let mut form = filled("ana@example.com");
        form.set_password("");

        let result = form.submit(&auth, &mut navigator).await;

        assert_eq!(result.unwrap_err(), FormError::MissingFields);
        assert_eq!(form.error(), Some(&FormError::MissingFields));
        assert_eq!(
            form.error().unwrap().to_string(),
            "Please fill in all fields"
        );
        assert!(navigator.routes.is_empty());
        assert!(auth.registered_users().is_empty());
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_auth_failure_shows_generic_message() {
        let auth = auth();
        let mut navigator = RecordingNavigator::default();
        let mut form = filled("joao@clinic.com");

        let result = form.submit(&auth, &mut navigator).await;

        assert_eq!(result.unwrap_err(), FormError::RegistrationFailed);
        assert_eq!(
            form.error().unwrap().to_string(),
            "Failed to create account. Please try again."
        );
        assert!(navigator.routes.is_empty());
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_error_is_cleared_on_resubmit() {
        let auth = auth();
        let mut navigator = RecordingNavigator::default();
        let mut form = RegistrationForm::new();

        assert!(form.submit(&auth, &mut navigator).await.is_err());
        assert!(form.error().is_some());

        form.set_name("Ana");
        form.set_email("ana@example.com");
        form.set_password("pw");
        form.submit(&auth, &mut navigator).await.unwrap();
        assert!(form.error().is_none());
    }

    #[tokio::test]
    async fn test_loading_spans_the_request() {
        let auth = auth();
        let mut navigator = RecordingNavigator::default();
        let mut form = filled("ana@example.com");
        assert!(!form.is_loading());

        let data = form.begin_submit().unwrap();
        assert!(form.is_loading());
        assert_eq!(data.email, "ana@example.com");
        assert_eq!(data.account_type, AccountType::Patient);

        let result = auth.register(&data).await;
        form.finish_submit(result, &mut navigator).unwrap();
        assert!(!form.is_loading());
        assert_eq!(navigator.routes, vec![Route::Login]);
    }

    #[test]
    fn test_blank_field_never_enters_loading() {
        let mut form = filled("");
        assert_eq!(form.begin_submit().unwrap_err(), FormError::MissingFields);
        assert!(!form.is_loading());
    }

    #[test]
    fn test_default_account_type_is_patient() {
        let mut form = RegistrationForm::new();
        assert_eq!(form.account_type(), AccountType::Patient);

        form.select_account_type(AccountType::Admin);
        assert_eq!(form.account_type(), AccountType::Admin);
    }

    #[test]
    fn test_back_to_login() {
        let form = RegistrationForm::new();
        let mut navigator = RecordingNavigator::default();
        form.back_to_login(&mut navigator);
        assert_eq!(navigator.routes, vec![Route::Login]);
    }
}
