use anyhow::Result;
use async_trait::async_trait;

use crate::api::client::ApiClient;
use crate::models::api::{ApiUser, ApiUserKind};

/// Source of the doctor list used by the mock resolver
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn all_doctors(&self) -> Result<Vec<ApiUser>>;

    async fn doctors_by_specialty(&self, specialty: &str) -> Result<Vec<ApiUser>>;
}

#[async_trait]
impl DoctorDirectory for ApiClient {
    async fn all_doctors(&self) -> Result<Vec<ApiUser>> {
        self.doctors().await
    }

    async fn doctors_by_specialty(&self, specialty: &str) -> Result<Vec<ApiUser>> {
        ApiClient::doctors_by_specialty(self, specialty).await
    }
}

/// Fixed doctor list, e.g. from the `[mock]` config section
pub struct StaticDirectory {
    doctors: Vec<ApiUser>,
}

impl StaticDirectory {
    /// Entries that are not doctors are dropped
    pub fn new(doctors: Vec<ApiUser>) -> Self {
        Self {
            doctors: doctors
                .into_iter()
                .filter(|d| d.kind == ApiUserKind::Doctor)
                .collect(),
        }
    }

    /// Case-insensitive specialty match
    pub fn with_specialty(&self, specialty: &str) -> Vec<ApiUser> {
        let wanted = specialty.to_lowercase();
        self.doctors
            .iter()
            .filter(|d| {
                d.specialty
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase() == wanted)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DoctorDirectory for StaticDirectory {
    async fn all_doctors(&self) -> Result<Vec<ApiUser>> {
        Ok(self.doctors.clone())
    }

    async fn doctors_by_specialty(&self, specialty: &str) -> Result<Vec<ApiUser>> {
        Ok(self.with_specialty(specialty))
    }
}
