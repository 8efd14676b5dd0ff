use anyhow::{anyhow, bail, Context, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::core::config::ApiConfig;
use crate::models::api::ApiUser;
use crate::models::user::{Credentials, RegisterData, Session, User};

/// HTTP client for the scheduling backend
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .context(format!("Invalid API base URL: {}", base_url))?;

        if base_url.cannot_be_a_base() {
            bail!("API base URL cannot have path segments: {}", base_url);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL cannot have path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
        if !response.status().is_success() {
            bail!("Backend returned error status for {}: {}", what, response.status());
        }

        response
            .json::<T>()
            .await
            .context(format!("Failed to parse {} response", what))
    }

    /// POST /auth/login
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let url = self.endpoint(&["auth", "login"])?;
        let response = self
            .client
            .post(url)
            .json(credentials)
            .send()
            .await
            .context("Failed to send login request")?;

        Self::read_json(response, "login").await
    }

    /// POST /auth/register
    pub async fn register(&self, data: &RegisterData) -> Result<Session> {
        let url = self.endpoint(&["auth", "register"])?;
        let response = self
            .client
            .post(url)
            .json(data)
            .send()
            .await
            .context("Failed to send register request")?;

        Self::read_json(response, "register").await
    }

    /// GET /usuarios/pacientes with a bearer token
    pub async fn patients(&self, token: &str) -> Result<Vec<User>> {
        let url = self.endpoint(&["usuarios", "pacientes"])?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send patients request")?;

        Self::read_json(response, "patients").await
    }

    /// GET /usuarios/medicos
    pub async fn doctors(&self) -> Result<Vec<ApiUser>> {
        let url = self.endpoint(&["usuarios", "medicos"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send doctors request")?;

        Self::read_json(response, "doctors").await
    }

    /// GET /usuarios/medicos/especialidade/{specialty}
    pub async fn doctors_by_specialty(&self, specialty: &str) -> Result<Vec<ApiUser>> {
        let url = self.endpoint(&["usuarios", "medicos", "especialidade", specialty])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send doctors-by-specialty request")?;

        Self::read_json(response, "doctors by specialty").await
    }
}
