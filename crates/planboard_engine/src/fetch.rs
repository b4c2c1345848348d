use std::time::Duration;

use planboard_core::ProjectRecord;
use reqwest::Url;

use crate::wire::{decode_catalog, decode_projects};
use crate::{CatalogPayload, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Base URL of the application server.
    pub server: String,
    pub catalog_path: String,
    pub projects_path: String,
    /// Unset by default: the retry policy is the only bound on a catalog load.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            server: "http://localhost:8000".to_string(),
            catalog_path: "/api/method/planboard.api.get_translations".to_string(),
            projects_path: "/api/method/planboard.api.get_projects".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl FetchSettings {
    pub fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Url::parse(&self.server)
            .and_then(|base| base.join(path))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, FetchError>;
}

#[async_trait::async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSource {
    settings: FetchSettings,
}

impl ReqwestSource {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.settings.endpoint(path)?;
        let client = self.build_client()?;

        let response = client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl CatalogSource for ReqwestSource {
    async fn fetch_catalog(&self) -> Result<CatalogPayload, FetchError> {
        let body = self.get_bytes(&self.settings.catalog_path).await?;
        decode_catalog(&body)
    }
}

#[async_trait::async_trait]
impl ProjectSource for ReqwestSource {
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, FetchError> {
        let body = self.get_bytes(&self.settings.projects_path).await?;
        decode_projects(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
