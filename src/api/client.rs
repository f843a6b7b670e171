//! HTTP API Client

use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::error::ApiError;

/// API client for backend communication
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new() -> Self {
        // Get base URL from window location or use default
        let base_url = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:8080".to_string());

        Self { base_url }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::get(&url).send().await?;
        Self::decode(response).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?)?
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::put(&url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?)?
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::delete(&url).send().await?;

        if !response.ok() {
            return Err(Self::status_error(&response).await);
        }
        Ok(())
    }

    /// Base URL the client resolves against, used by the streaming transport.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(Self::status_error(&response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn status_error(response: &Response) -> ApiError {
        let message = response.text().await.unwrap_or_default();
        ApiError::Status {
            status: response.status(),
            message,
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
