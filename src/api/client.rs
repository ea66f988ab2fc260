use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{ApiConfig, Endpoint};
use crate::error::ApiError;

pub fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .connect_timeout(config.request_timeout)
        .timeout(config.resource_timeout)
        .build()
        .map_err(ApiError::transport)
}

#[async_trait]
pub trait ApiClient: Send + Sync {
    fn http(&self) -> &reqwest::Client;

    fn config(&self) -> &ApiConfig;

    async fn send_request<T, E>(&self, endpoint: &E) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
        E: Endpoint + Sync,
    {
        let request = endpoint.to_request(self.http(), self.config())?;
        tracing::debug!(method = %request.method(), path = %request.url().path(), "TMDB request");

        let response = self.http().execute(request).await.map_err(|e| {
            tracing::warn!(error = %e, "TMDB request failed before a response arrived");
            ApiError::transport(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(ApiError::transport)?;
        manage_response(status, &body)
    }
}

pub fn manage_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    match status {
        200..=299 => serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, "failed to decode TMDB response");
            ApiError::decoding()
        }),
        _ => {
            let error = match serde_json::from_slice::<ApiError>(body) {
                Ok(decoded) => decoded.with_status(status),
                Err(_) => ApiError::unknown_backend(status),
            };
            tracing::warn!(status, code = error.error_code, message = %error.message, "TMDB returned an error");
            Err(error)
        }
    }
}
