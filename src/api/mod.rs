mod client;
mod endpoint;
mod movies;

use std::time::Duration;

pub use client::{build_http_client, manage_response, ApiClient};
pub use endpoint::{Endpoint, HttpMethod, QueryParams};
pub use movies::{
    GenreParams, LanguageParams, MovieParams, MoviesEndpoint, MoviesService, TmdbMoviesService,
};

use crate::settings::{DEFAULT_API_HOST, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub scheme: String,
    pub host: String,
    pub access_token: String,
    pub language: String,
    pub image_base_url: String,
    pub request_timeout: Duration,
    pub resource_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scheme: String::from("https"),
            host: String::from(DEFAULT_API_HOST),
            access_token: String::new(),
            language: String::from(DEFAULT_LANGUAGE),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            request_timeout: Duration::from_secs(60),
            resource_timeout: Duration::from_secs(300),
        }
    }
}

impl ApiConfig {
    pub fn image_url(&self, path: &str) -> String {
        format!("{}{}", self.image_base_url, path)
    }

    /// Language code without the region, e.g. `uk` for `uk-UA`.
    pub fn language_code(&self) -> &str {
        self.language
            .split(['-', '_'])
            .next()
            .filter(|code| !code.is_empty())
            .unwrap_or("en")
    }
}
