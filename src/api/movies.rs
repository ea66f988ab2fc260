use async_trait::async_trait;
use serde::Serialize;

use super::{build_http_client, ApiClient, ApiConfig, Endpoint, HttpMethod, QueryParams};
use crate::error::ApiError;
use crate::models::{GenreList, MovieDetails, MovieId, MoviePage, VideoList};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieParams {
    pub page: u32,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreParams {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageParams {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoviesEndpoint {
    PopularMovies(MovieParams),
    Genres(GenreParams),
    Movie { id: MovieId, params: LanguageParams },
    Trailer { id: MovieId, params: LanguageParams },
}

impl Endpoint for MoviesEndpoint {
    fn path(&self) -> String {
        match self {
            MoviesEndpoint::PopularMovies(_) => String::from("/3/movie/popular"),
            MoviesEndpoint::Genres(_) => String::from("/3/genre/movie/list"),
            MoviesEndpoint::Movie { id, .. } => format!("/3/movie/{}", id),
            MoviesEndpoint::Trailer { id, .. } => format!("/3/movie/{}/videos", id),
        }
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn query_items(&self) -> Option<Vec<(String, String)>> {
        match self {
            MoviesEndpoint::PopularMovies(params) => params.to_query_items(),
            MoviesEndpoint::Genres(params) => params.to_query_items(),
            MoviesEndpoint::Movie { params, .. } | MoviesEndpoint::Trailer { params, .. } => {
                params.to_query_items()
            }
        }
    }
}

#[async_trait]
pub trait MoviesService: Send + Sync {
    async fn popular_movies(&self, page: u32) -> Result<MoviePage, ApiError>;

    async fn genres(&self) -> Result<GenreList, ApiError>;

    async fn movie(&self, id: MovieId) -> Result<MovieDetails, ApiError>;

    async fn trailers(&self, id: MovieId) -> Result<VideoList, ApiError>;

    fn image_base_url(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct TmdbMoviesService {
    config: ApiConfig,
    http: reqwest::Client,
}

impl TmdbMoviesService {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = build_http_client(&config)?;
        Ok(Self { config, http })
    }

    pub fn with_http(config: ApiConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    fn language(&self) -> String {
        self.config.language.clone()
    }
}

impl ApiClient for TmdbMoviesService {
    fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl MoviesService for TmdbMoviesService {
    async fn popular_movies(&self, page: u32) -> Result<MoviePage, ApiError> {
        let endpoint = MoviesEndpoint::PopularMovies(MovieParams {
            page,
            language: self.language(),
        });
        self.send_request(&endpoint).await
    }

    async fn genres(&self) -> Result<GenreList, ApiError> {
        let endpoint = MoviesEndpoint::Genres(GenreParams {
            language: self.config.language_code().to_string(),
        });
        self.send_request(&endpoint).await
    }

    async fn movie(&self, id: MovieId) -> Result<MovieDetails, ApiError> {
        let endpoint = MoviesEndpoint::Movie {
            id,
            params: LanguageParams {
                language: self.language(),
            },
        };
        self.send_request(&endpoint).await
    }

    async fn trailers(&self, id: MovieId) -> Result<VideoList, ApiError> {
        let endpoint = MoviesEndpoint::Trailer {
            id,
            params: LanguageParams {
                language: self.language(),
            },
        };
        self.send_request(&endpoint).await
    }

    fn image_base_url(&self) -> &str {
        &self.config.image_base_url
    }
}
