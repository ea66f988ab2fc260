use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::Router;
use crate::api::MoviesService;
use crate::error::ApiError;
use crate::models::{GenreList, MovieDetails, MovieId, MoviePage, VideoList};

#[derive(Debug)]
pub struct RecordingRouter<R> {
    routes: Mutex<Vec<R>>,
}

impl<R> Default for RecordingRouter<R> {
    fn default() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
        }
    }
}

impl<R: Clone> RecordingRouter<R> {
    pub fn routes(&self) -> Vec<R> {
        self.routes.lock().unwrap().clone()
    }
}

impl<R: Send> Router<R> for RecordingRouter<R> {
    fn navigate(&self, route: R) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Default)]
pub struct FakeMoviesService {
    pub pages: Mutex<HashMap<u32, Result<MoviePage, ApiError>>>,
    pub genres: Mutex<Option<Result<GenreList, ApiError>>>,
    pub details: Mutex<HashMap<MovieId, Result<MovieDetails, ApiError>>>,
    pub videos: Mutex<HashMap<MovieId, Result<VideoList, ApiError>>>,
    pub page_requests: Mutex<Vec<u32>>,
    pub genre_requests: Mutex<u32>,
}

impl FakeMoviesService {
    pub fn with_page(self, page: u32, json: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(page, Ok(serde_json::from_str(json).unwrap()));
        self
    }

    pub fn with_page_error(self, page: u32, error: ApiError) -> Self {
        self.pages.lock().unwrap().insert(page, Err(error));
        self
    }

    pub fn with_genres(self, json: &str) -> Self {
        *self.genres.lock().unwrap() = Some(Ok(serde_json::from_str(json).unwrap()));
        self
    }

    pub fn with_details(self, id: MovieId, json: &str) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(id, Ok(serde_json::from_str(json).unwrap()));
        self
    }

    pub fn with_details_error(self, id: MovieId, error: ApiError) -> Self {
        self.details.lock().unwrap().insert(id, Err(error));
        self
    }

    pub fn with_videos(self, id: MovieId, json: &str) -> Self {
        self.videos
            .lock()
            .unwrap()
            .insert(id, Ok(serde_json::from_str(json).unwrap()));
        self
    }

    pub fn page_requests(&self) -> Vec<u32> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn genre_requests(&self) -> u32 {
        *self.genre_requests.lock().unwrap()
    }
}

fn not_found() -> ApiError {
    ApiError::new(34, "The resource you requested could not be found.").with_status(404)
}

#[async_trait]
impl MoviesService for FakeMoviesService {
    async fn popular_movies(&self, page: u32) -> Result<MoviePage, ApiError> {
        self.page_requests.lock().unwrap().push(page);
        self.pages
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn genres(&self) -> Result<GenreList, ApiError> {
        *self.genre_requests.lock().unwrap() += 1;
        self.genres
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn movie(&self, id: MovieId) -> Result<MovieDetails, ApiError> {
        self.details
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn trailers(&self, id: MovieId) -> Result<VideoList, ApiError> {
        self.videos
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }

    fn image_base_url(&self) -> &str {
        "https://img/w500"
    }
}
