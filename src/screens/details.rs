use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::Mutex;

use super::view_model::{deferred, effect, Router, ViewModel};
use crate::api::MoviesService;
use crate::error::ApiError;
use crate::models::{DetailsCard, MovieId, Video};

pub const TRAILER_NOT_AVAILABLE: &str = "Trailer not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsInput {
    ViewDidLoad,
    PosterTapped,
    TrailerTapped,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsOutput {
    Spinner(bool),
    Loaded(DetailsCard),
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsRoute {
    Pop,
    ShowPoster { url: String },
    ShowAlert(String),
    ShowTrailer { key: String },
}

#[derive(Clone)]
pub struct DetailsViewModel {
    id: MovieId,
    service: Arc<dyn MoviesService>,
    router: Arc<dyn Router<DetailsRoute>>,
    card: Arc<Mutex<Option<DetailsCard>>>,
}

impl DetailsViewModel {
    pub fn new(
        id: MovieId,
        service: Arc<dyn MoviesService>,
        router: Arc<dyn Router<DetailsRoute>>,
    ) -> Self {
        Self {
            id,
            service,
            router,
            card: Arc::new(Mutex::new(None)),
        }
    }

    pub fn movie_id(&self) -> MovieId {
        self.id
    }

    async fn load(&self) -> Vec<DetailsOutput> {
        match self.service.movie(self.id).await {
            Ok(details) => {
                let card = DetailsCard::new(details, self.service.image_base_url());
                *self.card.lock().await = Some(card.clone());
                vec![DetailsOutput::Loaded(card)]
            }
            Err(e) => {
                tracing::warn!(id = self.id, error = %e, "failed to load movie details");
                self.router.navigate(DetailsRoute::ShowAlert(e.message.clone()));
                vec![DetailsOutput::Failed(e)]
            }
        }
    }

    async fn show_poster(&self) {
        let url = self
            .card
            .lock()
            .await
            .as_ref()
            .and_then(|card| card.poster_url.clone());
        match url {
            Some(url) => self.router.navigate(DetailsRoute::ShowPoster { url }),
            None => tracing::debug!(id = self.id, "no poster to show yet"),
        }
    }

    async fn show_trailer(&self) {
        let key = match self.service.trailers(self.id).await {
            Ok(videos) => Video::trailer_key(&videos).map(String::from),
            Err(e) => {
                tracing::warn!(id = self.id, error = %e, "failed to load trailers");
                None
            }
        };
        let route = match key {
            Some(key) => DetailsRoute::ShowTrailer { key },
            None => DetailsRoute::ShowAlert(String::from(TRAILER_NOT_AVAILABLE)),
        };
        self.router.navigate(route);
    }
}

impl ViewModel for DetailsViewModel {
    type Input = DetailsInput;
    type Output = DetailsOutput;

    fn handle(&self, input: DetailsInput) -> BoxStream<'static, DetailsOutput> {
        let this = self.clone();
        match input {
            DetailsInput::ViewDidLoad => stream::iter([DetailsOutput::Spinner(true)])
                .chain(deferred(async move { this.load().await }))
                .chain(stream::iter([DetailsOutput::Spinner(false)]))
                .boxed(),
            DetailsInput::PosterTapped => effect(async move { this.show_poster().await }),
            DetailsInput::TrailerTapped => effect(async move { this.show_trailer().await }),
            DetailsInput::Back => {
                self.router.navigate(DetailsRoute::Pop);
                stream::empty().boxed()
            }
        }
    }
}
