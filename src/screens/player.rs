use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};

use super::view_model::{Router, ViewModel};

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

pub fn watch_url(key: &str) -> String {
    format!("{}{}", YOUTUBE_WATCH_URL, key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    ViewDidLoad,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerOutput {
    Play { key: String, watch_url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerRoute {
    Dismiss,
}

pub struct PlayerViewModel {
    key: String,
    router: Arc<dyn Router<PlayerRoute>>,
}

impl PlayerViewModel {
    pub fn new(key: impl Into<String>, router: Arc<dyn Router<PlayerRoute>>) -> Self {
        Self {
            key: key.into(),
            router,
        }
    }
}

impl ViewModel for PlayerViewModel {
    type Input = PlayerInput;
    type Output = PlayerOutput;

    fn handle(&self, input: PlayerInput) -> BoxStream<'static, PlayerOutput> {
        match input {
            PlayerInput::ViewDidLoad => stream::iter([PlayerOutput::Play {
                key: self.key.clone(),
                watch_url: watch_url(&self.key),
            }])
            .boxed(),
            PlayerInput::Close => {
                self.router.navigate(PlayerRoute::Dismiss);
                stream::empty().boxed()
            }
        }
    }
}
