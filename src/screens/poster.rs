use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};

use super::view_model::{Router, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterInput {
    ViewDidLoad,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterOutput {
    PresentImage { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterRoute {
    Dismiss,
}

pub struct PosterViewModel {
    url: String,
    router: Arc<dyn Router<PosterRoute>>,
}

impl PosterViewModel {
    pub fn new(url: impl Into<String>, router: Arc<dyn Router<PosterRoute>>) -> Self {
        Self {
            url: url.into(),
            router,
        }
    }
}

impl ViewModel for PosterViewModel {
    type Input = PosterInput;
    type Output = PosterOutput;

    fn handle(&self, input: PosterInput) -> BoxStream<'static, PosterOutput> {
        match input {
            PosterInput::ViewDidLoad => stream::iter([PosterOutput::PresentImage {
                url: self.url.clone(),
            }])
            .boxed(),
            PosterInput::Dismiss => {
                self.router.navigate(PosterRoute::Dismiss);
                stream::empty().boxed()
            }
        }
    }
}
