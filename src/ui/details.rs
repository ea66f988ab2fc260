use std::sync::Arc;

use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length, Padding, Task};

use marquee::api::MoviesService;
use marquee::models::{DetailsCard, MovieId};
use marquee::screens::details::{DetailsInput, DetailsOutput, DetailsViewModel};
use marquee::screens::ChannelRouter;

use super::app::Message;
use super::images::ImageCache;
use super::movies::view_poster;
use super::screen::{self, ScreenHandle};
use super::theme::{self, icon, ICON_ARROW_LEFT, ICON_PLAY_FILL, TEXT_GRAY, TEXT_WHITE};

const POSTER_WIDTH: f32 = 300.0;
const POSTER_HEIGHT: f32 = 450.0;

pub struct DetailsScreen {
    generation: u64,
    handle: ScreenHandle<DetailsInput>,
    title: String,
    card: Option<DetailsCard>,
    loading: bool,
    error: Option<String>,
}

impl DetailsScreen {
    pub fn start(
        generation: u64,
        id: MovieId,
        title: String,
        service: Arc<dyn MoviesService>,
    ) -> (Self, Task<Message>) {
        let (router, routes) = ChannelRouter::new();
        let view_model = DetailsViewModel::new(id, service, Arc::new(router));
        let (handle, task) = screen::start(
            view_model,
            routes,
            move |output| Message::DetailsOutput(generation, output),
            move |route| Message::DetailsRoute(generation, route),
        );
        handle.send(DetailsInput::ViewDidLoad);

        let screen = Self {
            generation,
            handle,
            title,
            card: None,
            loading: false,
            error: None,
        };
        (screen, task)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn send(&self, input: DetailsInput) {
        self.handle.send(input);
    }

    pub fn apply(&mut self, output: DetailsOutput, images: &mut ImageCache) -> Task<Message> {
        match output {
            DetailsOutput::Spinner(loading) => self.loading = loading,
            DetailsOutput::Loaded(card) => {
                self.error = None;
                self.title = card.title.clone();
                let task = images.request(card.poster_url.as_deref());
                self.card = Some(card);
                return task;
            }
            DetailsOutput::Failed(e) => self.error = Some(e.message),
        }
        Task::none()
    }

    pub fn view<'a>(&'a self, images: &'a ImageCache) -> Element<'a, Message> {
        let back = button(
            row![
                icon(ICON_ARROW_LEFT).size(14).color(TEXT_WHITE),
                text("Back").size(14).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        )
        .padding(Padding::new(8.0).left(12.0).right(16.0))
        .style(theme::ghost_button)
        .on_press(Message::Details(DetailsInput::Back));

        let header = row![
            back,
            text(&self.title).size(20).color(TEXT_WHITE),
            Space::new().width(Length::Fill)
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        let body: Element<'a, Message> = match (&self.card, &self.error) {
            (Some(card), _) => view_card(card, images),
            (None, Some(error)) => centered(text(error).size(16).color(TEXT_GRAY)),
            (None, None) if self.loading => centered(text("Loading...").size(16).color(TEXT_GRAY)),
            (None, None) => centered(text("").size(16)),
        };

        container(column![header, body].spacing(24))
            .padding(Padding::new(16.0).left(32.0).right(32.0))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::page_background)
            .into()
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn view_card<'a>(card: &'a DetailsCard, images: &'a ImageCache) -> Element<'a, Message> {
    let poster = mouse_area(view_poster(
        card.poster_url.as_deref(),
        images,
        POSTER_WIDTH,
        POSTER_HEIGHT,
    ))
    .on_press(Message::Details(DetailsInput::PosterTapped))
    .interaction(iced::mouse::Interaction::Pointer);

    let mut info = Column::new()
        .spacing(10)
        .push(text(&card.title).size(32).color(TEXT_WHITE));
    if let Some(ref tagline) = card.tagline {
        info = info.push(text(tagline).size(15).color(TEXT_GRAY));
    }

    let facts: Vec<String> = [
        Some(card.countries_line()),
        Some(card.genres_line()),
        card.runtime_line(),
    ]
    .into_iter()
    .flatten()
    .filter(|line| !line.is_empty())
    .collect();
    for line in facts {
        info = info.push(text(line).size(14).color(TEXT_GRAY));
    }

    let trailer = button(
        row![
            icon(ICON_PLAY_FILL).size(16).color(TEXT_WHITE),
            text("Watch trailer").size(15).color(TEXT_WHITE)
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding([10, 24])
    .style(theme::primary_button)
    .on_press(Message::Details(DetailsInput::TrailerTapped));

    info = info
        .push(text(card.rating_line()).size(16).color(TEXT_WHITE))
        .push(Space::new().height(8))
        .push(trailer)
        .push(Space::new().height(8))
        .push(text(&card.overview).size(15).color(TEXT_WHITE))
        .width(Length::Fill);

    scrollable(row![poster, info].spacing(32).align_y(Alignment::Start))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
