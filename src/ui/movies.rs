use std::sync::Arc;

use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Padding, Task};

use marquee::api::MoviesService;
use marquee::models::{round_to_tenth, MovieCard};
use marquee::screens::movies::{MoviesInput, MoviesOutput, MoviesViewModel, SortOption};
use marquee::screens::ChannelRouter;
use marquee::storage::GenreStore;

use super::app::Message;
use super::images::ImageCache;
use super::screen::{self, ScreenHandle};
use super::theme::{
    self, icon, ACCENT_RED, ICON_CHECK, ICON_FILM, ICON_SEARCH, ICON_SORT_DOWN, ICON_STAR_FILL,
    ICON_WIFI_OFF, TEXT_GRAY, TEXT_WHITE,
};

const ROW_HEIGHT: f32 = 154.0;
const POSTER_WIDTH: f32 = 92.0;
const POSTER_HEIGHT: f32 = 138.0;

pub struct MoviesScreen {
    handle: ScreenHandle<MoviesInput>,
    movies: Vec<MovieCard>,
    sort: SortOption,
    search: String,
    loading: bool,
    nothing_found: bool,
    offline: bool,
    error: Option<String>,
    sort_menu: Option<SortOption>,
    last_row_seen: Option<usize>,
}

impl MoviesScreen {
    pub fn start(
        service: Arc<dyn MoviesService>,
        genres: Arc<dyn GenreStore>,
    ) -> (Self, Task<Message>) {
        let (router, routes) = ChannelRouter::new();
        let view_model = MoviesViewModel::new(service, genres, Arc::new(router));
        let (handle, task) =
            screen::start(view_model, routes, Message::MoviesOutput, Message::MoviesRoute);
        handle.send(MoviesInput::ViewDidLoad);

        let screen = Self {
            handle,
            movies: Vec::new(),
            sort: SortOption::default(),
            search: String::new(),
            loading: false,
            nothing_found: false,
            offline: false,
            error: None,
            sort_menu: None,
            last_row_seen: None,
        };
        (screen, task)
    }

    pub fn send(&mut self, input: MoviesInput) {
        match &input {
            MoviesInput::SearchChanged(text) => self.search = text.clone(),
            MoviesInput::SortSelected(_) => self.sort_menu = None,
            MoviesInput::Refresh => self.error = None,
            _ => {}
        }
        self.handle.send(input);
    }

    pub fn apply(&mut self, output: MoviesOutput, images: &mut ImageCache) -> Task<Message> {
        match output {
            MoviesOutput::Spinner(loading) => self.loading = loading,
            MoviesOutput::MoviesLoaded { movies } => {
                self.error = None;
                self.movies = movies;
                self.last_row_seen = None;
                return self.request_posters(images);
            }
            MoviesOutput::FetchFailed(e) => self.error = Some(e.message),
            MoviesOutput::Filter { selected, movies } => {
                self.sort = selected;
                self.movies = movies;
                self.last_row_seen = None;
                return self.request_posters(images);
            }
            MoviesOutput::NothingFound(nothing_found) => self.nothing_found = nothing_found,
            MoviesOutput::Offline(offline) => self.offline = offline,
        }
        Task::none()
    }

    pub fn open_sort_menu(&mut self, selected: SortOption) {
        self.sort_menu = Some(selected);
    }

    pub fn close_sort_menu(&mut self) {
        self.sort_menu = None;
    }

    /// Reports the last row in view so the list can page in more movies.
    pub fn scrolled(&mut self, viewport: scrollable::Viewport) {
        if self.movies.is_empty() {
            return;
        }
        let bottom = viewport.absolute_offset().y + viewport.bounds().height;
        let row = ((bottom / ROW_HEIGHT).floor() as usize).min(self.movies.len() - 1);
        if self.last_row_seen != Some(row) {
            self.last_row_seen = Some(row);
            self.handle.send(MoviesInput::WillDisplay(row));
        }
    }

    fn request_posters(&self, images: &mut ImageCache) -> Task<Message> {
        images.request(self.movies.iter().filter_map(|m| m.poster_url.as_deref()))
    }

    pub fn view<'a>(&'a self, images: &'a ImageCache) -> Element<'a, Message> {
        let mut page = Column::new().push(self.view_header());
        if self.offline {
            page = page.push(view_banner(ICON_WIFI_OFF, "No internet connection"));
        }
        if let Some(ref error) = self.error {
            page = page.push(self.view_error(error));
        }

        let body: Element<'a, Message> = if self.nothing_found {
            container(text("Nothing found").size(18).color(TEXT_GRAY))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into()
        } else {
            self.view_list(images)
        };

        container(page.push(body).spacing(8))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::page_background)
            .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let title = text("Popular Movies")
            .size(28)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let search = container(
            row![
                icon(ICON_SEARCH).size(14).color(TEXT_GRAY),
                text_input("Search...", &self.search)
                    .on_input(|text| Message::Movies(MoviesInput::SearchChanged(text)))
                    .padding(8)
                    .width(Length::Fixed(220.0))
                    .style(theme::search_input),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        )
        .padding(Padding::new(4.0).left(12.0).right(8.0))
        .style(theme::search_field);

        let sort = button(
            row![
                icon(ICON_SORT_DOWN).size(14).color(TEXT_WHITE),
                text(self.sort.to_string()).size(13).color(TEXT_WHITE),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        )
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .style(theme::ghost_button)
        .on_press(Message::Movies(MoviesInput::SortButtonTapped));

        let status = if self.loading {
            text("Loading...").size(13).color(TEXT_GRAY)
        } else {
            text("").size(13)
        };

        row![title, status, Space::new().width(Length::Fill), search, sort]
            .spacing(16)
            .padding(Padding::new(16.0).left(32.0).right(32.0))
            .align_y(Alignment::Center)
            .into()
    }

    fn view_error<'a>(&'a self, error: &'a str) -> Element<'a, Message> {
        let retry = button(text("Retry").size(14).color(TEXT_WHITE))
            .padding(Padding::new(8.0).left(20.0).right(20.0))
            .style(theme::primary_button)
            .on_press(Message::Movies(MoviesInput::Refresh));

        container(
            row![text(error).size(14).color(ACCENT_RED), retry]
                .spacing(16)
                .align_y(Alignment::Center),
        )
        .padding(Padding::new(0.0).left(32.0).right(32.0))
        .into()
    }

    fn view_list<'a>(&'a self, images: &'a ImageCache) -> Element<'a, Message> {
        let rows = self.movies.iter().map(|movie| view_row(movie, images));

        let mut list = Column::with_children(rows).width(Length::Fill);
        if !self.movies.is_empty() && self.search.trim().is_empty() {
            list = list.push(
                container(
                    button(text("Load more").size(13).color(TEXT_WHITE))
                        .padding(Padding::new(8.0).left(16.0).right(16.0))
                        .style(theme::ghost_button)
                        .on_press(Message::Movies(MoviesInput::FetchMore)),
                )
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(16),
            );
        }

        scrollable(container(list).padding(Padding::new(0.0).left(24.0).right(24.0)))
            .on_scroll(Message::MoviesScrolled)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn view_sort_menu(&self) -> Option<Element<'_, Message>> {
        let selected = self.sort_menu?;
        let options = SortOption::ALL.into_iter().map(|option| -> Element<'_, Message> {
            let check = if option == selected {
                icon(ICON_CHECK).size(14).color(ACCENT_RED)
            } else {
                text("").size(14)
            };
            button(
                row![
                    text(option.to_string()).size(15).color(TEXT_WHITE),
                    Space::new().width(Length::Fill),
                    check
                ]
                .align_y(Alignment::Center),
            )
            .width(Length::Fill)
            .padding(Padding::new(12.0).left(16.0).right(16.0))
            .style(theme::row_button)
            .on_press(Message::Movies(MoviesInput::SortSelected(option)))
            .into()
        });

        let cancel = button(text("Cancel").size(15).color(TEXT_GRAY))
            .width(Length::Fill)
            .padding(Padding::new(12.0).left(16.0).right(16.0))
            .style(theme::row_button)
            .on_press(Message::SortMenuClosed);

        let menu = column![
            text("Sort by").size(13).color(TEXT_GRAY),
            Column::with_children(options),
            cancel
        ]
        .spacing(8)
        .width(Length::Fixed(280.0));

        Some(
            container(container(menu).padding(16).style(theme::surface(8.0)))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(theme::scrim)
                .into(),
        )
    }
}

fn view_banner(glyph: char, message: &str) -> Element<'_, Message> {
    container(
        row![
            icon(glyph).size(14).color(TEXT_WHITE),
            text(message).size(13).color(TEXT_WHITE)
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(Padding::new(8.0).left(32.0))
    .style(|_theme| container::Style {
        background: Some(iced::Background::Color(ACCENT_RED)),
        ..Default::default()
    })
    .into()
}

fn view_row<'a>(movie: &'a MovieCard, images: &'a ImageCache) -> Element<'a, Message> {
    let poster = view_poster(movie.poster_url.as_deref(), images, POSTER_WIDTH, POSTER_HEIGHT);

    let year = movie
        .release_year()
        .map(|year| year.to_string())
        .unwrap_or_default();
    let score = row![
        icon(ICON_STAR_FILL).size(12).color(ACCENT_RED),
        text(format!("{:.1}", round_to_tenth(movie.vote_average)))
            .size(13)
            .color(TEXT_WHITE),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let info = column![
        text(&movie.title).size(18).color(TEXT_WHITE),
        text(movie.genres.join(", ")).size(13).color(TEXT_GRAY),
        text(year).size(13).color(TEXT_GRAY),
        score,
    ]
    .spacing(6);

    button(row![poster, info].spacing(16).align_y(Alignment::Center))
        .width(Length::Fill)
        .height(Length::Fixed(ROW_HEIGHT))
        .padding(8)
        .style(theme::row_button)
        .on_press(Message::Movies(MoviesInput::MovieSelected(movie.id)))
        .into()
}

pub fn view_poster<'a>(
    url: Option<&str>,
    images: &'a ImageCache,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    match url.and_then(|url| images.get(url)) {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => container(icon(ICON_FILM).size(32).color(TEXT_GRAY))
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(height))
            .style(theme::surface(4.0))
            .into(),
    }
}
