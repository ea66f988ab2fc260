use std::sync::Arc;

use iced::widget::{container, scrollable, text};
use iced::{Element, Length, Task, Theme};

use marquee::api::{build_http_client, MoviesService, TmdbMoviesService};
use marquee::network::{connectivity_stream, TcpProbe, DEFAULT_POLL_INTERVAL};
use marquee::screens::details::{DetailsInput, DetailsOutput, DetailsRoute};
use marquee::screens::movies::{MoviesInput, MoviesOutput, MoviesRoute};
use marquee::screens::player::{PlayerOutput, PlayerRoute};
use marquee::screens::poster::{PosterOutput, PosterRoute};
use marquee::settings::AppSettings;
use marquee::storage::{FileGenreStore, GenreStore, MemoryGenreStore};

use super::details::DetailsScreen;
use super::images::ImageCache;
use super::movies::MoviesScreen;
use super::overlays::{open_in_browser, view_alert, Modal};
use super::setup::{SetupMessage, SetupPage};
use super::theme;

#[derive(Debug, Clone)]
pub enum Message {
    Setup(SetupMessage),
    Movies(MoviesInput),
    MoviesOutput(MoviesOutput),
    MoviesRoute(MoviesRoute),
    MoviesScrolled(scrollable::Viewport),
    SortMenuClosed,
    Details(DetailsInput),
    DetailsOutput(u64, DetailsOutput),
    DetailsRoute(u64, DetailsRoute),
    PosterOutput(PosterOutput),
    PosterRoute(PosterRoute),
    PlayerOutput(PlayerOutput),
    PlayerRoute(PlayerRoute),
    DismissModal,
    DismissAlert,
    OpenInBrowser(String),
    BrowserOpened(Result<(), String>),
    ImageLoaded(String, Result<iced::widget::image::Handle, String>),
    Connectivity(bool),
}

struct Session {
    service: Arc<dyn MoviesService>,
    movies: MoviesScreen,
    details: Option<DetailsScreen>,
}

pub struct Marquee {
    setup: Option<SetupPage>,
    session: Option<Session>,
    modal: Option<Modal>,
    alert: Option<String>,
    images: ImageCache,
    generation: u64,
}

impl Marquee {
    pub fn new(settings: AppSettings) -> (Self, Task<Message>) {
        let mut app = Self {
            setup: None,
            session: None,
            modal: None,
            alert: None,
            images: ImageCache::default(),
            generation: 0,
        };

        if !settings.is_valid() {
            tracing::info!("no access token configured, showing setup");
            app.setup = Some(SetupPage::new(settings));
            return (app, Task::none());
        }
        let task = app.start_session(settings);
        (app, task)
    }

    fn start_session(&mut self, settings: AppSettings) -> Task<Message> {
        let config = settings.api_config();
        let http = match build_http_client(&config) {
            Ok(http) => http,
            Err(e) => {
                tracing::error!(error = %e, "failed to build HTTP client");
                self.setup = Some(SetupPage::new(settings));
                self.alert = Some(e.message);
                return Task::none();
            }
        };
        self.images = ImageCache::new(http.clone());

        let genres: Arc<dyn GenreStore> = match FileGenreStore::in_config_dir() {
            Some(store) => Arc::new(store),
            None => Arc::new(MemoryGenreStore::new()),
        };
        let probe = Arc::new(TcpProbe::for_authority(&config.host));
        let service: Arc<dyn MoviesService> =
            Arc::new(TmdbMoviesService::with_http(config, http));

        let (movies, movies_task) = MoviesScreen::start(Arc::clone(&service), genres);
        self.setup = None;
        self.session = Some(Session {
            service,
            movies,
            details: None,
        });
        tracing::info!(language = %settings.language(), "session started");

        Task::batch([
            movies_task,
            Task::run(
                connectivity_stream(probe, DEFAULT_POLL_INTERVAL),
                Message::Connectivity,
            ),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Setup(message) => {
                let settings = self.setup.as_mut().and_then(|setup| setup.update(message));
                match settings {
                    Some(settings) => self.start_session(settings),
                    None => Task::none(),
                }
            }
            Message::Movies(input) => {
                if let Some(session) = self.session.as_mut() {
                    session.movies.send(input);
                }
                Task::none()
            }
            Message::MoviesOutput(output) => match self.session.as_mut() {
                Some(session) => session.movies.apply(output, &mut self.images),
                None => Task::none(),
            },
            Message::MoviesRoute(route) => self.route_movies(route),
            Message::MoviesScrolled(viewport) => {
                if let Some(session) = self.session.as_mut() {
                    session.movies.scrolled(viewport);
                }
                Task::none()
            }
            Message::SortMenuClosed => {
                if let Some(session) = self.session.as_mut() {
                    session.movies.close_sort_menu();
                }
                Task::none()
            }
            Message::Details(input) => {
                if let Some(details) = self.details_mut(None) {
                    details.send(input);
                }
                Task::none()
            }
            Message::DetailsOutput(generation, output) => {
                let images = &mut self.images;
                match self
                    .session
                    .as_mut()
                    .and_then(|session| session.details.as_mut())
                    .filter(|details| details.generation() == generation)
                {
                    Some(details) => details.apply(output, images),
                    None => Task::none(),
                }
            }
            Message::DetailsRoute(generation, route) => self.route_details(generation, route),
            Message::PosterOutput(output) => match self.modal.as_mut() {
                Some(modal) => modal.present_image(output, &mut self.images),
                None => Task::none(),
            },
            Message::PlayerOutput(output) => match self.modal.as_mut() {
                Some(modal) => modal.play(output),
                None => Task::none(),
            },
            Message::PosterRoute(PosterRoute::Dismiss)
            | Message::PlayerRoute(PlayerRoute::Dismiss) => {
                self.modal = None;
                Task::none()
            }
            Message::DismissModal => {
                if let Some(ref modal) = self.modal {
                    modal.dismiss();
                }
                Task::none()
            }
            Message::DismissAlert => {
                self.alert = None;
                Task::none()
            }
            Message::OpenInBrowser(url) => {
                Task::perform(open_in_browser(url), Message::BrowserOpened)
            }
            Message::BrowserOpened(result) => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "could not open trailer");
                    self.alert = Some(e);
                }
                Task::none()
            }
            Message::ImageLoaded(url, result) => {
                match result {
                    Ok(handle) => self.images.insert(url, handle),
                    Err(e) => {
                        tracing::debug!(url = %url, error = %e, "image failed to load");
                        self.images.fail(&url);
                    }
                }
                Task::none()
            }
            Message::Connectivity(online) => {
                if let Some(session) = self.session.as_mut() {
                    session.movies.send(MoviesInput::NetworkChanged(online));
                }
                Task::none()
            }
        }
    }

    fn details_mut(&mut self, generation: Option<u64>) -> Option<&mut DetailsScreen> {
        self.session
            .as_mut()?
            .details
            .as_mut()
            .filter(|details| generation.map_or(true, |g| details.generation() == g))
    }

    fn route_movies(&mut self, route: MoviesRoute) -> Task<Message> {
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };
        match route {
            MoviesRoute::Details { id, title } => {
                self.generation += 1;
                let (details, task) =
                    DetailsScreen::start(self.generation, id, title, Arc::clone(&session.service));
                session.details = Some(details);
                task
            }
            MoviesRoute::SortAction { selected } => {
                session.movies.open_sort_menu(selected);
                Task::none()
            }
        }
    }

    fn route_details(&mut self, generation: u64, route: DetailsRoute) -> Task<Message> {
        if self.details_mut(Some(generation)).is_none() {
            return Task::none();
        }
        match route {
            DetailsRoute::Pop => {
                if let Some(session) = self.session.as_mut() {
                    session.details = None;
                }
                Task::none()
            }
            DetailsRoute::ShowPoster { url } => self.present(Modal::poster(url)),
            DetailsRoute::ShowTrailer { key } => self.present(Modal::player(key)),
            DetailsRoute::ShowAlert(message) => {
                self.alert = Some(message);
                Task::none()
            }
        }
    }

    fn present(&mut self, (modal, task): (Modal, Task<Message>)) -> Task<Message> {
        self.modal = Some(modal);
        task
    }

    pub fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup {
            let page = setup.view().map(Message::Setup);
            return match self.alert {
                Some(ref alert) => iced::widget::stack![page, view_alert(alert)].into(),
                None => page,
            };
        }
        let Some(ref session) = self.session else {
            return container(text("")).style(theme::page_background).into();
        };

        let mut layers: Vec<Element<'_, Message>> = Vec::new();
        match session.details {
            Some(ref details) => layers.push(details.view(&self.images)),
            None => {
                layers.push(session.movies.view(&self.images));
                if let Some(menu) = session.movies.view_sort_menu() {
                    layers.push(menu);
                }
            }
        }
        if let Some(ref modal) = self.modal {
            layers.push(modal.view(&self.images));
        }
        if let Some(ref alert) = self.alert {
            layers.push(view_alert(alert));
        }

        iced::widget::Stack::with_children(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
