use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::Mutex;

use super::state::{MoviesState, PageInfo, SortOption};
use crate::api::MoviesService;
use crate::error::ApiError;
use crate::models::{GenreMap, MovieCard, MovieId};
use crate::screens::view_model::{deferred, effect, Router, ViewModel};
use crate::storage::GenreStore;

#[derive(Debug, Clone, PartialEq)]
pub enum MoviesInput {
    ViewDidLoad,
    Refresh,
    WillDisplay(usize),
    FetchMore,
    SearchChanged(String),
    SortSelected(SortOption),
    SortButtonTapped,
    MovieSelected(MovieId),
    NetworkChanged(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoviesOutput {
    Spinner(bool),
    MoviesLoaded { movies: Vec<MovieCard> },
    FetchFailed(ApiError),
    Filter { selected: SortOption, movies: Vec<MovieCard> },
    NothingFound(bool),
    Offline(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoviesRoute {
    Details { id: MovieId, title: String },
    SortAction { selected: SortOption },
}

#[derive(Debug, Clone, Copy)]
enum FetchTarget {
    FirstPage,
    NextPage,
    NearRow(usize),
}

#[derive(Clone)]
pub struct MoviesViewModel {
    service: Arc<dyn MoviesService>,
    genres: Arc<dyn GenreStore>,
    router: Arc<dyn Router<MoviesRoute>>,
    state: Arc<Mutex<MoviesState>>,
    genre_names: Arc<Mutex<GenreMap>>,
    offline: Arc<AtomicBool>,
}

impl MoviesViewModel {
    pub fn new(
        service: Arc<dyn MoviesService>,
        genres: Arc<dyn GenreStore>,
        router: Arc<dyn Router<MoviesRoute>>,
    ) -> Self {
        Self {
            service,
            genres,
            router,
            state: Arc::new(Mutex::new(MoviesState::new())),
            genre_names: Arc::new(Mutex::new(GenreMap::default())),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    async fn ensure_genres(&self) {
        if let Some(stored) = self.genres.load().filter(|genres| !genres.is_empty()) {
            *self.genre_names.lock().await = stored;
            return;
        }
        match self.service.genres().await {
            Ok(list) => {
                let genres = GenreMap::from(list);
                tracing::debug!(count = genres.len(), "fetched genres");
                if let Err(e) = self.genres.save(&genres) {
                    tracing::warn!(error = %e, "failed to store genres");
                }
                *self.genre_names.lock().await = genres;
            }
            Err(e) => tracing::warn!(error = %e, "failed to fetch genres"),
        }
    }

    async fn begin_fetch(&self, target: FetchTarget) -> Option<u32> {
        let mut state = self.state.lock().await;
        if state.is_loading() {
            return None;
        }
        let page = match target {
            FetchTarget::FirstPage => {
                state.reset();
                Some(1)
            }
            FetchTarget::NextPage if !state.is_searching() => state.next_page(),
            FetchTarget::NextPage => None,
            FetchTarget::NearRow(index) => {
                if state.should_load_more(index) {
                    state.next_page()
                } else {
                    None
                }
            }
        }?;
        state.set_loading(true);
        Some(page)
    }

    async fn load_page(&self, page: u32) -> Vec<MoviesOutput> {
        let result = self.service.popular_movies(page).await;
        let genres = self.genre_names.lock().await.clone();
        let mut state = self.state.lock().await;
        state.set_loading(false);

        match result {
            Ok(response) => {
                let base = self.service.image_base_url();
                let cards = response
                    .results
                    .into_iter()
                    .map(|summary| MovieCard::new(summary, base).with_genres(&genres))
                    .collect();
                state.apply_page(
                    PageInfo {
                        page,
                        total_pages: response.total_pages,
                    },
                    cards,
                );
                tracing::debug!(page, total = state.total_pages(), "loaded movies page");
                vec![MoviesOutput::MoviesLoaded {
                    movies: state.displayed(),
                }]
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "failed to load movies page");
                vec![MoviesOutput::FetchFailed(e)]
            }
        }
    }

    fn fetch(&self, target: FetchTarget) -> BoxStream<'static, MoviesOutput> {
        let this = self.clone();
        stream::once(async move {
            let page = this.begin_fetch(target).await;
            (this, page)
        })
        .flat_map(|(this, page)| match page {
            Some(page) => stream::iter([MoviesOutput::Spinner(true)])
                .chain(deferred(async move { this.load_page(page).await }))
                .chain(stream::iter([MoviesOutput::Spinner(false)]))
                .boxed(),
            None => stream::empty().boxed(),
        })
        .boxed()
    }

    fn filter(
        &self,
        change: impl FnOnce(&mut MoviesState) + Send + 'static,
        search: bool,
    ) -> BoxStream<'static, MoviesOutput> {
        let state = Arc::clone(&self.state);
        deferred(async move {
            let mut state = state.lock().await;
            change(&mut *state);
            let movies = state.displayed();
            let nothing_found = movies.is_empty() && !state.movies().is_empty();
            let mut outputs = vec![MoviesOutput::Filter {
                selected: state.sort(),
                movies,
            }];
            if search {
                outputs.push(MoviesOutput::NothingFound(nothing_found));
            }
            outputs
        })
    }

    fn network_changed(&self, online: bool) -> BoxStream<'static, MoviesOutput> {
        let was_offline = self.offline.swap(!online, Ordering::SeqCst);
        if !online {
            if !was_offline {
                tracing::info!("network connection lost");
            }
            return stream::iter([MoviesOutput::Offline(true)]).boxed();
        }
        if !was_offline {
            return stream::iter([MoviesOutput::Offline(false)]).boxed();
        }
        tracing::info!("network connection restored");

        let this = self.clone();
        stream::iter([MoviesOutput::Offline(false)])
            .chain(
                stream::once(async move {
                    let empty = this.state.lock().await.movies().is_empty();
                    (this, empty)
                })
                .flat_map(|(this, empty)| {
                    if empty {
                        this.fetch(FetchTarget::FirstPage)
                    } else {
                        stream::empty().boxed()
                    }
                }),
            )
            .boxed()
    }
}

impl ViewModel for MoviesViewModel {
    type Input = MoviesInput;
    type Output = MoviesOutput;

    fn handle(&self, input: MoviesInput) -> BoxStream<'static, MoviesOutput> {
        match input {
            MoviesInput::ViewDidLoad => {
                let this = self.clone();
                stream::once(async move {
                    this.ensure_genres().await;
                    this
                })
                .flat_map(|this| this.fetch(FetchTarget::FirstPage))
                .boxed()
            }
            MoviesInput::Refresh => self.fetch(FetchTarget::FirstPage),
            MoviesInput::WillDisplay(index) => self.fetch(FetchTarget::NearRow(index)),
            MoviesInput::FetchMore => self.fetch(FetchTarget::NextPage),
            MoviesInput::SearchChanged(text) => {
                self.filter(move |state| state.set_search(&text), true)
            }
            MoviesInput::SortSelected(option) => {
                self.filter(move |state| state.set_sort(option), false)
            }
            MoviesInput::SortButtonTapped => {
                let (state, router) = (Arc::clone(&self.state), Arc::clone(&self.router));
                effect(async move {
                    let selected = state.lock().await.sort();
                    router.navigate(MoviesRoute::SortAction { selected });
                })
            }
            MoviesInput::MovieSelected(id) => {
                let (state, router) = (Arc::clone(&self.state), Arc::clone(&self.router));
                effect(async move {
                    let title = state
                        .lock()
                        .await
                        .movies()
                        .iter()
                        .find(|movie| movie.id == id)
                        .map(|movie| movie.title.clone());
                    match title {
                        Some(title) => router.navigate(MoviesRoute::Details { id, title }),
                        None => tracing::warn!(id, "selected movie is not in the list"),
                    }
                })
            }
            MoviesInput::NetworkChanged(online) => self.network_changed(online),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{FakeMoviesService, RecordingRouter};
    use crate::storage::MemoryGenreStore;

    const GENRES: &str = r#"{"genres":[{"id":28,"name":"Action"},{"id":18,"name":"Drama"}]}"#;

    fn page_json(page: u32, total_pages: u32, movies: &[(MovieId, &str, f64)]) -> String {
        let results: Vec<String> = movies
            .iter()
            .map(|(id, title, score)| {
                format!(
                    r#"{{"id":{},"title":"{}","vote_average":{},"genre_ids":[28],"poster_path":"/{}.jpg","release_date":"2020-01-01"}}"#,
                    id, title, score, id
                )
            })
            .collect();
        format!(
            r#"{{"page":{},"results":[{}],"total_pages":{},"total_results":0}}"#,
            page,
            results.join(","),
            total_pages
        )
    }

    struct Harness {
        service: Arc<FakeMoviesService>,
        store: Arc<MemoryGenreStore>,
        router: Arc<RecordingRouter<MoviesRoute>>,
        view_model: MoviesViewModel,
    }

    fn harness(service: FakeMoviesService) -> Harness {
        let service = Arc::new(service);
        let store = Arc::new(MemoryGenreStore::new());
        let router = Arc::new(RecordingRouter::default());
        let view_model = MoviesViewModel::new(service.clone(), store.clone(), router.clone());
        Harness {
            service,
            store,
            router,
            view_model,
        }
    }

    async fn run(view_model: &MoviesViewModel, inputs: Vec<MoviesInput>) -> Vec<MoviesOutput> {
        Arc::new(view_model.clone())
            .transform(stream::iter(inputs))
            .collect()
            .await
    }

    fn titles(movies: &[MovieCard]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    fn two_pages() -> FakeMoviesService {
        let first: Vec<(MovieId, &str, f64)> = (1..=10)
            .map(|id| (id, "Movie", id as f64 / 2.0))
            .collect();
        FakeMoviesService::default()
            .with_genres(GENRES)
            .with_page(1, &page_json(1, 2, &first))
            .with_page(2, &page_json(2, 2, &[(10, "Movie", 5.0), (11, "Late", 9.9)]))
    }

    #[tokio::test]
    async fn view_did_load_fetches_genres_then_first_page() {
        let h = harness(
            FakeMoviesService::default()
                .with_genres(GENRES)
                .with_page(1, &page_json(1, 3, &[(1, "Heat", 8.3), (2, "Alien", 8.5)])),
        );

        let outputs = run(&h.view_model, vec![MoviesInput::ViewDidLoad]).await;

        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[0], MoviesOutput::Spinner(true));
        match &outputs[1] {
            MoviesOutput::MoviesLoaded { movies } => {
                assert_eq!(titles(movies), vec!["Alien", "Heat"]);
                assert_eq!(movies[0].genres, vec!["Action"]);
                assert_eq!(movies[0].poster_url.as_deref(), Some("https://img/w500/2.jpg"));
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(outputs[2], MoviesOutput::Spinner(false));
        assert_eq!(h.service.genre_requests(), 1);
        assert_eq!(h.store.load().map(|g| g.len()), Some(2));
    }

    #[tokio::test]
    async fn stored_genres_are_not_refetched() {
        let h = harness(two_pages());
        h.store.save(&serde_json::from_str(r#"{"28":"Action"}"#).unwrap()).unwrap();
        run(&h.view_model, vec![MoviesInput::ViewDidLoad]).await;
        assert_eq!(h.service.genre_requests(), 0);
    }

    #[tokio::test]
    async fn genre_failure_does_not_block_movies() {
        let h = harness(FakeMoviesService::default().with_page(1, &page_json(1, 1, &[(1, "Heat", 8.3)])));
        let outputs = run(&h.view_model, vec![MoviesInput::ViewDidLoad]).await;
        assert!(matches!(&outputs[1], MoviesOutput::MoviesLoaded { movies } if movies[0].genres.is_empty()));
    }

    #[tokio::test]
    async fn fetch_failure_is_reported_between_spinners() {
        let error = ApiError::new(7, "Invalid API key").with_status(401);
        let h = harness(FakeMoviesService::default().with_page_error(1, error.clone()));
        let outputs = run(&h.view_model, vec![MoviesInput::Refresh]).await;
        assert_eq!(
            outputs,
            vec![
                MoviesOutput::Spinner(true),
                MoviesOutput::FetchFailed(error),
                MoviesOutput::Spinner(false),
            ]
        );
    }

    #[tokio::test]
    async fn scrolling_near_the_end_fetches_next_page_once() {
        let h = harness(two_pages());
        let outputs = run(
            &h.view_model,
            vec![
                MoviesInput::ViewDidLoad,
                MoviesInput::WillDisplay(2),
                MoviesInput::WillDisplay(7),
                MoviesInput::WillDisplay(10),
            ],
        )
        .await;

        assert_eq!(h.service.page_requests(), vec![1, 2]);
        match &outputs[4] {
            MoviesOutput::MoviesLoaded { movies } => {
                assert_eq!(movies.len(), 11);
                assert_eq!(movies[0].title, "Late");
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[tokio::test]
    async fn search_filters_and_reports_nothing_found() {
        let h = harness(
            FakeMoviesService::default()
                .with_genres(GENRES)
                .with_page(1, &page_json(1, 5, &[(1, "Heat", 8.3), (2, "Alien", 8.5)])),
        );
        let outputs = run(
            &h.view_model,
            vec![
                MoviesInput::ViewDidLoad,
                MoviesInput::SearchChanged(String::from(" hE ")),
                MoviesInput::FetchMore,
                MoviesInput::SearchChanged(String::from("zzz")),
            ],
        )
        .await;

        assert_eq!(outputs.len(), 7);
        match &outputs[3] {
            MoviesOutput::Filter { selected, movies } => {
                assert_eq!(*selected, SortOption::UserScore);
                assert_eq!(titles(movies), vec!["Heat"]);
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(outputs[4], MoviesOutput::NothingFound(false));
        assert_eq!(
            outputs[5],
            MoviesOutput::Filter {
                selected: SortOption::UserScore,
                movies: Vec::new(),
            }
        );
        assert_eq!(outputs[6], MoviesOutput::NothingFound(true));
        // pagination is paused while searching
        assert_eq!(h.service.page_requests(), vec![1]);
    }

    #[tokio::test]
    async fn sort_selection_reorders() {
        let h = harness(two_pages());
        let outputs = run(
            &h.view_model,
            vec![
                MoviesInput::FetchMore,
                MoviesInput::SortSelected(SortOption::Alphabet),
            ],
        )
        .await;
        match outputs.last() {
            Some(MoviesOutput::Filter { selected, movies }) => {
                assert_eq!(*selected, SortOption::Alphabet);
                assert_eq!(movies.len(), 10);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[tokio::test]
    async fn routes_to_details_and_sort_action() {
        let h = harness(two_pages());
        run(
            &h.view_model,
            vec![
                MoviesInput::ViewDidLoad,
                MoviesInput::SortSelected(SortOption::ReleaseDate),
                MoviesInput::SortButtonTapped,
                MoviesInput::MovieSelected(3),
                MoviesInput::MovieSelected(999),
            ],
        )
        .await;
        assert_eq!(
            h.router.routes(),
            vec![
                MoviesRoute::SortAction {
                    selected: SortOption::ReleaseDate
                },
                MoviesRoute::Details {
                    id: 3,
                    title: String::from("Movie")
                },
            ]
        );
    }

    #[tokio::test]
    async fn coming_back_online_loads_when_empty() {
        let h = harness(two_pages());
        let outputs = run(
            &h.view_model,
            vec![
                MoviesInput::NetworkChanged(false),
                MoviesInput::NetworkChanged(true),
                MoviesInput::NetworkChanged(true),
            ],
        )
        .await;

        assert_eq!(outputs[0], MoviesOutput::Offline(true));
        assert_eq!(outputs[1], MoviesOutput::Offline(false));
        assert_eq!(outputs[2], MoviesOutput::Spinner(true));
        assert_eq!(outputs[4], MoviesOutput::Spinner(false));
        assert_eq!(outputs[5], MoviesOutput::Offline(false));
        assert_eq!(outputs.len(), 6);
        assert_eq!(h.service.page_requests(), vec![1]);
    }

    #[tokio::test]
    async fn online_at_startup_does_not_refetch() {
        let error = ApiError::new(7, "Invalid API key").with_status(401);
        let h = harness(FakeMoviesService::default().with_page_error(1, error));
        let outputs = run(
            &h.view_model,
            vec![MoviesInput::ViewDidLoad, MoviesInput::NetworkChanged(true)],
        )
        .await;

        assert_eq!(h.service.page_requests(), vec![1]);
        let failures = outputs
            .iter()
            .filter(|o| matches!(o, MoviesOutput::FetchFailed(_)))
            .count();
        assert_eq!(failures, 1);
        assert_eq!(outputs.last(), Some(&MoviesOutput::Offline(false)));
    }

    #[tokio::test]
    async fn reconnecting_with_movies_loaded_keeps_the_list() {
        let h = harness(two_pages());
        let outputs = run(
            &h.view_model,
            vec![
                MoviesInput::ViewDidLoad,
                MoviesInput::NetworkChanged(false),
                MoviesInput::NetworkChanged(true),
            ],
        )
        .await;

        assert_eq!(
            &outputs[3..],
            &[MoviesOutput::Offline(true), MoviesOutput::Offline(false)]
        );
        assert_eq!(h.service.page_requests(), vec![1]);
    }

    #[tokio::test]
    async fn refresh_replaces_loaded_movies() {
        let h = harness(two_pages());
        let outputs = run(
            &h.view_model,
            vec![
                MoviesInput::ViewDidLoad,
                MoviesInput::FetchMore,
                MoviesInput::Refresh,
            ],
        )
        .await;

        assert_eq!(h.service.page_requests(), vec![1, 2, 1]);
        match &outputs[7] {
            MoviesOutput::MoviesLoaded { movies } => {
                assert_eq!(movies.len(), 10);
                assert!(movies.iter().all(|m| m.title != "Late"));
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(outputs.len(), 9);
    }

    #[tokio::test]
    async fn fetch_more_after_last_page_is_ignored() {
        let h = harness(two_pages());
        let outputs = run(
            &h.view_model,
            vec![
                MoviesInput::ViewDidLoad,
                MoviesInput::FetchMore,
                MoviesInput::FetchMore,
                MoviesInput::WillDisplay(10),
            ],
        )
        .await;

        assert_eq!(h.service.page_requests(), vec![1, 2]);
        assert_eq!(outputs.len(), 6);
    }

    #[tokio::test]
    async fn genre_names_are_kept_after_startup() {
        let h = harness(two_pages());
        run(&h.view_model, vec![MoviesInput::ViewDidLoad]).await;
        h.store.clear().unwrap();

        let outputs = run(&h.view_model, vec![MoviesInput::FetchMore]).await;
        match &outputs[1] {
            MoviesOutput::MoviesLoaded { movies } => {
                assert!(movies.iter().all(|m| m.genres == vec!["Action"]));
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(h.service.genre_requests(), 1);
    }
}
