use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use crate::models::{MovieCard, MovieId};

/// Rows left before the end of the list at which the next page is requested.
pub const PAGINATION_OFFSET: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOption {
    Alphabet,
    ReleaseDate,
    #[default]
    UserScore,
}

impl SortOption {
    pub const ALL: [SortOption; 3] = [
        SortOption::Alphabet,
        SortOption::ReleaseDate,
        SortOption::UserScore,
    ];

    fn compare(&self, a: &MovieCard, b: &MovieCard) -> Ordering {
        match self {
            SortOption::Alphabet => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortOption::ReleaseDate => b.release_date.cmp(&a.release_date),
            SortOption::UserScore => b.vote_average.total_cmp(&a.vote_average),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOption::Alphabet => "Alphabet",
            SortOption::ReleaseDate => "Release date",
            SortOption::UserScore => "User score",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default)]
pub struct MoviesState {
    movies: Vec<MovieCard>,
    known_ids: HashSet<MovieId>,
    current_page: u32,
    total_pages: u32,
    sort: SortOption,
    search: String,
    is_loading: bool,
}

impl MoviesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[MovieCard] {
        &self.movies
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Merges a fetched page. Page 1 starts the collection over.
    pub fn apply_page(&mut self, info: PageInfo, movies: Vec<MovieCard>) {
        if info.page <= 1 {
            self.movies.clear();
            self.known_ids.clear();
        }
        self.current_page = info.page;
        self.total_pages = info.total_pages;

        for movie in movies {
            if self.known_ids.insert(movie.id) {
                self.movies.push(movie);
            }
        }
    }

    pub fn reset(&mut self) {
        self.movies.clear();
        self.known_ids.clear();
        self.current_page = 0;
        self.total_pages = 0;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
    }

    pub fn displayed(&self) -> Vec<MovieCard> {
        let mut shown: Vec<MovieCard> = self
            .movies
            .iter()
            .filter(|movie| {
                self.search.is_empty() || movie.title.to_lowercase().contains(&self.search)
            })
            .cloned()
            .collect();
        // stable, ties keep fetch order
        shown.sort_by(|a, b| self.sort.compare(a, b));
        shown
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.current_page == 0 || self.current_page < self.total_pages)
            .then_some(self.current_page + 1)
    }

    pub fn should_load_more(&self, index: usize) -> bool {
        if self.is_loading || self.is_searching() || self.next_page().is_none() {
            return false;
        }
        let shown = self.displayed().len();
        index >= shown.saturating_sub(PAGINATION_OFFSET)
    }
}
