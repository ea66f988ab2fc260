use chrono::NaiveDate;
use serde::Deserialize;

use super::{parse_release_date, GenreId, GenreMap, MovieId};

#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    pub id: MovieId,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub title: String,
    pub video: Option<bool>,
    #[serde(default)]
    pub vote_average: f64,
    pub vote_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub poster_url: Option<String>,
    pub title: String,
    pub genre_ids: Vec<GenreId>,
    pub genres: Vec<String>,
    pub vote_average: f64,
    pub release_date: NaiveDate,
}

impl MovieCard {
    pub fn new(summary: MovieSummary, image_base_url: &str) -> Self {
        Self {
            id: summary.id,
            poster_url: summary
                .poster_path
                .filter(|path| !path.is_empty())
                .map(|path| format!("{}{}", image_base_url, path)),
            title: summary.title,
            genre_ids: summary.genre_ids,
            genres: Vec::new(),
            vote_average: summary.vote_average,
            release_date: parse_release_date(summary.release_date.as_deref()),
        }
    }

    pub fn with_genres(mut self, genres: &GenreMap) -> Self {
        self.genres = genres.names_for(&self.genre_ids);
        self
    }

    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        (self.release_date != NaiveDate::MIN).then(|| self.release_date.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenreList;

    const PAGE: &str = r#"{
        "page": 1,
        "results": [
            {
                "adult": false,
                "backdrop_path": "/back.jpg",
                "genre_ids": [28, 12],
                "id": 533535,
                "original_language": "en",
                "original_title": "Deadpool & Wolverine",
                "overview": "A listless Wade Wilson...",
                "popularity": 4567.2,
                "poster_path": "/poster.jpg",
                "release_date": "2024-07-24",
                "title": "Deadpool & Wolverine",
                "video": false,
                "vote_average": 7.7,
                "vote_count": 3000
            },
            {
                "id": 1,
                "poster_path": null,
                "release_date": "",
                "title": "Untitled"
            }
        ],
        "total_pages": 45000,
        "total_results": 900000
    }"#;

    #[test]
    fn decodes_popular_page() {
        let page: MoviePage = serde_json::from_str(PAGE).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 45000);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].genre_ids, vec![28, 12]);
        assert!(page.results[1].genre_ids.is_empty());
    }

    #[test]
    fn card_builds_poster_url_and_date() {
        let page: MoviePage = serde_json::from_str(PAGE).unwrap();
        let card = MovieCard::new(page.results[0].clone(), "https://img/w500");
        assert_eq!(card.poster_url.as_deref(), Some("https://img/w500/poster.jpg"));
        assert_eq!(card.release_date, NaiveDate::from_ymd_opt(2024, 7, 24).unwrap());
        assert_eq!(card.release_year(), Some(2024));
    }

    #[test]
    fn card_without_poster_or_date() {
        let page: MoviePage = serde_json::from_str(PAGE).unwrap();
        let card = MovieCard::new(page.results[1].clone(), "https://img/w500");
        assert!(card.poster_url.is_none());
        assert_eq!(card.release_date, NaiveDate::MIN);
        assert_eq!(card.release_year(), None);
    }

    #[test]
    fn card_resolves_genre_names() {
        let page: MoviePage = serde_json::from_str(PAGE).unwrap();
        let genres: GenreList =
            serde_json::from_str(r#"{"genres":[{"id":12,"name":"Adventure"},{"id":28,"name":"Action"}]}"#)
                .unwrap();
        let card = MovieCard::new(page.results[0].clone(), "").with_genres(&genres.into());
        assert_eq!(card.genres, vec!["Action", "Adventure"]);
    }
}
