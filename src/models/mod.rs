mod details;
mod genre;
mod movie;
mod video;

use chrono::NaiveDate;

pub use details::{
    country_name, DetailsCard, MovieCollection, MovieDetails, ProductionCompany,
    ProductionCountry, SpokenLanguage,
};
pub use genre::{Genre, GenreList, GenreMap};
pub use movie::{MovieCard, MoviePage, MovieSummary};
pub use video::{Video, VideoList};

pub type MovieId = u64;
pub type GenreId = u64;

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Parses a TMDB `yyyy-MM-dd` date; anything else maps to [`NaiveDate::MIN`].
pub fn parse_release_date(raw: Option<&str>) -> NaiveDate {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .unwrap_or(NaiveDate::MIN)
}
