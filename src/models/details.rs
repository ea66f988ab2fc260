use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::{parse_release_date, round_to_tenth, Genre, MovieId};

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub adult: Option<bool>,
    pub backdrop_path: Option<String>,
    pub belongs_to_collection: Option<MovieCollection>,
    pub budget: Option<u64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub homepage: Option<String>,
    pub id: MovieId,
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub production_companies: Option<Vec<ProductionCompany>>,
    pub production_countries: Option<Vec<ProductionCountry>>,
    pub release_date: Option<String>,
    pub revenue: Option<u64>,
    pub runtime: Option<u32>,
    pub spoken_languages: Option<Vec<SpokenLanguage>>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    #[serde(default)]
    pub title: String,
    pub video: Option<bool>,
    #[serde(default)]
    pub vote_average: f64,
    pub vote_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieCollection {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCompany {
    pub id: Option<u64>,
    pub logo_path: Option<String>,
    pub name: Option<String>,
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpokenLanguage {
    pub english_name: Option<String>,
    pub iso_639_1: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsCard {
    pub id: MovieId,
    pub poster_url: Option<String>,
    pub title: String,
    pub tagline: Option<String>,
    pub release_date: NaiveDate,
    pub origin_country: Vec<String>,
    pub genres: Vec<String>,
    pub overview: String,
    pub vote_average: f64,
    pub runtime: Option<u32>,
}

impl DetailsCard {
    pub fn new(details: MovieDetails, image_base_url: &str) -> Self {
        Self {
            id: details.id,
            poster_url: details
                .poster_path
                .filter(|path| !path.is_empty())
                .map(|path| format!("{}{}", image_base_url, path)),
            title: details.title,
            tagline: details.tagline.filter(|t| !t.trim().is_empty()),
            release_date: parse_release_date(details.release_date.as_deref()),
            origin_country: details.origin_country,
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            overview: details.overview,
            vote_average: details.vote_average,
            runtime: details.runtime.filter(|minutes| *minutes > 0),
        }
    }

    /// `"United States, Canada (2024)"`; the year is left out when unknown.
    pub fn countries_line(&self) -> String {
        let countries = self
            .origin_country
            .iter()
            .map(|code| country_name(code).map(String::from).unwrap_or_else(|| code.clone()))
            .collect::<Vec<_>>()
            .join(", ");

        if self.release_date == NaiveDate::MIN {
            return countries;
        }
        let year = format!("({})", self.release_date.year());
        if countries.is_empty() {
            year
        } else {
            format!("{} {}", countries, year)
        }
    }

    pub fn genres_line(&self) -> String {
        self.genres.join(", ")
    }

    pub fn rating_line(&self) -> String {
        format!("User Score: {:.1}", round_to_tenth(self.vote_average))
    }

    pub fn runtime_line(&self) -> Option<String> {
        let minutes = self.runtime?;
        Some(match (minutes / 60, minutes % 60) {
            (0, m) => format!("{}m", m),
            (h, 0) => format!("{}h", h),
            (h, m) => format!("{}h {}m", h, m),
        })
    }
}

const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("AR", "Argentina"),
    ("AT", "Austria"),
    ("AU", "Australia"),
    ("BE", "Belgium"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CH", "Switzerland"),
    ("CN", "China"),
    ("CZ", "Czechia"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("HK", "Hong Kong"),
    ("HU", "Hungary"),
    ("IE", "Ireland"),
    ("IN", "India"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("KR", "South Korea"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("NZ", "New Zealand"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("SE", "Sweden"),
    ("TH", "Thailand"),
    ("TR", "Türkiye"),
    ("TW", "Taiwan"),
    ("UA", "Ukraine"),
    ("US", "United States"),
    ("ZA", "South Africa"),
];

pub fn country_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_uppercase();
    COUNTRY_NAMES
        .binary_search_by(|(c, _)| (*c).cmp(code.as_str()))
        .ok()
        .map(|index| COUNTRY_NAMES[index].1)
}
