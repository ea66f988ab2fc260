use serde::Deserialize;

use super::MovieId;

#[derive(Debug, Clone, Deserialize)]
pub struct VideoList {
    pub id: MovieId,
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub iso_639_1: Option<String>,
    pub iso_3166_1: Option<String>,
    pub name: Option<String>,
    pub key: String,
    pub site: String,
    pub size: Option<u32>,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
    pub published_at: Option<String>,
    pub id: Option<String>,
}

impl Video {
    pub fn is_official_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.video_type == "Trailer" && self.official
    }

    pub fn trailer_key(list: &VideoList) -> Option<&str> {
        list.results
            .iter()
            .find(|v| v.is_official_youtube_trailer())
            .map(|v| v.key.as_str())
    }
}
