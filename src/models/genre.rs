use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::GenreId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreMap(BTreeMap<GenreId, String>);

impl GenreMap {
    pub fn get(&self, id: GenreId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names_for(&self, ids: &[GenreId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .map(String::from)
            .collect()
    }
}

impl From<GenreList> for GenreMap {
    fn from(list: GenreList) -> Self {
        list.genres.into_iter().collect()
    }
}

impl FromIterator<Genre> for GenreMap {
    fn from_iter<I: IntoIterator<Item = Genre>>(iter: I) -> Self {
        Self(iter.into_iter().map(|g| (g.id, g.name)).collect())
    }
}
