use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StorageError;
use crate::models::GenreMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Genres,
}

impl StorageKey {
    pub const ALL: [StorageKey; 1] = [StorageKey::Genres];

    pub fn file_name(&self) -> &'static str {
        match self {
            StorageKey::Genres => "genres.json",
        }
    }
}

pub trait GenreStore: Send + Sync {
    fn load(&self) -> Option<GenreMap>;

    fn save(&self, genres: &GenreMap) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct FileGenreStore {
    dir: PathBuf,
}

impl FileGenreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn in_config_dir() -> Option<Self> {
        crate::settings::config_dir().map(Self::new)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(StorageKey::Genres.file_name())
    }

    pub fn clear_all(&self, except: &[StorageKey]) -> Result<(), StorageError> {
        for key in StorageKey::ALL.iter().filter(|key| !except.contains(key)) {
            remove_if_exists(&self.dir.join(key.file_name()))?;
        }
        Ok(())
    }
}

impl GenreStore for FileGenreStore {
    fn load(&self) -> Option<GenreMap> {
        let path = self.path();
        let bytes = std::fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(genres) => Some(genres),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt genre cache");
                None
            }
        }
    }

    fn save(&self, genres: &GenreMap) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let bytes = serde_json::to_vec(genres)?;

        let target = self.path();
        let temp = target.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&temp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        if let Err(e) = std::fs::rename(&temp, &target) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::debug!(count = genres.len(), "saved genre cache");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        remove_if_exists(&self.path())
    }
}

fn remove_if_exists(path: &Path) -> Result<(), StorageError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Default)]
pub struct MemoryGenreStore {
    genres: Mutex<Option<GenreMap>>,
}

impl MemoryGenreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genres(genres: GenreMap) -> Self {
        Self {
            genres: Mutex::new(Some(genres)),
        }
    }
}

impl GenreStore for MemoryGenreStore {
    fn load(&self) -> Option<GenreMap> {
        self.genres.lock().ok()?.clone()
    }

    fn save(&self, genres: &GenreMap) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.genres.lock() {
            *slot = Some(genres.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.genres.lock() {
            *slot = None;
        }
        Ok(())
    }
}
