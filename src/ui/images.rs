use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::Task;

use super::app::Message;

fn cache_key(url: &str) -> String {
    let hash = url.bytes().fold(5381u64, |hash, byte| {
        hash.wrapping_mul(33).wrapping_add(u64::from(byte))
    });
    format!("{:016x}", hash)
}

#[derive(Debug, Default)]
pub struct ImageCache {
    handles: HashMap<String, Handle>,
    pending: HashSet<String>,
    directory: Option<PathBuf>,
    http: reqwest::Client,
}

impl ImageCache {
    pub fn new(http: reqwest::Client) -> Self {
        let directory = marquee::settings::cache_dir().map(|dir| dir.join("images"));
        if let Some(ref dir) = directory {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!(path = %dir.display(), error = %e, "image cache disabled");
            }
        }
        Self {
            handles: HashMap::new(),
            pending: HashSet::new(),
            directory,
            http,
        }
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.handles.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.handles.insert(url, handle);
    }

    pub fn fail(&mut self, url: &str) {
        self.pending.remove(url);
    }

    pub fn request<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = urls
            .into_iter()
            .filter_map(|url| self.load(url))
            .collect();
        Task::batch(tasks)
    }

    fn load(&mut self, url: &str) -> Option<Task<Message>> {
        if self.handles.contains_key(url) || !self.pending.insert(url.to_string()) {
            return None;
        }
        let url = url.to_string();
        let path = self.directory.as_ref().map(|dir| dir.join(cache_key(&url)));
        let http = self.http.clone();

        Some(Task::perform(
            async move {
                let result = read_or_fetch(http, &url, path).await;
                (url, result)
            },
            |(url, result)| Message::ImageLoaded(url, result.map(Handle::from_bytes)),
        ))
    }
}

async fn read_or_fetch(
    http: reqwest::Client,
    url: &str,
    path: Option<PathBuf>,
) -> Result<Vec<u8>, String> {
    if let Some(ref path) = path {
        if let Ok(bytes) = tokio::fs::read(path).await {
            return Ok(bytes);
        }
    }

    let bytes = http
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?
        .to_vec();

    if let Some(path) = path {
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            tracing::debug!(path = %path.display(), error = %e, "could not cache image");
        }
    }
    Ok(bytes)
}
