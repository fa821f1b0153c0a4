//! Video catalog for vidplayer
//!
//! This module defines the [`VideoLibrary`] trait consumed by the player
//! controller and an in-memory implementation loaded from a catalog file or
//! from the bundled default catalog.
//!
//! Catalog files come in two formats:
//! - Text, one video per line: `title | id | tag1 , tag2`
//! - JSON, an array of `{ "title", "id", "tags" }` objects

mod video;

pub use video::{FlagChange, Video, DEFAULT_FLAG_REASON};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::utils::error::{IntoPlayerError, PlayerError, Result};
use video::VideoEntry;

/// Catalog bundled with the binary, used when no file is configured
const BUNDLED_CATALOG: &str = include_str!("../../assets/videos.txt");

/// Read-only access to the video catalog
pub trait VideoLibrary: Send + Sync {
    /// Look up a video by its exact id
    fn get_video(&self, id: &str) -> Option<Arc<Video>>;

    /// Enumerate every video in the catalog
    fn get_all_videos(&self) -> Vec<Arc<Video>>;
}

/// Catalog held entirely in memory, enumerated in load order
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
    videos: Vec<Arc<Video>>,
    index: HashMap<String, usize>,
}

impl InMemoryLibrary {
    /// Build a library from records
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::Library`] if two records share an id.
    pub fn from_videos(videos: impl IntoIterator<Item = Video>) -> Result<Self> {
        let mut library = Self::default();

        for video in videos {
            if library.index.contains_key(video.id()) {
                return Err(PlayerError::library_error(format!(
                    "Duplicate video id: {}",
                    video.id()
                )));
            }
            library.index.insert(video.id().to_string(), library.videos.len());
            library.videos.push(Arc::new(video));
        }

        Ok(library)
    }

    /// The catalog bundled with vidplayer
    pub fn bundled() -> Result<Self> {
        Self::parse_text(BUNDLED_CATALOG)
    }

    /// Load a catalog file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading video catalog from {:?}", path);

        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let library = if is_json {
            Self::parse_json(&contents)?
        } else {
            Self::parse_text(&contents)?
        };

        info!("Loaded {} videos", library.len());
        Ok(library)
    }

    /// Parse the `title | id | tag1 , tag2` text format
    pub fn parse_text(contents: &str) -> Result<Self> {
        let mut videos = Vec::new();

        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('|').map(str::trim);
            let title = fields.next().unwrap_or_default();
            let id = fields.next().unwrap_or_default();
            if id.is_empty() {
                return Err(PlayerError::library_error(format!(
                    "Line {}: missing video id",
                    number + 1
                )));
            }

            let tags: Vec<&str> = fields
                .next()
                .map(|tags| tags.split(',').map(str::trim).filter(|t| !t.is_empty()).collect())
                .unwrap_or_default();

            debug!("Catalog line {}: {} ({})", number + 1, title, id);
            videos.push(Video::new(title, id, tags));
        }

        Self::from_videos(videos)
    }

    /// Parse a JSON array of video entries
    pub fn parse_json(contents: &str) -> Result<Self> {
        let entries: Vec<VideoEntry> =
            serde_json::from_str(contents).library_err("Failed to parse JSON catalog")?;

        Self::from_videos(entries.into_iter().map(Video::from))
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

impl VideoLibrary for InMemoryLibrary {
    fn get_video(&self, id: &str) -> Option<Arc<Video>> {
        self.index.get(id).map(|&idx| Arc::clone(&self.videos[idx]))
    }

    fn get_all_videos(&self) -> Vec<Arc<Video>> {
        self.videos.clone()
    }
}
