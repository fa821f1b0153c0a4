//! Named, ordered, duplicate-free collections of videos

use std::sync::Arc;

use crate::library::Video;
use crate::utils::error::{PlayerError, Result};

/// Line rendered for a playlist with no videos
pub const EMPTY_PLAYLIST_LINE: &str = "No videos here yet";

/// A user-curated playlist
///
/// Membership is by record identity: the same `Arc<Video>` handed out by the
/// library. Videos keep their insertion order.
#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    videos: Vec<Arc<Video>>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            videos: Vec::new(),
        }
    }

    /// Name with the casing it was created with
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn videos(&self) -> &[Arc<Video>] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn contains(&self, video: &Arc<Video>) -> bool {
        self.position(video).is_some()
    }

    /// Append a video
    ///
    /// # Errors
    ///
    /// [`PlayerError::DuplicateVideo`] if the video is already present.
    pub fn add_video(&mut self, video: Arc<Video>) -> Result<()> {
        if self.contains(&video) {
            return Err(PlayerError::DuplicateVideo);
        }
        self.videos.push(video);
        Ok(())
    }

    /// Remove a video, keeping the order of the rest
    ///
    /// # Errors
    ///
    /// [`PlayerError::NotInPlaylist`] if the video is absent.
    pub fn remove_video(&mut self, video: &Arc<Video>) -> Result<()> {
        let idx = self.position(video).ok_or(PlayerError::NotInPlaylist)?;
        self.videos.remove(idx);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.videos.clear();
    }

    /// One line per video, or [`EMPTY_PLAYLIST_LINE`] when empty
    pub fn render(&self) -> Vec<String> {
        if self.videos.is_empty() {
            return vec![EMPTY_PLAYLIST_LINE.to_string()];
        }
        self.videos.iter().map(|video| video.to_string()).collect()
    }

    fn position(&self, video: &Arc<Video>) -> Option<usize> {
        self.videos.iter().position(|v| Arc::ptr_eq(v, video))
    }
}
