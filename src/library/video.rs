//! Video records held by the catalog
//!
//! A [`Video`] pairs immutable metadata with a moderation flag. Records are
//! shared as `Arc<Video>` between the library and any playlist that holds
//! them, so the flag sits behind a lock and is only written through
//! [`Video::set_flagged`].

use std::fmt;

use log::info;
use parking_lot::RwLock;
use serde::Deserialize;

use crate::utils::error::{PlayerError, Result};

/// Reason recorded when a video is flagged without one
pub const DEFAULT_FLAG_REASON: &str = "Not supplied";

/// A single catalog entry
#[derive(Debug)]
pub struct Video {
    title: String,
    id: String,
    tags: Vec<String>,
    /// `Some(reason)` while flagged
    flag: RwLock<Option<String>>,
}

/// Outcome of a successful flag change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagChange {
    /// The video is now flagged for the given reason
    Flagged { reason: String },

    /// The flag was removed
    Allowed,
}

/// Serialized form of a video in JSON catalogs
#[derive(Debug, Deserialize)]
pub(crate) struct VideoEntry {
    pub title: String,
    pub id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Video {
    /// Create an unflagged video
    pub fn new<T, I, S>(title: T, id: I, tags: impl IntoIterator<Item = S>) -> Self
    where
        T: Into<String>,
        I: Into<String>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            id: id.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            flag: RwLock::new(None),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.read().is_some()
    }

    pub fn flag_reason(&self) -> Option<String> {
        self.flag.read().clone()
    }

    /// Flag or unflag the video
    ///
    /// Flagging takes `reason`, falling back to [`DEFAULT_FLAG_REASON`] when
    /// it is missing or empty. Flagging a flagged video fails with
    /// [`PlayerError::AlreadyFlagged`]; unflagging an unflagged one fails with
    /// [`PlayerError::NotFlagged`]. A failure leaves the flag untouched.
    pub fn set_flagged(&self, flag: bool, reason: Option<&str>) -> Result<FlagChange> {
        let mut current = self.flag.write();

        match (current.is_some(), flag) {
            (true, true) => Err(PlayerError::AlreadyFlagged),
            (false, false) => Err(PlayerError::NotFlagged),
            (true, false) => {
                *current = None;
                info!("Removed flag from video {}", self.id);
                Ok(FlagChange::Allowed)
            }
            (false, true) => {
                let reason = reason
                    .filter(|r| !r.is_empty())
                    .unwrap_or(DEFAULT_FLAG_REASON)
                    .to_string();
                *current = Some(reason.clone());
                info!("Flagged video {} (reason: {})", self.id, reason);
                Ok(FlagChange::Flagged { reason })
            }
        }
    }
}

impl From<VideoEntry> for Video {
    fn from(entry: VideoEntry) -> Self {
        Video::new(entry.title, entry.id, entry.tags)
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.id, self.tags.join(" "))?;

        if let Some(reason) = self.flag.read().as_deref() {
            write!(f, " - FLAGGED (reason: {})", reason)?;
        }

        Ok(())
    }
}
