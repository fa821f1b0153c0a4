//! Player controller module for vidplayer
//!
//! This module holds the playback state machine, moderation, search and
//! playlist management. The [`PlayerController`] is the single entry point;
//! everything it reports goes out as [`PlayerEvent`]s to the registered
//! [`PlayerEventHandler`]s, whose `Display` form is the status line shown to
//! the user.

mod command;
mod controller;
mod playlist;
mod selection;

pub use command::{Command, HELP_TEXT};
pub use controller::{PlayerController, PlayerControllerBuilder};
pub use playlist::{Playlist, EMPTY_PLAYLIST_LINE};
pub use selection::{
    resolve_selection, NoSelection, RandomSource, ResultSelector, SeededRandom, ThreadRandom,
};

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing is playing
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Playback paused
    Paused,
}

/// Player event for external event handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Number of videos in the catalog
    LibrarySize { count: usize },

    /// Every video in the catalog, rendered and sorted by title
    LibraryListing { videos: Vec<String> },

    /// Playback started
    PlaybackStarted { title: String },

    /// Playback stopped
    PlaybackStopped { title: String },

    /// Playback paused
    PlaybackPaused { title: String },

    /// Pause requested while already paused
    AlreadyPaused { title: String },

    /// Playback resumed
    PlaybackResumed { title: String },

    /// The current video, rendered
    NowPlaying { video: String, paused: bool },

    /// Nothing to show as currently playing
    NothingPlaying,

    /// A video was flagged
    VideoFlagged { title: String, reason: String },

    /// A flag was removed
    VideoAllowed { title: String },

    /// A playlist was created
    PlaylistCreated { name: String },

    /// A video was appended to a playlist
    VideoAdded { playlist: String, title: String },

    /// A video was removed from a playlist
    VideoRemoved { playlist: String, title: String },

    /// A playlist was emptied
    PlaylistCleared { playlist: String },

    /// A playlist was deleted
    PlaylistDeleted { playlist: String },

    /// Playlist names in display order
    PlaylistListing { names: Vec<String> },

    /// A playlist's rendered contents
    PlaylistContents { playlist: String, lines: Vec<String> },

    /// Numbered search results followed by the selection prompt
    SearchResults { query: String, results: Vec<String> },

    /// A search matched nothing
    NoSearchResults { query: String },

    /// A command failed; `context` names the command when it has one
    CommandFailed { context: Option<String>, reason: String },

    /// Usage text
    Help,
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerEvent::LibrarySize { count } => write!(f, "{} videos in the library", count),
            PlayerEvent::LibraryListing { videos } => {
                write!(f, "Here's a list of all available videos:")?;
                for video in videos {
                    write!(f, "\n{}", video)?;
                }
                Ok(())
            }
            PlayerEvent::PlaybackStarted { title } => write!(f, "Playing video: {}", title),
            PlayerEvent::PlaybackStopped { title } => write!(f, "Stopping video: {}", title),
            PlayerEvent::PlaybackPaused { title } => write!(f, "Pausing video: {}", title),
            PlayerEvent::AlreadyPaused { title } => write!(f, "Video already paused: {}", title),
            PlayerEvent::PlaybackResumed { title } => write!(f, "Continuing video: {}", title),
            PlayerEvent::NowPlaying { video, paused } => {
                write!(f, "Currently playing: {}", video)?;
                if *paused {
                    write!(f, " - PAUSED")?;
                }
                Ok(())
            }
            PlayerEvent::NothingPlaying => write!(f, "No video is currently playing"),
            PlayerEvent::VideoFlagged { title, reason } => {
                write!(f, "Successfully flagged video: {} (reason: {})", title, reason)
            }
            PlayerEvent::VideoAllowed { title } => {
                write!(f, "Successfully removed flag from video: {}", title)
            }
            PlayerEvent::PlaylistCreated { name } => {
                write!(f, "Successfully created new playlist: {}", name)
            }
            PlayerEvent::VideoAdded { playlist, title } => {
                write!(f, "Added video to {}: {}", playlist, title)
            }
            PlayerEvent::VideoRemoved { playlist, title } => {
                write!(f, "Removed video from {}: {}", playlist, title)
            }
            PlayerEvent::PlaylistCleared { playlist } => {
                write!(f, "Successfully removed all videos from {}", playlist)
            }
            PlayerEvent::PlaylistDeleted { playlist } => {
                write!(f, "Deleted playlist: {}", playlist)
            }
            PlayerEvent::PlaylistListing { names } => {
                if names.is_empty() {
                    return write!(f, "No playlists exist yet");
                }
                write!(f, "Showing all playlists:")?;
                for name in names {
                    write!(f, "\n{}", name)?;
                }
                Ok(())
            }
            PlayerEvent::PlaylistContents { playlist, lines } => {
                write!(f, "Showing playlist: {}", playlist)?;
                for line in lines {
                    write!(f, "\n{}", line)?;
                }
                Ok(())
            }
            PlayerEvent::SearchResults { query, results } => {
                write!(f, "Here are the results for {}:", query)?;
                for (i, result) in results.iter().enumerate() {
                    write!(f, "\n{}) {}", i + 1, result)?;
                }
                write!(
                    f,
                    "\nWould you like to play any of the above? If yes, specify the number of the video."
                )?;
                write!(f, "\nIf your answer is not a valid number, we will assume it's a no.")
            }
            PlayerEvent::NoSearchResults { query } => write!(f, "No search results for {}", query),
            PlayerEvent::CommandFailed { context, reason } => match context {
                Some(context) => write!(f, "{}: {}", context, reason),
                None => write!(f, "{}", reason),
            },
            PlayerEvent::Help => write!(f, "{}", HELP_TEXT),
        }
    }
}

/// Player event handler trait
pub trait PlayerEventHandler: Send {
    /// Handle player event
    ///
    /// # Arguments
    ///
    /// * `event` - Player event
    fn handle_event(&mut self, event: PlayerEvent);
}

/// Event handler that records every event it receives
///
/// Clones share the same record, so one clone can be handed to the
/// controller while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<PlayerEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in arrival order
    pub fn events(&self) -> Vec<PlayerEvent> {
        self.events.lock().clone()
    }

    /// Recorded events rendered as individual output lines
    pub fn lines(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .flat_map(|event| {
                event
                    .to_string()
                    .lines()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<PlayerEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl PlayerEventHandler for EventLog {
    fn handle_event(&mut self, event: PlayerEvent) {
        self.events.lock().push(event);
    }
}
