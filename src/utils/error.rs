//! Error types for vidplayer
//!
//! This module defines the error type shared by the catalog, the player
//! controller and the command parser. Command failures are ordinary values:
//! the controller reports them as status lines and carries on. The remaining
//! variants cover startup (catalog loading, configuration and file access).

use thiserror::Error;

/// Main error type for vidplayer
#[derive(Error, Debug)]
pub enum PlayerError {
    /// No video with the given id exists in the library
    #[error("Video does not exist")]
    VideoNotFound(String),

    /// The video is flagged and cannot be played or added to a playlist
    #[error("Video is currently flagged (reason: {reason})")]
    VideoFlagged { id: String, reason: String },

    /// A playback command needs a current video but nothing is playing
    #[error("No video is currently playing")]
    NothingPlaying,

    /// Continue was requested while the current video is playing
    #[error("Video is not paused")]
    NotPaused,

    /// The video already carries a flag
    #[error("Video is already flagged")]
    AlreadyFlagged,

    /// The video carries no flag to remove
    #[error("Video is not flagged")]
    NotFlagged,

    /// No playlist matches the given name
    #[error("Playlist does not exist")]
    PlaylistNotFound(String),

    /// A playlist with the same name (ignoring case) already exists
    #[error("A playlist with the same name already exists")]
    DuplicatePlaylistName(String),

    /// The video is already part of the playlist
    #[error("Video already added")]
    DuplicateVideo,

    /// The video is not part of the playlist
    #[error("Video is not in playlist")]
    NotInPlaylist,

    /// Every video in the library is flagged
    #[error("No videos available")]
    NoVideosAvailable,

    /// Catalog loading errors
    #[error("Library error: {0}")]
    Library(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PlayerError {
    /// Create a library error from string
    pub fn library_error<S: Into<String>>(msg: S) -> Self {
        PlayerError::Library(msg.into())
    }

    /// Whether this error is an expected command outcome rather than a
    /// startup failure
    pub fn is_command_failure(&self) -> bool {
        !matches!(
            self,
            PlayerError::Library(_)
                | PlayerError::Config(_)
                | PlayerError::FileIO(_)
                | PlayerError::InvalidInput(_)
        )
    }
}

/// Convenience type alias for Results in vidplayer
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Extension trait for converting other errors to PlayerError
pub trait IntoPlayerError<T> {
    /// Convert this error into a PlayerError with the given context
    fn library_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoPlayerError<T> for std::result::Result<T, E> {
    fn library_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Library(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Config(format!("{}: {}", context, e)))
    }
}
