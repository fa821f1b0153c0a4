//! vidplayer - an in-memory video catalog with playback, moderation and
//! playlists
//!
//! The [`player::PlayerController`] is the entry point. It is built around a
//! read-only [`library::VideoLibrary`] and reports every outcome as a
//! [`player::PlayerEvent`] to the registered handlers.
//!
//! ```
//! use std::sync::Arc;
//! use vidplayer::library::InMemoryLibrary;
//! use vidplayer::player::{EventLog, PlayerControllerBuilder};
//!
//! let library = Arc::new(InMemoryLibrary::bundled().unwrap());
//! let log = EventLog::new();
//! let mut player = PlayerControllerBuilder::new(library)
//!     .with_event_handler(Box::new(log.clone()))
//!     .build();
//!
//! player.play_video("funny_dogs_video_id").unwrap();
//! assert_eq!(log.lines(), ["Playing video: Funny Dogs"]);
//! ```

pub mod library;
pub mod player;
pub mod utils;
