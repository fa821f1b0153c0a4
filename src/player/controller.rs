//! Player controller implementation for vidplayer
//!
//! This module provides the [`PlayerController`] that owns playback state
//! and the playlist collection, applies moderation, runs searches against the
//! [`VideoLibrary`] and reports every outcome as a [`PlayerEvent`].

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::library::{FlagChange, Video, VideoLibrary};
use crate::player::{
    resolve_selection, Command, PlaybackState, PlayerEvent, PlayerEventHandler, Playlist,
    RandomSource, ResultSelector, SeededRandom, ThreadRandom,
};
use crate::utils::error::{PlayerError, Result};
use crate::utils::{contains_ignore_case, eq_ignore_case, fold_case};

/// Internal playback state; the paused flag only exists alongside a video
#[derive(Debug, Clone, Default)]
enum Playback {
    #[default]
    Stopped,
    Playing(Arc<Video>),
    Paused(Arc<Video>),
}

impl Playback {
    fn video(&self) -> Option<&Arc<Video>> {
        match self {
            Playback::Stopped => None,
            Playback::Playing(video) | Playback::Paused(video) => Some(video),
        }
    }

    fn state(&self) -> PlaybackState {
        match self {
            Playback::Stopped => PlaybackState::Stopped,
            Playback::Playing(_) => PlaybackState::Playing,
            Playback::Paused(_) => PlaybackState::Paused,
        }
    }
}

/// Builder for a [`PlayerController`]
pub struct PlayerControllerBuilder {
    library: Arc<dyn VideoLibrary>,
    random: Box<dyn RandomSource>,
    event_handlers: Vec<Box<dyn PlayerEventHandler>>,
}

impl PlayerControllerBuilder {
    /// Create a new builder around a catalog
    pub fn new(library: Arc<dyn VideoLibrary>) -> Self {
        Self {
            library,
            random: Box::new(ThreadRandom),
            event_handlers: Vec::new(),
        }
    }

    /// Set the source used by random playback
    pub fn with_random_source(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Use a seeded generator for random playback
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_random_source(Box::new(SeededRandom::new(seed)))
    }

    /// Add an event handler
    pub fn with_event_handler(mut self, handler: Box<dyn PlayerEventHandler>) -> Self {
        self.event_handlers.push(handler);
        self
    }

    /// Build the controller
    pub fn build(self) -> PlayerController {
        PlayerController {
            library: self.library,
            playback: Playback::Stopped,
            playlists: BTreeMap::new(),
            random: self.random,
            event_handlers: self.event_handlers,
        }
    }
}

/// Main player controller implementation
pub struct PlayerController {
    library: Arc<dyn VideoLibrary>,
    playback: Playback,

    /// Keyed by case-folded name, which also gives the display order
    playlists: BTreeMap<String, Playlist>,

    random: Box<dyn RandomSource>,
    event_handlers: Vec<Box<dyn PlayerEventHandler>>,
}

impl PlayerController {
    /// Create a controller with a thread RNG and no event handlers
    pub fn new(library: Arc<dyn VideoLibrary>) -> Self {
        PlayerControllerBuilder::new(library).build()
    }

    /// Register an event handler
    pub fn add_event_handler(&mut self, handler: Box<dyn PlayerEventHandler>) {
        self.event_handlers.push(handler);
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Video currently playing or paused
    pub fn currently_playing(&self) -> Option<Arc<Video>> {
        self.playback.video().cloned()
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.playback, Playback::Paused(_))
    }

    /// Look up a playlist, ignoring case
    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(&fold_case(name))
    }

    /// Playlist names in display order
    pub fn playlist_names(&self) -> Vec<String> {
        self.playlists.values().map(|p| p.name().to_string()).collect()
    }

    /// Run one command, reporting any failure as a [`PlayerEvent::CommandFailed`]
    ///
    /// Returns [`ControlFlow::Break`] for `EXIT`.
    pub fn execute(
        &mut self,
        command: &Command,
        selector: &mut dyn ResultSelector,
    ) -> ControlFlow<()> {
        debug!("Executing {:?}", command);

        let result = match command {
            Command::NumberOfVideos => {
                self.number_of_videos();
                Ok(())
            }
            Command::ShowAllVideos => {
                self.show_all_videos();
                Ok(())
            }
            Command::Play { id } => self.play_video(id),
            Command::PlayRandom => self.play_random_video(),
            Command::Stop => self.stop_video(),
            Command::Pause => self.pause_video(),
            Command::Continue => self.continue_video(),
            Command::ShowPlaying => {
                self.show_playing();
                Ok(())
            }
            Command::CreatePlaylist { name } => self.create_playlist(name),
            Command::AddToPlaylist { name, id } => self.add_to_playlist(name, id),
            Command::RemoveFromPlaylist { name, id } => self.remove_from_playlist(name, id),
            Command::ClearPlaylist { name } => self.clear_playlist(name),
            Command::DeletePlaylist { name } => self.delete_playlist(name),
            Command::ShowAllPlaylists => {
                self.show_all_playlists();
                Ok(())
            }
            Command::ShowPlaylist { name } => self.show_playlist(name),
            Command::SearchVideos { term } => self.search_videos(term, selector),
            Command::SearchVideosWithTag { tag } => self.search_videos_tag(tag, selector),
            Command::FlagVideo { id, reason } => self.flag_video(id, reason.as_deref()),
            Command::AllowVideo { id } => self.allow_video(id),
            Command::Help => {
                self.send_event(PlayerEvent::Help);
                Ok(())
            }
            Command::Exit => return ControlFlow::Break(()),
        };

        if let Err(err) = result {
            self.report_failure(command.failure_context(), &err);
        }

        ControlFlow::Continue(())
    }

    /// Report a failure as a status line
    pub fn report_failure(&mut self, context: Option<String>, err: &PlayerError) {
        if err.is_command_failure() {
            warn!("Command failed: {}", err);
        } else {
            error!("Command failed: {}", err);
        }
        self.send_event(PlayerEvent::CommandFailed {
            context,
            reason: err.to_string(),
        });
    }

    pub fn number_of_videos(&mut self) {
        let count = self.library.get_all_videos().len();
        self.send_event(PlayerEvent::LibrarySize { count });
    }

    /// List every video, flagged ones included, sorted by title
    pub fn show_all_videos(&mut self) {
        let mut videos = self.library.get_all_videos();
        videos.sort_by(|a, b| a.title().cmp(b.title()));

        let videos = videos.iter().map(|v| v.to_string()).collect();
        self.send_event(PlayerEvent::LibraryListing { videos });
    }

    /// Play a video by id
    ///
    /// Anything already playing is stopped first, without a stop event, even
    /// when the requested video then turns out to be flagged.
    pub fn play_video(&mut self, id: &str) -> Result<()> {
        let video = self.lookup(id)?;

        if let Some(previous) = self.playback.video() {
            debug!("Replacing {} with {}", previous.id(), video.id());
        }
        self.playback = Playback::Stopped;

        if let Some(reason) = video.flag_reason() {
            return Err(PlayerError::VideoFlagged {
                id: video.id().to_string(),
                reason,
            });
        }

        info!("Playing video {}", video.id());
        let title = video.title().to_string();
        self.playback = Playback::Playing(video);
        self.send_event(PlayerEvent::PlaybackStarted { title });

        Ok(())
    }

    /// Stop the current video
    pub fn stop_video(&mut self) -> Result<()> {
        let video = match std::mem::take(&mut self.playback) {
            Playback::Stopped => return Err(PlayerError::NothingPlaying),
            Playback::Playing(video) | Playback::Paused(video) => video,
        };

        info!("Stopped video {}", video.id());
        self.send_event(PlayerEvent::PlaybackStopped {
            title: video.title().to_string(),
        });

        Ok(())
    }

    /// Play a uniformly chosen unflagged video
    pub fn play_random_video(&mut self) -> Result<()> {
        let candidates: Vec<Arc<Video>> = self
            .library
            .get_all_videos()
            .into_iter()
            .filter(|v| !v.is_flagged())
            .collect();

        if candidates.is_empty() {
            return Err(PlayerError::NoVideosAvailable);
        }

        let idx = self.random.pick(candidates.len()) % candidates.len();
        debug!("Random pick {} of {}", idx, candidates.len());
        self.play_video(candidates[idx].id())
    }

    /// Pause the current video
    ///
    /// Pausing a paused video reports it and changes nothing.
    pub fn pause_video(&mut self) -> Result<()> {
        let event = match &self.playback {
            Playback::Stopped => return Err(PlayerError::NothingPlaying),
            Playback::Paused(video) => PlayerEvent::AlreadyPaused {
                title: video.title().to_string(),
            },
            Playback::Playing(video) => {
                let video = Arc::clone(video);
                let title = video.title().to_string();
                self.playback = Playback::Paused(video);
                PlayerEvent::PlaybackPaused { title }
            }
        };

        self.send_event(event);
        Ok(())
    }

    /// Resume a paused video
    pub fn continue_video(&mut self) -> Result<()> {
        let video = match &self.playback {
            Playback::Stopped => return Err(PlayerError::NothingPlaying),
            Playback::Playing(_) => return Err(PlayerError::NotPaused),
            Playback::Paused(video) => Arc::clone(video),
        };

        let title = video.title().to_string();
        self.playback = Playback::Playing(video);
        self.send_event(PlayerEvent::PlaybackResumed { title });

        Ok(())
    }

    pub fn show_playing(&mut self) {
        let event = match self.playback.video() {
            Some(video) => PlayerEvent::NowPlaying {
                video: video.to_string(),
                paused: self.is_paused(),
            },
            None => PlayerEvent::NothingPlaying,
        };
        self.send_event(event);
    }

    /// Create an empty playlist
    pub fn create_playlist(&mut self, name: &str) -> Result<()> {
        let key = fold_case(name);
        if self.playlists.contains_key(&key) {
            return Err(PlayerError::DuplicatePlaylistName(name.to_string()));
        }

        info!("Created playlist {}", name);
        self.playlists.insert(key, Playlist::new(name));
        self.send_event(PlayerEvent::PlaylistCreated {
            name: name.to_string(),
        });

        Ok(())
    }

    /// Append a video to a playlist
    ///
    /// Checks run in order: playlist exists, video exists, video unflagged,
    /// video not already in the playlist.
    pub fn add_to_playlist(&mut self, name: &str, id: &str) -> Result<()> {
        let playlist = playlist_entry(&mut self.playlists, name)?;
        let video = find_video(self.library.as_ref(), id)?;

        if let Some(reason) = video.flag_reason() {
            return Err(PlayerError::VideoFlagged {
                id: video.id().to_string(),
                reason,
            });
        }

        let title = video.title().to_string();
        playlist.add_video(video)?;

        self.send_event(PlayerEvent::VideoAdded {
            playlist: name.to_string(),
            title,
        });

        Ok(())
    }

    /// Remove a video from a playlist
    ///
    /// Flagged videos can still be removed.
    pub fn remove_from_playlist(&mut self, name: &str, id: &str) -> Result<()> {
        let playlist = playlist_entry(&mut self.playlists, name)?;
        let video = find_video(self.library.as_ref(), id)?;
        playlist.remove_video(&video)?;

        self.send_event(PlayerEvent::VideoRemoved {
            playlist: name.to_string(),
            title: video.title().to_string(),
        });

        Ok(())
    }

    pub fn clear_playlist(&mut self, name: &str) -> Result<()> {
        playlist_entry(&mut self.playlists, name)?.clear();

        self.send_event(PlayerEvent::PlaylistCleared {
            playlist: name.to_string(),
        });

        Ok(())
    }

    pub fn delete_playlist(&mut self, name: &str) -> Result<()> {
        self.playlists
            .remove(&fold_case(name))
            .ok_or_else(|| PlayerError::PlaylistNotFound(name.to_string()))?;

        info!("Deleted playlist {}", name);
        self.send_event(PlayerEvent::PlaylistDeleted {
            playlist: name.to_string(),
        });

        Ok(())
    }

    pub fn show_all_playlists(&mut self) {
        let names = self.playlist_names();
        self.send_event(PlayerEvent::PlaylistListing { names });
    }

    pub fn show_playlist(&mut self, name: &str) -> Result<()> {
        let lines = self
            .playlist(name)
            .map(Playlist::render)
            .ok_or_else(|| PlayerError::PlaylistNotFound(name.to_string()))?;

        self.send_event(PlayerEvent::PlaylistContents {
            playlist: name.to_string(),
            lines,
        });

        Ok(())
    }

    /// Unflagged videos whose title contains `term`, sorted by title
    pub fn find_by_title(&self, term: &str) -> Vec<Arc<Video>> {
        let mut results: Vec<Arc<Video>> = self
            .library
            .get_all_videos()
            .into_iter()
            .filter(|v| !v.is_flagged() && contains_ignore_case(v.title(), term))
            .collect();

        results.sort_by_cached_key(|v| fold_case(v.title()));
        results
    }

    /// Unflagged videos carrying `tag`, in library order
    pub fn find_by_tag(&self, tag: &str) -> Vec<Arc<Video>> {
        self.library
            .get_all_videos()
            .into_iter()
            .filter(|v| !v.is_flagged() && v.tags().iter().any(|t| eq_ignore_case(t, tag)))
            .collect()
    }

    /// Search titles and offer to play one of the results
    pub fn search_videos(&mut self, term: &str, selector: &mut dyn ResultSelector) -> Result<()> {
        let results = self.find_by_title(term);
        self.offer_results(term, results, selector)
    }

    /// Search tags and offer to play one of the results
    pub fn search_videos_tag(
        &mut self,
        tag: &str,
        selector: &mut dyn ResultSelector,
    ) -> Result<()> {
        let results = self.find_by_tag(tag);
        self.offer_results(tag, results, selector)
    }

    /// Flag a video, stopping it first if it is the current one
    pub fn flag_video(&mut self, id: &str, reason: Option<&str>) -> Result<()> {
        let video = self.lookup(id)?;

        let is_current = self
            .playback
            .video()
            .map(|current| Arc::ptr_eq(current, &video))
            .unwrap_or(false);
        if is_current {
            self.stop_video()?;
        }

        if let FlagChange::Flagged { reason } = video.set_flagged(true, reason)? {
            self.send_event(PlayerEvent::VideoFlagged {
                title: video.title().to_string(),
                reason,
            });
        }

        Ok(())
    }

    /// Remove the flag from a video
    pub fn allow_video(&mut self, id: &str) -> Result<()> {
        let video = self.lookup(id)?;

        if video.set_flagged(false, None)? == FlagChange::Allowed {
            self.send_event(PlayerEvent::VideoAllowed {
                title: video.title().to_string(),
            });
        }

        Ok(())
    }

    fn offer_results(
        &mut self,
        query: &str,
        results: Vec<Arc<Video>>,
        selector: &mut dyn ResultSelector,
    ) -> Result<()> {
        if results.is_empty() {
            self.send_event(PlayerEvent::NoSearchResults {
                query: query.to_string(),
            });
            return Ok(());
        }

        self.send_event(PlayerEvent::SearchResults {
            query: query.to_string(),
            results: results.iter().map(|v| v.to_string()).collect(),
        });

        let choice = selector
            .select(results.len())
            .and_then(|choice| resolve_selection(choice, results.len()));

        match choice {
            Some(idx) => self.play_video(results[idx].id()),
            None => Ok(()),
        }
    }

    fn lookup(&self, id: &str) -> Result<Arc<Video>> {
        find_video(self.library.as_ref(), id)
    }

    fn send_event(&mut self, event: PlayerEvent) {
        for handler in &mut self.event_handlers {
            handler.handle_event(event.clone());
        }
    }
}

fn find_video(library: &dyn VideoLibrary, id: &str) -> Result<Arc<Video>> {
    library
        .get_video(id)
        .ok_or_else(|| PlayerError::VideoNotFound(id.to_string()))
}

/// Playlist matching `name` ignoring case
fn playlist_entry<'a>(
    playlists: &'a mut BTreeMap<String, Playlist>,
    name: &str,
) -> Result<&'a mut Playlist> {
    playlists
        .get_mut(&fold_case(name))
        .ok_or_else(|| PlayerError::PlaylistNotFound(name.to_string()))
}
