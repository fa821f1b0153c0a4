//! Command-line parsing for the player
//!
//! Each input line is one command: a case-insensitive keyword followed by
//! whitespace-separated arguments.

use std::str::FromStr;

use crate::utils::error::PlayerError;

const INVALID_COMMAND: &str =
    "Please enter a valid command, type HELP for a list of available commands.";

/// Usage text printed by `HELP`
pub const HELP_TEXT: &str = "Available commands:
    NUMBER_OF_VIDEOS - Shows how many videos are in the library.
    SHOW_ALL_VIDEOS - Lists all videos from the library.
    PLAY <video_id> - Plays specified video.
    PLAY_RANDOM - Plays a random video from the library.
    STOP - Stop the current video.
    PAUSE - Pause the current video.
    CONTINUE - Resume the current paused video.
    SHOW_PLAYING - Displays the title, video_id, video tags and paused status of the video that is currently playing (or paused).
    CREATE_PLAYLIST <playlist_name> - Creates a new (empty) playlist with the provided name.
    ADD_TO_PLAYLIST <playlist_name> <video_id> - Adds the requested video to the playlist.
    REMOVE_FROM_PLAYLIST <playlist_name> <video_id> - Removes the specified video from the specified playlist
    CLEAR_PLAYLIST <playlist_name> - Removes all videos from the playlist.
    DELETE_PLAYLIST <playlist_name> - Deletes the playlist.
    SHOW_PLAYLIST <playlist_name> - List all the videos in this playlist.
    SHOW_ALL_PLAYLISTS - Display all the available playlists.
    SEARCH_VIDEOS <search_term> - Display all the videos whose titles contain the search_term.
    SEARCH_VIDEOS_WITH_TAG <tag_name> - Display all videos whose tags contains the provided tag.
    FLAG_VIDEO <video_id> <flag_reason> - Mark a video as flagged.
    ALLOW_VIDEO <video_id> - Removes a flag from a video.
    HELP - Displays help.
    EXIT - Terminates the program execution.";

/// A parsed player command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NumberOfVideos,
    ShowAllVideos,
    Play { id: String },
    PlayRandom,
    Stop,
    Pause,
    Continue,
    ShowPlaying,
    CreatePlaylist { name: String },
    AddToPlaylist { name: String, id: String },
    RemoveFromPlaylist { name: String, id: String },
    ClearPlaylist { name: String },
    DeletePlaylist { name: String },
    ShowAllPlaylists,
    ShowPlaylist { name: String },
    SearchVideos { term: String },
    SearchVideosWithTag { tag: String },
    FlagVideo { id: String, reason: Option<String> },
    AllowVideo { id: String },
    Help,
    Exit,
}

impl Command {
    /// Prefix used when reporting a failure of this command
    ///
    /// Playlist contexts echo the name as the user typed it.
    pub fn failure_context(&self) -> Option<String> {
        let context = match self {
            Command::Play { .. }
            | Command::SearchVideos { .. }
            | Command::SearchVideosWithTag { .. } => "Cannot play video".to_string(),
            Command::Stop => "Cannot stop video".to_string(),
            Command::Pause => "Cannot pause video".to_string(),
            Command::Continue => "Cannot continue video".to_string(),
            Command::CreatePlaylist { .. } => "Cannot create playlist".to_string(),
            Command::AddToPlaylist { name, .. } => format!("Cannot add video to {}", name),
            Command::RemoveFromPlaylist { name, .. } => {
                format!("Cannot remove video from {}", name)
            }
            Command::ClearPlaylist { name } => format!("Cannot clear playlist {}", name),
            Command::DeletePlaylist { name } => format!("Cannot delete playlist {}", name),
            Command::ShowPlaylist { name } => format!("Cannot show playlist {}", name),
            Command::FlagVideo { .. } => "Cannot flag video".to_string(),
            Command::AllowVideo { .. } => "Cannot remove flag from video".to_string(),
            Command::NumberOfVideos
            | Command::ShowAllVideos
            | Command::PlayRandom
            | Command::ShowPlaying
            | Command::ShowAllPlaylists
            | Command::Help
            | Command::Exit => return None,
        };

        Some(context)
    }
}

impl FromStr for Command {
    type Err = PlayerError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((keyword, args)) = parts.split_first() else {
            return Err(invalid());
        };
        let keyword = keyword.to_uppercase();
        let owned = |s: &&str| s.to_string();

        let command = match (keyword.as_str(), args) {
            ("NUMBER_OF_VIDEOS", []) => Command::NumberOfVideos,
            ("SHOW_ALL_VIDEOS", []) => Command::ShowAllVideos,
            ("PLAY", [id]) => Command::Play { id: owned(id) },
            ("PLAY_RANDOM", []) => Command::PlayRandom,
            ("STOP", []) => Command::Stop,
            ("PAUSE", []) => Command::Pause,
            ("CONTINUE", []) => Command::Continue,
            ("SHOW_PLAYING", []) => Command::ShowPlaying,
            ("CREATE_PLAYLIST", [name]) => Command::CreatePlaylist { name: owned(name) },
            ("ADD_TO_PLAYLIST", [name, id]) => Command::AddToPlaylist {
                name: owned(name),
                id: owned(id),
            },
            ("REMOVE_FROM_PLAYLIST", [name, id]) => Command::RemoveFromPlaylist {
                name: owned(name),
                id: owned(id),
            },
            ("CLEAR_PLAYLIST", [name]) => Command::ClearPlaylist { name: owned(name) },
            ("DELETE_PLAYLIST", [name]) => Command::DeletePlaylist { name: owned(name) },
            ("SHOW_ALL_PLAYLISTS", []) => Command::ShowAllPlaylists,
            ("SHOW_PLAYLIST", [name]) => Command::ShowPlaylist { name: owned(name) },
            ("SEARCH_VIDEOS", [term]) => Command::SearchVideos { term: owned(term) },
            ("SEARCH_VIDEOS_WITH_TAG", [tag]) => Command::SearchVideosWithTag { tag: owned(tag) },
            ("FLAG_VIDEO", [id, reason @ ..]) => Command::FlagVideo {
                id: owned(id),
                reason: (!reason.is_empty()).then(|| reason.join(" ")),
            },
            ("ALLOW_VIDEO", [id]) => Command::AllowVideo { id: owned(id) },
            ("HELP", []) => Command::Help,
            ("EXIT", []) => Command::Exit,
            _ => return Err(invalid()),
        };

        Ok(command)
    }
}

fn invalid() -> PlayerError {
    PlayerError::InvalidInput(INVALID_COMMAND.to_string())
}
