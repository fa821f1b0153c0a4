//! Integration tests for the vidplayer controller
//!
//! These tests drive the controller through parsed commands and check the
//! exact status lines it reports:
//! - Playback state machine
//! - Moderation and its interaction with playback
//! - Playlist management
//! - Search and result selection

use anyhow::Result;
use proptest::prelude::*;
use vidplayer::library::{InMemoryLibrary, VideoLibrary};
use vidplayer::player::{Command, NoSelection, PlaybackState};
use vidplayer::utils::PlayerError;
use vidplayer_integration_tests::{Harness, ScriptedAnswers, TestFixture, CATALOG_TEXT};

#[test]
fn test_catalog_formats_agree() -> Result<()> {
    let fixture = TestFixture::new()?;

    let text = InMemoryLibrary::load(&fixture.catalog_files.text)?;
    let json = InMemoryLibrary::load(&fixture.catalog_files.json)?;

    let render = |library: &InMemoryLibrary| -> Vec<String> {
        library.get_all_videos().iter().map(|v| v.to_string()).collect()
    };
    assert_eq!(render(&text), render(&json));
    assert_eq!(text.len(), 5);

    Ok(())
}

#[test]
fn test_broken_catalog_is_rejected() -> Result<()> {
    let fixture = TestFixture::new()?;
    let path = fixture.write("broken.txt", "Good | good_id | #a\nNo id here\n")?;

    let err = InMemoryLibrary::load(&path).unwrap_err();
    assert!(matches!(err, PlayerError::Library(_)));
    assert!(err.to_string().contains("Line 2"));

    Ok(())
}

#[test]
fn test_library_overview() -> Result<()> {
    let mut harness = Harness::new()?;
    let lines = harness.run(
        &["FLAG_VIDEO another_cat_video_id", "NUMBER_OF_VIDEOS", "SHOW_ALL_VIDEOS"],
        &mut ScriptedAnswers::none(),
    );

    assert_eq!(
        lines,
        [
            "Successfully flagged video: Another Cat Video (reason: Not supplied)",
            "5 videos in the library",
            "Here's a list of all available videos:",
            "Amazing Cats (amazing_cats_video_id) [#cat #animal]",
            "Another Cat Video (another_cat_video_id) [#cat #animal] - FLAGGED (reason: Not supplied)",
            "Funny Dogs (funny_dogs_video_id) [#dog #animal]",
            "Life at Google (life_at_google_video_id) [#google #career]",
            "Video about nothing (nothing_video_id) []",
        ]
    );

    Ok(())
}

#[test]
fn test_playback_session() -> Result<()> {
    let mut harness = Harness::new()?;
    let lines = harness.run(
        &[
            "STOP",
            "PAUSE",
            "CONTINUE",
            "PLAY amazing_cats_video_id",
            "CONTINUE",
            "PAUSE",
            "PAUSE",
            "SHOW_PLAYING",
            "CONTINUE",
            "PLAY funny_dogs_video_id",
            "STOP",
            "STOP",
            "SHOW_PLAYING",
        ],
        &mut ScriptedAnswers::none(),
    );

    assert_eq!(
        lines,
        [
            "Cannot stop video: No video is currently playing",
            "Cannot pause video: No video is currently playing",
            "Cannot continue video: No video is currently playing",
            "Playing video: Amazing Cats",
            "Cannot continue video: Video is not paused",
            "Pausing video: Amazing Cats",
            "Video already paused: Amazing Cats",
            "Currently playing: Amazing Cats (amazing_cats_video_id) [#cat #animal] - PAUSED",
            "Continuing video: Amazing Cats",
            "Playing video: Funny Dogs",
            "Stopping video: Funny Dogs",
            "Cannot stop video: No video is currently playing",
            "No video is currently playing",
        ]
    );
    assert_eq!(harness.player.state(), PlaybackState::Stopped);

    Ok(())
}

#[test]
fn test_flag_then_play_leaves_player_stopped() -> Result<()> {
    let mut harness = Harness::new()?;
    let lines = harness.run(
        &[
            "PLAY funny_dogs_video_id",
            "FLAG_VIDEO amazing_cats_video_id dont_like_cats",
            "FLAG_VIDEO amazing_cats_video_id",
            "PLAY amazing_cats_video_id",
            "SHOW_PLAYING",
            "ALLOW_VIDEO amazing_cats_video_id",
            "ALLOW_VIDEO amazing_cats_video_id",
            "PLAY amazing_cats_video_id",
        ],
        &mut ScriptedAnswers::none(),
    );

    assert_eq!(
        lines,
        [
            "Playing video: Funny Dogs",
            "Successfully flagged video: Amazing Cats (reason: dont_like_cats)",
            "Cannot flag video: Video is already flagged",
            "Cannot play video: Video is currently flagged (reason: dont_like_cats)",
            "No video is currently playing",
            "Successfully removed flag from video: Amazing Cats",
            "Cannot remove flag from video: Video is not flagged",
            "Playing video: Amazing Cats",
        ]
    );

    Ok(())
}

#[test]
fn test_flagging_the_playing_video() -> Result<()> {
    let mut harness = Harness::new()?;
    let lines = harness.run(
        &[
            "PLAY amazing_cats_video_id",
            "PAUSE",
            "FLAG_VIDEO amazing_cats_video_id not for kids",
            "SHOW_PLAYING",
        ],
        &mut ScriptedAnswers::none(),
    );

    assert_eq!(
        lines,
        [
            "Playing video: Amazing Cats",
            "Pausing video: Amazing Cats",
            "Stopping video: Amazing Cats",
            "Successfully flagged video: Amazing Cats (reason: not for kids)",
            "No video is currently playing",
        ]
    );

    Ok(())
}

#[test]
fn test_play_random_skips_flagged() -> Result<()> {
    let mut harness = Harness::with_catalog("One | one |\nTwo | two |\n")?;
    let lines = harness.run(
        &["FLAG_VIDEO one", "PLAY_RANDOM", "FLAG_VIDEO two", "PLAY_RANDOM"],
        &mut ScriptedAnswers::none(),
    );

    assert_eq!(
        lines,
        [
            "Successfully flagged video: One (reason: Not supplied)",
            "Playing video: Two",
            "Stopping video: Two",
            "Successfully flagged video: Two (reason: Not supplied)",
            "No videos available",
        ]
    );

    Ok(())
}

#[test]
fn test_playlist_session() -> Result<()> {
    let mut harness = Harness::new()?;
    let lines = harness.run(
        &[
            "SHOW_ALL_PLAYLISTS",
            "CREATE_PLAYLIST my_PLAYlist",
            "CREATE_PLAYLIST MY_playlist",
            "CREATE_PLAYLIST another_playlist",
            "SHOW_ALL_PLAYLISTS",
            "ADD_TO_PLAYLIST my_playlist amazing_cats_video_id",
            "ADD_TO_PLAYLIST MY_PLAYLIST amazing_cats_video_id",
            "ADD_TO_PLAYLIST my_playlist missing_id",
            "ADD_TO_PLAYLIST nope amazing_cats_video_id",
            "ADD_TO_PLAYLIST my_playlist funny_dogs_video_id",
            "SHOW_PLAYLIST my_playlist",
            "REMOVE_FROM_PLAYLIST my_playlist amazing_cats_video_id",
            "REMOVE_FROM_PLAYLIST my_playlist amazing_cats_video_id",
            "CLEAR_PLAYLIST my_playlist",
            "SHOW_PLAYLIST my_playlist",
            "DELETE_PLAYLIST my_playlist",
            "DELETE_PLAYLIST my_playlist",
            "SHOW_PLAYLIST my_playlist",
            "SHOW_ALL_PLAYLISTS",
        ],
        &mut ScriptedAnswers::none(),
    );

    assert_eq!(
        lines,
        [
            "No playlists exist yet",
            "Successfully created new playlist: my_PLAYlist",
            "Cannot create playlist: A playlist with the same name already exists",
            "Successfully created new playlist: another_playlist",
            "Showing all playlists:",
            "another_playlist",
            "my_PLAYlist",
            "Added video to my_playlist: Amazing Cats",
            "Cannot add video to MY_PLAYLIST: Video already added",
            "Cannot add video to my_playlist: Video does not exist",
            "Cannot add video to nope: Playlist does not exist",
            "Added video to my_playlist: Funny Dogs",
            "Showing playlist: my_playlist",
            "Amazing Cats (amazing_cats_video_id) [#cat #animal]",
            "Funny Dogs (funny_dogs_video_id) [#dog #animal]",
            "Removed video from my_playlist: Amazing Cats",
            "Cannot remove video from my_playlist: Video is not in playlist",
            "Successfully removed all videos from my_playlist",
            "Showing playlist: my_playlist",
            "No videos here yet",
            "Deleted playlist: my_playlist",
            "Cannot delete playlist my_playlist: Playlist does not exist",
            "Cannot show playlist my_playlist: Playlist does not exist",
            "Showing all playlists:",
            "another_playlist",
        ]
    );

    Ok(())
}

#[test]
fn test_flagged_video_in_playlist() -> Result<()> {
    let mut harness = Harness::new()?;
    let lines = harness.run(
        &[
            "CREATE_PLAYLIST my_playlist",
            "FLAG_VIDEO funny_dogs_video_id dont_like_dogs",
            "ADD_TO_PLAYLIST my_playlist funny_dogs_video_id",
            "ADD_TO_PLAYLIST my_playlist amazing_cats_video_id",
            "FLAG_VIDEO amazing_cats_video_id dont_like_cats",
            "SHOW_PLAYLIST my_playlist",
            "REMOVE_FROM_PLAYLIST my_playlist amazing_cats_video_id",
        ],
        &mut ScriptedAnswers::none(),
    );

    assert_eq!(
        lines,
        [
            "Successfully created new playlist: my_playlist",
            "Successfully flagged video: Funny Dogs (reason: dont_like_dogs)",
            "Cannot add video to my_playlist: Video is currently flagged (reason: dont_like_dogs)",
            "Added video to my_playlist: Amazing Cats",
            "Successfully flagged video: Amazing Cats (reason: dont_like_cats)",
            "Showing playlist: my_playlist",
            "Amazing Cats (amazing_cats_video_id) [#cat #animal] - FLAGGED (reason: dont_like_cats)",
            "Removed video from my_playlist: Amazing Cats",
        ]
    );

    Ok(())
}

#[test]
fn test_search_by_title_and_play() -> Result<()> {
    let mut harness = Harness::new()?;
    let mut answers = ScriptedAnswers::new([Some(2)]);
    let lines = harness.run(&["SEARCH_VIDEOS cAt"], &mut answers);

    assert_eq!(
        lines,
        [
            "Here are the results for cAt:",
            "1) Amazing Cats (amazing_cats_video_id) [#cat #animal]",
            "2) Another Cat Video (another_cat_video_id) [#cat #animal]",
            "Would you like to play any of the above? If yes, specify the number of the video.",
            "If your answer is not a valid number, we will assume it's a no.",
            "Playing video: Another Cat Video",
        ]
    );
    assert_eq!(answers.prompts, [2]);

    Ok(())
}

#[test]
fn test_search_declined_or_empty() -> Result<()> {
    let mut harness = Harness::new()?;
    let mut answers = ScriptedAnswers::new([None, Some(7)]);
    let lines = harness.run(
        &["SEARCH_VIDEOS google", "SEARCH_VIDEOS_WITH_TAG #dog", "SEARCH_VIDEOS blah"],
        &mut answers,
    );

    assert_eq!(lines.last().unwrap(), "No search results for blah");
    assert!(!lines.iter().any(|l| l.starts_with("Playing video")));
    // No prompt for an empty result set
    assert_eq!(answers.prompts, [1, 1]);

    Ok(())
}

#[test]
fn test_search_by_tag_keeps_library_order() -> Result<()> {
    // Library order is deliberately not title order
    let mut harness =
        Harness::with_catalog("Zulu | a1 | fun , blog\nAlpha | b1 | FUN\nMid | c1 | other\n")?;
    let lines = harness.run(&["SEARCH_VIDEOS_WITH_TAG fun"], &mut ScriptedAnswers::none());

    assert_eq!(
        lines[..3],
        [
            "Here are the results for fun:",
            "1) Zulu (a1) [fun blog]",
            "2) Alpha (b1) [FUN]",
        ]
    );

    let titles: Vec<String> = harness
        .player
        .find_by_title("L")
        .iter()
        .map(|v| v.title().to_string())
        .collect();
    assert_eq!(titles, ["Alpha", "Zulu"]);

    Ok(())
}

#[test]
fn test_search_excludes_flagged() -> Result<()> {
    let mut harness = Harness::new()?;
    let lines = harness.run(
        &[
            "FLAG_VIDEO amazing_cats_video_id",
            "FLAG_VIDEO another_cat_video_id",
            "SEARCH_VIDEOS_WITH_TAG #CAT",
            "SEARCH_VIDEOS cat",
        ],
        &mut ScriptedAnswers::none(),
    );

    assert_eq!(lines[2..], ["No search results for #CAT", "No search results for cat"]);

    Ok(())
}

#[test]
fn test_search_selection_zero_picks_last() -> Result<()> {
    let mut harness = Harness::new()?;
    let mut answers = ScriptedAnswers::new([Some(0)]);
    let lines = harness.run(&["SEARCH_VIDEOS_WITH_TAG #animal"], &mut answers);

    assert_eq!(lines.last().unwrap(), "Playing video: Another Cat Video");

    Ok(())
}

#[test]
fn test_help_and_exit() -> Result<()> {
    let mut harness = Harness::new()?;
    let lines = harness.run(&["HELP"], &mut ScriptedAnswers::none());
    assert!(lines[0].starts_with("Available commands:"));

    let exit = "EXIT".parse::<Command>()?;
    assert!(harness.player.execute(&exit, &mut NoSelection).is_break());

    Ok(())
}

proptest! {
    #[test]
    fn test_unknown_ids_change_nothing(id in "[a-z_]{1,24}") {
        let mut harness = Harness::new().unwrap();
        let known = InMemoryLibrary::parse_text(CATALOG_TEXT).unwrap();
        prop_assume!(known.get_video(&id).is_none());

        harness.player.create_playlist("list").unwrap();
        harness.player.play_video("funny_dogs_video_id").unwrap();

        prop_assert!(matches!(harness.player.play_video(&id), Err(PlayerError::VideoNotFound(_))));
        prop_assert!(matches!(
            harness.player.flag_video(&id, None),
            Err(PlayerError::VideoNotFound(_))
        ));
        prop_assert!(matches!(harness.player.allow_video(&id), Err(PlayerError::VideoNotFound(_))));
        prop_assert!(matches!(
            harness.player.add_to_playlist("list", &id),
            Err(PlayerError::VideoNotFound(_))
        ));

        prop_assert_eq!(harness.player.state(), PlaybackState::Playing);
        let current = harness.player.currently_playing().map(|v| v.id().to_string());
        prop_assert_eq!(current.as_deref(), Some("funny_dogs_video_id"));
        prop_assert!(harness.player.playlist("list").unwrap().is_empty());
    }

    #[test]
    fn test_play_then_stop_always_stops(idx in 0usize..5) {
        let mut harness = Harness::new().unwrap();
        let library = InMemoryLibrary::parse_text(CATALOG_TEXT).unwrap();
        let video = library.get_all_videos()[idx].id().to_string();

        harness.player.play_video(&video).unwrap();
        harness.player.stop_video().unwrap();

        prop_assert_eq!(harness.player.state(), PlaybackState::Stopped);
        prop_assert!(harness.player.currently_playing().is_none());
    }
}
