//! Utility module for vidplayer
//!
//! This module provides common utilities used throughout the application:
//! - Error handling with a custom error type
//! - Configuration management
//! - Case-insensitive text helpers shared by search and playlists

pub mod config;
pub mod error;

pub use config::{Config, GeneralConfig, LibraryConfig};
pub use error::{PlayerError, Result};

use std::path::Path;

/// Initialize the application configuration
///
/// Loads configuration from:
/// 1. Default values
/// 2. System configuration file
/// 3. User configuration file
/// 4. The explicitly requested file
/// 5. Environment variables
///
/// # Returns
///
/// Returns the loaded configuration or an error if loading fails
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    Config::load(explicit)
}

/// Fold text for case-insensitive comparison
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Compare two strings ignoring case
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

/// Check whether `haystack` contains `needle`, ignoring case
///
/// An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    fold_case(haystack).contains(&fold_case(needle))
}
