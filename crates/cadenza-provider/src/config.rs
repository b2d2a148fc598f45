use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Regional "top 50" playlist used as the candidate pool.
pub const DEFAULT_TOP_TRACKS_PLAYLIST: &str = "37i9dQZEVXbKqiTGXuCOsB";

/// Configuration for cadenza.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CADENZA_* prefix)
/// 3. Config file (~/.config/cadenza/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spotify application client id.
    ///
    /// Can be set via:
    /// - ENV: CADENZA_SPOTIFY_CLIENT_ID
    /// - Config: spotify_client_id = "..."
    #[serde(default)]
    pub spotify_client_id: Option<String>,

    /// Spotify application client secret.
    ///
    /// Can be set via:
    /// - ENV: CADENZA_SPOTIFY_CLIENT_SECRET
    /// - Config: spotify_client_secret = "..."
    #[serde(default)]
    pub spotify_client_secret: Option<String>,

    /// Market (ISO 3166-1 alpha-2) used for playlist lookups.
    #[serde(default = "default_market")]
    pub market: String,

    /// Preferred language for names, sent as `Accept-Language`.
    #[serde(default = "default_language")]
    pub language: Option<String>,

    /// Playlist whose tracks form the candidate pool.
    #[serde(default = "default_playlist")]
    pub top_tracks_playlist_id: String,

    /// Maximum number of playlist tracks fetched.
    #[serde(default = "default_top_tracks_limit")]
    pub top_tracks_limit: u32,

    /// Maximum number of an artist's albums searched for a song.
    #[serde(default = "default_album_limit")]
    pub album_limit: u32,

    /// Number of similar tracks returned.
    #[serde(default = "default_similar_count")]
    pub similar_count: usize,

    /// Per-request timeout for provider calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Client-side cap on provider requests per second.
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Logger settings.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_client_secret: None,
            market: default_market(),
            language: default_language(),
            top_tracks_playlist_id: default_playlist(),
            top_tracks_limit: default_top_tracks_limit(),
            album_limit: default_album_limit(),
            similar_count: default_similar_count(),
            request_timeout_secs: default_request_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/cadenza/config.toml
    /// Reads environment variables with CADENZA_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from an explicit file path plus environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("cadenza");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        log::debug!("Loaded configuration from {}", config_path.display());

        Ok(config)
    }

    /// Whether both Spotify credentials are present.
    pub fn has_credentials(&self) -> bool {
        self.spotify_client_id.is_some() && self.spotify_client_secret.is_some()
    }
}

fn default_market() -> String {
    String::from("JP")
}

#[allow(clippy::unnecessary_wraps)]
fn default_language() -> Option<String> {
    Some(String::from("ja"))
}

fn default_playlist() -> String {
    String::from(DEFAULT_TOP_TRACKS_PLAYLIST)
}

fn default_top_tracks_limit() -> u32 {
    50
}

fn default_album_limit() -> u32 {
    15
}

fn default_similar_count() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    10
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/cadenza/config.toml
/// - macOS: ~/Library/Application Support/cadenza/config.toml
/// - Windows: %APPDATA%\cadenza\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cadenza")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Cadenza Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CADENZA_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Spotify application credentials (client-credentials flow)
# Create an app at: https://developer.spotify.com/dashboard
#
# Can also be set via:
# - Environment: CADENZA_SPOTIFY_CLIENT_ID / CADENZA_SPOTIFY_CLIENT_SECRET
spotify_client_id = "your-client-id-here"
spotify_client_secret = "your-client-secret-here"

# Market used when listing the top tracks playlist
market = "JP"

# Language for artist and track names
language = "ja"

# Playlist whose tracks are the candidates for similarity ranking
top_tracks_playlist_id = "37i9dQZEVXbKqiTGXuCOsB"
top_tracks_limit = 50

# How many of an artist's albums are searched for a song
album_limit = 15

# How many similar tracks to show
similar_count = 5

# Provider request timeout (seconds) and client-side rate limit
request_timeout_secs = 30
requests_per_second = 10
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

/// Create the example config file at `config_path` if it doesn't exist.
pub fn ensure_config_file_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
