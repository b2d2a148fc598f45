use anyhow::Result;
use cadenza_provider::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    println!(
        "File exists: {}\n",
        if config_path.exists() {
            "yes"
        } else {
            "no (using defaults)"
        }
    );

    println!(
        "Spotify credentials: {}\n",
        if config.has_credentials() {
            "configured"
        } else {
            "missing (set spotify_client_id and spotify_client_secret)"
        }
    );

    println!("Settings:");
    println!(
        "  spotify_client_id: {}",
        config.spotify_client_id.as_deref().unwrap_or("<not set>")
    );
    println!(
        "  spotify_client_secret: {}",
        if config.spotify_client_secret.is_some() {
            "<set>"
        } else {
            "<not set>"
        }
    );
    println!("  market: {}", config.market);
    println!(
        "  language: {}",
        config.language.as_deref().unwrap_or("<not set>")
    );
    println!("  top_tracks_playlist_id: {}", config.top_tracks_playlist_id);
    println!("  top_tracks_limit: {}", config.top_tracks_limit);
    println!("  album_limit: {}", config.album_limit);
    println!("  similar_count: {}", config.similar_count);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);
    println!("  requests_per_second: {}", config.requests_per_second);
    println!("  logging: {}", serde_json::to_string(&config.logging)?);

    println!("\nPriority: CLI args > ENV vars (CADENZA_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to add your Spotify credentials.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
