use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use cadenza_provider::{Config, RecommendSettings, Recommender, SpotifyClient};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "cadenza", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Market for playlist lookups, e.g. JP or US (default: from config)
    #[arg(long, global = true)]
    market: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List the current top tracks
    ///
    /// Shows the configured regional top tracks playlist in chart order.
    /// These tracks are the candidates `similar` ranks against.
    TopTracks {
        /// Maximum number of tracks to list
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Find top tracks that sound like a song
    ///
    /// Looks up the first artist matching ARTIST, searches their albums for
    /// a track whose title contains SONG, and ranks the top tracks by how
    /// close their audio features are (danceability, energy,
    /// instrumentalness, loudness, speechiness, valence) using cosine
    /// similarity.
    ///
    /// If the song cannot be found, the top tracks are shown instead.
    Similar {
        /// Artist to search for
        artist: String,

        /// Part of the song title
        #[arg(long, short)]
        song: Option<String>,

        /// How many similar tracks to show (default: from config)
        #[arg(short = 'k', long = "count")]
        count: Option<usize>,
    },
    /// Show audio feature vectors for tracks
    Features {
        /// Spotify track ids
        #[arg(required = true)]
        track_ids: Vec<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn init_logging(config: &Config) -> Result<()> {
    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {:?}", e))?;
    Ok(())
}

fn connect(config: &Config) -> Result<Recommender> {
    let client = SpotifyClient::from_config(config).context("Failed to create Spotify client")?;
    Ok(Recommender::new(
        Arc::new(client),
        RecommendSettings::from(config),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(market) = cli.market {
        config.market = market;
    }
    init_logging(&config)?;

    match cli.command {
        Commands::TopTracks { limit } => {
            if let Some(limit) = limit {
                config.top_tracks_limit = limit;
            }
            let recommender = connect(&config)?;
            commands::run_top_tracks(&recommender, cli.json).await?;
        }
        Commands::Similar {
            artist,
            song,
            count,
        } => {
            let k = count.unwrap_or(config.similar_count);
            let recommender = connect(&config)?;
            commands::run_similar(&recommender, &artist, song.as_deref(), k, cli.json).await?;
        }
        Commands::Features { track_ids } => {
            let recommender = connect(&config)?;
            commands::run_features(&recommender, &track_ids, cli.json).await?;
        }
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
