pub mod config;
pub mod features;
pub mod similar;
pub mod top_tracks;

pub use features::run_features;
pub use similar::run_similar;
pub use top_tracks::run_top_tracks;
