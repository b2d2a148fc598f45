pub mod features;
pub mod ids;
pub mod pool;
pub mod track;

pub use features::FeatureVector;
pub use ids::{AlbumId, ArtistId, TrackId};
pub use pool::CandidatePool;
pub use track::{AlbumRef, ArtistRef, Track};
