//! Song lookup by artist and title fragment.

use cadenza_core::Track;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::MetadataProvider;

/// Find a song by an artist.
///
/// Uses the first artist matching `artist_query`, walks up to
/// `album_limit` of their albums in provider order, and returns the first
/// track whose name contains `song_query` (case-insensitive).
///
/// # Errors
/// [`ProviderError::NotFound`] when either query is empty or nothing
/// matches; any provider failure otherwise.
pub async fn find_song(
    provider: &dyn MetadataProvider,
    artist_query: &str,
    song_query: &str,
    album_limit: u32,
) -> ProviderResult<Track> {
    let artist_query = artist_query.trim();
    let song_query = song_query.trim();
    if artist_query.is_empty() {
        return Err(ProviderError::not_found("artist", artist_query));
    }
    if song_query.is_empty() {
        return Err(ProviderError::not_found("song", song_query));
    }

    let artist = provider.search_artist(artist_query).await?;
    log::debug!("Resolved artist '{}' to {} ({})", artist_query, artist.name, artist.id);

    let albums = provider.list_albums(&artist.id, album_limit).await?;
    for album in &albums {
        let tracks = provider.list_tracks(&album.id).await?;
        if let Some(track) = tracks.into_iter().find(|t| t.name_contains(song_query)) {
            log::debug!("Found '{}' on album {}", track.name, album.name);
            return Ok(track);
        }
    }

    Err(ProviderError::not_found(
        "song",
        format!("{song_query} by {}", artist.name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryProvider;
    use cadenza_core::{AlbumRef, ArtistRef};

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new().with_artist(
            ArtistRef::new("ar1", "Aimyon"),
            vec![
                (
                    AlbumRef::new("al1", "Heard That There's Good Pasta"),
                    vec![Track::new("t1", "Haru no Hi"), Track::new("t2", "Marigold")],
                ),
                (
                    AlbumRef::new("al2", "Momentary Sixth Sense"),
                    vec![Track::new("t3", "Marigold (Live)")],
                ),
            ],
        )
    }

    #[tokio::test]
    async fn test_find_song_first_match_in_album_order() {
        let track = find_song(&provider(), "aimyon", "MARIGOLD", 15).await.unwrap();
        assert_eq!(track.id.as_str(), "t2");
    }

    #[tokio::test]
    async fn test_find_song_respects_album_limit() {
        let err = find_song(&provider(), "aimyon", "live", 1).await.unwrap_err();
        assert!(err.is_not_found());

        let track = find_song(&provider(), "aimyon", "live", 2).await.unwrap();
        assert_eq!(track.id.as_str(), "t3");
    }

    #[tokio::test]
    async fn test_find_song_empty_queries() {
        assert!(find_song(&provider(), "", "Marigold", 15)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(find_song(&provider(), "aimyon", "  ", 15)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_find_song_unknown_artist() {
        let err = find_song(&provider(), "nobody", "Marigold", 15).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
