//! Artist catalogs - where artist records and mystery candidates come from.
//!
//! The engine never talks to a music service directly. It asks an
//! [`ArtistCatalog`] to resolve free-text names into [`Artist`] records and to
//! offer a pool of names to draw the mystery artist from.

use crate::artist::{Artist, ArtistError};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use spotify::Spotify;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

const DEFAULT_PLAYLIST: &str = "Viral Hits";
const DEFAULT_MARKET: &str = "US";

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Spotify error: {0}")]
    Spotify(#[from] spotify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid artist record: {0}")]
    InvalidArtist(#[from] ArtistError),

    #[error("No candidate artists available")]
    EmptyPool,
}

/// Source of artist records.
#[async_trait]
pub trait ArtistCatalog: Send + Sync {
    /// Resolve a name to the best-matching artist, or `None` if unknown.
    async fn resolve(&self, name: &str) -> Result<Option<Artist>, CatalogError>;

    /// Names the mystery artist may be drawn from.
    async fn candidate_pool(&self) -> Result<Vec<String>, CatalogError>;
}

/// Catalog backed by the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyCatalog {
    client: Spotify,
    market: String,
    playlist: String,
}

impl SpotifyCatalog {
    pub fn new(client: Spotify) -> Self {
        Self {
            client,
            market: DEFAULT_MARKET.to_string(),
            playlist: DEFAULT_PLAYLIST.to_string(),
        }
    }

    /// Market used for album lookups and featured playlists.
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// Featured playlist whose artists form the candidate pool.
    pub fn with_playlist(mut self, playlist: impl Into<String>) -> Self {
        self.playlist = playlist.into();
        self
    }

    async fn latest_release(&self, artist_id: &str) -> Result<Option<NaiveDate>, CatalogError> {
        let albums = self.client.artist_albums(artist_id, &self.market).await?;
        let today = Local::now().date_naive();

        // Announced albums carry future dates; they haven't been released yet.
        Ok(albums
            .iter()
            .filter_map(|a| a.released_on())
            .filter(|d| *d <= today)
            .max())
    }

    async fn related_names(&self, artist_id: &str) -> Result<Vec<String>, CatalogError> {
        match self.client.related_artists(artist_id).await {
            Ok(related) => Ok(related.into_iter().map(|a| a.name).collect()),
            // Spotify withholds this endpoint from some applications.
            Err(spotify::Error::Api { status, .. }) if status == 403 || status == 404 => {
                warn!(artist_id, status, "related artists unavailable");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ArtistCatalog for SpotifyCatalog {
    async fn resolve(&self, name: &str) -> Result<Option<Artist>, CatalogError> {
        let Some(found) = self.client.search_artist(name).await? else {
            debug!(name, "no artist found");
            return Ok(None);
        };

        let (latest_release, related) = futures::try_join!(
            self.latest_release(&found.id),
            self.related_names(&found.id)
        )?;

        let artist = Artist::builder(found.id, found.name)?
            .followers(found.followers)
            .genres(found.genres)
            .related(related)
            .latest_release(latest_release)
            .build();

        Ok(Some(artist))
    }

    async fn candidate_pool(&self) -> Result<Vec<String>, CatalogError> {
        let playlists = self.client.featured_playlists(&self.market).await?;

        let playlist = match playlists.iter().find(|p| p.name == self.playlist) {
            Some(p) => p,
            None => {
                let fallback = playlists.first().ok_or(CatalogError::EmptyPool)?;
                warn!(
                    wanted = %self.playlist,
                    using = %fallback.name,
                    "featured playlist not found"
                );
                fallback
            }
        };

        let tracks = self.client.playlist_tracks(&playlist.tracks_href).await?;
        let names: BTreeSet<String> = tracks.into_iter().flat_map(|t| t.artists).collect();

        if names.is_empty() {
            return Err(CatalogError::EmptyPool);
        }
        Ok(names.into_iter().collect())
    }
}

/// Catalog over a fixed list of artists, e.g. loaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct RosterCatalog {
    artists: Vec<Artist>,
}

impl RosterCatalog {
    pub fn new(artists: Vec<Artist>) -> Self {
        Self { artists }
    }

    /// Parse a JSON array of artist records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let artists: Vec<Artist> = serde_json::from_str(json)?;
        Ok(Self::new(artists))
    }

    /// Load a JSON roster from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Case-insensitive lookup on the trimmed display name.
    pub fn find(&self, name: &str) -> Option<&Artist> {
        let wanted = name.trim().to_lowercase();
        self.artists.iter().find(|a| a.name().to_lowercase() == wanted)
    }
}

#[async_trait]
impl ArtistCatalog for RosterCatalog {
    async fn resolve(&self, name: &str) -> Result<Option<Artist>, CatalogError> {
        Ok(self.find(name).cloned())
    }

    async fn candidate_pool(&self) -> Result<Vec<String>, CatalogError> {
        if self.artists.is_empty() {
            return Err(CatalogError::EmptyPool);
        }
        Ok(self.artists.iter().map(|a| a.name().to_string()).collect())
    }
}
