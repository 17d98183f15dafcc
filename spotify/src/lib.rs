//! Minimal Spotify Web API client.
//!
//! This crate provides a focused client for the handful of catalog endpoints
//! a guessing game needs:
//! - Client-credentials authentication with a cached bearer token
//! - Artist search, albums and related artists
//! - Featured playlists and playlist tracks

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const API_BASE: &str = "https://api.spotify.com/v1";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Refresh the token this long before Spotify says it expires.
const TOKEN_EXPIRY_SLACK: Duration = Duration::from_secs(30);

/// Errors that can occur when using the Spotify client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Spotify client credentials not configured")]
    NoCredentials,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_SLACK < self.expires_at
    }
}

/// Spotify Web API client.
#[derive(Clone)]
pub struct Spotify {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl Spotify {
    /// Create a new client with the given application credentials.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            client,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client from `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`.
    ///
    /// The unprefixed `CLIENT_ID` / `CLIENT_SECRET` pair is accepted as well.
    pub fn from_env() -> Result<Self, Error> {
        let client_id = env_either("SPOTIFY_CLIENT_ID", "CLIENT_ID").ok_or(Error::NoCredentials)?;
        let client_secret =
            env_either("SPOTIFY_CLIENT_SECRET", "CLIENT_SECRET").ok_or(Error::NoCredentials)?;
        Self::new(client_id, client_secret)
    }

    /// Exchange the client credentials for a bearer token.
    ///
    /// Called lazily by every endpoint; exposed so callers can fail fast on
    /// bad credentials.
    pub async fn authenticate(&self) -> Result<(), Error> {
        debug!("requesting Spotify access token");

        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth(format!("status {status}: {body}")));
        }

        let token: ApiToken = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        *self.token.write().await = Some(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
        Ok(())
    }

    /// Search for an artist by name and return the best match, if any.
    pub async fn search_artist(&self, name: &str) -> Result<Option<Artist>, Error> {
        let result: ApiSearch = self
            .get(
                &format!("{API_BASE}/search"),
                &[("q", name), ("type", "artist"), ("limit", "1")],
            )
            .await?;

        Ok(result.artists.items.into_iter().next().map(Artist::from))
    }

    /// Full albums released by an artist in the given market.
    pub async fn artist_albums(&self, artist_id: &str, market: &str) -> Result<Vec<Album>, Error> {
        let result: ApiPage<Album> = self
            .get(
                &format!("{API_BASE}/artists/{artist_id}/albums"),
                &[("include_groups", "album"), ("market", market), ("limit", "50")],
            )
            .await?;

        Ok(result.items)
    }

    /// Artists Spotify considers similar, most related first.
    pub async fn related_artists(&self, artist_id: &str) -> Result<Vec<Artist>, Error> {
        let result: ApiRelated = self
            .get(&format!("{API_BASE}/artists/{artist_id}/related-artists"), &[])
            .await?;

        Ok(result.artists.into_iter().map(Artist::from).collect())
    }

    /// Editorially featured playlists for a market.
    pub async fn featured_playlists(&self, market: &str) -> Result<Vec<Playlist>, Error> {
        let result: ApiFeatured = self
            .get(&format!("{API_BASE}/browse/featured-playlists"), &[("country", market)])
            .await?;

        Ok(result
            .playlists
            .items
            .into_iter()
            .flatten()
            .map(|p| Playlist {
                name: p.name,
                tracks_href: p.tracks.href,
            })
            .collect())
    }

    /// Tracks on a playlist, given the playlist's `tracks` href.
    ///
    /// Removed or local tracks without metadata are skipped.
    pub async fn playlist_tracks(&self, tracks_href: &str) -> Result<Vec<Track>, Error> {
        let result: ApiPage<ApiPlaylistItem> = self.get(tracks_href, &[]).await?;

        Ok(result
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .map(|t| Track {
                artists: t.artists.into_iter().map(|a| a.name).collect(),
            })
            .collect())
    }

    async fn bearer(&self) -> Result<String, Error> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
        }

        self.authenticate().await?;
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| t.value.clone())
            .ok_or_else(|| Error::Auth("no token after authentication".to_string()))
    }

    fn build_headers(token: &str) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?,
        );
        Ok(headers)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let headers = Self::build_headers(&self.bearer().await?)?;
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .headers(headers)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

fn env_either(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .ok()
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Public types
// ============================================================================

/// An artist as returned by search or related-artist lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub followers: u64,
    pub genres: Vec<String>,
}

/// How much of an album's release date Spotify knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Year,
    Month,
    #[default]
    Day,
}

/// An album entry from an artist's discography.
#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub name: String,
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: DatePrecision,
}

impl Album {
    /// The release date, with coarse dates pinned to the start of the period.
    pub fn released_on(&self) -> Option<NaiveDate> {
        let date = parse_release_date(&self.release_date, self.release_date_precision);
        if date.is_none() {
            warn!(album = %self.name, date = %self.release_date, "unparsable release date");
        }
        date
    }
}

/// Parse a Spotify release date of the given precision.
///
/// `"2021"` with year precision becomes 2021-01-01 and `"2021-06"` with month
/// precision becomes 2021-06-01.
pub fn parse_release_date(date: &str, precision: DatePrecision) -> Option<NaiveDate> {
    let full = match precision {
        DatePrecision::Year => format!("{date}-01-01"),
        DatePrecision::Month => format!("{date}-01"),
        DatePrecision::Day => date.to_string(),
    };
    NaiveDate::parse_from_str(&full, "%Y-%m-%d").ok()
}

/// A featured playlist.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub name: String,
    pub tracks_href: String,
}

/// A playlist track, reduced to its credited artist names.
#[derive(Debug, Clone)]
pub struct Track {
    pub artists: Vec<String>,
}

// ============================================================================
// API types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiToken {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
struct ApiSearch {
    artists: ApiPage<ApiArtist>,
}

#[derive(Debug, Deserialize)]
struct ApiPage<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ApiArtist {
    id: String,
    name: String,
    #[serde(default)]
    followers: ApiFollowers,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ApiFollowers {
    #[serde(default)]
    total: u64,
}

impl From<ApiArtist> for Artist {
    fn from(api: ApiArtist) -> Self {
        Self {
            id: api.id,
            name: api.name,
            followers: api.followers.total,
            genres: api.genres,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiRelated {
    artists: Vec<ApiArtist>,
}

#[derive(Debug, Deserialize)]
struct ApiFeatured {
    playlists: ApiPage<Option<ApiPlaylist>>,
}

#[derive(Debug, Deserialize)]
struct ApiPlaylist {
    name: String,
    tracks: ApiTracksRef,
}

#[derive(Debug, Deserialize)]
struct ApiTracksRef {
    href: String,
}

#[derive(Debug, Deserialize)]
struct ApiPlaylistItem {
    track: Option<ApiTrack>,
}

#[derive(Debug, Deserialize)]
struct ApiTrack {
    artists: Vec<ApiArtistRef>,
}

#[derive(Debug, Deserialize)]
struct ApiArtistRef {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = Spotify::new("id", "secret").unwrap();
        assert_eq!(client.client_id, "id");
        assert_eq!(client.client_secret, "secret");
    }

    #[test]
    fn test_parse_release_date_precisions() {
        assert_eq!(
            parse_release_date("2023-11-17", DatePrecision::Day),
            NaiveDate::from_ymd_opt(2023, 11, 17)
        );
        assert_eq!(
            parse_release_date("2023-11", DatePrecision::Month),
            NaiveDate::from_ymd_opt(2023, 11, 1)
        );
        assert_eq!(
            parse_release_date("1999", DatePrecision::Year),
            NaiveDate::from_ymd_opt(1999, 1, 1)
        );
        assert_eq!(parse_release_date("soon", DatePrecision::Day), None);
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "artists": {
                "items": [{
                    "id": "3TVXtAsR1Inumwj472S9r4",
                    "name": "Drake",
                    "followers": { "href": null, "total": 92000000 },
                    "genres": ["canadian hip hop", "hip hop", "rap"],
                    "popularity": 95
                }]
            }
        }"#;

        let search: ApiSearch = serde_json::from_str(json).unwrap();
        let artist: Artist = search.artists.items.into_iter().next().unwrap().into();
        assert_eq!(artist.name, "Drake");
        assert_eq!(artist.followers, 92_000_000);
        assert_eq!(artist.genres.len(), 3);
    }

    #[test]
    fn test_parse_album_defaults_to_day_precision() {
        let album: Album =
            serde_json::from_str(r#"{ "name": "For All The Dogs", "release_date": "2023-10-06" }"#)
                .unwrap();
        assert_eq!(album.release_date_precision, DatePrecision::Day);
        assert_eq!(album.released_on(), NaiveDate::from_ymd_opt(2023, 10, 6));
    }

    #[test]
    fn test_parse_playlist_items_skips_missing_tracks() {
        let json = r#"{
            "items": [
                { "track": { "name": "A", "artists": [{ "name": "X" }, { "name": "Y" }] } },
                { "track": null }
            ]
        }"#;

        let page: ApiPage<ApiPlaylistItem> = serde_json::from_str(json).unwrap();
        let tracks: Vec<_> = page.items.into_iter().filter_map(|i| i.track).collect();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].artists.len(), 2);
    }

    #[test]
    fn test_featured_playlists_tolerate_null_entries() {
        let json = r#"{
            "playlists": {
                "items": [null, { "name": "Viral Hits", "tracks": { "href": "https://x/tracks" } }]
            }
        }"#;

        let featured: ApiFeatured = serde_json::from_str(json).unwrap();
        let names: Vec<_> = featured
            .playlists
            .items
            .into_iter()
            .flatten()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Viral Hits"]);
    }
}
