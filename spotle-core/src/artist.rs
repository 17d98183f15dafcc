//! Artist records - the comparable snapshot of one artist.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Maximum number of related artist names kept on a record.
pub const MAX_RELATED: usize = 5;

/// Errors from constructing an artist record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtistError {
    #[error("Artist id must not be empty")]
    EmptyId,
    #[error("Artist name must not be empty")]
    EmptyName,
    #[error("Latest release {0} is in the future")]
    FutureRelease(NaiveDate),
}

/// Stable catalog identity of an artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(String);

impl ArtistId {
    pub fn new(id: impl Into<String>) -> Result<Self, ArtistError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ArtistError::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable snapshot of an artist's comparable attributes.
///
/// Two records are equal when their ids are equal; display names are not
/// unique across the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ArtistSnapshot", into = "ArtistSnapshot")]
pub struct Artist {
    id: ArtistId,
    name: String,
    followers: u64,
    related: Vec<String>,
    genres: BTreeSet<String>,
    latest_release: Option<NaiveDate>,
}

impl Artist {
    /// Start building a record. Fails on an empty id or name.
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<ArtistBuilder, ArtistError> {
        let id = ArtistId::new(id)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ArtistError::EmptyName);
        }

        Ok(ArtistBuilder {
            artist: Artist {
                id,
                name,
                followers: 0,
                related: Vec::new(),
                genres: BTreeSet::new(),
                latest_release: None,
            },
        })
    }

    pub fn id(&self) -> &ArtistId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Follower count.
    pub fn followers(&self) -> u64 {
        self.followers
    }

    /// Names of related artists, most related first, at most [`MAX_RELATED`].
    pub fn related(&self) -> &[String] {
        &self.related
    }

    /// Genre tags, lowercased.
    pub fn genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    pub fn latest_release(&self) -> Option<NaiveDate> {
        self.latest_release
    }

    /// Whether `name` is listed among this artist's related artists.
    pub fn lists_as_related(&self, name: &str) -> bool {
        self.related.iter().any(|r| r == name)
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artist {}

impl Hash for Artist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`Artist`]. Enforces the record invariants as values are added.
#[derive(Debug, Clone)]
pub struct ArtistBuilder {
    artist: Artist,
}

impl ArtistBuilder {
    pub fn followers(mut self, followers: u64) -> Self {
        self.artist.followers = followers;
        self
    }

    /// Related artist names; anything past the first [`MAX_RELATED`] is dropped.
    pub fn related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artist.related = related.into_iter().take(MAX_RELATED).map(Into::into).collect();
        self
    }

    /// Genre tags; stored lowercased and trimmed, blanks dropped.
    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.artist.genres = genres
            .into_iter()
            .map(|g| g.as_ref().trim().to_lowercase())
            .filter(|g| !g.is_empty())
            .collect();
        self
    }

    /// Latest album date. A date after today is treated as no release.
    pub fn latest_release(mut self, date: Option<NaiveDate>) -> Self {
        self.artist.latest_release = date.filter(|d| *d <= today());
        self
    }

    pub fn build(self) -> Artist {
        self.artist
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Serialized form of an [`Artist`], validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArtistSnapshot {
    id: String,
    name: String,
    #[serde(default)]
    followers: u64,
    #[serde(default)]
    related: Vec<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    latest_release: Option<NaiveDate>,
}

impl TryFrom<ArtistSnapshot> for Artist {
    type Error = ArtistError;

    fn try_from(snapshot: ArtistSnapshot) -> Result<Self, Self::Error> {
        if let Some(date) = snapshot.latest_release.filter(|d| *d > today()) {
            return Err(ArtistError::FutureRelease(date));
        }

        Ok(Artist::builder(snapshot.id, snapshot.name)?
            .followers(snapshot.followers)
            .related(snapshot.related)
            .genres(snapshot.genres)
            .latest_release(snapshot.latest_release)
            .build())
    }
}

impl From<Artist> for ArtistSnapshot {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id.0,
            name: artist.name,
            followers: artist.followers,
            related: artist.related,
            genres: artist.genres.into_iter().collect(),
            latest_release: artist.latest_release,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_id_rejected() {
        assert_eq!(Artist::builder("", "Drake").unwrap_err(), ArtistError::EmptyId);
        assert_eq!(Artist::builder("  ", "Drake").unwrap_err(), ArtistError::EmptyId);
        assert_eq!(Artist::builder("x", "").unwrap_err(), ArtistError::EmptyName);
    }

    #[test]
    fn test_related_truncated() {
        let artist = Artist::builder("a", "A")
            .unwrap()
            .related(["1", "2", "3", "4", "5", "6", "7"])
            .build();
        assert_eq!(artist.related().len(), MAX_RELATED);
        assert_eq!(artist.related()[4], "5");
    }

    #[test]
    fn test_genres_lowercased() {
        let artist = Artist::builder("a", "A")
            .unwrap()
            .genres(["Hip Hop", "hip hop", " RAP ", ""])
            .build();
        let genres: Vec<_> = artist.genres().iter().map(String::as_str).collect();
        assert_eq!(genres, vec!["hip hop", "rap"]);
    }

    #[test]
    fn test_equality_by_id_only() {
        let a = Artist::builder("id-1", "Nirvana").unwrap().followers(10).build();
        let b = Artist::builder("id-1", "Nirvana (band)").unwrap().followers(99).build();
        let c = Artist::builder("id-2", "Nirvana").unwrap().build();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{ "id": "", "name": "Ghost" }"#;
        assert!(serde_json::from_str::<Artist>(json).is_err());

        let json = r#"{
            "id": "abc",
            "name": "Future",
            "followers": 17000000,
            "genres": ["Atl Hip Hop", "rap"],
            "latest_release": "2024-04-12"
        }"#;
        let artist: Artist = serde_json::from_str(json).unwrap();
        assert_eq!(artist.id().as_str(), "abc");
        assert!(artist.genres().contains("atl hip hop"));
        assert_eq!(artist.latest_release(), NaiveDate::from_ymd_opt(2024, 4, 12));
        assert!(artist.related().is_empty());
    }

    #[test]
    fn test_future_release_dropped_by_builder() {
        let tomorrow = today().succ_opt();
        let artist = Artist::builder("a", "A").unwrap().latest_release(tomorrow).build();
        assert_eq!(artist.latest_release(), None);

        let artist = Artist::builder("b", "B").unwrap().latest_release(Some(today())).build();
        assert_eq!(artist.latest_release(), Some(today()));
    }

    #[test]
    fn test_deserialize_rejects_future_release() {
        let json = r#"{ "id": "abc", "name": "Future", "latest_release": "2999-01-01" }"#;
        let err = serde_json::from_str::<Artist>(json).unwrap_err();
        assert!(err.to_string().contains("in the future"));
    }
}
