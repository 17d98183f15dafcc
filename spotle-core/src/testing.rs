//! Testing utilities for the guessing game.
//!
//! This module provides tools for integration testing:
//! - Fixture artists with known, stable attributes
//! - `MockCatalog` for deterministic games without API calls
//! - Assertion helpers for verifying turn outcomes

use crate::artist::Artist;
use crate::catalog::{ArtistCatalog, CatalogError, RosterCatalog};
use crate::compare::Feedback;
use crate::session::TurnOutcome;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};

fn fixture(
    id: &str,
    name: &str,
    followers: u64,
    genres: &[&str],
    related: &[&str],
    release: Option<(i32, u32, u32)>,
) -> Artist {
    Artist::builder(id, name)
        .expect("fixture ids and names are non-empty")
        .followers(followers)
        .genres(genres)
        .related(related.iter().copied())
        .latest_release(release.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)))
        .build()
}

pub fn drake() -> Artist {
    fixture(
        "3TVXtAsR1Inumwj472S9r4",
        "Drake",
        92_000_000,
        &["canadian hip hop", "hip hop", "rap", "pop rap"],
        &["Future", "Travis Scott", "21 Savage", "Lil Baby", "J. Cole"],
        Some((2023, 10, 6)),
    )
}

pub fn future() -> Artist {
    fixture(
        "1RyvyyTE3xzB2ZywiAwp0i",
        "Future",
        17_000_000,
        &["atl hip hop", "hip hop", "rap", "trap"],
        &["Young Thug", "Travis Scott", "Gunna"],
        Some((2024, 4, 12)),
    )
}

pub fn travis_scott() -> Artist {
    fixture(
        "0Y5tJX1MQlPlqiwlOH1tJY",
        "Travis Scott",
        31_000_000,
        &["hip hop", "rap", "slap house"],
        &["Future", "Don Toliver", "Kid Cudi"],
        Some((2023, 7, 28)),
    )
}

pub fn taylor_swift() -> Artist {
    fixture(
        "06HL4z0CvFAxyc27GXpf02",
        "Taylor Swift",
        120_000_000,
        &["pop"],
        &[],
        Some((2024, 4, 19)),
    )
}

/// An artist with no albums and no genres.
pub fn newcomer() -> Artist {
    fixture("newcomer-0001", "Fresh Newcomer", 1_200, &[], &[], None)
}

/// All fixture artists.
pub fn sample_artists() -> Vec<Artist> {
    vec![drake(), future(), travis_scott(), taylor_swift(), newcomer()]
}

/// A catalog over a fixed roster that counts lookups.
///
/// Use this for deterministic integration tests without API calls.
pub struct MockCatalog {
    roster: RosterCatalog,
    pool: Option<Vec<String>>,
    resolve_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new(artists: Vec<Artist>) -> Self {
        Self {
            roster: RosterCatalog::new(artists),
            pool: None,
            resolve_calls: AtomicUsize::new(0),
        }
    }

    /// Catalog over every fixture artist.
    pub fn sample() -> Self {
        Self::new(sample_artists())
    }

    /// Override the candidate pool, e.g. to force the mystery artist.
    pub fn with_pool<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pool = Some(pool.into_iter().map(Into::into).collect());
        self
    }

    /// Number of `resolve` calls made so far.
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtistCatalog for MockCatalog {
    async fn resolve(&self, name: &str) -> Result<Option<Artist>, CatalogError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.roster.resolve(name).await
    }

    async fn candidate_pool(&self) -> Result<Vec<String>, CatalogError> {
        match &self.pool {
            Some(pool) => Ok(pool.clone()),
            None => self.roster.candidate_pool().await,
        }
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the outcome is feedback for a wrong guess and return it.
#[track_caller]
pub fn expect_feedback(outcome: TurnOutcome) -> Feedback {
    match outcome {
        TurnOutcome::Feedback(feedback) => feedback,
        other => panic!("Expected feedback, got {other:?}"),
    }
}

/// Assert the game was won against the named mystery artist.
#[track_caller]
pub fn assert_won(outcome: &TurnOutcome, mystery: &str) {
    assert!(
        matches!(outcome, TurnOutcome::Won { mystery: m } if m == mystery),
        "Expected win revealing '{mystery}', got {outcome:?}"
    );
}

/// Assert the game was lost against the named mystery artist.
#[track_caller]
pub fn assert_lost(outcome: &TurnOutcome, mystery: &str) {
    assert!(
        matches!(outcome, TurnOutcome::Lost { mystery: m, .. } if m == mystery),
        "Expected loss revealing '{mystery}', got {outcome:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_have_unique_ids() {
        let artists = sample_artists();
        for (i, a) in artists.iter().enumerate() {
            for b in &artists[i + 1..] {
                assert_ne!(a, b, "{a} and {b} share an id");
            }
        }
    }

    #[tokio::test]
    async fn test_mock_counts_lookups() {
        let catalog = MockCatalog::sample();
        assert!(catalog.resolve("drake").await.unwrap().is_some());
        assert!(catalog.resolve("nobody").await.unwrap().is_none());
        assert_eq!(catalog.resolve_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_pool_override() {
        let catalog = MockCatalog::sample().with_pool(["Future"]);
        assert_eq!(catalog.candidate_pool().await.unwrap(), vec!["Future"]);
    }
}
