//! Catalog-driven game for programmatic use.
//!
//! [`Game`] pairs a [`GameSession`] with an [`ArtistCatalog`]: it draws the
//! mystery artist from the catalog's candidate pool and resolves each guessed
//! name before handing it to the session.
//!
//! # Example
//!
//! ```ignore
//! use spotle_core::{Game, SessionConfig, SpotifyCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = SpotifyCatalog::new(spotify::Spotify::from_env()?);
//!     let mut game = Game::start(catalog, SessionConfig::new()).await?;
//!
//!     match game.guess("Drake").await {
//!         Ok(outcome) => println!("{outcome:?}"),
//!         Err(e) if e.is_recoverable() => println!("{e}, try again"),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```

use crate::artist::Artist;
use crate::catalog::{ArtistCatalog, CatalogError};
use crate::session::{GameSession, SessionConfig, SessionError, TurnOutcome};
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

/// Errors from playing a catalog-driven game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Artist name does not exist: {0}")]
    UnknownArtist(String),

    #[error("Could not load mystery artist: {0}")]
    MysteryUnavailable(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl GameError {
    /// Whether the player can simply guess again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::UnknownArtist(_))
    }
}

/// A game whose guesses are resolved through a catalog.
pub struct Game<C> {
    catalog: C,
    session: GameSession,
}

impl<C: ArtistCatalog> Game<C> {
    /// Draw a mystery artist uniformly from the catalog's pool and start a game.
    pub async fn start(catalog: C, config: SessionConfig) -> Result<Self, GameError> {
        config.validate()?;

        let pool = catalog.candidate_pool().await?;
        let name = pool
            .choose(&mut rand::thread_rng())
            .ok_or(CatalogError::EmptyPool)?
            .clone();
        debug!(pool_size = pool.len(), "drew mystery artist");

        let mystery = catalog
            .resolve(&name)
            .await?
            .ok_or(GameError::MysteryUnavailable(name))?;

        Self::with_mystery(catalog, mystery, config)
    }

    /// Start a game against a known mystery artist.
    pub fn with_mystery(
        catalog: C,
        mystery: Artist,
        config: SessionConfig,
    ) -> Result<Self, GameError> {
        let session = GameSession::start(mystery, config)?;
        Ok(Self { catalog, session })
    }

    /// Resolve a guessed name and submit it.
    ///
    /// Unknown names return [`GameError::UnknownArtist`] without using a turn.
    pub async fn guess(&mut self, name: &str) -> Result<TurnOutcome, GameError> {
        if self.session.is_over() {
            return Err(SessionError::GameOver.into());
        }

        let artist = self
            .catalog
            .resolve(name)
            .await?
            .ok_or_else(|| GameError::UnknownArtist(name.trim().to_string()))?;

        Ok(self.session.submit(&artist)?)
    }
}

impl<C> Game<C> {
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RosterCatalog;

    fn roster() -> RosterCatalog {
        RosterCatalog::new(vec![
            Artist::builder("1", "Drake").unwrap().build(),
            Artist::builder("2", "Future").unwrap().build(),
        ])
    }

    #[tokio::test]
    async fn test_start_picks_from_pool() {
        let game = Game::start(roster(), SessionConfig::new()).await.unwrap();
        let name = game.session().mystery().name();
        assert!(name == "Drake" || name == "Future");
    }

    #[tokio::test]
    async fn test_start_rejects_bad_config_before_drawing() {
        let config = SessionConfig::new().with_max_guesses(0);
        let result = Game::start(RosterCatalog::default(), config).await;
        assert!(matches!(
            result,
            Err(GameError::Session(SessionError::InvalidMaxGuesses(0)))
        ));
    }

    #[tokio::test]
    async fn test_start_with_empty_pool() {
        let result = Game::start(RosterCatalog::default(), SessionConfig::new()).await;
        assert!(matches!(result, Err(GameError::Catalog(CatalogError::EmptyPool))));
    }

    #[tokio::test]
    async fn test_unknown_name_is_recoverable() {
        let mystery = Artist::builder("1", "Drake").unwrap().build();
        let mut game = Game::with_mystery(roster(), mystery, SessionConfig::new()).unwrap();

        let err = game.guess("Nobody At All").await.unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(game.session().guesses_used(), 0);
    }
}
