//! Artist guessing game engine.
//!
//! This crate provides:
//! - Artist records and the four comparisons run on a wrong guess
//! - A turn engine that tracks guesses, duplicates and the guess limit
//! - Catalogs that resolve artist names (Spotify or a local JSON roster)
//!
//! # Quick Start
//!
//! ```ignore
//! use spotle_core::{GameSession, SessionConfig, TurnOutcome};
//!
//! let mut session = GameSession::start(mystery, SessionConfig::new().with_max_guesses(5))?;
//!
//! match session.submit(&guess)? {
//!     TurnOutcome::Won { mystery } => println!("Found {mystery}!"),
//!     TurnOutcome::Lost { mystery, .. } => println!("It was {mystery}"),
//!     TurnOutcome::Feedback(feedback) => println!("{feedback:?}"),
//!     TurnOutcome::Duplicate => println!("Already guessed"),
//! }
//! ```

pub mod artist;
pub mod catalog;
pub mod compare;
pub mod game;
pub mod ledger;
pub mod session;
pub mod testing;

// Primary public API
pub use artist::{Artist, ArtistBuilder, ArtistError, ArtistId, MAX_RELATED};
pub use catalog::{ArtistCatalog, CatalogError, RosterCatalog, SpotifyCatalog};
pub use compare::{Feedback, Genres, Popularity, Recency, Relatedness};
pub use game::{Game, GameError};
pub use ledger::GuessLedger;
pub use session::{
    GameSession, GameState, GuessRecord, SessionConfig, SessionError, TurnOutcome,
    DEFAULT_MAX_GUESSES,
};
