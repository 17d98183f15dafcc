//! GameSession - the turn engine for one game.
//!
//! A session owns the mystery artist, the ledger of previous guesses and the
//! guess counter. Guesses arrive already resolved to [`Artist`] records, so a
//! session can be driven headlessly from a scripted list of artists.

use crate::artist::Artist;
use crate::compare::Feedback;
use crate::ledger::GuessLedger;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Guesses allowed per game unless configured otherwise.
pub const DEFAULT_MAX_GUESSES: u32 = 5;

/// Errors from GameSession operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Maximum guesses must be a positive integer, got {0}")]
    InvalidMaxGuesses(u32),

    #[error("The game is already over")]
    GameOver,
}

/// Configuration for creating a new game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Wrong guesses allowed before the game is lost.
    pub max_guesses: u32,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
        }
    }

    /// Set the number of guesses allowed.
    pub fn with_max_guesses(mut self, max_guesses: u32) -> Self {
        self.max_guesses = max_guesses;
        self
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.max_guesses == 0 {
            return Err(SessionError::InvalidMaxGuesses(self.max_guesses));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    AwaitingGuess,
    /// A guess is being evaluated. Never observed between calls.
    Evaluating,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

/// Result of submitting one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Already guessed this game; no turn used.
    Duplicate,
    /// The guess was the mystery artist.
    Won { mystery: String },
    /// Wrong guess with guesses left.
    Feedback(Feedback),
    /// Wrong guess that used the last turn.
    Lost { mystery: String, feedback: Feedback },
}

/// A wrong guess and the feedback it earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub artist: String,
    pub feedback: Feedback,
}

/// One game against a fixed mystery artist.
#[derive(Debug, Clone)]
pub struct GameSession {
    mystery: Artist,
    ledger: GuessLedger,
    history: Vec<GuessRecord>,
    guesses_used: u32,
    max_guesses: u32,
    state: GameState,
}

impl GameSession {
    /// Start a session. Rejects a zero guess limit before any guess is taken.
    pub fn start(mystery: Artist, config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        info!(max_guesses = config.max_guesses, "starting game session");

        Ok(Self {
            mystery,
            ledger: GuessLedger::new(),
            history: Vec::new(),
            guesses_used: 0,
            max_guesses: config.max_guesses,
            state: GameState::AwaitingGuess,
        })
    }

    /// Evaluate a resolved guess.
    pub fn submit(&mut self, guess: &Artist) -> Result<TurnOutcome, SessionError> {
        if self.state != GameState::AwaitingGuess {
            return Err(SessionError::GameOver);
        }

        if self.ledger.contains(guess.id()) {
            debug!(guess = guess.name(), "duplicate guess");
            return Ok(TurnOutcome::Duplicate);
        }

        self.state = GameState::Evaluating;

        if guess.id() == self.mystery.id() {
            self.state = GameState::Won;
            info!(guesses_used = self.guesses_used, "mystery artist found");
            return Ok(TurnOutcome::Won {
                mystery: self.mystery.name().to_string(),
            });
        }

        let feedback = Feedback::between(guess, &self.mystery);
        self.ledger.record(guess.id().clone());
        self.history.push(GuessRecord {
            artist: guess.name().to_string(),
            feedback: feedback.clone(),
        });
        self.guesses_used += 1;
        debug!(guess = guess.name(), used = self.guesses_used, "wrong guess");

        if self.guesses_used >= self.max_guesses {
            self.state = GameState::Lost;
            info!("out of guesses");
            return Ok(TurnOutcome::Lost {
                mystery: self.mystery.name().to_string(),
                feedback,
            });
        }

        self.state = GameState::AwaitingGuess;
        Ok(TurnOutcome::Feedback(feedback))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Wrong guesses counted so far.
    pub fn guesses_used(&self) -> u32 {
        self.guesses_used
    }

    pub fn guesses_remaining(&self) -> u32 {
        self.max_guesses - self.guesses_used
    }

    pub fn max_guesses(&self) -> u32 {
        self.max_guesses
    }

    /// Wrong guesses in the order they were made.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// The mystery artist. Frontends should only reveal it once the game is over.
    pub fn mystery(&self) -> &Artist {
        &self.mystery
    }
}
