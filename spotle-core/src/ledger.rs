//! Identities already guessed in a session.

use crate::artist::ArtistId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct GuessLedger {
    seen: HashSet<ArtistId>,
}

impl GuessLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ArtistId) -> bool {
        self.seen.contains(id)
    }

    /// Record an identity. Returns `false` if it was already present.
    pub fn record(&mut self, id: ArtistId) -> bool {
        self.seen.insert(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ArtistId {
        ArtistId::new(s).unwrap()
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut ledger = GuessLedger::new();
        assert!(ledger.record(id("x")));
        assert!(!ledger.record(id("x")));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains(&id("x")));
    }

    #[test]
    fn test_record_only_affects_recorded_id() {
        let mut ledger = GuessLedger::new();
        assert!(ledger.is_empty());
        ledger.record(id("x"));
        assert!(ledger.contains(&id("x")));
        assert!(!ledger.contains(&id("y")));
    }
}
