//! Match tally
//!
//! Persisted to LocalStorage, counts wins per player and keeps the last
//! few results.

use serde::{Deserialize, Serialize};

use crate::sim::Side;

/// Maximum number of results to keep
pub const MAX_HISTORY: usize = 10;

/// A single finished match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub winner: Side,
    /// Unix timestamp (ms) when the match ended
    pub timestamp: f64,
}

/// Wins per player plus recent results (newest first)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTally {
    pub left_wins: u32,
    pub right_wins: u32,
    pub history: Vec<MatchRecord>,
}

impl MatchTally {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rally_pong_tally";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished match, returning the winner's total wins
    pub fn record(&mut self, winner: Side, timestamp: f64) -> u32 {
        let wins = match winner {
            Side::Left => &mut self.left_wins,
            Side::Right => &mut self.right_wins,
        };
        *wins += 1;
        let total = *wins;

        self.history.insert(0, MatchRecord { winner, timestamp });
        self.history.truncate(MAX_HISTORY);

        total
    }

    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_wins,
            Side::Right => self.right_wins,
        }
    }

    /// Player with more wins, `None` when tied
    pub fn leader(&self) -> Option<Side> {
        match self.left_wins.cmp(&self.right_wins) {
            std::cmp::Ordering::Greater => Some(Side::Left),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Check if no match has been recorded
    pub fn is_empty(&self) -> bool {
        self.left_wins == 0 && self.right_wins == 0
    }

    /// One-line summary, e.g. "Player 1 leads 3-1"
    pub fn standings(&self) -> String {
        if self.is_empty() {
            return "No matches played yet".to_string();
        }
        match self.leader() {
            Some(side) => format!(
                "Player {} leads {}-{}",
                side.player_number(),
                self.wins(side),
                self.wins(side.opponent())
            ),
            None => format!("Tied {}-{}", self.left_wins, self.right_wins),
        }
    }

    /// Load the tally from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tally) = serde_json::from_str::<MatchTally>(&json) {
                    log::info!(
                        "Loaded match tally ({}-{})",
                        tally.left_wins,
                        tally.right_wins
                    );
                    return tally;
                }
            }
        }

        log::info!("No match tally found, starting fresh");
        Self::new()
    }

    /// Save the tally to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Match tally saved ({} results)", self.history.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_wins() {
        let mut tally = MatchTally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.leader(), None);

        assert_eq!(tally.record(Side::Left, 1.0), 1);
        assert_eq!(tally.record(Side::Right, 2.0), 1);
        assert_eq!(tally.record(Side::Left, 3.0), 2);

        assert_eq!(tally.wins(Side::Left), 2);
        assert_eq!(tally.wins(Side::Right), 1);
        assert_eq!(tally.leader(), Some(Side::Left));
        assert_eq!(tally.history[0].timestamp, 3.0);
    }

    #[test]
    fn test_standings() {
        let mut tally = MatchTally::new();
        assert_eq!(tally.standings(), "No matches played yet");
        tally.record(Side::Right, 1.0);
        assert_eq!(tally.standings(), "Player 2 leads 1-0");
        tally.record(Side::Left, 2.0);
        assert_eq!(tally.standings(), "Tied 1-1");
    }

    #[test]
    fn test_history_is_capped_newest_first() {
        let mut tally = MatchTally::new();
        for i in 0..(MAX_HISTORY + 5) {
            tally.record(Side::Right, i as f64);
        }
        assert_eq!(tally.history.len(), MAX_HISTORY);
        assert_eq!(tally.history[0].timestamp, (MAX_HISTORY + 4) as f64);
        // Totals keep counting past the history cap
        assert_eq!(tally.right_wins, (MAX_HISTORY + 5) as u32);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut tally = MatchTally::new();
        tally.record(Side::Left, 42.0);
        let json = serde_json::to_string(&tally).unwrap();
        let back: MatchTally = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tally);
    }
}
