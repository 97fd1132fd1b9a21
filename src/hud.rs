//! Score and winner text shown next to the canvas

use crate::sim::{GameEvent, Score, Side};

/// CSS selector of the element holding a side's score
pub fn score_selector(side: Side) -> &'static str {
    match side {
        Side::Left => ".player1",
        Side::Right => ".player2",
    }
}

pub fn score_label(side: Side, score: u32) -> String {
    format!("Player {}: {}", side.player_number(), score)
}

/// Both labels for a score, left first
pub fn score_labels(score: &Score) -> [(Side, String); 2] {
    Side::BOTH.map(|side| (side, score_label(side, score.get(side))))
}

/// Score to display after a batch of events.
///
/// Uses the newest `Scored` payload, so the winning point is shown even
/// though the tick that made it already reset `GameState::score`.
pub fn displayed_score(shown: Score, events: &[GameEvent]) -> Score {
    events
        .iter()
        .rev()
        .find_map(|event| match event {
            GameEvent::Scored { score, .. } => Some(*score),
            _ => None,
        })
        .unwrap_or(shown)
}

pub fn winner_message(side: Side) -> String {
    format!("Player {} wins!", side.player_number())
}
