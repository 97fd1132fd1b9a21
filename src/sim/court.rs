//! Court geometry: which side is which, and the paddle hit test
//!
//! The ball only interacts with a paddle when it reaches that paddle's edge
//! of the court; there is no swept collision.

use serde::{Deserialize, Serialize};

use crate::consts::{COURT_EDGE, PADDLE_REACH};

/// One half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1 (W/S)
    Left,
    /// Player 2 (ArrowUp/ArrowDown)
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// X position of this side's paddle
    #[inline]
    pub fn paddle_x(self) -> f32 {
        match self {
            Side::Left => -COURT_EDGE,
            Side::Right => COURT_EDGE,
        }
    }

    /// Sign of the direction pointing from this edge toward the court center
    #[inline]
    pub fn inward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// 1-based player number shown to users
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

/// Whether a ball at `x` has reached the edge guarded by `side`
#[inline]
pub fn reached_edge(side: Side, x: f32) -> bool {
    match side {
        Side::Left => x <= -COURT_EDGE,
        Side::Right => x >= COURT_EDGE,
    }
}

/// Whether a paddle centered at `offset` covers height `y` (inclusive)
#[inline]
pub fn paddle_covers(offset: f32, y: f32) -> bool {
    y >= offset - PADDLE_REACH && y <= offset + PADDLE_REACH
}
