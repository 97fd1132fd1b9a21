//! Game state and core simulation types

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

use super::court::Side;
use crate::consts::*;
use crate::{deg_to_rad, m4};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in motion
    #[default]
    Playing,
    /// Simulation frozen until the pause key is pressed again
    Paused,
}

/// Direction a paddle can be nudged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleDir {
    Up,
    Down,
}

impl PaddleDir {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            PaddleDir::Up => 1.0,
            PaddleDir::Down => -1.0,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Cosmetic spin, only used for the transform
    pub spin_degrees: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::from(BALL_START_VEL),
            spin_degrees: 0.0,
        }
    }
}

impl Ball {
    /// Put the ball back at the center with the opening velocity
    pub fn serve(&mut self) {
        self.pos = Vec2::ZERO;
        self.vel = Vec2::from(BALL_START_VEL);
    }
}

/// A paddle; only its vertical offset moves
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub offset: f32,
}

impl Paddle {
    /// Move one step, never past `PADDLE_LIMIT`
    pub fn nudge(&mut self, dir: PaddleDir) {
        self.offset =
            (self.offset + dir.sign() * PADDLE_STEP).clamp(-PADDLE_LIMIT, PADDLE_LIMIT);
    }

    pub fn recenter(&mut self) {
        self.offset = 0.0;
    }
}

/// Points in the current match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Award a point, returning the new total for that side
    pub fn add_point(&mut self, side: Side) -> u32 {
        let points = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *points += 1;
        *points
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Things that happened during a tick, consumed by HUD and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball returned by this side's paddle
    PaddleHit(Side),
    /// Ball bounced off the top or bottom
    WallBounce,
    /// `scorer` won the rally; `score` is the tally right after the point
    Scored { scorer: Side, score: Score },
    /// `side` reached `WIN_SCORE`; scores have been reset
    MatchWon(Side),
}

/// Complete game state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub score: Score,
    /// Winner of the most recent match
    pub winner: Option<Side>,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Serve a fresh ball and recenter both paddles (after a point)
    pub fn reset_rally(&mut self) {
        self.ball.serve();
        self.left.recenter();
        self.right.recenter();
    }

    /// Ball transform: translate to position, then spin in place
    pub fn ball_transform(&self) -> Mat4 {
        let m = m4::identity();
        let m = m4::translate(m, self.ball.pos.x, self.ball.pos.y, 0.0);
        let m = m4::z_rotate(m, deg_to_rad(self.ball.spin_degrees));
        m4::scale(m, 1.0, 1.0, 1.0)
    }

    /// Paddle transform: translate to its edge at the current offset
    pub fn paddle_transform(&self, side: Side) -> Mat4 {
        m4::translate(
            m4::identity(),
            side.paddle_x(),
            self.paddle(side).offset,
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use proptest::prelude::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.ball.pos, Vec2::ZERO);
        assert_eq!(state.ball.vel, Vec2::new(0.01, 0.005));
        assert_eq!(state.left.offset, 0.0);
        assert_eq!(state.right.offset, 0.0);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.winner, None);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_paddle_stops_at_limit() {
        let mut paddle = Paddle::default();
        for _ in 0..40 {
            paddle.nudge(PaddleDir::Up);
        }
        assert!((paddle.offset - PADDLE_LIMIT).abs() < 1e-6);

        for _ in 0..80 {
            paddle.nudge(PaddleDir::Down);
        }
        assert!((paddle.offset + PADDLE_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn test_score_add_and_reset() {
        let mut score = Score::default();
        assert_eq!(score.add_point(Side::Left), 1);
        assert_eq!(score.add_point(Side::Left), 2);
        assert_eq!(score.add_point(Side::Right), 1);
        assert_eq!(score.get(Side::Left), 2);
        score.reset();
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_reset_rally() {
        let mut state = GameState::new();
        state.ball.pos = Vec2::new(1.02, 0.7);
        state.ball.vel = Vec2::new(-0.03, 0.004);
        state.left.offset = 0.4;
        state.right.offset = -0.6;

        state.reset_rally();

        assert_eq!(state.ball.pos, Vec2::ZERO);
        assert_eq!(state.ball.vel, Vec2::new(0.01, 0.005));
        assert_eq!(state.left.offset, 0.0);
        assert_eq!(state.right.offset, 0.0);
    }

    #[test]
    fn test_ball_transform_places_and_spins() {
        let mut state = GameState::new();
        state.ball.pos = Vec2::new(0.5, -0.25);
        state.ball.spin_degrees = 90.0;

        let m = state.ball_transform();
        let center = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((center.x - 0.5).abs() < 1e-6 && (center.y + 0.25).abs() < 1e-6);

        // A point on the rim is rotated a quarter turn around the center
        let rim = m * Vec4::new(BALL_RADIUS, 0.0, 0.0, 1.0);
        assert!((rim.x - 0.5).abs() < 1e-5);
        assert!((rim.y - (-0.25 + BALL_RADIUS)).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_transform() {
        let mut state = GameState::new();
        state.right.offset = 0.3;
        let p = state.paddle_transform(Side::Right) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 0.3).abs() < 1e-6);

        let p = state.paddle_transform(Side::Left) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p.x + 1.0).abs() < 1e-6);
    }

    fn dir_strategy() -> impl Strategy<Value = PaddleDir> {
        prop_oneof![Just(PaddleDir::Up), Just(PaddleDir::Down)]
    }

    proptest! {
        #[test]
        fn paddle_offset_stays_within_limit(moves in prop::collection::vec(dir_strategy(), 0..200)) {
            let mut paddle = Paddle::default();
            for dir in moves {
                paddle.nudge(dir);
                prop_assert!(paddle.offset.abs() <= PADDLE_LIMIT);
            }
        }
    }
}
