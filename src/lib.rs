//! Rally Pong - a two-player court game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (ball, paddles, score)
//! - `m4`: 4x4 transform helpers
//! - `renderer`: wgpu rendering pipeline and mesh generation
//! - `input`: Keyboard mapping
//! - `hud`: Score and winner text
//! - `audio`: Procedural sound effects
//! - `settings` / `tally`: Preferences and match results in LocalStorage

pub mod audio;
pub mod hud;
pub mod input;
pub mod m4;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tally;

pub use settings::{QualityPreset, Settings};
pub use tally::MatchTally;

/// Game configuration constants
///
/// Velocities are per simulation tick; positions are in clip space.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Court edge on both axes; paddles sit at x = ±COURT_EDGE
    pub const COURT_EDGE: f32 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.03;
    pub const BALL_START_VEL: (f32, f32) = (0.01, 0.005);
    /// Spin added every tick (degrees)
    pub const BALL_SPIN_PER_TICK: f32 = 2.0;
    /// Horizontal speed gained on every paddle return
    pub const RALLY_SPEEDUP_X: f32 = 0.005;
    /// Vertical drift added on every paddle return
    pub const RALLY_NUDGE_Y: f32 = 0.001;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 0.05;
    pub const PADDLE_HEIGHT: f32 = 0.3;
    /// Half-extent used for the hit test (center ± reach)
    pub const PADDLE_REACH: f32 = 0.15;
    /// Movement per key press
    pub const PADDLE_STEP: f32 = 0.05;
    /// Paddle center never leaves [-PADDLE_LIMIT, PADDLE_LIMIT]
    pub const PADDLE_LIMIT: f32 = 1.0 - 0.14;

    /// First to this many points takes the match
    pub const WIN_SCORE: u32 = 7;

    /// Triangles used to approximate the ball at full quality
    pub const CIRCLE_SEGMENTS: u32 = 5000;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}
