//! Rally simulation
//!
//! All gameplay logic lives here, with no rendering or platform
//! dependencies. One call to `tick` is one display frame at 60 Hz.

pub mod court;
pub mod state;
pub mod tick;

pub use court::{Side, paddle_covers, reached_edge};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, PaddleDir, Score};
pub use tick::{PaddleMove, TickInput, frame_steps, tick};
