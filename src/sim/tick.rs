//! Fixed timestep simulation tick
//!
//! Advances the rally by one frame's worth of motion. Velocities are stored
//! per tick, so `tick` takes no `dt`; callers run it at `SIM_DT`.

use super::court::{Side, paddle_covers, reached_edge};
use super::state::{GameEvent, GamePhase, GameState, PaddleDir};
use crate::consts::*;

/// A single paddle key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddleMove {
    pub side: Side,
    pub dir: PaddleDir,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle presses since the previous tick, in arrival order
    pub moves: Vec<PaddleMove>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Drop one-shot commands once a tick has consumed them
    pub fn clear(&mut self) {
        self.moves.clear();
        self.pause = false;
    }
}

/// Number of ticks to run for a frame of `dt` seconds.
///
/// `dt` is capped at 0.1 s and at most `MAX_SUBSTEPS` ticks run. Time left
/// over beyond one tick is dropped.
pub fn frame_steps(accumulator: &mut f32, dt: f32) -> u32 {
    *accumulator += dt.min(0.1);

    let mut steps = 0;
    while *accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
        *accumulator -= SIM_DT;
        steps += 1;
    }
    *accumulator = accumulator.min(SIM_DT);
    steps
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        };
    }

    // Paddles answer the keys even while the ball is frozen
    for mv in &input.moves {
        state.paddle_mut(mv.side).nudge(mv.dir);
    }

    if state.phase == GamePhase::Paused {
        return events;
    }

    state.time_ticks += 1;
    state.ball.spin_degrees = (state.ball.spin_degrees + BALL_SPIN_PER_TICK).rem_euclid(360.0);

    // Right edge first, then left
    for side in [Side::Right, Side::Left] {
        if !reached_edge(side, state.ball.pos.x) {
            continue;
        }

        if paddle_covers(state.paddle(side).offset, state.ball.pos.y) {
            let inward = side.inward();
            let ball = &mut state.ball;
            ball.vel.x = -ball.vel.x + inward * RALLY_SPEEDUP_X;
            ball.vel.y += inward * RALLY_NUDGE_Y;
            events.push(GameEvent::PaddleHit(side));
        } else {
            let scorer = side.opponent();
            state.score.add_point(scorer);
            state.reset_rally();
            log::debug!(
                "Player {} scores ({}-{})",
                scorer.player_number(),
                state.score.left,
                state.score.right
            );
            events.push(GameEvent::Scored {
                scorer,
                score: state.score,
            });
        }
    }

    let ball = &mut state.ball;
    ball.pos.x += ball.vel.x;
    if ball.pos.y.abs() > COURT_EDGE {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::WallBounce);
    }
    ball.pos.y += ball.vel.y;

    if let Some(side) = Side::BOTH
        .into_iter()
        .find(|&side| state.score.get(side) >= WIN_SCORE)
    {
        log::info!("Player {} wins the match", side.player_number());
        state.winner = Some(side);
        state.score.reset();
        events.push(GameEvent::MatchWon(side));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Score;
    use glam::Vec2;

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn assert_vec2(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).abs().max_element() < 1e-6,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_ball_advances_and_spins() {
        let mut state = GameState::new();
        let events = tick(&mut state, &idle());

        assert!(events.is_empty());
        assert_vec2(state.ball.pos, Vec2::new(0.01, 0.005));
        assert_eq!(state.ball.spin_degrees, 2.0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_right_paddle_returns_ball() {
        let mut state = GameState::new();
        state.ball.pos = Vec2::new(1.0, 0.1);
        state.ball.vel = Vec2::new(0.02, 0.005);

        let events = tick(&mut state, &idle());

        assert_eq!(events, vec![GameEvent::PaddleHit(Side::Right)]);
        assert_vec2(state.ball.vel, Vec2::new(-0.025, 0.004));
        assert_vec2(state.ball.pos, Vec2::new(0.975, 0.104));
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_left_paddle_returns_ball() {
        let mut state = GameState::new();
        state.left.offset = -0.1;
        state.ball.pos = Vec2::new(-1.0, -0.05);
        state.ball.vel = Vec2::new(-0.02, -0.005);

        let events = tick(&mut state, &idle());

        assert_eq!(events, vec![GameEvent::PaddleHit(Side::Left)]);
        assert_vec2(state.ball.vel, Vec2::new(0.025, -0.004));
    }

    #[test]
    fn test_miss_scores_for_opponent_and_resets() {
        let mut state = GameState::new();
        state.ball.pos = Vec2::new(1.01, 0.5);
        state.ball.vel = Vec2::new(0.03, 0.004);
        state.left.offset = 0.35;

        let events = tick(&mut state, &idle());

        assert_eq!(
            events,
            vec![GameEvent::Scored {
                scorer: Side::Left,
                score: Score { left: 1, right: 0 },
            }]
        );
        // Served from the center and moved one step this tick
        assert_vec2(state.ball.pos, Vec2::new(0.01, 0.005));
        assert_vec2(state.ball.vel, Vec2::new(0.01, 0.005));
        assert_eq!(state.left.offset, 0.0);
        assert_eq!(state.right.offset, 0.0);
    }

    #[test]
    fn test_left_miss_scores_for_right() {
        let mut state = GameState::new();
        state.ball.pos = Vec2::new(-1.0, -0.6);
        state.ball.vel = Vec2::new(-0.02, 0.0);

        tick(&mut state, &idle());

        assert_eq!(state.score, Score { left: 0, right: 1 });
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut state = GameState::new();
        state.ball.pos = Vec2::new(0.0, 1.002);
        state.ball.vel = Vec2::new(0.01, 0.005);

        let events = tick(&mut state, &idle());

        assert_eq!(events, vec![GameEvent::WallBounce]);
        assert_vec2(state.ball.vel, Vec2::new(0.01, -0.005));
        assert!((state.ball.pos.y - 0.997).abs() < 1e-6);
    }

    #[test]
    fn test_seventh_point_wins_match() {
        let mut state = GameState::new();
        state.score = Score { left: 6, right: 4 };
        state.ball.pos = Vec2::new(1.0, 0.9);

        let events = tick(&mut state, &idle());

        assert_eq!(
            events,
            vec![
                GameEvent::Scored {
                    scorer: Side::Left,
                    score: Score { left: 7, right: 4 },
                },
                GameEvent::MatchWon(Side::Left),
            ]
        );
        assert_eq!(state.winner, Some(Side::Left));
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_moves_apply_before_edge_check() {
        let mut state = GameState::new();
        state.right.offset = 0.25;
        state.ball.pos = Vec2::new(1.0, 0.06);
        // One step down brings the paddle back in reach
        let input = TickInput {
            moves: vec![PaddleMove {
                side: Side::Right,
                dir: PaddleDir::Down,
            }],
            ..Default::default()
        };

        let events = tick(&mut state, &input);

        assert!((state.right.offset - 0.2).abs() < 1e-6);
        assert_eq!(events, vec![GameEvent::PaddleHit(Side::Right)]);
    }

    #[test]
    fn test_frame_steps_at_display_rate() {
        let mut acc = 0.0;
        let total: u32 = (0..60).map(|_| frame_steps(&mut acc, SIM_DT)).sum();
        assert!((59..=60).contains(&total));
        assert!(acc <= SIM_DT);
    }

    #[test]
    fn test_slow_frames_do_not_bank_time() {
        let mut acc = 0.0;
        // Ten frames at 5 fps
        for _ in 0..10 {
            assert_eq!(frame_steps(&mut acc, 0.2), MAX_SUBSTEPS);
            assert!(acc <= SIM_DT);
        }
        // Back at full rate: no burst of catch-up ticks
        assert!(frame_steps(&mut acc, SIM_DT) <= 2);
    }

    #[test]
    fn test_pause_freezes_ball_but_not_paddles() {
        let mut state = GameState::new();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.ball.pos;

        let nudge = TickInput {
            moves: vec![PaddleMove {
                side: Side::Left,
                dir: PaddleDir::Up,
            }],
            ..Default::default()
        };
        let events = tick(&mut state, &nudge);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, frozen);
        assert_eq!(state.time_ticks, 0);
        assert!((state.left.offset - PADDLE_STEP).abs() < 1e-6);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.ball.pos, frozen);
    }

    #[test]
    fn test_idle_players_concede_first_point_to_left() {
        let mut state = GameState::new();
        let mut scored = Vec::new();
        for _ in 0..150 {
            for event in tick(&mut state, &idle()) {
                if let GameEvent::Scored { scorer, .. } = event {
                    scored.push(scorer);
                }
            }
        }
        assert_eq!(scored, vec![Side::Left]);
    }

    #[test]
    fn test_tracking_players_keep_rally_alive() {
        let mut state = GameState::new();
        let mut hits = 0;

        for _ in 0..600 {
            let mut input = TickInput::default();
            for side in Side::BOTH {
                let offset = state.paddle(side).offset;
                let dir = if state.ball.pos.y > offset + 0.01 {
                    Some(PaddleDir::Up)
                } else if state.ball.pos.y < offset - 0.01 {
                    Some(PaddleDir::Down)
                } else {
                    None
                };
                if let Some(dir) = dir {
                    input.moves.push(PaddleMove { side, dir });
                }
            }

            for event in tick(&mut state, &input) {
                match event {
                    GameEvent::PaddleHit(_) => hits += 1,
                    GameEvent::Scored { .. } | GameEvent::MatchWon(_) => {
                        panic!("tracking paddle missed: {event:?}")
                    }
                    GameEvent::WallBounce => {}
                }
            }
        }

        assert!(hits >= 5);
    }
}
