//! Rally Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::Context;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use rally_pong::audio::{AudioManager, SoundEffect};
    use rally_pong::consts::SIM_DT;
    use rally_pong::hud;
    use rally_pong::input;
    use rally_pong::renderer::{PackedMeshes, RenderState, Scene};
    use rally_pong::sim::{GameEvent, GamePhase, GameState, Score, TickInput, frame_steps, tick};
    use rally_pong::{MatchTally, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scene: Scene,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        settings: Settings,
        tally: MatchTally,
        audio: AudioManager,
        /// Score currently written into the labels
        shown_score: Score,
        /// Labels need rewriting on the next frame
        hud_dirty: bool,
    }

    impl Game {
        fn new(settings: Settings, tally: MatchTally) -> Self {
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                state: GameState::new(),
                scene: Scene::new(settings.quality.circle_segments()),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                settings,
                tally,
                audio,
                shown_score: Score::default(),
                hud_dirty: true,
            }
        }

        /// Run simulation ticks, returning the winner message if a match ended
        fn update(&mut self, dt: f32) -> Option<String> {
            let mut events = Vec::new();
            for _ in 0..frame_steps(&mut self.accumulator, dt) {
                events.extend(tick(&mut self.state, &self.input));
                // Clear one-shot inputs after processing
                self.input.clear();
            }
            self.shown_score = hud::displayed_score(self.shown_score, &events);

            let mut message = None;
            for event in &events {
                self.audio.play(SoundEffect::for_event(event));
                match event {
                    GameEvent::Scored { .. } => self.hud_dirty = true,
                    GameEvent::MatchWon(side) => {
                        let wins = self.tally.record(*side, js_sys::Date::now());
                        self.tally.save();
                        log::info!(
                            "Player {} has won {} matches ({})",
                            side.player_number(),
                            wins,
                            self.tally.standings()
                        );
                        message = Some(hud::winner_message(*side));
                        self.hud_dirty = true;
                    }
                    _ => {}
                }
            }
            message
        }

        /// Render the current frame
        fn render(&mut self) {
            let calls = self.scene.draw_list(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&calls) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update score text in DOM
        fn update_hud(&mut self) {
            if !self.hud_dirty {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            for (side, label) in hud::score_labels(&self.shown_score) {
                if let Some(el) = document.query_selector(hud::score_selector(side)).ok().flatten() {
                    el.set_text_content(Some(&label));
                }
            }
            self.hud_dirty = false;
        }

        /// Step to the next quality preset and rebuild the ball mesh
        fn cycle_quality(&mut self) {
            self.settings.quality = self.settings.quality.cycle();
            self.settings.save();
            self.scene = Scene::new(self.settings.quality.circle_segments());
            if let Some(ref mut render_state) = self.render_state {
                render_state.upload_meshes(self.scene.pack());
            }
            log::info!("Quality: {}", self.settings.quality.as_str());
        }

        /// Queue a pause if the rally is running and none is pending
        fn auto_pause(&mut self, reason: &str) {
            if self.settings.pause_on_blur
                && self.state.phase == GamePhase::Playing
                && !self.input.pause
            {
                self.input.pause = true;
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    /// Create surface, adapter, device and pipeline for the canvas
    async fn init_graphics(
        canvas: &HtmlCanvasElement,
        meshes: PackedMeshes,
        width: u32,
        height: u32,
    ) -> anyhow::Result<RenderState> {
        // WebGPU where available, WebGL2 otherwise
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible graphics adapter")?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, meshes).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Rally Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .query_selector("#c")?
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "#c is not a canvas")?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let tally = MatchTally::load();
        log::info!("Match tally: {}", tally.standings());
        let game = Rc::new(RefCell::new(Game::new(Settings::load(), tally)));

        let meshes = game.borrow().scene.pack();
        let render_state = init_graphics(&canvas, meshes, width, height)
            .await
            .map_err(|e| {
                log::error!("{:#}", e);
                JsValue::from_str(&format!("graphics context unavailable: {:#}", e))
            })?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Rally Pong running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            // First key press doubles as the gesture that unlocks audio
            g.audio.resume();

            let key = event.key();
            if input::apply_key(&mut g.input, &key) {
                event.prevent_default();
            } else if key == "q" || key == "Q" {
                g.cycle_quality();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let message = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let message = g.update(dt);
            g.render();
            g.update_hud();
            message
        };

        // alert blocks, so it runs with the game released
        if let Some(message) = message {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&message);
            }
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rally Pong (native) starting...");
    log::info!("Rendering needs a browser canvas - run with `trunk serve` for the web version");

    headless_rally(20_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a match between two paddles that chase the ball, logging events
#[cfg(not(target_arch = "wasm32"))]
fn headless_rally(max_ticks: u32) {
    use rally_pong::consts::PADDLE_STEP;
    use rally_pong::hud;
    use rally_pong::sim::{GameEvent, GameState, PaddleDir, PaddleMove, Side, TickInput, tick};

    let mut state = GameState::new();
    let mut input = TickInput::default();
    let mut hits = 0u32;

    for _ in 0..max_ticks {
        for side in Side::BOTH {
            let gap = state.ball.pos.y - state.paddle(side).offset;
            if gap.abs() > PADDLE_STEP / 2.0 {
                let dir = if gap > 0.0 { PaddleDir::Up } else { PaddleDir::Down };
                input.moves.push(PaddleMove { side, dir });
            }
        }

        for event in tick(&mut state, &input) {
            match event {
                GameEvent::PaddleHit(_) => hits += 1,
                GameEvent::WallBounce => log::debug!("Wall bounce at tick {}", state.time_ticks),
                GameEvent::Scored { scorer, score } => log::info!(
                    "Point to player {} after {} returns ({} / {})",
                    scorer.player_number(),
                    hits,
                    hud::score_label(Side::Left, score.left),
                    hud::score_label(Side::Right, score.right),
                ),
                GameEvent::MatchWon(side) => {
                    log::info!("{} ({} ticks)", hud::winner_message(side), state.time_ticks);
                    return;
                }
            }
        }
        input.clear();
    }

    log::info!("No winner after {} ticks ({} returns)", max_ticks, hits);
}
