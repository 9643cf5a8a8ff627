//! Nova Strike entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use nova_strike::HighScores;
    use nova_strike::Settings;
    use nova_strike::assets::AssetStore;
    use nova_strike::consts::*;
    use nova_strike::renderer::CanvasRenderer;
    use nova_strike::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        highscores: HighScores,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                renderer: None,
                settings: Settings::load(),
                highscores: HighScores::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.restart = false;

                self.handle_events();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// React to what the last tick reported
        fn handle_events(&mut self) {
            for event in self.state.events.clone() {
                if let GameEvent::GameOver { score } = event {
                    let rank =
                        self.highscores
                            .add_score(score, self.state.kills, js_sys::Date::now());
                    if let Some(rank) = rank {
                        log::info!("New high score, rank {}", rank);
                        self.highscores.save();
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&self.state);
            }
        }

        /// Update HUD elements and overlay visibility in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-lives") {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Phase transitions toggle the overlays
            if let Some(el) = document.get_element_by_id("start-overlay") {
                let class = if self.state.phase == GamePhase::NotStarted {
                    "game-overlay active"
                } else {
                    "game-overlay"
                };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("gameover-overlay") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "game-overlay active");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("best-score") {
                        let best = self.highscores.top_score().unwrap_or(0);
                        best_el.set_text_content(Some(&best.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "game-overlay");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Nova Strike starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Resolve every sprite (success or placeholder) before Start unlocks
        let assets = AssetStore::load_all().await;
        debug_assert!(assets.all_resolved());
        {
            let mut g = game.borrow_mut();
            let starfield = g.settings.effective_starfield();
            g.renderer = Some(
                CanvasRenderer::new(&canvas, assets, starfield).expect("canvas renderer"),
            );
        }

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let _ = btn.remove_attribute("disabled");
            btn.set_text_content(Some("Start"));
        }

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Nova Strike running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key held/released flags feed the per-frame input snapshot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    "ArrowUp" | "w" | "W" => g.input.up = true,
                    "ArrowDown" | "s" | "S" => g.input.down = true,
                    " " => {
                        g.input.fire = true;
                        event.prevent_default();
                    }
                    "Enter" => match g.state.phase {
                        GamePhase::NotStarted => g.input.start = true,
                        GamePhase::GameOver => g.input.restart = true,
                        GamePhase::Playing => {}
                    },
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    "ArrowUp" | "w" | "W" => g.input.up = false,
                    "ArrowDown" | "s" | "S" => g.input.down = false,
                    " " => g.input.fire = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Nova Strike (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the simulation for up to 30 seconds of scripted play and report
/// the outcome. Exercises the full tick path without a browser.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use nova_strike::consts::SIM_DT;
    use nova_strike::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(42);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        SIM_DT,
    );

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    for i in 0..1800u32 {
        // Sweep left and right across the field while firing
        input.left = (i / 90) % 2 == 0;
        input.right = !input.left;
        tick(&mut state, &input, SIM_DT);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "demo over after {} ticks: score {}, {} kills, {} lives left",
        state.time_ticks, state.score, state.kills, state.lives
    );
}
