//! Canyon Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use canyon_dash::Settings;
    use canyon_dash::analytics::Collector;
    use canyon_dash::assets::Assets;
    use canyon_dash::highscores;
    use canyon_dash::renderer::Renderer;
    use canyon_dash::sim::{GameEvent, GameState, TickInput, tick};

    /// Fraction of the canvas width forming the left/right touch zones;
    /// taps in the middle band jump
    const TOUCH_ZONE: f32 = 0.3;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        assets: Assets,
        settings: Settings,
        collector: Collector,
        /// Staged input intent, consumed by the next tick
        input: TickInput,
        status: HtmlElement,
        start_btn: HtmlButtonElement,
        /// Presentation-layer toggle: skips update/draw but does NOT
        /// freeze the sim's wall-clock spawn timers
        paused: bool,
        /// Cleared on teardown; stops rescheduling the next frame
        alive: bool,
        raf_id: Option<i32>,
    }

    impl Game {
        /// Start or restart a run (gated on the asset loading gate)
        fn start(&mut self, now_ms: f64) {
            if !self.assets.ready() {
                log::warn!("Start ignored: assets still loading");
                return;
            }

            self.state.start(now_ms, highscores::load());
            self.input = TickInput::default();
            self.start_btn.set_text_content(Some("Restart Game"));
            log::info!("Game started");
        }

        /// One animation frame: advance the sim, render, publish state
        fn frame(&mut self, now_ms: f64) {
            let input = self.input;
            tick(&mut self.state, &input, now_ms);
            self.input.jump = false; // one-shot

            self.renderer
                .draw(&self.state, &self.assets, &self.settings, now_ms);
            self.update_status();
            self.publish_events();
        }

        /// Write the host status line: `Score: {n}[ ({m}x)] | Lives: {l}`
        fn update_status(&self) {
            let mut text = format!("Score: {}", self.state.score);
            if self.state.score_multiplier > 1 {
                text.push_str(&format!(" ({}x)", self.state.score_multiplier));
            }
            text.push_str(&format!(" | Lives: {}", self.state.lives));
            self.status.set_text_content(Some(&text));
        }

        /// Drain sim telemetry to the collector; persist a new best score
        /// the moment the sim reports one
        fn publish_events(&mut self) {
            for event in self.state.drain_events() {
                if let GameEvent::HighScoreAchieved { high_score, .. } = &event {
                    highscores::save(*high_score);
                }
                if let GameEvent::GameEnded { .. } = &event {
                    self.start_btn.set_text_content(Some("Play Again"));
                }
                self.collector.send(&event);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Canyon Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // All referenced elements are a caller contract: missing ones are
        // a page bug, not a recoverable state
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let status: HtmlElement = document
            .get_element_by_id("score")
            .expect("no score element")
            .dyn_into()
            .expect("not an element");
        let start_btn: HtmlButtonElement = element(&document, "start-btn");
        let left_btn: HtmlButtonElement = element(&document, "left-btn");
        let right_btn: HtmlButtonElement = element(&document, "right-btn");
        let jump_btn: HtmlButtonElement = element(&document, "jump-btn");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, canvas.width() as f32, canvas.height() as f32);
        log::info!("Engine initialized with seed: {}", seed);

        let renderer = Renderer::new(&canvas).expect("failed to create renderer");
        let assets = Assets::load("/assets/canyon-dash");
        let collector = Collector::new(canvas.get_attribute("data-collector"));

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer,
            assets,
            settings: Settings::load(),
            collector,
            input: TickInput::default(),
            status,
            start_btn: start_btn.clone(),
            paused: false,
            alive: true,
            raf_id: None,
        }));

        setup_start_button(&start_btn, game.clone());
        setup_keyboard(game.clone());
        setup_touch_zones(&canvas, game.clone());
        setup_move_button(&left_btn, game.clone(), MoveButton::Left);
        setup_move_button(&right_btn, game.clone(), MoveButton::Right);
        setup_jump_button(&jump_btn, game.clone());
        setup_auto_pause(game.clone());
        setup_teardown(game.clone());

        request_animation_frame(game);

        log::info!("Canyon Dash running!");
    }

    fn element<T: JsCast>(document: &web_sys::Document, id: &str) -> T {
        document
            .get_element_by_id(id)
            .unwrap_or_else(|| panic!("no #{} element", id))
            .dyn_into()
            .unwrap_or_else(|_| panic!("#{} has unexpected element type", id))
    }

    fn setup_start_button(btn: &HtmlButtonElement, game: Rc<RefCell<Game>>) {
        let btn_clone = btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let now = js_sys::Date::now();
            game.borrow_mut().start(now);

            // Debounce restarts for a second
            btn_clone.set_disabled(true);
            let btn_inner = btn_clone.clone();
            let enable = Closure::once_into_js(move || {
                btn_inner.set_disabled(false);
            });
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    enable.unchecked_ref(),
                    1000,
                );
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" | "KeyA" => g.input.move_left = true,
                    "ArrowRight" | "KeyD" => g.input.move_right = true,
                    "Space" => {
                        event.prevent_default();
                        g.input.jump = true;
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" | "KeyA" => g.input.move_left = false,
                    "ArrowRight" | "KeyD" => g.input.move_right = false,
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Canvas touch zones: left third steers left, right third steers
    /// right, the middle band jumps
    fn setup_touch_zones(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let rect = canvas_clone.get_bounding_client_rect();
                let x = touch.client_x() as f32 - rect.left() as f32;
                let width = canvas_clone.width() as f32;

                let mut g = game.borrow_mut();
                if x < width * TOUCH_ZONE {
                    g.input.move_left = true;
                } else if x > width * (1.0 - TOUCH_ZONE) {
                    g.input.move_right = true;
                } else {
                    g.input.jump = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.move_left = false;
                g.input.move_right = false;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    #[derive(Clone, Copy)]
    enum MoveButton {
        Left,
        Right,
    }

    /// Hold-style control button: pressed on touchstart/mousedown,
    /// released on touchend/touchcancel/mouseup/mouseleave
    fn setup_move_button(btn: &HtmlButtonElement, game: Rc<RefCell<Game>>, which: MoveButton) {
        let set = move |game: &Rc<RefCell<Game>>, held: bool| {
            let mut g = game.borrow_mut();
            match which {
                MoveButton::Left => g.input.move_left = held,
                MoveButton::Right => g.input.move_right = held,
            }
        };

        for (event_name, held) in [
            ("touchstart", true),
            ("touchend", false),
            ("touchcancel", false),
            ("mousedown", true),
            ("mouseup", false),
            ("mouseleave", false),
        ] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                set(&game, held);
            });
            let _ = btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        suppress_context_menu(btn);
    }

    fn setup_jump_button(btn: &HtmlButtonElement, game: Rc<RefCell<Game>>) {
        for event_name in ["touchstart", "mousedown"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                game.borrow_mut().input.jump = true;
            });
            let _ = btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        suppress_context_menu(btn);
    }

    /// Long-press on a control button must not open the context menu
    fn suppress_context_menu(btn: &HtmlButtonElement) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
        });
        let _ = btn.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Tab hidden: skip update/draw. The sim's spawn timers keep running
    /// against the wall clock, so resuming produces catch-up spawns.
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            game.borrow_mut().paused = hidden;
            if hidden {
                log::info!("Rendering paused (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Teardown: cancel the pending frame callback so the loop stops
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.alive = false;
            if let Some(id) = g.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            log::info!("Engine torn down");
        });
        let _ = window
            .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let game_clone = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game_clone);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().raf_id = Some(id),
            Err(_) => log::error!("Failed to schedule animation frame"),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if !g.alive {
                return;
            }
            if !g.paused {
                // Spawn timers compare against this wall clock
                let now = js_sys::Date::now();
                g.frame(now);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canyon_dash::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Canyon Dash (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 for the playable version");

    // Headless smoke run: 3600 frames (~one minute) with periodic jumps
    let mut state = GameState::new(42, 800.0, 400.0);
    state.start(0.0, 0);

    for frame in 0..3600u32 {
        let input = TickInput {
            jump: frame % 75 == 0,
            ..Default::default()
        };
        tick(&mut state, &input, f64::from(frame) * 16.0);
        for event in state.drain_events() {
            log::debug!("event: {:?}", event);
        }
        if state.phase == GamePhase::Ended {
            break;
        }
    }

    println!(
        "Demo finished: score {} | lives {} | speed {:.2} | obstacles passed {}",
        state.score, state.lives, state.game_speed, state.stats.total_obstacles_avoided
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
