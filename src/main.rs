//! Tomato Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use tomato_shooter::consts::MAX_FRAME_MS;
    use tomato_shooter::sim::{GameState, tick};
    use tomato_shooter::{Display, EntityKind, HeldKeys, Key, Skin, Tuning, VisualHandle};

    // Scene bridge provided by the page. It owns the meshes, lights and camera
    // and builds the plain or produce-themed shape for each kind.
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = shooterScene, js_name = createVisual)]
        fn scene_create_visual(kind: &str, skin: &str, x: f32, y: f32, z: f32) -> u32;
        #[wasm_bindgen(js_namespace = shooterScene, js_name = removeVisual)]
        fn scene_remove_visual(id: u32);
        #[wasm_bindgen(js_namespace = shooterScene, js_name = placeVisual)]
        fn scene_place_visual(id: u32, x: f32, y: f32, z: f32, rx: f32, ry: f32, rz: f32);
        #[wasm_bindgen(js_namespace = shooterScene, js_name = setPlayerVisible)]
        fn scene_set_player_visible(visible: bool);
    }

    /// Display backed by the page scene and the HUD elements
    struct DomDisplay {
        document: Document,
        skin: Skin,
    }

    impl DomDisplay {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }
    }

    impl Display for DomDisplay {
        fn create_visual(&mut self, kind: EntityKind, position: Vec3) -> VisualHandle {
            VisualHandle(scene_create_visual(
                kind.as_str(),
                self.skin.as_str(),
                position.x,
                position.y,
                position.z,
            ))
        }

        fn remove_visual(&mut self, handle: VisualHandle) {
            scene_remove_visual(handle.0);
        }

        fn place_visual(&mut self, handle: VisualHandle, position: Vec3, orientation: Vec3) {
            scene_place_visual(
                handle.0,
                position.x,
                position.y,
                position.z,
                orientation.x,
                orientation.y,
                orientation.z,
            );
        }

        fn set_player_visibility(&mut self, visible: bool) {
            scene_set_player_visible(visible);
        }

        fn update_score(&mut self, score: u64) {
            self.set_text("scoreValue", &score.to_string());
        }

        fn update_life(&mut self, life: u8) {
            self.set_text("lifeValue", &life.to_string());
        }

        fn show_game_over(&mut self, final_score: u64) {
            self.set_text("finalScore", &final_score.to_string());
            self.set_hidden("game-over", false);
        }

        fn hide_game_over(&mut self) {
            self.set_hidden("game-over", true);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        display: DomDisplay,
        keys: HeldKeys,
        /// Session clock (ms), advanced by clamped frame deltas
        clock_ms: f64,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, document: Document) -> Self {
            let mut display = DomDisplay {
                document,
                skin: tuning.skin,
            };
            let state = GameState::new(seed, tuning, &mut display);
            Self {
                state,
                display,
                keys: HeldKeys::default(),
                clock_ms: 0.0,
                last_time: 0.0,
            }
        }

        /// Advance timers to this frame, then run one tick
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;
            self.clock_ms += dt;

            self.state.advance_clock(self.clock_ms, &mut self.display);
            let input = self.keys.tick_input();
            tick(&mut self.state, &input, &mut self.display);
        }

        fn fire(&mut self) {
            self.state.fire(&mut self.display);
        }

        fn restart(&mut self) {
            self.state.reset(&mut self.display);
            self.keys.clear();
        }
    }

    /// Optional overrides from `<div id="game-container" data-tuning="..." data-skin="...">`
    fn load_tuning(document: &Document) -> Tuning {
        let container = document.get_element_by_id("game-container");
        let mut tuning = container
            .as_ref()
            .and_then(|el| el.get_attribute("data-tuning"))
            .map(|json| Tuning::from_json_or_default(&json))
            .unwrap_or_default();

        if let Some(name) = container.and_then(|el| el.get_attribute("data-skin")) {
            match Skin::from_str(&name) {
                Some(skin) => tuning.skin = skin,
                None => log::warn!("Unknown skin '{}', keeping {}", name, tuning.skin.as_str()),
            }
        }
        tuning
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tomato Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, document)));

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Tomato Shooter running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    if key == Key::Fire {
                        event.prevent_default(); // Keep space from scrolling the page
                    }
                    game.borrow_mut().keys.press(key);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().keys.release(key);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down fires
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().fire();
            });
            let _ = document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events will not arrive, so drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restartButton") {
            // The button's mousedown already reached the document listener; that
            // shot is refused because fire is a no-op while the game is over
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
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
        game.borrow_mut().frame(time);
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
    env_logger::init();
    log::info!("Tomato Shooter (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    let tuning = load_tuning();
    run_headless(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Tuning from the JSON file named by the first argument, if any
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning() -> tomato_shooter::Tuning {
    use tomato_shooter::Tuning;

    match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    }
}

/// Sweep across the lane firing continuously until the run ends or two
/// simulated minutes pass, then check that a reset starts clean.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(tuning: tomato_shooter::Tuning) {
    use tomato_shooter::sim::{GameState, TickInput, tick};
    use tomato_shooter::{EntityKind, RecordingDisplay};

    const SEED: u64 = 0x5EED;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u64 = 120 * 60;

    let mut display = RecordingDisplay::new();
    let mut state = GameState::new(SEED, tuning, &mut display);

    for frame in 0..MAX_FRAMES {
        state.advance_clock(frame as f64 * FRAME_MS, &mut display);
        let sweep_right = (frame / 90) % 2 == 0;
        let input = TickInput {
            left: !sweep_right,
            right: sweep_right,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut display);
        if state.is_game_over() {
            break;
        }
    }

    let snapshot = state.snapshot();
    match serde_json::to_string(&snapshot) {
        Ok(json) => log::info!("Run finished: {}", json),
        Err(e) => log::warn!("Could not encode snapshot: {}", e),
    }
    println!(
        "Score {} | lives {} | {} ticks | spawn interval {} ms{}",
        snapshot.score,
        snapshot.life,
        snapshot.time_ticks,
        snapshot.spawn_interval_ms,
        if snapshot.game_over { " | GAME OVER" } else { "" }
    );

    state.reset(&mut display);
    assert_eq!(state.score, 0, "reset must clear the score");
    assert!(state.entities.is_empty(), "reset must clear the store");
    assert_eq!(
        display.count(EntityKind::Adversary) + display.count(EntityKind::Projectile),
        0,
        "reset must release every visual"
    );
    assert_eq!(display.stale_removals, 0, "no visual may be released twice");
    println!("✓ Reset restored a clean session");
}
