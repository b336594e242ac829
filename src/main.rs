//! Orbit Survivor entry point
//!
//! The web build drives the game from `requestAnimationFrame` and hands each
//! frame to a page-provided renderer. The native build runs a headless
//! session with an autopilot:
//!
//! ```text
//! orbit-survivor [seed] [ticks] [tuning.json]
//! ```

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent, MouseEvent, PointerEvent, Window};

    use orbit_survivor::driver::Frame;
    use orbit_survivor::hud::HudCounters;
    use orbit_survivor::input::{Direction, InputAction};
    use orbit_survivor::{ControlScheme, FrameHandle, FrameScheduler, GameLoop, Settings, Tuning};

    #[wasm_bindgen]
    extern "C" {
        /// Page-provided renderer, called with the frame snapshot as JSON
        #[wasm_bindgen(catch, js_namespace = window, js_name = renderOrbitSurvivor)]
        fn render_frame(snapshot_json: &str) -> Result<(), JsValue>;
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
    type Game = Rc<RefCell<GameLoop<RafScheduler>>>;
    type SharedSettings = Rc<RefCell<Settings>>;

    /// Global the page may set to a JSON balance table before loading
    const TUNING_GLOBAL: &str = "orbitSurvivorTuning";

    struct Session {
        game: Game,
        callback: FrameCallback,
        settings: SharedSettings,
    }

    thread_local! {
        static RUNNING: RefCell<Option<Session>> = const { RefCell::new(None) };
    }

    /// `requestAnimationFrame` behind the driver's scheduler seam
    struct RafScheduler {
        window: Window,
        callback: FrameCallback,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            let id = match self.callback.borrow().as_ref() {
                Some(callback) => self
                    .window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .unwrap_or(0),
                None => 0,
            };
            FrameHandle(id as u32)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            let _ = self.window.cancel_animation_frame(handle.0 as i32);
        }
    }

    fn new_seed() -> u64 {
        js_sys::Date::now() as u64
    }

    /// Balance table from `window.orbitSurvivorTuning`, defaults when absent
    fn load_tuning(window: &Window) -> Tuning {
        match js_sys::Reflect::get(window, &JsValue::from_str(TUNING_GLOBAL))
            .ok()
            .and_then(|value| value.as_string())
        {
            Some(json) => {
                log::info!("Using tuning table from window.{}", TUNING_GLOBAL);
                Tuning::from_json_or_default(&json)
            }
            None => Tuning::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Orbit Survivor starting...");

        let window = web_sys::window().expect("no global window");
        let document = window.document().expect("no document");
        let settings: SharedSettings = Rc::new(RefCell::new(Settings::load()));

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: callback.clone(),
        };
        let game: Game = Rc::new(RefCell::new(GameLoop::new(
            new_seed(),
            load_tuning(&window),
            scheduler,
        )));

        {
            let game = game.clone();
            let document = document.clone();
            let settings = settings.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                let frame = {
                    let mut g = game.borrow_mut();
                    match g.pending() {
                        Some(handle) => g.on_frame(handle, time),
                        None => None,
                    }
                };
                if let Some(frame) = frame {
                    present(&document, &frame, settings.borrow().show_fps);
                }
            }));
        }

        setup_keyboard(&window, game.clone());
        setup_buttons(&document, game.clone());
        setup_joystick(&document, game.clone(), settings.clone());
        setup_auto_pause(&window, &document, game.clone());
        show_controls(&document, settings.borrow().control_scheme);

        game.borrow_mut().start();
        RUNNING.with(|running| {
            *running.borrow_mut() = Some(Session {
                game,
                callback,
                settings,
            })
        });
    }

    /// Switch movement controls and persist the choice
    pub fn set_control_scheme(name: &str) -> bool {
        let Some(scheme) = ControlScheme::from_str(name) else {
            log::warn!("Unknown control scheme {:?}", name);
            return false;
        };
        RUNNING.with(|running| {
            if let Some(session) = running.borrow().as_ref() {
                let mut settings = session.settings.borrow_mut();
                settings.control_scheme = scheme;
                settings.save();
                session.game.borrow_mut().set_joystick(Vec2::ZERO);
            }
        });
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            show_controls(&document, scheme);
        }
        log::info!("Control scheme set to {}", scheme.as_str());
        true
    }

    /// Cancel the pending frame and release the frame callback
    pub fn stop() {
        RUNNING.with(|running| {
            if let Some(session) = running.borrow_mut().take() {
                session.game.borrow_mut().stop();
                session.callback.borrow_mut().take();
            }
        });
    }

    fn present(document: &Document, frame: &Frame, show_fps: bool) {
        match frame.snapshot.to_json() {
            Ok(json) => {
                if let Err(err) = render_frame(&json) {
                    log::warn!("Renderer failed: {:?}", err);
                }
            }
            Err(err) => log::warn!("Snapshot serialization failed: {}", err),
        }

        if let Some(hud) = &frame.hud {
            update_hud(document, hud);
        }
        if show_fps {
            set_text(document, "#hud-fps .hud-value", &frame.fps.to_string());
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(el: &Element, hidden: bool) {
        let _ = el.class_list().toggle_with_force("hidden", hidden);
    }

    /// Update HUD elements in DOM
    fn update_hud(document: &Document, hud: &HudCounters) {
        set_text(document, "#hud-score .hud-value", &hud.score.to_string());
        set_text(document, "#hud-level .hud-value", &hud.level.to_string());
        set_text(
            document,
            "#hud-health .hud-value",
            &format!("{}/{}", hud.health, hud.max_health),
        );
        set_text(
            document,
            "#hud-exp .hud-value",
            &format!("{}/{}", hud.experience, hud.experience_to_next),
        );
        set_text(
            document,
            "#hud-enemies .hud-value",
            &hud.enemies_remaining.to_string(),
        );

        if let Some(el) = document.get_element_by_id("status-overlay") {
            match hud.status_message() {
                Some(message) => {
                    set_text(document, "#status-overlay .message", message);
                    set_hidden(&el, false);
                }
                None => set_hidden(&el, true),
            }
        }
    }

    fn show_controls(document: &Document, scheme: ControlScheme) {
        if let Some(el) = document.get_element_by_id("touch-controls") {
            set_hidden(&el, !scheme.shows_touch_controls());
        }
        if let Some(el) = document.get_element_by_id("dpad") {
            set_hidden(&el, scheme != ControlScheme::Buttons);
        }
        if let Some(el) = document.get_element_by_id("joystick") {
            set_hidden(&el, scheme != ControlScheme::Joystick);
        }
    }

    fn setup_keyboard(window: &Window, game: Game) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().key_down(&event.key(), new_seed()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Game) {
        let pads = [
            ("btn-up", Direction::Up),
            ("btn-down", Direction::Down),
            ("btn-left", Direction::Left),
            ("btn-right", Direction::Right),
        ];
        for (id, direction) in pads {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            for (event_name, pressed) in [
                ("pointerdown", true),
                ("pointerup", false),
                ("pointerleave", false),
            ] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    game.borrow_mut().input_mut().press(direction, pressed);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        let actions = [
            ("pause-btn", InputAction::TogglePause),
            ("reset-btn", InputAction::Reset),
        ];
        for (id, action) in actions {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().dispatch(action, new_seed());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_joystick(document: &Document, game: Game, settings: SharedSettings) {
        let Some(pad) = document.get_element_by_id("joystick") else {
            return;
        };

        // Drag
        {
            let game = game.clone();
            let pad_el = pad.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if event.buttons() == 0 {
                    return;
                }
                let rect = pad_el.get_bounding_client_rect();
                let center = Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                );
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let axis = settings.borrow().joystick_axis(pointer - center);
                game.borrow_mut().set_joystick(axis);
            });
            for event_name in ["pointerdown", "pointermove"] {
                let _ = pad
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Release
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().set_joystick(Vec2::ZERO);
            });
            for event_name in ["pointerup", "pointerleave"] {
                let _ = pad
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &Window, document: &Document, game: Game) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause();
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
                game.borrow_mut().auto_pause();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Tear the game down: cancels the pending frame and drops the frame callback
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_game() {
    wasm_game::stop();
}

/// Switch between "keyboard", "buttons" and "joystick"; returns false for an
/// unknown name
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_control_scheme(name: &str) -> bool {
    wasm_game::set_control_scheme(name)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::f32::consts::TAU;

    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use orbit_survivor::consts::SIM_DT_MS;
    use orbit_survivor::hud::HudCounters;
    use orbit_survivor::sim::GameStatus;
    use orbit_survivor::{FrameHandle, FrameScheduler, GameLoop, Tuning, polar_to_cartesian};

    /// Frames are delivered by the harness loop itself
    #[derive(Default)]
    struct HeadlessScheduler {
        next: u32,
    }

    impl FrameScheduler for HeadlessScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next = self.next.wrapping_add(1);
            FrameHandle(self.next)
        }

        fn cancel_frame(&mut self, _handle: FrameHandle) {}
    }

    /// Wanders in a new random direction every couple of seconds
    struct Autopilot {
        rng: Pcg32,
        heading: Vec2,
    }

    impl Autopilot {
        const TURN_EVERY: u64 = 120;

        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
                heading: Vec2::ZERO,
            }
        }

        fn steer(&mut self, frame: u64) -> Vec2 {
            if frame % Self::TURN_EVERY == 0 {
                let angle = self.rng.random::<f32>() * TAU;
                self.heading = polar_to_cartesian(1.0, angle);
            }
            self.heading
        }
    }

    /// Balance table from a JSON file; defaults when no path is given
    pub fn load_tuning(path: Option<String>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Using tuning table {}", path);
                Tuning::from_json_or_default(&json)
            }
            Err(err) => {
                log::warn!("Could not read tuning table {}: {}", path, err);
                Tuning::default()
            }
        }
    }

    pub fn run(seed: u64, max_frames: u64, tuning: Tuning) {
        let mut game = GameLoop::new(seed, tuning, HeadlessScheduler::default());
        let mut autopilot = Autopilot::new(seed);
        game.start();

        let mut frames = 0;
        while frames < max_frames {
            let Some(handle) = game.pending() else {
                break;
            };
            let axis = autopilot.steer(frames);
            game.set_joystick(axis);

            let Some(frame) = game.on_frame(handle, frames as f64 * SIM_DT_MS) else {
                break;
            };
            if let Some(hud) = frame.hud {
                log::info!(
                    "t={}ms score {} level {} health {}/{} exp {}/{} enemies {}",
                    game.sim_time_ms(),
                    hud.score,
                    hud.level,
                    hud.health,
                    hud.max_health,
                    hud.experience,
                    hud.experience_to_next,
                    hud.enemies_remaining
                );
            }
            frames += 1;
            if frame.snapshot.status != GameStatus::Playing {
                log::info!("Session ended: {:?}", frame.snapshot.status);
                break;
            }
        }
        game.stop();

        let hud = HudCounters::from_world(game.world());
        match serde_json::to_string_pretty(&hud) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Could not serialize HUD: {}", err),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T: std::str::FromStr>(arg: Option<String>, name: &str, default: T) -> T {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} {:?}, using default", name, raw);
            default
        }),
        None => default,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = parse_arg(args.next(), "seed", 42u64);
    let frames = parse_arg(args.next(), "ticks", 3600u64);
    let tuning = headless::load_tuning(args.next());

    log::info!("Orbit Survivor (native) starting: seed {}, {} ticks", seed, frames);
    headless::run(seed, frames, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
