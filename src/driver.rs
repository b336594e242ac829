//! Fixed-step game loop
//!
//! `GameLoop` owns the world and turns host animation frames into simulation
//! ticks. The host's frame primitive sits behind `FrameScheduler` so the loop
//! runs the same way under `requestAnimationFrame`, a headless harness, or a
//! test.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DELTA_MS, MAX_SUBSTEPS, SIM_DT_MS, TICK_RATE};

/// Slack when comparing the accumulator against one step, so frames spaced
/// exactly one step apart always run exactly one tick
const STEP_EPSILON_MS: f64 = 1e-6;
use crate::hud::{HudCounters, HudProjection};
use crate::input::{InputAction, InputSignal, KeyBinding, key_binding};
use crate::sim::{GameStatus, World, tick};
use crate::snapshot::FrameSnapshot;
use crate::tuning::Tuning;

/// Identifies one outstanding frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Host animation-frame primitive
pub trait FrameScheduler {
    /// Ask for one callback on the next frame
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw an outstanding request
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// What a frame produced for the presentation layer
#[derive(Debug, Clone)]
pub struct Frame {
    pub snapshot: FrameSnapshot,
    /// Present only when a counter changed
    pub hud: Option<HudCounters>,
    pub fps: u32,
}

/// Frames-per-second over the last 60 frames
#[derive(Debug, Clone)]
struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest entry is the one we will overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                // The ring spans len - 1 frame intervals
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

pub struct GameLoop<S: FrameScheduler> {
    world: World,
    tuning: Tuning,
    input: InputSignal,
    hud: HudProjection,
    scheduler: S,
    pending: Option<FrameHandle>,
    accumulator: f64,
    last_time: Option<f64>,
    /// Ticks executed since the session started
    ticks: u64,
    fps: FpsCounter,
    stopped: bool,
}

impl<S: FrameScheduler> GameLoop<S> {
    pub fn new(seed: u64, tuning: Tuning, scheduler: S) -> Self {
        Self {
            world: World::with_tuning(seed, tuning.clone()),
            tuning,
            input: InputSignal::default(),
            hud: HudProjection::new(),
            scheduler,
            pending: None,
            accumulator: 0.0,
            last_time: None,
            ticks: 0,
            fps: FpsCounter::default(),
            stopped: false,
        }
    }

    /// Request the first frame
    pub fn start(&mut self) {
        if self.stopped || self.pending.is_some() {
            return;
        }
        self.pending = Some(self.scheduler.request_frame());
        log::info!("Game loop started (seed {})", self.world.seed);
    }

    /// Cancel the outstanding frame; later frames are ignored
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.stopped = true;
        log::info!("Game loop stopped");
    }

    /// Run one host frame. Returns `None` for a stale handle or a stopped
    /// loop.
    pub fn on_frame(&mut self, handle: FrameHandle, time_ms: f64) -> Option<Frame> {
        if self.stopped || self.pending != Some(handle) {
            return None;
        }
        self.pending = None;

        self.step(time_ms);
        self.fps.record(time_ms);

        let frame = Frame {
            snapshot: FrameSnapshot::capture(&self.world),
            hud: self.hud.update(&self.world),
            fps: self.fps.fps,
        };

        // Keep scheduling while paused so the overlay still renders
        self.pending = Some(self.scheduler.request_frame());
        Some(frame)
    }

    /// Feed real elapsed time into the accumulator and run the due ticks
    fn step(&mut self, time_ms: f64) {
        let delta = match self.last_time {
            Some(last) => (time_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => SIM_DT_MS,
        };
        self.last_time = Some(time_ms);

        if !self.world.is_running() {
            self.accumulator = 0.0;
            return;
        }
        self.accumulator += delta;

        let mut substeps = 0;
        while self.accumulator + STEP_EPSILON_MS >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.ticks += 1;
            let input = self.input.to_tick_input();
            let now_ms = self.sim_time_ms();
            tick(&mut self.world, &input, now_ms);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            if !self.world.is_running() {
                self.accumulator = 0.0;
                break;
            }
        }
    }

    /// Simulation clock in milliseconds
    pub fn sim_time_ms(&self) -> u64 {
        self.ticks * 1000 / u64::from(TICK_RATE)
    }

    /// Keyboard press. Returns whether the key is bound.
    pub fn key_down(&mut self, key: &str, seed: u64) -> bool {
        match key_binding(key) {
            Some(KeyBinding::Move(direction)) => self.input.press(direction, true),
            Some(KeyBinding::Action(action)) => self.dispatch(action, seed),
            None => return false,
        }
        true
    }

    /// Keyboard release. Returns whether the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        match key_binding(key) {
            Some(KeyBinding::Move(direction)) => self.input.press(direction, false),
            Some(KeyBinding::Action(_)) => {}
            None => return false,
        }
        true
    }

    /// Held input shared by the keyboard, d-pad and joystick
    pub fn input_mut(&mut self) -> &mut InputSignal {
        &mut self.input
    }

    pub fn set_joystick(&mut self, axis: Vec2) {
        self.input.set_axis(axis);
    }

    pub fn dispatch(&mut self, action: InputAction, seed: u64) {
        match action {
            InputAction::TogglePause => self.world.toggle_pause(),
            InputAction::Reset => self.reset(seed),
            InputAction::Restart => {
                if self.world.status != GameStatus::Playing {
                    self.reset(seed);
                }
            }
        }
    }

    /// Pause when the page loses focus or visibility
    pub fn auto_pause(&mut self) {
        if self.world.status == GameStatus::Playing {
            self.world.toggle_pause();
            self.input.clear();
            log::info!("Auto-paused");
        }
    }

    /// Fresh session from `seed`, keeping the frame schedule
    pub fn reset(&mut self, seed: u64) {
        self.world = World::with_tuning(seed, self.tuning.clone());
        self.input.clear();
        self.accumulator = 0.0;
        self.last_time = None;
        self.ticks = 0;
        self.hud.reset();
        log::info!("Game reset with seed {}", seed);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn input(&self) -> &InputSignal {
        &self.input
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Outstanding frame request, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}
