use crate::event_log::EventLog;
use crate::pattern::{self, GazePattern};
use crate::scene::{self, FrameBuffer};
use crate::trail::{Trail, TrailPoint};
use crate::util::clamp01;

pub const SPEED_MIN_MS: u64 = 10;
pub const SPEED_MAX_MS: u64 = 200;
pub const SPEED_STEP_MS: u64 = 5;
pub const SPEED_DEFAULT_MS: u64 = 50;

pub const MONITORS_MIN: u8 = 2;
pub const MONITORS_MAX: u8 = 8;
pub const MONITORS_DEFAULT: u8 = 8;

const NUDGE_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Right,
}

/// Whole simulation state: controls, gaze coordinates, trail, the last
/// rendered frame and the event log. Everything advances in `tick`.
#[derive(Debug, Clone)]
pub struct Session {
    pub running: bool,
    pub speed_ms: u64,
    pub monitor_count: u8,
    pub pattern: GazePattern,
    pub mouse_target_x: f64,
    pub mouse_y: f64,
    pub keyboard_x: f64,
    pub smoothed_gaze_x: f64,
    pub active_monitor: Option<usize>,
    pub trail: Trail,
    pub last_frame: FrameBuffer,
    pub fps: f64,
    pub log: EventLog,
    pub last_tick_secs: f64,
}

impl Session {
    pub fn new(speed_ms: u64, monitor_count: u8, pattern: GazePattern) -> Self {
        Self {
            running: false,
            speed_ms: speed_ms.clamp(SPEED_MIN_MS, SPEED_MAX_MS),
            monitor_count: monitor_count.clamp(MONITORS_MIN, MONITORS_MAX),
            pattern,
            mouse_target_x: 0.5,
            mouse_y: 0.5,
            keyboard_x: 0.5,
            smoothed_gaze_x: 0.5,
            active_monitor: None,
            trail: Trail::new(),
            last_frame: FrameBuffer::new(),
            fps: 0.0,
            log: EventLog::new(),
            last_tick_secs: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.log.push("🟢 Simulation started.");
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Halts the simulation and drops the monitor highlight. The trail and
    /// gaze coordinates stay where they are.
    pub fn stop(&mut self) {
        self.running = false;
        self.active_monitor = None;
    }

    /// Recenters every gaze coordinate and clears the trail. The highlight,
    /// speed, monitor count and pattern are left alone.
    pub fn reset(&mut self) {
        self.running = false;
        self.trail.clear();
        self.mouse_target_x = 0.5;
        self.mouse_y = 0.5;
        self.keyboard_x = 0.5;
        self.smoothed_gaze_x = 0.5;
        self.log.push("🔁 Reset complete.");
    }

    pub fn set_speed(&mut self, speed_ms: u64) {
        self.speed_ms = speed_ms.clamp(SPEED_MIN_MS, SPEED_MAX_MS);
    }

    pub fn set_monitor_count(&mut self, monitor_count: u8) {
        self.monitor_count = monitor_count.clamp(MONITORS_MIN, MONITORS_MAX);
        // a shrinking grid must not leave the highlight out of range
        self.active_monitor = self
            .active_monitor
            .map(|idx| idx.min(self.monitor_count as usize - 1));
    }

    pub fn set_pattern(&mut self, pattern: GazePattern) {
        self.pattern = pattern;
    }

    pub fn set_mouse_target(&mut self, x: f64) {
        self.mouse_target_x = clamp01(x);
    }

    pub fn set_mouse_y(&mut self, y: f64) {
        self.mouse_y = clamp01(y);
    }

    pub fn nudge_keyboard(&mut self, direction: Nudge) {
        let step = match direction {
            Nudge::Left => -NUDGE_STEP,
            Nudge::Right => NUDGE_STEP,
        };
        self.keyboard_x = clamp01(self.keyboard_x + step);
    }

    /// Advances the simulation to wall-clock second `t`: moves the gaze,
    /// updates the highlight and trail, renders the frame and refreshes the
    /// fps estimate. A paused or stopped session ignores ticks entirely.
    pub fn tick(&mut self, t: f64) {
        if !self.running {
            return;
        }

        let target = self
            .pattern
            .horizontal_target(t, self.mouse_target_x, self.keyboard_x);
        self.smoothed_gaze_x = pattern::smooth(self.smoothed_gaze_x, target);
        self.active_monitor = Some(pattern::active_monitor_index(
            self.smoothed_gaze_x,
            self.monitor_count,
        ));

        let gaze_y = self.pattern.vertical_coord(t, self.mouse_y);
        let px = (self.smoothed_gaze_x * scene::FRAME_WIDTH as f64) as i32;
        let py = (gaze_y * scene::FRAME_HEIGHT as f64) as i32;
        self.trail.push(TrailPoint::new(px as u16, py as u16));

        scene::render_scene(
            &mut self.last_frame,
            t,
            self.monitor_count,
            self.active_monitor,
            &self.trail,
            (px, py),
        );

        let dt = t - self.last_tick_secs;
        self.fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        self.last_tick_secs = t;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SPEED_DEFAULT_MS, MONITORS_DEFAULT, GazePattern::Mouse)
    }
}
