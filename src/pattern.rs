use clap::ValueEnum;

/// First-order smoothing factor applied to the raw horizontal target.
pub const SMOOTHING: f64 = 0.25;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum GazePattern {
    Mouse,
    Keyboard,
    Sine,
    Linear,
    Zigzag,
}

impl GazePattern {
    /// Next pattern in the selector cycle, wrapping after the last.
    pub fn cycled(self) -> Self {
        match self {
            GazePattern::Mouse => GazePattern::Keyboard,
            GazePattern::Keyboard => GazePattern::Sine,
            GazePattern::Sine => GazePattern::Linear,
            GazePattern::Linear => GazePattern::Zigzag,
            GazePattern::Zigzag => GazePattern::Mouse,
        }
    }

    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(GazePattern::Mouse),
            '2' => Some(GazePattern::Keyboard),
            '3' => Some(GazePattern::Sine),
            '4' => Some(GazePattern::Linear),
            '5' => Some(GazePattern::Zigzag),
            _ => None,
        }
    }

    /// Raw horizontal gaze target in [0,1] at time `t` (seconds).
    ///
    /// The mouse and keyboard patterns follow their respective inputs
    /// directly; the remaining three are closed-form functions of time
    /// (slow sine sweep, 4s sawtooth ramp, 4s triangle wave).
    pub fn horizontal_target(&self, t: f64, mouse_target_x: f64, keyboard_x: f64) -> f64 {
        match self {
            GazePattern::Mouse => mouse_target_x,
            GazePattern::Keyboard => keyboard_x,
            GazePattern::Sine => ((t * 0.7).sin() + 1.0) / 2.0,
            GazePattern::Linear => (t * 0.25) % 1.0,
            GazePattern::Zigzag => {
                let phase = (t * 0.5) % 2.0;
                if phase <= 1.0 {
                    phase
                } else {
                    2.0 - phase
                }
            }
        }
    }

    /// Normalized vertical coordinate at time `t`: the mouse pattern follows
    /// its own Y input, everything else bobs gently around mid-height.
    pub fn vertical_coord(&self, t: f64, mouse_y: f64) -> f64 {
        match self {
            GazePattern::Mouse => mouse_y,
            _ => 0.5 + 0.15 * (t * 3.0).sin(),
        }
    }
}

/// One exponential smoothing step from `current` toward `target`.
pub fn smooth(current: f64, target: f64) -> f64 {
    current + (target - current) * SMOOTHING
}

/// Grid cell under the smoothed gaze, always a valid index.
pub fn active_monitor_index(smoothed_x: f64, monitor_count: u8) -> usize {
    let idx = (smoothed_x * monitor_count as f64) as usize;
    idx.min(monitor_count as usize - 1)
}
