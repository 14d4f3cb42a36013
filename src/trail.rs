use std::collections::VecDeque;

/// Maximum number of points retained in the motion trail.
pub const TRAIL_CAP: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailPoint {
    pub x: u16,
    pub y: u16,
}

impl TrailPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for TrailPoint {
    fn from(v: (u16, u16)) -> Self {
        TrailPoint { x: v.0, y: v.1 }
    }
}

/// Bounded history of recent gaze positions, oldest first.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_CAP),
        }
    }

    /// Appends a point, evicting the oldest once the cap is reached.
    pub fn push(&mut self, point: TrailPoint) {
        if self.points.len() == TRAIL_CAP {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest-first iteration; the renderer fades colors by position here.
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}
