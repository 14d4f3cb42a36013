use itertools::iproduct;

use crate::trail::Trail;
use crate::util::lerp;

pub const FRAME_WIDTH: usize = 640;
pub const FRAME_HEIGHT: usize = 400;
pub const GRID_COLS: u8 = 4;

const MONITOR_IDLE: Rgb = Rgb(70, 70, 70);
const TRAIL_OLDEST: Rgb = Rgb(255, 0, 0);
const TRAIL_NEWEST: Rgb = Rgb(0, 255, 0);
const MARKER: Rgb = Rgb(255, 255, 0);

// Label anchor inside each cell: x inset and text baseline below the origin.
const LABEL_INSET_X: i32 = 8;
const LABEL_BASELINE_Y: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fixed-size RGB8 canvas the scene is drawn onto. All primitives clip at
/// the edges instead of wrapping or panicking.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; FRAME_WIDTH * FRAME_HEIGHT * 3],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x >= FRAME_WIDTH as i32 || y >= FRAME_HEIGHT as i32 {
            return;
        }
        let idx = (y as usize * FRAME_WIDTH + x as usize) * 3;
        self.pixels[idx] = color.0;
        self.pixels[idx + 1] = color.1;
        self.pixels[idx + 2] = color.2;
    }

    /// Reads a pixel. Callers stay within the canvas bounds.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        let idx = (y * FRAME_WIDTH + x) * 3;
        Rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Rectangle outline between inclusive corners, `thickness` pixels deep
    /// toward the inside.
    pub fn stroke_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, thickness: i32, color: Rgb) {
        for t in 0..thickness {
            for px in x1..=x2 {
                self.set(px, y1 + t, color);
                self.set(px, y2 - t, color);
            }
            for py in y1..=y2 {
                self.set(x1 + t, py, color);
                self.set(x2 - t, py, color);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draws one decimal digit from the 3x5 raster font, top-left anchored,
    /// scaled up to 6x10 pixels.
    pub fn draw_digit(&mut self, x: i32, y: i32, digit: u8, color: Rgb) {
        let glyph = DIGIT_FONT[(digit % 10) as usize];
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..3i32 {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                for sy in 0..DIGIT_SCALE {
                    for sx in 0..DIGIT_SCALE {
                        self.set(
                            x + col * DIGIT_SCALE + sx,
                            y + row as i32 * DIGIT_SCALE + sy,
                            color,
                        );
                    }
                }
            }
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

const DIGIT_SCALE: i32 = 2;
pub const DIGIT_HEIGHT: i32 = 5 * DIGIT_SCALE;

// 3x5 glyphs for 0-9, one row per byte, bit 2 = leftmost column.
const DIGIT_FONT: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Rows in the monitor grid for a given count, at four cells per row.
pub fn grid_rows(monitor_count: u8) -> u8 {
    monitor_count.div_ceil(GRID_COLS)
}

/// Inclusive pixel corners (x1, y1, x2, y2) of one grid cell. The right and
/// bottom edges of the outermost cells land exactly on the canvas border.
pub fn monitor_cell(index: u8, monitor_count: u8) -> (i32, i32, i32, i32) {
    let rows = grid_rows(monitor_count) as i32;
    let cell_w = FRAME_WIDTH as i32 / GRID_COLS as i32;
    let cell_h = FRAME_HEIGHT as i32 / rows;
    let col = (index % GRID_COLS) as i32;
    let row = (index / GRID_COLS) as i32;
    let x1 = col * cell_w;
    let y1 = row * cell_h;
    (x1, y1, x1 + cell_w, y1 + cell_h)
}

fn fade(from: Rgb, to: Rgb, a: f64) -> Rgb {
    Rgb(
        lerp(from.0 as f64, to.0 as f64, a) as u8,
        lerp(from.1 as f64, to.1 as f64, a) as u8,
        lerp(from.2 as f64, to.2 as f64, a) as u8,
    )
}

/// Composes one frame: black background, monitor grid with a pulsing
/// highlight on the active cell, age-faded trail, gaze marker on top.
pub fn render_scene(
    frame: &mut FrameBuffer,
    t: f64,
    monitor_count: u8,
    active_monitor: Option<usize>,
    trail: &Trail,
    gaze_px: (i32, i32),
) {
    frame.clear();

    let pulse = ((t * 4.0).sin() + 1.0) / 2.0;
    let active_color = Rgb(0, (255.0 * pulse) as u8, (80.0 + 150.0 * pulse) as u8);

    let rows = grid_rows(monitor_count);
    for (row, col) in iproduct!(0..rows, 0..GRID_COLS) {
        let index = (row * GRID_COLS + col) as usize;
        if index >= monitor_count as usize {
            continue;
        }

        let (x1, y1, x2, y2) = monitor_cell(index as u8, monitor_count);
        let color = if active_monitor == Some(index) {
            active_color
        } else {
            MONITOR_IDLE
        };
        frame.stroke_rect(x1, y1, x2, y2, 2, color);
        // 1-based label in the same color as the outline
        frame.draw_digit(
            x1 + LABEL_INSET_X,
            y1 + LABEL_BASELINE_Y - DIGIT_HEIGHT,
            (index + 1) as u8,
            color,
        );
    }

    let count = trail.len();
    for (i, point) in trail.iter().enumerate() {
        let a = i as f64 / count as f64;
        frame.fill_circle(
            point.x as i32,
            point.y as i32,
            5,
            fade(TRAIL_OLDEST, TRAIL_NEWEST, a),
        );
    }

    frame.fill_circle(gaze_px.0, gaze_px.1, 10, MARKER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::TrailPoint;

    #[test]
    fn test_grid_rows_single_row_up_to_four() {
        assert_eq!(grid_rows(2), 1);
        assert_eq!(grid_rows(3), 1);
        assert_eq!(grid_rows(4), 1);
    }

    #[test]
    fn test_grid_rows_two_rows_from_five() {
        assert_eq!(grid_rows(5), 2);
        assert_eq!(grid_rows(8), 2);
    }

    #[test]
    fn test_monitor_cell_eight_monitors() {
        assert_eq!(monitor_cell(0, 8), (0, 0, 160, 200));
        assert_eq!(monitor_cell(3, 8), (480, 0, 640, 200));
        assert_eq!(monitor_cell(4, 8), (0, 200, 160, 400));
        assert_eq!(monitor_cell(7, 8), (480, 200, 640, 400));
    }

    #[test]
    fn test_monitor_cell_single_row_uses_full_height() {
        assert_eq!(monitor_cell(0, 4), (0, 0, 160, 400));
        assert_eq!(monitor_cell(3, 4), (480, 0, 640, 400));
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut frame = FrameBuffer::new();
        frame.set(10, 20, Rgb(1, 2, 3));
        assert_eq!(frame.get(10, 20), Rgb(1, 2, 3));
        assert_eq!(frame.get(11, 20), Rgb(0, 0, 0));
    }

    #[test]
    fn test_set_clips_out_of_bounds() {
        let mut frame = FrameBuffer::new();
        frame.set(-1, 0, Rgb(9, 9, 9));
        frame.set(0, -1, Rgb(9, 9, 9));
        frame.set(640, 0, Rgb(9, 9, 9));
        frame.set(0, 400, Rgb(9, 9, 9));
        assert_eq!(frame.get(0, 0), Rgb(0, 0, 0));
    }

    #[test]
    fn test_clear_resets_to_black() {
        let mut frame = FrameBuffer::new();
        frame.set(5, 5, Rgb(255, 255, 255));
        frame.clear();
        assert_eq!(frame.get(5, 5), Rgb(0, 0, 0));
    }

    #[test]
    fn test_stroke_rect_is_two_pixels_deep() {
        let mut frame = FrameBuffer::new();
        frame.stroke_rect(10, 10, 50, 30, 2, Rgb(70, 70, 70));

        assert_eq!(frame.get(10, 10), Rgb(70, 70, 70));
        assert_eq!(frame.get(11, 11), Rgb(70, 70, 70));
        assert_eq!(frame.get(30, 10), Rgb(70, 70, 70));
        assert_eq!(frame.get(30, 11), Rgb(70, 70, 70));
        // interior stays untouched
        assert_eq!(frame.get(30, 20), Rgb(0, 0, 0));
        assert_eq!(frame.get(12, 12), Rgb(0, 0, 0));
    }

    #[test]
    fn test_stroke_rect_clips_on_canvas_border() {
        let mut frame = FrameBuffer::new();
        frame.stroke_rect(480, 200, 640, 400, 2, Rgb(70, 70, 70));
        // x = 640 and y = 400 are off-canvas; the inner thickness row stays
        assert_eq!(frame.get(639, 300), Rgb(70, 70, 70));
        assert_eq!(frame.get(500, 399), Rgb(70, 70, 70));
    }

    #[test]
    fn test_fill_circle_radius_is_inclusive() {
        let mut frame = FrameBuffer::new();
        frame.fill_circle(100, 100, 5, Rgb(255, 255, 0));

        assert_eq!(frame.get(100, 100), Rgb(255, 255, 0));
        assert_eq!(frame.get(105, 100), Rgb(255, 255, 0));
        assert_eq!(frame.get(100, 105), Rgb(255, 255, 0));
        assert_eq!(frame.get(106, 100), Rgb(0, 0, 0));
        assert_eq!(frame.get(105, 101), Rgb(0, 0, 0));
    }

    #[test]
    fn test_fill_circle_clips_at_right_edge() {
        let mut frame = FrameBuffer::new();
        frame.fill_circle(640, 200, 10, Rgb(255, 255, 0));
        assert_eq!(frame.get(639, 200), Rgb(255, 255, 0));
        assert_eq!(frame.get(630, 200), Rgb(255, 255, 0));
        assert_eq!(frame.get(629, 200), Rgb(0, 0, 0));
    }

    #[test]
    fn test_draw_digit_one_lights_center_column() {
        let mut frame = FrameBuffer::new();
        frame.draw_digit(0, 0, 1, Rgb(200, 200, 200));
        // row 0 of "1" is 010: only the middle column, doubled by scaling
        assert_eq!(frame.get(2, 0), Rgb(200, 200, 200));
        assert_eq!(frame.get(3, 1), Rgb(200, 200, 200));
        assert_eq!(frame.get(0, 0), Rgb(0, 0, 0));
        // bottom row of "1" is 111
        assert_eq!(frame.get(0, 9), Rgb(200, 200, 200));
        assert_eq!(frame.get(5, 9), Rgb(200, 200, 200));
    }

    #[test]
    fn test_render_paints_idle_grid_and_labels() {
        let mut frame = FrameBuffer::new();
        let trail = Trail::new();
        render_scene(&mut frame, 0.0, 8, None, &trail, (320, 200));

        // outline corner of monitor 0 and shared edge with monitor 1
        assert_eq!(frame.get(0, 0), Rgb(70, 70, 70));
        assert_eq!(frame.get(160, 50), Rgb(70, 70, 70));
        // label "1" top row pixel at inset (8, 10) + glyph column offset
        assert_eq!(frame.get(10, 10), Rgb(70, 70, 70));
        // cell interior is background
        assert_eq!(frame.get(80, 100), Rgb(0, 0, 0));
    }

    #[test]
    fn test_render_highlights_active_monitor() {
        let mut frame = FrameBuffer::new();
        let trail = Trail::new();
        // sin(0) = 0 so the pulse sits at its midpoint
        render_scene(&mut frame, 0.0, 8, Some(0), &trail, (320, 200));

        assert_eq!(frame.get(0, 0), Rgb(0, 127, 155));
        // neighbours stay idle gray
        assert_eq!(frame.get(160, 0), Rgb(70, 70, 70));

        let (x1, y1, _, _) = monitor_cell(1, 8);
        assert_eq!(frame.get(x1 as usize, y1 as usize), Rgb(70, 70, 70));
    }

    #[test]
    fn test_render_leaves_unused_cells_empty() {
        let mut frame = FrameBuffer::new();
        let trail = Trail::new();
        render_scene(&mut frame, 0.0, 5, None, &trail, (50, 50));

        // five monitors on a 4x2 grid: slot 6's interior stays background
        assert_eq!(frame.get(400, 300), Rgb(0, 0, 0));
        // monitor 5 (row 1, col 0) is drawn
        assert_eq!(frame.get(0, 300), Rgb(70, 70, 70));
    }

    #[test]
    fn test_render_draws_marker_on_top_of_trail() {
        let mut frame = FrameBuffer::new();
        let mut trail = Trail::new();
        trail.push(TrailPoint::new(320, 200));
        render_scene(&mut frame, 0.0, 8, None, &trail, (320, 200));

        assert_eq!(frame.get(320, 200), Rgb(255, 255, 0));
    }

    #[test]
    fn test_render_fades_trail_oldest_red_to_newest_green() {
        let mut frame = FrameBuffer::new();
        let mut trail = Trail::new();
        trail.push(TrailPoint::new(100, 350));
        trail.push(TrailPoint::new(300, 350));
        render_scene(&mut frame, 0.0, 2, None, &trail, (600, 100));

        // two points: age fractions 0 and 1/2
        assert_eq!(frame.get(100, 350), Rgb(255, 0, 0));
        assert_eq!(frame.get(300, 350), Rgb(127, 127, 0));
    }

    #[test]
    fn test_render_clips_marker_at_full_right() {
        let mut frame = FrameBuffer::new();
        let trail = Trail::new();
        render_scene(&mut frame, 0.0, 8, None, &trail, (640, 200));
        assert_eq!(frame.get(639, 200), Rgb(255, 255, 0));
    }

    #[test]
    fn test_pulse_animates_the_active_hue() {
        let mut frame = FrameBuffer::new();
        let trail = Trail::new();

        render_scene(&mut frame, 0.0, 2, Some(0), &trail, (600, 100));
        let mid = frame.get(0, 0);
        assert_eq!(mid, Rgb(0, 127, 155));

        // sin(1.2) pushes the pulse well past its midpoint
        render_scene(&mut frame, 0.3, 2, Some(0), &trail, (600, 100));
        let bright = frame.get(0, 0);
        assert_ne!(bright, mid);
        assert!(bright.1 > mid.1);
        assert!(bright.2 > mid.2);
    }
}
