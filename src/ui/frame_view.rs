use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::scene::{FrameBuffer, FRAME_HEIGHT, FRAME_WIDTH};

/// Renders the 640x400 pixel frame into a terminal region using the
/// upper-half-block trick: every cell shows two vertically stacked pixels,
/// the glyph's foreground for the top one and its background for the bottom.
/// The frame is nearest-neighbour sampled to whatever size the layout grants.
pub struct FrameView<'a> {
    frame: &'a FrameBuffer,
}

impl<'a> FrameView<'a> {
    pub fn new(frame: &'a FrameBuffer) -> Self {
        Self { frame }
    }

    fn sample(&self, col: u16, row: u16, out_cols: u16, out_rows: u16) -> Color {
        let sx = (col as usize * FRAME_WIDTH / out_cols as usize).min(FRAME_WIDTH - 1);
        let sy = (row as usize * FRAME_HEIGHT / out_rows as usize).min(FRAME_HEIGHT - 1);
        let px = self.frame.get(sx, sy);
        Color::Rgb(px.0, px.1, px.2)
    }
}

impl Widget for FrameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let out_cols = area.width;
        let out_rows = area.height * 2;

        for row in 0..area.height {
            for col in 0..out_cols {
                let top = self.sample(col, row * 2, out_cols, out_rows);
                let bottom = self.sample(col, row * 2 + 1, out_cols, out_rows);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀");
                    cell.set_style(Style::default().fg(top).bg(bottom));
                }
            }
        }
    }
}
