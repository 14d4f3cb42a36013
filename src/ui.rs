pub mod frame_view;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{ui::frame_view::FrameView, App};

const LOG_PANE_HEIGHT: u16 = 8;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let cyan_bold_style = Style::default().patch(bold_style).fg(Color::Cyan);
        let dim_style = Style::default().fg(Color::DarkGray);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(LOG_PANE_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);

        // header: status, highlighted monitor, pattern, fps, settings
        let status = if session.running {
            Span::styled("🟢 running", green_bold_style)
        } else {
            Span::styled("🔴 stopped", red_bold_style)
        };
        let monitor = match session.active_monitor {
            Some(idx) => format!("monitor {}", idx + 1),
            None => String::from("monitor -"),
        };
        let header = Line::from(vec![
            Span::styled(" 👁 gazer ", cyan_bold_style),
            status,
            Span::raw(format!(
                "  {}  mode {}  fps {}",
                monitor,
                session.pattern.to_string().to_lowercase(),
                session.fps as u32
            )),
            Span::styled(
                format!(
                    "  @{}ms  {} monitors",
                    session.speed_ms, session.monitor_count
                ),
                dim_style,
            ),
        ]);
        Paragraph::new(header).render(chunks[0], buf);

        let scene_block = Block::default()
            .borders(Borders::ALL)
            .title(" scene 640x400 ");
        let scene_area = scene_block.inner(chunks[1]);
        scene_block.render(chunks[1], buf);
        FrameView::new(&session.last_frame).render(scene_area, buf);

        let log_block = Block::default().borders(Borders::ALL).title(" event log ");
        let log_area = log_block.inner(chunks[2]);
        log_block.render(chunks[2], buf);

        let lines: Vec<Line> = session
            .log
            .tail(log_area.height as usize)
            .map(|entry| Line::from(truncate_to_width(entry, log_area.width as usize)))
            .collect();
        Paragraph::new(lines).render(log_area, buf);

        let keys = " s start  p pause  x stop  r reset  +/- speed  [/] monitors  \
                     tab/1-5 pattern  arrows aim  q quit";
        Paragraph::new(Span::styled(
            keys,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ))
        .render(chunks[3], buf);
    }
}

/// Clips a log line to the pane width, appending an ellipsis when it does
/// not fit. Column widths follow unicode-width so emoji stay aligned.
fn truncate_to_width(line: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if line.width() <= max_width {
        return line.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
