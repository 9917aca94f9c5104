/*
[INPUT]:  LogBufferHandle tail for UI
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: When the log panel layout changes
*/

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::LogBufferHandle;
use crate::tui::runtime::border_style;

fn level_style(line: &str) -> Style {
    if line.contains("ERROR") {
        Style::default().fg(Color::LightRed)
    } else if line.contains("WARN") {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub(in crate::tui) fn draw_logs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    buffer: &LogBufferHandle,
) {
    let rows = area.height.saturating_sub(2) as usize;
    let (total, tail) = {
        let guard = buffer.lock().expect("log buffer lock");
        (guard.line_count(), guard.tail(rows))
    };

    let lines: Vec<Line> = tail
        .into_iter()
        .map(|line| {
            let style = level_style(&line);
            Line::from(Span::styled(line, style))
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(format!("Logs ({total})"));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
