/*
[INPUT]:  NotificationHub active toasts
[OUTPUT]: Notification strip rendered into Ratatui frame
[POS]:    TUI UI notifications panel rendering
[UPDATE]: When toast styling changes
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use taskcard_adapter::Severity;
use taskcard_viewer::notify::NotificationHub;

use crate::tui::runtime::border_style;

fn severity_style(severity: Severity) -> Style {
    let color = match severity {
        Severity::Info => Color::LightGreen,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::LightRed,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub(in crate::tui) fn draw_notifications(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    hub: &NotificationHub,
) {
    let lines = if hub.is_empty() {
        vec![Line::from(Span::styled(
            "No notifications",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        hub.active()
            .map(|notification| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<8}", notification.severity.to_string()),
                        severity_style(notification.severity),
                    ),
                    Span::raw(notification.message.clone()),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Notifications"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
