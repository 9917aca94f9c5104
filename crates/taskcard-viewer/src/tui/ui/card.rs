/*
[INPUT]:  TaskCard display state and visible controls
[OUTPUT]: Task card panel rendered into Ratatui frame
[POS]:    TUI UI card panel rendering
[UPDATE]: When the card shows new fields or controls
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use taskcard_adapter::{RoleFlags, TaskStatus};
use taskcard_viewer::card::{Control, TaskCard};

use crate::tui::runtime::{border_style, header_style};

fn label_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn role_badge(roles: RoleFlags) -> Option<&'static str> {
    if roles.is_leader {
        Some("leader")
    } else if roles.is_member {
        Some("member")
    } else {
        None
    }
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style()),
        Span::raw(value),
    ])
}

fn control_spans(card: &TaskCard) -> Vec<Span<'static>> {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for control in card.controls().iter() {
        let (key, text) = match control {
            Control::Action => match card.action_label() {
                Some(label) => ("[Enter]", label.to_string()),
                None => continue,
            },
            Control::Approvals => {
                let reached = card
                    .state()
                    .approvals
                    .is_some_and(|summary| summary.is_reached());
                let marker = if reached { " quorum reached" } else { "" };
                spans.push(Span::styled(
                    format!("Approvals{}{marker}  ", card.approvals_text()),
                    Style::default().fg(Color::Cyan),
                ));
                continue;
            }
            Control::Complete => ("[c]", "Complete".to_string()),
            Control::Cancel => ("[x]", "Cancel".to_string()),
            Control::Share => ("[y]", "Share".to_string()),
        };
        spans.push(Span::styled(key, key_style));
        spans.push(Span::raw(format!(" {text}  ")));
    }
    spans
}

/// Text content of the card, loader included
pub(in crate::tui) fn card_lines(card: &TaskCard) -> Vec<Line<'static>> {
    let state = card.state();
    let Some(task) = state.task.as_ref() else {
        let placeholder = if state.loading {
            format!("Loading task #{}...", card.task_id())
        } else {
            format!("Task #{} unavailable", card.task_id())
        };
        let mut lines = vec![Line::from(Span::styled(
            placeholder,
            label_style().add_modifier(Modifier::ITALIC),
        ))];
        if let Some(message) = state.error.visible_message() {
            lines.push(error_line(message));
        }
        return lines;
    };

    let mut header = vec![Span::styled(
        task.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(badge) = role_badge(state.roles) {
        header.push(Span::raw(" "));
        header.push(Span::styled(format!(" {badge} "), header_style()));
    }

    let assignee = if task.assignee.is_empty() {
        "-".to_string()
    } else {
        task.assignee.clone()
    };
    let authorized = task
        .authorized_roles
        .iter()
        .map(|role| role.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        Line::from(header),
        Line::from(vec![
            Span::styled(format!("#{}", task.id), label_style()),
            Span::raw("  "),
            Span::styled(task.status.to_string(), status_style(&task.status)),
        ]),
        field("Reward", task.reward.to_string()),
        field("Image", task.metadata.clone()),
        field("Creator Role ID", task.creator_role.to_string()),
        field("Authorized Role ID", format!("[{authorized}]")),
        field("Assignee", assignee),
        field("End Date", task.end_date.format("%Y-%m-%d").to_string()),
        Line::default(),
        Line::from(control_spans(card)),
    ];
    if let Some(message) = state.error.visible_message() {
        lines.push(Line::default());
        lines.push(error_line(message));
    }
    lines
}

fn status_style(status: &TaskStatus) -> Style {
    let color = match status {
        TaskStatus::Completed => Color::LightGreen,
        TaskStatus::Canceled => Color::LightRed,
        TaskStatus::Review => Color::Yellow,
        _ => Color::White,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [e] dismiss", label_style()),
    ])
}

pub(in crate::tui) fn draw_card(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    card: &TaskCard,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Task");
    let widget = Paragraph::new(card_lines(card))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use taskcard_adapter::{
        MemoryLedger, MemoryTaskService, MockWalletSigner, Task, TaskId, TaskStatus,
    };
    use taskcard_viewer::card::CardServices;
    use taskcard_viewer::clipboard::MemoryClipboard;
    use taskcard_viewer::notify::RecordingNotifier;

    use super::*;

    const LEADER: &str = "0x00000000000000000000000000000000000000a1";

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn card(status: TaskStatus, min_quorum: u64) -> TaskCard {
        let task = Task {
            id: TaskId(7),
            status,
            reward: Decimal::new(1250, 1),
            title: "Translate docs".to_string(),
            metadata: "ipfs://bafy/7.png".to_string(),
            creator_role: 3,
            authorized_roles: vec![1, 2],
            assignee: String::new(),
            end_date: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
        };
        let identity = Arc::new(MockWalletSigner::with_address(LEADER));
        let ledger = MemoryLedger::new()
            .with_task(task.clone())
            .with_leader(LEADER)
            .with_min_quorum(min_quorum);
        let services = CardServices {
            service: Arc::new(MemoryTaskService::new(identity.clone(), ledger)),
            identity,
            notifier: Arc::new(RecordingNotifier::default()),
            clipboard: Arc::new(MemoryClipboard::default()),
        };
        TaskCard::new(services, task.id, "https://dao.example")
    }

    #[test]
    fn test_loader_before_task_arrives() {
        let card = card(TaskStatus::Created, 3);
        assert_eq!(text(&card_lines(&card)), "Loading task #7...");
    }

    #[tokio::test]
    async fn test_leader_card_lists_fields_and_controls() {
        let mut card = card(TaskStatus::Review, 3);
        let update = card.mount().await.expect("mounted");
        card.apply(update);

        let rendered = text(&card_lines(&card));
        assert!(rendered.contains("Translate docs  leader "));
        assert!(rendered.contains("#7  Review"));
        assert!(rendered.contains("Reward: 125.0"));
        assert!(rendered.contains("Creator Role ID: 3"));
        assert!(rendered.contains("Authorized Role ID: [1, 2]"));
        assert!(rendered.contains("Assignee: -"));
        assert!(rendered.contains("End Date: 2026-11-30"));
        assert!(rendered.contains("[Enter] Review Task"));
        assert!(rendered.contains("Approvals (0/3)"));
        assert!(rendered.contains("[c] Complete"));
        assert!(rendered.contains("[x] Cancel"));
        assert!(rendered.contains("[y] Share"));
    }

    #[tokio::test]
    async fn test_canceled_card_only_offers_share() {
        let mut card = card(TaskStatus::Canceled, 3);
        let update = card.mount().await.expect("mounted");
        card.apply(update);

        let rendered = text(&card_lines(&card));
        assert!(rendered.contains("[y] Share"));
        assert!(!rendered.contains("[Enter]"));
        assert!(!rendered.contains("Approvals"));
        assert!(!rendered.contains("[c] Complete"));
    }

    #[tokio::test]
    async fn test_failed_lookup_shows_unavailable_instead_of_loader() {
        let mut card = card(TaskStatus::Created, 3);
        let _ = card.mount();
        let lookup = card.set_task_id(TaskId(99)).expect("mounted");
        let update = lookup.await.expect("mounted");
        card.apply(update);

        let rendered = text(&card_lines(&card));
        assert!(rendered.starts_with("Task #99 unavailable"));
        assert!(!rendered.contains("Loading"));
        assert!(rendered.contains("Error: "));
    }

    #[tokio::test]
    async fn test_quorum_marker_after_completion() {
        let mut card = card(TaskStatus::Review, 1);
        let update = card.mount().await.expect("mounted");
        card.apply(update);
        assert!(!text(&card_lines(&card)).contains("quorum reached"));

        let complete = card.complete().expect("leader sees complete");
        let update = complete.await.expect("mounted");
        card.apply(update);
        let reload = card.refresh().expect("mounted");
        let update = reload.await.expect("mounted");
        card.apply(update);

        let rendered = text(&card_lines(&card));
        assert!(rendered.contains("#7  Completed"));
        assert!(rendered.contains("Approvals (1/1) quorum reached"));
    }

    #[test]
    fn test_status_colour_follows_variant() {
        assert_eq!(status_style(&TaskStatus::Completed).fg, Some(Color::LightGreen));
        assert_eq!(status_style(&TaskStatus::Canceled).fg, Some(Color::LightRed));
        assert_eq!(status_style(&TaskStatus::Review).fg, Some(Color::Yellow));
        assert_eq!(
            status_style(&TaskStatus::Unknown("Completed".to_string())).fg,
            Some(Color::White)
        );
    }
}
