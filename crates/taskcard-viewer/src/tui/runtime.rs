/*
[INPUT]:  TaskCard, notification hub, log buffer, run options
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::fmt::MakeWriter;

use taskcard_viewer::card::TaskCard;
use taskcard_viewer::notify::NotificationHub;

use super::app::{AppState, Tab};
use super::events::handle_key_event;
use super::terminal::Screen;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
const HEADLESS_SIZE: (u16, u16) = (100, 32);
pub const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

/// Most recent formatted log lines, oldest dropped first
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn shared(capacity: usize) -> LogBufferHandle {
        Arc::new(StdMutex::new(Self {
            lines: VecDeque::new(),
            capacity,
        }))
    }

    fn append(&mut self, text: &str) {
        if self.capacity == 0 {
            return;
        }
        for line in text.lines().filter(|line| !line.is_empty()) {
            while self.lines.len() >= self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Up to `count` newest lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        let skip = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(skip).cloned().collect()
    }
}

/// `MakeWriter` feeding the Logs tab
#[derive(Clone)]
pub struct LogSink(LogBufferHandle);

impl LogSink {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self(buffer)
    }
}

/// Collects one formatted event and hands it over when dropped
pub struct EventWriter {
    buffer: LogBufferHandle,
    bytes: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if self.bytes.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.bytes);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.append(&text);
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            buffer: self.0.clone(),
            bytes: Vec::new(),
        }
    }
}

/// How the loop runs
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Draw to an in-memory backend and stop after this many ticks
    pub exit_after_ticks: Option<u64>,
}

impl RunOptions {
    pub fn from_env() -> Self {
        let exit_after_ticks = std::env::var("TASKCARD_TUI_TEST_EXIT_AFTER_TICKS")
            .ok()
            .and_then(|value| value.parse().ok());
        Self { exit_after_ticks }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = Line::from(vec![
        Span::styled("[Enter]", key_style),
        Span::raw(" Action  "),
        Span::styled("[c]", key_style),
        Span::raw(" Complete  "),
        Span::styled("[x]", key_style),
        Span::raw(" Cancel  "),
        Span::styled("[y]", key_style),
        Span::raw(" Share  "),
        Span::styled("[[/]]", key_style),
        Span::raw(" Prev/Next task"),
    ]);
    let line2 = Line::from(vec![
        Span::styled("[r]", key_style),
        Span::raw(" Refresh  "),
        Span::styled("[e]", key_style),
        Span::raw(" Dismiss error  "),
        Span::styled("[n]", key_style),
        Span::raw(" Clear toasts  "),
        Span::styled("[Tab]", key_style),
        Span::raw(" Switch  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit  "),
        Span::raw(format!("Status: {}", app.status_message)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, line2]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub async fn run_tui(
    card: TaskCard,
    hub: NotificationHub,
    log_buffer: LogBufferHandle,
    options: RunOptions,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut screen = match options.exit_after_ticks {
        Some(_) => Screen::headless(HEADLESS_SIZE.0, HEADLESS_SIZE.1)?,
        None => Screen::live()?,
    };
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();

    if !screen.is_headless() {
        let input_shutdown = input_shutdown.clone();
        tokio::task::spawn_blocking(move || {
            while !input_shutdown.is_cancelled() {
                if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                    if let Ok(event) = crossterm::event::read() {
                        let _ = event_tx.send(UiEvent::Input(event));
                    }
                }
            }
        });
    }

    let mut app = AppState::new(card, hub, log_buffer, update_tx);
    app.mount();

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut ticks: u64 = 0;
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {
                app.hub.poll();
                app.hub.prune(Instant::now());
                ticks += 1;
                if options.exit_after_ticks.is_some_and(|limit| ticks >= limit) {
                    should_quit = true;
                }
            }
            _ = shutdown.cancelled() => {
                should_quit = true;
            }
            Some(update) = update_rx.recv() => {
                app.apply(update);
                app.hub.poll();
            }
            Some(event) = event_rx.recv() => {
                match event {
                    UiEvent::Input(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if handle_key_event(&mut app, key.code) {
                            should_quit = true;
                        }
                    }
                    _ => {}
                }
            }
        }

        screen.draw(|frame| draw_ui(frame, &app))?;
    }

    input_shutdown.cancel();
    app.card.unmount();
    if let Some(dump) = screen.dump() {
        print!("{dump}");
    }
    info!(ticks, "tui stopped");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[1], app.current_tab);

    match app.current_tab {
        Tab::Card => {
            let content = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(layout[0]);
            draw_card(frame, content[0], &app.card);
            draw_notifications(frame, content[1], &app.hub);
        }
        Tab::Logs => {
            draw_logs(frame, layout[0], &app.log_buffer);
        }
    }

    draw_footer(frame, layout[2], app);
}
