use crate::interactive::constants::{MODAL_MARGIN, MODAL_MAX_WIDTH};
use crate::interactive::domain::models::ModalPhase;
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::{CopyContent, Message};
use crate::task_id::short_task_id;
use crate::viewer::{LazyViewer, ModelView};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Overlay for one generation task. The phase is synced from the app state
/// every frame; the lazy viewer is owned here because an activated view is
/// not cloneable state.
pub struct ModelModal {
    phase: ModalPhase,
    query: Option<String>,
    download_in_flight: bool,
    viewer: LazyViewer,
}

impl Default for ModelModal {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelModal {
    pub fn new() -> Self {
        Self {
            phase: ModalPhase::Closed,
            query: None,
            download_in_flight: false,
            viewer: LazyViewer::new(),
        }
    }

    /// Sync the phase. Moving to another task id (or to Closed) drops any
    /// viewer state from the previous one.
    pub fn set_phase(&mut self, phase: ModalPhase) {
        if phase.task_id() != self.phase.task_id() {
            self.viewer.reset();
        }
        self.phase = phase;
    }

    /// Search term shown as a caption badge inside the modal.
    pub fn set_query(&mut self, query: Option<String>) {
        self.query = query;
    }

    pub fn set_download_in_flight(&mut self, download_in_flight: bool) {
        self.download_in_flight = download_in_flight;
    }

    pub fn begin_activation(&mut self, asset_url: &str) -> bool {
        self.viewer.begin(asset_url)
    }

    pub fn resolve_activation(
        &mut self,
        asset_url: &str,
        result: Result<Box<dyn ModelView>, String>,
    ) {
        self.viewer.resolve(asset_url, result);
    }

    fn dialog_area(&self, area: Rect) -> Rect {
        let width = MODAL_MAX_WIDTH.min(area.width.saturating_sub(MODAL_MARGIN));
        let height = match self.phase {
            ModalPhase::Ready { .. } => area.height.saturating_sub(MODAL_MARGIN).min(24),
            _ => 8.min(area.height),
        };
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width, height)
    }

    fn title(&self) -> String {
        match self.phase.task_id() {
            Some(task_id) => format!(" Model {} ", short_task_id(task_id)),
            None => " Model ".to_string(),
        }
    }

    fn footer_text(&self) -> &'static str {
        match self.phase {
            ModalPhase::Error { .. } => "r: Retry | Esc: Close",
            ModalPhase::Ready { .. } => {
                if self.download_in_flight {
                    "Downloading... | c: Copy URL | Esc: Close"
                } else {
                    "d: Download | c: Copy URL | u: Untextured | Esc: Close"
                }
            }
            _ => "Esc: Close",
        }
    }

    fn render_ready(&mut self, f: &mut Frame, inner: Rect) {
        let detail = match &self.phase {
            ModalPhase::Ready { detail, .. } => detail.clone(),
            _ => return,
        };

        let mut info = Vec::new();
        info.push(Line::from(Span::styled(
            detail.prompt.clone().unwrap_or_else(|| "(no prompt)".to_string()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if let Some(query) = &self.query {
            info.push(Line::from(Span::styled(
                format!("search: {query}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        let mut meta = Vec::new();
        if let Some(status) = &detail.status {
            meta.push(format!("status: {status}"));
        }
        if let Some(created) = detail.create_time.and_then(format_create_time) {
            meta.push(format!("created: {created}"));
        }
        if !meta.is_empty() {
            info.push(Line::from(Span::styled(
                meta.join("  "),
                Style::default().fg(Color::DarkGray),
            )));
        }
        info.push(Line::from(Span::styled(
            detail.model.clone(),
            Style::default().fg(Color::Cyan),
        )));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(info.len() as u16 + 1),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        f.render_widget(Paragraph::new(info).wrap(Wrap { trim: true }), chunks[0]);
        self.viewer.render(f, chunks[1]);
        f.render_widget(
            Paragraph::new(self.footer_text()).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }

    fn render_simple(&self, f: &mut Frame, inner: Rect, lines: Vec<Line<'static>>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);
        f.render_widget(
            Paragraph::new(self.footer_text()).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }
}

impl Component for ModelModal {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        if !self.phase.is_open() {
            return;
        }

        let dialog_area = self.dialog_area(area);
        f.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(dialog_area);
        f.render_widget(block, dialog_area);

        match &self.phase {
            ModalPhase::Closed => {}
            ModalPhase::Invalid { task_id } => {
                let lines = vec![
                    Line::from(Span::styled(
                        format!("Invalid task id: {task_id}"),
                        Style::default().fg(Color::Red),
                    )),
                    Line::from(Span::styled(
                        "Expected 8-4-4-4-12 hexadecimal groups.",
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                self.render_simple(f, inner, lines);
            }
            ModalPhase::Loading { .. } => {
                let lines = vec![Line::from(Span::styled(
                    "Fetching model metadata...",
                    Style::default().fg(Color::DarkGray),
                ))];
                self.render_simple(f, inner, lines);
            }
            ModalPhase::Error { error, .. } => {
                let lines = vec![Line::from(Span::styled(
                    format!("Fetch failed: {error}"),
                    Style::default().fg(Color::Red),
                ))];
                self.render_simple(f, inner, lines);
            }
            ModalPhase::Ready { .. } => self.render_ready(f, inner),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::CloseModel),
            KeyCode::Char('d') => Some(Message::DownloadRequested),
            KeyCode::Char('r') => Some(Message::RetryModelFetch),
            KeyCode::Char('c') => match &self.phase {
                ModalPhase::Ready { detail, .. } => Some(Message::CopyToClipboard(
                    CopyContent::AssetUrl(detail.model.clone()),
                )),
                _ => None,
            },
            KeyCode::Char('u') => {
                if let Some(view) = self.viewer.view_mut() {
                    if view.supports_untextured() {
                        let untextured = view.untextured();
                        view.set_untextured(!untextured);
                    }
                }
                None
            }
            _ => None,
        }
    }
}

fn format_create_time(timestamp: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
}
