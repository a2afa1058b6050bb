use crate::api::ModelHit;
use crate::interactive::constants::{GRID_CELL_HEIGHT, GRID_COLUMNS, SKELETON_CELLS};
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crate::task_id::short_task_id;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Thumbnail grid. The terminal cannot rasterize the thumbnail images, so
/// each cell shows the prompt caption, the short task id and the thumbnail
/// file name instead. Navigation is row-major over `GRID_COLUMNS` columns.
pub struct ResultGrid {
    hits: Vec<ModelHit>,
    selected_index: usize,
    is_searching: bool,
    showing_examples: bool,
    error: Option<String>,
    scroll_row: usize,
    visible_rows: usize,
}

impl Default for ResultGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultGrid {
    pub fn new() -> Self {
        Self {
            hits: Vec::new(),
            selected_index: 0,
            is_searching: false,
            showing_examples: true,
            error: None,
            scroll_row: 0,
            visible_rows: 2,
        }
    }

    pub fn update_hits(&mut self, hits: Vec<ModelHit>, selected_index: usize) {
        self.hits = hits;
        self.selected_index = selected_index.min(self.hits.len().saturating_sub(1));
    }

    pub fn set_searching(&mut self, is_searching: bool) {
        self.is_searching = is_searching;
    }

    pub fn set_showing_examples(&mut self, showing_examples: bool) {
        self.showing_examples = showing_examples;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn selected_hit(&self) -> Option<&ModelHit> {
        self.hits.get(self.selected_index)
    }

    fn page_step(&self) -> usize {
        self.visible_rows.max(1) * GRID_COLUMNS
    }

    /// Keep the selected cell's row inside the visible window.
    fn scroll_to_selection(&mut self) {
        let row = self.selected_index / GRID_COLUMNS;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + self.visible_rows.max(1) {
            self.scroll_row = row + 1 - self.visible_rows.max(1);
        }
    }

    fn move_selection(&mut self, target: usize) -> Option<Message> {
        if target == self.selected_index || target >= self.hits.len() {
            return None;
        }
        Some(Message::SelectCell(target))
    }

    fn render_cells(&mut self, f: &mut Frame, area: Rect) {
        self.visible_rows = (area.height as usize / GRID_CELL_HEIGHT as usize).max(1);
        self.scroll_to_selection();

        let total_rows = self.hits.len().div_ceil(GRID_COLUMNS);
        let last_visible = (self.scroll_row + self.visible_rows).min(total_rows);

        for (screen_row, row) in (self.scroll_row..last_visible).enumerate() {
            let row_area = Rect {
                x: area.x,
                y: area.y + (screen_row as u16) * GRID_CELL_HEIGHT,
                width: area.width,
                height: GRID_CELL_HEIGHT,
            };
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Ratio(1, GRID_COLUMNS as u32);
                    GRID_COLUMNS
                ])
                .split(row_area);

            for col in 0..GRID_COLUMNS {
                let index = row * GRID_COLUMNS + col;
                if let Some(hit) = self.hits.get(index) {
                    Self::render_cell(f, columns[col], hit, index == self.selected_index);
                }
            }
        }
    }

    fn render_cell(f: &mut Frame, area: Rect, hit: &ModelHit, selected: bool) {
        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let width = area.width.saturating_sub(2) as usize;
        let caption = hit.prompt.as_deref().unwrap_or("(untitled)");
        let thumbnail = hit.thumbnail_name();
        let detail = if thumbnail.is_empty() {
            short_task_id(&hit.task_id).to_string()
        } else {
            format!("{} {}", short_task_id(&hit.task_id), thumbnail)
        };

        let lines = vec![
            Line::from(Span::raw(truncate_chars(caption, width))),
            Line::from(Span::styled(
                truncate_chars(&detail, width),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let cell = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(cell, area);
    }

    fn render_skeletons(&mut self, f: &mut Frame, area: Rect) {
        self.visible_rows = (area.height as usize / GRID_CELL_HEIGHT as usize).max(1);
        let rows = SKELETON_CELLS.div_ceil(GRID_COLUMNS).min(self.visible_rows);

        for row in 0..rows {
            let row_area = Rect {
                x: area.x,
                y: area.y + (row as u16) * GRID_CELL_HEIGHT,
                width: area.width,
                height: GRID_CELL_HEIGHT,
            };
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Ratio(1, GRID_COLUMNS as u32);
                    GRID_COLUMNS
                ])
                .split(row_area);

            for col in 0..GRID_COLUMNS {
                if row * GRID_COLUMNS + col >= SKELETON_CELLS {
                    break;
                }
                let bar = "░".repeat(columns[col].width.saturating_sub(4) as usize);
                let skeleton = Paragraph::new(vec![
                    Line::from(Span::styled(bar.clone(), Style::default().fg(Color::DarkGray))),
                    Line::from(Span::styled(bar, Style::default().fg(Color::DarkGray))),
                ])
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                );
                f.render_widget(skeleton, columns[col]);
            }
        }
    }

    fn status_text(&self) -> String {
        let summary = if self.is_searching {
            "Searching...".to_string()
        } else if self.showing_examples {
            format!("{} examples - type a prompt to search", self.hits.len())
        } else {
            format!("{} models", self.hits.len())
        };
        format!("{summary} | Tab/↑↓: Navigate | Enter: Open | Esc: Clear | ?: Help")
    }
}

impl Component for ResultGrid {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let mut constraints = vec![Constraint::Min(0), Constraint::Length(1)];
        let has_error = self.error.is_some() && !self.is_searching;
        if has_error {
            constraints.insert(0, Constraint::Length(1));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut next = 0;
        if has_error {
            if let Some(error) = &self.error {
                let banner = Paragraph::new(Line::from(Span::styled(
                    format!("Search failed: {error}"),
                    Style::default().fg(Color::Red),
                )));
                f.render_widget(banner, chunks[next]);
            }
            next += 1;
        }

        let content = chunks[next];
        if self.is_searching {
            self.render_skeletons(f, content);
        } else if self.hits.is_empty() {
            let empty = Paragraph::new("No models matched")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, content);
        } else {
            self.render_cells(f, content);
        }

        let status = Paragraph::new(self.status_text())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[next + 1]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if self.hits.is_empty() {
            return None;
        }
        let len = self.hits.len();
        let index = self.selected_index;

        match key.code {
            KeyCode::Tab => self.move_selection((index + 1) % len),
            KeyCode::BackTab => self.move_selection((index + len - 1) % len),
            KeyCode::Up => self.move_selection(index.saturating_sub(GRID_COLUMNS)),
            KeyCode::Down => {
                let target = index + GRID_COLUMNS;
                if target < len {
                    self.move_selection(target)
                } else {
                    None
                }
            }
            KeyCode::Home => self.move_selection(0),
            KeyCode::End => self.move_selection(len - 1),
            KeyCode::PageUp => self.move_selection(index.saturating_sub(self.page_step())),
            KeyCode::PageDown => self.move_selection((index + self.page_step()).min(len - 1)),
            KeyCode::Enter => self
                .selected_hit()
                .map(|hit| Message::OpenModel(hit.task_id.clone())),
            _ => None,
        }
    }
}

fn truncate_chars(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}
