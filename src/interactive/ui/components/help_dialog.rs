use crate::interactive::constants::{HELP_DIALOG_MARGIN, HELP_DIALOG_MAX_WIDTH};
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct HelpDialog;

impl Default for HelpDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpDialog {
    pub fn new() -> Self {
        Self
    }

    fn get_help_text() -> Vec<Line<'static>> {
        vec![
            Line::from(vec![Span::styled(
                "glbfind - Interactive Mode",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Search:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from("  type        - Edit the prompt (committed after a quiet pause)"),
            Line::from("  Esc         - Clear the prompt"),
            Line::from("  Ctrl+A/E    - Jump to start/end of the prompt"),
            Line::from("  Ctrl+W/U/K  - Delete word / to start / to end"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Grid:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Tab/Shift+Tab - Next / previous cell"),
            Line::from("  ↑/↓           - Move one row"),
            Line::from("  Home/End      - First / last cell"),
            Line::from("  Enter         - Open the selected model"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Model modal:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from("  d           - Download the GLB asset"),
            Line::from("  c           - Copy the asset URL"),
            Line::from("  y           - Copy the share link"),
            Line::from("  r           - Retry a failed fetch"),
            Line::from("  u           - Toggle untextured preview"),
            Line::from("  Esc         - Close the modal"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Global:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from("  ?           - Show this help"),
            Line::from("  Ctrl+C ×2   - Quit"),
            Line::from(""),
            Line::from("Press any key to close this help..."),
        ]
    }
}

impl Component for HelpDialog {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let help_text = Self::get_help_text();

        let width = HELP_DIALOG_MAX_WIDTH.min(area.width.saturating_sub(HELP_DIALOG_MARGIN));
        let height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));

        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(x, y, width, height);

        f.render_widget(Clear, dialog_area);

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(help, dialog_area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Option<Message> {
        // Any key closes the help dialog
        Some(Message::CloseHelp)
    }
}
