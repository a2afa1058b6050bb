use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const PLACEHOLDER: &str = "Describe the model you are looking for";

/// Prompt input line. Edits are applied locally for cursor management and
/// reported upward as `QueryChanged`; the committed state lives elsewhere.
#[derive(Default)]
pub struct SearchBar {
    input: String,
    cursor_position: usize,
    is_searching: bool,
    message: Option<String>,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.cursor_position = self.input.chars().count();
        }
    }

    pub fn set_searching(&mut self, is_searching: bool) {
        self.is_searching = is_searching;
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Byte offset of the given character position.
    fn byte_index(&self, char_pos: usize) -> usize {
        self.input
            .chars()
            .take(char_pos)
            .map(|c| c.len_utf8())
            .sum()
    }

    fn find_prev_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.input.chars().collect();
        let mut pos = from;
        while pos > 0 && chars.get(pos - 1).is_some_and(|c| c.is_whitespace()) {
            pos -= 1;
        }
        while pos > 0 && chars.get(pos - 1).is_some_and(|c| !c.is_whitespace()) {
            pos -= 1;
        }
        pos
    }

    fn find_next_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.input.chars().collect();
        let len = chars.len();
        let mut pos = from;
        while pos < len && chars.get(pos).is_some_and(|c| !c.is_whitespace()) {
            pos += 1;
        }
        while pos < len && chars.get(pos).is_some_and(|c| c.is_whitespace()) {
            pos += 1;
        }
        pos
    }

    /// Delete the character range, leaving the cursor at `start`.
    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end || end > self.char_count() {
            return false;
        }
        let byte_start = self.byte_index(start);
        let byte_end = self.byte_index(end);
        self.input.drain(byte_start..byte_end);
        self.cursor_position = start;
        true
    }

    fn changed(&self) -> Option<Message> {
        Some(Message::QueryChanged(self.input.clone()))
    }
}

impl Component for SearchBar {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        let input_text = if self.input.is_empty() {
            vec![
                Span::styled(" ", cursor_style),
                Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ]
        } else if self.cursor_position < self.char_count() {
            let byte_pos = self.byte_index(self.cursor_position);
            let (before, after) = self.input.split_at(byte_pos);
            let under = after.chars().next().unwrap_or(' ');

            vec![
                Span::raw(before.to_string()),
                Span::styled(under.to_string(), cursor_style),
                Span::raw(after.chars().skip(1).collect::<String>()),
            ]
        } else {
            vec![
                Span::raw(self.input.clone()),
                Span::styled(" ", cursor_style),
            ]
        };

        let mut title = "Search".to_string();
        if self.is_searching {
            title.push_str(" (searching)");
        }
        if let Some(msg) = &self.message {
            title.push_str(&format!(" - {msg}"));
        }

        let input = Paragraph::new(Line::from(input_text))
            .block(Block::default().title(title).borders(Borders::ALL))
            .style(Style::default().fg(Color::Yellow));

        f.render_widget(input, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                // Ctrl+A - beginning of line
                KeyCode::Char('a') => {
                    self.cursor_position = 0;
                    return None;
                }
                // Ctrl+E - end of line
                KeyCode::Char('e') => {
                    self.cursor_position = self.char_count();
                    return None;
                }
                // Ctrl+B - back one character
                KeyCode::Char('b') => {
                    self.cursor_position = self.cursor_position.saturating_sub(1);
                    return None;
                }
                // Ctrl+F - forward one character
                KeyCode::Char('f') => {
                    if self.cursor_position < self.char_count() {
                        self.cursor_position += 1;
                    }
                    return None;
                }
                // Ctrl+H - delete character before cursor
                KeyCode::Char('h') => {
                    if self.cursor_position > 0
                        && self.delete_range(self.cursor_position - 1, self.cursor_position)
                    {
                        return self.changed();
                    }
                    return None;
                }
                // Ctrl+D - delete character under cursor
                KeyCode::Char('d') => {
                    if self.delete_range(self.cursor_position, self.cursor_position + 1) {
                        return self.changed();
                    }
                    return None;
                }
                // Ctrl+W - delete word before cursor
                KeyCode::Char('w') => {
                    let start = self.find_prev_word_boundary(self.cursor_position);
                    if self.delete_range(start, self.cursor_position) {
                        return self.changed();
                    }
                    return None;
                }
                // Ctrl+U - delete to beginning of line
                KeyCode::Char('u') => {
                    if self.delete_range(0, self.cursor_position) {
                        return self.changed();
                    }
                    return None;
                }
                // Ctrl+K - delete to end of line
                KeyCode::Char('k') => {
                    if self.delete_range(self.cursor_position, self.char_count()) {
                        return self.changed();
                    }
                    return None;
                }
                _ => {}
            }
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            match key.code {
                // Alt+B - back one word
                KeyCode::Char('b') => {
                    self.cursor_position = self.find_prev_word_boundary(self.cursor_position);
                    return None;
                }
                // Alt+F - forward one word
                KeyCode::Char('f') => {
                    self.cursor_position = self.find_next_word_boundary(self.cursor_position);
                    return None;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    return None;
                }
                let byte_pos = self.byte_index(self.cursor_position);
                self.input.insert(byte_pos, c);
                self.cursor_position += 1;
                self.changed()
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0
                    && self.delete_range(self.cursor_position - 1, self.cursor_position)
                {
                    self.changed()
                } else {
                    None
                }
            }
            KeyCode::Delete => {
                if self.delete_range(self.cursor_position, self.cursor_position + 1) {
                    self.changed()
                } else {
                    None
                }
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor_position < self.char_count() {
                    self.cursor_position += 1;
                }
                None
            }
            KeyCode::Esc => {
                self.input.clear();
                self.cursor_position = 0;
                Some(Message::ClearQuery)
            }
            _ => None,
        }
    }
}
