pub mod help_dialog;
pub mod model_modal;
pub mod result_grid;
pub mod search_bar;


use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

pub trait Component {
    fn render(&mut self, f: &mut Frame, area: Rect);
    fn handle_key(&mut self, key: KeyEvent) -> Option<Message>;
}

/// Check if a message is the exit prompt
pub fn is_exit_prompt(message: &Option<String>) -> bool {
    message
        .as_ref()
        .map(|msg| msg == "Press Ctrl+C again to exit")
        .unwrap_or(false)
}
