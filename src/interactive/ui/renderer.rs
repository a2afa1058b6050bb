use crate::interactive::constants::{LINK_LINE_HEIGHT, SEARCH_BAR_HEIGHT};
use crate::interactive::domain::models::Mode;
use crate::interactive::ui::app_state::AppState;
use crate::interactive::ui::components::{
    Component, help_dialog::HelpDialog, model_modal::ModelModal, result_grid::ResultGrid,
    search_bar::SearchBar,
};
use crate::share_link::PARAM_QUERY;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Owns the component objects and syncs them from the state each frame.
/// The search screen is always drawn; the modal and the help dialog are
/// overlays on top of it, so the grid never unmounts.
pub struct Renderer {
    search_bar: SearchBar,
    result_grid: ResultGrid,
    model_modal: ModelModal,
    help_dialog: HelpDialog,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            result_grid: ResultGrid::new(),
            model_modal: ModelModal::new(),
            help_dialog: HelpDialog::new(),
        }
    }

    pub fn render(&mut self, f: &mut Frame, state: &AppState) {
        self.render_search_screen(f, state);

        // Synced even when closed so the modal drops viewer state on close.
        self.model_modal.set_phase(state.model.phase.clone());
        if state.model.phase.is_open() {
            self.model_modal
                .set_query(state.link.get(PARAM_QUERY).map(str::to_string));
            self.model_modal
                .set_download_in_flight(state.model.download_in_flight);
            self.model_modal.render(f, f.area());
        }

        if state.mode == Mode::Help {
            self.help_dialog.render(f, f.area());
        }
    }

    fn render_search_screen(&mut self, f: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_BAR_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(LINK_LINE_HEIGHT),
            ])
            .split(f.area());

        self.search_bar.set_input(state.search.raw_input.clone());
        self.search_bar.set_searching(state.search.is_searching);
        self.search_bar.set_message(state.ui.message.clone());

        self.result_grid
            .update_hits(state.displayed_hits().to_vec(), state.search.selected_index);
        self.result_grid.set_searching(state.search.is_searching);
        self.result_grid.set_showing_examples(state.showing_examples());
        self.result_grid.set_error(state.search.error.clone());

        self.search_bar.render(f, chunks[0]);
        self.result_grid.render(f, chunks[1]);

        let link_line = Paragraph::new(Line::from(vec![
            Span::styled("link: ", Style::default().fg(Color::DarkGray)),
            Span::styled(state.link.to_url(), Style::default().fg(Color::Blue)),
        ]));
        f.render_widget(link_line, chunks[2]);
    }

    pub fn get_search_bar_mut(&mut self) -> &mut SearchBar {
        &mut self.search_bar
    }

    pub fn get_result_grid_mut(&mut self) -> &mut ResultGrid {
        &mut self.result_grid
    }

    pub fn get_model_modal_mut(&mut self) -> &mut ModelModal {
        &mut self.model_modal
    }

    pub fn get_help_dialog_mut(&mut self) -> &mut HelpDialog {
        &mut self.help_dialog
    }
}
