use crate::api::ModelHit;
use crate::interactive::constants::SEARCH_DEBOUNCE_MS;
use crate::interactive::domain::models::{Mode, ModalPhase, example_hits};
use crate::interactive::ui::commands::Command;
use crate::interactive::ui::events::Message;
use crate::share_link::{PARAM_QUERY, PARAM_TASK_ID, ShareLink};
use crate::task_id::is_valid_task_id;

/// Search controller state. `raw_input` tracks every keystroke;
/// `debounced_query` only changes on commit or clear.
pub struct SearchState {
    pub raw_input: String,
    pub debounced_query: String,
    pub is_initial: bool,
    pub results: Vec<ModelHit>,
    pub examples: Vec<ModelHit>,
    pub selected_index: usize,
    pub is_searching: bool,
    pub error: Option<String>,
    pub current_search_id: u64,
}

/// Model modal controller state. The phase mirrors the share link's
/// `task_id` parameter; there is no separate open flag.
pub struct ModelState {
    pub phase: ModalPhase,
    pub download_in_flight: bool,
    pub current_fetch_id: u64,
    pub current_download_id: u64,
}

pub struct UiState {
    pub message: Option<String>,
}

pub struct AppState {
    pub mode: Mode,
    pub link: ShareLink,
    pub search: SearchState,
    pub model: ModelState,
    pub ui: UiState,
}

impl AppState {
    pub fn new(link: ShareLink) -> Self {
        let raw_input = link.get(PARAM_QUERY).unwrap_or_default().to_string();
        Self {
            mode: Mode::Search,
            link,
            search: SearchState {
                raw_input,
                debounced_query: String::new(),
                is_initial: true,
                results: Vec::new(),
                examples: example_hits(),
                selected_index: 0,
                is_searching: false,
                error: None,
                current_search_id: 0,
            },
            model: ModelState {
                phase: ModalPhase::Closed,
                download_in_flight: false,
                current_fetch_id: 0,
                current_download_id: 0,
            },
            ui: UiState { message: None },
        }
    }

    /// While the committed query is empty the grid shows the curated
    /// examples; otherwise the fetched results.
    pub fn showing_examples(&self) -> bool {
        self.search.debounced_query.is_empty()
    }

    pub fn displayed_hits(&self) -> &[ModelHit] {
        if self.showing_examples() {
            &self.search.examples
        } else {
            &self.search.results
        }
    }

    /// Asset URL of the modal's resolved model, if the fetch has settled
    /// successfully.
    pub fn resolved_asset_url(&self) -> Option<&str> {
        match &self.model.phase {
            ModalPhase::Ready { detail, .. } => Some(detail.model.as_str()),
            _ => None,
        }
    }

    pub fn update(&mut self, message: Message) -> Command {
        match message {
            Message::QueryChanged(input) => {
                self.search.raw_input = input;
                Command::ScheduleSearch(SEARCH_DEBOUNCE_MS)
            }
            Message::ClearQuery => {
                self.search.raw_input.clear();
                self.search.debounced_query.clear();
                self.search.results.clear();
                self.search.selected_index = 0;
                self.search.is_searching = false;
                self.search.error = None;
                self.link.delete(PARAM_QUERY);
                Command::CancelScheduledSearch
            }
            Message::CommitQuery => {
                self.search.debounced_query = self.search.raw_input.clone();
                if self.search.debounced_query.is_empty() {
                    // Empty query never reaches the network.
                    self.link.delete(PARAM_QUERY);
                    self.search.results.clear();
                    self.search.selected_index = 0;
                    self.search.is_searching = false;
                    self.search.error = None;
                    Command::None
                } else {
                    self.search.is_initial = false;
                    self.link.set(PARAM_QUERY, &self.search.debounced_query);
                    self.search.is_searching = true;
                    self.search.error = None;
                    self.search.current_search_id += 1;
                    Command::ExecuteSearch
                }
            }
            Message::SearchCompleted { id, result, .. } => {
                // A response from a superseded search changes nothing.
                if id == self.search.current_search_id {
                    self.search.is_searching = false;
                    match result {
                        Ok(hits) => {
                            self.search.results = hits;
                            self.search.selected_index = 0;
                            self.search.error = None;
                        }
                        Err(message) => {
                            // Prior results stay on screen under the error.
                            self.search.error = Some(message);
                        }
                    }
                }
                Command::None
            }
            Message::SelectCell(index) => {
                if index < self.displayed_hits().len() {
                    self.search.selected_index = index;
                }
                Command::None
            }
            Message::OpenModel(task_id) => {
                self.link.set(PARAM_TASK_ID, &task_id);
                if is_valid_task_id(&task_id) {
                    self.model.current_fetch_id += 1;
                    self.model.phase = ModalPhase::Loading { task_id };
                    Command::FetchModel
                } else {
                    self.model.phase = ModalPhase::Invalid { task_id };
                    Command::None
                }
            }
            Message::CloseModel => {
                self.link.delete(PARAM_TASK_ID);
                self.model.phase = ModalPhase::Closed;
                self.model.download_in_flight = false;
                Command::None
            }
            Message::ModelFetchCompleted {
                id,
                task_id,
                result,
            } => {
                let expected = id == self.model.current_fetch_id
                    && matches!(
                        &self.model.phase,
                        ModalPhase::Loading { task_id: pending } if *pending == task_id
                    );
                if !expected {
                    return Command::None;
                }
                match result {
                    Ok(detail) => {
                        let asset_url = detail.model.clone();
                        self.model.phase = ModalPhase::Ready { task_id, detail };
                        Command::ActivateViewer { asset_url }
                    }
                    Err(error) => {
                        self.model.phase = ModalPhase::Error { task_id, error };
                        Command::None
                    }
                }
            }
            Message::RetryModelFetch => {
                if let ModalPhase::Error { task_id, .. } = &self.model.phase {
                    let task_id = task_id.clone();
                    self.model.current_fetch_id += 1;
                    self.model.phase = ModalPhase::Loading { task_id };
                    Command::FetchModel
                } else {
                    Command::None
                }
            }
            Message::DownloadRequested => {
                let ready = matches!(self.model.phase, ModalPhase::Ready { .. });
                if ready && !self.model.download_in_flight {
                    self.model.download_in_flight = true;
                    self.model.current_download_id += 1;
                    Command::StartDownload
                } else {
                    Command::None
                }
            }
            Message::DownloadCompleted { id, result } => {
                if id != self.model.current_download_id {
                    return Command::None;
                }
                self.model.download_in_flight = false;
                match result {
                    Ok(outcome) => Command::ShowMessage(format!(
                        "✓ Saved {} ({} bytes)",
                        outcome.path.display(),
                        outcome.bytes
                    )),
                    Err(message) => Command::ShowMessage(format!("Download failed: {message}")),
                }
            }
            Message::ShowHelp => {
                self.mode = Mode::Help;
                Command::None
            }
            Message::CloseHelp => {
                self.mode = Mode::Search;
                Command::None
            }
            Message::CopyToClipboard(content) => Command::CopyToClipboard(content),
            Message::SetStatus(message) => {
                self.ui.message = Some(message);
                Command::None
            }
            Message::ClearStatus => {
                self.ui.message = None;
                Command::None
            }
        }
    }
}
