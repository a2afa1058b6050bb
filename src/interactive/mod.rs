use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::api::ModelCatalog;
use crate::share_link::{PARAM_TASK_ID, ShareLink};
use crate::viewer::ViewerBackend;

mod application;
mod constants;
mod debounce;
mod domain;
pub mod ui;

#[cfg(test)]
mod tests;

use self::application::{
    download_service::DownloadService, search_service::SearchService, task_service::TaskService,
};
use self::constants::{DOUBLE_CTRL_C_TIMEOUT_SECS, EVENT_POLL_INTERVAL_MS, MESSAGE_CLEAR_DELAY_MS};
use self::debounce::DebounceTimer;
use self::domain::models::{
    DownloadRequest, DownloadResponse, Mode, SearchRequest, SearchResponse, TaskFetchRequest,
    TaskFetchResponse, ViewerActivationRequest, ViewerActivationResponse,
};
use self::ui::{
    app_state::AppState,
    commands::Command,
    components::{Component, is_exit_prompt},
    events::{CopyContent, Message},
    renderer::Renderer,
};

/// Full-screen session. State transitions live in `AppState::update`; this
/// type owns the terminal, the timers and the worker threads, and executes
/// the commands the update step returns.
pub struct InteractiveApp {
    state: AppState,
    renderer: Renderer,
    search_service: Arc<SearchService>,
    task_service: Arc<TaskService>,
    download_service: Arc<DownloadService>,
    viewer_backend: Arc<dyn ViewerBackend>,
    download_dir: PathBuf,
    search_tx: Option<Sender<SearchRequest>>,
    search_rx: Option<Receiver<SearchResponse>>,
    task_tx: Option<Sender<TaskFetchRequest>>,
    task_rx: Option<Receiver<TaskFetchResponse>>,
    download_tx: Option<Sender<DownloadRequest>>,
    download_rx: Option<Receiver<DownloadResponse>>,
    viewer_tx: Option<Sender<ViewerActivationRequest>>,
    viewer_rx: Option<Receiver<ViewerActivationResponse>>,
    search_debounce: DebounceTimer,
    message_timer: DebounceTimer,
    last_ctrl_c_press: Option<std::time::Instant>,
}

impl InteractiveApp {
    pub fn new(
        catalog: Arc<dyn ModelCatalog>,
        viewer_backend: Arc<dyn ViewerBackend>,
        link: ShareLink,
        limit: u32,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            state: AppState::new(link),
            renderer: Renderer::new(),
            search_service: Arc::new(SearchService::new(catalog.clone(), limit)),
            task_service: Arc::new(TaskService::new(catalog.clone())),
            download_service: Arc::new(DownloadService::new(catalog)),
            viewer_backend,
            download_dir,
            search_tx: None,
            search_rx: None,
            task_tx: None,
            task_rx: None,
            download_tx: None,
            download_rx: None,
            viewer_tx: None,
            viewer_rx: None,
            search_debounce: DebounceTimer::new(),
            message_timer: DebounceTimer::new(),
            last_ctrl_c_press: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;

        let (tx, rx) = self.start_search_worker();
        self.search_tx = Some(tx);
        self.search_rx = Some(rx);
        let (tx, rx) = self.start_task_worker();
        self.task_tx = Some(tx);
        self.task_rx = Some(rx);
        let (tx, rx) = self.start_download_worker();
        self.download_tx = Some(tx);
        self.download_rx = Some(rx);
        let (tx, rx) = self.start_viewer_worker();
        self.viewer_tx = Some(tx);
        self.viewer_rx = Some(rx);

        self.bootstrap_from_link();

        let result = self.run_app(&mut terminal);

        self.cleanup_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Replays the startup link: a query commits immediately, bypassing the
    /// debounce, and a task id opens its modal.
    fn bootstrap_from_link(&mut self) {
        if !self.state.search.raw_input.is_empty() {
            self.handle_message(Message::CommitQuery);
        }
        if let Some(task_id) = self.state.link.get(PARAM_TASK_ID).map(str::to_string) {
            self.handle_message(Message::OpenModel(task_id));
        }
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                self.renderer.render(f, &self.state);
            })?;

            self.drain_worker_responses();

            if self.search_debounce.fire_due() {
                self.handle_message(Message::CommitQuery);
            }
            if self.message_timer.fire_due() {
                self.execute_command(Command::ClearMessage);
            }

            if poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_input(key)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn drain_worker_responses(&mut self) {
        if let Some(receiver) = &self.search_rx {
            if let Ok(response) = receiver.try_recv() {
                self.handle_message(Message::SearchCompleted {
                    id: response.id,
                    query: response.query,
                    result: response.result,
                });
            }
        }

        if let Some(receiver) = &self.task_rx {
            if let Ok(response) = receiver.try_recv() {
                self.handle_message(Message::ModelFetchCompleted {
                    id: response.id,
                    task_id: response.task_id,
                    result: response.result,
                });
            }
        }

        if let Some(receiver) = &self.download_rx {
            if let Ok(response) = receiver.try_recv() {
                self.handle_message(Message::DownloadCompleted {
                    id: response.id,
                    result: response.result,
                });
            }
        }

        // Activated views are not state: they land directly in the modal,
        // which drops resolutions for anything but its pending asset.
        if let Some(receiver) = &self.viewer_rx {
            if let Ok(response) = receiver.try_recv() {
                self.renderer
                    .get_model_modal_mut()
                    .resolve_activation(&response.asset_url, response.result);
            }
        }
    }

    fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        // Double Ctrl+C within the timeout exits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(last_press) = self.last_ctrl_c_press {
                if last_press.elapsed() < Duration::from_secs(DOUBLE_CTRL_C_TIMEOUT_SECS) {
                    return Ok(true);
                }
            }
            self.last_ctrl_c_press = Some(std::time::Instant::now());
            self.state.ui.message = Some("Press Ctrl+C again to exit".to_string());
            return Ok(false);
        }

        // Any other key disarms the exit prompt
        if self.last_ctrl_c_press.take().is_some() && is_exit_prompt(&self.state.ui.message) {
            self.execute_command(Command::ClearMessage);
        }

        // Global keys
        if key.code == KeyCode::Char('?') && self.state.mode != Mode::Help {
            self.handle_message(Message::ShowHelp);
            return Ok(false);
        }

        let message = if self.state.mode == Mode::Help {
            self.renderer.get_help_dialog_mut().handle_key(key)
        } else if self.state.model.phase.is_open() {
            if key.code == KeyCode::Char('y') {
                Some(Message::CopyToClipboard(CopyContent::ShareLink(
                    self.state.link.to_url(),
                )))
            } else {
                self.renderer.get_model_modal_mut().handle_key(key)
            }
        } else {
            self.handle_search_screen_input(key)
        };

        if let Some(msg) = message {
            self.handle_message(msg);
        }

        Ok(false)
    }

    fn handle_search_screen_input(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::Enter => self.renderer.get_result_grid_mut().handle_key(key),
            _ => self.renderer.get_search_bar_mut().handle_key(key),
        }
    }

    fn handle_message(&mut self, message: Message) {
        let command = self.state.update(message);
        self.execute_command(command);
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::ScheduleSearch(delay) => {
                self.search_debounce.schedule(delay);
            }
            Command::CancelScheduledSearch => {
                self.search_debounce.cancel();
            }
            Command::ExecuteSearch => {
                self.execute_search();
            }
            Command::FetchModel => {
                self.execute_model_fetch();
            }
            Command::StartDownload => {
                self.execute_download();
            }
            Command::ActivateViewer { asset_url } => {
                self.execute_viewer_activation(asset_url);
            }
            Command::CopyToClipboard(content) => {
                self.execute_copy(content);
            }
            Command::ShowMessage(msg) => {
                self.state.ui.message = Some(msg);
                self.message_timer.schedule(MESSAGE_CLEAR_DELAY_MS);
            }
            Command::ClearMessage => {
                self.state.ui.message = None;
                self.message_timer.cancel();
            }
        }
    }

    fn execute_search(&mut self) {
        if let Some(sender) = &self.search_tx {
            let request = SearchRequest {
                id: self.state.search.current_search_id,
                query: self.state.search.debounced_query.clone(),
            };
            let _ = sender.send(request);
        }
    }

    fn execute_model_fetch(&mut self) {
        let Some(task_id) = self.state.model.phase.task_id().map(str::to_string) else {
            return;
        };
        if let Some(sender) = &self.task_tx {
            let request = TaskFetchRequest {
                id: self.state.model.current_fetch_id,
                task_id,
            };
            let _ = sender.send(request);
        }
    }

    fn execute_download(&mut self) {
        let Some(url) = self.state.resolved_asset_url().map(str::to_string) else {
            return;
        };
        if let Some(sender) = &self.download_tx {
            let request = DownloadRequest {
                id: self.state.model.current_download_id,
                url,
                dest_dir: self.download_dir.clone(),
            };
            let _ = sender.send(request);
        }
    }

    fn execute_viewer_activation(&mut self, asset_url: String) {
        // The modal refuses a second activation for the same asset.
        if !self.renderer.get_model_modal_mut().begin_activation(&asset_url) {
            return;
        }
        if let Some(sender) = &self.viewer_tx {
            let _ = sender.send(ViewerActivationRequest { asset_url });
        }
    }

    fn execute_copy(&mut self, content: CopyContent) {
        let (text, label) = match &content {
            CopyContent::ShareLink(url) => (url.clone(), "share link"),
            CopyContent::AssetUrl(url) => (url.clone(), "asset URL"),
            CopyContent::TaskId(task_id) => (task_id.clone(), "task id"),
        };
        let feedback = match Self::copy_to_clipboard(&text) {
            Ok(()) => format!("✓ Copied {label}"),
            Err(e) => format!("Failed to copy: {e}"),
        };
        self.execute_command(Command::ShowMessage(feedback));
    }

    fn start_search_worker(&self) -> (Sender<SearchRequest>, Receiver<SearchResponse>) {
        let (request_tx, request_rx) = mpsc::channel::<SearchRequest>();
        let (response_tx, response_rx) = mpsc::channel::<SearchResponse>();
        let service = self.search_service.clone();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let _ = response_tx.send(service.search(request));
            }
        });

        (request_tx, response_rx)
    }

    fn start_task_worker(&self) -> (Sender<TaskFetchRequest>, Receiver<TaskFetchResponse>) {
        let (request_tx, request_rx) = mpsc::channel::<TaskFetchRequest>();
        let (response_tx, response_rx) = mpsc::channel::<TaskFetchResponse>();
        let service = self.task_service.clone();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let _ = response_tx.send(service.resolve(request));
            }
        });

        (request_tx, response_rx)
    }

    fn start_download_worker(&self) -> (Sender<DownloadRequest>, Receiver<DownloadResponse>) {
        let (request_tx, request_rx) = mpsc::channel::<DownloadRequest>();
        let (response_tx, response_rx) = mpsc::channel::<DownloadResponse>();
        let service = self.download_service.clone();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let _ = response_tx.send(service.download(request));
            }
        });

        (request_tx, response_rx)
    }

    fn start_viewer_worker(
        &self,
    ) -> (
        Sender<ViewerActivationRequest>,
        Receiver<ViewerActivationResponse>,
    ) {
        let (request_tx, request_rx) = mpsc::channel::<ViewerActivationRequest>();
        let (response_tx, response_rx) = mpsc::channel::<ViewerActivationResponse>();
        let backend = self.viewer_backend.clone();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let result = backend
                    .activate(&request.asset_url)
                    .map_err(|e| format!("{e:#}"));
                let _ = response_tx.send(ViewerActivationResponse {
                    asset_url: request.asset_url,
                    result,
                });
            }
        });

        (request_tx, response_rx)
    }

    fn copy_to_clipboard(text: &str) -> Result<()> {
        #[cfg(target_os = "macos")]
        {
            use std::process::Command;
            let mut child = Command::new("pbcopy")
                .stdin(std::process::Stdio::piped())
                .spawn()
                .context("Failed to spawn pbcopy")?;

            if let Some(mut stdin) = child.stdin.take() {
                use std::io::Write;
                stdin
                    .write_all(text.as_bytes())
                    .context("Failed to write to pbcopy")?;
            }

            child.wait().context("Failed to wait for pbcopy")?;
            Ok(())
        }

        #[cfg(target_os = "linux")]
        {
            use std::process::Command;
            let mut child = Command::new("xclip")
                .arg("-selection")
                .arg("clipboard")
                .stdin(std::process::Stdio::piped())
                .spawn()
                .context("Failed to spawn xclip")?;

            if let Some(mut stdin) = child.stdin.take() {
                use std::io::Write;
                stdin
                    .write_all(text.as_bytes())
                    .context("Failed to write to xclip")?;
            }

            child.wait().context("Failed to wait for xclip")?;
            Ok(())
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = text;
            Err(anyhow::anyhow!("Clipboard not supported on this platform"))
        }
    }
}
