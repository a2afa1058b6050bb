use crate::interactive::ui::events::CopyContent;

/// Side effects requested by `AppState::update`. The event loop owns the
/// workers, timers and clipboard, so state transitions stay pure and the
/// loop executes whatever comes back.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,

    // Search
    ScheduleSearch(u64),
    CancelScheduledSearch,
    ExecuteSearch,

    // Modal
    FetchModel,
    StartDownload,
    ActivateViewer { asset_url: String },

    // Clipboard and status line
    CopyToClipboard(CopyContent),
    ShowMessage(String),
    ClearMessage,
}
