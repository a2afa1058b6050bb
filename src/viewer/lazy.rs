use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};

use super::ModelView;

/// Suspension boundary around the 3D view: a cheap placeholder that is
/// always renderable, swapped for the real capability once activation
/// resolves. Resolutions for an asset that is no longer pending are
/// dropped silently.
pub struct LazyViewer {
    state: ViewerState,
}

enum ViewerState {
    Idle,
    Activating {
        asset_url: String,
    },
    Ready {
        asset_url: String,
        view: Box<dyn ModelView>,
    },
    Failed {
        error: String,
    },
}

impl LazyViewer {
    pub fn new() -> Self {
        Self {
            state: ViewerState::Idle,
        }
    }

    /// Move to Activating for `asset_url`. Returns true when the caller
    /// should dispatch the activation job, false when that asset is
    /// already pending or resolved.
    pub fn begin(&mut self, asset_url: &str) -> bool {
        match &self.state {
            ViewerState::Activating { asset_url: current }
            | ViewerState::Ready {
                asset_url: current, ..
            } if current == asset_url => false,
            _ => {
                self.state = ViewerState::Activating {
                    asset_url: asset_url.to_string(),
                };
                true
            }
        }
    }

    /// Apply an activation result. Ignored unless `asset_url` is the
    /// pending one.
    pub fn resolve(&mut self, asset_url: &str, result: Result<Box<dyn ModelView>, String>) {
        let ViewerState::Activating { asset_url: pending } = &self.state else {
            return;
        };
        if pending != asset_url {
            return;
        }
        self.state = match result {
            Ok(view) => ViewerState::Ready {
                asset_url: asset_url.to_string(),
                view,
            },
            Err(error) => ViewerState::Failed { error },
        };
    }

    pub fn reset(&mut self) {
        self.state = ViewerState::Idle;
    }

    pub fn is_activating(&self) -> bool {
        matches!(self.state, ViewerState::Activating { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ViewerState::Ready { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewerState::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut dyn ModelView> {
        match &mut self.state {
            ViewerState::Ready { view, .. } => Some(view.as_mut()),
            _ => None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        match &mut self.state {
            ViewerState::Idle => {}
            ViewerState::Activating { .. } => {
                let fallback = Paragraph::new("Loading 3D viewer...")
                    .style(Style::default().fg(Color::DarkGray));
                f.render_widget(fallback, area);
            }
            ViewerState::Failed { error } => {
                let message = Paragraph::new(format!("Viewer unavailable: {error}"))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true });
                f.render_widget(message, area);
            }
            ViewerState::Ready { view, .. } => view.render(f, area),
        }
    }
}

impl Default for LazyViewer {
    fn default() -> Self {
        Self::new()
    }
}
