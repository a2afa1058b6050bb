//! Boundary to the 3D rendering collaborator.
//!
//! The core never parses or renders GLB itself. It resolves an asset URL,
//! hands it to a [`ViewerBackend`], and renders whatever [`ModelView`] comes
//! back. Activation is slow and failable, so the modal always goes through
//! [`LazyViewer`], which shows a fallback until the capability resolves.

mod external;
mod lazy;

pub use external::ExternalViewer;
pub use lazy::LazyViewer;

use anyhow::Result;
use ratatui::{Frame, layout::Rect};

/// A live view bound to one resolved asset.
pub trait ModelView: Send {
    fn render(&mut self, f: &mut Frame, area: Rect);

    /// Whether the backing renderer can swap materials for a flat one.
    fn supports_untextured(&self) -> bool {
        false
    }

    /// Swap every surface material for a flat one, or restore the
    /// originals. Ignored by backends that report no support.
    fn set_untextured(&mut self, _untextured: bool) {}

    fn untextured(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for dyn ModelView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ModelView")
    }
}

/// Produces a live view for an asset URL. Run off the UI thread.
pub trait ViewerBackend: Send + Sync {
    fn activate(&self, asset_url: &str) -> Result<Box<dyn ModelView>>;
}
