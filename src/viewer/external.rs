use anyhow::{Context, Result};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use tracing::{debug, info};

use super::{ModelView, ViewerBackend};
use crate::api::ModelCatalog;
use crate::download::file_name_from_url;

/// Default backend. Activation fetches the asset into a local cache file
/// and, when a viewer command is configured, opens it there. Orbit and
/// material controls live in that program's own window.
pub struct ExternalViewer {
    command: Option<String>,
    cache_dir: PathBuf,
    catalog: Arc<dyn ModelCatalog>,
}

impl ExternalViewer {
    pub fn new(command: Option<String>, catalog: Arc<dyn ModelCatalog>) -> Self {
        Self {
            command,
            cache_dir: std::env::temp_dir().join("glbfind"),
            catalog,
        }
    }

    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = dir;
        self
    }
}

impl ViewerBackend for ExternalViewer {
    fn activate(&self, asset_url: &str) -> Result<Box<dyn ModelView>> {
        std::fs::create_dir_all(&self.cache_dir)
            .with_context(|| format!("failed to create {}", self.cache_dir.display()))?;

        let dest = self.cache_dir.join(file_name_from_url(asset_url));
        let bytes = self.catalog.download(asset_url, &dest)?;
        debug!(path = %dest.display(), bytes, "asset cached for viewing");

        let launched = match &self.command {
            Some(cmd) => {
                let child = Command::new(cmd)
                    .arg(&dest)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .with_context(|| format!("failed to launch viewer command {cmd:?}"))?;
                info!(command = %cmd, pid = child.id(), "viewer launched");
                Some((cmd.clone(), child))
            }
            None => None,
        };

        Ok(Box::new(ExternalView {
            asset_path: dest,
            size_bytes: bytes,
            launched,
        }))
    }
}

struct ExternalView {
    asset_path: PathBuf,
    size_bytes: u64,
    launched: Option<(String, Child)>,
}

impl ModelView for ExternalView {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(format!("Asset: {}", self.asset_path.display())),
            Line::from(format!("Size: {} bytes", self.size_bytes)),
        ];
        match &self.launched {
            Some((cmd, child)) => {
                lines.push(Line::from(format!("Open in {} (pid {})", cmd, child.id())));
                lines.push(Line::styled(
                    "Orbit and material controls are in the viewer window.",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            None => {
                lines.push(Line::styled(
                    "Set GLBFIND_VIEWER to open assets in a viewer automatically.",
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }

        f.render_widget(Paragraph::new(lines), area);
    }
}

// The viewer process belongs to the modal that opened it.
impl Drop for ExternalView {
    fn drop(&mut self) {
        if let Some((_, child)) = &mut self.launched {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::path::Path;

    struct FakeCatalog {
        bytes: Vec<u8>,
    }

    impl ModelCatalog for FakeCatalog {
        fn search(&self, _prompt: &str, _limit: u32) -> Result<Vec<crate::api::ModelHit>> {
            Err(anyhow!("not used in this test"))
        }

        fn task(&self, _task_id: &str) -> Result<crate::api::ModelDetail> {
            Err(anyhow!("not used in this test"))
        }

        fn download(&self, _url: &str, dest: &Path) -> Result<u64> {
            std::fs::write(dest, &self.bytes)?;
            Ok(self.bytes.len() as u64)
        }
    }

    #[test]
    fn test_activation_without_command_caches_asset() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(FakeCatalog {
            bytes: b"glTF-binary".to_vec(),
        });
        let backend =
            ExternalViewer::new(None, catalog).with_cache_dir(dir.path().to_path_buf());

        let view = backend
            .activate("https://cdn.example.com/assets/scene.gltf")
            .unwrap();

        // Extension is forced on the cached copy.
        assert!(dir.path().join("scene.glb").exists());
        assert!(!view.supports_untextured());
    }

    #[test]
    fn test_activation_fails_when_command_cannot_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Arc::new(FakeCatalog { bytes: vec![0u8] });
        let backend = ExternalViewer::new(
            Some("glbfind-test-viewer-that-does-not-exist".to_string()),
            catalog,
        )
        .with_cache_dir(dir.path().to_path_buf());

        let err = backend
            .activate("https://cdn.example.com/assets/scene.glb")
            .unwrap_err();
        assert!(err.to_string().contains("failed to launch viewer command"));
    }
}
