//! Watches a source file so the CLI can treat saves from an external editor
//! as edits of the buffer.

use anyhow::{Context, Result};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Live watcher; dropping it stops the notifications.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl FileWatcher {
    /// Start watching `path`. Every create or modify event for it sends `()` on the
    /// returned channel.
    pub fn start(path: &Path) -> Result<(Self, mpsc::UnboundedReceiver<()>)> {
        let path = path
            .canonicalize()
            .with_context(|| format!("cannot watch {}", path.display()))?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let (tx, rx) = mpsc::unbounded_channel();

        let target = path.clone();
        let mut watcher = notify::recommended_watcher(
            move |event: notify::Result<notify::Event>| match event {
                Ok(event) => {
                    let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                        && event.paths.iter().any(|p| is_same_file(p, &target));
                    if relevant {
                        let _ = tx.send(());
                    }
                }
                Err(err) => log::warn!("file watcher error: {err}"),
            },
        )
        .context("failed to create file watcher")?;

        // Editors often replace the file instead of writing in place, so the
        // directory is watched rather than the file itself.
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", dir.display()))?;

        log::info!("watching {}", path.display());
        Ok((
            Self {
                _watcher: watcher,
                path,
            },
            rx,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_same_file(candidate: &Path, target: &Path) -> bool {
    candidate == target
        || candidate
            .canonicalize()
            .map(|p| p == target)
            .unwrap_or(false)
}
