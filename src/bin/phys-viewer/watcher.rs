//! Frames file watcher for hot-reloading an external frame set.

use eframe::egui;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Watches a frame set file and reports when it was rewritten.
pub struct FramesWatcher {
    path: PathBuf,
    changed_rx: Receiver<()>,
    /// The watcher must be kept alive for events to fire
    _watcher: RecommendedWatcher,
}

impl FramesWatcher {
    /// Starts watching `path`.
    ///
    /// Returns `None` if the file has no parent directory or watching fails.
    pub fn new(path: &Path, ctx: egui::Context) -> Option<Self> {
        let path = path.canonicalize().ok()?;
        let dir = path.parent()?.to_path_buf();
        let file_name = path.file_name()?.to_os_string();

        let (tx, changed_rx) = mpsc::channel();

        // A replaced file only shows up as an event on its parent directory.
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let Ok(event) = res else {
                return;
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            if event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()))
            {
                let _ = tx.send(());
                ctx.request_repaint();
            }
        })
        .ok()?;

        watcher.watch(&dir, RecursiveMode::NonRecursive).ok()?;

        log::info!("Watching frames file: {}", path.display());

        Some(Self {
            path,
            changed_rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the file changed since the last poll.
    pub fn poll(&mut self) -> bool {
        // Drain all pending notifications; one reload covers them all
        let mut changed = false;
        loop {
            match self.changed_rx.try_recv() {
                Ok(()) => changed = true,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Frames watcher channel disconnected");
                    break;
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_the_canonical_path() {
        let dir = std::env::temp_dir().join(format!("phys-viewer-watch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("frames.ron"), "(frames: [])").unwrap();

        let mut watcher =
            FramesWatcher::new(&dir.join(".").join("frames.ron"), egui::Context::default()).unwrap();
        assert_eq!(watcher.path(), dir.canonicalize().unwrap().join("frames.ron"));
        assert!(!watcher.poll());

        drop(watcher);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
