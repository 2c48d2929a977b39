//! Config file watching for the dev server

use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// Watches a directory and reports changed `.toml` files
pub struct HotReloader {
    _watcher: notify::RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
}

impl HotReloader {
    /// Start watching `dir` (non-recursive)
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, notify::Error> {
        let (tx, rx) = channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(dir.as_ref(), RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Drain pending events without blocking
    pub fn check_changes(&self) -> Vec<PathBuf> {
        let mut changed = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            match result {
                Ok(event) => {
                    for path in config_paths(&event) {
                        if !changed.contains(&path) {
                            changed.push(path);
                        }
                    }
                }
                Err(err) => tracing::warn!(%err, "file watcher"),
            }
        }

        changed
    }
}

/// Config files touched by a create or modify event
fn config_paths(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Modify(_) | EventKind::Create(_) => event
            .paths
            .iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    #[test]
    fn test_only_toml_changes_count() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/app/tally.toml"))
            .add_path(PathBuf::from("/app/notes.md"));
        assert_eq!(config_paths(&event), vec![PathBuf::from("/app/tally.toml")]);

        let created = Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("/app/other.toml"));
        assert_eq!(config_paths(&created).len(), 1);
    }

    #[test]
    fn test_removals_ignored() {
        let event = Event::new(EventKind::Remove(RemoveKind::File)).add_path(PathBuf::from("/app/tally.toml"));
        assert!(config_paths(&event).is_empty());
    }

    #[test]
    fn test_watch_directory() {
        let dir = tempfile::tempdir().unwrap();
        let reloader = HotReloader::new(dir.path()).unwrap();
        // nothing written yet
        assert!(reloader.check_changes().is_empty());
    }
}
