//! Change notifications for a single source file
//!
//! The watch is placed on the file's directory rather than the file itself:
//! editors that save by writing a temporary file and renaming it over the
//! original replace the inode, which silently ends a watch on the file.

use crossbeam_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};

/// Forwards content changes of one file to a channel
pub struct FileWatcher {
    // dropping the watcher stops notify's background thread
    _watcher: RecommendedWatcher,
    target: PathBuf,
}

impl FileWatcher {
    /// Start watching `path`, sending every event that changes it (and every
    /// watch error) to `tx`
    pub fn new(path: &Path, tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let target = fs::canonicalize(path).map_err(notify::Error::io)?;
        let directory = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let filter = target.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let wanted = match &res {
                Ok(event) => is_change_to(event, &filter),
                Err(_) => true,
            };
            if wanted {
                // a closed channel means nobody is listening any more
                let _ = tx.send(res);
            }
        })?;
        watcher.watch(&directory, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            target,
        })
    }

    /// Canonical path of the watched file
    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// Whether `event` may have changed the contents of `target`
pub fn is_change_to(event: &Event, target: &Path) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event.paths.iter().any(|path| path == target)
}
