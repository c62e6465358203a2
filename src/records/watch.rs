use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use log::warn;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::Result;

/// Watches the store directory and flags when the set of records may have changed.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    changes: Receiver<()>,
}

impl StoreWatcher {
    pub fn start(dir: &Path) -> Result<Self> {
        let (tx, changes) = mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
                Ok(event) if is_relevant_event(&event.kind) => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(err) => warn!("Store watch error: {err}"),
            })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            changes,
        })
    }

    /// Drain pending notifications, returning whether any arrived.
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;
        loop {
            match self.changes.try_recv() {
                Ok(()) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return changed,
            }
        }
    }
}

fn is_relevant_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(_) | EventKind::Any
    )
}
