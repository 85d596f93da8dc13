use std::collections::HashSet;

use tracing::debug;

use crate::tree::{Entry, NodeId};

/// Open/closed flags for folders, keyed by node identity.
///
/// Only the open folders are stored; every other id reads as closed. The state
/// never holds tree content, so it survives edits anywhere else in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    open: HashSet<NodeId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every folder under `root` (the root included) starts open.
    pub fn all_open(root: &Entry) -> Self {
        let open = root
            .iter()
            .filter(|entry| entry.is_folder())
            .map(Entry::id)
            .collect();
        Self { open }
    }

    pub fn is_open(&self, folder: NodeId) -> bool {
        self.open.contains(&folder)
    }

    /// Flips the flag for `folder` and returns the new value.
    pub fn toggle(&mut self, folder: NodeId) -> bool {
        let now_open = !self.is_open(folder);
        self.set_open(folder, now_open);
        now_open
    }

    pub fn set_open(&mut self, folder: NodeId, open: bool) {
        if open {
            self.open.insert(folder);
        } else {
            self.open.remove(&folder);
        }
    }

    /// Forgets folders that are no longer present under `root`.
    pub fn retain_reachable(&mut self, root: &Entry) {
        let before = self.open_count();
        let reachable: HashSet<NodeId> = root
            .iter()
            .filter(|entry| entry.is_folder())
            .map(Entry::id)
            .collect();
        self.open.retain(|id| reachable.contains(id));

        let dropped = before - self.open_count();
        if dropped > 0 {
            debug!("Dropped expansion state of {} removed folder(s)", dropped);
        }
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}
