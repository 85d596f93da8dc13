use clap::ValueEnum;
use derive_more::Display;

use crate::tree::NodeId;

/// Something the user can do to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, ValueEnum)]
pub enum Action {
    #[display("toggle")]
    #[value(alias = "t")]
    Toggle,
    #[display("rename")]
    #[value(alias = "r")]
    Rename,
    #[display("delete")]
    #[value(alias = "d")]
    Delete,
    #[display("create")]
    #[value(aliases = ["c", "n", "new"])]
    Create,
}

impl Action {
    /// Folders offer every action; files cannot be toggled or receive new entries.
    pub fn is_available(self, on_folder: bool) -> bool {
        match self {
            Action::Toggle | Action::Create => on_folder,
            Action::Rename | Action::Delete => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{action} {target}")]
pub struct Intent {
    pub action: Action,
    pub target: NodeId,
}

impl Intent {
    pub fn new(action: Action, target: NodeId) -> Self {
        Self { action, target }
    }
}

/// What became of an intent once the presenter handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Toggled { open: bool },
    Edited,
    /// The editor refused the edit; the tree is unchanged.
    Unchanged,
    /// The user cancelled the prompt.
    Abandoned,
    /// The target is gone from the current tree.
    Stale,
    /// The row does not offer this action.
    Ignored,
}
