use std::sync::Arc;

use tracing::{debug, info};

use crate::expansion::ExpansionState;
use crate::presenter::{Action, Confirmation, Intent, IntentOutcome, NameProvider, Outline, PromptError};
use crate::tree::{Entry, editor};

/// Owns the current tree snapshot and the expansion state for one session.
#[derive(Debug, Clone)]
pub struct Presenter {
    root: Arc<Entry>,
    expansion: ExpansionState,
}

impl Presenter {
    pub fn new(root: impl Into<Arc<Entry>>) -> Self {
        Self::with_expansion(root, ExpansionState::new())
    }

    pub fn with_expansion(root: impl Into<Arc<Entry>>, expansion: ExpansionState) -> Self {
        Self {
            root: root.into(),
            expansion,
        }
    }

    pub fn root(&self) -> &Arc<Entry> {
        &self.root
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn outline(&self) -> Outline {
        Outline::build(&self.root, &self.expansion)
    }

    /// Carries out one user intent against the latest snapshot.
    ///
    /// The target is resolved again here, so an intent built from an older
    /// outline simply reports [`IntentOutcome::Stale`].
    pub fn handle<P>(&mut self, intent: Intent, prompts: &mut P) -> Result<IntentOutcome, PromptError>
    where
        P: NameProvider + Confirmation,
    {
        let Some(entry) = self.root.find(intent.target) else {
            debug!("Ignoring '{}', the node is gone", intent);
            return Ok(IntentOutcome::Stale);
        };
        if !intent.action.is_available(entry.is_folder()) {
            debug!("Ignoring '{}', not offered on '{}'", intent, entry.name());
            return Ok(IntentOutcome::Ignored);
        }
        let name = entry.name().to_owned();

        let edited = match intent.action {
            Action::Toggle => {
                let open = self.expansion.toggle(intent.target);
                debug!("Folder '{}' is now {}", name, if open { "open" } else { "closed" });
                return Ok(IntentOutcome::Toggled { open });
            }
            Action::Rename => {
                let prompt = format!("Enter new name for {name}:");
                let Some(new_name) = prompts.request_name(&prompt)? else {
                    return Ok(IntentOutcome::Abandoned);
                };
                editor::rename(&self.root, intent.target, new_name)
            }
            Action::Delete => {
                let prompt = format!("Are you sure you want to delete {name}?");
                if !prompts.confirm(&prompt)? {
                    return Ok(IntentOutcome::Abandoned);
                }
                editor::remove(&self.root, intent.target)
            }
            Action::Create => {
                let Some(new_name) = prompts.request_name("Enter new item name:")? else {
                    return Ok(IntentOutcome::Abandoned);
                };
                editor::insert(&self.root, intent.target, new_name)
            }
        };

        Ok(self.replace_root(edited, &intent, &name))
    }

    /// Swaps in the edited snapshot. The editor hands back the same root when it refuses an edit.
    fn replace_root(&mut self, edited: Arc<Entry>, intent: &Intent, name: &str) -> IntentOutcome {
        if Arc::ptr_eq(&edited, &self.root) {
            debug!("'{}' left the tree unchanged", intent);
            return IntentOutcome::Unchanged;
        }

        self.root = edited;
        if intent.action == Action::Delete {
            self.expansion.retain_reachable(&self.root);
        }
        info!("Applied '{}' to '{}'", intent, name);
        IntentOutcome::Edited
    }
}
