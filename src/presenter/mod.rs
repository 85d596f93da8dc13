//! Turns the tree into visible rows and routes user intents to the editor.

mod intent;
mod outline;
mod presenter;
mod prompt;

pub use intent::{Action, Intent, IntentOutcome};
pub use outline::Outline;
pub use presenter::Presenter;
pub use prompt::{Confirmation, NameProvider, PromptError, TerminalPrompter};
