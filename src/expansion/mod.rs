mod expansion_state;

pub use expansion_state::ExpansionState;
