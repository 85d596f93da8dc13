//! In-memory explorer tree.
//!
//! Nodes are either files or folders, identified by a [`NodeId`] rather than by
//! name, and edited through the pure functions in [`editor`].

pub mod editor;
mod entry;

pub use entry::{Entry, NodeId};
