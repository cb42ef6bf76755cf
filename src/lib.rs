//! Command-based undo/redo.
//!
//! A [`Receiver`] is the state being edited, a [`Command`] is one reversible edit of it,
//! and a [`History`] applies commands and walks them backward and forward. [`Document`]
//! bundles a receiver with its history, [`SharedDocument`] puts both behind one lock.

pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod receiver;
pub mod script;

pub use command::{Batch, Command, FnCommand, Restore, Snapshotted, TextEdit};
pub use config::HistoryConfig;
pub use document::{Document, SharedDocument};
pub use error::{ConfigError, HistoryError, Rejection};
pub use history::History;
pub use receiver::{Receiver, TextBuffer, TextSnapshot};
