use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

use tracing::{debug, trace, warn};

use crate::command::Command;
use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::receiver::Receiver;

/// Manages undo/redo history for one receiver.
///
/// `past` holds applied commands (newest at the back), `future` holds undone ones
/// (next redo at the back). A command lives in exactly one of them. The receiver is
/// passed into every call; the history never owns it.
pub struct History<R: Receiver> {
    past: VecDeque<Box<dyn Command<R>>>,
    future: Vec<Box<dyn Command<R>>>,
    max_depth: Option<NonZeroUsize>,
}

impl<R: Receiver> History<R> {
    pub fn new() -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_depth: None,
        }
    }

    /// History keeping at most `max_depth` undoable entries
    pub fn bounded(max_depth: NonZeroUsize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Self::new()
        }
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        Self {
            max_depth: config.max_history_depth,
            ..Self::new()
        }
    }

    /// Apply `command` and record it. Clears the redo stack.
    ///
    /// If the command rejects, neither the receiver nor the history changes.
    pub fn execute<C>(&mut self, receiver: &mut R, command: C) -> Result<(), HistoryError>
    where
        C: Command<R> + 'static,
    {
        let mut command: Box<dyn Command<R>> = Box::new(command);
        if let Err(source) = command.apply(receiver) {
            let label = command.label();
            debug!(command = %label, reason = %source, "command rejected");
            return Err(HistoryError::CommandRejected { command: label, source });
        }

        if !self.future.is_empty() {
            trace!(discarded = self.future.len(), "new command invalidated redo history");
            self.future.clear();
        }
        debug!(command = %command.label(), depth = self.past.len() + 1, "executed");
        self.push_past(command);
        Ok(())
    }

    /// Undo the most recent command. `Ok(false)` when there is nothing to undo.
    ///
    /// If the command fails to reverse it stays on top of the undo stack.
    pub fn undo(&mut self, receiver: &mut R) -> Result<bool, HistoryError> {
        let Some(mut command) = self.past.pop_back() else {
            return Ok(false);
        };

        match command.reverse(receiver) {
            Ok(()) => {
                debug!(command = %command.label(), depth = self.past.len(), "undone");
                self.future.push(command);
                Ok(true)
            }
            Err(source) => {
                let label = command.label();
                warn!(command = %label, reason = %source, "reverse failed, history left unchanged");
                self.past.push_back(command);
                Err(HistoryError::InconsistentReverse { command: label, source })
            }
        }
    }

    /// Redo the last undone command. `Ok(false)` when there is nothing to redo.
    ///
    /// If the command rejects it stays on top of the redo stack.
    pub fn redo(&mut self, receiver: &mut R) -> Result<bool, HistoryError> {
        let Some(mut command) = self.future.pop() else {
            return Ok(false);
        };

        match command.apply(receiver) {
            Ok(()) => {
                debug!(command = %command.label(), depth = self.past.len() + 1, "redone");
                self.push_past(command);
                Ok(true)
            }
            Err(source) => {
                let label = command.label();
                debug!(command = %label, reason = %source, "redo rejected, history left unchanged");
                self.future.push(command);
                Err(HistoryError::CommandRejected { command: label, source })
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable commands
    pub fn history_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redoable commands
    pub fn future_depth(&self) -> usize {
        self.future.len()
    }

    /// Label of the command the next undo would reverse
    pub fn undo_label(&self) -> Option<String> {
        self.past.back().map(|c| c.label())
    }

    /// Label of the command the next redo would apply
    pub fn redo_label(&self) -> Option<String> {
        self.future.last().map(|c| c.label())
    }

    pub fn max_depth(&self) -> Option<NonZeroUsize> {
        self.max_depth
    }

    /// Change the depth limit. Shrinking it evicts the oldest entries right away.
    pub fn set_max_depth(&mut self, max_depth: Option<NonZeroUsize>) {
        self.max_depth = max_depth;
        self.evict_overflow();
    }

    /// Forget all history. The receiver keeps its current state.
    pub fn clear(&mut self) {
        debug!(past = self.past.len(), future = self.future.len(), "history cleared");
        self.past.clear();
        self.future.clear();
    }

    fn push_past(&mut self, command: Box<dyn Command<R>>) {
        self.past.push_back(command);
        self.evict_overflow();
    }

    fn evict_overflow(&mut self) {
        let Some(max) = self.max_depth else {
            return;
        };
        while self.past.len() > max.get() {
            if let Some(evicted) = self.past.pop_front() {
                trace!(command = %evicted.label(), "evicted oldest history entry");
            }
        }
    }
}

impl<R: Receiver> Default for History<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Receiver> fmt::Debug for History<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("past", &self.past.iter().map(|c| c.label()).collect::<Vec<_>>())
            .field("future", &self.future.iter().map(|c| c.label()).collect::<Vec<_>>())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
