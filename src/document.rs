use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::command::Command;
use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::history::History;
use crate::receiver::Receiver;

/// A receiver together with its undo/redo history
#[derive(Debug)]
pub struct Document<R: Receiver> {
    receiver: R,
    history: History<R>,
}

impl<R: Receiver> Document<R> {
    pub fn new(receiver: R) -> Self {
        Self {
            receiver,
            history: History::new(),
        }
    }

    pub fn with_config(receiver: R, config: &HistoryConfig) -> Self {
        Self {
            receiver,
            history: History::with_config(config),
        }
    }

    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    pub fn history(&self) -> &History<R> {
        &self.history
    }

    pub fn into_receiver(self) -> R {
        self.receiver
    }

    pub fn execute<C: Command<R> + 'static>(&mut self, command: C) -> Result<(), HistoryError> {
        self.history.execute(&mut self.receiver, command)
    }

    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        self.history.undo(&mut self.receiver)
    }

    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        self.history.redo(&mut self.receiver)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_depth(&self) -> usize {
        self.history.history_depth()
    }

    pub fn future_depth(&self) -> usize {
        self.history.future_depth()
    }

    pub fn set_max_depth(&mut self, max_depth: Option<NonZeroUsize>) {
        self.history.set_max_depth(max_depth);
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Cloneable handle to a document shared between threads.
///
/// Every operation holds the one document lock for the whole apply + stack update, so no
/// caller can observe the stacks or the receiver mid-operation.
pub struct SharedDocument<R: Receiver> {
    inner: Arc<Mutex<Document<R>>>,
}

impl<R: Receiver> Clone for SharedDocument<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Receiver> SharedDocument<R> {
    pub fn new(document: Document<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(document)),
        }
    }

    pub fn execute<C: Command<R> + 'static>(&self, command: C) -> Result<(), HistoryError> {
        self.inner.lock().execute(command)
    }

    pub fn undo(&self) -> Result<bool, HistoryError> {
        self.inner.lock().undo()
    }

    pub fn redo(&self) -> Result<bool, HistoryError> {
        self.inner.lock().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.inner.lock().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.lock().can_redo()
    }

    pub fn history_depth(&self) -> usize {
        self.inner.lock().history_depth()
    }

    pub fn future_depth(&self) -> usize {
        self.inner.lock().future_depth()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Inspect the receiver under the document lock
    pub fn read<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(self.inner.lock().receiver())
    }

    /// Run several operations as one atomic unit
    pub fn with_document<T>(&self, f: impl FnOnce(&mut Document<R>) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
