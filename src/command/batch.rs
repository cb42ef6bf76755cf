use tracing::warn;

use crate::error::Rejection;
use crate::receiver::Receiver;

use super::Command;

/// Multiple commands grouped into one history entry.
///
/// Applying is all-or-nothing: when a member rejects, the members already applied are
/// reversed (newest first) before the rejection is returned. Reversing runs the members
/// backward; if one fails, the members already reversed are re-applied so the receiver
/// is back in its post-apply state.
///
/// The receiver is snapshotted before either walk. If a rollback step itself fails, the
/// snapshot is restored, so a failed `apply` or `reverse` always leaves the receiver
/// exactly as it was before the call.
pub struct Batch<R: Receiver> {
    label: String,
    commands: Vec<Box<dyn Command<R>>>,
}

impl<R: Receiver> Batch<R> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            commands: Vec::new(),
        }
    }

    pub fn with<C: Command<R> + 'static>(mut self, command: C) -> Self {
        self.push(command);
        self
    }

    pub fn push<C: Command<R> + 'static>(&mut self, command: C) {
        self.commands.push(Box::new(command));
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<R: Receiver> Command<R> for Batch<R> {
    fn apply(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        let before = receiver.snapshot();
        for i in 0..self.commands.len() {
            if let Err(rejection) = self.commands[i].apply(receiver) {
                for done in self.commands[..i].iter_mut().rev() {
                    if let Err(err) = done.reverse(receiver) {
                        warn!(batch = %self.label, command = %done.label(), error = %err, "rollback of batch member failed, restoring snapshot");
                        receiver.restore(before);
                        return Err(rejection);
                    }
                }
                return Err(rejection);
            }
        }
        Ok(())
    }

    fn reverse(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        let before = receiver.snapshot();
        for i in (0..self.commands.len()).rev() {
            if let Err(rejection) = self.commands[i].reverse(receiver) {
                for undone in self.commands[i + 1..].iter_mut() {
                    if let Err(err) = undone.apply(receiver) {
                        warn!(batch = %self.label, command = %undone.label(), error = %err, "re-apply of batch member failed, restoring snapshot");
                        receiver.restore(before);
                        return Err(rejection);
                    }
                }
                return Err(rejection);
            }
        }
        Ok(())
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
