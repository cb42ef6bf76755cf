use crate::error::Rejection;
use crate::receiver::Receiver;

use super::Command;

/// Memento-based reversal for edits with no clean inverse.
///
/// The receiver is captured right before every `apply` and restored wholesale on
/// `reverse`. If the edit rejects, the capture is restored so a partial mutation
/// never leaks out.
pub struct Snapshotted<R: Receiver, F> {
    label: String,
    edit: F,
    saved: Option<R::Memento>,
}

impl<R, F> Snapshotted<R, F>
where
    R: Receiver,
    F: FnMut(&mut R) -> Result<(), Rejection>,
{
    pub fn new(label: impl Into<String>, edit: F) -> Self {
        Self {
            label: label.into(),
            edit,
            saved: None,
        }
    }
}

impl<R, F> Command<R> for Snapshotted<R, F>
where
    R: Receiver,
    R::Memento: Send,
    F: FnMut(&mut R) -> Result<(), Rejection> + Send,
{
    fn apply(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        let before = receiver.snapshot();
        match (self.edit)(receiver) {
            Ok(()) => {
                self.saved = Some(before);
                Ok(())
            }
            Err(rejection) => {
                receiver.restore(before);
                Err(rejection)
            }
        }
    }

    fn reverse(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        let before = self
            .saved
            .take()
            .ok_or_else(|| Rejection::new("nothing to restore, command was never applied"))?;
        receiver.restore(before);
        Ok(())
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// Replaces the receiver's state with a stored memento, e.g. "revert to checkpoint".
pub struct Restore<R: Receiver> {
    label: String,
    target: R::Memento,
    previous: Option<R::Memento>,
}

impl<R: Receiver> Restore<R> {
    pub fn new(label: impl Into<String>, target: R::Memento) -> Self {
        Self {
            label: label.into(),
            target,
            previous: None,
        }
    }

    pub fn target(&self) -> &R::Memento {
        &self.target
    }
}

impl<R> Command<R> for Restore<R>
where
    R: Receiver,
    R::Memento: Send,
{
    fn apply(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        self.previous = Some(receiver.snapshot());
        receiver.restore(self.target.clone());
        Ok(())
    }

    fn reverse(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        let previous = self
            .previous
            .take()
            .ok_or_else(|| Rejection::new("nothing to restore, command was never applied"))?;
        receiver.restore(previous);
        Ok(())
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
