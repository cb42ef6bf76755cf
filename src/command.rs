pub mod batch;
pub mod closure;
pub mod snapshot;
pub mod text;

use crate::error::Rejection;
use crate::receiver::Receiver;

pub use batch::Batch;
pub use closure::FnCommand;
pub use snapshot::{Restore, Snapshotted};
pub use text::TextEdit;

/// A reversible mutation of a receiver.
///
/// `reverse` must undo exactly the effect of the preceding `apply` on the same receiver,
/// so that `apply` followed by `reverse` leaves it observably unchanged. A command that
/// rejects must leave the receiver untouched.
///
/// Calling `apply` twice without a `reverse` in between is unspecified unless the
/// implementor says otherwise.
pub trait Command<R: Receiver>: Send {
    fn apply(&mut self, receiver: &mut R) -> Result<(), Rejection>;

    fn reverse(&mut self, receiver: &mut R) -> Result<(), Rejection>;

    /// Short description, used for "Undo ..." / "Redo ..." affordances and logging
    fn label(&self) -> String;
}

impl<R: Receiver, C: Command<R> + ?Sized> Command<R> for Box<C> {
    fn apply(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        (**self).apply(receiver)
    }

    fn reverse(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        (**self).reverse(receiver)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

#[cfg(test)]
mod test;
