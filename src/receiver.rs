pub mod text;

use std::fmt::Debug;

pub use text::{TextBuffer, TextSnapshot};

/// Mutable state that commands are applied to.
///
/// Implementors expose their own mutation primitives for commands to call, plus
/// whole-state capture and restore. A memento must be a deep, point-in-time copy:
/// mutating the live receiver afterwards must never change a memento already handed out.
pub trait Receiver {
    type Memento: Clone + Debug;

    fn snapshot(&self) -> Self::Memento;

    /// Replace all observable state with `memento`. No merging, no side effects.
    fn restore(&mut self, memento: Self::Memento);
}
