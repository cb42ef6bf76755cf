use std::marker::PhantomData;

use crate::error::Rejection;
use crate::receiver::Receiver;

use super::Command;

/// A command built from a forward closure and its inverse
pub struct FnCommand<R, A, B> {
    label: String,
    forward: A,
    backward: B,
    _receiver: PhantomData<fn(&mut R)>,
}

impl<R, A, B> FnCommand<R, A, B>
where
    R: Receiver,
    A: FnMut(&mut R) -> Result<(), Rejection>,
    B: FnMut(&mut R) -> Result<(), Rejection>,
{
    pub fn new(label: impl Into<String>, forward: A, backward: B) -> Self {
        Self {
            label: label.into(),
            forward,
            backward,
            _receiver: PhantomData,
        }
    }
}

impl<R, A, B> Command<R> for FnCommand<R, A, B>
where
    R: Receiver,
    A: FnMut(&mut R) -> Result<(), Rejection> + Send,
    B: FnMut(&mut R) -> Result<(), Rejection> + Send,
{
    fn apply(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        (self.forward)(receiver)
    }

    fn reverse(&mut self, receiver: &mut R) -> Result<(), Rejection> {
        (self.backward)(receiver)
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
