/*
 * Packed channel elements and the bounded FIFO streams that carry them.
 *
 * A kernel invocation owns one receiver end for input packs and one sender
 * end for result packs. Reads block on an empty channel and writes block on a
 * full one; a hung-up peer is surfaced as a `StreamError` instead of blocking
 * forever.
 */
use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::Deref;
use thiserror::Error;

/// A fixed-size bundle of scalars transmitted as one channel item.
#[derive(Clone, Debug, PartialEq)]
pub struct Pack<T>(pub Vec<T>);

impl<T: Copy> Pack<T> {
    pub fn from_slice(scalars: &[T]) -> Pack<T> {
        Pack(scalars.to_vec())
    }
}

impl<T> Deref for Pack<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub type PackSender<T> = Sender<Pack<T>>;
pub type PackReceiver<T> = Receiver<Pack<T>>;

/// Creates a bounded FIFO channel of packed elements.
///
/// Capacity is in packs, not scalars. The kernel is deadlock-free for any
/// capacity >= 1 because an invocation consumes its whole input vector before
/// it produces any output.
pub fn pack_channel<T>(capacity: usize) -> (PackSender<T>, PackReceiver<T>) {
    bounded(capacity)
}

/// Splits a flat scalar buffer into packs of `size` consecutive scalars.
pub fn pack_buffer<T: Copy>(scalars: &[T], size: usize) -> Vec<Pack<T>> {
    debug_assert_eq!(
        scalars.len() % size,
        0,
        "buffer of {} scalars does not divide into packs of {}",
        scalars.len(),
        size
    );
    scalars.chunks(size).map(Pack::from_slice).collect()
}

/// A peer hang-up observed while streaming one invocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    #[error("input stream disconnected after {read} of {expected} packs")]
    InputDisconnected { read: usize, expected: usize },
    #[error("output stream disconnected after {written} of {expected} packs")]
    OutputDisconnected { written: usize, expected: usize },
}
