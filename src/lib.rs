//! A streaming fully-connected layer kernel: packed elements arrive on a
//! bounded FIFO, flow through a quantized multiply-accumulate datapath whose
//! multiplier budget is governed by a reuse factor, and leave re-packed on
//! another FIFO. Software model of the synthesized datapath; the element
//! types, product strategy and cast policy are pluggable per layer instance.
#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate lazy_static;

mod config;
mod layers;
mod math;
mod schedule;
mod stream;
mod util;
#[cfg(test)]
mod tests;

pub use crate::config::*;
pub use crate::layers::*;
pub use crate::math::*;
pub use crate::schedule::*;
pub use crate::stream::*;
pub use crate::util::*;
