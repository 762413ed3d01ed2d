mod dense;
mod stream;

pub use self::dense::*;
pub use self::stream::*;
use num_traits::{Num, NumAssignOps, NumCast};
use std::fmt::{Debug, Display};

/// An element type the kernel can carry: scalar arithmetic, assignment ops
/// and an inspectable numeric value. Fixed-point types from outside the crate
/// participate by implementing this alongside the relevant `From`/cast
/// contracts.
pub trait Coeff:
    Num + NumAssignOps + NumCast + PartialOrd + Copy + Display + Debug + Send + 'static
{
}

/// Describes a layer of a neural network.
pub trait Layer {
    /// Gets the number of elements in the input shape
    fn num_in(&self) -> usize;
    /// Gets the number of elements in the output shape
    fn num_out(&self) -> usize;
    fn name(&self) -> &'static str;
}

pub trait WeightedLayer<T>: Layer {
    fn weights(&self) -> &[T];
    fn num_weights(&self) -> usize {
        self.weights().len()
    }
}

impl Coeff for f32 {}
impl Coeff for f64 {}
impl Coeff for i8 {}
impl Coeff for i16 {}
impl Coeff for i32 {}
impl Coeff for u8 {}
