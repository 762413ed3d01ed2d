use crate::layers::Coeff;
use num_traits::{Bounded, NumCast};

/// Conversion of a finished accumulator value into the output element type.
///
/// The single place where precision or range reduction happens; the kernel
/// applies one policy uniformly across all output units.
pub trait CastPolicy<A, R> {
    fn cast(&self, acc: A) -> R;
}

/// Widening or same-width conversion with no value change.
#[derive(Clone, Copy, Debug, Default)]
pub struct LosslessCast;

impl<A, R> CastPolicy<A, R> for LosslessCast
where
    R: From<A>,
{
    fn cast(&self, acc: A) -> R {
        R::from(acc)
    }
}

/// Clamp to the representable range of the output type.
///
/// Any fraction is truncated towards zero on integral targets; float targets
/// see a pure clamp.
#[derive(Clone, Copy, Debug, Default)]
pub struct SaturatingCast;

impl<A, R> CastPolicy<A, R> for SaturatingCast
where
    A: Coeff,
    R: Coeff + Bounded,
{
    fn cast(&self, acc: A) -> R {
        clamp_to::<A, R>(acc, false)
    }
}

/// Round to nearest, then clamp to the representable range of the output
/// type. The rule the quantized integer paths use.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoundingCast;

impl<A, R> CastPolicy<A, R> for RoundingCast
where
    A: Coeff,
    R: Coeff + Bounded,
{
    fn cast(&self, acc: A) -> R {
        clamp_to::<A, R>(acc, true)
    }
}

fn clamp_to<A, R>(acc: A, round: bool) -> R
where
    A: Coeff,
    R: Coeff + Bounded,
{
    let lo = R::min_value()
        .to_f64()
        .expect("output type minimum is representable as f64");
    let hi = R::max_value()
        .to_f64()
        .expect("output type maximum is representable as f64");
    let mut val = acc
        .to_f64()
        .expect("accumulator value is representable as f64");
    if round {
        val = val.round();
    }
    let clamped = val.min(hi).max(lo);
    NumCast::from(clamped).expect("clamped value fits the output type")
}
