use crate::layers::Coeff;
use std::marker::PhantomData;

/// Combination rule for one input scalar against one weight.
///
/// The kernel computes every product through this seam so that alternative
/// quantized encodings can substitute a different rule without touching the
/// kernel's control flow.
pub trait Product<D, W> {
    /// The type the combination widens into; summation happens in this type.
    type Accum;

    fn product(&self, a: D, b: W) -> Self::Accum;

    /// Advisory ceiling on live multipliers for the current scheduling
    /// window. Affects only how the computation should be provisioned and
    /// shared, never the value `product` returns.
    fn set_resource_limit(&mut self, limit: usize);
}

/// Plain multiply: both operands widened into the accumulator type first.
#[derive(Clone, Debug, Default)]
pub struct StandardProduct<A> {
    resource_limit: usize,
    _accum: PhantomData<A>,
}

impl<A> StandardProduct<A> {
    pub fn new() -> StandardProduct<A> {
        StandardProduct {
            resource_limit: 0,
            _accum: PhantomData,
        }
    }

    /// The ceiling most recently announced by the scheduler.
    pub fn resource_limit(&self) -> usize {
        self.resource_limit
    }
}

impl<D, W, A> Product<D, W> for StandardProduct<A>
where
    D: Coeff,
    W: Coeff,
    A: Coeff + From<D> + From<W>,
{
    type Accum = A;

    fn product(&self, a: D, b: W) -> A {
        let a: A = a.into();
        let b: A = b.into();
        a * b
    }

    fn set_resource_limit(&mut self, limit: usize) {
        trace!("standard product limited to {} multipliers", limit);
        self.resource_limit = limit;
    }
}

/// Multiplier-free rule for ternary weights: a positive weight passes the
/// input through, a negative one negates it, zero contributes nothing.
///
/// Weight magnitudes are ignored; the table is expected to hold {-1, 0, +1}.
#[derive(Clone, Debug, Default)]
pub struct TernaryProduct<A> {
    resource_limit: usize,
    _accum: PhantomData<A>,
}

impl<A> TernaryProduct<A> {
    pub fn new() -> TernaryProduct<A> {
        TernaryProduct {
            resource_limit: 0,
            _accum: PhantomData,
        }
    }

    pub fn resource_limit(&self) -> usize {
        self.resource_limit
    }
}

impl<D, W, A> Product<D, W> for TernaryProduct<A>
where
    D: Coeff,
    W: Coeff,
    A: Coeff + From<D>,
{
    type Accum = A;

    fn product(&self, a: D, b: W) -> A {
        if b > W::zero() {
            a.into()
        } else if b < W::zero() {
            A::zero() - a.into()
        } else {
            A::zero()
        }
    }

    fn set_resource_limit(&mut self, limit: usize) {
        trace!("ternary product limited to {} adders", limit);
        self.resource_limit = limit;
    }
}
