//! Accumulation-order contract under a saturating accumulator type.
//!
//! The kernel sums partial products with the input index ascending. A
//! saturating numeric type makes that order observable, so these tests pin it
//! with a minimal saturating 8-bit scalar standing in for an external
//! fixed-point type.

use super::*;
use num_traits::{Num, NumCast, One, ToPrimitive, Zero};
use std::fmt;
use std::num::ParseIntError;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign};

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
struct Sat8(i8);

impl Add for Sat8 {
    type Output = Sat8;
    fn add(self, rhs: Sat8) -> Sat8 {
        Sat8(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Sat8 {
    type Output = Sat8;
    fn sub(self, rhs: Sat8) -> Sat8 {
        Sat8(self.0.saturating_sub(rhs.0))
    }
}

impl Mul for Sat8 {
    type Output = Sat8;
    fn mul(self, rhs: Sat8) -> Sat8 {
        Sat8(self.0.saturating_mul(rhs.0))
    }
}

impl Div for Sat8 {
    type Output = Sat8;
    fn div(self, rhs: Sat8) -> Sat8 {
        Sat8(self.0 / rhs.0)
    }
}

impl Rem for Sat8 {
    type Output = Sat8;
    fn rem(self, rhs: Sat8) -> Sat8 {
        Sat8(self.0 % rhs.0)
    }
}

impl AddAssign for Sat8 {
    fn add_assign(&mut self, rhs: Sat8) {
        *self = *self + rhs;
    }
}

impl SubAssign for Sat8 {
    fn sub_assign(&mut self, rhs: Sat8) {
        *self = *self - rhs;
    }
}

impl MulAssign for Sat8 {
    fn mul_assign(&mut self, rhs: Sat8) {
        *self = *self * rhs;
    }
}

impl DivAssign for Sat8 {
    fn div_assign(&mut self, rhs: Sat8) {
        *self = *self / rhs;
    }
}

impl RemAssign for Sat8 {
    fn rem_assign(&mut self, rhs: Sat8) {
        *self = *self % rhs;
    }
}

impl Zero for Sat8 {
    fn zero() -> Sat8 {
        Sat8(0)
    }
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl One for Sat8 {
    fn one() -> Sat8 {
        Sat8(1)
    }
}

impl Num for Sat8 {
    type FromStrRadixErr = ParseIntError;
    fn from_str_radix(str: &str, radix: u32) -> Result<Sat8, ParseIntError> {
        i8::from_str_radix(str, radix).map(Sat8)
    }
}

impl ToPrimitive for Sat8 {
    fn to_i64(&self) -> Option<i64> {
        Some(<i64 as From<i8>>::from(self.0))
    }
    fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
}

impl NumCast for Sat8 {
    fn from<T: ToPrimitive>(n: T) -> Option<Sat8> {
        n.to_i8().map(Sat8)
    }
}

impl fmt::Display for Sat8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Coeff for Sat8 {}

fn sat_inputs(input_order: &[i8]) -> Vec<Sat8> {
    input_order.iter().map(|&v| Sat8(v)).collect()
}

#[test]
fn saturating_accumulator_follows_ascending_input_order() {
    // Unit weights turn the accumulation into a running sum of the inputs:
    // 0 + 100 = 100, + 50 saturates at 127, - 60 = 67. Any other order would
    // end elsewhere (e.g. 100 - 60 + 50 = 90 without saturating).
    let layer = DenseLayer::new(
        DenseConfig::new(3, 1),
        vec![Sat8(1), Sat8(1), Sat8(1)],
        vec![Sat8(0)],
    )
    .unwrap();
    let mut kernel = DenseKernel::new(&layer, StandardProduct::<Sat8>::new(), LosslessCast);

    let out: Vec<Sat8> = run_streamed(&mut kernel, &sat_inputs(&[100, 50, -60])).unwrap();
    assert_eq!(out, vec![Sat8(67)]);
}

#[test]
fn saturation_outcome_differs_for_reordered_inputs() {
    // The same multiset of contributions, fed in a different order, settles
    // on a different value; this is why the ascending order is contractual.
    let layer = DenseLayer::new(
        DenseConfig::new(3, 1),
        vec![Sat8(1), Sat8(1), Sat8(1)],
        vec![Sat8(0)],
    )
    .unwrap();
    let mut kernel = DenseKernel::new(&layer, StandardProduct::<Sat8>::new(), LosslessCast);

    let out: Vec<Sat8> = run_streamed(&mut kernel, &sat_inputs(&[-60, 50, 100])).unwrap();
    assert_eq!(out, vec![Sat8(90)]);
}
