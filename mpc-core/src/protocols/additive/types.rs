use std::ops::{Add, AddAssign, BitXor, BitXorAssign, Mul, Neg, Sub, SubAssign};

use ark_ff::PrimeField;

use super::ring::RingElement;

/// One party's additive share of a field element.
///
/// Addition, subtraction and multiplication by public constants act
/// share-wise and therefore need no interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldShare<F: PrimeField> {
    pub(crate) a: F,
}

impl<F: PrimeField> FieldShare<F> {
    /// Wraps a raw share.
    pub fn new(a: F) -> Self {
        Self { a }
    }

    /// The share of zero held by every party.
    pub fn zero() -> Self {
        Self { a: F::zero() }
    }

    /// The raw share value.
    pub fn inner(self) -> F {
        self.a
    }
}

impl<F: PrimeField> Add for FieldShare<F> {
    type Output = FieldShare<F>;

    fn add(self, rhs: Self) -> Self::Output {
        FieldShare::new(self.a + rhs.a)
    }
}

impl<F: PrimeField> AddAssign for FieldShare<F> {
    fn add_assign(&mut self, rhs: Self) {
        self.a += rhs.a;
    }
}

impl<F: PrimeField> Sub for FieldShare<F> {
    type Output = FieldShare<F>;

    fn sub(self, rhs: Self) -> Self::Output {
        FieldShare::new(self.a - rhs.a)
    }
}

impl<F: PrimeField> SubAssign for FieldShare<F> {
    fn sub_assign(&mut self, rhs: Self) {
        self.a -= rhs.a;
    }
}

impl<F: PrimeField> Neg for FieldShare<F> {
    type Output = FieldShare<F>;

    fn neg(self) -> Self::Output {
        FieldShare::new(-self.a)
    }
}

/// Multiplication by a public constant.
impl<F: PrimeField> Mul<F> for FieldShare<F> {
    type Output = FieldShare<F>;

    fn mul(self, rhs: F) -> Self::Output {
        FieldShare::new(self.a * rhs)
    }
}

/// One party's XOR share of a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitShare {
    pub(crate) a: bool,
}

impl BitShare {
    /// Wraps a raw share.
    pub fn new(a: bool) -> Self {
        Self { a }
    }

    /// The share of zero (false) held by every party.
    pub fn zero() -> Self {
        Self { a: false }
    }

    /// The raw share value.
    pub fn inner(self) -> bool {
        self.a
    }
}

impl BitXor for BitShare {
    type Output = BitShare;

    fn bitxor(self, rhs: Self) -> Self::Output {
        BitShare::new(self.a ^ rhs.a)
    }
}

impl BitXorAssign for BitShare {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.a ^= rhs.a;
    }
}

/// One party's additive share of a power-of-two ring element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingShare {
    pub(crate) a: RingElement,
}

impl RingShare {
    /// Wraps a raw share.
    pub fn new(a: RingElement) -> Self {
        Self { a }
    }

    /// The raw share value.
    pub fn inner(&self) -> &RingElement {
        &self.a
    }
}

impl Add for RingShare {
    type Output = RingShare;

    fn add(self, rhs: Self) -> Self::Output {
        RingShare::new(self.a + rhs.a)
    }
}

impl Sub for RingShare {
    type Output = RingShare;

    fn sub(self, rhs: Self) -> Self::Output {
        RingShare::new(self.a - rhs.a)
    }
}
