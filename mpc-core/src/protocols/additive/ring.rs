//! Arbitrary-width power-of-two ring elements.
//!
//! The bit decomposition lifts masked field values into `Z_{2^k}` before
//! running binary adders over them, so the width `k` is a runtime parameter
//! tied to the field's bit size rather than a machine integer width. All
//! arithmetic wraps modulo `2^k`.

use std::ops::{Add, Sub};

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::Rng;

/// An element of `Z_{2^k}` with explicit width `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingElement {
    value: BigUint,
    bits: usize,
}

impl RingElement {
    /// Wraps `value` into the ring of width `bits`.
    pub fn new(value: BigUint, bits: usize) -> Self {
        debug_assert!(bits > 0);
        let value = value & ((BigUint::one() << bits) - BigUint::one());
        Self { value, bits }
    }

    /// The zero element of width `bits`.
    pub fn zero(bits: usize) -> Self {
        Self::new(BigUint::ZERO, bits)
    }

    /// Samples a uniform element of width `bits`.
    pub fn random<R: Rng>(bits: usize, rng: &mut R) -> Self {
        Self::new(rng.gen_biguint(bits as u64), bits)
    }

    /// The width `k` of the ring.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// The canonical representative in `[0, 2^k)`.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// All `k` bits of the element, least significant first.
    pub fn bit_decompose(&self) -> Vec<bool> {
        (0..self.bits as u64).map(|i| self.value.bit(i)).collect()
    }
}

impl Add for RingElement {
    type Output = RingElement;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.bits, rhs.bits);
        RingElement::new(self.value + rhs.value, self.bits)
    }
}

impl Sub for RingElement {
    type Output = RingElement;

    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.bits, rhs.bits);
        let modulus = BigUint::one() << self.bits;
        RingElement::new(self.value + modulus - rhs.value, self.bits)
    }
}
