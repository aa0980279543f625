//! Correlated randomness consumed by the online phase.
//!
//! The offline phase (or an insecure [`super::dealer`] in tests) produces
//! Beaver triples over the field and over booleans, edaBits for bit
//! decomposition, and daBits for boolean-to-arithmetic conversion. The
//! online protocols pull them through the [`CorrelatedRandomness`] trait and
//! fail fast when the supply runs out, since every party must consume the
//! pre-shared material in exactly the same order.

use std::collections::VecDeque;

use ark_ff::PrimeField;
use eyre::bail;

use super::types::{BitShare, FieldShare};

/// One party's share of a multiplication triple `x * y = xy` over the field.
#[derive(Debug, Clone, Copy)]
pub struct FieldTriple<F: PrimeField> {
    /// Share of the random factor `x`.
    pub x: FieldShare<F>,
    /// Share of the random factor `y`.
    pub y: FieldShare<F>,
    /// Share of the product `x * y`.
    pub xy: FieldShare<F>,
}

/// One party's share of an AND triple `x & y = xy` over booleans.
#[derive(Debug, Clone, Copy)]
pub struct BitTriple {
    /// Share of the random bit `x`.
    pub x: BitShare,
    /// Share of the random bit `y`.
    pub y: BitShare,
    /// Share of the conjunction `x & y`.
    pub xy: BitShare,
}

/// One party's share of an edaBits instance: a field sharing of a uniform
/// `B`-bit value together with boolean sharings of its bits.
#[derive(Debug, Clone)]
pub struct EdaBits<F: PrimeField> {
    /// Field share of the random value.
    pub arith: FieldShare<F>,
    /// Boolean shares of its bits, least significant first.
    pub bits: Vec<BitShare>,
}

/// One party's share of a daBit: the same uniform bit shared both as a
/// boolean and as a field element.
#[derive(Debug, Clone, Copy)]
pub struct DaBit<F: PrimeField> {
    /// Field share of the bit.
    pub arith: FieldShare<F>,
    /// Boolean share of the bit.
    pub bit: BitShare,
}

/// Source of pre-shared correlated randomness.
///
/// Implementations must hand out instances in a deterministic order agreed
/// on by all parties and must error (not block) when exhausted.
pub trait CorrelatedRandomness<F: PrimeField> {
    /// Next field Beaver triple.
    fn next_field_triple(&mut self) -> eyre::Result<FieldTriple<F>>;
    /// Next boolean Beaver triple.
    fn next_bit_triple(&mut self) -> eyre::Result<BitTriple>;
    /// Next edaBits instance.
    fn next_edabits(&mut self) -> eyre::Result<EdaBits<F>>;
    /// Next daBit.
    fn next_dabit(&mut self) -> eyre::Result<DaBit<F>>;
}

/// How many instances of each randomness type have been consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumedCounts {
    /// Field Beaver triples.
    pub field_triples: usize,
    /// Boolean Beaver triples.
    pub bit_triples: usize,
    /// edaBits instances.
    pub edabits: usize,
    /// daBits.
    pub dabits: usize,
}

/// A [`CorrelatedRandomness`] source backed by pre-filled queues.
#[derive(Debug, Default)]
pub struct RandomnessStore<F: PrimeField> {
    field_triples: VecDeque<FieldTriple<F>>,
    bit_triples: VecDeque<BitTriple>,
    edabits: VecDeque<EdaBits<F>>,
    dabits: VecDeque<DaBit<F>>,
    consumed: ConsumedCounts,
}

impl<F: PrimeField> RandomnessStore<F> {
    /// Creates a store holding the given instances.
    pub fn new(
        field_triples: Vec<FieldTriple<F>>,
        bit_triples: Vec<BitTriple>,
        edabits: Vec<EdaBits<F>>,
        dabits: Vec<DaBit<F>>,
    ) -> Self {
        Self {
            field_triples: field_triples.into(),
            bit_triples: bit_triples.into(),
            edabits: edabits.into(),
            dabits: dabits.into(),
            consumed: ConsumedCounts::default(),
        }
    }

    /// How many instances have been consumed so far.
    pub fn consumed(&self) -> ConsumedCounts {
        self.consumed
    }

    /// How many instances are still available.
    pub fn remaining(&self) -> ConsumedCounts {
        ConsumedCounts {
            field_triples: self.field_triples.len(),
            bit_triples: self.bit_triples.len(),
            edabits: self.edabits.len(),
            dabits: self.dabits.len(),
        }
    }
}

impl<F: PrimeField> CorrelatedRandomness<F> for RandomnessStore<F> {
    fn next_field_triple(&mut self) -> eyre::Result<FieldTriple<F>> {
        match self.field_triples.pop_front() {
            Some(triple) => {
                self.consumed.field_triples += 1;
                Ok(triple)
            }
            None => bail!("insufficient pre-shared field Beaver triples"),
        }
    }

    fn next_bit_triple(&mut self) -> eyre::Result<BitTriple> {
        match self.bit_triples.pop_front() {
            Some(triple) => {
                self.consumed.bit_triples += 1;
                Ok(triple)
            }
            None => bail!("insufficient pre-shared boolean Beaver triples"),
        }
    }

    fn next_edabits(&mut self) -> eyre::Result<EdaBits<F>> {
        match self.edabits.pop_front() {
            Some(edabits) => {
                self.consumed.edabits += 1;
                Ok(edabits)
            }
            None => bail!("insufficient pre-shared edaBits"),
        }
    }

    fn next_dabit(&mut self) -> eyre::Result<DaBit<F>> {
        match self.dabits.pop_front() {
            Some(dabit) => {
                self.consumed.dabits += 1;
                Ok(dabit)
            }
            None => bail!("insufficient pre-shared daBits"),
        }
    }
}
