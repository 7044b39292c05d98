//! Random number sources.
//!
//! Die faces and tie-break seat draws both go through [`RandomSource`], so a
//! game can be replayed from a seed or scripted outright in tests.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::rules::{FACE_MAX, FACE_MIN};

pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn next_in_range(&mut self, low: u32, high: u32) -> u32;

    fn roll_die(&mut self) -> u8 {
        self.next_in_range(FACE_MIN as u32, FACE_MAX as u32) as u8
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        (**self).next_in_range(low, high)
    }
}

fn ordered(low: u32, high: u32) -> (u32, u32) {
    if low <= high { (low, high) } else { (high, low) }
}

/// Reproducible source for replays and simulations.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { inner: StdRng::from_entropy() }
    }
}

impl RandomSource for SeededRng {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        let (lo, hi) = ordered(low, high);
        self.inner.gen_range(lo..=hi)
    }
}

/// Replays a fixed list of values, cycling when it runs out.
/// Values outside the requested range are clamped into it.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self { values: values.into(), pos: 0 }
    }

    /// Convenience for scripting die faces.
    pub fn faces(faces: &[u8]) -> Self {
        Self::new(faces.iter().map(|&f| f as u32).collect::<Vec<_>>())
    }

    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedRng {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        let (lo, hi) = ordered(low, high);
        if self.values.is_empty() {
            return lo;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v.clamp(lo, hi)
    }
}
