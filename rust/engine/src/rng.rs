use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};

/// Default number of uniform draws generated per refill.
pub const DEFAULT_BUFFER_LEN: usize = 1000;

/// Source of every stochastic decision made during a match.
///
/// A match owns its source exclusively; two concurrently simulated matches
/// must never share one.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Normal draw. A non-positive or non-finite `std_dev` yields `mean`.
    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64;
}

/// Buffered stream of uniform draws backed by a seeded ChaCha20 generator.
///
/// Uniforms are pre-generated in blocks and the block is regenerated
/// transparently once consumed, so the stream is unbounded and fully
/// determined by the seed.
#[derive(Debug)]
pub struct ProbabilityStack {
    buffer: Vec<f64>,
    position: usize,
    rng: ChaCha20Rng,
    refills: u64,
}

impl ProbabilityStack {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_capacity(seed, DEFAULT_BUFFER_LEN)
    }

    pub fn with_capacity(seed: u64, len: usize) -> Self {
        let mut stack = Self {
            buffer: vec![0.0; len.max(1)],
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
            refills: 0,
        };
        stack.refill();
        stack.refills = 0;
        stack
    }

    fn refill(&mut self) {
        for slot in self.buffer.iter_mut() {
            *slot = self.rng.random::<f64>();
        }
        self.position = 0;
        self.refills += 1;
    }

    /// Draws left before the next refill.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// How many times the buffer has been regenerated.
    pub fn refills(&self) -> u64 {
        self.refills
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

impl RandomSource for ProbabilityStack {
    fn next_uniform(&mut self) -> f64 {
        if self.position >= self.buffer.len() {
            self.refill();
        }
        let v = self.buffer[self.position];
        self.position += 1;
        v
    }

    fn sample_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return mean;
        }
        match Normal::new(mean, std_dev) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => mean,
        }
    }
}

/// Replays a fixed sequence of draws.
///
/// Exhausted uniforms fall back to `0.5` and exhausted normals to the
/// requested mean, so a short script never aborts a match.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    uniforms: VecDeque<f64>,
    normals: VecDeque<f64>,
    uniforms_drawn: usize,
    normals_drawn: usize,
}

impl ScriptedSource {
    pub fn new(uniforms: impl IntoIterator<Item = f64>) -> Self {
        Self {
            uniforms: uniforms.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_normals(mut self, normals: impl IntoIterator<Item = f64>) -> Self {
        self.normals = normals.into_iter().collect();
        self
    }

    pub fn push_uniform(&mut self, v: f64) {
        self.uniforms.push_back(v);
    }

    pub fn push_normal(&mut self, v: f64) {
        self.normals.push_back(v);
    }

    pub fn uniforms_drawn(&self) -> usize {
        self.uniforms_drawn
    }

    pub fn normals_drawn(&self) -> usize {
        self.normals_drawn
    }

    pub fn is_exhausted(&self) -> bool {
        self.uniforms.is_empty() && self.normals.is_empty()
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        self.uniforms_drawn += 1;
        self.uniforms.pop_front().unwrap_or(0.5)
    }

    fn sample_normal(&mut self, mean: f64, _std_dev: f64) -> f64 {
        self.normals_drawn += 1;
        self.normals.pop_front().unwrap_or(mean)
    }
}
