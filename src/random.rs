use std::collections::VecDeque;

use rand::Rng;

/// Uniform random source behind the message selection and celebration
/// sampling. Injected so tests can substitute a scripted sequence.
pub trait RandomSource: Send {
    /// Uniform sample in [0, 1).
    fn sample(&mut self) -> f64;

    /// Uniform index in [0, len). `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn sample(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Replays a scripted list of samples; repeats the last one when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: VecDeque<f64>,
    last: f64,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 0.0,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn sample(&mut self) -> f64 {
        if let Some(v) = self.values.pop_front() {
            self.last = v;
        }
        self.last
    }

    fn pick_index(&mut self, len: usize) -> usize {
        ((self.sample() * len as f64) as usize).min(len - 1)
    }
}
