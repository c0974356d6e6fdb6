//! Which accumulated image a game file receives.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Alternation;

/// Source of random indices. Injected so runs can be reproduced.
pub trait Chooser {
    /// An index in `0..len`. `len` is never zero.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// [`Chooser`] backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Chooser for RandomChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Pick the candidate a game file receives.
///
/// `prior_uses` is how many files of the same title already received an
/// image of this category. With alternation on, files walk the candidate
/// list in turn and wrap around. Returns `None` for an empty list.
pub fn pick_source_index(
    len: usize,
    mode: Alternation,
    prior_uses: usize,
    chooser: &mut dyn Chooser,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = match mode {
        Alternation::Off => 0,
        Alternation::On => prior_uses % len,
        Alternation::Random => chooser.choose_index(len).min(len - 1),
    };
    Some(index)
}
