//! Stage planning: transform direction, per-stage twiddle tables, and the
//! local/merge phase split.
//!
//! A plan is built once per engine and direction. The amount of twiddle
//! factors per stage is half the stage's block size, so a full plan holds
//! `N - 1` factors in total.

use num_traits::{Float, FloatConst};

use crate::twiddles::generate_stage_twiddles;

/// Default exponent of the locality group: 128 elements, matching the
/// smallest supported transform.
pub const DEFAULT_GROUP_POT: u32 = 7;

/// Selects the sign of the twiddle-factor exponent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Signal to spectrum; twiddle exponent sign is -1.
    Forward,
    /// Spectrum to signal; twiddle exponent sign is +1.
    Inverse,
}

impl Direction {
    /// The sign `s` in `W = e^(s*i*2*PI*k/B)`.
    #[inline]
    #[must_use]
    pub fn sign(self) -> i32 {
        match self {
            Self::Forward => -1,
            Self::Inverse => 1,
        }
    }
}

/// How the `pot` stages of a transform divide into a group-local phase and a
/// cross-group merge phase.
///
/// Stages `1..=local_stages` operate entirely within self-contained groups of
/// `1 << group_pot` elements; the remaining `merge_stages` combine results
/// across groups. The split is a parallel-granularity hint only: executors
/// that ignore it produce identical results as long as they keep the stage
/// order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PhaseSplit {
    /// Exponent of the group length.
    pub group_pot: u32,
    /// Number of stages confined within one group.
    pub local_stages: u32,
    /// Number of stages that cross group boundaries.
    pub merge_stages: u32,
}

impl PhaseSplit {
    /// Splits `pot` stages at the group boundary `2^group_pot`.
    #[must_use]
    pub fn new(pot: u32, group_pot: u32) -> Self {
        let local_stages = pot.min(group_pot);
        Self {
            group_pot,
            local_stages,
            merge_stages: pot - local_stages,
        }
    }

    /// Length of one self-contained group.
    #[must_use]
    pub fn group_len(&self) -> usize {
        1 << self.group_pot
    }
}

/// Pre-computed twiddle factors for every stage of one transform direction.
///
/// Stage `m` (1-based, block size `2^m`) needs `2^(m-1)` factors; the block-2
/// stage needs none, so `stage_twiddles[0]` corresponds to stage 2.
pub(crate) struct StagePlan<T> {
    stage_twiddles: Vec<(Vec<T>, Vec<T>)>,
}

impl<T: Float + FloatConst> StagePlan<T> {
    pub(crate) fn new(pot: u32, direction: Direction) -> Self {
        let mut stage_twiddles = Vec::with_capacity(pot.saturating_sub(1) as usize);

        for stage in 2..=pot {
            let dist = 1usize << (stage - 1);
            stage_twiddles.push(generate_stage_twiddles(dist, direction));
        }

        Self { stage_twiddles }
    }

    /// Twiddles for the stage with pair distance `dist`; empty slices for the
    /// twiddle-free block-2 stage.
    pub(crate) fn twiddles_for(&self, dist: usize) -> (&[T], &[T]) {
        if dist == 1 {
            (&[], &[])
        } else {
            let (re, im) = &self.stage_twiddles[dist.ilog2() as usize - 1];
            (re, im)
        }
    }
}
