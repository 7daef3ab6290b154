//! Pluggable stage execution strategies.
//!
//! Every backend shares one contract: run all butterflies of a single stage
//! over the whole buffer, then return. The engine sequences stages, so a
//! returned `run_stage` call is the synchronization barrier between stage
//! `m` and stage `m + 1`.

use num_traits::Float;
use rayon::prelude::*;

use crate::error::FftError;
use crate::kernels::butterfly_stage;
use crate::planner::DEFAULT_GROUP_POT;

/// A strategy for executing one butterfly stage over a planar buffer.
///
/// Implementations may partition the buffer into block-aligned spans and
/// process them concurrently, but must not return before every butterfly of
/// the stage has committed its writes.
pub trait StageExecutor<T>: Send + Sync {
    /// Runs the stage with pair distance `dist` over `reals`/`imags`.
    ///
    /// The twiddle slices hold `dist` factors (empty for `dist == 1`) with
    /// the transform direction already baked into their sign.
    fn run_stage(
        &self,
        reals: &mut [T],
        imags: &mut [T],
        twiddles_re: &[T],
        twiddles_im: &[T],
        dist: usize,
    ) -> Result<(), FftError>;
}

/// Runs every stage on the calling thread.
#[derive(Debug, Default, Copy, Clone)]
pub struct SequentialExecutor;

impl<T: Float> StageExecutor<T> for SequentialExecutor {
    fn run_stage(
        &self,
        reals: &mut [T],
        imags: &mut [T],
        twiddles_re: &[T],
        twiddles_im: &[T],
        dist: usize,
    ) -> Result<(), FftError> {
        butterfly_stage(reals, imags, twiddles_re, twiddles_im, dist);
        Ok(())
    }
}

/// Runs each stage on a rayon worker pool.
///
/// The buffer is partitioned into spans of `max(block, group_len)` elements.
/// While blocks are at most one group long (the local phase), each worker
/// keeps an entire group resident; once blocks outgrow the group (the merge
/// phase), the span widens to one block so no butterfly ever crosses a span
/// boundary. The parallel pass completes before `run_stage` returns, which
/// preserves the inter-stage barrier.
pub struct ThreadedExecutor {
    pool: rayon::ThreadPool,
    group_len: usize,
}

impl ThreadedExecutor {
    /// Creates an executor with the default group length (128) and rayon's
    /// default thread count.
    pub fn new() -> Result<Self, FftError> {
        Self::with_options(0, DEFAULT_GROUP_POT)
    }

    /// Creates an executor with `threads` workers (0 for the rayon default)
    /// and a locality group of `2^group_pot` elements.
    pub fn with_options(threads: usize, group_pot: u32) -> Result<Self, FftError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| FftError::substrate("building the stage worker pool", e))?;

        Ok(Self {
            pool,
            group_len: 1 << group_pot,
        })
    }
}

impl<T: Float + Send + Sync> StageExecutor<T> for ThreadedExecutor {
    fn run_stage(
        &self,
        reals: &mut [T],
        imags: &mut [T],
        twiddles_re: &[T],
        twiddles_im: &[T],
        dist: usize,
    ) -> Result<(), FftError> {
        let chunk_size = dist << 1;
        let span = chunk_size.max(self.group_len).min(reals.len());

        self.pool.install(|| {
            reals
                .par_chunks_exact_mut(span)
                .zip(imags.par_chunks_exact_mut(span))
                .for_each(|(reals_span, imags_span)| {
                    butterfly_stage(reals_span, imags_span, twiddles_re, twiddles_im, dist);
                });
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use utilities::{assert_float_closeness, gen_random_signal};

    use crate::planner::Direction;
    use crate::twiddles::generate_stage_twiddles;

    use super::*;

    #[test]
    fn threaded_stage_matches_sequential_stage() {
        let n = 1 << 10;
        let mut seq_re = vec![0.0f64; n];
        let mut seq_im = vec![0.0f64; n];
        gen_random_signal(&mut seq_re, &mut seq_im);
        let mut par_re = seq_re.clone();
        let mut par_im = seq_im.clone();

        let threaded = ThreadedExecutor::new().unwrap();

        for stage in 1..=10u32 {
            let dist = 1usize << (stage - 1);
            let (tw_re, tw_im) = generate_stage_twiddles::<f64>(dist, Direction::Forward);

            SequentialExecutor
                .run_stage(&mut seq_re, &mut seq_im, &tw_re, &tw_im, dist)
                .unwrap();
            threaded
                .run_stage(&mut par_re, &mut par_im, &tw_re, &tw_im, dist)
                .unwrap();
        }

        for i in 0..n {
            assert_float_closeness(par_re[i], seq_re[i], 1e-12);
            assert_float_closeness(par_im[i], seq_im[i], 1e-12);
        }
    }

    #[test]
    fn threaded_executor_accepts_explicit_options() {
        let exec = ThreadedExecutor::with_options(2, 7).unwrap();
        let mut reals = vec![1.0f64; 256];
        let mut imags = vec![0.0f64; 256];

        StageExecutor::<f64>::run_stage(&exec, &mut reals, &mut imags, &[], &[], 1).unwrap();

        for pair in reals.chunks_exact(2) {
            assert_float_closeness(pair[0], 2.0, 1e-12);
            assert_float_closeness(pair[1], 0.0, 1e-12);
        }
    }
}
