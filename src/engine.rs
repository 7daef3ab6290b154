//! The transform engine: validation, permutation, stage sequencing, and
//! normalization.
//!
//! An engine binds to exactly one transform size at construction, allocates
//! its planar scratch once, and reuses it for every subsequent call. The
//! stage loop is a single parametric pass over `pot` stages; how each stage
//! is executed is delegated to a [`StageExecutor`].
//!
//! ## Normalization convention
//!
//! `forward` divides every output element by `N`; `inverse` applies no
//! scaling and expects a spectrum that is already normalized (i.e. one
//! produced by `forward`, or scaled equivalently). The asymmetry is part of
//! the engine's contract: `inverse(forward(x)) ≈ x` with no further scaling
//! by the caller.

use std::sync::Arc;

use log::debug;
use num_complex::Complex;
use num_traits::{Float, FloatConst, Zero};

use crate::error::FftError;
use crate::executor::{SequentialExecutor, StageExecutor};
use crate::permutation::bit_reversal_table;
use crate::planner::{Direction, PhaseSplit, StagePlan, DEFAULT_GROUP_POT};

/// Smallest supported transform length, one locality group.
pub const MIN_LEN: usize = 1 << DEFAULT_GROUP_POT;

/// A fixed-size FFT engine over complex samples of precision `T`.
///
/// Construction validates the size, builds (or reuses) the bit-reversal
/// table for the exponent, and pre-computes twiddle factors for both
/// directions. `forward` and `inverse` mutate internal scratch, so a single
/// instance cannot run overlapping transforms; use one instance per
/// concurrent call.
pub struct FftEngine<T> {
    n: usize,
    pot: u32,
    norm: T,
    permutation: Arc<[usize]>,
    forward_plan: StagePlan<T>,
    inverse_plan: StagePlan<T>,
    split: PhaseSplit,
    scratch_re: Vec<T>,
    scratch_im: Vec<T>,
    executor: Box<dyn StageExecutor<T>>,
}

/// Single-precision engine.
pub type FftEngine32 = FftEngine<f32>;
/// Double-precision engine.
pub type FftEngine64 = FftEngine<f64>;

impl<T: Float + FloatConst + Send + Sync> FftEngine<T> {
    /// Creates an engine for transforms of length `n`, executing stages on
    /// the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`FftError::InvalidSize`] if `n` is not a power of two or is
    /// smaller than [`MIN_LEN`].
    pub fn new(n: usize) -> Result<Self, FftError> {
        Self::with_executor(n, Box::new(SequentialExecutor))
    }

    /// Creates an engine that delegates stage execution to `executor`.
    ///
    /// # Errors
    ///
    /// Returns [`FftError::InvalidSize`] if `n` is not a power of two or is
    /// smaller than [`MIN_LEN`].
    pub fn with_executor(n: usize, executor: Box<dyn StageExecutor<T>>) -> Result<Self, FftError> {
        if n == 0 || !n.is_power_of_two() {
            return Err(FftError::InvalidSize {
                n,
                reason: "transform length must be a power of two",
            });
        }
        if n < MIN_LEN {
            return Err(FftError::InvalidSize {
                n,
                reason: "transform length is below the 128-element minimum",
            });
        }

        let pot = n.ilog2();
        let split = PhaseSplit::new(pot, DEFAULT_GROUP_POT);
        debug!(
            "planning fft engine: n={n}, pot={pot}, local_stages={}, merge_stages={}",
            split.local_stages, split.merge_stages
        );

        Ok(Self {
            n,
            pot,
            norm: T::one() / T::from(n).unwrap(),
            permutation: bit_reversal_table(pot),
            forward_plan: StagePlan::new(pot, Direction::Forward),
            inverse_plan: StagePlan::new(pot, Direction::Inverse),
            split,
            scratch_re: vec![T::zero(); n],
            scratch_im: vec![T::zero(); n],
            executor,
        })
    }

    /// The transform length this engine was constructed with.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false; the engine refuses zero-length construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// How the stages divide into the local and merge phases.
    #[must_use]
    pub fn phase_split(&self) -> PhaseSplit {
        self.split
    }

    /// Transforms a time-domain signal into its normalized spectrum.
    ///
    /// Bin 0 is DC, bins `1..N/2 - 1` ascending positive frequency, bins
    /// `N/2..N - 1` the corresponding negative frequencies. Every element is
    /// scaled by `1/N`.
    ///
    /// # Errors
    ///
    /// Returns [`FftError::SizeMismatch`] if `signal.len() != self.len()`,
    /// or [`FftError::ComputeSubstrateFailure`] if the executor fails.
    pub fn forward(&mut self, signal: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        let mut spectrum = vec![Complex::zero(); self.n];
        self.forward_into(signal, &mut spectrum)?;
        Ok(spectrum)
    }

    /// Like [`forward`](Self::forward), writing into a caller-provided
    /// buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FftError::SizeMismatch`] if either buffer length differs
    /// from `self.len()`, or [`FftError::ComputeSubstrateFailure`] if the
    /// executor fails.
    pub fn forward_into(
        &mut self,
        signal: &[Complex<T>],
        spectrum: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        self.check_len(signal.len())?;
        self.check_len(spectrum.len())?;

        self.run_stages(signal, Direction::Forward)?;

        let norm = self.norm;
        for (out, (&re, &im)) in spectrum
            .iter_mut()
            .zip(self.scratch_re.iter().zip(self.scratch_im.iter()))
        {
            *out = Complex::new(re * norm, im * norm);
        }
        Ok(())
    }

    /// Transforms a normalized spectrum back into a time-domain signal.
    ///
    /// No scaling is applied: the input must already carry the `1/N` factor
    /// that [`forward`](Self::forward) produces.
    ///
    /// # Errors
    ///
    /// Returns [`FftError::SizeMismatch`] if `spectrum.len() != self.len()`,
    /// or [`FftError::ComputeSubstrateFailure`] if the executor fails.
    pub fn inverse(&mut self, spectrum: &[Complex<T>]) -> Result<Vec<Complex<T>>, FftError> {
        let mut signal = vec![Complex::zero(); self.n];
        self.inverse_into(spectrum, &mut signal)?;
        Ok(signal)
    }

    /// Like [`inverse`](Self::inverse), writing into a caller-provided
    /// buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FftError::SizeMismatch`] if either buffer length differs
    /// from `self.len()`, or [`FftError::ComputeSubstrateFailure`] if the
    /// executor fails.
    pub fn inverse_into(
        &mut self,
        spectrum: &[Complex<T>],
        signal: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        self.check_len(spectrum.len())?;
        self.check_len(signal.len())?;

        self.run_stages(spectrum, Direction::Inverse)?;

        for (out, (&re, &im)) in signal
            .iter_mut()
            .zip(self.scratch_re.iter().zip(self.scratch_im.iter()))
        {
            *out = Complex::new(re, im);
        }
        Ok(())
    }

    fn check_len(&self, len: usize) -> Result<(), FftError> {
        if len == self.n {
            Ok(())
        } else {
            Err(FftError::SizeMismatch {
                expected: self.n,
                actual: len,
            })
        }
    }

    /// Loads `input` into scratch in bit-reversed order, then runs the
    /// `pot` stages bottom-up. Each `run_stage` call returns only once the
    /// stage has fully committed, which is the barrier the next stage
    /// depends on.
    fn run_stages(&mut self, input: &[Complex<T>], direction: Direction) -> Result<(), FftError> {
        for (i, (re, im)) in self
            .scratch_re
            .iter_mut()
            .zip(self.scratch_im.iter_mut())
            .enumerate()
        {
            let z = input[self.permutation[i]];
            *re = z.re;
            *im = z.im;
        }

        let plan = match direction {
            Direction::Forward => &self.forward_plan,
            Direction::Inverse => &self.inverse_plan,
        };

        for stage in 1..=self.pot {
            let dist = 1usize << (stage - 1);
            let (twiddles_re, twiddles_im) = plan.twiddles_for(dist);
            self.executor.run_stage(
                &mut self.scratch_re,
                &mut self.scratch_im,
                twiddles_re,
                twiddles_im,
                dist,
            )?;
        }

        Ok(())
    }
}
