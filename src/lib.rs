//! A staged, power-of-two FFT engine with pluggable parallel stage
//! execution.
//!
//! The discrete Fourier transform of a power-of-two-length signal can be
//! split into even and odd sub-transforms whose results recombine through a
//! twiddle factor, turning the O(N^2) sum into `log2(N)` stages of O(N)
//! butterflies. This crate runs that recombination as an iterative
//! bottom-up loop: the input is reordered by a cached bit-reversal table,
//! then each stage doubles the block size until the whole buffer is one
//! block.
//!
//! [`FftEngine`] is the caller-facing component. It binds to one transform
//! size, owns its scratch, and sequences stages through a [`StageExecutor`]:
//! either the in-thread [`SequentialExecutor`] or the rayon-backed
//! [`ThreadedExecutor`], which parallelizes the group-local early stages and
//! the buffer-wide merge stages with a barrier in between each stage.
//!
//! ```
//! use num_complex::Complex;
//! use stagefft::FftEngine64;
//!
//! let mut engine = FftEngine64::new(128)?;
//! let signal = vec![Complex::new(1.0, 0.0); 128];
//!
//! let spectrum = engine.forward(&signal)?;   // scaled by 1/N
//! let recovered = engine.inverse(&spectrum)?; // no further scaling
//!
//! assert!((recovered[0].re - 1.0).abs() < 1e-10);
//! # Ok::<(), stagefft::FftError>(())
//! ```
//!
//! The forward transform normalizes by `1/N`; the inverse does not and
//! expects an already-normalized spectrum. See [`FftEngine`] for the full
//! contract.

#![warn(missing_docs)]

mod engine;
mod error;
mod executor;
mod kernels;
mod permutation;
mod planner;
mod twiddles;

pub use engine::{FftEngine, FftEngine32, FftEngine64, MIN_LEN};
pub use error::FftError;
pub use executor::{SequentialExecutor, StageExecutor, ThreadedExecutor};
pub use planner::{Direction, PhaseSplit, DEFAULT_GROUP_POT};
