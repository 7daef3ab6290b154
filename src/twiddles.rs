//! Twiddle factor generation.

use num_traits::{Float, FloatConst};

use crate::planner::Direction;

/// Generates the `dist` twiddle factors for one stage with block size
/// `2 * dist`: `W_k = e^(s*i*2*PI*k / (2*dist))` for `k` in `[0, dist)`,
/// where `s` is the direction sign.
///
/// Returned as separate real and imaginary vectors to match the planar
/// buffer layout of the kernels.
pub(crate) fn generate_stage_twiddles<T: Float + FloatConst>(
    dist: usize,
    direction: Direction,
) -> (Vec<T>, Vec<T>) {
    let mut twiddles_re = vec![T::zero(); dist];
    let mut twiddles_im = vec![T::zero(); dist];

    let sign = T::from(direction.sign()).unwrap();
    let angle_mult = sign * T::PI() / T::from(dist).unwrap();

    for (k, (re, im)) in twiddles_re
        .iter_mut()
        .zip(twiddles_im.iter_mut())
        .enumerate()
    {
        let angle = angle_mult * T::from(k).unwrap();
        *re = angle.cos();
        *im = angle.sin();
    }

    (twiddles_re, twiddles_im)
}
