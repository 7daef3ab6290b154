//! Scalar butterfly kernels operating on planar real/imaginary buffers.
//!
//! One call runs a single stage over the span it is handed. All butterflies
//! within a stage are independent, so a caller may partition the span into
//! block-aligned sub-spans and run them concurrently; the ordering constraint
//! is only between stages.

use num_traits::Float;

/// Butterflies for block size 2: the twiddle is 1 regardless of direction,
/// so the stage reduces to pairwise sum/difference.
#[multiversion::multiversion(targets(
    "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl", // x86_64-v4
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    "aarch64+neon",
))]
#[inline]
pub(crate) fn butterfly_chunk_2<T: Float>(reals: &mut [T], imags: &mut [T]) {
    reals
        .chunks_exact_mut(2)
        .zip(imags.chunks_exact_mut(2))
        .for_each(|(reals_chunk, imags_chunk)| {
            let e_re = reals_chunk[0];
            let e_im = imags_chunk[0];
            let o_re = reals_chunk[1];
            let o_im = imags_chunk[1];

            reals_chunk[0] = e_re + o_re;
            imags_chunk[0] = e_im + o_im;
            reals_chunk[1] = e_re - o_re;
            imags_chunk[1] = e_im - o_im;
        });
}

/// Butterflies for block size `2 * dist`, `dist >= 2`, with per-offset
/// twiddles: `E' = E + W*O`, `O' = E - W*O`.
///
/// `twiddles_re`/`twiddles_im` must hold at least `dist` factors and already
/// encode the transform direction in their sign.
#[multiversion::multiversion(targets(
    "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl", // x86_64-v4
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    "aarch64+neon",
))]
#[inline]
pub(crate) fn butterfly_chunk_n<T: Float>(
    reals: &mut [T],
    imags: &mut [T],
    twiddles_re: &[T],
    twiddles_im: &[T],
    dist: usize,
) {
    let chunk_size = dist << 1;

    reals
        .chunks_exact_mut(chunk_size)
        .zip(imags.chunks_exact_mut(chunk_size))
        .for_each(|(reals_chunk, imags_chunk)| {
            let (reals_e, reals_o) = reals_chunk.split_at_mut(dist);
            let (imags_e, imags_o) = imags_chunk.split_at_mut(dist);

            reals_e
                .iter_mut()
                .zip(reals_o.iter_mut())
                .zip(imags_e.iter_mut())
                .zip(imags_o.iter_mut())
                .zip(twiddles_re.iter())
                .zip(twiddles_im.iter())
                .for_each(|(((((e_re, o_re), e_im), o_im), w_re), w_im)| {
                    let in_e_re = *e_re;
                    let in_e_im = *e_im;
                    let in_o_re = *o_re;
                    let in_o_im = *o_im;

                    let wo_re = *w_re * in_o_re - *w_im * in_o_im;
                    let wo_im = *w_re * in_o_im + *w_im * in_o_re;

                    *e_re = in_e_re + wo_re;
                    *e_im = in_e_im + wo_im;
                    *o_re = in_e_re - wo_re;
                    *o_im = in_e_im - wo_im;
                });
        });
}

/// Runs one full stage over `reals`/`imags`, dispatching on the pair
/// distance. The span length must be a multiple of `2 * dist`.
#[inline]
pub(crate) fn butterfly_stage<T: Float>(
    reals: &mut [T],
    imags: &mut [T],
    twiddles_re: &[T],
    twiddles_im: &[T],
    dist: usize,
) {
    debug_assert_eq!(reals.len(), imags.len());
    debug_assert_eq!(reals.len() % (dist << 1), 0);

    if dist == 1 {
        butterfly_chunk_2(reals, imags);
    } else {
        butterfly_chunk_n(reals, imags, twiddles_re, twiddles_im, dist);
    }
}
