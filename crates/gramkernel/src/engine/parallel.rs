//! Parallel update pass.
//!
//! ## Purpose
//!
//! This module provides a drop-in replacement for the sequential update pass
//! that fills output rows on all available CPU cores.
//!
//! ## Design notes
//!
//! * **Parallelism**: Uses `rayon` over disjoint output rows, one per B vector.
//! * **Lock-free**: Each task owns its row exclusively; A and B are shared read-only.
//! * **Determinism**: Every entry is computed by the same expression as the
//!   sequential pass, so results are bit-identical.
//!
//! ## Invariants
//!
//! * Region slices have been validated by the executor.
//!
//! ## Non-goals
//!
//! * This module does not validate inputs (handled by `validator`).

// External dependencies
use num_traits::Float;
use rayon::prelude::*;

// Internal dependencies
use crate::engine::executor::{Noise, fill_row};
use crate::math::kernel::KernelFunction;

/// Perform a single update pass with rows distributed across threads.
pub fn update_pass_parallel<T>(
    a: &[T],
    b: &[T],
    c: &mut [T],
    dim: usize,
    noise: Noise<T>,
    kernel: &KernelFunction<T>,
) where
    T: Float + Send + Sync,
{
    let a_cols = if dim == 0 { 0 } else { a.len() / dim };
    if a_cols == 0 || c.is_empty() {
        return;
    }

    c.par_chunks_exact_mut(a_cols)
        .zip(b.par_chunks_exact(dim))
        .for_each(|(row, b_i)| fill_row(row, a, b_i, dim, noise, kernel));
}
