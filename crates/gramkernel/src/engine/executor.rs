//! Execution engine for Gram matrix updates.
//!
//! ## Purpose
//!
//! This module runs one update pass: it validates the buffer layout, slices
//! the addressed regions, and fills the output with the kernel evaluated
//! between every pair of vectors.
//!
//! ## Design notes
//!
//! * Validation happens in full before the first write.
//! * The pass itself is a plain function pointer so that a data-parallel
//!   implementation can be swapped in (see `parallel`).
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! * **Layout**: Output row `i` belongs to vector `B_i`, column `j` to `A_j`;
//!   entry `(i, j)` lives at `c_offset + i * a_cols + j`.
//! * **Noise**: Either added to every entry or omitted, never implicit.
//!
//! ## Invariants
//!
//! * Iteration is outer over B, inner over A.
//! * On error the output buffer is bit-for-bit unchanged.
//! * Only the declared output region is written.
//!
//! ## Non-goals
//!
//! * This module does not allocate the output buffer.
//! * This module does not factorize or invert the resulting matrix.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::kernel::KernelFunction;
use crate::primitives::errors::GramError;
use crate::primitives::region::VectorRegion;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for an update pass over already-validated regions.
#[doc(hidden)]
pub type UpdatePassFn<T> = fn(
    &[T],               // a (region slice)
    &[T],               // b (region slice)
    &mut [T],           // c (region slice)
    usize,              // dim
    Noise<T>,           // noise
    &KernelFunction<T>, // kernel
);

/// Whether, and how much, noise is added to every output entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Noise<T> {
    /// Add the given value to every entry.
    Added(T),

    /// Write the bare kernel value.
    Omitted,
}

impl<T: Float> Default for Noise<T> {
    fn default() -> Self {
        Noise::Added(T::zero())
    }
}

impl<T: Float> Noise<T> {
    /// Apply the noise policy to a kernel value.
    #[inline]
    pub fn apply(&self, value: T) -> T {
        match *self {
            Noise::Added(noise) => value + noise,
            Noise::Omitted => value,
        }
    }

    /// The amount added to each entry (zero when omitted).
    #[inline]
    pub fn value(&self) -> T {
        match *self {
            Noise::Added(noise) => noise,
            Noise::Omitted => T::zero(),
        }
    }
}

/// Shape of a completed update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateShape {
    /// Number of vectors in A (output columns).
    pub a_cols: usize,

    /// Number of vectors in B (output rows).
    pub b_cols: usize,

    /// Vector dimension.
    pub dim: usize,
}

impl UpdateShape {
    /// Compute the shape of a layout. Assumes the layout is valid.
    #[inline]
    pub fn of(a_region: VectorRegion, b_region: VectorRegion, dim: usize) -> Self {
        Self {
            a_cols: a_region.vector_count(dim),
            b_cols: b_region.vector_count(dim),
            dim,
        }
    }

    /// Number of output rows (vectors in B).
    #[inline]
    pub fn rows(&self) -> usize {
        self.b_cols
    }

    /// Number of output columns (vectors in A).
    #[inline]
    pub fn cols(&self) -> usize {
        self.a_cols
    }

    /// Number of output entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.a_cols * self.b_cols
    }

    /// Returns `true` if the update writes nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of entry `(row, col)` relative to the output region.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.a_cols + col
    }
}

// ============================================================================
// Sequential Pass
// ============================================================================

/// Fill one output row: the kernel between `b_i` and every vector of `a`.
#[inline]
pub fn fill_row<T: Float>(
    row: &mut [T],
    a: &[T],
    b_i: &[T],
    dim: usize,
    noise: Noise<T>,
    kernel: &KernelFunction<T>,
) {
    for (cell, a_j) in row.iter_mut().zip(a.chunks_exact(dim)) {
        *cell = noise.apply(kernel.evaluate(a_j, b_i));
    }
}

/// Perform a single update pass over validated region slices.
pub fn update_pass_sequential<T: Float>(
    a: &[T],
    b: &[T],
    c: &mut [T],
    dim: usize,
    noise: Noise<T>,
    kernel: &KernelFunction<T>,
) {
    let a_cols = if dim == 0 { 0 } else { a.len() / dim };
    if a_cols == 0 || c.is_empty() {
        return;
    }

    for (row, b_i) in c.chunks_exact_mut(a_cols).zip(b.chunks_exact(dim)) {
        fill_row(row, a, b_i, dim, noise, kernel);
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for an update pass.
#[derive(Debug, Clone, Copy)]
pub struct UpdateConfig<T> {
    /// Kernel evaluated for every pair.
    pub kernel: KernelFunction<T>,

    /// Noise policy.
    pub noise: Noise<T>,

    /// Custom update pass.
    #[doc(hidden)]
    pub custom_update_pass: Option<UpdatePassFn<T>>,
}

impl<T: Float> Default for UpdateConfig<T> {
    fn default() -> Self {
        Self {
            kernel: KernelFunction::default(),
            noise: Noise::default(),
            custom_update_pass: None,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs validated Gram matrix updates.
pub struct UpdateExecutor;

impl UpdateExecutor {
    /// Validate the layout and run one update pass.
    #[allow(clippy::too_many_arguments)]
    pub fn run<T: Float>(
        config: &UpdateConfig<T>,
        a: &[T],
        a_region: VectorRegion,
        b: &[T],
        b_region: VectorRegion,
        c: &mut [T],
        c_region: VectorRegion,
        dim: usize,
    ) -> Result<UpdateShape, GramError> {
        Validator::validate_layout(a.len(), a_region, b.len(), b_region, c.len(), c_region, dim)?;

        let shape = UpdateShape::of(a_region, b_region, dim);
        if shape.is_empty() {
            return Ok(shape);
        }

        let pass = config
            .custom_update_pass
            .unwrap_or(update_pass_sequential::<T>);
        pass(
            a_region.slice(a),
            b_region.slice(b),
            c_region.slice_mut(c),
            dim,
            config.noise,
            &config.kernel,
        );

        Ok(shape)
    }
}

// ============================================================================
// Flat Entry Point
// ============================================================================

/// Compute a Gram matrix block in place.
///
/// Vector `j` of A starts at `a[a_offset + j * dim]`, vector `i` of B at
/// `b[b_offset + i * dim]`, and entry `(i, j)` is written to
/// `c[c_offset + i * (a_length / dim) + j]`.
///
/// `c_length` must equal `(a_length / dim) * (b_length / dim)`; otherwise
/// [`GramError::SizeMismatch`] is returned and `c` is not modified.
#[allow(clippy::too_many_arguments)]
pub fn update<T: Float>(
    a: &[T],
    a_offset: usize,
    a_length: usize,
    b: &[T],
    b_offset: usize,
    b_length: usize,
    c: &mut [T],
    c_offset: usize,
    c_length: usize,
    dim: usize,
    noise: Noise<T>,
    kernel: &KernelFunction<T>,
) -> Result<(), GramError> {
    let config = UpdateConfig {
        kernel: *kernel,
        noise,
        custom_update_pass: None,
    };

    UpdateExecutor::run(
        &config,
        a,
        VectorRegion::new(a_offset, a_length),
        b,
        VectorRegion::new(b_offset, b_length),
        c,
        VectorRegion::new(c_offset, c_length),
        dim,
    )
    .map(|_| ())
}
