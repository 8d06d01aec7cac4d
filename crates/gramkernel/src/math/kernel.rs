//! Vector kernel functions for Gram matrix evaluation.
//!
//! ## Purpose
//!
//! This module provides the covariance functions evaluated between every
//! pair of vectors in a Gram matrix update: an ARD-style kernel combining a
//! squared-exponential term with a linear term, and a Matérn-5/2 kernel.
//!
//! ## Design notes
//!
//! * **Closed set**: Kernels are variants of [`KernelFunction`], dispatched with
//!   an exhaustive `match`.
//! * **Single pass**: Each formula accumulates its sums in one sweep over the
//!   two vectors.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **ARD**: `amplitude * exp(-0.5 * lengthscale * d²) + bias + scale * <x, y>`.
//! * **Matérn-5/2**: `0.1 * (1 + √5 r + 5/3 r²) * exp(-√5 r)` with `r² = 0.1 * d²`.
//!
//! ## Invariants
//!
//! * Kernels are symmetric: `k(x, y) == k(y, x)`.
//! * Kernels are pure and O(dim).
//! * A zero dimension is not an error; empty sums are zero.
//!
//! ## Non-goals
//!
//! * This module does not compute gradients with respect to hyperparameters.
//! * This module does not check that the two vectors have equal length
//!   (handled by the engine, which slices both at `dim`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::GramError;
use crate::primitives::region::VectorRegion;

// ============================================================================
// Helpers
// ============================================================================

#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::zero)
}

// ============================================================================
// ARD Hyperparameters
// ============================================================================

/// Hyperparameters of the ARD-style kernel.
///
/// The default sets every field to `0.1`. `ArdParams::uniform(0.5)` gives
/// the other tuple in use by existing callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArdParams<T> {
    /// Weight of the squared-exponential term.
    pub amplitude: T,

    /// Inverse squared length scale applied to the squared distance.
    pub lengthscale: T,

    /// Constant offset.
    pub bias: T,

    /// Weight of the linear (dot-product) term.
    pub scale: T,
}

impl<T: Float> ArdParams<T> {
    /// Create a hyperparameter tuple.
    #[inline]
    pub fn new(amplitude: T, lengthscale: T, bias: T, scale: T) -> Self {
        Self {
            amplitude,
            lengthscale,
            bias,
            scale,
        }
    }

    /// Set all four hyperparameters to the same value.
    #[inline]
    pub fn uniform(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns `true` if every hyperparameter is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.amplitude.is_finite()
            && self.lengthscale.is_finite()
            && self.bias.is_finite()
            && self.scale.is_finite()
    }
}

impl<T: Float> Default for ArdParams<T> {
    fn default() -> Self {
        Self::uniform(constant(0.1))
    }
}

// ============================================================================
// Kernel Formulas
// ============================================================================

/// ARD-style kernel between two vectors of equal dimension.
#[inline]
pub fn ard<T: Float>(v1: &[T], v2: &[T], params: &ArdParams<T>) -> T {
    let mut sqdist = T::zero();
    let mut dot = T::zero();

    for (&a, &b) in v1.iter().zip(v2) {
        let diff = a - b;
        sqdist = sqdist + diff * diff;
        dot = dot + a * b;
    }

    let half = constant::<T>(0.5);
    params.amplitude * (-half * params.lengthscale * sqdist).exp()
        + params.bias
        + params.scale * dot
}

/// Matérn-5/2 kernel between two vectors of equal dimension.
///
/// Length-scale factor and output variance are both fixed at `0.1`.
#[inline]
pub fn matern52<T: Float>(v1: &[T], v2: &[T]) -> T {
    const SQRT5: f64 = 2.23606797749979;
    const D53: f64 = 5.0 / 3.0;
    const LENGTH_FACTOR: f64 = 0.1;
    const VARIANCE: f64 = 0.1;

    let mut sqdist = T::zero();
    for (&a, &b) in v1.iter().zip(v2) {
        let diff = a - b;
        sqdist = sqdist + diff * diff;
    }

    let r2 = constant::<T>(LENGTH_FACTOR) * sqdist;
    let r = r2.sqrt();
    let sqrt5_r = constant::<T>(SQRT5) * r;

    constant::<T>(VARIANCE) * (T::one() + sqrt5_r + constant::<T>(D53) * r2) * (-sqrt5_r).exp()
}

// ============================================================================
// Kernel Function Enum
// ============================================================================

/// A resolved vector kernel, ready to be evaluated.
///
/// `KernelFunction::resolve` maps a registry identifier to a variant; see
/// [`KernelKind`](super::registry::KernelKind) for the identifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelFunction<T> {
    /// ARD-style kernel with its hyperparameters.
    Ard(ArdParams<T>),

    /// Matérn-5/2 kernel.
    Matern52,
}

impl<T: Float> Default for KernelFunction<T> {
    fn default() -> Self {
        KernelFunction::Ard(ArdParams::default())
    }
}

impl<T: Float> KernelFunction<T> {
    /// Short human-readable label.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            KernelFunction::Ard(_) => "ARD",
            KernelFunction::Matern52 => "Matern52",
        }
    }

    /// Evaluate the kernel between two vectors.
    ///
    /// Both slices are expected to hold exactly `dim` elements; extra
    /// trailing elements in the longer slice are ignored.
    #[inline]
    pub fn evaluate(&self, v1: &[T], v2: &[T]) -> T {
        match self {
            KernelFunction::Ard(params) => ard(v1, v2, params),
            KernelFunction::Matern52 => matern52(v1, v2),
        }
    }

    /// Evaluate the kernel between two vectors addressed by offset inside
    /// larger buffers.
    pub fn evaluate_at(
        &self,
        x1: &[T],
        x1_offset: usize,
        x2: &[T],
        x2_offset: usize,
        dim: usize,
    ) -> Result<T, GramError> {
        let r1 = VectorRegion::new(x1_offset, dim);
        let r2 = VectorRegion::new(x2_offset, dim);

        if r1.end() > x1.len() {
            return Err(GramError::RegionOutOfBounds {
                buffer: "x1",
                end: r1.end(),
                len: x1.len(),
            });
        }
        if r2.end() > x2.len() {
            return Err(GramError::RegionOutOfBounds {
                buffer: "x2",
                end: r2.end(),
                len: x2.len(),
            });
        }

        Ok(self.evaluate(r1.slice(x1), r2.slice(x2)))
    }
}

// ============================================================================
// Tests
// ============================================================================
