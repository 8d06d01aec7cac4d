//! Input validation for Gram matrix updates.
//!
//! ## Purpose
//!
//! This module checks buffer layouts and configuration values before any
//! output is written: region bounds, whole-vector lengths, the exact output
//! size, and finiteness of hyperparameters and noise.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Side-effect free**: Validators only read their arguments.
//! * **Generics**: Numeric checks are generic over `Float` types.
//!
//! ## Invariants
//!
//! * A layout that passes [`Validator::validate_layout`] can be updated
//!   without any out-of-bounds access.
//!
//! ## Non-goals
//!
//! * This module does not evaluate kernels or write the output.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::kernel::ArdParams;
use crate::primitives::errors::GramError;
use crate::primitives::region::VectorRegion;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for Gram matrix layouts and configuration.
///
/// All methods return `Result<_, GramError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Layout Validation
    // ========================================================================

    /// Validate that `region` lies within a buffer of `len` elements.
    pub fn validate_region(
        buffer: &'static str,
        region: VectorRegion,
        len: usize,
    ) -> Result<(), GramError> {
        // `end()` saturates, so overflow has to be caught separately
        if region.offset.checked_add(region.length).is_none() || region.end() > len {
            return Err(GramError::RegionOutOfBounds {
                buffer,
                end: region.end(),
                len,
            });
        }
        Ok(())
    }

    /// Validate that an input length is a whole number of vectors.
    ///
    /// With `dim == 0` the only whole number of vectors is an empty buffer.
    pub fn validate_vector_length(
        buffer: &'static str,
        length: usize,
        dim: usize,
    ) -> Result<(), GramError> {
        let whole = if dim == 0 {
            length == 0
        } else {
            length % dim == 0
        };
        if !whole {
            return Err(GramError::InvalidLength {
                buffer,
                length,
                dim,
            });
        }
        Ok(())
    }

    /// Validate that the output can hold exactly `a_cols * b_cols` entries.
    pub fn validate_output_size(
        a_cols: usize,
        b_cols: usize,
        c_length: usize,
    ) -> Result<(), GramError> {
        let expected = a_cols.saturating_mul(b_cols);
        if a_cols.checked_mul(b_cols).is_none() || c_length != expected {
            return Err(GramError::SizeMismatch {
                expected,
                actual: c_length,
            });
        }
        Ok(())
    }

    /// Validate a complete update layout.
    ///
    /// Checks, in order: region bounds of A, B and C, whole-vector lengths
    /// of A and B, then the output size.
    #[allow(clippy::too_many_arguments)]
    pub fn validate_layout(
        a_len: usize,
        a_region: VectorRegion,
        b_len: usize,
        b_region: VectorRegion,
        c_len: usize,
        c_region: VectorRegion,
        dim: usize,
    ) -> Result<(), GramError> {
        Self::validate_region("a", a_region, a_len)?;
        Self::validate_region("b", b_region, b_len)?;
        Self::validate_region("c", c_region, c_len)?;

        Self::validate_vector_length("a", a_region.length, dim)?;
        Self::validate_vector_length("b", b_region.length, dim)?;

        Self::validate_output_size(
            a_region.vector_count(dim),
            b_region.vector_count(dim),
            c_region.length,
        )
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a single numeric value for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str) -> Result<(), GramError> {
        if !val.is_finite() {
            return Err(GramError::InvalidNumericValue(format!(
                "{}={}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate the ARD hyperparameter tuple.
    pub fn validate_ard_params<T: Float>(params: &ArdParams<T>) -> Result<(), GramError> {
        Self::validate_scalar(params.amplitude, "amplitude")?;
        Self::validate_scalar(params.lengthscale, "lengthscale")?;
        Self::validate_scalar(params.bias, "bias")?;
        Self::validate_scalar(params.scale, "scale")
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), GramError> {
        if let Some(param) = duplicate_param {
            return Err(GramError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
