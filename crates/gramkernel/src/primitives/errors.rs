//! Error types for Gram matrix updates.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while resolving a
//! kernel, validating buffer layouts, or configuring an updater.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., expected vs. actual lengths).
//! * **Pre-write**: Every variant is raised before the output buffer is touched.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Dispatch**: Unknown kernel identifiers.
//! 2. **Layout validation**: Output size, vector lengths, region bounds.
//! 3. **Parameter validation**: Non-finite hyperparameters or noise, duplicate builder settings.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for Gram matrix operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GramError {
    /// The kernel identifier does not name a registered kernel.
    UnknownKernel(String),

    /// The output region cannot hold exactly `a_cols * b_cols` entries.
    SizeMismatch {
        /// Required output length (`a_cols * b_cols`).
        expected: usize,
        /// Declared output length.
        actual: usize,
    },

    /// An input length is not a whole number of vectors.
    InvalidLength {
        /// Which buffer (`"a"` or `"b"`).
        buffer: &'static str,
        /// Declared element count.
        length: usize,
        /// Vector dimension.
        dim: usize,
    },

    /// `offset + length` runs past the end of the backing buffer.
    RegionOutOfBounds {
        /// Which buffer (`"a"`, `"b"` or `"c"`).
        buffer: &'static str,
        /// One past the last element addressed by the region.
        end: usize,
        /// Length of the backing buffer.
        len: usize,
    },

    /// A hyperparameter or noise value is NaN or infinite.
    InvalidNumericValue(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for GramError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::UnknownKernel(name) => write!(f, "Couldn't find kernel {name}"),
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "Output length {actual} does not match number of cols in A * B ({expected})"
            ),
            Self::InvalidLength {
                buffer,
                length,
                dim,
            } => write!(
                f,
                "Invalid length for buffer '{buffer}': {length} (must be a multiple of dim {dim})"
            ),
            Self::RegionOutOfBounds { buffer, end, len } => write!(
                f,
                "Region of buffer '{buffer}' ends at {end} but buffer holds {len} elements"
            ),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
            ),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for GramError {}
