//! # gramkernel — Pairwise Kernel (Gram) Matrix Updates for Rust
//!
//! Fills a caller-owned output buffer with the pairwise kernel evaluations
//! between two sets of fixed-dimension vectors packed in flat buffers, as
//! needed by Gaussian-process regression and other kernel methods.
//!
//! ## What is a Gram matrix update?
//!
//! Given vectors `A_0 .. A_{n-1}` and `B_0 .. B_{m-1}` of dimension `dim`,
//! the update writes `k(A_j, B_i) [+ noise]` at row `i`, column `j` of a
//! row-major `m × n` matrix. Both inputs and the output are addressed by an
//! `(offset, length)` region inside larger buffers, so a growing dataset can
//! be updated in place one block at a time.
//!
//! ## Quick Start
//!
//! ```rust
//! use gramkernel::prelude::*;
//!
//! // Two 1-dimensional vectors in A, one in B
//! let a = vec![0.0f64, 1.0];
//! let b = vec![0.0];
//! let mut c = vec![0.0; 2];
//!
//! let updater = Gram::<f64>::new()
//!     .kernel_name("tomsopt.kernel.ARDKernel")
//!     .noise(0.0)
//!     .build()?;
//!
//! let shape = updater.update(
//!     &a, VectorRegion::whole(a.len()),
//!     &b, VectorRegion::whole(b.len()),
//!     &mut c, VectorRegion::whole(2),
//!     1,
//! )?;
//!
//! assert_eq!((shape.rows(), shape.cols()), (1, 2));
//! assert!((c[0] - 0.2).abs() < 1e-12);
//! # Result::<(), GramError>::Ok(())
//! ```
//!
//! ## Kernels
//!
//! | Identifier                  | Formula                                                          |
//! |-----------------------------|------------------------------------------------------------------|
//! | `tomsopt.kernel.ARDKernel`  | `amplitude * exp(-0.5 * lengthscale * |x-y|^2) + bias + scale * x·y` |
//! | `tomsopt.kernel.Matern52`   | `0.1 * (1 + √5 r + 5/3 r^2) * exp(-√5 r)`, `r^2 = 0.1 * |x-y|^2`  |
//!
//! The ARD hyperparameters default to `0.1` each and can be replaced through
//! [`ArdParams`](prelude::ArdParams).
//!
//! ## Low-level entry point
//!
//! The flat-argument form mirrors the native calling convention:
//!
//! ```rust
//! use gramkernel::prelude::*;
//!
//! let a = [1.0, 2.0, 3.0, 4.0];
//! let b = [1.0, 2.0];
//! let mut c = [f64::NAN; 2];
//! let kernel = KernelFunction::resolve("tomsopt.kernel.Matern52")?;
//!
//! update(&a, 0, 4, &b, 0, 2, &mut c, 0, 2, 2, Noise::Omitted, &kernel)?;
//! assert!((c[0] - 0.1).abs() < 1e-12);
//! # Result::<(), GramError>::Ok(())
//! ```
//!
//! ## Error Handling
//!
//! Every precondition is checked before the first write. On error the output
//! buffer is left exactly as it was:
//!
//! ```rust
//! use gramkernel::prelude::*;
//!
//! let mut c = [7.0; 3];
//! let err = KernelFunction::<f64>::resolve("rbf").unwrap_err();
//! assert_eq!(err, GramError::UnknownKernel("rbf".into()));
//!
//! let kernel = KernelFunction::<f64>::default();
//! let res = update(&[0.0, 1.0], 0, 2, &[0.0], 0, 1, &mut c, 0, 3, 1, Noise::Omitted, &kernel);
//! assert_eq!(res, Err(GramError::SizeMismatch { expected: 2, actual: 3 }));
//! assert_eq!(c, [7.0; 3]);
//! ```
//!
//! ## Features
//!
//! * `std` (default): standard library support; disable for `no_std` + `alloc`.
//! * `cpu` (default): data-parallel update pass through `rayon`.
//! * `dev`: exposes the internal layers for testing.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Layer 1: Primitives - errors and buffer regions.
mod primitives;

// Layer 2: Math - kernel formulas and the name registry.
mod math;

// Layer 3: Engine - validation and the matrix update passes.
mod engine;

// High-level fluent API.
mod api;

// Standard gramkernel prelude.
pub mod prelude {
    pub use crate::api::{
        ArdParams, GramBuilder as Gram, GramError, GramUpdater, KernelFunction, KernelKind, Noise,
        UpdateShape, VectorRegion, update,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
