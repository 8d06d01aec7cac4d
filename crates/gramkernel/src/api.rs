//! High-level API for Gram matrix updates.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements
//! a fluent builder that collects the kernel choice, ARD hyperparameters,
//! noise policy and execution hints, validates them once, and yields a
//! reusable [`GramUpdater`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Deferred errors**: An unknown kernel name given to `.kernel_name()` is
//!   reported by `.build()`, not by the setter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`GramBuilder`] via `Gram::new()`.
//! 2. Chain configuration methods (`.kernel()`, `.ard_params()`, `.noise()`, etc.).
//! 3. Call `.build()` to obtain a [`GramUpdater`], then `.update(...)` per block.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{UpdateConfig, UpdateExecutor, UpdatePassFn};
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::engine::executor::{Noise, UpdateShape, update};
pub use crate::math::kernel::{ArdParams, KernelFunction};
pub use crate::math::registry::KernelKind;
pub use crate::primitives::errors::GramError;
pub use crate::primitives::region::VectorRegion;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a Gram matrix updater.
#[derive(Debug, Clone)]
pub struct GramBuilder<T> {
    /// Kernel family (default: ARD).
    pub kernel: Option<KernelKind>,

    /// ARD hyperparameters (default: all 0.1). Ignored by other kernels.
    pub ard_params: Option<ArdParams<T>>,

    /// Noise policy (default: add 0).
    pub noise: Option<Noise<T>>,

    /// Error from a kernel name that failed to resolve.
    pub deferred_error: Option<GramError>,

    // ======================================
    // DEV
    // ======================================
    /// Custom update pass function.
    #[doc(hidden)]
    pub custom_update_pass: Option<UpdatePassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for GramBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> GramBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            kernel: None,
            ard_params: None,
            noise: None,
            deferred_error: None,
            custom_update_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the kernel family.
    pub fn kernel(mut self, kind: KernelKind) -> Self {
        if self.kernel.is_some() {
            self.duplicate_param = Some("kernel");
        }
        self.kernel = Some(kind);
        self
    }

    /// Set the kernel by registry identifier.
    ///
    /// An unknown identifier is reported by [`build`](Self::build).
    pub fn kernel_name(mut self, name: &str) -> Self {
        if self.kernel.is_some() {
            self.duplicate_param = Some("kernel");
        }
        match KernelKind::resolve(name) {
            Ok(kind) => self.kernel = Some(kind),
            Err(err) => {
                // Keep the first resolution failure
                if self.deferred_error.is_none() {
                    self.deferred_error = Some(err);
                }
            }
        }
        self
    }

    /// Set the ARD hyperparameters.
    pub fn ard_params(mut self, params: ArdParams<T>) -> Self {
        if self.ard_params.is_some() {
            self.duplicate_param = Some("ard_params");
        }
        self.ard_params = Some(params);
        self
    }

    /// Add `noise` to every output entry.
    pub fn noise(mut self, noise: T) -> Self {
        if self.noise.is_some() {
            self.duplicate_param = Some("noise");
        }
        self.noise = Some(Noise::Added(noise));
        self
    }

    /// Write bare kernel values, without noise.
    pub fn omit_noise(mut self) -> Self {
        if self.noise.is_some() {
            self.duplicate_param = Some("noise");
        }
        self.noise = Some(Noise::Omitted);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom update pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_update_pass(mut self, pass: UpdatePassFn<T>) -> Self {
        self.custom_update_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the updater.
    pub fn build(self) -> Result<GramUpdater<T>, GramError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let ard_params = self.ard_params.unwrap_or_default();
        Validator::validate_ard_params(&ard_params)?;

        let noise = self.noise.unwrap_or_default();
        Validator::validate_scalar(noise.value(), "noise")?;

        let kernel = self.kernel.unwrap_or(KernelKind::Ard).with_params(ard_params);

        Ok(GramUpdater {
            config: UpdateConfig {
                kernel,
                noise,
                custom_update_pass: self.custom_update_pass,
            },
            parallel: self.parallel.unwrap_or(false),
        })
    }
}

#[cfg(feature = "cpu")]
impl<T: Float + Send + Sync> GramBuilder<T> {
    /// Fill output rows in parallel across CPU cores.
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        // An explicit custom pass takes precedence
        if parallel && self.custom_update_pass.is_none() {
            self.custom_update_pass =
                Some(crate::engine::parallel::update_pass_parallel::<T> as UpdatePassFn<T>);
        }
        self
    }
}

// ============================================================================
// Updater
// ============================================================================

/// A validated, reusable Gram matrix updater.
#[derive(Debug, Clone, Copy)]
pub struct GramUpdater<T> {
    config: UpdateConfig<T>,
    parallel: bool,
}

impl<T: Float> GramUpdater<T> {
    /// The configured kernel.
    #[inline]
    pub fn kernel(&self) -> &KernelFunction<T> {
        &self.config.kernel
    }

    /// The configured noise policy.
    #[inline]
    pub fn noise(&self) -> Noise<T> {
        self.config.noise
    }

    /// Whether rows are filled in parallel.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Evaluate the configured kernel between two vectors (without noise).
    #[inline]
    pub fn evaluate(&self, v1: &[T], v2: &[T]) -> T {
        self.config.kernel.evaluate(v1, v2)
    }

    /// Write the Gram matrix block between the vectors of `a_region` and
    /// `b_region` into `c_region`.
    ///
    /// Returns the block shape. On error `c` is left unchanged.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &self,
        a: &[T],
        a_region: VectorRegion,
        b: &[T],
        b_region: VectorRegion,
        c: &mut [T],
        c_region: VectorRegion,
        dim: usize,
    ) -> Result<UpdateShape, GramError> {
        UpdateExecutor::run(&self.config, a, a_region, b, b_region, c, c_region, dim)
    }
}
