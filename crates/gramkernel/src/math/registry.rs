//! Kernel registry: textual identifiers to kernel variants.
//!
//! ## Purpose
//!
//! Callers on the far side of a language boundary select a kernel by name.
//! This module resolves such a name, once per call, into a [`KernelKind`]
//! and from there into an evaluable [`KernelFunction`].
//!
//! ## Design notes
//!
//! * **Exact match**: Identifiers are compared byte for byte; there is no
//!   case folding and no fallback kernel.
//! * **Allocation-free**: Successful resolution never allocates. Only the
//!   error path copies the offending name.
//!
//! ## Invariants
//!
//! * `KernelKind::resolve(kind.identifier()) == Ok(kind)` for every kind.
//! * Each identifier dispatches to its own formula.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;

// External dependencies
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use num_traits::Float;

// Internal dependencies
use crate::math::kernel::{ArdParams, KernelFunction};
use crate::primitives::errors::GramError;

/// Identifier of the ARD-style kernel.
pub const ARD_KERNEL: &str = "tomsopt.kernel.ARDKernel";

/// Identifier of the Matérn-5/2 kernel.
pub const MATERN52_KERNEL: &str = "tomsopt.kernel.Matern52";

/// The registered kernel families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// ARD-style kernel.
    Ard,

    /// Matérn-5/2 kernel.
    Matern52,
}

impl KernelKind {
    /// Every registered kind, in registry order.
    pub const ALL: [KernelKind; 2] = [KernelKind::Ard, KernelKind::Matern52];

    /// Resolve a kernel identifier.
    pub fn resolve(name: &str) -> Result<Self, GramError> {
        match name {
            ARD_KERNEL => Ok(KernelKind::Ard),
            MATERN52_KERNEL => Ok(KernelKind::Matern52),
            _ => Err(GramError::UnknownKernel(name.to_string())),
        }
    }

    /// Registry identifier of this kind.
    #[inline]
    pub const fn identifier(&self) -> &'static str {
        match self {
            KernelKind::Ard => ARD_KERNEL,
            KernelKind::Matern52 => MATERN52_KERNEL,
        }
    }

    /// Attach hyperparameters to obtain an evaluable kernel.
    ///
    /// `ard` is only used by [`KernelKind::Ard`].
    #[inline]
    pub fn with_params<T: Float>(self, ard: ArdParams<T>) -> KernelFunction<T> {
        match self {
            KernelKind::Ard => KernelFunction::Ard(ard),
            KernelKind::Matern52 => KernelFunction::Matern52,
        }
    }
}

impl FromStr for KernelKind {
    type Err = GramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl Display for KernelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.identifier())
    }
}

impl<T: Float> KernelFunction<T> {
    /// Resolve a kernel identifier with default ARD hyperparameters.
    pub fn resolve(name: &str) -> Result<Self, GramError> {
        KernelKind::resolve(name).map(|kind| kind.with_params(ArdParams::default()))
    }

    /// Registry kind of this kernel.
    #[inline]
    pub const fn kind(&self) -> KernelKind {
        match self {
            KernelFunction::Ard(_) => KernelKind::Ard,
            KernelFunction::Matern52 => KernelKind::Matern52,
        }
    }

    /// Registry identifier of this kernel.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.kind().identifier()
    }

    /// Identifiers of every registered kernel.
    pub fn variants() -> [&'static str; 2] {
        KernelKind::ALL.map(|kind| kind.identifier())
    }
}
