//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure kernel formulas and the registry that maps
//! textual kernel identifiers onto them. These are the building blocks the
//! engine evaluates for every vector pair.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Vector kernel functions (ARD, Matérn-5/2).
pub mod kernel;

/// Kernel identifier registry and dispatch.
pub mod registry;
