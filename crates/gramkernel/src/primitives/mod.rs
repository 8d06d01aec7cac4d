//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive types shared by every other layer:
//! the error type and the `(offset, length)` buffer region descriptor.
//! It has zero internal dependencies within the crate.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Buffer region descriptors.
pub mod region;
