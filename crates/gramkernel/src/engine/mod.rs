//! Layer 3: Engine
//!
//! # Purpose
//!
//! This layer validates buffer layouts and runs the Gram matrix update
//! passes, sequentially or in parallel.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Engine ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Matrix update execution.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Data-parallel update pass.
#[cfg(feature = "cpu")]
pub mod parallel;
