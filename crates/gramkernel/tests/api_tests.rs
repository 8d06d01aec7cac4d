//! Tests for the fluent builder and the reusable updater.
//!
//! ## Test Organization
//!
//! 1. **Defaults** - Kernel, hyperparameters, noise
//! 2. **Configuration** - Kernel selection, hyperparameters, noise policy
//! 3. **Build Validation** - Deferred errors, duplicates, non-finite values
//! 4. **Updates** - Region-based updates on a growing dataset

use approx::assert_relative_eq;

use gramkernel::prelude::*;

// ============================================================================
// Defaults Tests
// ============================================================================

/// Test the builder defaults: ARD(0.1, ...), noise added at zero.
#[test]
fn test_builder_defaults() {
    let updater = Gram::<f64>::new().build().unwrap();

    assert_eq!(*updater.kernel(), KernelFunction::Ard(ArdParams::default()));
    assert_eq!(updater.noise(), Noise::Added(0.0));
    assert!(!updater.is_parallel());
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test kernel selection by kind and by identifier agree.
#[test]
fn test_kernel_by_kind_and_name() {
    let by_kind = Gram::<f64>::new().kernel(KernelKind::Matern52).build().unwrap();
    let by_name = Gram::<f64>::new()
        .kernel_name("tomsopt.kernel.Matern52")
        .build()
        .unwrap();

    assert_eq!(by_kind.kernel(), by_name.kernel());
    assert_eq!(*by_kind.kernel(), KernelFunction::Matern52);
}

/// Test custom ARD hyperparameters reach the kernel.
#[test]
fn test_custom_ard_params() {
    let updater = Gram::new()
        .kernel(KernelKind::Ard)
        .ard_params(ArdParams::uniform(0.5))
        .build()
        .unwrap();

    assert_relative_eq!(updater.evaluate(&[0.0], &[0.0]), 1.0, epsilon = 1e-15);
    assert_relative_eq!(
        updater.evaluate(&[1.0], &[1.0]),
        0.5 + 0.5 + 0.5,
        epsilon = 1e-15
    );
}

/// Test omitted noise is carried into the updater.
#[test]
fn test_omit_noise() {
    let updater = Gram::<f64>::new().omit_noise().build().unwrap();
    assert_eq!(updater.noise(), Noise::Omitted);
}

// ============================================================================
// Build Validation Tests
// ============================================================================

/// Test an unknown kernel name is reported at build time.
#[test]
fn test_unknown_kernel_deferred() {
    let res = Gram::<f64>::new().kernel_name("tomsopt.kernel.SE").noise(0.1).build();
    assert_eq!(
        res.unwrap_err(),
        GramError::UnknownKernel("tomsopt.kernel.SE".to_string())
    );
}

/// Test duplicate parameters are rejected.
#[test]
fn test_duplicate_parameters() {
    let res = Gram::<f64>::new().noise(0.1).omit_noise().build();
    assert_eq!(
        res.unwrap_err(),
        GramError::DuplicateParameter { parameter: "noise" }
    );

    let res = Gram::<f64>::new()
        .kernel(KernelKind::Ard)
        .kernel_name("tomsopt.kernel.Matern52")
        .build();
    assert_eq!(
        res.unwrap_err(),
        GramError::DuplicateParameter { parameter: "kernel" }
    );
}

/// Test non-finite noise and hyperparameters are rejected.
#[test]
fn test_non_finite_values() {
    assert!(matches!(
        Gram::new().noise(f64::NAN).build(),
        Err(GramError::InvalidNumericValue(_))
    ));
    assert!(matches!(
        Gram::new()
            .ard_params(ArdParams::new(1.0, 1.0, f64::NEG_INFINITY, 1.0))
            .build(),
        Err(GramError::InvalidNumericValue(_))
    ));
}

// ============================================================================
// Update Tests
// ============================================================================

/// Test the worked example through the updater.
#[test]
fn test_updater_scalar_example() {
    let updater = Gram::new()
        .kernel_name("tomsopt.kernel.ARDKernel")
        .noise(0.0)
        .build()
        .unwrap();

    let a = [0.0, 1.0];
    let b = [0.0];
    let mut c = [0.0; 2];

    let shape = updater
        .update(
            &a,
            VectorRegion::whole(2),
            &b,
            VectorRegion::whole(1),
            &mut c,
            VectorRegion::whole(2),
            1,
        )
        .unwrap();

    assert_eq!(shape.rows(), 1);
    assert_eq!(shape.cols(), 2);
    assert_eq!(shape.len(), 2);
    assert_relative_eq!(c[0], 0.2, epsilon = 1e-15);
    assert_relative_eq!(c[1], 0.19512294245007140, epsilon = 1e-12);
}

/// Test filling a Gram matrix block by block as a dataset grows.
#[test]
fn test_incremental_blocks() {
    let dim = 2;
    let points = [0.0, 0.0, 1.0, 0.5, -0.5, 2.0, 1.5, -1.0];
    let n = points.len() / dim;
    let updater = Gram::new().kernel(KernelKind::Matern52).noise(0.01).build().unwrap();

    // Reference: the full n x n matrix in one pass
    let mut full = vec![0.0; n * n];
    updater
        .update(
            &points,
            VectorRegion::whole(points.len()),
            &points,
            VectorRegion::whole(points.len()),
            &mut full,
            VectorRegion::whole(n * n),
            dim,
        )
        .unwrap();

    // Incremental: one new row per point, written into a shared row buffer
    for i in 0..n {
        let mut row = vec![0.0; n + 1];
        let shape = updater
            .update(
                &points,
                VectorRegion::whole(points.len()),
                &points,
                VectorRegion::new(i * dim, dim),
                &mut row,
                VectorRegion::new(1, n),
                dim,
            )
            .unwrap();

        assert_eq!(shape.rows(), 1);
        assert_eq!(row[0], 0.0);
        assert_eq!(&row[1..], &full[shape.index(i, 0)..shape.index(i, 0) + n]);
    }
}

/// Test that the updater leaves the output untouched on failure.
#[test]
fn test_updater_failure_preserves_output() {
    let updater = Gram::<f64>::new().build().unwrap();
    let mut c = [4.0; 3];

    let res = updater.update(
        &[0.0, 1.0],
        VectorRegion::whole(2),
        &[0.0, 1.0],
        VectorRegion::whole(2),
        &mut c,
        VectorRegion::whole(3),
        1,
    );

    assert_eq!(res, Err(GramError::SizeMismatch { expected: 4, actual: 3 }));
    assert_eq!(c, [4.0; 3]);
}
