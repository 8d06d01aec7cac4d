//! Tests for the vector kernel formulas.
//!
//! These tests verify the covariance functions evaluated for every vector
//! pair:
//! - ARD-style kernel values and hyperparameter handling
//! - Matérn-5/2 kernel values
//! - Symmetry and degenerate dimensions
//! - Offset-addressed evaluation
//!
//! ## Test Organization
//!
//! 1. **ARD Kernel** - Closed-form values, hyperparameter presets
//! 2. **Matérn-5/2 Kernel** - Closed-form values, zero distance
//! 3. **Mathematical Properties** - Symmetry, zero dimension
//! 4. **Offset Evaluation** - `evaluate_at` addressing and bounds

use approx::assert_relative_eq;

use gramkernel::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn ard_reference(v1: &[f64], v2: &[f64], p: &ArdParams<f64>) -> f64 {
    let sqdist: f64 = v1.iter().zip(v2).map(|(a, b)| (a - b).powi(2)).sum();
    let dot: f64 = v1.iter().zip(v2).map(|(a, b)| a * b).sum();
    p.amplitude * (-0.5 * p.lengthscale * sqdist).exp() + p.bias + p.scale * dot
}

fn matern52_reference(v1: &[f64], v2: &[f64]) -> f64 {
    let r2: f64 = 0.1 * v1.iter().zip(v2).map(|(a, b)| (a - b).powi(2)).sum::<f64>();
    let r = r2.sqrt();
    let s5 = 5.0f64.sqrt();
    0.1 * (1.0 + s5 * r + 5.0 / 3.0 * r2) * (-s5 * r).exp()
}

// ============================================================================
// ARD Kernel Tests
// ============================================================================

/// Test the ARD kernel on identical scalars.
///
/// exp(0) = 1, so the result is amplitude + bias + scale * x^2.
#[test]
fn test_ard_identical_origin() {
    let k = KernelFunction::Ard(ArdParams::default());
    assert_relative_eq!(k.evaluate(&[0.0], &[0.0]), 0.2, epsilon = 1e-15);
}

/// Test the ARD kernel on distinct scalars.
#[test]
fn test_ard_unit_distance() {
    let k = KernelFunction::Ard(ArdParams::default());
    let expected = 0.1 * (-0.05f64).exp() + 0.1;
    assert_relative_eq!(k.evaluate(&[1.0], &[0.0]), expected, epsilon = 1e-15);
    assert_relative_eq!(k.evaluate(&[1.0], &[0.0]), 0.19512294245007140, epsilon = 1e-12);
}

/// Test the ARD kernel includes the linear term.
#[test]
fn test_ard_linear_term() {
    let p = ArdParams::new(0.0, 1.0, 0.0, 2.0);
    let k = KernelFunction::Ard(p);
    // Only scale * dot survives: 2 * (1*4 + 2*5 + 3*6) = 64
    assert_relative_eq!(k.evaluate(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 64.0);
}

/// Test the ARD kernel against a reference on multi-dimensional input.
#[test]
fn test_ard_matches_reference() {
    let v1 = [0.3, -1.2, 2.5, 0.0];
    let v2 = [1.1, 0.4, -0.7, 3.3];

    let presets = [
        ArdParams::default(),
        ArdParams::uniform(0.5),
        ArdParams::new(1.5, 0.2, -0.3, 0.05),
    ];
    for p in presets {
        let k = KernelFunction::Ard(p);
        assert_relative_eq!(
            k.evaluate(&v1, &v2),
            ard_reference(&v1, &v2, &p),
            epsilon = 1e-14
        );
    }
}

/// Test the half-valued preset differs from the default.
#[test]
fn test_ard_presets_differ() {
    let default = KernelFunction::Ard(ArdParams::default());
    let half = KernelFunction::Ard(ArdParams::uniform(0.5));
    // 0.5 + 0.5 vs 0.1 + 0.1 at the origin
    assert_relative_eq!(default.evaluate(&[0.0], &[0.0]), 0.2, epsilon = 1e-15);
    assert_relative_eq!(half.evaluate(&[0.0], &[0.0]), 1.0, epsilon = 1e-15);
}

/// Test the default hyperparameters are all 0.1.
#[test]
fn test_ard_default_params() {
    let p = ArdParams::<f64>::default();
    assert_eq!(p, ArdParams::new(0.1, 0.1, 0.1, 0.1));
    assert!(p.is_finite());
    assert!(!ArdParams::new(0.1, f64::INFINITY, 0.1, 0.1).is_finite());
}

// ============================================================================
// Matérn-5/2 Kernel Tests
// ============================================================================

/// Test the Matérn-5/2 kernel at zero distance for several dimensions.
#[test]
fn test_matern52_zero_distance() {
    let k = KernelFunction::<f64>::Matern52;
    for dim in 1..8 {
        let v: Vec<f64> = (0..dim).map(|i| i as f64 * 0.7 - 1.0).collect();
        assert_relative_eq!(k.evaluate(&v, &v), 0.1, epsilon = 1e-15);
    }
}

/// Test the Matérn-5/2 kernel against a reference.
#[test]
fn test_matern52_matches_reference() {
    let k = KernelFunction::<f64>::Matern52;
    let v1 = [0.5, 1.5, -2.0];
    let v2 = [1.0, -0.5, 0.25];
    assert_relative_eq!(
        k.evaluate(&v1, &v2),
        matern52_reference(&v1, &v2),
        epsilon = 1e-14
    );
}

/// Test the Matérn-5/2 kernel decays with distance.
#[test]
fn test_matern52_monotone_decay() {
    let k = KernelFunction::<f64>::Matern52;
    let mut previous = k.evaluate(&[0.0], &[0.0]);
    for step in 1..20 {
        let value = k.evaluate(&[0.0], &[step as f64 * 0.5]);
        assert!(value < previous, "kernel should decrease with distance");
        assert!(value > 0.0);
        previous = value;
    }
}

/// Test the Matérn-5/2 kernel in single precision.
#[test]
fn test_matern52_f32() {
    let k = KernelFunction::<f32>::Matern52;
    let expected = matern52_reference(&[1.0, 2.0], &[2.0, 0.0]) as f32;
    assert_relative_eq!(
        k.evaluate(&[1.0f32, 2.0], &[2.0, 0.0]),
        expected,
        epsilon = 1e-6
    );
}

// ============================================================================
// Mathematical Properties Tests
// ============================================================================

/// Test that both kernels are symmetric in their arguments.
#[test]
fn test_kernel_symmetry() {
    let pairs: [(&[f64], &[f64]); 4] = [
        (&[0.0], &[1.0]),
        (&[1.0, 2.0], &[-3.0, 0.5]),
        (&[0.1, 0.2, 0.3], &[9.0, -8.0, 7.0]),
        (&[1e3, -1e3], &[1e-3, 5.0]),
    ];
    let kernels = [
        KernelFunction::Ard(ArdParams::default()),
        KernelFunction::Ard(ArdParams::uniform(0.5)),
        KernelFunction::Matern52,
    ];

    for k in kernels {
        for (v1, v2) in pairs {
            assert_relative_eq!(k.evaluate(v1, v2), k.evaluate(v2, v1), epsilon = 1e-15);
        }
    }
}

/// Test that a zero dimension gives a deterministic constant.
#[test]
fn test_zero_dimension() {
    let empty: [f64; 0] = [];
    let ard = KernelFunction::Ard(ArdParams::new(0.4, 0.1, 0.3, 0.1));
    assert_relative_eq!(ard.evaluate(&empty, &empty), 0.7, epsilon = 1e-15);
    assert_relative_eq!(
        KernelFunction::Matern52.evaluate(&empty, &empty),
        0.1,
        epsilon = 1e-15
    );
}

// ============================================================================
// Offset Evaluation Tests
// ============================================================================

/// Test single-pair evaluation at offsets inside larger buffers.
#[test]
fn test_evaluate_at_offsets() {
    let x1 = [9.0, 9.0, 1.0, 2.0, 9.0];
    let x2 = [3.0, 4.0];
    let k = KernelFunction::Ard(ArdParams::default());

    let at = k.evaluate_at(&x1, 2, &x2, 0, 2).unwrap();
    assert_relative_eq!(at, k.evaluate(&[1.0, 2.0], &[3.0, 4.0]), epsilon = 1e-15);
}

/// Test that out-of-range offsets are reported.
#[test]
fn test_evaluate_at_out_of_bounds() {
    let k = KernelFunction::<f64>::Matern52;
    let res = k.evaluate_at(&[1.0, 2.0, 3.0], 0, &[1.0, 2.0], 1, 2);
    assert_eq!(
        res,
        Err(GramError::RegionOutOfBounds {
            buffer: "x2",
            end: 3,
            len: 2
        })
    );
}
