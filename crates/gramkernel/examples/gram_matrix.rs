//! Gram Matrix Update Examples
//!
//! This example demonstrates the main ways of filling a kernel matrix:
//! - A full self-Gram matrix with the default ARD kernel
//! - Selecting a kernel by registry identifier
//! - Growing a dataset one observation at a time, updating only the new row
//! - Custom ARD hyperparameters without noise
//! - Error handling for mismatched output buffers
//!
//! Each scenario prints the matrix it produces.

use gramkernel::prelude::*;

fn main() -> Result<(), GramError> {
    println!("{}", "=".repeat(80));
    println!("Gram Matrix Updates - Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_self_gram()?;
    example_2_kernel_by_name()?;
    example_3_incremental_rows()?;
    example_4_custom_params()?;
    example_5_size_mismatch();

    Ok(())
}

fn print_matrix(c: &[f64], shape: UpdateShape) {
    for row in 0..shape.rows() {
        let cells: Vec<String> = (0..shape.cols())
            .map(|col| format!("{:>9.5}", c[shape.index(row, col)]))
            .collect();
        println!("  [{}]", cells.join(", "));
    }
    println!();
}

/// Example 1: Self-Gram Matrix
/// Three 2-dimensional points against themselves, with a small jitter.
fn example_1_self_gram() -> Result<(), GramError> {
    println!("Example 1: Self-Gram Matrix (ARD, noise 1e-3)");
    println!("{}", "-".repeat(80));

    let x = [0.0, 0.0, 1.0, 0.5, -0.5, 2.0];
    let mut k = vec![0.0; 9];

    let gram = Gram::new().noise(1e-3).build()?;
    let region = VectorRegion::whole(x.len());
    let shape = gram.update(&x, region, &x, region, &mut k, VectorRegion::whole(9), 2)?;

    print_matrix(&k, shape);
    Ok(())
}

/// Example 2: Kernel by Name
/// The identifier resolves once when the updater is built.
fn example_2_kernel_by_name() -> Result<(), GramError> {
    println!("Example 2: Kernel Selected by Identifier");
    println!("{}", "-".repeat(80));

    let a = [0.0, 1.0, 2.0, 3.0];
    let b = [0.0, 1.5];
    let mut c = vec![0.0; 8];

    for name in KernelFunction::<f64>::variants() {
        let gram = Gram::new().kernel_name(name).omit_noise().build()?;
        let shape = gram.update(
            &a,
            VectorRegion::whole(a.len()),
            &b,
            VectorRegion::whole(b.len()),
            &mut c,
            VectorRegion::whole(8),
            1,
        )?;
        println!("{} ({}):", name, gram.kernel().label());
        print_matrix(&c, shape);
    }
    Ok(())
}

/// Example 3: Incremental Rows
/// Each new observation only needs the kernel against the existing ones.
fn example_3_incremental_rows() -> Result<(), GramError> {
    println!("Example 3: Incremental Updates");
    println!("{}", "-".repeat(80));

    let dim = 1;
    let x = [0.0, 0.4, 0.9, 1.3];
    let n = x.len();
    let mut k = vec![0.0; n * n];
    let gram = Gram::new().kernel(KernelKind::Matern52).noise(0.01).build()?;

    for i in 0..n {
        // Row i, columns 0..=i
        let seen = VectorRegion::new(0, (i + 1) * dim);
        let newest = VectorRegion::new(i * dim, dim);
        gram.update(&x, seen, &x, newest, &mut k, VectorRegion::new(i * n, i + 1), dim)?;
        println!("  after point {}: row {:?}", i, &k[i * n..i * n + i + 1]);
    }
    println!();
    Ok(())
}

/// Example 4: Custom Hyperparameters
fn example_4_custom_params() -> Result<(), GramError> {
    println!("Example 4: Custom ARD Hyperparameters, No Noise");
    println!("{}", "-".repeat(80));

    let x = [0.0, 1.0, 2.0];
    let mut k = vec![0.0; 9];

    let gram = Gram::new()
        .ard_params(ArdParams::uniform(0.5))
        .omit_noise()
        .build()?;
    let region = VectorRegion::whole(x.len());
    let shape = gram.update(&x, region, &x, region, &mut k, VectorRegion::whole(9), 1)?;

    print_matrix(&k, shape);
    Ok(())
}

/// Example 5: Size Mismatch
/// The output is left untouched when its length is wrong.
fn example_5_size_mismatch() {
    println!("Example 5: Size Mismatch");
    println!("{}", "-".repeat(80));

    let kernel = KernelFunction::<f64>::default();
    let mut c = [7.0; 3];
    match update(&[0.0, 1.0], 0, 2, &[0.0], 0, 1, &mut c, 0, 3, 1, Noise::Omitted, &kernel) {
        Ok(()) => println!("  unexpected success"),
        Err(err) => println!("  error: {err}; output still {:?}", c),
    }
    println!();
}
