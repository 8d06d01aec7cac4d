//! C bindings for gramkernel.
//!
//! Provides C access to the Gram matrix update through a flat, caller-owned
//! buffer interface: every array is passed as a pointer together with an
//! offset and a length, and results are written in place. Functions report
//! a status code instead of panicking across the boundary.
//!
//! Rejected calls are reported as `tracing` events; call
//! [`gramkernel_init_logging`] to route them to stderr.

#![allow(unsafe_op_in_unsafe_fn)]

use std::ffi::CStr;
use std::fmt::Display;
use std::os::raw::{c_char, c_double, c_int};
use std::slice;

use gramkernel::prelude::{
    ArdParams, Gram, GramError, GramUpdater, KernelFunction, KernelKind, UpdateShape, VectorRegion,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Status Codes
// ============================================================================

/// The update completed.
pub const GRAM_OK: c_int = 0;

/// The kernel name is not registered.
pub const GRAM_UNKNOWN_KERNEL: c_int = 1;

/// The output length is not `(a_length / dim) * (b_length / dim)`.
pub const GRAM_SIZE_MISMATCH: c_int = 2;

/// A pointer, offset, length, dimension or parameter is invalid.
pub const GRAM_INVALID_ARGUMENT: c_int = 3;

/// Map a core error to its status code.
fn status_of(err: &GramError) -> c_int {
    match err {
        GramError::UnknownKernel(_) => GRAM_UNKNOWN_KERNEL,
        GramError::SizeMismatch { .. } => GRAM_SIZE_MISMATCH,
        _ => GRAM_INVALID_ARGUMENT,
    }
}

/// Log a rejected call and return its status.
fn reject(status: c_int, reason: impl Display) -> c_int {
    warn!(status, %reason, "kernel update rejected");
    status
}

// ============================================================================
// Configuration
// ============================================================================

/// Options for [`gramkernel_update_with_config`].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GramConfig {
    /// Value added to every output entry when `add_noise` is non-zero.
    pub noise: c_double,
    /// Non-zero to add `noise`, zero to write bare kernel values.
    pub add_noise: c_int,
    /// ARD squared-exponential weight.
    pub amplitude: c_double,
    /// ARD inverse squared length scale.
    pub lengthscale: c_double,
    /// ARD constant offset.
    pub bias: c_double,
    /// ARD linear-term weight.
    pub scale: c_double,
    /// Non-zero to fill rows on all CPU cores.
    pub parallel: c_int,
}

impl Default for GramConfig {
    fn default() -> Self {
        let ard = ArdParams::<f64>::default();
        GramConfig {
            noise: 0.0,
            add_noise: 1,
            amplitude: ard.amplitude,
            lengthscale: ard.lengthscale,
            bias: ard.bias,
            scale: ard.scale,
            parallel: 0,
        }
    }
}

impl GramConfig {
    /// Build an updater for `kind` from these options.
    fn updater(&self, kind: KernelKind) -> Result<GramUpdater<f64>, GramError> {
        let mut builder = Gram::new()
            .kernel(kind)
            .ard_params(ArdParams::new(
                self.amplitude,
                self.lengthscale,
                self.bias,
                self.scale,
            ))
            .parallel(self.parallel != 0);

        builder = if self.add_noise != 0 {
            builder.noise(self.noise)
        } else {
            builder.omit_noise()
        };

        builder.build()
    }
}

// ============================================================================
// Marshaling Helpers
// ============================================================================

/// Convert a C offset/length pair into a region.
fn region(buffer: &'static str, offset: c_int, length: c_int) -> Result<VectorRegion, String> {
    match (usize::try_from(offset), usize::try_from(length)) {
        (Ok(offset), Ok(length)) if offset.checked_add(length).is_some() => {
            Ok(VectorRegion::new(offset, length))
        }
        _ => Err(format!(
            "invalid region for buffer '{buffer}': offset {offset}, length {length}"
        )),
    }
}

/// Borrow the elements `[0, region.end())` behind `ptr`.
///
/// # Safety
/// A non-null `ptr` must be valid for reads of `region.end()` elements.
unsafe fn borrow<'a>(
    buffer: &'static str,
    ptr: *const c_double,
    region: VectorRegion,
) -> Result<&'a [f64], String> {
    if region.end() == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(format!("buffer '{buffer}' is null"));
    }
    Ok(slice::from_raw_parts(ptr, region.end()))
}

/// Mutably borrow the elements `[0, region.end())` behind `ptr`.
///
/// # Safety
/// A non-null `ptr` must be valid for writes of `region.end()` elements and
/// must not alias any other borrowed buffer.
unsafe fn borrow_mut<'a>(
    buffer: &'static str,
    ptr: *mut c_double,
    region: VectorRegion,
) -> Result<&'a mut [f64], String> {
    if region.end() == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(format!("buffer '{buffer}' is null"));
    }
    Ok(slice::from_raw_parts_mut(ptr, region.end()))
}

/// Parse the kernel name without copying it.
///
/// # Safety
/// A non-null `name` must point to a NUL-terminated string.
unsafe fn kernel_kind(name: *const c_char) -> Result<KernelKind, c_int> {
    if name.is_null() {
        return Err(reject(GRAM_INVALID_ARGUMENT, "kernel name is null"));
    }
    let name = CStr::from_ptr(name)
        .to_str()
        .map_err(|err| reject(GRAM_INVALID_ARGUMENT, err))?;
    KernelKind::resolve(name).map_err(|err| reject(status_of(&err), err))
}

/// Run a configured update over raw buffers.
///
/// # Safety
/// See [`gramkernel_update`].
#[allow(clippy::too_many_arguments)]
unsafe fn run_update(
    a: *const c_double,
    a_offset: c_int,
    a_length: c_int,
    b: *const c_double,
    b_offset: c_int,
    b_length: c_int,
    c: *mut c_double,
    c_offset: c_int,
    c_length: c_int,
    dim: c_int,
    kernel_name: *const c_char,
    config: &GramConfig,
) -> c_int {
    // Resolve first: an unknown kernel is reported before any buffer check
    let kind = match kernel_kind(kernel_name) {
        Ok(kind) => kind,
        Err(status) => return status,
    };

    let Ok(dim) = usize::try_from(dim) else {
        return reject(GRAM_INVALID_ARGUMENT, format!("invalid dim {dim}"));
    };

    let regions = region("a", a_offset, a_length).and_then(|ra| {
        let rb = region("b", b_offset, b_length)?;
        let rc = region("c", c_offset, c_length)?;
        Ok((ra, rb, rc))
    });
    let (a_region, b_region, c_region) = match regions {
        Ok(regions) => regions,
        Err(reason) => return reject(GRAM_INVALID_ARGUMENT, reason),
    };

    let buffers = borrow("a", a, a_region).and_then(|sa| {
        let sb = borrow("b", b, b_region)?;
        let sc = borrow_mut("c", c, c_region)?;
        Ok((sa, sb, sc))
    });
    let (a, b, c) = match buffers {
        Ok(buffers) => buffers,
        Err(reason) => return reject(GRAM_INVALID_ARGUMENT, reason),
    };

    let updater = match config.updater(kind) {
        Ok(updater) => updater,
        Err(err) => return reject(status_of(&err), err),
    };

    match updater.update(a, a_region, b, b_region, c, c_region, dim) {
        Ok(UpdateShape { a_cols, b_cols, .. }) => {
            debug!(kernel = %kind, rows = b_cols, cols = a_cols, dim, "kernel matrix updated");
            GRAM_OK
        }
        Err(err) => reject(status_of(&err), err),
    }
}

// ============================================================================
// Exported API
// ============================================================================

/// Fill `c` with the kernel matrix between the vectors of `a` and `b`, adding
/// `noise` to every entry, using default ARD hyperparameters.
///
/// Vector `j` of A starts at `a[a_offset + j * dim]`, vector `i` of B at
/// `b[b_offset + i * dim]`; entry `(i, j)` is written to
/// `c[c_offset + i * (a_length / dim) + j]`.
///
/// Returns `GRAM_OK`, `GRAM_UNKNOWN_KERNEL`, `GRAM_SIZE_MISMATCH` or
/// `GRAM_INVALID_ARGUMENT`. `c` is not modified unless `GRAM_OK` is returned.
///
/// # Safety
/// Each non-null buffer must be valid for `offset + length` elements, `c`
/// must not overlap `a` or `b`, and `kernel_name` must be a NUL-terminated
/// string or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gramkernel_update(
    a: *const c_double,
    a_offset: c_int,
    a_length: c_int,
    b: *const c_double,
    b_offset: c_int,
    b_length: c_int,
    c: *mut c_double,
    c_offset: c_int,
    c_length: c_int,
    dim: c_int,
    noise: c_double,
    kernel_name: *const c_char,
) -> c_int {
    let config = GramConfig {
        noise,
        ..GramConfig::default()
    };
    run_update(
        a,
        a_offset,
        a_length,
        b,
        b_offset,
        b_length,
        c,
        c_offset,
        c_length,
        dim,
        kernel_name,
        &config,
    )
}

/// Like [`gramkernel_update`], with explicit hyperparameters, noise policy
/// and parallelism. A null `config` uses [`gramkernel_default_config`].
///
/// # Safety
/// Same as [`gramkernel_update`]; a non-null `config` must be valid for reads.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gramkernel_update_with_config(
    a: *const c_double,
    a_offset: c_int,
    a_length: c_int,
    b: *const c_double,
    b_offset: c_int,
    b_length: c_int,
    c: *mut c_double,
    c_offset: c_int,
    c_length: c_int,
    dim: c_int,
    kernel_name: *const c_char,
    config: *const GramConfig,
) -> c_int {
    let config = if config.is_null() {
        GramConfig::default()
    } else {
        *config
    };
    run_update(
        a,
        a_offset,
        a_length,
        b,
        b_offset,
        b_length,
        c,
        c_offset,
        c_length,
        dim,
        kernel_name,
        &config,
    )
}

/// Default options: noise added (0.0), ARD hyperparameters 0.1, sequential.
#[unsafe(no_mangle)]
pub extern "C" fn gramkernel_default_config() -> GramConfig {
    GramConfig::default()
}

/// Evaluate one kernel between vectors at offsets. NaN on invalid arguments.
///
/// # Safety
/// Non-null pointers must be valid for `offset + dim` elements.
unsafe fn apply(
    kernel: KernelFunction<f64>,
    x1: *const c_double,
    x1_offset: c_int,
    x2: *const c_double,
    x2_offset: c_int,
    dim: c_int,
) -> c_double {
    let evaluated = region("x1", x1_offset, dim)
        .and_then(|r1| Ok((r1, region("x2", x2_offset, dim)?)))
        .and_then(|(r1, r2)| Ok((borrow("x1", x1, r1)?, borrow("x2", x2, r2)?, r1, r2)))
        .and_then(|(s1, s2, r1, r2)| {
            kernel
                .evaluate_at(s1, r1.offset, s2, r2.offset, r1.length)
                .map_err(|err| err.to_string())
        });

    match evaluated {
        Ok(value) => value,
        Err(reason) => {
            warn!(kernel = kernel.name(), %reason, "kernel evaluation rejected");
            f64::NAN
        }
    }
}

/// ARD kernel (default hyperparameters) between `x1[x1_offset..]` and
/// `x2[x2_offset..]`, each of length `dim`.
///
/// # Safety
/// Non-null pointers must be valid for `offset + dim` elements.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gramkernel_ard_apply(
    x1: *const c_double,
    x1_offset: c_int,
    x2: *const c_double,
    x2_offset: c_int,
    dim: c_int,
) -> c_double {
    apply(
        KernelKind::Ard.with_params(ArdParams::default()),
        x1,
        x1_offset,
        x2,
        x2_offset,
        dim,
    )
}

/// Matérn-5/2 kernel between `x1[x1_offset..]` and `x2[x2_offset..]`, each
/// of length `dim`.
///
/// # Safety
/// Non-null pointers must be valid for `offset + dim` elements.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gramkernel_matern52_apply(
    x1: *const c_double,
    x1_offset: c_int,
    x2: *const c_double,
    x2_offset: c_int,
    dim: c_int,
) -> c_double {
    apply(KernelFunction::Matern52, x1, x1_offset, x2, x2_offset, dim)
}

/// Static description of a status code.
#[unsafe(no_mangle)]
pub extern "C" fn gramkernel_status_message(status: c_int) -> *const c_char {
    let message: &'static CStr = match status {
        GRAM_OK => c"ok",
        GRAM_UNKNOWN_KERNEL => c"unknown kernel",
        GRAM_SIZE_MISMATCH => c"output length does not match number of cols in A * B",
        GRAM_INVALID_ARGUMENT => c"invalid argument",
        _ => c"unrecognized status",
    };
    message.as_ptr()
}

/// Install a stderr logger filtered by `RUST_LOG` (default `warn`).
///
/// Returns 0 on success, 1 if a global logger was already installed.
#[unsafe(no_mangle)]
pub extern "C" fn gramkernel_init_logging() -> c_int {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    match installed {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
