//! Per-element arithmetic over a worker's local partition.
//!
//! Every operator touches only the caller's slice, then synchronizes at a
//! barrier so all workers leave together. Binary operators validate the
//! operands' total element counts before touching anything and return
//! `GridError::ShapeMismatch` with both grids unmodified.

use rand::Rng;

use crate::error::GridError;
use crate::grid::{ByteGrid, ComplexGrid, RealGrid};
use crate::parallel::Comm;
use crate::{Complex, Real};

fn check_npix(got: usize, expected: usize) -> Result<(), GridError> {
    if got != expected {
        return Err(GridError::ShapeMismatch(got, expected));
    }
    Ok(())
}

/// Zero every local element of a complex grid.
pub fn zero_complex<C: Comm>(grid: &mut ComplexGrid, comm: &C) {
    grid.local_mut().fill(Complex::new(0.0, 0.0));
    comm.barrier();
}

/// Zero every local element of a real grid.
pub fn zero_real<C: Comm>(grid: &mut RealGrid, comm: &C) {
    grid.local_mut().fill(0.0);
    comm.barrier();
}

/// Copy `src` into `dest`, element by element.
pub fn copy_complex<C: Comm>(
    dest: &mut ComplexGrid,
    src: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(src.npix(), dest.npix())?;
    dest.local_mut().copy_from_slice(src.local());
    comm.barrier();
    Ok(())
}

/// Copy `src` into `dest`, element by element.
pub fn copy_real<C: Comm>(dest: &mut RealGrid, src: &RealGrid, comm: &C) -> Result<(), GridError> {
    check_npix(src.npix(), dest.npix())?;
    dest.local_mut().copy_from_slice(src.local());
    comm.barrier();
    Ok(())
}

/// sum += other, in place.
pub fn add_real<C: Comm>(sum: &mut RealGrid, other: &RealGrid, comm: &C) -> Result<(), GridError> {
    check_npix(other.npix(), sum.npix())?;
    for (s, o) in sum.local_mut().iter_mut().zip(other.local()) {
        *s += *o;
    }
    comm.barrier();
    Ok(())
}

/// diff -= other, in place.
pub fn subtract_real<C: Comm>(
    diff: &mut RealGrid,
    other: &RealGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(other.npix(), diff.npix())?;
    for (d, o) in diff.local_mut().iter_mut().zip(other.local()) {
        *d -= *o;
    }
    comm.barrier();
    Ok(())
}

/// sum += other, in place.
pub fn add_complex<C: Comm>(
    sum: &mut ComplexGrid,
    other: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(other.npix(), sum.npix())?;
    for (s, o) in sum.local_mut().iter_mut().zip(other.local()) {
        *s += *o;
    }
    comm.barrier();
    Ok(())
}

/// diff -= other, in place.
pub fn subtract_complex<C: Comm>(
    diff: &mut ComplexGrid,
    other: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(other.npix(), diff.npix())?;
    for (d, o) in diff.local_mut().iter_mut().zip(other.local()) {
        *d -= *o;
    }
    comm.barrier();
    Ok(())
}

/// Add a real scalar to the real part of every element.
pub fn add_real_scalar<C: Comm>(grid: &mut ComplexGrid, scalar: Real, comm: &C) {
    for z in grid.local_mut() {
        z.re += scalar;
    }
    comm.barrier();
}

/// Add a complex scalar to every element.
pub fn add_complex_scalar<C: Comm>(grid: &mut ComplexGrid, scalar: Complex, comm: &C) {
    for z in grid.local_mut() {
        *z += scalar;
    }
    comm.barrier();
}

/// Scale every element by a real scalar.
pub fn mul_real_scalar<C: Comm>(grid: &mut ComplexGrid, scalar: Real, comm: &C) {
    for z in grid.local_mut() {
        *z *= scalar;
    }
    comm.barrier();
}

/// Multiply every element by a complex scalar.
pub fn mul_complex_scalar<C: Comm>(grid: &mut ComplexGrid, scalar: Complex, comm: &C) {
    for z in grid.local_mut() {
        *z *= scalar;
    }
    comm.barrier();
}

/// Elementwise complex product, accumulated into the first operand:
/// (a+bi)(c+di) = (ac−bd) + (ad+bc)i.
pub fn mul_complex<C: Comm>(
    one: &mut ComplexGrid,
    two: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(two.npix(), one.npix())?;
    for (a, b) in one.local_mut().iter_mut().zip(two.local()) {
        *a *= *b;
    }
    comm.barrier();
    Ok(())
}

/// Scale each complex element by the co-indexed mask byte.
pub fn mul_complex_byte<C: Comm>(
    grid: &mut ComplexGrid,
    mask: &ByteGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(mask.npix(), grid.npix())?;
    for (z, &m) in grid.local_mut().iter_mut().zip(mask.local()) {
        *z *= m as Real;
    }
    comm.barrier();
    Ok(())
}

/// Extract the real part of a complex grid into a real grid.
pub fn real_part<C: Comm>(
    dest: &mut RealGrid,
    src: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(src.npix(), dest.npix())?;
    for (r, z) in dest.local_mut().iter_mut().zip(src.local()) {
        *r = z.re;
    }
    comm.barrier();
    Ok(())
}

/// Extract the imaginary part of a complex grid into a real grid.
pub fn imaginary_part<C: Comm>(
    dest: &mut RealGrid,
    src: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(src.npix(), dest.npix())?;
    for (r, z) in dest.local_mut().iter_mut().zip(src.local()) {
        *r = z.im;
    }
    comm.barrier();
    Ok(())
}

/// Extract |z| = sqrt(re² + im²) into a real grid.
pub fn magnitude_complex<C: Comm>(
    dest: &mut RealGrid,
    src: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(src.npix(), dest.npix())?;
    for (r, z) in dest.local_mut().iter_mut().zip(src.local()) {
        *r = (z.re * z.re + z.im * z.im).sqrt();
    }
    comm.barrier();
    Ok(())
}

/// Extract atan2(im, re) into a real grid.
pub fn phase_complex<C: Comm>(
    dest: &mut RealGrid,
    src: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(src.npix(), dest.npix())?;
    for (r, z) in dest.local_mut().iter_mut().zip(src.local()) {
        *r = z.im.atan2(z.re);
    }
    comm.barrier();
    Ok(())
}

/// Extract re² + im² into a real grid.
pub fn intensity_complex<C: Comm>(
    dest: &mut RealGrid,
    src: &ComplexGrid,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(src.npix(), dest.npix())?;
    for (r, z) in dest.local_mut().iter_mut().zip(src.local()) {
        *r = z.re * z.re + z.im * z.im;
    }
    comm.barrier();
    Ok(())
}

/// Extract magnitudes from a real grid: |x| per element, or sqrt(|x|) when
/// the source already holds intensities.
pub fn magnitude_real<C: Comm>(
    dest: &mut RealGrid,
    src: &RealGrid,
    is_intensities: bool,
    comm: &C,
) -> Result<(), GridError> {
    check_npix(src.npix(), dest.npix())?;
    for (m, x) in dest.local_mut().iter_mut().zip(src.local()) {
        let mag = x.abs();
        *m = if is_intensities { mag.sqrt() } else { mag };
    }
    comm.barrier();
    Ok(())
}

/// Fill the real part (and optionally the imaginary part) of every local
/// element with uniform random values in [0, 1).
pub fn fill_random<C: Comm, R: Rng>(
    grid: &mut ComplexGrid,
    imaginary_too: bool,
    rng: &mut R,
    comm: &C,
) {
    for z in grid.local_mut() {
        z.re = rng.gen_range(0.0..1.0);
        if imaginary_too {
            z.im = rng.gen_range(0.0..1.0);
        }
    }
    comm.barrier();
}
