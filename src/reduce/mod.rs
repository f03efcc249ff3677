//! Global reduction engine: whole-grid scalar aggregates.
//!
//! Each reduction accumulates a local partial over the caller's partition,
//! combines it across all workers, and broadcasts so every worker returns
//! the identical scalar — downstream control decisions must agree exactly.
//! Extrema use all-gather-then-local-combine; sums use reduce-broadcast.

use crate::error::GridError;
use crate::grid::{ByteGrid, ComplexGrid, RealGrid};
use crate::parallel::Comm;
use crate::{Complex, Real};

/// Maximum over all elements of a real grid.
pub fn max_real<C: Comm>(grid: &RealGrid, comm: &C) -> Real {
    let local_max = grid
        .local()
        .iter()
        .copied()
        .fold(Real::NEG_INFINITY, Real::max);
    // Tell every worker about all local maxima and let each determine the
    // global maximum independently.
    let mut maxima = Vec::new();
    comm.all_gather(local_max, &mut maxima);
    let result = maxima.into_iter().fold(Real::NEG_INFINITY, Real::max);
    comm.barrier();
    result
}

/// Minimum over all elements of a real grid.
pub fn min_real<C: Comm>(grid: &RealGrid, comm: &C) -> Real {
    let local_min = grid.local().iter().copied().fold(Real::INFINITY, Real::min);
    let mut minima = Vec::new();
    comm.all_gather(local_min, &mut minima);
    let result = minima.into_iter().fold(Real::INFINITY, Real::min);
    comm.barrier();
    result
}

/// Total power Σ(re² + im²) of a complex grid. With a mask, only elements
/// where the mask is 1 contribute — or only where it is 0 when `inverse`
/// is set.
pub fn total_power_complex<C: Comm>(
    grid: &ComplexGrid,
    mask: Option<&ByteGrid>,
    inverse: bool,
    comm: &C,
) -> Result<Real, GridError> {
    if let Some(mask) = mask {
        if mask.npix() != grid.npix() {
            return Err(GridError::ShapeMismatch(mask.npix(), grid.npix()));
        }
    }
    let wanted: u8 = if inverse { 0 } else { 1 };
    let mut local_power = 0.0;
    for (ipix, z) in grid.local().iter().enumerate() {
        if let Some(mask) = mask {
            if mask.local()[ipix] != wanted {
                continue;
            }
        }
        local_power += z.re * z.re + z.im * z.im;
    }
    comm.barrier();
    Ok(comm.all_reduce_sum(local_power))
}

/// Total power of a real grid: Σx² for amplitudes, or Σx directly when the
/// grid already holds intensities.
pub fn total_power_real<C: Comm>(grid: &RealGrid, is_intensities: bool, comm: &C) -> Real {
    let local_power: Real = grid
        .local()
        .iter()
        .map(|&x| if is_intensities { x } else { x * x })
        .sum();
    comm.barrier();
    comm.all_reduce_sum(local_power)
}

/// Complex inner product. With one grid, Σz² accumulated as
/// (re²−im², 2·re·im); with two, Σ z₁·conj(z₂).
pub fn square_sum_complex<C: Comm>(
    grid: &ComplexGrid,
    conj_grid: Option<&ComplexGrid>,
    comm: &C,
) -> Result<Complex, GridError> {
    let (mut local_re, mut local_im) = (0.0, 0.0);
    match conj_grid {
        None => {
            for z in grid.local() {
                local_re += z.re * z.re - z.im * z.im;
                local_im += 2.0 * z.re * z.im;
            }
        }
        Some(other) => {
            if other.partition().local_npix != grid.partition().local_npix {
                return Err(GridError::ShapeMismatch(other.npix(), grid.npix()));
            }
            for (a, b) in grid.local().iter().zip(other.local()) {
                local_re += a.re * b.re + a.im * b.im;
                local_im += a.im * b.re - a.re * b.im;
            }
        }
    }
    comm.barrier();
    Ok(Complex::new(
        comm.all_reduce_sum(local_re),
        comm.all_reduce_sum(local_im),
    ))
}

/// Global phase: the naive average of atan2(im, re) over all elements,
/// each term weighted by 1/npix before summing. Not a circular mean — the
/// average misbehaves for phases straddling the ±π branch cut, and that
/// behavior is kept deliberately.
pub fn global_phase<C: Comm>(grid: &ComplexGrid, comm: &C) -> Real {
    let npix = grid.npix() as Real;
    let local_phase: Real = grid.local().iter().map(|z| z.im.atan2(z.re) / npix).sum();
    comm.barrier();
    comm.all_reduce_sum(local_phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridShape;
    use crate::parallel::SerialComm;
    use approx::assert_abs_diff_eq;

    fn real_ramp(n: usize) -> RealGrid {
        let comm = SerialComm::new();
        let mut g = RealGrid::zeroed(GridShape::new(n, 1, 1).unwrap(), &comm).unwrap();
        for (i, v) in g.local_mut().iter_mut().enumerate() {
            *v = i as Real;
        }
        g
    }

    #[test]
    fn extrema_on_a_ramp_are_exact() {
        let comm = SerialComm::new();
        let g = real_ramp(16);
        assert_eq!(min_real(&g, &comm), 0.0);
        assert_eq!(max_real(&g, &comm), 15.0);
    }

    #[test]
    fn total_power_of_ones_is_npix() {
        let comm = SerialComm::new();
        let mut g = real_ramp(32);
        g.local_mut().fill(1.0);
        assert_eq!(total_power_real(&g, false, &comm), 32.0);
        assert_eq!(total_power_real(&g, true, &comm), 32.0);
    }

    #[test]
    fn square_sum_single_grid_is_sum_of_squares() {
        let comm = SerialComm::new();
        let shape = GridShape::new(2, 1, 1).unwrap();
        let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();
        g.local_mut()[0] = Complex::new(1.0, 2.0);
        g.local_mut()[1] = Complex::new(-3.0, 0.5);
        let total = square_sum_complex(&g, None, &comm).unwrap();
        let expected = g.local()[0] * g.local()[0] + g.local()[1] * g.local()[1];
        assert_abs_diff_eq!(total.re, expected.re, epsilon = 1e-12);
        assert_abs_diff_eq!(total.im, expected.im, epsilon = 1e-12);
    }

    #[test]
    fn square_sum_two_grids_conjugates_the_second() {
        let comm = SerialComm::new();
        let shape = GridShape::new(2, 1, 1).unwrap();
        let mut a = ComplexGrid::zeroed(shape, &comm).unwrap();
        let mut b = ComplexGrid::zeroed(shape, &comm).unwrap();
        a.local_mut()[0] = Complex::new(1.0, 2.0);
        a.local_mut()[1] = Complex::new(0.0, -1.0);
        b.local_mut()[0] = Complex::new(-2.0, 0.5);
        b.local_mut()[1] = Complex::new(3.0, 3.0);
        let total = square_sum_complex(&a, Some(&b), &comm).unwrap();
        let expected = a.local()[0] * b.local()[0].conj() + a.local()[1] * b.local()[1].conj();
        assert_abs_diff_eq!(total.re, expected.re, epsilon = 1e-12);
        assert_abs_diff_eq!(total.im, expected.im, epsilon = 1e-12);
    }

    #[test]
    fn global_phase_averages_naively() {
        let comm = SerialComm::new();
        let shape = GridShape::new(4, 1, 1).unwrap();
        let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();
        // Phases 0, π/2, π/2, 0: average is π/4.
        g.local_mut().copy_from_slice(&[
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 1.0),
            Complex::new(0.0, 2.0),
            Complex::new(5.0, 0.0),
        ]);
        let expected = std::f64::consts::FRAC_PI_4 as Real;
        assert_abs_diff_eq!(global_phase(&g, &comm), expected, epsilon = 1e-12);
    }
}
