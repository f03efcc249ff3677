//! Separable Gaussian kernel loader.
//!
//! Fills a complex grid's real part with Π exp(−xᵢ²/2σᵢ²) directly in the
//! distributed layout: each axis's 1-D falloff is precomputed once over the
//! local extent, then combined by outer product. Otherwise the X
//! contribution would be recomputed ny·nz times and the Y contribution nz
//! times.

use crate::grid::{ComplexGrid, SplitAxis};
use crate::parallel::Comm;
use crate::Real;

/// Where the Gaussian peak sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Centering {
    /// Peak at the absolute center of the array, index size/2 per axis.
    Data,
    /// Peak at index 0 with wraparound, matching the transform-space
    /// convention (coordinate i for i < size/2, else i − size).
    Fft,
}

fn axis_falloff(
    n_global: usize,
    local_n: usize,
    rank_offset: usize,
    sigma: Real,
    centering: Centering,
) -> Vec<Real> {
    if local_n <= 1 {
        return vec![1.0];
    }
    // sigma == 0 disables the falloff on this axis entirely.
    let inv_sigma = if sigma != 0.0 { 0.5 / (sigma * sigma) } else { 0.0 };
    (0..local_n)
        .map(|i| {
            let global = rank_offset + i;
            let t = match centering {
                Centering::Fft => {
                    if global < n_global / 2 {
                        global as Real
                    } else {
                        global as Real - n_global as Real
                    }
                }
                Centering::Data => global as Real - (n_global / 2) as Real,
            };
            (-t * t * inv_sigma).exp()
        })
        .collect()
}

/// Load a pure-real separable Gaussian into `grid` (or 1 minus it with
/// `inverse`), zeroing every imaginary part. The split axis respects the
/// same partition scheme as the rest of the engine.
pub fn load_gaussian<C: Comm>(
    grid: &mut ComplexGrid,
    sigma_x: Real,
    sigma_y: Real,
    sigma_z: Real,
    inverse: bool,
    centering: Centering,
    comm: &C,
) {
    let shape = *grid.shape();
    let part = *grid.partition();
    let (local_nx, local_ny, local_nz) = part.local_dims(&shape);
    let split = shape.split_axis();
    let offset_of = |axis| if split == axis { part.rank } else { 0 };

    let xarr = axis_falloff(
        shape.nx,
        local_nx,
        offset_of(SplitAxis::X) * local_nx,
        sigma_x,
        centering,
    );
    let yarr = axis_falloff(
        shape.ny,
        local_ny,
        offset_of(SplitAxis::Y) * local_ny,
        sigma_y,
        centering,
    );
    let zarr = axis_falloff(
        shape.nz,
        local_nz,
        offset_of(SplitAxis::Z) * local_nz,
        sigma_z,
        centering,
    );

    let data = grid.local_mut();
    for (iz, &fz) in zarr.iter().enumerate() {
        let zoffset = local_nx * local_ny * iz;
        for (iy, &fy) in yarr.iter().enumerate() {
            let yoffset = local_nx * iy + zoffset;
            for (ix, &fx) in xarr.iter().enumerate() {
                let value = fx * fy * fz;
                let z = &mut data[ix + yoffset];
                z.re = if inverse { 1.0 - value } else { value };
                z.im = 0.0;
            }
        }
    }
    comm.barrier();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridShape;
    use crate::parallel::SerialComm;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_sigmas_give_unit_everywhere() {
        let comm = SerialComm::new();
        let shape = GridShape::new(4, 4, 2).unwrap();
        let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();
        load_gaussian(&mut g, 0.0, 0.0, 0.0, false, Centering::Data, &comm);
        for z in g.local() {
            assert_abs_diff_eq!(z.re, 1.0);
            assert_abs_diff_eq!(z.im, 0.0);
        }
    }

    #[test]
    fn data_centering_peaks_at_half_size() {
        let comm = SerialComm::new();
        let shape = GridShape::new(8, 1, 1).unwrap();
        let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();
        load_gaussian(&mut g, 1.5, 0.0, 0.0, false, Centering::Data, &comm);
        let peak = g.local()[4].re;
        assert_abs_diff_eq!(peak, 1.0);
        for (i, z) in g.local().iter().enumerate() {
            assert!(z.re <= peak + 1e-12, "index {} above peak", i);
        }
    }

    #[test]
    fn fft_centering_peaks_at_zero_and_wraps() {
        let comm = SerialComm::new();
        let shape = GridShape::new(8, 1, 1).unwrap();
        let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();
        load_gaussian(&mut g, 1.5, 0.0, 0.0, false, Centering::Fft, &comm);
        assert_abs_diff_eq!(g.local()[0].re, 1.0);
        // Wrapped coordinate: index 7 is -1, same falloff as index 1.
        assert_abs_diff_eq!(g.local()[7].re, g.local()[1].re, epsilon = 1e-12);
    }

    #[test]
    fn inverse_flag_complements_the_kernel() {
        let comm = SerialComm::new();
        let shape = GridShape::new(8, 8, 1).unwrap();
        let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();
        let mut inv = ComplexGrid::zeroed(shape, &comm).unwrap();
        load_gaussian(&mut g, 2.0, 1.0, 0.0, false, Centering::Data, &comm);
        load_gaussian(&mut inv, 2.0, 1.0, 0.0, true, Centering::Data, &comm);
        for (a, b) in g.local().iter().zip(inv.local()) {
            assert_abs_diff_eq!(a.re + b.re, 1.0, epsilon = 1e-12);
        }
    }
}
