//! Slab-distributed transform backend.
//!
//! The plan natively understands the partition scheme: each worker first
//! transforms the axes that are contiguous inside its own slab, then the
//! slabs are redistributed with an all-gather so the split-axis pencils can
//! be transformed, of which each worker keeps only its own range. In 2-D
//! and 3-D the grid must be square/cubic; the redistribution buffer is
//! allocated once at plan creation and reused across executions.

use std::sync::Arc;

use rustfft::{Fft, FftDirection, FftPlanner};

use crate::error::GridError;
use crate::fft::{Direction, PlanEffort};
use crate::grid::{GridShape, Partition};
use crate::parallel::Comm;
use crate::{Complex, Real};

/// Forward and inverse slab-distributed plans for one grid shape.
pub struct DistPlanPair {
    shape: GridShape,
    part: Partition,
    #[allow(dead_code)]
    effort: PlanEffort,
    fft_x: Arc<dyn Fft<Real>>,
    fft_y: Arc<dyn Fft<Real>>,
    fft_z: Arc<dyn Fft<Real>>,
    ifft_x: Arc<dyn Fft<Real>>,
    ifft_y: Arc<dyn Fft<Real>>,
    ifft_z: Arc<dyn Fft<Real>>,
    scratch_x: Vec<Complex>,
    scratch_y: Vec<Complex>,
    scratch_z: Vec<Complex>,
    pencil_y: Vec<Complex>,
    pencil_z: Vec<Complex>,
    gather: Vec<Complex>,
}

fn scratch_for(a: &Arc<dyn Fft<Real>>, b: &Arc<dyn Fft<Real>>) -> Vec<Complex> {
    vec![Complex::new(0.0, 0.0); a.get_inplace_scratch_len().max(b.get_inplace_scratch_len())]
}

impl DistPlanPair {
    /// Build plans for both directions. The distributed transform requires
    /// nx = ny in 2-D and nx = ny = nz in 3-D; anything else is refused at
    /// creation.
    pub fn create(
        shape: GridShape,
        part: Partition,
        effort: PlanEffort,
    ) -> Result<Self, GridError> {
        let GridShape { nx, ny, nz } = shape;
        let square_ok = if ny == 1 && nz == 1 {
            true
        } else if nz == 1 {
            nx == ny
        } else {
            nx == ny && nx == nz
        };
        if !square_ok {
            return Err(GridError::UnequalDims(nx, ny, nz));
        }

        let mut planner = FftPlanner::new();
        let fft_x = planner.plan_fft(nx, FftDirection::Forward);
        let fft_y = planner.plan_fft(ny, FftDirection::Forward);
        let fft_z = planner.plan_fft(nz, FftDirection::Forward);
        let ifft_x = planner.plan_fft(nx, FftDirection::Inverse);
        let ifft_y = planner.plan_fft(ny, FftDirection::Inverse);
        let ifft_z = planner.plan_fft(nz, FftDirection::Inverse);
        Ok(DistPlanPair {
            shape,
            part,
            effort,
            scratch_x: scratch_for(&fft_x, &ifft_x),
            scratch_y: scratch_for(&fft_y, &ifft_y),
            scratch_z: scratch_for(&fft_z, &ifft_z),
            pencil_y: vec![Complex::new(0.0, 0.0); ny],
            pencil_z: vec![Complex::new(0.0, 0.0); nz],
            gather: Vec::new(),
            fft_x,
            fft_y,
            fft_z,
            ifft_x,
            ifft_y,
            ifft_z,
        })
    }

    /// Transform this worker's slab in place. Collective: every worker
    /// must call with the same direction.
    pub fn execute<C: Comm>(&mut self, data: &mut [Complex], direction: Direction, comm: &C) {
        let GridShape { nx, ny, nz } = self.shape;
        let (fft_x, fft_y, fft_z) = match direction {
            Direction::Forward => (&self.fft_x, &self.fft_y, &self.fft_z),
            Direction::Inverse => (&self.ifft_x, &self.ifft_y, &self.ifft_z),
        };

        if ny == 1 && nz == 1 {
            // 1-D, split along x: every worker transforms the gathered
            // line and keeps its own chunk.
            comm.all_gather_complex(data, &mut self.gather);
            fft_x.process_with_scratch(&mut self.gather, &mut self.scratch_x);
            let start = self.part.local_offset;
            data.copy_from_slice(&self.gather[start..start + data.len()]);
            return;
        }

        if nz == 1 {
            // 2-D, split along y. Local rows are contiguous x-lines.
            for row in data.chunks_exact_mut(nx) {
                fft_x.process_with_scratch(row, &mut self.scratch_x);
            }
            comm.all_gather_complex(data, &mut self.gather);
            let y0 = self.part.local_offset / nx;
            let local_ny = data.len() / nx;
            for ix in 0..nx {
                for iy in 0..ny {
                    self.pencil_y[iy] = self.gather[ix + nx * iy];
                }
                fft_y.process_with_scratch(&mut self.pencil_y, &mut self.scratch_y);
                for iy in 0..local_ny {
                    data[ix + nx * iy] = self.pencil_y[y0 + iy];
                }
            }
            return;
        }

        // 3-D, split along z: x rows and y pencils stay inside the local
        // planes, then the z pencils run over the gathered grid.
        let plane = nx * ny;
        let local_nz = data.len() / plane;
        for iz in 0..local_nz {
            let base = plane * iz;
            for row in data[base..base + plane].chunks_exact_mut(nx) {
                fft_x.process_with_scratch(row, &mut self.scratch_x);
            }
            for ix in 0..nx {
                for iy in 0..ny {
                    self.pencil_y[iy] = data[base + ix + nx * iy];
                }
                fft_y.process_with_scratch(&mut self.pencil_y, &mut self.scratch_y);
                for iy in 0..ny {
                    data[base + ix + nx * iy] = self.pencil_y[iy];
                }
            }
        }
        comm.all_gather_complex(data, &mut self.gather);
        let z0 = self.part.local_offset / plane;
        for iy in 0..ny {
            for ix in 0..nx {
                let pencil_base = ix + nx * iy;
                for iz in 0..nz {
                    self.pencil_z[iz] = self.gather[pencil_base + plane * iz];
                }
                fft_z.process_with_scratch(&mut self.pencil_z, &mut self.scratch_z);
                for iz in 0..local_nz {
                    data[pencil_base + plane * iz] = self.pencil_z[z0 + iz];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unequal_dims_are_fatal_at_creation() {
        let shape = GridShape::new(8, 4, 1).unwrap();
        let part = Partition::whole(&shape);
        assert!(matches!(
            DistPlanPair::create(shape, part, PlanEffort::Patient),
            Err(GridError::UnequalDims(8, 4, 1))
        ));
        let cube = GridShape::new(4, 4, 4).unwrap();
        assert!(DistPlanPair::create(cube, Partition::whole(&cube), PlanEffort::Patient).is_ok());
    }

    #[test]
    fn rectangular_1d_is_allowed() {
        let shape = GridShape::new(16, 1, 1).unwrap();
        let part = Partition::whole(&shape);
        assert!(DistPlanPair::create(shape, part, PlanEffort::Patient).is_ok());
    }
}
