//! Single-process transform backend.
//!
//! Every worker invokes it identically; planning covers the full grid, so
//! this backend only serves runs with a single worker (the distributed
//! backend is the multi-worker path). Plans and scratch buffers are built
//! once at creation and reused across executions.

use std::sync::Arc;

use rustfft::{Fft, FftDirection, FftPlanner};

use crate::error::GridError;
use crate::fft::{Direction, PlanEffort};
use crate::grid::GridShape;
use crate::{Complex, Real};

/// Forward and inverse plans for one grid shape, one 1-D plan per axis,
/// combined into 1-D/2-D/3-D transforms by pencil loops.
pub struct LocalPlanPair {
    shape: GridShape,
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
    buffer_y: Vec<Complex>,
    buffer_z: Vec<Complex>,
}

fn scratch_for(a: &Arc<dyn Fft<Real>>, b: &Arc<dyn Fft<Real>>) -> Vec<Complex> {
    vec![Complex::new(0.0, 0.0); a.get_inplace_scratch_len().max(b.get_inplace_scratch_len())]
}

impl LocalPlanPair {
    /// Build plans for both directions over the given shape. The effort
    /// hint is advisory: rustfft selects its strategy at planning time
    /// without touching the data.
    pub fn create(shape: GridShape, effort: PlanEffort, workers: usize) -> Result<Self, GridError> {
        if workers > 1 {
            return Err(GridError::Unsupported(
                "local FFT backend requires a single worker",
            ));
        }
        let mut planner = FftPlanner::new();
        let fft_x = planner.plan_fft(shape.nx, FftDirection::Forward);
        let fft_y = planner.plan_fft(shape.ny, FftDirection::Forward);
        let fft_z = planner.plan_fft(shape.nz, FftDirection::Forward);
        let ifft_x = planner.plan_fft(shape.nx, FftDirection::Inverse);
        let ifft_y = planner.plan_fft(shape.ny, FftDirection::Inverse);
        let ifft_z = planner.plan_fft(shape.nz, FftDirection::Inverse);
        Ok(LocalPlanPair {
            shape,
            effort,
            scratch_x: scratch_for(&fft_x, &ifft_x),
            scratch_y: scratch_for(&fft_y, &ifft_y),
            scratch_z: scratch_for(&fft_z, &ifft_z),
            buffer_y: vec![Complex::new(0.0, 0.0); shape.ny],
            buffer_z: vec![Complex::new(0.0, 0.0); shape.nz],
            fft_x,
            fft_y,
            fft_z,
            ifft_x,
            ifft_y,
            ifft_z,
        })
    }

    /// Transform `data` (the full grid, flattened as ix + nx·iy + nx·ny·iz)
    /// in place along every non-unit axis. No normalization here; the
    /// engine applies the symmetric factor after each direction.
    pub fn execute(&mut self, data: &mut [Complex], direction: Direction) {
        let GridShape { nx, ny, nz } = self.shape;
        let (fft_x, fft_y, fft_z) = match direction {
            Direction::Forward => (&self.fft_x, &self.fft_y, &self.fft_z),
            Direction::Inverse => (&self.ifft_x, &self.ifft_y, &self.ifft_z),
        };

        // X axis: rows are contiguous.
        if nx > 1 {
            for row in data.chunks_exact_mut(nx) {
                fft_x.process_with_scratch(row, &mut self.scratch_x);
            }
        }

        // Y axis: gather each stride-nx pencil, transform, scatter back.
        if ny > 1 {
            for iz in 0..nz {
                let plane = iz * nx * ny;
                for ix in 0..nx {
                    for iy in 0..ny {
                        self.buffer_y[iy] = data[plane + ix + nx * iy];
                    }
                    fft_y.process_with_scratch(&mut self.buffer_y, &mut self.scratch_y);
                    for iy in 0..ny {
                        data[plane + ix + nx * iy] = self.buffer_y[iy];
                    }
                }
            }
        }

        // Z axis: gather each stride-nx·ny pencil.
        if nz > 1 {
            for iy in 0..ny {
                for ix in 0..nx {
                    let base = ix + nx * iy;
                    for iz in 0..nz {
                        self.buffer_z[iz] = data[base + nx * ny * iz];
                    }
                    fft_z.process_with_scratch(&mut self.buffer_z, &mut self.scratch_z);
                    for iz in 0..nz {
                        data[base + nx * ny * iz] = self.buffer_z[iz];
                    }
                }
            }
        }
    }
}
