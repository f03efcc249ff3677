//! Complex-valued grid descriptor.

use crate::error::GridError;
use crate::fft::PlanPair;
use crate::grid::shape::{GridShape, Partition};
use crate::parallel::Comm;
use crate::Complex;

/// A distributed grid of complex scalars (two reals per element, stored
/// interleaved). Besides its storage, a complex grid may carry one live
/// forward/inverse FFT plan pair; see the `fft` module for the lifecycle.
pub struct ComplexGrid {
    shape: GridShape,
    part: Partition,
    data: Vec<Complex>,
    pub(crate) plans: Option<PlanPair>,
}

impl ComplexGrid {
    /// Allocate zero-filled local storage for an already-computed partition.
    pub fn allocate(shape: GridShape, part: Partition) -> Self {
        ComplexGrid {
            shape,
            part,
            data: vec![Complex::new(0.0, 0.0); part.local_npix],
            plans: None,
        }
    }

    /// Allocate this worker's share of a grid of the given shape.
    pub fn zeroed<C: Comm>(shape: GridShape, comm: &C) -> Result<Self, GridError> {
        let part = Partition::new(&shape, comm.size(), comm.rank())?;
        Ok(Self::allocate(shape, part))
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    pub fn partition(&self) -> &Partition {
        &self.part
    }

    pub fn npix(&self) -> usize {
        self.shape.npix()
    }

    /// This worker's local slice of the flattened grid.
    pub fn local(&self) -> &[Complex] {
        &self.data
    }

    pub fn local_mut(&mut self) -> &mut [Complex] {
        &mut self.data
    }

    /// Whether a plan pair is currently live on this descriptor.
    pub fn has_plan(&self) -> bool {
        self.plans.is_some()
    }
}
