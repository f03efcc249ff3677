//! Real-valued grid descriptor.

use tracing::debug;

use crate::config::WorkerRole;
use crate::error::GridError;
use crate::grid::shape::{GridShape, Partition};
use crate::parallel::Comm;
use crate::Real;

/// A distributed grid of real scalars. Each worker owns the contiguous
/// slice of the flattened grid described by its partition.
#[derive(Debug, Clone)]
pub struct RealGrid {
    shape: GridShape,
    part: Partition,
    data: Vec<Real>,
}

impl RealGrid {
    /// Allocate zero-filled local storage for an already-computed partition.
    /// The read path of the persistence layer uses this to size a descriptor
    /// from file metadata before handing it to the engines.
    pub fn allocate(shape: GridShape, part: Partition) -> Self {
        RealGrid { shape, part, data: vec![0.0; part.local_npix] }
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
    pub fn local(&self) -> &[Real] {
        &self.data
    }

    pub fn local_mut(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Transfer shape, partition, and backing storage from `src` into
    /// `self`. Taking `src` by value makes the hand-off exclusive: the two
    /// descriptors never alias one allocation and the old storage is freed
    /// exactly once.
    pub fn reassign(&mut self, src: RealGrid) {
        *self = src;
    }

    /// Coordinator-only: recentre and truncate a 2-D grid to a square
    /// window about the given offsets, via `reassign`. No-op when the grid
    /// is already square and centered, and on every non-coordinator worker.
    pub fn crop_2d(&mut self, xoffset: i32, yoffset: i32, role: WorkerRole) -> Result<(), GridError> {
        if !role.is_coordinator() {
            return Ok(());
        }
        if self.shape.nz != 1 {
            return Err(GridError::Unsupported("crop requires a 2-D grid"));
        }
        if self.part.local_npix != self.shape.npix() {
            return Err(GridError::Unsupported(
                "crop requires the coordinator to hold the whole grid",
            ));
        }
        let (nx, ny) = (self.shape.nx as i64, self.shape.ny as i64);
        let (xoffset, yoffset) = (xoffset as i64, yoffset as i64);
        if xoffset == 0 && yoffset == 0 && nx == ny {
            return Ok(());
        }

        let new_nx = nx - 2 * xoffset.abs();
        let new_ny = ny - 2 * yoffset.abs();
        let new_xcenter = nx / 2 - xoffset;
        let new_ycenter = ny / 2 - yoffset;
        let new_dim = new_nx.min(new_ny);
        let xstart = new_xcenter - new_dim / 2;
        let ystart = new_ycenter - new_dim / 2;
        if new_dim < 1 || xstart < 0 || ystart < 0 || xstart + new_dim > nx || ystart + new_dim > ny {
            return Err(GridError::Unsupported("crop window exceeds the grid"));
        }
        debug!(new_dim, xstart, ystart, "cropping 2-D grid to square window");

        let shape = GridShape::new(new_dim as usize, new_dim as usize, 1)?;
        let mut temp = RealGrid::allocate(shape, Partition::whole(&shape));
        let new_dim = new_dim as usize;
        for iy in 0..new_dim {
            let src_row = (xstart as usize) + (self.shape.nx) * (ystart as usize + iy);
            let dst_row = new_dim * iy;
            temp.data[dst_row..dst_row + new_dim]
                .copy_from_slice(&self.data[src_row..src_row + new_dim]);
        }
        self.reassign(temp);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(shape: GridShape) -> RealGrid {
        let mut g = RealGrid::allocate(shape, Partition::whole(&shape));
        for (i, v) in g.local_mut().iter_mut().enumerate() {
            *v = i as Real;
        }
        g
    }

    #[test]
    fn crop_is_noop_when_square_and_centered() {
        let mut g = ramp(GridShape::new(4, 4, 1).unwrap());
        let before = g.local().to_vec();
        g.crop_2d(0, 0, WorkerRole::Coordinator).unwrap();
        assert_eq!(g.local(), &before[..]);
    }

    #[test]
    fn crop_truncates_rectangle_to_square() {
        // 6x4 ramp cropped with no offset: window is 4x4 centered at (3, 2),
        // columns 1..5 of every row survive.
        let mut g = ramp(GridShape::new(6, 4, 1).unwrap());
        g.crop_2d(0, 0, WorkerRole::Coordinator).unwrap();
        assert_eq!(*g.shape(), GridShape::new(4, 4, 1).unwrap());
        assert_eq!(g.local()[0], 1.0);
        assert_eq!(g.local()[4], 7.0);
        assert_eq!(g.local()[15], 22.0);
    }

    #[test]
    fn crop_skips_non_coordinators() {
        let mut g = ramp(GridShape::new(6, 4, 1).unwrap());
        let before = g.local().to_vec();
        g.crop_2d(0, 0, WorkerRole::Member).unwrap();
        assert_eq!(g.local(), &before[..]);
    }

    #[test]
    fn oversized_offset_is_rejected() {
        let mut g = ramp(GridShape::new(4, 4, 1).unwrap());
        assert!(g.crop_2d(3, 0, WorkerRole::Coordinator).is_err());
    }
}
