//! Byte-mask grid descriptor.

use crate::error::GridError;
use crate::grid::shape::{GridShape, Partition};
use crate::parallel::Comm;

/// A distributed grid of unsigned bytes, used as selection masks for the
/// arithmetic and reduction engines (1 selects an element, 0 excludes it).
#[derive(Debug, Clone)]
pub struct ByteGrid {
    shape: GridShape,
    part: Partition,
    data: Vec<u8>,
}

impl ByteGrid {
    /// Allocate zero-filled local storage for an already-computed partition.
    pub fn allocate(shape: GridShape, part: Partition) -> Self {
        ByteGrid { shape, part, data: vec![0; part.local_npix] }
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

    pub fn local(&self) -> &[u8] {
        &self.data
    }

    pub fn local_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
