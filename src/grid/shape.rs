//! Grid shape and the contiguous per-worker partition.

use crate::error::GridError;

/// Largest element count a grid may hold. Indices stay within a 32-bit
/// unsigned count so descriptors round-trip through external metadata.
pub const MAX_NPIX: u64 = u32::MAX as u64;

/// The axis along which a grid is split across workers: the slowest-varying
/// non-unit dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitAxis {
    X,
    Y,
    Z,
}

/// Dimensions of a distributed grid. 1-D and 2-D grids set the trailing
/// dimensions to 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridShape {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::InvalidShape(nx, ny, nz));
        }
        let npix = nx as u64 * ny as u64 * nz as u64;
        if npix > MAX_NPIX {
            return Err(GridError::GridTooLarge(npix));
        }
        Ok(GridShape { nx, ny, nz })
    }

    /// Total element count nx*ny*nz.
    pub fn npix(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// The split axis: nz if the grid is 3-D, else ny if 2-D, else nx.
    pub fn split_axis(&self) -> SplitAxis {
        if self.nz > 1 {
            SplitAxis::Z
        } else if self.ny > 1 {
            SplitAxis::Y
        } else {
            SplitAxis::X
        }
    }

    /// Size of the split axis.
    pub fn split_len(&self) -> usize {
        match self.split_axis() {
            SplitAxis::X => self.nx,
            SplitAxis::Y => self.ny,
            SplitAxis::Z => self.nz,
        }
    }
}

/// The contiguous half-open slice of the flattened grid owned by one
/// worker: `local_npix` elements starting at `local_offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    pub local_npix: usize,
    pub local_offset: usize,
    pub rank: usize,
    pub size: usize,
}

impl Partition {
    /// Split `shape` into `size` equal contiguous chunks and return the
    /// chunk owned by `rank`. Fails loudly when the split axis does not
    /// divide evenly, rather than truncating.
    pub fn new(shape: &GridShape, size: usize, rank: usize) -> Result<Self, GridError> {
        debug_assert!(rank < size);
        let axis_len = shape.split_len();
        if size == 0 || axis_len % size != 0 {
            return Err(GridError::IndivisiblePartition { axis_len, workers: size });
        }
        let local_npix = shape.npix() / size;
        Ok(Partition {
            local_npix,
            local_offset: rank * local_npix,
            rank,
            size,
        })
    }

    /// A partition that owns the whole grid; used for coordinator-side
    /// temporaries and single-process runs.
    pub fn whole(shape: &GridShape) -> Self {
        Partition {
            local_npix: shape.npix(),
            local_offset: 0,
            rank: 0,
            size: 1,
        }
    }

    /// Local extent per axis: the split axis shrinks by the worker count,
    /// the others keep their global size.
    pub fn local_dims(&self, shape: &GridShape) -> (usize, usize, usize) {
        match shape.split_axis() {
            SplitAxis::X => (shape.nx / self.size, 1, 1),
            SplitAxis::Y => (shape.nx, shape.ny / self.size, 1),
            SplitAxis::Z => (shape.nx, shape.ny, shape.nz / self.size),
        }
    }
}
