//! Grid descriptors: shape, partition, and the per-element-kind storage.

pub mod byte;
pub mod complex;
pub mod real;
pub mod shape;

pub use byte::ByteGrid;
pub use complex::ComplexGrid;
pub use real::RealGrid;
pub use shape::{GridShape, Partition, SplitAxis, MAX_NPIX};
