//! Elementwise arithmetic engine: local-partition operators, the magnitude
//! replacement step, and the Gaussian kernel loader.

pub mod elementwise;
pub mod gaussian;
pub mod magnitude;

pub use elementwise::*;
pub use gaussian::{load_gaussian, Centering};
pub use magnitude::transfer_magnitudes;
