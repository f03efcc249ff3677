//! gridfft: distributed grids and transforms for diffractive imaging
//!
//! This crate provides real-, complex-, and byte-valued 3-D grids whose
//! ownership is split contiguously across P cooperating workers, together
//! with elementwise arithmetic, global reductions, and a plan-based
//! forward/inverse Fourier transform with energy-preserving normalization.
//!
//! Every engine entry point is a collective: all workers must call it
//! together, in the same order, with matching arguments, and each returns
//! holding a consistent result on every worker.

pub mod parallel;

pub mod config;
pub mod error;
pub mod fft;
pub mod grid;
pub mod ops;
pub mod reduce;

// Re-exports for convenience
pub use config::*;
pub use error::*;
pub use grid::*;
pub use parallel::Comm;

/// Element precision is fixed at compile time, identically across all
/// cooperating processes in a run.
#[cfg(feature = "single")]
pub type Real = f32;
#[cfg(not(feature = "single"))]
pub type Real = f64;

/// Complex grid element: two `Real`s, stored interleaved.
pub type Complex = num_complex::Complex<Real>;
