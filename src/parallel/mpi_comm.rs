//! MPI-based communication between workers.
//!
//! Implements the `Comm` trait over the MPI world communicator for
//! distributed-memory runs. Only compiled when the `mpi` feature is
//! enabled; a serial run uses `SerialComm` instead.

use mpi::collective::SystemOperation;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

use crate::{Complex, Real};

/// MPI communicator wrapper for distributed runs.
///
/// Holds the MPI world communicator plus the cached rank and group size.
pub struct MpiComm {
    /// The MPI world communicator (all processes in the job).
    pub world: SimpleCommunicator,
    /// The rank (ID) of this process within the communicator.
    pub rank: usize,
    /// The total number of processes in the communicator.
    pub size: usize,
}

impl MpiComm {
    /// Initializes MPI and constructs a new `MpiComm` instance.
    ///
    /// # Panics
    /// Panics if MPI initialization fails.
    pub fn new() -> Self {
        let universe = mpi::initialize().unwrap();
        let world = universe.world();
        let rank = world.rank() as usize;
        let size = world.size() as usize;
        MpiComm { world, rank, size }
    }
}

impl super::Comm for MpiComm {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.size
    }
    fn barrier(&self) {
        self.world.barrier();
    }

    fn all_reduce_sum(&self, x: Real) -> Real {
        let mut y = x;
        self.world.all_reduce_into(&x, &mut y, &SystemOperation::sum());
        y
    }

    fn all_gather(&self, x: Real, out: &mut Vec<Real>) {
        let mut recv = vec![0.0 as Real; self.size];
        self.world.all_gather_into(&x, &mut recv[..]);
        *out = recv;
    }

    /// All-gather of equal-length complex slabs, rank order. The elements
    /// travel as interleaved re/im pairs since MPI has no native type for
    /// `num_complex::Complex`.
    fn all_gather_complex(&self, local: &[Complex], out: &mut Vec<Complex>) {
        let send: Vec<Real> = local.iter().flat_map(|c| [c.re, c.im]).collect();
        let mut recv = vec![0.0 as Real; send.len() * self.size];
        self.world.all_gather_into(&send[..], &mut recv[..]);
        out.clear();
        out.extend(recv.chunks_exact(2).map(|p| Complex::new(p[0], p[1])));
    }
}
