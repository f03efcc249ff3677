//! Collective communication between the P cooperating workers.
//!
//! Every grid operation in this crate is a collective: all workers call it
//! together and each returns holding the same result. The `Comm` trait
//! carries the three collectives the engines need — a barrier rendezvous,
//! a sum-reduce followed by broadcast, and an all-gather — so the numeric
//! code never talks to MPI directly.

use crate::{Complex, Real};

pub trait Comm {
    /// Rank of this worker within the group.
    fn rank(&self) -> usize;
    /// Total number of workers in the group.
    fn size(&self) -> usize;
    /// Rendezvous: blocks until every worker has arrived.
    fn barrier(&self);
    /// Sum `x` over all workers; every worker receives the identical total.
    fn all_reduce_sum(&self, x: Real) -> Real;
    /// Gather one scalar per worker into `out`, ordered by rank, on every
    /// worker.
    fn all_gather(&self, x: Real, out: &mut Vec<Real>);
    /// Concatenate each worker's local slab into `out`, ordered by rank,
    /// on every worker. Slabs must have equal length on all workers.
    fn all_gather_complex(&self, local: &[Complex], out: &mut Vec<Complex>);
}

#[cfg(feature = "mpi")]
pub mod mpi_comm;
#[cfg(feature = "mpi")]
pub use mpi_comm::MpiComm;

pub mod serial_comm;
pub use serial_comm::SerialComm;

pub enum UniverseComm {
    #[cfg(feature = "mpi")]
    Mpi(MpiComm),
    Serial(SerialComm),
}

impl Comm for UniverseComm {
    fn rank(&self) -> usize {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.rank(),
            UniverseComm::Serial(comm) => comm.rank(),
        }
    }
    fn size(&self) -> usize {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.size(),
            UniverseComm::Serial(comm) => comm.size(),
        }
    }
    fn barrier(&self) {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.barrier(),
            UniverseComm::Serial(comm) => comm.barrier(),
        }
    }
    fn all_reduce_sum(&self, x: Real) -> Real {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.all_reduce_sum(x),
            UniverseComm::Serial(comm) => comm.all_reduce_sum(x),
        }
    }
    fn all_gather(&self, x: Real, out: &mut Vec<Real>) {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.all_gather(x, out),
            UniverseComm::Serial(comm) => comm.all_gather(x, out),
        }
    }
    fn all_gather_complex(&self, local: &[Complex], out: &mut Vec<Complex>) {
        match self {
            #[cfg(feature = "mpi")]
            UniverseComm::Mpi(comm) => comm.all_gather_complex(local, out),
            UniverseComm::Serial(comm) => comm.all_gather_complex(local, out),
        }
    }
}
