//! Test stand-in communicator: simulates P cooperating workers with one
//! thread per rank, so the collective contracts can be exercised without
//! an MPI launcher.

use std::sync::{Arc, Barrier, Mutex};

use gridfft::{Comm, Complex, Real};

pub struct ThreadComm {
    rank: usize,
    size: usize,
    shared: Arc<Shared>,
}

struct Shared {
    barrier: Barrier,
    reals: Mutex<Vec<Real>>,
    slabs: Mutex<Vec<Vec<Complex>>>,
}

impl ThreadComm {
    /// One communicator per rank, all bound to the same rendezvous.
    pub fn group(size: usize) -> Vec<ThreadComm> {
        let shared = Arc::new(Shared {
            barrier: Barrier::new(size),
            reals: Mutex::new(vec![0.0; size]),
            slabs: Mutex::new(vec![Vec::new(); size]),
        });
        (0..size)
            .map(|rank| ThreadComm { rank, size, shared: Arc::clone(&shared) })
            .collect()
    }
}

// Each exchange is bracketed by two waits: the first publishes every
// rank's contribution, the second keeps a fast rank from starting the
// next exchange before slow ranks have read this one.
impl Comm for ThreadComm {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.size
    }
    fn barrier(&self) {
        self.shared.barrier.wait();
    }
    fn all_reduce_sum(&self, x: Real) -> Real {
        self.shared.reals.lock().unwrap()[self.rank] = x;
        self.shared.barrier.wait();
        let total = self.shared.reals.lock().unwrap().iter().sum();
        self.shared.barrier.wait();
        total
    }
    fn all_gather(&self, x: Real, out: &mut Vec<Real>) {
        self.shared.reals.lock().unwrap()[self.rank] = x;
        self.shared.barrier.wait();
        out.clear();
        out.extend_from_slice(&self.shared.reals.lock().unwrap());
        self.shared.barrier.wait();
    }
    fn all_gather_complex(&self, local: &[Complex], out: &mut Vec<Complex>) {
        self.shared.slabs.lock().unwrap()[self.rank] = local.to_vec();
        self.shared.barrier.wait();
        out.clear();
        for slab in self.shared.slabs.lock().unwrap().iter() {
            out.extend_from_slice(slab);
        }
        self.shared.barrier.wait();
    }
}

/// Run `body(rank, comm)` on one thread per rank and collect the results
/// in rank order.
pub fn run_workers<T, F>(size: usize, body: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &ThreadComm) -> T + Sync,
{
    let comms = ThreadComm::group(size);
    let mut results: Vec<Option<T>> = Vec::new();
    results.resize_with(size, || None);
    std::thread::scope(|scope| {
        for (slot, comm) in results.iter_mut().zip(&comms) {
            let body = &body;
            scope.spawn(move || {
                *slot = Some(body(comm.rank(), comm));
            });
        }
    });
    results.into_iter().map(|r| r.unwrap()).collect()
}
