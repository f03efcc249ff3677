// Single-process communication: the degenerate group of one worker.

use crate::{Complex, Real};

/// Stand-in communicator for runs without a process group. Every collective
/// is the identity, so the engines behave exactly as a P=1 MPI run would.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialComm;

impl SerialComm {
    pub fn new() -> Self {
        SerialComm
    }
}

impl super::Comm for SerialComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn barrier(&self) {}
    fn all_reduce_sum(&self, x: Real) -> Real {
        x
    }
    fn all_gather(&self, x: Real, out: &mut Vec<Real>) {
        out.clear();
        out.push(x);
    }
    fn all_gather_complex(&self, local: &[Complex], out: &mut Vec<Complex>) {
        out.clear();
        out.extend_from_slice(local);
    }
}
