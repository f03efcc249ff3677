//! Run-wide configuration: worker roles and transform backend selection.
//!
//! Rank-conditional behavior (serial file funneling, 2-D crop) is expressed
//! through an explicit `WorkerRole` handed down from configuration instead
//! of rank-equality checks scattered through the numeric code; collectives
//! themselves stay unconditional on every worker.

use crate::fft::{FftBackendKind, PlanEffort};

/// The part a worker plays in coordinator-only operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRole {
    /// The single worker that performs serial-I/O-adjacent work.
    Coordinator,
    /// Every other worker.
    Member,
}

impl WorkerRole {
    /// Conventional role assignment: rank 0 coordinates.
    pub fn from_rank(rank: usize) -> Self {
        if rank == 0 {
            WorkerRole::Coordinator
        } else {
            WorkerRole::Member
        }
    }

    pub fn is_coordinator(&self) -> bool {
        matches!(self, WorkerRole::Coordinator)
    }
}

/// Transform engine configuration, fixed for a run and identical across all
/// cooperating workers.
#[derive(Debug, Clone, Copy)]
pub struct FftConfig {
    /// Which of the two interchangeable backends plans are built on.
    pub backend: FftBackendKind,
    /// Planning-effort hint: more planning effort, faster execution.
    pub effort: PlanEffort,
}

impl Default for FftConfig {
    fn default() -> Self {
        let backend = if cfg!(feature = "dist-fft") {
            FftBackendKind::Dist
        } else {
            FftBackendKind::Local
        };
        FftConfig { backend, effort: PlanEffort::Patient }
    }
}
