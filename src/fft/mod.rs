//! Fourier transform engine: plan lifecycle and execution.
//!
//! Each complex grid may carry one live forward/inverse plan pair:
//! absent → (create) → ready → (execute forward | inverse)* → ready →
//! (destroy) → absent. Creation dispatches on the grid's dimensionality
//! and on one of two interchangeable backends fixed by configuration for
//! the whole run: a single-process backend planning over the full grid,
//! and a slab-distributed backend that understands the partition scheme.
//!
//! After each executed direction every element is scaled by
//! 1/√(nx·ny·nz), so a forward-then-inverse pass composes to exactly 1/N
//! and recovers the input to floating-point precision. No centering shift
//! is performed: real space is pixel-centered at (nx/2, ny/2, nz/2),
//! transform space is zero-centered at index 0.

use bitflags::bitflags;
use tracing::debug;

use crate::config::FftConfig;
use crate::error::GridError;
use crate::grid::ComplexGrid;
use crate::parallel::Comm;
use crate::Real;

pub mod dist;
pub mod local;

pub use dist::DistPlanPair;
pub use local::LocalPlanPair;

bitflags! {
    /// Transform directions to execute; both may be requested in one call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FftOps: u32 {
        const FORWARD = 1 << 0;
        const INVERSE = 1 << 1;
    }
}

/// Transform direction, as seen by the backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

/// Planning-effort hint, ordered from fastest-to-plan/slowest-to-execute
/// to slowest-to-plan/fastest-to-execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanEffort {
    Estimate,
    Measure,
    #[default]
    Patient,
}

/// Which backend plans are built on. Fixed at configuration time; the two
/// are never mixed within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftBackendKind {
    /// Single-process transform over the worker's full grid.
    Local,
    /// Slab-distributed transform matching the partition scheme.
    Dist,
}

/// A live forward/inverse plan pair, dispatching to whichever backend
/// created it.
pub enum PlanPair {
    Local(LocalPlanPair),
    Dist(DistPlanPair),
}

/// Build a forward/inverse plan pair for `grid` and attach it to the
/// descriptor. Dispatches 1-D/2-D/3-D on the grid's shape. Creating over
/// an existing pair releases the old one first.
pub fn create_plan<C: Comm>(
    grid: &mut ComplexGrid,
    cfg: &FftConfig,
    comm: &C,
) -> Result<(), GridError> {
    let shape = *grid.shape();
    let part = *grid.partition();
    if grid.plans.take().is_some() {
        debug!("replacing live FFT plan pair");
    }
    debug!(?cfg.backend, ?cfg.effort, nx = shape.nx, ny = shape.ny, nz = shape.nz, "creating FFT plan");
    let pair = match cfg.backend {
        FftBackendKind::Local => {
            PlanPair::Local(LocalPlanPair::create(shape, cfg.effort, comm.size())?)
        }
        FftBackendKind::Dist => PlanPair::Dist(DistPlanPair::create(shape, part, cfg.effort)?),
    };
    grid.plans = Some(pair);
    comm.barrier();
    Ok(())
}

/// Execute the requested direction(s) in place over `grid`'s storage,
/// renormalizing by 1/√(nx·ny·nz) after each. Requires a live plan pair.
pub fn execute<C: Comm>(grid: &mut ComplexGrid, ops: FftOps, comm: &C) -> Result<(), GridError> {
    let mut pair = grid.plans.take().ok_or(GridError::PlanMissing)?;
    let norm_factor =
        1.0 / ((grid.shape().nx as Real) * (grid.shape().ny as Real) * (grid.shape().nz as Real))
            .sqrt();

    for direction in [Direction::Forward, Direction::Inverse] {
        let wanted = match direction {
            Direction::Forward => FftOps::FORWARD,
            Direction::Inverse => FftOps::INVERSE,
        };
        if !ops.contains(wanted) {
            continue;
        }
        match &mut pair {
            PlanPair::Local(p) => p.execute(grid.local_mut(), direction),
            PlanPair::Dist(p) => p.execute(grid.local_mut(), direction, comm),
        }
        for z in grid.local_mut() {
            *z *= norm_factor;
        }
    }

    grid.plans = Some(pair);
    comm.barrier();
    Ok(())
}

/// Release the plan pair attached to `grid`. Requires a live pair.
pub fn destroy_plan<C: Comm>(grid: &mut ComplexGrid, comm: &C) -> Result<(), GridError> {
    debug!("destroying FFT plan");
    grid.plans.take().ok_or(GridError::PlanMissing)?;
    comm.barrier();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridShape;
    use crate::parallel::SerialComm;

    #[test]
    fn lifecycle_violations_are_reported() {
        let comm = SerialComm::new();
        let shape = GridShape::new(8, 1, 1).unwrap();
        let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();
        assert!(matches!(
            execute(&mut g, FftOps::FORWARD, &comm),
            Err(GridError::PlanMissing)
        ));
        assert!(matches!(destroy_plan(&mut g, &comm), Err(GridError::PlanMissing)));

        create_plan(&mut g, &FftConfig::default(), &comm).unwrap();
        assert!(g.has_plan());
        execute(&mut g, FftOps::FORWARD | FftOps::INVERSE, &comm).unwrap();
        destroy_plan(&mut g, &comm).unwrap();
        assert!(!g.has_plan());
        assert!(destroy_plan(&mut g, &comm).is_err());
    }
}
