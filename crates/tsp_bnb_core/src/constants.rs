/// Node every tour starts and ends at.
pub(crate) const ROOT: usize = 0;

/// Smallest graph that admits a tour.
pub(crate) const MIN_TOUR_NODES: usize = 2;

/// Relative tolerance used when checking a tour's cost against its edge sum.
pub(crate) const COST_TOLERANCE: f64 = 1e-9;

pub(crate) const DEFAULT_SEED: u64 = 999;
