use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use tsp_bnb_derive::KvDisplay;

/// Counters updated from every branch of a running search.
#[derive(Debug, Default)]
pub(crate) struct SearchStats {
    nodes_expanded: AtomicUsize,
    branches_pruned: AtomicUsize,
    tours_completed: AtomicUsize,
    incumbent_updates: AtomicUsize,
    max_depth: AtomicUsize,
    cancelled: AtomicBool,
}

impl SearchStats {
    pub(crate) fn expanded(&self, depth: usize) {
        self.nodes_expanded.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    pub(crate) fn pruned(&self) {
        self.branches_pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn tour_completed(&self) {
        self.tours_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn incumbent_updated(&self) {
        self.incumbent_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn mark_cancelled(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub(crate) fn report(&self, elapsed: Duration) -> SearchReport {
        SearchReport {
            nodes_expanded: self.nodes_expanded.load(Ordering::Relaxed),
            branches_pruned: self.branches_pruned.load(Ordering::Relaxed),
            tours_completed: self.tours_completed.load(Ordering::Relaxed),
            incumbent_updates: self.incumbent_updates.load(Ordering::Relaxed),
            max_depth: self.max_depth.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            elapsed,
        }
    }
}

/// Snapshot of a finished search.
#[derive(Clone, Debug, Default, PartialEq, KvDisplay)]
pub struct SearchReport {
    pub nodes_expanded: usize,
    pub branches_pruned: usize,
    pub tours_completed: usize,
    pub incumbent_updates: usize,
    pub max_depth: usize,
    pub cancelled: bool,
    #[kv(fmt = "debug")]
    pub elapsed: Duration,
}
