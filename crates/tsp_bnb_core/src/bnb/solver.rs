use std::time::{Duration, Instant};

use rayon::prelude::*;
use tsp_bnb_derive::CliValue;

use crate::{
    Error, Result, Tour, WeightedGraph,
    bnb::{
        cancel::Cancellation,
        incumbent::Incumbent,
        matrix::CostMatrix,
        node::{Branch, SearchNode},
        stats::{SearchReport, SearchStats},
    },
};

const BOUND_TOLERANCE: f64 = 1e-9;

const ERR_NO_CYCLE: &str = "search exhausted every branch without closing a tour";
const ERR_CANCELLED: &str = "search was cancelled before any tour was completed";
const ERR_UPPER_BOUND: &str = "no tour is strictly cheaper than the given upper bound";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "search-mode")]
pub enum SearchMode {
    #[default]
    #[cli(alias = "seq")]
    Sequential,
    #[cli(alias = "par")]
    Parallel,
}

#[derive(Clone, Debug, Default)]
pub struct SearchOptions {
    pub mode: SearchMode,
    /// Worker threads for parallel mode; 0 uses the rayon default.
    pub threads: usize,
    /// Stop after this long and keep the best tour found so far.
    pub time_limit: Option<Duration>,
    /// Cost a tour must beat to be accepted, e.g. from a heuristic run.
    pub upper_bound: Option<f64>,
    /// Let Ctrl-C stop the search like an elapsed time limit.
    pub interruptible: bool,
}

impl SearchOptions {
    fn cancellation(&self) -> Cancellation {
        if self.interruptible {
            Cancellation::interruptible(self.time_limit)
        } else {
            Cancellation::new(self.time_limit)
        }
    }
}

/// Everything the branches of one search share.
struct SearchContext {
    incumbent: Incumbent,
    cancel: Cancellation,
    stats: SearchStats,
}

pub struct BranchAndBoundSolver<'a> {
    graph: &'a WeightedGraph,
    options: SearchOptions,
}

impl<'a> BranchAndBoundSolver<'a> {
    pub fn new(graph: &'a WeightedGraph, options: SearchOptions) -> Self {
        Self { graph, options }
    }

    pub fn solve(&self) -> Result<(Tour, SearchReport)> {
        self.graph.validate()?;

        let started = Instant::now();
        let ctx = self.context();
        self.run(SearchNode::root(CostMatrix::from_graph(self.graph)), &ctx)?;
        self.finish(ctx, started.elapsed())
    }

    fn context(&self) -> SearchContext {
        SearchContext {
            incumbent: self
                .options
                .upper_bound
                .map_or_else(Incumbent::new, Incumbent::with_upper_bound),
            cancel: self.options.cancellation(),
            stats: SearchStats::default(),
        }
    }

    fn run(&self, root: SearchNode, ctx: &SearchContext) -> Result<()> {
        log::debug!(
            "solver: start n={} mode={} root_bound={:.4}",
            self.graph.n(),
            self.options.mode,
            root.bound()
        );
        log::trace!("solver: reduced root matrix\n{}", root.matrix());

        match self.options.mode {
            SearchMode::Sequential => self.search(root, ctx),
            SearchMode::Parallel => self.search_parallel(root, ctx)?,
        }
        Ok(())
    }

    /// Best tour so far, even when the search was cut short.
    fn finish(&self, ctx: SearchContext, elapsed: Duration) -> Result<(Tour, SearchReport)> {
        let report = ctx.stats.report(elapsed);
        log::info!("solver: search finished{report}");

        match ctx.incumbent.into_tour() {
            Some(tour) => Ok((tour, report)),
            None if report.cancelled => Err(Error::no_solution(ERR_CANCELLED)),
            None if self.options.upper_bound.is_some() => {
                Err(Error::no_solution(ERR_UPPER_BOUND))
            }
            None => Err(Error::no_solution(ERR_NO_CYCLE)),
        }
    }

    fn search(&self, mut node: SearchNode, ctx: &SearchContext) {
        if ctx.cancel.is_cancelled() {
            ctx.stats.mark_cancelled();
            return;
        }
        ctx.stats.expanded(node.depth());

        if node.is_complete() {
            self.complete(&node, ctx);
            return;
        }

        node.reduce_for_branching();
        for branch in node.branches() {
            self.explore(&node, &branch, ctx);
        }
    }

    /// Root branches run on the rayon pool; each subtree then recurses sequentially.
    fn search_parallel(&self, mut root: SearchNode, ctx: &SearchContext) -> Result<()> {
        if ctx.cancel.is_cancelled() {
            ctx.stats.mark_cancelled();
            return Ok(());
        }
        ctx.stats.expanded(root.depth());

        root.reduce_for_branching();
        let branches = root.branches();

        let run = || {
            branches
                .par_iter()
                .for_each(|branch| self.explore(&root, branch, ctx));
        };

        if self.options.threads == 0 {
            run();
        } else {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.threads)
                .build()
                .map_err(|e| Error::other(format!("failed to build thread pool: {e}")))?
                .install(run);
        }
        Ok(())
    }

    fn explore(&self, node: &SearchNode, branch: &Branch, ctx: &SearchContext) {
        if node.trial_bound(branch) >= ctx.incumbent.cost() {
            ctx.stats.pruned();
            return;
        }

        let child = node.child(branch);
        debug_assert!(child.bound() >= node.bound());
        self.search(child, ctx);
    }

    fn complete(&self, node: &SearchNode, ctx: &SearchContext) {
        let Some(closing) = node.closing_cost() else {
            return;
        };
        ctx.stats.tour_completed();

        let path = node.closed_path();
        let cost = match self.graph.tour_cost(&path) {
            Ok(cost) => cost,
            Err(err) => {
                log::warn!("solver: dropping tour with unreadable cost err={err}");
                return;
            }
        };
        let tolerance = BOUND_TOLERANCE * cost.max(1.0) * node.depth() as f64;
        debug_assert!(node.bound() <= cost + tolerance);
        debug_assert!((closing - cost).abs() <= tolerance);

        if ctx.incumbent.offer(path, cost) {
            ctx.stats.incumbent_updated();
            log::debug!("solver: incumbent cost={cost:.4}");
        }
    }
}

/// Optimal tour of `graph` with default search options.
pub fn solve(graph: &WeightedGraph) -> Result<Tour> {
    solve_with(graph, &SearchOptions::default()).map(|(tour, _)| tour)
}

#[tsp_bnb_derive::timer("solver")]
pub fn solve_with(graph: &WeightedGraph, options: &SearchOptions) -> Result<(Tour, SearchReport)> {
    BranchAndBoundSolver::new(graph, options.clone()).solve()
}
