//! Exact TSP solving on weighted graphs with reduced-cost-matrix branch and bound.
//! Includes edge-list I/O, random graph generation and an optional parallel root split.

pub mod bnb;
mod constants;
mod error;
pub mod graph;
mod io;
pub mod logging;
mod tour;

pub(crate) use io::options;

pub use bnb::SearchReport;
pub use bnb::solver::{BranchAndBoundSolver, SearchMode, SearchOptions, solve, solve_with};
pub use error::{Error, Result};
pub use graph::{WeightedGraph, generate::random_euclidean};
pub use io::edge_list::{format_edge_list, parse_edge_list, read_edge_list, write_edge_list};
pub use io::input::{GraphSource, load_graph};
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use tour::{Tour, TourMetrics};

#[cfg(test)]
mod tests {
    use super::{Error, SearchMode, SearchOptions, parse_edge_list, solve, solve_with};

    const FOUR_CITY: &str = "\
0 1 10
0 2 15
0 3 20
1 2 35
1 3 25
2 3 30
";

    #[test]
    fn edge_list_to_verified_optimal_tour() {
        let graph = parse_edge_list(FOUR_CITY).expect("parse");
        let tour = solve(&graph).expect("solve");

        assert_eq!(tour.cost, 80.0);
        assert_eq!(tour.path.first(), Some(&0));
        assert_eq!(tour.path.last(), Some(&0));
        tour.verify(&graph).expect("cost equals the edge sum");
    }

    #[test]
    fn parallel_search_agrees_on_the_example() {
        let graph = parse_edge_list(FOUR_CITY).expect("parse");
        let options = SearchOptions {
            mode: SearchMode::Parallel,
            ..SearchOptions::default()
        };
        let (tour, report) = solve_with(&graph, &options).expect("solve");
        assert_eq!(tour.cost, 80.0);
        assert!(!report.cancelled);
    }

    #[test]
    fn single_node_edge_list_is_rejected() {
        let err = parse_edge_list("0 0 1").expect_err("self-loop only");
        assert!(matches!(err, Error::InvalidGraph(_)));
    }
}
