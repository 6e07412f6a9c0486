use std::fmt;

use crate::{Error, Result, WeightedGraph, constants::COST_TOLERANCE};

/// Closed tour: `path` starts and ends at the root, `cost` is its edge sum.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    pub path: Vec<usize>,
    pub cost: f64,
}

impl Tour {
    pub fn new(path: Vec<usize>, cost: f64) -> Self {
        Self { path, cost }
    }

    pub fn is_closed(&self) -> bool {
        self.path.len() > 1 && self.path.first() == self.path.last()
    }

    /// Every node of `0..n` appears exactly once between the endpoints.
    pub fn visits_all(&self, n: usize) -> bool {
        if self.path.len() != n + 1 {
            return false;
        }
        let mut seen = vec![false; n];
        for &node in &self.path[..n] {
            if node >= n || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }

    /// Checks shape and that `cost` matches the literal edge sum on `graph`.
    pub fn verify(&self, graph: &WeightedGraph) -> Result<()> {
        if !self.is_closed() {
            return Err(Error::invalid_data(format!(
                "tour is not closed: {self}"
            )));
        }
        if !self.visits_all(graph.n()) {
            return Err(Error::invalid_data(format!(
                "tour does not visit all {} nodes exactly once: {self}",
                graph.n()
            )));
        }

        let actual = graph.tour_cost(&self.path)?;
        let tolerance = COST_TOLERANCE * actual.abs().max(1.0);
        if (actual - self.cost).abs() > tolerance {
            return Err(Error::invalid_data(format!(
                "tour cost {} does not match edge sum {actual}",
                self.cost
            )));
        }
        Ok(())
    }

    pub fn metrics(&self, graph: &WeightedGraph) -> TourMetrics {
        let edges: Vec<f64> = self
            .path
            .windows(2)
            .filter_map(|pair| graph.weight(pair[0], pair[1]))
            .collect();

        if edges.is_empty() {
            log::info!("metrics: empty tour so there's nothing to report");
            return TourMetrics::default();
        }

        let total: f64 = edges.iter().sum();
        let longest = edges.iter().copied().fold(0.0_f64, f64::max);
        let shortest = edges.iter().copied().fold(f64::INFINITY, f64::min);
        let average = total / edges.len() as f64;

        log::info!(
            "metrics: n={} total={total:.4} longest={longest:.4} shortest={shortest:.4} avg={average:.4}",
            edges.len()
        );

        TourMetrics {
            total,
            longest,
            shortest,
            average,
        }
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<String> = self.path.iter().map(usize::to_string).collect();
        let mut buf = ryu::Buffer::new();
        write!(f, "{} (cost={})", nodes.join(" -> "), buf.format(self.cost))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub shortest: f64,
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use super::Tour;
    use crate::WeightedGraph;

    fn triangle() -> WeightedGraph {
        WeightedGraph::from_edges([(0, 1, 1.0), (1, 2, 2.0), (2, 0, 3.0)]).expect("graph")
    }

    #[test]
    fn verify_accepts_a_correct_tour() {
        let tour = Tour::new(vec![0, 1, 2, 0], 6.0);
        tour.verify(&triangle()).expect("valid tour");
    }

    #[test]
    fn verify_rejects_wrong_cost() {
        let tour = Tour::new(vec![0, 1, 2, 0], 5.0);
        let err = tour.verify(&triangle()).expect_err("cost mismatch");
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn verify_rejects_open_and_repeating_paths() {
        assert!(Tour::new(vec![0, 1, 2], 3.0).verify(&triangle()).is_err());
        assert!(Tour::new(vec![0, 1, 1, 0], 2.0).verify(&triangle()).is_err());
    }

    #[test]
    fn visits_all_checks_each_node_once() {
        assert!(Tour::new(vec![0, 2, 1, 0], 0.0).visits_all(3));
        assert!(!Tour::new(vec![0, 2, 2, 0], 0.0).visits_all(3));
        assert!(!Tour::new(vec![0, 1, 0], 0.0).visits_all(3));
    }

    #[test]
    fn display_lists_the_path_and_cost() {
        let tour = Tour::new(vec![0, 1, 2, 0], 6.0);
        assert_eq!(tour.to_string(), "0 -> 1 -> 2 -> 0 (cost=6.0)");
    }

    #[test]
    fn metrics_summarize_edges() {
        let metrics = Tour::new(vec![0, 1, 2, 0], 6.0).metrics(&triangle());
        assert_eq!(metrics.total, 6.0);
        assert_eq!(metrics.longest, 3.0);
        assert_eq!(metrics.shortest, 1.0);
        assert_eq!(metrics.average, 2.0);
    }
}
