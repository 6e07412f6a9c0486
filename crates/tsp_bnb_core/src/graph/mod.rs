pub mod generate;

use crate::{Error, Result, constants::MIN_TOUR_NODES};

/// Undirected weighted graph over nodes `0..n`, stored as a dense symmetric matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedGraph {
    n: usize,
    weights: Vec<Option<f64>>,
}

impl WeightedGraph {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            weights: vec![None; n * n],
        }
    }

    /// Complete graph with `weight(u, v)` for every `u < v`.
    pub fn from_fn(n: usize, mut weight: impl FnMut(usize, usize) -> f64) -> Result<Self> {
        let mut graph = Self::new(n);
        for u in 0..n {
            for v in (u + 1)..n {
                graph.add_edge(u, v, weight(u, v))?;
            }
        }
        Ok(graph)
    }

    /// Builds a graph from `(u, v, weight)` triples; `n` is the largest id plus one.
    ///
    /// `m` edges touch at most `2m` nodes, so a larger id would leave isolated
    /// nodes and is rejected before the matrix is allocated.
    pub fn from_edges(edges: impl IntoIterator<Item = (usize, usize, f64)>) -> Result<Self> {
        let edges: Vec<_> = edges.into_iter().collect();
        let max_nodes = edges.len().saturating_mul(2);
        let mut n = 0;
        for &(u, v, _) in &edges {
            let id = u.max(v);
            let needed = id
                .checked_add(1)
                .filter(|&needed| needed <= max_nodes)
                .ok_or_else(|| {
                    Error::invalid_graph(format!(
                        "node id {id} is out of range; {} edges cover at most {max_nodes} nodes",
                        edges.len()
                    ))
                })?;
            n = n.max(needed);
        }
        let mut graph = Self::new(n);
        for (u, v, w) in edges {
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    /// Sets the weight of the undirected edge `{u, v}`, replacing any previous one.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> Result<()> {
        if u >= self.n || v >= self.n {
            return Err(Error::invalid_graph(format!(
                "edge ({u}, {v}) references a node outside 0..{}",
                self.n
            )));
        }
        if u == v {
            return Err(Error::invalid_graph(format!("self-loop on node {u}")));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::invalid_graph(format!(
                "edge ({u}, {v}) has weight {weight}; weights must be finite and non-negative"
            )));
        }

        self.weights[u * self.n + v] = Some(weight);
        self.weights[v * self.n + u] = Some(weight);
        Ok(())
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        if u >= self.n || v >= self.n {
            return None;
        }
        self.weights[u * self.n + v]
    }

    /// Every edge once, as `(u, v, weight)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n).flat_map(move |u| {
            ((u + 1)..self.n).filter_map(move |v| self.weight(u, v).map(|w| (u, v, w)))
        })
    }

    pub fn degree(&self, u: usize) -> usize {
        (0..self.n).filter(|&v| self.weight(u, v).is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        (0..self.n).all(|u| self.degree(u) + 1 == self.n)
    }

    /// Rejects graphs on which no tour can exist.
    pub fn validate(&self) -> Result<()> {
        if self.n < MIN_TOUR_NODES {
            return Err(Error::invalid_graph(format!(
                "need at least {MIN_TOUR_NODES} nodes for a tour, got {}",
                self.n
            )));
        }

        let required_degree = if self.n == MIN_TOUR_NODES { 1 } else { 2 };
        if let Some(u) = (0..self.n).find(|&u| self.degree(u) < required_degree) {
            return Err(Error::invalid_graph(format!(
                "node {u} has degree {} (< {required_degree}); no tour can visit it",
                self.degree(u)
            )));
        }

        Ok(())
    }

    /// Literal sum of edge weights along `path`.
    pub fn tour_cost(&self, path: &[usize]) -> Result<f64> {
        path.windows(2).try_fold(0.0, |acc, pair| {
            self.weight(pair[0], pair[1])
                .map(|w| acc + w)
                .ok_or_else(|| {
                    Error::invalid_input(format!("no edge between {} and {}", pair[0], pair[1]))
                })
        })
    }
}
