use std::fmt;

use crate::{WeightedGraph, bnb::cost::Cost};

/// Dense N×N matrix of edge costs, row = from, column = to.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    n: usize,
    cells: Vec<Cost>,
}

impl CostMatrix {
    /// Every entry forbidden.
    pub fn infinite(n: usize) -> Self {
        Self {
            n,
            cells: vec![Cost::INFINITE; n * n],
        }
    }

    /// Diagonal and missing edges are forbidden.
    pub fn from_graph(graph: &WeightedGraph) -> Self {
        let n = graph.n();
        let mut matrix = Self::infinite(n);
        for (u, v, w) in graph.edges() {
            matrix.set(u, v, Cost::finite(w));
            matrix.set(v, u, Cost::finite(w));
        }
        matrix
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> Cost {
        self.cells[row * self.n + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cost: Cost) {
        self.cells[row * self.n + col] = cost;
    }

    pub fn forbid(&mut self, row: usize, col: usize) {
        self.set(row, col, Cost::INFINITE);
    }

    pub fn forbid_row(&mut self, row: usize) {
        let start = row * self.n;
        self.cells[start..start + self.n].fill(Cost::INFINITE);
    }

    pub fn forbid_col(&mut self, col: usize) {
        for row in 0..self.n {
            self.forbid(row, col);
        }
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = Cost> + '_ {
        let start = row * self.n;
        self.cells[start..start + self.n].iter().copied()
    }

    /// Subtracts column minima, then row minima of the column-reduced matrix.
    ///
    /// Returns the total subtracted. Lines with no finite entry count as minimum 0.
    pub fn reduce(&mut self) -> f64 {
        let mut total = 0.0;

        for col in 0..self.n {
            let min = line_min((0..self.n).map(|row| self.get(row, col)));
            if min > 0.0 {
                for row in 0..self.n {
                    let reduced = self.get(row, col).reduced_by(min);
                    self.set(row, col, reduced);
                }
            }
            total += min;
        }

        for row in 0..self.n {
            let min = line_min(self.row(row));
            if min > 0.0 {
                let start = row * self.n;
                for cell in &mut self.cells[start..start + self.n] {
                    *cell = cell.reduced_by(min);
                }
            }
            total += min;
        }

        total
    }
}

fn line_min(line: impl Iterator<Item = Cost>) -> f64 {
    line.filter_map(Cost::value)
        .min_by(f64::total_cmp)
        .unwrap_or(0.0)
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.n {
            let cells: Vec<String> = self.row(row).map(|c| c.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
