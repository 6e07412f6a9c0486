use crate::{
    bnb::{cost::Cost, matrix::CostMatrix},
    constants::ROOT,
};

/// Candidate extension of a partial path, priced in the parent's reduced matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub node: usize,
    pub edge_cost: f64,
}

/// One frame of the search: its own reduced matrix, lower bound and partial path.
#[derive(Clone, Debug)]
pub struct SearchNode {
    matrix: CostMatrix,
    bound: f64,
    path: Vec<usize>,
}

impl SearchNode {
    /// Applies the initial reduction and roots the path at node 0.
    pub fn root(mut matrix: CostMatrix) -> Self {
        let bound = matrix.reduce();
        Self {
            matrix,
            bound,
            path: vec![ROOT],
        }
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_complete(&self) -> bool {
        self.path.len() == self.matrix.dim()
    }

    fn last(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    /// Forbids edges the path has used up, reduces, and folds the reduction into the bound.
    pub fn reduce_for_branching(&mut self) {
        let last = self.last();
        if self.path.len() > 1 {
            let prev = self.path[self.path.len() - 2];
            self.matrix.forbid_row(prev);
            self.matrix.forbid_col(last);
        }
        for &visited in &self.path {
            self.matrix.forbid(last, visited);
        }

        self.bound += self.matrix.reduce();
    }

    /// Open extensions from the last node, cheapest reduced edge first, ties by node index.
    pub fn branches(&self) -> Vec<Branch> {
        let mut branches: Vec<Branch> = self
            .matrix
            .row(self.last())
            .enumerate()
            .filter_map(|(node, cost)| match cost {
                Cost::Finite(edge_cost) if edge_cost >= 0.0 => Some(Branch { node, edge_cost }),
                _ => None,
            })
            .collect();

        branches.sort_by(|a, b| {
            a.edge_cost
                .total_cmp(&b.edge_cost)
                .then(a.node.cmp(&b.node))
        });
        branches
    }

    /// Lower bound of any tour continuing through `branch`.
    pub fn trial_bound(&self, branch: &Branch) -> f64 {
        self.bound + branch.edge_cost
    }

    /// Child frame owning a copy of this node's matrix.
    pub fn child(&self, branch: &Branch) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(branch.node);

        Self {
            matrix: self.matrix.clone(),
            bound: self.trial_bound(branch),
            path,
        }
    }

    /// Total tour cost when the complete path can return to the root.
    pub fn closing_cost(&self) -> Option<f64> {
        if !self.is_complete() {
            return None;
        }
        self.matrix
            .get(self.last(), ROOT)
            .value()
            .map(|edge| self.bound + edge)
    }

    /// The complete path closed back at the root.
    pub fn closed_path(&self) -> Vec<usize> {
        let mut path = self.path.clone();
        path.push(ROOT);
        path
    }
}
