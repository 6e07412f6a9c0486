use std::{cmp::Ordering, fmt};

/// Entry of a cost matrix: a finite non-negative weight or a forbidden edge.
///
/// Forbidden edges are a dedicated variant rather than `f64::INFINITY` so that
/// reductions can never turn the sentinel into a number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cost {
    Finite(f64),
    Infinite,
}

impl Cost {
    pub const INFINITE: Self = Self::Infinite;
    pub const ZERO: Self = Self::Finite(0.0);

    pub fn finite(value: f64) -> Self {
        Self::Finite(value)
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    pub fn is_finite(self) -> bool {
        !self.is_infinite()
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(v),
            Self::Infinite => None,
        }
    }

    /// Subtracts a finite amount. Forbidden entries stay forbidden.
    pub fn reduced_by(self, amount: f64) -> Self {
        match self {
            Self::Finite(v) => Self::Finite(v - amount),
            Self::Infinite => Self::Infinite,
        }
    }

    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => a.total_cmp(b),
            (Self::Finite(_), Self::Infinite) => Ordering::Less,
            (Self::Infinite, Self::Finite(_)) => Ordering::Greater,
            (Self::Infinite, Self::Infinite) => Ordering::Equal,
        }
    }
}

impl std::ops::Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a + b),
            _ => Self::Infinite,
        }
    }
}

impl From<Option<f64>> for Cost {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Infinite, Self::Finite)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => {
                let mut buf = ryu::Buffer::new();
                f.write_str(buf.format(*v))
            }
            Self::Infinite => f.write_str("inf"),
        }
    }
}
