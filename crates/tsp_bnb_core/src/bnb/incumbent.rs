use std::sync::Mutex;

use crate::Tour;

/// Best tour found so far, shared by every branch of one search.
#[derive(Debug)]
pub struct Incumbent {
    best: Mutex<Best>,
}

#[derive(Debug)]
struct Best {
    cost: f64,
    tour: Option<Tour>,
}

impl Incumbent {
    pub fn new() -> Self {
        Self::with_upper_bound(f64::INFINITY)
    }

    /// Only tours strictly cheaper than `upper_bound` are accepted.
    pub fn with_upper_bound(upper_bound: f64) -> Self {
        Self {
            best: Mutex::new(Best {
                cost: upper_bound,
                tour: None,
            }),
        }
    }

    /// Current cost to beat; `+inf` until a tour or bound is known.
    pub fn cost(&self) -> f64 {
        match self.best.lock() {
            Ok(best) => best.cost,
            Err(poisoned) => poisoned.into_inner().cost,
        }
    }

    /// Replaces the incumbent when `cost` is strictly lower. Returns whether it did.
    pub fn offer(&self, path: Vec<usize>, cost: f64) -> bool {
        let mut best = match self.best.lock() {
            Ok(best) => best,
            Err(poisoned) => poisoned.into_inner(),
        };
        if cost < best.cost {
            best.cost = cost;
            best.tour = Some(Tour::new(path, cost));
            true
        } else {
            false
        }
    }

    pub fn into_tour(self) -> Option<Tour> {
        match self.best.into_inner() {
            Ok(best) => best.tour,
            Err(poisoned) => poisoned.into_inner().tour,
        }
    }
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Incumbent;

    #[test]
    fn starts_empty_at_infinity() {
        let incumbent = Incumbent::new();
        assert_eq!(incumbent.cost(), f64::INFINITY);
        assert!(incumbent.into_tour().is_none());
    }

    #[test]
    fn offer_accepts_only_strict_improvements() {
        let incumbent = Incumbent::new();
        assert!(incumbent.offer(vec![0, 1, 2, 0], 10.0));
        assert!(!incumbent.offer(vec![0, 2, 1, 0], 10.0));
        assert!(!incumbent.offer(vec![0, 2, 1, 0], 11.0));
        assert!(incumbent.offer(vec![0, 2, 1, 0], 9.0));

        let tour = incumbent.into_tour().expect("tour");
        assert_eq!(tour.path, vec![0, 2, 1, 0]);
        assert_eq!(tour.cost, 9.0);
    }

    #[test]
    fn upper_bound_rejects_tours_that_do_not_beat_it() {
        let incumbent = Incumbent::with_upper_bound(5.0);
        assert_eq!(incumbent.cost(), 5.0);
        assert!(!incumbent.offer(vec![0, 1, 0], 5.0));
        assert!(incumbent.into_tour().is_none());
    }

    #[test]
    fn concurrent_offers_keep_the_minimum() {
        let incumbent = Incumbent::new();
        std::thread::scope(|s| {
            for cost in [7.0, 3.0, 9.0, 4.0, 3.5] {
                let incumbent = &incumbent;
                s.spawn(move || incumbent.offer(vec![0, 1, 0], cost));
            }
        });
        assert_eq!(incumbent.cost(), 3.0);
    }
}
