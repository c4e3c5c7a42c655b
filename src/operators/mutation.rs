use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;
use crate::route::Route;

/// Randomly perturbs a route in place.
pub trait MutationOperator: Debug + Send + Sync {
    /// `rate` is the per-position mutation probability.
    fn mutate(&self, route: &mut Route, rate: f64, rng: &mut RandomNumberGenerator);
}

/// Swap mutation: every position, with probability `rate`, trades places with
/// a uniformly drawn position (possibly itself).
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMutation;

impl SwapMutation {
    pub fn new() -> Self {
        Self
    }
}

impl MutationOperator for SwapMutation {
    fn mutate(&self, route: &mut Route, rate: f64, rng: &mut RandomNumberGenerator) {
        let n = route.len();
        for i in 0..n {
            if rng.chance(rate) {
                let j = rng.gen_index(n);
                route.swap(i, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteFactory;

    #[test]
    fn test_zero_rate_leaves_route_alone() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut route = RouteFactory::new(10).random_route(&mut rng);
        let before = route.clone();

        SwapMutation::new().mutate(&mut route, 0.0, &mut rng);
        assert_eq!(route, before);
    }

    #[test]
    fn test_full_rate_keeps_permutation() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut route = Route::from_indices(vec![0, 1, 2, 3], 4).unwrap();

        for _ in 0..100 {
            SwapMutation::new().mutate(&mut route, 1.0, &mut rng);
            assert!(route.validate(4).is_ok());
        }
    }

    #[test]
    fn test_full_rate_changes_route() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let original = Route::identity(20);

        let changed = (0..10).any(|_| {
            let mut route = original.clone();
            SwapMutation::new().mutate(&mut route, 1.0, &mut rng);
            route != original
        });

        assert!(changed);
    }

    #[test]
    fn test_draw_count_matches_rate() {
        // With rate 1.0 every position consumes one chance draw and one index draw
        let mut rng = RandomNumberGenerator::from_seed(4);
        let mut lookahead = rng.clone();
        let mut route = Route::identity(5);
        SwapMutation::new().mutate(&mut route, 1.0, &mut rng);

        let mut expected = Route::identity(5);
        for i in 0..5 {
            assert!(lookahead.chance(1.0));
            let j = lookahead.gen_index(5);
            expected.swap(i, j);
        }

        assert_eq!(route, expected);
    }
}
