//! # Routes
//!
//! A `Route` is an ordering of every city index `0..N`, each appearing exactly
//! once. Routes are owned values: the population never shares one route
//! between two slots, and the genetic operators hand back fresh routes or
//! mutate one they exclusively hold.
//!
//! `RouteFactory` creates uniformly random routes for the initial population.
//!
//! ## Example
//!
//! ```rust
//! use tsp_genalg::route::RouteFactory;
//! use tsp_genalg::rng::RandomNumberGenerator;
//!
//! let factory = RouteFactory::new(6);
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let population = factory.initial_population(4, &mut rng);
//! assert_eq!(population.len(), 4);
//! assert!(population.iter().all(|route| route.validate(6).is_ok()));
//! ```

use std::fmt;
use std::ops::Deref;

use crate::error::{Result, TspError};
use crate::rng::RandomNumberGenerator;

/// A permutation of city indices.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(Vec<usize>);

impl Route {
    /// The route visiting cities in index order.
    pub fn identity(num_cities: usize) -> Self {
        Self((0..num_cities).collect())
    }

    /// Wraps caller supplied indices, checking they form a permutation of `0..num_cities`.
    pub fn from_indices(indices: Vec<usize>, num_cities: usize) -> Result<Self> {
        let route = Self(indices);
        route.validate(num_cities)?;
        Ok(route)
    }

    /// Wraps indices produced by an operator. Callers validate the result.
    pub(crate) fn from_raw(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Exchanges the cities at positions `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    /// Checks that the route is a permutation of `0..num_cities`.
    ///
    /// # Errors
    ///
    /// Returns `TspError::InvariantViolation` naming the first problem found:
    /// a wrong length, an index outside the table, or a repeated index.
    pub fn validate(&self, num_cities: usize) -> Result<()> {
        if self.0.len() != num_cities {
            return Err(TspError::InvariantViolation(format!(
                "Route has {} stops but there are {} cities",
                self.0.len(),
                num_cities
            )));
        }

        let mut seen = vec![false; num_cities];
        for (pos, &city) in self.0.iter().enumerate() {
            if city >= num_cities {
                return Err(TspError::InvariantViolation(format!(
                    "Route visits unknown city {} at position {}",
                    city, pos
                )));
            }
            if seen[city] {
                return Err(TspError::InvariantViolation(format!(
                    "Route visits city {} twice (again at position {})",
                    city, pos
                )));
            }
            seen[city] = true;
        }

        Ok(())
    }
}

impl Deref for Route {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stops: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", stops.join(" -> "))
    }
}

/// Produces random routes over a fixed number of cities.
#[derive(Debug, Clone, Copy)]
pub struct RouteFactory {
    num_cities: usize,
}

impl RouteFactory {
    pub fn new(num_cities: usize) -> Self {
        Self { num_cities }
    }

    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// A uniformly random permutation, built with a Fisher-Yates shuffle of the identity.
    pub fn random_route(&self, rng: &mut RandomNumberGenerator) -> Route {
        let mut route = Route::identity(self.num_cities);
        for i in (1..self.num_cities).rev() {
            let j = rng.gen_inclusive(i);
            route.swap(i, j);
        }
        route
    }

    /// `size` independent random routes. Duplicates are allowed.
    pub fn initial_population(&self, size: usize, rng: &mut RandomNumberGenerator) -> Vec<Route> {
        (0..size).map(|_| self.random_route(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_route_is_permutation() {
        let factory = RouteFactory::new(25);
        let mut rng = RandomNumberGenerator::from_seed(42);

        for _ in 0..100 {
            let route = factory.random_route(&mut rng);
            assert!(route.validate(25).is_ok(), "not a permutation: {}", route);
        }
    }

    #[test]
    fn test_random_route_two_cities() {
        let factory = RouteFactory::new(2);
        let mut rng = RandomNumberGenerator::from_seed(5);

        let seen: HashSet<Vec<usize>> = (0..200)
            .map(|_| factory.random_route(&mut rng).into_inner())
            .collect();

        // Both orderings show up
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_shuffle_reaches_every_permutation() {
        let factory = RouteFactory::new(3);
        let mut rng = RandomNumberGenerator::from_seed(9);

        let seen: HashSet<Vec<usize>> = (0..600)
            .map(|_| factory.random_route(&mut rng).into_inner())
            .collect();

        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_initial_population_size() {
        let factory = RouteFactory::new(8);
        let mut rng = RandomNumberGenerator::new();

        let population = factory.initial_population(30, &mut rng);
        assert_eq!(population.len(), 30);
        assert!(population.iter().all(|r| r.len() == 8));
    }

    #[test]
    fn test_same_seed_same_population() {
        let factory = RouteFactory::new(10);
        let a = factory.initial_population(5, &mut RandomNumberGenerator::from_seed(1));
        let b = factory.initial_population(5, &mut RandomNumberGenerator::from_seed(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let route = Route::from_raw(vec![0, 1, 1, 3]);
        assert!(matches!(
            route.validate(4),
            Err(TspError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_length_and_unknown_city() {
        assert!(Route::from_indices(vec![0, 1, 2], 4).is_err());
        assert!(Route::from_indices(vec![0, 1, 2, 4], 4).is_err());
        assert!(Route::from_indices(vec![3, 1, 2, 0], 4).is_ok());
    }

    #[test]
    fn test_display() {
        let route = Route::from_indices(vec![2, 0, 1], 3).unwrap();
        assert_eq!(route.to_string(), "[2 -> 0 -> 1]");
    }
}
