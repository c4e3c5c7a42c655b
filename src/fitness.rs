//! # Fitness Evaluation
//!
//! The fitness of a route is the length of the open path through its cities:
//! the edge from the last city back to the first is not counted. Shorter is
//! better.
//!
//! ## Example
//!
//! ```rust
//! use tsp_genalg::cities::{City, CityTable};
//! use tsp_genalg::fitness::FitnessEvaluator;
//! use tsp_genalg::route::Route;
//!
//! let cities = CityTable::new(vec![
//!     City::new(0.0, 0.0),
//!     City::new(1.0, 0.0),
//!     City::new(1.0, 1.0),
//!     City::new(0.0, 1.0),
//! ])
//! .unwrap();
//! let evaluator = FitnessEvaluator::new(cities);
//!
//! let route = Route::from_indices(vec![0, 1, 2, 3], 4).unwrap();
//! assert_eq!(evaluator.evaluate(&route).unwrap(), 3.0);
//! ```

use std::sync::Arc;

use crate::cities::CityTable;
use crate::error::Result;
use crate::evolution::Challenge;
use crate::route::Route;

/// Computes open-path tour lengths against a shared city table.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    cities: Arc<CityTable>,
}

impl FitnessEvaluator {
    pub fn new(cities: CityTable) -> Self {
        Self {
            cities: Arc::new(cities),
        }
    }

    pub fn from_shared(cities: Arc<CityTable>) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &CityTable {
        &self.cities
    }

    /// Sum of the distances between consecutive cities of `route`.
    ///
    /// # Errors
    ///
    /// Returns `TspError::IndexOutOfRange` if the route names a city the table
    /// does not have.
    pub fn evaluate(&self, route: &Route) -> Result<f64> {
        route.windows(2).try_fold(0.0, |total, leg| {
            Ok(total + self.cities.distance(leg[0], leg[1])?)
        })
    }
}

impl Challenge for FitnessEvaluator {
    /// The launcher checks its city count against the table before a run, so a
    /// failed lookup can only come from a foreign route and scores as
    /// infinitely long.
    fn score(&self, route: &Route) -> f64 {
        self.evaluate(route).unwrap_or(f64::INFINITY)
    }

    fn num_cities(&self) -> Option<usize> {
        Some(self.cities.size())
    }
}
