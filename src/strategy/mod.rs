//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines how a mating pool is turned into the next
//! population.
pub mod paired;

use std::fmt::Debug;

use crate::{
    error::Result, evolution::options::EvolutionOptions, rng::RandomNumberGenerator, route::Route,
};

/// Breeds the next population from a mating pool.
pub trait BreedStrategy
where
    Self: Debug + Send + Sync,
{
    /// Breeds new routes from `parents`.
    ///
    /// ## Parameters
    ///
    /// - `parents`: the mating pool, in selection slot order.
    /// - `num_cities`: every child must be a permutation of `0..num_cities`.
    /// - `evol_options`: supplies the crossover and mutation rates.
    /// - `rng`: the run's random number generator.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - The parents slice is empty
    /// - A child is not a permutation of `0..num_cities`, whether the operator
    ///   or a malformed parent is to blame
    /// - An operator produced a route that is not a permutation
    fn breed(
        &self,
        parents: &[Route],
        num_cities: usize,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Route>>;
}

pub use paired::PairedBreedStrategy;
