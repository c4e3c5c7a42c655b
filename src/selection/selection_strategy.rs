use std::fmt::Debug;

use crate::error::Result;
use crate::evolution::options::EvolutionOptions;
use crate::rng::RandomNumberGenerator;
use crate::route::Route;

/// Trait for building a mating pool out of a scored population.
///
/// Fitness values are tour lengths, so lower is better.
///
/// # Examples
///
/// ```
/// use tsp_genalg::evolution::EvolutionOptions;
/// use tsp_genalg::selection::{SelectionStrategy, TournamentSelection};
/// use tsp_genalg::route::Route;
/// use tsp_genalg::rng::RandomNumberGenerator;
/// use tsp_genalg::error::Result;
///
/// fn main() -> Result<()> {
///     let population = vec![
///         Route::from_indices(vec![0, 1, 2], 3)?,
///         Route::from_indices(vec![2, 1, 0], 3)?,
///         Route::from_indices(vec![1, 0, 2], 3)?,
///     ];
///     let fitness = vec![4.0, 2.5, 3.0];
///     let mut rng = RandomNumberGenerator::from_seed(1);
///
///     let options = EvolutionOptions::builder().tournament_size(2).build();
///     let pool = TournamentSelection::new().select(&population, &fitness, 3, &options, &mut rng)?;
///
///     assert_eq!(pool.len(), 3);
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` routes from `population`.
    ///
    /// `fitness[i]` is the score of `population[i]`. Tunables such as the
    /// tournament size come from `evol_options`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    fn select(
        &self,
        population: &[Route],
        fitness: &[f64],
        num_to_select: usize,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Route>>;
}
