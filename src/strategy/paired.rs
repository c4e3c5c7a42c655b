use tracing::error;

use super::BreedStrategy;
use crate::{
    error::{Result, TspError},
    evolution::options::EvolutionOptions,
    operators::{CrossoverOperator, MutationOperator, PartiallyMappedCrossover, SwapMutation},
    rng::RandomNumberGenerator,
    route::Route,
};

/// # PairedBreedStrategy
///
/// Pairs the mating pool from both ends: slot `i` mates with slot `P - 1 - i`.
/// Each pair yields two children. With probability `crossover_rate` the
/// children are `crossover(a, b)` and `crossover(b, a)`, otherwise they are
/// copies of `a` and `b`. Both children are then mutated and checked to still
/// be permutations.
#[derive(Debug, Clone, Default)]
pub struct PairedBreedStrategy<C = PartiallyMappedCrossover, M = SwapMutation>
where
    C: CrossoverOperator,
    M: MutationOperator,
{
    crossover: C,
    mutation: M,
}

impl<C, M> PairedBreedStrategy<C, M>
where
    C: CrossoverOperator,
    M: MutationOperator,
{
    pub fn new(crossover: C, mutation: M) -> Self {
        Self {
            crossover,
            mutation,
        }
    }

    fn finish_child(
        &self,
        mut child: Route,
        num_cities: usize,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Route> {
        self.mutation
            .mutate(&mut child, evol_options.get_mutation_rate(), rng);

        if let Err(e) = child.validate(num_cities) {
            error!(route = %child, "bred route is not a permutation");
            return Err(e);
        }

        Ok(child)
    }
}

impl<C, M> BreedStrategy for PairedBreedStrategy<C, M>
where
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Returns exactly `parents.len()` children.
    ///
    /// ## Errors
    ///
    /// Fails on an empty or odd-sized mating pool, and with
    /// `TspError::InvariantViolation` if a child is not a permutation.
    fn breed(
        &self,
        parents: &[Route],
        num_cities: usize,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Route>> {
        if parents.is_empty() {
            return Err(TspError::EmptyPopulation);
        }

        let pool_size = parents.len();
        if pool_size % 2 != 0 {
            return Err(TspError::Configuration(format!(
                "Parents are bred in pairs, got an odd pool of {}",
                pool_size
            )));
        }

        let mut children = Vec::with_capacity(pool_size);

        for i in 0..pool_size / 2 {
            let parent_a = &parents[i];
            let parent_b = &parents[pool_size - 1 - i];

            let (child_a, child_b) = if rng.chance(evol_options.get_crossover_rate()) {
                (
                    self.crossover.crossover(parent_a, parent_b, rng)?,
                    self.crossover.crossover(parent_b, parent_a, rng)?,
                )
            } else {
                (parent_a.clone(), parent_b.clone())
            };

            children.push(self.finish_child(child_a, num_cities, evol_options, rng)?);
            children.push(self.finish_child(child_b, num_cities, evol_options, rng)?);
        }

        Ok(children)
    }
}
