use crate::error::{Result, TspError};
use crate::evolution::options::EvolutionOptions;
use crate::rng::RandomNumberGenerator;
use crate::route::Route;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that fills every slot of the mating pool with the
/// winner of an independent tournament.
///
/// Each tournament draws `tournament_size` contestants uniformly from the whole
/// population and keeps the shortest route. The size is read from the
/// `EvolutionOptions` of the run, so one strategy serves runs with different
/// selection pressure. Larger tournaments mean stronger pressure; a tournament
/// of 1 is uniform random selection.
///
/// By default contestants are drawn with replacement, so the same route may
/// enter a tournament more than once. [`TournamentSelection::without_replacement`]
/// draws distinct contestants instead, which makes a tournament as large as the
/// population always pick the population's best route.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    with_replacement: bool,
}

impl TournamentSelection {
    /// Creates a tournament that draws with replacement.
    pub fn new() -> Self {
        Self {
            with_replacement: true,
        }
    }

    pub fn without_replacement(mut self) -> Self {
        self.with_replacement = false;
        self
    }

    pub fn draws_with_replacement(&self) -> bool {
        self.with_replacement
    }

    /// Runs a single tournament and returns the index of the winner.
    ///
    /// Among contestants with exactly equal fitness the first one drawn wins.
    fn run_tournament(
        &self,
        tournament_size: usize,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let population_size = fitness.len();

        let contestants: Vec<usize> = if self.with_replacement {
            (0..tournament_size)
                .map(|_| rng.gen_index(population_size))
                .collect()
        } else {
            // Partial Fisher-Yates: the first k slots end up a uniform k-subset
            let k = tournament_size.min(population_size);
            let mut indices: Vec<usize> = (0..population_size).collect();
            for i in 0..k {
                let j = i + rng.gen_index(population_size - i);
                indices.swap(i, j);
            }
            indices.truncate(k);
            indices
        };

        let mut best_idx = contestants[0];
        for &idx in &contestants[1..] {
            if fitness[idx] < fitness[best_idx] {
                best_idx = idx;
            }
        }

        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        population: &[Route],
        fitness: &[f64],
        num_to_select: usize,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Route>> {
        if population.is_empty() {
            return Err(TspError::EmptyPopulation);
        }

        if fitness.len() != population.len() {
            return Err(TspError::Configuration(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                population.len()
            )));
        }

        let tournament_size = evol_options.get_tournament_size();
        if tournament_size < 1 {
            return Err(TspError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok((0..num_to_select)
            .map(|_| population[self.run_tournament(tournament_size, fitness, rng)].clone())
            .collect())
    }
}
