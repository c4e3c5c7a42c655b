use crate::{
    cities::CityTable,
    error::{Result, TspError},
    fitness::FitnessEvaluator,
    selection::SelectionStrategy,
    strategy::BreedStrategy,
};

use super::{Challenge, EvolutionLauncher};

/// Assembles an `EvolutionLauncher` piece by piece.
///
/// ```rust
/// use tsp_genalg::cities::{City, CityTable};
/// use tsp_genalg::evolution::builder::EvolutionLauncherBuilder;
/// use tsp_genalg::fitness::FitnessEvaluator;
/// use tsp_genalg::selection::TournamentSelection;
/// use tsp_genalg::strategy::PairedBreedStrategy;
///
/// let cities = CityTable::new(vec![City::new(0.0, 0.0), City::new(2.0, 0.0)]).unwrap();
///
/// let launcher = EvolutionLauncherBuilder::<PairedBreedStrategy, TournamentSelection, FitnessEvaluator>::new()
///     .with_breed_strategy(PairedBreedStrategy::default())
///     .with_selection_strategy(TournamentSelection::new())
///     .with_cities(cities)
///     .build()
///     .unwrap();
///
/// assert_eq!(launcher.num_cities(), 2);
/// ```
pub struct EvolutionLauncherBuilder<B, S, C>
where
    B: BreedStrategy,
    S: SelectionStrategy,
    C: Challenge + Send + Sync,
{
    breed_strategy: Option<B>,
    selection_strategy: Option<S>,
    challenge: Option<C>,
    num_cities: Option<usize>,
}

impl<B, S, C> EvolutionLauncherBuilder<B, S, C>
where
    B: BreedStrategy,
    S: SelectionStrategy,
    C: Challenge + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            breed_strategy: None,
            selection_strategy: None,
            challenge: None,
            num_cities: None,
        }
    }

    pub fn with_breed_strategy(mut self, breed_strategy: B) -> Self {
        self.breed_strategy = Some(breed_strategy);
        self
    }

    pub fn with_selection_strategy(mut self, selection_strategy: S) -> Self {
        self.selection_strategy = Some(selection_strategy);
        self
    }

    /// Sets a custom challenge scoring routes over `num_cities` cities.
    pub fn with_challenge(mut self, challenge: C, num_cities: usize) -> Self {
        self.challenge = Some(challenge);
        self.num_cities = Some(num_cities);
        self
    }

    pub fn build(self) -> Result<EvolutionLauncher<B, S, C>> {
        let breed_strategy = self.breed_strategy.ok_or_else(|| {
            TspError::Configuration("Breeding strategy not specified".to_string())
        })?;

        let selection_strategy = self.selection_strategy.ok_or_else(|| {
            TspError::Configuration("Selection strategy not specified".to_string())
        })?;

        let challenge = self
            .challenge
            .ok_or_else(|| TspError::Configuration("Challenge not specified".to_string()))?;

        let num_cities = self
            .num_cities
            .ok_or_else(|| TspError::Configuration("Number of cities not specified".to_string()))?;

        let launcher =
            EvolutionLauncher::new(breed_strategy, selection_strategy, challenge, num_cities);
        launcher.check_challenge()?;

        Ok(launcher)
    }
}

impl<B, S> EvolutionLauncherBuilder<B, S, FitnessEvaluator>
where
    B: BreedStrategy,
    S: SelectionStrategy,
{
    /// Scores routes by their length through `cities`.
    pub fn with_cities(self, cities: CityTable) -> Self {
        let num_cities = cities.size();
        self.with_challenge(FitnessEvaluator::new(cities), num_cities)
    }
}

impl<B, S, C> Default for EvolutionLauncherBuilder<B, S, C>
where
    B: BreedStrategy,
    S: SelectionStrategy,
    C: Challenge + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
