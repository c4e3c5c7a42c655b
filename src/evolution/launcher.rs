use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::{
    challenge::Challenge,
    options::{EvolutionOptions, LogLevel},
};
use crate::{
    cities::CityTable,
    error::{OptionExt, Result, TspError},
    fitness::FitnessEvaluator,
    operators::{PartiallyMappedCrossover, SwapMutation},
    rng::RandomNumberGenerator,
    route::{Route, RouteFactory},
    selection::{SelectionStrategy, TournamentSelection},
    strategy::{BreedStrategy, PairedBreedStrategy},
};

/// The launcher wired with the standard tour operators.
pub type TspLauncher = EvolutionLauncher<
    PairedBreedStrategy<PartiallyMappedCrossover, SwapMutation>,
    TournamentSelection,
    FitnessEvaluator,
>;

/// The shortest route seen so far in a run.
///
/// Starts empty with an infinite fitness and is only ever replaced by a
/// strictly shorter route.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSolution {
    pub route: Option<Route>,
    pub fitness: f64,
}

impl BestSolution {
    pub fn new() -> Self {
        Self {
            route: None,
            fitness: f64::INFINITY,
        }
    }

    /// Keeps `route` if it is strictly shorter than the current best.
    pub fn consider(&mut self, route: &Route, fitness: f64) -> bool {
        if fitness < self.fitness {
            self.route = Some(route.clone());
            self.fitness = fitness;
            true
        } else {
            false
        }
    }
}

impl Default for BestSolution {
    fn default() -> Self {
        Self::new()
    }
}

/// The outcome of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The shortest route found in any scored population.
    pub route: Route,
    /// The length of `route`.
    pub fitness: f64,
    /// Reproduction steps performed.
    pub generations: usize,
    /// Number of routes scored.
    pub evaluations: usize,
    /// Best fitness after each scored population; never increases.
    pub best_fitness_history: Vec<f64>,
}

/// Phases of the generational loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Initializing,
    Evaluating,
    Reproducing,
    Terminated,
}

/// Runs the generational loop: score, select, breed, repeat.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<Strategy, Selection, Chall>
where
    Strategy: BreedStrategy,
    Selection: SelectionStrategy,
    Chall: Challenge,
{
    strategy: Strategy,
    selection: Selection,
    challenge: Chall,
    num_cities: usize,
}

impl TspLauncher {
    /// A launcher using PMX, swap mutation and tournament selection over the
    /// given cities. Tournament size and rates come from the options passed
    /// to [`EvolutionLauncher::evolve`].
    pub fn for_cities(cities: CityTable) -> Self {
        let num_cities = cities.size();
        Self::new(
            PairedBreedStrategy::default(),
            TournamentSelection::new(),
            FitnessEvaluator::new(cities),
            num_cities,
        )
    }
}

impl<Strategy, Selection, Chall> EvolutionLauncher<Strategy, Selection, Chall>
where
    Strategy: BreedStrategy,
    Selection: SelectionStrategy,
    Chall: Challenge + Send + Sync,
{
    /// Creates a launcher for routes over `num_cities` cities.
    ///
    /// `challenge` must be able to score any permutation of `0..num_cities`.
    pub fn new(
        strategy: Strategy,
        selection: Selection,
        challenge: Chall,
        num_cities: usize,
    ) -> Self {
        Self {
            strategy,
            selection,
            challenge,
            num_cities,
        }
    }

    pub fn challenge(&self) -> &Chall {
        &self.challenge
    }

    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Checks that the challenge scores routes over the launcher's cities.
    ///
    /// # Errors
    ///
    /// Returns `TspError::Configuration` if the challenge is bound to a map
    /// with a different number of cities.
    pub fn check_challenge(&self) -> Result<()> {
        match self.challenge.num_cities() {
            Some(n) if n != self.num_cities => Err(TspError::Configuration(format!(
                "Launcher expects {} cities but the challenge scores routes over {}",
                self.num_cities, n
            ))),
            _ => Ok(()),
        }
    }

    /// Evolves a random initial population and returns the shortest route seen.
    ///
    /// `options.get_max_generations()` counts reproduction steps. The initial
    /// population and every bred population are scored, so a run scores
    /// `max_generations + 1` populations and a run with zero generations
    /// returns the best route of the initial population.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options are invalid for the number of cities
    /// - The challenge is bound to a different number of cities
    /// - A bred route is not a permutation of the cities
    /// - No route received a finite score
    ///
    /// # Performance
    ///
    /// Populations of at least `options.get_parallel_threshold()` routes are
    /// scored in parallel with Rayon. Selection and breeding stay on the
    /// calling thread and are the only users of `rng`.
    pub fn evolve(
        &self,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        let population_size = options.get_population_size();
        let max_generations = options.get_max_generations();

        let mut state = LoopState::Initializing;
        let mut population: Vec<Route> = Vec::new();
        let mut fitness: Vec<f64> = Vec::new();
        let mut best = BestSolution::new();
        let mut history = Vec::new();
        let mut evaluations = 0;
        let mut generation = 0;

        while state != LoopState::Terminated {
            trace!(?state, generation, "loop state");

            state = match state {
                LoopState::Initializing => {
                    options.validate(self.num_cities)?;
                    self.check_challenge()?;
                    info!(
                        cities = self.num_cities,
                        population_size,
                        max_generations,
                        tournament_size = options.get_tournament_size(),
                        crossover_rate = options.get_crossover_rate(),
                        mutation_rate = options.get_mutation_rate(),
                        "starting evolution"
                    );

                    population = RouteFactory::new(self.num_cities)
                        .initial_population(population_size, rng);
                    LoopState::Evaluating
                }
                LoopState::Evaluating => {
                    fitness = self.score_population(&population, options);
                    evaluations += population.len();

                    let mut generation_best = f64::INFINITY;
                    for (route, &score) in population.iter().zip(&fitness) {
                        generation_best = generation_best.min(score);
                        best.consider(route, score);
                    }
                    history.push(best.fitness);

                    self.log_generation(
                        options,
                        generation,
                        generation_best,
                        best.fitness,
                        &population,
                        &fitness,
                    );

                    if generation < max_generations {
                        LoopState::Reproducing
                    } else {
                        LoopState::Terminated
                    }
                }
                LoopState::Reproducing => {
                    let parents = self.selection.select(
                        &population,
                        &fitness,
                        population_size,
                        options,
                        rng,
                    )?;
                    let children =
                        self.strategy
                            .breed(&parents, self.num_cities, options, rng)?;

                    if children.len() != population_size {
                        return Err(TspError::InvariantViolation(format!(
                            "Generation {} bred {} routes, expected {}",
                            generation + 1,
                            children.len(),
                            population_size
                        )));
                    }

                    population = children;
                    generation += 1;
                    LoopState::Evaluating
                }
                LoopState::Terminated => LoopState::Terminated,
            };
        }

        let fitness = best.fitness;
        let route = best.route.ok_or_else_tsp(|| {
            TspError::Other("Evolution completed but no route had a finite length".to_string())
        })?;

        info!(
            generations = generation,
            evaluations,
            best_fitness = fitness,
            route = %route,
            "evolution finished"
        );

        Ok(EvolutionResult {
            route,
            fitness,
            generations: generation,
            evaluations,
            best_fitness_history: history,
        })
    }

    fn score_population(&self, population: &[Route], options: &EvolutionOptions) -> Vec<f64> {
        if population.len() >= options.get_parallel_threshold() {
            population
                .par_iter()
                .map(|route| self.challenge.score(route))
                .collect()
        } else {
            population
                .iter()
                .map(|route| self.challenge.score(route))
                .collect()
        }
    }

    fn log_generation(
        &self,
        options: &EvolutionOptions,
        generation: usize,
        generation_best: f64,
        best_fitness: f64,
        population: &[Route],
        fitness: &[f64],
    ) {
        match options.get_log_level() {
            LogLevel::Minimal => {
                debug!(generation, generation_best, best_fitness, "generation scored")
            }
            LogLevel::Verbose => {
                debug!(generation, generation_best, best_fitness, "generation scored");
                population.iter().zip(fitness).for_each(|(route, score)| {
                    trace!(generation, route = %route, score, "route scored");
                });
            }
            LogLevel::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::City;

    fn unit_square() -> CityTable {
        CityTable::new(vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ])
        .unwrap()
    }

    fn scattered() -> CityTable {
        CityTable::new(
            [
                (3.0, 7.0),
                (9.0, 1.0),
                (4.0, 4.0),
                (8.0, 8.0),
                (1.0, 2.0),
                (6.0, 5.0),
                (2.0, 9.0),
                (7.0, 3.0),
                (5.0, 0.0),
                (0.0, 6.0),
            ]
            .into_iter()
            .map(City::from)
            .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_best_solution_only_improves() {
        let mut best = BestSolution::new();
        let a = Route::identity(3);
        let b = Route::from_indices(vec![2, 1, 0], 3).unwrap();

        assert!(best.route.is_none());
        assert!(best.consider(&a, 5.0));
        assert!(!best.consider(&b, 5.0));
        assert!(!best.consider(&b, 6.0));
        assert_eq!(best.route.as_ref(), Some(&a));
        assert!(best.consider(&b, 4.0));
        assert_eq!(best.fitness, 4.0);
    }

    #[test]
    fn test_zero_generations_scans_initial_population_only() {
        let options = EvolutionOptions::builder()
            .max_generations(0)
            .population_size(6)
            .tournament_size(2)
            .build();
        let launcher = TspLauncher::for_cities(unit_square());

        let result = launcher
            .evolve(&options, &mut RandomNumberGenerator::from_seed(9))
            .unwrap();

        // Same seed, same initial population
        let initial =
            RouteFactory::new(4).initial_population(6, &mut RandomNumberGenerator::from_seed(9));
        let expected = initial
            .iter()
            .map(|r| launcher.challenge().evaluate(r).unwrap())
            .fold(f64::INFINITY, f64::min);

        assert_eq!(result.generations, 0);
        assert_eq!(result.evaluations, 6);
        assert_eq!(result.best_fitness_history, vec![expected]);
        assert_eq!(result.fitness, expected);
        assert!(initial.contains(&result.route));
    }

    #[test]
    fn test_counts_generations_and_evaluations() {
        let options = EvolutionOptions::builder()
            .max_generations(5)
            .population_size(8)
            .tournament_size(3)
            .build();
        let launcher = TspLauncher::for_cities(unit_square());

        let result = launcher
            .evolve(&options, &mut RandomNumberGenerator::from_seed(1))
            .unwrap();

        assert_eq!(result.generations, 5);
        assert_eq!(result.evaluations, 6 * 8);
        assert_eq!(result.best_fitness_history.len(), 6);
    }

    #[test]
    fn test_invalid_options_fail_before_running() {
        let options = EvolutionOptions::builder()
            .population_size(7)
            .tournament_size(2)
            .build();
        let launcher = TspLauncher::for_cities(unit_square());

        let result = launcher.evolve(&options, &mut RandomNumberGenerator::new());
        assert!(matches!(result, Err(TspError::Configuration(_))));
    }

    #[test]
    fn test_zero_tournament_fails_before_running() {
        let options = EvolutionOptions::builder().tournament_size(0).build();
        let launcher = TspLauncher::for_cities(unit_square());

        let result = launcher.evolve(&options, &mut RandomNumberGenerator::new());
        assert!(matches!(result, Err(TspError::Configuration(_))));
    }

    #[test]
    fn test_tournament_size_is_read_per_run() {
        let weak = EvolutionOptions::builder()
            .max_generations(30)
            .population_size(20)
            .tournament_size(1)
            .build();
        let mut strong = weak.clone();
        strong.set_tournament_size(20);

        let launcher = TspLauncher::for_cities(scattered());
        let a = launcher
            .evolve(&weak, &mut RandomNumberGenerator::from_seed(5))
            .unwrap();
        let b = launcher
            .evolve(&strong, &mut RandomNumberGenerator::from_seed(5))
            .unwrap();

        // Twenty contestants per slot draw 19 more indices than one does
        assert_ne!(a.best_fitness_history, b.best_fitness_history);
    }

    #[test]
    fn test_challenge_bound_to_other_map_is_rejected() {
        let options = EvolutionOptions::builder()
            .population_size(4)
            .tournament_size(2)
            .build();
        let launcher = EvolutionLauncher::new(
            PairedBreedStrategy::<PartiallyMappedCrossover, SwapMutation>::default(),
            TournamentSelection::new(),
            FitnessEvaluator::new(unit_square()),
            6,
        );

        assert!(launcher.check_challenge().is_err());
        match launcher.evolve(&options, &mut RandomNumberGenerator::from_seed(3)) {
            Err(TspError::Configuration(msg)) => assert!(msg.contains("expects 6 cities")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_parallel_scoring_matches_sequential() {
        let sequential = EvolutionOptions::builder()
            .max_generations(10)
            .population_size(20)
            .tournament_size(3)
            .parallel_threshold(usize::MAX)
            .build();
        let mut parallel = sequential.clone();
        parallel.set_parallel_threshold(1);

        let launcher = TspLauncher::for_cities(unit_square());
        let a = launcher
            .evolve(&sequential, &mut RandomNumberGenerator::from_seed(77))
            .unwrap();
        let b = launcher
            .evolve(&parallel, &mut RandomNumberGenerator::from_seed(77))
            .unwrap();

        assert_eq!(a, b);
    }
}
