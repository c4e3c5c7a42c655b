use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tsp_genalg::{
    caching::{CachedChallenge, CachingChallenge},
    cities::{City, CityTable},
    evolution::{Challenge, EvolutionLauncher, EvolutionOptions},
    fitness::FitnessEvaluator,
    rng::RandomNumberGenerator,
    route::Route,
    selection::TournamentSelection,
    strategy::PairedBreedStrategy,
};

// Wraps the real evaluator and counts how often it runs
#[derive(Clone)]
struct CountingEvaluator {
    evaluator: FitnessEvaluator,
    evaluations: Arc<AtomicUsize>,
}

impl CountingEvaluator {
    fn new(cities: CityTable) -> Self {
        Self {
            evaluator: FitnessEvaluator::new(cities),
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn get_evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

impl Challenge for CountingEvaluator {
    fn score(&self, route: &Route) -> f64 {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        self.evaluator.score(route)
    }
}

fn pentagon() -> CityTable {
    CityTable::new(
        (0..5)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / 5.0;
                City::new(angle.cos(), angle.sin())
            })
            .collect(),
    )
    .unwrap()
}

fn options(parallel_threshold: usize) -> EvolutionOptions {
    EvolutionOptions::builder()
        .max_generations(30)
        .population_size(40)
        .tournament_size(4)
        .parallel_threshold(parallel_threshold)
        .build()
}

#[test]
fn test_global_cache_skips_repeated_routes() {
    let challenge = CountingEvaluator::new(pentagon());
    let cached = challenge.with_global_cache();

    let launcher = EvolutionLauncher::new(
        <PairedBreedStrategy>::default(),
        TournamentSelection::new(),
        cached.clone(),
        5,
    );

    let options = options(usize::MAX);
    let result = launcher
        .evolve(&options, &mut RandomNumberGenerator::from_seed(17))
        .unwrap();

    // 31 populations of 40 routes, but only 5! = 120 distinct routes exist
    assert_eq!(result.evaluations, 31 * 40);
    assert!(challenge.get_evaluations() <= 120);
    assert_eq!(challenge.get_evaluations(), cached.cache_size());
}

#[test]
fn test_cached_run_matches_uncached_run() {
    let options = options(usize::MAX);

    let plain = EvolutionLauncher::new(
        <PairedBreedStrategy>::default(),
        TournamentSelection::new(),
        FitnessEvaluator::new(pentagon()),
        5,
    );
    let cached = EvolutionLauncher::new(
        <PairedBreedStrategy>::default(),
        TournamentSelection::new(),
        CachedChallenge::new(FitnessEvaluator::new(pentagon())),
        5,
    );

    let a = plain
        .evolve(&options, &mut RandomNumberGenerator::from_seed(23))
        .unwrap();
    let b = cached
        .evolve(&options, &mut RandomNumberGenerator::from_seed(23))
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_thread_local_cache_with_parallel_scoring() {
    let challenge = CountingEvaluator::new(pentagon());
    let cached = challenge.with_thread_local_cache();

    let launcher = EvolutionLauncher::new(
        <PairedBreedStrategy>::default(),
        TournamentSelection::new(),
        cached,
        5,
    );

    // Every population is scored on the rayon pool
    let mut options = options(1);
    options.set_max_generations(200);
    let result = launcher
        .evolve(&options, &mut RandomNumberGenerator::from_seed(31))
        .unwrap();

    assert!(result.route.validate(5).is_ok());
    assert_eq!(result.evaluations, 201 * 40);
    assert!(challenge.get_evaluations() <= result.evaluations);
}
