use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};

use tsp_genalg::{
    cities::{City, CityTable},
    evolution::{EvolutionOptions, EvolutionResult, LogLevel, TspLauncher},
    rng::RandomNumberGenerator,
    Result, ResultExt, TspError,
};

/// Search for a short tour through a set of cities with a genetic algorithm.
#[derive(Parser, Debug)]
#[command(name = "tsp-genalg", version)]
struct Args {
    /// JSON file holding an array of {"x": .., "y": ..} cities
    #[arg(long)]
    cities: Option<PathBuf>,

    /// Expected number of cities; the run is refused if the city list differs
    #[arg(long)]
    num_cities: Option<usize>,

    /// population size (must be even)
    #[arg(long, default_value_t = 100)]
    population: usize,

    /// number of reproduction steps
    #[arg(long, default_value_t = 100)]
    generations: usize,

    #[arg(long, default_value_t = 5)]
    tournament_size: usize,

    /// probability of crossing a parent pair
    #[arg(long, default_value_t = 0.7)]
    crossover_rate: f64,

    /// per-position swap probability
    #[arg(long, default_value_t = 0.02)]
    mutation_rate: f64,

    /// populations at least this large are scored in parallel
    #[arg(long, default_value_t = 1000)]
    parallel_threshold: usize,

    /// RNG seed; a random seed is used when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// log every generation (repeat for every scored route)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// print the result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn default_cities() -> Vec<City> {
    vec![
        City::new(20.0, 80.0),
        City::new(120.0, 20.0),
        City::new(60.0, 200.0),
        City::new(300.0, 180.0),
        City::new(160.0, 120.0),
    ]
}

fn load_cities(args: &Args) -> Result<CityTable> {
    let cities = match &args.cities {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .context(format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<Vec<City>>(&raw)
                .map_err(|e| TspError::Serialization(format!("{}: {}", path.display(), e)))?
        }
        None => default_cities(),
    };

    match args.num_cities {
        Some(n) => CityTable::with_declared_size(n, cities),
        None => CityTable::new(cities),
    }
}

fn run(args: &Args) -> Result<EvolutionResult> {
    let cities = load_cities(args)?;

    let log_level = match args.verbose {
        0 => LogLevel::None,
        1 => LogLevel::Minimal,
        _ => LogLevel::Verbose,
    };

    let options = EvolutionOptions::builder()
        .max_generations(args.generations)
        .population_size(args.population)
        .tournament_size(args.tournament_size)
        .crossover_rate(args.crossover_rate)
        .mutation_rate(args.mutation_rate)
        .parallel_threshold(args.parallel_threshold)
        .log_level(log_level)
        .build();
    options.validate(cities.size())?;

    let mut rng = match args.seed {
        Some(seed) => RandomNumberGenerator::from_seed(seed),
        None => RandomNumberGenerator::new(),
    };

    TspLauncher::for_cities(cities).evolve(&options, &mut rng)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let max_level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(result) if args.json => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("failed to encode result: {}", e);
                ExitCode::FAILURE
            }
        },
        Ok(result) => {
            println!("Best route: {:?}", result.route.as_slice());
            println!("Best fitness: {}", result.fitness);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
