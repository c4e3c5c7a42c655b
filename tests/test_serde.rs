#![cfg(feature = "serde")]

use tsp_genalg::{
    cities::{City, CityTable},
    evolution::{EvolutionOptions, EvolutionResult, LogLevel, TspLauncher},
    rng::RandomNumberGenerator,
    route::Route,
};

#[test]
fn test_city_table_from_json() {
    let table: CityTable =
        serde_json::from_str(r#"[{"x":0,"y":0},{"x":3,"y":4}]"#).unwrap();

    assert_eq!(table.size(), 2);
    assert_eq!(table.get(1).unwrap(), City::new(3.0, 4.0));
    assert_eq!(table.distance(0, 1).unwrap(), 5.0);
}

#[test]
fn test_city_table_json_is_validated() {
    let single = serde_json::from_str::<CityTable>(r#"[{"x":0,"y":0}]"#);
    match single {
        Err(e) => assert!(e.to_string().contains("At least 2 cities")),
        Ok(table) => panic!("Expected an error, got {:?}", table),
    }

    assert!(serde_json::from_str::<CityTable>("[]").is_err());
}

#[test]
fn test_city_table_serializes_as_array() {
    let table = CityTable::new(vec![City::new(1.5, 2.0), City::new(-1.0, 0.0)]).unwrap();

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"x": 1.5, "y": 2.0}, {"x": -1.0, "y": 0.0}])
    );
}

#[test]
fn test_route_serializes_as_bare_array() {
    let route = Route::from_indices(vec![2, 0, 1], 3).unwrap();

    assert_eq!(serde_json::to_string(&route).unwrap(), "[2,0,1]");

    let back: Route = serde_json::from_str("[2,0,1]").unwrap();
    assert_eq!(back, route);
}

#[test]
fn test_evolution_result_round_trip() {
    let cities = CityTable::new(vec![
        City::new(20.0, 80.0),
        City::new(120.0, 20.0),
        City::new(60.0, 200.0),
        City::new(300.0, 180.0),
        City::new(160.0, 120.0),
    ])
    .unwrap();
    let options = EvolutionOptions::builder()
        .max_generations(10)
        .population_size(12)
        .tournament_size(3)
        .build();

    let result = TspLauncher::for_cities(cities)
        .evolve(&options, &mut RandomNumberGenerator::from_seed(8))
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert!(value["route"].is_array());
    assert_eq!(value["route"].as_array().unwrap().len(), 5);
    assert_eq!(value["fitness"].as_f64(), Some(result.fitness));
    assert_eq!(value["generations"], 10);
    assert_eq!(value["evaluations"], 11 * 12);
    assert_eq!(value["best_fitness_history"].as_array().unwrap().len(), 11);

    let json = serde_json::to_string(&result).unwrap();
    let back: EvolutionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_options_round_trip() {
    let options = EvolutionOptions::builder()
        .max_generations(25)
        .population_size(30)
        .tournament_size(4)
        .crossover_rate(0.85)
        .mutation_rate(0.05)
        .log_level(LogLevel::Minimal)
        .build();

    let json = serde_json::to_string(&options).unwrap();
    let back: EvolutionOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, options);
}
