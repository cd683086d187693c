use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rail_network::cache::{CacheConfig, CachedCorridors};
use rail_network::corridor::CorridorCalculator;
use rail_network::dataset::Dataset;
use rail_network::network::{Loader, LoaderConfig};
use rail_network::planner::{Planner, PlannerConfig};

/// Route table used when `RAIL_DATASET` is unset.
const DEFAULT_DATASET: &str = "routes.json";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dataset_path =
        std::env::var("RAIL_DATASET").unwrap_or_else(|_| DEFAULT_DATASET.to_string());
    let dataset = Arc::new(Dataset::from_path(&dataset_path)?);

    // An explicit edge table wins over edges derived from the route table.
    let loader = Loader::new(LoaderConfig::default());
    let network = match std::env::var("RAIL_EDGES") {
        Ok(path) => loader.load_csv_path(path)?,
        Err(_) => loader.load_dataset(&dataset)?,
    };
    info!(
        dataset = %dataset_path,
        stations = network.graph.station_count(),
        edges = network.graph.edge_count(),
        operators = network.operators.len(),
        skipped = network.skipped.len(),
        dataset_skipped = dataset.skipped.len(),
        "Loaded network"
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag, code] if flag == "--corridor" => {
            let corridors = CachedCorridors::new(
                CorridorCalculator::new(dataset.clone()),
                &CacheConfig::default(),
            );
            match corridors.corridor(code) {
                Some(corridor) => {
                    println!("{} ({}, {})", corridor.route_code, corridor.operator, corridor.route_type);
                    for station in &corridor.corridor {
                        let marker = if corridor.skips(station.as_str()) { "  (passes)" } else { "" };
                        println!("  {station}{marker}");
                    }
                }
                None => println!("No route {code}"),
            }
        }
        [from, to] => {
            let config = PlannerConfig::default();
            let planner = Planner::new(&network.graph, &config);
            match planner.shortest_path_checked(from, to) {
                Ok(journey) => println!("{journey}"),
                Err(e) => println!("{e}"),
            }
            let alternatives = planner.alternatives(from, to);
            println!("{} alternative itineraries", alternatives.len());
            for journey in alternatives.iter().take(3) {
                println!("{journey}");
            }
        }
        _ => {
            println!(
                "{} stations, {} route codes, {} operators",
                network.graph.station_count(),
                network.route_codes.len(),
                network.operators.len()
            );
            println!("Usage: rail-network <from> <to> | --corridor <route>");
        }
    }

    Ok(())
}
