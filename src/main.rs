//! A command line interface to the genetic tour search.
//!
//! Distances are given as a flat lower-triangular list: the second city's
//! distance to the first, then the third city's distances to the first two,
//! and so on. Without distances the five built-in cities are used.
//!
//! ```text
//! u-salesman 281 338 61 299 43 42 --generations 5000 --top 5
//! ```

use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use u_salesman::cities::CityRegistry;
use u_salesman::ga::{EvolutionEngine, GaConfig};
use u_salesman::TspError;

fn cli() -> Command {
    Command::new("u-salesman")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Searches for a short round trip through a set of cities with a genetic algorithm")
        .arg(
            Arg::new("distances")
                .value_name("DISTANCE")
                .num_args(0..)
                .help("Lower-triangular distance list; city k lists its distances to cities 0..k"),
        )
        .arg(
            Arg::new("generations")
                .short('g')
                .long("generations")
                .value_parser(value_parser!(usize))
                .help("Number of generations to run [default: 20000]"),
        )
        .arg(
            Arg::new("elites")
                .short('e')
                .long("elites")
                .value_parser(value_parser!(usize))
                .help("Shortest tours carried unchanged into each new generation [default: 2]"),
        )
        .arg(
            Arg::new("mutation-probability")
                .short('m')
                .long("mutation-probability")
                .value_parser(value_parser!(f64))
                .help("Probability of each additional swap mutation, in [0, 1) [default: 0.05]"),
        )
        .arg(
            Arg::new("top")
                .short('t')
                .long("top")
                .value_parser(value_parser!(usize))
                .help("Number of ranked tours to print [default: 20]"),
        )
        .arg(
            Arg::new("population-limit")
                .long("population-limit")
                .value_parser(value_parser!(usize))
                .help("Upper bound on the population size"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("Random seed for a reproducible run"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .default_value("info")
                .help("Log specification used when RUST_LOG is not set"),
        )
        .arg(
            Arg::new("show-cities")
                .long("show-cities")
                .action(ArgAction::SetTrue)
                .help("Print the city and distance listing before searching"),
        )
}

fn get_config(matches: &ArgMatches) -> GaConfig {
    let mut config = GaConfig::default();
    if let Some(&n) = matches.get_one::<usize>("generations") {
        config = config.with_generations(n);
    }
    if let Some(&n) = matches.get_one::<usize>("elites") {
        config = config.with_elite_count(n);
    }
    if let Some(&p) = matches.get_one::<f64>("mutation-probability") {
        config = config.with_mutation_probability(p);
    }
    if let Some(&n) = matches.get_one::<usize>("top") {
        config = config.with_top_n(n);
    }
    if let Some(&limit) = matches.get_one::<usize>("population-limit") {
        config = config.with_population_limit(limit);
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    config
}

fn get_cities(matches: &ArgMatches) -> Result<CityRegistry, TspError> {
    match matches.get_many::<String>("distances") {
        Some(values) => {
            let values: Vec<&String> = values.collect();
            CityRegistry::parse_distance_list(&values)
        }
        None => Ok(CityRegistry::reference()),
    }
}

fn run_search(matches: &ArgMatches) -> Result<(), TspError> {
    let cities = get_cities(matches)?;
    if matches.get_flag("show-cities") {
        println!("{cities}");
    }

    let mut engine = EvolutionEngine::new(get_config(matches))?;
    let report = engine.run(&cities)?;

    println!("Top {} tours:", report.ranking.len());
    for ranked in &report.ranking {
        println!("{} | length: {}", ranked.tour, ranked.length);
    }
    Ok(())
}

fn main() {
    let matches = cli().get_matches();

    let log_spec = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("info");
    let _logger = match flexi_logger::Logger::try_with_env_or_str(log_spec).and_then(|l| l.start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("cannot start logger: '{err}'");
            None
        }
    };

    if let Err(err) = run_search(&matches) {
        eprintln!("{err}");
        process::exit(1);
    }
}
