use meridian_runner::{ReplaySimulation, SyntheticConfig, SyntheticTape, read_tape, write_tape};
use meridian_strategy::{load_config, load_default_config};

fn print_help() {
    eprintln!(
        r#"Meridian - per-tick trading engine replay

USAGE:
    meridian [OPTIONS]

OPTIONS:
    --config <PATH>        Load trader configuration from JSON file
    --tape <PATH>          Replay a JSON-lines tick tape
    --synthetic <N>        Generate N synthetic ticks (default: 1000)
    --seed <N>             Seed for synthetic ticks (default: 42)
    --write-tape <PATH>    Save the replayed ticks as a tape
    --help                 Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG               Log level filter (default: info)

EXAMPLES:
    # Soak the default universe on synthetic books
    meridian --synthetic 5000 --seed 7

    # Replay recorded data with a custom configuration
    meridian --config trader.json --tape day1.jsonl
"#
    );
}

fn required_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires an argument", flag);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut tape_path: Option<String> = None;
    let mut write_path: Option<String> = None;
    let mut synthetic_ticks: usize = 1000;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                config_path = Some(required_value(&args, i, "--config"));
            }
            "--tape" | "-t" => {
                i += 1;
                tape_path = Some(required_value(&args, i, "--tape"));
            }
            "--write-tape" => {
                i += 1;
                write_path = Some(required_value(&args, i, "--write-tape"));
            }
            "--synthetic" => {
                i += 1;
                synthetic_ticks = required_value(&args, i, "--synthetic").parse()?;
            }
            "--seed" => {
                i += 1;
                seed = required_value(&args, i, "--seed").parse()?;
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            load_config(&path)?
        }
        None => {
            log::info!("Using default configuration");
            load_default_config()?
        }
    };
    log::info!(
        "Products: {} (smoothing window {})",
        config.products.len(),
        config.smoothing_window
    );

    let ticks = match tape_path {
        Some(path) => {
            log::info!("Reading tape: {}", path);
            read_tape(&path)?
        }
        None => {
            log::info!("Generating {} synthetic ticks (seed {})", synthetic_ticks, seed);
            let mut tape =
                SyntheticTape::with_seed(SyntheticConfig::from_trader_config(&config), seed)?;
            tape.take(synthetic_ticks)
        }
    };

    if let Some(path) = write_path {
        write_tape(&path, &ticks)?;
        log::info!("Wrote {} ticks to {}", ticks.len(), path);
    }

    let mut simulation = ReplaySimulation::new(config)?;
    let results = simulation.run(&ticks);

    for (product, stats) in &results.products {
        log::info!(
            "  {:<18} orders={:<6} buys={:<6} sells={:<6} volume={:<8} final={:<6} peak={}",
            product,
            stats.orders,
            stats.buys,
            stats.sells,
            stats.volume,
            stats.final_position,
            stats.peak_position
        );
    }

    if results.has_breach() {
        for breach in &results.breaches {
            log::error!(
                "  {} at t={}: position {} exceeds limit {}",
                breach.product,
                breach.timestamp,
                breach.position,
                breach.limit
            );
        }
        std::process::exit(2);
    }

    Ok(())
}
