use jinn_runner::{Scenario, SimulationEngine};

fn print_help() {
    eprintln!(
        r#"Jinn - what-if scenario simulator

USAGE:
    jinn [OPTIONS] <SCENARIO>...

OPTIONS:
    --list              List registered models
    --seed <N>          Override the scenario's random seed
    --batch <N>         Run N independent seeds starting at --seed (default 42)
    --pretty            Pretty-print the JSON report
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter

EXAMPLES:
    # Run a scenario file
    jinn scenarios/crypto_panic.json

    # Monte Carlo batch of 100 runs
    jinn --batch 100 scenarios/bank_panic.json
"#
    );
}

fn parse_number(args: &[String], i: usize, flag: &str) -> u64 {
    match args.get(i).map(|v| v.parse::<u64>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            eprintln!("Error: {} expects a non-negative integer", flag);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: {} requires a value", flag);
            std::process::exit(1);
        }
    }
}

/// `count` consecutive seeds from `start`, stopping at `u64::MAX`
fn batch_seeds(start: u64, count: u64) -> Vec<u64> {
    (start..=u64::MAX).take(count as usize).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut paths: Vec<String> = Vec::new();
    let mut seed: Option<u64> = None;
    let mut batch: Option<u64> = None;
    let mut pretty = false;
    let mut list = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--list" => list = true,
            "--pretty" => pretty = true,
            "--seed" => {
                i += 1;
                seed = Some(parse_number(&args, i, "--seed"));
            }
            "--batch" => {
                i += 1;
                batch = Some(parse_number(&args, i, "--batch"));
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
            path => paths.push(path.to_string()),
        }
        i += 1;
    }

    let engine = SimulationEngine::new();

    if list {
        for name in engine.model_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    if paths.is_empty() {
        print_help();
        std::process::exit(1);
    }

    for path in &paths {
        let scenario = Scenario::from_file(path)?;

        let output = match (batch, seed) {
            (Some(count), start) => {
                let start = start.unwrap_or(jinn_core::DEFAULT_SEED);
                let seeds = batch_seeds(start, count);
                let reports = engine.run_batch(&scenario, &seeds)?;
                serde_json::Value::Array(reports.iter().map(|r| r.to_json()).collect())
            }
            (None, Some(seed)) => engine.run_with_seed(&scenario, seed)?.to_json(),
            (None, None) => engine.run(&scenario)?.to_json(),
        };

        if pretty {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string(&output)?);
        }
    }

    Ok(())
}
