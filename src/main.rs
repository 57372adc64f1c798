use std::env;
use std::process;

use log::debug;

use trajno_common::error::{Error, Result};
use trajno_runtime::{raw_map, Instance, InstanceConfig};

const MAX_TRAINS: usize = 10_000;

fn main() {
    env_logger::init();

    match run(env::args().skip(1).collect()) {
        Ok(lines) => {
            for line in &lines {
                println!("{}", line);
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}

/// `trajno <map-file> <start-station> <end-station> <num-trains>`
fn run(args: Vec<String>) -> Result<Vec<String>> {
    if args.len() < 4 {
        return Err(Error::TooFewArgs);
    }
    if args.len() > 4 {
        return Err(Error::TooManyArgs);
    }

    let trains = parse_train_count(&args[3])?;
    let network = raw_map::parse_file(&args[0])?;
    debug!(
        "loaded {} stations, {} connections",
        network.stations.len(),
        network.connections.len()
    );

    let cfg = InstanceConfig {
        network,
        start: args[1].clone(),
        end: args[2].clone(),
        trains,
    };
    Instance::new(&cfg)?.run()
}

fn parse_train_count(text: &str) -> Result<usize> {
    match text.parse::<usize>() {
        Ok(n) if (1..=MAX_TRAINS).contains(&n) => Ok(n),
        _ => Err(Error::InvalidTrainCount),
    }
}
