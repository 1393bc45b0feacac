mod cli;

use clap::Parser;
use tracing::{debug, error, info};

use crate::cli::error::{CliError, Result};
use crate::cli::{Cli, Commands};
use euler_sieve::{
    count_primes_below, largest_product_in_series, pythagorean_triplet, sieve_primes_below,
    sum_primes_below, sum_square_difference, FinderConfig, NthPrimeFinder, DIGIT_SERIES,
};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    cli::logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("euler-sieve v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    match execute(cli.command) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e)
        }
    }
}

/// Runs one subcommand and returns the text to print.
fn execute(command: Commands) -> Result<String> {
    let output = match command {
        Commands::Primes { below } => sieve_primes_below(below)?
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" "),
        Commands::CountPrimes { below } => count_primes_below(below)?.to_string(),
        Commands::SumPrimes { below } => sum_primes_below(below)?.to_string(),
        Commands::NthPrime {
            rank,
            max_doublings,
            max_bound,
        } => {
            let config = FinderConfig::new()
                .max_doublings(max_doublings)
                .max_bound(max_bound);
            NthPrimeFinder::new(config).find(rank)?.to_string()
        }
        Commands::SumSquareDifference { n } => sum_square_difference(n)?.to_string(),
        Commands::LargestProduct { window, series } => {
            let series = series.as_deref().unwrap_or(DIGIT_SERIES);
            largest_product_in_series(window, series)?.to_string()
        }
        Commands::PythagoreanTriplet { perimeter } => {
            let triplet = pythagorean_triplet(perimeter).ok_or_else(|| {
                CliError::NoSolution(format!("no Pythagorean triplet sums to {}", perimeter))
            })?;
            debug!(?triplet, "Found triplet.");
            triplet.product()?.to_string()
        }
        Commands::Bench { sizes, iterations } => cli::bench::run(&sizes, iterations)?,
    };
    Ok(output)
}
