use std::path::PathBuf;

use clap::Parser;
use pizzeria::{KitchenConfig, RandomDice};
use pizzeria_config::ConfigResult;
use tracing::Level;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Parser, Debug)]
#[command(version, about = "Runs one day of the pizzeria", long_about = None)]
struct Args {
    /// Kitchen config file (TOML), flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of orders the kitchen takes for the day
    #[arg(short, long)]
    orders: Option<u32>,

    /// Seed for a reproducible day
    #[arg(short, long)]
    seed: Option<u64>,

    /// Length of one time unit in milliseconds
    #[arg(long)]
    delay_unit_ms: Option<u64>,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn kitchen_config(&self) -> ConfigResult<KitchenConfig> {
        let mut config = match &self.config {
            Some(path) => pizzeria_config::from_path(path.clone())?,
            None => KitchenConfig::default(),
        };

        if let Some(orders) = self.orders {
            config.orders = orders;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(delay_unit_ms) = self.delay_unit_ms {
            config.delay_unit_ms = delay_unit_ms;
        }

        config.validate()?;
        Ok(config)
    }

    fn level(&self) -> Level {
        if self.verbose {
            Level::TRACE
        } else {
            Level::INFO
        }
    }
}

fn main() -> std::result::Result<(), BoxedError> {
    let args = Args::parse();

    pizzeria_trace::init(args.level())?;

    let config = args.kitchen_config()?;

    pizzeria_trace::info!("The Pizzeria is open for business!");
    pizzeria_trace::info!("----------------------------------");

    let dice = RandomDice::from_config(&config);
    let summary = pizzeria::run_day(config, dice)?;

    summary.report();
    if let Some(kitchen) = summary.kitchen {
        pizzeria_trace::debug!(
            made = kitchen.made,
            failed = kitchen.failed,
            total = kitchen.total,
            "Kitchen tally"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_the_standard_day() {
        let args = Args::try_parse_from(["pizzeria"]).expect("should parse");

        assert_eq!(
            args.kitchen_config().expect("should build config"),
            KitchenConfig::default()
        );
        assert_eq!(args.level(), Level::INFO);
    }

    #[test]
    fn should_override_config_with_flags() {
        let args = Args::try_parse_from([
            "pizzeria",
            "--orders",
            "3",
            "--seed",
            "5",
            "--delay-unit-ms",
            "0",
            "--verbose",
        ])
        .expect("should parse");

        let config = args.kitchen_config().expect("should build config");
        assert_eq!(config.orders, 3);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.delay_unit_ms, 0);
        assert_eq!(args.level(), Level::TRACE);
    }

    #[test]
    fn should_fail_on_missing_config_file() {
        let args = Args::try_parse_from(["pizzeria", "--config", "/no/such/kitchen.toml"])
            .expect("should parse");

        assert!(args.kitchen_config().is_err());
    }
}
