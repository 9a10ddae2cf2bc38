use clap::{Parser, Subcommand};
use fuelwatch_core::usecases::PriceCheckParams;
use std::{
    path::PathBuf,
    process,
    sync::{atomic::AtomicBool, Arc},
};

mod config;
mod gateways;
mod schedule;
mod trigger;

use self::{
    config::Config,
    gateways::Gateways,
    trigger::{TriggerEvent, TriggerResponse},
};

/// Daily notifications about the cheapest fuel prices in NSW.
#[derive(Parser)]
#[command(name = "fuelwatch", version)]
struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the fuel prices once and print the response
    Run,
    /// Check the fuel prices every day
    Schedule,
}

fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = dotenv {
        log::debug!("No .env file loaded: {err}");
    }

    let cli = Cli::parse();
    let cfg = Config::try_load_from_file_or_default(cli.config_file.as_ref())?;
    let gateways = Arc::new(Gateways::try_new(&cfg)?);
    let prices = Arc::new(cfg.prices);

    match cli.command {
        Command::Run => {
            let response = check_fuel_prices(&gateways, &prices, &TriggerEvent::default(), None);
            println!("{}", serde_json::to_string_pretty(&response)?);
            if response.status_code >= 500 {
                process::exit(1);
            }
        }
        Command::Schedule => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let trigger = {
                let gateways = Arc::clone(&gateways);
                move |event: &TriggerEvent, abort: &AtomicBool| {
                    check_fuel_prices(&gateways, &prices, event, Some(abort))
                }
            };
            runtime.block_on(schedule::run(cfg.schedule.daily_at, trigger));
        }
    }
    Ok(())
}

fn check_fuel_prices(
    gateways: &Gateways,
    prices: &config::Prices,
    event: &TriggerEvent,
    abort: Option<&AtomicBool>,
) -> TriggerResponse {
    let params = PriceCheckParams {
        eligible_fuel_types: &prices.eligible_fuel_types,
        search_radius: prices.search_radius,
        abort,
    };
    trigger::handle(event, &gateways.pipeline(), params)
}
