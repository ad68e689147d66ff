//! # riskroute CLI
//!
//! Command-line interface for the riskroute library:
//! plan routes, inspect the road network, or run the HTTP query server.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use riskroute::{Error, NetworkConfig, RoutePlanner};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

mod cli;

/// Command-line interface for riskroute
#[derive(Parser)]
#[command(name = "riskroute")]
#[command(version)]
#[command(about = "Risk-aware road routing between cities")]
#[command(long_about = "Finds the route that best balances distance against theft, accident,
rain and flood risk:
  riskroute route \"São Paulo\" \"Belo Horizonte\"
  riskroute route \"sao paulo\" campinas --json   # case and accents are ignored
  riskroute cities --network my-roads.json
  riskroute serve --port 8080")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Args)]
struct NetworkArgs {
    /// Road network JSON file (defaults to the bundled southeast Brazil network)
    #[arg(long, env = "RISKROUTE_NETWORK")]
    network: Option<PathBuf>,

    /// Fuel price per liter, overriding the network file
    #[arg(long)]
    fuel_price: Option<f64>,

    /// Vehicle efficiency in km per liter, overriding the network file
    #[arg(long)]
    km_per_liter: Option<f64>,
}

impl NetworkArgs {
    fn planner(&self) -> Result<RoutePlanner> {
        let mut network = match &self.network {
            Some(path) => NetworkConfig::load(path)
                .with_context(|| format!("Failed to load network from {}", path.display()))?,
            None => NetworkConfig::builtin().context("Bundled network is invalid")?,
        };
        if let Some(price) = self.fuel_price {
            network.fuel.price_per_liter = price;
        }
        if let Some(efficiency) = self.km_per_liter {
            network.fuel.km_per_liter = efficiency;
        }
        Ok(RoutePlanner::new(network)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best route between two cities
    Route {
        /// Origin city
        from: String,
        /// Destination city
        to: String,
        #[command(flatten)]
        network: NetworkArgs,
        /// Print the route as JSON
        #[arg(long)]
        json: bool,
    },
    /// List cities and their outgoing roads
    Cities {
        #[command(flatten)]
        network: NetworkArgs,
    },
    /// Start the HTTP query server
    Serve {
        #[command(flatten)]
        network: NetworkArgs,
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: IpAddr,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Cli::parse();
    cli::init_logging(args.verbose, args.log_json);

    match args.command {
        Commands::Route {
            from,
            to,
            network,
            json,
        } => {
            let planner = network.planner()?;
            let report = planner
                .plan(&from, &to)
                .map_err(|err| with_suggestion(&planner, err))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", cli::render_route(&report));
            }
        }
        Commands::Cities { network } => {
            let planner = network.planner()?;
            print!("{}", cli::render_cities(&planner));
        }
        Commands::Serve {
            network,
            port,
            bind,
        } => {
            let planner = network.planner()?;
            riskroute::server::serve(planner, SocketAddr::new(bind, port)).await?;
        }
    }

    Ok(())
}

/// Attach a "did you mean" hint to unknown-city errors
fn with_suggestion(planner: &RoutePlanner, err: Error) -> anyhow::Error {
    let hint = match &err {
        Error::NodeNotFound(name) => planner.suggest(name),
        _ => None,
    };
    match hint {
        Some(city) => anyhow::anyhow!("{err} (did you mean '{city}'?)"),
        None => err.into(),
    }
}
