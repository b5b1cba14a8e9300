//! Braess scenario driver
//!
//! Builds the Braess network, loads it with traffic and prints the route a
//! selfish traveler would take.

use std::path::PathBuf;

use braess_cli::{
    braess_network, describe_route, link_loads, route_tally, ScenarioConfig, DEFAULT_VEHICLES,
    START,
};
use braess_logging::LogConfig;
use braess_network::{CostAttribute, Router, RouterConfig, DEFAULT_MAX_STEPS};
use braess_vis::Diagram;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Egoist routing over the Braess network")]
struct Args {
    /// Occupants seeded on every link before routing.
    #[arg(long, default_value_t = DEFAULT_VEHICLES)]
    vehicles: u64,

    /// Leave out the zero-cost A -> B bridge.
    #[arg(long)]
    no_bridge: bool,

    /// Extra travelers sent from Start one at a time, each loading its route.
    #[arg(long, default_value_t = 0)]
    assign: usize,

    /// Hops allowed per route before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Write a diagram of the network (.dot, .gv or .json).
    #[arg(long)]
    diagram: Option<PathBuf>,

    /// Log routing decisions.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    braess_logging::init(&LogConfig::default().verbose(args.verbose))?;

    let scenario = ScenarioConfig {
        vehicles: args.vehicles,
        bridge: !args.no_bridge,
    };
    tracing::info!(?scenario, "building Braess network");
    let mut network = braess_network(&scenario);

    if let Some(path) = &args.diagram {
        Diagram::from_network(&network).with_name("braess").save(path)?;
    }

    let egoist_config = RouterConfig {
        max_steps: args.max_steps,
        attribute: CostAttribute::Current,
    };
    let free_flow_config = RouterConfig {
        attribute: CostAttribute::FreeFlow,
        ..egoist_config.clone()
    };

    let egoist = Router::new(&network, egoist_config.clone()).route(&START)?;
    let free_flow = Router::new(&network, free_flow_config).route(&START)?;

    println!("Braess network ({} vehicles per link)", scenario.vehicles);
    println!("================");
    println!();
    println!("egoist:    {}", describe_route(&egoist));
    println!("free flow: {}", describe_route(&free_flow));

    if args.assign > 0 {
        let routes = network.assign_travelers(&START, args.assign, &egoist_config)?;

        println!();
        println!("Assigned {} travelers:", routes.len());
        for (path, count) in route_tally(&routes) {
            println!("  {count:>6}  {path}");
        }
        println!();
        println!("Link loads:");
        for line in link_loads(&network) {
            println!("  {line}");
        }
        println!();
        println!("egoist now: {}", describe_route(&network.egoist_path(&START)?));
    }

    Ok(())
}
