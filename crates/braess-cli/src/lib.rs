//! Braess CLI support
//!
//! The classic four-node Braess network and plain-text reporting for the
//! `braess` binary.

pub mod report;
pub mod scenario;

pub use report::{describe_route, link_loads, route_tally};
pub use scenario::{braess_network, ScenarioConfig, DEFAULT_VEHICLES, END, START};
