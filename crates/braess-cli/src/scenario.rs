//! The Braess network.
//!
//! Two routes lead from `Start` to `End`, each with one congestible and one
//! fixed link. The optional bridge `A -> B` costs nothing and joins the two
//! congestible links into a third route.
//!
//! | link        | travel time |
//! |-------------|-------------|
//! | Start -> A  | N/100       |
//! | Start -> B  | 45          |
//! | A -> B      | 0           |
//! | A -> End    | 45          |
//! | B -> End    | N/100       |

use braess_network::{CostFunction, Link, Network};
use tracing::debug;

pub const START: &str = "Start";
pub const END: &str = "End";

/// Occupants seeded on every link by default.
pub const DEFAULT_VEHICLES: u64 = 4000;

/// How to build and load the network.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Occupants placed on every link before routing.
    pub vehicles: u64,
    /// Include the zero-cost `A -> B` bridge.
    pub bridge: bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            vehicles: DEFAULT_VEHICLES,
            bridge: true,
        }
    }
}

/// Build the Braess network and seed every link with traffic.
pub fn braess_network(config: &ScenarioConfig) -> Network<&'static str> {
    let mut network = Network::new();
    network.add_nodes([START, END, "A", "B"]);

    let congestible = || CostFunction::linear(1.0 / 100.0);
    let mut links = vec![
        Link::new(START, "A", congestible()).with_label("t=N/100"),
        Link::new(START, "B", CostFunction::constant(45.0)).with_label("t=45"),
    ];
    if config.bridge {
        links.push(Link::new("A", "B", CostFunction::constant(0.0)).with_label("t=0"));
    }
    links.push(Link::new("A", END, CostFunction::constant(45.0)).with_label("t=45"));
    links.push(Link::new("B", END, congestible()).with_label("t=N/100"));

    for id in network.add_links(links) {
        if let Some(link) = network.link_mut(id) {
            link.add_occupants(config.vehicles);
        }
    }

    debug!(
        links = network.link_count(),
        vehicles = config.vehicles,
        bridge = config.bridge,
        "scenario built"
    );
    network
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_link_is_seeded() {
        let network = braess_network(&ScenarioConfig {
            vehicles: 7,
            bridge: true,
        });
        assert_eq!(network.node_count(), 4);
        assert_eq!(network.link_count(), 5);
        assert!(network.links().all(|(_, link)| link.occupancy() == 7));
    }

    #[test]
    fn bridge_is_optional() {
        let network = braess_network(&ScenarioConfig {
            bridge: false,
            ..ScenarioConfig::default()
        });
        assert_eq!(network.link_count(), 4);
        assert!(network.outgoing_links(&"A").to(&"B").is_empty());
    }
}
