//! Plain-text summaries of routes and loads.

use std::collections::BTreeMap;
use std::fmt::Display;

use braess_network::{Network, NodeId, Route};

/// `Start -> A -> End (total 85)`, or `(no hops)` for an empty route.
pub fn describe_route<N: Display>(route: &Route<N>) -> String {
    let nodes = route.nodes();
    if nodes.is_empty() {
        return "(no hops)".to_string();
    }
    let path: Vec<String> = nodes.iter().map(|node| node.to_string()).collect();
    format!("{} (total {})", path.join(" -> "), route.total_cost)
}

/// Count how many routes followed each node sequence.
pub fn route_tally<N: Display>(routes: &[Route<N>]) -> BTreeMap<String, usize> {
    let mut tally = BTreeMap::new();
    for route in routes {
        let path: Vec<String> = route.nodes().iter().map(|node| node.to_string()).collect();
        *tally.entry(path.join(" -> ")).or_default() += 1;
    }
    tally
}

/// One line per link: endpoints, occupancy and current cost.
pub fn link_loads<N: NodeId>(network: &Network<N>) -> Vec<String> {
    network
        .links()
        .map(|(id, link)| {
            format!(
                "{id} {link}: {} vehicles, cost {}",
                link.occupancy(),
                link.current_cost()
            )
        })
        .collect()
}
