//! Shared fixtures for cross-crate tests.

use braess_network::{CostFunction, Link, LinkId, Network};

/// Link with a fixed travel time.
pub fn fixed(from: &'static str, to: &'static str, cost: f64) -> Link<&'static str> {
    Link::new(from, to, CostFunction::constant(cost))
}

/// Link whose travel time is `N / 100`.
pub fn congestible(from: &'static str, to: &'static str) -> Link<&'static str> {
    Link::new(from, to, CostFunction::custom(|n| n as f64 / 100.0))
}

/// Put `vehicles` occupants on every link, one round at a time, visiting
/// nodes in insertion order.
pub fn seed_rounds(network: &mut Network<&'static str>, vehicles: u64) {
    let ids: Vec<LinkId> = network
        .nodes()
        .flat_map(|node| network.edges_of(node).map(|(id, _)| id))
        .collect();
    for _ in 0..vehicles {
        for &id in &ids {
            if let Some(link) = network.link_mut(id) {
                link.add_occupant();
            }
        }
    }
}

/// Approximate float equality for accumulated costs.
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
