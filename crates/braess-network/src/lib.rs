//! Braess Road Network
//!
//! Congestion-sensitive directed road network with greedy "egoist" routing.
//!
//! # Model
//!
//! A [`Network`] is a directed multigraph. Every [`Link`] carries a
//! [`CostFunction`] mapping its current occupancy to a travel time, and keeps
//! the evaluated cost cached so that reads never observe a stale value:
//!
//! - `current_cost == cost_function(occupancy)` after every mutation
//! - `free_flow_cost == cost_function(0)` for the lifetime of the link
//!
//! Parallel links between the same pair of nodes are tracked independently.
//!
//! # Egoist Routing
//!
//! A traveler standing at a node looks at every link leaving it, takes the one
//! that is cheapest *right now*, and repeats until it reaches a node with no
//! outgoing links. Ties go to the candidate enumerated last. The walk is
//! bounded by [`RouterConfig::max_steps`] so that sink-free cycles surface as
//! [`Error::RoutingDivergence`] instead of looping forever.
//!
//! ```
//! use braess_network::{CostFunction, Link, Network};
//!
//! let mut network = Network::new();
//! network.add_nodes(["Start", "A", "B", "End"]);
//! let ids = network.add_links([
//!     Link::new("Start", "A", CostFunction::linear(0.01)),
//!     Link::new("Start", "B", CostFunction::constant(45.0)),
//!     Link::new("A", "B", CostFunction::constant(0.0)),
//!     Link::new("A", "End", CostFunction::constant(45.0)),
//!     Link::new("B", "End", CostFunction::linear(0.01)),
//! ]);
//! for id in ids {
//!     network.link_mut(id).unwrap().add_occupants(4000);
//! }
//!
//! let route = network.egoist_path(&"Start").unwrap();
//! assert_eq!(route.nodes(), vec![&"Start", &"A", &"B", &"End"]);
//! assert!((route.total_cost - 80.0).abs() < 1e-9);
//! ```

mod assign;
mod cost;
mod error;
mod link;
mod network;
mod router;
mod topology;

pub use cost::CostFunction;
pub use error::{Error, Result};
pub use link::{Link, LinkId, OccupantId};
pub use network::{Network, NetworkConfig, NetworkId, NodeRemoval, OutgoingLinks};
pub use router::{CostAttribute, Route, Router, RouterConfig, Step, DEFAULT_MAX_STEPS};
pub use topology::{Topology, TopologyEdge};

use std::fmt::Display;
use std::hash::Hash;

/// Anything usable as a node identifier.
///
/// Node ids are opaque to the engine: they only need to be compared, hashed
/// and printed in error messages.
pub trait NodeId: Clone + Eq + Hash + Display {}

impl<T: Clone + Eq + Hash + Display> NodeId for T {}
