//! Greedy path selection.
//!
//! The router walks the network one junction at a time. At each node it
//! compares every link leaving it and takes the cheapest under the chosen
//! [`CostAttribute`], without looking further ahead. The walk ends at the
//! first node with no outgoing links.

use tracing::{debug, trace};

use crate::{Error, Link, LinkId, Network, NodeId, Result};

/// Default bound on the number of hops in a single route.
pub const DEFAULT_MAX_STEPS: usize = 1024;

/// Which link cost the router minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostAttribute {
    /// Travel time under the current load (egoist routing).
    #[default]
    Current,
    /// Travel time of the empty link.
    FreeFlow,
}

impl CostAttribute {
    /// Read this attribute from a link.
    pub fn read<N>(self, link: &Link<N>) -> f64 {
        match self {
            Self::Current => link.current_cost(),
            Self::FreeFlow => link.free_flow_cost(),
        }
    }
}

/// Configuration for a routing query.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    /// Hops allowed before the query fails with [`Error::RoutingDivergence`].
    pub max_steps: usize,
    /// Cost minimized at every junction.
    pub attribute: CostAttribute,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            attribute: CostAttribute::Current,
        }
    }
}

/// One hop of a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step<N> {
    /// Node the hop leaves from.
    pub node: N,
    /// Node the hop arrives at.
    pub next_hop: N,
    /// Link taken.
    pub link: LinkId,
    /// Cost of the link when it was chosen.
    pub cost: f64,
}

/// Result of a routing query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route<N> {
    pub steps: Vec<Step<N>>,
    pub total_cost: f64,
}

impl<N> Route<N> {
    fn empty() -> Self {
        Self {
            steps: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the source was already a sink.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `(node, next_hop)` pairs in travel order.
    pub fn hops(&self) -> impl Iterator<Item = (&N, &N)> {
        self.steps.iter().map(|step| (&step.node, &step.next_hop))
    }

    /// Links taken, in travel order.
    pub fn links(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.steps.iter().map(|step| step.link)
    }

    /// Every node visited, starting with the source.
    ///
    /// Empty for an empty route, since the route does not record its source
    /// when no hop was taken.
    pub fn nodes(&self) -> Vec<&N> {
        let mut nodes: Vec<&N> = self.steps.first().map(|s| &s.node).into_iter().collect();
        nodes.extend(self.steps.iter().map(|step| &step.next_hop));
        nodes
    }
}

/// Greedy router over a borrowed network.
///
/// Holding a shared borrow keeps the network frozen for the whole query.
#[derive(Debug)]
pub struct Router<'a, N> {
    network: &'a Network<N>,
    config: RouterConfig,
}

impl<'a, N: NodeId> Router<'a, N> {
    pub fn new(network: &'a Network<N>, config: RouterConfig) -> Self {
        Self { network, config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Walk greedily from `source` until a node without outgoing links.
    ///
    /// Among equally cheap candidates the one enumerated last wins.
    pub fn route(&self, source: &N) -> Result<Route<N>> {
        if !self.network.contains_node(source) {
            return Err(Error::NodeNotFound(source.to_string()));
        }

        let mut current = source.clone();
        let mut route = Route::empty();

        loop {
            let outgoing = self.network.outgoing_links(&current);
            let mut candidates = outgoing.candidates();

            let Some(first) = candidates.next() else {
                debug!(
                    source = %source,
                    sink = %current,
                    hops = route.len(),
                    total_cost = route.total_cost,
                    "route complete"
                );
                return Ok(route);
            };

            if route.len() >= self.config.max_steps {
                return Err(Error::RoutingDivergence {
                    start: source.to_string(),
                    max_steps: self.config.max_steps,
                });
            }

            let (mut best, mut best_cost) = (first, self.cost_of(first)?);
            for candidate in candidates {
                let cost = self.cost_of(candidate)?;
                if cost <= best_cost {
                    best = candidate;
                    best_cost = cost;
                }
            }

            let (link_id, link) = best;
            let next_hop = link.destination();
            trace!(node = %current, next_hop = %next_hop, %link_id, cost = best_cost, "hop");
            route.total_cost += best_cost;
            route.steps.push(Step {
                node: current,
                next_hop: next_hop.clone(),
                link: link_id,
                cost: best_cost,
            });
            current = next_hop.clone();
        }
    }

    /// Cost of one candidate. Every candidate must point at a live node.
    fn cost_of(&self, (id, link): (LinkId, &Link<N>)) -> Result<f64> {
        if !self.network.contains_node(link.destination()) {
            return Err(Error::DanglingReference {
                link: id,
                node: link.destination().to_string(),
            });
        }
        let cost = self.config.attribute.read(link);
        if cost.is_nan() {
            return Err(Error::InvalidCost { link: id });
        }
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CostFunction, NetworkConfig, NodeRemoval};

    fn road(from: &'static str, to: &'static str, cost: f64) -> Link<&'static str> {
        Link::new(from, to, CostFunction::constant(cost))
    }

    #[test]
    fn picks_cheaper_parallel_link() {
        let mut network = Network::new();
        network.add_nodes(["A", "B"]);
        network.add_link(road("A", "B", 10.0));
        let fast = network.add_link(road("A", "B", 5.0));

        let route = network.egoist_path(&"A").unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(route.steps[0].link, fast);
        assert_eq!(route.total_cost, 5.0);
    }

    #[test]
    fn stops_at_sink() {
        let mut network = Network::new();
        network.add_nodes(["Start", "A", "End"]);
        network.add_links([road("Start", "A", 1.0), road("A", "End", 1.0)]);

        let route = network.egoist_path(&"Start").unwrap();
        let hops: Vec<_> = route.hops().map(|(a, b)| (*a, *b)).collect();
        assert_eq!(hops, vec![("Start", "A"), ("A", "End")]);
        assert_eq!(route.total_cost, 2.0);
    }

    #[test]
    fn sink_source_gives_empty_route() {
        let mut network = Network::new();
        network.add_node("Alone");
        let route = network.egoist_path(&"Alone").unwrap();
        assert!(route.is_empty());
        assert_eq!(route.total_cost, 0.0);
        assert!(route.nodes().is_empty());
    }

    #[test]
    fn ties_go_to_later_candidate() {
        let mut network = Network::new();
        network.add_nodes(["S", "X", "Y"]);
        network.add_links([road("S", "X", 3.0), road("S", "Y", 3.0)]);
        let route = network.egoist_path(&"S").unwrap();
        assert_eq!(route.nodes(), vec![&"S", &"Y"]);

        let mut parallel = Network::new();
        parallel.add_nodes(["S", "X"]);
        parallel.add_link(road("S", "X", 3.0));
        let later = parallel.add_link(road("S", "X", 3.0));
        assert_eq!(parallel.egoist_path(&"S").unwrap().steps[0].link, later);
    }

    #[test]
    fn greedy_ignores_what_comes_next() {
        // S->A is cheapest locally but A->T is expensive.
        let mut network = Network::new();
        network.add_nodes(["S", "A", "B", "T"]);
        network.add_links([
            road("S", "A", 1.0),
            road("S", "B", 2.0),
            road("A", "T", 100.0),
            road("B", "T", 1.0),
        ]);
        let route = network.egoist_path(&"S").unwrap();
        assert_eq!(route.nodes(), vec![&"S", &"A", &"T"]);
        assert_eq!(route.total_cost, 101.0);
    }

    #[test]
    fn cycle_without_sink_diverges() {
        let mut network = Network::new();
        network.add_nodes(["A", "B"]);
        network.add_links([road("A", "B", 1.0), road("B", "A", 1.0)]);

        let router = Router::new(
            &network,
            RouterConfig {
                max_steps: 16,
                ..RouterConfig::default()
            },
        );
        assert_eq!(
            router.route(&"A"),
            Err(Error::RoutingDivergence {
                start: "A".into(),
                max_steps: 16
            })
        );
    }

    #[test]
    fn step_limit_allows_exact_length() {
        let mut network = Network::new();
        network.add_nodes(["A", "B", "C"]);
        network.add_links([road("A", "B", 1.0), road("B", "C", 1.0)]);

        let config = RouterConfig {
            max_steps: 2,
            ..RouterConfig::default()
        };
        assert_eq!(Router::new(&network, config).route(&"A").unwrap().len(), 2);

        let config = RouterConfig {
            max_steps: 1,
            ..RouterConfig::default()
        };
        assert!(matches!(
            Router::new(&network, config).route(&"A"),
            Err(Error::RoutingDivergence { .. })
        ));
    }

    #[test]
    fn unknown_source_is_not_found() {
        let network: Network<&str> = Network::new();
        assert_eq!(
            network.egoist_path(&"Nowhere"),
            Err(Error::NodeNotFound("Nowhere".into()))
        );
    }

    #[test]
    fn dangling_destination_is_reported() {
        let mut network = Network::with_config(NetworkConfig {
            node_removal: NodeRemoval::Detach,
        });
        network.add_nodes(["A", "B"]);
        let id = network.add_link(road("A", "B", 1.0));
        network.remove_node(&"B").unwrap();

        assert_eq!(
            network.egoist_path(&"A"),
            Err(Error::DanglingReference {
                link: id,
                node: "B".into()
            })
        );
    }

    #[test]
    fn dangling_candidate_fails_even_when_not_cheapest() {
        let mut network = Network::with_config(NetworkConfig {
            node_removal: NodeRemoval::Detach,
        });
        network.add_nodes(["A", "B", "Gone"]);
        network.add_link(road("A", "B", 1.0));
        let stale = network.add_link(road("A", "Gone", 5.0));
        network.remove_node(&"Gone").unwrap();

        assert_eq!(
            network.egoist_path(&"A"),
            Err(Error::DanglingReference {
                link: stale,
                node: "Gone".into()
            })
        );
    }

    #[test]
    fn link_to_never_added_node_is_dangling() {
        let mut network = Network::new();
        network.add_node("A");
        network.add_link(road("A", "Ghost", 1.0));
        assert!(matches!(
            network.egoist_path(&"A"),
            Err(Error::DanglingReference { .. })
        ));
    }

    #[test]
    fn nan_cost_is_rejected() {
        let mut network = Network::new();
        network.add_nodes(["A", "B"]);
        network.add_link(road("A", "B", 1.0));
        let broken = network.add_link(Link::new("A", "B", CostFunction::constant(f64::NAN)));
        assert_eq!(
            network.egoist_path(&"A"),
            Err(Error::InvalidCost { link: broken })
        );
    }

    #[test]
    fn infinite_cost_is_still_a_candidate() {
        let mut network = Network::new();
        network.add_nodes(["A", "B"]);
        network.add_link(road("A", "B", f64::INFINITY));
        let route = network.egoist_path(&"A").unwrap();
        assert_eq!(route.len(), 1);
        assert!(route.total_cost.is_infinite());
    }

    #[test]
    fn free_flow_strategy_ignores_load() {
        let mut network = Network::new();
        network.add_nodes(["A", "B", "C"]);
        let congested = network.add_link(Link::new("A", "B", CostFunction::affine(1.0, 1.0)));
        network.add_link(road("A", "C", 3.0));
        network.link_mut(congested).unwrap().add_occupants(10);

        assert_eq!(network.egoist_path(&"A").unwrap().nodes(), vec![&"A", &"C"]);
        let free = network.free_flow_path(&"A").unwrap();
        assert_eq!(free.nodes(), vec![&"A", &"B"]);
        assert_eq!(free.total_cost, 1.0);
    }

    #[test]
    fn routing_does_not_mutate() {
        let mut network = Network::new();
        network.add_nodes(["A", "B"]);
        let id = network.add_link(Link::new("A", "B", CostFunction::linear(1.0)));
        network.link_mut(id).unwrap().add_occupants(3);

        network.egoist_path(&"A").unwrap();
        let link = network.link(id).unwrap();
        assert_eq!(link.occupancy(), 3);
        assert_eq!(link.current_cost(), 3.0);
    }
}
