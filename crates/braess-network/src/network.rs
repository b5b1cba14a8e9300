//! Directed multigraph of nodes and congestible links.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    CostAttribute, Error, Link, LinkId, NodeId, Result, Route, Router, RouterConfig, Topology,
};

static NEXT_NETWORK_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a network.
///
/// Links remember the id of the network they were added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkId(pub u64);

impl NetworkId {
    fn next() -> Self {
        Self(NEXT_NETWORK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "network#{}", self.0)
    }
}

/// What happens to incident links when a node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeRemoval {
    /// Refuse to remove a node that still has incident links.
    #[default]
    Reject,
    /// Remove incident links together with the node.
    Cascade,
    /// Remove the node only. Links left behind fail routing with
    /// [`Error::DanglingReference`].
    Detach,
}

/// Configuration for a network.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// Policy applied by [`Network::remove_node`] and [`Network::remove_nodes`].
    pub node_removal: NodeRemoval,
}

/// A directed road network.
///
/// Nodes and links keep their insertion order. Each source also remembers
/// the order in which its destinations first gained a link; together these
/// fix the order in which the router examines candidates.
#[derive(Debug)]
pub struct Network<N> {
    id: NetworkId,
    config: NetworkConfig,
    nodes: Vec<N>,
    node_set: HashSet<N>,
    links: BTreeMap<LinkId, Link<N>>,
    destinations: HashMap<N, Vec<N>>,
    next_link: u64,
}

impl<N: NodeId> Network<N> {
    /// Create an empty network with the default configuration.
    pub fn new() -> Self {
        Self::with_config(NetworkConfig::default())
    }

    /// Create an empty network.
    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            id: NetworkId::next(),
            config,
            nodes: Vec::new(),
            node_set: HashSet::new(),
            links: BTreeMap::new(),
            destinations: HashMap::new(),
            next_link: 0,
        }
    }

    pub fn id(&self) -> NetworkId {
        self.id
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.node_set.contains(node)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    /// Links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link<N>)> {
        self.links.iter().map(|(&id, link)| (id, link))
    }

    /// Links leaving `node`, in insertion order.
    pub fn edges_of(&self, node: &N) -> impl Iterator<Item = (LinkId, &Link<N>)> {
        let node = node.clone();
        self.links().filter(move |(_, link)| *link.source() == node)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link<N>> {
        self.links.get(&id)
    }

    /// Mutable access to a link, used to add or remove occupants.
    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Link<N>> {
        self.links.get_mut(&id)
    }

    /// Add a node. Adding a node twice is a no-op.
    pub fn add_node(&mut self, node: N) {
        if self.node_set.insert(node.clone()) {
            self.nodes.push(node);
        }
    }

    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = N>) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Remove a node, applying the configured [`NodeRemoval`] policy.
    pub fn remove_node(&mut self, node: &N) -> Result<()> {
        self.remove_nodes([node])
    }

    /// Remove several nodes at once.
    ///
    /// Every node is checked before anything is removed, so a failure leaves
    /// the network unchanged. Duplicates are removed once.
    pub fn remove_nodes<'a>(&mut self, nodes: impl IntoIterator<Item = &'a N>) -> Result<()>
    where
        N: 'a,
    {
        let mut doomed = HashSet::new();
        for node in nodes {
            if !self.contains_node(node) {
                return Err(Error::NodeNotFound(node.to_string()));
            }
            doomed.insert(node.clone());
        }

        match self.config.node_removal {
            NodeRemoval::Reject => {
                let busy = self
                    .nodes
                    .iter()
                    .filter(|node| doomed.contains(*node))
                    .map(|node| (node, self.incident_count(node)))
                    .find(|&(_, links)| links > 0);
                if let Some((node, links)) = busy {
                    return Err(Error::NodeInUse {
                        node: node.to_string(),
                        links,
                    });
                }
            }
            NodeRemoval::Cascade => {
                let incident: Vec<LinkId> = self
                    .links
                    .iter()
                    .filter(|(_, link)| {
                        doomed.contains(link.source()) || doomed.contains(link.destination())
                    })
                    .map(|(&id, _)| id)
                    .collect();
                for id in incident {
                    self.take_link(id);
                }
            }
            NodeRemoval::Detach => {}
        }

        self.nodes.retain(|node| !doomed.contains(node));
        self.node_set.retain(|node| !doomed.contains(node));
        Ok(())
    }

    /// Add a link and take ownership of it.
    ///
    /// Endpoints are not checked here; routing reports missing ones.
    pub fn add_link(&mut self, mut link: Link<N>) -> LinkId {
        let id = LinkId(self.next_link);
        self.next_link += 1;
        link.set_owner(self.id);
        let destinations = self.destinations.entry(link.source().clone()).or_default();
        if !destinations.contains(link.destination()) {
            destinations.push(link.destination().clone());
        }
        self.links.insert(id, link);
        id
    }

    pub fn add_links(&mut self, links: impl IntoIterator<Item = Link<N>>) -> Vec<LinkId> {
        links.into_iter().map(|link| self.add_link(link)).collect()
    }

    /// Remove the earliest-added link from `source` to `destination`.
    pub fn remove_link(&mut self, source: &N, destination: &N) -> Result<Link<N>> {
        let id = self.find_link(source, destination, &[])?;
        self.remove_link_by_id(id)
    }

    /// Remove one link per pair, all or nothing.
    ///
    /// A pair listed twice removes two parallel links.
    pub fn remove_links(&mut self, pairs: &[(N, N)]) -> Result<Vec<Link<N>>> {
        let mut chosen = Vec::with_capacity(pairs.len());
        for (source, destination) in pairs {
            let id = self.find_link(source, destination, &chosen)?;
            chosen.push(id);
        }
        Ok(chosen
            .into_iter()
            .filter_map(|id| self.take_link(id))
            .collect())
    }

    /// Remove a specific link.
    pub fn remove_link_by_id(&mut self, id: LinkId) -> Result<Link<N>> {
        self.take_link(id).ok_or(Error::UnknownLink(id))
    }

    /// Links leaving `node`, grouped by destination.
    pub fn outgoing_links(&self, node: &N) -> OutgoingLinks<'_, N> {
        let groups: Vec<(&N, Vec<(LinkId, &Link<N>)>)> = self
            .destinations
            .get(node)
            .map(|destinations| {
                destinations
                    .iter()
                    .map(|destination| {
                        let group = self
                            .links()
                            .filter(|(_, link)| {
                                link.source() == node && link.destination() == destination
                            })
                            .collect();
                        (destination, group)
                    })
                    .collect()
            })
            .unwrap_or_default();
        OutgoingLinks { groups }
    }

    /// Read-only snapshot of nodes and links for diagram export.
    pub fn topology(&self) -> Topology<N> {
        Topology::of(self)
    }

    /// Route a traveler minimizing current travel time at every junction.
    pub fn egoist_path(&self, source: &N) -> Result<Route<N>> {
        Router::new(self, RouterConfig::default()).route(source)
    }

    /// Route a traveler minimizing free-flow travel time at every junction.
    pub fn free_flow_path(&self, source: &N) -> Result<Route<N>> {
        let config = RouterConfig {
            attribute: CostAttribute::FreeFlow,
            ..RouterConfig::default()
        };
        Router::new(self, config).route(source)
    }

    fn find_link(&self, source: &N, destination: &N, skip: &[LinkId]) -> Result<LinkId> {
        self.links
            .iter()
            .find(|(id, link)| {
                link.source() == source && link.destination() == destination && !skip.contains(id)
            })
            .map(|(&id, _)| id)
            .ok_or_else(|| Error::LinkNotFound {
                from: source.to_string(),
                to: destination.to_string(),
            })
    }

    /// Remove a link, dropping its destination group once the group empties.
    fn take_link(&mut self, id: LinkId) -> Option<Link<N>> {
        let link = self.links.remove(&id)?;
        let still_linked = self.links.values().any(|other| {
            other.source() == link.source() && other.destination() == link.destination()
        });
        if !still_linked {
            if let Some(destinations) = self.destinations.get_mut(link.source()) {
                destinations.retain(|dest| dest != link.destination());
                if destinations.is_empty() {
                    self.destinations.remove(link.source());
                }
            }
        }
        Some(link)
    }

    fn incident_count(&self, node: &N) -> usize {
        self.links
            .values()
            .filter(|link| link.source() == node || link.destination() == node)
            .count()
    }
}

impl<N: NodeId> Default for Network<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Links leaving one node, grouped by destination.
///
/// Groups are ordered by when the destination first gained a link that is
/// still present; links within a group by insertion.
#[derive(Debug)]
pub struct OutgoingLinks<'a, N> {
    groups: Vec<(&'a N, Vec<(LinkId, &'a Link<N>)>)>,
}

impl<'a, N: PartialEq> OutgoingLinks<'a, N> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct destinations.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn destinations(&self) -> impl Iterator<Item = &'a N> + '_ {
        self.groups.iter().map(|(dest, _)| *dest)
    }

    /// Parallel links to `destination`.
    pub fn to(&self, destination: &N) -> &[(LinkId, &'a Link<N>)] {
        self.groups
            .iter()
            .find(|(dest, _)| *dest == destination)
            .map(|(_, group)| group.as_slice())
            .unwrap_or_default()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&'a N, &[(LinkId, &'a Link<N>)])> + '_ {
        self.groups.iter().map(|(dest, group)| (*dest, group.as_slice()))
    }

    /// Every candidate link, group by group.
    pub fn candidates(&self) -> impl Iterator<Item = (LinkId, &'a Link<N>)> + '_ {
        self.groups.iter().flat_map(|(_, group)| group.iter().copied())
    }
}
