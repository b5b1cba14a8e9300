//! Read-only topology export.
//!
//! A [`Topology`] carries nodes and link endpoints only. Costs and occupancy
//! stay behind, so diagram renderers cannot depend on traffic state.

use crate::{LinkId, Network, NodeId};

/// One directed edge of an exported topology.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyEdge<N> {
    pub id: LinkId,
    pub source: N,
    pub destination: N,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,
}

/// Snapshot of a network's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology<N> {
    /// Nodes in insertion order.
    pub nodes: Vec<N>,
    /// Edges in insertion order, parallel edges included.
    pub edges: Vec<TopologyEdge<N>>,
}

impl<N: NodeId> Topology<N> {
    pub(crate) fn of(network: &Network<N>) -> Self {
        Self {
            nodes: network.nodes().cloned().collect(),
            edges: network
                .links()
                .map(|(id, link)| TopologyEdge {
                    id,
                    source: link.source().clone(),
                    destination: link.destination().clone(),
                    label: link.label().map(str::to_owned),
                })
                .collect(),
        }
    }

    /// Edges leaving `node`.
    pub fn edges_of<'a>(&'a self, node: &'a N) -> impl Iterator<Item = &'a TopologyEdge<N>> {
        self.edges.iter().filter(move |edge| &edge.source == node)
    }
}
