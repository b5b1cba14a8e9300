//! Error types for braess-network.

use thiserror::Error;

use crate::LinkId;

/// Result type for network operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mutating or routing over a network.
///
/// Every failing operation leaves the network exactly as it was before the
/// call. Node identifiers are carried in their display form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// More occupants were asked to leave a link than it currently holds.
    #[error("cannot remove {requested} occupants from a link holding {present}")]
    Underflow { requested: u64, present: u64 },

    /// The node is not part of the network.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No link joins the given pair of nodes.
    #[error("no link from {from} to {to}")]
    LinkNotFound { from: String, to: String },

    /// The link id does not belong to this network (or was removed).
    #[error("unknown link: {0}")]
    UnknownLink(LinkId),

    /// A traversal reached a link whose endpoint is not a node of the network.
    #[error("{link} points at missing node {node}")]
    DanglingReference { link: LinkId, node: String },

    /// A routing query ran past its step limit without reaching a sink.
    #[error("route from {start} did not reach a sink within {max_steps} steps")]
    RoutingDivergence { start: String, max_steps: usize },

    /// The node still has incident links and the removal policy rejects it.
    #[error("node {node} still has {links} incident links")]
    NodeInUse { node: String, links: usize },

    /// A candidate link evaluated to NaN, so no cheapest link exists.
    #[error("{link} has an undefined cost")]
    InvalidCost { link: LinkId },
}
