//! Braess Network Visualization
//!
//! Renders the shape of a road network for humans and other tools.
//!
//! # Architecture
//!
//! - **Diagram**: built from a [`Topology`] snapshot, never from a live
//!   network, so costs and occupancy cannot leak into the picture
//! - **DOT**: Graphviz digraph text, ready for `dot -Tpng`
//! - **JSON**: the snapshot itself, for web frontends
//!
//! # Usage
//!
//! ```ignore
//! let diagram = Diagram::from_network(&network);
//! diagram.save("braess.dot")?;
//! ```

mod diagram;
mod error;

pub use diagram::{Diagram, DiagramFormat, DiagramStyle};
pub use error::{Error, Result};

pub use braess_network::{Topology, TopologyEdge};
