//! Diagram rendering from topology snapshots.

use std::fs;
use std::path::Path;

use braess_network::{Network, NodeId, Topology};
use serde::Serialize;
use tracing::info;

use crate::{Error, Result};

/// Output formats understood by [`Diagram::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFormat {
    /// Graphviz DOT.
    Dot,
    /// Pretty-printed JSON topology.
    Json,
}

impl DiagramFormat {
    /// Pick a format from a file extension (`.dot`, `.gv`, `.json`).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("dot") | Some("gv") => Ok(Self::Dot),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Visual attributes for DOT output.
#[derive(Debug, Clone)]
pub struct DiagramStyle {
    pub node_color: String,
    pub font_color: String,
    pub bold_labels: bool,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            node_color: "lightgrey".to_string(),
            font_color: "black".to_string(),
            bold_labels: true,
        }
    }
}

/// A renderable picture of a network's shape.
#[derive(Debug, Clone)]
pub struct Diagram<N> {
    name: String,
    topology: Topology<N>,
    style: DiagramStyle,
}

impl<N: NodeId + Serialize> Diagram<N> {
    pub fn from_topology(topology: Topology<N>) -> Self {
        Self {
            name: "network".to_string(),
            topology,
            style: DiagramStyle::default(),
        }
    }

    /// Snapshot `network` and wrap it.
    pub fn from_network(network: &Network<N>) -> Self {
        Self::from_topology(network.topology())
    }

    /// Graph name used in DOT output.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, style: DiagramStyle) -> Self {
        self.style = style;
        self
    }

    pub fn topology(&self) -> &Topology<N> {
        &self.topology
    }

    /// Render as a Graphviz digraph. Parallel edges are kept.
    pub fn to_dot(&self) -> String {
        let bold = if self.style.bold_labels {
            ", fontname=\"Helvetica-Bold\""
        } else {
            ""
        };
        let mut out = format!("digraph \"{}\" {{\n", escape(&self.name));
        out.push_str(&format!(
            "    node [style=filled, fillcolor=\"{}\", fontcolor=\"{}\"{}];\n",
            escape(&self.style.node_color),
            escape(&self.style.font_color),
            bold
        ));
        for node in &self.topology.nodes {
            out.push_str(&format!("    \"{}\";\n", escape(&node.to_string())));
        }
        for edge in &self.topology.edges {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\"",
                escape(&edge.source.to_string()),
                escape(&edge.destination.to_string())
            ));
            match &edge.label {
                Some(label) => out.push_str(&format!(" [label=\"{}\"];\n", escape(label))),
                None => out.push_str(";\n"),
            }
        }
        out.push_str("}\n");
        out
    }

    /// Render the topology as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.topology)?)
    }

    pub fn render(&self, format: DiagramFormat) -> Result<String> {
        match format {
            DiagramFormat::Dot => Ok(self.to_dot()),
            DiagramFormat::Json => self.to_json(),
        }
    }

    /// Write the diagram, choosing the format from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = DiagramFormat::from_path(path)?;
        fs::write(path, self.render(format)?)?;
        info!(
            path = %path.display(),
            ?format,
            nodes = self.topology.nodes.len(),
            edges = self.topology.edges.len(),
            "diagram saved"
        );
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
