//! Configuration types for diagram builds.
//!
//! [`DiagramConfig`] groups everything about a build that is not topology:
//! rendering direction, output format and location, and the style attribute
//! maps applied at graph, node, edge, and cluster level. All fields have
//! defaults and the type implements [`serde::Deserialize`], so hosts can load
//! configurations from any serde format.
//!
//! # Example
//!
//! ```
//! use stratus::{Direction, config::DiagramConfig};
//!
//! let mut config = DiagramConfig::default();
//! config.set_direction(Direction::LeftRight);
//! config.graph_attr_mut().set("fontsize", "24");
//! assert_eq!(config.graph_attr().get("fontsize"), Some("24"));
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use stratus_core::{attr::AttrMap, direction::Direction};

use crate::export::OutputFormat;

/// Build configuration for one diagram.
///
/// Attribute maps are merged over the built-in rendering defaults; an entry
/// here always wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagramConfig {
    /// Rendering direction (`rankdir`).
    #[serde(default)]
    direction: Direction,

    /// Output artifact format.
    #[serde(default)]
    format: OutputFormat,

    /// Artifact file stem; defaults to a slug of the diagram title.
    #[serde(default)]
    filename: Option<String>,

    /// Directory the artifact is written to; defaults to the working
    /// directory.
    #[serde(default)]
    output_dir: Option<PathBuf>,

    /// Graph-level style attributes.
    #[serde(default)]
    graph_attr: AttrMap,

    /// Default node style attributes.
    #[serde(default)]
    node_attr: AttrMap,

    /// Default edge style attributes.
    #[serde(default)]
    edge_attr: AttrMap,

    /// Style attributes applied to every cluster.
    #[serde(default)]
    cluster_attr: AttrMap,
}

impl DiagramConfig {
    /// Returns the rendering direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the configured file stem, if any.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Returns the configured output directory, if any.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Returns the graph-level style attributes.
    pub fn graph_attr(&self) -> &AttrMap {
        &self.graph_attr
    }

    /// Returns the default node style attributes.
    pub fn node_attr(&self) -> &AttrMap {
        &self.node_attr
    }

    /// Returns the default edge style attributes.
    pub fn edge_attr(&self) -> &AttrMap {
        &self.edge_attr
    }

    /// Returns the cluster style attributes.
    pub fn cluster_attr(&self) -> &AttrMap {
        &self.cluster_attr
    }

    /// Sets the rendering direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Sets the output format.
    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    /// Sets the artifact file stem.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    /// Sets the output directory.
    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = Some(dir.into());
    }

    /// Mutable access to the graph-level style attributes.
    pub fn graph_attr_mut(&mut self) -> &mut AttrMap {
        &mut self.graph_attr
    }

    /// Mutable access to the default node style attributes.
    pub fn node_attr_mut(&mut self) -> &mut AttrMap {
        &mut self.node_attr
    }

    /// Mutable access to the default edge style attributes.
    pub fn edge_attr_mut(&mut self) -> &mut AttrMap {
        &mut self.edge_attr
    }

    /// Mutable access to the cluster style attributes.
    pub fn cluster_attr_mut(&mut self) -> &mut AttrMap {
        &mut self.cluster_attr
    }
}
