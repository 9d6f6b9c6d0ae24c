//! DOT export backend.
//!
//! Lowers a populated diagram into a `dot-structures` graph, then either
//! prints the DOT source in-process or invokes the Graphviz engine
//! (`graphviz_rust::exec`) for raster/vector formats. Output is written
//! through a temporary file in the target directory and persisted only on
//! success, so a failed render never leaves a partial artifact.

use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id as DotId, Node as DotNode,
    NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::{
    cmd::CommandArg,
    exec,
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, trace};
use tempfile::NamedTempFile;

use stratus_core::attr::AttrMap;

use super::{Error, Exporter, OutputFormat};
use crate::{
    Diagram,
    structure::{ClusterIndex, DiagramGraph, EdgeData, NodeData, ROOT_CLUSTER},
};

// Rendering defaults, matched to what users of diagrams-as-code tooling
// expect out of the box. All of these can be overridden per diagram.
const GRAPH_DEFAULTS: &[(&str, &str)] = &[
    ("pad", "2.0"),
    ("splines", "ortho"),
    ("nodesep", "0.60"),
    ("ranksep", "0.75"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "15"),
    ("fontcolor", "#2D3436"),
];

const NODE_DEFAULTS: &[(&str, &str)] = &[
    ("fontname", "Sans-Serif"),
    ("fontsize", "13"),
    ("fontcolor", "#2D3436"),
];

const EDGE_DEFAULTS: &[(&str, &str)] = &[("color", "#7B8894")];

const CLUSTER_DEFAULTS: &[(&str, &str)] = &[
    ("labeljust", "l"),
    ("pencolor", "#AEB6BE"),
    ("fontname", "Sans-Serif"),
    ("fontsize", "12"),
    ("style", "rounded"),
];

/// Cluster backgrounds rotate through these tints by nesting depth.
const CLUSTER_FILLS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// The built-in DOT/Graphviz export backend.
#[derive(Debug)]
pub struct DotExporter {
    output_path: PathBuf,
    format: OutputFormat,
}

impl DotExporter {
    /// Creates an exporter writing `format` output to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_path: output_path.into(),
            format,
        }
    }
}

impl Exporter for DotExporter {
    fn export(&mut self, diagram: &Diagram) -> Result<PathBuf, Error> {
        let graph = lower(diagram);
        trace!(dot = graph.print(&mut PrinterContext::default()); "Lowered diagram");

        let bytes = match self.format.engine_format() {
            None => graph.print(&mut PrinterContext::default()).into_bytes(),
            Some(engine_format) => exec(
                graph,
                &mut PrinterContext::default(),
                vec![CommandArg::Format(engine_format)],
            )
            .map_err(engine_error)?,
        };

        debug!(
            output = self.output_path.display().to_string(),
            bytes = bytes.len();
            "Writing artifact"
        );
        write_atomically(&self.output_path, &bytes)?;
        Ok(self.output_path.clone())
    }
}

/// Writes through a temporary file in the destination directory so the final
/// path only ever holds a complete artifact.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(Error::Io)?;
    tmp.write_all(bytes).map_err(Error::Io)?;
    tmp.persist(path).map_err(|err| Error::Io(err.error))?;
    Ok(())
}

fn engine_error(err: std::io::Error) -> Error {
    if err.kind() == ErrorKind::NotFound {
        Error::Render(
            "Graphviz executable not found; install Graphviz or render to the `dot` format"
                .to_string(),
        )
    } else {
        Error::Render(format!("Graphviz invocation failed: {err}"))
    }
}

/// Lowers the diagram into a DOT graph.
///
/// The graph is always a digraph; undirected edges carry `dir=none`, which is
/// what keeps a single rank-direction-driven layout pass for mixed diagrams.
pub(crate) fn lower(diagram: &Diagram) -> Graph {
    let graph = diagram.graph();
    let config = diagram.config();

    let mut stmts = Vec::new();

    let mut graph_attrs: AttrMap = GRAPH_DEFAULTS.iter().copied().collect();
    graph_attrs.set("rankdir", config.direction().rankdir());
    graph_attrs.set("label", diagram.title());
    graph_attrs.merge(config.graph_attr());
    stmts.push(Stmt::GAttribute(GraphAttributes::Graph(to_attributes(
        &graph_attrs,
    ))));

    let mut node_attrs: AttrMap = NODE_DEFAULTS.iter().copied().collect();
    node_attrs.merge(config.node_attr());
    stmts.push(Stmt::GAttribute(GraphAttributes::Node(to_attributes(
        &node_attrs,
    ))));

    let mut edge_attrs: AttrMap = EDGE_DEFAULTS.iter().copied().collect();
    edge_attrs.merge(config.edge_attr());
    stmts.push(Stmt::GAttribute(GraphAttributes::Edge(to_attributes(
        &edge_attrs,
    ))));

    // Containment first: root-level nodes, then cluster subtrees, exactly as
    // declared. Edges reference nodes by id and go last.
    let root = graph.cluster(ROOT_CLUSTER);
    for &node_index in root.node_indices() {
        stmts.push(node_stmt(graph.node(node_index)));
    }
    for &child in root.children() {
        stmts.push(Stmt::Subgraph(lower_cluster(diagram, child)));
    }
    for edge in graph.edges() {
        stmts.push(edge_stmt(graph, edge));
    }

    Graph::DiGraph {
        id: quoted(diagram.title()),
        strict: false,
        stmts,
    }
}

fn lower_cluster(diagram: &Diagram, index: ClusterIndex) -> Subgraph {
    let graph = diagram.graph();
    let cluster = graph.cluster(index);

    let mut attrs: AttrMap = CLUSTER_DEFAULTS.iter().copied().collect();
    attrs.set(
        "bgcolor",
        CLUSTER_FILLS[(cluster.depth() - 1) % CLUSTER_FILLS.len()],
    );
    attrs.set("label", cluster.name());
    attrs.merge(diagram.config().cluster_attr());
    attrs.merge(cluster.attrs());

    let mut stmts = vec![Stmt::GAttribute(GraphAttributes::Graph(to_attributes(
        &attrs,
    )))];
    for &node_index in cluster.node_indices() {
        stmts.push(node_stmt(graph.node(node_index)));
    }
    for &child in cluster.children() {
        stmts.push(Stmt::Subgraph(lower_cluster(diagram, child)));
    }

    Subgraph {
        id: DotId::Plain(format!("cluster_{index}")),
        stmts,
    }
}

fn node_stmt(node: &NodeData) -> Stmt {
    let glyph = node.kind().glyph();

    let mut attributes = vec![
        attr("label", node.label()),
        attr("shape", glyph.shape().dot_shape()),
    ];

    let mut styles = Vec::new();
    if glyph.shape().is_rounded() {
        styles.push("rounded");
    }
    if glyph.fill().is_some() {
        styles.push("filled");
    }
    if !styles.is_empty() {
        attributes.push(attr("style", &styles.join(",")));
    }
    if let Some(fill) = glyph.fill() {
        attributes.push(attr("fillcolor", fill));
    }

    Stmt::Node(DotNode {
        id: node_id(node),
        attributes,
    })
}

fn edge_stmt(graph: &DiagramGraph, edge: &EdgeData) -> Stmt {
    let mut attributes = Vec::new();
    if !edge.is_directed() {
        attributes.push(attr("dir", "none"));
    }
    if let Some(label) = edge.label() {
        attributes.push(attr("label", label));
    }
    attributes.extend(to_attributes(edge.attrs()));

    Stmt::Edge(DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(graph.node(edge.source()))),
            Vertex::N(node_id(graph.node(edge.target()))),
        ),
        attributes,
    })
}

fn node_id(node: &NodeData) -> NodeId {
    // Minted ids are slugs, always safe as plain DOT identifiers.
    NodeId(DotId::Plain(node.id().to_string()), None)
}

fn to_attributes(attrs: &AttrMap) -> Vec<Attribute> {
    attrs.iter().map(|(key, value)| attr(key, value)).collect()
}

/// Keys are known identifier-safe strings; values are always quoted.
fn attr(key: &str, value: &str) -> Attribute {
    Attribute(DotId::Plain(key.to_string()), quoted(value))
}

fn quoted(value: &str) -> DotId {
    DotId::Escaped(format!(
        "\"{}\"",
        value.replace('\\', "\\\\").replace('"', "\\\"")
    ))
}

#[cfg(test)]
mod tests {
    use stratus_core::kind::{NodeKind, aws};

    use super::*;
    use crate::{Edge, config::DiagramConfig};

    fn diagram(title: &str) -> Diagram {
        Diagram::builder(title)
            .format(OutputFormat::Dot)
            .build()
            .expect("diagram should open")
    }

    #[test]
    fn test_empty_diagram_lowers_to_header_only() {
        let d = diagram("Empty");
        let dot = d.dot();

        assert!(dot.starts_with("digraph \"Empty\""), "got: {dot}");
        assert!(dot.contains("label=\"Empty\""));
        assert!(dot.contains("rankdir=\"TB\""));
        assert!(!dot.contains("cluster_"));
    }

    #[test]
    fn test_node_glyph_attributes() {
        let mut d = diagram("Glyphs");
        d.node(aws::database::RDS, "Primary DB");
        let dot = d.dot();

        assert!(dot.contains("primary_db_0"));
        assert!(dot.contains("label=\"Primary DB\""));
        assert!(dot.contains("shape=\"cylinder\""));
        assert!(dot.contains("style=\"filled\""));
        assert!(dot.contains("fillcolor=\"#FCE6CC\""));
    }

    #[test]
    fn test_unfilled_custom_kind_has_no_fill() {
        let mut d = diagram("Custom");
        d.node(NodeKind::custom("queue"), "Jobs");
        let dot = d.dot();

        assert!(dot.contains("style=\"rounded\""));
        assert!(!dot.contains("fillcolor"));
    }

    #[test]
    fn test_cluster_emitted_with_rotating_fill() {
        let mut d = diagram("Clusters");
        d.cluster("Outer", |outer| {
            outer.node(aws::compute::EKS, "EKS");
            outer.cluster("Inner", |inner| {
                inner.node(aws::compute::EKS, "EKS");
            });
        });
        let dot = d.dot();

        assert!(dot.contains("subgraph cluster_1"));
        assert!(dot.contains("subgraph cluster_2"));
        assert!(dot.contains(&format!("bgcolor=\"{}\"", CLUSTER_FILLS[0])));
        assert!(dot.contains(&format!("bgcolor=\"{}\"", CLUSTER_FILLS[1])));
        assert!(dot.contains("label=\"Outer\""));
        assert!(dot.contains("label=\"Inner\""));
    }

    #[test]
    fn test_node_appears_inside_its_cluster() {
        let mut d = diagram("Containment");
        d.cluster("Zone", |zone| {
            zone.node(aws::compute::EKS, "Lonely");
        });
        let dot = d.dot();

        let cluster_at = dot.find("subgraph cluster_1").expect("cluster emitted");
        let node_at = dot.find("lonely_0").expect("node emitted");
        assert!(
            cluster_at < node_at,
            "node should be declared inside the cluster body"
        );
    }

    #[test]
    fn test_undirected_edge_has_dir_none() {
        let mut d = diagram("Edges");
        let a = d.node(NodeKind::custom("a"), "a");
        let b = d.node(NodeKind::custom("b"), "b");
        d.connect(a, b, Edge::undirected()).unwrap();
        let dot = d.dot();

        assert!(dot.contains("dir=\"none\""));
    }

    #[test]
    fn test_edge_label_and_direction() {
        let mut d = diagram("Edges");
        let a = d.node(NodeKind::custom("a"), "client");
        let b = d.node(NodeKind::custom("b"), "server");
        d.connect(a, b, Edge::new().with_label("HTTP")).unwrap();
        let dot = d.dot();

        assert!(dot.contains("client_0 -> server_1"));
        assert!(dot.contains("label=\"HTTP\""));
        assert!(!dot.contains("dir=\"none\""));
    }

    #[test]
    fn test_quoting_escapes_embedded_quotes() {
        let id = quoted("say \"hi\"");
        match id {
            DotId::Escaped(text) => assert_eq!(text, "\"say \\\"hi\\\"\""),
            other => panic!("expected escaped id, got {other:?}"),
        }
    }

    #[test]
    fn test_config_attrs_override_defaults() {
        let mut config = DiagramConfig::default();
        config.set_format(OutputFormat::Dot);
        config.graph_attr_mut().set("fontsize", "24");
        config.node_attr_mut().set("fontsize", "16");

        let d = Diagram::builder("Overrides")
            .config(config)
            .build()
            .unwrap();
        let dot = d.dot();

        assert!(dot.contains("fontsize=\"24\""));
        assert!(dot.contains("fontsize=\"16\""));
        assert!(!dot.contains("fontsize=\"15\""));
    }
}
