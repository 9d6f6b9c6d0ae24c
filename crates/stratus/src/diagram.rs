//! The diagram builder: nodes, cluster scopes, edges, and finalization.
//!
//! A [`Diagram`] is opened through [`Diagram::builder`], populated through
//! [`Scope`] values (the diagram itself acts as the root scope), and
//! finalized by [`Diagram::render`], which consumes it. The closure-based
//! [`Diagram::scoped`] form ties the whole lifecycle to one lexical scope and
//! guarantees exactly one render-to-file side effect on success.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::{debug, info, trace};

use stratus_core::{
    attr::AttrMap,
    direction::Direction,
    identifier::slug,
    kind::NodeKind,
};

use crate::{
    StratusError,
    config::DiagramConfig,
    export::{Exporter, OutputFormat, dot::DotExporter},
    structure::{ClusterIndex, DiagramGraph, EdgeData, ROOT_CLUSTER},
};

/// Serial numbers tag every diagram so that handles cannot cross between
/// concurrently built diagrams undetected.
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Opaque handle to a node registered in a diagram.
///
/// Handles are `Copy` and remain valid for the lifetime of the diagram that
/// minted them. Passing a handle to a different diagram's `connect` is
/// rejected with [`StratusError::InvalidReference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    serial: u64,
    index: u32,
}

/// Style and direction of a recorded edge.
///
/// Edges are directed by default; [`Edge::undirected`] drops the arrowhead.
///
/// # Examples
///
/// ```
/// use stratus::Edge;
///
/// let plain = Edge::new();
/// let labeled = Edge::new().with_label("SQL queries");
/// let dashed = Edge::undirected().with_style("dashed").with_color("firebrick");
/// # let _ = (plain, labeled, dashed);
/// ```
#[derive(Debug, Clone)]
pub struct Edge {
    directed: bool,
    label: Option<String>,
    attrs: AttrMap,
}

impl Default for Edge {
    fn default() -> Self {
        Self {
            directed: true,
            label: None,
            attrs: AttrMap::new(),
        }
    }
}

impl Edge {
    /// A directed edge with no label.
    pub fn new() -> Self {
        Self::default()
    }

    /// An undirected edge with no label.
    pub fn undirected() -> Self {
        Self {
            directed: false,
            ..Self::default()
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the stroke color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.attrs.set("color", color);
        self
    }

    /// Sets the line style (`dashed`, `dotted`, `bold`, ...).
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.attrs.set("style", style);
        self
    }

    /// Sets a free-form style attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }
}

/// Edge endpoints: a single node or an ordered collection of nodes.
///
/// `connect` records one edge per source/target pairing, so a collection on
/// either side fans the connection out (or in) while preserving declaration
/// order.
pub trait Endpoints {
    /// The nodes this endpoint expands to, in order.
    fn nodes(&self) -> &[NodeHandle];
}

impl Endpoints for NodeHandle {
    fn nodes(&self) -> &[NodeHandle] {
        std::slice::from_ref(self)
    }
}

impl Endpoints for [NodeHandle] {
    fn nodes(&self) -> &[NodeHandle] {
        self
    }
}

impl<const N: usize> Endpoints for [NodeHandle; N] {
    fn nodes(&self) -> &[NodeHandle] {
        self.as_slice()
    }
}

impl Endpoints for Vec<NodeHandle> {
    fn nodes(&self) -> &[NodeHandle] {
        self.as_slice()
    }
}

impl<T: Endpoints + ?Sized> Endpoints for &T {
    fn nodes(&self) -> &[NodeHandle] {
        (**self).nodes()
    }
}

/// Validates endpoints against the owning diagram and records the cartesian
/// product of source/target pairings, in declaration order.
fn record_edges(
    graph: &mut DiagramGraph,
    serial: u64,
    sources: &[NodeHandle],
    targets: &[NodeHandle],
    edge: &Edge,
) -> Result<(), StratusError> {
    for handle in sources.iter().chain(targets.iter()) {
        if handle.serial != serial {
            return Err(StratusError::InvalidReference(
                "node handle was created by a different diagram".to_string(),
            ));
        }
    }

    for source in sources {
        for target in targets {
            graph.add_edge(EdgeData::new(
                source.index,
                target.index,
                edge.directed,
                edge.label.clone(),
                edge.attrs.clone(),
            ));
        }
    }
    Ok(())
}

/// The cluster currently being populated.
///
/// A `Scope` is handed to the closures of [`Scope::cluster`] and
/// [`Diagram::scoped`]; everything registered through it lands in that
/// cluster. Edges are diagram-global and may connect nodes across cluster
/// boundaries.
#[derive(Debug)]
pub struct Scope<'d> {
    graph: &'d mut DiagramGraph,
    serial: u64,
    cluster: ClusterIndex,
}

impl Scope<'_> {
    /// Registers a node in this scope and returns its handle.
    ///
    /// Labels carry no uniqueness constraint; the kind only selects the
    /// node's glyph.
    pub fn node(&mut self, kind: NodeKind, label: impl Into<String>) -> NodeHandle {
        let label = label.into();
        trace!(label = label, kind = kind.name(); "Registering node");
        let index = self.graph.add_node(self.cluster, kind, label);
        NodeHandle {
            serial: self.serial,
            index,
        }
    }

    /// Opens a nested cluster for the duration of `f` and forwards its
    /// return value.
    ///
    /// Scoping is deterministic by construction: the child scope borrows
    /// this one mutably, so it always closes (the closure returns) before
    /// anything further happens in the parent. An unclosed child scope is
    /// unrepresentable.
    pub fn cluster<R>(&mut self, name: &str, f: impl FnOnce(&mut Scope<'_>) -> R) -> R {
        self.cluster_with(name, AttrMap::new(), f)
    }

    /// [`cluster`](Self::cluster) with per-cluster style attributes.
    pub fn cluster_with<R>(
        &mut self,
        name: &str,
        attrs: AttrMap,
        f: impl FnOnce(&mut Scope<'_>) -> R,
    ) -> R {
        let index = self.graph.add_cluster(self.cluster, name, attrs);
        debug!(name = name, depth = self.graph.cluster(index).depth(); "Opened cluster");
        let mut scope = Scope {
            graph: &mut *self.graph,
            serial: self.serial,
            cluster: index,
        };
        f(&mut scope)
    }

    /// Records an edge for every source/target pairing.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::InvalidReference`] if any endpoint handle was
    /// created by a different diagram.
    pub fn connect(
        &mut self,
        source: impl Endpoints,
        target: impl Endpoints,
        edge: Edge,
    ) -> Result<(), StratusError> {
        record_edges(self.graph, self.serial, source.nodes(), target.nodes(), &edge)
    }

    /// Connects consecutive nodes of `chain` pairwise with copies of `edge`.
    pub fn connect_chain(
        &mut self,
        chain: &[NodeHandle],
        edge: Edge,
    ) -> Result<(), StratusError> {
        for pair in chain.windows(2) {
            record_edges(self.graph, self.serial, &pair[..1], &pair[1..], &edge)?;
        }
        Ok(())
    }

    /// The containment path of this scope, e.g. `my_diagram/aws_cloud/vpc`.
    pub fn path(&self) -> String {
        self.graph.cluster(self.cluster).id().to_string()
    }
}

/// Builder for opening a [`Diagram`].
///
/// # Examples
///
/// ```no_run
/// use stratus::{Diagram, Direction, OutputFormat};
///
/// let diagram = Diagram::builder("Prototype Architecture")
///     .direction(Direction::LeftRight)
///     .format(OutputFormat::Svg)
///     .graph_attr("fontsize", "24")
///     .build()
///     .expect("output directory should be writable");
/// # let _ = diagram;
/// ```
#[derive(Debug)]
pub struct DiagramBuilder {
    title: String,
    config: DiagramConfig,
}

impl DiagramBuilder {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            config: DiagramConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: DiagramConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the rendering direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.set_direction(direction);
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.set_format(format);
        self
    }

    /// Sets the artifact file stem (defaults to a slug of the title).
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.config.set_filename(filename);
        self
    }

    /// Sets the directory the artifact is written to.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.set_output_dir(dir);
        self
    }

    /// Adds a graph-level style attribute.
    pub fn graph_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.graph_attr_mut().set(key, value);
        self
    }

    /// Adds a default node style attribute.
    pub fn node_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.node_attr_mut().set(key, value);
        self
    }

    /// Adds a default edge style attribute.
    pub fn edge_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.edge_attr_mut().set(key, value);
        self
    }

    /// Adds a style attribute applied to every cluster.
    pub fn cluster_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.cluster_attr_mut().set(key, value);
        self
    }

    /// Opens the diagram.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::Render`] if the output directory does not
    /// accept writes; the problem surfaces here rather than after the whole
    /// topology has been declared.
    pub fn build(self) -> Result<Diagram, StratusError> {
        let dir = self
            .config
            .output_dir()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let probe = tempfile::NamedTempFile::new_in(&dir).map_err(|err| {
            StratusError::Render(format!(
                "output directory `{}` is not writable: {err}",
                dir.display()
            ))
        })?;
        drop(probe);

        let stem = match self.config.filename() {
            Some(filename) => filename.to_string(),
            None => slug(&self.title),
        };
        let output_path = dir.join(format!("{stem}.{}", self.config.format().extension()));

        debug!(
            title = self.title,
            output = output_path.display().to_string();
            "Opened diagram build"
        );

        Ok(Diagram {
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            graph: DiagramGraph::new(&self.title),
            title: self.title,
            config: self.config,
            output_path,
        })
    }
}

/// The root container of one diagram build.
///
/// Owns every node, cluster, and edge declared within it. The diagram itself
/// behaves as the root [`Scope`]; rendering consumes it, so a finalized
/// diagram can no longer be mutated.
#[derive(Debug)]
pub struct Diagram {
    serial: u64,
    title: String,
    config: DiagramConfig,
    graph: DiagramGraph,
    output_path: PathBuf,
}

impl Diagram {
    /// Starts building a diagram with the given title.
    pub fn builder(title: impl Into<String>) -> DiagramBuilder {
        DiagramBuilder::new(title)
    }

    /// Builds and renders a diagram within one closure scope.
    ///
    /// The closure receives the root scope; on success the diagram is
    /// rendered exactly once and the artifact path is returned. If the
    /// closure fails, nothing is written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stratus::{Diagram, Edge, kind::aws};
    ///
    /// let path = Diagram::scoped("Web Service", Default::default(), |d| {
    ///     let lb = d.node(aws::network::ELB, "Load Balancer");
    ///     let db = d.cluster("RDS Cluster", |c| c.node(aws::database::RDS, "Primary DB"));
    ///     d.connect(lb, db, Edge::new())
    /// })?;
    /// println!("wrote {}", path.display());
    /// # Ok::<(), stratus::StratusError>(())
    /// ```
    pub fn scoped<F>(
        title: impl Into<String>,
        config: DiagramConfig,
        f: F,
    ) -> Result<PathBuf, StratusError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), StratusError>,
    {
        let mut diagram = Self::builder(title).config(config).build()?;
        {
            let mut root = diagram.root_scope();
            f(&mut root)?;
        }
        diagram.render()
    }

    /// Returns the root scope of this diagram.
    pub fn root_scope(&mut self) -> Scope<'_> {
        Scope {
            graph: &mut self.graph,
            serial: self.serial,
            cluster: ROOT_CLUSTER,
        }
    }

    /// Registers a node at the diagram's top level. See [`Scope::node`].
    pub fn node(&mut self, kind: NodeKind, label: impl Into<String>) -> NodeHandle {
        self.root_scope().node(kind, label)
    }

    /// Opens a top-level cluster. See [`Scope::cluster`].
    pub fn cluster<R>(&mut self, name: &str, f: impl FnOnce(&mut Scope<'_>) -> R) -> R {
        self.root_scope().cluster(name, f)
    }

    /// Opens a top-level cluster with style attributes. See
    /// [`Scope::cluster_with`].
    pub fn cluster_with<R>(
        &mut self,
        name: &str,
        attrs: AttrMap,
        f: impl FnOnce(&mut Scope<'_>) -> R,
    ) -> R {
        self.root_scope().cluster_with(name, attrs, f)
    }

    /// Records an edge for every source/target pairing. See
    /// [`Scope::connect`].
    pub fn connect(
        &mut self,
        source: impl Endpoints,
        target: impl Endpoints,
        edge: Edge,
    ) -> Result<(), StratusError> {
        self.root_scope().connect(source, target, edge)
    }

    /// Connects consecutive nodes pairwise. See [`Scope::connect_chain`].
    pub fn connect_chain(
        &mut self,
        chain: &[NodeHandle],
        edge: Edge,
    ) -> Result<(), StratusError> {
        self.root_scope().connect_chain(chain, edge)
    }

    /// The diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The build configuration.
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// The path the artifact will be written to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of recorded edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of clusters (the root scope is not counted).
    pub fn cluster_count(&self) -> usize {
        self.graph.cluster_count()
    }

    /// The display label of a node, if the handle belongs to this diagram.
    pub fn node_label(&self, handle: NodeHandle) -> Option<&str> {
        (handle.serial == self.serial).then(|| self.graph.node(handle.index).label())
    }

    /// The containment path of the cluster a node was declared in, e.g.
    /// `my_diagram/aws_cloud/vpc`, if the handle belongs to this diagram.
    pub fn node_cluster_path(&self, handle: NodeHandle) -> Option<String> {
        (handle.serial == self.serial).then(|| {
            let cluster = self.graph.node(handle.index).cluster();
            self.graph.cluster(cluster).id().to_string()
        })
    }

    /// Recorded edges as `(source, target)` handle pairs, in declaration
    /// order.
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (NodeHandle, NodeHandle)> + '_ {
        self.graph.edges().iter().map(|edge| {
            (
                NodeHandle {
                    serial: self.serial,
                    index: edge.source(),
                },
                NodeHandle {
                    serial: self.serial,
                    index: edge.target(),
                },
            )
        })
    }

    /// Renders the diagram's DOT source in memory.
    ///
    /// Useful for embedding the graph description elsewhere and for tests;
    /// no external engine is involved.
    pub fn dot(&self) -> String {
        crate::export::dot::lower(self).print(&mut PrinterContext::default())
    }

    /// Finalizes the diagram: lowers it and writes the output artifact.
    ///
    /// Consumes the diagram, so exactly one artifact is produced per build.
    ///
    /// # Errors
    ///
    /// Returns [`StratusError::Render`] if the external engine cannot be
    /// invoked, or [`StratusError::Io`] if the artifact cannot be written.
    /// On error no partial output file is left behind.
    pub fn render(self) -> Result<PathBuf, StratusError> {
        info!(
            title = self.title,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count();
            "Rendering diagram"
        );

        let mut exporter = DotExporter::new(&self.output_path, self.config.format());
        let path = exporter.export(&self)?;

        info!(output = path.display().to_string(); "Artifact written");
        Ok(path)
    }

    pub(crate) fn graph(&self) -> &DiagramGraph {
        &self.graph
    }
}
