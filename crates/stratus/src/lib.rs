//! Stratus - architecture diagrams as code.
//!
//! Declare cloud infrastructure topologies as labeled nodes, nested clusters,
//! and directed/undirected edges; layout and rendering are delegated to the
//! external Graphviz engine. There is no DSL: diagrams are plain Rust code.
//!
//! # Examples
//!
//! ```rust,no_run
//! use stratus::{Diagram, Direction, Edge, kind::aws};
//!
//! # fn main() -> Result<(), stratus::StratusError> {
//! let path = Diagram::scoped("Prototype Architecture", Default::default(), |d| {
//!     let user = d.node(aws::general::USER, "User");
//!
//!     let (lb, db) = d.cluster("AWS Cloud", |aws_cloud| {
//!         let lb = aws_cloud.node(aws::network::ELB, "Load Balancer");
//!         let db = aws_cloud.cluster("RDS Cluster", |rds| {
//!             rds.node(aws::database::RDS, "Primary DB")
//!         });
//!         (lb, db)
//!     });
//!
//!     d.connect(user, lb, Edge::new())?;
//!     d.connect(lb, db, Edge::new().with_label("SQL"))
//! })?;
//! println!("diagram written to {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod config;

mod diagram;
mod error;
mod export;
mod structure;

pub use stratus_core::{attr, attr::AttrMap, direction::Direction, identifier, kind};

pub use diagram::{Diagram, DiagramBuilder, Edge, Endpoints, NodeHandle, Scope};
pub use error::StratusError;
pub use export::{Exporter, OutputFormat, dot::DotExporter};
