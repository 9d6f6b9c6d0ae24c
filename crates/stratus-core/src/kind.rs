//! Node kinds and the glyphs they select.
//!
//! A node's kind is a category used only to pick its visual treatment: the
//! shape and fill the rendering engine draws for it. The catalog below covers
//! the cloud/infrastructure vocabulary this library is used for, organized by
//! provider namespace ([`aws`], [`k8s`], [`onprem`], [`programming`]).
//! Free-form kinds are supported through [`NodeKind::custom`].

use std::borrow::Cow;

use serde::Deserialize;

/// The shape drawn for a node, in the rendering engine's shape vocabulary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    /// Plain rectangle
    Box,
    /// Rectangle with rounded corners (default)
    #[default]
    RoundedBox,
    /// Ellipse
    Ellipse,
    /// Database cylinder
    Cylinder,
    /// UML component
    Component,
    /// File folder
    Folder,
    /// Three-dimensional box
    Box3d,
    /// Hexagon
    Hexagon,
    /// House pentagon
    House,
    /// Trapezium
    Trapezium,
    /// Index tab
    Tab,
    /// Seven-sided polygon
    Septagon,
    /// Note with a folded corner
    Note,
    /// Compact-disc shape
    Cds,
}

impl NodeShape {
    /// Returns the engine's name for this shape.
    pub fn dot_shape(self) -> &'static str {
        match self {
            Self::Box | Self::RoundedBox => "box",
            Self::Ellipse => "ellipse",
            Self::Cylinder => "cylinder",
            Self::Component => "component",
            Self::Folder => "folder",
            Self::Box3d => "box3d",
            Self::Hexagon => "hexagon",
            Self::House => "house",
            Self::Trapezium => "trapezium",
            Self::Tab => "tab",
            Self::Septagon => "septagon",
            Self::Note => "note",
            Self::Cds => "cds",
        }
    }

    /// Whether the shape is drawn with rounded corners (a style flag, not a
    /// distinct engine shape).
    pub fn is_rounded(self) -> bool {
        matches!(self, Self::RoundedBox)
    }
}

/// Visual treatment selected by a node's kind: shape plus optional fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    shape: NodeShape,
    fill: Option<&'static str>,
}

impl Glyph {
    /// Returns the glyph's shape.
    pub fn shape(self) -> NodeShape {
        self.shape
    }

    /// Returns the glyph's fill color, if any.
    pub fn fill(self) -> Option<&'static str> {
        self.fill
    }
}

/// The category of a node.
///
/// Kinds carry no behavior; they exist to select a [`Glyph`] and to document
/// what the node represents. Catalog kinds use dotted provider paths as names
/// (`"aws.network.elb"`); custom kinds take any name.
///
/// # Examples
///
/// ```
/// use stratus_core::kind::{NodeKind, NodeShape, aws};
///
/// assert_eq!(aws::database::RDS.name(), "aws.database.rds");
/// assert_eq!(aws::database::RDS.glyph().shape(), NodeShape::Cylinder);
///
/// let cache = NodeKind::custom("memcached").with_shape(NodeShape::Cylinder);
/// assert_eq!(cache.name(), "memcached");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKind {
    name: Cow<'static, str>,
    glyph: Glyph,
}

impl NodeKind {
    /// Catalog constructor; the catalog modules below are the only callers.
    const fn catalog(name: &'static str, shape: NodeShape, fill: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            glyph: Glyph {
                shape,
                fill: Some(fill),
            },
        }
    }

    /// Creates a free-form kind with the default glyph (rounded box, no fill).
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            glyph: Glyph {
                shape: NodeShape::default(),
                fill: None,
            },
        }
    }

    /// Replaces the glyph's shape.
    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.glyph.shape = shape;
        self
    }

    /// Returns the kind's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the glyph this kind selects.
    pub fn glyph(&self) -> Glyph {
        self.glyph
    }
}

// Provider fills, one tint per namespace so related nodes read as a family.
const AWS_FILL: &str = "#FCE6CC";
const K8S_FILL: &str = "#D9E7F8";
const ONPREM_FILL: &str = "#E8E8E8";
const PROGRAMMING_FILL: &str = "#DFF0D8";

/// Amazon Web Services resource kinds.
pub mod aws {
    /// Networking and content delivery.
    pub mod network {
        use crate::kind::{AWS_FILL, NodeKind, NodeShape};

        pub const ROUTE53: NodeKind =
            NodeKind::catalog("aws.network.route53", NodeShape::Ellipse, AWS_FILL);
        pub const ELB: NodeKind = NodeKind::catalog("aws.network.elb", NodeShape::Hexagon, AWS_FILL);
        pub const VPC: NodeKind = NodeKind::catalog("aws.network.vpc", NodeShape::Box, AWS_FILL);
        pub const PUBLIC_SUBNET: NodeKind =
            NodeKind::catalog("aws.network.public_subnet", NodeShape::Box, AWS_FILL);
        pub const PRIVATE_SUBNET: NodeKind =
            NodeKind::catalog("aws.network.private_subnet", NodeShape::Box, AWS_FILL);
        pub const INTERNET_GATEWAY: NodeKind =
            NodeKind::catalog("aws.network.internet_gateway", NodeShape::House, AWS_FILL);
    }

    /// Security, identity, and compliance.
    pub mod security {
        use crate::kind::{AWS_FILL, NodeKind, NodeShape};

        pub const WAF: NodeKind =
            NodeKind::catalog("aws.security.waf", NodeShape::Septagon, AWS_FILL);
    }

    /// Compute and container services.
    pub mod compute {
        use crate::kind::{AWS_FILL, NodeKind, NodeShape};

        pub const ECR: NodeKind = NodeKind::catalog("aws.compute.ecr", NodeShape::Box3d, AWS_FILL);
        pub const EKS: NodeKind =
            NodeKind::catalog("aws.compute.eks", NodeShape::Component, AWS_FILL);
    }

    /// Managed databases.
    pub mod database {
        use crate::kind::{AWS_FILL, NodeKind, NodeShape};

        pub const RDS: NodeKind =
            NodeKind::catalog("aws.database.rds", NodeShape::Cylinder, AWS_FILL);
        pub const RDS_INSTANCE: NodeKind =
            NodeKind::catalog("aws.database.rds_instance", NodeShape::Cylinder, AWS_FILL);
    }

    /// Developer tooling and CI/CD.
    pub mod devtools {
        use crate::kind::{AWS_FILL, NodeKind, NodeShape};

        pub const CODEPIPELINE: NodeKind =
            NodeKind::catalog("aws.devtools.codepipeline", NodeShape::Cds, AWS_FILL);
        pub const CODEBUILD: NodeKind =
            NodeKind::catalog("aws.devtools.codebuild", NodeShape::Cds, AWS_FILL);
    }

    /// Object and file storage.
    pub mod storage {
        use crate::kind::{AWS_FILL, NodeKind, NodeShape};

        pub const S3: NodeKind = NodeKind::catalog("aws.storage.s3", NodeShape::Folder, AWS_FILL);
    }

    /// General-purpose symbols.
    pub mod general {
        use crate::kind::{AWS_FILL, NodeKind, NodeShape};

        pub const USER: NodeKind =
            NodeKind::catalog("aws.general.user", NodeShape::Ellipse, AWS_FILL);
    }
}

/// Kubernetes resource kinds.
pub mod k8s {
    /// Workloads.
    pub mod compute {
        use crate::kind::{K8S_FILL, NodeKind, NodeShape};

        pub const POD: NodeKind =
            NodeKind::catalog("k8s.compute.pod", NodeShape::RoundedBox, K8S_FILL);
    }

    /// Service networking.
    pub mod network {
        use crate::kind::{K8S_FILL, NodeKind, NodeShape};

        pub const INGRESS: NodeKind =
            NodeKind::catalog("k8s.network.ingress", NodeShape::Trapezium, K8S_FILL);
    }
}

/// On-premises and third-party kinds.
pub mod onprem {
    /// Human actors and client software.
    pub mod client {
        use crate::kind::{NodeKind, NodeShape, ONPREM_FILL};

        pub const USER: NodeKind =
            NodeKind::catalog("onprem.client.user", NodeShape::Ellipse, ONPREM_FILL);
        pub const USERS: NodeKind =
            NodeKind::catalog("onprem.client.users", NodeShape::Ellipse, ONPREM_FILL);
    }

    /// Version control hosting.
    pub mod vcs {
        use crate::kind::{NodeKind, NodeShape, ONPREM_FILL};

        pub const GITHUB: NodeKind =
            NodeKind::catalog("onprem.vcs.github", NodeShape::Tab, ONPREM_FILL);
    }
}

/// Programming frameworks and languages.
pub mod programming {
    /// Application frameworks.
    pub mod framework {
        use crate::kind::{NodeKind, NodeShape, PROGRAMMING_FILL};

        pub const REACT: NodeKind = NodeKind::catalog(
            "programming.framework.react",
            NodeShape::Component,
            PROGRAMMING_FILL,
        );
    }

    /// Language runtimes.
    pub mod language {
        use crate::kind::{NodeKind, NodeShape, PROGRAMMING_FILL};

        pub const NODEJS: NodeKind = NodeKind::catalog(
            "programming.language.nodejs",
            NodeShape::Note,
            PROGRAMMING_FILL,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_kinds_have_fills() {
        assert_eq!(aws::network::ELB.glyph().fill(), Some(AWS_FILL));
        assert_eq!(k8s::compute::POD.glyph().fill(), Some(K8S_FILL));
        assert_eq!(onprem::vcs::GITHUB.glyph().fill(), Some(ONPREM_FILL));
        assert_eq!(
            programming::framework::REACT.glyph().fill(),
            Some(PROGRAMMING_FILL)
        );
    }

    #[test]
    fn test_catalog_names_are_dotted_paths() {
        assert_eq!(aws::devtools::CODEPIPELINE.name(), "aws.devtools.codepipeline");
        assert_eq!(k8s::network::INGRESS.name(), "k8s.network.ingress");
    }

    #[test]
    fn test_custom_kind_defaults() {
        let kind = NodeKind::custom("redis");
        assert_eq!(kind.name(), "redis");
        assert_eq!(kind.glyph().shape(), NodeShape::RoundedBox);
        assert_eq!(kind.glyph().fill(), None);
    }

    #[test]
    fn test_custom_kind_with_shape() {
        let kind = NodeKind::custom("redis").with_shape(NodeShape::Cylinder);
        assert_eq!(kind.glyph().shape(), NodeShape::Cylinder);
        assert_eq!(kind.glyph().shape().dot_shape(), "cylinder");
    }

    #[test]
    fn test_rounded_box_is_box_with_rounding() {
        assert_eq!(NodeShape::RoundedBox.dot_shape(), "box");
        assert!(NodeShape::RoundedBox.is_rounded());
        assert!(!NodeShape::Box.is_rounded());
    }
}
