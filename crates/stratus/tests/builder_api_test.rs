//! Integration tests for the diagram builder API.
//!
//! These cover the construction-time semantics: node and edge counts,
//! fan-out/fan-in expansion, containment, and cross-diagram handle
//! rejection. Output-file behavior lives in `render_test.rs`.

use proptest::prelude::*;

use stratus::{
    Diagram, Edge, OutputFormat, StratusError,
    kind::{NodeKind, aws, k8s},
};

fn open(title: &str) -> Diagram {
    Diagram::builder(title)
        .format(OutputFormat::Dot)
        .build()
        .expect("diagram should open")
}

#[test]
fn two_nodes_one_edge() {
    let mut d = open("X");
    let a = d.node(NodeKind::custom("service"), "A");
    let b = d.node(NodeKind::custom("service"), "B");
    d.connect(a, b, Edge::new()).unwrap();

    assert_eq!(d.node_count(), 2);
    assert_eq!(d.edge_count(), 1);
    let edges: Vec<_> = d.edge_endpoints().collect();
    assert_eq!(edges, vec![(a, b)]);
}

#[test]
fn fan_out_records_one_edge_per_target_in_order() {
    let mut d = open("Fan Out");
    let ecr = d.node(aws::compute::ECR, "Elastic Container Registry");
    let backends = [
        d.node(k8s::compute::POD, "Node.js Server"),
        d.node(k8s::compute::POD, "Node.js Server"),
        d.node(k8s::compute::POD, "Node.js Server"),
    ];

    d.connect(ecr, backends, Edge::new()).unwrap();

    assert_eq!(d.edge_count(), 3);
    let recorded: Vec<_> = d.edge_endpoints().map(|(_, target)| target).collect();
    assert_eq!(recorded, backends.to_vec());
}

#[test]
fn fan_in_records_one_edge_per_source() {
    let mut d = open("Fan In");
    let db = d.node(aws::database::RDS, "Primary DB");
    let backends = vec![
        d.node(k8s::compute::POD, "Server 1"),
        d.node(k8s::compute::POD, "Server 2"),
    ];

    d.connect(&backends, db, Edge::new()).unwrap();

    assert_eq!(d.edge_count(), 2);
    let sources: Vec<_> = d.edge_endpoints().map(|(source, _)| source).collect();
    assert_eq!(sources, backends);
}

#[test]
fn chain_connects_consecutive_pairs() {
    let mut d = open("Chain");
    let dns = d.node(aws::network::ROUTE53, "DNS");
    let waf = d.node(aws::security::WAF, "Web Application Firewall");
    let lb = d.node(aws::network::ELB, "Load Balancer");

    d.connect_chain(&[dns, waf, lb], Edge::new()).unwrap();

    let edges: Vec<_> = d.edge_endpoints().collect();
    assert_eq!(edges, vec![(dns, waf), (waf, lb)]);
}

#[test]
fn chain_of_one_or_zero_records_nothing() {
    let mut d = open("Short Chain");
    let only = d.node(NodeKind::custom("svc"), "only");

    d.connect_chain(&[], Edge::new()).unwrap();
    d.connect_chain(&[only], Edge::new()).unwrap();

    assert_eq!(d.edge_count(), 0);
}

#[test]
fn nodes_are_recorded_under_their_cluster() {
    let mut d = open("Containment");
    let top = d.node(NodeKind::custom("svc"), "Top Level");
    let (inner, deep) = d.cluster("AWS Cloud", |aws_cloud| {
        let inner = aws_cloud.node(aws::compute::EKS, "EKS");
        let deep = aws_cloud.cluster("VPC", |vpc| vpc.node(aws::network::VPC, "Main VPC"));
        (inner, deep)
    });

    assert_eq!(d.cluster_count(), 2);
    assert_eq!(d.node_cluster_path(top).unwrap(), "containment");
    assert_eq!(d.node_cluster_path(inner).unwrap(), "containment/aws_cloud");
    assert_eq!(d.node_cluster_path(deep).unwrap(), "containment/aws_cloud/vpc");
}

#[test]
fn scope_paths_follow_nesting() {
    let mut d = open("Paths");
    d.cluster("Outer", |outer| {
        assert_eq!(outer.path(), "paths/outer");
        outer.cluster("Inner", |inner| {
            assert_eq!(inner.path(), "paths/outer/inner");
        });
    });
}

#[test]
fn duplicate_labels_are_permitted() {
    let mut d = open("Duplicates");
    let first = d.node(k8s::compute::POD, "Node.js Server");
    let second = d.node(k8s::compute::POD, "Node.js Server");

    assert_ne!(first, second);
    assert_eq!(d.node_count(), 2);
    assert_eq!(d.node_label(first), d.node_label(second));
}

#[test]
fn handles_from_another_diagram_are_rejected() {
    let mut left = open("Left");
    let mut right = open("Right");
    let ours = left.node(NodeKind::custom("svc"), "ours");
    let theirs = right.node(NodeKind::custom("svc"), "theirs");

    let err = left.connect(ours, theirs, Edge::new()).unwrap_err();
    assert!(matches!(err, StratusError::InvalidReference(_)));

    // The failed call must not have recorded anything.
    assert_eq!(left.edge_count(), 0);
    assert_eq!(right.edge_count(), 0);
}

#[test]
fn rejection_happens_before_any_pairing_is_recorded() {
    let mut left = open("Left Mixed");
    let mut right = open("Right Mixed");
    let a = left.node(NodeKind::custom("svc"), "a");
    let b = left.node(NodeKind::custom("svc"), "b");
    let foreign = right.node(NodeKind::custom("svc"), "foreign");

    let err = left.connect(a, [b, foreign], Edge::new()).unwrap_err();
    assert!(matches!(err, StratusError::InvalidReference(_)));
    assert_eq!(left.edge_count(), 0, "no partial fan-out may survive");
}

#[test]
fn builder_reusability_across_diagrams() {
    // Same topology declared twice; each diagram owns its own nodes.
    for _ in 0..2 {
        let mut d = open("Repeated Title");
        let a = d.node(NodeKind::custom("svc"), "A");
        let b = d.node(NodeKind::custom("svc"), "B");
        d.connect(a, b, Edge::new()).unwrap();
        assert_eq!(d.node_count(), 2);
        assert_eq!(d.edge_count(), 1);
    }
}

proptest! {
    #[test]
    fn fan_out_to_n_targets_yields_exactly_n_edges(n in 1usize..32) {
        let mut d = open("Fan Out Property");
        let source = d.node(NodeKind::custom("svc"), "source");
        let targets: Vec<_> = (0..n)
            .map(|i| d.node(NodeKind::custom("svc"), format!("target {i}")))
            .collect();

        d.connect(source, &targets, Edge::new()).unwrap();

        prop_assert_eq!(d.edge_count(), n);
        let recorded: Vec<_> = d.edge_endpoints().map(|(_, target)| target).collect();
        prop_assert_eq!(recorded, targets);
    }
}
