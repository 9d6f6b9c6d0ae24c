//! Integration tests for render finalization and output artifacts.
//!
//! Everything here renders to the `dot` format, which is produced in-process
//! and keeps the suite independent of a system Graphviz installation.

use std::fs;

use tempfile::tempdir;

use stratus::{Diagram, Edge, OutputFormat, StratusError, kind::NodeKind};

#[test]
fn scoped_build_writes_a_non_empty_artifact() {
    let dir = tempdir().expect("Failed to create temp directory");

    let path = Diagram::scoped("Web Service", dot_config(&dir), |d| {
        let a = d.node(NodeKind::custom("svc"), "A");
        let b = d.node(NodeKind::custom("svc"), "B");
        d.connect(a, b, Edge::new())
    })
    .expect("build should succeed");

    assert_eq!(path, dir.path().join("web_service.dot"));
    let contents = fs::read_to_string(&path).expect("artifact should exist");
    assert!(!contents.is_empty());
    assert!(contents.contains("digraph"));
}

#[test]
fn empty_diagram_still_renders_a_valid_artifact() {
    let dir = tempdir().expect("Failed to create temp directory");

    let path = Diagram::scoped("Nothing Here", dot_config(&dir), |_| Ok(()))
        .expect("empty build should succeed");

    let contents = fs::read_to_string(&path).expect("artifact should exist");
    assert!(contents.contains("digraph \"Nothing Here\""));
    assert!(contents.contains("label=\"Nothing Here\""));
}

#[test]
fn failed_scoped_build_leaves_no_artifact() {
    let dir = tempdir().expect("Failed to create temp directory");

    let result = Diagram::scoped("Doomed", dot_config(&dir), |d| {
        d.node(NodeKind::custom("svc"), "created before the failure");
        Err(StratusError::Render("topology invalid".to_string()))
    });

    assert!(result.is_err());
    assert!(
        !dir.path().join("doomed.dot").exists(),
        "failed build must not leave a partial artifact"
    );
}

#[test]
fn unwritable_output_dir_fails_at_open_time() {
    let missing = std::path::Path::new("/nonexistent-stratus-output");
    let err = Diagram::builder("Unwritable")
        .output_dir(missing)
        .build()
        .unwrap_err();

    assert!(matches!(err, StratusError::Render(_)));
}

#[test]
fn filename_defaults_to_title_slug() {
    let dir = tempdir().expect("Failed to create temp directory");

    let path = Diagram::scoped("Complete Architecture", dot_config(&dir), |_| Ok(()))
        .expect("build should succeed");

    assert_eq!(path.file_name().unwrap(), "complete_architecture.dot");
}

#[test]
fn explicit_filename_overrides_the_slug() {
    let dir = tempdir().expect("Failed to create temp directory");

    let mut diagram = Diagram::builder("Custom Name")
        .format(OutputFormat::Dot)
        .output_dir(dir.path())
        .filename("blueprint")
        .build()
        .expect("diagram should open");
    diagram.node(NodeKind::custom("svc"), "only");

    let path = diagram.render().expect("render should succeed");
    assert_eq!(path.file_name().unwrap(), "blueprint.dot");
    assert!(path.exists());
}

#[test]
fn repeated_titles_overwrite_the_previous_artifact() {
    let dir = tempdir().expect("Failed to create temp directory");

    let first = Diagram::scoped("Same Title", dot_config(&dir), |d| {
        d.node(NodeKind::custom("svc"), "first run");
        Ok(())
    })
    .expect("first build should succeed");

    let second = Diagram::scoped("Same Title", dot_config(&dir), |d| {
        d.node(NodeKind::custom("svc"), "second run");
        Ok(())
    })
    .expect("second build should succeed");

    assert_eq!(first, second);
    let contents = fs::read_to_string(&second).expect("artifact should exist");
    assert!(contents.contains("second run"));
    assert!(!contents.contains("first run"));
}

#[test]
fn render_consumes_the_diagram_after_one_artifact() {
    let dir = tempdir().expect("Failed to create temp directory");

    let mut diagram = Diagram::builder("One Shot")
        .format(OutputFormat::Dot)
        .output_dir(dir.path())
        .build()
        .expect("diagram should open");
    diagram.node(NodeKind::custom("svc"), "lone");

    let path = diagram.render().expect("render should succeed");
    // `diagram` is moved by `render`; only the artifact remains.
    assert!(path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

fn dot_config(dir: &tempfile::TempDir) -> stratus::config::DiagramConfig {
    let mut config = stratus::config::DiagramConfig::default();
    config.set_format(OutputFormat::Dot);
    config.set_output_dir(dir.path());
    config
}
