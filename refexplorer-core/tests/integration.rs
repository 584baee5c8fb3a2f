//! Integration Tests for the Reference Graph
//!
//! These tests drive the model and the explorer through an in-memory index,
//! the way a host editor would.

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

use refexplorer_core::asset::{AssetIdentifier, AssetMetadata};
use refexplorer_core::config::{ExplorerConfig, LayoutPolicy};
use refexplorer_core::explorer::{RebuildOutcome, ReferenceExplorer};
use refexplorer_core::graph::{GraphModel, NodeKind, Position};
use refexplorer_core::link::{DependencyCategory, DependencyProperties, LinkCategory, LinkDisplay};
use refexplorer_core::provider::InMemoryProvider;

fn pkg(name: &str) -> AssetIdentifier {
    AssetIdentifier::package(name)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn short(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Foo is referenced by Bar (hard), Baz (soft) and Qux, a redirector left
/// behind when Quux was moved.
fn redirector_scenario() -> InMemoryProvider {
    let provider = InMemoryProvider::new();
    for name in ["/Game/Foo", "/Game/Bar", "/Game/Baz", "/Game/Quux"] {
        provider.add_asset(AssetMetadata::new(name, short(name), "Blueprint"));
    }
    provider.add_asset(AssetMetadata::redirector("/Game/Qux", "Qux"));
    provider.set_package_disk_size("/Game/Qux", -1);

    let hard = DependencyProperties::new(true, true);
    let soft = DependencyProperties::new(false, true);
    provider.add_dependency(pkg("/Game/Bar"), pkg("/Game/Foo"), DependencyCategory::Package, hard);
    provider.add_dependency(pkg("/Game/Baz"), pkg("/Game/Foo"), DependencyCategory::Package, soft);
    provider.add_dependency(pkg("/Game/Qux"), pkg("/Game/Foo"), DependencyCategory::Package, hard);
    provider.add_dependency(pkg("/Game/Quux"), pkg("/Game/Qux"), DependencyCategory::Package, hard);
    provider
}

fn table_shape(model: &GraphModel) -> Vec<(AssetIdentifier, Vec<(AssetIdentifier, LinkCategory)>)> {
    model
        .node_infos()
        .iter()
        .map(|(id, info)| (id.clone(), info.children().to_vec()))
        .collect()
}

/// Test that redirectors are replaced by what they redirect to, in place.
#[test]
fn redirected_referencer_takes_redirector_position() {
    init_tracing();
    let mut model = GraphModel::new(Arc::new(redirector_scenario()));
    model.set_root(pkg("/Game/Foo"), Position::default());
    model.rebuild_graph().expect("root is set");

    let keys: HashSet<_> = model.node_infos().keys().cloned().collect();
    let expected: HashSet<_> = ["/Game/Foo", "/Game/Bar", "/Game/Baz", "/Game/Quux"]
        .into_iter()
        .map(pkg)
        .collect();
    assert_eq!(keys, expected);

    let root = model.root_node_info().expect("root node");
    let children: Vec<_> = root
        .children()
        .iter()
        .map(|(id, category)| (id.clone(), category.display()))
        .collect();
    assert_eq!(
        children,
        vec![
            (pkg("/Game/Bar"), LinkDisplay::HardUsedInGame),
            (pkg("/Game/Quux"), LinkDisplay::HardUsedInGame),
            (pkg("/Game/Baz"), LinkDisplay::SoftUsedInGame),
        ]
    );
}

/// Test that every child in the table has its own node.
#[test]
fn no_dangling_children() {
    let config = ExplorerConfig {
        search_depth: 3,
        ..ExplorerConfig::default()
    };
    let mut model = GraphModel::with_config(Arc::new(redirector_scenario()), &config);
    model.set_root(pkg("/Game/Foo"), Position::default());
    model.rebuild_graph();

    for info in model.node_infos().values() {
        for (child, _) in info.children() {
            assert!(model.node_info(child).is_some(), "{child} has no node");
        }
    }
}

/// Test that rebuilding twice over unchanged data yields the same table.
#[test]
fn rebuild_is_idempotent() {
    let mut model = GraphModel::new(Arc::new(redirector_scenario()));
    model.set_root(pkg("/Game/Foo"), Position::new(40, -20));

    let first_graph = model.rebuild_graph().expect("root is set");
    let first = table_shape(&model);
    let second_graph = model.rebuild_graph().expect("root is set");
    let second = table_shape(&model);

    assert_eq!(first, second);
    assert_eq!(first_graph, second_graph);
}

/// Test that sorted links are stable across calls.
#[test]
fn sorted_links_are_deterministic() {
    let provider = InMemoryProvider::new();
    provider.add_asset(AssetMetadata::new("/Game/Root", "Root", "Blueprint"));
    for (i, name) in ["/Game/E", "/Game/C", "/Game/A", "/Game/D", "/Game/B"].iter().enumerate() {
        provider.add_asset(AssetMetadata::new(*name, short(name), "Blueprint"));
        provider.add_dependency(
            pkg(name),
            pkg("/Game/Root"),
            DependencyCategory::Package,
            DependencyProperties::new(i % 2 == 0, i % 3 == 0),
        );
    }
    provider.add_dependency(
        AssetIdentifier::primary_asset("Map", "Arena"),
        pkg("/Game/Root"),
        DependencyCategory::Manage,
        DependencyProperties::NONE,
    );

    let model = GraphModel::new(Arc::new(provider));
    let first: Vec<_> = model.sorted_links(&pkg("/Game/Root")).into_iter().collect();
    for _ in 0..10 {
        let again: Vec<_> = model.sorted_links(&pkg("/Game/Root")).into_iter().collect();
        assert_eq!(first, again);
    }

    let order: Vec<_> = first.iter().map(|(id, _)| id.to_string()).collect();
    assert_eq!(
        order,
        ["/Game/A", "/Game/B", "/Game/E", "/Game/C", "/Game/D", "Map:Arena"]
    );
}

/// Test that the projection positions children without overlaps and wires
/// each child back to its parent.
#[test]
fn projection_layout_and_edges() {
    let provider = InMemoryProvider::new();
    provider.add_asset(AssetMetadata::new("/Game/Root", "Root", "Texture2D"));
    for i in 0..7 {
        let name = format!("/Game/User{i}");
        provider.add_asset(AssetMetadata::new(name.as_str(), format!("User{i}"), "Material"));
        provider.add_dependency(
            pkg(&name),
            pkg("/Game/Root"),
            DependencyCategory::Package,
            DependencyProperties::new(true, false),
        );
    }
    provider.add_dependency(
        pkg("/Script/Engine"),
        pkg("/Game/Root"),
        DependencyCategory::Package,
        DependencyProperties::new(true, true),
    );
    provider.set_package_disk_size("/Script/Engine", 0);

    let config = ExplorerConfig {
        layout: refexplorer_core::config::LayoutConfig {
            policy: LayoutPolicy::Symmetric,
            ..Default::default()
        },
        ..ExplorerConfig::default()
    };
    let mut model = GraphModel::with_config(Arc::new(provider), &config);
    model.set_root(pkg("/Game/Root"), Position::default());
    let graph = model.rebuild_graph().expect("root is set");

    assert_eq!(graph.nodes().len(), 9);
    assert_eq!(graph.edges().len(), 8);

    let positions: HashSet<_> = graph.nodes().iter().map(|node| node.position).collect();
    assert_eq!(positions.len(), 9);

    for edge in graph.edges() {
        assert_eq!(edge.target, pkg("/Game/Root"));
    }
    let engine = graph.node(&pkg("/Script/Engine")).expect("script node");
    assert_eq!(engine.kind, NodeKind::Script);
    assert_eq!(engine.full_title(), "Engine\nScript");
    // Referencers sort by package name within a tier, so the script package is last.
    assert_eq!(graph.edges()[0].pin_name, "HardEditorOnly");
    assert_eq!(graph.edges()[7].referencer, pkg("/Script/Engine"));
    assert_eq!(graph.edges()[7].pin_name, "Hard");
}

/// Test the explorer lifecycle: deferral, build, staleness and refresh.
#[test]
fn explorer_lifecycle() {
    init_tracing();
    let provider = Arc::new(redirector_scenario());
    provider.begin_discovery();

    let explorer = ReferenceExplorer::new(provider.clone(), &ExplorerConfig::default());
    assert_eq!(explorer.set_root(pkg("/Game/Foo")), RebuildOutcome::Deferred);
    assert!(!explorer.is_subscribed());

    provider.finish_discovery();
    let graph = explorer.graph().expect("built after discovery");
    assert_eq!(graph.nodes().len(), 4);
    assert!(explorer.is_subscribed());

    provider.update_asset(
        AssetMetadata::new("/Game/Baz", "Baz", "Blueprint").with_tag("ActorLabel", "Bazooka"),
    );
    assert!(explorer.is_dirty());
    assert_eq!(
        explorer.status_text().as_deref(),
        Some("Saved references changed, refresh for update")
    );

    let refreshed = explorer.refresh();
    let baz = refreshed
        .graph()
        .and_then(|graph| graph.node(&pkg("/Game/Baz")))
        .expect("baz node");
    assert_eq!(baz.title, "Bazooka");
    assert_eq!(explorer.status_text(), None);
}

/// Test the copy-to-clipboard reference lists.
#[test]
fn reference_lists() {
    let provider = Arc::new(redirector_scenario());
    let explorer = ReferenceExplorer::new(provider, &ExplorerConfig::default());

    assert_eq!(
        explorer.referencing_objects_list(&[pkg("/Game/Foo")]),
        "[/Game/Foo - Referencers]\n  [HARD]\n    /Game/Bar.Bar\n    /Game/Qux.Qux\n  [SOFT]\n    /Game/Baz.Baz\n"
    );
    assert_eq!(
        explorer.referenced_objects_list(&[pkg("/Game/Quux")]),
        "[/Game/Quux - Dependencies]\n  [HARD]\n    /Game/Qux.Qux\n"
    );
    assert_eq!(explorer.referenced_objects_list(&[]), "");
}

/// Test loading an index snapshot and a configuration from disk.
#[test]
fn snapshot_and_config_files() {
    let mut index = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        index,
        r#"{{
            "assets": [
                {{ "package_name": "/Game/Root", "asset_name": "Root", "asset_class": "Texture2D" }},
                {{ "package_name": "/Game/User", "asset_name": "User", "asset_class": "Material" }}
            ],
            "dependencies": [
                {{
                    "referencer": {{ "kind": "package", "package": "/Game/User" }},
                    "target": {{ "kind": "package", "package": "/Game/Root" }},
                    "category": "package",
                    "properties": {{ "hard": true }}
                }}
            ],
            "packages": [ {{ "name": "/Game/Root", "disk_size": 2048, "modified": true }} ]
        }}"#
    )
    .expect("write index");

    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    write!(config, r#"{{ "root_origin": {{ "x": 100, "y": 100 }} }}"#).expect("write config");

    let provider = InMemoryProvider::load(index.path()).expect("valid index");
    let config = ExplorerConfig::load(config.path()).expect("valid config");
    let explorer = ReferenceExplorer::new(Arc::new(provider), &config);

    let outcome = explorer.set_root(pkg("/Game/Root"));
    let graph = outcome.graph().expect("built");
    assert_eq!(graph.root_node().map(|node| node.position), Some(Position::new(100, 100)));
    assert_eq!(
        graph.edges()[0].category.display(),
        LinkDisplay::HardEditorOnly
    );
    assert_eq!(
        explorer.status_text().as_deref(),
        Some("Showing old saved references for edited asset Root")
    );

    let json: serde_json::Value =
        serde_json::from_str(&explorer.graph_json().expect("graph built")).expect("valid json");
    assert_eq!(json["nodes"].as_array().map(Vec::len), Some(2));
}
