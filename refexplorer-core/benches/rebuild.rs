use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use refexplorer_core::asset::{AssetIdentifier, AssetMetadata};
use refexplorer_core::config::ExplorerConfig;
use refexplorer_core::graph::{GraphModel, Position};
use refexplorer_core::link::{DependencyCategory, DependencyProperties};
use refexplorer_core::provider::InMemoryProvider;

/// A root referenced by `n` packages, every fourth one behind a redirector,
/// with each referencer itself referenced by the next one.
fn build_fan_in(n: usize) -> InMemoryProvider {
    let provider = InMemoryProvider::new();
    let root = AssetIdentifier::package("/Game/Root");
    provider.add_asset(AssetMetadata::new("/Game/Root", "Root", "StaticMesh"));

    for i in 0..n {
        let name = format!("/Game/Ref{i}");
        provider.add_asset(AssetMetadata::new(name.as_str(), format!("Ref{i}"), "Blueprint"));
        let props = DependencyProperties::new(i % 2 == 0, i % 3 == 0);

        if i % 4 == 0 {
            let redirector = format!("/Game/Old{i}");
            provider.add_asset(AssetMetadata::redirector(redirector.as_str(), format!("Old{i}")));
            provider.set_package_disk_size(redirector.as_str(), -1);
            provider.add_dependency(
                AssetIdentifier::package(redirector.as_str()),
                root.clone(),
                DependencyCategory::Package,
                props,
            );
            provider.add_dependency(
                AssetIdentifier::package(name.as_str()),
                AssetIdentifier::package(redirector.as_str()),
                DependencyCategory::Package,
                props,
            );
        } else {
            provider.add_dependency(
                AssetIdentifier::package(name.as_str()),
                root.clone(),
                DependencyCategory::Package,
                props,
            );
        }

        if i + 1 < n {
            provider.add_dependency(
                AssetIdentifier::package(format!("/Game/Ref{}", i + 1)),
                AssetIdentifier::package(name.as_str()),
                DependencyCategory::Package,
                DependencyProperties::new(false, true),
            );
        }
    }
    provider
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_graph");
    for &depth in &[1usize, 2] {
        for &n in &[10usize, 100, 1_000] {
            let config = ExplorerConfig {
                search_depth: depth,
                ..ExplorerConfig::default()
            };
            let mut model = GraphModel::with_config(Arc::new(build_fan_in(n)), &config);
            model.set_root(AssetIdentifier::package("/Game/Root"), Position::default());

            group.throughput(Throughput::Elements(n as u64 + 1));
            group.bench_with_input(
                BenchmarkId::new(format!("depth{depth}"), n),
                &n,
                |b, &_n| {
                    b.iter(|| {
                        let graph = model.rebuild_graph();
                        criterion::black_box(graph);
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_rebuild);
criterion_main!(benches);
