//! Benchmarks for focus-distance computation and filtering.
//!
//! Real archives run to a few thousand packages; filter invocations happen
//! on every UI change, so both paths should stay well under a frame.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeMap;

use melgraph::filter::{filter_graph, FilterRequest};
use melgraph::graph::{DependencyGraph, GraphBuilder};
use melgraph::parser::{Archive, ArchiveRecord, DownloadCounts};

/// Build a layered synthetic archive: `layers` tiers of `width` packages,
/// each depending on two packages of the tier below.
fn synthetic_graph(layers: usize, width: usize) -> DependencyGraph {
    let mut archive = Archive::new();
    let mut downloads = DownloadCounts::new();

    for layer in 0..layers {
        for slot in 0..width {
            let name = format!("pkg-{}-{}", layer, slot);
            let deps: Option<BTreeMap<String, serde_json::Value>> = if layer > 0 {
                let mut deps = BTreeMap::new();
                deps.insert(
                    format!("pkg-{}-{}", layer - 1, slot),
                    serde_json::Value::Null,
                );
                deps.insert(
                    format!("pkg-{}-{}", layer - 1, (slot + 1) % width),
                    serde_json::Value::Null,
                );
                Some(deps)
            } else {
                None
            };

            downloads.insert(name.clone(), (layer * width + slot) as u64);
            archive.insert(
                name,
                ArchiveRecord {
                    desc: Some("synthetic".to_string()),
                    props: None,
                    deps,
                },
            );
        }
    }

    GraphBuilder::build(&archive, &downloads)
}

fn bench_compute_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_distances");

    for &(layers, width) in &[(10, 50), (20, 100), (40, 100)] {
        let graph = synthetic_graph(layers, width);
        let focus = format!("pkg-{}-0", layers / 2);
        let size = layers * width;

        group.bench_with_input(BenchmarkId::new("nodes", size), &graph, |b, graph| {
            b.iter(|| black_box(graph.compute_distances(&focus, true, true).unwrap()));
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_graph");

    for &(layers, width) in &[(10, 50), (20, 100)] {
        let graph = synthetic_graph(layers, width);
        let size = layers * width;

        let unfiltered = FilterRequest::default();
        group.bench_with_input(
            BenchmarkId::new("all_nodes", size),
            &graph,
            |b, graph| {
                b.iter(|| black_box(filter_graph(graph, &unfiltered)));
            },
        );

        let focused = FilterRequest {
            search: format!("pkg-{}-0", layers / 2),
            min_downloads: 100,
            ..FilterRequest::default()
        };
        group.bench_with_input(
            BenchmarkId::new("focused_search", size),
            &graph,
            |b, graph| {
                b.iter(|| black_box(filter_graph(graph, &focused)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_distances, bench_filter);
criterion_main!(benches);
