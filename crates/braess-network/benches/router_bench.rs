//! Benchmarks for braess-network
//!
//! Measures performance of:
//! - Egoist routing over layered grids of increasing depth
//! - Occupancy updates on a single link
//! - Sequential traveler assignment

use braess_network::{CostFunction, Link, Network, RouterConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// A layered network: `depth` layers of `width` nodes, fully connected
/// between consecutive layers, ending in a single sink.
fn layered(depth: u32, width: u32) -> Network<u32> {
    let mut network = Network::new();
    let node = |layer: u32, slot: u32| layer * width + slot;
    let sink = depth * width;

    network.add_nodes((0..depth * width).chain([sink]));
    for layer in 0..depth {
        for from in 0..width {
            let targets: Vec<u32> = if layer + 1 == depth {
                vec![sink]
            } else {
                (0..width).map(|to| node(layer + 1, to)).collect()
            };
            for target in targets {
                let per_occupant = f64::from((from + target) % 7 + 1) * 0.01;
                let cost = CostFunction::linear(per_occupant);
                network.add_link(Link::new(node(layer, from), target, cost));
            }
        }
    }
    network
}

/// Benchmark a single egoist query at increasing depth
fn bench_egoist_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("egoist_path");

    for &depth in &[4u32, 16, 64] {
        let network = layered(depth, 8);
        group.throughput(Throughput::Elements(u64::from(depth)));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &network, |b, net| {
            b.iter(|| net.egoist_path(black_box(&0)))
        });
    }
    group.finish();
}

/// Benchmark adding and removing occupants
fn bench_occupancy(c: &mut Criterion) {
    c.bench_function("add_remove_occupant", |b| {
        let mut link = Link::new(0u32, 1u32, CostFunction::affine(0.01, 1.0));
        link.add_occupants(1000);
        b.iter(|| {
            link.add_occupant();
            black_box(link.remove_occupant())
        })
    });
}

/// Benchmark assigning travelers one at a time
fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_travelers");

    for &count in &[10usize, 100] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut network = layered(8, 4);
                network.assign_travelers(&0, count, &RouterConfig::default())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_egoist_path, bench_occupancy, bench_assign);
criterion_main!(benches);
