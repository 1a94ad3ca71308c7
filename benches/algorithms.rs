// 生成图上的算法基准
//
// 规模取编辑器可承受的上限附近（几百个节点）

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphlab::algorithm::{bfs, dijkstra, hierholzer, kruskal, prim, EdmondsKarp};
use graphlab::{represent, Graph, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 环 + 随机弦，保证连通
fn generate(n: usize, extra: usize, directed: bool) -> Graph {
    let mut rng = StdRng::seed_from_u64(42);
    let mut graph = Graph::new(directed);
    for i in 0..n {
        graph.add_node(i as u64, i.to_string()).unwrap();
    }
    for i in 0..n {
        let next = ((i + 1) % n) as u64;
        graph
            .add_edge(&(i as u64).into(), &next.into(), Some(rng.gen_range(1.0..10.0)))
            .unwrap();
    }
    for _ in 0..extra {
        let (u, v) = (rng.gen_range(0..n) as u64, rng.gen_range(0..n) as u64);
        if u != v {
            graph
                .add_edge(&u.into(), &v.into(), Some(rng.gen_range(1.0..10.0)))
                .unwrap();
        }
    }
    graph
}

fn bench_traversal_and_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");
    for n in [50usize, 200, 500] {
        let adj = generate(n, n * 2, false).project();
        let (start, end) = (NodeId::from(0u64), NodeId::from((n / 2) as u64));

        group.bench_with_input(BenchmarkId::new("bfs", n), &adj, |b, adj| {
            b.iter(|| bfs(black_box(adj), &start).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("dijkstra", n), &adj, |b, adj| {
            b.iter(|| dijkstra(black_box(adj), &start, &end).unwrap())
        });
    }
    group.finish();
}

fn bench_spanning_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst");
    for n in [50usize, 200, 500] {
        let adj = generate(n, n * 3, false).project();
        group.bench_with_input(BenchmarkId::new("prim", n), &adj, |b, adj| {
            b.iter(|| prim(black_box(adj)))
        });
        group.bench_with_input(BenchmarkId::new("kruskal", n), &adj, |b, adj| {
            b.iter(|| kruskal(black_box(adj)))
        });
    }
    group.finish();
}

fn bench_max_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_flow");
    for n in [20usize, 50, 100] {
        let adj = generate(n, n * 3, true).project();
        let (source, sink) = (NodeId::from(0u64), NodeId::from((n - 1) as u64));
        group.bench_with_input(BenchmarkId::new("edmonds_karp", n), &adj, |b, adj| {
            b.iter(|| EdmondsKarp::new(black_box(adj)).max_flow(&source, &sink).unwrap())
        });
    }
    group.finish();
}

fn bench_euler(c: &mut Criterion) {
    // 纯环一定存在欧拉回路
    let adj = generate(300, 0, false).project();
    c.bench_function("hierholzer_cycle_300", |b| {
        b.iter(|| hierholzer(black_box(&adj)).unwrap())
    });
}

fn bench_representation(c: &mut Criterion) {
    let graph = generate(100, 200, false);
    c.bench_function("represent_100", |b| b.iter(|| represent(black_box(&graph))));
}

criterion_group!(
    benches,
    bench_traversal_and_paths,
    bench_spanning_tree,
    bench_max_flow,
    bench_euler,
    bench_representation
);
criterion_main!(benches);
