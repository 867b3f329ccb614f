use common::shapes::{Circle, Rectangle};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quadtree::{Config, QuadTree};
use rand::prelude::*;

fn random_circles(count: usize) -> Vec<Circle> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            Circle::new(
                rng.gen_range(0.0..1280.0),
                rng.gen_range(0.0..720.0),
                2.0,
            )
        })
        .collect()
}

fn build_benchmark(c: &mut Criterion) {
    let circles = random_circles(1000);
    let bounds = Rectangle::from_size(1280.0, 720.0);

    c.bench_function("quadtree_build_1000", |b| {
        b.iter(|| QuadTree::build(bounds, Config::default(), black_box(&circles)))
    });
}

fn rebuild_benchmark(c: &mut Criterion) {
    let circles = random_circles(1000);
    let bounds = Rectangle::from_size(1280.0, 720.0);
    let mut quadtree = QuadTree::new(bounds, Config::default()).unwrap();

    c.bench_function("quadtree_reset_and_insert_1000", |b| {
        b.iter(|| {
            quadtree.reset(bounds).unwrap();
            quadtree.insert_all(black_box(&circles));
        })
    });
}

fn traverse_benchmark(c: &mut Criterion) {
    let mut circles = random_circles(1000);
    let bounds = Rectangle::from_size(1280.0, 720.0);
    let quadtree = QuadTree::build(bounds, Config::default(), &circles).unwrap();

    c.bench_function("quadtree_traverse_leaves_1000", |b| {
        b.iter(|| {
            let mut pairs = 0usize;
            quadtree.traverse_leaves(circles.as_mut_slice(), |container, _| {
                pairs += container.len() * (container.len() - 1) / 2;
            });
            black_box(pairs)
        })
    });
}

criterion_group!(
    quadtree_benchmarks,
    build_benchmark,
    rebuild_benchmark,
    traverse_benchmark
);
criterion_main!(quadtree_benchmarks);
