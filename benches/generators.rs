use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use mazegen::{
    batch,
    generators::{self, Endpoints},
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};

fn bench_grid_construction_32(c: &mut Criterion) {
    c.bench_function("grid_construction_32", |b| {
        b.iter(|| Grid::new(RowsCount(32), ColumnsCount(32)).unwrap())
    });
}

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let g = Grid::new(RowsCount(32), ColumnsCount(32)).unwrap();
    let mut rng = generators::maze_rng(Some(42));
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter_batched(|| g.clone(),
                       |mut g| generators::recursive_backtracker(&mut g, &mut rng, Endpoints::default()),
                       BatchSize::SmallInput)
    });
}

fn bench_recursive_backtracker_maze_256(c: &mut Criterion) {
    let g = Grid::new(RowsCount(256), ColumnsCount(256)).unwrap();
    let mut rng = generators::maze_rng(Some(42));
    c.bench_function("recursive_backtracker_maze_256", move |b| {
        b.iter_batched(|| g.clone(),
                       |mut g| generators::recursive_backtracker(&mut g, &mut rng, Endpoints::default()),
                       BatchSize::LargeInput)
    });
}

fn bench_batch_16_mazes_64(c: &mut Criterion) {
    let seeds = (0..16).collect::<Vec<u64>>();
    c.bench_function("batch_16_mazes_64", move |b| {
        b.iter(|| batch::generate_batch(RowsCount(64), ColumnsCount(64), &seeds, Endpoints::default()))
    });
}

criterion_group!(
    benches,
    bench_grid_construction_32,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_256,
    bench_batch_16_mazes_64
);
criterion_main!(benches);
