use criterion::{criterion_group, criterion_main, Criterion};
use grid_search::{Algorithm, Grid, Point};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N: usize = 24;

fn random_grid(rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(N, N);
    for y in 0..N as i32 {
        for x in 0..N as i32 {
            grid.set_barrier(Point::new(x, y), rng.gen_bool(0.25)).unwrap();
        }
    }
    grid.set_start(Point::new(0, 0)).unwrap();
    grid.set_end(Point::new(N as i32 - 1, N as i32 - 1)).unwrap();
    grid.update();
    grid
}

/// Solvable random grids, so every algorithm has to reach the far corner.
fn bench_grids(count: usize) -> Vec<Grid> {
    let mut rng = StdRng::seed_from_u64(0);
    let mut grids = Vec::new();
    while grids.len() < count {
        let grid = random_grid(&mut rng);
        if grid.reachable(&Point::new(0, 0), &Point::new(N as i32 - 1, N as i32 - 1)) {
            grids.push(grid);
        }
    }
    grids
}

fn comparison_bench(c: &mut Criterion) {
    let grids = bench_grids(8);
    for algorithm in Algorithm::ALL {
        c.bench_function(format!("{algorithm}, {N}x{N} random").as_str(), |b| {
            b.iter(|| {
                for grid in &grids {
                    let mut grid = grid.clone();
                    black_box(algorithm.solve(&mut grid, |g: &Grid| {
                        black_box(g);
                    }))
                    .ok();
                }
            })
        });
    }
}

fn open_field_bench(c: &mut Criterion) {
    let mut grid = Grid::new(N, N);
    grid.set_start(Point::new(0, 0)).unwrap();
    grid.set_end(Point::new(N as i32 - 1, N as i32 - 1)).unwrap();
    for algorithm in [Algorithm::Bfs, Algorithm::UniformCost, Algorithm::Astar] {
        c.bench_function(format!("{algorithm}, {N}x{N} open").as_str(), |b| {
            b.iter(|| {
                let mut grid = grid.clone();
                black_box(algorithm.solve(&mut grid, |_: &Grid| {})).ok();
            })
        });
    }
}

criterion_group!(benches, comparison_bench, open_field_bench);
criterion_main!(benches);
