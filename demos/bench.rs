//! Ad hoc benchmark driver: generates a random symmetric distance matrix,
//! writes it to a scratch file in the on-disk column-major format, and runs
//! it through the same loader/engine pipeline `main` uses. Single-process
//! only (P=1); generates its own synthetic input inline rather than
//! requiring a real dataset on disk.
//!
//! Run with `NPOINTS` controlling N (default 64):
//! `NPOINTS=256 cargo run --bin panjo-bench`

use std::io::Write as _;

use mpi::traits::*;

use panjo::data::random_distance_matrix;
use panjo::engine;
use panjo::matrix::load_distance_matrix;
use panjo::timing::Timings;
use panjo::treebuild::TreeBuilder;

fn main() {
    let n: usize = std::env::var("NPOINTS").ok().and_then(|v| v.parse().ok()).unwrap_or(64);

    let universe = mpi::initialize().unwrap();
    let world = universe.world();
    let rank = world.rank();
    let size = world.size();

    assert_eq!(size, 1, "panjo-bench is single-process only");

    let matrix = random_distance_matrix(n);
    let path = std::env::temp_dir().join(format!("panjo_bench_{n}.txt"));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        for chunk in matrix.chunks(n) {
            let row: Vec<String> = chunk.iter().map(|v| v.to_string()).collect();
            writeln!(file, "{}", row.join(" ")).unwrap();
        }
    }

    let mut timings = Timings::new();
    timings.start();

    let slab = load_distance_matrix(&path, &world, rank as usize, size as usize).unwrap();
    let tree = Some(TreeBuilder::new(n));
    let outcome = engine::run(&world, rank, slab, tree, &mut timings);

    timings.stop();

    println!("N = {n}, TreeScore = {}", outcome.score);
    println!("Total time: {}", timings.total_seconds());
    println!("MPI time: {}", timings.mpi_seconds());

    let _ = std::fs::remove_file(&path);
}
