//! End-to-end exercise of the full pipeline (loader, engine, tree builder)
//! run as a single MPI process (P=1). Bundled into one `#[test]` function
//! deliberately: `mpi::initialize()` may only be called once per process,
//! and `cargo test` runs every `#[test]` in a binary on the same process,
//! so a second test function in this file would observe `None` from a
//! second `initialize()` call.

use std::fs;

use mpi::traits::*;

use panjo::engine;
use panjo::error::PanjoError;
use panjo::matrix::load_distance_matrix;
use panjo::timing::Timings;
use panjo::treebuild::{leaf_indices, TreeBuilder};

#[test]
fn end_to_end_scenarios() {
    let universe = mpi::initialize().expect("MPI must initialize exactly once");
    let world = universe.world();
    let rank = world.rank();
    let size = world.size();
    assert_eq!(size, 1, "this test is only meaningful with a single process");

    // Scenario: N=2, trivial terminal join only.
    {
        let path = std::env::temp_dir().join("panjo_e2e_n2.txt");
        fs::write(&path, "0 1 1 0").unwrap();

        let slab = load_distance_matrix(&path, &world, rank as usize, size as usize).unwrap();
        let n = slab.partition.n;
        assert_eq!(n, 2);

        let tree = Some(TreeBuilder::new(n));
        let mut timings = Timings::new();
        let outcome = engine::run(&world, rank, slab, tree, &mut timings);

        let root = outcome.root.unwrap();
        assert_eq!(root.serialize(false), "(1,2)");
        assert_eq!(outcome.score, 1.0);

        let _ = fs::remove_file(&path);
    }

    // Scenario: N=4, symmetric metric input from the literal scenario
    // table. The matrix is perfectly additive for the {1,2}|{3,4} split
    // (D13+D24 == D14+D23 == 19 >= D12+D34 == 13), so both cherries reach
    // the minimum Q at once; the first-seen tie-break (smaller j, then
    // smaller i) merges (seq 2, seq 1) before (seq 4, seq 3), giving a
    // caterpillar string that still encodes the same {1,2}|{3,4} split.
    {
        let path = std::env::temp_dir().join("panjo_e2e_n4.txt");
        fs::write(&path, "0 5 9 9  5 0 10 10  9 10 0 8  9 10 8 0").unwrap();

        let slab = load_distance_matrix(&path, &world, rank as usize, size as usize).unwrap();
        let n = slab.partition.n;
        assert_eq!(n, 4);

        let tree = Some(TreeBuilder::new(n));
        let mut timings = Timings::new();
        let outcome = engine::run(&world, rank, slab, tree, &mut timings);

        let root = outcome.root.unwrap();
        assert_eq!(root.serialize(false), "((3,(2,1)),4)");
        assert_eq!(outcome.score, 16.0);

        let mut leaves = leaf_indices(&root);
        leaves.sort_unstable();
        assert_eq!(leaves, vec![1, 2, 3, 4]);

        let _ = fs::remove_file(&path);
    }

    // Scenario: malformed input is reported as such, not a panic.
    {
        let path = std::env::temp_dir().join("panjo_e2e_malformed.txt");
        fs::write(&path, "0 1 nan 0").unwrap();

        let err = load_distance_matrix(&path, &world, rank as usize, size as usize).unwrap_err();
        assert!(matches!(err, PanjoError::MalformedInput { .. }));

        let _ = fs::remove_file(&path);
    }
}
