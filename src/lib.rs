//! Panjo: distributed Neighbor-Joining in Rust
//!
//! Phylogenetic tree construction from a pairwise distance matrix,
//! parallelized across MPI processes that each own a contiguous range of
//! the matrix's columns.

/// Column-partitioned layout and divisibility checks.
pub mod partition;

/// Two-phase distance matrix loading and local slab addressing.
pub mod matrix;

/// Named wrappers over the MPI collectives used each iteration.
pub mod collective;

/// The main NJ loop and the terminal two-cluster join.
pub mod engine;

/// Rank-0 tree construction and serialisation.
pub mod treebuild;

/// Wall-clock and MPI-time accounting.
pub mod timing;

/// Command-line surface.
pub mod cli;

/// Error taxonomy and rank/hostname-tagged reporting.
pub mod error;

/// Synthetic distance matrices, for tests and ad hoc benchmarking.
pub mod data;
