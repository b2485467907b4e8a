//! The fixed sequence of collectives that keep every process's mirror of
//! `V`, `R`, and the winning merge consistent each iteration: all-gather,
//! all-gather-of-scalars, broadcast, gather, barrier. Named wrappers over
//! the `mpi` crate so `engine.rs` reads as the algorithm, not raw MPI
//! calls.

use mpi::topology::{Rank, SystemCommunicator};
use mpi::traits::*;

use crate::timing::Timings;

/// All-gather each process's owned slice of `R` into the full, identical
/// copy every process holds. `owned` must be exactly this process's
/// `[start, end)` slice; `full` must have length `N`.
pub fn all_gather_r(world: &SystemCommunicator, owned: &[f64], full: &mut [f64], timings: &mut Timings) {
    timings.time_mpi(|| world.all_gather_into(owned, full));
}

/// All-gather every process's scalar local-minimum Q into a length-P
/// vector, index `r` holding rank `r`'s value.
pub fn all_gather_minima(world: &SystemCommunicator, local_min: f64, timings: &mut Timings) -> Vec<f64> {
    let size = world.size() as usize;
    let mut minima = vec![0.0_f64; size];
    timings.time_mpi(|| world.all_gather_into(&local_min, &mut minima[..]));
    minima
}

/// Broadcast the winning `(i*, j*)` pair from rank `w`.
pub fn broadcast_pair(world: &SystemCommunicator, w: Rank, pair: &mut [i32; 2], timings: &mut Timings) {
    let root = world.process_at_rank(w);
    timings.time_mpi(|| root.broadcast_into(&mut pair[..]));
}

/// Broadcast a single scalar (the raw distance `d*`, or later the
/// accumulated tree score) from rank `w`.
pub fn broadcast_scalar(world: &SystemCommunicator, w: Rank, value: &mut f64, timings: &mut Timings) {
    let root = world.process_at_rank(w);
    timings.time_mpi(|| root.broadcast_into(value));
}

/// Gather the merged column's exchange buffer (one `K`-slice per rank) onto
/// `to_rank`, which ends up holding the dense length-N buffer.
pub fn gather_column(
    world: &SystemCommunicator,
    to_rank: Rank,
    owned: &[f64],
    full: &mut [f64],
    timings: &mut Timings,
) {
    let root = world.process_at_rank(to_rank);
    if world.rank() == to_rank {
        timings.time_mpi(|| root.gather_into_root(owned, full));
    } else {
        timings.time_mpi(|| root.gather_into(owned));
    }
}

/// The defensive per-iteration barrier: correctness does not require it,
/// but it bounds straggler skew and keeps timing measurements clean.
pub fn barrier(world: &SystemCommunicator, timings: &mut Timings) {
    timings.time_mpi(|| world.barrier());
}
