//! The distributed NJ iteration engine: the main loop that repeatedly
//! selects, merges, and decrements, plus the terminal two-cluster join.

use mpi::topology::{Rank, SystemCommunicator};
use mpi::traits::*;

use crate::collective;
use crate::matrix::LocalSlab;
use crate::timing::Timings;
use crate::treebuild::{Node, TreeBuilder};

/// Result of running the engine to completion: the tree score (identical
/// on every rank) and, on rank 0 only, the finished tree.
pub struct EngineOutcome {
    pub score: f64,
    pub root: Option<Node>,
}

/// Lowest-indexed rank achieving the smallest criterion value. Scanning in
/// rank order with a strict `<` gives "first-seen wins" for free, matching
/// the tie-break the minimum search itself relies on.
fn select_winner(minima: &[f64]) -> Rank {
    let mut winner = 0;
    let mut best = f64::INFINITY;
    for (rank, &q) in minima.iter().enumerate() {
        if q < best {
            best = q;
            winner = rank;
        }
    }
    winner as Rank
}

/// Run the NJ loop to completion over `slab`, which is consumed. `tree` is
/// `Some` only on rank 0; every other rank passes `None` and gets back
/// `root: None`.
pub fn run(
    world: &SystemCommunicator,
    rank: Rank,
    mut slab: LocalSlab,
    mut tree: Option<TreeBuilder>,
    timings: &mut Timings,
) -> EngineOutcome {
    let n = slab.partition.n;
    let mut valid = vec![true; n];
    let mut r = vec![0.0_f64; n];
    let mut clusters = n;
    let mut score = 0.0_f64;

    while clusters > 2 {
        // 1. Local column sums.
        for j in slab.partition.start..slab.partition.end {
            if valid[j] {
                let mut sum = 0.0;
                for i in 0..n {
                    if valid[i] && i != j {
                        sum += slab.get(i, j);
                    }
                }
                r[j] = sum / (clusters as f64 - 2.0);
            }
        }

        // 2. All-gather R.
        let owned_r: Vec<f64> = r[slab.partition.start..slab.partition.end].to_vec();
        let mut full_r = vec![0.0_f64; n];
        collective::all_gather_r(world, &owned_r, &mut full_r, timings);
        r = full_r;

        // 3. Local minimum search. (-1, -1, +inf) if this rank has no
        // owned active column with an active partner.
        let (mut min_i, mut min_j, mut min_q) = (-1i64, -1i64, f64::INFINITY);
        for j in slab.partition.start..slab.partition.end {
            if !valid[j] {
                continue;
            }
            for i in (j + 1)..n {
                if valid[i] {
                    let q = slab.get(i, j) - r[i] - r[j];
                    if q < min_q {
                        min_i = i as i64;
                        min_j = j as i64;
                        min_q = q;
                    }
                }
            }
        }

        // 4. All-gather minima.
        let minima = collective::all_gather_minima(world, min_q, timings);

        // 5. Global selection.
        let w = select_winner(&minima);

        // 6. Broadcast pair and raw distance.
        let mut pair = if rank == w { [min_i as i32, min_j as i32] } else { [0, 0] };
        collective::broadcast_pair(world, w, &mut pair, timings);
        let (i_star, j_star) = (pair[0] as usize, pair[1] as usize);

        let mut d_star = if rank == w { slab.get(i_star, j_star) } else { 0.0 };
        collective::broadcast_scalar(world, w, &mut d_star, timings);

        // 7. Invalidate i*.
        valid[i_star] = false;

        // 8. Update column j*.
        let mut exchange_owned = vec![0.0_f64; slab.partition.width()];
        for (idx, j) in (slab.partition.start..slab.partition.end).enumerate() {
            let value = if valid[j] {
                let tmp = 0.5 * (slab.get(i_star, j) + slab.get(j_star, j) - d_star);
                slab.store(j_star, j, tmp);
                tmp
            } else {
                // Passthrough keeps the gathered column dense.
                slab.get(j_star, j)
            };
            exchange_owned[idx] = value;
        }

        let to_rank = slab.partition.who_owns(j_star) as Rank;
        let mut full_buffer = vec![0.0_f64; n];
        collective::gather_column(world, to_rank, &exchange_owned, &mut full_buffer, timings);

        if rank == to_rank {
            for i in 0..n {
                if valid[i] {
                    slab.store(i, j_star, full_buffer[i]);
                }
            }
        }

        // 9. Rank-0 tree bookkeeping.
        if let Some(tree) = tree.as_mut() {
            let d_ik = 0.5 * (d_star + r[i_star] - r[j_star]);
            let d_jk = d_star - d_ik;
            tree.merge(i_star, j_star, d_ik, d_jk);
        }

        // 10. Accumulate score.
        score += d_star;

        // 11. Barrier.
        collective::barrier(world, timings);

        // 12. Decrement.
        clusters -= 1;
    }

    // Terminal join between the last two active indices.
    let mut li = usize::MAX;
    let mut lj = usize::MAX;
    for i in 0..n {
        if valid[i] {
            if li == usize::MAX {
                li = i;
            } else {
                lj = i;
            }
        }
    }

    let owner = slab.partition.who_owns(lj) as Rank;
    let mut d_star = 0.0_f64;
    if rank == owner {
        d_star = slab.get(li, lj);
        score += d_star;
    }
    collective::broadcast_scalar(world, owner, &mut d_star, timings);
    collective::broadcast_scalar(world, owner, &mut score, timings);

    // R here is still the vector computed during the last completed
    // iteration, i.e. when clusters = 3; recomputing it now would divide by
    // clusters - 2 = 0.
    let root = tree.map(|tree| {
        let d_ik = 0.5 * (d_star + r[li] - r[lj]);
        let d_jk = d_star - d_ik;
        tree.finish(li, lj, d_ik, d_jk)
    });

    EngineOutcome { score, root }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_is_lowest_rank_on_tie() {
        let minima = vec![3.0, 1.0, 1.0, 5.0];
        assert_eq!(select_winner(&minima), 1);
    }

    #[test]
    fn winner_handles_all_infinite() {
        let minima = vec![f64::INFINITY, f64::INFINITY];
        assert_eq!(select_winner(&minima), 0);
    }
}
