//! Distance matrix loading: the two-phase scan that turns a whitespace
//! separated token stream into this process's column-partitioned slab.

use std::fs;
use std::path::Path;

use mpi::topology::SystemCommunicator;
use mpi::traits::*;

use crate::error::{PanjoError, Result};
use crate::partition::ColumnPartition;

/// A process's resident slab: `K` owned columns of an N×N matrix, stored
/// column-major as `local[i + (j - start) * n]` for global row `i`, global
/// column `j`. This is the addressing scheme the reference implementation's
/// `ij_to_n`/`store`/`get` triplet encodes; preserving it is what makes
/// output bit-equivalent with reference runs.
#[derive(Debug, Clone)]
pub struct LocalSlab {
    pub partition: ColumnPartition,
    data: Vec<f64>,
}

impl LocalSlab {
    fn index(&self, i: usize, j: usize) -> usize {
        i + (j - self.partition.start) * self.partition.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.index(i, j)]
    }

    pub fn store(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.data[idx] = value;
    }
}

/// Count whitespace-separated tokens in `path`. Rank 0 performs this phase
/// and broadcasts the resulting total scalar count; see
/// [`load_distance_matrix`].
fn count_tokens(path: &Path) -> Result<usize> {
    let contents = fs::read_to_string(path).map_err(|source| PanjoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.split_whitespace().count())
}

/// Load this process's column-partitioned slab of the distance matrix named
/// by `path`, broadcasting the discovered size `N` from rank 0 to every
/// peer in `world` before each process re-scans the file independently.
///
/// `p` is the process-group size; the resulting [`ColumnPartition`] is for
/// `rank` out of `p`.
pub fn load_distance_matrix(
    path: &Path,
    world: &SystemCommunicator,
    rank: usize,
    p: usize,
) -> Result<LocalSlab> {
    let mut token_count = if rank == 0 {
        count_tokens(path)? as i64
    } else {
        0
    };

    let root = world.process_at_rank(0);
    root.broadcast_into(&mut token_count);

    let token_count = token_count as usize;
    let n = (token_count as f64).sqrt() as usize;

    if n * n != token_count {
        return Err(PanjoError::ShapeMismatch { n_squared: n * n, token_count });
    }

    let partition = ColumnPartition::new(n, p, rank)?;

    let contents = fs::read_to_string(path).map_err(|source| PanjoError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut data = vec![0.0_f64; partition.width() * n];

    for (k, token) in contents.split_whitespace().enumerate() {
        let j = k / n;
        let i = k % n;

        if !partition.owns(j) {
            continue;
        }

        let value: f64 = token
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| PanjoError::MalformedInput { token: token.to_string(), index: k })?;

        let idx = i + (j - partition.start) * n;
        data[idx] = value;
    }

    Ok(LocalSlab { partition, data })
}
