//! Column-partitioned layout of the logical N×N distance matrix.
//!
//! Process `p` owns the contiguous column range `[p*K, (p+1)*K)` where
//! `K = N/P`. Non-uniform partitions (`N mod P != 0`) are a non-goal; see
//! [`ColumnPartition::new`].

use crate::error::{PanjoError, Result};

/// Per-process descriptor of the column range this process owns, plus the
/// logical matrix size N. Deliberately holds no MPI state: the divisibility
/// check and ownership arithmetic are pure and unit-testable without a
/// communicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPartition {
    pub n: usize,
    pub p: usize,
    pub rank: usize,
    pub start: usize,
    pub end: usize,
}

impl ColumnPartition {
    /// Build the partition for `rank` out of `p` processes over an N×N
    /// matrix. Fails with [`PanjoError::Partitioning`] if `n mod p != 0`,
    /// carrying the largest divisor of `n` not exceeding `p` as a hint.
    pub fn new(n: usize, p: usize, rank: usize) -> Result<Self> {
        if n % p != 0 {
            let hint = (1..=p).rev().find(|d| n % d == 0);
            return Err(PanjoError::Partitioning { n, p, hint });
        }

        let k = n / p;
        let start = rank * k;
        let end = start + k;
        Ok(ColumnPartition { n, p, rank, start, end })
    }

    /// Number of columns this process owns.
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    /// `true` if this process owns global column `j`.
    pub fn owns(&self, j: usize) -> bool {
        j >= self.start && j < self.end
    }

    /// Which rank owns global column `j`, given the uniform `K = n/p` width
    /// shared by every process.
    pub fn who_owns(&self, j: usize) -> usize {
        let k = self.n / self.p;
        j / k
    }
}
