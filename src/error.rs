//! Error taxonomy for Panjo, and the rank/hostname-tagged reporting helper
//! used by the driver before it exits.

use std::path::PathBuf;

use gethostname::gethostname;
use mpi::topology::Rank;
use thiserror::Error;

/// Every way a Panjo run can fail. All variants are fatal: the engine never
/// attempts recovery or partial results (see the error handling policy).
#[derive(Debug, Error)]
pub enum PanjoError {
    #[error("cannot open '{path}' for reading: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input: token '{token}' at index {index} is not a finite number")]
    MalformedInput { token: String, index: usize },

    #[error("shape mismatch: N*N ({n_squared}) does not equal the token count ({token_count})")]
    ShapeMismatch { n_squared: usize, token_count: usize },

    #[error(
        "matrix size N={n} is not evenly divisible by P={p} processes{}",
        hint.map(|h| format!("; largest divisor of {n} not exceeding {p} is {h}")).unwrap_or_default()
    )]
    Partitioning { n: usize, p: usize, hint: Option<usize> },

    #[error("collective operation failed: {0}")]
    Collective(String),
}

impl PanjoError {
    /// Format this error the way the reference implementation's
    /// `Panjo[hostname:rank-R]` log tag does. Pure and host-agnostic so it
    /// can be unit-tested without touching the real hostname.
    pub fn tagged(&self, host: &str, rank: Rank) -> String {
        format!("Panjo[{host}:rank-{rank}]: {self}")
    }

    /// Print this error's tagged form to stderr. The driver calls this once
    /// at the top level; library code stays pure `Result`-returning.
    pub fn report(&self, rank: Rank) {
        let host = gethostname().to_string_lossy().into_owned();
        eprintln!("{}", self.tagged(&host, rank));
    }
}

pub type Result<T> = std::result::Result<T, PanjoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_carries_host_and_rank() {
        let err = PanjoError::ShapeMismatch { n_squared: 9, token_count: 10 };
        let tagged = err.tagged("node07", 3);
        assert_eq!(
            tagged,
            "Panjo[node07:rank-3]: shape mismatch: N*N (9) does not equal the token count (10)"
        );
    }

    #[test]
    fn partitioning_message_includes_hint_when_present() {
        let err = PanjoError::Partitioning { n: 5, p: 3, hint: Some(1) };
        let tagged = err.tagged("host", 0);
        assert!(tagged.contains("largest divisor of 5 not exceeding 3 is 1"));
    }

    #[test]
    fn partitioning_message_omits_hint_when_absent() {
        let err = PanjoError::Partitioning { n: 5, p: 3, hint: None };
        let tagged = err.tagged("host", 0);
        assert!(!tagged.contains("largest divisor"));
    }
}
