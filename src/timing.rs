//! Wall-clock and MPI-time-only accounting, mirroring the reference's
//! `start_mpi_timer`/`stop_mpi_timer` bracketing and `struct Timer`.

use std::time::{Duration, Instant};

/// Accumulates total wall-clock time for the run and the portion of it
/// spent inside collective calls.
#[derive(Debug, Default)]
pub struct Timings {
    start: Option<Instant>,
    total: Duration,
    mpi: Duration,
}

impl Timings {
    pub fn new() -> Self {
        Timings::default()
    }

    pub fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start.take() {
            self.total += start.elapsed();
        }
    }

    /// Time `f`, adding its elapsed duration to the MPI-time total. Every
    /// call in `collective.rs` is wrapped with this, the same way the
    /// reference brackets every `MPI_*` call with `start_mpi_timer`/
    /// `stop_mpi_timer`.
    pub fn time_mpi<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.mpi += start.elapsed();
        result
    }

    pub fn total_seconds(&self) -> f64 {
        self.total.as_secs_f64()
    }

    pub fn mpi_seconds(&self) -> f64 {
        self.mpi.as_secs_f64()
    }
}
