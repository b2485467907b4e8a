use std::io::Write as _;

use clap::Parser;
use gethostname::gethostname;
use log::warn;
use mpi::topology::Rank;
use mpi::traits::*;

use panjo::cli::Options;
use panjo::engine;
use panjo::error::PanjoError;
use panjo::matrix::load_distance_matrix;
use panjo::timing::Timings;
use panjo::treebuild::TreeBuilder;

/// The `Panjo[host:rank-R]: <message>` tag every log line carries, shared
/// with `PanjoError::tagged`'s error-report format. Kept as a pure function
/// of its inputs so the format itself is unit-testable without an
/// `env_logger` record.
fn format_log_line(host: &str, rank: Rank, message: &str) -> String {
    format!("Panjo[{host}:rank-{rank}]: {message}")
}

fn init_logger(rank: Rank, verbose: bool) {
    let host = gethostname().to_string_lossy().into_owned();
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(move |buf, record| {
            writeln!(buf, "{}", format_log_line(&host, rank, &record.args().to_string()))
        })
        .init();
}

fn main() {
    let universe = mpi::initialize().unwrap();
    let world = universe.world();
    let rank = world.rank();
    let size = world.size();

    let options = Options::parse();

    init_logger(rank, options.verbose);

    if options.output_path.is_none() && rank == 0 {
        warn!("using standard output to write tree to!");
    }

    let mut timings = Timings::new();
    timings.start();

    let slab = match load_distance_matrix(&options.input_path, &world, rank as usize, size as usize) {
        Ok(slab) => slab,
        Err(err) => {
            err.report(rank);
            std::process::exit(1);
        }
    };

    let n = slab.partition.n;
    let p = size as usize;

    if rank == 0 {
        log::info!("Beginning Neighbor-Join Algorithm.");
        log::info!("N = {n}");
        log::info!("P = {p}");
        log::info!("K = {}", n / p);
    }

    let tree = if rank == 0 { Some(TreeBuilder::new(n)) } else { None };

    let outcome = engine::run(&world, rank, slab, tree, &mut timings);

    timings.stop();

    if rank == 0 {
        let root = outcome.root.expect("rank 0 always builds a tree");
        let serialized = root.serialize(options.emit_branch_lengths);

        // The preamble, timing, and benchmark lines always go to standard
        // output, matching the reference's hardcoded `printf`s; only the
        // bare serialized tree is eligible to be redirected into -o.
        println!("TreeScore: {}", outcome.score);
        println!("MPI time: {}", timings.mpi_seconds());
        println!("Total time: {}", timings.total_seconds());
        println!(
            "Benchmark Output: {}, {}, {}, {}",
            n,
            p,
            timings.total_seconds(),
            timings.mpi_seconds()
        );
        print!("Neighbor-Joining Tree:\n\t");
        std::io::stdout().flush().unwrap();

        let mut out: Box<dyn std::io::Write> = match &options.output_path {
            Some(path) => match std::fs::File::create(path) {
                Ok(file) => Box::new(file),
                Err(source) => {
                    PanjoError::Io { path: path.clone(), source }.report(rank);
                    std::process::exit(1);
                }
            },
            None => Box::new(std::io::stdout()),
        };

        write!(out, "{serialized}").unwrap();
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_line_carries_host_and_rank_tag() {
        let line = format_log_line("node07", 2, "Beginning Neighbor-Join Algorithm.");
        assert_eq!(line, "Panjo[node07:rank-2]: Beginning Neighbor-Join Algorithm.");
    }
}
