//! Command-line surface: the distance matrix path, an optional output
//! path, and the output-format extensions this expansion adds on top of
//! the reference's bare `-f`/`-o`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "panjo",
    about = "Distributed Neighbor-Joining tree construction",
    version,
    disable_help_flag = true
)]
pub struct Options {
    /// Display this.
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,

    /// The input distance matrix filename, in column-major order.
    #[arg(short = 'f', long = "input", value_name = "PATH")]
    pub input_path: PathBuf,

    /// The output filename for the tree. Defaults to standard output.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Annotate each child with its branch length (`child:length`). Off by
    /// default to keep output byte-for-byte compatible with the reference.
    #[arg(long = "branch-lengths")]
    pub emit_branch_lengths: bool,

    /// Raise the log level on non-root ranks.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_input_path() {
        let opts = Options::parse_from(["panjo", "-f", "dist.txt"]);
        assert_eq!(opts.input_path, PathBuf::from("dist.txt"));
        assert_eq!(opts.output_path, None);
        assert!(!opts.emit_branch_lengths);
    }

    #[test]
    fn parses_all_flags() {
        let opts = Options::parse_from([
            "panjo", "--input", "dist.txt", "--output", "tree.out", "--branch-lengths", "-v",
        ]);
        assert_eq!(opts.output_path, Some(PathBuf::from("tree.out")));
        assert!(opts.emit_branch_lengths);
        assert!(opts.verbose);
    }

    #[test]
    fn rejects_missing_input() {
        assert!(Options::try_parse_from(["panjo"]).is_err());
    }
}
