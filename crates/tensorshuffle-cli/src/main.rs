//! # tensorshuffle CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, and
//! dispatches to subcommand handlers.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tensorshuffle_cli::apply::{run_apply, ApplyArgs};
use tensorshuffle_cli::blocks::{run_blocks, BlocksArgs};
use tensorshuffle_cli::check::{run_check, CheckArgs};
use tensorshuffle_cli::perms::{run_perms, PermsArgs};

/// Signed block permutations and antisymmetrization of multi-dimensional arrays.
#[derive(Parser, Debug)]
#[command(name = "tensorshuffle", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List signed permutations of labelled items with equivalence blocks.
    Blocks(BlocksArgs),

    /// List the signed axis permutations an operator sums over.
    Perms(PermsArgs),

    /// Apply a chain of antisymmetrization operators to a JSON array.
    Apply(ApplyArgs),

    /// Check whether a JSON array is antisymmetric under a spec.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Without -v, RUST_LOG wins if set.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tensorshuffle starting");

    let mut out = io::stdout().lock();
    let result = match &cli.command {
        Commands::Blocks(args) => run_blocks(args, &mut out),
        Commands::Perms(args) => run_perms(args, &mut out),
        Commands::Apply(args) => run_apply(args, &mut out),
        Commands::Check(args) => run_check(args, &mut out),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_blocks() {
        let cli = Cli::try_parse_from([
            "tensorshuffle",
            "blocks",
            "--items",
            "a,b,c,d",
            "--composition",
            "2,2",
            "--json",
        ])
        .unwrap();
        if let Commands::Blocks(args) = cli.command {
            assert_eq!(args.items, vec!["a", "b", "c", "d"]);
            assert_eq!(args.composition, Some(vec![2, 2]));
            assert!(args.json);
            assert!(!args.unsigned);
        } else {
            panic!("expected blocks");
        }
    }

    #[test]
    fn cli_parse_blocks_requires_items() {
        assert!(Cli::try_parse_from(["tensorshuffle", "blocks"]).is_err());
    }

    #[test]
    fn cli_parse_perms_with_spec() {
        let cli = Cli::try_parse_from(["tensorshuffle", "perms", "0,1/2,3|4/5", "--ndim", "7"])
            .unwrap();
        if let Commands::Perms(args) = cli.command {
            assert_eq!(args.spec.to_string(), "0,1/2,3|4/5");
            assert_eq!(args.ndim, Some(7));
        } else {
            panic!("expected perms");
        }
    }

    #[test]
    fn cli_parse_rejects_malformed_spec() {
        assert!(Cli::try_parse_from(["tensorshuffle", "perms", "0,/1"]).is_err());
        assert!(Cli::try_parse_from(["tensorshuffle", "perms", "0|0"]).is_err());
    }

    #[test]
    fn cli_parse_apply_chain() {
        let cli = Cli::try_parse_from([
            "tensorshuffle",
            "-vv",
            "apply",
            "0,1/2,3",
            "0/1|2/3",
            "--input",
            "t.json",
            "--weight",
            "-0.5",
            "-o",
            "out.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        if let Commands::Apply(args) = cli.command {
            let specs: Vec<String> = args.specs.iter().map(ToString::to_string).collect();
            assert_eq!(specs, vec!["0,1/2,3", "0/1|2/3"]);
            assert_eq!(args.input, PathBuf::from("t.json"));
            assert_eq!(args.weight, -0.5);
            assert_eq!(args.output, Some(PathBuf::from("out.json")));
        } else {
            panic!("expected apply");
        }
    }

    #[test]
    fn cli_parse_apply_needs_a_spec_and_input() {
        assert!(Cli::try_parse_from(["tensorshuffle", "apply", "--input", "t.json"]).is_err());
        assert!(Cli::try_parse_from(["tensorshuffle", "apply", "0/1"]).is_err());
    }

    #[test]
    fn cli_parse_check_defaults() {
        let cli =
            Cli::try_parse_from(["tensorshuffle", "check", "0/1/2", "-i", "-"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.spec.to_string(), "0/1/2");
            assert_eq!(args.input, PathBuf::from("-"));
            assert_eq!(args.tolerance, 1e-9);
            assert!(!args.json);
        } else {
            panic!("expected check");
        }
    }
}
