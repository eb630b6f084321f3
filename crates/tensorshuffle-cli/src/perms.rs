//! # Perms Subcommand
//!
//! Prints the signed axis permutations one application of an operator sums
//! over, lifted onto `0..ndim`.
//!
//! ```bash
//! tensorshuffle perms "0,1/2,3"
//! tensorshuffle perms "1/3" --ndim 5 --json
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use tensorshuffle_operator::{Operator, SymmetrySpec};

use crate::{format_signed, write_json};

/// Arguments for `tensorshuffle perms`.
#[derive(Args, Debug)]
pub struct PermsArgs {
    /// Symmetry spec, e.g. "0,1/2,3|4/5".
    pub spec: SymmetrySpec,

    /// Operand rank. Defaults to one more than the largest axis in the spec.
    #[arg(long)]
    pub ndim: Option<usize>,

    /// Emit a JSON array instead of one line per permutation.
    #[arg(long)]
    pub json: bool,
}

/// Execute the perms subcommand.
pub fn run_perms(args: &PermsArgs, out: &mut impl Write) -> Result<u8> {
    let operator = Operator::from_spec(args.spec.clone())?;
    let ndim = args.ndim.unwrap_or_else(|| args.spec.min_ndim());
    tracing::info!(spec = %args.spec, ndim, terms = ?operator.term_count(), "listing axis permutations");

    let perms = operator
        .signed_axis_permutations(ndim)
        .with_context(|| format!("spec {} does not fit a rank-{ndim} operand", args.spec))?;

    if args.json {
        write_json(out, &perms.collect::<Vec<_>>())?;
    } else {
        for p in perms {
            writeln!(out, "{}", format_signed(p.sign, &p.items))?;
        }
    }
    Ok(0)
}
