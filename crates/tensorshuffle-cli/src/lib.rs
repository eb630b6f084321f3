//! # tensorshuffle-cli: Command-Line Surface
//!
//! Provides the `tensorshuffle` binary, a thin inspection layer over
//! `tensorshuffle-core` and `tensorshuffle-operator`.
//!
//! ## Subcommands
//!
//! - `tensorshuffle blocks`: signed permutations of arbitrary labels with
//!   equivalence blocks.
//! - `tensorshuffle perms`: the signed axis permutations an operator sums.
//! - `tensorshuffle apply`: antisymmetrize a JSON array with a chain of operators.
//! - `tensorshuffle check`: test whether a JSON array is antisymmetric
//!   under a spec.
//!
//! ```bash
//! tensorshuffle blocks --items a,b,c,d --composition 2,2
//! tensorshuffle perms "0,1/2,3|4/5" --ndim 7
//! tensorshuffle apply "0,1/2,3" "0/1|2/3" --input tensor.json --output out.json
//! tensorshuffle check "0/1/2/3" --input out.json
//! ```
//!
//! Every handler writes its report to the writer it is given and returns the
//! process exit code; `main` owns stdout and the tracing subscriber.

pub mod apply;
pub mod blocks;
pub mod check;
pub mod perms;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::ArrayD;
use serde::Serialize;
use tensorshuffle_core::Sign;
use tensorshuffle_operator::array_from_json;

/// Read a nested JSON array from `path`, or from stdin when `path` is `-`.
pub fn read_operand(path: &Path) -> Result<ArrayD<f64>> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read operand from stdin")?;
        text
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read operand {}", path.display()))?
    };
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let array = array_from_json(&value)
        .with_context(|| format!("{} is not a rectangular numeric array", path.display()))?;
    tracing::info!(path = %path.display(), shape = ?array.shape(), "loaded operand");
    Ok(array)
}

/// Write `value` as a single line of JSON.
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

/// `+1  a b c`, the plain-text form of one signed permutation.
pub fn format_signed<T: std::fmt::Display>(sign: Sign, items: &[T]) -> String {
    format!("{sign}  {}", format_items(items))
}

/// Items separated by single spaces.
pub fn format_items<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
