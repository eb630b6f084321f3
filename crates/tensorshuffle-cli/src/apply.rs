//! # Apply Subcommand
//!
//! Reads a nested JSON array, applies a chain of operators to it, and writes
//! the result as JSON. Specs are given outermost first, so
//! `apply A B --input x.json` computes `A(B(x))`.
//!
//! ```bash
//! tensorshuffle apply "0,1/2,3" "0/1|2/3" --input tensor.json
//! tensorshuffle apply "0/1/2" --input tensor.json --weight=-0.5 --output out.json
//! ```

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tensorshuffle_operator::{array_to_json, Operator, SymmetrySpec};

use crate::{read_operand, write_json};

/// Arguments for `tensorshuffle apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Symmetry specs, outermost first. The last one is applied first.
    #[arg(required = true, num_args = 1..)]
    pub specs: Vec<SymmetrySpec>,

    /// JSON file holding the operand, or `-` for stdin.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Overall weight of the chain.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub weight: f64,

    /// Write the result here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Build `weight * P(specs[0]) * P(specs[1]) * ...`.
pub fn build_chain(specs: &[SymmetrySpec], weight: f64) -> Result<Operator> {
    let links = specs
        .iter()
        .cloned()
        .map(Operator::from_spec)
        .collect::<Result<Vec<_>, _>>()?;
    // Fold from the innermost spec so every step composes a single link.
    let chain = links
        .into_iter()
        .rev()
        .reduce(|inner, outer| outer * inner)
        .context("at least one spec is required")?;
    Ok(chain.scale(weight))
}

/// Execute the apply subcommand.
pub fn run_apply(args: &ApplyArgs, out: &mut impl Write) -> Result<u8> {
    let operator = build_chain(&args.specs, args.weight)?;
    let operand = read_operand(&args.input)?;
    tracing::info!(operator = %operator, shape = ?operand.shape(), "applying operator chain");

    let result = operator
        .evaluate(&operand)
        .with_context(|| format!("cannot apply {operator} to an array of shape {:?}", operand.shape()))?;
    let json = array_to_json(&result).with_context(|| {
        format!("result of {operator} cannot be written as JSON")
    })?;

    match &args.output {
        Some(path) => {
            let mut text = serde_json::to_string(&json).context("failed to serialize result")?;
            text.push('\n');
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote result");
        }
        None => write_json(out, &json)?,
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(list: &[&str]) -> Vec<SymmetrySpec> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn input_file(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("input.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn chain_display_and_weight() {
        let chain = build_chain(&specs(&["0,1/2,3", "0/1|2/3"]), 2.0).unwrap();
        assert_eq!(chain.to_string(), "2*P(0,1/2,3) * P(0/1|2/3)");
        assert!(build_chain(&[], 1.0).is_err());
    }

    #[test]
    fn antisymmetrizes_matrix_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let args = ApplyArgs {
            specs: specs(&["0/1"]),
            input: input_file(&dir, "[[1, 2], [3, 4]]"),
            weight: 0.5,
            output: None,
        };
        let mut out = Vec::new();
        assert_eq!(run_apply(&args, &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "[[0.0,-0.5],[0.5,0.0]]\n");
    }

    #[test]
    fn writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let args = ApplyArgs {
            specs: specs(&["0"]),
            input: input_file(&dir, "[1, 2, 3]"),
            weight: 1.0,
            output: Some(output.clone()),
        };
        let mut out = Vec::new();
        run_apply(&args, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(&output).unwrap(), "[1.0,2.0,3.0]\n");
    }

    #[test]
    fn unequal_axes_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let args = ApplyArgs {
            specs: specs(&["0/1"]),
            input: input_file(&dir, "[[1, 2, 3], [4, 5, 6]]"),
            weight: 1.0,
            output: None,
        };
        let err = run_apply(&args, &mut Vec::new()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("cannot apply P(0/1)"), "{message}");
        assert!(message.contains("[2, 3]"), "{message}");
    }

    #[test]
    fn overflowing_result_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let args = ApplyArgs {
            specs: specs(&["0/1"]),
            input: input_file(&dir, "[[1e308, -1e308], [1e308, 1.0]]"),
            weight: 3.0,
            output: Some(output.clone()),
        };
        let err = run_apply(&args, &mut Vec::new()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("cannot be written as JSON"), "{message}");
        assert!(message.contains("inf"), "{message}");
        assert!(!output.exists());
    }

    #[test]
    fn empty_operand_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let args = ApplyArgs {
            specs: specs(&["0/1"]),
            input: input_file(&dir, "[]"),
            weight: 1.0,
            output: None,
        };
        // `[]` has rank 1, so there is no axis 1 to pair with.
        assert!(run_apply(&args, &mut Vec::new()).is_err());

        let mut out = Vec::new();
        let args = ApplyArgs {
            specs: specs(&["0"]),
            input: input_file(&dir, "[]"),
            weight: 1.0,
            output: None,
        };
        run_apply(&args, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
