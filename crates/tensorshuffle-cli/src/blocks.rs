//! # Blocks Subcommand
//!
//! Lists every distinct arrangement of a labelled item set with equivalence
//! blocks, each with the parity of its position permutation.
//!
//! ```bash
//! tensorshuffle blocks --items a,b,c,d --composition 2,2
//! tensorshuffle blocks --items x,y,z --unsigned --json
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use tensorshuffle_core::BlockPermutations;

use crate::{format_items, format_signed, write_json};

/// Arguments for `tensorshuffle blocks`.
#[derive(Args, Debug)]
pub struct BlocksArgs {
    /// Item labels in reference order, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    pub items: Vec<String>,

    /// Block sizes, comma separated. Defaults to one block per item.
    #[arg(long, value_delimiter = ',')]
    pub composition: Option<Vec<usize>>,

    /// Emit a JSON array instead of one line per permutation.
    #[arg(long)]
    pub json: bool,

    /// Omit signs.
    #[arg(long)]
    pub unsigned: bool,
}

/// Execute the blocks subcommand.
pub fn run_blocks(args: &BlocksArgs, out: &mut impl Write) -> Result<u8> {
    let items = args.items.iter().map(|s| s.trim().to_string());
    let perms = match &args.composition {
        Some(composition) => BlockPermutations::new(items, composition.iter().copied()),
        None => BlockPermutations::distinct(items),
    }
    .context("invalid item set")?;

    tracing::info!(
        items = perms.len(),
        composition = ?perms.composition(),
        count = ?perms.permutation_count(),
        "enumerating block permutations"
    );

    match (args.json, args.unsigned) {
        (true, true) => write_json(out, &perms.unsigned().collect::<Vec<_>>())?,
        (true, false) => write_json(out, &perms.iter().collect::<Vec<_>>())?,
        (false, true) => {
            for items in perms.unsigned() {
                writeln!(out, "{}", format_items(&items))?;
            }
        }
        (false, false) => {
            for p in &perms {
                writeln!(out, "{}", format_signed(p.sign, &p.items))?;
            }
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str], composition: Option<Vec<usize>>) -> BlocksArgs {
        BlocksArgs {
            items: items.iter().map(|s| s.to_string()).collect(),
            composition,
            json: false,
            unsigned: false,
        }
    }

    fn run(args: &BlocksArgs) -> String {
        let mut out = Vec::new();
        assert_eq!(run_blocks(args, &mut out).unwrap(), 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_signed_arrangements_order() {
        let text = run(&args(&["a", "b", "c"], Some(vec![1, 2])));
        assert_eq!(text, "+1  a b c\n+1  c a b\n-1  c b a\n");
    }

    #[test]
    fn composition_defaults_to_singletons() {
        let text = run(&args(&["x", "y", "z"], None));
        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("+1  x y z\n"));
    }

    #[test]
    fn unsigned_json_output() {
        let mut a = args(&["a", "b"], None);
        a.unsigned = true;
        a.json = true;
        assert_eq!(run(&a), "[[\"a\",\"b\"],[\"b\",\"a\"]]\n");
    }

    #[test]
    fn signed_json_output() {
        let mut a = args(&["p", "q"], Some(vec![1, 1]));
        a.json = true;
        let value: serde_json::Value = serde_json::from_str(&run(&a)).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"sign": 1, "items": ["p", "q"]},
                {"sign": -1, "items": ["q", "p"]}
            ])
        );
    }

    #[test]
    fn bad_composition_is_an_error() {
        let err = run_blocks(&args(&["a", "b"], Some(vec![3])), &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("not an integer composition"));

        let err = run_blocks(&args(&["a", "a"], None), &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("appears more than once"));
    }
}
