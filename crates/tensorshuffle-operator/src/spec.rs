//! # Symmetry Spec
//!
//! Parses the compact textual description of an antisymmetrizer:
//!
//! ```text
//! 0,1/2,3|4/5
//! ```
//!
//! - `|` separates independent groups. Their permutations are combined by
//!   Cartesian product.
//! - `/` separates equivalence blocks within a group.
//! - `,` separates axes within a block.
//!
//! Each axis is the decimal form of a non-negative integer. Every group
//! becomes a flat item list in block order plus the list of block sizes.
//! The example above is two groups: items `[0, 1, 2, 3]` with composition
//! `[2, 2]`, and items `[4, 5]` with composition `[1, 1]`.
//!
//! An axis may appear at most once in a whole spec.

use std::collections::HashSet;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// One `|`-separated group: axes in block order and the size of each block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockGroup {
    items: Vec<usize>,
    composition: Vec<usize>,
}

impl BlockGroup {
    /// Build a group from its blocks. There must be at least one block and
    /// no block may be empty.
    pub fn new(blocks: Vec<Vec<usize>>) -> Result<Self, SpecError> {
        if blocks.is_empty() || blocks.iter().any(Vec::is_empty) {
            return Err(SpecError::Empty {
                group: blocks.iter().map(|block| block.iter().join(",")).join("/"),
            });
        }
        let composition = blocks.iter().map(Vec::len).collect();
        let items = blocks.into_iter().flatten().collect();
        Ok(Self { items, composition })
    }

    /// Axes in block order.
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    /// Block sizes.
    pub fn composition(&self) -> &[usize] {
        &self.composition
    }

    /// The axes of each block.
    pub fn blocks(&self) -> impl Iterator<Item = &[usize]> + '_ {
        let mut rest = self.items.as_slice();
        self.composition.iter().map(move |&size| {
            let (block, tail) = rest.split_at(size);
            rest = tail;
            block
        })
    }

    fn parse(group: &str) -> Result<Self, SpecError> {
        let mut items = Vec::new();
        let mut composition = Vec::new();
        for block in group.split('/') {
            let start = items.len();
            for token in block.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    return Err(SpecError::Empty {
                        group: group.to_string(),
                    });
                }
                let axis = token.parse::<usize>().map_err(|_| SpecError::InvalidAxis {
                    token: token.to_string(),
                    group: group.to_string(),
                })?;
                items.push(axis);
            }
            composition.push(items.len() - start);
        }
        Ok(Self { items, composition })
    }
}

impl std::fmt::Display for BlockGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (b, block) in self.blocks().enumerate() {
            if b > 0 {
                f.write_str("/")?;
            }
            for (i, axis) in block.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{axis}")?;
            }
        }
        Ok(())
    }
}

/// A parsed symmetry spec: one or more independent block groups.
///
/// Round-trips through its textual form with `FromStr`/`Display`, and
/// serializes as that string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymmetrySpec {
    groups: Vec<BlockGroup>,
}

impl SymmetrySpec {
    /// Assemble a spec from groups, rejecting axes named more than once.
    pub fn new(groups: Vec<BlockGroup>) -> Result<Self, SpecError> {
        let spec = Self { groups };
        let mut seen = HashSet::new();
        if let Some(axis) = spec.axes().find(|axis| !seen.insert(*axis)) {
            return Err(SpecError::DuplicateAxis {
                axis,
                spec: spec.to_string(),
            });
        }
        Ok(spec)
    }

    pub fn groups(&self) -> &[BlockGroup] {
        &self.groups
    }

    /// Every axis the spec names, group by group in block order.
    pub fn axes(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().flat_map(|g| g.items.iter().copied())
    }

    /// Smallest operand rank that contains every named axis.
    pub fn min_ndim(&self) -> usize {
        self.axes().max().map_or(0, |axis| axis + 1)
    }
}

impl FromStr for SymmetrySpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let groups = s
            .split('|')
            .map(BlockGroup::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(groups)
    }
}

impl std::fmt::Display for SymmetrySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (g, group) in self.groups.iter().enumerate() {
            if g > 0 {
                f.write_str("|")?;
            }
            write!(f, "{group}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for SymmetrySpec {
    type Error = SpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SymmetrySpec> for String {
    fn from(spec: SymmetrySpec) -> String {
        spec.to_string()
    }
}
