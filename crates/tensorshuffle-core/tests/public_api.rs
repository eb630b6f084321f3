//! # Public API Tests
//!
//! Exercises the crate through its re-exports only, with label types other
//! than the integers the unit tests use.

use std::collections::HashSet;

use tensorshuffle_core::{
    signature, AppliedPermutations, BlockPermutations, ConfigurationError, PermutationSource,
    Sign, SignedPermutation,
};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_string_labels_with_three_blocks() {
    let items = labels(&["i", "j", "k", "l", "m"]);
    let bp = BlockPermutations::new(items.clone(), [2, 1, 2]).unwrap();
    let perms: Vec<SignedPermutation<String>> = bp.iter().collect();

    // 5! / (2! 1! 2!)
    assert_eq!(perms.len(), 30);
    let unique: HashSet<&Vec<String>> = perms.iter().map(|p| &p.items).collect();
    assert_eq!(unique.len(), 30);
    for p in &perms {
        assert_eq!(p.sign, signature(&items, &p.items).unwrap());
    }
}

#[test]
fn test_signed_permutation_json_shape() {
    let bp = BlockPermutations::new(labels(&["x", "y"]), [1, 1]).unwrap();
    let json = serde_json::to_value(bp.iter().collect::<Vec<_>>()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"sign": 1, "items": ["x", "y"]},
            {"sign": -1, "items": ["y", "x"]},
        ])
    );

    let parsed: Vec<SignedPermutation<String>> = serde_json::from_value(json).unwrap();
    assert_eq!(parsed[1].sign, Sign::Minus);
}

#[test]
fn test_applied_permutations_are_a_source() {
    fn count<S: PermutationSource>(source: &S) -> usize {
        source.signed_permutations().count()
    }

    let bp = BlockPermutations::new(labels(&["b", "c", "d"]), [1, 2]).unwrap();
    let applied =
        AppliedPermutations::new(bp.clone(), labels(&["a", "b", "c", "d", "e"])).unwrap();
    assert_eq!(count(&bp), 3);
    assert_eq!(count(&applied), 3);
    assert_eq!(applied.items().len(), 5);
}

#[test]
fn test_configuration_errors_are_displayable() {
    let err = AppliedPermutations::new(
        BlockPermutations::distinct(labels(&["a", "z"])).unwrap(),
        labels(&["a", "b"]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigurationError::NotASubset { .. }));
    assert_eq!(
        err.to_string(),
        r#"["a", "z"] is not a subset of ["a", "b"]"#
    );
}
