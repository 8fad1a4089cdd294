//! Random permutations and derangements, plus the validators used to check
//! what a ladder realizes.
//!
//! A permutation is a `Vec<usize>` of length `n` holding each of `0..n`
//! exactly once; index `i` maps to the value stored at `i`.

use crate::error::{LadderError, Result};
use rand::Rng;

/// Returns a uniformly random permutation of `0..n` (Fisher-Yates).
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        perm.swap(i, j);
    }
    perm
}

/// Returns a random permutation of `0..n` with no fixed point.
///
/// Runs the Fisher-Yates shuffle with the swap partner restricted to
/// `0..i`, so every element is moved away from its slot. The result is
/// always a single `n`-cycle, which makes it a derangement without any
/// rejection loop. It is uniform over cyclic permutations, not over all
/// derangements.
///
/// # Errors
/// Returns [`LadderError::InvalidConfiguration`] if `n < 2`.
pub fn random_derangement<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Vec<usize>> {
    if n < 2 {
        return Err(LadderError::invalid_configuration(format!(
            "a derangement needs at least 2 elements, got {n}"
        )));
    }
    let mut perm: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.random_range(0..i);
        perm.swap(i, j);
    }
    debug_assert!(is_derangement(&perm));
    Ok(perm)
}

/// Returns true if no index maps to itself.
pub fn is_derangement(perm: &[usize]) -> bool {
    perm.iter().enumerate().all(|(i, &v)| i != v)
}

/// Returns true if `perm` holds each of `0..perm.len()` exactly once.
pub fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    for &v in perm {
        if v >= perm.len() || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Positional inverse: `inverse(p)[p[i]] == i`.
///
/// `perm` must be a valid permutation.
pub fn inverse(perm: &[usize]) -> Vec<usize> {
    debug_assert!(is_permutation(perm));
    let mut inv = vec![0; perm.len()];
    for (i, &v) in perm.iter().enumerate() {
        inv[v] = i;
    }
    inv
}
