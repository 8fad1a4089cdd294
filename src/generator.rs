use std::ops::Range;

use crate::error::{LadderError, Result};
use crate::layout::{Layout, row_count};
use crate::permutation::{inverse, random_derangement};
use crate::trace::follow;
use rand::Rng;
use tracing::{debug, trace};

/// What board to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderConfig {
    /// Number of vertical lines. Must be at least 2.
    pub column_count: usize,
    /// When true, no column may end where it started.
    pub exclude_self: bool,
}

impl LadderConfig {
    pub fn new(column_count: usize, exclude_self: bool) -> Self {
        Self {
            column_count,
            exclude_self,
        }
    }

    /// Number of rows a board built from this config has.
    pub fn row_count(&self) -> usize {
        row_count(self.column_count, self.exclude_self)
    }

    fn validate(&self) -> Result<()> {
        if self.column_count < 2 {
            return Err(LadderError::invalid_configuration(format!(
                "column count must be at least 2, got {}",
                self.column_count
            )));
        }
        Ok(())
    }
}

/// Tuning knobs for the generator.
#[derive(Debug, Clone)]
pub struct GeneratorParams {
    /// Chance of placing a rung in a free slot of a random row.
    ///
    /// A slot directly right of a rung is never filled, so the realized
    /// density is lower than this.
    pub rung_probability: f64,
    /// Fill the rows left after correction with matched rung pairs.
    ///
    /// Each pair puts the same slot on two consecutive rows, which cancels
    /// out and leaves the realized permutation unchanged. Only used in
    /// exclude-self mode.
    pub pad_with_pairs: bool,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            rung_probability: 0.6,
            pad_with_pairs: true,
        }
    }
}

impl GeneratorParams {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.rung_probability) {
            return Err(LadderError::invalid_configuration(format!(
                "rung probability must be in [0.0, 1.0], got {}",
                self.rung_probability
            )));
        }
        Ok(())
    }
}

/// Generates a random ghost-leg board.
///
/// Without `exclude_self` every row is filled with random rungs and the
/// board realizes an arbitrary permutation, fixed points included.
///
/// With `exclude_self` the board realizes a randomly drawn derangement:
/// the top half (or more) is random, then one correcting rung per row
/// steers the permutation reached so far onto the target, and whatever
/// rows remain are padded with rung pairs that cancel out.
///
/// The output is deterministic given the same rng state and parameters.
///
/// # Errors
/// Returns [`LadderError::InvalidConfiguration`] if `column_count < 2` or
/// `rung_probability` is outside `[0.0, 1.0]`.
pub fn generate<R: Rng + ?Sized>(
    config: LadderConfig,
    rng: &mut R,
    params: &GeneratorParams,
) -> Result<Layout> {
    config.validate()?;
    params.validate()?;

    let n = config.column_count;
    let rows = config.row_count();
    debug!(
        column_count = n,
        exclude_self = config.exclude_self,
        row_count = rows,
        "generating ladder"
    );

    let mut layout = Layout::empty(n, rows);
    if !config.exclude_self {
        fill_random(&mut layout, 0..rows, params.rung_probability, rng);
        return Ok(layout);
    }

    let target = random_derangement(n, rng)?;

    // Worst case for the swap reduction is n(n-1)/2 swaps.
    let reserve = n * (n - 1) / 2 + 2;
    let chaos_rows = (rows / 2).max(rows.saturating_sub(reserve));
    fill_random(&mut layout, 0..chaos_rows, params.rung_probability, rng);

    let realized: Vec<usize> = (0..n)
        .map(|c| follow(layout.rows().take(chaos_rows), c))
        .collect();
    let realized_inv = inverse(&realized);
    let correction: Vec<usize> = (0..n).map(|c| target[realized_inv[c]]).collect();
    let swaps = adjacent_swaps(&correction);

    trace!(
        chaos_rows,
        swaps = swaps.len(),
        spare_rows = rows - chaos_rows,
        "planned correction"
    );
    debug_assert!(chaos_rows + swaps.len() <= rows);

    let mut cursor = chaos_rows;
    for (row, &slot) in (chaos_rows..rows).zip(&swaps) {
        layout.set_unchecked(row, slot);
        cursor = row + 1;
    }

    if params.pad_with_pairs {
        pad_with_pairs(&mut layout, cursor, rng);
    }

    debug_assert_eq!(crate::trace::compute_all_results(&layout), target);
    Ok(layout)
}

/// Fills `rows` with random rungs, skipping any slot right of a rung.
fn fill_random<R: Rng + ?Sized>(
    layout: &mut Layout,
    rows: Range<usize>,
    probability: f64,
    rng: &mut R,
) {
    for r in rows {
        let row = layout.row_mut(r);
        for s in 0..row.len() {
            row[s] = !(s > 0 && row[s - 1]) && rng.random_bool(probability);
        }
    }
}

/// Adjacent swaps, as slot indices, that carry column `c` to `correction[c]`.
///
/// Selection sort over an identity state: for each position `i`, the
/// column that has to end there is walked left one slot at a time. At most
/// n(n-1)/2 swaps are produced.
fn adjacent_swaps(correction: &[usize]) -> Vec<usize> {
    let n = correction.len();
    let wanted = inverse(correction);
    let mut state: Vec<usize> = (0..n).collect();
    let mut swaps = Vec::new();

    for i in 0..n {
        let mut pos = i;
        while state[pos] != wanted[i] {
            pos += 1;
        }
        while pos > i {
            state.swap(pos - 1, pos);
            swaps.push(pos - 1);
            pos -= 1;
        }
    }
    swaps
}

/// Places matched rung pairs on rows `from..` two rows at a time.
fn pad_with_pairs<R: Rng + ?Sized>(layout: &mut Layout, from: usize, rng: &mut R) {
    let mut row = from;
    while row + 1 < layout.row_count() {
        let slot = rng.random_range(0..layout.slot_count());
        if layout.slot_is_free(row, slot) && layout.slot_is_free(row + 1, slot) {
            layout.set_unchecked(row, slot);
            layout.set_unchecked(row + 1, slot);
        }
        row += 2;
    }
}

/// An iterator that produces fresh boards for one configuration.
///
/// Created by [`Generator::new`]. Each call to `next()` is an independent
/// [`generate`] drawing from the owned rng, so the iterator never ends.
///
/// # Example
///
/// ```
/// use ghost_leg::{Generator, GeneratorParams, LadderConfig, compute_all_results, is_derangement};
/// use rand_chacha::ChaCha20Rng;
/// use rand::SeedableRng;
///
/// let rng = ChaCha20Rng::seed_from_u64(0);
/// let config = LadderConfig::new(5, true);
/// let boards = Generator::new(config, rng, GeneratorParams::default()).unwrap();
///
/// for layout in boards.take(10) {
///     assert!(is_derangement(&compute_all_results(&layout)));
/// }
/// ```
pub struct Generator<R> {
    config: LadderConfig,
    rng: R,
    params: GeneratorParams,
}

impl<R: Rng> Generator<R> {
    /// Create a new generator.
    ///
    /// # Errors
    /// Fails on the same configurations [`generate`] rejects.
    pub fn new(config: LadderConfig, rng: R, params: GeneratorParams) -> Result<Self> {
        config.validate()?;
        params.validate()?;
        Ok(Self { config, rng, params })
    }

    pub fn config(&self) -> LadderConfig {
        self.config
    }
}

impl<R: Rng> Iterator for Generator<R> {
    type Item = Layout;

    fn next(&mut self) -> Option<Self::Item> {
        generate(self.config, &mut self.rng, &self.params).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::{is_derangement, is_permutation, random_permutation};
    use crate::trace::compute_all_results;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn defaults() -> GeneratorParams {
        GeneratorParams::default()
    }

    #[test]
    fn four_columns_unconstrained_shape() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let layout = generate(LadderConfig::new(4, false), &mut rng, &defaults()).unwrap();
        assert_eq!(layout.row_count(), 16);
        let rows = layout.to_rows();
        assert_eq!(rows.len(), 16);
        assert!(rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn two_columns_exclude_self_swaps() {
        for seed in 0..50 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let layout = generate(LadderConfig::new(2, true), &mut rng, &defaults()).unwrap();
            assert_eq!(layout.row_count(), 12);
            assert_eq!(compute_all_results(&layout), vec![1, 0]);
        }
    }

    #[test]
    fn exclude_self_realizes_drawn_derangement() {
        for n in 2..=8 {
            for seed in 0..100 {
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                let mut drawn = rng.clone();
                let target = random_derangement(n, &mut drawn).unwrap();

                let layout = generate(LadderConfig::new(n, true), &mut rng, &defaults()).unwrap();
                assert_eq!(layout.row_count(), row_count(n, true));
                assert!(layout.has_no_adjacent_rungs());
                assert_eq!(
                    compute_all_results(&layout),
                    target,
                    "n={}, seed={}",
                    n,
                    seed
                );
            }
        }
    }

    #[test]
    fn unconstrained_mode_allows_fixed_points() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let found = (0..200).any(|_| {
            let layout = generate(LadderConfig::new(3, false), &mut rng, &defaults()).unwrap();
            let results = compute_all_results(&layout);
            assert!(is_permutation(&results));
            !is_derangement(&results)
        });
        assert!(found, "no fixed point in 200 unconstrained boards");
    }

    #[test]
    fn every_board_keeps_rungs_apart() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for n in 2..=10 {
            for exclude_self in [false, true] {
                for _ in 0..20 {
                    let layout =
                        generate(LadderConfig::new(n, exclude_self), &mut rng, &defaults())
                            .unwrap();
                    assert!(layout.has_no_adjacent_rungs(), "n={}", n);
                }
            }
        }
    }

    #[test]
    fn extreme_probabilities_still_derange() {
        for rung_probability in [0.0, 1.0] {
            let params = GeneratorParams {
                rung_probability,
                ..Default::default()
            };
            let mut rng = ChaCha20Rng::seed_from_u64(5);
            for n in 2..=7 {
                let layout = generate(LadderConfig::new(n, true), &mut rng, &params).unwrap();
                assert!(layout.has_no_adjacent_rungs());
                assert!(is_derangement(&compute_all_results(&layout)));
            }
        }
    }

    #[test]
    fn padding_pairs_do_not_change_permutation() {
        let padded = GeneratorParams::default();
        let bare = GeneratorParams {
            pad_with_pairs: false,
            ..Default::default()
        };
        for seed in 0..50 {
            let a = generate(
                LadderConfig::new(6, true),
                &mut ChaCha20Rng::seed_from_u64(seed),
                &padded,
            )
            .unwrap();
            let b = generate(
                LadderConfig::new(6, true),
                &mut ChaCha20Rng::seed_from_u64(seed),
                &bare,
            )
            .unwrap();
            assert_eq!(compute_all_results(&a), compute_all_results(&b));
            assert!(a.rung_count() >= b.rung_count());
        }
    }

    #[test]
    fn adjacent_swaps_realize_correction() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        for n in 2..=8 {
            for _ in 0..50 {
                let correction = random_permutation(n, &mut rng);
                let swaps = adjacent_swaps(&correction);
                assert!(swaps.len() <= n * (n - 1) / 2);

                let rows: Vec<Vec<bool>> = swaps
                    .iter()
                    .map(|&s| (0..n - 1).map(|i| i == s).collect())
                    .collect();
                let realized: Vec<usize> = (0..n)
                    .map(|c| follow(rows.iter().map(Vec::as_slice), c))
                    .collect();
                assert_eq!(realized, correction);
            }
        }
    }

    #[test]
    fn adjacent_swaps_of_identity_is_empty() {
        assert!(adjacent_swaps(&[0, 1, 2, 3]).is_empty());
        assert_eq!(adjacent_swaps(&[1, 0]), vec![0]);
        assert_eq!(adjacent_swaps(&[3, 2, 1, 0]).len(), 6);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        for n in [0, 1] {
            for exclude_self in [false, true] {
                let err =
                    generate(LadderConfig::new(n, exclude_self), &mut rng, &defaults()).unwrap_err();
                assert!(matches!(err, LadderError::InvalidConfiguration { .. }));
            }
        }

        for rung_probability in [-0.1, 1.5, f64::NAN] {
            let params = GeneratorParams {
                rung_probability,
                ..Default::default()
            };
            assert!(generate(LadderConfig::new(4, false), &mut rng, &params).is_err());
            assert!(
                Generator::new(LadderConfig::new(4, false), rng.clone(), params).is_err()
            );
        }
    }

    #[test]
    fn reproducibility_same_seed_same_output() {
        for exclude_self in [false, true] {
            let config = LadderConfig::new(6, exclude_self);
            let a = generate(config, &mut ChaCha20Rng::seed_from_u64(0), &defaults()).unwrap();
            let b = generate(config, &mut ChaCha20Rng::seed_from_u64(0), &defaults()).unwrap();
            assert_eq!(a, b, "Same seed should produce identical boards");
        }
    }

    #[test]
    fn iterator_reproducibility() {
        let config = LadderConfig::new(5, true);
        let boards1: Vec<_> =
            Generator::new(config, ChaCha20Rng::seed_from_u64(0), defaults())
                .unwrap()
                .take(10)
                .collect();
        let boards2: Vec<_> =
            Generator::new(config, ChaCha20Rng::seed_from_u64(0), defaults())
                .unwrap()
                .take(10)
                .collect();

        assert_eq!(boards1, boards2, "Same seed should produce identical sequence");
        assert!(
            boards1.windows(2).any(|w| w[0] != w[1]),
            "regenerated boards should differ"
        );
    }
}
