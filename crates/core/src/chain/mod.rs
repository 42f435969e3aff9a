use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{AuraError, Result};

/// Tolerance applied when checking that a transition row sums to 1.0.
const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Validated row-stochastic transition matrix over a finite mood set.
///
/// Rows are re-expressed as weight vectors aligned with a sorted mood list so
/// that seeded sampling does not depend on `HashMap` iteration order.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    /// Sorted mood names; index positions match every row's weight vector.
    moods: Vec<String>,
    rows: HashMap<String, Vec<f64>>,
}

impl TransitionTable {
    /// Validates raw probability rows and builds the table.
    ///
    /// # Errors
    /// Returns [`AuraError::Config`] when the table is empty, a row's key set
    /// differs from the outer key set, a probability is negative, or a row
    /// does not sum to 1.0 within tolerance.
    pub fn new(raw: HashMap<String, HashMap<String, f64>>) -> Result<Self> {
        if raw.is_empty() {
            return Err(AuraError::config("transition table has no rows"));
        }

        let mut moods: Vec<String> = raw.keys().cloned().collect();
        moods.sort();

        let mut rows = HashMap::with_capacity(raw.len());
        for (mood, row) in &raw {
            if row.len() != moods.len() {
                return Err(AuraError::config(format!(
                    "row `{mood}` lists {} targets, expected {}",
                    row.len(),
                    moods.len()
                )));
            }

            let mut weights = Vec::with_capacity(moods.len());
            let mut sum = 0.0;
            for target in &moods {
                let probability = *row.get(target).ok_or_else(|| {
                    AuraError::config(format!(
                        "row `{mood}` is missing a probability for `{target}`"
                    ))
                })?;
                if probability < 0.0 {
                    return Err(AuraError::config(format!(
                        "row `{mood}` has a negative probability for `{target}`"
                    )));
                }
                sum += probability;
                weights.push(probability);
            }

            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(AuraError::config(format!(
                    "row `{mood}` sums to {sum}, expected 1.0"
                )));
            }

            rows.insert(mood.clone(), weights);
        }

        Ok(Self { moods, rows })
    }

    /// Returns the sorted mood names the table is defined over.
    pub fn moods(&self) -> &[String] {
        &self.moods
    }

    /// Returns whether `mood` has a transition row.
    pub fn contains(&self, mood: &str) -> bool {
        self.rows.contains_key(mood)
    }

    fn weights(&self, mood: &str) -> Result<&[f64]> {
        self.rows
            .get(mood)
            .map(Vec::as_slice)
            .ok_or_else(|| AuraError::InvalidLabel(mood.to_string()))
    }
}

/// Weighted random walk over a [`TransitionTable`].
///
/// The sampler owns its RNG; [`ChainSampler::with_seed`] produces
/// reproducible sequences for tests and repeatable renders.
#[derive(Debug)]
pub struct ChainSampler {
    table: TransitionTable,
    rng: StdRng,
}

impl ChainSampler {
    /// Creates a sampler seeded from the operating system.
    pub fn new(table: TransitionTable) -> Self {
        Self {
            table,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a deterministic sampler from an explicit seed.
    pub fn with_seed(table: TransitionTable, seed: u64) -> Self {
        Self {
            table,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the transition table driving the walk.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Draws the next mood from `current`'s transition row.
    ///
    /// Selection walks the cumulative weights against a single uniform draw,
    /// so a probability of 1.0 is picked on every trial and a probability of
    /// 0.0 never is.
    ///
    /// # Errors
    /// Returns [`AuraError::InvalidLabel`] when `current` has no row.
    pub fn next(&mut self, current: &str) -> Result<String> {
        let weights = self.table.weights(current)?;
        let mut draw = self.rng.random::<f64>();

        let mut fallback: Option<&String> = None;
        for (mood, &weight) in self.table.moods.iter().zip(weights) {
            if weight <= 0.0 {
                continue;
            }
            if draw < weight {
                return Ok(mood.clone());
            }
            draw -= weight;
            fallback = Some(mood);
        }

        // Floating point residue can push the draw marginally past the last
        // bucket; it belongs to the last positive-weight mood.
        fallback.cloned().ok_or_else(|| {
            AuraError::config(format!("row `{current}` has no positive weight"))
        })
    }

    /// Generates a mood sequence of exactly `count` elements.
    ///
    /// The first element is `start` unchanged; every later element is sampled
    /// from its predecessor.
    ///
    /// # Errors
    /// Returns [`AuraError::Config`] when `count` is zero and
    /// [`AuraError::InvalidLabel`] when `start` has no row.
    pub fn generate(&mut self, start: &str, count: usize) -> Result<Vec<String>> {
        if count == 0 {
            return Err(AuraError::config("count must be at least 1"));
        }
        if !self.table.contains(start) {
            return Err(AuraError::InvalidLabel(start.to_string()));
        }

        let mut current = start.to_string();
        let mut sequence = Vec::with_capacity(count);
        sequence.push(current.clone());
        while sequence.len() < count {
            current = self.next(&current)?;
            sequence.push(current.clone());
        }

        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table(rows: &[(&str, &[(&str, f64)])]) -> HashMap<String, HashMap<String, f64>> {
        rows.iter()
            .map(|(mood, row)| {
                let row = row
                    .iter()
                    .map(|(target, p)| (target.to_string(), *p))
                    .collect();
                (mood.to_string(), row)
            })
            .collect()
    }

    fn flip_flop() -> TransitionTable {
        TransitionTable::new(raw_table(&[
            ("a", &[("a", 0.0), ("b", 1.0)]),
            ("b", &[("a", 1.0), ("b", 0.0)]),
        ]))
        .unwrap()
    }

    #[test]
    fn accepts_well_formed_rows() {
        let table = flip_flop();
        assert_eq!(table.moods(), ["a", "b"]);
        assert!(table.contains("a"));
        assert!(!table.contains("c"));
    }

    #[test]
    fn rejects_row_not_summing_to_one() {
        let err = TransitionTable::new(raw_table(&[
            ("a", &[("a", 0.25), ("b", 0.25)]),
            ("b", &[("a", 0.5), ("b", 0.5)]),
        ]))
        .unwrap_err();
        assert!(matches!(err, AuraError::Config(_)));
    }

    #[test]
    fn rejects_negative_probability() {
        let err = TransitionTable::new(raw_table(&[
            ("a", &[("a", -0.5), ("b", 1.5)]),
            ("b", &[("a", 0.5), ("b", 0.5)]),
        ]))
        .unwrap_err();
        assert!(matches!(err, AuraError::Config(_)));
    }

    #[test]
    fn rejects_inconsistent_row_keys() {
        let err = TransitionTable::new(raw_table(&[
            ("a", &[("a", 0.5), ("c", 0.5)]),
            ("b", &[("a", 0.5), ("b", 0.5)]),
        ]))
        .unwrap_err();
        assert!(matches!(err, AuraError::Config(_)));
    }

    #[test]
    fn rejects_empty_table() {
        let err = TransitionTable::new(HashMap::new()).unwrap_err();
        assert!(matches!(err, AuraError::Config(_)));
    }

    #[test]
    fn degenerate_rows_sample_deterministically() {
        let mut sampler = ChainSampler::new(flip_flop());
        for _ in 0..100 {
            assert_eq!(sampler.next("a").unwrap(), "b");
            assert_eq!(sampler.next("b").unwrap(), "a");
        }
    }

    #[test]
    fn generates_exact_length_starting_with_start() {
        let mut sampler = ChainSampler::with_seed(flip_flop(), 7);
        let sequence = sampler.generate("b", 12).unwrap();
        assert_eq!(sequence.len(), 12);
        assert_eq!(sequence[0], "b");
    }

    #[test]
    fn count_of_one_skips_sampling() {
        let mut sampler = ChainSampler::new(flip_flop());
        let sequence = sampler.generate("a", 1).unwrap();
        assert_eq!(sequence, ["a"]);
    }

    #[test]
    fn zero_count_is_a_config_error() {
        let mut sampler = ChainSampler::new(flip_flop());
        let err = sampler.generate("a", 0).unwrap_err();
        assert!(matches!(err, AuraError::Config(_)));
    }

    #[test]
    fn unknown_moods_are_rejected() {
        let mut sampler = ChainSampler::new(flip_flop());
        assert!(matches!(
            sampler.next("violet").unwrap_err(),
            AuraError::InvalidLabel(mood) if mood == "violet"
        ));
        assert!(matches!(
            sampler.generate("violet", 5).unwrap_err(),
            AuraError::InvalidLabel(_)
        ));
    }

    #[test]
    fn seeded_samplers_are_reproducible() {
        let table = TransitionTable::new(raw_table(&[
            ("a", &[("a", 0.5), ("b", 0.5)]),
            ("b", &[("a", 0.5), ("b", 0.5)]),
        ]))
        .unwrap();

        let mut first = ChainSampler::with_seed(table.clone(), 42);
        let mut second = ChainSampler::with_seed(table, 42);
        assert_eq!(
            first.generate("a", 64).unwrap(),
            second.generate("a", 64).unwrap()
        );
    }
}
