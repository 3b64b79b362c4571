use std::fmt;
use std::sync::OnceLock;

use log::debug;

use crate::error::{NgramError, Result};
use super::frequency::FrequencyTable;
use super::trie::CountTrie;

/// How a probability is estimated from the counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Smoothing {
	/// Relative frequency, zero for unseen n-grams.
	Unsmoothed,
	/// Laplace: one extra occurrence for every vocabulary token.
	AddOne,
	/// Good-Turing adjusted counts, `N(1) / N` for unseen n-grams.
	GoodTuring,
}

impl fmt::Display for Smoothing {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unsmoothed => write!(f, "unsmoothed"),
			Self::AddOne => write!(f, "add-one"),
			Self::GoodTuring => write!(f, "good-turing"),
		}
	}
}

/// `(count + 1) / (context_total + vocabulary_size)`
pub fn add_one(count: u64, context_total: u64, vocabulary_size: usize) -> f64 {
	(count as f64 + 1.0) / (context_total as f64 + vocabulary_size as f64)
}

/// Good-Turing counts derived once from a trained trie.
///
/// Raw counts are left untouched: this is a separate trie of the same shape
/// whose leaves hold `c*` and whose context totals are the sums of `c*`.
#[derive(Clone, Debug)]
pub struct GoodTuringCounts {
	trie: CountTrie<f64>,
	unseen: f64,
}

impl GoodTuringCounts {
	/// Rewrites every leaf count `c` as `(c+1) * N(c+1) / N(c)`.
	///
	/// `training_instances` is the number of n-gram instances (not distinct
	/// n-grams) read during training; it is the denominator of the unseen
	/// mass `N(1) / N`.
	pub fn compute(raw: &CountTrie, frequencies: &FrequencyTable, training_instances: u64) -> Self {
		let trie = raw.derive(|count| frequencies.adjusted_count(count));
		let unseen = if training_instances == 0 {
			0.0
		} else {
			frequencies.get(1) as f64 / training_instances as f64
		};
		Self { trie, unseen }
	}

	/// Trie of adjusted counts, same shape as the raw trie.
	pub fn trie(&self) -> &CountTrie<f64> {
		&self.trie
	}

	/// Probability given to any n-gram with no adjusted count.
	pub fn unseen_probability(&self) -> f64 {
		self.unseen
	}

	/// `c* / sum(c*)` over the context, or the unseen mass.
	pub fn probability<T: AsRef<str>>(&self, ngram: &[T]) -> f64 {
		let count = self.trie.count(ngram);
		if count > 0.0 {
			return count / self.trie.context_total(ngram);
		}
		self.unseen
	}
}

/// Whether the Good-Turing pass has run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmoothingState {
	NotSmoothed,
	Smoothed,
}

/// Owns the one-time Good-Turing transform of a model.
///
/// The transform is not idempotent, so it is computed at most once; readers
/// never see a partial result.
#[derive(Debug, Default)]
pub struct SmoothingEngine {
	good_turing: OnceLock<GoodTuringCounts>,
}

impl SmoothingEngine {
	/// Creates an engine with no derived counts.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `Smoothed` once the Good-Turing counts exist.
	pub fn state(&self) -> SmoothingState {
		match self.good_turing.get() {
			Some(_) => SmoothingState::Smoothed,
			None => SmoothingState::NotSmoothed,
		}
	}

	/// Returns the derived counts without computing them.
	pub fn good_turing(&self) -> Option<&GoodTuringCounts> {
		self.good_turing.get()
	}

	/// Runs the transform.
	///
	/// # Errors
	/// Returns `AlreadySmoothed` if the counts were already derived; the
	/// existing counts are kept.
	pub fn smooth(&self, raw: &CountTrie, frequencies: &FrequencyTable, training_instances: u64) -> Result<&GoodTuringCounts> {
		if self.good_turing.get().is_some() {
			return Err(NgramError::AlreadySmoothed);
		}
		Ok(self.ensure(raw, frequencies, training_instances))
	}

	/// Returns the Good-Turing counts, deriving them on first use.
	pub fn ensure(&self, raw: &CountTrie, frequencies: &FrequencyTable, training_instances: u64) -> &GoodTuringCounts {
		self.good_turing.get_or_init(|| {
			debug!("Making Good-Turing counts for {} distinct n-grams", raw.distinct_ngrams());
			let counts = GoodTuringCounts::compute(raw, frequencies, training_instances);
			debug!("Done making Good-Turing counts (unseen mass {})", counts.unseen_probability());
			counts
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn trained() -> (CountTrie, FrequencyTable, u64) {
		let mut trie: CountTrie = CountTrie::new(2);
		let mut table = FrequencyTable::new();
		let mut instances = 0;
		for ngram in [["a", "b"], ["a", "b"], ["a", "c"], ["b", "c"], ["c", "a"]] {
			let count = trie.insert(&ngram);
			table.record(count - 1, count);
			instances += 1;
		}
		(trie, table, instances)
	}

	#[test]
	fn adjusted_counts_follow_frequency_table() {
		let (trie, table, instances) = trained();
		let counts = GoodTuringCounts::compute(&trie, &table, instances);
		// N(1) = 3, N(2) = 1
		assert_eq!(counts.trie().count(&["a", "c"]), 2.0 / 3.0);
		// N(3) is empty
		assert_eq!(counts.trie().count(&["a", "b"]), 0.0);
		assert_eq!(counts.trie().context_total(&["a", "?"]), 2.0 / 3.0);
		assert_eq!(counts.unseen_probability(), 3.0 / 5.0);
	}

	#[test]
	fn zeroed_counts_fall_back_to_unseen_mass() {
		let (trie, table, instances) = trained();
		let counts = GoodTuringCounts::compute(&trie, &table, instances);
		assert_eq!(counts.probability(&["a", "b"]), 3.0 / 5.0);
		assert_eq!(counts.probability(&["a", "c"]), 1.0);
		assert_eq!(counts.probability(&["z", "z"]), 3.0 / 5.0);
	}

	#[test]
	fn second_smoothing_is_rejected() {
		let (trie, table, instances) = trained();
		let engine = SmoothingEngine::new();
		assert_eq!(engine.state(), SmoothingState::NotSmoothed);
		engine.smooth(&trie, &table, instances).unwrap();
		assert_eq!(engine.state(), SmoothingState::Smoothed);
		assert!(matches!(engine.smooth(&trie, &table, instances), Err(NgramError::AlreadySmoothed)));
		assert_eq!(engine.good_turing().unwrap().trie().count(&["a", "c"]), 2.0 / 3.0);
	}

	#[test]
	fn add_one_counts_every_vocabulary_token() {
		assert_eq!(add_one(0, 0, 4), 0.25);
		assert_eq!(add_one(1, 2, 4), 2.0 / 6.0);
	}
}
