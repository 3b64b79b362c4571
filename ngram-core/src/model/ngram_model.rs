use std::collections::HashSet;

use log::info;
use rand::Rng;

use crate::error::{NgramError, Result};
use super::config::ModelConfig;
use super::frequency::FrequencyTable;
use super::generator::SentenceGenerator;
use super::smoothing::{self, GoodTuringCounts, Smoothing, SmoothingEngine, SmoothingState};
use super::trie::CountTrie;

/// Sliding window of the last tokens read, left-padded with the
/// sentence-start marker.
///
/// ```text
/// [:S :S w1] w2 w3
/// :S [:S w1 w2] w3
/// :S :S [w1 w2 w3]
/// ```
#[derive(Clone, Debug)]
pub(crate) struct Window {
	tokens: Vec<String>,
}

impl Window {
	pub(crate) fn new(size: usize, marker: &str) -> Self {
		Self { tokens: vec![marker.to_owned(); size] }
	}

	/// Shifts every token one slot to the left and appends `token`.
	pub(crate) fn push(&mut self, token: &str) {
		if self.tokens.is_empty() {
			return;
		}
		self.tokens.rotate_left(1);
		if let Some(last) = self.tokens.last_mut() {
			last.clear();
			last.push_str(token);
		}
	}

	pub(crate) fn tokens(&self) -> &[String] {
		&self.tokens
	}
}

/// Word n-gram language model of any order `n >= 1`.
///
/// One engine covers unigram, bigram and higher orders: every n-gram of the
/// training corpus is counted in a [`CountTrie`] of depth `n`.
///
/// # Responsibilities
/// - Count every n-gram of the training corpus (single pass)
/// - Keep the frequency of frequencies in step with the counts
/// - Answer unsmoothed, add-one and Good-Turing probabilities
/// - Score a test corpus by perplexity
/// - Generate sentences by weighted sampling
///
/// # Lifecycle
/// Constructed empty, trained once, optionally smoothed once, then queried
/// read-only any number of times.
#[derive(Debug)]
pub struct NGramModel {
	config: ModelConfig,
	trie: CountTrie,
	frequencies: FrequencyTable,
	/// Distinct tokens, the sentence-start marker included when `n > 1`
	vocabulary: HashSet<String>,
	/// Number of n-gram instances read (not distinct n-grams)
	training_instances: u64,
	trained: bool,
	smoothing: SmoothingEngine,
}

impl NGramModel {
	/// Creates an empty model of order `n` with the default configuration.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `n < 1`.
	pub fn new(n: usize) -> Result<Self> {
		Ok(Self::with_config(ModelConfig::new(n)?))
	}

	/// Empty unigram model.
	pub fn unigram() -> Self {
		Self::with_config(ModelConfig::unigram())
	}

	/// Empty bigram model.
	pub fn bigram() -> Self {
		Self::with_config(ModelConfig::bigram())
	}

	/// Empty model built from an already validated configuration.
	pub fn with_config(config: ModelConfig) -> Self {
		Self {
			trie: CountTrie::new(config.order()),
			config,
			frequencies: FrequencyTable::new(),
			vocabulary: HashSet::new(),
			training_instances: 0,
			trained: false,
			smoothing: SmoothingEngine::new(),
		}
	}

	pub fn config(&self) -> &ModelConfig {
		&self.config
	}

	pub fn order(&self) -> usize {
		self.config.order()
	}

	/// Raw counts.
	pub fn trie(&self) -> &CountTrie {
		&self.trie
	}

	/// Frequency of frequencies of the raw counts.
	pub fn frequencies(&self) -> &FrequencyTable {
		&self.frequencies
	}

	/// Number of distinct tokens, start marker included when `n > 1`.
	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary.len()
	}

	/// Number of n-gram instances read during training.
	pub fn training_instances(&self) -> u64 {
		self.training_instances
	}

	/// Number of distinct n-grams read during training.
	pub fn distinct_ngrams(&self) -> usize {
		self.trie.distinct_ngrams()
	}

	pub fn is_trained(&self) -> bool {
		self.trained
	}

	/// Whether the Good-Turing counts have been derived.
	pub fn smoothing_state(&self) -> SmoothingState {
		self.smoothing.state()
	}

	/// Counts every n-gram of `corpus`, one token sequence per sentence.
	///
	/// Each sentence starts from a window full of sentence-start markers, so
	/// its first token already has a complete context.
	///
	/// # Errors
	/// Returns `AlreadyTrained` on a second call.
	pub fn train<I, S>(&mut self, corpus: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: AsRef<[S]>,
		S: AsRef<str>,
	{
		if self.trained {
			return Err(NgramError::AlreadyTrained);
		}

		let n = self.order();
		if n > 1 {
			self.vocabulary.insert(self.config.start_marker().to_owned());
		}

		for sentence in corpus {
			let mut window = Window::new(n, self.config.start_marker());
			for token in sentence.as_ref() {
				let token = token.as_ref();
				if !self.vocabulary.contains(token) {
					self.vocabulary.insert(token.to_owned());
				}

				window.push(token);
				let count = self.trie.insert(window.tokens());
				self.frequencies.record(count - 1, count);
				self.training_instances += 1;
			}
		}
		self.trained = true;

		info!(
			"Done training: {} n-gram instances, {} distinct {}-grams, vocabulary of {}",
			self.training_instances,
			self.distinct_ngrams(),
			n,
			self.vocabulary_size()
		);
		Ok(())
	}

	fn check_trained(&self) -> Result<()> {
		if !self.trained {
			return Err(NgramError::NotTrained);
		}
		Ok(())
	}

	fn check_len(&self, expected: usize, got: usize) -> Result<()> {
		if expected != got {
			return Err(NgramError::OrderMismatch { expected, got });
		}
		Ok(())
	}

	/// Raw count of `ngram` (exactly `n` tokens), zero if never seen.
	pub fn count<S: AsRef<str>>(&self, ngram: &[S]) -> Result<u64> {
		self.check_len(self.order(), ngram.len())?;
		Ok(self.trie.count(ngram))
	}

	/// Total count of the n-grams continuing `context` (exactly `n-1`
	/// tokens), zero if never seen.
	pub fn context_total<S: AsRef<str>>(&self, context: &[S]) -> Result<u64> {
		self.check_len(self.order() - 1, context.len())?;
		Ok(self.trie.context_total(context))
	}

	/// Runs Good-Turing smoothing now instead of on first use.
	///
	/// # Errors
	/// - `NotTrained` before training
	/// - `AlreadySmoothed` if Good-Turing counts already exist; they are kept
	pub fn smooth(&self) -> Result<&GoodTuringCounts> {
		self.check_trained()?;
		self.smoothing.smooth(&self.trie, &self.frequencies, self.training_instances)
	}

	/// Returns the Good-Turing counts, deriving them on first use.
	pub fn good_turing(&self) -> Result<&GoodTuringCounts> {
		self.check_trained()?;
		Ok(self.smoothing.ensure(&self.trie, &self.frequencies, self.training_instances))
	}

	/// `P(word | context)` under `mode`.
	///
	/// `context` must hold exactly `n-1` tokens (none for a unigram model).
	/// Good-Turing probabilities are not normalised over the vocabulary:
	/// every unseen n-gram receives the same `N(1) / N` mass.
	pub fn probability<S: AsRef<str>>(&self, context: &[S], word: &str, mode: Smoothing) -> Result<f64> {
		self.check_len(self.order() - 1, context.len())?;
		let mut ngram: Vec<&str> = context.iter().map(AsRef::as_ref).collect();
		ngram.push(word);
		self.ngram_probability(&ngram, mode)
	}

	/// Probability of the last token of `ngram` (exactly `n` tokens) given
	/// the others.
	pub fn ngram_probability<S: AsRef<str>>(&self, ngram: &[S], mode: Smoothing) -> Result<f64> {
		self.check_trained()?;
		self.check_len(self.order(), ngram.len())?;
		Ok(match mode {
			Smoothing::Unsmoothed => {
				let count = self.trie.count(ngram);
				if count > 0 {
					count as f64 / self.trie.context_total(ngram) as f64
				} else {
					0.0
				}
			}
			Smoothing::AddOne => smoothing::add_one(
				self.trie.count(ngram),
				self.trie.context_total(ngram),
				self.vocabulary_size(),
			),
			Smoothing::GoodTuring => self.good_turing()?.probability(ngram),
		})
	}

	/// Perplexity of `test_corpus` under `mode`: `exp(sum(-ln P) / N)` over
	/// its `N` n-gram instances, padded the same way as training.
	///
	/// A single zero probability makes the perplexity `f64::INFINITY`.
	///
	/// # Errors
	/// - `NotTrained` before training
	/// - `EmptyTestCorpus` if the test corpus holds no token
	pub fn perplexity<I, S>(&self, test_corpus: I, mode: Smoothing) -> Result<f64>
	where
		I: IntoIterator,
		I::Item: AsRef<[S]>,
		S: AsRef<str>,
	{
		self.check_trained()?;

		let mut instances: u64 = 0;
		let mut log_sum = 0.0;
		let mut zero = false;
		for sentence in test_corpus {
			let mut window = Window::new(self.order(), self.config.start_marker());
			for token in sentence.as_ref() {
				window.push(token.as_ref());
				let p = self.ngram_probability(window.tokens(), mode)?;
				if p > 0.0 {
					log_sum -= p.ln();
				} else {
					zero = true;
				}
				instances += 1;
			}
		}

		if instances == 0 {
			return Err(NgramError::EmptyTestCorpus);
		}
		if zero {
			return Ok(f64::INFINITY);
		}
		Ok((log_sum / instances as f64).exp())
	}

	/// Starts a sentence generation from the all-marker context.
	pub fn generator(&self) -> Result<SentenceGenerator<'_>> {
		self.check_trained()?;
		Ok(SentenceGenerator::new(self))
	}

	/// Generates one sentence by repeated weighted sampling.
	///
	/// Stops after a terminator token, at the length cap, or when the
	/// current context has never been continued in training.
	pub fn generate_sentence<R: Rng>(&self, rng: &mut R) -> Result<Vec<String>> {
		let mut generator = self.generator()?;
		while !generator.is_done() {
			generator.step(rng);
		}
		Ok(generator.into_tokens())
	}

	/// Same as [`generate_sentence`](Self::generate_sentence), tokens joined
	/// by single spaces.
	pub fn generate_text<R: Rng>(&self, rng: &mut R) -> Result<String> {
		Ok(self.generate_sentence(rng)?.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn window_slides_left() {
		let mut window = Window::new(3, ":S");
		window.push("a");
		assert_eq!(window.tokens(), [":S", ":S", "a"]);
		window.push("b");
		window.push("c");
		window.push("d");
		assert_eq!(window.tokens(), ["b", "c", "d"]);
	}

	#[test]
	fn empty_window_ignores_pushes() {
		let mut window = Window::new(0, ":S");
		window.push("a");
		assert!(window.tokens().is_empty());
	}

	#[test]
	fn queries_before_training_fail() {
		let model = NGramModel::bigram();
		assert!(matches!(
			model.probability(&["the"], "cat", Smoothing::Unsmoothed),
			Err(NgramError::NotTrained)
		));
		assert!(matches!(model.smooth(), Err(NgramError::NotTrained)));
	}

	#[test]
	fn context_length_is_checked() {
		let mut model = NGramModel::new(3).unwrap();
		model.train([["a", "b", "c"]]).unwrap();
		assert!(matches!(
			model.probability(&["a"], "b", Smoothing::Unsmoothed),
			Err(NgramError::OrderMismatch { expected: 2, got: 1 })
		));
		assert!(matches!(model.count(&["a", "b"]), Err(NgramError::OrderMismatch { .. })));
	}
}
