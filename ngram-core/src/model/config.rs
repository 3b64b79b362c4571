use std::collections::HashSet;

use crate::error::{NgramError, Result};

/// Reserved token padding the left context of every sentence.
pub const START_MARKER: &str = ":S";

/// Character cap on a generated sentence when no terminator is sampled.
pub const MAX_SENTENCE_CHARS: usize = 400;

/// Construction parameters of an [`NGramModel`](super::ngram_model::NGramModel).
///
/// # Invariants
/// - `order >= 1`
/// - `start_marker` is not empty
/// - `max_sentence_chars >= 1`
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
	order: usize,
	start_marker: String,
	terminators: HashSet<String>,
	max_sentence_chars: usize,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			order: 2,
			start_marker: START_MARKER.to_owned(),
			terminators: HashSet::from([".".to_owned()]),
			max_sentence_chars: MAX_SENTENCE_CHARS,
		}
	}
}

impl ModelConfig {
	/// Default configuration for n-grams of `order` tokens.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		let mut config = Self::default();
		config.set_order(order)?;
		Ok(config)
	}

	/// Default configuration of order 1.
	pub fn unigram() -> Self {
		Self { order: 1, ..Self::default() }
	}

	/// Default configuration, order 2.
	pub fn bigram() -> Self {
		Self::default()
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn start_marker(&self) -> &str {
		&self.start_marker
	}

	pub fn max_sentence_chars(&self) -> usize {
		self.max_sentence_chars
	}

	/// Returns `true` if generation stops after `token`.
	pub fn is_terminator(&self, token: &str) -> bool {
		self.terminators.contains(token)
	}

	/// # Errors
	/// Returns `InvalidOrder` if `order < 1`.
	pub fn set_order(&mut self, order: usize) -> Result<()> {
		if order < 1 {
			return Err(NgramError::InvalidOrder(order));
		}
		self.order = order;
		Ok(())
	}

	/// Sets the token padding every context before the first word.
	///
	/// # Errors
	/// Returns `InvalidConfig` if `marker` is empty.
	pub fn set_start_marker(&mut self, marker: &str) -> Result<()> {
		if marker.is_empty() {
			return Err(NgramError::InvalidConfig("start marker cannot be empty".to_owned()));
		}
		self.start_marker = marker.to_owned();
		Ok(())
	}

	/// Replaces the set of sentence-terminating tokens. An empty set is
	/// allowed: generation then always runs to the length cap.
	pub fn set_terminators<I, S>(&mut self, terminators: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.terminators = terminators.into_iter().map(Into::into).collect();
	}

	/// Sets the hard cap on a generated sentence, counted as token
	/// characters plus one separator per token.
	pub fn set_max_sentence_chars(&mut self, max: usize) -> Result<()> {
		if max == 0 {
			return Err(NgramError::InvalidConfig("sentence length cap must be >= 1".to_owned()));
		}
		self.max_sentence_chars = max;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn order_zero_is_rejected() {
		assert!(matches!(ModelConfig::new(0), Err(NgramError::InvalidOrder(0))));
		assert_eq!(ModelConfig::new(3).unwrap().order(), 3);
	}

	#[test]
	fn setters_validate_their_input() {
		let mut config = ModelConfig::default();
		assert!(config.set_start_marker("").is_err());
		assert!(config.set_max_sentence_chars(0).is_err());
		config.set_terminators(["!", "?"]);
		assert!(config.is_terminator("!"));
		assert!(!config.is_terminator("."));
	}
}
