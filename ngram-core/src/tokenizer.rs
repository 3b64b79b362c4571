use regex::Regex;

use crate::error::Result;

/// A word with an optional leading apostrophe, or one punctuation mark.
pub const DEFAULT_PATTERN: &str = r"'?\w+|[[:punct:]]";

/// Splits a sentence into word and punctuation tokens.
///
/// Tokens are the successive non-overlapping matches of the pattern;
/// everything between matches (whitespace) is dropped. Case is preserved,
/// lower-casing is up to the corpus loader.
#[derive(Clone, Debug)]
pub struct Tokenizer {
	pattern: Regex,
}

impl Tokenizer {
	/// Tokenizer using [`DEFAULT_PATTERN`].
	pub fn new() -> Result<Self> {
		Self::with_pattern(DEFAULT_PATTERN)
	}

	/// # Errors
	/// Returns `InvalidPattern` if `pattern` does not compile.
	pub fn with_pattern(pattern: &str) -> Result<Self> {
		Ok(Self { pattern: Regex::new(pattern)? })
	}

	pub fn tokenize(&self, sentence: &str) -> Vec<String> {
		self.pattern
			.find_iter(sentence)
			.map(|m| m.as_str().to_owned())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_words_and_punctuation() {
		let tokenizer = Tokenizer::new().unwrap();
		assert_eq!(
			tokenizer.tokenize("the cat, it sat."),
			["the", "cat", ",", "it", "sat", "."]
		);
	}

	#[test]
	fn keeps_leading_apostrophe() {
		let tokenizer = Tokenizer::new().unwrap();
		assert_eq!(tokenizer.tokenize("it's the dog's"), ["it", "'s", "the", "dog", "'s"]);
		assert_eq!(tokenizer.tokenize("' alone"), ["'", "alone"]);
	}

	#[test]
	fn invalid_pattern_is_an_error() {
		assert!(Tokenizer::with_pattern("(").is_err());
	}
}
