use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by model construction, training, queries and corpus loading.
///
/// Unseen n-grams and contexts are not errors: lookups return a zero count.
#[derive(Error, Debug)]
pub enum NgramError {
	#[error("Invalid order: {0} (must be >= 1)")]
	InvalidOrder(usize),

	#[error("Context length mismatch: expected {expected} tokens, got {got}")]
	OrderMismatch { expected: usize, got: usize },

	#[error("Model has not been trained")]
	NotTrained,

	#[error("Model has already been trained")]
	AlreadyTrained,

	#[error("Good-Turing counts are already available")]
	AlreadySmoothed,

	#[error("Test corpus contains no n-gram")]
	EmptyTestCorpus,

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("Invalid token pattern: {0}")]
	InvalidPattern(#[from] regex::Error),

	#[error("Corpus contains no sentence: {}", .0.display())]
	EmptyCorpus(PathBuf),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NgramError>;
