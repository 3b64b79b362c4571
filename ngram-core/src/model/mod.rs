//! Word n-gram language model.
//!
//! This module provides:
//! - The count trie shared by every order (`CountTrie`)
//! - The frequency of frequencies table (`FrequencyTable`)
//! - Add-one and Good-Turing smoothing (`SmoothingEngine`)
//! - Training, probability and perplexity (`NGramModel`)
//! - Sentence generation (`SentenceGenerator`)

/// Model construction parameters (`ModelConfig`).
pub mod config;

/// Count of distinct n-grams per count value, fed to Good-Turing.
pub mod frequency;

/// Step-by-step sentence generation by weighted sampling.
pub mod generator;

/// Order-`n` model orchestrating training and queries.
///
/// Handles sentence padding, count bookkeeping, probability estimates
/// and perplexity scoring.
pub mod ngram_model;

/// Probability estimators and the one-time Good-Turing transform.
pub mod smoothing;

/// Variable-depth prefix tree of n-gram counts.
pub mod trie;
