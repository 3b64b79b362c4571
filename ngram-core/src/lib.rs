//! Word n-gram language modelling library.
//!
//! This crate provides a generalized n-gram engine including:
//! - Counting of every n-gram of a tokenized corpus in a prefix trie
//! - Unsmoothed, add-one and Good-Turing probability estimates
//! - Perplexity scoring of a held-out corpus
//! - Sentence generation by weighted sampling
//! - Regex tokenization and corpus loading
//!
//! ```no_run
//! use ngram_core::corpus;
//! use ngram_core::model::ngram_model::NGramModel;
//! use ngram_core::model::smoothing::Smoothing;
//! use ngram_core::tokenizer::Tokenizer;
//!
//! # fn main() -> ngram_core::Result<()> {
//! let tokenizer = Tokenizer::new()?;
//! let train = corpus::load_tokenized("data/train.xml", &tokenizer)?;
//! let test = corpus::load_tokenized("data/test.xml", &tokenizer)?;
//!
//! let mut model = NGramModel::new(3)?;
//! model.train(&train)?;
//! println!("{}", model.perplexity(&test, Smoothing::GoodTuring)?);
//! println!("{}", model.generate_text(&mut rand::rng())?);
//! # Ok(())
//! # }
//! ```

/// Core n-gram model, smoothing and generation.
pub mod model;

/// Word and punctuation tokenizer.
pub mod tokenizer;

/// Corpus loading (plain text or `<DOC>`/`<TEXT>` documents).
pub mod corpus;

/// File and path helpers.
///
/// Not exposed
pub(crate) mod io;

mod error;

pub use error::{NgramError, Result};
