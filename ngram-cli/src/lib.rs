//! Shared driver of the `unigram`, `bigram` and `ngram` binaries.
//!
//! Trains a model on one corpus file, reports the perplexity of another
//! and optionally prints generated sentences.

use std::path::Path;

use log::info;

use ngram_core::corpus;
use ngram_core::model::ngram_model::NGramModel;
use ngram_core::model::smoothing::Smoothing;
use ngram_core::tokenizer::Tokenizer;

/// Initializes logging from `RUST_LOG`, `info` by default.
pub fn init_logging() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Trains an order-`n` model on `train`, prints the perplexity of `test`
/// for every smoothing mode, then `sentences` generated sentences.
pub fn run(train: &Path, test: &Path, n: usize, sentences: usize) -> anyhow::Result<()> {
	let tokenizer = Tokenizer::new()?;

	info!("Loading training corpus {}", train.display());
	let training = corpus::load_tokenized(train, &tokenizer)?;

	let mut model = NGramModel::new(n)?;
	model.train(&training)?;
	println!("Done training.");

	info!("Loading test corpus {}", test.display());
	let testing = corpus::load_tokenized(test, &tokenizer)?;

	for mode in [Smoothing::Unsmoothed, Smoothing::AddOne, Smoothing::GoodTuring] {
		let perplexity = model.perplexity(&testing, mode)?;
		println!("Perplexity of the test set ({mode}): {perplexity}");
	}

	let mut rng = rand::rng();
	for _ in 0..sentences {
		println!("{}", model.generate_text(&mut rng)?);
	}

	Ok(())
}
