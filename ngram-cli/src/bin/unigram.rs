use std::path::PathBuf;

use clap::Parser;

/// Unigram language model: train, score a test set, generate.
#[derive(Parser)]
#[command(name = "unigram")]
struct Cli {
	/// Training corpus (plain text or <DOC>/<TEXT> documents)
	train: PathBuf,

	/// Test corpus
	test: PathBuf,

	/// Number of sentences to generate
	#[arg(default_value = "0")]
	sentences: usize,
}

fn main() -> anyhow::Result<()> {
	ngram_cli::init_logging();
	let cli = Cli::parse();
	ngram_cli::run(&cli.train, &cli.test, 1, cli.sentences)
}
