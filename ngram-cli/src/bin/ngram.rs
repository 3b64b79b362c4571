use std::path::PathBuf;

use clap::Parser;

/// N-gram language model of any order: train, score a test set, generate.
#[derive(Parser)]
#[command(name = "ngram")]
struct Cli {
	/// Training corpus (plain text or <DOC>/<TEXT> documents)
	train: PathBuf,

	/// Test corpus
	test: PathBuf,

	/// Order of the model (n >= 1)
	#[arg(value_parser = clap::value_parser!(u16).range(1..))]
	n: u16,

	/// Number of sentences to generate
	#[arg(default_value = "0")]
	sentences: usize,
}

fn main() -> anyhow::Result<()> {
	ngram_cli::init_logging();
	let cli = Cli::parse();
	ngram_cli::run(&cli.train, &cli.test, usize::from(cli.n), cli.sentences)
}
