use rand::SeedableRng;
use rand::rngs::StdRng;

use ngram_core::NgramError;
use ngram_core::model::config::ModelConfig;
use ngram_core::model::generator::GenerationState;
use ngram_core::model::ngram_model::NGramModel;

fn sentences() -> Vec<Vec<&'static str>> {
	vec![
		vec!["the", "cat", "sat", "."],
		vec!["the", "dog", "sat", "."],
		vec!["a", "dog", "ran", "."],
	]
}

#[test]
fn test_sentence_ends_with_terminator() {
	let mut model = NGramModel::new(2).unwrap();
	model.train(&sentences()).unwrap();

	let mut rng = StdRng::seed_from_u64(1);
	for _ in 0..50 {
		let sentence = model.generate_sentence(&mut rng).unwrap();
		assert_eq!(sentence.last().map(String::as_str), Some("."));
		assert!(matches!(sentence[0].as_str(), "the" | "a"));
	}
}

#[test]
fn test_generation_is_reproducible() {
	let mut model = NGramModel::new(3).unwrap();
	model.train(&sentences()).unwrap();

	let first = model.generate_text(&mut StdRng::seed_from_u64(9)).unwrap();
	let second = model.generate_text(&mut StdRng::seed_from_u64(9)).unwrap();
	assert_eq!(first, second);
}

#[test]
fn test_generation_stops_at_length_cap_without_terminator() {
	let mut config = ModelConfig::new(2).unwrap();
	config.set_terminators(Vec::<String>::new());
	config.set_max_sentence_chars(40).unwrap();

	// "b" always follows "a" and the other way round: no natural end
	let mut model = NGramModel::with_config(config);
	model.train([["a", "b", "a", "b"]]).unwrap();

	let sentence = model.generate_sentence(&mut StdRng::seed_from_u64(3)).unwrap();
	let chars: usize = sentence.iter().map(|token| token.len() + 1).sum();
	assert_eq!(chars, 40);
}

#[test]
fn test_long_token_never_exceeds_length_cap() {
	let mut config = ModelConfig::new(2).unwrap();
	config.set_terminators(Vec::<String>::new());
	config.set_max_sentence_chars(40).unwrap();

	// alpha (6) and beta (5) alternate: 6 + 5 + 6 + 5 + 6 + 5 + 6 = 39, one
	// more beta would make 44
	let mut model = NGramModel::with_config(config);
	model.train([["alpha", "beta", "alpha", "beta"]]).unwrap();

	let sentence = model.generate_sentence(&mut StdRng::seed_from_u64(3)).unwrap();
	let chars: usize = sentence.iter().map(|token| token.len() + 1).sum();
	assert_eq!(chars, 39);
	assert_eq!(sentence.len(), 7);
	assert_eq!(sentence.last().map(String::as_str), Some("alpha"));
	assert!(model.generate_text(&mut StdRng::seed_from_u64(4)).unwrap().len() < 40);
}

#[test]
fn test_token_longer_than_cap_ends_generation() {
	let mut config = ModelConfig::new(2).unwrap();
	config.set_max_sentence_chars(5).unwrap();

	let mut model = NGramModel::with_config(config);
	model.train([["elephant", "."]]).unwrap();

	let mut generator = model.generator().unwrap();
	assert_eq!(generator.step(&mut StdRng::seed_from_u64(0)), GenerationState::Done);
	assert!(generator.tokens().is_empty());
}

#[test]
fn test_unigram_generation() {
	let mut model = NGramModel::unigram();
	model.train(&sentences()).unwrap();

	let sentence = model.generate_sentence(&mut StdRng::seed_from_u64(5)).unwrap();
	assert!(!sentence.is_empty());
	let chars: usize = sentence.iter().map(|token| token.len() + 1).sum();
	assert!(chars <= model.config().max_sentence_chars());
}

#[test]
fn test_dead_end_context_finishes_generation() {
	let mut model = NGramModel::bigram();
	// Nothing ever follows "end"
	model.train([["start", "end"]]).unwrap();

	let mut generator = model.generator().unwrap();
	let mut rng = StdRng::seed_from_u64(0);
	assert_eq!(generator.state(), GenerationState::Generating);
	assert_eq!(generator.step(&mut rng), GenerationState::Generating);
	assert_eq!(generator.step(&mut rng), GenerationState::Generating);
	assert_eq!(generator.step(&mut rng), GenerationState::Done);
	assert_eq!(generator.step(&mut rng), GenerationState::Done);
	assert_eq!(generator.tokens(), ["start", "end"]);
}

#[test]
fn test_generation_requires_training() {
	let model = NGramModel::bigram();
	let mut rng = StdRng::seed_from_u64(0);
	assert!(matches!(model.generate_sentence(&mut rng), Err(NgramError::NotTrained)));
}
