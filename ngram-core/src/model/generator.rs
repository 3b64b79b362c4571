use log::warn;
use rand::Rng;

use super::ngram_model::{NGramModel, Window};

/// Progress of a sentence generation.
///
/// `Generating` is the initial state; `Done` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
	Generating,
	Done,
}

/// Generates one sentence from a trained model, one token per step.
///
/// # Behavior
/// - The context starts as `n-1` sentence-start markers
/// - Each step samples the next token from the context's continuations,
///   weighted by their raw counts, then slides the context
/// - Moves to `Done` after a terminator token, once the sentence reaches the
///   character cap (tokens plus one separator each), or when the context was
///   never continued during training
/// - A token that would push the sentence past the cap is dropped, so the
///   cap is never exceeded
#[derive(Debug)]
pub struct SentenceGenerator<'m> {
	model: &'m NGramModel,
	context: Window,
	tokens: Vec<String>,
	chars: usize,
	state: GenerationState,
}

impl<'m> SentenceGenerator<'m> {
	pub(crate) fn new(model: &'m NGramModel) -> Self {
		let config = model.config();
		Self {
			model,
			context: Window::new(config.order() - 1, config.start_marker()),
			tokens: Vec::new(),
			chars: 0,
			state: GenerationState::Generating,
		}
	}

	pub fn state(&self) -> GenerationState {
		self.state
	}

	pub fn is_done(&self) -> bool {
		self.state == GenerationState::Done
	}

	/// Tokens generated so far.
	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	/// Samples one token. Does nothing once `Done`.
	pub fn step<R: Rng>(&mut self, rng: &mut R) -> GenerationState {
		if self.is_done() {
			return self.state;
		}

		let token = match self.model.trie().sample_next(self.context.tokens(), rng) {
			Some(token) => token.to_owned(),
			None => {
				warn!("Context {:?} has no continuation, sentence cut short", self.context.tokens());
				self.state = GenerationState::Done;
				return self.state;
			}
		};

		let config = self.model.config();
		let chars = self.chars + token.chars().count() + 1;
		if chars > config.max_sentence_chars() {
			self.state = GenerationState::Done;
			return self.state;
		}

		self.context.push(&token);
		self.chars = chars;
		if config.is_terminator(&token) || self.chars >= config.max_sentence_chars() {
			self.state = GenerationState::Done;
		}
		self.tokens.push(token);
		self.state
	}

	pub fn into_tokens(self) -> Vec<String> {
		self.tokens
	}
}
