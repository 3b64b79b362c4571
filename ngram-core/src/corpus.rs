use std::collections::HashSet;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::error::{NgramError, Result};
use crate::io::read_text;
use crate::tokenizer::Tokenizer;

lazy_static! {
	static ref DOC_RE: Regex = Regex::new(r"(?s)<DOC\b[^>]*>(.*?)</DOC>").unwrap();
	static ref TEXT_RE: Regex = Regex::new(r"(?s)<TEXT\b[^>]*>(.*?)</TEXT>").unwrap();
	static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
	// A period followed by whitespace ends a sentence
	static ref BOUNDARY_RE: Regex = Regex::new(r"\.\s").unwrap();
}

/// Extracts the paragraphs of `<DOC>` documents: the text content of the
/// first `<TEXT>` element of every document, inner tags removed.
///
/// Returns `None` if `text` holds no `<DOC>` element.
pub fn document_paragraphs(text: &str) -> Option<Vec<String>> {
	let mut paragraphs = Vec::new();
	let mut documents = 0;
	for document in DOC_RE.captures_iter(text) {
		documents += 1;
		if let Some(content) = TEXT_RE.captures(&document[1]) {
			let stripped = TAG_RE.replace_all(&content[1], " ");
			paragraphs.push(unescape(&stripped));
		}
	}

	if documents == 0 {
		return None;
	}
	Some(paragraphs)
}

fn unescape(text: &str) -> String {
	text.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&apos;", "'")
		.replace("&amp;", "&")
}

/// Lower-cases a paragraph and cuts it into sentences after every period
/// followed by whitespace. Each sentence keeps its period.
///
/// Example: `"The cat sat. The dog sat."` → `["the cat sat.", "the dog sat."]`
pub fn split_sentences(paragraph: &str) -> Vec<String> {
	// Double the period so that one copy survives the split
	let doubled = BOUNDARY_RE.replace_all(paragraph.trim(), ".. ");
	let text = doubled.to_lowercase();

	BOUNDARY_RE
		.split(&text)
		.map(str::trim)
		.filter(|sentence| !sentence.is_empty())
		.map(str::to_owned)
		.collect()
}

/// Loads the distinct sentences of a corpus file, in first-seen order.
///
/// - Files containing `<DOC>` elements are read document by document
/// - Any other file is read line by line, each line being a paragraph
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `EmptyCorpus` if no sentence was found
pub fn load_sentences<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
	let path = path.as_ref();
	let text = read_text(path)?;

	let paragraphs = match document_paragraphs(&text) {
		Some(paragraphs) => paragraphs,
		None => text.lines().map(str::to_owned).collect(),
	};

	let mut seen = HashSet::new();
	let mut sentences = Vec::new();
	for paragraph in &paragraphs {
		for sentence in split_sentences(paragraph) {
			if seen.insert(sentence.clone()) {
				sentences.push(sentence);
			}
		}
	}

	if sentences.is_empty() {
		return Err(NgramError::EmptyCorpus(path.to_owned()));
	}
	debug!("Loaded {} sentences from {}", sentences.len(), path.display());
	Ok(sentences)
}

/// Tokenizes every sentence, in parallel, keeping the input order.
///
/// # Behavior
/// - Splits the sentences into chunks (based on CPU cores * factor)
/// - Spawns one scoped thread per chunk
/// - Reassembles the chunks by index
///
/// # Panics
/// A panic in a worker is propagated once every worker has been joined,
/// so a chunk is never silently dropped.
pub fn tokenize_corpus(sentences: &[String], tokenizer: &Tokenizer) -> Vec<Vec<String>> {
	if sentences.is_empty() {
		return Vec::new();
	}

	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = sentences.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for (index, chunk) in sentences.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			scope.spawn(move || {
				let tokens: Vec<Vec<String>> = chunk
					.iter()
					.map(|sentence| tokenizer.tokenize(sentence))
					.collect();
				tx.send((index, tokens)).expect("Failed to send tokenized chunk");
			});
		}
	});
	drop(tx);

	let mut parts: Vec<(usize, Vec<Vec<String>>)> = rx.iter().collect();
	parts.sort_by_key(|(index, _)| *index);
	debug_assert!(parts.iter().enumerate().all(|(expected, (index, _))| expected == *index));
	parts.into_iter().flat_map(|(_, tokens)| tokens).collect()
}

/// Loads a corpus file and tokenizes its sentences.
pub fn load_tokenized<P: AsRef<Path>>(path: P, tokenizer: &Tokenizer) -> Result<Vec<Vec<String>>> {
	let sentences = load_sentences(path)?;
	Ok(tokenize_corpus(&sentences, tokenizer))
}
