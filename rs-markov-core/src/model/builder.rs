use std::path::Path;
use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::error::{ChainError, Result};
use crate::io::read_lines;
use super::chain_model::{ChainModel, ContextKey, START_MARKER, TERMINATOR, Token};

/// Kind attached to each token by the external tokenizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
	/// Regular lexical token, always ingested.
	Word,
	/// Punctuation-like token, dropped unless it is the terminator.
	Punctuation,
}

/// Filters the `(token, kind)` pairs supplied by the external tokenizer
/// down to the tokens the chain ingests.
///
/// Punctuation-kind tokens are dropped, except the literal terminator
/// `"."` which is always retained and ends the sentence.
pub fn filter_tagged<I>(tagged: I) -> Vec<Token>
where
	I: IntoIterator<Item = (Token, TokenKind)>,
{
	tagged
		.into_iter()
		.filter_map(|(token, kind)| {
			if token == TERMINATOR || kind != TokenKind::Punctuation {
				Some(token)
			} else {
				None
			}
		})
		.collect()
}

/// Streams a token sequence into `model` with a sliding window of up to
/// three tokens, seeded with the start marker.
///
/// One observation is recorded per full window: the first two tokens form
/// the context, the third is the successor. Observing the terminator
/// resets the window so the next sentence re-anchors on the start marker.
///
/// # Notes
/// - Pure update over `(tokens, model)`; no I/O, no concurrency.
/// - May start from an empty model; repeated calls accumulate counts.
/// - A sequence shorter than two tokens before its first terminator
///   contributes no statistics.
/// - The terminator is recorded as an ordinary successor value.
pub fn build<I>(tokens: I, mut model: ChainModel) -> ChainModel
where
	I: IntoIterator<Item = Token>,
{
	let mut window: Vec<Token> = vec![START_MARKER.to_owned()];

	for token in tokens {
		window.push(token);

		if window.len() < 3 {
			continue;
		}
		if window.len() > 3 {
			window.remove(0);
		}

		let context = ContextKey::new(window[0].clone(), window[1].clone());
		model.record(context, window[2].clone());

		if window[2] == TERMINATOR {
			window = vec![START_MARKER.to_owned()];
		}
	}

	model
}

/// Builds a model from a corpus file of whitespace-separated normalized
/// tokens, one or more terminator-ended sentences per line.
///
/// # Errors
/// Returns `ChainError::Io` if the file cannot be read.
pub fn build_corpus_file<P: AsRef<Path>>(path: P) -> Result<ChainModel> {
	let path = path.as_ref();
	let lines = read_lines(path).map_err(|err| ChainError::io(path, err))?;
	Ok(build_corpus(&lines))
}

/// Chunked build-then-merge over pre-split corpus lines.
///
/// Lines are split into chunks (CPU count based), partial models are built
/// on threads and merged into one. Line boundaries are sentence
/// boundaries, so the merged counts are identical to a sequential build
/// of the same lines.
pub fn build_corpus(lines: &[String]) -> ChainModel {
	if lines.is_empty() {
		return ChainModel::new();
	}

	let chunks = num_cpus::get() * 8;
	let chunk_size = lines.len().div_ceil(chunks);
	debug!(lines = lines.len(), chunk_size, "building corpus in parallel");

	let (tx, rx) = mpsc::channel();
	for chunk in lines.chunks(chunk_size) {
		let tx = tx.clone();
		let chunk: Vec<String> = chunk.to_vec();

		thread::spawn(move || {
			let mut partial = ChainModel::new();
			for line in chunk {
				let tokens = line.split_whitespace().map(str::to_owned);
				partial = build(tokens, partial);
			}
			tx.send(partial).expect("corpus build thread disconnected");
		});
	}
	drop(tx);

	let mut model = ChainModel::new();
	for partial in rx.iter() {
		model.merge(&partial);
	}
	model
}
