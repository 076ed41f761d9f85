use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{ChainError, Result};
use crate::io::snapshot_path;
use super::chain_model::{ChainModel, ContextKey, Token};

/// Nested three-level mapping `w1 → w2 → w3 → count`, the on-disk shape
/// of the interchange format.
type NestedCounts = HashMap<Token, HashMap<Token, HashMap<Token, u64>>>;

/// Persistence of [`ChainModel`]s.
///
/// Two formats are supported:
/// - **JSON interchange**: UTF-8 text mirroring the nested three-level
///   mapping. Round-trips are exact on keys and counts; no ordering is
///   preserved or required. The top-level key set contains the start
///   marker whenever the model is non-empty.
/// - **Binary snapshot**: a compact `postcard` image written next to the
///   text file, short-circuiting later loads.
///
/// File handles are scoped to each operation and released on every exit
/// path, including failures.
pub struct ModelStore;

impl ModelStore {
	/// Serializes `model` to the UTF-8 JSON interchange form.
	pub fn to_json(model: &ChainModel) -> Result<String> {
		let mut nested: NestedCounts = HashMap::new();
		for (context, successor, count) in model.iter() {
			nested
				.entry(context.first.clone())
				.or_default()
				.entry(context.second.clone())
				.or_default()
				.insert(successor.clone(), count);
		}
		Ok(serde_json::to_string(&nested)?)
	}

	/// Rebuilds a model from the JSON interchange form.
	///
	/// Zero-count leaves are syntactically valid but violate the model
	/// invariant, so they are omitted rather than stored.
	///
	/// # Errors
	/// Returns `ChainError::Format` when the payload is not valid JSON,
	/// not three levels deep, or a leaf is not a non-negative integer.
	pub fn from_json(payload: &str) -> Result<ChainModel> {
		let nested: NestedCounts = serde_json::from_str(payload)?;

		let mut model = ChainModel::new();
		for (w1, seconds) in nested {
			for (w2, successors) in seconds {
				for (w3, count) in successors {
					model.add_count(ContextKey::new(w1.clone(), w2.clone()), w3, count);
				}
			}
		}
		Ok(model)
	}

	/// Writes the JSON interchange form of `model` to `path`.
	///
	/// # Errors
	/// Returns `ChainError::Io` if the file cannot be created or written.
	pub fn save<P: AsRef<Path>>(model: &ChainModel, path: P) -> Result<()> {
		let path = path.as_ref();
		let payload = Self::to_json(model)?;

		let mut file = File::create(path).map_err(|err| ChainError::io(path, err))?;
		file.write_all(payload.as_bytes())
			.map_err(|err| ChainError::io(path, err))?;

		debug!(path = %path.display(), bytes = payload.len(), "model saved");
		Ok(())
	}

	/// Loads a model from the JSON interchange file at `path`.
	///
	/// # Errors
	/// Returns `ChainError::Io` if the file cannot be opened or read,
	/// `ChainError::Format` if the payload is malformed.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<ChainModel> {
		let path = path.as_ref();

		let mut payload = String::new();
		File::open(path)
			.and_then(|mut file| file.read_to_string(&mut payload))
			.map_err(|err| ChainError::io(path, err))?;

		debug!(path = %path.display(), bytes = payload.len(), "model loaded");
		Self::from_json(&payload)
	}

	/// Loads the model at `path`, preferring the binary snapshot next to
	/// it (same stem, `bin` extension).
	///
	/// When the snapshot exists it is deserialized directly; otherwise
	/// the JSON file is loaded and the snapshot written for the next
	/// call.
	///
	/// # Errors
	/// Same as [`ModelStore::load`]; corrupt snapshot bytes are a
	/// `ChainError::Format`.
	pub fn load_with_snapshot<P: AsRef<Path>>(path: P) -> Result<ChainModel> {
		let path = path.as_ref();
		let snapshot = snapshot_path(path).map_err(|err| ChainError::io(path, err))?;

		if snapshot.exists() {
			debug!(path = %snapshot.display(), "loading binary snapshot");
			let bytes = std::fs::read(&snapshot).map_err(|err| ChainError::io(&snapshot, err))?;
			return Ok(postcard::from_bytes(&bytes)?);
		}

		let model = Self::load(path)?;
		let bytes = postcard::to_stdvec(&model)?;
		std::fs::write(&snapshot, bytes).map_err(|err| ChainError::io(&snapshot, err))?;
		debug!(path = %snapshot.display(), "binary snapshot written");

		Ok(model)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::builder::build;
	use std::path::PathBuf;

	fn sample_model() -> ChainModel {
		let words = ["the", "cat", "sat", ".", "the", "cat", "ran", "."];
		build(
			words.iter().map(|word| (*word).to_owned()),
			ChainModel::new(),
		)
	}

	fn temp_path(name: &str) -> PathBuf {
		let mut path = std::env::temp_dir();
		path.push(format!("rs-markov-{}-{}", std::process::id(), name));
		path
	}

	#[test]
	fn json_round_trip_is_exact() {
		let model = sample_model();
		let payload = ModelStore::to_json(&model).unwrap();
		let restored = ModelStore::from_json(&payload).unwrap();
		assert_eq!(model, restored);
	}

	#[test]
	fn json_shape_is_three_levels_deep() {
		let model = build(
			["a", "b", "c", "."].iter().map(|word| (*word).to_owned()),
			ChainModel::new(),
		);
		let payload = ModelStore::to_json(&model).unwrap();

		let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
		assert_eq!(value["@"]["a"]["b"], 1);
		assert_eq!(value["a"]["b"]["c"], 1);
		assert_eq!(value["b"]["c"]["."], 1);
	}

	#[test]
	fn malformed_payloads_are_format_errors() {
		let malformed = [
			"not json at all",
			"[1, 2, 3]",
			r#"{"a": 1}"#,
			r#"{"a": {"b": 2}}"#,
			r#"{"a": {"b": {"c": -1}}}"#,
			r#"{"a": {"b": {"c": 1.5}}}"#,
			r#"{"a": {"b": {"c": "x"}}}"#,
		];

		for payload in malformed {
			assert!(
				matches!(ModelStore::from_json(payload), Err(ChainError::Format(_))),
				"payload {payload:?} should be rejected"
			);
		}
	}

	#[test]
	fn zero_count_leaves_are_omitted() {
		let model = ModelStore::from_json(r#"{"a": {"b": {"c": 0}}}"#).unwrap();
		assert!(model.is_empty());
	}

	#[test]
	fn file_round_trip() {
		let path = temp_path("roundtrip.json");
		let model = sample_model();

		ModelStore::save(&model, &path).unwrap();
		let restored = ModelStore::load(&path).unwrap();
		assert_eq!(model, restored);

		std::fs::remove_file(&path).unwrap();
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let path = temp_path("does-not-exist.json");
		assert!(matches!(
			ModelStore::load(&path),
			Err(ChainError::Io { .. })
		));
	}

	#[test]
	fn snapshot_is_written_and_preferred() {
		let path = temp_path("snapshot.json");
		let snapshot = temp_path("snapshot.bin");
		let model = sample_model();

		ModelStore::save(&model, &path).unwrap();
		let restored = ModelStore::load_with_snapshot(&path).unwrap();
		assert_eq!(model, restored);
		assert!(snapshot.exists());

		// Corrupt the JSON: the next load must come from the snapshot.
		std::fs::write(&path, "garbage").unwrap();
		let restored = ModelStore::load_with_snapshot(&path).unwrap();
		assert_eq!(model, restored);

		std::fs::remove_file(&path).unwrap();
		std::fs::remove_file(&snapshot).unwrap();
	}
}
