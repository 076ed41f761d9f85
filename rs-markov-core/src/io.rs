use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads a UTF-8 text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_lines<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(path)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds the sibling path holding the binary snapshot of a model file.
///
/// Example:
/// `data/model.json` → `data/model.bin`
pub(crate) fn snapshot_path<P: AsRef<Path>>(model_path: P) -> io::Result<PathBuf> {
	let model_path = model_path.as_ref();

	let stem = model_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Model path has no filename"))?;

	let parent = model_path.parent().unwrap_or_else(|| Path::new("."));
	let mut output = PathBuf::from(parent);
	output.push(stem);
	output.set_extension("bin");

	Ok(output)
}
