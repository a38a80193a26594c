use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::{fs, io};

/// Reads a whole sample text file into memory.
pub fn read_sample<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Splits a text into word tokens.
///
/// Tokens are separated by any whitespace and keep their attached
/// punctuation, so `"Hello, world."` gives `["Hello,", "world."]`.
pub fn tokenize(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// Name of a sample file: its file name without the extension.
///
/// `"./data/speech.txt"` gives `"speech"`; a path without a file name
/// gives `None`.
pub fn sample_name<P: AsRef<Path>>(path: P) -> Option<String> {
	path.as_ref()
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
}

/// Sorted names of the files of `dir` ending with `.extension`.
///
/// Subdirectories are ignored.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = fs::read_dir(dir)?
		.map(|entry| entry.map(|entry| entry.path()))
		.filter(|path| match path {
			Ok(path) => path.is_file() && path.extension().is_some_and(|ext| ext == extension),
			Err(_) => true,
		})
		.map(|path| path.map(|path| path.file_name().unwrap_or_default().to_string_lossy().into_owned()))
		.collect::<io::Result<Vec<String>>>()?;

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokenize_keeps_punctuation() {
		assert_eq!(tokenize("  Hello, world.\nHow are\tyou? "), vec!["Hello,", "world.", "How", "are", "you?"]);
	}

	#[test]
	fn tokenize_empty_text() {
		assert!(tokenize(" \n\t").is_empty());
	}

	#[test]
	fn sample_names() {
		assert_eq!(sample_name("./data/speech.txt").as_deref(), Some("speech"));
		assert_eq!(sample_name("speech").as_deref(), Some("speech"));
		assert_eq!(sample_name("/"), None);
	}

	#[test]
	fn lists_matching_files_only() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("river.txt"), "The river runs.").unwrap();
		fs::write(dir.path().join("alpha.txt"), "A b.").unwrap();
		fs::write(dir.path().join("notes.md"), "# notes").unwrap();
		fs::create_dir(dir.path().join("nested.txt")).unwrap();

		assert_eq!(list_files(dir.path(), "txt").unwrap(), vec!["alpha.txt", "river.txt"]);
	}

	#[test]
	fn listing_a_missing_folder_fails() {
		assert!(list_files("./does/not/exist", "txt").is_err());
	}

	#[test]
	fn missing_sample_is_an_error() {
		assert!(read_sample("./does/not/exist.txt").is_err());
	}
}
