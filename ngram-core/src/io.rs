use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::io;

/// Reads a whole text file into memory.
///
/// Invalid UTF-8 is an `InvalidData` error.
pub(crate) fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}
