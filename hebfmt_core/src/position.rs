use std::fmt;
use std::fmt::Display;
use std::sync::Arc;

use crate::SyntaxError;
use crate::SyntaxErrorKind;

/// One physical line of a document, without its trailing newline.
///
/// Line info is produced once per line by the scanner that drives the parsers
/// and shared by every [`Position`] and [`SyntaxError`] pointing into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
	/// The raw bytes of the line. These are not guaranteed to be valid UTF-8.
	pub text: Vec<u8>,
	/// The name of the file the line was read from.
	pub file: String,
	/// The 1-based line number.
	pub number: usize,
}

impl LineInfo {
	pub fn new(text: impl Into<Vec<u8>>, file: impl Into<String>, number: usize) -> Arc<Self> {
		Arc::new(Self {
			text: text.into(),
			file: file.into(),
			number,
		})
	}

	pub fn len(&self) -> usize {
		self.text.len()
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// True when the line holds nothing but spaces and tabs.
	pub fn is_blank(&self) -> bool {
		is_blank(&self.text)
	}
}

/// A 1-based byte column within a [`LineInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
	line: Arc<LineInfo>,
	column: usize,
}

impl Position {
	pub fn new(line: Arc<LineInfo>, column: usize) -> Self {
		Self { line, column }
	}

	pub fn line(&self) -> &Arc<LineInfo> {
		&self.line
	}

	pub fn column(&self) -> usize {
		self.column
	}

	/// Build a point error at this position.
	pub fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
		SyntaxError::new(Arc::clone(&self.line), self.column, 0, kind)
	}

	/// Build an error spanning from this position to `end_column` inclusive.
	pub fn error_to(&self, end_column: usize, kind: SyntaxErrorKind) -> SyntaxError {
		SyntaxError::new(Arc::clone(&self.line), self.column, end_column, kind)
	}
}

impl Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.line.file, self.line.number, self.column)
	}
}

pub(crate) fn is_blank(bytes: &[u8]) -> bool {
	bytes.iter().all(|byte| matches!(byte, b' ' | b'\t'))
}
