use std::sync::Arc;

use crate::LineInfo;
use crate::Position;
use crate::SyntaxError;
use crate::SyntaxErrorKind;

/// Outcome of a token parser.
///
/// `NoMatch` always means that no bytes were consumed, so callers may try
/// another interpretation from the same cursor. `Error` is a hard failure
/// that must be propagated.
#[derive(Debug)]
#[must_use]
pub enum Scan<'a, T> {
	/// The value and the cursor just past it.
	Matched(T, Cursor<'a>),
	NoMatch,
	Error(SyntaxError),
}

impl<'a, T> Scan<'a, T> {
	pub fn is_match(&self) -> bool {
		matches!(self, Self::Matched(..))
	}

	pub fn is_no_match(&self) -> bool {
		matches!(self, Self::NoMatch)
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scan<'a, U> {
		match self {
			Self::Matched(value, cursor) => Scan::Matched(f(value), cursor),
			Self::NoMatch => Scan::NoMatch,
			Self::Error(error) => Scan::Error(error),
		}
	}

	/// Collapse into a `Result` so the caller can use `?` on the hard error.
	pub fn into_result(self) -> Result<Option<(T, Cursor<'a>)>, SyntaxError> {
		match self {
			Self::Matched(value, cursor) => Ok(Some((value, cursor))),
			Self::NoMatch => Ok(None),
			Self::Error(error) => Err(error),
		}
	}
}

/// Unwrap a `Matched` scan, returning early from the enclosing parser on
/// `NoMatch` or `Error`.
macro_rules! matched {
	($scan:expr) => {
		match $scan {
			$crate::Scan::Matched(value, cursor) => (value, cursor),
			$crate::Scan::NoMatch => return $crate::Scan::NoMatch,
			$crate::Scan::Error(error) => return $crate::Scan::Error(error),
		}
	};
}

pub(crate) use matched;

/// A byte sequence that could not be decoded as UTF-8. `size` is the number
/// of bytes that make up the invalid sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidEncoding(usize);

impl InvalidEncoding {
	pub fn size(self) -> usize {
		self.0
	}
}

/// Decode the first character of `bytes`.
///
/// Returns `None` for empty input.
pub fn decode_char(bytes: &[u8]) -> Option<Result<(char, usize), InvalidEncoding>> {
	if bytes.is_empty() {
		return None;
	}

	let head = &bytes[..bytes.len().min(4)];
	let valid = match std::str::from_utf8(head) {
		Ok(valid) => valid,
		Err(error) if error.valid_up_to() > 0 => {
			std::str::from_utf8(&head[..error.valid_up_to()]).unwrap_or_default()
		}
		Err(error) => {
			let len = error.error_len().map_or(head.len(), usize::from);
			return Some(Err(InvalidEncoding(len)));
		}
	};

	valid.chars().next().map(|ch| Ok((ch, ch.len_utf8())))
}

/// A read position within a single line.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
	line: &'a Arc<LineInfo>,
	offset: usize,
}

impl<'a> Cursor<'a> {
	/// Place a cursor at the 1-based `column` of `line`.
	pub fn new(line: &'a Arc<LineInfo>, column: usize) -> Self {
		let offset = column.saturating_sub(1).min(line.len());
		Self { line, offset }
	}

	pub fn line(&self) -> &'a Arc<LineInfo> {
		self.line
	}

	/// 0-based byte offset into the line.
	pub fn offset(&self) -> usize {
		self.offset
	}

	/// 1-based byte column.
	pub fn column(&self) -> usize {
		self.offset + 1
	}

	pub fn rest(&self) -> &'a [u8] {
		&self.line.text[self.offset..]
	}

	pub fn is_at_end(&self) -> bool {
		self.offset >= self.line.len()
	}

	pub fn peek(&self) -> Option<u8> {
		self.rest().first().copied()
	}

	pub fn starts_with(&self, prefix: &[u8]) -> bool {
		self.rest().starts_with(prefix)
	}

	pub fn next_char(&self) -> Option<Result<(char, usize), InvalidEncoding>> {
		decode_char(self.rest())
	}

	pub fn advance(self, bytes: usize) -> Self {
		Self {
			line: self.line,
			offset: (self.offset + bytes).min(self.line.len()),
		}
	}

	pub fn skip_whitespace(self) -> Self {
		let skipped = self
			.rest()
			.iter()
			.take_while(|byte| matches!(byte, b' ' | b'\t'))
			.count();
		self.advance(skipped)
	}

	pub fn position(&self) -> Position {
		Position::new(Arc::clone(self.line), self.column())
	}

	pub fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
		self.position().error(kind)
	}

	/// Error over the bytes between this cursor and `end` (exclusive).
	pub fn error_until(&self, end: Cursor<'_>, kind: SyntaxErrorKind) -> SyntaxError {
		self.position().error_to(end.offset, kind)
	}

	/// Error over everything from this cursor to the end of the line.
	pub fn error_to_end(&self, kind: SyntaxErrorKind) -> SyntaxError {
		self.position().error_to(self.line.len(), kind)
	}

	pub(crate) fn invalid_encoding(&self, invalid: InvalidEncoding) -> SyntaxError {
		self.error_until(self.advance(invalid.size()), SyntaxErrorKind::InvalidEncoding)
	}
}

impl PartialEq for Cursor<'_> {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(self.line, other.line) && self.offset == other.offset
	}
}

impl Eq for Cursor<'_> {}

/// The columns covered by a parsed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
	pub start: Cursor<'a>,
	pub end: Cursor<'a>,
}

impl<'a> Span<'a> {
	pub fn new(start: Cursor<'a>, end: Cursor<'a>) -> Self {
		Self { start, end }
	}

	pub fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
		self.start.error_until(self.end, kind)
	}
}
