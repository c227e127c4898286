use std::fmt;
use std::fmt::Display;
use std::fmt::Write as _;
use std::sync::Arc;

use miette::Diagnostic;

use crate::LineInfo;
use crate::SyntaxErrorKind;
use crate::scan::decode_char;

/// Tab stops used when rendering source excerpts.
pub const TAB_WIDTH: usize = 8;

/// A positioned error over a single source line.
///
/// Renders as a header naming the location, followed by a tab-expanded copy
/// of the line and a marker line with `^` under the offending columns:
///
/// ```text
/// syntax at README.md:4:3-4: unknown command: "bc" (`bc calc.bc` exited with code 127)
///
/// <(bc calc.bc)
///   ^^
/// ```
#[derive(Debug, Diagnostic)]
#[diagnostic(code(hebfmt::syntax))]
pub struct SyntaxError {
	line: Arc<LineInfo>,
	col_start: usize,
	col_end: usize,
	kind: SyntaxErrorKind,
}

impl SyntaxError {
	/// `col_end == 0` marks a point error at `col_start`.
	pub fn new(line: Arc<LineInfo>, col_start: usize, col_end: usize, kind: SyntaxErrorKind) -> Self {
		let col_start = col_start.max(1);
		let col_end = if col_end == 0 { col_start } else { col_end.max(col_start) };

		Self {
			line,
			col_start,
			col_end,
			kind,
		}
	}

	pub fn kind(&self) -> &SyntaxErrorKind {
		&self.kind
	}

	pub fn into_kind(self) -> SyntaxErrorKind {
		self.kind
	}

	pub fn file(&self) -> &str {
		&self.line.file
	}

	pub fn line_number(&self) -> usize {
		self.line.number
	}

	pub fn line_text(&self) -> &[u8] {
		&self.line.text
	}

	pub fn col_start(&self) -> usize {
		self.col_start
	}

	pub fn col_end(&self) -> usize {
		self.col_end
	}

	/// The one-line `syntax at file:line:col: message` header.
	pub fn header(&self) -> String {
		let mut header = format!(
			"syntax at {}:{}:{}",
			self.line.file, self.line.number, self.col_start
		);

		if self.col_end != self.col_start {
			let _ = write!(header, "-{}", self.col_end);
		}

		let _ = write!(header, ": {}", self.kind);
		header
	}

	/// Expand the source line and build the marker line beneath it. Both are
	/// expanded with the same tab stops so the carets stay aligned.
	pub fn excerpt(&self) -> (String, String) {
		let text = &self.line.text;
		let span = (self.col_start - 1)..self.col_end;
		let mut excerpt = String::with_capacity(text.len());
		let mut marker = String::with_capacity(text.len());
		let mut width = 0;
		let mut offset = 0;

		while offset < text.len() {
			let (ch, len) = match decode_char(&text[offset..]) {
				Some(Ok(decoded)) => decoded,
				Some(Err(invalid)) => (char::REPLACEMENT_CHARACTER, invalid.size()),
				None => break,
			};

			let cells = if ch == '\t' {
				TAB_WIDTH - width % TAB_WIDTH
			} else {
				1
			};

			if ch == '\t' {
				excerpt.extend(std::iter::repeat_n(' ', cells));
			} else {
				excerpt.push(ch);
			}

			let marked = offset < span.end && span.start < offset + len;
			let mark = if marked { '^' } else { ' ' };
			marker.extend(std::iter::repeat_n(mark, cells));

			width += cells;
			offset += len;
		}

		// Spans may run past the end of the line, e.g. a missing closing
		// parenthesis.
		let past_end = span.start.max(text.len());
		if span.end > past_end {
			marker.extend(std::iter::repeat_n('^', span.end - past_end));
		}

		(excerpt, marker)
	}

	/// The full multi-line rendering.
	pub fn render(&self) -> String {
		let (excerpt, marker) = self.excerpt();
		format!("{}\n\n{excerpt}\n{marker}", self.header())
	}
}

impl Display for SyntaxError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

impl std::error::Error for SyntaxError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		Some(&self.kind)
	}
}
