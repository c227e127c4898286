use std::sync::Arc;

use crate::Cursor;
use crate::LineInfo;
use crate::SyntaxErrorKind;
use crate::Warnings;
use crate::position::is_blank;

/// Whether a fenced block is still collecting lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceState {
	Open,
	Closed,
}

/// A fenced code block, fed one physical line at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FencedBlock {
	/// Line number of the opening fence.
	pub start_line: usize,
	/// Line number of the closing fence, `0` while the block is open.
	pub end_line: usize,
	/// The info string following the opening fence, trimmed.
	pub info: String,
	/// Up to three spaces that preceded the opening fence.
	pub indent: String,
	/// The literal run of fence characters that opened the block.
	pub terminator: String,
	/// Content lines with the indent removed.
	pub lines: Vec<Vec<u8>>,
}

impl FencedBlock {
	/// Try to open a block at `column` of `line`.
	///
	/// Returns `None` when the line does not start a fence there. The rest of
	/// the opening line is handed to [`FencedBlock::feed_line`], so the
	/// returned state may already be [`FenceState::Closed`].
	pub fn open(
		line: &Arc<LineInfo>,
		column: usize,
		warnings: &mut Warnings,
	) -> Option<(Self, FenceState)> {
		let start = Cursor::new(line, column);
		let indent_len = start
			.rest()
			.iter()
			.take_while(|byte| matches!(byte, b' ' | b'\t'))
			.count();
		let indent = &start.rest()[..indent_len];

		if indent_len > 3 || indent.contains(&b'\t') {
			return None;
		}

		let fence = start.advance(indent_len);
		let marker = fence.peek()?;
		if !matches!(marker, b'`' | b'~') {
			return None;
		}

		let run = run_length(fence.rest(), marker);
		if run < 3 {
			if run == 2 {
				warnings.push(fence.error_until(fence.advance(run), SyntaxErrorKind::ShortFence));
			}

			return None;
		}

		if column > 1 {
			warnings.push(fence.error(SyntaxErrorKind::InterruptsParagraph));
		}

		let mut block = Self {
			start_line: line.number,
			indent: String::from_utf8_lossy(indent).into_owned(),
			terminator: String::from_utf8_lossy(&fence.rest()[..run]).into_owned(),
			..Self::default()
		};
		let state = block.feed_line(line, fence.advance(run).column(), warnings);

		Some((block, state))
	}

	/// Feed the part of `line` starting at `column` into the block.
	pub fn feed_line(
		&mut self,
		line: &Arc<LineInfo>,
		column: usize,
		warnings: &mut Warnings,
	) -> FenceState {
		let cursor = Cursor::new(line, column);
		let rest = cursor.rest();
		let opening = line.number == self.start_line;

		// Only backtick fences may close on the line that opened them.
		if opening && !self.terminator.starts_with('`') {
			self.info = info_string(rest);
			return FenceState::Open;
		}

		let Some(found) = memstr(rest, self.terminator.as_bytes()) else {
			if opening {
				self.info = info_string(rest);
			} else {
				self.push_line(rest);
			}

			return FenceState::Open;
		};

		let fence = cursor.advance(found);
		let before = &rest[..found];

		if opening {
			self.info = info_string(before);
			warnings.push(fence.error(SyntaxErrorKind::SameLineFence));
		} else if !is_blank(before) {
			self.push_line(before);
		}

		let marker = self.terminator.as_bytes()[0];
		let run = run_length(fence.rest(), marker);
		if run != self.terminator.len() {
			warnings.push(fence.error_until(
				fence.advance(run),
				SyntaxErrorKind::FenceLengthMismatch {
					opened: self.terminator.len(),
					closed: run,
				},
			));
		}

		let after = fence.advance(run);
		if !after.rest().trim_ascii().is_empty() {
			let text = after.skip_whitespace();
			warnings.push(text.error_to_end(SyntaxErrorKind::TextAfterFence));
		}

		self.end_line = line.number;
		FenceState::Closed
	}

	pub fn is_closed(&self) -> bool {
		self.end_line != 0
	}

	/// The first word of the info string, e.g. `sh` for ```` ```sh title ````.
	pub fn tag(&self) -> &str {
		self.info.split_whitespace().next().unwrap_or_default()
	}

	/// The content lines, each terminated by `\n`.
	pub fn content(&self) -> Vec<u8> {
		let mut content = Vec::new();
		for line in &self.lines {
			content.extend_from_slice(line);
			content.push(b'\n');
		}
		content
	}

	/// Strip the longest prefix shared with the opening indent, and nothing
	/// more.
	fn push_line(&mut self, text: &[u8]) {
		let shared = text
			.iter()
			.zip(self.indent.as_bytes())
			.take_while(|(a, b)| a == b)
			.count();
		self.lines.push(text[shared..].to_vec());
	}
}

fn run_length(bytes: &[u8], marker: u8) -> usize {
	bytes.iter().take_while(|&&byte| byte == marker).count()
}

fn info_string(bytes: &[u8]) -> String {
	String::from_utf8_lossy(bytes.trim_ascii()).into_owned()
}

/// Find the first occurrence of `needle` in `haystack`.
pub fn memstr(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	if needle.is_empty() {
		return Some(0);
	}

	haystack
		.windows(needle.len())
		.position(|window| window == needle)
}
