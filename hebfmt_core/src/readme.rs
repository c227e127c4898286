//! Extraction and verification of the worked examples in project
//! documentation.
//!
//! Two kinds of fenced block are recognised:
//!
//! - Example sessions: a block tagged with one of the configured shell tags
//!   whose first line is `$ <program> ...`. The command line is parsed with
//!   the shell dialect of [`crate::shell`], inline files are run and stored,
//!   and the remaining lines are kept as the expected output.
//! - Quoted files: a block tagged `text`, `json` or `tmpl` (configurable)
//!   preceded by a line naming the file in backticks, e.g. ``Given `hol.tmpl`:``.
//!   The block must match that file byte for byte.

use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use similar::TextDiff;

use crate::Cursor;
use crate::DiskFs;
use crate::DocCheckConfig;
use crate::DocError;
use crate::DocResult;
use crate::FenceState;
use crate::FencedBlock;
use crate::FileSystem;
use crate::LineInfo;
use crate::MemoryFs;
use crate::OverlayFs;
use crate::Scan;
use crate::SyntaxErrorKind;
use crate::Warnings;
use crate::fence::memstr;
use crate::shell::Command;
use crate::shell::parse_invocation;

/// Id of the first inline file in a document, as bash numbers them.
pub const FIRST_INLINE_FILE_ID: usize = 63;

/// A runnable example extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
	/// Line of the `$ ` command line.
	pub line: usize,
	/// The program invocation, with inline files replaced by their names.
	pub command: Command,
	/// The lines that follow the command line in the same block.
	pub expected_output: Vec<u8>,
}

/// A quoted file that was found to match the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedFile {
	pub line: usize,
	pub path: String,
	pub tag: String,
}

/// Everything learned from one document.
#[derive(Debug, Default)]
pub struct DocReport {
	pub file: String,
	pub examples: Vec<Example>,
	pub quoted_files: Vec<QuotedFile>,
	/// Files produced by `<( ... )` in the examples.
	pub inline_files: MemoryFs,
	pub warnings: Warnings,
}

/// Check every configured document below `root`.
pub fn check_project(config: &DocCheckConfig, root: &Path) -> DocResult<Vec<DocReport>> {
	config
		.documents
		.iter()
		.map(|document| check_file(config, root, document))
		.collect()
}

/// Check the document at `root/document`.
pub fn check_file(config: &DocCheckConfig, root: &Path, document: &Path) -> DocResult<DocReport> {
	tracing::debug!(document = %document.display(), "checking document");
	let name = document.display().to_string();
	let disk = DiskFs::new(root);
	let file = disk.open(&name)?;
	check_document(config, root, &name, BufReader::new(file))
}

/// Check a document read from `reader`. `file` names it in diagnostics and
/// quoted files are looked up below `root`.
///
/// The first hard error stops the check; it is returned together with any
/// warnings collected up to that point.
pub fn check_document(
	config: &DocCheckConfig,
	root: &Path,
	file: &str,
	reader: impl BufRead,
) -> DocResult<DocReport> {
	let disk = DiskFs::new(root);
	let mut scanner = DocumentScanner::new(config, &disk, file);

	for (index, text) in reader.split(b'\n').enumerate() {
		let mut text = match text {
			Ok(text) => text,
			Err(error) => return Err(scanner.fail(error.into())),
		};

		if text.last() == Some(&b'\r') {
			text.pop();
		}

		if let Err(error) = scanner.feed(LineInfo::new(text, file, index + 1)) {
			return Err(scanner.fail(error));
		}
	}

	scanner.finish()
}

struct OpenBlock {
	block: FencedBlock,
	opening: Arc<LineInfo>,
	/// Every line fed to the block after the opening line.
	lines: Vec<Arc<LineInfo>>,
	/// The last non-blank line before the block.
	caption: Option<Arc<LineInfo>>,
}

struct DocumentScanner<'a> {
	config: &'a DocCheckConfig,
	disk: &'a DiskFs,
	report: DocReport,
	next_file_id: usize,
	open: Option<OpenBlock>,
	caption: Option<Arc<LineInfo>>,
}

impl<'a> DocumentScanner<'a> {
	fn new(config: &'a DocCheckConfig, disk: &'a DiskFs, file: &str) -> Self {
		Self {
			config,
			disk,
			report: DocReport {
				file: file.to_string(),
				..DocReport::default()
			},
			next_file_id: FIRST_INLINE_FILE_ID,
			open: None,
			caption: None,
		}
	}

	fn feed(&mut self, line: Arc<LineInfo>) -> DocResult<()> {
		if let Some(mut open) = self.open.take() {
			let state = open.block.feed_line(&line, 1, &mut self.report.warnings);
			open.lines.push(line);

			if state == FenceState::Closed {
				return self.finish_block(&open);
			}

			self.open = Some(open);
			return Ok(());
		}

		let warnings = &mut self.report.warnings;
		let opened = FencedBlock::open(&line, 1, warnings).or_else(|| {
			let column = mid_line_fence(&line.text)?;
			FencedBlock::open(&line, column, warnings)
		});

		let Some((block, state)) = opened else {
			if !line.is_blank() {
				self.caption = Some(line);
			}

			return Ok(());
		};

		let open = OpenBlock {
			block,
			opening: line,
			lines: Vec::new(),
			caption: self.caption.take(),
		};

		match state {
			FenceState::Closed => self.finish_block(&open),
			FenceState::Open => {
				self.open = Some(open);
				Ok(())
			}
		}
	}

	fn finish(mut self) -> DocResult<DocReport> {
		if let Some(open) = self.open.take() {
			let fence_column = open.block.indent.len() + 1;
			let warning = Cursor::new(&open.opening, fence_column).error(SyntaxErrorKind::UnclosedFence);
			self.report.warnings.push(warning);

			if let Err(error) = self.finish_block(&open) {
				return Err(self.fail(error));
			}
		}

		Ok(self.report)
	}

	fn fail(&mut self, error: DocError) -> DocError {
		std::mem::take(&mut self.report.warnings).join(error)
	}

	fn finish_block(&mut self, open: &OpenBlock) -> DocResult<()> {
		let config = self.config;
		let tag = open.block.tag();

		if config.is_shell_tag(tag) {
			self.check_example(open)
		} else if let Some(extension) = config.extension_for(tag) {
			self.check_quoted_file(open, extension)
		} else {
			tracing::trace!(line = open.block.start_line, tag, "skipping block");
			Ok(())
		}
	}

	fn check_example(&mut self, open: &OpenBlock) -> DocResult<()> {
		let block = &open.block;
		let (Some(first), Some(raw)) = (block.lines.first(), open.lines.first()) else {
			return Ok(());
		};

		let program = format!(" {} ", self.config.program);
		let mut padded = first.clone();
		padded.push(b' ');

		if !first.starts_with(b"$ ") || memstr(&padded, program.as_bytes()).is_none() {
			tracing::debug!(line = raw.number, "shell block is not an example");
			return Ok(());
		}

		// The kept line may stop short of the physical one when the fence
		// closes on it, so parse only the bytes the block kept.
		let indent = raw
			.text
			.iter()
			.zip(block.indent.as_bytes())
			.take_while(|(a, b)| a == b)
			.count();
		let end = indent + first.len();
		let command_line = if end == raw.len() {
			Arc::clone(raw)
		} else {
			LineInfo::new(&raw.text[..end], raw.file.clone(), raw.number)
		};
		let start = Cursor::new(&command_line, indent + 3).skip_whitespace();

		let (command, rest) = match parse_invocation(
			start,
			&mut self.report.inline_files,
			&mut self.next_file_id,
		) {
			Scan::Matched((command, _), rest) => (command, rest),
			Scan::NoMatch => return Err(start.error(SyntaxErrorKind::ExpectedCommand).into()),
			Scan::Error(error) => return Err(error.into()),
		};

		let rest = rest.skip_whitespace();
		if !rest.is_at_end() {
			return Err(rest.error_to_end(SyntaxErrorKind::UnexpectedText).into());
		}

		let mut expected_output = Vec::new();
		for line in &block.lines[1..] {
			expected_output.extend_from_slice(line);
			expected_output.push(b'\n');
		}

		tracing::debug!(line = raw.number, command = %command, "extracted example");
		self.report.examples.push(Example {
			line: raw.number,
			command,
			expected_output,
		});

		Ok(())
	}

	fn check_quoted_file(&mut self, open: &OpenBlock, extension: &str) -> DocResult<()> {
		let block = &open.block;
		let Some(path) = open
			.caption
			.as_ref()
			.and_then(|caption| quoted_file_name(&caption.text, extension))
		else {
			tracing::debug!(
				line = block.start_line,
				extension,
				"content block without a quoted file name"
			);
			return Ok(());
		};

		let overlay = OverlayFs::new()
			.with_layer(&self.report.inline_files)
			.with_layer(self.disk);
		let actual = overlay.read(&path)?;
		let expected = block.content();

		if actual != expected {
			return Err(DocError::QuotedFileMismatch {
				location: format!("{}:{}", self.report.file, block.start_line),
				diff: unified_diff(&actual, &expected, &path),
				path,
			});
		}

		tracing::debug!(path = %path, line = block.start_line, "quoted file matches");
		self.report.quoted_files.push(QuotedFile {
			line: block.start_line,
			path,
			tag: block.tag().to_string(),
		});

		Ok(())
	}
}

/// 1-based column of the first backtick or tilde fence that follows other
/// text on the line.
fn mid_line_fence(text: &[u8]) -> Option<usize> {
	let found = [b"```".as_slice(), b"~~~"]
		.into_iter()
		.filter_map(|fence| memstr(text, fence))
		.min()?;
	if text[..found].trim_ascii().is_empty() {
		return None;
	}

	Some(found + 1)
}

/// The first backtick-quoted name in `caption` ending with `extension`.
pub fn quoted_file_name(caption: &[u8], extension: &str) -> Option<String> {
	let caption = String::from_utf8_lossy(caption);
	let parts: Vec<&str> = caption.split('`').collect();

	(1..parts.len().saturating_sub(1))
		.step_by(2)
		.map(|index| parts[index])
		.find(|name| name.len() > extension.len() && name.ends_with(extension))
		.map(str::to_string)
}

fn unified_diff(actual: &[u8], expected: &[u8], path: &str) -> String {
	let actual = String::from_utf8_lossy(actual);
	let expected = String::from_utf8_lossy(expected);

	TextDiff::from_lines(actual.as_ref(), expected.as_ref())
		.unified_diff()
		.header(path, "documentation")
		.to_string()
}
