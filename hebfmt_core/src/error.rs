use miette::Diagnostic;
use thiserror::Error;

use crate::FsError;
use crate::SyntaxError;
use crate::Warnings;

/// The cause carried by a [`SyntaxError`].
///
/// Fence variants are soft diagnostics collected into [`Warnings`]; every
/// other variant aborts the parse unit it was raised in.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
	#[error("code fences should be at least 3 chars long")]
	#[diagnostic(code(hebfmt::short_fence))]
	ShortFence,

	#[error("code fence interrupts a paragraph")]
	#[diagnostic(
		code(hebfmt::fence_interrupts_paragraph),
		help("start the code fence on its own line")
	)]
	InterruptsParagraph,

	#[error("code fence begins and ends on the same line")]
	#[diagnostic(code(hebfmt::same_line_fence))]
	SameLineFence,

	#[error("code fence length mismatch: opened with {opened} chars, closed with {closed}")]
	#[diagnostic(code(hebfmt::fence_length_mismatch))]
	FenceLengthMismatch { opened: usize, closed: usize },

	#[error("text after code fence")]
	#[diagnostic(code(hebfmt::text_after_fence))]
	TextAfterFence,

	#[error("code fence is never closed")]
	#[diagnostic(code(hebfmt::unclosed_fence))]
	UnclosedFence,

	#[error("unterminated string")]
	#[diagnostic(code(hebfmt::unterminated_string))]
	UnterminatedString,

	#[error("trailing backslash")]
	#[diagnostic(
		code(hebfmt::trailing_backslash),
		help("line continuations are not supported; escape the backslash as `\\\\`")
	)]
	TrailingBackslash,

	#[error("invalid UTF-8 encoding")]
	#[diagnostic(code(hebfmt::invalid_encoding))]
	InvalidEncoding,

	#[error("expected command name")]
	#[diagnostic(code(hebfmt::expected_command))]
	ExpectedCommand,

	#[error("unexpected text after command")]
	#[diagnostic(
		code(hebfmt::unexpected_text),
		help("pipes, redirections, globs, `$(...)` and backticks are not supported")
	)]
	UnexpectedText,

	#[error("empty inline file")]
	#[diagnostic(code(hebfmt::empty_inline_file))]
	EmptyInlineFile,

	#[error("missing closing parenthesis")]
	#[diagnostic(code(hebfmt::missing_close_paren))]
	MissingCloseParen,

	#[error("expected ';' between commands")]
	#[diagnostic(code(hebfmt::missing_separator))]
	MissingSeparator,

	#[error("`{command}` exited with code {code}")]
	#[diagnostic(code(hebfmt::exit_status))]
	ExitStatus { command: String, code: i32 },

	#[error("{source} (`{command}` exited with code {code})")]
	#[diagnostic(code(hebfmt::command_failed))]
	CommandFailed {
		command: String,
		code: i32,
		#[source]
		source: ShellError,
	},
}

impl SyntaxErrorKind {
	/// Whether this cause is a soft diagnostic rather than a hard error.
	pub fn is_warning(&self) -> bool {
		matches!(
			self,
			Self::ShortFence
				| Self::InterruptsParagraph
				| Self::SameLineFence
				| Self::FenceLengthMismatch { .. }
				| Self::TextAfterFence
				| Self::UnclosedFence
		)
	}
}

/// Failure raised while running a built-in command.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ShellError {
	#[error("unknown command: {0:?}")]
	#[diagnostic(code(hebfmt::unknown_command), help("the only built-in command is `echo`"))]
	UnknownCommand(String),

	#[error("failed to write command output: {0}")]
	#[diagnostic(code(hebfmt::command_output))]
	Output(#[from] std::io::Error),
}

impl ShellError {
	/// The exit code a shell would report for this failure.
	pub fn exit_code(&self) -> i32 {
		match self {
			Self::UnknownCommand(_) => 127,
			Self::Output(_) => 1,
		}
	}
}

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocError {
	#[error(transparent)]
	#[diagnostic(code(hebfmt::io_error))]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	#[diagnostic(transparent)]
	Syntax(#[from] SyntaxError),

	#[error(transparent)]
	#[diagnostic(code(hebfmt::fs))]
	Fs(#[from] FsError),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(hebfmt::config_parse),
		help("check that hebfmt.toml is valid TOML with a [doccheck] section")
	)]
	ConfigParse(String),

	#[error("quoted file `{path}` at {location} does not match the file on disk\n{diff}")]
	#[diagnostic(
		code(hebfmt::quoted_file_mismatch),
		help("update the documentation block or the file so that they agree")
	)]
	QuotedFileMismatch {
		path: String,
		location: String,
		diff: String,
	},

	#[error("{0}")]
	#[diagnostic(code(hebfmt::warnings))]
	Warnings(Warnings),

	#[error("{error}\n\n{warnings}")]
	#[diagnostic(code(hebfmt::failed_with_warnings))]
	WithWarnings {
		warnings: Warnings,
		#[source]
		error: Box<DocError>,
	},
}

pub type DocResult<T> = Result<T, DocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
