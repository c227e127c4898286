use crate::Cursor;
use crate::MemoryFs;
use crate::Scan;
use crate::Span;
use crate::SyntaxErrorKind;
use crate::shell::Capture;
use crate::shell::Command;
use crate::shell::Env;
use crate::shell::parse_command;
use crate::shell::parse_command_with;
use crate::shell::parse_string;

/// The name under which inline file `file_id` is stored.
pub fn inline_file_name(file_id: usize) -> String {
	format!("/dev/fd/{file_id}")
}

/// Parse and run a process substitution, `<( cmd [; cmd]... [;] )`.
///
/// The combined output of the commands is stored in `files` under
/// [`inline_file_name`] and that name is the matched value.
pub fn parse_inline_file<'a>(
	start: Cursor<'a>,
	file_id: usize,
	files: &mut MemoryFs,
) -> Scan<'a, String> {
	if !start.starts_with(b"<(") {
		return Scan::NoMatch;
	}

	let mut cursor = start.advance(2).skip_whitespace();
	if cursor.peek() == Some(b')') {
		return Scan::Error(start.error_until(cursor.advance(1), SyntaxErrorKind::EmptyInlineFile));
	}

	let mut capture = Capture::new();
	let mut env = Env::new(start.position(), &mut capture);

	loop {
		let (command, span, next) = match parse_command(cursor) {
			Scan::Matched((command, span), next) => (command, span, next),
			Scan::NoMatch if cursor.is_at_end() => {
				return Scan::Error(start.error_to_end(SyntaxErrorKind::MissingCloseParen));
			}
			Scan::NoMatch => return Scan::Error(cursor.error(SyntaxErrorKind::ExpectedCommand)),
			Scan::Error(error) => return Scan::Error(error),
		};

		if let Err(kind) = run_command(&command, &mut env) {
			return Scan::Error(span.error(kind));
		}

		cursor = next.skip_whitespace();
		match cursor.peek() {
			Some(b';') => {
				cursor = cursor.advance(1).skip_whitespace();
				if cursor.peek() == Some(b')') {
					cursor = cursor.advance(1);
					break;
				}
			}
			Some(b')') => {
				cursor = cursor.advance(1);
				break;
			}
			None => return Scan::Error(start.error_to_end(SyntaxErrorKind::MissingCloseParen)),
			Some(_) => return Scan::Error(cursor.error(SyntaxErrorKind::MissingSeparator)),
		}
	}

	drop(env);

	let name = inline_file_name(file_id);
	tracing::debug!(file = %name, bytes = capture.as_bytes().len(), "materialized inline file");
	files.insert(name.clone(), capture.into_inner());

	Scan::Matched(name, cursor)
}

/// Run `command` in a scope of its own and record the exit code in `$?`.
pub(crate) fn run_command(command: &Command, env: &mut Env<'_>) -> Result<(), SyntaxErrorKind> {
	let result = {
		let mut scoped = command.env_for(env);
		command.run(&mut scoped)
	};

	let code = match &result {
		Ok(code) => *code,
		Err(error) => error.exit_code(),
	};
	env.vars.set("?", code.to_string());

	match result {
		Ok(0) => Ok(()),
		Ok(code) => {
			Err(SyntaxErrorKind::ExitStatus {
				command: command.to_string(),
				code,
			})
		}
		Err(source) => {
			Err(SyntaxErrorKind::CommandFailed {
				command: command.to_string(),
				code,
				source,
			})
		}
	}
}

/// Parse an example command line. Arguments may be inline files, each of
/// which is run and replaced by its file name; `next_id` supplies the ids.
pub fn parse_invocation<'a>(
	start: Cursor<'a>,
	files: &mut MemoryFs,
	next_id: &mut usize,
) -> Scan<'a, (Command, Span<'a>)> {
	parse_command_with(start, |cursor| {
		match parse_inline_file(cursor, *next_id, files) {
			Scan::Matched(name, next) => {
				*next_id += 1;
				Scan::Matched(name, next)
			}
			Scan::NoMatch => parse_string(cursor),
			Scan::Error(error) => Scan::Error(error),
		}
	})
}
