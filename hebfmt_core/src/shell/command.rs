use std::fmt;
use std::fmt::Display;

use crate::Cursor;
use crate::Scan;
use crate::ShellError;
use crate::Span;
use crate::SyntaxErrorKind;
use crate::shell::Env;
use crate::shell::Vars;
use crate::shell::builtin;
use crate::shell::double_quote;
use crate::shell::parse_assignment;
use crate::shell::parse_string;
use crate::shell::quote;

/// A simple command: `[KEY=VALUE]... name [arg]...`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
	pub name: String,
	/// Assignments that apply to this command only.
	pub envs: Vars,
	pub args: Vec<String>,
}

impl Command {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.envs.set(name, value);
		self
	}

	#[must_use]
	pub fn arg(mut self, arg: impl Into<String>) -> Self {
		self.args.push(arg.into());
		self
	}

	/// A child of `env` with this command's assignments layered on top.
	pub fn env_for<'e>(&self, env: &'e mut Env<'_>) -> Env<'e> {
		let mut child = env.child();
		child
			.vars
			.extend(self.envs.iter().map(|(name, value)| (name.clone(), value.clone())));
		child
	}

	/// Run the command against the built-in table and return its exit code.
	///
	/// The caller is expected to have merged [`Command::envs`] into `env`, see
	/// [`Command::env_for`].
	pub fn run(&self, env: &mut Env<'_>) -> Result<i32, ShellError> {
		let Some(run) = builtin(&self.name) else {
			return Err(ShellError::UnknownCommand(self.name.clone()));
		};

		tracing::debug!(command = %self, "running builtin");
		run(&self.args, env)
	}
}

impl Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if !self.envs.is_empty() {
			write!(f, "{} ", self.envs)?;
		}

		// A bare `a=b` would read back as an assignment.
		if self.name.contains('=') {
			f.write_str(&double_quote(&self.name))?;
		} else {
			write!(f, "{}", quote(&self.name))?;
		}

		for arg in &self.args {
			write!(f, " {}", quote(arg))?;
		}

		Ok(())
	}
}

/// Parse a command. The returned span covers the command name.
pub fn parse_command(start: Cursor<'_>) -> Scan<'_, (Command, Span<'_>)> {
	parse_command_with(start, parse_string)
}

/// Parse a command, reading each argument with `parse_arg`.
pub(crate) fn parse_command_with<'a>(
	start: Cursor<'a>,
	mut parse_arg: impl FnMut(Cursor<'a>) -> Scan<'a, String>,
) -> Scan<'a, (Command, Span<'a>)> {
	let mut envs = Vars::new();
	let mut cursor = start;

	loop {
		match parse_assignment(cursor) {
			Scan::Matched((name, value), next) => {
				envs.set(name, value);
				cursor = next.skip_whitespace();
			}
			Scan::NoMatch => break,
			Scan::Error(error) => return Scan::Error(error),
		}
	}

	let name_start = cursor;
	let (name, mut cursor) = match parse_string(cursor) {
		Scan::Matched(name, next) => (name, next),
		Scan::NoMatch if envs.is_empty() => return Scan::NoMatch,
		Scan::NoMatch => return Scan::Error(cursor.error(SyntaxErrorKind::ExpectedCommand)),
		Scan::Error(error) => return Scan::Error(error),
	};
	let span = Span::new(name_start, cursor);

	let mut args = Vec::new();
	loop {
		let next = cursor.skip_whitespace();
		if next == cursor {
			break;
		}

		match parse_arg(next) {
			Scan::Matched(arg, after) => {
				args.push(arg);
				cursor = after;
			}
			Scan::NoMatch => break,
			Scan::Error(error) => return Scan::Error(error),
		}
	}

	Scan::Matched((Command { name, envs, args }, span), cursor)
}
