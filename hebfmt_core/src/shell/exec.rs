use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::io::Write;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::Position;
use crate::ShellError;
use crate::shell::quote;

/// Shell variables. Iteration and rendering are sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Vars(BTreeMap<String, String>);

impl Vars {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.insert(name.into(), value.into());
	}
}

impl Display for Vars {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (index, (name, value)) in self.0.iter().enumerate() {
			if index > 0 {
				f.write_str(" ")?;
			}

			write!(f, "{name}={}", quote(value))?;
		}

		Ok(())
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Vars {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, value)| (name.into(), value.into()))
				.collect(),
		)
	}
}

/// Output sinks available to a running command.
pub trait Streams {
	fn stdout(&mut self) -> &mut dyn Write;
	fn stderr(&mut self) -> &mut dyn Write;
}

/// Captures stdout and stderr into a single buffer, in write order.
#[derive(Debug, Default)]
pub struct Capture(Vec<u8>);

impl Capture {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.0
	}
}

impl Streams for Capture {
	fn stdout(&mut self) -> &mut dyn Write {
		&mut self.0
	}

	fn stderr(&mut self) -> &mut dyn Write {
		&mut self.0
	}
}

/// The context a command runs in.
pub struct Env<'a> {
	/// Where the command was written, for diagnostics.
	pub position: Position,
	pub vars: Vars,
	streams: &'a mut dyn Streams,
}

impl<'a> Env<'a> {
	pub fn new(position: Position, streams: &'a mut dyn Streams) -> Self {
		Self {
			position,
			vars: Vars::new(),
			streams,
		}
	}

	/// A subshell: the child sees a copy of the variables, so nothing it
	/// sets leaks back into this env. Output goes to the same streams.
	pub fn child(&mut self) -> Env<'_> {
		Env {
			position: self.position.clone(),
			vars: self.vars.clone(),
			streams: &mut *self.streams,
		}
	}

	pub fn stdout(&mut self) -> &mut dyn Write {
		self.streams.stdout()
	}

	pub fn stderr(&mut self) -> &mut dyn Write {
		self.streams.stderr()
	}
}

impl fmt::Debug for Env<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Env")
			.field("position", &self.position)
			.field("vars", &self.vars)
			.finish_non_exhaustive()
	}
}

pub(crate) type Builtin = fn(&[String], &mut Env<'_>) -> Result<i32, ShellError>;

const BUILTINS: &[(&str, Builtin)] = &[("echo", echo)];

pub(crate) fn builtin(name: &str) -> Option<Builtin> {
	BUILTINS
		.iter()
		.find(|(builtin, _)| *builtin == name)
		.map(|(_, run)| *run)
}

/// Names of every built-in command.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
	BUILTINS.iter().map(|(name, _)| *name)
}

fn echo(args: &[String], env: &mut Env<'_>) -> Result<i32, ShellError> {
	writeln!(env.stdout(), "{}", args.join(" "))?;
	Ok(0)
}
