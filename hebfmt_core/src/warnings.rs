use std::fmt;
use std::fmt::Display;

use derive_more::Deref;

use crate::DocError;
use crate::DocResult;
use crate::SyntaxError;

/// Soft diagnostics collected while parsing. Warnings never abort a parse;
/// they are reported together once the document has been processed.
#[derive(Debug, Default, Deref)]
pub struct Warnings(Vec<SyntaxError>);

impl Warnings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, warning: SyntaxError) {
		tracing::debug!(warning = %warning.header(), "collected warning");
		self.0.push(warning);
	}

	pub fn extend(&mut self, other: Warnings) {
		self.0.extend(other.0);
	}

	pub fn into_vec(self) -> Vec<SyntaxError> {
		self.0
	}

	/// Fail with all collected warnings as one error, if there are any.
	pub fn into_result(self) -> DocResult<()> {
		if self.0.is_empty() {
			Ok(())
		} else {
			Err(DocError::Warnings(self))
		}
	}

	/// Attach the collected warnings to a terminal hard error.
	pub fn join(self, error: DocError) -> DocError {
		if self.0.is_empty() {
			error
		} else {
			DocError::WithWarnings {
				warnings: self,
				error: Box::new(error),
			}
		}
	}
}

impl Display for Warnings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let count = self.0.len();
		write!(f, "{count} warning{}:", if count == 1 { "" } else { "s" })?;

		for warning in &self.0 {
			write!(f, "\n\n{warning}")?;
		}

		Ok(())
	}
}

impl From<Vec<SyntaxError>> for Warnings {
	fn from(warnings: Vec<SyntaxError>) -> Self {
		Self(warnings)
	}
}
