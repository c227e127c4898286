//! A deliberately small shell dialect for documentation examples.
//!
//! Supported: bare words, `"double"` and `'single'` quoted strings joined by
//! adjacency, `KEY=VALUE` prefixes, and `<( ... )` process substitution over
//! a closed table of built-in commands. Pipes, redirections, globs, `$(...)`,
//! backticks and history expansion are not part of the dialect.

pub use command::*;
pub use exec::*;
pub use ident::*;
pub use inline_file::*;
pub use string::*;

mod command;
mod exec;
mod ident;
mod inline_file;
mod string;
