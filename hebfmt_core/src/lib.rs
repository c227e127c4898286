//! `hebfmt_core` keeps the worked examples in the hebfmt documentation
//! honest. It finds fenced code blocks in markdown, parses the example
//! command lines with a tiny shell dialect, runs their `<( ... )` inline files
//! and checks quoted files against the project tree.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown document
//!   → line scanner (one LineInfo per physical line)
//!   → FencedBlock (backtick/tilde fences, info strings, soft warnings)
//!   → shell dialect (strings, assignments, commands, <( ... ) inline files)
//!   → OverlayFs (inline files over the real project tree)
//!   → DocReport (examples, verified quoted files, warnings)
//! ```
//!
//! ## Modules
//!
//! - [`shell`]: string, identifier and command parsers for the shell
//!   dialect, the built-in command table and process substitution.
//! - [`readme`]: example extraction and quoted file verification.
//! - [`config`]: `hebfmt.toml` loading.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hebfmt_core::DocCheckConfig;
//! use hebfmt_core::check_project;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = DocCheckConfig::load_or_default(root).unwrap();
//!
//! for report in check_project(&config, root).unwrap() {
//! 	println!("{}: {} example(s)", report.file, report.examples.len());
//! }
//! ```

pub use ascii_set::*;
pub use config::*;
pub use error::*;
pub use fence::*;
pub use fs::*;
pub use position::*;
pub use readme::*;
pub use scan::*;
pub use syntax_error::*;
pub use warnings::*;

mod ascii_set;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod fence;
mod fs;
mod position;
pub mod readme;
mod scan;
pub mod shell;
mod syntax_error;
mod warnings;

#[cfg(test)]
mod __fixtures;
