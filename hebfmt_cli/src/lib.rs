use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Verify the worked examples in the hebfmt documentation.",
	long_about = "hebfmt checks that the examples in its own documentation still hold.\n\nShell \
	              sessions starting with `$ hebfmt` are parsed with a small shell dialect and \
	              their `<( ... )` inline files are run. Blocks quoting a project file are \
	              compared with the file on disk.\n\nQuick start:\n  hebfmt check  Verify \
	              every configured document\n  hebfmt list   Show the examples that were found"
)]
pub struct HebfmtCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output. Logging can be tuned further with `HEBFMT_LOG`.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Check every configured document.
	///
	/// Parses each example command line, runs its inline files and compares
	/// quoted files with the project tree. Exits with code 2 on the first
	/// error. Warnings about malformed code fences are printed but only fail
	/// the check with `--deny-warnings`.
	Check {
		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,

		/// Exit with code 1 when any warning was reported.
		#[arg(long, default_value_t = false)]
		deny_warnings: bool,
	},
	/// List the examples and quoted files found in each document.
	List {
		/// Output format for the listing.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	Text,
	Json,
}
