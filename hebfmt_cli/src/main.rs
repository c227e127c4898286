use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use clap::Parser;
use hebfmt_cli::Commands;
use hebfmt_cli::HebfmtCli;
use hebfmt_cli::OutputFormat;
use hebfmt_core::DocCheckConfig;
use hebfmt_core::DocError;
use hebfmt_core::DocReport;
use hebfmt_core::SyntaxError;
use hebfmt_core::check_project;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: AtomicBool = AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = HebfmtCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Check {
			format,
			deny_warnings,
		}) => run_check(&args, format, deny_warnings),
		Some(Commands::List { format }) => run_list(&args, format),
		None => {
			eprintln!("No subcommand specified. Run `hebfmt --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<DocError>() {
			Ok(doc_err) => {
				let report: miette::Report = (*doc_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `HEBFMT_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env("HEBFMT_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.try_init();
}

fn resolve_root(args: &HebfmtCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_reports(args: &HebfmtCli) -> Result<Vec<DocReport>, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = DocCheckConfig::load_or_default(&root)?;
	tracing::debug!(root = %root.display(), documents = config.documents.len(), "checking project");

	Ok(check_project(&config, &root)?)
}

fn run_check(
	args: &HebfmtCli,
	format: OutputFormat,
	deny_warnings: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let reports = load_reports(args)?;
	let warning_count: usize = reports.iter().map(|report| report.warnings.len()).sum();

	match format {
		OutputFormat::Json => {
			let output = CheckOutput {
				ok: warning_count == 0 || !deny_warnings,
				documents: reports.iter().map(DocumentOutput::from).collect(),
			};
			println!("{}", serde_json::to_string(&output)?);
		}
		OutputFormat::Text => {
			for report in &reports {
				print_warnings(report.warnings.iter());
				println!(
					"{} {}: {} example(s), {} quoted file(s)",
					colored!("ok", green),
					report.file,
					report.examples.len(),
					report.quoted_files.len()
				);
			}

			let examples: usize = reports.iter().map(|report| report.examples.len()).sum();
			println!(
				"Check passed: {examples} example(s) across {} document(s).",
				reports.len()
			);
		}
	}

	if deny_warnings && warning_count > 0 {
		eprintln!(
			"{} {warning_count} warning(s) reported with --deny-warnings",
			colored!("error:", red)
		);
		process::exit(1);
	}

	Ok(())
}

fn run_list(args: &HebfmtCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let reports = load_reports(args)?;

	if let OutputFormat::Json = format {
		let documents: Vec<DocumentOutput> = reports.iter().map(DocumentOutput::from).collect();
		println!("{}", serde_json::to_string(&documents)?);
		return Ok(());
	}

	for report in &reports {
		println!("{}", colored!(report.file, bold));

		if report.examples.is_empty() && report.quoted_files.is_empty() {
			println!("  no examples found");
		}

		for example in &report.examples {
			println!("  {:>4}  $ {}", example.line, example.command);
		}

		for quoted in &report.quoted_files {
			println!("  {:>4}  {} ({})", quoted.line, quoted.path, quoted.tag);
		}
	}

	Ok(())
}

fn print_warnings<'a>(warnings: impl Iterator<Item = &'a SyntaxError>) {
	for warning in warnings {
		eprintln!("{} {warning}\n", colored!("warning:", yellow));
	}
}

#[derive(Serialize)]
struct CheckOutput<'a> {
	ok: bool,
	documents: Vec<DocumentOutput<'a>>,
}

#[derive(Serialize)]
struct DocumentOutput<'a> {
	file: &'a str,
	examples: Vec<ExampleOutput>,
	quoted_files: Vec<QuotedFileOutput<'a>>,
	warnings: Vec<WarningOutput>,
}

#[derive(Serialize)]
struct ExampleOutput {
	line: usize,
	command: String,
	expected_output: String,
}

#[derive(Serialize)]
struct QuotedFileOutput<'a> {
	line: usize,
	path: &'a str,
	tag: &'a str,
}

#[derive(Serialize)]
struct WarningOutput {
	line: usize,
	column: usize,
	message: String,
}

impl<'a> From<&'a DocReport> for DocumentOutput<'a> {
	fn from(report: &'a DocReport) -> Self {
		Self {
			file: &report.file,
			examples: report
				.examples
				.iter()
				.map(|example| {
					ExampleOutput {
						line: example.line,
						command: example.command.to_string(),
						expected_output: String::from_utf8_lossy(&example.expected_output)
							.into_owned(),
					}
				})
				.collect(),
			quoted_files: report
				.quoted_files
				.iter()
				.map(|quoted| {
					QuotedFileOutput {
						line: quoted.line,
						path: &quoted.path,
						tag: &quoted.tag,
					}
				})
				.collect(),
			warnings: report
				.warnings
				.iter()
				.map(|warning| {
					WarningOutput {
						line: warning.line_number(),
						column: warning.col_start(),
						message: warning.kind().to_string(),
					}
				})
				.collect(),
		}
	}
}
