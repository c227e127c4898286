use std::path::Path;

use assert_cmd::Command;
use hebfmt_core::AnyEmptyResult;

pub const HOLIDAYS_TMPL: &str = "{{range .Holidays}}{{.Name}}\n{{end}}\n";

pub const README: &str = "# hebfmt\n\n```sh\n$ hebfmt --template '{{.Year}}' <(echo \
                          5784-01-01)\n5784\n```\n\nGiven `holidays.tmpl`:\n\n```tmpl\n{{range \
                          .Holidays}}{{.Name}}\n{{end}}\n```\n";

pub fn hebfmt_cmd() -> Command {
	let mut cmd = Command::new(env!("CARGO_BIN_EXE_hebfmt"));
	cmd.env("NO_COLOR", "1").env_remove("HEBFMT_LOG");
	cmd
}

/// Write `files` below `root`, creating parent directories as needed.
pub fn write_files(root: &Path, files: &[(&str, &str)]) -> AnyEmptyResult {
	for (path, content) in files {
		let path = root.join(path);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)?;
	}

	Ok(())
}
