use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::DocError;
use crate::DocResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["hebfmt.toml", ".hebfmt.toml", ".config/hebfmt.toml"];

/// The program name example command lines must invoke.
pub const DEFAULT_PROGRAM: &str = "hebfmt";

/// How documentation examples are recognised.
///
/// ```toml
/// [doccheck]
/// program = "hebfmt"
/// documents = ["README.md", "docs/templates.md"]
/// shell_tags = ["sh", "console"]
///
/// [doccheck.file_types]
/// text = ".txt"
/// json = ".json"
/// tmpl = ".tmpl"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocCheckConfig {
	/// The token an example's `$ ` line must contain to be run.
	pub program: String,
	/// Markdown files to check, relative to the project root.
	pub documents: Vec<PathBuf>,
	/// Info-string tags marking example shell sessions.
	pub shell_tags: Vec<String>,
	/// Info-string tag to the extension a quoted file name must carry.
	pub file_types: BTreeMap<String, String>,
}

impl Default for DocCheckConfig {
	fn default() -> Self {
		Self {
			program: DEFAULT_PROGRAM.to_string(),
			documents: vec![PathBuf::from("README.md")],
			shell_tags: ["sh", "shell", "console"].map(String::from).to_vec(),
			file_types: [("text", ".txt"), ("json", ".json"), ("tmpl", ".tmpl")]
				.into_iter()
				.map(|(tag, extension)| (tag.to_string(), extension.to_string()))
				.collect(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
	#[serde(default)]
	doccheck: DocCheckConfig,
}

impl DocCheckConfig {
	/// Resolve the first config file that exists in `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if there is none.
	pub fn load(root: &Path) -> DocResult<Option<Self>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let file: ConfigFile =
			toml::from_str(&content).map_err(|e| DocError::ConfigParse(e.to_string()))?;

		Ok(Some(file.doccheck))
	}

	/// Like [`DocCheckConfig::load`], falling back to the defaults.
	pub fn load_or_default(root: &Path) -> DocResult<Self> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	pub fn is_shell_tag(&self, tag: &str) -> bool {
		self.shell_tags.iter().any(|shell_tag| shell_tag == tag)
	}

	pub fn extension_for(&self, tag: &str) -> Option<&str> {
		self.file_types.get(tag).map(String::as_str)
	}
}
