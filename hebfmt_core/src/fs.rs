//! Read-only filesystem layers used to resolve the files that documentation
//! examples refer to.

use std::collections::BTreeMap;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum FsError {
	#[error("open {path}: file does not exist")]
	#[diagnostic(code(hebfmt::fs::not_found))]
	NotFound { path: String },

	#[error("open {path}: {source}")]
	#[diagnostic(code(hebfmt::fs::io))]
	Io {
		path: String,
		#[source]
		source: io::Error,
	},

	#[error("layer {index}: {source}")]
	#[diagnostic(code(hebfmt::fs::layer))]
	Layer {
		index: usize,
		#[source]
		source: Box<FsError>,
	},
}

impl FsError {
	pub fn is_not_found(&self) -> bool {
		match self {
			Self::NotFound { .. } => true,
			Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
			Self::Layer { .. } => false,
		}
	}

	fn io(path: &str, source: io::Error) -> Self {
		if source.kind() == io::ErrorKind::NotFound {
			Self::NotFound { path: path.into() }
		} else {
			Self::Io {
				path: path.into(),
				source,
			}
		}
	}
}

/// Something files can be opened from.
pub trait FileSystem {
	fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, FsError>;

	/// Read the whole file at `path`.
	fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
		let mut reader = self.open(path)?;
		let mut content = Vec::new();
		reader
			.read_to_end(&mut content)
			.map_err(|source| FsError::io(path, source))?;

		Ok(content)
	}
}

/// The real filesystem below `root`.
#[derive(Debug, Clone)]
pub struct DiskFs {
	root: PathBuf,
}

impl DiskFs {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl FileSystem for DiskFs {
	fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, FsError> {
		let full_path = self.root.join(path.trim_start_matches('/'));
		tracing::trace!(path = %full_path.display(), "opening file on disk");

		let file = std::fs::File::open(&full_path).map_err(|source| FsError::io(path, source))?;
		Ok(Box::new(file))
	}
}

/// Files held in memory, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct MemoryFs(BTreeMap<String, Vec<u8>>);

impl MemoryFs {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
		self.0.insert(path.into(), content.into());
	}
}

impl FileSystem for MemoryFs {
	fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, FsError> {
		match self.0.get(path) {
			Some(content) => Ok(Box::new(content.as_slice())),
			None => {
				Err(FsError::NotFound {
					path: path.into(),
				})
			}
		}
	}
}

/// Layers consulted in order; the first layer that has the file wins.
///
/// A layer that reports anything other than "not found" stops the lookup and
/// the error is tagged with the index of that layer.
#[derive(Default)]
pub struct OverlayFs<'a> {
	layers: Vec<&'a dyn FileSystem>,
}

impl<'a> OverlayFs<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_layer(mut self, layer: &'a dyn FileSystem) -> Self {
		self.layers.push(layer);
		self
	}

	pub fn push(&mut self, layer: &'a dyn FileSystem) {
		self.layers.push(layer);
	}

	pub fn len(&self) -> usize {
		self.layers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}
}

impl FileSystem for OverlayFs<'_> {
	fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, FsError> {
		for (index, layer) in self.layers.iter().enumerate() {
			match layer.open(path) {
				Ok(reader) => {
					tracing::trace!(path, index, "resolved through overlay layer");
					return Ok(reader);
				}
				Err(error) if error.is_not_found() => {}
				Err(error) => {
					return Err(FsError::Layer {
						index,
						source: Box::new(error),
					});
				}
			}
		}

		Err(FsError::NotFound { path: path.into() })
	}
}
