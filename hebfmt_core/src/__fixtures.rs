use std::io;
use std::io::Read;
use std::sync::Arc;

use crate::FileSystem;
use crate::FsError;
use crate::LineInfo;
use crate::MemoryFs;

pub const FILE: &str = "README.md";

pub fn line(text: &str) -> Arc<LineInfo> {
	line_at(text, 1)
}

pub fn line_at(text: &str, number: usize) -> Arc<LineInfo> {
	LineInfo::new(text, FILE, number)
}

pub fn raw_line(bytes: &[u8]) -> Arc<LineInfo> {
	LineInfo::new(bytes, FILE, 1)
}

pub fn memory_fs(files: &[(&str, &str)]) -> MemoryFs {
	let mut fs = MemoryFs::new();
	for (path, content) in files {
		fs.insert(*path, *content);
	}
	fs
}

/// A layer that fails every open with a permission error.
pub struct LockedFs;

impl FileSystem for LockedFs {
	fn open(&self, path: &str) -> Result<Box<dyn Read + '_>, FsError> {
		Err(FsError::Io {
			path: path.into(),
			source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
		})
	}
}

pub const README: &str = r#"# hebfmt

Print the Hebrew year:

```sh
$ hebfmt --template '{{.Year}}' <(echo 5784-01-01)
5784
```

Given `holidays.tmpl`:

```tmpl
{{range .Holidays}}{{.Name}}
{{end}}
```

Run it with a date list:

```console
$ TZ=Asia/Jerusalem hebfmt -f holidays.tmpl <(echo 5784-07-01; echo 5784-07-10)
Rosh Hashana
Yom Kippur
```

```sh
$ cargo build --release
```
"#;

pub const HOLIDAYS_TMPL: &str = "{{range .Holidays}}{{.Name}}\n{{end}}\n";
