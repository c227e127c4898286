use std::borrow::Cow;

use crate::AsciiSet;
use crate::Cursor;
use crate::Scan;
use crate::SyntaxErrorKind;

/// Bytes that end a bare word unless escaped with a backslash: whitespace
/// and the shell metacharacters this dialect refuses to interpret.
pub const SPECIALS: AsciiSet = AsciiSet::new(b" \t\n\r\x0b\x0c\"'\\|&;<>()$`*?[]{}#~!");

/// Parse a `"double quoted"` string.
///
/// `\n`, `\r` and `\t` become control characters and any other escaped
/// character is taken literally.
pub fn parse_double_quoted(start: Cursor<'_>) -> Scan<'_, String> {
	if start.peek() != Some(b'"') {
		return Scan::NoMatch;
	}

	let mut cursor = start.advance(1);
	let mut value = String::new();

	loop {
		let (ch, len) = match cursor.next_char() {
			None => return Scan::Error(start.error_to_end(SyntaxErrorKind::UnterminatedString)),
			Some(Err(invalid)) => return Scan::Error(cursor.invalid_encoding(invalid)),
			Some(Ok(decoded)) => decoded,
		};

		let at = cursor;
		cursor = cursor.advance(len);

		match ch {
			'"' => return Scan::Matched(value, cursor),
			'\\' => {
				let (escaped, len) = match cursor.next_char() {
					None => return Scan::Error(at.error(SyntaxErrorKind::TrailingBackslash)),
					Some(Err(invalid)) => return Scan::Error(cursor.invalid_encoding(invalid)),
					Some(Ok(decoded)) => decoded,
				};

				value.push(match escaped {
					'n' => '\n',
					'r' => '\r',
					't' => '\t',
					other => other,
				});
				cursor = cursor.advance(len);
			}
			_ => value.push(ch),
		}
	}
}

/// Parse a `'single quoted'` string. The content is taken verbatim.
pub fn parse_single_quoted(start: Cursor<'_>) -> Scan<'_, String> {
	if start.peek() != Some(b'\'') {
		return Scan::NoMatch;
	}

	let body = start.advance(1);
	let Some(len) = body.rest().iter().position(|&byte| byte == b'\'') else {
		return Scan::Error(start.error_to_end(SyntaxErrorKind::UnterminatedString));
	};

	let value = String::from_utf8_lossy(&body.rest()[..len]).into_owned();
	Scan::Matched(value, body.advance(len + 1))
}

/// Parse a bare word up to the first unescaped member of [`SPECIALS`].
pub fn parse_raw(start: Cursor<'_>) -> Scan<'_, String> {
	let mut cursor = start;
	let mut value = String::new();

	while let Some(byte) = cursor.peek() {
		if byte == b'\\' {
			let at = cursor;
			cursor = cursor.advance(1);

			match cursor.next_char() {
				None => return Scan::Error(at.error(SyntaxErrorKind::TrailingBackslash)),
				Some(Err(invalid)) => return Scan::Error(cursor.invalid_encoding(invalid)),
				Some(Ok((ch, len))) => {
					value.push(ch);
					cursor = cursor.advance(len);
				}
			}

			continue;
		}

		if SPECIALS.contains(byte) {
			break;
		}

		match cursor.next_char() {
			Some(Ok((ch, len))) => {
				value.push(ch);
				cursor = cursor.advance(len);
			}
			Some(Err(invalid)) => return Scan::Error(cursor.invalid_encoding(invalid)),
			None => break,
		}
	}

	if cursor == start {
		Scan::NoMatch
	} else {
		Scan::Matched(value, cursor)
	}
}

/// Parse adjacent double-quoted, single-quoted and bare segments as one
/// string, e.g. `--name="Rosh Hashanah"'!'` is `--name=Rosh Hashanah!`.
///
/// An empty value only matches when at least one quoted segment was seen.
pub fn parse_string(start: Cursor<'_>) -> Scan<'_, String> {
	let mut cursor = start;
	let mut value = String::new();
	let mut delimited = false;

	loop {
		let segment = match cursor.peek() {
			Some(b'"') => {
				delimited = true;
				parse_double_quoted(cursor)
			}
			Some(b'\'') => {
				delimited = true;
				parse_single_quoted(cursor)
			}
			_ => parse_raw(cursor),
		};

		match segment {
			Scan::Matched(part, next) => {
				value.push_str(&part);
				cursor = next;
			}
			Scan::NoMatch => break,
			Scan::Error(error) => return Scan::Error(error),
		}
	}

	if cursor == start || (value.is_empty() && !delimited) {
		Scan::NoMatch
	} else {
		Scan::Matched(value, cursor)
	}
}

/// Render `value` so that [`parse_string`] reads it back unchanged.
pub fn quote(value: &str) -> Cow<'_, str> {
	if !value.is_empty() && !value.bytes().any(|byte| SPECIALS.contains(byte)) {
		Cow::Borrowed(value)
	} else {
		Cow::Owned(double_quote(value))
	}
}

/// Render `value` as a double-quoted string, escaping as needed.
pub fn double_quote(value: &str) -> String {
	let mut quoted = String::with_capacity(value.len() + 2);
	quoted.push('"');

	for ch in value.chars() {
		match ch {
			'"' => quoted.push_str("\\\""),
			'\\' => quoted.push_str("\\\\"),
			'\n' => quoted.push_str("\\n"),
			'\r' => quoted.push_str("\\r"),
			'\t' => quoted.push_str("\\t"),
			_ => quoted.push(ch),
		}
	}

	quoted.push('"');
	quoted
}
