use crate::Cursor;
use crate::Scan;
use crate::scan::matched;
use crate::shell::parse_string;

/// Parse a variable name, `[A-Za-z_][A-Za-z_0-9]*`.
pub fn parse_identifier(start: Cursor<'_>) -> Scan<'_, String> {
	let mut cursor = start;
	let mut name = String::new();

	while let Some(decoded) = cursor.next_char() {
		let (ch, len) = match decoded {
			Ok(decoded) => decoded,
			Err(invalid) => return Scan::Error(cursor.invalid_encoding(invalid)),
		};

		let allowed = ch == '_' || ch.is_ascii_alphabetic() || (!name.is_empty() && ch.is_ascii_digit());
		if !allowed {
			break;
		}

		name.push(ch);
		cursor = cursor.advance(len);
	}

	if name.is_empty() {
		Scan::NoMatch
	} else {
		Scan::Matched(name, cursor)
	}
}

/// Parse a `KEY=VALUE` binding. The value may be empty (`KEY=`).
///
/// Without the `=` this is a no-match and the identifier is left for the
/// caller to reinterpret, usually as a command name.
pub fn parse_assignment(start: Cursor<'_>) -> Scan<'_, (String, String)> {
	let (name, cursor) = matched!(parse_identifier(start));

	if cursor.peek() != Some(b'=') {
		return Scan::NoMatch;
	}

	let cursor = cursor.advance(1);

	match parse_string(cursor) {
		Scan::Matched(value, next) => Scan::Matched((name, value), next),
		Scan::NoMatch => Scan::Matched((name, String::new()), cursor),
		Scan::Error(error) => Scan::Error(error),
	}
}
