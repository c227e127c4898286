/// A constant-time membership test for ASCII bytes.
///
/// Bytes outside the ASCII range are never members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AsciiSet(u128);

impl AsciiSet {
	pub const fn new(members: &[u8]) -> Self {
		let mut bits = 0u128;
		let mut index = 0;

		while index < members.len() {
			let byte = members[index];
			assert!(byte.is_ascii(), "AsciiSet members must be ASCII");
			bits |= 1 << byte;
			index += 1;
		}

		Self(bits)
	}

	pub const fn contains(&self, byte: u8) -> bool {
		byte.is_ascii() && self.0 & (1 << byte) != 0
	}

	pub const fn contains_char(&self, ch: char) -> bool {
		ch.is_ascii() && self.contains(ch as u8)
	}

	pub const fn union(self, other: Self) -> Self {
		Self(self.0 | other.0)
	}
}
