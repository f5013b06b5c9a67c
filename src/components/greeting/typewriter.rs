//! Character-by-character text reveal.

/// Reveals `text` one character per step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typewriter {
	text: String,
	/// Byte offset of the end of the revealed prefix. Always on a char boundary.
	cursor: usize,
}

impl Typewriter {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			cursor: 0,
		}
	}

	/// Reveals the next character. Returns `false` once nothing is left.
	pub fn step(&mut self) -> bool {
		match self.text[self.cursor..].chars().next() {
			Some(c) => {
				self.cursor += c.len_utf8();
				true
			}
			None => false,
		}
	}

	pub fn skip(&mut self) {
		self.cursor = self.text.len();
	}

	pub fn revealed(&self) -> &str {
		&self.text[..self.cursor]
	}

	pub fn lines(&self) -> impl Iterator<Item = &str> {
		self.revealed().split('\n')
	}

	pub fn is_done(&self) -> bool {
		self.cursor == self.text.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reveals_whole_characters() {
		let mut tw = Typewriter::new("a💕b");
		assert_eq!(tw.revealed(), "");
		assert!(tw.step());
		assert_eq!(tw.revealed(), "a");
		assert!(tw.step());
		assert_eq!(tw.revealed(), "a💕");
		assert!(tw.step());
		assert!(tw.is_done());
		assert!(!tw.step());
	}

	#[test]
	fn lines_split_on_newlines() {
		let mut tw = Typewriter::new("dear\n\nlove");
		tw.skip();
		assert_eq!(tw.lines().collect::<Vec<_>>(), vec!["dear", "", "love"]);
	}
}
