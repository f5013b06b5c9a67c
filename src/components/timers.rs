//! Named deadlines checked once per frame.
//!
//! Frame-driven components keep their delayed work (spawn intervals, typing
//! cadence, intro staging) here instead of in timeout callbacks, so everything
//! happens inside the frame tick in a deterministic order.

/// A small set of deadlines keyed by `K`. At most one deadline per key.
#[derive(Clone, Debug)]
pub struct Timers<K> {
	deadlines: Vec<(K, f64)>,
}

impl<K> Default for Timers<K> {
	fn default() -> Self {
		Self {
			deadlines: Vec::new(),
		}
	}
}

impl<K: Copy + PartialEq> Timers<K> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Arm `key` to fire at `due_ms`, replacing any pending deadline for it.
	pub fn arm(&mut self, key: K, due_ms: f64) {
		self.cancel(key);
		self.deadlines.push((key, due_ms));
	}

	pub fn cancel(&mut self, key: K) {
		self.deadlines.retain(|(k, _)| *k != key);
	}

	pub fn is_armed(&self, key: K) -> bool {
		self.due(key).is_some()
	}

	pub fn due(&self, key: K) -> Option<f64> {
		self.deadlines
			.iter()
			.find(|(k, _)| *k == key)
			.map(|(_, due)| *due)
	}

	/// Disarm and return every deadline at or before `now_ms`, earliest first.
	pub fn poll(&mut self, now_ms: f64) -> Vec<(K, f64)> {
		let mut fired: Vec<(K, f64)> = Vec::new();
		self.deadlines.retain(|&(key, due)| {
			if due <= now_ms {
				fired.push((key, due));
				false
			} else {
				true
			}
		});
		fired.sort_by(|a, b| a.1.total_cmp(&b.1));
		fired
	}

	pub fn is_empty(&self) -> bool {
		self.deadlines.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Clone, Copy, Debug, PartialEq)]
	enum Key {
		A,
		B,
	}

	#[test]
	fn poll_returns_due_in_order() {
		let mut timers = Timers::new();
		timers.arm(Key::A, 30.0);
		timers.arm(Key::B, 10.0);
		assert!(timers.poll(5.0).is_empty());
		assert_eq!(timers.poll(30.0), vec![(Key::B, 10.0), (Key::A, 30.0)]);
		assert!(timers.is_empty());
	}

	#[test]
	fn rearming_replaces_deadline() {
		let mut timers = Timers::new();
		timers.arm(Key::A, 10.0);
		timers.arm(Key::A, 50.0);
		assert_eq!(timers.due(Key::A), Some(50.0));
		assert!(timers.poll(20.0).is_empty());
		timers.cancel(Key::A);
		assert!(!timers.is_armed(Key::A));
	}
}
