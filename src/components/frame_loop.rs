//! `requestAnimationFrame` driver shared by the canvas and the page state.
//!
//! The loop re-schedules itself after every frame until its [`LoopHandle`] is
//! stopped. The first frame that observes the stop runs the teardown hook and
//! does not schedule another frame.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use wasm_bindgen::prelude::*;

/// Stops a running frame loop. Cheap to clone and safe to move into cleanup hooks.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
	// Atomic: `on_cleanup` takes `Send + Sync` closures.
	stopped: Arc<AtomicBool>,
}

impl LoopHandle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn stop(&self) {
		self.stopped.store(true, Ordering::Relaxed);
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped.load(Ordering::Relaxed)
	}
}

/// Calls `on_frame` with the frame timestamp (ms) once per display refresh.
///
/// Returns `false` if there is no window to schedule on.
pub fn start(
	handle: &LoopHandle,
	mut on_frame: impl FnMut(f64) + 'static,
	on_stop: impl FnOnce() + 'static,
) -> bool {
	let Some(window) = web_sys::window() else {
		warn!("night-sky: no window, frame loop not started");
		return false;
	};

	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let animate_inner = animate.clone();
	let handle = handle.clone();
	let mut on_stop = Some(on_stop);
	let window_inner = window.clone();

	*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
		if handle.is_stopped() {
			if let Some(teardown) = on_stop.take() {
				teardown();
				debug!("night-sky: frame loop stopped");
			}
			return;
		}

		on_frame(now);

		if let Some(ref cb) = *animate_inner.borrow() {
			let _ = window_inner.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));

	if let Some(ref cb) = *animate.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn handle_clones_share_stop_flag() {
		let handle = LoopHandle::new();
		let other = handle.clone();
		assert!(!other.is_stopped());
		handle.stop();
		assert!(other.is_stopped());
	}
}
