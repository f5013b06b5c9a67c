//! The particle field: a fixed pool of ambient particles plus a small pool of
//! shooting stars, advanced once per frame.
//!
//! The field owns its random source, so a seeded field fed the same frame
//! timestamps always produces the same frames.

use fastrand::Rng;
use log::{debug, warn};

use super::particles::{AccentParticle, AmbientParticle, sample};
use super::render;
use super::surface::Surface;
use super::theme::{FieldStyle, FieldVariant};
use crate::components::timers::Timers;

/// Duration of one display frame at 60 Hz. Twinkle speeds are per frame.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Viewports narrower than this get the reduced particle density.
pub const NARROW_VIEWPORT_PX: f64 = 768.0;

/// Phone-scale viewport heuristic.
pub fn is_narrow_viewport(width: f64) -> bool {
	width < NARROW_VIEWPORT_PX
}

/// Deadlines owned by the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldTimer {
	AccentSpawn,
}

/// Ambient particles and shooting stars for one canvas.
pub struct ParticleField {
	style: FieldStyle,
	width: f64,
	height: f64,
	ambient: Vec<AmbientParticle>,
	accents: Vec<AccentParticle>,
	pointer: (f64, f64),
	timers: Timers<FieldTimer>,
	rng: Rng,
	frame: f64,
}

impl ParticleField {
	/// Creates a field sized to the viewport. Dimensions below one pixel clamp to one.
	/// An inverted or out-of-range opacity band is repaired here, once.
	pub fn new(width: f64, height: f64, narrow: bool, mut style: FieldStyle, mut rng: Rng) -> Self {
		let (width, height) = clamp_size(width, height);
		let twinkle = style.twinkle.normalized();
		if twinkle != style.twinkle {
			warn!(
				"night-sky: opacity band [{}, {}] repaired to [{}, {}]",
				style.twinkle.opacity_min,
				style.twinkle.opacity_max,
				twinkle.opacity_min,
				twinkle.opacity_max
			);
			style.twinkle = twinkle;
		}
		let count = if narrow {
			style.density.narrow
		} else {
			style.density.normal
		};

		let ambient = (0..count)
			.map(|_| AmbientParticle::random(&mut rng, &style.ambient, &style.palette, width, height))
			.collect();

		Self {
			style,
			width,
			height,
			ambient,
			accents: Vec::new(),
			pointer: (0.0, 0.0),
			timers: Timers::new(),
			rng,
			frame: 0.0,
		}
	}

	/// Same as [`ParticleField::new`] with a deterministic random source.
	pub fn with_seed(width: f64, height: f64, narrow: bool, style: FieldStyle, seed: u64) -> Self {
		Self::new(width, height, narrow, style, Rng::with_seed(seed))
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn style(&self) -> &FieldStyle {
		&self.style
	}

	pub fn ambient(&self) -> &[AmbientParticle] {
		&self.ambient
	}

	pub fn accents(&self) -> &[AccentParticle] {
		&self.accents
	}

	pub fn active_accents(&self) -> usize {
		self.accents.iter().filter(|a| a.active).count()
	}

	pub fn pointer(&self) -> (f64, f64) {
		self.pointer
	}

	/// Resizes the drawing area. Particles keep their positions and count.
	pub fn resize(&mut self, width: f64, height: f64) {
		let (width, height) = clamp_size(width, height);
		debug!(
			"night-sky: field resized {}x{} -> {}x{}",
			self.width, self.height, width, height
		);
		self.width = width;
		self.height = height;
	}

	/// Records the normalized pointer offset; applied on the next tick.
	pub fn set_pointer(&mut self, nx: f64, ny: f64) {
		let axis = |v: f64| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
		self.pointer = (axis(nx), axis(ny));
	}

	/// Re-randomizes every ambient particle in place.
	pub fn reset(&mut self) {
		for p in &mut self.ambient {
			*p = AmbientParticle::random(
				&mut self.rng,
				&self.style.ambient,
				&self.style.palette,
				self.width,
				self.height,
			);
		}
	}

	/// Advances the field to `now_ms` (host frame timestamp).
	pub fn tick(&mut self, now_ms: f64) {
		self.frame = now_ms / FRAME_MS;

		let pointer = match self.style.variant {
			FieldVariant::Starry => self.pointer,
			FieldVariant::Sparkle => (0.0, 0.0),
		};
		for p in &mut self.ambient {
			p.update(
				self.frame,
				&self.style.twinkle,
				pointer,
				self.style.parallax_scale,
			);
		}

		let Some(accent_style) = self.style.accent_style().copied() else {
			return;
		};

		for a in &mut self.accents {
			a.update(&accent_style);
		}
		self.accents.retain(|a| a.active);

		match self.timers.due(FieldTimer::AccentSpawn) {
			None => self.arm_spawn(now_ms),
			Some(_) => {
				for _ in self.timers.poll(now_ms) {
					self.spawn_accent();
					self.arm_spawn(now_ms);
				}
			}
		}
	}

	/// Spawns one shooting star unless the cap is reached.
	pub fn spawn_accent(&mut self) -> bool {
		let Some(style) = self.style.accent_style().copied() else {
			return false;
		};
		if self.active_accents() >= style.cap {
			return false;
		}

		let accent = AccentParticle::random(&mut self.rng, &style, self.width, self.height);
		debug!(
			"night-sky: shooting star at ({:.0}, {:.0}), {} active",
			accent.x,
			accent.y,
			self.active_accents() + 1
		);
		self.accents.push(accent);
		true
	}

	/// Paints the current state to `surface`.
	pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
		render::render(self, surface);
	}

	fn arm_spawn(&mut self, now_ms: f64) {
		if let Some(style) = self.style.accent_style() {
			let interval = sample(&mut self.rng, style.spawn_interval_ms);
			self.timers.arm(FieldTimer::AccentSpawn, now_ms + interval);
		}
	}
}

fn clamp_size(width: f64, height: f64) -> (f64, f64) {
	let axis = |v: f64| if v.is_finite() { v.max(1.0) } else { 1.0 };
	(axis(width), axis(height))
}
