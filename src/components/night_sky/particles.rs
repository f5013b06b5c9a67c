//! Ambient stars and shooting-star accents.

use std::f64::consts::TAU;

use fastrand::Rng;

use super::theme::{AccentStyle, AmbientStyle, Color, StarPalette, TwinkleStyle};

/// Uniform sample in `[min, max)`.
pub(crate) fn sample(rng: &mut Rng, (min, max): (f64, f64)) -> f64 {
	min + rng.f64() * (max - min)
}

/// A twinkling star or sparkle. Lives for the lifetime of the field.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientParticle {
	/// Displayed position (base plus parallax offset).
	pub x: f64,
	pub y: f64,
	/// Parallax anchor.
	pub base_x: f64,
	pub base_y: f64,
	pub size: f64,
	pub color: Color,
	/// Baseline opacity before the twinkle term.
	pub opacity: f64,
	pub current_opacity: f64,
	pub twinkle_speed: f64,
	pub twinkle_phase: f64,
	pub parallax_factor: f64,
}

impl AmbientParticle {
	pub fn random(
		rng: &mut Rng,
		style: &AmbientStyle,
		palette: &StarPalette,
		width: f64,
		height: f64,
	) -> Self {
		let x = rng.f64() * width;
		let y = rng.f64() * height;
		let opacity = sample(rng, style.opacity);

		Self {
			x,
			y,
			base_x: x,
			base_y: y,
			size: sample(rng, style.size),
			twinkle_speed: sample(rng, style.twinkle_speed),
			twinkle_phase: rng.f64() * TAU,
			opacity,
			current_opacity: opacity,
			parallax_factor: sample(rng, style.parallax),
			color: palette.pick(rng.f64()),
		}
	}

	/// Recompute opacity for `frame` and shift by the pointer parallax.
	pub fn update(
		&mut self,
		frame: f64,
		twinkle: &TwinkleStyle,
		pointer: (f64, f64),
		parallax_scale: f64,
	) {
		let wave = (frame * self.twinkle_speed + self.twinkle_phase).sin();
		self.current_opacity = (self.opacity + wave * twinkle.amplitude)
			.clamp(twinkle.opacity_min, twinkle.opacity_max)
			.clamp(0.0, 1.0);

		self.x = self.base_x + pointer.0 * self.parallax_factor * parallax_scale;
		self.y = self.base_y + pointer.1 * self.parallax_factor * parallax_scale;
	}
}

/// Lifecycle of a shooting star. Ordered: a star only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccentPhase {
	FadeIn,
	Travel,
	FadeOut,
}

/// A shooting star.
#[derive(Clone, Debug, PartialEq)]
pub struct AccentParticle {
	/// Head position.
	pub x: f64,
	pub y: f64,
	/// Radians, measured clockwise from the +x axis in screen space.
	pub angle: f64,
	pub speed: f64,
	pub length: f64,
	pub opacity: f64,
	pub phase: AccentPhase,
	pub traveled: f64,
	pub active: bool,
}

impl AccentParticle {
	pub fn random(rng: &mut Rng, style: &AccentStyle, width: f64, height: f64) -> Self {
		Self {
			x: rng.f64() * width * style.spawn_region.0,
			y: rng.f64() * height * style.spawn_region.1,
			length: sample(rng, style.length),
			speed: sample(rng, style.speed),
			angle: sample(rng, style.angle_deg).to_radians(),
			opacity: 0.0,
			phase: AccentPhase::FadeIn,
			traveled: 0.0,
			active: true,
		}
	}

	/// Advance one frame.
	pub fn update(&mut self, style: &AccentStyle) {
		if !self.active {
			return;
		}

		self.x += self.angle.cos() * self.speed;
		self.y += self.angle.sin() * self.speed;
		self.traveled += self.speed;

		if self.phase == AccentPhase::FadeIn {
			self.opacity = (self.opacity + style.fade_in_step).min(1.0);
			if self.opacity >= 1.0 {
				self.phase = AccentPhase::Travel;
			}
		}

		if self.traveled > style.travel_distance {
			self.phase = AccentPhase::FadeOut;
			self.opacity -= style.fade_out_step;
		}

		self.opacity = self.opacity.clamp(0.0, 1.0);
		if self.opacity <= 0.0 {
			self.active = false;
		}
	}

	/// End of the trail, `length` pixels behind the head.
	pub fn tail(&self) -> (f64, f64) {
		(
			self.x - self.angle.cos() * self.length,
			self.y - self.angle.sin() * self.length,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fixed_accent(speed: f64) -> AccentParticle {
		AccentParticle {
			x: 0.0,
			y: 0.0,
			angle: 0.0,
			speed,
			length: 50.0,
			opacity: 0.0,
			phase: AccentPhase::FadeIn,
			traveled: 0.0,
			active: true,
		}
	}

	#[test]
	fn accent_walks_through_every_phase() {
		let style = AccentStyle::default();
		let mut accent = fixed_accent(4.0);
		let mut seen = vec![accent.phase];
		while accent.active {
			accent.update(&style);
			if seen.last() != Some(&accent.phase) {
				seen.push(accent.phase);
			}
		}
		assert_eq!(
			seen,
			vec![AccentPhase::FadeIn, AccentPhase::Travel, AccentPhase::FadeOut]
		);
		assert_eq!(accent.opacity, 0.0);
	}

	#[test]
	fn accent_moves_along_its_angle() {
		let style = AccentStyle::default();
		let mut accent = fixed_accent(5.0);
		accent.update(&style);
		assert!((accent.x - 5.0).abs() < 1e-9);
		assert!(accent.y.abs() < 1e-9);
		assert_eq!(accent.tail(), (accent.x - 50.0, accent.y));
	}

	#[test]
	fn inactive_accent_is_frozen() {
		let style = AccentStyle::default();
		let mut accent = fixed_accent(5.0);
		accent.active = false;
		accent.update(&style);
		assert_eq!(accent.x, 0.0);
	}

	#[test]
	fn ambient_update_applies_parallax_from_base() {
		let mut rng = Rng::with_seed(7);
		let mut star = AmbientParticle::random(
			&mut rng,
			&AmbientStyle::stars(),
			&StarPalette::night(),
			100.0,
			100.0,
		);
		star.update(0.0, &TwinkleStyle::default(), (1.0, -1.0), 10.0);
		let shift = star.parallax_factor * 10.0;
		assert!((star.x - (star.base_x + shift)).abs() < 1e-9);
		assert!((star.y - (star.base_y - shift)).abs() < 1e-9);
	}
}
