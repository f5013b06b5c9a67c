//! Frame rendering for the particle field.
//!
//! Every frame is painted from scratch, back to front:
//! 1. Background gradient
//! 2. Ambient particles (core disc, then glow disc)
//! 3. Active shooting stars (trail, then head) so accents always sit on top

use super::field::ParticleField;
use super::surface::Surface;

/// Renders the complete field to `surface`.
pub fn render<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
	draw_background(field, surface);
	draw_ambient(field, surface);
	draw_accents(field, surface);
}

fn draw_background<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
	surface.fill_vertical_gradient(field.width(), field.height(), &field.style().sky.stops);
}

fn draw_ambient<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
	let twinkle = &field.style().twinkle;

	for p in field.ambient() {
		surface.fill_disc(p.x, p.y, p.size, p.color.with_alpha(p.current_opacity));
		surface.fill_disc(
			p.x,
			p.y,
			p.size * twinkle.glow_radius,
			p.color.with_alpha(p.current_opacity * twinkle.glow_alpha),
		);
	}
}

fn draw_accents<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
	let Some(style) = field.style().accent_style() else {
		return;
	};

	for a in field.accents() {
		if !a.active || a.opacity <= 0.0 {
			continue;
		}

		surface.stroke_fading_line(
			(a.x, a.y),
			a.tail(),
			style.color.with_alpha(a.opacity),
			style.trail_width,
		);
		surface.fill_disc(
			a.x,
			a.y,
			style.head_radius,
			style.color.with_alpha(a.opacity * style.head_alpha),
		);
	}
}
