//! Drawing backends for the sky renderer.
//!
//! The renderer only needs three primitives, so it draws through the
//! [`Surface`] trait. In the browser that is the canvas 2D context; in tests a
//! [`DisplayList`] records the calls so frames can be compared exactly.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::{Color, GradientStop};

/// Minimal 2D drawing surface.
pub trait Surface {
	/// Fill `(0, 0)..(width, height)` with a top-to-bottom gradient.
	fn fill_vertical_gradient(&mut self, width: f64, height: f64, stops: &[GradientStop]);

	/// Fill a circle. The alpha of `color` is the disc opacity.
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Stroke a line whose color fades from `color` at `head` to transparent at `tail`.
	fn stroke_fading_line(&mut self, head: (f64, f64), tail: (f64, f64), color: Color, width: f64);
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	VerticalGradient {
		width: f64,
		height: f64,
		stops: Vec<GradientStop>,
	},
	Disc {
		x: f64,
		y: f64,
		radius: f64,
		color: Color,
	},
	FadingLine {
		head: (f64, f64),
		tail: (f64, f64),
		color: Color,
		width: f64,
	},
}

/// Surface that records commands instead of painting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
	commands: Vec<DrawCommand>,
}

impl DisplayList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn commands(&self) -> &[DrawCommand] {
		&self.commands
	}

	pub fn clear(&mut self) {
		self.commands.clear();
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}
}

impl Surface for DisplayList {
	fn fill_vertical_gradient(&mut self, width: f64, height: f64, stops: &[GradientStop]) {
		self.commands.push(DrawCommand::VerticalGradient {
			width,
			height,
			stops: stops.to_vec(),
		});
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.commands.push(DrawCommand::Disc {
			x,
			y,
			radius,
			color,
		});
	}

	fn stroke_fading_line(&mut self, head: (f64, f64), tail: (f64, f64), color: Color, width: f64) {
		self.commands.push(DrawCommand::FadingLine {
			head,
			tail,
			color,
			width,
		});
	}
}

impl Surface for CanvasRenderingContext2d {
	fn fill_vertical_gradient(&mut self, width: f64, height: f64, stops: &[GradientStop]) {
		let gradient = self.create_linear_gradient(0.0, 0.0, 0.0, height);
		for stop in stops {
			let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
		}

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_fading_line(&mut self, head: (f64, f64), tail: (f64, f64), color: Color, width: f64) {
		let gradient = self.create_linear_gradient(head.0, head.1, tail.0, tail.1);
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css());

		self.begin_path();
		self.move_to(head.0, head.1);
		self.line_to(tail.0, tail.1);
		#[allow(deprecated)]
		self.set_stroke_style(&gradient);
		self.set_line_width(width);
		self.stroke();
	}
}
