//! Visual styling for the night sky.
//!
//! Provides colors, the weighted star palettes, the background gradient and the
//! tuning knobs for twinkling and shooting stars. Every style struct is
//! deserializable so a page can override individual values from its config.

use serde::{Deserialize, Deserializer};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Parses `#rrggbb`. Anything else yields `None`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#')?;
		if digits.len() != 6 {
			return None;
		}
		let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
		let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
		let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
		Some(Self::rgb(r, g, b))
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// One palette entry: chosen when the draw exceeds `above`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct PaletteEntry {
	pub above: f64,
	pub color: Color,
}

/// Weighted palette for ambient particles.
///
/// Entries are checked in order; the first whose `above` threshold is beaten
/// by the uniform draw wins. Draws that beat none fall back to `base`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StarPalette {
	pub entries: Vec<PaletteEntry>,
	pub base: Color,
}

impl StarPalette {
	/// Gold, pale blue and soft pink over a mostly white sky.
	pub fn night() -> Self {
		Self {
			entries: vec![
				PaletteEntry { above: 0.7, color: Color::rgb(212, 168, 67) },  // gold
				PaletteEntry { above: 0.5, color: Color::rgb(180, 200, 255) }, // pale blue
				PaletteEntry { above: 0.35, color: Color::rgb(255, 200, 220) }, // soft pink
			],
			base: Color::rgb(255, 255, 255),
		}
	}

	/// Warm sparkles for the rose variant.
	pub fn rose() -> Self {
		Self {
			entries: vec![
				PaletteEntry { above: 0.65, color: Color::rgb(212, 168, 67) }, // gold
				PaletteEntry { above: 0.4, color: Color::rgb(232, 67, 147) },  // rose
				PaletteEntry { above: 0.2, color: Color::rgb(253, 121, 168) }, // blush
			],
			base: Color::rgb(245, 240, 232),
		}
	}

	pub fn pick(&self, draw: f64) -> Color {
		self.entries
			.iter()
			.find(|entry| draw > entry.above)
			.map(|entry| entry.color)
			.unwrap_or(self.base)
	}
}

/// A color stop of the vertical background gradient.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct GradientStop {
	pub offset: f64,
	pub color: Color,
}

/// Background fill, painted top to bottom before anything else.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkyStyle {
	pub stops: Vec<GradientStop>,
}

impl SkyStyle {
	pub fn midnight() -> Self {
		let stop = |offset, hex| GradientStop {
			offset,
			color: Color::from_hex(hex).unwrap_or(Color::rgb(5, 13, 26)),
		};
		Self {
			stops: vec![
				stop(0.0, "#050d1a"),
				stop(0.4, "#0a1628"),
				stop(0.7, "#0f1f38"),
				stop(1.0, "#0a1225"),
			],
		}
	}

	pub fn dusk() -> Self {
		Self {
			stops: vec![
				GradientStop { offset: 0.0, color: Color::rgb(26, 8, 22) },
				GradientStop { offset: 0.5, color: Color::rgb(44, 14, 38) },
				GradientStop { offset: 1.0, color: Color::rgb(20, 6, 18) },
			],
		}
	}
}

impl Default for SkyStyle {
	fn default() -> Self {
		Self::midnight()
	}
}

/// Which of the two ambient field flavors to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldVariant {
	/// Twinkling stars with pointer parallax and shooting stars.
	#[default]
	Starry,
	/// Fixed-position sparkles, no parallax and no accents.
	Sparkle,
}

/// Ambient particle counts.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Density {
	pub normal: usize,
	/// Used when the viewport is narrow (phone-sized).
	pub narrow: usize,
}

impl Default for Density {
	fn default() -> Self {
		Self {
			normal: 180,
			narrow: 80,
		}
	}
}

/// Sampling ranges for new ambient particles, each `(min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientStyle {
	pub size: (f64, f64),
	pub opacity: (f64, f64),
	/// Radians per frame.
	pub twinkle_speed: (f64, f64),
	pub parallax: (f64, f64),
}

impl AmbientStyle {
	pub fn stars() -> Self {
		Self {
			size: (0.2, 2.0),
			opacity: (0.1, 0.7),
			twinkle_speed: (0.005, 0.025),
			parallax: (0.1, 0.6),
		}
	}

	pub fn sparkles() -> Self {
		Self {
			size: (0.6, 2.4),
			opacity: (0.2, 0.8),
			twinkle_speed: (0.01, 0.04),
			parallax: (0.0, 0.0),
		}
	}
}

impl Default for AmbientStyle {
	fn default() -> Self {
		Self::stars()
	}
}

/// Opacity oscillation applied each frame.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TwinkleStyle {
	pub amplitude: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Glow disc radius as a multiple of the core radius.
	pub glow_radius: f64,
	/// Glow disc opacity as a fraction of the core opacity.
	pub glow_alpha: f64,
}

impl TwinkleStyle {
	/// Returns the style with a usable opacity band: both bounds inside `[0, 1]`,
	/// ordered low to high. Non-finite bounds fall back to the defaults.
	pub fn normalized(self) -> Self {
		let defaults = Self::default();
		let unit = |v: f64, fallback: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback };
		let min = unit(self.opacity_min, defaults.opacity_min);
		let max = unit(self.opacity_max, defaults.opacity_max);
		Self {
			opacity_min: min.min(max),
			opacity_max: min.max(max),
			..self
		}
	}
}

impl Default for TwinkleStyle {
	fn default() -> Self {
		Self {
			amplitude: 0.3,
			opacity_min: 0.02,
			opacity_max: 0.9,
			glow_radius: 2.5,
			glow_alpha: 0.08,
		}
	}
}

/// Shooting star behavior and look.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccentStyle {
	/// Maximum simultaneously active shooting stars.
	pub cap: usize,
	/// Spawn interval bounds in milliseconds, re-drawn after every spawn attempt.
	pub spawn_interval_ms: (f64, f64),
	/// Spawn region as fractions of the field, measured from the top-left.
	pub spawn_region: (f64, f64),
	pub length: (f64, f64),
	/// Pixels per frame.
	pub speed: (f64, f64),
	pub angle_deg: (f64, f64),
	/// Distance after which the star starts fading out.
	pub travel_distance: f64,
	pub fade_in_step: f64,
	pub fade_out_step: f64,
	pub color: Color,
	pub trail_width: f64,
	pub head_radius: f64,
	pub head_alpha: f64,
}

impl Default for AccentStyle {
	fn default() -> Self {
		Self {
			cap: 2,
			spawn_interval_ms: (4000.0, 7000.0),
			spawn_region: (0.8, 0.4),
			length: (40.0, 120.0),
			speed: (4.0, 10.0),
			angle_deg: (15.0, 45.0),
			travel_distance: 200.0,
			fade_in_step: 0.05,
			fade_out_step: 0.04,
			color: Color::rgb(255, 255, 255),
			trail_width: 1.5,
			head_radius: 2.0,
			head_alpha: 0.8,
		}
	}
}

/// Complete configuration of a particle field.
///
/// When deserialized, `variant` picks the preset ([`FieldStyle::starry`] or
/// [`FieldStyle::sparkle`]) and every other present key replaces that part of
/// the preset. Nested keys left out of an override take their own defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "FieldStyleOverrides")]
pub struct FieldStyle {
	pub variant: FieldVariant,
	pub density: Density,
	pub ambient: AmbientStyle,
	pub twinkle: TwinkleStyle,
	pub palette: StarPalette,
	/// Pixel offset per unit of pointer offset and parallax factor.
	pub parallax_scale: f64,
	/// `None` disables shooting stars entirely.
	pub accents: Option<AccentStyle>,
	pub sky: SkyStyle,
}

impl FieldStyle {
	/// Twinkling night sky with parallax and shooting stars (default).
	pub fn starry() -> Self {
		Self {
			variant: FieldVariant::Starry,
			density: Density::default(),
			ambient: AmbientStyle::stars(),
			twinkle: TwinkleStyle::default(),
			palette: StarPalette::night(),
			parallax_scale: 10.0,
			accents: Some(AccentStyle::default()),
			sky: SkyStyle::midnight(),
		}
	}

	/// Static warm sparkles for the password screen.
	pub fn sparkle() -> Self {
		Self {
			variant: FieldVariant::Sparkle,
			density: Density {
				normal: 120,
				narrow: 50,
			},
			ambient: AmbientStyle::sparkles(),
			twinkle: TwinkleStyle {
				amplitude: 0.35,
				..TwinkleStyle::default()
			},
			palette: StarPalette::rose(),
			parallax_scale: 0.0,
			accents: None,
			sky: SkyStyle::dusk(),
		}
	}

	/// Shooting stars only run in the starry variant.
	pub fn accent_style(&self) -> Option<&AccentStyle> {
		match self.variant {
			FieldVariant::Starry => self.accents.as_ref(),
			FieldVariant::Sparkle => None,
		}
	}
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self::starry()
	}
}

/// Page-supplied overrides on top of a variant preset.
#[derive(Deserialize)]
struct FieldStyleOverrides {
	#[serde(default)]
	variant: FieldVariant,
	density: Option<Density>,
	ambient: Option<AmbientStyle>,
	twinkle: Option<TwinkleStyle>,
	palette: Option<StarPalette>,
	parallax_scale: Option<f64>,
	/// Outer `None`: key absent. `Some(None)`: explicit `null`, accents off.
	#[serde(default, deserialize_with = "present")]
	accents: Option<Option<AccentStyle>>,
	sky: Option<SkyStyle>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<AccentStyle>>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<AccentStyle>::deserialize(deserializer).map(Some)
}

impl From<FieldStyleOverrides> for FieldStyle {
	fn from(o: FieldStyleOverrides) -> Self {
		let preset = match o.variant {
			FieldVariant::Starry => Self::starry(),
			FieldVariant::Sparkle => Self::sparkle(),
		};
		Self {
			variant: o.variant,
			density: o.density.unwrap_or(preset.density),
			ambient: o.ambient.unwrap_or(preset.ambient),
			twinkle: o.twinkle.unwrap_or(preset.twinkle),
			palette: o.palette.unwrap_or(preset.palette),
			parallax_scale: o.parallax_scale.unwrap_or(preset.parallax_scale),
			accents: o.accents.unwrap_or(preset.accents),
			sky: o.sky.unwrap_or(preset.sky),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_pick_follows_thresholds() {
		let palette = StarPalette::night();
		assert_eq!(palette.pick(0.95), Color::rgb(212, 168, 67));
		assert_eq!(palette.pick(0.6), Color::rgb(180, 200, 255));
		assert_eq!(palette.pick(0.4), Color::rgb(255, 200, 220));
		assert_eq!(palette.pick(0.35), Color::rgb(255, 255, 255));
		assert_eq!(palette.pick(0.0), Color::rgb(255, 255, 255));
	}

	#[test]
	fn hex_parsing() {
		assert_eq!(Color::from_hex("#050d1a"), Some(Color::rgb(5, 13, 26)));
		assert_eq!(Color::from_hex("050d1a"), None);
		assert_eq!(Color::from_hex("#05"), None);
	}

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(
			Color::rgb(255, 255, 255).with_alpha(0.5).to_css(),
			"rgba(255, 255, 255, 0.5)"
		);
	}

	#[test]
	fn sparkle_variant_has_no_accents() {
		let mut style = FieldStyle::sparkle();
		style.accents = Some(AccentStyle::default());
		assert!(style.accent_style().is_none());
		assert!(FieldStyle::starry().accent_style().is_some());
	}

	#[test]
	fn partial_json_overrides_keep_defaults() {
		let style: FieldStyle =
			serde_json::from_str(r#"{ "density": { "normal": 12 }, "accents": null }"#).unwrap();
		assert_eq!(style.density.normal, 12);
		assert_eq!(style.density.narrow, 80);
		assert!(style.accents.is_none());
		assert_eq!(style.twinkle, TwinkleStyle::default());
	}

	#[test]
	fn variant_only_override_selects_preset() {
		let style: FieldStyle = serde_json::from_str(r#"{ "variant": "sparkle" }"#).unwrap();
		assert_eq!(style, FieldStyle::sparkle());

		let style: FieldStyle =
			serde_json::from_str(r#"{ "variant": "sparkle", "parallax_scale": 4.0 }"#).unwrap();
		assert_eq!(style.palette, StarPalette::rose());
		assert_eq!(style.parallax_scale, 4.0);

		let style: FieldStyle = serde_json::from_str("{}").unwrap();
		assert_eq!(style, FieldStyle::starry());
	}

	#[test]
	fn inverted_or_out_of_range_band_is_repaired() {
		let band = |min, max| {
			let t = TwinkleStyle {
				opacity_min: min,
				opacity_max: max,
				..TwinkleStyle::default()
			}
			.normalized();
			(t.opacity_min, t.opacity_max)
		};
		assert_eq!(band(0.9, 0.1), (0.1, 0.9));
		assert_eq!(band(-2.0, 3.0), (0.0, 1.0));
		assert_eq!(band(f64::NAN, 0.5), (0.02, 0.5));
		assert_eq!(band(0.02, 0.9), (0.02, 0.9));
	}
}
