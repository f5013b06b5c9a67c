//! Page configuration.
//!
//! Loaded from a `<script id="greeting-config" type="application/json">`
//! element. Every field is optional; missing fields keep their defaults.

use serde::Deserialize;

use crate::components::night_sky::FieldStyle;

/// Everything a page can customize.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
	/// Compared as plain text. The gate is decoration, not access control.
	pub passphrase: String,
	/// Wrong attempts before the hint shows.
	pub max_attempts: u32,
	pub hint_message: String,
	/// Lines staged in one by one during the intro.
	pub intro_lines: Vec<String>,
	pub intro_first_line_ms: f64,
	pub intro_line_gap_ms: f64,
	pub loader_step_ms: f64,
	/// Random loader increment per step, `(min, max)` percent.
	pub loader_increment: (f64, f64),
	/// Pause between a full loader and the gate appearing.
	pub gate_delay_ms: f64,
	pub typing_message: String,
	pub typing_speed_ms: f64,
	/// Pause between unlocking and the first typed character.
	pub typing_delay_ms: f64,
	pub proposal_question: String,
	pub proposal_yes: String,
	pub proposal_always: String,
	/// Memory narrations shown one after another in relive mode.
	pub relive_narrations: Vec<String>,
	pub relive_step_ms: f64,
	pub sky: FieldStyle,
}

impl Default for GreetingConfig {
	fn default() -> Self {
		Self {
			passphrase: "stardust".into(),
			max_attempts: 3,
			hint_message: "💕 Hint: My special name for you?".into(),
			intro_lines: vec![
				"Some stories are written in the stars…".into(),
				"…and ours is my favorite one.".into(),
			],
			intro_first_line_ms: 800.0,
			intro_line_gap_ms: 1000.0,
			loader_step_ms: 250.0,
			loader_increment: (5.0, 20.0),
			gate_delay_ms: 600.0,
			typing_message: "My dearest love,\n\nFrom the moment you came into my life, everything changed. \
				The colors became brighter, the music became sweeter, and every ordinary moment turned \
				into something extraordinary.\n\nYou are my first thought in the morning and my last \
				dream at night.\n\nForever yours. 💕"
				.into(),
			typing_speed_ms: 35.0,
			typing_delay_ms: 1200.0,
			proposal_question: "Will you be mine, always? 💍".into(),
			proposal_yes: "You just made me the happiest person alive. I love you, forever and always. 💖"
				.into(),
			proposal_always: "Always and forever, that's our promise. My heart is yours, eternally. 💞"
				.into(),
			relive_narrations: [
				"A stolen glance at the market, where the butterflies began ✨",
				"Hiding your smile in the hallway, school days and secret glances 📚",
				"Walking and texting, waiting for your reply 📱",
				"That smile by the window… cherry blossoms had nothing on you 🌸",
				"Sitting close, hearts racing, realizing this was forever 💑",
				"The first chapter we wrote together 💛",
				"A shy smile on a train journey, I saw it anyway 🚂💫",
				"Flowers in your hair, wind in the air 🌺",
				"Under the blossoms, side by side 🌷",
				"Golden hour by the sea, my heart overflowing 🌅",
				"Where sky meets sea, barefoot and together 💖",
			]
			.map(String::from)
			.to_vec(),
			relive_step_ms: 3500.0,
			sky: FieldStyle::default(),
		}
	}
}

impl GreetingConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
