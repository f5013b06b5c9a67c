//! night-sky: a starry-night greeting page.
//!
//! This crate renders a twinkling canvas sky with shooting stars behind a small
//! staged page: an intro, a password gate and an unlocked letter with a
//! proposal. Everything runs client-side in WASM.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;

pub use components::greeting::{GreetingPage, GreetingState};
pub use components::night_sky::{
	AccentParticle, AccentPhase, AmbientParticle, DisplayList, DrawCommand, FieldStyle,
	FieldVariant, NightSkyCanvas, ParticleField, Surface,
};
pub use config::GreetingConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("night-sky: logging initialized");
}

/// Load page configuration from a script element with id="greeting-config".
fn load_config() -> Option<GreetingConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("greeting-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match GreetingConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"night-sky: loaded config ({:?} sky, {} intro lines)",
				config.sky.variant,
				config.intro_lines.len()
			);
			Some(config)
		}
		Err(e) => {
			warn!("night-sky: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads configuration from the DOM and renders the sky behind the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let sky = config.sky.clone();
	let config = StoredValue::new(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Written in the Stars" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<NightSkyCanvas field_style=sky />
		<GreetingPage config=config />
	}
}
