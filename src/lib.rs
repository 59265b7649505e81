//! particle-field: ambient particle background for the portfolio site.
//!
//! This crate provides a WASM component that renders two decorative particle
//! populations on stacked canvases, with pointer interaction, proximity lines
//! and scroll-driven visibility.

use leptos::prelude::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Enables the `js` entropy source for `rand` on wasm32.
use getrandom as _;

pub mod components;

pub use components::particle_field::{
	FieldState, FieldTheme, ParticleBackdrop, ParticleField, PopulationKind,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load theme overrides from a script element with id="particle-config".
/// Expected format: JSON object with any subset of [`FieldTheme`] fields.
fn load_theme() -> Option<FieldTheme> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldTheme>(&json_text) {
		Ok(theme) => {
			info!("particle-field: loaded theme {:?}", theme.name);
			Some(theme)
		}
		Err(e) => {
			warn!("particle-field: failed to parse particle config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the theme from the DOM and mounts the particle backdrop.
#[component]
pub fn App() -> impl IntoView {
	let theme = load_theme().unwrap_or_default();

	view! { <ParticleBackdrop theme=theme /> }
}
