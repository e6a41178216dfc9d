//! portfolio-fx: decorative overlays for a single-page portfolio site.
//!
//! This crate provides WASM components that sit on top of static page content:
//! a cursor spotlight with a fading trail, an ambient particle field, and a
//! scroll progress bar. None of them intercept input or touch page state.

use leptos::prelude::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::effects::{
	Capabilities, CursorSpotlight, EffectsConfig, EffectsError, ScrollProgress, SparkleParticles,
	Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-fx: logging initialized");
}

/// Load effect configuration from a script element with id="effects-config".
/// Missing element means defaults; malformed JSON is logged and also means defaults.
fn load_config() -> EffectsConfig {
	let Some(json_text) = config_script_text() else {
		return EffectsConfig::default();
	};

	match EffectsConfig::from_json(&json_text) {
		Ok(config) => {
			info!("portfolio-fx: loaded effects config");
			config
		}
		Err(e) => {
			warn!("portfolio-fx: failed to parse effects config: {}", e);
			EffectsConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("effects-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Mounts every overlay with configuration read from the host page.
#[component]
pub fn App() -> impl IntoView {
	let config = load_config();
	let show_scroll = config.scroll_progress;

	view! {
		<SparkleParticles config=config.clone() />
		<CursorSpotlight config=config />
		{show_scroll.then(|| view! { <ScrollProgress /> })}
	}
}
