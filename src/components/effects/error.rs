//! Error type shared by the effect layers.

use wasm_bindgen::JsValue;

/// Result alias carrying [`EffectsError`].
pub type Result<T> = std::result::Result<T, EffectsError>;

/// Failures surfaced while mounting or painting an effect layer.
#[derive(Debug, thiserror::Error)]
pub enum EffectsError {
	/// A DOM or canvas call failed or a required handle was missing.
	#[error("dom: {0}")]
	Dom(String),
	/// The page-supplied configuration did not parse.
	#[error("config: {0}")]
	Config(#[from] serde_json::Error),
}

impl EffectsError {
	/// Wraps a description of a missing DOM handle.
	pub fn dom<T: Into<String>>(msg: T) -> Self {
		Self::Dom(msg.into())
	}
}

impl From<JsValue> for EffectsError {
	fn from(value: JsValue) -> Self {
		Self::Dom(format!("{value:?}"))
	}
}
