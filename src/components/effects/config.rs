//! Tunable constants for the effect layers.
//!
//! Every field has a default matching the site's look, so a host page
//! only needs to supply the values it wants to change:
//!
//! ```json
//! { "trail": { "max_len": 20 }, "particles": { "cap": 60 } }
//! ```

use serde::Deserialize;

use super::error::Result;

/// Pointer sampling and idle detection.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointerConfig {
	/// Minimum time between accepted pointer samples (~60 per second).
	pub sample_interval_ms: f64,
	/// Time without an accepted sample after which the pointer counts as idle.
	pub idle_timeout_ms: f64,
}

impl Default for PointerConfig {
	fn default() -> Self {
		Self {
			sample_interval_ms: 16.0,
			idle_timeout_ms: 300.0,
		}
	}
}

/// Comet-tail behaviour.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
	/// Maximum number of points kept; the oldest is dropped first.
	pub max_len: usize,
	/// Minimum displacement (px) between accepted samples to drop a point.
	pub min_velocity: f64,
	/// Opacity of a freshly created point.
	pub initial_opacity: f64,
	/// Per-frame multiplicative decay applied to every point.
	pub decay: f64,
	/// Points at or below this opacity are removed.
	pub epsilon: f64,
}

impl Default for TrailConfig {
	fn default() -> Self {
		Self {
			max_len: 12,
			min_velocity: 2.0,
			initial_opacity: 1.0,
			decay: 0.85,
			epsilon: 0.01,
		}
	}
}

/// Spotlight glow geometry and intensity.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpotlightConfig {
	/// Radius of the main glow in pixels.
	pub radius: f64,
	/// Scale applied to the main glow while the pointer is idle.
	pub idle_scale: f64,
	/// Intensity over ordinary content.
	pub rest_intensity: f64,
	/// Intensity while hovering something clickable.
	pub interactive_intensity: f64,
	/// Exponential smoothing rate (1/s) for the layer fade.
	pub fade_speed: f64,
	/// Radius of the oldest trail glow.
	pub trail_radius_min: f64,
	/// Radius of the newest trail glow.
	pub trail_radius_max: f64,
}

impl Default for SpotlightConfig {
	fn default() -> Self {
		Self {
			radius: 250.0,
			idle_scale: 0.8,
			rest_intensity: 0.7,
			interactive_intensity: 1.0,
			fade_speed: 10.0,
			trail_radius_min: 10.0,
			trail_radius_max: 15.0,
		}
	}
}

/// Ambient particle population and motion.
///
/// Per-frame quantities (drift, pulse speed, proximity strength) assume 60 fps.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
	/// Viewport area (px²) per particle.
	pub density: f64,
	/// Hard ceiling on the population.
	pub cap: usize,
	/// Distance outside the viewport before a particle wraps.
	pub margin: f64,
	/// Pointer distance within which particles are pushed away.
	pub proximity_radius: f64,
	/// Maximum push per frame at zero distance.
	pub proximity_strength: f64,
	/// Core radius range.
	pub size_min: f64,
	/// Core radius range.
	pub size_max: f64,
	/// Base opacity range.
	pub opacity_min: f64,
	/// Base opacity range.
	pub opacity_max: f64,
	/// Largest drift speed along either axis.
	pub drift: f64,
	/// Pulse angular speed range (radians per frame).
	pub pulse_speed_min: f64,
	/// Pulse angular speed range (radians per frame).
	pub pulse_speed_max: f64,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			density: 30_000.0,
			cap: 40,
			margin: 10.0,
			proximity_radius: 100.0,
			proximity_strength: 0.3,
			size_min: 0.5,
			size_max: 2.0,
			opacity_min: 0.2,
			opacity_max: 0.6,
			drift: 0.1,
			pulse_speed_min: 0.008,
			pulse_speed_max: 0.023,
		}
	}
}

/// Complete configuration for all effect layers.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
	/// Pointer sampling.
	pub pointer: PointerConfig,
	/// Cursor trail.
	pub trail: TrailConfig,
	/// Spotlight glow.
	pub spotlight: SpotlightConfig,
	/// Ambient particles.
	pub particles: ParticleConfig,
	/// Whether to show the scroll progress bar.
	pub scroll_progress: bool,
}

impl Default for EffectsConfig {
	fn default() -> Self {
		Self {
			pointer: PointerConfig::default(),
			trail: TrailConfig::default(),
			spotlight: SpotlightConfig::default(),
			particles: ParticleConfig::default(),
			scroll_progress: true,
		}
	}
}

impl EffectsConfig {
	/// Parse a JSON document; absent fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		let config = EffectsConfig::from_json("{}").unwrap();
		assert_eq!(config, EffectsConfig::default());
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let config =
			EffectsConfig::from_json(r#"{ "trail": { "max_len": 20 }, "scroll_progress": false }"#)
				.unwrap();
		assert_eq!(config.trail.max_len, 20);
		assert_eq!(config.trail.decay, 0.85);
		assert!(!config.scroll_progress);
		assert_eq!(config.particles.cap, 40);
	}

	#[test]
	fn malformed_json_is_a_config_error() {
		let err = EffectsConfig::from_json("{ trail: ").unwrap_err();
		assert!(matches!(err, super::super::error::EffectsError::Config(_)));
	}
}
