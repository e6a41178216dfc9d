//! Spotlight glow layout derived from pointer and trail state.
//!
//! The spotlight owns only its fade timing; positions and intensities are
//! recomputed from the tracker and trail every frame.

use super::config::SpotlightConfig;
use super::pointer::PointerTracker;
use super::trail::TrailAccumulator;

/// Values below this are treated as fully faded.
const FADE_EPSILON: f64 = 0.001;

/// A value that eases towards a target with exponential smoothing.
///
/// `value += (target - value) * (1 - e^(-speed * dt))`, snapping once within
/// [`FADE_EPSILON`] of the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
	value: f64,
	target: f64,
}

impl Fade {
	/// Settled at `value`.
	pub fn new(value: f64) -> Self {
		Self {
			value,
			target: value,
		}
	}

	/// Value to ease towards.
	pub fn set_target(&mut self, target: f64) {
		self.target = target;
	}

	/// Advance by `dt` seconds at `speed` (1/s).
	pub fn tick(&mut self, dt: f64, speed: f64) {
		let factor = 1.0 - (-speed * dt.max(0.0)).exp();
		self.value += (self.target - self.value) * factor;
		if (self.target - self.value).abs() < FADE_EPSILON {
			self.value = self.target;
		}
	}

	/// Current value.
	pub fn value(&self) -> f64 {
		self.value
	}
}

/// Which part of the layer a glow belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlowKind {
	/// The large glow under the live pointer.
	Main,
	/// A small glow on a trail point.
	Trail,
}

/// One radial glow to paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
	/// Main or trail.
	pub kind: GlowKind,
	/// Center x.
	pub x: f64,
	/// Center y.
	pub y: f64,
	/// Outer gradient radius.
	pub radius: f64,
	/// Multiplier for the glow's gradient stops, in [0, 1].
	pub intensity: f64,
	/// Position along the trail, 0 for the oldest point and 1 for the newest.
	pub age_t: f64,
}

/// Layer opacity and main-glow scale transitions.
#[derive(Clone, Debug)]
pub struct Spotlight {
	config: SpotlightConfig,
	opacity: Fade,
	scale: Fade,
}

impl Spotlight {
	/// Hidden layer at idle scale.
	pub fn new(config: SpotlightConfig) -> Self {
		let scale = Fade::new(config.idle_scale);
		Self {
			config,
			opacity: Fade::new(0.0),
			scale,
		}
	}

	/// Ease towards the state implied by the tracker.
	pub fn tick(&mut self, dt: f64, tracker: &PointerTracker) {
		let (opacity, scale) = if tracker.is_active() {
			let intensity = if tracker.is_over_interactive() {
				self.config.interactive_intensity
			} else {
				self.config.rest_intensity
			};
			(intensity.clamp(0.0, 1.0), 1.0)
		} else {
			(0.0, self.config.idle_scale)
		};
		self.opacity.set_target(opacity);
		self.scale.set_target(scale);
		self.opacity.tick(dt, self.config.fade_speed);
		self.scale.tick(dt, self.config.fade_speed);
	}

	/// Current layer opacity in [0, 1].
	pub fn opacity(&self) -> f64 {
		self.opacity.value()
	}

	/// Whether anything would show if painted.
	pub fn is_visible(&self) -> bool {
		self.opacity() > FADE_EPSILON
	}

	/// Glows to paint this frame, back to front: trail oldest first, then the
	/// main glow on top.
	pub fn glows(&self, tracker: &PointerTracker, trail: &TrailAccumulator) -> Vec<Glow> {
		let Some((px, py)) = tracker.position() else {
			return Vec::new();
		};
		if !self.is_visible() {
			return Vec::new();
		}

		let layer = self.opacity();
		let len = trail.len();
		let mut glows = Vec::with_capacity(len + 1);
		let span = self.config.trail_radius_max - self.config.trail_radius_min;

		for (i, p) in trail.points().iter().enumerate() {
			let t = (i + 1) as f64 / len as f64;
			glows.push(Glow {
				kind: GlowKind::Trail,
				x: p.x,
				y: p.y,
				radius: self.config.trail_radius_min + span * t,
				intensity: (p.opacity * layer).clamp(0.0, 1.0),
				age_t: t,
			});
		}

		glows.push(Glow {
			kind: GlowKind::Main,
			x: px,
			y: py,
			radius: self.config.radius * self.scale.value(),
			intensity: layer,
			age_t: 1.0,
		});
		glows
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::effects::config::{PointerConfig, TrailConfig};

	const DT: f64 = 1.0 / 60.0;

	fn run(spot: &mut Spotlight, tracker: &PointerTracker, frames: usize) {
		for _ in 0..frames {
			spot.tick(DT, tracker);
		}
	}

	#[test]
	fn fade_converges_and_snaps() {
		let mut fade = Fade::new(0.0);
		fade.set_target(1.0);
		for _ in 0..120 {
			fade.tick(DT, 10.0);
		}
		assert_eq!(fade.value(), 1.0);
	}

	#[test]
	fn fades_in_on_activity_and_out_when_idle() {
		let mut tracker = PointerTracker::new(PointerConfig::default());
		let mut trail = TrailAccumulator::new(TrailConfig::default());
		let mut spot = Spotlight::new(SpotlightConfig::default());
		assert!(spot.glows(&tracker, &trail).is_empty());

		tracker.on_move(10.0, 10.0, 0.0);
		if let Some(s) = tracker.on_move(30.0, 10.0, 20.0) {
			trail.record(&s);
		}
		run(&mut spot, &tracker, 120);
		assert!((spot.opacity() - 0.7).abs() < 1e-9);

		assert!(tracker.expire(320.0));
		trail.clear();
		run(&mut spot, &tracker, 120);
		assert_eq!(spot.opacity(), 0.0);
		assert!(!spot.is_visible());
		assert!(spot.glows(&tracker, &trail).is_empty());
	}

	#[test]
	fn interactive_hover_raises_intensity() {
		let mut tracker = PointerTracker::new(PointerConfig::default());
		let mut spot = Spotlight::new(SpotlightConfig::default());
		tracker.on_move(0.0, 0.0, 0.0);
		tracker.set_interactive(true);
		run(&mut spot, &tracker, 120);
		assert!((spot.opacity() - 1.0).abs() < 1e-9);
	}

	#[test]
	fn trail_glows_shrink_and_dim_towards_the_tail() {
		let mut tracker = PointerTracker::new(PointerConfig::default());
		let mut trail = TrailAccumulator::new(TrailConfig::default());
		let mut spot = Spotlight::new(SpotlightConfig::default());
		tracker.on_move(0.0, 0.0, 0.0);
		for i in 1..=4 {
			trail.push(i as f64 * 10.0, 0.0);
			trail.decay();
		}
		run(&mut spot, &tracker, 120);

		let glows = spot.glows(&tracker, &trail);
		assert_eq!(glows.len(), 5);
		assert_eq!(glows.last().map(|g| g.kind), Some(GlowKind::Main));
		let trail_glows = &glows[..4];
		for pair in trail_glows.windows(2) {
			assert!(pair[0].radius < pair[1].radius);
			assert!(pair[0].intensity < pair[1].intensity);
		}
		assert!((trail_glows[3].radius - 15.0).abs() < 1e-9);
		assert!((glows[4].radius - 250.0).abs() < 1e-6);
	}
}
