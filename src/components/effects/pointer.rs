//! Pointer sampling, velocity and idle tracking.
//!
//! The tracker is fed raw `mousemove` coordinates with a millisecond timestamp
//! and decides which of them become samples. Idle expiry is polled from the
//! frame loop via [`PointerTracker::expire`], so all timing is driven by the
//! timestamps the caller passes in.

use super::config::PointerConfig;

/// An accepted pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
	/// Viewport x in CSS pixels.
	pub x: f64,
	/// Viewport y in CSS pixels.
	pub y: f64,
	/// Horizontal displacement since the previous accepted sample.
	pub dx: f64,
	/// Vertical displacement since the previous accepted sample.
	pub dy: f64,
	/// Magnitude of the displacement, in pixels per sample.
	pub velocity: f64,
}

/// Latest pointer position plus activity and hover state.
#[derive(Clone, Debug)]
pub struct PointerTracker {
	config: PointerConfig,
	position: Option<(f64, f64)>,
	last_sample_at: Option<f64>,
	idle_deadline: Option<f64>,
	velocity: (f64, f64),
	active: bool,
	over_interactive: bool,
}

impl PointerTracker {
	/// Inactive tracker with no known position.
	pub fn new(config: PointerConfig) -> Self {
		Self {
			config,
			position: None,
			last_sample_at: None,
			idle_deadline: None,
			velocity: (0.0, 0.0),
			active: false,
			over_interactive: false,
		}
	}

	/// Offer a raw pointer position observed at `now` (milliseconds).
	///
	/// Returns the sample when it passes the throttle. The first sample has zero
	/// velocity since there is nothing to measure against.
	pub fn on_move(&mut self, x: f64, y: f64, now: f64) -> Option<PointerSample> {
		if let Some(last) = self.last_sample_at {
			if now - last < self.config.sample_interval_ms {
				return None;
			}
		}

		let (dx, dy) = match self.position {
			Some((px, py)) => (x - px, y - py),
			None => (0.0, 0.0),
		};
		self.last_sample_at = Some(now);
		self.position = Some((x, y));
		self.velocity = (dx, dy);
		self.active = true;
		self.idle_deadline = Some(now + self.config.idle_timeout_ms);

		Some(PointerSample {
			x,
			y,
			dx,
			dy,
			velocity: (dx * dx + dy * dy).sqrt(),
		})
	}

	/// Mark the pointer idle if its deadline has passed.
	///
	/// Returns `true` only on the transition from active to idle.
	pub fn expire(&mut self, now: f64) -> bool {
		match self.idle_deadline {
			Some(deadline) if self.active && now >= deadline => {
				self.active = false;
				self.idle_deadline = None;
				true
			}
			_ => false,
		}
	}

	/// The pointer left the viewport.
	pub fn leave(&mut self) {
		self.active = false;
		self.idle_deadline = None;
		self.over_interactive = false;
	}

	/// Whether the pointer is over something clickable.
	pub fn set_interactive(&mut self, over: bool) {
		self.over_interactive = over;
	}

	/// Last accepted position, if any sample has been accepted yet.
	pub fn position(&self) -> Option<(f64, f64)> {
		self.position
	}

	/// Displacement of the last accepted sample.
	pub fn velocity(&self) -> (f64, f64) {
		self.velocity
	}

	/// Moved within the idle timeout and still inside the viewport.
	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Last value given to [`PointerTracker::set_interactive`].
	pub fn is_over_interactive(&self) -> bool {
		self.over_interactive
	}
}

/// Selector for elements that count as clickable for spotlight intensity.
pub const INTERACTIVE_SELECTOR: &str = r#"button, a, [role="button"], input, textarea, select"#;
