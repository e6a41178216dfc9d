//! Bounded, fading sequence of recently visited pointer positions.

use std::collections::VecDeque;

use super::config::TrailConfig;
use super::pointer::PointerSample;

/// One point of the comet tail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
	/// Viewport x in CSS pixels.
	pub x: f64,
	/// Viewport y in CSS pixels.
	pub y: f64,
	/// Current opacity in [0, 1]; only ever decreases.
	pub opacity: f64,
	/// Unique, increasing key for stable rendering.
	pub id: u64,
}

/// Oldest-first sliding window of trail points.
///
/// Points are appended only for samples that moved more than
/// `min_velocity`; every frame each opacity is multiplied by `decay` and
/// points at or below `epsilon` are dropped.
#[derive(Clone, Debug)]
pub struct TrailAccumulator {
	config: TrailConfig,
	points: VecDeque<TrailPoint>,
	next_id: u64,
}

impl TrailAccumulator {
	/// Empty trail.
	pub fn new(config: TrailConfig) -> Self {
		Self {
			points: VecDeque::with_capacity(config.max_len),
			config,
			next_id: 0,
		}
	}

	/// Append a point for `sample` if it moved fast enough.
	pub fn record(&mut self, sample: &PointerSample) -> bool {
		if sample.velocity <= self.config.min_velocity {
			return false;
		}
		self.push(sample.x, sample.y)
	}

	/// Append a point at full opacity, evicting the oldest beyond `max_len`.
	pub fn push(&mut self, x: f64, y: f64) -> bool {
		if self.config.max_len == 0 {
			return false;
		}
		let opacity = self.config.initial_opacity.clamp(0.0, 1.0);
		if opacity <= self.config.epsilon {
			return false;
		}
		self.points.push_back(TrailPoint {
			x,
			y,
			opacity,
			id: self.next_id,
		});
		self.next_id += 1;
		while self.points.len() > self.config.max_len {
			self.points.pop_front();
		}
		true
	}

	/// Advance one frame of fading.
	pub fn decay(&mut self) {
		let (decay, epsilon) = (self.config.decay.clamp(0.0, 1.0), self.config.epsilon);
		for p in &mut self.points {
			p.opacity *= decay;
		}
		self.points.retain(|p| p.opacity > epsilon);
	}

	/// Drop every point at once (pointer went idle).
	pub fn clear(&mut self) {
		self.points.clear();
	}

	/// Live points, oldest first.
	pub fn points(&self) -> &VecDeque<TrailPoint> {
		&self.points
	}

	/// Number of live points.
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// True when no point is live.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
}
