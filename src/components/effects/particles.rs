//! Ambient particle field for visual atmosphere.
//!
//! Particles drift, pulse and shy away from the pointer. The population size
//! is a function of viewport area and is re-seeded whenever the viewport
//! changes size.

use std::f64::consts::TAU;

use super::config::ParticleConfig;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub id: usize,
	pub x: f64,
	pub y: f64,
	pub size: f64,
	/// Base opacity before pulsing.
	pub opacity: f64,
	pub speed_x: f64,
	pub speed_y: f64,
	/// Phase advance per frame.
	pub pulse_speed: f64,
	pub pulse_phase: f64,
	/// Index into the theme's particle palette.
	pub color: usize,
}

impl Particle {
	/// Opacity after pulsing, between 20% and 100% of the base opacity.
	pub fn pulsed_opacity(&self) -> f64 {
		(self.opacity * (0.6 + 0.4 * self.pulse_phase.sin())).clamp(0.0, 1.0)
	}
}

/// Number of particles for a viewport: `min(cap, floor(w * h / density))`.
pub fn particle_count(config: &ParticleConfig, width: f64, height: f64) -> usize {
	let area = width.max(0.0) * height.max(0.0);
	if config.density <= 0.0 || !area.is_finite() {
		return 0;
	}
	let n = (area / config.density).floor();
	if n >= config.cap as f64 {
		config.cap
	} else {
		n as usize
	}
}

/// Owns the particle population and its bounds.
pub struct ParticleField {
	pub particles: Vec<Particle>,
	config: ParticleConfig,
	palette_len: usize,
	width: f64,
	height: f64,
	generation: u64,
}

impl ParticleField {
	pub fn new(config: ParticleConfig, palette_len: usize, width: f64, height: f64) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			config,
			palette_len: palette_len.max(1),
			width,
			height,
			generation: 0,
		};
		field.seed();
		field
	}

	/// Simple pseudo-random function (deterministic)
	fn pseudo_random(seed: f64) -> f64 {
		let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
		x - x.floor()
	}

	/// Replace the population with a fresh one sized for the current bounds.
	fn seed(&mut self) {
		let c = &self.config;
		let count = particle_count(c, self.width, self.height);
		let offset = self.generation as f64 * 7919.0;
		let mut particles = Vec::with_capacity(count);

		for i in 0..count {
			let seed = i as f64 + 1.0 + offset;
			let r = |salt: f64| Self::pseudo_random(seed * salt);
			particles.push(Particle {
				id: i,
				x: r(1.1) * self.width,
				y: r(2.3) * self.height,
				size: c.size_min + r(3.7) * (c.size_max - c.size_min),
				opacity: (c.opacity_min + r(4.1) * (c.opacity_max - c.opacity_min)).clamp(0.0, 1.0),
				speed_x: (r(5.3) - 0.5) * 2.0 * c.drift,
				speed_y: (r(6.7) - 0.5) * 2.0 * c.drift,
				pulse_speed: c.pulse_speed_min + r(7.9) * (c.pulse_speed_max - c.pulse_speed_min),
				pulse_phase: r(8.3) * TAU,
				color: (r(9.7) * self.palette_len as f64) as usize % self.palette_len,
			});
		}

		self.generation += 1;
		self.particles = particles;
	}

	/// Advance one step of `dt` seconds, pushing particles away from `pointer`.
	///
	/// Order per particle: drift, pointer repulsion, wrap, pulse.
	pub fn update(&mut self, dt: f64, pointer: Option<(f64, f64)>) {
		let frames = dt.max(0.0) * 60.0;
		let (w, h, margin) = (self.width, self.height, self.config.margin);
		let (radius, strength) = (self.config.proximity_radius, self.config.proximity_strength);

		for p in &mut self.particles {
			p.x += p.speed_x * frames;
			p.y += p.speed_y * frames;

			if let Some((mx, my)) = pointer {
				let (dx, dy) = (mx - p.x, my - p.y);
				let distance = (dx * dx + dy * dy).sqrt();
				if distance > 0.0 && distance < radius {
					let force = (radius - distance) / radius;
					p.x -= dx / distance * force * strength * frames;
					p.y -= dy / distance * force * strength * frames;
				}
			}

			// Wrap around screen edges
			if p.x < -margin {
				p.x = w + margin;
			} else if p.x > w + margin {
				p.x = -margin;
			}
			if p.y < -margin {
				p.y = h + margin;
			} else if p.y > h + margin {
				p.y = -margin;
			}

			p.pulse_phase = (p.pulse_phase + p.pulse_speed * frames) % TAU;
		}
	}

	/// Adopt new bounds and re-seed the whole population.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.seed();
	}

	/// Viewport size the field was seeded for.
	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// True when the viewport is too small for a single particle.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::super::theme::{Palette, Theme};
	use proptest::prelude::*;

	const DT: f64 = 1.0 / 60.0;

	#[test]
	fn full_hd_hits_the_cap() {
		let config = ParticleConfig::default();
		assert_eq!(particle_count(&config, 1920.0, 1080.0), 40);
		let field = ParticleField::new(config, 5, 1920.0, 1080.0);
		assert_eq!(field.len(), 40);
	}

	#[test]
	fn empty_palette_still_colors_every_particle() {
		let theme = Theme {
			particles: Palette { colors: vec![] },
			..Theme::default()
		};
		let field = ParticleField::new(
			ParticleConfig::default(),
			theme.particles.len(),
			1920.0,
			1080.0,
		);
		assert_eq!(field.len(), 40);
		for p in &field.particles {
			assert_eq!(theme.particles.get(p.color), Palette::FALLBACK);
		}
	}

	#[test]
	fn small_viewport_below_cap() {
		let config = ParticleConfig::default();
		// 800 * 600 / 30000 = 16
		assert_eq!(particle_count(&config, 800.0, 600.0), 16);
		assert_eq!(particle_count(&config, 0.0, 600.0), 0);
	}

	#[test]
	fn resize_reseeds_population() {
		let mut field = ParticleField::new(ParticleConfig::default(), 5, 1920.0, 1080.0);
		let before = field.particles.clone();
		field.resize(800.0, 600.0);
		assert_eq!(field.len(), 16);
		field.resize(1920.0, 1080.0);
		assert_eq!(field.len(), 40);
		assert_ne!(field.particles, before);
	}

	#[test]
	fn seeded_values_within_ranges() {
		let config = ParticleConfig::default();
		let field = ParticleField::new(config.clone(), 5, 1280.0, 720.0);
		for p in &field.particles {
			assert!((0.0..=1280.0).contains(&p.x));
			assert!((0.0..=720.0).contains(&p.y));
			assert!(p.size >= config.size_min && p.size <= config.size_max);
			assert!(p.opacity >= config.opacity_min && p.opacity <= config.opacity_max);
			assert!(p.speed_x.abs() <= config.drift && p.speed_y.abs() <= config.drift);
			assert!(p.color < 5);
		}
	}

	#[test]
	fn pointer_pushes_nearby_particles_away() {
		let mut field = ParticleField::new(ParticleConfig::default(), 5, 1920.0, 1080.0);
		let p = &mut field.particles[0];
		(p.x, p.y, p.speed_x, p.speed_y) = (500.0, 500.0, 0.0, 0.0);
		field.update(DT, Some((550.0, 500.0)));
		let p = &field.particles[0];
		// force = (100 - 50) / 100 = 0.5, push = 0.5 * 0.3
		assert!((p.x - (500.0 - 0.15)).abs() < 1e-9);
		assert!((p.y - 500.0).abs() < 1e-9);
	}

	#[test]
	fn pointer_on_top_of_particle_is_ignored() {
		let mut field = ParticleField::new(ParticleConfig::default(), 5, 1920.0, 1080.0);
		let p = &mut field.particles[0];
		(p.x, p.y, p.speed_x, p.speed_y) = (500.0, 500.0, 0.0, 0.0);
		field.update(DT, Some((500.0, 500.0)));
		assert!(field.particles[0].x.is_finite());
		assert_eq!(field.particles[0].x, 500.0);
	}

	#[test]
	fn exits_wrap_to_opposite_edge() {
		let mut field = ParticleField::new(ParticleConfig::default(), 5, 1920.0, 1080.0);
		let p = &mut field.particles[0];
		(p.x, p.y, p.speed_x, p.speed_y) = (-9.95, 1089.95, -0.1, 0.1);
		field.update(DT, None);
		let p = &field.particles[0];
		assert_eq!(p.x, 1930.0);
		assert_eq!(p.y, -10.0);
	}

	#[test]
	fn pulse_stays_between_fifth_and_full() {
		let mut field = ParticleField::new(ParticleConfig::default(), 5, 1920.0, 1080.0);
		for _ in 0..600 {
			field.update(DT, None);
			for p in &field.particles {
				let o = p.pulsed_opacity();
				assert!(o >= p.opacity * 0.2 - 1e-12 && o <= p.opacity + 1e-12);
			}
		}
	}

	proptest! {
		#[test]
		fn count_matches_formula(w in 0.0f64..5000.0, h in 0.0f64..5000.0, cap in 0usize..100) {
			let config = ParticleConfig { cap, ..ParticleConfig::default() };
			let expected = cap.min((w * h / config.density).floor() as usize);
			let field = ParticleField::new(config, 5, w, h);
			prop_assert_eq!(field.len(), expected);
		}

		#[test]
		fn particles_stay_within_margin(
			w in 100.0f64..2500.0,
			h in 100.0f64..1500.0,
			pointers in prop::collection::vec(
				prop::option::of((-200.0f64..2700.0, -200.0f64..1700.0)),
				1..200,
			),
		) {
			let mut field = ParticleField::new(ParticleConfig::default(), 5, w, h);
			let margin = field.config.margin;
			for pointer in pointers {
				field.update(DT, pointer);
				for p in &field.particles {
					prop_assert!(p.x >= -margin && p.x <= w + margin, "x={} w={}", p.x, w);
					prop_assert!(p.y >= -margin && p.y <= h + margin, "y={} h={}", p.y, h);
				}
			}
		}
	}
}
