//! Colours used by the effect layers.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with alpha replaced, clamped to [0, 1].
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// Always `rgba(...)` so gradient stops interpolate alpha consistently.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}

	/// `#rrggbb`, alpha dropped.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// A fixed set of colors picked by index.
#[derive(Clone, Debug)]
pub struct Palette {
	/// Colors in index order.
	pub colors: Vec<Color>,
}

impl Palette {
	/// Returned by [`Palette::get`] when the palette has no colors.
	pub const FALLBACK: Color = Color::rgb(139, 92, 246);

	/// Violet and fuchsia accents.
	pub fn violet() -> Self {
		Self {
			colors: vec![
				Color::rgb(139, 92, 246),  // violet-500
				Color::rgb(124, 58, 237),  // violet-600
				Color::rgb(167, 139, 250), // violet-400
				Color::rgb(217, 70, 239),  // fuchsia-500
				Color::rgb(196, 181, 253), // violet-300
			],
		}
	}

	/// Color at `index`, wrapping past the end.
	pub fn get(&self, index: usize) -> Color {
		index
			.checked_rem(self.colors.len())
			.map_or(Self::FALLBACK, |i| self.colors[i])
	}

	/// Number of colors.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// True when there are no colors.
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}
}

/// Spotlight and trail glow colors.
#[derive(Clone, Debug)]
pub struct SpotlightStyle {
	/// Main glow tint
	pub color: Color,
	/// Outer stop tint, used for the soft edge of trail glows
	pub color_secondary: Color,
	/// Alpha stops `(offset, alpha)` of the main glow at full intensity
	pub stops: [(f64, f64); 4],
	/// Offset at which the main glow becomes transparent
	pub fade_at: f64,
}

/// Scroll progress bar gradient.
#[derive(Clone, Debug)]
pub struct ScrollStyle {
	/// Left end of the gradient.
	pub start: Color,
	/// Gradient midpoint.
	pub middle: Color,
	/// Right end of the gradient.
	pub end: Color,
	/// Bar thickness in pixels
	pub height: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Cursor glow.
	pub spotlight: SpotlightStyle,
	/// Particle colors.
	pub particles: Palette,
	/// Scroll bar.
	pub scroll: ScrollStyle,
}

impl Theme {
	/// Violet glow on a dark page (default)
	pub fn violet() -> Self {
		Self {
			spotlight: SpotlightStyle {
				color: Color::rgb(139, 92, 246),
				color_secondary: Color::rgb(124, 58, 237),
				stops: [(0.0, 0.25), (0.2, 0.15), (0.4, 0.08), (0.6, 0.04)],
				fade_at: 0.8,
			},
			particles: Palette::violet(),
			scroll: ScrollStyle {
				start: Color::rgb(139, 92, 246),
				middle: Color::rgb(217, 70, 239),
				end: Color::rgb(139, 92, 246),
				height: 2.0,
			},
		}
	}

	/// CSS `background` value for the scroll bar.
	pub fn scroll_gradient_css(&self) -> String {
		format!(
			"linear-gradient(to right, {}, {}, {})",
			self.scroll.start.to_css_rgb(),
			self.scroll.middle.to_css_rgb(),
			self.scroll.end.to_css_rgb()
		)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::violet()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_wraps_index() {
		let palette = Palette::violet();
		assert_eq!(palette.get(0), palette.get(palette.len()));
	}

	#[test]
	fn empty_palette_falls_back() {
		let palette = Palette { colors: vec![] };
		assert!(palette.is_empty());
		assert_eq!(palette.get(0), Palette::FALLBACK);
		assert_eq!(palette.get(7), Palette::FALLBACK);
	}

	#[test]
	fn with_alpha_clamps() {
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(1.7).a, 1.0);
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(-0.2).a, 0.0);
	}

	#[test]
	fn css_formats() {
		let c = Color::rgba(139, 92, 246, 0.5);
		assert_eq!(c.to_css(), "rgba(139, 92, 246, 0.5)");
		assert_eq!(c.to_css_rgb(), "#8b5cf6");
		assert_eq!(
			Theme::violet().scroll_gradient_css(),
			"linear-gradient(to right, #8b5cf6, #d946ef, #8b5cf6)"
		);
	}

	#[test]
	fn lerp_endpoints() {
		let a = Color::rgba(0, 0, 0, 0.0);
		let b = Color::rgba(200, 100, 50, 1.0);
		assert_eq!(a.lerp(b, 0.0), a);
		assert_eq!(a.lerp(b, 1.0), b);
	}
}
