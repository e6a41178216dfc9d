//! One-shot device capability detection.
//!
//! The flags are read once when a layer mounts and never re-polled; a layer
//! that is disabled at mount stays disabled for its lifetime.

use log::debug;
use web_sys::Window;

/// What the host device can do, as far as cursor effects are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
	/// A precise pointing device (mouse, trackpad) is present.
	pub fine_pointer: bool,
	/// The device accepts touch input (`maxTouchPoints > 0`), whether or not it
	/// also has a fine pointer.
	pub touch: bool,
	/// The user asked for reduced motion.
	pub reduced_motion: bool,
}

impl Capabilities {
	/// Desktop with a mouse and animations allowed.
	pub const DESKTOP: Self = Self {
		fine_pointer: true,
		touch: false,
		reduced_motion: false,
	};

	/// Query the window's media features.
	///
	/// Any query that cannot be evaluated is treated as the conservative answer
	/// (no fine pointer, reduced motion), which disables cursor effects.
	pub fn detect(window: &Window) -> Self {
		let fine_pointer = media_matches(window, "(pointer: fine)").unwrap_or(false);
		let reduced_motion =
			media_matches(window, "(prefers-reduced-motion: reduce)").unwrap_or(true);
		let touch = window.navigator().max_touch_points() > 0;
		let caps = Self {
			fine_pointer,
			touch,
			reduced_motion,
		};
		debug!("portfolio-fx: detected {:?}", caps);
		caps
	}

	/// The cursor spotlight and trail run only with a fine pointer, no touch
	/// support and motion allowed. Hybrid devices count as touch-first.
	pub fn cursor_effects(&self) -> bool {
		self.fine_pointer && !self.touch && !self.reduced_motion
	}

	/// Ambient particles only respect the reduced-motion preference.
	pub fn ambient_motion(&self) -> bool {
		!self.reduced_motion
	}
}

fn media_matches(window: &Window, query: &str) -> Option<bool> {
	window
		.match_media(query)
		.ok()
		.flatten()
		.map(|list| list.matches())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn desktop_enables_everything() {
		assert!(Capabilities::DESKTOP.cursor_effects());
		assert!(Capabilities::DESKTOP.ambient_motion());
	}

	#[test]
	fn coarse_pointer_disables_cursor_effects() {
		let caps = Capabilities {
			fine_pointer: false,
			touch: true,
			reduced_motion: false,
		};
		assert!(!caps.cursor_effects());
		assert!(caps.ambient_motion());
	}

	#[test]
	fn touch_capable_device_with_fine_pointer_is_touch_first() {
		let caps = Capabilities {
			touch: true,
			..Capabilities::DESKTOP
		};
		assert!(!caps.cursor_effects());
		assert!(caps.ambient_motion());
	}

	#[test]
	fn reduced_motion_disables_all_motion() {
		let caps = Capabilities {
			reduced_motion: true,
			..Capabilities::DESKTOP
		};
		assert!(!caps.cursor_effects());
		assert!(!caps.ambient_motion());
	}
}
