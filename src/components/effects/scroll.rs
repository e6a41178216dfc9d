//! Scroll progress arithmetic.

/// Percentage of the document scrolled, in [0, 100].
///
/// Returns 0 when the document is not taller than the viewport.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
	let scrollable = scroll_height - viewport_height;
	if scrollable <= 0.0 || !scrollable.is_finite() {
		return 0.0;
	}
	(scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}
