//! Leptos components wrapping the effect layers.
//!
//! Each component renders a fixed, input-transparent overlay and, once the
//! element is mounted, attaches its listeners and starts its frame loop. All of
//! that lives in a mount struct whose drop removes the listeners and cancels
//! the loop; the struct is dropped from `on_cleanup`.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Element, Event, HtmlCanvasElement, MouseEvent, Window,
};

use super::capability::Capabilities;
use super::config::EffectsConfig;
use super::error::{EffectsError, Result};
use super::frame_loop::FrameLoop;
use super::listener::Listener;
use super::particles::ParticleField;
use super::pointer::{INTERACTIVE_SELECTOR, PointerTracker};
use super::render;
use super::scroll::scroll_progress;
use super::spotlight::Spotlight;
use super::theme::Theme;
use super::trail::TrailAccumulator;

const SPOTLIGHT_STYLE: &str = "position: fixed; inset: 0; pointer-events: none; z-index: 50;";
const SCROLL_STYLE: &str = "position: fixed; top: 0; left: 0; z-index: 60; pointer-events: none; \
	transition: width 150ms;";
const PARTICLE_STYLE: &str =
	"position: fixed; inset: 0; pointer-events: none; z-index: 0; mix-blend-mode: screen;";

/// Frame delta used before the first timestamp pair is known.
const FIRST_FRAME_DT: f64 = 1.0 / 60.0;
/// Longest step the simulations take, so a stalled tab does not teleport particles.
const MAX_FRAME_DT: f64 = 0.1;

fn frame_dt(last: &mut Option<f64>, now: f64) -> f64 {
	let dt = match *last {
		Some(prev) => ((now - prev) / 1000.0).clamp(0.0, MAX_FRAME_DT),
		None => FIRST_FRAME_DT,
	};
	*last = Some(now);
	dt
}

fn window() -> Result<Window> {
	web_sys::window().ok_or_else(|| EffectsError::dom("no window"))
}

fn document(window: &Window) -> Result<Document> {
	window.document().ok_or_else(|| EffectsError::dom("no document"))
}

fn viewport_size(window: &Window) -> Result<(f64, f64)> {
	let w = window.inner_width()?.as_f64().unwrap_or(0.0);
	let h = window.inner_height()?.as_f64().unwrap_or(0.0);
	Ok((w, h))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| EffectsError::dom("canvas has no 2d context"))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| EffectsError::dom("context is not CanvasRenderingContext2d"))
}

fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	canvas.set_width(width.max(0.0) as u32);
	canvas.set_height(height.max(0.0) as u32);
}

/// Drops `mount` when the owning component is torn down.
fn drop_on_cleanup<T: 'static>(mount: Rc<RefCell<Option<T>>>) {
	let guard = SendWrapper::new(mount);
	on_cleanup(move || {
		let mount = guard.take();
		mount.borrow_mut().take();
	});
}

/// Per-frame state shared by the cursor listeners and frame loop.
struct CursorState {
	tracker: PointerTracker,
	trail: TrailAccumulator,
	spotlight: Spotlight,
	width: f64,
	height: f64,
	last_frame: Option<f64>,
	painted: bool,
}

impl CursorState {
	fn new(config: &EffectsConfig, width: f64, height: f64) -> Self {
		Self {
			tracker: PointerTracker::new(config.pointer.clone()),
			trail: TrailAccumulator::new(config.trail.clone()),
			spotlight: Spotlight::new(config.spotlight.clone()),
			width,
			height,
			last_frame: None,
			painted: false,
		}
	}

	/// Idle check, then trail fade, then spotlight transition. Returns `dt`.
	fn step(&mut self, now: f64) -> f64 {
		let dt = frame_dt(&mut self.last_frame, now);
		if self.tracker.expire(now) {
			self.trail.clear();
		}
		self.trail.decay();
		self.spotlight.tick(dt, &self.tracker);
		dt
	}

	fn frame(&mut self, now: f64, ctx: &CanvasRenderingContext2d, theme: &Theme) -> Result<()> {
		self.step(now);

		let visible = self.spotlight.is_visible();
		if visible || self.painted {
			let glows = self.spotlight.glows(&self.tracker, &self.trail);
			render::paint_spotlight(ctx, self.width, self.height, &glows, &theme.spotlight)?;
		}
		self.painted = visible;
		Ok(())
	}
}

/// Listeners and frame loop of a mounted [`CursorSpotlight`]. Field order is
/// drop order: listeners go first.
struct CursorMount {
	_listeners: Vec<Listener>,
	_frame: FrameLoop,
}

impl CursorMount {
	fn attach(canvas: HtmlCanvasElement, config: &EffectsConfig, theme: Theme) -> Result<Self> {
		let window = window()?;
		let document = document(&window)?;
		let (width, height) = viewport_size(&window)?;
		size_canvas(&canvas, width, height);
		let ctx = context_2d(&canvas)?;

		let state = Rc::new(RefCell::new(CursorState::new(config, width, height)));

		let mut listeners = Vec::with_capacity(5);

		let s = state.clone();
		listeners.push(Listener::new(&document, "mousemove", move |ev: Event| {
			let Some(mouse) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			let mut s = s.borrow_mut();
			let (x, y) = (mouse.client_x() as f64, mouse.client_y() as f64);
			if let Some(sample) = s.tracker.on_move(x, y, ev.time_stamp()) {
				s.trail.record(&sample);
			}
		})?);

		let s = state.clone();
		listeners.push(Listener::new(&document, "mouseover", move |ev: Event| {
			let over = ev
				.target()
				.and_then(|t| t.dyn_into::<Element>().ok())
				.and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
				.is_some();
			s.borrow_mut().tracker.set_interactive(over);
		})?);

		let s = state.clone();
		listeners.push(Listener::new(&document, "mouseout", move |_: Event| {
			s.borrow_mut().tracker.set_interactive(false);
		})?);

		if let Some(root) = document.document_element() {
			let s = state.clone();
			listeners.push(Listener::new(&root, "mouseleave", move |_: Event| {
				let mut s = s.borrow_mut();
				s.tracker.leave();
				s.trail.clear();
			})?);
		}

		let (s, resize_canvas) = (state.clone(), canvas.clone());
		listeners.push(Listener::new(&window, "resize", move |_: Event| {
			let Ok(win) = self::window() else {
				return;
			};
			match viewport_size(&win) {
				Ok((w, h)) => {
					size_canvas(&resize_canvas, w, h);
					let mut s = s.borrow_mut();
					s.width = w;
					s.height = h;
				}
				Err(e) => warn!("portfolio-fx: cursor resize: {}", e),
			}
		})?);

		let s = state;
		let frame = FrameLoop::start("cursor", move |now| s.borrow_mut().frame(now, &ctx, &theme))?;

		Ok(Self {
			_listeners: listeners,
			_frame: frame,
		})
	}
}

/// Cursor-following spotlight with a fading comet trail.
///
/// Renders nothing, and attaches nothing, on devices without a fine pointer or
/// when the user prefers reduced motion. The check runs once at creation.
#[component]
pub fn CursorSpotlight(
	/// Tuning constants; defaults match the site's look.
	#[prop(optional)]
	config: EffectsConfig,
	/// Glow colors.
	#[prop(optional)]
	theme: Theme,
) -> impl IntoView {
	let caps = web_sys::window().map(|w| Capabilities::detect(&w));
	if !caps.is_some_and(|c| c.cursor_effects()) {
		info!("portfolio-fx: cursor effects disabled ({:?})", caps);
		return None;
	}

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mount: Rc<RefCell<Option<CursorMount>>> = Rc::new(RefCell::new(None));
	let mount_init = mount.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if mount_init.borrow().is_some() {
			return;
		}
		match CursorMount::attach(canvas.into(), &config, theme.clone()) {
			Ok(m) => {
				info!("portfolio-fx: cursor spotlight mounted");
				*mount_init.borrow_mut() = Some(m);
			}
			Err(e) => warn!("portfolio-fx: cursor spotlight not mounted: {}", e),
		}
	});
	drop_on_cleanup(mount);

	Some(view! {
		<canvas node_ref=canvas_ref class="cursor-spotlight" aria-hidden="true" style=SPOTLIGHT_STYLE />
	})
}

struct ParticleState {
	field: ParticleField,
	pointer: Option<(f64, f64)>,
	last_frame: Option<f64>,
}

/// Listeners and frame loop of a mounted [`SparkleParticles`].
struct ParticleMount {
	_listeners: Vec<Listener>,
	_frame: Rc<FrameLoop>,
}

impl ParticleMount {
	fn attach(canvas: HtmlCanvasElement, config: &EffectsConfig, theme: Theme) -> Result<Self> {
		let window = window()?;
		let document = document(&window)?;
		let (width, height) = viewport_size(&window)?;
		size_canvas(&canvas, width, height);
		let ctx = context_2d(&canvas)?;

		let field = ParticleField::new(config.particles.clone(), theme.particles.len(), width, height);
		info!("portfolio-fx: {} particles for {}x{}", field.len(), width, height);
		let state = Rc::new(RefCell::new(ParticleState {
			field,
			pointer: None,
			last_frame: None,
		}));

		let s = state.clone();
		let frame = Rc::new(FrameLoop::start("particles", move |now| {
			let mut s = s.borrow_mut();
			let dt = frame_dt(&mut s.last_frame, now);
			let pointer = s.pointer;
			s.field.update(dt, pointer);
			render::paint_particles(&ctx, &s.field, &theme.particles)
		})?);
		if document.hidden() {
			frame.pause();
		}

		let mut listeners = Vec::with_capacity(3);

		let s = state.clone();
		listeners.push(Listener::new(&window, "mousemove", move |ev: Event| {
			if let Some(mouse) = ev.dyn_ref::<MouseEvent>() {
				s.borrow_mut().pointer = Some((mouse.client_x() as f64, mouse.client_y() as f64));
			}
		})?);

		let s = state.clone();
		listeners.push(Listener::new(&window, "resize", move |_: Event| {
			let Ok(win) = self::window() else {
				return;
			};
			match viewport_size(&win) {
				Ok((w, h)) => {
					size_canvas(&canvas, w, h);
					let mut s = s.borrow_mut();
					s.field.resize(w, h);
					debug!("portfolio-fx: re-seeded {} particles for {}x{}", s.field.len(), w, h);
				}
				Err(e) => warn!("portfolio-fx: particle resize: {}", e),
			}
		})?);

		let (s, loop_handle, doc) = (state, frame.clone(), document.clone());
		listeners.push(Listener::new(&document, "visibilitychange", move |_: Event| {
			if doc.hidden() {
				loop_handle.pause();
				debug!("portfolio-fx: particles paused");
			} else {
				s.borrow_mut().last_frame = None;
				loop_handle.resume();
				debug!("portfolio-fx: particles resumed");
			}
		})?);

		Ok(Self {
			_listeners: listeners,
			_frame: frame,
		})
	}
}

/// Full-viewport field of drifting, pulsing particles that shy away from the
/// pointer. Suspends while the tab is hidden; renders nothing when the user
/// prefers reduced motion.
#[component]
pub fn SparkleParticles(
	/// Tuning constants; defaults match the site's look.
	#[prop(optional)]
	config: EffectsConfig,
	/// Particle palette.
	#[prop(optional)]
	theme: Theme,
) -> impl IntoView {
	let caps = web_sys::window().map(|w| Capabilities::detect(&w));
	if !caps.is_some_and(|c| c.ambient_motion()) {
		info!("portfolio-fx: particles disabled ({:?})", caps);
		return None;
	}

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mount: Rc<RefCell<Option<ParticleMount>>> = Rc::new(RefCell::new(None));
	let mount_init = mount.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if mount_init.borrow().is_some() {
			return;
		}
		match ParticleMount::attach(canvas.into(), &config, theme.clone()) {
			Ok(m) => *mount_init.borrow_mut() = Some(m),
			Err(e) => warn!("portfolio-fx: particles not mounted: {}", e),
		}
	});
	drop_on_cleanup(mount);

	Some(view! {
		<canvas node_ref=canvas_ref class="sparkle-particles" aria-hidden="true" style=PARTICLE_STYLE />
	})
}

fn read_scroll_progress() -> Result<f64> {
	let window = window()?;
	let root = document(&window)?
		.document_element()
		.ok_or_else(|| EffectsError::dom("no document element"))?;
	let (_, viewport_height) = viewport_size(&window)?;
	Ok(scroll_progress(window.scroll_y()?, root.scroll_height() as f64, viewport_height))
}

/// Thin bar across the top of the viewport showing how far the page is scrolled.
#[component]
pub fn ScrollProgress(
	/// Bar gradient.
	#[prop(optional)]
	theme: Theme,
) -> impl IntoView {
	let (progress, set_progress) = signal(0.0f64);
	let listeners: Rc<RefCell<Option<Vec<Listener>>>> = Rc::new(RefCell::new(None));
	let listeners_init = listeners.clone();

	let update = move |_: Event| match read_scroll_progress() {
		Ok(p) => set_progress.set(p),
		Err(e) => warn!("portfolio-fx: scroll progress: {}", e),
	};

	Effect::new(move |_| {
		if listeners_init.borrow().is_some() {
			return;
		}
		let attached = window().and_then(|win| {
			Ok(vec![
				Listener::new(&win, "scroll", update)?,
				Listener::new(&win, "resize", update)?,
			])
		});
		match attached {
			Ok(l) => {
				if let Ok(p) = read_scroll_progress() {
					set_progress.set(p);
				}
				*listeners_init.borrow_mut() = Some(l);
			}
			Err(e) => warn!("portfolio-fx: scroll progress not mounted: {}", e),
		}
	});
	drop_on_cleanup(listeners);

	let (background, height) = (theme.scroll_gradient_css(), theme.scroll.height);
	view! {
		<div
			class="scroll-progress"
			aria-hidden="true"
			style=move || {
				format!(
					"{} height: {}px; background: {}; width: {}%;",
					SCROLL_STYLE,
					height,
					background,
					progress.get(),
				)
			}
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::super::config::TrailConfig;
	use super::*;

	const FRAME_MS: f64 = 1000.0 / 60.0;

	#[test]
	fn frame_dt_clamps_stalls() {
		let mut last = None;
		assert_eq!(frame_dt(&mut last, 1000.0), FIRST_FRAME_DT);
		assert_eq!(frame_dt(&mut last, 5000.0), MAX_FRAME_DT);
		assert_eq!(frame_dt(&mut last, 4000.0), 0.0);
	}

	#[test]
	fn idle_clears_trail_and_fades_spotlight_out() {
		let mut state = CursorState::new(&EffectsConfig::default(), 1920.0, 1080.0);
		let mut now = 0.0;

		for i in 0..6 {
			let x = 100.0 + 10.0 * i as f64;
			if let Some(sample) = state.tracker.on_move(x, 100.0, now) {
				state.trail.record(&sample);
			}
			state.step(now);
			now += FRAME_MS;
		}
		assert!(state.tracker.is_active());
		assert!(!state.trail.is_empty());
		assert!(state.spotlight.is_visible());

		// Run frames until the idle deadline passes; the trail is dropped at
		// the expiring frame rather than left to decay.
		while state.tracker.is_active() {
			state.step(now);
			now += FRAME_MS;
		}
		assert!(state.trail.is_empty());

		for _ in 0..120 {
			state.step(now);
			now += FRAME_MS;
		}
		assert_eq!(state.spotlight.opacity(), 0.0);
		assert!(!state.spotlight.is_visible());
	}

	#[test]
	fn trail_is_cleared_before_decay_on_expiry() {
		let config = EffectsConfig {
			trail: TrailConfig {
				decay: 1.0,
				..TrailConfig::default()
			},
			..EffectsConfig::default()
		};
		let mut state = CursorState::new(&config, 800.0, 600.0);
		state.tracker.on_move(0.0, 0.0, 0.0);
		if let Some(sample) = state.tracker.on_move(50.0, 0.0, 20.0) {
			state.trail.record(&sample);
		}
		state.step(20.0);
		// Without decay the point would live forever; only expiry removes it.
		assert_eq!(state.trail.len(), 1);
		state.step(400.0);
		assert!(state.trail.is_empty());
		assert!(!state.tracker.is_active());
	}
}
