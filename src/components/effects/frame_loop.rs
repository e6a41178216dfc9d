//! Self-rescheduling `requestAnimationFrame` loop with a cancel handle.
//!
//! The callback lives inside the loop's shared state and captures only a weak
//! reference back to it, so dropping the [`FrameLoop`] handle frees the
//! closure and cancels the pending frame. A tick that returns an error is
//! logged and the next frame is still requested.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::error::{EffectsError, Result};

struct LoopState {
	window: Window,
	name: &'static str,
	callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
	pending: Cell<Option<i32>>,
	running: Cell<bool>,
}

impl LoopState {
	fn schedule(&self) {
		if self.pending.get().is_some() || !self.running.get() {
			return;
		}
		if let Some(ref cb) = *self.callback.borrow() {
			match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				Ok(id) => self.pending.set(Some(id)),
				Err(e) => warn!("portfolio-fx: {}: requestAnimationFrame failed: {:?}", self.name, e),
			}
		}
	}

	fn cancel(&self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
	}
}

/// Handle to a running animation loop. Dropping it stops the loop for good.
pub struct FrameLoop {
	state: Rc<LoopState>,
}

impl FrameLoop {
	/// Start calling `tick` with the frame timestamp (ms) once per frame.
	pub fn start<F>(name: &'static str, mut tick: F) -> Result<Self>
	where
		F: FnMut(f64) -> Result<()> + 'static,
	{
		let window = web_sys::window().ok_or_else(|| EffectsError::dom("no window"))?;
		let state = Rc::new(LoopState {
			window,
			name,
			callback: RefCell::new(None),
			pending: Cell::new(None),
			running: Cell::new(true),
		});

		let weak: Weak<LoopState> = Rc::downgrade(&state);
		*state.callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			let Some(state) = weak.upgrade() else {
				return;
			};
			state.pending.set(None);
			if !state.running.get() {
				return;
			}
			if let Err(e) = tick(now) {
				warn!("portfolio-fx: {}: frame failed: {}", state.name, e);
			}
			state.schedule();
		}));
		state.schedule();

		Ok(Self { state })
	}

	/// Stop requesting frames until [`FrameLoop::resume`].
	pub fn pause(&self) {
		self.state.running.set(false);
		self.state.cancel();
	}

	/// Restart a paused loop; no-op while running.
	pub fn resume(&self) {
		if !self.state.running.replace(true) {
			self.state.schedule();
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.state.running.set(false);
		self.state.cancel();
	}
}
