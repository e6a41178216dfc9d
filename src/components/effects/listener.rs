//! Event listener registration that unregisters itself on drop.

use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use super::error::Result;

/// A live `addEventListener` registration.
pub struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	/// Register `handler` for `event` on `target`.
	pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
	where
		F: FnMut(Event) + 'static,
	{
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}
