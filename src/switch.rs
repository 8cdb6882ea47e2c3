//! A toggle switch made of a root, a thumb and a hidden form input.
//!
//! ```html
//! <button data-component="cc-switch-root" role="switch" data-state="unchecked" aria-checked="false">
//! 	<span data-component="cc-switch-thumb" data-state="unchecked"></span>
//! 	<input data-component="cc-switch-input" type="hidden" name="…" disabled="disabled">
//! </button>
//! ```
//!
//! The on/off state lives entirely in these attributes.

use crate::{delegation::detail_object, Component, Delegation, ElementHandle, Result};
use tracing::{error, instrument};
use wasm_bindgen::JsValue;

/// Fired on [`SwitchRoot`] when its state changes, with `detail` `{ checked: boolean }`.
pub const EVENT_CHANGE: &str = "change";

const STATE: &str = "state";
const CHECKED: &str = "checked";
const UNCHECKED: &str = "unchecked";

#[derive(Debug)]
pub struct SwitchRoot {
	root: ElementHandle,
}

impl Component for SwitchRoot {
	const TAG: &'static str = "cc-switch-root";

	fn from_handle(root: ElementHandle) -> Self {
		Self { root }
	}

	fn handle(&self) -> &ElementHandle {
		&self.root
	}

	fn init(delegation: &Delegation) {
		Self::on(delegation, "click", |switch| {
			if let Err(error) = switch.toggle(None) {
				error!("Could not toggle switch: {}", error)
			}
		});
	}
}

impl SwitchRoot {
	#[must_use]
	pub fn is_checked(&self) -> bool {
		self.root.get_data(STATE).as_deref() == Some(CHECKED)
	}

	/// Sets the switch to `state`, or flips it if [`None`].
	///
	/// Iff that changes the state, the thumb and input are updated and [`EVENT_CHANGE`] is dispatched on the root.
	/// The event has been fully processed when this returns.
	///
	/// Returns whether the state changed.
	///
	/// # Errors
	///
	/// Iff the DOM rejects an attribute update or the event.
	#[instrument]
	pub fn toggle(&self, state: Option<bool>) -> Result<bool> {
		if self.is_missing() {
			return Ok(false);
		}

		let old_state = self.is_checked();
		let new_state = state.unwrap_or(!old_state);
		if new_state == old_state {
			return Ok(false);
		}

		let input = SwitchInput::find_child_of(self);
		let thumb = SwitchThumb::find_child_of(self);
		if new_state {
			self.root.set_data(STATE, CHECKED)?;
			self.root.set_attribute("aria-checked", true)?;
			input.set_enabled()?;
			thumb.set_enabled()?;
		} else {
			self.root.set_data(STATE, UNCHECKED)?;
			self.root.set_attribute("aria-checked", false)?;
			input.set_disabled()?;
			thumb.set_disabled()?;
		}

		let detail = detail_object(&[(CHECKED, JsValue::from_bool(new_state))])?;
		self.dispatch_event(EVENT_CHANGE, &detail)?;
		Ok(true)
	}
}

#[derive(Debug)]
pub struct SwitchThumb {
	thumb: ElementHandle,
}

impl Component for SwitchThumb {
	const TAG: &'static str = "cc-switch-thumb";

	fn from_handle(thumb: ElementHandle) -> Self {
		Self { thumb }
	}

	fn handle(&self) -> &ElementHandle {
		&self.thumb
	}
}

impl SwitchThumb {
	/// # Errors
	///
	/// [`Error::Dom`](`crate::Error::Dom`) iff the DOM rejects the attribute update.
	pub fn set_enabled(&self) -> Result<()> {
		self.thumb.set_data(STATE, CHECKED)
	}

	/// # Errors
	///
	/// [`Error::Dom`](`crate::Error::Dom`) iff the DOM rejects the attribute update.
	pub fn set_disabled(&self) -> Result<()> {
		self.thumb.set_data(STATE, UNCHECKED)
	}
}

/// The hidden input carrying the switch's value in form submissions, which is only submitted while enabled.
#[derive(Debug)]
pub struct SwitchInput {
	input: ElementHandle,
}

impl Component for SwitchInput {
	const TAG: &'static str = "cc-switch-input";

	fn from_handle(input: ElementHandle) -> Self {
		Self { input }
	}

	fn handle(&self) -> &ElementHandle {
		&self.input
	}
}

impl SwitchInput {
	/// # Errors
	///
	/// [`Error::Dom`](`crate::Error::Dom`) iff the DOM rejects the attribute update.
	pub fn set_enabled(&self) -> Result<()> {
		self.input.set_attribute("disabled", None::<&'static str>)
	}

	/// # Errors
	///
	/// [`Error::Dom`](`crate::Error::Dom`) iff the DOM rejects the attribute update.
	pub fn set_disabled(&self) -> Result<()> {
		self.input.set_attribute("disabled", "disabled")
	}
}
