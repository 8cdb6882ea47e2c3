//! The entry point for page scripts.
//!
//! ```js
//! const components = new Components(document);
//! components.toggleSwitch(document.querySelector("#newsletter"), true);
//! ```

use crate::{install, switch::SwitchRoot, Component, Delegation, Error};
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};
use web_sys::{Document, Element};

/// The built-in components, installed on a document.
///
/// Listeners stay active until this is freed from JavaScript.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Components {
	delegation: Delegation,
}

#[wasm_bindgen]
impl Components {
	#[wasm_bindgen(constructor)]
	#[must_use]
	pub fn new(document: Document) -> Self {
		Self { delegation: install(document) }
	}

	/// # Errors
	///
	/// Iff `element` isn't a switch root.
	#[wasm_bindgen(js_name = isSwitchChecked)]
	pub fn is_switch_checked(&self, element: &Element) -> Result<bool, JsValue> {
		Ok(SwitchRoot::from_element(element).map_err(throwable)?.is_checked())
	}

	/// Sets the switch rooted at `element` to `state`, or flips it if that's `undefined`.
	///
	/// # Errors
	///
	/// Iff `element` isn't a switch root or the DOM rejects the update.
	#[wasm_bindgen(js_name = toggleSwitch)]
	pub fn toggle_switch(&self, element: &Element, state: Option<bool>) -> Result<bool, JsValue> {
		SwitchRoot::from_element(element).and_then(|switch| switch.toggle(state)).map_err(throwable)
	}

	#[wasm_bindgen(js_name = registrationCount)]
	#[must_use]
	pub fn registration_count(&self, event_name: &str) -> usize {
		self.delegation.registration_count(event_name)
	}
}

fn throwable(error: Error) -> JsValue {
	js_sys::Error::new(&error.to_string()).into()
}
