use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Contract violations raised while binding markup to components.
///
/// Lookups that can legitimately come up empty ([`child_element`](`crate::component::child_element`),
/// [`Component::find_child_of`](`crate::Component::find_child_of`)) never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	#[error("invalid element provided for an element handle")]
	InvalidHandleTarget,

	#[error("invalid value type for attribute `{name}`: {kind}")]
	UnsupportedAttributeValue { name: String, kind: String },

	#[error("invalid element provided as custom event target")]
	InvalidDispatchTarget,

	#[error("component type does not declare a component tag")]
	UnimplementedTag,

	#[error("invalid root element provided for component")]
	InvalidRoot,

	#[error("root element must have a `data-component` attribute")]
	MissingComponentMarker,

	#[error("root element must have a `data-component` attribute matching `{expected}`, found `{found}`")]
	ComponentTagMismatch { expected: &'static str, found: String },

	#[error("no element found for selector `{selector}`")]
	NoMatch { selector: String },

	/// The host DOM threw, e.g. on invalid selector syntax or an invalid attribute name.
	#[error("`{operation}` failed: {message}")]
	Dom { operation: &'static str, message: String },
}

impl Error {
	pub(crate) fn dom(operation: &'static str, exception: &JsValue) -> Self {
		let message = match exception.dyn_ref::<js_sys::Error>() {
			Some(error) => String::from(error.message()),
			None => format!("{:?}", exception),
		};
		Self::Dom { operation, message }
	}
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
