//! Null-safe access to an [***HTMLElement***](https://developer.mozilla.org/en-US/docs/Web/API/HTMLElement) that may not exist.

use crate::{loggable, Error, Result};
use std::borrow::Cow;
use tracing::trace;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

/// Wraps an [`HtmlElement`] reference that may be absent.
///
/// Every accessor is a no-op (or returns [`None`]) on an absent handle, so callers don't need to check first.
/// The wrapped reference is fixed at construction; target a different element by creating a new handle.
///
/// Handles are deliberately not [`Clone`]: each [`Component`](`crate::Component`) instance owns its own.
#[derive(Debug, Default)]
pub struct ElementHandle {
	element: Option<HtmlElement>,
}

impl ElementHandle {
	#[must_use]
	pub fn new(element: Option<HtmlElement>) -> Self {
		Self { element }
	}

	#[must_use]
	pub fn absent() -> Self {
		Self { element: None }
	}

	/// Wraps a foreign value.
	///
	/// `null` and `undefined` produce an absent handle.
	///
	/// # Errors
	///
	/// Iff `value` is neither nullish nor an [`HtmlElement`]: [`Error::InvalidHandleTarget`].
	pub fn try_from_js(value: JsValue) -> Result<Self> {
		if value.is_null() || value.is_undefined() {
			return Ok(Self::absent());
		}
		value
			.dyn_into::<HtmlElement>()
			.map(|element| Self::new(Some(element)))
			.map_err(|_| Error::InvalidHandleTarget)
	}

	#[must_use]
	pub fn get(&self) -> Option<&HtmlElement> {
		self.element.as_ref()
	}

	#[must_use]
	pub fn is_absent(&self) -> bool {
		self.element.is_none()
	}

	/// Sets or, for [`AttributeValue::Absent`], removes the attribute `name`.
	///
	/// # Errors
	///
	/// [`Error::Dom`] iff the DOM rejects `name`.
	pub fn set_attribute(&self, name: &str, value: impl Into<AttributeValue>) -> Result<()> {
		let element = match &self.element {
			Some(element) => element,
			None => return Ok(()),
		};

		let value: AttributeValue = value.into();
		match value.serialize()? {
			None => element.remove_attribute(name).map_err(|e| Error::dom("removeAttribute", &e)),
			Some(value) => element.set_attribute(name, &value).map_err(|e| Error::dom("setAttribute", &e)),
		}
	}

	/// Like [`set_attribute`](`ElementHandle::set_attribute`), but for a value coming from JavaScript.
	///
	/// # Errors
	///
	/// [`Error::UnsupportedAttributeValue`] iff the handle isn't absent and `value` isn't nullish, a boolean, a number or a string.
	pub fn set_attribute_js(&self, name: &str, value: &JsValue) -> Result<()> {
		if self.is_absent() {
			return Ok(());
		}
		let value = AttributeValue::try_from_js(name, value)?;
		self.set_attribute(name, value)
	}

	#[must_use]
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.element.as_ref()?.get_attribute(name)
	}

	/// Reads `data-*` through the element's dataset, so `name` is in camelCase.
	///
	/// Unset and empty values both read as [`None`].
	#[must_use]
	pub fn get_data(&self, name: &str) -> Option<String> {
		self.element.as_ref()?.dataset().get(name).filter(|value| !value.is_empty())
	}

	/// Writes `data-*` through the element's dataset.
	///
	/// Unlike [`set_attribute`](`ElementHandle::set_attribute`), [`AttributeValue::Absent`] does **not** remove
	/// the attribute but sets it to the empty string.
	///
	/// # Errors
	///
	/// [`Error::Dom`] iff the DOM rejects `name`.
	pub fn set_data(&self, name: &str, value: impl Into<AttributeValue>) -> Result<()> {
		let element = match &self.element {
			Some(element) => element,
			None => return Ok(()),
		};

		let value: AttributeValue = value.into();
		let value = value.serialize()?.unwrap_or_default();
		trace!(name, value = loggable(&value), "Setting data attribute.");
		element.dataset().set(name, &value).map_err(|e| Error::dom("dataset[]=", &e))
	}

	/// Like [`set_data`](`ElementHandle::set_data`), but stores the JavaScript string form of any non-nullish `value`.
	///
	/// # Errors
	///
	/// [`Error::Dom`] iff the DOM rejects `name`.
	pub fn set_data_js(&self, name: &str, value: &JsValue) -> Result<()> {
		if value.is_null() || value.is_undefined() {
			return self.set_data(name, AttributeValue::Absent);
		}
		let value = match value.as_string() {
			Some(value) => value,
			None => String::from(value.unchecked_ref::<js_sys::Object>().to_string()),
		};
		self.set_data(name, value)
	}
}

/// A value that can be written to an attribute or `data-*` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
	Absent,
	Text(Cow<'static, str>),
	Bool(bool),
	Number(f64),
}

impl AttributeValue {
	/// # Errors
	///
	/// [`Error::UnsupportedAttributeValue`] for anything but `null`, `undefined`, booleans, numbers and strings.
	pub fn try_from_js(name: &str, value: &JsValue) -> Result<Self> {
		if value.is_null() || value.is_undefined() {
			Ok(Self::Absent)
		} else if let Some(value) = value.as_bool() {
			Ok(Self::Bool(value))
		} else if let Some(value) = value.as_f64() {
			Ok(Self::Number(value))
		} else if let Some(value) = value.as_string() {
			Ok(Self::Text(value.into()))
		} else {
			Err(Error::UnsupportedAttributeValue {
				name: name.to_owned(),
				kind: value.js_typeof().as_string().unwrap_or_default(),
			})
		}
	}

	/// The attribute text, or [`None`] for [`AttributeValue::Absent`].
	///
	/// Numbers are formatted by the host, exactly as `String(number)` would.
	///
	/// # Errors
	///
	/// [`Error::Dom`] iff the host can't format a number.
	pub fn serialize(&self) -> Result<Option<String>> {
		Ok(match self {
			Self::Absent => None,
			Self::Text(text) => Some(text.to_string()),
			Self::Bool(true) => Some("true".to_owned()),
			Self::Bool(false) => Some("false".to_owned()),
			Self::Number(number) => Some(String::from(
				js_sys::Number::from(*number)
					.to_string(10)
					.map_err(|e| Error::dom("Number.prototype.toString", &e))?,
			)),
		})
	}
}

impl From<&'static str> for AttributeValue {
	fn from(value: &'static str) -> Self {
		Self::Text(value.into())
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self {
		Self::Text(value.into())
	}
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! number_from {
	($($ty:ty),*) => {$(
		impl From<$ty> for AttributeValue {
			fn from(value: $ty) -> Self {
				Self::Number(value.into())
			}
		}
	)*};
}
number_from!(f64, f32, i32, u32, i16, u16, i8, u8);

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Absent, Into::into)
	}
}
