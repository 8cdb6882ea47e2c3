//! Binding marked markup to typed component instances.

use crate::{delegation, describe, Delegation, ElementHandle, Error, Result};
use tracing::{debug, error, instrument, trace};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// The attribute naming which [`Component`] an element is the root of.
pub const MARKER_ATTRIBUTE: &str = "data-component";

/// A behaviour bound to elements marked with `data-component="{TAG}"`.
///
/// Instances hold no state beyond their [`ElementHandle`]: everything else lives in the DOM and is re-read on demand.
/// They are created on demand and never cached.
///
/// An instance whose handle is absent is this type's stand-in for "not found" (see [`Component::missing`]).
/// Implementations should route all of their DOM access through the handle so that the stand-in stays inert.
pub trait Component: Sized {
	/// The marker value. Must be unique and non-empty.
	const TAG: &'static str;

	/// Wraps `handle` **without** validating it. Use [`Component::from_element`] instead.
	fn from_handle(handle: ElementHandle) -> Self;

	fn handle(&self) -> &ElementHandle;

	/// One-time static wiring, usually delegated listeners via [`Component::on`].
	fn init(_delegation: &Delegation) {}

	/// Per-instance setup, called by [`Component::init_all`].
	fn init_instance(&self) {}

	/// The CSS selector for this type's root elements.
	#[must_use]
	fn selector() -> String {
		format!("[{}=\"{}\"]", MARKER_ATTRIBUTE, Self::TAG)
	}

	/// # Errors
	///
	/// - [`Error::InvalidRoot`] iff `element` isn't an [`HtmlElement`],
	/// - [`Error::MissingComponentMarker`] iff `element` has no (or an empty) `data-component` attribute,
	/// - [`Error::UnimplementedTag`] iff [`Component::TAG`] is empty,
	/// - [`Error::ComponentTagMismatch`] iff the marker names another component.
	fn from_element(element: &Element) -> Result<Self> {
		let element = element.dyn_ref::<HtmlElement>().ok_or(Error::InvalidRoot)?;

		let marker = element
			.get_attribute(MARKER_ATTRIBUTE)
			.filter(|marker| !marker.is_empty())
			.ok_or(Error::MissingComponentMarker)?;

		if Self::TAG.is_empty() {
			return Err(Error::UnimplementedTag);
		}
		if marker != Self::TAG {
			return Err(Error::ComponentTagMismatch {
				expected: Self::TAG,
				found: marker,
			});
		}

		Ok(Self::from_handle(ElementHandle::new(Some(element.clone()))))
	}

	/// The first element in `document` matching `selector`, as `Self`.
	///
	/// # Errors
	///
	/// - [`Error::NoMatch`] iff nothing matches,
	/// - [`Error::Dom`] iff `selector` is invalid,
	/// - any error of [`Component::from_element`].
	fn select(document: &Document, selector: &str) -> Result<Self> {
		let element = document
			.query_selector(selector)
			.map_err(|e| Error::dom("querySelector", &e))?
			.ok_or_else(|| Error::NoMatch { selector: selector.to_owned() })?;
		Self::from_element(&element)
	}

	/// Every element in `document` matching `selector`, as `Self`, in document order.
	///
	/// # Errors
	///
	/// As [`Component::select`], failing on the first element that can't be bound.
	fn select_all(document: &Document, selector: &str) -> Result<Vec<Self>> {
		let elements = query_elements(document, selector)?;
		if elements.is_empty() {
			return Err(Error::NoMatch { selector: selector.to_owned() });
		}
		elements.iter().map(Self::from_element).collect()
	}

	/// Binds every current instance in `document` and calls [`Component::init_instance`] on it.
	///
	/// Returns how many instances were initialised, which may be zero.
	///
	/// # Errors
	///
	/// As [`Component::select_all`], except that no match isn't an error.
	#[instrument(skip(document), fields(tag = Self::TAG))]
	fn init_all(document: &Document) -> Result<usize> {
		let elements = query_elements(document, &Self::selector())?;
		for element in &elements {
			Self::from_element(element)?.init_instance();
		}
		debug!("Initialised {} instance(s).", elements.len());
		Ok(elements.len())
	}

	/// Registers `callback` for `event_name` events within any instance of this component.
	#[instrument(skip(delegation, callback), fields(tag = Self::TAG))]
	fn on(delegation: &Delegation, event_name: &str, callback: impl Fn(Self) + 'static)
	where
		Self: 'static,
	{
		delegation.on_delegated(&Self::selector(), event_name, move |element, _event| match Self::from_element(element) {
			Ok(instance) => callback(instance),
			Err(error) => error!("Could not bind {} as {:?}: {}", describe(element), Self::TAG, error),
		});
	}

	/// Fires a bubbling custom event on this instance's element.
	///
	/// Returns `false` without dispatching if this is a stand-in or its element isn't connected to a document,
	/// otherwise whether the event wasn't cancelled.
	///
	/// # Errors
	///
	/// As [`delegation::dispatch`].
	fn dispatch_event(&self, event_name: &str, detail: &JsValue) -> Result<bool> {
		match self.handle().get() {
			Some(element) if element.is_connected() => delegation::dispatch(element, event_name, detail),
			Some(element) => {
				debug!("Not dispatching {:?} on detached {}.", event_name, describe(element));
				Ok(false)
			}
			None => Ok(false),
		}
	}

	/// See [`child_element`].
	#[must_use]
	fn child_element(&self, selector: &str) -> ElementHandle {
		child_element(self.handle(), selector)
	}

	/// The nearest instance of this component owned by `root`, or the [stand-in](`Component::missing`).
	#[must_use]
	fn find_child_of(root: &(impl ComponentRoot + ?Sized)) -> Self {
		let handle = child_element(root, &Self::selector());
		let element = match handle.get() {
			Some(element) => element,
			None => return Self::missing(),
		};
		Self::from_element(element).unwrap_or_else(|error| {
			debug!("Found {} but could not bind it as {:?}: {}", describe(element), Self::TAG, error);
			Self::missing()
		})
	}

	/// An inert instance standing in for one that wasn't found.
	#[must_use]
	fn missing() -> Self {
		Self::from_handle(ElementHandle::absent())
	}

	#[must_use]
	fn is_missing(&self) -> bool {
		self.handle().is_absent()
	}
}

/// Anything that can serve as the root of a component lookup.
pub trait ComponentRoot {
	fn root_element(&self) -> Option<&HtmlElement>;
}

impl ComponentRoot for HtmlElement {
	fn root_element(&self) -> Option<&HtmlElement> {
		Some(self)
	}
}

impl ComponentRoot for Element {
	fn root_element(&self) -> Option<&HtmlElement> {
		self.dyn_ref()
	}
}

impl ComponentRoot for ElementHandle {
	fn root_element(&self) -> Option<&HtmlElement> {
		self.get()
	}
}

impl<C: Component> ComponentRoot for C {
	fn root_element(&self) -> Option<&HtmlElement> {
		self.handle().get()
	}
}

/// The first descendant of `root`, in document order, that matches `selector` and belongs to `root` directly.
///
/// Elements marked with `data-component` may match themselves, but their subtrees belong to them and aren't searched.
///
/// Never fails: an absent root, no match or an invalid selector all result in an absent handle.
#[must_use]
pub fn child_element(root: &(impl ComponentRoot + ?Sized), selector: &str) -> ElementHandle {
	let root = match root.root_element() {
		Some(root) => root,
		None => return ElementHandle::absent(),
	};
	let root: &Element = root;

	let mut current = root.first_element_child();
	while let Some(element) = current {
		match element.matches(selector) {
			Ok(true) => {
				if let Some(found) = element.dyn_ref::<HtmlElement>() {
					trace!(selector, "Found {}.", describe(found));
					return ElementHandle::new(Some(found.clone()));
				}
			}
			Ok(false) => (),
			Err(exception) => {
				error!("Invalid child selector: {}", Error::dom("matches", &exception));
				return ElementHandle::absent();
			}
		}

		let descend = !element.has_attribute(MARKER_ATTRIBUTE);
		current = next_in_subtree(root, &element, descend);
	}
	ElementHandle::absent()
}

/// The element following `element` in a pre-order walk of `root`'s subtree.
fn next_in_subtree(root: &Element, element: &Element, descend: bool) -> Option<Element> {
	if descend {
		if let Some(child) = element.first_element_child() {
			return Some(child);
		}
	}

	let mut ancestor = element.clone();
	loop {
		if let Some(sibling) = ancestor.next_element_sibling() {
			return Some(sibling);
		}
		ancestor = ancestor.parent_element()?;
		if &ancestor == root {
			return None;
		}
	}
}

fn query_elements(document: &Document, selector: &str) -> Result<Vec<Element>> {
	let nodes = document.query_selector_all(selector).map_err(|e| Error::dom("querySelectorAll", &e))?;
	Ok((0..nodes.length())
		.filter_map(|i| nodes.get(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect())
}
