//! Document-level delegated listeners and custom event dispatch.

use crate::{describe, Error, Result};
use hashbrown::HashMap;
use std::{cell::RefCell, rc::Rc};
use tracing::{error, instrument, trace, trace_span};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, Element, Event, HtmlElement};

type Callback = dyn Fn(&HtmlElement, &Event);

struct Registration {
	selector: String,
	callback: Box<Callback>,
}

/// One real document listener per event name, routing to its registrations in order.
struct EventRoute {
	registrations: Rc<RefCell<Vec<Rc<Registration>>>>,
	common_handler: Closure<dyn Fn(Event)>,
}

/// The registry of delegated listeners for one [`Document`].
///
/// The first registration for an event name installs a single listener on the document;
/// later registrations for the same name are appended and fire after it, in registration order.
///
/// There is no way to remove individual registrations.
/// Dropping the registry detaches all of its document listeners, so keep it alive for as long as the page is.
pub struct Delegation {
	document: Document,
	routes: RefCell<HashMap<String, EventRoute>>,
}

impl core::fmt::Debug for Delegation {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Delegation")
			.field("document", &self.document)
			.field("events", &self.routes.borrow().keys().collect::<Vec<_>>())
			.finish()
	}
}

impl Delegation {
	#[must_use]
	pub fn new(document: Document) -> Self {
		Self {
			document,
			routes: RefCell::default(),
		}
	}

	#[must_use]
	pub fn document(&self) -> &Document {
		&self.document
	}

	/// Calls `callback` with the nearest ancestor-or-self of an `event_name` event's target that matches `selector`.
	///
	/// Events whose target isn't an [`HtmlElement`], or that have no matching ancestor, are ignored.
	#[instrument(skip(callback))]
	pub fn on_delegated(&self, selector: &str, event_name: &str, callback: impl Fn(&HtmlElement, &Event) + 'static) {
		let registration = Rc::new(Registration {
			selector: selector.to_owned(),
			callback: Box::new(callback),
		});

		let mut routes = self.routes.borrow_mut();
		if let Some(route) = routes.get(event_name) {
			route.registrations.borrow_mut().push(registration);
			trace!("Appended to existing route.");
			return;
		}

		let registrations = Rc::new(RefCell::new(vec![registration]));
		let common_handler = {
			let registrations = Rc::clone(&registrations);
			Closure::wrap(Box::new(move |event: Event| route_event(&registrations, &event)) as Box<dyn Fn(Event)>)
		};

		if let Err(exception) = self.document.add_event_listener_with_callback(event_name, common_handler.as_ref().unchecked_ref()) {
			return error!("Could not install document listener: {}", Error::dom("addEventListener", &exception));
		}
		trace!("Installed document listener.");

		routes.insert(
			event_name.to_owned(),
			EventRoute {
				registrations,
				common_handler,
			},
		);
	}

	/// How many delegated callbacks are registered for `event_name`.
	#[must_use]
	pub fn registration_count(&self, event_name: &str) -> usize {
		self.routes
			.borrow()
			.get(event_name)
			.map_or(0, |route| route.registrations.borrow().len())
	}
}

impl Drop for Delegation {
	fn drop(&mut self) {
		for (event_name, route) in self.routes.get_mut().drain() {
			if let Err(exception) = self
				.document
				.remove_event_listener_with_callback(&event_name, route.common_handler.as_ref().unchecked_ref())
			{
				error!("Could not detach document listener for {:?}: {}", event_name, Error::dom("removeEventListener", &exception));
			}
		}
	}
}

fn route_event(registrations: &RefCell<Vec<Rc<Registration>>>, event: &Event) {
	let span = trace_span!("route_event", event_type = &*event.type_());
	let _enter = span.enter();

	let target = match event.target().and_then(|target| target.dyn_into::<HtmlElement>().ok()) {
		Some(target) => target,
		None => return trace!("Ignoring event without element target."),
	};

	// Callbacks may register more listeners while this runs.
	let snapshot: Vec<_> = registrations.borrow().iter().cloned().collect();
	for registration in snapshot {
		let matched = match target.closest(&registration.selector) {
			Ok(Some(matched)) => matched,
			Ok(None) => continue,
			Err(exception) => {
				error!("Skipping registration for {:?}: {}", registration.selector, Error::dom("closest", &exception));
				continue;
			}
		};
		match matched.dyn_ref::<HtmlElement>() {
			Some(matched) => {
				trace!(selector = &*registration.selector, "Calling delegated callback.");
				(registration.callback)(matched, event)
			}
			None => trace!(selector = &*registration.selector, "Matched {} is not an HTML element.", describe(&matched)),
		}
	}
}

/// Fires a custom `event_name` event on `element` that bubbles, crosses shadow roots and is cancelable.
///
/// Dispatch is synchronous: all listeners have run by the time this returns.
///
/// Returns `false` iff a listener cancelled the event.
///
/// # Errors
///
/// - [`Error::InvalidDispatchTarget`] iff `element` isn't an [`HtmlElement`].
/// - [`Error::Dom`] iff the DOM rejects the event.
#[instrument(skip(element))]
pub fn dispatch(element: &Element, event_name: &str, detail: &JsValue) -> Result<bool> {
	let element = element.dyn_ref::<HtmlElement>().ok_or(Error::InvalidDispatchTarget)?;

	let init = CustomEventInit::new();
	init.set_bubbles(true);
	init.set_composed(true);
	init.set_cancelable(true);
	init.set_detail(detail);

	let event = CustomEvent::new_with_event_init_dict(event_name, &init).map_err(|e| Error::dom("new CustomEvent", &e))?;
	element.dispatch_event(&event).map_err(|e| Error::dom("dispatchEvent", &e))
}

/// Builds a plain object to use as custom event `detail`, e.g. `{ checked: true }`.
///
/// # Errors
///
/// [`Error::Dom`] iff a property can't be defined.
pub fn detail_object(entries: &[(&str, JsValue)]) -> Result<JsValue> {
	let object = js_sys::Object::new();
	for (key, value) in entries {
		js_sys::Reflect::set(&object, &JsValue::from_str(key), value).map_err(|e| Error::dom("Reflect.set", &e))?;
	}
	Ok(object.into())
}
