#![doc(html_root_url = "https://docs.rs/markup-components/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! Binds markup marked with `data-component` attributes to typed [`Component`] behaviour.
//!
//! This crate doesn't render or diff anything: it wraps existing elements on demand,
//! routes delegated events to them and moves attributes in and out of existence.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod component;
pub mod delegation;
mod error;
pub mod handle;
pub mod js;
pub mod switch;

pub use component::{Component, ComponentRoot, MARKER_ATTRIBUTE};
pub use delegation::{dispatch, Delegation};
pub use error::{Error, Result};
pub use handle::{AttributeValue, ElementHandle};

use tracing::{info, instrument};
use web_sys::{Document, Element};

/// Creates the delegation registry for `document` and runs every built-in component's [`Component::init`].
///
/// The returned registry must be kept alive for as long as the components should respond.
/// Listeners are installed on the document itself, so this doesn't need to wait for the DOM to be ready.
#[must_use]
#[instrument]
pub fn install(document: Document) -> Delegation {
	let delegation = Delegation::new(document);
	switch::SwitchRoot::init(&delegation);
	info!("Installed built-in components.");
	delegation
}

/// Describes `element` for log messages.
///
/// Without the `dangerous-logging` feature, this avoids page content.
pub(crate) fn describe(element: &Element) -> String {
	if cfg!(feature = "dangerous-logging") {
		element.outer_html()
	} else {
		match element.get_attribute(MARKER_ATTRIBUTE) {
			Some(marker) => format!("<{} {}={:?}>", element.tag_name().to_lowercase(), MARKER_ATTRIBUTE, marker),
			None => format!("<{}>", element.tag_name().to_lowercase()),
		}
	}
}

/// `value` if `dangerous-logging` is enabled, otherwise a placeholder.
pub(crate) fn loggable(value: &str) -> &str {
	if cfg!(feature = "dangerous-logging") {
		value
	} else {
		"[redacted]"
	}
}
