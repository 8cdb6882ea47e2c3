#![cfg(target_arch = "wasm32")]

use markup_components::{AttributeValue, ElementHandle, Error};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

use web_fixture_::Fixture;

#[wasm_bindgen_test]
fn nullish_values_wrap_absent() {
	assert!(ElementHandle::try_from_js(JsValue::NULL).unwrap().is_absent());
	assert!(ElementHandle::try_from_js(JsValue::UNDEFINED).unwrap().is_absent());
}

#[wasm_bindgen_test]
fn html_elements_are_wrapped() {
	let fixture = Fixture::new(r#"<div id="target"></div>"#);
	let target = fixture.html("#target");
	let handle = ElementHandle::try_from_js(target.clone().into()).unwrap();
	assert_eq!(handle.get(), Some(&target));
}

#[wasm_bindgen_test]
fn other_values_are_rejected() {
	let fixture = Fixture::new(r#"<svg id="drawing"></svg>"#);
	assert_eq!(ElementHandle::try_from_js(JsValue::from(1)).unwrap_err(), Error::InvalidHandleTarget);
	assert_eq!(ElementHandle::try_from_js(JsValue::from_str("div")).unwrap_err(), Error::InvalidHandleTarget);
	assert_eq!(ElementHandle::try_from_js(fixture.query("#drawing").into()).unwrap_err(), Error::InvalidHandleTarget);
}

#[wasm_bindgen_test]
fn absent_handle_accepts_anything() {
	let handle = ElementHandle::absent();
	handle.set_attribute_js("x", &js_sys::Object::new()).unwrap();
	handle.set_attribute_js("x", &JsValue::NULL).unwrap();
	handle.set_data_js("y", &js_sys::Array::new()).unwrap();
	assert_eq!(handle.get_data("y"), None);
}

#[wasm_bindgen_test]
fn absent_removes_attribute_but_empties_data() {
	let fixture = Fixture::new(r#"<div id="target" x="1" data-y="2"></div>"#);
	let target = fixture.html("#target");
	let handle = ElementHandle::new(Some(target.clone()));

	handle.set_attribute("x", AttributeValue::Absent).unwrap();
	handle.set_data("y", AttributeValue::Absent).unwrap();

	assert!(!target.has_attribute("x"));
	assert_eq!(target.get_attribute("data-y").as_deref(), Some(""));
	assert_eq!(handle.get_data("y"), None);
}

#[wasm_bindgen_test]
fn values_serialize_to_attribute_text() {
	let fixture = Fixture::new(r#"<div id="target"></div>"#);
	let handle = ElementHandle::new(Some(fixture.html("#target")));

	handle.set_attribute("aria-checked", true).unwrap();
	handle.set_attribute("tabindex", -1).unwrap();
	handle.set_attribute("aria-valuenow", 0.5).unwrap();
	handle.set_attribute("title", "hello").unwrap();

	assert_eq!(handle.get_attribute("aria-checked").as_deref(), Some("true"));
	assert_eq!(handle.get_attribute("tabindex").as_deref(), Some("-1"));
	assert_eq!(handle.get_attribute("aria-valuenow").as_deref(), Some("0.5"));
	assert_eq!(handle.get_attribute("title").as_deref(), Some("hello"));
}

#[wasm_bindgen_test]
fn javascript_values() {
	let fixture = Fixture::new(r#"<div id="target" hidden></div>"#);
	let target = fixture.html("#target");
	let handle = ElementHandle::new(Some(target.clone()));

	handle.set_attribute_js("aria-checked", &JsValue::FALSE).unwrap();
	handle.set_attribute_js("aria-valuenow", &JsValue::from_f64(3.0)).unwrap();
	handle.set_attribute_js("hidden", &JsValue::UNDEFINED).unwrap();
	assert_eq!(target.get_attribute("aria-checked").as_deref(), Some("false"));
	assert_eq!(target.get_attribute("aria-valuenow").as_deref(), Some("3"));
	assert!(!target.has_attribute("hidden"));

	let error = handle.set_attribute_js("title", &js_sys::Object::new()).unwrap_err();
	assert_eq!(
		error,
		Error::UnsupportedAttributeValue {
			name: "title".to_owned(),
			kind: "object".to_owned()
		}
	);
	assert!(!target.has_attribute("title"));

	handle.set_data_js("count", &JsValue::from_f64(42.0)).unwrap();
	handle.set_data_js("flag", &JsValue::TRUE).unwrap();
	assert_eq!(handle.get_data("count").as_deref(), Some("42"));
	assert_eq!(handle.get_data("flag").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn data_names_are_camel_case() {
	let fixture = Fixture::new(r#"<div id="target" data-switch-state="on"></div>"#);
	let target: HtmlElement = fixture.query("#target").dyn_into().unwrap();
	let handle = ElementHandle::new(Some(target.clone()));

	assert_eq!(handle.get_data("switchState").as_deref(), Some("on"));
	handle.set_data("switchState", "off").unwrap();
	assert_eq!(target.get_attribute("data-switch-state").as_deref(), Some("off"));
}

#[wasm_bindgen_test]
fn invalid_names_are_dom_errors() {
	let fixture = Fixture::new(r#"<div id="target"></div>"#);
	let handle = ElementHandle::new(Some(fixture.html("#target")));
	assert!(matches!(handle.set_attribute("no spaces", "x"), Err(Error::Dom { .. })));
}

#[wasm_bindgen_test]
fn numbers_use_host_formatting() {
	let cases: &[(f64, &str)] = &[
		(1.0, "1"),
		(-2.5, "-2.5"),
		(0.1, "0.1"),
		(-0.0, "0"),
		(1e21, "1e+21"),
		(1.5e-7, "1.5e-7"),
		(123_456_789.0, "123456789"),
		// Two shortest representations exist; the closer one wins.
		(f64::from_bits(0x4300_85ce_4845_e322), "581340081208420.2"),
		(f64::NAN, "NaN"),
		(f64::INFINITY, "Infinity"),
		(f64::NEG_INFINITY, "-Infinity"),
	];
	for &(number, expected) in cases {
		assert_eq!(AttributeValue::Number(number).serialize(), Ok(Some(expected.to_owned())), "{}", number);
	}

	let fixture = Fixture::new(r#"<div id="target"></div>"#);
	let handle = ElementHandle::new(Some(fixture.html("#target")));
	handle.set_attribute("aria-valuenow", f64::from_bits(0x4300_85ce_4845_e322)).unwrap();
	handle.set_data("offset", f64::from_bits(0x4300_85ce_4845_e322)).unwrap();
	assert_eq!(handle.get_attribute("aria-valuenow").as_deref(), Some("581340081208420.2"));
	assert_eq!(handle.get_data("offset").as_deref(), Some("581340081208420.2"));
}
