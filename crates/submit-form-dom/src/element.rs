//! `web_sys` element adapter

use js_sys::Array;
use submit_form_core::dom::{Element, EventType, FormElement, Handler, ListenOptions, Selector};
use submit_form_core::payload::{FileHandle, FormPayload};
use submit_form_core::{error_log, warn_log};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, FormData, HtmlFormElement};

/// A live DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebElement(web_sys::Element);

impl WebElement {
	/// Wraps a DOM element.
	pub fn new(element: web_sys::Element) -> Self {
		Self(element)
	}

	/// The wrapped DOM element.
	pub fn as_element(&self) -> &web_sys::Element {
		&self.0
	}

	fn as_form(&self) -> Option<&HtmlFormElement> {
		self.0.dyn_ref::<HtmlFormElement>()
	}
}

impl From<web_sys::Element> for WebElement {
	fn from(element: web_sys::Element) -> Self {
		Self(element)
	}
}

impl Element for WebElement {
	fn attribute(&self, name: &str) -> Option<String> {
		self.0.get_attribute(name)
	}

	fn set_attribute(&self, name: &str, value: &str) {
		if let Err(err) = self.0.set_attribute(name, value) {
			error_log!("failed to set attribute {}: {:?}", name, err);
		}
	}

	fn remove_attribute(&self, name: &str) {
		if let Err(err) = self.0.remove_attribute(name) {
			error_log!("failed to remove attribute {}: {:?}", name, err);
		}
	}

	fn add_class(&self, class: &str) {
		if let Err(err) = self.0.class_list().add_1(class) {
			error_log!("failed to add class {}: {:?}", class, err);
		}
	}

	fn remove_class(&self, class: &str) {
		if let Err(err) = self.0.class_list().remove_1(class) {
			error_log!("failed to remove class {}: {:?}", class, err);
		}
	}

	fn has_class(&self, class: &str) -> bool {
		self.0.class_list().contains(class)
	}

	fn set_inner_html(&self, html: &str) {
		self.0.set_inner_html(html);
	}

	fn set_inner_text(&self, text: &str) {
		self.0.set_text_content(Some(text));
	}

	fn parent(&self) -> Option<Self> {
		self.0.parent_element().map(Self)
	}

	fn query(&self, selector: &Selector) -> Option<Self> {
		match self.0.query_selector(&selector.to_string()) {
			Ok(found) => found.map(Self),
			Err(err) => {
				warn_log!("invalid selector {}: {:?}", selector, err);
				None
			}
		}
	}

	fn query_all(&self, selector: &Selector) -> Vec<Self> {
		let list = match self.0.query_selector_all(&selector.to_string()) {
			Ok(list) => list,
			Err(err) => {
				warn_log!("invalid selector {}: {:?}", selector, err);
				return Vec::new();
			}
		};
		(0..list.length())
			.filter_map(|index| list.item(index))
			.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
			.map(Self)
			.collect()
	}

	fn listen(&self, event: EventType, options: ListenOptions, mut handler: Handler) {
		let prevent_default = options.prevent_default;
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			if prevent_default {
				event.prevent_default();
			}
			handler();
		}) as Box<dyn FnMut(_)>);

		let listen_options = AddEventListenerOptions::new();
		listen_options.set_once(options.once);
		if let Err(err) = self
			.0
			.add_event_listener_with_callback_and_add_event_listener_options(
				event.as_str(),
				closure.as_ref().unchecked_ref(),
				&listen_options,
			) {
			error_log!("failed to listen for {}: {:?}", event.as_str(), err);
		}

		closure.forget(); // Keep closure alive
	}
}

impl FormElement for WebElement {
	fn collect_payload(&self) -> FormPayload {
		let mut payload = FormPayload::new();
		let Some(form) = self.as_form() else {
			warn_log!("element is not a form, submitting no fields");
			return payload;
		};
		let data = match FormData::new_with_form(form) {
			Ok(data) => data,
			Err(err) => {
				error_log!("failed to read form fields: {:?}", err);
				return payload;
			}
		};

		let entries = match js_sys::try_iter(&data) {
			Ok(Some(entries)) => entries,
			_ => return payload,
		};
		for entry in entries.flatten() {
			let pair: Array = entry.unchecked_into();
			let Some(name) = pair.get(0).as_string() else {
				continue;
			};
			let value = pair.get(1);
			match value.dyn_into::<web_sys::File>() {
				Ok(file) => payload.append(name, FileHandle::new(file.name(), file)),
				Err(value) => payload.append(name, value.as_string().unwrap_or_default()),
			}
		}
		payload
	}

	fn reset(&self) {
		if let Some(form) = self.as_form() {
			form.reset();
		}
	}
}
