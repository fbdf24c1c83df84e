//! Document signals
//!
//! A success signal becomes a `CustomEvent` dispatched on `document` whose
//! `detail` is `{ form, data, answer }`: the form element, the submitted
//! fields as a plain object and the decoded server answer.

use js_sys::{JSON, Object, Reflect};
use serde_json::Value;
use submit_form_core::error_log;
use submit_form_core::services::{SignalBus, SuccessSignal};
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit};

use crate::element::WebElement;

/// Broadcasts signals on the page's document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSignalBus;

fn to_js(value: &Value) -> JsValue {
	JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

fn detail(signal: &SuccessSignal<WebElement>) -> Result<JsValue, JsValue> {
	let detail = Object::new();
	Reflect::set(&detail, &"form".into(), signal.form.as_element())?;
	Reflect::set(&detail, &"data".into(), &to_js(&signal.data.to_json()))?;
	Reflect::set(&detail, &"answer".into(), &to_js(&signal.answer))?;
	Ok(detail.into())
}

impl SignalBus<WebElement> for DocumentSignalBus {
	fn emit(&self, name: &str, signal: SuccessSignal<WebElement>) {
		let Some(document) = web_sys::window().and_then(|window| window.document()) else {
			error_log!("no document to emit {} on", name);
			return;
		};

		let event = detail(&signal).and_then(|detail| {
			let init = CustomEventInit::new();
			init.set_detail(&detail);
			CustomEvent::new_with_event_init_dict(name, &init)
		});
		match event {
			Ok(event) => {
				if let Err(err) = document.dispatch_event(&event) {
					error_log!("failed to dispatch {}: {:?}", name, err);
				}
			}
			Err(err) => error_log!("failed to build {}: {:?}", name, err),
		}
	}
}
