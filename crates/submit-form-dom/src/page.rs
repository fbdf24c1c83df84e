//! Page-level bootstrap
//!
//! Holds the page's [`FormRegistry`] and builds browser [`Services`]. The
//! registry is per thread; in the browser that is the page.

use std::rc::Rc;

use submit_form_core::controller::FormController;
use submit_form_core::dom::{Element, Selector};
use submit_form_core::registry::FormRegistry;
use submit_form_core::services::{CaptchaRuntime, Services};
use submit_form_core::settings::SubmitFormSettings;
use submit_form_core::{info_log, warn_log};
use wasm_bindgen::JsCast;

use crate::captcha::Grecaptcha;
use crate::element::WebElement;
use crate::runtime::{WasmSpawner, WindowNavigator};
use crate::signals::DocumentSignalBus;
use crate::transport::FetchTransport;

/// A controller bound to a DOM form.
pub type WebFormController = FormController<WebElement>;

thread_local! {
	static REGISTRY: FormRegistry<WebElement> = FormRegistry::new();
}

/// Browser collaborators using `settings`.
pub fn browser_services(settings: SubmitFormSettings) -> Services<WebElement> {
	Services {
		transport: Rc::new(FetchTransport::new()),
		captcha: Some(Rc::new(Grecaptcha::new()) as Rc<dyn CaptchaRuntime>),
		navigator: Rc::new(WindowNavigator),
		signals: Rc::new(DocumentSignalBus),
		spawner: Rc::new(WasmSpawner),
		settings: Rc::new(settings),
	}
}

/// Observes `form` with default settings.
pub fn observe(form: web_sys::Element) -> Rc<WebFormController> {
	observe_with(form, browser_services(SubmitFormSettings::default()))
}

/// Observes `form` with `services` and registers it in the page registry.
pub fn observe_with(form: web_sys::Element, services: Services<WebElement>) -> Rc<WebFormController> {
	REGISTRY.with(|registry| FormController::observe(WebElement::new(form), services, registry))
}

/// Observes every form on the page matching the default form selector.
pub fn observe_all() -> Vec<Rc<WebFormController>> {
	observe_all_with(browser_services(SubmitFormSettings::default()))
}

/// Observes every form matching `services.settings.form_selector`.
pub fn observe_all_with(services: Services<WebElement>) -> Vec<Rc<WebFormController>> {
	let Some(document) = web_sys::window().and_then(|window| window.document()) else {
		warn_log!("no document, nothing to observe");
		return Vec::new();
	};
	let selector = services.settings.form_selector.clone();
	let forms = match document.query_selector_all(&selector) {
		Ok(forms) => forms,
		Err(err) => {
			warn_log!("invalid form selector {}: {:?}", selector, err);
			return Vec::new();
		}
	};

	let controllers: Vec<_> = (0..forms.length())
		.filter_map(|index| forms.item(index))
		.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
		.map(|form| observe_with(form, services.clone()))
		.collect();
	info_log!("observing {} form(s) matching {}", controllers.len(), selector);
	controllers
}

/// Controller of the form named `name`, if it was observed.
pub fn controller(name: &str) -> Option<Rc<WebFormController>> {
	REGISTRY.with(|registry| registry.get(name))
}

/// Observes `form` and makes clicks on every element matching `trigger`
/// inside it submit the form.
pub fn observe_with_trigger(form: web_sys::Element, trigger: &Selector) -> Rc<WebFormController> {
	let controller = observe(form);
	for element in controller.form().query_all(trigger) {
		controller.bind_submit_trigger(&element);
	}
	controller
}
