//! reCAPTCHA v3 gate
//!
//! Talks to the `grecaptcha` global installed by Google's script. The script
//! may finish loading after the page's forms are observed, so availability
//! is checked at submission time and `execute` waits for `grecaptcha.ready`.

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use submit_form_core::error::CaptchaError;
use submit_form_core::services::CaptchaRuntime;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(catch, js_namespace = grecaptcha, js_name = ready)]
	fn grecaptcha_ready(callback: &Function) -> Result<(), JsValue>;

	#[wasm_bindgen(catch, js_namespace = grecaptcha, js_name = execute)]
	fn grecaptcha_execute(site_key: &str, options: &JsValue) -> Result<Promise, JsValue>;
}

fn describe(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// The page's `grecaptcha` global.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grecaptcha;

impl Grecaptcha {
	/// Creates the runtime handle.
	pub fn new() -> Self {
		Self
	}

	async fn ready(&self) -> Result<(), CaptchaError> {
		let mut failure = None;
		let promise = Promise::new(&mut |resolve, _reject| {
			if let Err(err) = grecaptcha_ready(&resolve) {
				failure = Some(err);
			}
		});
		if let Some(err) = failure {
			return Err(CaptchaError::new(describe(&err)));
		}
		JsFuture::from(promise)
			.await
			.map(|_| ())
			.map_err(|err| CaptchaError::new(describe(&err)))
	}
}

#[async_trait(?Send)]
impl CaptchaRuntime for Grecaptcha {
	fn is_available(&self) -> bool {
		Reflect::get(&js_sys::global(), &JsValue::from_str("grecaptcha"))
			.map(|runtime| runtime.is_object())
			.unwrap_or(false)
	}

	async fn execute(&self, site_key: &str, action: &str) -> Result<String, CaptchaError> {
		self.ready().await?;

		let options = Object::new();
		Reflect::set(&options, &JsValue::from_str("action"), &JsValue::from_str(action))
			.map_err(|err| CaptchaError::new(describe(&err)))?;

		let promise = grecaptcha_execute(site_key, &options)
			.map_err(|err| CaptchaError::new(describe(&err)))?;
		let token = JsFuture::from(promise)
			.await
			.map_err(|err| CaptchaError::new(describe(&err)))?;

		token
			.as_string()
			.filter(|token| !token.is_empty())
			.ok_or_else(|| CaptchaError::new("reCAPTCHA returned no token"))
	}
}
