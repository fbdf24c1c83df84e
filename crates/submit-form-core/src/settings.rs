//! Page-wide settings shared by every form controller
//!
//! All class names and protocol constants the controllers rely on live here,
//! so a page with a different CSS framework can remap them without touching
//! markup conventions in code. Every field has a default, and a partial JSON
//! document only overrides the keys it names:
//!
//! ```ignore
//! use submit_form_core::SubmitFormSettings;
//!
//! let settings = SubmitFormSettings::from_json(r#"{ "hidden_class": "hidden" }"#)?;
//! assert_eq!(settings.invalid_class, "is-invalid");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Settings for form discovery, UI hooks and the submission protocol.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFormSettings {
	/// CSS selector used by page bootstrap to find forms
	#[serde(default = "default_form_selector")]
	pub form_selector: String,

	/// Class of the loading indicator inside a form
	#[serde(default = "default_loading_class")]
	pub loading_class: String,

	/// Class of the success banner inside a form
	#[serde(default = "default_success_class")]
	pub success_class: String,

	/// Class of the error banner inside a form
	#[serde(default = "default_error_class")]
	pub error_class: String,

	/// Class of the submit control locked while a request is in flight
	#[serde(default = "default_submit_button_class")]
	pub submit_button_class: String,

	/// Class of elements hidden by `hide_optional_fields`
	#[serde(default = "default_optional_field_class")]
	pub optional_field_class: String,

	/// Class toggled to hide a region
	#[serde(default = "default_hidden_class")]
	pub hidden_class: String,

	/// Class marking an input as invalid
	#[serde(default = "default_invalid_class")]
	pub invalid_class: String,

	/// Class of the feedback element next to an input
	#[serde(default = "default_feedback_class")]
	pub feedback_class: String,

	/// Delay before following `redirect_to`, in milliseconds
	#[serde(default = "default_redirect_delay_ms")]
	pub redirect_delay_ms: u32,

	/// Action name passed to the CAPTCHA runtime
	#[serde(default = "default_captcha_action")]
	pub captcha_action: String,

	/// Payload field that carries the CAPTCHA token
	#[serde(default = "default_captcha_token_field")]
	pub captcha_token_field: String,

	/// Message shown for a 201/202 answer without `message`
	#[serde(default = "default_success_fallback_message")]
	pub success_fallback_message: String,
}

fn default_form_selector() -> String {
	"form.submit-form".to_string()
}

fn default_loading_class() -> String {
	"submit-form-loading".to_string()
}

fn default_success_class() -> String {
	"submit-form-message-success".to_string()
}

fn default_error_class() -> String {
	"submit-form-message-error".to_string()
}

fn default_submit_button_class() -> String {
	"submit-form-button-submit".to_string()
}

fn default_optional_field_class() -> String {
	"submit-form-field-optional".to_string()
}

fn default_hidden_class() -> String {
	"d-none".to_string()
}

fn default_invalid_class() -> String {
	"is-invalid".to_string()
}

fn default_feedback_class() -> String {
	"invalid-feedback".to_string()
}

fn default_redirect_delay_ms() -> u32 {
	2000
}

fn default_captcha_action() -> String {
	"submit".to_string()
}

fn default_captcha_token_field() -> String {
	"recaptcha-response".to_string()
}

fn default_success_fallback_message() -> String {
	"Successful".to_string()
}

impl Default for SubmitFormSettings {
	fn default() -> Self {
		Self {
			form_selector: default_form_selector(),
			loading_class: default_loading_class(),
			success_class: default_success_class(),
			error_class: default_error_class(),
			submit_button_class: default_submit_button_class(),
			optional_field_class: default_optional_field_class(),
			hidden_class: default_hidden_class(),
			invalid_class: default_invalid_class(),
			feedback_class: default_feedback_class(),
			redirect_delay_ms: default_redirect_delay_ms(),
			captcha_action: default_captcha_action(),
			captcha_token_field: default_captcha_token_field(),
			success_fallback_message: default_success_fallback_message(),
		}
	}
}

impl SubmitFormSettings {
	/// Decodes settings from a JSON object; absent keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, SettingsError> {
		let settings: Self = serde_json::from_str(json)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Checks that class names and field names are usable.
	pub fn validate(&self) -> Result<(), SettingsError> {
		let required = [
			("form_selector", &self.form_selector),
			("hidden_class", &self.hidden_class),
			("invalid_class", &self.invalid_class),
			("captcha_token_field", &self.captcha_token_field),
		];
		for (field, value) in required {
			if value.trim().is_empty() {
				return Err(SettingsError::Invalid {
					field,
					reason: "must not be empty".to_string(),
				});
			}
		}
		Ok(())
	}

	/// Delay before a scheduled redirect is followed.
	pub fn redirect_delay(&self) -> Duration {
		Duration::from_millis(u64::from(self.redirect_delay_ms))
	}

	/// Overrides the redirect delay.
	pub fn with_redirect_delay_ms(mut self, delay_ms: u32) -> Self {
		self.redirect_delay_ms = delay_ms;
		self
	}

	/// Overrides the class used to hide regions.
	pub fn with_hidden_class(mut self, class: impl Into<String>) -> Self {
		self.hidden_class = class.into();
		self
	}
}
