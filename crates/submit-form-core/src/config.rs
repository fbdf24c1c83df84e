//! Declarative per-form configuration
//!
//! Read from the form's attributes at submission time, so markup changes
//! made after the form was observed still apply to the next submission.
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `action` | destination address (required) |
//! | `name` | registry key |
//! | `data-reset_form="false"` | keep field values after success |
//! | `data-event-success="<name>"` | emit `submit-form.<name>` on success |
//! | `data-recaptcha-site-key="<key>"` | gate submission on a CAPTCHA token |

use crate::dom::Element;
use crate::services::SIGNAL_PREFIX;

/// Attribute names read by [`FormConfig::from_element`].
pub mod attr {
	/// Destination address
	pub const ACTION: &str = "action";
	/// Registry key
	pub const NAME: &str = "name";
	/// Post-success reset opt-out
	pub const RESET_FORM: &str = "data-reset_form";
	/// Success signal name
	pub const EVENT_SUCCESS: &str = "data-event-success";
	/// CAPTCHA site key
	pub const RECAPTCHA_SITE_KEY: &str = "data-recaptcha-site-key";
}

/// Snapshot of a form's declarative options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
	/// Registry key
	pub name: Option<String>,
	/// Destination address
	pub action: Option<String>,
	/// Reset controls after a successful submission
	pub reset_after_success: bool,
	/// Name of the success signal, without the `submit-form.` prefix
	pub success_event: Option<String>,
	/// CAPTCHA site key
	pub captcha_site_key: Option<String>,
}

impl Default for FormConfig {
	fn default() -> Self {
		Self {
			name: None,
			action: None,
			reset_after_success: true,
			success_event: None,
			captcha_site_key: None,
		}
	}
}

impl FormConfig {
	/// Reads the configuration from `form`'s attributes.
	///
	/// Empty attributes count as absent.
	pub fn from_element<E: Element>(form: &E) -> Self {
		let read = |name: &str| form.attribute(name).filter(|value| !value.is_empty());
		Self {
			name: read(attr::NAME),
			action: read(attr::ACTION),
			reset_after_success: form
				.attribute(attr::RESET_FORM)
				.is_none_or(|value| value.trim() != "false"),
			success_event: read(attr::EVENT_SUCCESS),
			captcha_site_key: read(attr::RECAPTCHA_SITE_KEY),
		}
	}

	/// Full name of the success signal, if one is configured.
	pub fn signal_name(&self) -> Option<String> {
		self.success_event
			.as_ref()
			.map(|event| format!("{}{}", SIGNAL_PREFIX, event))
	}
}
