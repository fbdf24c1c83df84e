//! # submit-form
//!
//! Progressive enhancement for HTML forms: intercept the native submission,
//! post the fields with `fetch`, and show the outcome inside the form.
//!
//! ## Markup
//!
//! ```html
//! <form class="submit-form" name="contact" action="/contact"
//!       data-event-success="sent" data-recaptcha-site-key="...">
//!   <div class="submit-form-loading d-none">Sending...</div>
//!   <div class="submit-form-message-success d-none"></div>
//!   <div class="submit-form-message-error d-none"></div>
//!
//!   <div>
//!     <input name="email">
//!     <div class="invalid-feedback"></div>
//!   </div>
//!   <button class="submit-form-button-submit">Send</button>
//! </form>
//! ```
//!
//! ## Server answer
//!
//! A JSON object with optional `message`, `errors` (field name to message)
//! and `redirect_to`. A 2xx answer with a `message`, or a 201/202 answer,
//! counts as success; `errors` from a 2xx answer are drawn on the inputs.
//!
//! ## Feature Flags
//!
//! - `web` - browser bindings from `submit-form-dom` (wasm32 only)
//! - `testing` - in-memory DOM and recording collaborators
//! - `debug-hooks` - compile `debug_log!` in debug builds
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use submit_form::prelude::*;
//!
//! // In the browser, with the `web` feature
//! for controller in submit_form::web::page::observe_all() {
//!     controller.on_error(|error| warn_log!("{}", error));
//! }
//! ```

pub use submit_form_core::*;

/// Browser bindings.
#[cfg(feature = "web")]
pub mod web {
	pub use submit_form_dom::*;
}
