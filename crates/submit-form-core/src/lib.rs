//! # submit-form-core
//!
//! Platform-independent core of the AJAX form submission controller.
//!
//! A [`FormController`] intercepts a form's native submission, posts the
//! form's fields to its `action` address and reflects the exchange in three
//! optional regions of the form (loading, success, error). The server answer
//! is classified by [`ResponseInterpreter`]; field errors it reports are
//! drawn onto the matching inputs by [`FieldErrorAnnotator`].
//!
//! Everything the controller needs from the page goes through the traits in
//! [`dom`] and [`services`], so the same state machine runs in the browser
//! (`submit-form-dom`) and against the in-memory fakes of [`testing`].
//!
//! ## Modules
//!
//! - [`controller`]: per-form state machine and submission pipeline
//! - [`interpreter`]: response classification
//! - [`envelope`]: lenient decoding of the JSON answer
//! - [`annotator`]: field error markers
//! - [`region`]: loading/success/error regions and the submit button guard
//! - [`config`]: per-form `data-*` options
//! - [`settings`]: page-wide class names and timings
//! - [`registry`]: name-keyed controller lookup
//! - [`callback`]: success and error subscriptions
//! - [`logging`]: console/tracing macros

pub mod annotator;
pub mod callback;
pub mod config;
pub mod controller;
pub mod dom;
pub mod envelope;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod payload;
pub mod region;
pub mod registry;
pub mod services;
pub mod settings;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(hidden)]
pub mod __private {
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;

	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
}

pub use annotator::FieldErrorAnnotator;
pub use callback::{Callback, CallbackRegistry};
pub use config::FormConfig;
pub use controller::{ControllerState, FormController};
pub use dom::{Element, EventType, FormElement, Handler, ListenOptions, Selector};
pub use envelope::{FieldErrors, ResponseEnvelope};
pub use error::{CaptchaError, ErrorKind, SettingsError, SubmitError, TransportError};
pub use interpreter::{Classification, ResponseInterpreter};
pub use payload::{FieldValue, FileHandle, FormPayload};
pub use region::{SubmitButtonGuard, VisibilityRegion};
pub use registry::FormRegistry;
pub use services::{
	CaptchaRuntime, Navigator, Services, SignalBus, Spawner, SubmitRequest, SuccessSignal,
	Transport, TransportResponse,
};
pub use settings::SubmitFormSettings;

/// Commonly used items.
pub mod prelude {
	pub use crate::controller::{ControllerState, FormController};
	pub use crate::dom::{Element, FormElement};
	pub use crate::error::SubmitError;
	pub use crate::payload::FormPayload;
	pub use crate::registry::FormRegistry;
	pub use crate::services::Services;
	pub use crate::settings::SubmitFormSettings;
	pub use crate::{debug_log, error_log, info_log, warn_log};
}
