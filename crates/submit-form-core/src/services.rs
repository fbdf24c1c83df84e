//! Platform services
//!
//! Everything a controller needs from its environment besides the form
//! itself: the HTTP exchange, the CAPTCHA runtime, navigation, document
//! signals and a local task spawner. The browser implementations live in
//! `submit-form-dom`; recording fakes live in [`testing`](crate::testing).
//!
//! All services are single-threaded: async traits are `?Send` and shared
//! through `Rc`, matching the page's one execution thread.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::error::{CaptchaError, TransportError};
use crate::payload::FormPayload;
use crate::settings::SubmitFormSettings;

/// Header declaring that the client expects a JSON answer.
pub const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json");

/// Header marking the request as an AJAX call.
pub const AJAX_MARKER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Prefix of the document signal emitted after a successful submission.
pub const SIGNAL_PREFIX: &str = "submit-form.";

/// An outgoing submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
	/// Destination address (the form's `action`)
	pub url: String,
	/// HTTP method
	pub method: &'static str,
	/// Request headers
	pub headers: Vec<(&'static str, &'static str)>,
	/// Body, sent as multipart form data
	pub payload: FormPayload,
}

impl SubmitRequest {
	/// Builds the `POST` request used for every submission.
	pub fn post(url: impl Into<String>, payload: FormPayload) -> Self {
		Self {
			url: url.into(),
			method: "POST",
			headers: vec![ACCEPT_JSON, AJAX_MARKER],
			payload,
		}
	}
}

/// Raw answer to a [`SubmitRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
	/// HTTP status code
	pub status: u16,
	/// HTTP reason phrase
	pub status_text: String,
	/// Final URL of the response
	pub url: String,
	/// Undecoded body text; empty when the body could not be read
	pub body: String,
}

impl TransportResponse {
	/// Creates a response with an empty reason phrase and URL.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			status_text: String::new(),
			url: String::new(),
			body: body.into(),
		}
	}

	/// Sets the reason phrase.
	pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
		self.status_text = status_text.into();
		self
	}

	/// Sets the response URL.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = url.into();
		self
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// `"<status> <statusText> <url>"`, used when the server gives no message.
	pub fn status_line(&self) -> String {
		format!("{} {} {}", self.status, self.status_text, self.url)
	}
}

/// Performs the network exchange.
#[async_trait(?Send)]
pub trait Transport {
	/// Sends `request` and returns the raw response.
	///
	/// Only failures to obtain a response are errors; any HTTP status is a
	/// successful exchange.
	async fn post(&self, request: SubmitRequest) -> Result<TransportResponse, TransportError>;
}

/// Global CAPTCHA runtime gating submissions that declare a site key.
#[async_trait(?Send)]
pub trait CaptchaRuntime {
	/// Returns `true` once the runtime is loaded on the page.
	fn is_available(&self) -> bool;

	/// Obtains a token for `site_key`.
	async fn execute(&self, site_key: &str, action: &str) -> Result<String, CaptchaError>;
}

/// Page navigation.
pub trait Navigator {
	/// Navigates to `url` after `delay`. Not cancellable.
	fn schedule_redirect(&self, url: &str, delay: Duration);
}

/// Payload of the document signal emitted after a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessSignal<E> {
	/// The submitted form
	pub form: E,
	/// Payload that was sent
	pub data: FormPayload,
	/// Decoded server answer
	pub answer: Value,
}

/// Document-scoped signal broadcast.
pub trait SignalBus<E> {
	/// Dispatches `signal` under `name` to document listeners.
	fn emit(&self, name: &str, signal: SuccessSignal<E>);
}

/// Runs detached tasks on the page's event loop.
pub trait Spawner {
	/// Schedules `task` to run to completion.
	fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Collaborators shared by every controller on a page.
pub struct Services<E> {
	/// HTTP exchange
	pub transport: Rc<dyn Transport>,
	/// CAPTCHA runtime, `None` when the page loads none
	pub captcha: Option<Rc<dyn CaptchaRuntime>>,
	/// Redirect scheduling
	pub navigator: Rc<dyn Navigator>,
	/// Success signal broadcast
	pub signals: Rc<dyn SignalBus<E>>,
	/// Task spawner for event-driven submissions
	pub spawner: Rc<dyn Spawner>,
	/// Page-wide settings
	pub settings: Rc<SubmitFormSettings>,
}

impl<E> Clone for Services<E> {
	fn clone(&self) -> Self {
		Self {
			transport: Rc::clone(&self.transport),
			captcha: self.captcha.clone(),
			navigator: Rc::clone(&self.navigator),
			signals: Rc::clone(&self.signals),
			spawner: Rc::clone(&self.spawner),
			settings: Rc::clone(&self.settings),
		}
	}
}
