//! Integration test utilities for submit-form
//!
//! Builds observed forms wired to the recording collaborators of
//! `submit_form::testing` and drives them the way a browser would: events
//! are dispatched on the in-memory tree and the queued submission tasks are
//! run to completion.

use std::rc::Rc;

use serde_json::Value;
use submit_form::dom::EventType;
use submit_form::testing::{FormFixture, MemoryElement, TestServices};
use submit_form::{FormController, FormRegistry, TransportResponse};

/// An observed form and everything it talks to.
pub struct Harness {
	pub fixture: FormFixture,
	pub services: TestServices,
	pub registry: FormRegistry<MemoryElement>,
	pub controller: Rc<FormController<MemoryElement>>,
}

impl Harness {
	/// Observes `fixture` with `services`.
	pub fn observe(fixture: FormFixture, services: TestServices) -> Self {
		let registry = FormRegistry::new();
		let controller = FormController::observe(fixture.form.clone(), services.services(), &registry);
		Self {
			fixture,
			services,
			registry,
			controller,
		}
	}

	/// Observes a `contact` form posting to `/contact` with an `email` and a
	/// `name` field.
	pub fn contact() -> Self {
		Self::observe(contact_form(), TestServices::new())
	}

	/// Queues a JSON answer.
	pub fn respond(&self, status: u16, body: Value) -> &Self {
		self.services.transport.respond(json_response(status, body));
		self
	}

	/// Queues a raw answer.
	pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
		self.services
			.transport
			.respond(TransportResponse::new(status, body).with_url("https://example.com/contact"));
		self
	}

	/// Submits the form as the browser would and runs the submission.
	///
	/// Returns whether the native submission was suppressed.
	pub fn submit(&self) -> bool {
		let prevented = self.fixture.form.dispatch(EventType::Submit);
		self.flush();
		prevented
	}

	/// Runs queued submission tasks until they wait on something.
	pub fn flush(&self) {
		self.services.spawner.run_until_stalled();
	}

	/// Text of the error region.
	pub fn error_text(&self) -> String {
		self.fixture.error.inner_html()
	}

	/// Text of the success region.
	pub fn success_text(&self) -> String {
		self.fixture.success.inner_html()
	}
}

/// The form used by most flows.
pub fn contact_form() -> FormFixture {
	FormFixture::new(Some("/contact"))
		.named("contact")
		.with_field("email", "ann@example.com")
		.with_field("name", "Ann")
}

/// A response carrying `body` as JSON.
pub fn json_response(status: u16, body: Value) -> TransportResponse {
	TransportResponse::new(status, body.to_string())
		.with_status_text(reason_phrase(status))
		.with_url("https://example.com/contact")
}

fn reason_phrase(status: u16) -> &'static str {
	match status {
		200 => "OK",
		201 => "Created",
		202 => "Accepted",
		204 => "No Content",
		400 => "Bad Request",
		422 => "Unprocessable Entity",
		500 => "Internal Server Error",
		503 => "Service Unavailable",
		_ => "",
	}
}
