//! End-to-end submission flows driven through DOM events.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rstest::*;
use serde_json::json;
use submit_form::dom::{Element, EventType};
use submit_form::testing::{FormFixture, MemoryElement, TestServices};
use submit_form::{ControllerState, SubmitError, TransportError, TransportResponse};
use submit_form_integration_tests::{Harness, contact_form, json_response};

#[fixture]
fn harness() -> Harness {
	Harness::contact()
}

#[rstest]
fn test_native_submission_is_intercepted(harness: Harness) {
	harness.respond(200, json!({ "message": "Saved" }));

	let prevented = harness.submit();

	assert!(prevented);
	assert_eq!(harness.services.transport.call_count(), 1);
}

#[rstest]
fn test_request_shape(harness: Harness) {
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();

	let request = &harness.services.transport.requests()[0];
	assert_eq!(request.method, "POST");
	assert_eq!(request.url, "/contact");
	assert!(request.headers.contains(&("Accept", "application/json")));
	assert!(request.headers.contains(&("X-Requested-With", "XMLHttpRequest")));
	assert_eq!(
		request.payload.to_json(),
		json!({ "email": "ann@example.com", "name": "Ann" })
	);
}

#[rstest]
fn test_success_with_message(harness: Harness) {
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();

	assert_eq!(harness.controller.state(), ControllerState::Success);
	assert_eq!(harness.success_text(), "Saved");
	assert!(harness.fixture.is_visible(&harness.fixture.success));
	assert!(!harness.fixture.is_visible(&harness.fixture.error));
	assert!(!harness.fixture.is_visible(&harness.fixture.loading));
	assert!(!harness.fixture.button.is_disabled());
}

#[rstest]
fn test_created_without_message_uses_fallback_and_resets() {
	let harness = Harness::contact();
	harness.fixture.field("email").type_text("changed@example.com");
	let answers = Rc::new(RefCell::new(Vec::new()));
	harness.controller.on_success({
		let answers = Rc::clone(&answers);
		move |answer| answers.borrow_mut().push(answer.clone())
	});
	harness.respond(201, json!({}));

	harness.submit();

	assert_eq!(harness.success_text(), "Successful");
	assert_eq!(harness.fixture.field("email").value(), "ann@example.com");
	assert_eq!(*answers.borrow(), vec![json!({})]);
}

#[rstest]
fn test_reset_opt_out_keeps_values() {
	let fixture = contact_form().with_form_attribute("data-reset_form", "false");
	let harness = Harness::observe(fixture, TestServices::new());
	harness.fixture.field("email").type_text("kept@example.com");
	harness.respond(201, json!({}));

	harness.submit();

	assert_eq!(harness.fixture.field("email").value(), "kept@example.com");
}

#[rstest]
#[case(200)]
#[case(203)]
#[case(204)]
fn test_2xx_without_success_marker_fails(#[case] status: u16) {
	let harness = Harness::contact();
	harness.respond(status, json!({ "ok": true }));

	harness.submit();

	assert_eq!(harness.controller.state(), ControllerState::Error);
	assert!(
		harness
			.error_text()
			.starts_with("Form submission failed and no error message returned from: /contact")
	);
}

#[rstest]
fn test_server_error_message_is_displayed(harness: Harness) {
	let errors = Rc::new(RefCell::new(Vec::new()));
	harness.controller.on_error({
		let errors = Rc::clone(&errors);
		move |error| errors.borrow_mut().push(error.clone())
	});
	harness.respond(500, json!({ "message": "Mailer is down" }));

	harness.submit();

	assert_eq!(harness.error_text(), "Mailer is down");
	assert_eq!(
		*errors.borrow(),
		vec![SubmitError::Rejected {
			status: 500,
			message: "Mailer is down".into()
		}]
	);
}

#[rstest]
fn test_server_error_without_message_shows_status_line(harness: Harness) {
	harness.respond(503, json!({}));

	harness.submit();

	assert_eq!(
		harness.error_text(),
		"503 Service Unavailable https://example.com/contact"
	);
}

#[rstest]
fn test_malformed_body(harness: Harness) {
	harness.respond_raw(200, "<html>oops</html>");

	harness.submit();

	assert_eq!(harness.controller.state(), ControllerState::Error);
	assert_eq!(harness.error_text(), "200  https://example.com/contact");
}

#[rstest]
fn test_network_failure(harness: Harness) {
	harness
		.services
		.transport
		.fail(TransportError::network("Failed to fetch"));

	harness.submit();

	assert_eq!(harness.controller.state(), ControllerState::Error);
	assert_eq!(harness.error_text(), "Failed to fetch");
	assert!(!harness.fixture.button.is_disabled());
}

#[rstest]
fn test_missing_action_reports_without_network() {
	let harness = Harness::observe(FormFixture::new(None), TestServices::new());

	harness.submit();

	assert_eq!(harness.services.transport.call_count(), 0);
	assert_eq!(harness.error_text(), "The form action property is not set!");
}

#[rstest]
fn test_redirect_is_scheduled_after_success(harness: Harness) {
	harness.respond(200, json!({ "message": "Saved", "redirect_to": "/done" }));

	harness.submit();

	assert_eq!(harness.success_text(), "Saved");
	assert_eq!(
		harness.services.navigator.redirects(),
		vec![("/done".to_string(), Duration::from_millis(2000))]
	);
}

#[rstest]
fn test_no_redirect_on_failure(harness: Harness) {
	harness.respond(500, json!({ "message": "nope", "redirect_to": "/done" }));

	harness.submit();

	assert!(harness.services.navigator.redirects().is_empty());
}

#[rstest]
fn test_success_signal_carries_form_data_and_answer() {
	let fixture = contact_form().with_form_attribute("data-event-success", "sent");
	let harness = Harness::observe(fixture, TestServices::new());
	harness.respond(200, json!({ "message": "Saved", "id": 7 }));

	harness.submit();

	let emitted = harness.services.signals.emitted();
	assert_eq!(emitted.len(), 1);
	let (name, signal) = &emitted[0];
	assert_eq!(name, "submit-form.sent");
	assert_eq!(signal.form, harness.fixture.form);
	assert_eq!(signal.data.to_json()["email"], json!("ann@example.com"));
	assert_eq!(signal.answer, json!({ "message": "Saved", "id": 7 }));
}

#[rstest]
fn test_no_signal_without_event_name(harness: Harness) {
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();

	assert!(harness.services.signals.names().is_empty());
}

#[rstest]
fn test_loading_state_while_in_flight(harness: Harness) {
	let responder = harness.services.transport.respond_later();

	harness.submit();

	assert_eq!(harness.controller.state(), ControllerState::Loading);
	assert!(harness.fixture.is_visible(&harness.fixture.loading));
	assert!(harness.fixture.button.is_disabled());

	responder.resolve(json_response(200, json!({ "message": "Saved" })));
	harness.flush();

	assert_eq!(harness.controller.state(), ControllerState::Success);
	assert!(!harness.fixture.button.is_disabled());
}

#[rstest]
fn test_overlapping_submissions_last_finisher_wins(harness: Harness) {
	let first = harness.services.transport.respond_later();
	let second = harness.services.transport.respond_later();
	harness.submit();
	harness.submit();
	assert_eq!(harness.services.transport.call_count(), 2);

	second.resolve(json_response(200, json!({ "message": "second" })));
	harness.flush();
	first.resolve(json_response(500, json!({ "message": "first" })));
	harness.flush();

	assert_eq!(harness.controller.state(), ControllerState::Error);
	assert_eq!(harness.error_text(), "first");
}

#[rstest]
fn test_resubmission_after_error_recovers(harness: Harness) {
	harness.respond(500, json!({ "message": "down" }));
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();
	assert_eq!(harness.controller.state(), ControllerState::Error);

	harness.submit();
	assert_eq!(harness.controller.state(), ControllerState::Success);
	assert!(!harness.fixture.is_visible(&harness.fixture.error));
}

#[rstest]
fn test_bound_trigger_submits(harness: Harness) {
	let trigger = harness.fixture.form.append(MemoryElement::new("a"));
	harness.controller.bind_submit_trigger(&trigger);
	harness.respond(200, json!({ "message": "Saved" }));

	let prevented = trigger.dispatch(EventType::Click);
	harness.flush();

	assert!(prevented);
	assert_eq!(harness.success_text(), "Saved");
}

#[rstest]
#[tokio::test]
async fn test_programmatic_submit_returns_answer(harness: Harness) {
	harness.respond(202, json!({ "queued": true }));

	let answer = harness.controller.submit().await;

	assert_eq!(answer, Ok(json!({ "queued": true })));
	assert_eq!(harness.success_text(), "Successful");
	assert_eq!(
		harness.controller.last_payload().map(|payload| payload.len()),
		Some(2)
	);
}

#[rstest]
#[tokio::test]
async fn test_programmatic_submit_reports_error(harness: Harness) {
	harness
		.services
		.transport
		.respond(TransportResponse::new(422, r#"{"message":"Check the form"}"#));

	let result = harness.controller.submit().await;

	assert_eq!(
		result,
		Err(SubmitError::Rejected {
			status: 422,
			message: "Check the form".into()
		})
	);
	assert_eq!(harness.error_text(), "Check the form");
}

#[rstest]
fn test_registry_lookup(harness: Harness) {
	let found = harness.registry.get("contact").unwrap();
	assert!(Rc::ptr_eq(&found, &harness.controller));
	assert_eq!(found.form().attribute("action").as_deref(), Some("/contact"));
}
