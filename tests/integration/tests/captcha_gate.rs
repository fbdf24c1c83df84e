//! reCAPTCHA gate in front of the network exchange.

use rstest::*;
use serde_json::json;
use submit_form::testing::{MockCaptcha, TestServices};
use submit_form::{ControllerState, ErrorKind, SubmitError};
use submit_form_integration_tests::{Harness, contact_form};

fn gated(captcha: Option<MockCaptcha>) -> Harness {
	let fixture = contact_form().with_form_attribute("data-recaptcha-site-key", "site-key");
	let services = match captcha {
		Some(captcha) => TestServices::new().with_captcha(captcha),
		None => TestServices::new(),
	};
	Harness::observe(fixture, services)
}

#[rstest]
fn test_token_is_added_to_payload() {
	let harness = gated(Some(MockCaptcha::token("token-123")));
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();

	let request = &harness.services.transport.requests()[0];
	assert_eq!(
		request
			.payload
			.get("recaptcha-response")
			.and_then(|value| value.as_text()),
		Some("token-123")
	);
	assert_eq!(harness.success_text(), "Saved");
}

#[rstest]
fn test_runtime_receives_site_key_and_action() {
	let harness = gated(Some(MockCaptcha::token("t")));
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();

	let runtime = harness.services.captcha.as_ref().unwrap();
	assert_eq!(
		runtime.calls(),
		vec![("site-key".to_string(), "submit".to_string())]
	);
}

#[rstest]
#[case::no_runtime(None)]
#[case::script_not_loaded(Some(MockCaptcha::unavailable()))]
fn test_missing_runtime_blocks_submission(#[case] captcha: Option<MockCaptcha>) {
	let harness = gated(captcha);

	harness.submit();

	assert_eq!(harness.services.transport.call_count(), 0);
	assert_eq!(harness.controller.state(), ControllerState::Error);
	assert_eq!(
		harness.error_text(),
		"The reCaptcha javascript API url is not loaded!"
	);
	assert!(!harness.fixture.button.is_disabled());
}

#[rstest]
#[tokio::test]
async fn test_runtime_failure_is_a_configuration_error() {
	let harness = gated(Some(MockCaptcha::failing("invalid site key")));

	let result = harness.controller.submit().await;

	let error = result.unwrap_err();
	assert_eq!(error.kind(), ErrorKind::Configuration);
	assert!(matches!(error, SubmitError::Captcha(_)));
	assert_eq!(harness.error_text(), "invalid site key");
	assert_eq!(harness.services.transport.call_count(), 0);
}

#[rstest]
fn test_forms_without_site_key_skip_the_gate() {
	let harness = Harness::observe(contact_form(), TestServices::new());
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();

	let request = &harness.services.transport.requests()[0];
	assert!(!request.payload.contains("recaptcha-response"));
}

#[rstest]
fn test_existing_token_field_is_replaced() {
	let fixture = contact_form()
		.with_field("recaptcha-response", "stale")
		.with_form_attribute("data-recaptcha-site-key", "site-key");
	let harness = Harness::observe(fixture, TestServices::new().with_captcha(MockCaptcha::token("fresh")));
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();

	let request = &harness.services.transport.requests()[0];
	let tokens: Vec<_> = request
		.payload
		.get_all("recaptcha-response")
		.into_iter()
		.filter_map(|value| value.as_text())
		.collect();
	assert_eq!(tokens, vec!["fresh"]);
}
