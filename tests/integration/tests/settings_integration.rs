//! Page-wide settings flowing into controllers.

use std::time::Duration;

use rstest::*;
use serde_json::json;
use submit_form::dom::Element;
use submit_form::testing::{FormFixture, MemoryElement, TestServices};
use submit_form::{SettingsError, SubmitFormSettings};
use submit_form_integration_tests::Harness;

/// A form styled for a framework that hides with `hidden` and marks
/// errors with `error`.
fn custom_form() -> FormFixture {
	let fixture = FormFixture::new(Some("/signup"));
	let form = fixture.form.clone();
	let banner = form.append(MemoryElement::new("p").with_class("flash-ok").with_class("hidden"));
	let group = form.append(MemoryElement::new("div"));
	group.append(
		MemoryElement::new("input")
			.with_attribute("name", "email")
			.with_value("x"),
	);
	group.append(MemoryElement::new("span").with_class("help"));
	FormFixture {
		success: banner,
		..fixture
	}
}

#[rstest]
fn test_custom_classes_drive_regions_and_markers() {
	let settings = SubmitFormSettings::from_json(
		r#"{
			"success_class": "flash-ok",
			"hidden_class": "hidden",
			"invalid_class": "error",
			"feedback_class": "help"
		}"#,
	)
	.unwrap();
	let harness = Harness::observe(custom_form(), TestServices::new().with_settings(settings));
	harness.respond(200, json!({ "message": "Welcome", "errors": { "email": "taken" } }));

	harness.submit();

	assert!(!harness.fixture.success.has_class("hidden"));
	assert_eq!(harness.fixture.success.inner_html(), "Welcome");
	let email = harness.fixture.field("email");
	assert!(email.has_class("error"));
	let help = email
		.parent()
		.and_then(|group| group.query(&submit_form::Selector::class("help")))
		.unwrap();
	assert_eq!(help.inner_text(), "taken");
}

#[rstest]
fn test_custom_redirect_delay() {
	let settings = SubmitFormSettings::default().with_redirect_delay_ms(500);
	let harness = Harness::observe(
		submit_form_integration_tests::contact_form(),
		TestServices::new().with_settings(settings),
	);
	harness.respond(200, json!({ "message": "Saved", "redirect_to": "/next" }));

	harness.submit();

	assert_eq!(
		harness.services.navigator.redirects(),
		vec![("/next".to_string(), Duration::from_millis(500))]
	);
}

#[rstest]
fn test_custom_fallback_message() {
	let settings =
		SubmitFormSettings::from_json(r#"{ "success_fallback_message": "Thanks!" }"#).unwrap();
	let harness = Harness::observe(
		submit_form_integration_tests::contact_form(),
		TestServices::new().with_settings(settings),
	);
	harness.respond(201, json!({}));

	harness.submit();

	assert_eq!(harness.success_text(), "Thanks!");
}

#[rstest]
fn test_custom_token_field() {
	let settings = SubmitFormSettings::from_json(
		r#"{ "captcha_token_field": "g-recaptcha-response", "captcha_action": "signup" }"#,
	)
	.unwrap();
	let fixture = submit_form_integration_tests::contact_form()
		.with_form_attribute("data-recaptcha-site-key", "k");
	let harness = Harness::observe(
		fixture,
		TestServices::new()
			.with_settings(settings)
			.with_captcha(submit_form::testing::MockCaptcha::token("tok")),
	);
	harness.respond(200, json!({ "message": "Saved" }));

	harness.submit();

	let request = &harness.services.transport.requests()[0];
	assert!(request.payload.contains("g-recaptcha-response"));
	let calls = harness.services.captcha.as_ref().unwrap().calls();
	assert_eq!(calls[0].1, "signup");
}

#[rstest]
fn test_optional_fields_hidden_with_configured_class() {
	let fixture = submit_form_integration_tests::contact_form();
	let optional = fixture
		.form
		.append(MemoryElement::new("div").with_class("submit-form-field-optional"));
	let harness = Harness::observe(
		fixture,
		TestServices::new().with_settings(SubmitFormSettings::default().with_hidden_class("hidden")),
	);

	harness.controller.hide_optional_fields();

	assert!(optional.has_class("hidden"));
}

#[rstest]
#[case(r#"{ "hidden_class": "" }"#, "hidden_class")]
#[case(r#"{ "captcha_token_field": "  " }"#, "captcha_token_field")]
fn test_invalid_settings_are_rejected(#[case] json: &str, #[case] field: &str) {
	match SubmitFormSettings::from_json(json) {
		Err(SettingsError::Invalid { field: reported, .. }) => assert_eq!(reported, field),
		other => panic!("expected invalid settings, got {:?}", other),
	}
}
