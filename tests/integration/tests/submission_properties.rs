//! Property tests for response classification and its UI effects.
//!
//! Properties:
//! 1. A 2xx answer with a message succeeds and displays exactly that message
//! 2. 201/202 without a message succeed with the fallback text
//! 3. Any other 2xx without a message fails
//! 4. Non-2xx answers fail and never mark fields
//! 5. Exactly one of the success and error regions is visible afterwards
//! 6. The submit button is never left locked

use proptest::prelude::*;
use serde_json::{Value, json};
use submit_form::dom::Element;
use submit_form::{ControllerState, ResponseEnvelope};
use submit_form_integration_tests::Harness;

fn run(status: u16, body: Value) -> Harness {
	let harness = Harness::contact();
	harness.respond(status, body);
	harness.submit();
	harness
}

fn message_strategy() -> impl Strategy<Value = String> {
	"[A-Za-z0-9 .!]{1,40}"
}

fn error_map_strategy() -> impl Strategy<Value = Value> {
	prop::collection::btree_map(
		prop::sample::select(vec!["email", "name", "phone"]),
		"[a-z ]{1,20}",
		0..3,
	)
	.prop_map(|errors| json!(errors))
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(50))]

	/// Property: 2xx + message always succeeds with that message
	#[test]
	fn test_2xx_with_message_succeeds(status in 200u16..300, message in message_strategy()) {
		let harness = run(status, json!({ "message": message }));

		prop_assert_eq!(harness.controller.state(), ControllerState::Success);
		prop_assert_eq!(harness.success_text(), message);
	}

	/// Property: 2xx without message succeeds only for 201 and 202
	#[test]
	fn test_2xx_without_message(status in 200u16..300) {
		let harness = run(status, json!({}));

		if status == 201 || status == 202 {
			prop_assert_eq!(harness.controller.state(), ControllerState::Success);
			prop_assert_eq!(harness.success_text(), "Successful");
		} else {
			prop_assert_eq!(harness.controller.state(), ControllerState::Error);
		}
	}

	/// Property: non-2xx never succeeds and never marks fields
	#[test]
	fn test_non_2xx_never_marks_fields(
		status in prop_oneof![100u16..200, 300u16..600],
		errors in error_map_strategy(),
		message in proptest::option::of(message_strategy()),
	) {
		let mut body = json!({ "errors": errors });
		if let Some(message) = &message {
			body["message"] = json!(message);
		}
		let harness = run(status, body);

		prop_assert_eq!(harness.controller.state(), ControllerState::Error);
		prop_assert!(!harness.fixture.field("email").has_class("is-invalid"));
		prop_assert!(!harness.fixture.field("name").has_class("is-invalid"));
		if let Some(message) = message {
			prop_assert_eq!(harness.error_text(), message);
		}
	}

	/// Property: 2xx field errors mark exactly the named fields present
	#[test]
	fn test_2xx_marks_named_fields(errors in error_map_strategy(), with_message in any::<bool>()) {
		let mut body = json!({ "errors": errors.clone() });
		if with_message {
			body["message"] = json!("ok");
		}
		let harness = run(200, body);

		for field in ["email", "name"] {
			let expected = errors.get(field).is_some();
			prop_assert_eq!(harness.fixture.field(field).has_class("is-invalid"), expected);
		}
	}

	/// Property: terminal states show exactly one banner and unlock the button
	#[test]
	fn test_terminal_regions_are_exclusive(
		status in 100u16..600,
		message in proptest::option::of(message_strategy()),
	) {
		let body = match message {
			Some(message) => json!({ "message": message }),
			None => json!({}),
		};
		let harness = run(status, body);

		let success = harness.fixture.is_visible(&harness.fixture.success);
		let error = harness.fixture.is_visible(&harness.fixture.error);
		prop_assert!(success != error);
		prop_assert!(!harness.fixture.is_visible(&harness.fixture.loading));
		prop_assert!(!harness.fixture.button.is_disabled());
	}

	/// Property: envelope extraction never fails on arbitrary JSON objects
	#[test]
	fn test_envelope_is_lenient(
		message in prop_oneof![Just(json!(null)), Just(json!(3)), message_strategy().prop_map(Value::from)],
		errors in prop_oneof![Just(json!("oops")), Just(json!([1, 2])), error_map_strategy()],
	) {
		let envelope = ResponseEnvelope::from_value(json!({ "message": message, "errors": errors }));

		prop_assert_eq!(envelope.message().is_some(), message.as_str().is_some_and(|m| !m.is_empty()));
		prop_assert_eq!(envelope.errors().is_some(), errors.is_object());
	}
}
