//! Response envelope
//!
//! The server answers a submission with a JSON object that may carry
//! `message`, `errors` and `redirect_to`. The envelope keeps the raw answer
//! for callbacks and signals, and extracts the three known keys leniently:
//! a value of an unexpected type is treated as absent rather than failing
//! the whole submission.

use std::collections::BTreeMap;

use serde_json::Value;

/// Field name to error message, as reported by the server.
pub type FieldErrors = BTreeMap<String, String>;

/// Decoded server answer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseEnvelope {
	message: Option<String>,
	errors: Option<FieldErrors>,
	redirect_to: Option<String>,
	raw: Value,
}

impl ResponseEnvelope {
	/// Decodes a response body.
	pub fn decode(body: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Value>(body).map(Self::from_value)
	}

	/// Builds an envelope from an already decoded answer.
	///
	/// - `message` and `redirect_to` count only as non-empty strings.
	/// - `errors` counts as an object; each value may be a string or an array
	///   of strings (joined with `", "`). `null` entries are dropped.
	/// - Non-object answers produce an envelope with no known keys.
	pub fn from_value(raw: Value) -> Self {
		let Some(object) = raw.as_object() else {
			return Self {
				raw,
				..Self::default()
			};
		};

		let message = non_empty_string(object.get("message"));
		let redirect_to = non_empty_string(object.get("redirect_to"));
		let errors = object
			.get("errors")
			.and_then(Value::as_object)
			.map(|errors| {
				errors
					.iter()
					.filter_map(|(field, value)| {
						error_text(value).map(|text| (field.clone(), text))
					})
					.collect::<FieldErrors>()
			});

		Self {
			message,
			errors,
			redirect_to,
			raw,
		}
	}

	/// Server message, if any.
	pub fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	/// Per-field errors, if the answer carried an `errors` object.
	pub fn errors(&self) -> Option<&FieldErrors> {
		self.errors.as_ref()
	}

	/// Redirect target, if any.
	pub fn redirect_to(&self) -> Option<&str> {
		self.redirect_to.as_deref()
	}

	/// The decoded answer as received.
	pub fn raw(&self) -> &Value {
		&self.raw
	}

	/// Consumes the envelope, returning the decoded answer.
	pub fn into_raw(self) -> Value {
		self.raw
	}
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
	value
		.and_then(Value::as_str)
		.filter(|text| !text.is_empty())
		.map(str::to_owned)
}

fn error_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) => Some(text.clone()),
		Value::Array(items) => Some(
			items
				.iter()
				.map(|item| match item {
					Value::String(text) => text.clone(),
					other => other.to_string(),
				})
				.collect::<Vec<_>>()
				.join(", "),
		),
		other => Some(other.to_string()),
	}
}
