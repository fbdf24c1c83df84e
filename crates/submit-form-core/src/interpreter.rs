//! Response interpretation
//!
//! Turns a raw [`TransportResponse`] into a [`Classification`] without
//! touching the UI. The stages run in a fixed order:
//!
//! ```text
//! decode ──fail──▶ Malformed("<status> <statusText> <url>")
//!   │
//! HTTP category ──non-2xx──▶ Rejected(message | status line)
//!   │
//! success shape ──message──▶ Accepted(message)
//!   │           ──201/202──▶ Accepted(fallback)
//!   │           ──else─────▶ Rejected(missing success marker)
//! ```
//!
//! Field errors are only carried from the success-shape stage. A non-2xx
//! answer that lists `errors` is rejected with its message alone.

use crate::envelope::{FieldErrors, ResponseEnvelope};
use crate::error::SubmitError;
use crate::services::TransportResponse;

/// Prefix of the message used when a 2xx answer has no success marker.
pub const MISSING_SUCCESS_MARKER: &str =
	"Form submission failed and no error message returned from: ";

/// Outcome of interpreting one response.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
	/// The server confirmed the submission
	Accepted {
		/// Message to display
		message: String,
		/// Decoded answer, including any field errors
		envelope: ResponseEnvelope,
	},
	/// The server answered but did not confirm the submission
	Rejected {
		/// HTTP status
		status: u16,
		/// Message to display
		message: String,
		/// Field errors from a 2xx answer; always `None` for non-2xx
		field_errors: Option<FieldErrors>,
	},
	/// The body was not valid JSON
	Malformed {
		/// Status line to display
		message: String,
		/// Decoder diagnostic
		reason: String,
	},
}

impl Classification {
	/// Returns `true` for [`Classification::Accepted`].
	pub fn is_accepted(&self) -> bool {
		matches!(self, Self::Accepted { .. })
	}

	/// Message to display for this outcome.
	pub fn message(&self) -> &str {
		match self {
			Self::Accepted { message, .. }
			| Self::Rejected { message, .. }
			| Self::Malformed { message, .. } => message,
		}
	}

	/// Field errors that must be annotated for this outcome.
	pub fn field_errors(&self) -> Option<&FieldErrors> {
		match self {
			Self::Accepted { envelope, .. } => envelope.errors(),
			Self::Rejected { field_errors, .. } => field_errors.as_ref(),
			Self::Malformed { .. } => None,
		}
	}

	/// Converts a failed outcome into the matching [`SubmitError`].
	///
	/// Returns `None` for [`Classification::Accepted`].
	pub fn into_error(self) -> Option<SubmitError> {
		match self {
			Self::Accepted { .. } => None,
			Self::Rejected {
				status, message, ..
			} => Some(SubmitError::Rejected { status, message }),
			Self::Malformed { message, reason } => Some(SubmitError::Malformed { message, reason }),
		}
	}
}

/// Classifies responses for one form action.
#[derive(Debug, Clone, Copy)]
pub struct ResponseInterpreter<'a> {
	action: &'a str,
	success_fallback: &'a str,
}

impl<'a> ResponseInterpreter<'a> {
	/// Creates an interpreter for submissions sent to `action`.
	///
	/// `success_fallback` is displayed for 201/202 answers without a message.
	pub fn new(action: &'a str, success_fallback: &'a str) -> Self {
		Self {
			action,
			success_fallback,
		}
	}

	/// Classifies `response`.
	pub fn classify(&self, response: &TransportResponse) -> Classification {
		let envelope = match ResponseEnvelope::decode(&response.body) {
			Ok(envelope) => envelope,
			Err(err) => {
				return Classification::Malformed {
					message: response.status_line(),
					reason: err.to_string(),
				};
			}
		};

		if !response.is_success() {
			let message = envelope
				.message()
				.map(str::to_owned)
				.unwrap_or_else(|| response.status_line());
			return Classification::Rejected {
				status: response.status,
				message,
				field_errors: None,
			};
		}

		if let Some(message) = envelope.message() {
			return Classification::Accepted {
				message: message.to_owned(),
				envelope,
			};
		}

		if matches!(response.status, 201 | 202) {
			return Classification::Accepted {
				message: self.success_fallback.to_owned(),
				envelope,
			};
		}

		Classification::Rejected {
			status: response.status,
			message: format!(
				"{}{}: {}",
				MISSING_SUCCESS_MARKER,
				self.action,
				envelope.raw()
			),
			field_errors: envelope.errors().cloned(),
		}
	}
}
