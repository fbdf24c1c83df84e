//! Error types for form submission
//!
//! [`SubmitError`] is the terminal outcome of one submission attempt. Its
//! `Display` output is exactly the text placed in the error region, so the
//! variants carrying server or transport text render it verbatim.

use thiserror::Error;

/// Coarse category of a submission failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The form or page is not set up for submission (missing action, CAPTCHA runtime).
	Configuration,
	/// The exchange with the server failed or produced no usable success answer.
	Transport,
	/// The server reported per-field errors. Never terminal on its own.
	Validation,
}

/// Failure reported by a [`Transport`](crate::services::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	/// The request never produced a response (offline, CORS, DNS, ...)
	#[error("{0}")]
	Network(String),

	/// The request could not be assembled
	#[error("Failed to build request: {0}")]
	Request(String),
}

impl TransportError {
	/// Create a network error
	pub fn network(msg: impl Into<String>) -> Self {
		Self::Network(msg.into())
	}

	/// Create a request construction error
	pub fn request(msg: impl Into<String>) -> Self {
		Self::Request(msg.into())
	}
}

/// Failure reported by a [`CaptchaRuntime`](crate::services::CaptchaRuntime).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CaptchaError {
	message: String,
}

impl CaptchaError {
	/// Create a CAPTCHA execution error
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// The message reported by the CAPTCHA provider.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Terminal outcome of a failed submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
	/// The form has no `action` attribute
	#[error("The form action property is not set!")]
	MissingAction,

	/// A site key is configured but no CAPTCHA runtime is loaded on the page
	#[error("The reCaptcha javascript API url is not loaded!")]
	CaptchaUnavailable,

	/// The CAPTCHA runtime failed to produce a token
	#[error(transparent)]
	Captcha(#[from] CaptchaError),

	/// The network exchange failed
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The response body could not be decoded as JSON
	#[error("{message}")]
	Malformed {
		/// Status line of the response (`"<status> <statusText> <url>"`)
		message: String,
		/// Decoder diagnostic, logged but never displayed
		reason: String,
	},

	/// The server answered without a success marker
	#[error("{message}")]
	Rejected {
		/// HTTP status of the response
		status: u16,
		/// Server message or synthesized fallback
		message: String,
	},
}

impl SubmitError {
	/// Returns the category of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::MissingAction | Self::CaptchaUnavailable | Self::Captcha(_) => {
				ErrorKind::Configuration
			}
			Self::Transport(_) | Self::Malformed { .. } | Self::Rejected { .. } => {
				ErrorKind::Transport
			}
		}
	}

	/// HTTP status of the response that caused this error, if one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Failure to decode [`SubmitFormSettings`](crate::settings::SubmitFormSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The settings document is not valid JSON or has mistyped fields
	#[error("Invalid submit-form settings: {0}")]
	Decode(#[from] serde_json::Error),

	/// A field has a value outside its allowed range
	#[error("Invalid submit-form setting `{field}`: {reason}")]
	Invalid {
		/// Name of the offending field
		field: &'static str,
		/// What is wrong with it
		reason: String,
	},
}
