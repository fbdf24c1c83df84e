//! Field error annotation
//!
//! Maps server-reported field errors onto the form's inputs. A marked input
//! gets the invalid class and its feedback element (the `.invalid-feedback`
//! sibling inside the input's parent) gets the message. Each mark arms a
//! one-time `input` listener on that input only, so the first edit clears
//! the input's own marker and leaves other fields alone.

use crate::dom::{Element, EventType, ListenOptions, Selector};
use crate::envelope::FieldErrors;

/// Annotates and clears field errors within one form.
#[derive(Debug, Clone)]
pub struct FieldErrorAnnotator<E> {
	scope: E,
	invalid_class: String,
	feedback_class: String,
}

impl<E: Element> FieldErrorAnnotator<E> {
	/// Creates an annotator scoped to `scope`.
	pub fn new(
		scope: E,
		invalid_class: impl Into<String>,
		feedback_class: impl Into<String>,
	) -> Self {
		Self {
			scope,
			invalid_class: invalid_class.into(),
			feedback_class: feedback_class.into(),
		}
	}

	/// Removes every marker in scope and clears the matching feedback text.
	///
	/// Idempotent: with no marked fields nothing is touched.
	pub fn clear_all(&self) {
		for field in self.marked_fields() {
			field.remove_class(&self.invalid_class);
			if let Some(feedback) = self.feedback_for(&field) {
				feedback.set_inner_text("");
			}
		}
	}

	/// Marks each named input with its message.
	///
	/// Names without a matching input are skipped. Returns how many inputs
	/// were marked.
	pub fn annotate(&self, errors: &FieldErrors) -> usize {
		let mut marked = 0;
		for (name, message) in errors {
			let Some(input) = self.scope.query(&Selector::input_named(name)) else {
				continue;
			};

			input.add_class(&self.invalid_class);
			if let Some(feedback) = self.feedback_for(&input) {
				feedback.set_inner_text(message);
			}

			let target = input.clone();
			let invalid_class = self.invalid_class.clone();
			input.listen(
				EventType::Input,
				ListenOptions::once(),
				Box::new(move || target.remove_class(&invalid_class)),
			);
			marked += 1;
		}
		marked
	}

	/// Inputs currently carrying the invalid class.
	pub fn marked_fields(&self) -> Vec<E> {
		self.scope.query_all(&Selector::class(self.invalid_class.as_str()))
	}

	fn feedback_for(&self, input: &E) -> Option<E> {
		input
			.parent()?
			.query(&Selector::class(self.feedback_class.as_str()))
	}
}
