//! Visibility regions and the submit button guard
//!
//! Both wrap an element that may be missing from the markup. A form without
//! a loading indicator or a dedicated submit button is legal, so every
//! operation on an unresolved region is a silent no-op.

use crate::dom::{Element, Selector};

/// Attribute toggled on the submit control while a request is in flight.
const DISABLED: &str = "disabled";

/// An optional UI region shown and hidden by toggling a class.
#[derive(Debug, Clone)]
pub struct VisibilityRegion<E> {
	element: Option<E>,
	hidden_class: String,
}

impl<E: Element> VisibilityRegion<E> {
	/// Wraps `element`, hiding it with `hidden_class`.
	pub fn new(element: Option<E>, hidden_class: impl Into<String>) -> Self {
		Self {
			element,
			hidden_class: hidden_class.into(),
		}
	}

	/// Resolves the first descendant of `scope` matching `selector`.
	pub fn resolve(scope: &E, selector: &Selector, hidden_class: impl Into<String>) -> Self {
		Self::new(scope.query(selector), hidden_class)
	}

	/// Reveals the region. Non-empty `content` replaces its inner markup.
	pub fn show(&self, content: Option<&str>) {
		let Some(element) = &self.element else {
			return;
		};
		element.remove_class(&self.hidden_class);
		if let Some(content) = content.filter(|content| !content.is_empty()) {
			element.set_inner_html(content);
		}
	}

	/// Conceals the region.
	pub fn hide(&self) {
		if let Some(element) = &self.element {
			element.add_class(&self.hidden_class);
		}
	}

	/// Returns `true` if the region exists and is not hidden.
	pub fn is_visible(&self) -> bool {
		self.element
			.as_ref()
			.is_some_and(|element| !element.has_class(&self.hidden_class))
	}

	/// Returns `true` if the region was found in the markup.
	pub fn is_resolved(&self) -> bool {
		self.element.is_some()
	}

	/// The wrapped element.
	pub fn element(&self) -> Option<&E> {
		self.element.as_ref()
	}
}

/// Locks the submit control during in-flight requests.
#[derive(Debug, Clone)]
pub struct SubmitButtonGuard<E> {
	element: Option<E>,
}

impl<E: Element> SubmitButtonGuard<E> {
	/// Wraps `element`.
	pub fn new(element: Option<E>) -> Self {
		Self { element }
	}

	/// Resolves the first descendant of `scope` matching `selector`.
	pub fn resolve(scope: &E, selector: &Selector) -> Self {
		Self::new(scope.query(selector))
	}

	/// Disables the control.
	pub fn lock(&self) {
		if let Some(element) = &self.element {
			element.set_attribute(DISABLED, DISABLED);
		}
	}

	/// Re-enables the control.
	pub fn unlock(&self) {
		if let Some(element) = &self.element {
			element.remove_attribute(DISABLED);
		}
	}

	/// Returns `true` if the control exists and is disabled.
	pub fn is_locked(&self) -> bool {
		self.element
			.as_ref()
			.is_some_and(|element| element.attribute(DISABLED).is_some())
	}
}
