//! DOM abstraction layer
//!
//! The controller only needs a handful of element primitives: attribute and
//! class manipulation, content injection, scoped lookup and listener
//! attachment. They are expressed as the [`Element`] and [`FormElement`]
//! traits so the submission logic runs unchanged against `web_sys` in the
//! browser and against the in-memory tree in [`testing`](crate::testing).

use std::fmt;

use crate::payload::FormPayload;

/// Typed selector for scoped lookups.
///
/// Rendered to CSS by its `Display` implementation for platforms that query
/// with selector strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
	/// Elements carrying a class
	Class(String),
	/// `<input>` elements with the given `name` attribute
	InputNamed(String),
}

impl Selector {
	/// Selector for elements carrying `class`.
	pub fn class(class: impl Into<String>) -> Self {
		Self::Class(class.into())
	}

	/// Selector for inputs named `name`.
	pub fn input_named(name: impl Into<String>) -> Self {
		Self::InputNamed(name.into())
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Class(class) => write!(f, ".{}", class),
			Self::InputNamed(name) => {
				write!(f, "input[name=\"{}\"]", name.replace('\\', "\\\\").replace('"', "\\\""))
			}
		}
	}
}

/// DOM events the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
	/// Form submission
	Submit,
	/// Click on a trigger element
	Click,
	/// Value change on an input
	Input,
}

impl EventType {
	/// DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Submit => "submit",
			Self::Click => "click",
			Self::Input => "input",
		}
	}
}

/// How a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenOptions {
	/// Detach after the first event
	pub once: bool,
	/// Suppress the browser's default action
	pub prevent_default: bool,
}

impl ListenOptions {
	/// Listener that fires at most once.
	pub const fn once() -> Self {
		Self {
			once: true,
			prevent_default: false,
		}
	}

	/// Persistent listener that suppresses the default action.
	pub const fn intercept() -> Self {
		Self {
			once: false,
			prevent_default: true,
		}
	}
}

/// Event handler attached through [`Element::listen`].
pub type Handler = Box<dyn FnMut() + 'static>;

/// Minimal element surface used by the controller.
///
/// Handles are cheap clones referring to the same underlying node. All
/// mutators are infallible from the caller's point of view; platforms log and
/// ignore failures of the underlying API.
pub trait Element: Clone + 'static {
	/// Attribute value, `None` when the attribute is absent.
	fn attribute(&self, name: &str) -> Option<String>;

	/// Sets an attribute.
	fn set_attribute(&self, name: &str, value: &str);

	/// Removes an attribute.
	fn remove_attribute(&self, name: &str);

	/// Adds a class.
	fn add_class(&self, class: &str);

	/// Removes a class.
	fn remove_class(&self, class: &str);

	/// Returns `true` if the element carries `class`.
	fn has_class(&self, class: &str) -> bool;

	/// Replaces the element's inner markup.
	fn set_inner_html(&self, html: &str);

	/// Replaces the element's rendered text.
	fn set_inner_text(&self, text: &str);

	/// Parent element.
	fn parent(&self) -> Option<Self>;

	/// First descendant matching `selector`.
	fn query(&self, selector: &Selector) -> Option<Self>;

	/// All descendants matching `selector`, in document order.
	fn query_all(&self, selector: &Selector) -> Vec<Self>;

	/// Attaches `handler` to `event` for the lifetime of the page.
	fn listen(&self, event: EventType, options: ListenOptions, handler: Handler);
}

/// An element that can be submitted.
pub trait FormElement: Element {
	/// Collects the current name/value pairs of the form's controls.
	fn collect_payload(&self) -> FormPayload;

	/// Restores every control to its initial value.
	fn reset(&self);
}
