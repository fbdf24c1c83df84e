//! Callback types for submission notifications.
//!
//! ## Features
//!
//! - **Callback<Args>**: A cloneable wrapper around a unary function taking `&Args`
//! - **CallbackRegistry<Args>**: An ordered, append-only list of callbacks
//!
//! ## Example
//!
//! ```ignore
//! use submit_form_core::CallbackRegistry;
//!
//! let on_success = CallbackRegistry::<serde_json::Value>::new();
//! on_success.register(|answer| {
//!     info_log!("server said {}", answer);
//! });
//! on_success.invoke(&serde_json::json!({ "message": "Saved" }));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A cloneable callback receiving its payload by reference.
///
/// `Callback` wraps a function in an `Rc`; clones share the same function.
/// Controllers run on the page's single thread, so no `Send` bound applies.
pub struct Callback<Args> {
	inner: Rc<dyn Fn(&Args) + 'static>,
}

impl<Args> Callback<Args> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Args) + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback with `args`.
	pub fn call(&self, args: &Args) {
		(self.inner)(args)
	}
}

impl<Args> Clone for Callback<Args> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args> fmt::Debug for Callback<Args> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

/// Ordered subscribers of one notification channel.
///
/// Insertion order is invocation order and there is no removal. A callback
/// may register further callbacks or start a new submission while it runs;
/// such registrations take effect from the next invocation.
pub struct CallbackRegistry<Args> {
	entries: RefCell<Vec<Callback<Args>>>,
}

impl<Args> CallbackRegistry<Args> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			entries: RefCell::new(Vec::new()),
		}
	}

	/// Appends a closure.
	pub fn register<F>(&self, f: F)
	where
		F: Fn(&Args) + 'static,
	{
		self.push(Callback::new(f));
	}

	/// Appends an existing callback.
	pub fn push(&self, callback: Callback<Args>) {
		self.entries.borrow_mut().push(callback);
	}

	/// Calls every registered callback with `payload`, in insertion order.
	pub fn invoke(&self, payload: &Args) {
		let snapshot = self.entries.borrow().clone();
		for callback in &snapshot {
			callback.call(payload);
		}
	}

	/// Number of registered callbacks.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Returns `true` if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

impl<Args> Default for CallbackRegistry<Args> {
	fn default() -> Self {
		Self::new()
	}
}

impl<Args> fmt::Debug for CallbackRegistry<Args> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CallbackRegistry")
			.field("len", &self.len())
			.finish()
	}
}
