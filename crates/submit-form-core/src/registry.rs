//! Name-keyed controller registry
//!
//! Lets page code look up the controller of a named form after observation.
//! Registering a second form under an existing name replaces the first
//! entry; the replaced controller keeps working, it just can no longer be
//! found by name.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::controller::FormController;
use crate::dom::FormElement;
use crate::warn_log;

/// Controllers indexed by form name.
pub struct FormRegistry<E: FormElement> {
	controllers: RefCell<HashMap<String, Rc<FormController<E>>>>,
}

impl<E: FormElement> FormRegistry<E> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			controllers: RefCell::new(HashMap::new()),
		}
	}

	/// Indexes `controller` under its form name.
	///
	/// Unnamed forms are not indexed. Returns the controller previously
	/// registered under the same name.
	pub fn register(&self, controller: &Rc<FormController<E>>) -> Option<Rc<FormController<E>>> {
		let name = controller.name()?;
		let previous = self
			.controllers
			.borrow_mut()
			.insert(name.to_string(), Rc::clone(controller));
		if previous.is_some() {
			warn_log!("form name {:?} registered twice, keeping the latest", name);
		}
		previous
	}

	/// Controller of the form named `name`.
	pub fn get(&self, name: &str) -> Option<Rc<FormController<E>>> {
		self.controllers.borrow().get(name).cloned()
	}

	/// Number of indexed controllers.
	pub fn len(&self) -> usize {
		self.controllers.borrow().len()
	}

	/// Returns `true` if no controller is indexed.
	pub fn is_empty(&self) -> bool {
		self.controllers.borrow().is_empty()
	}

	/// Indexed names, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.controllers.borrow().keys().cloned().collect();
		names.sort();
		names
	}
}

impl<E: FormElement> Default for FormRegistry<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: FormElement> std::fmt::Debug for FormRegistry<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormRegistry")
			.field("names", &self.names())
			.finish()
	}
}
