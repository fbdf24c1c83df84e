//! Submission payload
//!
//! [`FormPayload`] is the ordered name/value list collected from a form's
//! controls, mirroring the browser's `FormData`: names may repeat, `append`
//! keeps duplicates and `set` collapses them.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

/// An uploaded file held by the platform layer.
///
/// The core never reads file contents; it only carries the handle through to
/// the transport, which downcasts it back to its native type.
#[derive(Clone)]
pub struct FileHandle {
	file_name: String,
	handle: Rc<dyn Any>,
}

impl FileHandle {
	/// Wraps a platform file object.
	pub fn new(file_name: impl Into<String>, handle: impl Any) -> Self {
		Self {
			file_name: file_name.into(),
			handle: Rc::new(handle),
		}
	}

	/// Name of the selected file.
	pub fn file_name(&self) -> &str {
		&self.file_name
	}

	/// Returns the platform object if it has type `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.handle.downcast_ref::<T>()
	}
}

impl fmt::Debug for FileHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FileHandle")
			.field("file_name", &self.file_name)
			.field("handle", &"<file>")
			.finish()
	}
}

impl PartialEq for FileHandle {
	fn eq(&self, other: &Self) -> bool {
		self.file_name == other.file_name && Rc::ptr_eq(&self.handle, &other.handle)
	}
}

/// Value of one payload entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	/// Plain control value
	Text(String),
	/// File input selection
	File(FileHandle),
}

impl FieldValue {
	/// Returns the text value, or `None` for files.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::File(_) => None,
		}
	}

	fn to_json(&self) -> Value {
		match self {
			Self::Text(text) => Value::String(text.clone()),
			Self::File(file) => Value::String(file.file_name().to_string()),
		}
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<FileHandle> for FieldValue {
	fn from(value: FileHandle) -> Self {
		Self::File(value)
	}
}

/// Ordered name/value pairs sent with a submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
	entries: Vec<(String, FieldValue)>,
}

impl FormPayload {
	/// Creates an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an entry, keeping any existing entries with the same name.
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
		self.entries.push((name.into(), value.into()));
	}

	/// Replaces the first entry named `name` and drops the rest, or appends
	/// when the name is not present.
	pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
		let name = name.into();
		let value = value.into();
		match self.entries.iter().position(|(key, _)| *key == name) {
			Some(index) => {
				self.entries[index].1 = value;
				let mut seen = 0usize;
				self.entries.retain(|(key, _)| {
					if *key != name {
						return true;
					}
					seen += 1;
					seen == 1
				});
			}
			None => self.entries.push((name, value)),
		}
	}

	/// First value stored under `name`.
	pub fn get(&self, name: &str) -> Option<&FieldValue> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value)
	}

	/// All values stored under `name`, in insertion order.
	pub fn get_all(&self, name: &str) -> Vec<&FieldValue> {
		self.entries
			.iter()
			.filter(|(key, _)| key == name)
			.map(|(_, value)| value)
			.collect()
	}

	/// Returns `true` if any entry is named `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Iterates over entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if the payload has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// JSON view of the payload. Repeated names become arrays and files are
	/// represented by their file name.
	pub fn to_json(&self) -> Value {
		let mut object = Map::new();
		for (name, value) in &self.entries {
			let json = value.to_json();
			match object.get_mut(name) {
				Some(Value::Array(values)) => values.push(json),
				Some(existing) => {
					let first = existing.take();
					*existing = Value::Array(vec![first, json]);
				}
				None => {
					object.insert(name.clone(), json);
				}
			}
		}
		Value::Object(object)
	}
}

impl<K, V> FromIterator<(K, V)> for FormPayload
where
	K: Into<String>,
	V: Into<FieldValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut payload = Self::new();
		for (name, value) in iter {
			payload.append(name, value);
		}
		payload
	}
}
