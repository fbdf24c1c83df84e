//! Test support
//!
//! An in-memory element tree and recording collaborators, so controllers
//! can be driven end to end on native targets without a browser.
//!
//! ```ignore
//! let fixture = FormFixture::new(Some("/contact")).with_field("email", "a@b");
//! let services = TestServices::new();
//! services.transport.respond(TransportResponse::new(200, r#"{"message":"Saved"}"#));
//!
//! let controller = FormController::new(fixture.form.clone(), services.services());
//! controller.submit().await?;
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::dom::{Element, EventType, FormElement, Handler, ListenOptions, Selector};
use crate::error::{CaptchaError, TransportError};
use crate::error_log;
use crate::payload::FormPayload;
use crate::services::{
	CaptchaRuntime, Navigator, Services, SignalBus, Spawner, SubmitRequest, SuccessSignal,
	Transport, TransportResponse,
};
use crate::settings::SubmitFormSettings;

const CONTROL_TAGS: [&str; 3] = ["input", "select", "textarea"];

struct Listener {
	event: EventType,
	options: ListenOptions,
	handler: Rc<RefCell<Handler>>,
}

#[derive(Default)]
struct Node {
	tag: String,
	attributes: BTreeMap<String, String>,
	classes: Vec<String>,
	inner_html: String,
	inner_text: String,
	value: String,
	initial_value: String,
	children: Vec<MemoryElement>,
	parent: Weak<RefCell<Node>>,
	listeners: Vec<Listener>,
}

/// Comparable state of an element subtree, listeners excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
	/// Tag name
	pub tag: String,
	/// Attributes, sorted by name
	pub attributes: BTreeMap<String, String>,
	/// Classes, in insertion order
	pub classes: Vec<String>,
	/// Inner markup
	pub inner_html: String,
	/// Rendered text
	pub inner_text: String,
	/// Control value
	pub value: String,
	/// Child subtrees
	pub children: Vec<NodeSnapshot>,
}

/// Element of an in-memory tree.
///
/// Clones are handles to the same node; equality is node identity.
#[derive(Clone)]
pub struct MemoryElement {
	node: Rc<RefCell<Node>>,
}

impl MemoryElement {
	/// Creates a detached element.
	pub fn new(tag: &str) -> Self {
		Self {
			node: Rc::new(RefCell::new(Node {
				tag: tag.to_string(),
				..Node::default()
			})),
		}
	}

	/// Builder form of [`Element::set_attribute`].
	pub fn with_attribute(self, name: &str, value: &str) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Builder form of [`Element::add_class`].
	pub fn with_class(self, class: &str) -> Self {
		self.add_class(class);
		self
	}

	/// Builder form of [`Element::remove_class`].
	pub fn without_class(self, class: &str) -> Self {
		self.remove_class(class);
		self
	}

	/// Builder form of [`Element::set_inner_html`].
	pub fn with_inner_html(self, html: &str) -> Self {
		self.set_inner_html(html);
		self
	}

	/// Sets both the current and the initial control value.
	pub fn with_value(self, value: &str) -> Self {
		{
			let mut node = self.node.borrow_mut();
			node.value = value.to_string();
			node.initial_value = value.to_string();
		}
		self
	}

	/// Attaches `child` as the last child and returns it.
	pub fn append(&self, child: MemoryElement) -> MemoryElement {
		child.node.borrow_mut().parent = Rc::downgrade(&self.node);
		self.node.borrow_mut().children.push(child.clone());
		child
	}

	/// Tag name.
	pub fn tag(&self) -> String {
		self.node.borrow().tag.clone()
	}

	/// Inner markup.
	pub fn inner_html(&self) -> String {
		self.node.borrow().inner_html.clone()
	}

	/// Rendered text.
	pub fn inner_text(&self) -> String {
		self.node.borrow().inner_text.clone()
	}

	/// Current control value.
	pub fn value(&self) -> String {
		self.node.borrow().value.clone()
	}

	/// Returns `true` if the `disabled` attribute is present.
	pub fn is_disabled(&self) -> bool {
		self.attribute("disabled").is_some()
	}

	/// Number of listeners still attached for `event`.
	pub fn listener_count(&self, event: EventType) -> usize {
		self.node
			.borrow()
			.listeners
			.iter()
			.filter(|listener| listener.event == event)
			.count()
	}

	/// Fires `event` on this element.
	///
	/// One-time listeners are detached before any handler runs. Returns
	/// `true` if a listener suppressed the default action.
	pub fn dispatch(&self, event: EventType) -> bool {
		let (handlers, default_prevented) = {
			let mut node = self.node.borrow_mut();
			let mut handlers = Vec::new();
			let mut default_prevented = false;
			node.listeners.retain(|listener| {
				if listener.event != event {
					return true;
				}
				handlers.push(Rc::clone(&listener.handler));
				default_prevented |= listener.options.prevent_default;
				!listener.options.once
			});
			(handlers, default_prevented)
		};

		for handler in handlers {
			let mut handler = handler.borrow_mut();
			(*handler)();
		}
		default_prevented
	}

	/// Replaces the control value as a user would and fires `input`.
	pub fn type_text(&self, text: &str) {
		self.node.borrow_mut().value = text.to_string();
		self.dispatch(EventType::Input);
	}

	/// Captures the subtree state.
	pub fn snapshot(&self) -> NodeSnapshot {
		let node = self.node.borrow();
		NodeSnapshot {
			tag: node.tag.clone(),
			attributes: node.attributes.clone(),
			classes: node.classes.clone(),
			inner_html: node.inner_html.clone(),
			inner_text: node.inner_text.clone(),
			value: node.value.clone(),
			children: node.children.iter().map(MemoryElement::snapshot).collect(),
		}
	}

	fn matches(&self, selector: &Selector) -> bool {
		let node = self.node.borrow();
		match selector {
			Selector::Class(class) => node.classes.iter().any(|c| c == class),
			Selector::InputNamed(name) => {
				node.tag == "input" && node.attributes.get("name") == Some(name)
			}
		}
	}

	fn descendants(&self) -> Vec<MemoryElement> {
		let mut found = Vec::new();
		for child in self.node.borrow().children.iter() {
			found.push(child.clone());
			found.extend(child.descendants());
		}
		found
	}

	fn is_control(&self) -> bool {
		CONTROL_TAGS.contains(&self.node.borrow().tag.as_str())
	}

	fn is_successful_control(&self) -> bool {
		if !self.is_control() || self.is_disabled() {
			return false;
		}
		match self.attribute("type").as_deref() {
			Some("checkbox") | Some("radio") => self.attribute("checked").is_some(),
			Some("submit") | Some("button") | Some("reset") => false,
			_ => true,
		}
	}
}

impl Element for MemoryElement {
	fn attribute(&self, name: &str) -> Option<String> {
		self.node.borrow().attributes.get(name).cloned()
	}

	fn set_attribute(&self, name: &str, value: &str) {
		self.node
			.borrow_mut()
			.attributes
			.insert(name.to_string(), value.to_string());
	}

	fn remove_attribute(&self, name: &str) {
		self.node.borrow_mut().attributes.remove(name);
	}

	fn add_class(&self, class: &str) {
		let mut node = self.node.borrow_mut();
		if !node.classes.iter().any(|c| c == class) {
			node.classes.push(class.to_string());
		}
	}

	fn remove_class(&self, class: &str) {
		self.node.borrow_mut().classes.retain(|c| c != class);
	}

	fn has_class(&self, class: &str) -> bool {
		self.node.borrow().classes.iter().any(|c| c == class)
	}

	fn set_inner_html(&self, html: &str) {
		self.node.borrow_mut().inner_html = html.to_string();
	}

	fn set_inner_text(&self, text: &str) {
		self.node.borrow_mut().inner_text = text.to_string();
	}

	fn parent(&self) -> Option<Self> {
		self.node
			.borrow()
			.parent
			.upgrade()
			.map(|node| MemoryElement { node })
	}

	fn query(&self, selector: &Selector) -> Option<Self> {
		self.descendants()
			.into_iter()
			.find(|element| element.matches(selector))
	}

	fn query_all(&self, selector: &Selector) -> Vec<Self> {
		self.descendants()
			.into_iter()
			.filter(|element| element.matches(selector))
			.collect()
	}

	fn listen(&self, event: EventType, options: ListenOptions, handler: Handler) {
		self.node.borrow_mut().listeners.push(Listener {
			event,
			options,
			handler: Rc::new(RefCell::new(handler)),
		});
	}
}

impl FormElement for MemoryElement {
	fn collect_payload(&self) -> FormPayload {
		let mut payload = FormPayload::new();
		for control in self.descendants() {
			if !control.is_successful_control() {
				continue;
			}
			let Some(name) = control.attribute("name").filter(|name| !name.is_empty()) else {
				continue;
			};
			payload.append(name, control.value());
		}
		payload
	}

	fn reset(&self) {
		for control in self.descendants() {
			if control.is_control() {
				let mut node = control.node.borrow_mut();
				node.value = node.initial_value.clone();
			}
		}
	}
}

impl PartialEq for MemoryElement {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.node, &other.node)
	}
}

impl fmt::Debug for MemoryElement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let node = self.node.borrow();
		f.debug_struct("MemoryElement")
			.field("tag", &node.tag)
			.field("classes", &node.classes)
			.field("attributes", &node.attributes)
			.finish()
	}
}

/// A form laid out with the default class names.
///
/// ```text
/// form[action]
/// ├── div.submit-form-loading.d-none
/// ├── div.submit-form-message-success.d-none
/// ├── div.submit-form-message-error.d-none
/// ├── button.submit-form-button-submit
/// └── div > input[name] + div.invalid-feedback   (one per with_field)
/// ```
#[derive(Debug, Clone)]
pub struct FormFixture {
	/// The form
	pub form: MemoryElement,
	/// Loading indicator
	pub loading: MemoryElement,
	/// Success banner
	pub success: MemoryElement,
	/// Error banner
	pub error: MemoryElement,
	/// Submit button
	pub button: MemoryElement,
}

impl FormFixture {
	/// Builds the form, with an `action` attribute when one is given.
	pub fn new(action: Option<&str>) -> Self {
		let form = MemoryElement::new("form");
		if let Some(action) = action {
			form.set_attribute("action", action);
		}
		let region = |class: &str| {
			form.append(
				MemoryElement::new("div")
					.with_class(class)
					.with_class("d-none"),
			)
		};
		let loading = region("submit-form-loading");
		let success = region("submit-form-message-success");
		let error = region("submit-form-message-error");
		let button = form.append(
			MemoryElement::new("button")
				.with_attribute("type", "submit")
				.with_class("submit-form-button-submit"),
		);

		Self {
			form,
			loading,
			success,
			error,
			button,
		}
	}

	/// Sets the form's `name`.
	pub fn named(self, name: &str) -> Self {
		self.form.set_attribute("name", name);
		self
	}

	/// Sets an arbitrary form attribute.
	pub fn with_form_attribute(self, name: &str, value: &str) -> Self {
		self.form.set_attribute(name, value);
		self
	}

	/// Adds a text input with its feedback element.
	pub fn with_field(self, name: &str, value: &str) -> Self {
		let group = self.form.append(MemoryElement::new("div"));
		group.append(
			MemoryElement::new("input")
				.with_attribute("type", "text")
				.with_attribute("name", name)
				.with_value(value),
		);
		group.append(MemoryElement::new("div").with_class("invalid-feedback"));
		self
	}

	/// The input named `name`.
	///
	/// # Panics
	///
	/// Panics if no such field was added.
	pub fn field(&self, name: &str) -> MemoryElement {
		self.form
			.query(&Selector::input_named(name))
			.unwrap_or_else(|| panic!("fixture has no field named {:?}", name))
	}

	/// The feedback element of the input named `name`.
	///
	/// # Panics
	///
	/// Panics if no such field was added.
	pub fn feedback(&self, name: &str) -> MemoryElement {
		self.field(name)
			.parent()
			.and_then(|group| group.query(&Selector::class("invalid-feedback")))
			.unwrap_or_else(|| panic!("fixture has no feedback for {:?}", name))
	}

	/// Returns `true` if `element` does not carry the default hidden class.
	pub fn is_visible(&self, element: &MemoryElement) -> bool {
		!element.has_class("d-none")
	}
}

enum Reply {
	Ready(Result<TransportResponse, TransportError>),
	Deferred(oneshot::Receiver<Result<TransportResponse, TransportError>>),
}

/// Completes a response queued with [`MockTransport::respond_later`].
#[derive(Debug)]
pub struct Responder {
	sender: oneshot::Sender<Result<TransportResponse, TransportError>>,
}

impl Responder {
	/// Delivers `response` to the waiting request.
	pub fn resolve(self, response: TransportResponse) {
		let _ = self.sender.send(Ok(response));
	}

	/// Fails the waiting request with `error`.
	pub fn reject(self, error: TransportError) {
		let _ = self.sender.send(Err(error));
	}
}

/// Transport replaying queued replies and recording requests.
///
/// Replies are consumed in order. A request with nothing queued fails with
/// a network error.
#[derive(Default)]
pub struct MockTransport {
	replies: RefCell<VecDeque<Reply>>,
	requests: RefCell<Vec<SubmitRequest>>,
}

impl MockTransport {
	/// Creates a transport with an empty queue.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a response.
	pub fn respond(&self, response: TransportResponse) {
		self.replies.borrow_mut().push_back(Reply::Ready(Ok(response)));
	}

	/// Queues a failed exchange.
	pub fn fail(&self, error: TransportError) {
		self.replies.borrow_mut().push_back(Reply::Ready(Err(error)));
	}

	/// Queues a reply that stays pending until the returned [`Responder`]
	/// completes it.
	pub fn respond_later(&self) -> Responder {
		let (sender, receiver) = oneshot::channel();
		self.replies
			.borrow_mut()
			.push_back(Reply::Deferred(receiver));
		Responder { sender }
	}

	/// Requests received so far.
	pub fn requests(&self) -> Vec<SubmitRequest> {
		self.requests.borrow().clone()
	}

	/// Number of requests received.
	pub fn call_count(&self) -> usize {
		self.requests.borrow().len()
	}
}

#[async_trait(?Send)]
impl Transport for MockTransport {
	async fn post(&self, request: SubmitRequest) -> Result<TransportResponse, TransportError> {
		self.requests.borrow_mut().push(request);
		let reply = self.replies.borrow_mut().pop_front();
		match reply {
			Some(Reply::Ready(result)) => result,
			Some(Reply::Deferred(receiver)) => receiver
				.await
				.unwrap_or_else(|_| Err(TransportError::network("responder dropped"))),
			None => Err(TransportError::network("no response queued")),
		}
	}
}

#[derive(Debug, Clone)]
enum CaptchaBehavior {
	Token(String),
	Fail(String),
	Unavailable,
}

/// CAPTCHA runtime with a fixed outcome.
#[derive(Debug)]
pub struct MockCaptcha {
	behavior: CaptchaBehavior,
	calls: RefCell<Vec<(String, String)>>,
}

impl MockCaptcha {
	fn with_behavior(behavior: CaptchaBehavior) -> Self {
		Self {
			behavior,
			calls: RefCell::new(Vec::new()),
		}
	}

	/// Runtime that always issues `token`.
	pub fn token(token: &str) -> Self {
		Self::with_behavior(CaptchaBehavior::Token(token.to_string()))
	}

	/// Runtime whose execution always fails with `message`.
	pub fn failing(message: &str) -> Self {
		Self::with_behavior(CaptchaBehavior::Fail(message.to_string()))
	}

	/// Runtime whose script never finished loading.
	pub fn unavailable() -> Self {
		Self::with_behavior(CaptchaBehavior::Unavailable)
	}

	/// `(site_key, action)` of every execution.
	pub fn calls(&self) -> Vec<(String, String)> {
		self.calls.borrow().clone()
	}
}

#[async_trait(?Send)]
impl CaptchaRuntime for MockCaptcha {
	fn is_available(&self) -> bool {
		!matches!(self.behavior, CaptchaBehavior::Unavailable)
	}

	async fn execute(&self, site_key: &str, action: &str) -> Result<String, CaptchaError> {
		self.calls
			.borrow_mut()
			.push((site_key.to_string(), action.to_string()));
		match &self.behavior {
			CaptchaBehavior::Token(token) => Ok(token.clone()),
			CaptchaBehavior::Fail(message) => Err(CaptchaError::new(message.as_str())),
			CaptchaBehavior::Unavailable => Err(CaptchaError::new("grecaptcha is not loaded")),
		}
	}
}

/// Navigator recording scheduled redirects instead of navigating.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
	redirects: RefCell<Vec<(String, Duration)>>,
}

impl RecordingNavigator {
	/// `(url, delay)` of every scheduled redirect.
	pub fn redirects(&self) -> Vec<(String, Duration)> {
		self.redirects.borrow().clone()
	}
}

impl Navigator for RecordingNavigator {
	fn schedule_redirect(&self, url: &str, delay: Duration) {
		self.redirects.borrow_mut().push((url.to_string(), delay));
	}
}

/// Signal bus recording emitted signals.
#[derive(Debug)]
pub struct RecordingSignalBus<E> {
	signals: RefCell<Vec<(String, SuccessSignal<E>)>>,
}

impl<E: Clone> RecordingSignalBus<E> {
	/// Creates an empty bus.
	pub fn new() -> Self {
		Self {
			signals: RefCell::new(Vec::new()),
		}
	}

	/// Every emitted `(name, signal)`.
	pub fn emitted(&self) -> Vec<(String, SuccessSignal<E>)> {
		self.signals.borrow().clone()
	}

	/// Names of emitted signals.
	pub fn names(&self) -> Vec<String> {
		self.signals
			.borrow()
			.iter()
			.map(|(name, _)| name.clone())
			.collect()
	}
}

impl<E: Clone> Default for RecordingSignalBus<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E> SignalBus<E> for RecordingSignalBus<E> {
	fn emit(&self, name: &str, signal: SuccessSignal<E>) {
		self.signals.borrow_mut().push((name.to_string(), signal));
	}
}

/// Spawner queueing tasks on a local pool driven by the test.
pub struct QueueSpawner {
	pool: RefCell<LocalPool>,
	spawner: LocalSpawner,
}

impl QueueSpawner {
	/// Creates an idle pool.
	pub fn new() -> Self {
		let pool = LocalPool::new();
		let spawner = pool.spawner();
		Self {
			pool: RefCell::new(pool),
			spawner,
		}
	}

	/// Runs queued tasks until none can make progress.
	pub fn run_until_stalled(&self) {
		self.pool.borrow_mut().run_until_stalled();
	}
}

impl Default for QueueSpawner {
	fn default() -> Self {
		Self::new()
	}
}

impl Spawner for QueueSpawner {
	fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
		if let Err(err) = self.spawner.spawn_local(task) {
			error_log!("failed to queue submission task: {}", err);
		}
	}
}

/// Recording collaborators wired for [`MemoryElement`] forms.
pub struct TestServices {
	/// Scripted transport
	pub transport: Rc<MockTransport>,
	/// CAPTCHA runtime, absent by default
	pub captcha: Option<Rc<MockCaptcha>>,
	/// Redirect recorder
	pub navigator: Rc<RecordingNavigator>,
	/// Signal recorder
	pub signals: Rc<RecordingSignalBus<MemoryElement>>,
	/// Task queue for event-driven submissions
	pub spawner: Rc<QueueSpawner>,
	/// Settings handed to controllers
	pub settings: SubmitFormSettings,
}

impl TestServices {
	/// Default settings, no CAPTCHA runtime and an empty reply queue.
	pub fn new() -> Self {
		Self {
			transport: Rc::new(MockTransport::new()),
			captcha: None,
			navigator: Rc::new(RecordingNavigator::default()),
			signals: Rc::new(RecordingSignalBus::new()),
			spawner: Rc::new(QueueSpawner::new()),
			settings: SubmitFormSettings::default(),
		}
	}

	/// Installs a CAPTCHA runtime.
	pub fn with_captcha(mut self, captcha: MockCaptcha) -> Self {
		self.captcha = Some(Rc::new(captcha));
		self
	}

	/// Replaces the settings.
	pub fn with_settings(mut self, settings: SubmitFormSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Bundles the collaborators for a controller.
	pub fn services(&self) -> Services<MemoryElement> {
		let captcha: Option<Rc<dyn CaptchaRuntime>> = match &self.captcha {
			Some(captcha) => Some(Rc::clone(captcha) as Rc<dyn CaptchaRuntime>),
			None => None,
		};
		Services {
			transport: Rc::clone(&self.transport) as Rc<dyn Transport>,
			captcha,
			navigator: Rc::clone(&self.navigator) as Rc<dyn Navigator>,
			signals: Rc::clone(&self.signals) as Rc<dyn SignalBus<MemoryElement>>,
			spawner: Rc::clone(&self.spawner) as Rc<dyn Spawner>,
			settings: Rc::new(self.settings.clone()),
		}
	}
}

impl Default for TestServices {
	fn default() -> Self {
		Self::new()
	}
}
