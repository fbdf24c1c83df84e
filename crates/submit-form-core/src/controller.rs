//! Per-form submission controller
//!
//! ## State machine
//!
//! ```text
//!            submit                 Accepted
//!   Idle ───────────▶ Loading ───────────────▶ Success
//!    │                  │    Rejected/Malformed   │
//!    │ no action        └───────────────────────▶ Error
//!    └──────────────────────────────────────────▶ Error
//!
//!   Success / Error ──submit──▶ Loading
//! ```
//!
//! Entering a state hides the regions of the other two, and the submit
//! button is locked only while `Loading`. Every terminal path unlocks it.
//!
//! Overlapping submissions of the same form are not arbitrated: each runs
//! its own exchange and the UI reflects whichever continuation finishes last.
//!
//! ## Example
//!
//! ```ignore
//! let controller = FormController::observe(form, services, &registry);
//! controller.on_success(|answer| info_log!("saved: {}", answer));
//! controller.on_error(|error| warn_log!("failed: {}", error));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use crate::annotator::FieldErrorAnnotator;
use crate::callback::CallbackRegistry;
use crate::config::FormConfig;
use crate::dom::{EventType, FormElement, ListenOptions, Selector};
use crate::error::SubmitError;
use crate::interpreter::{Classification, ResponseInterpreter};
use crate::payload::FormPayload;
use crate::region::{SubmitButtonGuard, VisibilityRegion};
use crate::registry::FormRegistry;
use crate::services::{Services, SubmitRequest, SuccessSignal};
use crate::{debug_log, error_log, info_log, warn_log};

/// UI state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControllerState {
	/// No submission has started yet
	#[default]
	Idle,
	/// A submission is in flight
	Loading,
	/// The last submission was accepted
	Success,
	/// The last submission failed
	Error,
}

/// Orchestrates submissions of one form.
pub struct FormController<E: FormElement> {
	form: E,
	name: Option<String>,
	loading: VisibilityRegion<E>,
	success: VisibilityRegion<E>,
	error: VisibilityRegion<E>,
	submit_button: SubmitButtonGuard<E>,
	annotator: FieldErrorAnnotator<E>,
	on_success: CallbackRegistry<Value>,
	on_error: CallbackRegistry<SubmitError>,
	state: Cell<ControllerState>,
	last_payload: RefCell<Option<FormPayload>>,
	services: Services<E>,
}

impl<E: FormElement> FormController<E> {
	/// Creates a controller for `form`, resolving its regions and submit
	/// button once.
	///
	/// The controller does not listen to the form; use [`observe`](Self::observe)
	/// to intercept native submissions.
	pub fn new(form: E, services: Services<E>) -> Rc<Self> {
		let settings = Rc::clone(&services.settings);
		let region = |class: &str| {
			VisibilityRegion::resolve(&form, &Selector::class(class), settings.hidden_class.as_str())
		};

		Rc::new(Self {
			name: FormConfig::from_element(&form).name,
			loading: region(&settings.loading_class),
			success: region(&settings.success_class),
			error: region(&settings.error_class),
			submit_button: SubmitButtonGuard::resolve(
				&form,
				&Selector::class(settings.submit_button_class.as_str()),
			),
			annotator: FieldErrorAnnotator::new(
				form.clone(),
				settings.invalid_class.as_str(),
				settings.feedback_class.as_str(),
			),
			on_success: CallbackRegistry::new(),
			on_error: CallbackRegistry::new(),
			state: Cell::new(ControllerState::Idle),
			last_payload: RefCell::new(None),
			services,
			form,
		})
	}

	/// Creates a controller, intercepts the form's native submission and
	/// registers the controller under the form's name.
	///
	/// Call once per form; observing the same form twice attaches a second
	/// submission listener.
	pub fn observe(form: E, services: Services<E>, registry: &FormRegistry<E>) -> Rc<Self> {
		let controller = Self::new(form, services);
		let this = Rc::clone(&controller);
		controller.form.listen(
			EventType::Submit,
			ListenOptions::intercept(),
			Box::new(move || this.dispatch_submit()),
		);
		registry.register(&controller);
		debug_log!(
			"observing form {}",
			controller.name.as_deref().unwrap_or("<unnamed>")
		);
		controller
	}

	/// The controlled form.
	pub fn form(&self) -> &E {
		&self.form
	}

	/// The form's `name` attribute as read when the controller was created.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Current UI state.
	pub fn state(&self) -> ControllerState {
		self.state.get()
	}

	/// The form's declarative options as they are now.
	pub fn config(&self) -> FormConfig {
		FormConfig::from_element(&self.form)
	}

	/// Snapshot of the form's current control values.
	pub fn data(&self) -> FormPayload {
		self.form.collect_payload()
	}

	/// Payload sent by the most recent submission that reached the network.
	pub fn last_payload(&self) -> Option<FormPayload> {
		self.last_payload.borrow().clone()
	}

	/// Field error annotator of this form.
	pub fn annotator(&self) -> &FieldErrorAnnotator<E> {
		&self.annotator
	}

	/// Registers a callback invoked with the server answer after each
	/// accepted submission.
	pub fn on_success<F>(&self, f: F)
	where
		F: Fn(&Value) + 'static,
	{
		self.on_success.register(f);
	}

	/// Registers a callback invoked with the error of each failed submission.
	pub fn on_error<F>(&self, f: F)
	where
		F: Fn(&SubmitError) + 'static,
	{
		self.on_error.register(f);
	}

	/// Enters `Loading`: locks the submit button, shows the loading region
	/// and hides both banners.
	pub fn display_loading(&self) {
		self.submit_button.lock();
		self.loading.show(None);
		self.error.hide();
		self.success.hide();
		self.state.set(ControllerState::Loading);
	}

	/// Enters `Success` with `message`, resetting the form unless it opts out.
	pub fn display_success(&self, message: &str) {
		let reset = self.config().reset_after_success;
		self.show_success(message, reset);
	}

	/// Enters `Error` with `message`.
	pub fn display_error(&self, message: &str) {
		self.submit_button.unlock();
		self.loading.hide();
		self.success.hide();
		self.error.show(Some(message));
		self.state.set(ControllerState::Error);
	}

	/// Hides every element in the form marked as an optional field.
	pub fn hide_optional_fields(&self) {
		let settings = &self.services.settings;
		for element in self
			.form
			.query_all(&Selector::class(settings.optional_field_class.as_str()))
		{
			element.add_class(&settings.hidden_class);
		}
	}

	/// Makes clicks on `trigger` submit the form.
	pub fn bind_submit_trigger(self: &Rc<Self>, trigger: &E) {
		let this = Rc::clone(self);
		trigger.listen(
			EventType::Click,
			ListenOptions::intercept(),
			Box::new(move || this.dispatch_submit()),
		);
	}

	/// Starts a submission on the page's event loop without waiting for it.
	pub fn dispatch_submit(self: &Rc<Self>) {
		let this = Rc::clone(self);
		self.services.spawner.spawn(Box::pin(async move {
			// Outcome is already reflected in the UI and callbacks.
			let _ = this.submit().await;
		}));
	}

	/// Runs one submission to completion.
	///
	/// Returns the server answer on acceptance. Failures have already been
	/// logged, displayed and passed to the error callbacks when this returns.
	pub async fn submit(&self) -> Result<Value, SubmitError> {
		let config = self.config();
		let result = self.run(&config).await;
		if let Err(error) = &result {
			self.fail(error);
		}
		result
	}

	async fn run(&self, config: &FormConfig) -> Result<Value, SubmitError> {
		let action = config.action.clone().ok_or(SubmitError::MissingAction)?;
		self.display_loading();

		let mut payload = self.form.collect_payload();
		if let Some(site_key) = &config.captcha_site_key {
			let token = self.captcha_token(site_key).await?;
			payload.set(self.services.settings.captcha_token_field.as_str(), token);
		}
		*self.last_payload.borrow_mut() = Some(payload.clone());

		let response = self
			.services
			.transport
			.post(SubmitRequest::post(action.as_str(), payload.clone()))
			.await?;

		let classification =
			ResponseInterpreter::new(&action, &self.services.settings.success_fallback_message)
				.classify(&response);
		self.apply(classification, config, payload)
	}

	async fn captcha_token(&self, site_key: &str) -> Result<String, SubmitError> {
		let runtime = match &self.services.captcha {
			Some(runtime) if runtime.is_available() => Rc::clone(runtime),
			_ => return Err(SubmitError::CaptchaUnavailable),
		};
		let token = runtime
			.execute(site_key, &self.services.settings.captcha_action)
			.await?;
		Ok(token)
	}

	fn apply(
		&self,
		classification: Classification,
		config: &FormConfig,
		payload: FormPayload,
	) -> Result<Value, SubmitError> {
		if let Some(errors) = classification.field_errors() {
			warn_log!(
				"{}: server reported errors for {} field(s)",
				self.label(),
				errors.len()
			);
		}

		match classification {
			Classification::Accepted { message, envelope } => {
				self.annotator.clear_all();
				if let Some(errors) = envelope.errors() {
					self.annotator.annotate(errors);
				}
				self.show_success(&message, config.reset_after_success);
				info_log!("{}: submission accepted: {}", self.label(), message);

				if let Some(url) = envelope.redirect_to() {
					self.services
						.navigator
						.schedule_redirect(url, self.services.settings.redirect_delay());
				}

				let answer = envelope.into_raw();
				self.on_success.invoke(&answer);

				if let Some(name) = config.signal_name() {
					self.services.signals.emit(
						&name,
						SuccessSignal {
							form: self.form.clone(),
							data: payload,
							answer: answer.clone(),
						},
					);
				}
				Ok(answer)
			}
			Classification::Rejected {
				status,
				message,
				field_errors,
			} => {
				if let Some(errors) = &field_errors {
					self.annotator.annotate(errors);
				}
				Err(SubmitError::Rejected { status, message })
			}
			Classification::Malformed { message, reason } => {
				Err(SubmitError::Malformed { message, reason })
			}
		}
	}

	fn show_success(&self, message: &str, reset: bool) {
		self.submit_button.unlock();
		self.loading.hide();
		self.error.hide();
		self.success.show(Some(message));
		if reset {
			self.form.reset();
		}
		self.state.set(ControllerState::Success);
	}

	fn fail(&self, error: &SubmitError) {
		error_log!(
			"{}: submission failed ({:?}): {:?}",
			self.label(),
			error.kind(),
			error
		);
		self.display_error(&error.to_string());
		self.on_error.invoke(error);
	}

	fn label(&self) -> &str {
		self.name.as_deref().unwrap_or("<unnamed form>")
	}
}

impl<E: FormElement + std::fmt::Debug> std::fmt::Debug for FormController<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormController")
			.field("form", &self.form)
			.field("name", &self.name)
			.field("state", &self.state.get())
			.field("on_success", &self.on_success)
			.field("on_error", &self.on_error)
			.finish()
	}
}
