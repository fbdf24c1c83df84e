//! # submit-form-dom
//!
//! Browser implementations of the `submit-form-core` collaborators.
//!
//! | Concern | Type | Backed by |
//! |---------|------|-----------|
//! | Elements | [`WebElement`] | `web_sys::Element` |
//! | Network | [`FetchTransport`] | `gloo_net` multipart `POST` |
//! | CAPTCHA | [`Grecaptcha`] | global `grecaptcha.ready` / `execute` |
//! | Redirects | [`WindowNavigator`] | `gloo_timers` + `window.location` |
//! | Signals | [`DocumentSignalBus`] | `CustomEvent` on `document` |
//! | Tasks | [`WasmSpawner`] | `wasm_bindgen_futures::spawn_local` |
//!
//! [`page`] wires them together and keeps the page's controller registry.
//!
//! ## Example
//!
//! ```ignore
//! use submit_form_dom::page;
//!
//! #[wasm_bindgen(start)]
//! pub fn start() {
//!     page::observe_all();
//!     if let Some(contact) = page::controller("contact") {
//!         contact.on_success(|answer| info_log!("sent: {}", answer));
//!     }
//! }
//! ```
//!
//! Everything here is compiled for `wasm32` only.

#[cfg(target_arch = "wasm32")]
mod captcha;
#[cfg(target_arch = "wasm32")]
mod element;
#[cfg(target_arch = "wasm32")]
pub mod page;
#[cfg(target_arch = "wasm32")]
mod runtime;
#[cfg(target_arch = "wasm32")]
mod signals;
#[cfg(target_arch = "wasm32")]
mod transport;

#[cfg(target_arch = "wasm32")]
pub use captcha::Grecaptcha;
#[cfg(target_arch = "wasm32")]
pub use element::WebElement;
#[cfg(target_arch = "wasm32")]
pub use runtime::{WasmSpawner, WindowNavigator};
#[cfg(target_arch = "wasm32")]
pub use signals::DocumentSignalBus;
#[cfg(target_arch = "wasm32")]
pub use transport::FetchTransport;
