//! Navigation and task spawning

use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;
use submit_form_core::error_log;
use submit_form_core::services::{Navigator, Spawner};

/// Navigates the current window.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
	fn schedule_redirect(&self, url: &str, delay: Duration) {
		let url = url.to_string();
		let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
		wasm_bindgen_futures::spawn_local(async move {
			TimeoutFuture::new(millis).await;
			let Some(window) = web_sys::window() else {
				error_log!("no window to redirect to {}", url);
				return;
			};
			if let Err(err) = window.location().set_href(&url) {
				error_log!("redirect to {} failed: {:?}", url, err);
			}
		});
	}
}

/// Runs tasks on the browser's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

impl Spawner for WasmSpawner {
	fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
		wasm_bindgen_futures::spawn_local(task);
	}
}
