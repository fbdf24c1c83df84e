//! `gloo_net` transport

use async_trait::async_trait;
use gloo_net::http::Request;
use submit_form_core::error::TransportError;
use submit_form_core::payload::{FieldValue, FormPayload};
use submit_form_core::services::{SubmitRequest, Transport, TransportResponse};
use submit_form_core::warn_log;
use web_sys::FormData;

/// Posts payloads as multipart form data with `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
	/// Creates the transport.
	pub fn new() -> Self {
		Self
	}
}

fn to_form_data(payload: &FormPayload) -> Result<FormData, TransportError> {
	let data = FormData::new().map_err(|e| TransportError::request(format!("{:?}", e)))?;
	for (name, value) in payload.iter() {
		let appended = match value {
			FieldValue::Text(text) => data.append_with_str(name, text),
			FieldValue::File(file) => match file.downcast_ref::<web_sys::File>() {
				Some(native) => data.append_with_blob_and_filename(name, native, file.file_name()),
				None => {
					warn_log!("dropping field {}: not a browser file", name);
					continue;
				}
			},
		};
		appended.map_err(|e| TransportError::request(format!("{:?}", e)))?;
	}
	Ok(data)
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
	async fn post(&self, request: SubmitRequest) -> Result<TransportResponse, TransportError> {
		let body = to_form_data(&request.payload)?;

		let mut builder = Request::post(&request.url);
		for (name, value) in &request.headers {
			builder = builder.header(name, value);
		}
		let response = builder
			.body(body)
			.map_err(|e| TransportError::request(e.to_string()))?
			.send()
			.await
			.map_err(|e| TransportError::network(e.to_string()))?;

		let body = match response.text().await {
			Ok(body) => body,
			Err(err) => {
				warn_log!("failed to read response body: {}", err);
				String::new()
			}
		};

		Ok(TransportResponse::new(response.status(), body)
			.with_status_text(response.status_text())
			.with_url(response.url()))
	}
}
