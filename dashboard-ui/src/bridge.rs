//! Typed wrappers over the dashboard-server HTTP API.

use analysis_core::display::AnalysisView;
use incident_registry::IncidentRecord;
use js_sys::Reflect;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

pub const GENERIC_ERROR: &str = "Analysis failed. Please try again.";

fn build_request(url: &str, method: &str, body: Option<&JsValue>) -> Result<Request, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = body {
        opts.set_body(body);
    }
    Request::new_with_str_and_init(url, &opts).map_err(|e| format!("invalid request: {e:?}"))
}

async fn send<R: DeserializeOwned>(request: Request) -> Result<R, String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch failed: {e:?}"))?;
    let resp: Response = value
        .dyn_into()
        .map_err(|_| "fetch did not return a Response".to_string())?;

    let body = match resp.json() {
        Ok(promise) => JsFuture::from(promise).await.ok(),
        Err(_) => None,
    };

    if !resp.ok() {
        let message = body
            .as_ref()
            .and_then(|b| Reflect::get(b, &JsValue::from_str("error")).ok())
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| format!("request failed with status {}", resp.status()));
        return Err(message);
    }

    let body = body.ok_or_else(|| "response body is not json".to_string())?;
    serde_wasm_bindgen::from_value(body).map_err(|e| e.to_string())
}

pub async fn analyze_image(file: &File) -> Result<AnalysisView, String> {
    let form = FormData::new().map_err(|e| format!("{e:?}"))?;
    form.append_with_blob_and_filename("image", file, &file.name())
        .map_err(|e| format!("{e:?}"))?;
    let request = build_request("/api/analyze", "POST", Some(&form.into()))?;
    send(request).await
}

/// The whole incident history; the admin view filters and pages it locally.
pub async fn fetch_history() -> Result<Vec<IncidentRecord>, String> {
    let request = build_request("/api/history", "GET", None)?;
    send(request).await
}
