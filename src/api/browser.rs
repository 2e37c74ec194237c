//! Browser transport
//!
//! JSON and binary requests go through `gloo-net`. Multipart uploads use a
//! raw `XMLHttpRequest` because fetch exposes no upload progress.

use async_trait::async_trait;
use gloo_net::http::Request;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, ProgressEvent, XmlHttpRequest};

use super::{progress_percent, ApiRequest, Body, Method, RawResponse, Transport};
use crate::error::{Error, Result};
use crate::upload::SelectedFile;

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTransport;

fn js_err(e: JsValue) -> Error {
    Error::Network(format!("{:?}", e))
}

fn net_err(e: gloo_net::Error) -> Error {
    Error::Network(e.to_string())
}

fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, url: &str, mut request: ApiRequest) -> Result<RawResponse> {
        let body = std::mem::replace(&mut request.body, Body::Empty);
        match body {
            Body::Files(files) => send_multipart(url, &request, &files).await,
            Body::Json(value) => send_fetch(url, &request, Some(value)).await,
            Body::Empty => send_fetch(url, &request, None).await,
        }
    }
}

async fn send_fetch(url: &str, request: &ApiRequest, json: Option<serde_json::Value>) -> Result<RawResponse> {
    let builder = match request.method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    };
    let builder = match &request.bearer {
        Some(token) => builder.header("Authorization", &bearer_header(token)),
        None => builder,
    };

    let response = match json {
        Some(value) => builder.json(&value).map_err(net_err)?.send().await,
        None => builder.send().await,
    }
    .map_err(net_err)?;

    let status = response.status();
    let body = response.binary().await.map_err(net_err)?;
    log::debug!("[Http] {} {} -> {}", request.method.as_str(), url, status);
    Ok(RawResponse { status, body })
}

async fn send_multipart(url: &str, request: &ApiRequest, files: &[SelectedFile]) -> Result<RawResponse> {
    let form = FormData::new().map_err(js_err)?;
    for file in files {
        match file.handle() {
            Some(handle) => form
                .append_with_blob_and_filename("files", handle, &file.name)
                .map_err(js_err)?,
            None => log::warn!("[Http] Skipping {} with no browser file handle", file.name),
        }
    }

    let xhr = XmlHttpRequest::new().map_err(js_err)?;
    xhr.open(request.method.as_str(), url).map_err(js_err)?;
    if let Some(token) = &request.bearer {
        xhr.set_request_header("Authorization", &bearer_header(token))
            .map_err(js_err)?;
    }

    // Dropped only after the request settles
    let on_progress = request.on_progress.clone().map(|report| {
        Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
            if ev.length_computable() {
                report(progress_percent(ev.loaded(), ev.total()));
            }
        })
    });
    if let Some(cb) = &on_progress {
        xhr.upload()
            .map_err(js_err)?
            .set_onprogress(Some(cb.as_ref().unchecked_ref()));
    }

    let settled = js_sys::Promise::new(&mut |resolve, reject| {
        xhr.set_onload(Some(&resolve));
        xhr.set_onerror(Some(&reject));
        xhr.set_onabort(Some(&reject));
    });

    xhr.send_with_opt_form_data(Some(&form)).map_err(js_err)?;
    JsFuture::from(settled)
        .await
        .map_err(|_| Error::Network("upload connection failed".to_string()))?;
    drop(on_progress);

    let status = xhr.status().map_err(js_err)?;
    let body = xhr
        .response_text()
        .map_err(js_err)?
        .unwrap_or_default()
        .into_bytes();
    log::debug!("[Http] multipart {} ({} files) -> {}", url, files.len(), status);
    Ok(RawResponse { status, body })
}
