//! REST API Access
//!
//! `ApiClient` turns vault operations into requests and interprets the
//! answers. The wire work sits behind [`Transport`], so the browser
//! implementation can be swapped for a recording fake in tests.

mod browser;
mod client;
#[cfg(test)]
pub mod fake;

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::upload::SelectedFile;

pub use browser::BrowserTransport;
pub use client::ApiClient;

/// Upload progress callback, called with 0..=100
pub type ProgressFn = Rc<dyn Fn(u8)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

pub enum Body {
    Empty,
    Json(serde_json::Value),
    /// One multipart form, every file under the `files` field
    Files(Vec<SelectedFile>),
}

pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Body,
    pub bearer: Option<String>,
    pub on_progress: Option<ProgressFn>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            bearer: None,
            on_progress: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add a query parameter; `None` leaves it out entirely
    pub fn query(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(v) = value {
            self.query.push((key, v.to_string()));
        }
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn files(mut self, files: Vec<SelectedFile>) -> Self {
        self.body = Body::Files(files);
        self
    }

    pub fn on_progress(mut self, report: ProgressFn) -> Self {
        self.on_progress = Some(report);
        self
    }
}

/// Status and raw body of any HTTP answer, success or not
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    /// Perform one request against an absolute URL. Only failures to get any
    /// answer are errors; HTTP error statuses come back as responses.
    async fn send(&self, url: &str, request: ApiRequest) -> Result<RawResponse>;
}

/// Percent-encode one path segment or query value (unreserved chars kept)
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// `base + path + ?k=v&...`
pub fn build_url(base: &str, path: &str, query: &[(&'static str, String)]) -> String {
    let mut url = format!("{}{}", base, path);
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&encode(value));
    }
    url
}

/// Whole-request progress as a rounded percentage
pub fn progress_percent(loaded: f64, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    ((loaded * 100.0) / total).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_query_values_are_omitted() {
        let request = ApiRequest::get("/files")
            .query("folderId", None::<String>)
            .query("sortBy", Some("upload_date"))
            .query("sortOrder", Some("desc"));
        let url = build_url("http://api.test", &request.path, &request.query);
        assert_eq!(url, "http://api.test/files?sortBy=upload_date&sortOrder=desc");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let url = build_url("http://api.test", "/files/search", &[("q", "q3 report&draft".to_string())]);
        assert_eq!(url, "http://api.test/files/search?q=q3%20report%26draft");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0.0, 0.0), 0);
        assert_eq!(progress_percent(512.0, 1024.0), 50);
        assert_eq!(progress_percent(1.0, 3.0), 33);
        assert_eq!(progress_percent(2.0, 3.0), 67);
        assert_eq!(progress_percent(4096.0, 4096.0), 100);
    }
}
