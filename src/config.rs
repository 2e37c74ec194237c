//! API configuration
//!
//! Base URL lookup order: `<meta name="api-base-url">` in the page, then the
//! `VAULT_API_URL` build-time variable, then the current host on port 5000.

/// Build-time override, baked in by `VAULT_API_URL=... trunk build`
const BUILD_API_URL: Option<&str> = option_env!("VAULT_API_URL");

/// Port the API listens on when derived from the page's host
pub const DEFAULT_API_PORT: u16 = 5000;

const META_SELECTOR: &str = "meta[name=\"api-base-url\"]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: trim_base(&base_url.into()) }
    }

    /// Resolve from the running page
    pub fn from_browser() -> Self {
        let window = web_sys::window();
        let meta = window
            .as_ref()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(META_SELECTOR).ok().flatten())
            .and_then(|el| el.get_attribute("content"));
        let (protocol, hostname) = window
            .map(|w| w.location())
            .map(|loc| {
                (
                    loc.protocol().unwrap_or_else(|_| "http:".to_string()),
                    loc.hostname().unwrap_or_else(|_| "localhost".to_string()),
                )
            })
            .unwrap_or_else(|| ("http:".to_string(), "localhost".to_string()));

        let base_url = resolve_base_url(meta.as_deref(), BUILD_API_URL, &protocol, &hostname);
        log::info!("[Config] API base URL: {}", base_url);
        Self { base_url }
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Pick the first non-blank candidate, falling back to the page host
pub fn resolve_base_url(
    meta: Option<&str>,
    build_env: Option<&str>,
    protocol: &str,
    hostname: &str,
) -> String {
    [meta, build_env]
        .into_iter()
        .flatten()
        .map(trim_base)
        .find(|url| !url.is_empty())
        .unwrap_or_else(|| format!("{}//{}:{}/api", protocol, hostname, DEFAULT_API_PORT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_tag_takes_precedence() {
        let url = resolve_base_url(
            Some("https://vault.example.com/api/"),
            Some("http://build:9000/api"),
            "http:",
            "localhost",
        );
        assert_eq!(url, "https://vault.example.com/api");
    }

    #[test]
    fn test_build_env_used_when_meta_blank() {
        let url = resolve_base_url(Some("  "), Some("http://build:9000/api"), "http:", "localhost");
        assert_eq!(url, "http://build:9000/api");
    }

    #[test]
    fn test_falls_back_to_page_host() {
        let url = resolve_base_url(None, None, "https:", "192.168.1.20");
        assert_eq!(url, "https://192.168.1.20:5000/api");
    }

    #[test]
    fn test_explicit_base_is_trimmed() {
        let config = ApiConfig::new(" http://localhost:5000/api/ ");
        assert_eq!(config.base_url, "http://localhost:5000/api");
    }
}
