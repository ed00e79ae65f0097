//! Freshservice HTTP client
//!
//! Builds authenticated requests against the Freshservice v2 REST API and
//! applies the shared response policy: 404 is reported to the caller as
//! "absent" where that is meaningful, any other status >= 400 becomes an
//! error carrying the numeric status code.

use anyhow::{bail, Context, Result};
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Appended to bare account names that carry no dot of their own.
const VENDOR_DOMAIN_SUFFIX: &str = ".freshservice.com";

/// Freshservice authenticates with the API key in the Basic Auth username
/// slot; the password is ignored but must be non-empty.
const AUTH_PASSWORD: &str = "X";

/// Authenticated client for the Freshservice v2 API
///
/// Constructed once from the provider credentials and passed by reference
/// into every resource handler.
#[derive(Clone)]
pub struct FreshClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FreshClient {
    /// Create a client from an API key and an account domain.
    ///
    /// A bare account name such as `yourdomain` is expanded to
    /// `yourdomain.freshservice.com`; a domain that already contains a dot
    /// is used as-is.
    pub fn new(api_key: &str, domain: &str) -> Result<Self> {
        if domain.is_empty() {
            bail!("domain is required");
        }
        let base_url = format!("https://{}/api/v2", normalize_domain(domain));
        Self::with_base_url(api_key, base_url)
    }

    /// Create a client against an explicit base URL instead of deriving one
    /// from a domain. Used by tests and by setups that front the API with a
    /// local proxy.
    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Result<Self> {
        if api_key.is_empty() {
            bail!("api key is required");
        }
        let base_url = base_url.into();
        Url::parse(&base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

        let http = Client::builder()
            .user_agent(concat!("freshctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Base URL of the API, e.g. `https://yourdomain.freshservice.com/api/v2`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .basic_auth(&self.api_key, Some(AUTH_PASSWORD))
            .header(header::ACCEPT, "application/json")
    }

    /// GET a JSON resource.
    ///
    /// Returns `Ok(None)` when the API answers 404 so callers can treat a
    /// vanished resource as "absent" rather than as a failure.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        tracing::debug!("GET {}", path);

        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .with_context(|| format!("Request failed: GET {path}"))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("GET {} answered 404", path);
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} on GET {}", status, path);
            bail!("API request failed with status {}", status.as_u16());
        }

        let value = serde_json::from_str(&body)
            .with_context(|| format!("Failed to decode response from GET {path}"))?;
        Ok(Some(value))
    }

    /// POST a JSON body and decode the JSON response. Any non-2xx status is
    /// an error.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// PUT a JSON body and decode the JSON response. Any non-2xx status is
    /// an error.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// DELETE a resource.
    ///
    /// Returns `Ok(false)` when the API answers 404 - the resource was
    /// already gone, which deletion treats as success.
    pub async fn delete(&self, path: &str) -> Result<bool> {
        tracing::debug!("DELETE {}", path);

        let response = self
            .request(Method::DELETE, path)
            .send()
            .await
            .with_context(|| format!("Request failed: DELETE {path}"))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("DELETE {} answered 404, already gone", path);
            return Ok(false);
        }

        if !status.is_success() {
            tracing::error!("API error: {} on DELETE {}", status, path);
            bail!("API request failed with status {}", status.as_u16());
        }

        Ok(true)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("{} {}", method, path);

        let response = self
            .request(method.clone(), path)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request failed: {method} {path}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} on {} {}", status, method, path);
            bail!("API request failed with status {}", status.as_u16());
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to decode response from {method} {path}"))
    }
}

/// Expand a bare account name to a full Freshservice domain.
fn normalize_domain(domain: &str) -> String {
    if domain.contains('.') {
        domain.to_string()
    } else {
        format!("{domain}{VENDOR_DOMAIN_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_account_name_gets_vendor_suffix() {
        assert_eq!(normalize_domain("acme"), "acme.freshservice.com");
    }

    #[test]
    fn full_domain_is_kept_as_is() {
        assert_eq!(
            normalize_domain("acme.freshservice.com"),
            "acme.freshservice.com"
        );
        assert_eq!(normalize_domain("helpdesk.acme.io"), "helpdesk.acme.io");
    }

    #[test]
    fn new_derives_base_url_from_domain() {
        let client = FreshClient::new("key", "acme").unwrap();
        assert_eq!(client.base_url(), "https://acme.freshservice.com/api/v2");
    }

    #[test]
    fn empty_credentials_are_rejected() {
        assert!(FreshClient::new("", "acme").is_err());
        assert!(FreshClient::new("key", "").is_err());
    }
}
