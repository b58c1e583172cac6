//! Valuation endpoint URL template.

use crate::error::{ClientError, ClientResult};
use fundgz_core::FundCode;
use reqwest::Url;

/// Placeholder substituted with the fund code.
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Public estimated-valuation endpoint.
pub const DEFAULT_URL_TEMPLATE: &str = "http://fundgz.1234567.com.cn/js/{code}.js";

/// Templated endpoint, e.g. `http://host/js/{code}.js`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    template: String,
    host: Option<String>,
}

impl Endpoint {
    /// Validate a URL template.
    ///
    /// The template must contain `{code}` and be an absolute http(s) URL
    /// once a code is substituted.
    pub fn new(template: impl Into<String>) -> ClientResult<Self> {
        let template = template.into();
        if !template.contains(CODE_PLACEHOLDER) {
            return Err(ClientError::InvalidEndpoint(format!(
                "template '{template}' has no {CODE_PLACEHOLDER} placeholder"
            )));
        }

        let probe = template.replace(CODE_PLACEHOLDER, "000000");
        let url = Url::parse(&probe)
            .map_err(|e| ClientError::InvalidEndpoint(format!("'{template}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint(format!(
                "'{template}': unsupported scheme '{}'",
                url.scheme()
            )));
        }

        Ok(Self {
            host: url.host_str().map(str::to_string),
            template,
        })
    }

    /// Build the request URL for one fund.
    pub fn url_for(&self, code: &FundCode) -> String {
        self.template.replace(CODE_PLACEHOLDER, code.as_str())
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Host of the endpoint, used as a charset hint.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            template: DEFAULT_URL_TEMPLATE.to_string(),
            host: Some("fundgz.1234567.com.cn".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_substitutes_code() {
        let endpoint = Endpoint::default();
        let code = FundCode::new("001186").unwrap();
        assert_eq!(
            endpoint.url_for(&code),
            "http://fundgz.1234567.com.cn/js/001186.js"
        );
    }

    #[test]
    fn test_default_matches_parsed_template() {
        assert_eq!(Endpoint::new(DEFAULT_URL_TEMPLATE).unwrap(), Endpoint::default());
    }

    #[test]
    fn test_host_extracted() {
        let endpoint = Endpoint::new("http://127.0.0.1:8080/js/{code}.js").unwrap();
        assert_eq!(endpoint.host(), Some("127.0.0.1"));
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let err = Endpoint::new("http://fundgz.1234567.com.cn/js/001186.js").unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_rejects_non_http_template() {
        assert!(Endpoint::new("ftp://fund.test/{code}").is_err());
        assert!(Endpoint::new("not a url {code}").is_err());
    }
}
