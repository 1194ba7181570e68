//! HTTP transport for the FootPrints SOAP endpoint.
//!
//! Loads the service description at connect time (through the optional
//! [`DescriptionCache`]), then posts one envelope per operation using HTTP
//! basic authentication.
//!
//! # Security
//!
//! The client secret is never logged. Response bodies quoted in errors are
//! sanitized and truncated.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use super::cache::DescriptionCache;
use super::description::ServiceDescription;
use super::envelope::{build_request, decode_response};
use super::SoapTransport;
use crate::config::Config;
use crate::error::{FootprintsError, Phase, TransportError};
use crate::Params;

/// Maximum length for HTTP error response bodies kept in errors.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Content type for SOAP 1.1 requests.
const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// SOAP over HTTP with basic authentication.
#[derive(Clone)]
pub struct HttpSoapTransport {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    client_id: String,

    /// SECURITY: Never log this value!
    client_secret: String,

    /// Where envelopes are posted.
    endpoint: String,

    description: ServiceDescription,

    strict: bool,
}

impl HttpSoapTransport {
    /// Builds the HTTP client and loads the service description.
    ///
    /// # Errors
    ///
    /// - `FootprintsError::HttpClient` if the HTTP client fails to initialize
    /// - `FootprintsError::Config` for an invalid extra header
    /// - `FootprintsError::Service` if the description cannot be loaded
    ///   (`Unauthorized` for a 401, `BadRequest` for other statuses,
    ///   `ResourceDoesNotExist` when the server is unreachable)
    pub async fn connect(config: &Config) -> Result<Self, FootprintsError> {
        let settings = config.settings.clone().unwrap_or_default();

        let mut headers = HeaderMap::new();
        for (name, value) in &settings.extra_http_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                FootprintsError::invalid_config(format!("invalid header name: {}", name))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                FootprintsError::invalid_config(format!("invalid value for header {}", name))
            })?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.operation_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FootprintsError::HttpClient)?;

        let cache = config
            .storage_path
            .as_ref()
            .map(|path| DescriptionCache::new(path, config.cache_timeout));

        let wsdl = Self::load_description(&http, config, cache.as_ref())
            .await
            .map_err(|e| FootprintsError::Service(e.classify(Phase::Connect)))?;
        let description = ServiceDescription::parse(&wsdl)
            .map_err(|e| FootprintsError::Service(e.classify(Phase::Connect)))?;
        let endpoint = Self::resolve_endpoint(
            &config.base_url,
            description.endpoint.as_deref(),
            settings.force_https,
        )?;

        tracing::debug!(
            endpoint = %endpoint,
            operations = description.operations.len(),
            "Service description loaded"
        );

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret().to_string(),
            endpoint,
            description,
            strict: settings.strict,
        })
    }

    /// The resolved endpoint address.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn load_description(
        http: &Client,
        config: &Config,
        cache: Option<&DescriptionCache>,
    ) -> Result<String, TransportError> {
        let url = config.base_url.as_str();
        if let Some(cache) = cache {
            if let Some(cached) = cache.get(url).await {
                return Ok(cached);
            }
        }

        tracing::debug!(url = %url, "Fetching service description");
        let response = http
            .get(url)
            .basic_auth(&config.client_id, Some(config.client_secret()))
            .send()
            .await
            .map_err(TransportError::Connection)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::Connection)?;
        if !status.is_success() {
            return Err(status_error(status, &body, config.client_secret()));
        }

        if let Some(cache) = cache {
            cache.put(url, &body).await;
        }
        Ok(body)
    }

    /// Picks the endpoint: the description's address, else the base URL
    /// without its query string.
    fn resolve_endpoint(
        base_url: &str,
        declared: Option<&str>,
        force_https: bool,
    ) -> Result<String, FootprintsError> {
        let raw = declared.unwrap_or(base_url);
        let mut url = Url::parse(raw).map_err(|e| {
            FootprintsError::invalid_config(format!("invalid endpoint address: {}", e))
        })?;
        if declared.is_none() {
            url.set_query(None);
        }
        if force_https && url.scheme() == "http" && url.set_scheme("https").is_err() {
            return Err(FootprintsError::invalid_config("cannot force https on endpoint"));
        }
        Ok(url.to_string())
    }
}

/// Builds a status error with a sanitized, truncated body.
fn status_error(status: StatusCode, body: &str, secret: &str) -> TransportError {
    let body = FootprintsError::sanitize_message(body, secret);
    let body = match body.char_indices().nth(MAX_ERROR_BODY_LEN) {
        Some((cut, _)) => format!("{}...[truncated]", &body[..cut]),
        None => body,
    };
    TransportError::Status { status, body }
}

#[async_trait]
impl SoapTransport for HttpSoapTransport {
    async fn call(&self, operation: &str, params: &Params) -> Result<Value, TransportError> {
        if !self.description.declares(operation) {
            return Err(TransportError::Shape(format!(
                "service does not declare operation {}",
                operation
            )));
        }

        let envelope = build_request(&self.description.target_namespace, operation, params)?;
        let soap_action = format!("\"{}\"", self.description.soap_action(operation));

        let response = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", soap_action)
            .body(envelope)
            .send()
            .await
            .map_err(TransportError::Connection)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::Connection)?;

        tracing::trace!(operation = %operation, status = %status, "SOAP response received");

        if status == StatusCode::UNAUTHORIZED {
            return Err(status_error(status, &body, &self.client_secret));
        }

        // Faults come back with a 500, so look for one before judging the status.
        match decode_response(&body) {
            Err(fault @ TransportError::Fault { .. }) => Err(fault),
            _ if !status.is_success() => Err(status_error(status, &body, &self.client_secret)),
            Ok(value) => Ok(value),
            Err(e) if self.strict => Err(e),
            Err(e) => {
                tracing::debug!(
                    operation = %operation,
                    error = %e,
                    "Returning undecoded response body"
                );
                Ok(Value::String(body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_transport(secret: &str) -> HttpSoapTransport {
        HttpSoapTransport {
            http: Client::new(),
            client_id: "jdoe".to_string(),
            client_secret: secret.to_string(),
            endpoint: "https://example.com/ep".to_string(),
            description: ServiceDescription {
                target_namespace: "ns".to_string(),
                endpoint: None,
                operations: vec!["getItemId".to_string()],
                soap_actions: Default::default(),
            },
            strict: false,
        }
    }

    #[test]
    fn test_resolve_endpoint_prefers_declared() {
        let endpoint = HttpSoapTransport::resolve_endpoint(
            "https://fp.example.com/ep?wsdl",
            Some("http://internal:8080/ep"),
            false,
        )
        .unwrap();
        assert_eq!(endpoint, "http://internal:8080/ep");
    }

    #[test]
    fn test_resolve_endpoint_strips_wsdl_query() {
        let endpoint =
            HttpSoapTransport::resolve_endpoint("https://fp.example.com/ep?wsdl", None, false)
                .unwrap();
        assert_eq!(endpoint, "https://fp.example.com/ep");
    }

    #[test]
    fn test_resolve_endpoint_force_https() {
        let endpoint =
            HttpSoapTransport::resolve_endpoint("http://fp.example.com/ep", None, true).unwrap();
        assert_eq!(endpoint, "https://fp.example.com/ep");
    }

    #[test]
    fn test_status_error_sanitizes_and_truncates() {
        let body = format!("bad password topsecret {}", "x".repeat(1000));
        match status_error(StatusCode::BAD_GATEWAY, &body, "topsecret") {
            TransportError::Status { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(!body.contains("topsecret"));
                assert!(body.ends_with("...[truncated]"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undeclared_operation_is_rejected_locally() {
        let transport = test_transport("s");
        let err = transport.call("runSearch", &Params::new()).await.unwrap_err();
        assert!(matches!(err, TransportError::Shape(_)));
    }
}
