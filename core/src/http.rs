//! Generic blocking HTTP client bound to a base URL.
//!
//! # Design
//! `ApiClient` knows nothing about posts. Each verb appends the endpoint to
//! the configured base URL, performs one blocking round-trip with ureq and
//! hands back an `HttpResponse` as plain data. Status codes are never turned
//! into errors here (`http_status_as_error(false)`): a 404 is a response like
//! any other. Only transport failures surface as `ApiError::Transport`.
//!
//! Every request is logged at info level. GET logs its response body at debug
//! level, POST and PUT at info level, DELETE logs the request only.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// The body is kept as text; it is only parsed when the caller asks for
/// JSON through `json` or `json_value`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::Deserialization)
    }

    pub fn json_value(&self) -> Result<serde_json::Value, ApiError> {
        self.json()
    }
}

/// Blocking client for a single base URL.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").field("config", &self.config).finish()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout())
            .build()
            .new_agent();
        Self { config, agent }
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url())
    }

    /// GET `endpoint`, appending `params` as query parameters.
    pub fn get(&self, endpoint: &str, params: Option<&[(&str, &str)]>) -> Result<HttpResponse, ApiError> {
        let url = self.url(endpoint);
        info!(%url, ?params, "GET");
        let response = self.execute(HttpMethod::Get, &url, params.unwrap_or_default(), None)?;
        debug!(%url, ?params, status = response.status, body = %response.body, "GET response");
        Ok(response)
    }

    /// POST `data` as JSON. With `None` the request carries no body.
    pub fn post<T>(&self, endpoint: &str, data: Option<&T>) -> Result<HttpResponse, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Post, endpoint, data)
    }

    /// PUT `data` as JSON. With `None` the request carries no body.
    pub fn put<T>(&self, endpoint: &str, data: Option<&T>) -> Result<HttpResponse, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Put, endpoint, data)
    }

    pub fn delete(&self, endpoint: &str) -> Result<HttpResponse, ApiError> {
        let url = self.url(endpoint);
        info!(%url, "DELETE");
        self.execute(HttpMethod::Delete, &url, &[], None)
    }

    fn send_json<T>(&self, method: HttpMethod, endpoint: &str, data: Option<&T>) -> Result<HttpResponse, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        let payload = data
            .map(|d| serde_json::to_string(d))
            .transpose()
            .map_err(ApiError::Serialization)?;
        let logged = payload.as_deref().unwrap_or("null");
        info!(%url, data = logged, "{method}");
        let response = self.execute(method, &url, &[], payload.clone())?;
        info!(%url, data = logged, status = response.status, body = %response.body, "{method} response");
        Ok(response)
    }

    fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let result = match (method, body) {
            (HttpMethod::Get, _) => {
                let mut request = self.agent.get(url);
                for (key, value) in query {
                    request = request.query(*key, *value);
                }
                request.call()
            }
            (HttpMethod::Delete, _) => self.agent.delete(url).call(),
            (HttpMethod::Post, Some(body)) => {
                self.agent.post(url).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self.agent.post(url).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                self.agent.put(url).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Put, None) => self.agent.put(url).send_empty(),
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn method_labels() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn url_appends_endpoint_to_base() {
        let client = ApiClient::new(ClientConfig::new("http://localhost:3000/"));
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/posts/1"), "http://localhost:3000/posts/1");
    }

    #[test]
    fn is_success_covers_2xx_only() {
        assert!(response(200, "").is_success());
        assert!(response(201, "").is_success());
        assert!(!response(404, "").is_success());
        assert!(!response(400, "").is_success());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let resp = response(200, "{}");
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn json_value_parses_error_body() {
        let resp = response(404, r#"{"error":"post not found"}"#);
        let body = resp.json_value().unwrap();
        assert_eq!(body["error"], "post not found");
    }

    #[test]
    fn json_reports_bad_body() {
        let resp = response(200, "not json");
        let err = resp.json_value().unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
