//! Admin API request and response types

use serde::Deserialize;

use crate::instance::AdminCredentials;

/// An HTTP request for an agent's admin API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl AdminRequest {
    /// Create a POST request with an empty body
    pub fn post(path: &str) -> Self {
        Self {
            method: "POST".to_string(),
            path: path.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a header, replacing any existing header with the same name
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Mark the request as JSON
    pub fn json(self) -> Self {
        self.header("Content-Type", "application/json")
    }

    /// Attach basic auth credentials
    pub fn basic_auth(self, credentials: &AdminCredentials) -> Self {
        self.header("Authorization", &credentials.authorization_header())
    }

    /// Look up a header value (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response from an agent's admin API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminResponse {
    pub status: u16,
    /// Header names are lower-cased
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl AdminResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: &str) -> Self {
        let headers = content_type
            .map(|ct| vec![("content-type".to_string(), ct.to_string())])
            .unwrap_or_default();
        Self {
            status,
            headers,
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// True when the media type is `application/json` (parameters ignored)
    pub fn is_json(&self) -> bool {
        self.content_type()
            .and_then(|ct| ct.split(';').next())
            .map(|media| media.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Structured error body returned by agents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_defaults() {
        let request = AdminRequest::post("/reopen_logs.json");
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/reopen_logs.json");
        assert!(request.headers.is_empty());
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_header_replaces_existing() {
        let request = AdminRequest::post("/")
            .header("Content-Type", "text/plain")
            .json();
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header_value("content-type"), Some("application/json"));
    }

    #[test]
    fn test_basic_auth_header() {
        let creds = AdminCredentials::new("admin", "secret");
        let request = AdminRequest::post("/").basic_auth(&creds);
        assert_eq!(
            request.header_value("Authorization"),
            Some("Basic YWRtaW46c2VjcmV0")
        );
    }

    #[test]
    fn test_is_json() {
        assert!(AdminResponse::new(200, Some("application/json"), "{}").is_json());
        assert!(AdminResponse::new(200, Some("application/json; charset=utf-8"), "{}").is_json());
        assert!(AdminResponse::new(200, Some("Application/JSON"), "{}").is_json());
        assert!(!AdminResponse::new(500, Some("text/html"), "").is_json());
        assert!(!AdminResponse::new(200, None, "{}").is_json());
    }

    #[test]
    fn test_is_success() {
        assert!(AdminResponse::new(200, None, "").is_success());
        assert!(AdminResponse::new(204, None, "").is_success());
        assert!(!AdminResponse::new(199, None, "").is_success());
        assert!(!AdminResponse::new(301, None, "").is_success());
        assert!(!AdminResponse::new(503, None, "").is_success());
    }

    #[test]
    fn test_agent_error_body_partial() {
        let body: AgentErrorBody = serde_json::from_str(r#"{"message": "boom"}"#).unwrap();
        assert!(body.code.is_none());
        assert_eq!(body.message.as_deref(), Some("boom"));
    }
}
