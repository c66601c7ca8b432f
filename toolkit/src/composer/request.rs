//! Request descriptors built from the composer form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Port used when the form leaves it blank
pub const DEFAULT_PORT: &str = "8080";

/// Methods the composer can send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET requests never carry a body
    pub fn allows_body(&self) -> bool {
        *self != HttpMethod::Get
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(format!("Unsupported method: {}", s)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
        }
    }
}

/// The live state of the composer form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub route: String,
    pub body: Option<String>,
    pub port: String,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, route: impl Into<String>) -> Self {
        Self {
            method,
            route: route.into(),
            body: None,
            port: DEFAULT_PORT.to_string(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    /// Blank routes are not submitted
    pub fn is_submittable(&self) -> bool {
        !self.route.trim().is_empty()
    }

    /// Body to send, always `None` for GET
    pub fn effective_body(&self) -> Option<&str> {
        if self.method.allows_body() {
            self.body.as_deref()
        } else {
            None
        }
    }

    /// Full request URL, the override wins over the port
    pub fn target_url(&self, base_url_override: Option<&str>) -> String {
        match base_url_override.map(str::trim).filter(|base| !base.is_empty()) {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), self.route),
            None => {
                let port = match self.port.trim() {
                    "" => DEFAULT_PORT,
                    port => port,
                };
                format!("http://localhost:{}{}", port, self.route)
            }
        }
    }
}
