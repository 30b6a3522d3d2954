use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;

use super::{Resource, ResourceError, Verb};

/// [`Resource`] backed by a reqwest client rooted at `base_url`.
pub struct HttpResource {
    client: Client,
    base_url: String,
}

impl HttpResource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Resource for HttpResource {
    async fn call(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<Value, ResourceError> {
        let transport = |e: reqwest::Error| ResourceError::Transport {
            verb,
            path: path.to_string(),
            message: e.to_string(),
        };

        let mut request = self.client.request(method(verb), self.url(path));
        if let Some(body) = body.filter(|_| verb.has_body()) {
            request = request.json(&body);
        }

        tracing::debug!(verb = %verb, path = %path, "Sending resource request");
        let response = request.send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceError::Status {
                verb,
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|source| ResourceError::Decode {
            verb,
            path: path.to_string(),
            source,
        })
    }
}
