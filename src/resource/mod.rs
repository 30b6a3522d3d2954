//! Network collaborator used by view api tables.
//!
//! Views never talk to the network directly: every endpoint built from an
//! [`ApiDescriptor`](crate::view::ApiDescriptor) delegates to a [`Resource`].

mod http;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use http::HttpResource;

/// HTTP verb of an api descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    /// Whether calls with this verb carry a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by a [`Resource`]. There is no implicit retry.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Transport failure for {verb} {path}: {message}")]
    Transport {
        verb: Verb,
        path: String,
        message: String,
    },

    #[error("{verb} {path} returned status {status}")]
    Status {
        verb: Verb,
        path: String,
        status: u16,
    },

    #[error("Failed to parse response of {verb} {path}: {source}")]
    Decode {
        verb: Verb,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Performs one request and resolves to the parsed response body.
///
/// Implementations reject on transport failure or a non-success status.
#[async_trait]
pub trait Resource: Send + Sync {
    async fn call(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<Value, ResourceError>;
}
