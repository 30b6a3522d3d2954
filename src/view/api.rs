//! Api tables built from descriptors.
//!
//! Each descriptor becomes an [`Endpoint`] whose call shape follows its verb:
//!
//! | verb   | query    | body |
//! |--------|----------|------|
//! | GET    | optional | no   |
//! | DELETE | optional | no   |
//! | POST   | no       | yes  |
//! | PUT    | yes      | yes  |

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::{Resource, ResourceError, Verb};

use super::error::ViewError;

/// Pending response of an endpoint call. Owns everything it needs.
pub type ApiFuture = Pin<Box<dyn Future<Output = Result<Value, ResourceError>> + Send + 'static>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    pub name: String,
    pub verb: Verb,
    pub path_template: String,
}

impl ApiDescriptor {
    pub fn new(name: impl Into<String>, verb: Verb, path_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verb,
            path_template: path_template.into(),
        }
    }
}

/// Arguments for one endpoint call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiArgs {
    /// GET / DELETE: query suffix appended verbatim to the path.
    Query(Option<String>),
    /// POST: request body.
    Body(Value),
    /// PUT: query suffix and body.
    QueryAndBody { query: String, body: Value },
}

impl ApiArgs {
    fn describe(&self) -> &'static str {
        match self {
            ApiArgs::Query(_) => "a query",
            ApiArgs::Body(_) => "a body",
            ApiArgs::QueryAndBody { .. } => "a query and a body",
        }
    }
}

/// One callable built from an [`ApiDescriptor`].
#[derive(Clone)]
pub struct Endpoint {
    descriptor: ApiDescriptor,
    resource: Arc<dyn Resource>,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    pub fn descriptor(&self) -> &ApiDescriptor {
        &self.descriptor
    }

    /// Starts a call. Fails without contacting the resource when `args` do
    /// not fit the endpoint's verb.
    pub fn invoke(&self, args: ApiArgs) -> Result<ApiFuture, ViewError> {
        let template = &self.descriptor.path_template;
        let verb = self.descriptor.verb;
        let (path, body) = match (verb, args) {
            (Verb::Get | Verb::Delete, ApiArgs::Query(query)) => {
                (format!("{}{}", template, query.unwrap_or_default()), None)
            }
            (Verb::Post, ApiArgs::Body(body)) => (template.clone(), Some(body)),
            (Verb::Put, ApiArgs::QueryAndBody { query, body }) => {
                (format!("{}{}", template, query), Some(body))
            }
            (_, args) => {
                return Err(ViewError::ArgumentMismatch {
                    name: self.descriptor.name.clone(),
                    verb,
                    given: args.describe(),
                })
            }
        };

        tracing::debug!(endpoint = %self.descriptor.name, verb = %verb, path = %path, "Calling endpoint");
        let resource = Arc::clone(&self.resource);
        Ok(Box::pin(async move { resource.call(verb, &path, body).await }))
    }

    /// GET / DELETE call.
    pub fn query(&self, query: Option<&str>) -> Result<ApiFuture, ViewError> {
        self.invoke(ApiArgs::Query(query.map(str::to_string)))
    }

    /// POST call.
    pub fn send(&self, body: Value) -> Result<ApiFuture, ViewError> {
        self.invoke(ApiArgs::Body(body))
    }

    /// PUT call.
    pub fn replace(&self, query: &str, body: Value) -> Result<ApiFuture, ViewError> {
        self.invoke(ApiArgs::QueryAndBody {
            query: query.to_string(),
            body,
        })
    }
}

/// Endpoints keyed by descriptor name.
#[derive(Debug, Clone, Default)]
pub struct ApiTable {
    endpoints: HashMap<String, Endpoint>,
}

impl ApiTable {
    pub fn endpoint(&self, name: &str) -> Result<&Endpoint, ViewError> {
        self.endpoints
            .get(name)
            .ok_or_else(|| ViewError::UnknownEndpoint {
                name: name.to_string(),
            })
    }

    pub fn call(&self, name: &str, args: ApiArgs) -> Result<ApiFuture, ViewError> {
        self.endpoint(name)?.invoke(args)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.endpoints.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Builds one endpoint per descriptor. A later descriptor replaces an earlier
/// one with the same name.
pub fn build_api(descriptors: &[ApiDescriptor], resource: Arc<dyn Resource>) -> ApiTable {
    let endpoints = descriptors
        .iter()
        .map(|descriptor| {
            let endpoint = Endpoint {
                descriptor: descriptor.clone(),
                resource: Arc::clone(&resource),
            };
            (descriptor.name.clone(), endpoint)
        })
        .collect();
    ApiTable { endpoints }
}
