//! Filter chain executor.
//!
//! A route's chain is an ordered list of filters, fixed at registration
//! time. Each filter either writes resolved values into the
//! [`RequestScope`] and lets the chain continue, or fails with an
//! [`ApiError`] that becomes the response; the handler never runs after a
//! filter failure. Chain construction validates ordering up front: every
//! attribute a filter requires must be provided by an earlier filter, so a
//! misordered chain is rejected before the router is ever served.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::context::{AttributeKey, RequestScope};
use crate::error::ApiError;

/// The slice of the request a filter is allowed to see: headers and query
/// parameters, parsed once per request. Filters never touch the body.
#[derive(Debug, Clone)]
pub struct FilterInput {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    query: Vec<(String, String)>,
}

impl FilterInput {
    pub fn from_request(request: &Request) -> Self {
        let query = request
            .uri()
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            headers: request.headers().clone(),
            query,
        }
    }

    /// First value of a query parameter, if present.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[cfg(test)]
    pub fn for_tests(query: &[(&str, &str)], headers: HeaderMap) -> Self {
        Self {
            method: Method::GET,
            path: "/test".to_string(),
            headers,
            query: query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }
}

/// One stage of a route's pre-handler chain.
#[async_trait]
pub trait Filter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Attributes this filter reads from the scope. Validated against the
    /// union of earlier filters' `provides` at chain construction.
    fn requires(&self) -> &'static [AttributeKey] {
        &[]
    }

    /// Attributes this filter writes into the scope on success.
    fn provides(&self) -> &'static [AttributeKey] {
        &[]
    }

    async fn apply(&self, input: &FilterInput, scope: &mut RequestScope) -> Result<(), ApiError>;
}

#[derive(Error, Debug)]
pub enum ChainConfigError {
    #[error("filter {filter} requires attribute {key:?}, which no earlier filter provides")]
    UnsatisfiedRequirement { filter: &'static str, key: AttributeKey },
}

/// Ordered, short-circuiting filter composition for one route.
#[derive(Clone)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterChain {
    /// Build a chain, rejecting any ordering whose requirements are not met
    /// by earlier stages.
    pub fn new(filters: Vec<Arc<dyn Filter>>) -> Result<Self, ChainConfigError> {
        let mut provided: HashSet<AttributeKey> = HashSet::new();
        for filter in &filters {
            for key in filter.requires() {
                if !provided.contains(key) {
                    return Err(ChainConfigError::UnsatisfiedRequirement {
                        filter: filter.name(),
                        key: *key,
                    });
                }
            }
            provided.extend(filter.provides().iter().copied());
        }
        Ok(Self { filters })
    }

    /// Execute the chain in order, stopping at the first failure.
    pub async fn run(&self, input: &FilterInput, scope: &mut RequestScope) -> Result<(), ApiError> {
        for filter in &self.filters {
            if let Err(err) = filter.apply(input, scope).await {
                tracing::debug!(
                    filter = filter.name(),
                    path = %input.path,
                    error = %err,
                    "filter chain halted"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Axum middleware adapter: runs the route's chain and, on success, injects
/// the populated scope for the handler to read.
pub async fn run_chain(
    State(chain): State<Arc<FilterChain>>,
    mut request: Request,
    next: Next,
) -> Response {
    let input = FilterInput::from_request(&request);
    let mut scope = RequestScope::new();

    match chain.run(&input, &mut scope).await {
        Ok(()) => {
            request.extensions_mut().insert(scope);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}
