//! # Endpoint Selector
//!
//! Filters the service list down to the services whose endpoint (the last
//! segment of the path) is present in an `AllowList`.

use crate::schema::Service;
use indexmap::IndexSet;

/// Endpoints generated when no explicit list is configured.
pub const DEFAULT_ENDPOINTS: &[&str] = &["user_groups", "permissions"];

/// The set of endpoint names for which output is produced.
///
/// Matching is exact and case sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    endpoints: IndexSet<String>,
}

impl AllowList {
    /// Creates an allow-list from endpoint names. Duplicates are collapsed.
    pub fn new<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `endpoint` is allowed.
    pub fn contains(&self, endpoint: &str) -> bool {
        self.endpoints.contains(endpoint)
    }

    /// Iterates the endpoint names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(String::as_str)
    }

    /// Returns `true` if nothing is allowed.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINTS.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A service that passed the allow-list, paired with its endpoint name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedService<'a> {
    /// The trailing path segment of `service.path`.
    pub endpoint: &'a str,
    /// The selected service.
    pub service: &'a Service,
}

/// Returns the endpoint of a service path: the text after the last `/`.
///
/// A path without `/` is its own endpoint.
pub fn endpoint_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Selects the services whose endpoint is allowed, preserving schema order.
pub fn select<'a>(services: &'a [Service], allow_list: &AllowList) -> Vec<SelectedService<'a>> {
    services
        .iter()
        .filter_map(|service| {
            let endpoint = endpoint_of(&service.path);
            allow_list
                .contains(endpoint)
                .then_some(SelectedService { endpoint, service })
        })
        .collect()
}
