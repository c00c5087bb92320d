//! Example registry
//!
//! Maps each example name to its descriptor: the documented endpoint, the
//! expected status code and the operation that produces the example output.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::ZulipApi;
use crate::common::{Error, Result};

/// What an example operation produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The example made a single API call
    Single(Value),
    /// The example made several API calls, in call order
    Multi(Vec<Value>),
}

/// Code run for one example against a connected client
#[async_trait]
pub trait Operation: Send + Sync {
    async fn run(&self, client: &dyn ZulipApi) -> Result<Outcome>;
}

/// Registered metadata and operation for one example
#[derive(Clone)]
pub struct ExampleDescriptor {
    /// Unique example name
    pub name: String,
    /// Documented endpoint as `path:method`
    pub endpoint: String,
    /// Documented response status
    pub status_code: u16,
    pub operation: Arc<dyn Operation>,
}

impl fmt::Debug for ExampleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleDescriptor")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("status_code", &self.status_code)
            .finish_non_exhaustive()
    }
}

/// All examples known to a run
#[derive(Default)]
pub struct Registry {
    examples: HashMap<String, ExampleDescriptor>,
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an example
    ///
    /// Registering a name twice replaces the earlier descriptor, which is
    /// returned. The name keeps its first position in [`Registry::descriptors`].
    pub fn register<O>(
        &mut self,
        name: &str,
        endpoint: &str,
        status_code: u16,
        operation: O,
    ) -> Option<ExampleDescriptor>
    where
        O: Operation + 'static,
    {
        let descriptor = ExampleDescriptor {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            status_code,
            operation: Arc::new(operation),
        };

        let previous = self.examples.insert(name.to_string(), descriptor);
        match &previous {
            Some(old) => {
                tracing::warn!(
                    example = name,
                    old_endpoint = %old.endpoint,
                    new_endpoint = endpoint,
                    "Example registered twice, replacing earlier registration"
                );
            }
            None => self.order.push(name.to_string()),
        }
        previous
    }

    /// Look up an example by name
    pub fn lookup(&self, name: &str) -> Result<&ExampleDescriptor> {
        self.examples
            .get(name)
            .ok_or_else(|| Error::ExampleNotFound(name.to_string()))
    }

    /// Descriptors, in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &ExampleDescriptor> {
        self.order.iter().filter_map(|name| self.examples.get(name))
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Value);

    #[async_trait]
    impl Operation for Fixed {
        async fn run(&self, _client: &dyn ZulipApi) -> Result<Outcome> {
            Ok(Outcome::Single(self.0.clone()))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        let previous = registry.register("get_own_user", "/users/me:get", 200, Fixed(json!({})));
        assert!(previous.is_none());

        let descriptor = registry.lookup("get_own_user").unwrap();
        assert_eq!(descriptor.name, "get_own_user");
        assert_eq!(descriptor.endpoint, "/users/me:get");
        assert_eq!(descriptor.status_code, 200);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_missing() {
        let registry = Registry::new();
        match registry.lookup("nope") {
            Err(Error::ExampleNotFound(name)) => assert_eq!(name, "nope"),
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_registration_overwrites() {
        let mut registry = Registry::new();
        registry.register("a", "/a:get", 200, Fixed(json!(1)));
        registry.register("b", "/b:get", 200, Fixed(json!(2)));

        let previous = registry
            .register("a", "/a:post", 201, Fixed(json!(3)))
            .unwrap();
        assert_eq!(previous.endpoint, "/a:get");

        let descriptor = registry.lookup("a").unwrap();
        assert_eq!(descriptor.endpoint, "/a:post");
        assert_eq!(descriptor.status_code, 201);
        assert_eq!(registry.len(), 2);
        let names: Vec<_> = registry.descriptors().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_descriptors_in_registration_order() {
        let mut registry = Registry::new();
        for name in ["z", "m", "a"] {
            registry.register(name, "/x:get", 200, Fixed(json!(null)));
        }
        let names: Vec<_> = registry.descriptors().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["z", "m", "a"]);
    }
}
