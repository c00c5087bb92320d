//! Execution driver
//!
//! Runs examples one after another against a single client and flattens
//! their outcomes into result records. Examples never overlap: several of
//! them chain calls (register a queue, then delete it), and the output order
//! must be stable for the generated documentation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ZulipApi;
use crate::common::{Error, Result};
use crate::registry::{ExampleDescriptor, Outcome, Registry};

/// Examples run by default, in output order
pub const DEFAULT_ORDER: &[&str] = &[
    "send_message",
    "create_user",
    "get_custom_emoji",
    "delete_queue",
    "get_messages",
    "get_own_user",
    "get_stream_id",
    "get_stream_topics",
    "get_subscriptions",
    "get_users",
    "register_queue",
];

/// One captured response, as written to the output array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Example name, suffixed `_<index>` when the example made several calls
    pub name: String,
    /// URL path of the documented endpoint
    pub endpoint: String,
    /// Lowercase HTTP method
    pub method: String,
    pub status_code: String,
    /// Response body returned by the server
    pub result: Value,
}

/// Split a `path:method` endpoint into its two parts
pub fn split_endpoint<'a>(example: &str, endpoint: &'a str) -> Result<(&'a str, &'a str)> {
    let mut parts = endpoint.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(path), Some(method), None) => Ok((path, method)),
        _ => Err(Error::invalid_endpoint(example, endpoint)),
    }
}

/// Flatten an example's outcome into result records
pub fn normalize(descriptor: &ExampleDescriptor, outcome: Outcome) -> Result<Vec<ResultRecord>> {
    let (path, method) = split_endpoint(&descriptor.name, &descriptor.endpoint)?;
    let record = |name: String, result: Value| ResultRecord {
        name,
        endpoint: path.to_string(),
        method: method.to_string(),
        status_code: descriptor.status_code.to_string(),
        result,
    };

    match outcome {
        Outcome::Single(result) => Ok(vec![record(descriptor.name.clone(), result)]),
        Outcome::Multi(results) if results.is_empty() => Err(Error::unexpected_response(
            &descriptor.name,
            "example produced no results",
        )),
        Outcome::Multi(results) => Ok(results
            .into_iter()
            .enumerate()
            .map(|(index, result)| record(format!("{}_{}", descriptor.name, index), result))
            .collect()),
    }
}

/// Run the named examples in order, appending their records to `output`
///
/// Stops at the first failing example; records already appended by earlier
/// examples stay in `output`.
pub async fn run<S: AsRef<str>>(
    registry: &Registry,
    client: &dyn ZulipApi,
    names: &[S],
    output: &mut Vec<ResultRecord>,
) -> Result<()> {
    for name in names {
        let name = name.as_ref();
        let descriptor = registry.lookup(name)?;

        tracing::info!(example = name, endpoint = %descriptor.endpoint, "Running example");
        let outcome = descriptor.operation.run(client).await?;

        let records = normalize(descriptor, outcome)?;
        for record in &records {
            tracing::debug!(record = %record.name, "Captured result");
        }
        output.extend(records);
    }
    Ok(())
}

/// Run the named examples and return all records, or the first error
///
/// Nothing is returned unless every example succeeded.
pub async fn generate<S: AsRef<str>>(
    registry: &Registry,
    client: &dyn ZulipApi,
    names: &[S],
) -> Result<Vec<ResultRecord>> {
    let mut output = Vec::new();
    run(registry, client, names, &mut output).await?;
    tracing::info!(records = output.len(), "All examples completed");
    Ok(output)
}

/// Serialize records as a JSON array
pub fn to_json(records: &[ResultRecord], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Operation;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct Unused;

    #[async_trait]
    impl Operation for Unused {
        async fn run(&self, _client: &dyn ZulipApi) -> Result<Outcome> {
            unreachable!("normalize tests never run operations")
        }
    }

    fn descriptor(name: &str, endpoint: &str) -> ExampleDescriptor {
        ExampleDescriptor {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            status_code: 200,
            operation: Arc::new(Unused),
        }
    }

    #[test]
    fn test_split_endpoint() {
        assert_eq!(
            split_endpoint("x", "/messages:post").unwrap(),
            ("/messages", "post")
        );
        assert_eq!(
            split_endpoint("x", "/users/me/{stream_id}/topics:get").unwrap(),
            ("/users/me/{stream_id}/topics", "get")
        );
    }

    #[test]
    fn test_split_endpoint_rejects_wrong_part_count() {
        assert!(split_endpoint("x", "/messages").is_err());
        assert!(split_endpoint("x", "/a:b:c").is_err());
    }

    #[test]
    fn test_normalize_single_keeps_name() {
        let records = normalize(
            &descriptor("get_custom_emoji", "/realm/emoji:get"),
            Outcome::Single(json!({"emoji": {}})),
        )
        .unwrap();

        assert_eq!(
            records,
            vec![ResultRecord {
                name: "get_custom_emoji".to_string(),
                endpoint: "/realm/emoji".to_string(),
                method: "get".to_string(),
                status_code: "200".to_string(),
                result: json!({"emoji": {}}),
            }]
        );
    }

    #[test]
    fn test_normalize_multi_suffixes_index() {
        let records = normalize(
            &descriptor("get_users", "/users:get"),
            Outcome::Multi(vec![json!(1), json!(2), json!(3)]),
        )
        .unwrap();

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["get_users_0", "get_users_1", "get_users_2"]);
        assert_eq!(records[2].result, json!(3));
        assert!(records.iter().all(|r| r.endpoint == "/users" && r.method == "get"));
    }

    #[test]
    fn test_normalize_empty_multi_is_error() {
        let err = normalize(&descriptor("x", "/x:get"), Outcome::Multi(vec![])).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_normalize_bad_endpoint() {
        let err = normalize(&descriptor("x", "/x"), Outcome::Single(json!(null))).unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_to_json_field_order() {
        let records = vec![ResultRecord {
            name: "get_own_user".to_string(),
            endpoint: "/users/me".to_string(),
            method: "get".to_string(),
            status_code: "200".to_string(),
            result: json!({"result": "success"}),
        }];
        assert_eq!(
            to_json(&records, false).unwrap(),
            r#"[{"name":"get_own_user","endpoint":"/users/me","method":"get","status_code":"200","result":{"result":"success"}}]"#
        );
        assert!(!to_json(&records, false).unwrap().contains('\n'));
        assert!(to_json(&records, true).unwrap().contains('\n'));
    }
}
