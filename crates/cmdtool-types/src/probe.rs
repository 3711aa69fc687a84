//! Backend probe boundary.
//!
//! A backend answers a named request with a mapping of flag names to
//! arbitrarily nested values. The shell only ever sees that generic shape;
//! what the backend actually is stays behind the [`BackendProbe`] trait.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::Result;

/// A loosely typed value returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeValue {
    /// Strings, numbers and booleans, kept in their textual form.
    Scalar(String),
    List(Vec<ProbeValue>),
    Object(BTreeMap<String, ProbeValue>),
    /// The backend reported the key without a value.
    Absent,
}

/// Top-level answer of a probe request.
pub type ProbeResponse = BTreeMap<String, ProbeValue>;

/// A backend that can be queried for structured data.
pub trait BackendProbe {
    /// Human-readable location of the backend, for messages.
    fn endpoint(&self) -> &str;

    /// Issue `request` and return the decoded top-level mapping.
    fn query(&self, request: &str) -> Result<ProbeResponse>;
}

impl From<serde_json::Value> for ProbeValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ProbeValue::Absent,
            Value::Bool(b) => ProbeValue::Scalar(b.to_string()),
            Value::Number(n) => ProbeValue::Scalar(n.to_string()),
            Value::String(s) => ProbeValue::Scalar(s),
            Value::Array(items) => ProbeValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ProbeValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            },
        }
    }
}

impl From<&ProbeValue> for serde_json::Value {
    fn from(value: &ProbeValue) -> Self {
        use serde_json::Value;
        match value {
            ProbeValue::Scalar(s) => Value::String(s.clone()),
            ProbeValue::List(items) => Value::Array(items.iter().map(Into::into).collect()),
            ProbeValue::Object(map) => {
                Value::Object(map.iter().map(|(k, v)| (k.clone(), v.into())).collect())
            },
            ProbeValue::Absent => Value::Null,
        }
    }
}

/// Decode a JSON document whose top level must be an object.
pub fn response_from_json(value: serde_json::Value) -> Option<ProbeResponse> {
    match ProbeValue::from(value) {
        ProbeValue::Object(map) => Some(map),
        _ => None,
    }
}

/// Render a response as indented JSON text, prefixed with the request name.
pub fn render_tree(request: &str, response: &ProbeResponse) -> Result<String> {
    let json = serde_json::Value::Object(
        response
            .iter()
            .map(|(k, v)| (k.clone(), v.into()))
            .collect(),
    );
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    json.serialize(&mut ser)?;
    Ok(format!("{request}: {}", String::from_utf8_lossy(&buf)))
}

/// Walk the top level of a response and describe each entry by its shape.
pub fn render_walk(response: &ProbeResponse) -> String {
    let mut out = String::new();
    for (key, value) in response {
        if !out.is_empty() {
            out.push('\n');
        }
        match value {
            ProbeValue::Scalar(s) => {
                let _ = writeln!(out, "{key:?}: {s}");
            },
            ProbeValue::List(items) => {
                let _ = writeln!(out, "{key} is an array:");
                for (i, item) in items.iter().enumerate() {
                    let _ = writeln!(out, "{i} {}", render_inline(item));
                }
            },
            ProbeValue::Object(_) => {
                let _ = writeln!(out, "{key:?} leads deeper via another map");
                let _ = writeln!(out, "{}", render_inline(value));
            },
            ProbeValue::Absent => {
                let _ = writeln!(out, "{key:?} was not set in this configuration");
            },
        }
    }
    out
}

/// Single-line rendering of a nested value.
pub fn render_inline(value: &ProbeValue) -> String {
    match value {
        ProbeValue::Scalar(s) => s.clone(),
        ProbeValue::List(items) => {
            let parts: Vec<String> = items.iter().map(render_inline).collect();
            format!("[{}]", parts.join(" "))
        },
        ProbeValue::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{k}:{}", render_inline(v)))
                .collect();
            format!("map[{}]", parts.join(" "))
        },
        ProbeValue::Absent => "<nil>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ProbeResponse {
        response_from_json(json!({
            "Name": "ipfs",
            "Subcommands": ["add", "cat"],
            "Options": {"Names": ["help", "h"]},
            "Run": null,
            "Count": 2,
        }))
        .unwrap()
    }

    #[test]
    fn json_scalars_become_text() {
        assert_eq!(
            ProbeValue::from(json!(true)),
            ProbeValue::Scalar("true".into())
        );
        assert_eq!(ProbeValue::from(json!(42)), ProbeValue::Scalar("42".into()));
        assert_eq!(ProbeValue::from(json!(null)), ProbeValue::Absent);
    }

    #[test]
    fn non_object_top_level_rejected() {
        assert!(response_from_json(json!([1, 2])).is_none());
        assert!(response_from_json(json!("x")).is_none());
    }

    #[test]
    fn nested_objects_decode_recursively() {
        let resp = sample();
        match &resp["Options"] {
            ProbeValue::Object(map) => match &map["Names"] {
                ProbeValue::List(items) => assert_eq!(items.len(), 2),
                other => panic!("expected list, got {other:?}"),
            },
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn tree_rendering_uses_four_space_indent() {
        let mut resp = ProbeResponse::new();
        resp.insert("Name".into(), ProbeValue::Scalar("ipfs".into()));
        let text = render_tree("commands", &resp).unwrap();
        assert_eq!(text, "commands: {\n    \"Name\": \"ipfs\"\n}");
    }

    #[test]
    fn tree_rendering_keeps_absent_as_null() {
        let mut resp = ProbeResponse::new();
        resp.insert("Run".into(), ProbeValue::Absent);
        let text = render_tree("commands", &resp).unwrap();
        assert!(text.contains("\"Run\": null"));
    }

    #[test]
    fn walk_distinguishes_every_shape() {
        let text = render_walk(&sample());
        assert!(text.contains("\"Name\": ipfs"));
        assert!(text.contains("\"Count\": 2"));
        assert!(text.contains("Subcommands is an array:\n0 add\n1 cat"));
        assert!(text.contains("\"Options\" leads deeper via another map\nmap[Names:[help h]]"));
        assert!(text.contains("\"Run\" was not set in this configuration"));
    }

    #[test]
    fn walk_of_empty_response_is_empty() {
        assert_eq!(render_walk(&ProbeResponse::new()), "");
    }
}
