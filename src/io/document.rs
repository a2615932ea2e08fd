// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Persisted tree loading and normalization

use crate::tree::Node;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// A normalized node tree. The canonical persisted shape wraps the children
/// in a synthetic root; a bare array and a `{"children": [...]}` object are
/// accepted as legacy shapes.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Parse a persisted tree. Entries that fail to parse (unknown kinds,
    /// malformed shapes) are skipped, not rejected; missing arrays normalize
    /// to empty.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("Failed to parse tree JSON")?;
        Ok(Self::from_value(&value))
    }

    /// Normalize any of the accepted persisted shapes into a child list
    pub fn from_value(value: &Value) -> Self {
        let entries: Vec<Value> = match value {
            Value::Array(items) => items.clone(),
            Value::Object(map) => {
                let holder = map.get("root").unwrap_or(value);
                holder
                    .get("children")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default()
            }
            _ => Vec::new(),
        };
        let children = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<Node>(entry).ok())
            .collect();
        Self { children }
    }

    /// Serialize to the canonical persisted shape
    pub fn to_json(&self) -> Result<String> {
        let doc = serde_json::json!({
            "root": {
                "id": "root",
                "kind": "ROOT",
                "children": self.children,
            }
        });
        serde_json::to_string_pretty(&doc).context("Failed to serialize tree")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read tree file: {:?}", path.as_ref()))?;
        Self::from_json(&text)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.to_json()?;
        std::fs::write(path.as_ref(), text)
            .with_context(|| format!("Failed to write tree file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::KindTag;

    #[test]
    fn test_canonical_shape() {
        let json = r#"{
            "root": {
                "id": "root",
                "kind": "ROOT",
                "children": [
                    {"id": "a", "kind": "add_circle", "r": 1.0, "count": 8}
                ]
            }
        }"#;
        let document = Document::from_json(json).unwrap();
        assert_eq!(document.children.len(), 1);
        assert_eq!(document.children[0].kind.tag(), KindTag::AddCircle);
    }

    #[test]
    fn test_bare_array_shape() {
        let json = r#"[{"id": "a", "kind": "add_point", "offset": [1.0, 2.0, 3.0]}]"#;
        let document = Document::from_json(json).unwrap();
        assert_eq!(document.children.len(), 1);
    }

    #[test]
    fn test_children_object_shape() {
        let json = r#"{"children": [{"id": "a", "kind": "scale", "factor": 2.0}]}"#;
        let document = Document::from_json(json).unwrap();
        assert_eq!(document.children.len(), 1);
    }

    #[test]
    fn test_unknown_kind_skipped() {
        let json = r#"[
            {"id": "a", "kind": "add_circle", "r": 1.0, "count": 8},
            {"id": "b", "kind": "extrude", "depth": 2.0}
        ]"#;
        let document = Document::from_json(json).unwrap();
        assert_eq!(document.children.len(), 1);
        assert_eq!(document.children[0].id, "a");
    }

    #[test]
    fn test_missing_children_normalizes_to_empty() {
        let document = Document::from_json(r#"{"root": {"id": "root", "kind": "ROOT"}}"#).unwrap();
        assert!(document.children.is_empty());
        let document = Document::from_json("{}").unwrap();
        assert!(document.children.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let document = Document::new(vec![
            KindTag::AddCircle.default_node(),
            KindTag::AddBuilder.default_node(),
        ]);
        let json = document.to_json().unwrap();
        let reloaded = Document::from_json(&json).unwrap();
        assert_eq!(reloaded.children, document.children);
    }
}
