// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! WASM bindings using wasm-bindgen

use crate::codegen::{emit, EndMode};
use crate::config::EmitOptions;
use crate::io::Document;
use crate::tree::{default_axis, evaluate};
use wasm_bindgen::prelude::*;

/// Evaluate a persisted tree and return the point cloud plus segment map as
/// JSON
#[wasm_bindgen]
pub fn evaluate_points(tree_json: &str) -> Result<String, JsValue> {
    let document = Document::from_json(tree_json)
        .map_err(|e| JsValue::from_str(&format!("Tree error: {}", e)))?;
    let evaluation = evaluate(&document.children, default_axis());
    serde_json::to_string(&evaluation)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e)))
}

/// Emit builder-chain source text for a persisted tree
#[wasm_bindgen]
pub fn emit_source(tree_json: &str, end_mode: &str) -> Result<String, JsValue> {
    let document = Document::from_json(tree_json)
        .map_err(|e| JsValue::from_str(&format!("Tree error: {}", e)))?;
    let mut options = EmitOptions::default();
    if let Some(mode) = EndMode::parse(end_mode) {
        options.end_mode = mode;
    }
    Ok(emit(&document.children, &options))
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
