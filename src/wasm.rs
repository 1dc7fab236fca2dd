//! WASM bindings for the diagram editing surface.
//!
//! Graphs and diagrams cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::{Graph, LayoutConfig};

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

fn graph_from_json(graph_json: &str) -> Result<Graph, JsError> {
    serde_json::from_str(graph_json).map_err(|e| JsError::new(&e.to_string()))
}

/// Clean up generated diagram text.
#[wasm_bindgen]
pub fn sanitize(text: &str) -> String {
    crate::sanitize(text)
}

/// Parse (already sanitized) DSL text into graph JSON.
#[wasm_bindgen(js_name = "parseGraph")]
pub fn parse_graph(text: &str) -> Result<String, JsError> {
    let graph = crate::parse(text).map_err(|e| JsError::new(&e.to_string()))?;
    to_json(&graph)
}

/// Lay out a graph JSON document.
///
/// - `config_json`: optional `LayoutConfig` JSON; missing fields keep defaults
#[wasm_bindgen(js_name = "layoutGraph")]
pub fn layout_graph(graph_json: &str, config_json: Option<String>) -> Result<String, JsError> {
    let graph = graph_from_json(graph_json)?;
    let config = match config_json.as_deref() {
        Some(text) if !text.trim().is_empty() => {
            LayoutConfig::from_json(text).map_err(|e| JsError::new(&e.to_string()))?
        }
        _ => LayoutConfig::default(),
    };
    to_json(&crate::layout(&graph, &config))
}

/// Serialize an edited graph JSON document back to DSL text.
#[wasm_bindgen(js_name = "serializeGraph")]
pub fn serialize_graph(graph_json: &str) -> Result<String, JsError> {
    Ok(crate::serialize(&graph_from_json(graph_json)?))
}

/// Sanitize, parse and lay out raw text with the default config.
#[wasm_bindgen]
pub fn load(raw: &str) -> Result<String, JsError> {
    let diagram =
        crate::load(raw, &LayoutConfig::default()).map_err(|e| JsError::new(&e.to_string()))?;
    to_json(&diagram)
}
