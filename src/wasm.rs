//! WASM bindings for the horizon-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! The renderer sends the dataset as JSON, drives the layout to completion,
//! and draws the returned positions; it supplies the jitter seed so it can
//! reproduce a layout or request a fresh one.

use wasm_bindgen::prelude::*;

use crate::layout::{ChartLayout, LayoutConfig};
use crate::model::HorizonItem;
use crate::output::ChartOutput;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn console_log(s: &str) {
    log::info!("{s}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn console_error(s: &str) {
    log::error!("{s}");
}

/// Lay out a JSON `HorizonItem[]` and return a JSON `ChartOutput`.
/// Malformed input yields an error envelope, never a panic across the
/// boundary.
#[wasm_bindgen]
pub fn layout_chart(input: &str, max_radius: f64, seed: u32) -> String {
    if !max_radius.is_finite() || max_radius <= 0.0 {
        console_error(&format!("Invalid max_radius: {max_radius}"));
        return to_json(&ChartOutput::from_error(format!(
            "max_radius must be positive and finite, got {max_radius}"
        )));
    }

    let items: Vec<HorizonItem> = match serde_json::from_str(input) {
        Ok(items) => items,
        Err(e) => {
            console_error(&format!("Error parsing items: {e}"));
            return to_json(&ChartOutput::from_error(e.to_string()));
        }
    };

    let config = LayoutConfig {
        max_radius,
        ..LayoutConfig::default()
    };
    let mut chart = ChartLayout::new(config);
    let mut run = chart.begin(&items, u64::from(seed));
    if !chart.run(&mut run) {
        console_log("some items could not be fully separated");
    }

    to_json(&ChartOutput::from_run(&run))
}

fn to_json(output: &ChartOutput) -> String {
    serde_json::to_string(output)
        .unwrap_or_else(|_| r#"{"error":{"message":"serialization failed"}}"#.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_chart_round_trip() {
        let input = r#"[
            {"name":"queue","horizon":2,"category":1,"type":1},
            {"name":"mesh","horizon":3,"category":2,"type":2,"categoryName":"Networking"}
        ]"#;
        let out = layout_chart(input, 300.0, 9);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
        // 4 ring labels + 2 sector labels.
        assert_eq!(value["axisLabels"].as_array().unwrap().len(), 6);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_layout_chart_rejects_bad_json() {
        let out = layout_chart("not json", 300.0, 1);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["error"]["message"].is_string());
        assert_eq!(value["items"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_layout_chart_rejects_bad_radius() {
        let out = layout_chart("[]", 0.0, 1);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["error"]["message"].is_string());
    }
}
