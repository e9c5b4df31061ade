//! Output types for the chart renderer.
//!
//! These structs are serialized to JSON and handed to the JavaScript
//! rendering layer. Item positions come back in input order, so the
//! renderer can zip them onto its own dataset.

use serde::Serialize;

use crate::layout::{AxisLabelBox, ItemPosition, LayoutRun};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOutput {
    pub items: Vec<ItemPosition>,
    pub axis_labels: Vec<AxisLabelBox>,
    /// False when the resolver ran out of passes; residual overlaps are
    /// left in place, not hidden.
    pub converged: bool,
    /// Resolution passes applied.
    pub passes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

impl ChartOutput {
    pub fn from_run(run: &LayoutRun) -> ChartOutput {
        ChartOutput {
            items: run.items.clone(),
            axis_labels: run.axis_labels.clone(),
            converged: run.converged,
            passes: run.passes,
            error: None,
        }
    }

    pub fn from_error(message: impl Into<String>) -> ChartOutput {
        ChartOutput {
            items: Vec::new(),
            axis_labels: Vec::new(),
            converged: false,
            passes: 0,
            error: Some(ErrorInfo {
                message: message.into(),
            }),
        }
    }
}
