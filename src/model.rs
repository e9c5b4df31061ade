//! Input data model for the horizon chart.

use serde::{Deserialize, Serialize};

/// One labeled marker on the chart. Immutable input record; the layout
/// engine never mutates these, it only derives an `ItemPosition` per item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonItem {
    pub name: String,
    /// Maturity ring, 1 (outermost, near-term) to 4 (innermost, far-term).
    pub horizon: i64,
    /// 1-based index into the chart's category sectors.
    pub category: i64,
    /// Marker glyph selector for the renderer (1..=3). Opaque to the engine.
    #[serde(rename = "type")]
    pub kind: i64,
    /// Display name of the item's sector, if the dataset carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

/// The sorted, deduplicated category indices present in a dataset.
/// This set defines the angle scale's domain.
pub fn categories_of(items: &[HorizonItem]) -> Vec<i64> {
    let mut categories: Vec<i64> = items.iter().map(|it| it.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

/// Out-of-range horizons are clamped to the nearest ring rather than
/// rejected: a visibly approximate layout beats a hard failure here.
pub(crate) fn clamp_horizon(horizon: i64) -> f64 {
    horizon.clamp(1, 4) as f64
}

/// Clamp a category index into the declared category range.
pub(crate) fn clamp_category(category: i64, categories: &[i64]) -> f64 {
    match (categories.first(), categories.last()) {
        (Some(&lo), Some(&hi)) => category.clamp(lo, hi) as f64,
        _ => category as f64,
    }
}
