//! Static axis label obstacles.
//!
//! The four horizon ring labels sit along the horizontal axis at each ring's
//! midpoint radius; category sector labels sit past the outer edge along
//! each sector's bisector. Both are fixed obstacles for the resolver and are
//! rebuilt only when the dataset or category set changes.

use super::placement::band_midpoint;
use super::scale::LinearScale;
use super::{AxisLabelBox, LayoutConfig};
use crate::model::HorizonItem;

/// Ring names, horizon 1 (outermost) first.
const HORIZON_NAMES: [&str; 4] = ["Business", "Product", "Prototype", "Idea"];

pub(crate) fn build_axis_label_boxes(
    items: &[HorizonItem],
    categories: &[i64],
    radius_scale: &LinearScale,
    angle_scale: &LinearScale,
    cfg: &LayoutConfig,
) -> Vec<AxisLabelBox> {
    let mut boxes = Vec::with_capacity(HORIZON_NAMES.len() + categories.len());

    for (idx, name) in HORIZON_NAMES.iter().enumerate() {
        let mid = band_midpoint(radius_scale, (idx + 1) as f64);
        boxes.push(make_box(mid, cfg.horizon_label_y, name, cfg));
    }

    let label_radius = cfg.category_label_radius_ratio * cfg.max_radius;
    for &cat in categories {
        let bisector = band_midpoint(angle_scale, cat as f64);
        let name = category_name(items, cat);
        boxes.push(make_box(
            label_radius * bisector.cos(),
            -label_radius * bisector.sin(),
            &name,
            cfg,
        ));
    }

    boxes
}

fn make_box(cx: f64, cy: f64, name: &str, cfg: &LayoutConfig) -> AxisLabelBox {
    let w = name.chars().count() as f64 * cfg.axis_char_width;
    let h = cfg.axis_label_height;
    AxisLabelBox {
        left: cx - w / 2.0,
        right: cx + w / 2.0,
        top: cy - h / 2.0,
        bottom: cy + h / 2.0,
        name: name.to_string(),
    }
}

fn category_name(items: &[HorizonItem], category: i64) -> String {
    items
        .iter()
        .find(|it| it.category == category && it.category_name.is_some())
        .and_then(|it| it.category_name.clone())
        .unwrap_or_else(|| format!("Category {category}"))
}
