//! AABB collision detection.
//!
//! Two items collide when any of their marker/label boxes overlap under a
//! small symmetric padding; an item collides with an axis label when either
//! of its boxes overlaps the static obstacle rectangle. Detection is pure:
//! it never mutates positions, the caller decides what to mark.

use super::{AxisLabelBox, ItemPosition, LayoutConfig, RectF};

/// Everything one detection pass found.
#[derive(Debug, Clone, Default)]
pub struct Collisions {
    /// Colliding item index pairs, with `i < j`.
    pub pairs: Vec<(usize, usize)>,
    /// (item index, axis box index) overlaps.
    pub axis: Vec<(usize, usize)>,
}

impl Collisions {
    pub fn total(&self) -> usize {
        self.pairs.len() + self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.axis.is_empty()
    }
}

/// Test every item pair and every item/axis-box pair.
pub fn detect(
    items: &[ItemPosition],
    axis_boxes: &[AxisLabelBox],
    cfg: &LayoutConfig,
) -> Collisions {
    let pad = cfg.collision_padding;
    let rects: Vec<[RectF; 2]> = items
        .iter()
        .map(|it| [it.marker_rect(cfg), it.label_rect()])
        .collect();

    let mut found = Collisions::default();
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if boxes_overlap(&rects[i], &rects[j], pad) {
                found.pairs.push((i, j));
            }
        }
        for (k, axis_box) in axis_boxes.iter().enumerate() {
            let obstacle = axis_box.rect();
            if rects[i].iter().any(|r| r.overlaps_padded(&obstacle, pad)) {
                found.axis.push((i, k));
            }
        }
    }
    found
}

fn boxes_overlap(a: &[RectF; 2], b: &[RectF; 2], pad: f64) -> bool {
    a.iter()
        .any(|ra| b.iter().any(|rb| ra.overlaps_padded(rb, pad)))
}
