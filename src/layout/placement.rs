//! Initial item placement.
//!
//! Every item starts at the midpoint of its (horizon, category) cell, plus
//! bounded uniform jitter so items sharing a cell do not stack perfectly.
//! Jitter comes from the caller's RNG, which makes layouts reproducible
//! under a fixed seed.

use rand::Rng;

use super::scale::LinearScale;
use super::{ItemPosition, LayoutConfig, PolarBounds};
use crate::model::{self, HorizonItem};

pub(crate) fn assign_positions(
    items: &[HorizonItem],
    categories: &[i64],
    radius_scale: &LinearScale,
    angle_scale: &LinearScale,
    bounds: &PolarBounds,
    cfg: &LayoutConfig,
    rng: &mut impl Rng,
) -> Vec<ItemPosition> {
    let mut positions = Vec::with_capacity(items.len());
    for item in items {
        positions.push(assign_one(
            item,
            categories,
            radius_scale,
            angle_scale,
            bounds,
            cfg,
            rng,
        ));
    }
    positions
}

fn assign_one(
    item: &HorizonItem,
    categories: &[i64],
    radius_scale: &LinearScale,
    angle_scale: &LinearScale,
    bounds: &PolarBounds,
    cfg: &LayoutConfig,
    rng: &mut impl Rng,
) -> ItemPosition {
    let horizon = model::clamp_horizon(item.horizon);
    let category = model::clamp_category(item.category, categories);

    let radius = band_midpoint(radius_scale, horizon) + rng.gen_range(-0.5..0.5) * cfg.jitter_radius;
    let angle = band_midpoint(angle_scale, category) + rng.gen_range(-0.5..0.5) * cfg.jitter_angle;
    let (radius, angle) = bounds.clamp(radius, angle);

    let mut pos = ItemPosition {
        x: 0.0,
        y: 0.0,
        width: item.name.chars().count() as f64 * cfg.char_width,
        height: cfg.label_height,
        radius,
        angle,
        is_colliding: false,
    };
    pos.sync_cartesian(cfg.label_distance);
    pos
}

/// Midpoint of a band: the average of the scaled values at band +/- 0.5.
pub(crate) fn band_midpoint(scale: &LinearScale, band: f64) -> f64 {
    (scale.scale(band - 0.5) + scale.scale(band + 0.5)) / 2.0
}
