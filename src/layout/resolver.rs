//! Iterative collision resolution in polar space.
//!
//! One pass: detect collisions, then nudge every colliding item by a
//! normalized polar displacement summed over its obstacles. Radial and
//! angular pushes trade off by which difference dominates at the item's
//! current radius (angular distance in cartesian terms scales with radius).
//! Static axis labels repel through a phantom `Obstacle` at their center;
//! the boxes themselves are never touched.

use super::collision;
use super::{AxisLabelBox, ItemPosition, LayoutConfig, PolarBounds};

/// What one resolution pass did.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PassStats {
    /// Collisions present at the start of the pass.
    pub collisions: usize,
    /// Items whose position actually changed.
    pub moved: usize,
}

/// A repulsion source reduced to a polar point. Items and axis boxes both
/// end up here, so the resolver cannot accidentally mutate a static box.
#[derive(Debug, Clone, Copy)]
struct Obstacle {
    radius: f64,
    angle: f64,
}

impl Obstacle {
    fn from_item(item: &ItemPosition) -> Obstacle {
        Obstacle {
            radius: item.radius,
            angle: item.angle,
        }
    }

    /// Treat the box center as a phantom item. The derived angle may fall
    /// outside the quadrant (ring labels sit just below the x axis); it is
    /// only a repulsion reference, so that is fine.
    fn from_axis_box(axis_box: &AxisLabelBox) -> Obstacle {
        let (cx, cy) = axis_box.center();
        Obstacle {
            radius: cx.hypot(cy),
            angle: (-cy).atan2(cx),
        }
    }
}

/// Run one detection + displacement pass over the items.
pub(crate) fn pass(
    items: &mut [ItemPosition],
    axis_boxes: &[AxisLabelBox],
    bounds: &PolarBounds,
    cfg: &LayoutConfig,
) -> PassStats {
    let found = collision::detect(items, axis_boxes, cfg);

    // Obstacles are snapshotted before anything moves, so the pass is
    // order-independent across items.
    let mut obstacles: Vec<Vec<Obstacle>> = vec![Vec::new(); items.len()];
    for &(i, j) in &found.pairs {
        obstacles[i].push(Obstacle::from_item(&items[j]));
        obstacles[j].push(Obstacle::from_item(&items[i]));
    }
    for &(i, k) in &found.axis {
        obstacles[i].push(Obstacle::from_axis_box(&axis_boxes[k]));
    }

    let mut moved = 0;
    for (item, obs) in items.iter_mut().zip(&obstacles) {
        item.is_colliding = !obs.is_empty();
        if obs.is_empty() {
            continue;
        }

        let (vr, va) = displacement(item, obs);
        let radius = item.radius + vr * cfg.move_step;
        let angle = item.angle + va * cfg.move_step * 0.02;
        let (radius, angle) = bounds.clamp(radius, angle);

        if radius != item.radius || angle != item.angle {
            item.radius = radius;
            item.angle = angle;
            item.sync_cartesian(cfg.label_distance);
            moved += 1;
        }
    }

    PassStats {
        collisions: found.total(),
        moved,
    }
}

/// Unit-magnitude polar push away from all obstacles. For each obstacle the
/// dominant axis gets the strong push (2) and the other a small correction
/// (0.5), with angular terms divided by the radius to stay comparable in
/// cartesian terms.
fn displacement(item: &ItemPosition, obstacles: &[Obstacle]) -> (f64, f64) {
    let radius = item.radius.max(1.0);
    let mut vr = 0.0;
    let mut va = 0.0;

    for ob in obstacles {
        let dr = item.radius - ob.radius;
        let da = item.angle - ob.angle;
        let sr = if dr >= 0.0 { 1.0 } else { -1.0 };
        let sa = if da >= 0.0 { 1.0 } else { -1.0 };

        if dr.abs() >= da.abs() * radius {
            vr += 2.0 * sr;
            va += 0.5 / radius * sa;
        } else {
            vr += 0.5 * sr;
            va += 2.0 / radius * sa;
        }
    }

    let mag = (vr * vr + va * va).sqrt();
    if mag > 0.0 { (vr / mag, va / mag) } else { (0.0, 0.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::scale;
    use crate::layout::{ChartLayout, detect};
    use crate::model::HorizonItem;

    fn item(name: &str, horizon: i64, category: i64) -> HorizonItem {
        HorizonItem {
            name: name.to_string(),
            horizon,
            category,
            kind: 1,
            category_name: None,
        }
    }

    #[test]
    fn test_two_items_in_same_cell_separate() {
        // Scenario: two items share horizon 2 / category 1, so their initial
        // jittered positions overlap almost surely.
        let items = vec![item("alpha", 2, 1), item("omega", 2, 1)];
        let mut chart = ChartLayout::new(LayoutConfig::default());
        let mut run = chart.begin(&items, 17);

        assert!(chart.run(&mut run), "pair should separate within budget");
        let found = detect(&run.items, &run.axis_labels, chart.config());
        assert!(found.pairs.is_empty());
        assert!(!run.items[0].is_colliding);
        assert!(!run.items[1].is_colliding);
    }

    #[test]
    fn test_item_pushed_off_static_axis_box() {
        // Scenario: one item whose midpoint position overlaps a sector label
        // box. The item must move; the box must not.
        let items = vec![item("cache", 3, 1)];
        let mut chart = ChartLayout::new(LayoutConfig::default());
        let mut run = chart.begin(&items, 5);

        let (mx, my) = run.items[0].marker_rect(chart.config()).center();
        let planted = AxisLabelBox {
            left: mx - 20.0,
            right: mx + 20.0,
            top: my - 9.0,
            bottom: my + 9.0,
            name: "Tools".to_string(),
        };
        run.axis_labels = vec![planted.clone()];

        assert!(chart.run(&mut run));
        let found = detect(&run.items, &run.axis_labels, chart.config());
        assert!(found.is_empty());
        assert_eq!(run.axis_labels[0], planted);
    }

    #[test]
    fn test_pass_on_clean_layout_moves_nothing() {
        let items = vec![item("a", 1, 1), item("b", 3, 4)];
        let mut chart = ChartLayout::new(LayoutConfig::default());
        let mut run = chart.begin(&items, 2);
        assert!(chart.run(&mut run));

        let bounds = run.bounds();
        let before = run.items.clone();
        let stats = pass(&mut run.items, &run.axis_labels, &bounds, chart.config());
        assert_eq!(stats.collisions, 0);
        assert_eq!(stats.moved, 0);
        assert_eq!(run.items, before);
    }

    #[test]
    fn test_colliding_flag_tracks_detection() {
        let items = vec![item("alpha", 2, 1), item("omega", 2, 1), item("solo", 4, 5)];
        let mut chart = ChartLayout::new(LayoutConfig::default());
        let mut run = chart.begin(&items, 17);

        let bounds = run.bounds();
        let stats = pass(&mut run.items, &run.axis_labels, &bounds, chart.config());
        if stats.collisions > 0 {
            assert!(run.items[0].is_colliding);
            assert!(run.items[1].is_colliding);
        }
        assert!(!run.items[2].is_colliding);
    }

    #[test]
    fn test_displacement_is_unit_magnitude() {
        let mut pos = ItemPosition {
            x: 0.0,
            y: 0.0,
            width: 30.0,
            height: 20.0,
            radius: 150.0,
            angle: 0.4,
            is_colliding: false,
        };
        pos.sync_cartesian(24.0);

        let obstacles = vec![
            Obstacle {
                radius: 140.0,
                angle: 0.38,
            },
            Obstacle {
                radius: 160.0,
                angle: 0.45,
            },
        ];
        let (vr, va) = displacement(&pos, &obstacles);
        let mag = (vr * vr + va * va).sqrt();
        assert!((mag - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_radial_difference_pushes_mostly_radially() {
        let mut pos = ItemPosition {
            x: 0.0,
            y: 0.0,
            width: 30.0,
            height: 20.0,
            radius: 160.0,
            angle: 0.4,
            is_colliding: false,
        };
        pos.sync_cartesian(24.0);

        // Obstacle directly below in radius, same angle: radial push
        // outward dominates.
        let obstacles = vec![Obstacle {
            radius: 150.0,
            angle: 0.4,
        }];
        let (vr, va) = displacement(&pos, &obstacles);
        assert!(vr > 0.9);
        assert!(va.abs() < 0.1);
    }

    #[test]
    fn test_angular_difference_pushes_mostly_angularly() {
        let mut pos = ItemPosition {
            x: 0.0,
            y: 0.0,
            width: 30.0,
            height: 20.0,
            radius: 150.0,
            angle: 0.5,
            is_colliding: false,
        };
        pos.sync_cartesian(24.0);

        let obstacles = vec![Obstacle {
            radius: 150.0,
            angle: 0.4,
        }];
        let (vr, va) = displacement(&pos, &obstacles);
        assert!(va > 0.0);
        assert!(vr > 0.0);
        // The angular branch got the strong push: in cartesian terms
        // (angle scaled by radius) it is 4x the radial correction.
        let ratio = (va * 150.0) / vr;
        assert!(ratio > 3.0);
    }

    #[test]
    fn test_clamping_keeps_items_in_bounds() {
        let cfg = LayoutConfig::default();
        let radius_scale = scale::radius_scale(&cfg);
        let bounds = PolarBounds::from_config(&cfg, &radius_scale);

        let mut pos = ItemPosition {
            x: 0.0,
            y: 0.0,
            width: 30.0,
            height: 20.0,
            radius: bounds.max_radius - 1.0,
            angle: bounds.max_angle - 0.001,
            is_colliding: false,
        };
        pos.sync_cartesian(cfg.label_distance);
        let mut items = vec![pos];

        // An obstacle inside and below pushes the item further out; the
        // clamp must hold the line.
        let boxes = vec![AxisLabelBox {
            left: items[0].x - 5.0,
            right: items[0].x + 5.0,
            top: items[0].y - 5.0,
            bottom: items[0].y + 5.0,
            name: "x".to_string(),
        }];
        for _ in 0..10 {
            pass(&mut items, &boxes, &bounds, &cfg);
        }
        assert!(bounds.contains(items[0].radius, items[0].angle));
    }
}
