// Radial layout engine for the horizon chart.
//
// Goals:
// - Polar-first: (radius, angle) is the canonical item state, x/y derived
// - Deterministic: all jitter comes from a caller-seeded RNG
// - Bounded: collision resolution runs at most `max_iterations` passes
// - Static axis labels act as obstacles, never as participants
// - One pass per step, so an external scheduler can animate intermediates
//
// Submodules:
// - scale: horizon band -> radius, category band -> angle mappings
// - placement: initial cell positions with jitter
// - axis_labels: static ring/sector label obstacle boxes
// - collision: AABB overlap detection between item and axis boxes
// - resolver: iterative polar nudging of colliding items

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::model::HorizonItem;

mod axis_labels;
mod collision;
mod placement;
mod resolver;
mod scale;

pub use collision::{Collisions, detect};
pub use scale::LinearScale;

/// The chart occupies a single quadrant: angles live in (0, pi/2).
pub const QUARTER_TURN: f64 = std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Outer radius of the chart in render units.
    pub max_radius: f64,
    /// Fraction of `max_radius` kept empty at the center.
    pub center_padding_ratio: f64,
    /// Width of the uniform radial jitter band.
    pub jitter_radius: f64,
    /// Width of the uniform angular jitter band, in radians.
    pub jitter_angle: f64,
    /// Horizontal gap between a marker and its label anchor.
    pub label_distance: f64,
    /// Estimated width of one label character.
    pub char_width: f64,
    /// Label box height.
    pub label_height: f64,
    /// Half-side of the square marker box.
    pub hex_radius: f64,
    /// Estimated width of one axis-label character.
    pub axis_char_width: f64,
    /// Axis label box height.
    pub axis_label_height: f64,
    /// Category sector labels sit at this multiple of `max_radius`.
    pub category_label_radius_ratio: f64,
    /// Vertical offset of the horizon ring labels below the horizontal axis.
    pub horizon_label_y: f64,
    /// Symmetric padding applied to every overlap test.
    pub collision_padding: f64,
    /// Per-pass displacement magnitude for the resolver.
    pub move_step: f64,
    /// Resolution pass budget.
    pub max_iterations: usize,
    /// Keeps items strictly inside the quadrant.
    pub angle_epsilon: f64,
    /// Absolute floor for the inner radius clamp.
    pub min_radius_floor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_radius: 300.0,
            center_padding_ratio: 0.15,
            jitter_radius: 15.0,
            jitter_angle: std::f64::consts::PI / 36.0,
            label_distance: 24.0,
            char_width: 6.0,
            label_height: 20.0,
            hex_radius: 12.0,
            axis_char_width: 8.0,
            axis_label_height: 18.0,
            category_label_radius_ratio: 1.13,
            horizon_label_y: 14.0,
            collision_padding: 2.0,
            move_step: 8.0,
            max_iterations: 60,
            angle_epsilon: 0.01,
            min_radius_floor: 10.0,
        }
    }
}

/// Axis-aligned rectangle in render space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectF {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl RectF {
    pub fn centered(cx: f64, cy: f64, w: f64, h: f64) -> RectF {
        RectF {
            left: cx - w / 2.0,
            right: cx + w / 2.0,
            top: cy - h / 2.0,
            bottom: cy + h / 2.0,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// AABB intersection with a symmetric padding on both rectangles.
    pub fn overlaps_padded(&self, other: &RectF, pad: f64) -> bool {
        !(self.right + pad < other.left - pad
            || self.left - pad > other.right + pad
            || self.bottom + pad < other.top - pad
            || self.top - pad > other.bottom + pad)
    }
}

/// Layout state for one item. Polar (radius, angle) is canonical; x/y is
/// the derived cartesian projection of the label anchor, resynced after
/// every move. The marker sits at `(x - label_distance, y)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub angle: f64,
    /// Derived state, recomputed every detection pass.
    pub is_colliding: bool,
}

impl ItemPosition {
    /// Square marker box centered one label-distance left of the anchor.
    pub fn marker_rect(&self, cfg: &LayoutConfig) -> RectF {
        RectF::centered(
            self.x - cfg.label_distance,
            self.y,
            2.0 * cfg.hex_radius,
            2.0 * cfg.hex_radius,
        )
    }

    /// Label text box, anchored at x and vertically centered on y.
    pub fn label_rect(&self) -> RectF {
        RectF {
            left: self.x,
            right: self.x + self.width,
            top: self.y - self.height / 2.0,
            bottom: self.y + self.height / 2.0,
        }
    }

    pub(crate) fn sync_cartesian(&mut self, label_distance: f64) {
        self.x = self.radius * self.angle.cos() + label_distance;
        self.y = -self.radius * self.angle.sin();
    }
}

/// Static obstacle rectangle for a ring or sector label. Built once per
/// dataset, read-only during resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabelBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub name: String,
}

impl AxisLabelBox {
    pub fn rect(&self) -> RectF {
        RectF {
            left: self.left,
            right: self.right,
            top: self.top,
            bottom: self.bottom,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        self.rect().center()
    }
}

/// Valid polar region for item positions during resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarBounds {
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_angle: f64,
    pub max_angle: f64,
}

impl PolarBounds {
    pub fn from_config(cfg: &LayoutConfig, radius_scale: &LinearScale) -> PolarBounds {
        PolarBounds {
            // Inner clamp is the horizon-4 boundary, floored.
            min_radius: cfg.min_radius_floor.max(radius_scale.scale(4.5)),
            // Resolver may spill slightly past the outer ring.
            max_radius: cfg.max_radius * 1.05,
            min_angle: cfg.angle_epsilon,
            max_angle: QUARTER_TURN - cfg.angle_epsilon,
        }
    }

    pub fn clamp(&self, radius: f64, angle: f64) -> (f64, f64) {
        (
            radius.clamp(self.min_radius, self.max_radius),
            angle.clamp(self.min_angle, self.max_angle),
        )
    }

    pub fn contains(&self, radius: f64, angle: f64) -> bool {
        radius >= self.min_radius
            && radius <= self.max_radius
            && angle >= self.min_angle
            && angle <= self.max_angle
    }
}

/// Result of applying (or declining to apply) one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The run belongs to a superseded generation; nothing was touched.
    Stale,
    /// Detection found no collisions; the layout is final.
    Converged,
    /// One pass was applied; `collisions` were present at its start.
    Running { collisions: usize },
    /// Pass budget exhausted (or no item could move) with collisions left.
    Exhausted { collisions: usize },
}

/// One in-flight layout: item positions, static obstacles, and pass state.
/// Rebuilt from scratch on every dataset change.
#[derive(Debug, Clone)]
pub struct LayoutRun {
    generation: u64,
    pub items: Vec<ItemPosition>,
    pub axis_labels: Vec<AxisLabelBox>,
    bounds: PolarBounds,
    pub passes: usize,
    pub converged: bool,
    exhausted: bool,
    /// Collisions left when the pass budget ran out.
    residual: usize,
}

impl LayoutRun {
    pub fn bounds(&self) -> PolarBounds {
        self.bounds
    }
}

/// The layout engine. Owns the configuration and a generation counter so a
/// stale run (superseded by a newer `begin`) steps as a no-op, which lets an
/// external scheduler drop in-flight animations safely.
#[derive(Debug)]
pub struct ChartLayout {
    config: LayoutConfig,
    generation: u64,
}

impl ChartLayout {
    pub fn new(config: LayoutConfig) -> ChartLayout {
        ChartLayout {
            config,
            generation: 0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Start a new layout run for a dataset. Advances the generation, which
    /// invalidates every previously issued run.
    ///
    /// The seed fixes all jitter: the same dataset and seed reproduce the
    /// same layout bit for bit.
    pub fn begin(&mut self, items: &[HorizonItem], seed: u64) -> LayoutRun {
        self.generation += 1;

        let categories = crate::model::categories_of(items);
        let radius_scale = scale::radius_scale(&self.config);
        let angle_scale = scale::angle_scale(&categories);
        let bounds = PolarBounds::from_config(&self.config, &radius_scale);

        let mut rng = StdRng::seed_from_u64(seed);
        let positions = placement::assign_positions(
            items,
            &categories,
            &radius_scale,
            &angle_scale,
            &bounds,
            &self.config,
            &mut rng,
        );
        let axis_labels = axis_labels::build_axis_label_boxes(
            items,
            &categories,
            &radius_scale,
            &angle_scale,
            &self.config,
        );

        LayoutRun {
            generation: self.generation,
            converged: items.is_empty(),
            items: positions,
            axis_labels,
            bounds,
            passes: 0,
            exhausted: false,
            residual: 0,
        }
    }

    /// Apply exactly one resolution pass to the run. Stale, converged, and
    /// exhausted runs are left untouched.
    pub fn step(&mut self, run: &mut LayoutRun) -> StepOutcome {
        if run.generation != self.generation {
            return StepOutcome::Stale;
        }
        if run.converged {
            return StepOutcome::Converged;
        }
        if run.exhausted {
            return StepOutcome::Exhausted {
                collisions: run.residual,
            };
        }

        let stats = resolver::pass(&mut run.items, &run.axis_labels, &run.bounds, &self.config);
        if stats.collisions == 0 {
            run.converged = true;
            return StepOutcome::Converged;
        }

        run.passes += 1;
        if run.passes >= self.config.max_iterations || stats.moved == 0 {
            // Best effort: keep the layout we have and report the residue.
            run.exhausted = true;
            run.residual = stats.collisions;
            log::warn!(
                "layout did not converge after {} passes; {} collisions remain",
                run.passes,
                stats.collisions
            );
            return StepOutcome::Exhausted {
                collisions: stats.collisions,
            };
        }
        StepOutcome::Running {
            collisions: stats.collisions,
        }
    }

    /// Drive a run to completion. Returns whether it converged.
    pub fn run(&mut self, run: &mut LayoutRun) -> bool {
        loop {
            match self.step(run) {
                StepOutcome::Running { .. } => continue,
                StepOutcome::Converged => return true,
                StepOutcome::Stale | StepOutcome::Exhausted { .. } => return false,
            }
        }
    }
}
