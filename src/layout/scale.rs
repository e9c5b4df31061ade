//! Linear band scales for the radial chart.
//!
//! Horizon bands map onto radius with horizon 4 innermost and horizon 1
//! outermost; category bands map onto the angle of one quadrant. Both
//! scales are monotonic and invertible over their declared domains.

use super::{LayoutConfig, QUARTER_TURN};

/// A linear mapping from a domain interval onto a range interval. Either
/// interval may be descending; a zero-width interval maps to the midpoint
/// of the other side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(d0: f64, d1: f64, r0: f64, r1: f64) -> LinearScale {
        LinearScale { d0, d1, r0, r1 }
    }

    pub fn scale(&self, v: f64) -> f64 {
        let span = self.d1 - self.d0;
        if span == 0.0 {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (v - self.d0) / span * (self.r1 - self.r0)
    }

    pub fn invert(&self, r: f64) -> f64 {
        let span = self.r1 - self.r0;
        if span == 0.0 {
            return (self.d0 + self.d1) / 2.0;
        }
        self.d0 + (r - self.r0) / span * (self.d1 - self.d0)
    }
}

/// Horizon band index -> radius. The domain is inverted ([4.5, 0.5]) so
/// horizon 4 lands at the padded center and horizon 1 at the outer edge.
pub(crate) fn radius_scale(cfg: &LayoutConfig) -> LinearScale {
    let center_padding = cfg.center_padding_ratio * cfg.max_radius;
    LinearScale::new(4.5, 0.5, center_padding, cfg.max_radius)
}

/// Category band index -> angle over one quadrant. A single category still
/// gets a width-1 domain, so the lone sector spans the whole quadrant.
pub(crate) fn angle_scale(categories: &[i64]) -> LinearScale {
    let (lo, hi) = match (categories.first(), categories.last()) {
        (Some(&lo), Some(&hi)) => (lo as f64, hi as f64),
        _ => (1.0, 1.0),
    };
    LinearScale::new(lo - 0.5, hi + 0.5, 0.0, QUARTER_TURN)
}
