//! Shockwave ring: a growing annulus used purely for hit-testing
//!
//! The ring's center never moves; only the outer diameter grows. Thickness
//! tracks the diameter, so the hit window widens as the wave expands.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;

/// An expanding annulus centered on its emission point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShockwaveRing {
    /// Emission point, fixed for the ring's whole life
    pub center: Vec2,
    pub outer_diameter: f32,
    pub thickness: f32,
    /// Diameter growth per frame, fixed at creation
    pub growth_rate: f32,
    /// Random stroke multiplier fixed at creation; drives growth and width
    stroke: f32,
}

impl ShockwaveRing {
    pub fn new(center: Vec2, diameter: f32, stroke: f32) -> Self {
        Self {
            center,
            outer_diameter: diameter,
            thickness: diameter * RING_THICKNESS_RATIO * stroke,
            growth_rate: RING_BASE_GROWTH * stroke,
            stroke,
        }
    }

    /// Expand by one frame's growth; thickness follows the diameter
    pub fn grow(&mut self) {
        self.outer_diameter += self.growth_rate;
        self.thickness = self.outer_diameter * RING_THICKNESS_RATIO * self.stroke;
    }

    /// Whether the ring has expanded past the battlefield. `field_extent`
    /// is the larger field dimension.
    pub fn expired(&self, field_extent: f32) -> bool {
        self.outer_diameter > field_extent * RING_CUTOFF_FACTOR
    }

    /// Radial hit window as (inner edge, outer edge) distances from center.
    /// The edges are where a unit vector from the center toward the target
    /// lands when scaled by `outer_diameter * 0.97 / 2 -/+ thickness / 2`,
    /// so the band is evaluated along the ray to the target.
    pub fn hit_window(&self) -> (f32, f32) {
        let edge = self.outer_diameter * RING_HIT_FACTOR / 2.0;
        (edge - self.thickness / 2.0, edge + self.thickness / 2.0)
    }

    /// True when `point` lies strictly inside the annulus band
    pub fn contains(&self, point: Vec2) -> bool {
        let (inner, outer) = self.hit_window();
        let d = self.center.distance(point);
        d > inner && d < outer
    }
}
