//! Screen-space rectangles
//!
//! Coordinates are client pixels with y growing downward, matching what
//! `getBoundingClientRect` reports.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from left/top/width/height
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.min
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict containment: a point on an edge is not inside.
    /// Adjacent tiles share edges, so this keeps hit-tests unambiguous.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Grow by `margin` on all four sides
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Same size, moved so the top-left sits at `top_left`
    pub fn moved_to(&self, top_left: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + self.size(),
        }
    }
}
