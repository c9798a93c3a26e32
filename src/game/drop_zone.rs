//! Drop-outside-removal policy
//!
//! A tile released beyond the workspace, by more than a fixed buffer on any
//! side, goes back to the pool. Released anywhere else, the draft keeps the
//! order the hit-tester last produced; there is no snapping to a nearest slot.

use glam::Vec2;

use super::board::Board;
use super::geometry::Rect;
use super::segment::SegmentId;

/// What a release did to the dragged tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Stayed in the draft at its last hit-tested position
    Kept,
    /// Returned to the pool
    ReturnedToPool,
}

/// Workspace bounds plus tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub workspace: Rect,
    pub buffer: f32,
}

impl DropZone {
    pub fn new(workspace: Rect, buffer: f32) -> Self {
        Self { workspace, buffer }
    }

    /// True when the point lies past the buffered workspace edge on any side.
    /// A point exactly on the buffered edge still counts as inside.
    pub fn is_outside(&self, p: Vec2) -> bool {
        let zone = self.workspace.expand(self.buffer);
        p.x < zone.min.x || p.x > zone.max.x || p.y < zone.min.y || p.y > zone.max.y
    }

    /// Apply the policy to a released tile
    pub fn resolve(&self, board: &mut Board, dragged: SegmentId, release: Vec2) -> DropOutcome {
        if self.is_outside(release) && board.move_to_pool(dragged) {
            log::debug!("{} dropped outside workspace, returned to pool", dragged);
            DropOutcome::ReturnedToPool
        } else {
            DropOutcome::Kept
        }
    }
}
