//! Puzzle core
//!
//! Everything here is platform-free and deterministic for a given seed:
//! - No DOM or rendering dependencies (geometry arrives through `LayoutProbe`)
//! - Seeded RNG only
//! - Side-channel output (drag visual, window listeners) goes through `DragSurface`

pub mod board;
pub mod drag;
pub mod drop_zone;
pub mod geometry;
pub mod round;
pub mod segment;
pub mod validate;

pub use board::Board;
pub use drag::{DragController, DragSession, DragSurface, HeadlessSurface};
pub use drop_zone::{DropOutcome, DropZone};
pub use geometry::Rect;
pub use hit_test::{LayoutProbe, LayoutSnapshot, find_target_index, reorder_for_pointer};
pub use round::{Game, GamePhase, GameView};
pub use segment::{Fragment, Puzzle, PuzzleTemplate, Segment, SegmentId, SegmentIds};
pub use validate::{Verdict, validate};
