//! Pointer drag controller
//!
//! One session at a time: Idle -> Dragging -> Idle. Everything the move and
//! release handlers need (tile identity, origin box, grab offset) is frozen
//! into a `DragSession` at pick-up and read back from there, never from state
//! that may have changed while the pointer was down.
//!
//! The floating drag visual and the window-level pointer listeners are owned
//! through a `DragSurface`. The visual is placed on every move before any
//! reorder runs; listeners are acquired at pick-up and released exactly once
//! on every way out of a session (release, cancel, teardown).

use glam::Vec2;

use super::board::Board;
use super::drop_zone::{DropOutcome, DropZone};
use super::geometry::Rect;
use super::hit_test::{LayoutProbe, reorder_for_pointer};
use super::segment::{Segment, SegmentId};

/// Host side of a drag: floating visual and process-wide pointer listeners
pub trait DragSurface {
    /// Start delivering window pointer-move/pointer-up/pointer-cancel events
    fn acquire_pointer_listeners(&mut self);
    /// Stop delivering them
    fn release_pointer_listeners(&mut self);
    /// Show the floating tile at the session's origin box
    fn show_drag_visual(&mut self, session: &DragSession);
    /// Move the floating tile's top-left corner
    fn place_drag_visual(&mut self, top_left: Vec2);
    fn hide_drag_visual(&mut self);
}

/// Surface with no display, recording what was asked of it
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub listening: bool,
    pub acquired: u32,
    pub released: u32,
    pub visual: Option<Rect>,
}

impl DragSurface for HeadlessSurface {
    fn acquire_pointer_listeners(&mut self) {
        self.listening = true;
        self.acquired += 1;
    }

    fn release_pointer_listeners(&mut self) {
        self.listening = false;
        self.released += 1;
    }

    fn show_drag_visual(&mut self, session: &DragSession) {
        self.visual = Some(session.origin);
    }

    fn place_drag_visual(&mut self, top_left: Vec2) {
        if let Some(visual) = self.visual.as_mut() {
            *visual = visual.moved_to(top_left);
        }
    }

    fn hide_drag_visual(&mut self) {
        self.visual = None;
    }
}

/// Immutable record of one pick-up-to-release interaction
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// The tile being dragged
    pub segment: Segment,
    /// Tile box at pick-up time
    pub origin: Rect,
    /// Press point relative to the origin's top-left
    pub grab_offset: Vec2,
}

impl DragSession {
    pub fn new(segment: Segment, origin: Rect, press: Vec2) -> Self {
        Self {
            segment,
            origin,
            grab_offset: press - origin.top_left(),
        }
    }

    pub fn segment_id(&self) -> SegmentId {
        self.segment.id
    }

    /// Where the visual's top-left goes for a pointer position
    pub fn visual_top_left(&self, pointer: Vec2) -> Vec2 {
        pointer - self.grab_offset
    }
}

pub struct DragController<S: DragSurface> {
    surface: S,
    session: Option<DragSession>,
    listening: bool,
    visual_top_left: Option<Vec2>,
}

impl<S: DragSurface> DragController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            session: None,
            listening: false,
            visual_top_left: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Current top-left of the floating visual, while dragging
    pub fn visual_top_left(&self) -> Option<Vec2> {
        self.visual_top_left
    }

    /// Begin a session. Ignored if one is already live.
    pub fn pick_up(&mut self, segment: &Segment, origin: Rect, press: Vec2) -> bool {
        if let Some(live) = &self.session {
            log::debug!("pick-up of {} ignored, {} already dragging", segment.id, live.segment.id);
            return false;
        }

        let session = DragSession::new(segment.clone(), origin, press);
        log::debug!(
            "drag start {} grab=({}, {})",
            segment.id,
            session.grab_offset.x,
            session.grab_offset.y
        );
        self.surface.show_drag_visual(&session);
        self.visual_top_left = Some(origin.top_left());
        self.acquire_listeners();
        self.session = Some(session);
        true
    }

    /// Place the visual under the pointer, then hit-test reorder the draft.
    /// Returns `(from, to)` if the draft order changed.
    pub fn pointer_moved(
        &mut self,
        pointer: Vec2,
        board: &mut Board,
        layout: &impl LayoutProbe,
    ) -> Option<(usize, usize)> {
        let session = self.session.as_ref()?;
        let dragged = session.segment_id();
        let top_left = session.visual_top_left(pointer);

        self.surface.place_drag_visual(top_left);
        self.visual_top_left = Some(top_left);

        reorder_for_pointer(board, dragged, pointer, layout)
    }

    /// End the session, applying the drop policy first
    pub fn release(&mut self, pointer: Vec2, board: &mut Board, zone: &DropZone) -> Option<DropOutcome> {
        let dragged = self.session.as_ref()?.segment_id();
        let outcome = zone.resolve(board, dragged, pointer);
        log::debug!("drag end {} -> {:?}", dragged, outcome);
        self.end_session();
        Some(outcome)
    }

    /// Abandon the session without touching the board
    pub fn cancel(&mut self) -> bool {
        if self.session.is_none() {
            return false;
        }
        log::debug!("drag cancelled");
        self.end_session();
        true
    }

    fn end_session(&mut self) {
        self.session = None;
        self.visual_top_left = None;
        self.surface.hide_drag_visual();
        self.release_listeners();
    }

    fn acquire_listeners(&mut self) {
        if !self.listening {
            self.surface.acquire_pointer_listeners();
            self.listening = true;
        }
    }

    fn release_listeners(&mut self) {
        if self.listening {
            self.surface.release_pointer_listeners();
            self.listening = false;
        }
    }
}

impl<S: DragSurface> Drop for DragController<S> {
    fn drop(&mut self) {
        self.release_listeners();
    }
}
