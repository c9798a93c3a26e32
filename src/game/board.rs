//! Pool/draft store
//!
//! The pool is the unordered set of tiles not yet placed; the draft is the
//! player's ordered citation. Both collections sit behind `Rc` and are only
//! changed through `Rc::make_mut`, so a snapshot handed to the presentation
//! keeps the collection it was taken from while the board moves on.
//!
//! Invariant after every operation: no id is in both collections and no id
//! appears twice.

use std::rc::Rc;

use super::segment::{Segment, SegmentId};

#[derive(Debug, Clone, Default)]
pub struct Board {
    pool: Rc<Vec<Segment>>,
    draft: Rc<Vec<Segment>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out a new puzzle: every tile in the pool, draft empty
    pub fn seed(&mut self, tiles: Vec<Segment>) {
        self.pool = Rc::new(tiles);
        self.draft = Rc::new(Vec::new());
    }

    pub fn pool(&self) -> &[Segment] {
        &self.pool
    }

    pub fn draft(&self) -> &[Segment] {
        &self.draft
    }

    /// Shared read-only handle on the current pool
    pub fn pool_snapshot(&self) -> Rc<Vec<Segment>> {
        Rc::clone(&self.pool)
    }

    /// Shared read-only handle on the current draft
    pub fn draft_snapshot(&self) -> Rc<Vec<Segment>> {
        Rc::clone(&self.draft)
    }

    pub fn draft_index(&self, id: SegmentId) -> Option<usize> {
        self.draft.iter().position(|s| s.id == id)
    }

    pub fn draft_segment(&self, id: SegmentId) -> Option<&Segment> {
        self.draft.iter().find(|s| s.id == id)
    }

    pub fn in_pool(&self, id: SegmentId) -> bool {
        self.pool.iter().any(|s| s.id == id)
    }

    /// Move a tile from the pool to the end of the draft.
    /// Returns false (board unchanged) if the id is not in the pool.
    pub fn move_to_draft(&mut self, id: SegmentId) -> bool {
        let Some(pos) = self.pool.iter().position(|s| s.id == id) else {
            return false;
        };
        let segment = Rc::make_mut(&mut self.pool).remove(pos);
        Rc::make_mut(&mut self.draft).push(segment);
        true
    }

    /// Move a tile from anywhere in the draft back to the pool.
    /// Returns false (board unchanged) if the id is not in the draft.
    pub fn move_to_pool(&mut self, id: SegmentId) -> bool {
        let Some(pos) = self.draft_index(id) else {
            return false;
        };
        let segment = Rc::make_mut(&mut self.draft).remove(pos);
        Rc::make_mut(&mut self.pool).push(segment);
        true
    }

    /// Relocate a draft tile to `target`, shifting the tiles in between.
    /// No-op if the id is not in the draft, `target` is its current index,
    /// or `target` is past the end.
    pub fn reorder_draft(&mut self, id: SegmentId, target: usize) -> bool {
        let Some(current) = self.draft_index(id) else {
            return false;
        };
        if current == target || target >= self.draft.len() {
            return false;
        }
        let draft = Rc::make_mut(&mut self.draft);
        let segment = draft.remove(current);
        draft.insert(target, segment);
        true
    }

    /// Replace the draft wholesale (reveal answer). Pool tiles carrying the
    /// same fragments as the new draft are dropped; the round ends right after.
    pub fn replace_draft(&mut self, sequence: Vec<Segment>) {
        let remaining: Vec<Segment> = self
            .pool
            .iter()
            .filter(|p| !sequence.iter().any(|s| s.same_fragment(p)))
            .cloned()
            .collect();
        self.pool = Rc::new(remaining);
        self.draft = Rc::new(sequence);
    }
}
