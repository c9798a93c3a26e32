//! Citation fragments and puzzles
//!
//! A `Fragment` is the content of a tile (text + italic flag) as it appears in
//! the catalog. A `Segment` is a fragment placed on the board with an identity
//! that is unique for the whole game.

use serde::{Deserialize, Serialize};

/// Opaque tile identity, never reused within a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u32);

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seg-{}", self.0)
    }
}

/// Monotonic id allocator
#[derive(Debug, Clone)]
pub struct SegmentIds {
    next: u32,
}

impl Default for SegmentIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl SegmentIds {
    /// Allocate a fresh id
    pub fn next_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next);
        self.next += 1;
        id
    }

    /// Turn a fragment into a segment with a fresh id
    pub fn issue(&mut self, fragment: &Fragment) -> Segment {
        Segment {
            id: self.next_id(),
            text: fragment.text.clone(),
            italic: fragment.italic,
        }
    }
}

/// Tile content as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(default)]
    pub italic: bool,
}

impl Fragment {
    pub fn new(text: impl Into<String>, italic: bool) -> Self {
        Self {
            text: text.into(),
            italic,
        }
    }
}

/// A fragment placed on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub id: SegmentId,
    pub text: String,
    pub italic: bool,
}

impl Segment {
    /// Same text and italic flag, regardless of identity
    pub fn same_fragment(&self, other: &Segment) -> bool {
        self.text == other.text && self.italic == other.italic
    }
}

/// Puzzle definition as supplied by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleTemplate {
    pub description: String,
    /// Target citation in order
    pub correct: Vec<Fragment>,
    /// Wrong tiles mixed into the pool
    pub distractors: Vec<Fragment>,
    pub hint: String,
}

/// The puzzle of the current round, with ids issued for every tile
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub description: String,
    pub correct: Vec<Segment>,
    pub distractors: Vec<Segment>,
    pub hint: String,
}

impl Puzzle {
    /// Issue one fresh segment per correct fragment and per distractor
    pub fn from_template(template: &PuzzleTemplate, ids: &mut SegmentIds) -> Self {
        Self {
            description: template.description.clone(),
            correct: template.correct.iter().map(|f| ids.issue(f)).collect(),
            distractors: template.distractors.iter().map(|f| ids.issue(f)).collect(),
            hint: template.hint.clone(),
        }
    }

    /// Every tile of the puzzle, correct ones first
    pub fn tiles(&self) -> impl Iterator<Item = &Segment> {
        self.correct.iter().chain(self.distractors.iter())
    }

    /// The target sequence re-issued under fresh ids (reveal answer)
    pub fn reissue_answer(&self, ids: &mut SegmentIds) -> Vec<Segment> {
        self.correct
            .iter()
            .map(|s| Segment {
                id: ids.next_id(),
                text: s.text.clone(),
                italic: s.italic,
            })
            .collect()
    }
}
