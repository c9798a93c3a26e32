//! Exact-match citation check

use super::segment::Segment;

/// Result of checking a draft against the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Correct iff both sequences have the same length and every position has
/// the same text (case-sensitive, untrimmed) and the same italic flag.
pub fn validate(draft: &[Segment], target: &[Segment]) -> Verdict {
    if draft.len() == target.len() && draft.iter().zip(target).all(|(d, t)| d.same_fragment(t)) {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}
