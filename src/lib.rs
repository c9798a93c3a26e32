//! Bluebook Blitz - a legal citation tile puzzle
//!
//! Core modules:
//! - `game`: Platform-free puzzle core (pool/draft store, drag controller, validator, rounds)
//! - `catalog`: Bundled puzzle catalog and random puzzle provider
//! - `settings`: Tunable game configuration

pub mod catalog;
pub mod game;
pub mod settings;

pub use catalog::{Catalog, CatalogError, PuzzleProvider};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Lives at the start of every game
    pub const STARTING_LIVES: u8 = 3;
    /// Points for a correct citation before the streak bonus
    pub const BASE_POINTS: u64 = 100;
    /// Extra points per consecutive correct citation already in the streak
    pub const STREAK_BONUS: u64 = 10;
    /// Seconds the Failure verdict stays on screen before play resumes
    pub const FAILURE_DELAY_SECS: f32 = 1.5;
    /// Tolerance (px) beyond the workspace edges that still counts as inside
    pub const DROP_BUFFER: f32 = 50.0;

    pub const FEEDBACK_CORRECT: &str = "SUSTAINED! Perfect citation.";
    pub const FEEDBACK_INCORRECT: &str = "OBJECTION! Incorrect formatting or order.";
    pub const FEEDBACK_REVEALED: &str = "Review the solution below.";
}
