//! Game settings
//!
//! Supplied once at game construction; there is no saved copy between sessions.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable rules and input tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Input ===
    /// Pixels beyond the workspace edges that still count as inside on release
    pub drop_buffer: f32,

    // === Rules ===
    /// Lives at the start of a game
    pub starting_lives: u8,
    /// Points for a correct citation
    pub base_points: u64,
    /// Extra points per step of the current streak
    pub streak_bonus: u64,
    /// Seconds before play resumes after a wrong submission
    pub failure_delay_secs: f32,

    /// RNG seed for puzzle choice and pool shuffle (None = host picks one)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            drop_buffer: DROP_BUFFER,
            starting_lives: STARTING_LIVES,
            base_points: BASE_POINTS,
            streak_bonus: STREAK_BONUS,
            failure_delay_secs: FAILURE_DELAY_SECS,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse overrides, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Points awarded for a correct citation given the streak before it
    pub fn award_for(&self, streak: u32) -> u64 {
        self.base_points + u64::from(streak) * self.streak_bonus
    }
}
