//! Puzzle catalog
//!
//! The bundled citation puzzles ship as JSON in `assets/puzzles.json` and are
//! embedded at build time. Selection uses a seeded RNG so a run can be replayed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::game::PuzzleTemplate;

/// Bundled catalog source
const BUNDLED_PUZZLES: &str = include_str!("../assets/puzzles.json");

/// Supplies the puzzle for each new round
pub trait PuzzleProvider {
    fn random_puzzle(&mut self) -> PuzzleTemplate;
}

/// Why a catalog could not be built
#[derive(Debug)]
pub enum CatalogError {
    /// Source is not valid catalog JSON
    Parse(serde_json::Error),
    /// No puzzles at all
    Empty,
    /// Puzzle at this index has an empty answer
    EmptyAnswer(usize),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "invalid puzzle catalog: {}", e),
            CatalogError::Empty => write!(f, "puzzle catalog is empty"),
            CatalogError::EmptyAnswer(i) => write!(f, "puzzle {} has no answer fragments", i),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

/// Fixed set of puzzles with a seeded picker
#[derive(Debug, Clone)]
pub struct Catalog {
    puzzles: Vec<PuzzleTemplate>,
    rng: Pcg32,
}

impl Catalog {
    pub fn new(puzzles: Vec<PuzzleTemplate>, seed: u64) -> Result<Self, CatalogError> {
        if puzzles.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(i) = puzzles.iter().position(|p| p.correct.is_empty()) {
            return Err(CatalogError::EmptyAnswer(i));
        }
        Ok(Self {
            puzzles,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Parse a catalog from JSON (an array of puzzle templates)
    pub fn from_json(json: &str, seed: u64) -> Result<Self, CatalogError> {
        let puzzles: Vec<PuzzleTemplate> = serde_json::from_str(json)?;
        Self::new(puzzles, seed)
    }

    /// The puzzles compiled into the game
    pub fn bundled(seed: u64) -> Result<Self, CatalogError> {
        let catalog = Self::from_json(BUNDLED_PUZZLES, seed)?;
        log::info!("Loaded {} bundled puzzles", catalog.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn puzzles(&self) -> &[PuzzleTemplate] {
        &self.puzzles
    }
}

impl PuzzleProvider for Catalog {
    fn random_puzzle(&mut self) -> PuzzleTemplate {
        let index = self.rng.random_range(0..self.puzzles.len());
        self.puzzles[index].clone()
    }
}
