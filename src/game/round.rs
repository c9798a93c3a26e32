//! Round and life state machine
//!
//! `Game` is the facade the presentation talks to: it owns the board, the drag
//! controller and the current puzzle, turns user intents into store
//! operations, and applies verdicts to score, lives and streak.
//!
//! Phases: Menu -> Loading -> Playing -> {Success, Failure, RoundOverLoss, GameOver}.
//! Failure returns to Playing on its own after a delay driven by `tick`.

use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::board::Board;
use super::drag::{DragController, DragSurface, HeadlessSurface};
use super::drop_zone::{DropOutcome, DropZone};
use super::geometry::Rect;
use super::hit_test::LayoutProbe;
use super::segment::{Puzzle, Segment, SegmentId, SegmentIds};
use super::validate::{Verdict, validate};
use crate::catalog::PuzzleProvider;
use crate::consts::{FEEDBACK_CORRECT, FEEDBACK_INCORRECT, FEEDBACK_REVEALED};
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen
    Menu,
    /// Fetching and laying out a puzzle
    Loading,
    /// Tiles can be moved and the draft submitted
    Playing,
    /// Draft was correct, waiting for "next"
    Success,
    /// Draft was wrong, play resumes after a delay
    Failure,
    /// Answer was revealed, waiting for "next"
    RoundOverLoss,
    /// Out of lives
    GameOver,
}

/// Scheduled Failure -> Playing transition
#[derive(Debug, Clone, Copy)]
struct PendingResume {
    /// Phase epoch the resume was scheduled in
    epoch: u64,
    remaining_secs: f32,
}

/// Read-only view for rendering
#[derive(Debug, Clone)]
pub struct GameView<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub streak: u32,
    pub feedback: Option<&'static str>,
    pub description: Option<&'a str>,
    pub hint: Option<&'a str>,
    pub pool: Rc<Vec<Segment>>,
    pub draft: Rc<Vec<Segment>>,
    /// Placeholder slots still to fill
    pub empty_slots: usize,
    pub can_submit: bool,
    /// Tile being dragged (drawn hidden in the draft)
    pub dragging: Option<SegmentId>,
    /// Box of the floating drag visual
    pub drag_visual: Option<Rect>,
}

pub struct Game<S: DragSurface = HeadlessSurface> {
    settings: Settings,
    provider: Box<dyn PuzzleProvider>,
    rng: Pcg32,
    ids: SegmentIds,
    board: Board,
    drag: DragController<S>,
    puzzle: Option<Puzzle>,
    phase: GamePhase,
    score: u64,
    lives: u8,
    streak: u32,
    feedback: Option<&'static str>,
    /// Bumped on every phase change
    epoch: u64,
    resume: Option<PendingResume>,
}

impl<S: DragSurface> Game<S> {
    pub fn new(settings: Settings, provider: Box<dyn PuzzleProvider>, surface: S) -> Self {
        let seed = settings.seed.unwrap_or_default();
        Self {
            lives: settings.starting_lives,
            settings,
            provider,
            rng: Pcg32::seed_from_u64(seed),
            ids: SegmentIds::default(),
            board: Board::new(),
            drag: DragController::new(surface),
            puzzle: None,
            phase: GamePhase::Menu,
            score: 0,
            streak: 0,
            feedback: None,
            epoch: 0,
            resume: None,
        }
    }

    // === Read access ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn feedback(&self) -> Option<&'static str> {
        self.feedback
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag(&self) -> &DragController<S> {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Target length minus draft length, floored at zero
    pub fn empty_slots(&self) -> usize {
        self.puzzle
            .as_ref()
            .map_or(0, |p| p.correct.len().saturating_sub(self.board.draft().len()))
    }

    pub fn can_submit(&self) -> bool {
        self.phase == GamePhase::Playing && !self.board.draft().is_empty()
    }

    /// "next" from here ends the game
    pub fn next_leads_to_game_over(&self) -> bool {
        self.lives == 0
    }

    pub fn view(&self) -> GameView<'_> {
        let session = self.drag.session();
        GameView {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            streak: self.streak,
            feedback: self.feedback,
            description: self.puzzle.as_ref().map(|p| p.description.as_str()),
            hint: self.puzzle.as_ref().map(|p| p.hint.as_str()),
            pool: self.board.pool_snapshot(),
            draft: self.board.draft_snapshot(),
            empty_slots: self.empty_slots(),
            can_submit: self.can_submit(),
            dragging: session.map(|s| s.segment_id()),
            drag_visual: session
                .zip(self.drag.visual_top_left())
                .map(|(s, top_left)| s.origin.moved_to(top_left)),
        }
    }

    // === Round transitions ===

    /// Reset score, lives and streak and lay out a fresh puzzle
    pub fn start_game(&mut self) {
        self.drag.cancel();
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.streak = 0;
        log::info!("New game ({} lives)", self.lives);
        self.load_puzzle();
    }

    /// Leave Success or RoundOverLoss
    pub fn next_round(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Success | GamePhase::RoundOverLoss) {
            log::debug!("next ignored in {:?}", self.phase);
            return false;
        }
        if self.lives == 0 {
            self.game_over();
        } else {
            self.load_puzzle();
        }
        true
    }

    /// Check the draft. Returns `None` when the submission is rejected
    /// (not playing, or nothing in the draft).
    pub fn submit(&mut self) -> Option<Verdict> {
        if !self.can_submit() {
            log::debug!(
                "submit rejected in {:?} with {} drafted",
                self.phase,
                self.board.draft().len()
            );
            return None;
        }
        let puzzle = self.puzzle.as_ref()?;
        self.drag.cancel();

        let verdict = validate(self.board.draft(), &puzzle.correct);
        match verdict {
            Verdict::Correct => {
                let award = self.settings.award_for(self.streak);
                self.score += award;
                self.streak += 1;
                self.feedback = Some(FEEDBACK_CORRECT);
                log::info!("Correct: +{} (score {}, streak {})", award, self.score, self.streak);
                self.set_phase(GamePhase::Success);
            }
            Verdict::Incorrect => {
                self.lose_life();
                self.feedback = Some(FEEDBACK_INCORRECT);
                log::info!("Incorrect: {} lives left", self.lives);
                if self.lives == 0 {
                    self.game_over();
                } else {
                    self.set_phase(GamePhase::Failure);
                    self.resume = Some(PendingResume {
                        epoch: self.epoch,
                        remaining_secs: self.settings.failure_delay_secs,
                    });
                }
            }
        }
        Some(verdict)
    }

    /// Show the answer at the cost of a life; the round ends
    pub fn reveal_answer(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let Some(puzzle) = self.puzzle.as_ref() else {
            return false;
        };
        self.drag.cancel();

        let answer = puzzle.reissue_answer(&mut self.ids);
        self.board.replace_draft(answer);
        self.lose_life();
        self.feedback = Some(FEEDBACK_REVEALED);
        log::info!("Answer revealed: {} lives left", self.lives);
        self.set_phase(GamePhase::RoundOverLoss);
        true
    }

    /// Advance timers by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let Some(mut pending) = self.resume.take() else {
            return;
        };
        if pending.epoch != self.epoch || self.phase != GamePhase::Failure {
            log::debug!("stale resume dropped");
            return;
        }
        pending.remaining_secs -= dt;
        if pending.remaining_secs > 0.0 {
            self.resume = Some(pending);
            return;
        }
        self.feedback = None;
        self.set_phase(GamePhase::Playing);
    }

    // === Tile intents ===

    /// Click-to-add: move a pool tile to the end of the draft
    pub fn add_to_draft(&mut self, id: SegmentId) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.board.move_to_draft(id)
    }

    /// Pointer-down on a draft tile. `origin` is the tile's box as rendered.
    pub fn pick_up(&mut self, id: SegmentId, origin: Rect, press: Vec2) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let Some(segment) = self.board.draft_segment(id) else {
            log::debug!("pick-up of {} ignored, not in draft", id);
            return false;
        };
        self.drag.pick_up(segment, origin, press)
    }

    /// Pointer moved during a drag
    pub fn pointer_moved(&mut self, pointer: Vec2, layout: &impl LayoutProbe) -> Option<(usize, usize)> {
        self.drag.pointer_moved(pointer, &mut self.board, layout)
    }

    /// Pointer released. `workspace` is the draft area's box as rendered.
    pub fn released(&mut self, pointer: Vec2, workspace: Rect) -> Option<DropOutcome> {
        let zone = DropZone::new(workspace, self.settings.drop_buffer);
        self.drag.release(pointer, &mut self.board, &zone)
    }

    /// The host took the pointer away mid-drag: end the session, board untouched
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    // === Internals ===

    fn load_puzzle(&mut self) {
        self.set_phase(GamePhase::Loading);
        let template = self.provider.random_puzzle();
        let puzzle = Puzzle::from_template(&template, &mut self.ids);

        let mut tiles: Vec<Segment> = puzzle.tiles().cloned().collect();
        tiles.shuffle(&mut self.rng);
        self.board.seed(tiles);
        log::info!(
            "Puzzle: {} ({} tiles, {} in answer)",
            puzzle.description,
            self.board.pool().len(),
            puzzle.correct.len()
        );

        self.puzzle = Some(puzzle);
        self.feedback = None;
        self.set_phase(GamePhase::Playing);
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.streak = 0;
    }

    fn game_over(&mut self) {
        log::info!("Game over: final score {}", self.score);
        self.set_phase(GamePhase::GameOver);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.epoch += 1;
        self.resume = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::hit_test::LayoutSnapshot;
    use crate::game::segment::{Fragment, PuzzleTemplate};
    use proptest::prelude::*;
    use std::collections::HashSet;

    struct Fixed(PuzzleTemplate);

    impl PuzzleProvider for Fixed {
        fn random_puzzle(&mut self) -> PuzzleTemplate {
            self.0.clone()
        }
    }

    fn miranda() -> PuzzleTemplate {
        let f = |t: &str, i: bool| Fragment::new(t, i);
        PuzzleTemplate {
            description: "Cite Miranda v. Arizona".to_string(),
            correct: vec![
                f("Miranda", true),
                f("v.", true),
                f("Arizona", true),
                f(",", false),
                f("384", false),
                f("U.S.", false),
                f("436", false),
                f("(1966)", false),
            ],
            distractors: vec![f("vs.", false), f("US", false), f("385", false)],
            hint: "The case name is italicized.".to_string(),
        }
    }

    fn new_game() -> Game {
        let settings = Settings {
            seed: Some(3),
            ..Settings::default()
        };
        Game::new(settings, Box::new(Fixed(miranda())), HeadlessSurface::default())
    }

    fn started() -> Game {
        let mut game = new_game();
        game.start_game();
        game
    }

    fn correct_ids(game: &Game) -> Vec<SegmentId> {
        game.puzzle().unwrap().correct.iter().map(|s| s.id).collect()
    }

    fn solve(game: &mut Game) {
        for id in correct_ids(game) {
            assert!(game.add_to_draft(id));
        }
    }

    fn draft_one_wrong(game: &mut Game) {
        let wrong = game.puzzle().unwrap().distractors[0].id;
        assert!(game.add_to_draft(wrong));
    }

    const WORKSPACE: Rect = Rect {
        min: Vec2::new(0.0, 0.0),
        max: Vec2::new(600.0, 100.0),
    };
    const TILE: Vec2 = Vec2::new(50.0, 20.0);

    fn layout(game: &Game) -> LayoutSnapshot {
        LayoutSnapshot::row(game.board().draft(), Vec2::new(10.0, 10.0), TILE, 4.0)
    }

    #[test]
    fn test_start_lays_out_pool() {
        let mut game = new_game();
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(!game.add_to_draft(SegmentId(1)));

        game.start_game();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!((game.score(), game.lives(), game.streak()), (0, 3, 0));
        assert_eq!(game.board().pool().len(), 11);
        assert!(game.board().draft().is_empty());
        assert_eq!(game.empty_slots(), 8);
        assert!(!game.can_submit());
    }

    #[test]
    fn test_correct_submission_scores_with_streak() {
        let mut game = started();
        let mut scores = Vec::new();
        for _ in 0..3 {
            solve(&mut game);
            assert_eq!(game.submit(), Some(Verdict::Correct));
            assert_eq!(game.phase(), GamePhase::Success);
            assert_eq!(game.feedback(), Some(FEEDBACK_CORRECT));
            scores.push(game.score());
            assert!(game.next_round());
            assert_eq!(game.phase(), GamePhase::Playing);
            assert!(game.feedback().is_none());
        }
        // 100, then 100 + 10, then 100 + 2 * 10
        assert_eq!(scores, vec![100, 210, 330]);
        assert_eq!(game.streak(), 3);
        assert_eq!(game.lives(), 3);
    }

    #[test]
    fn test_three_wrong_submissions_end_the_game() {
        let mut game = started();
        draft_one_wrong(&mut game);
        for expected_lives in [2, 1] {
            assert_eq!(game.submit(), Some(Verdict::Incorrect));
            assert_eq!(game.phase(), GamePhase::Failure);
            assert_eq!(game.lives(), expected_lives);
            game.tick(1.5);
            assert_eq!(game.phase(), GamePhase::Playing);
        }
        assert_eq!(game.submit(), Some(Verdict::Incorrect));
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.lives(), 0);

        game.tick(5.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(!game.next_round());
        assert!(game.submit().is_none());
    }

    #[test]
    fn test_wrong_submission_resets_streak() {
        let mut game = started();
        solve(&mut game);
        game.submit();
        game.next_round();
        assert_eq!(game.streak(), 1);

        draft_one_wrong(&mut game);
        game.submit();
        assert_eq!(game.streak(), 0);
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn test_failure_resumes_after_delay() {
        let mut game = started();
        draft_one_wrong(&mut game);
        game.submit();
        assert_eq!(game.feedback(), Some(FEEDBACK_INCORRECT));
        assert!(!game.add_to_draft(game.board().pool()[0].id));

        game.tick(1.0);
        assert_eq!(game.phase(), GamePhase::Failure);
        game.tick(0.6);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.feedback().is_none());
        // Draft is kept for another try
        assert_eq!(game.board().draft().len(), 1);
    }

    #[test]
    fn test_restart_discards_pending_resume() {
        let mut game = started();
        draft_one_wrong(&mut game);
        game.submit();
        assert_eq!(game.phase(), GamePhase::Failure);

        game.start_game();
        solve(&mut game);
        assert_eq!(game.submit(), Some(Verdict::Correct));
        assert_eq!(game.phase(), GamePhase::Success);

        // The Failure timer from the previous game must not fire into this one
        game.tick(2.0);
        assert_eq!(game.phase(), GamePhase::Success);
        assert_eq!(game.feedback(), Some(FEEDBACK_CORRECT));
        assert_eq!(game.lives(), 3);
    }

    #[test]
    fn test_empty_submit_is_rejected() {
        let mut game = started();
        assert!(game.submit().is_none());
        assert_eq!(game.lives(), 3);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_reveal_costs_a_life_and_shows_answer() {
        let mut game = started();
        draft_one_wrong(&mut game);
        let before: HashSet<SegmentId> = game.puzzle().unwrap().tiles().map(|s| s.id).collect();

        assert!(game.reveal_answer());
        assert_eq!(game.phase(), GamePhase::RoundOverLoss);
        assert_eq!(game.lives(), 2);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.feedback(), Some(FEEDBACK_REVEALED));

        let target = &game.puzzle().unwrap().correct;
        assert_eq!(validate(game.board().draft(), target), Verdict::Correct);
        assert!(game.board().draft().iter().all(|s| !before.contains(&s.id)));
        assert!(!game.reveal_answer());
    }

    #[test]
    fn test_reveal_on_last_life_waits_for_next() {
        let mut game = started();
        draft_one_wrong(&mut game);
        game.submit();
        game.tick(2.0);
        game.submit();
        game.tick(2.0);
        assert_eq!(game.lives(), 1);

        assert!(game.reveal_answer());
        assert_eq!(game.phase(), GamePhase::RoundOverLoss);
        assert_eq!(game.lives(), 0);
        assert!(game.next_leads_to_game_over());

        assert!(game.next_round());
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.start_game();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!((game.score(), game.lives(), game.streak()), (0, 3, 0));
    }

    #[test]
    fn test_next_round_issues_new_tiles() {
        let mut game = started();
        let first: HashSet<SegmentId> = game.puzzle().unwrap().tiles().map(|s| s.id).collect();
        solve(&mut game);
        game.submit();
        game.next_round();

        assert!(game.board().draft().is_empty());
        assert_eq!(game.board().pool().len(), 11);
        assert!(game.board().pool().iter().all(|s| !first.contains(&s.id)));
    }

    #[test]
    fn test_drag_reorders_and_drop_outside_returns_tile() {
        let mut game = started();
        let ids = correct_ids(&game);
        for &id in &ids[..3] {
            game.add_to_draft(id);
        }

        // Pool tiles are not draggable
        let pool_id = game.board().pool()[0].id;
        assert!(!game.pick_up(pool_id, Rect::default(), Vec2::ZERO));

        let l = layout(&game);
        let origin = l.bounds(ids[0]).unwrap();
        assert!(game.pick_up(ids[0], origin, origin.min + Vec2::new(5.0, 5.0)));
        assert!(!game.pick_up(ids[1], l.bounds(ids[1]).unwrap(), Vec2::ZERO));

        let over_last = l.bounds(ids[2]).unwrap().min + Vec2::new(5.0, 5.0);
        assert_eq!(game.pointer_moved(over_last, &l), Some((0, 2)));
        let view = game.view();
        assert_eq!(view.dragging, Some(ids[0]));
        assert_eq!(view.drag_visual.unwrap().top_left(), over_last - Vec2::new(5.0, 5.0));

        assert_eq!(
            game.released(Vec2::new(2000.0, 50.0), WORKSPACE),
            Some(DropOutcome::ReturnedToPool)
        );
        let draft: Vec<SegmentId> = game.board().draft().iter().map(|s| s.id).collect();
        assert_eq!(draft, vec![ids[1], ids[2]]);
        assert!(game.board().in_pool(ids[0]));
        assert!(game.view().drag_visual.is_none());

        let surface = game.drag().surface();
        assert_eq!((surface.acquired, surface.released), (1, 1));
    }

    #[test]
    fn test_release_inside_buffer_keeps_tile() {
        let mut game = started();
        let ids = correct_ids(&game);
        game.add_to_draft(ids[0]);
        game.add_to_draft(ids[1]);

        let l = layout(&game);
        let origin = l.bounds(ids[1]).unwrap();
        game.pick_up(ids[1], origin, origin.min + Vec2::ONE);
        // 30px past the right edge: inside the 50px buffer
        assert_eq!(game.released(Vec2::new(630.0, 50.0), WORKSPACE), Some(DropOutcome::Kept));
        assert_eq!(game.board().draft().len(), 2);
    }

    #[test]
    fn test_cancelled_drag_leaves_draft_and_frees_pointer() {
        let mut game = started();
        let ids = correct_ids(&game);
        for &id in &ids[..3] {
            game.add_to_draft(id);
        }

        let l = layout(&game);
        let origin = l.bounds(ids[0]).unwrap();
        assert!(game.pick_up(ids[0], origin, origin.min + Vec2::ONE));
        assert_eq!(game.pointer_moved(l.bounds(ids[2]).unwrap().min + Vec2::ONE, &l), Some((0, 2)));

        assert!(game.cancel_drag());
        assert!(!game.cancel_drag());
        assert!(!game.is_dragging());
        // Reorders made during the drag stand, nothing goes back to the pool
        let draft: Vec<SegmentId> = game.board().draft().iter().map(|s| s.id).collect();
        assert_eq!(draft, vec![ids[1], ids[2], ids[0]]);
        assert!(game.view().drag_visual.is_none());
        let surface = game.drag().surface();
        assert_eq!((surface.acquired, surface.released), (1, 1));
        assert!(!surface.listening);

        // A stray release after the cancel has no session to act on
        assert!(game.released(Vec2::new(2000.0, 50.0), WORKSPACE).is_none());
        assert_eq!(game.board().draft().len(), 3);

        let l = layout(&game);
        assert!(game.pick_up(ids[1], l.bounds(ids[1]).unwrap(), Vec2::ZERO));
    }

    #[derive(Debug, Clone)]
    enum Intent {
        Add(usize),
        Drag { pick: usize, over: usize, release_outside: bool },
        Submit,
        Tick,
        Next,
        Reveal,
    }

    fn intent() -> impl Strategy<Value = Intent> {
        prop_oneof![
            3 => (0usize..16).prop_map(Intent::Add),
            3 => (0usize..16, 0usize..16, any::<bool>())
                .prop_map(|(pick, over, release_outside)| Intent::Drag { pick, over, release_outside }),
            1 => Just(Intent::Submit),
            1 => Just(Intent::Tick),
            1 => Just(Intent::Next),
            1 => Just(Intent::Reveal),
        ]
    }

    proptest! {
        #[test]
        fn prop_every_issued_tile_is_in_exactly_one_place(intents in prop::collection::vec(intent(), 0..48)) {
            let mut game = started();
            for intent in intents {
                match intent {
                    Intent::Add(i) => {
                        let pool = game.board().pool_snapshot();
                        if !pool.is_empty() {
                            game.add_to_draft(pool[i % pool.len()].id);
                        }
                    }
                    Intent::Drag { pick, over, release_outside } => {
                        let draft = game.board().draft_snapshot();
                        if !draft.is_empty() {
                            let l = layout(&game);
                            let id = draft[pick % draft.len()].id;
                            let target = draft[over % draft.len()].id;
                            let origin = l.bounds(id).unwrap();
                            game.pick_up(id, origin, origin.min + Vec2::ONE);
                            game.pointer_moved(l.bounds(target).unwrap().min + Vec2::ONE, &l);
                            let release = if release_outside { Vec2::new(-500.0, -500.0) } else { Vec2::new(300.0, 50.0) };
                            game.released(release, WORKSPACE);
                            prop_assert!(!game.is_dragging());
                        }
                    }
                    Intent::Submit => { game.submit(); }
                    Intent::Tick => game.tick(2.0),
                    Intent::Next => { game.next_round(); }
                    Intent::Reveal => { game.reveal_answer(); }
                }

                if game.phase() == GamePhase::GameOver {
                    continue;
                }
                let mut seen = HashSet::new();
                for s in game.board().pool().iter().chain(game.board().draft()) {
                    prop_assert!(seen.insert(s.id));
                }
                let puzzle = game.puzzle().unwrap();
                if game.phase() == GamePhase::RoundOverLoss {
                    // Revealed: the draft is the re-issued answer, in order
                    let draft = game.board().draft();
                    prop_assert_eq!(draft.len(), puzzle.correct.len());
                    prop_assert_eq!(validate(draft, &puzzle.correct), Verdict::Correct);
                    prop_assert!(draft.iter().all(|s| !puzzle.correct.iter().any(|c| c.id == s.id)));
                } else {
                    let issued: HashSet<SegmentId> = puzzle.tiles().map(|s| s.id).collect();
                    prop_assert_eq!(seen, issued);
                }
            }
        }
    }
}
