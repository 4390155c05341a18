//! Game session: board, counters, selection and deferred actions.
//!
//! A `Session` owns everything one game needs and turns player events (tap,
//! hint, shuffle) into engine calls. Time never passes on its own: the caller
//! drives the clock with `advance(elapsed_ms)`, which counts down the time
//! budget and fires scheduled tasks (combo reset, clearing a failed
//! selection, hiding a hint, reshuffling a stalemated board) in due order.
//! Each task is identified by a `TaskId` and can be cancelled before it fires.
use crate::config::{
    Difficulty, DifficultyConfig, AUTO_SHUFFLE_DELAY_MS, BASE_SCORE, COMBO_RESET_MS,
    HINT_HIGHLIGHT_MS, INITIAL_HINTS, INITIAL_SHUFFLES, MISMATCH_CLEAR_MS,
};
use crate::engine::{can_match, check_game_over, remove_tiles, Board, Point};
use crate::error::EngineError;
use crate::generator::{generate, shuffle_board};
use crate::scanner::{find_hint, has_available_match};
use crate::scoring::{calculate_score, COMBO_RESET_VALUE};
use crate::vlog;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Reshuffles tried on a dealt board before dealing a new one.
const DEAL_RESHUFFLE_LIMIT: usize = 16;

/// Fresh deals tried before accepting a stalemated board.
const DEAL_ATTEMPT_LIMIT: usize = 8;

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ready,
    Playing,
    Paused,
    Won,
    Lost,
}

/// Up to two tiles the player has picked, in pick order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    points: Vec<Point>,
}

impl Selection {
    pub const CAPACITY: usize = 2;

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= Self::CAPACITY
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    /// Adds `p` unless the selection is full or already holds it.
    pub fn push(&mut self, p: Point) -> bool {
        if self.is_full() || self.contains(p) {
            return false;
        }
        self.points.push(p);
        true
    }

    pub fn remove(&mut self, p: Point) -> bool {
        let before = self.points.len();
        self.points.retain(|&q| q != p);
        self.points.len() != before
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// The two picked tiles, once the selection is full.
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.points.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}

/// Handle to a scheduled task.
pub type TaskId = u64;

/// Deferred actions a session can schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    ClearSelection,
    ResetCombo,
    ClearHint(Point, Point),
    AutoShuffle,
}

#[derive(Clone, Debug)]
struct ScheduledTask {
    id: TaskId,
    due_ms: u64,
    kind: TaskKind,
}

/// A manual clock with cancellable one-shot tasks.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: TaskId,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedules `kind` to fire `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, kind: TaskKind) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due_ms: self.now_ms + delay_ms,
            kind,
        });
        id
    }

    /// Cancels a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn task_kind(&self, id: TaskId) -> Option<TaskKind> {
        self.tasks.iter().find(|t| t.id == id).map(|t| t.kind)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Milliseconds until the earliest pending task is due.
    pub fn next_due_in(&self) -> Option<u64> {
        self.tasks
            .iter()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Moves the clock forward and returns the tasks that came due, earliest
    /// first. Tasks due at the same instant fire in scheduling order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<(TaskId, TaskKind)> {
        self.now_ms += elapsed_ms;
        let now = self.now_ms;
        let mut due: Vec<ScheduledTask> = Vec::new();
        self.tasks.retain(|t| {
            if t.due_ms <= now {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_unstable_by_key(|t| (t.due_ms, t.id));
        due.into_iter().map(|t| (t.id, t.kind)).collect()
    }
}

/// What happened after a successful match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterMatch {
    /// Play continues; at least one pair is still removable.
    Continue,
    /// The board is cleared and the game is won.
    Won,
    /// Tiles remain but none can be paired; a reshuffle is scheduled.
    Stalemate,
}

/// Result of a tap on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// The game is not running or the cell is empty.
    Ignored,
    Selected(Point),
    Deselected(Point),
    Matched {
        first: Point,
        second: Point,
        points: u64,
        combo: u32,
        after: AfterMatch,
    },
    /// The pair cannot be removed; the selection clears shortly.
    Mismatched { first: Point, second: Point },
}

/// Result of a hint request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    /// Not playing, or no hints left.
    Unavailable,
    /// No removable pair exists; no hint was spent.
    NoMatch,
    Shown(Point, Point),
}

/// Things that happened while the clock advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SelectionCleared,
    ComboReset,
    HintExpired,
    AutoShuffled,
    TimeUp,
}

/// Totals across finished games, kept in memory only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameStats {
    pub total_games: u32,
    pub wins: u32,
    pub high_score: u64,
    pub total_time_secs: u64,
}

impl GameStats {
    pub fn record(&mut self, won: bool, score: u64, elapsed_secs: u64) {
        self.total_games += 1;
        if won {
            self.wins += 1;
        }
        self.high_score = self.high_score.max(score);
        self.total_time_secs += elapsed_secs;
    }
}

/// One player's game.
#[derive(Clone, Debug)]
pub struct Session {
    config: DifficultyConfig,
    board: Board,
    status: GameStatus,
    score: u64,
    combo: u32,
    hints: u32,
    shuffles: u32,
    time_left_ms: u64,
    elapsed_ms: u64,
    selection: Selection,
    scheduler: Scheduler,
    pending_clear: Option<TaskId>,
    combo_timer: Option<TaskId>,
    hint_timer: Option<TaskId>,
    auto_shuffle: Option<TaskId>,
    stats: GameStats,
    /// Board given to `start_with_board`, replayed by `restart`.
    custom_board: Option<Board>,
    rng: SmallRng,
}

impl Session {
    /// Creates a session for a preset. The board is dealt on `start`.
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Session::with_config(difficulty.config(), seed)
    }

    pub fn with_config(config: DifficultyConfig, seed: u64) -> Self {
        Session {
            config,
            board: Board::new_empty(config.rows, config.cols),
            status: GameStatus::Ready,
            score: 0,
            combo: COMBO_RESET_VALUE,
            hints: INITIAL_HINTS,
            shuffles: INITIAL_SHUFFLES,
            time_left_ms: u64::from(config.time_limit_secs) * 1000,
            elapsed_ms: 0,
            selection: Selection::default(),
            scheduler: Scheduler::new(),
            pending_clear: None,
            combo_timer: None,
            hint_timer: None,
            auto_shuffle: None,
            stats: GameStats::default(),
            custom_board: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn hints(&self) -> u32 {
        self.hints
    }

    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    pub fn time_left_ms(&self) -> u64 {
        self.time_left_ms
    }

    /// Remaining time in whole seconds, rounded up.
    pub fn time_left_secs(&self) -> u64 {
        self.time_left_ms.div_ceil(1000)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Deals a new board and starts the clock.
    ///
    /// The dealt board is reshuffled until a removable pair exists. If that
    /// keeps failing a new board is dealt; after repeated failures the board
    /// is accepted as is and the stalemate is left to the auto-reshuffle.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.custom_board = None;
        let board = self.deal()?;
        self.begin(board);
        Ok(())
    }

    /// Starts the clock on a caller-supplied board, without reshuffling it.
    ///
    /// The difficulty config keeps governing the time budget. Later restarts
    /// replay this board until `start` deals a preset one again.
    pub fn start_with_board(&mut self, board: Board) {
        self.custom_board = Some(board.clone());
        self.begin(board);
    }

    /// Resets every counter and rebuilds the board: a copy of the board
    /// passed to `start_with_board`, or else a fresh deal.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        vlog!("restarting session");
        let board = match self.custom_board.clone() {
            Some(board) => board,
            None => self.deal()?,
        };
        self.begin(board);
        Ok(())
    }

    /// Abandons the game and returns to `Ready`. Pending tasks are dropped.
    pub fn exit(&mut self) {
        self.scheduler.cancel_all();
        self.forget_timers();
        self.selection.clear();
        self.board.clear_selection();
        self.set_status(GameStatus::Ready);
    }

    /// Stops the clock. Returns false unless the game was running.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.set_status(GameStatus::Paused);
        true
    }

    /// Restarts the clock after `pause`.
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.set_status(GameStatus::Playing);
        true
    }

    /// Handles a tap on the cell at `p`.
    ///
    /// # Errors
    /// `EngineError::OutOfBounds` if `p` is off the grid.
    pub fn tap(&mut self, p: Point) -> Result<TapOutcome, EngineError> {
        let tile = *self.board.tile(p)?;
        if self.status != GameStatus::Playing || tile.is_empty() {
            return Ok(TapOutcome::Ignored);
        }

        if let Some(id) = self.pending_clear.take() {
            self.scheduler.cancel(id);
            self.clear_selection();
        }

        if self.selection.contains(p) {
            self.selection.remove(p);
            self.board.set_selected(p, false)?;
            vlog!("deselected {}", p);
            return Ok(TapOutcome::Deselected(p));
        }

        self.selection.push(p);
        self.board.set_selected(p, true)?;
        let Some((first, second)) = self.selection.pair() else {
            vlog!("selected {} (icon {})", p, tile.icon());
            return Ok(TapOutcome::Selected(p));
        };

        if can_match(&self.board, first, second)? {
            self.apply_match(first, second)
        } else {
            vlog!("no match between {} and {}", first, second);
            self.pending_clear = Some(
                self.scheduler
                    .schedule(MISMATCH_CLEAR_MS, TaskKind::ClearSelection),
            );
            Ok(TapOutcome::Mismatched { first, second })
        }
    }

    /// Highlights a removable pair, spending one hint if one is found.
    pub fn request_hint(&mut self) -> HintOutcome {
        if self.status != GameStatus::Playing || self.hints == 0 {
            return HintOutcome::Unavailable;
        }
        let Some((a, b)) = find_hint(&self.board) else {
            vlog!("hint requested but no pair is removable");
            return HintOutcome::NoMatch;
        };

        self.expire_hint();
        let (a, b) = (a.position(), b.position());
        self.highlight(a, true);
        self.highlight(b, true);
        self.hints -= 1;
        self.hint_timer = Some(
            self.scheduler
                .schedule(HINT_HIGHLIGHT_MS, TaskKind::ClearHint(a, b)),
        );
        vlog!("hint {} - {}, {} hints left", a, b, self.hints);
        HintOutcome::Shown(a, b)
    }

    /// Reshuffles the board on request, spending one shuffle.
    pub fn request_shuffle(&mut self) -> bool {
        if self.status != GameStatus::Playing || self.shuffles == 0 {
            return false;
        }
        if let Some(id) = self.pending_clear.take() {
            self.scheduler.cancel(id);
        }
        self.clear_selection();
        self.expire_hint();
        shuffle_board(&mut self.board, &mut self.rng);
        self.shuffles -= 1;
        vlog!("manual shuffle, {} shuffles left", self.shuffles);
        true
    }

    /// Moves time forward by `elapsed_ms`.
    ///
    /// Nothing happens unless the game is running. Scheduled tasks fire in due
    /// order; tasks due after the time budget runs out never fire.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let mut remaining = elapsed_ms;

        while self.status == GameStatus::Playing {
            let mut step = remaining.min(self.time_left_ms);
            if let Some(due_in) = self.scheduler.next_due_in() {
                step = step.min(due_in);
            }

            let fired = self.scheduler.advance(step);
            remaining -= step;
            self.time_left_ms -= step;
            self.elapsed_ms += step;

            for (id, kind) in &fired {
                if let Some(event) = self.run_task(*id, *kind) {
                    events.push(event);
                }
            }

            if self.time_left_ms == 0 && self.status == GameStatus::Playing {
                vlog!("time is up with {} tiles left", self.board.occupied_count());
                self.finish(false);
                events.push(SessionEvent::TimeUp);
                break;
            }
            if remaining == 0 && self.scheduler.next_due_in() != Some(0) {
                break;
            }
            if step == 0 && fired.is_empty() {
                break;
            }
        }
        events
    }

    fn deal(&mut self) -> Result<Board, EngineError> {
        let mut board = generate(&self.config, &mut self.rng)?;
        for attempt in 0..DEAL_ATTEMPT_LIMIT {
            for _ in 0..DEAL_RESHUFFLE_LIMIT {
                if has_available_match(&board) {
                    return Ok(board);
                }
                shuffle_board(&mut board, &mut self.rng);
            }
            vlog!("deal attempt {} stayed stalemated, dealing again", attempt + 1);
            board = generate(&self.config, &mut self.rng)?;
        }
        Ok(board)
    }

    fn begin(&mut self, board: Board) {
        self.scheduler.cancel_all();
        self.forget_timers();
        self.board = board;
        self.score = 0;
        self.combo = COMBO_RESET_VALUE;
        self.hints = INITIAL_HINTS;
        self.shuffles = INITIAL_SHUFFLES;
        self.time_left_ms = u64::from(self.config.time_limit_secs) * 1000;
        self.elapsed_ms = 0;
        self.selection.clear();
        self.set_status(GameStatus::Playing);
        vlog!(
            "started {}x{} game with {} tiles",
            self.board.rows(),
            self.board.cols(),
            self.board.occupied_count()
        );
    }

    fn apply_match(&mut self, first: Point, second: Point) -> Result<TapOutcome, EngineError> {
        remove_tiles(&mut self.board, first, second)?;
        self.selection.clear();

        self.combo += 1;
        let combo = self.combo;
        let points = calculate_score(BASE_SCORE, combo, 0);
        self.score = self.score.saturating_add(points);
        if let Some(id) = self.combo_timer.take() {
            self.scheduler.cancel(id);
        }
        self.combo_timer = Some(self.scheduler.schedule(COMBO_RESET_MS, TaskKind::ResetCombo));
        vlog!(
            "matched {} - {}: +{} (combo {}), score {}",
            first,
            second,
            points,
            combo,
            self.score
        );

        let after = if check_game_over(&self.board) {
            self.finish(true);
            AfterMatch::Won
        } else if !has_available_match(&self.board) {
            vlog!("stalemate, reshuffling in {} ms", AUTO_SHUFFLE_DELAY_MS);
            if self.auto_shuffle.is_none() {
                self.auto_shuffle = Some(
                    self.scheduler
                        .schedule(AUTO_SHUFFLE_DELAY_MS, TaskKind::AutoShuffle),
                );
            }
            AfterMatch::Stalemate
        } else {
            AfterMatch::Continue
        };

        Ok(TapOutcome::Matched {
            first,
            second,
            points,
            combo,
            after,
        })
    }

    fn run_task(&mut self, id: TaskId, kind: TaskKind) -> Option<SessionEvent> {
        match kind {
            TaskKind::ClearSelection => {
                if self.pending_clear == Some(id) {
                    self.pending_clear = None;
                }
                self.clear_selection();
                Some(SessionEvent::SelectionCleared)
            }
            TaskKind::ResetCombo => {
                if self.combo_timer == Some(id) {
                    self.combo_timer = None;
                }
                self.combo = COMBO_RESET_VALUE;
                vlog!("combo reset");
                Some(SessionEvent::ComboReset)
            }
            TaskKind::ClearHint(a, b) => {
                if self.hint_timer == Some(id) {
                    self.hint_timer = None;
                }
                self.highlight(a, false);
                self.highlight(b, false);
                Some(SessionEvent::HintExpired)
            }
            TaskKind::AutoShuffle => {
                self.auto_shuffle = None;
                self.clear_selection();
                for _ in 0..DEAL_RESHUFFLE_LIMIT {
                    shuffle_board(&mut self.board, &mut self.rng);
                    if has_available_match(&self.board) {
                        break;
                    }
                }
                vlog!("auto reshuffle done");
                Some(SessionEvent::AutoShuffled)
            }
        }
    }

    /// Cancels a showing hint and removes its highlight.
    fn expire_hint(&mut self) {
        if let Some(id) = self.hint_timer.take() {
            let hinted = self.scheduler.task_kind(id);
            self.scheduler.cancel(id);
            if let Some(TaskKind::ClearHint(a, b)) = hinted {
                self.highlight(a, false);
                self.highlight(b, false);
            }
        }
    }

    /// Sets a tile's highlight, keeping tiles the player selected lit.
    fn highlight(&mut self, p: Point, on: bool) {
        if !on && self.selection.contains(p) {
            return;
        }
        // Hinted positions come from the board, so they are in bounds.
        let _ = self.board.set_selected(p, on);
    }

    fn clear_selection(&mut self) {
        for p in self.selection.points().to_vec() {
            let _ = self.board.set_selected(p, false);
        }
        self.selection.clear();
    }

    fn forget_timers(&mut self) {
        self.pending_clear = None;
        self.combo_timer = None;
        self.hint_timer = None;
        self.auto_shuffle = None;
    }

    fn finish(&mut self, won: bool) {
        self.scheduler.cancel_all();
        self.forget_timers();
        self.stats.record(won, self.score, self.elapsed_ms / 1000);
        self.set_status(if won { GameStatus::Won } else { GameStatus::Lost });
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status != status {
            vlog!("status {:?} -> {:?}", self.status, status);
            self.status = status;
        }
    }
}
