use tracing::{debug, info, instrument, warn};

use crate::{Grid, GridSizeError};

use super::{
    action::{Action, InputContext},
    best_score::{BestScoreStore, StoreError},
    tile_source::TileSource,
};

/// Phase of a play session.
///
/// ```text
///            ┌──────────── Restart ─────────────┐
///            ↓                                  │
/// Init ──→ Playing ──(tile ≥ threshold)──→ Win ─┤
///            ↑  │                               │ Continue: threshold × 2
///            │  └──(no move left)────→ Over ────┤
///            └──────────────────────────────────┘
///
/// Exit is reached from Playing (Exit) and from Win/Over (anything but Continue/Restart).
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant, derive_more::Display)]
pub enum SessionState {
    #[display("init")]
    Init,
    #[display("playing")]
    Playing,
    #[display("win")]
    Win,
    #[display("over")]
    Over,
    #[display("exit")]
    Exit,
}

impl SessionState {
    /// Returns which keys are meaningful in this state.
    #[must_use]
    pub fn input_context(self) -> InputContext {
        match self {
            Self::Win | Self::Over => InputContext::Prompt,
            Self::Init | Self::Playing | Self::Exit => InputContext::Play,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Grid dimension.
    pub size: usize,
    /// Tile value that wins the game before any "continue".
    pub win_threshold: u32,
}

impl SessionConfig {
    pub const DEFAULT_WIN_THRESHOLD: u32 = 32;

    pub fn validate(&self) -> Result<(), SessionConfigError> {
        if self.size < Grid::MIN_SIZE {
            return Err(GridSizeError { size: self.size }.into());
        }
        if self.win_threshold < 4 || !self.win_threshold.is_power_of_two() {
            return Err(SessionConfigError::WinThreshold {
                value: self.win_threshold,
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: Grid::DEFAULT_SIZE,
            win_threshold: Self::DEFAULT_WIN_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionConfigError {
    #[display("{_0}")]
    Size(GridSizeError),
    #[display("win threshold must be a power of two of at least 4, got {value}")]
    #[from(ignore)]
    WinThreshold { value: u32 },
}

/// Read-only snapshot of a session for presentation.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub grid: &'a Grid,
    pub state: SessionState,
    pub best_score: u64,
    pub win_threshold: u32,
    pub store_error: Option<&'a StoreError>,
}

impl SessionView<'_> {
    #[must_use]
    pub fn score(&self) -> u64 {
        self.grid.score().points()
    }

    #[must_use]
    pub fn input_context(&self) -> InputContext {
        self.state.input_context()
    }
}

/// Supplier of player actions for [`Session::run`].
///
/// The source sees the session before each read so it can render it and decode keys in the
/// right [`InputContext`]. Keys without meaning should be skipped by the source rather than
/// reported.
pub trait ActionSource {
    type Error;

    /// Returns the next action, or `None` when no more input will arrive.
    ///
    /// An exhausted source ends the session as if [`Action::Exit`] had been played.
    fn next_action(&mut self, view: &SessionView<'_>) -> Result<Option<Action>, Self::Error>;
}

/// A play session: the grid, the state machine around it, and the best score.
///
/// The session starts in [`SessionState::Init`]. [`Self::step`] applies one action and
/// returns the new state; [`Self::run`] drives the session from an [`ActionSource`] until
/// it exits.
///
/// # Example
///
/// ```
/// use tilemerge_engine::{
///     Action, MemoryStore, ScriptedTiles, Session, SessionConfig, SessionState,
/// };
///
/// let tiles = ScriptedTiles::new(vec![0], vec![2]);
/// let mut session = Session::new(SessionConfig::default(), MemoryStore::new(), tiles).unwrap();
/// assert_eq!(session.state(), SessionState::Init);
///
/// session.initialize();
/// assert_eq!(session.state(), SessionState::Playing);
/// assert_eq!(session.grid().rows().next().unwrap(), [2, 2, 0, 0]);
///
/// session.step(Action::LEFT);
/// assert_eq!(session.score(), 4);
///
/// assert_eq!(session.step(Action::Exit), SessionState::Exit);
/// ```
#[derive(Debug)]
pub struct Session<S, T> {
    config: SessionConfig,
    grid: Grid,
    state: SessionState,
    win_threshold: u32,
    best_score: u64,
    store: S,
    tiles: T,
    store_error: Option<StoreError>,
}

impl<S, T> Session<S, T>
where
    S: BestScoreStore,
    T: TileSource,
{
    pub fn new(config: SessionConfig, store: S, tiles: T) -> Result<Self, SessionConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            grid: Grid::new(config.size)?,
            state: SessionState::Init,
            win_threshold: config.win_threshold,
            best_score: 0,
            store,
            tiles,
            store_error: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.grid.score().points()
    }

    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    #[must_use]
    pub fn win_threshold(&self) -> u32 {
        self.win_threshold
    }

    /// The most recent best-score store failure, cleared by the next successful read.
    #[must_use]
    pub fn store_error(&self) -> Option<&StoreError> {
        self.store_error.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            grid: &self.grid,
            state: self.state,
            best_score: self.best_score,
            win_threshold: self.win_threshold,
            store_error: self.store_error.as_ref(),
        }
    }

    /// Performs the `Init → Playing` transition.
    ///
    /// Resets the win threshold, clears the grid and score, inserts the two starting tiles,
    /// and reads the best score. Does nothing outside [`SessionState::Init`].
    #[instrument(skip(self), fields(size = self.config.size))]
    pub fn initialize(&mut self) {
        if !self.state.is_init() {
            return;
        }
        self.win_threshold = self.config.win_threshold;
        self.grid.reset(&mut self.tiles);
        self.best_score = self.read_best_score().unwrap_or(0);
        self.state = SessionState::Playing;
        info!(best_score = self.best_score, "new game started");
    }

    /// Applies one action and returns the resulting state.
    ///
    /// In [`SessionState::Init`] the session is initialized first and the action is then
    /// played. Blocked moves and actions without meaning in the current state leave the
    /// session untouched. [`SessionState::Exit`] is terminal.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn step(&mut self, action: Action) -> SessionState {
        if self.state.is_init() {
            self.initialize();
        }
        let next = match self.state {
            SessionState::Init => unreachable!("session is initialized above"),
            SessionState::Playing => self.step_playing(action),
            SessionState::Win | SessionState::Over => self.step_prompt(action),
            SessionState::Exit => SessionState::Exit,
        };
        if next != self.state {
            debug!(from = %self.state, to = %next, "state transition");
        }
        self.state = next;
        if self.state.is_win() || self.state.is_over() {
            self.sync_best_score();
        }
        self.state
    }

    /// Drives the session from `source` until it reaches [`SessionState::Exit`].
    ///
    /// `Init` is resolved without reading input. When the source runs out of actions the
    /// session exits.
    #[instrument(skip_all)]
    pub fn run<A>(&mut self, source: &mut A) -> Result<SessionState, A::Error>
    where
        A: ActionSource,
    {
        loop {
            match self.state {
                SessionState::Exit => return Ok(self.state),
                SessionState::Init => self.initialize(),
                SessionState::Playing | SessionState::Win | SessionState::Over => {
                    let Some(action) = source.next_action(&self.view())? else {
                        debug!("action source exhausted");
                        self.state = SessionState::Exit;
                        continue;
                    };
                    self.step(action);
                }
            }
        }
    }

    fn step_playing(&mut self, action: Action) -> SessionState {
        let direction = match action {
            Action::Move(direction) => direction,
            Action::Restart => return SessionState::Init,
            Action::Exit => return SessionState::Exit,
            Action::Continue => return SessionState::Playing,
        };
        if !self.grid.can_move(direction) {
            debug!(%direction, "move blocked");
            return SessionState::Playing;
        }

        self.grid.shift(direction);
        // a legal move either merged tiles or slid one into an empty cell, so a cell is free
        if let Err(err) = self.grid.random_insert(&mut self.tiles) {
            panic!("{err} after a legal move in {direction}");
        }
        debug!(
            %direction,
            score = self.grid.score().points(),
            max_value = self.grid.max_value(),
            "moved"
        );

        if self.grid.max_value() >= self.win_threshold {
            info!(win_threshold = self.win_threshold, "win threshold reached");
            SessionState::Win
        } else if !self.grid.has_any_move() {
            info!(score = self.grid.score().points(), "no move left");
            SessionState::Over
        } else {
            SessionState::Playing
        }
    }

    fn step_prompt(&mut self, action: Action) -> SessionState {
        match action {
            Action::Continue => {
                // the largest power of two in a cell stays the threshold once reached
                if let Some(next) = self.win_threshold.checked_mul(2) {
                    self.win_threshold = next;
                }
                info!(win_threshold = self.win_threshold, "continuing");
                SessionState::Playing
            }
            Action::Restart => SessionState::Init,
            Action::Exit | Action::Move(_) => SessionState::Exit,
        }
    }

    /// Reads the stored best score, recording a failure instead of returning it.
    fn read_best_score(&mut self) -> Option<u64> {
        match self.store.get() {
            Ok(value) => {
                self.store_error = None;
                Some(value)
            }
            Err(err) => {
                warn!(%err, "failed to read best score, using 0");
                self.store_error = Some(err);
                None
            }
        }
    }

    /// Stores the current score if it beats the stored best score.
    ///
    /// Nothing is written when the stored value cannot be read, so an unreachable store never
    /// ends up with a lower value than it held.
    fn sync_best_score(&mut self) {
        let Some(stored) = self.read_best_score() else {
            self.best_score = 0;
            return;
        };
        let score = self.grid.score().points();
        if score <= stored {
            self.best_score = stored;
            return;
        }
        match self.store.set(score) {
            Ok(()) => info!(score, previous = stored, "new best score"),
            Err(err) => {
                warn!(%err, "failed to store best score");
                self.store_error = Some(err);
            }
        }
        self.best_score = score;
    }
}
