//! Game Show Engine
//!
//! Platform-agnostic core logic for the game-show companion: the spinning
//! wheel with its resolution math, and the three-player score board. This
//! crate provides all game mechanics without UI or platform-specific
//! dependencies.

pub mod action;
pub mod angles;
pub mod constants;
pub mod easing;
pub mod numbers;
pub mod presets;
pub mod rng;
pub mod scores;
pub mod segment;
pub mod wheel;

// Re-export commonly used types
pub use action::GameAction;
pub use angles::{
    normalize_rotation, pointer_offset, segment_arc, segment_center, segment_index,
    snap_adjustment,
};
pub use easing::{Easing, interpolate};
pub use presets::WheelPreset;
pub use rng::WheelRng;
pub use scores::{Leader, Player, ScoreBoard, ScoreError};
pub use segment::{Segment, SegmentConfig, SegmentList};
pub use wheel::{SpinPlan, SpinResult, WheelConfig, WheelEngine, WheelError, WheelStats};

/// Trait for abstracting score persistence
/// Platform-specific implementations should provide this
pub trait ScoreStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save the score board
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be saved.
    fn save_scores(&self, board: &ScoreBoard) -> Result<(), Self::Error>;

    /// Load the previously saved score board, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be loaded.
    fn load_scores(&self) -> Result<Option<ScoreBoard>, Self::Error>;

    /// Delete the saved score board
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn clear_scores(&self) -> Result<(), Self::Error>;
}

/// Top-level handle for one hosting surface: the wheel, the score board,
/// and write-through score persistence. Hosts construct this explicitly
/// with their own storage; there is no shared global instance.
pub struct GameShow<S>
where
    S: ScoreStorage,
{
    wheel: WheelEngine,
    scores: ScoreBoard,
    storage: S,
}

impl<S> GameShow<S>
where
    S: ScoreStorage,
{
    /// Create a game show with a fresh wheel and score board.
    pub fn new(storage: S) -> Self {
        Self {
            wheel: WheelEngine::new(),
            scores: ScoreBoard::new(),
            storage,
        }
    }

    /// Create a game show, restoring the persisted score board when one
    /// exists. A board that fails validation is replaced with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted board cannot be read.
    pub fn load(storage: S) -> Result<Self, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let scores = storage
            .load_scores()
            .map_err(Into::into)?
            .map_or_else(ScoreBoard::new, ScoreBoard::sanitize);
        Ok(Self {
            wheel: WheelEngine::new(),
            scores,
            storage,
        })
    }

    #[must_use]
    pub fn wheel(&self) -> &WheelEngine {
        &self.wheel
    }

    pub fn wheel_mut(&mut self) -> &mut WheelEngine {
        &mut self.wheel
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Add points to a player and persist the board.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown player or a failed save.
    pub fn adjust_score(&mut self, player_id: &str, delta: i32) -> Result<i32, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let total = self.scores.adjust_score(player_id, delta)?;
        self.storage.save_scores(&self.scores).map_err(Into::into)?;
        Ok(total)
    }

    /// Overwrite a player's score and persist the board.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown player or a failed save.
    pub fn set_score(&mut self, player_id: &str, score: i32) -> Result<(), anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        self.scores.set_score(player_id, score)?;
        self.storage.save_scores(&self.scores).map_err(Into::into)
    }

    /// Rename a player and persist the board.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown player or a failed save.
    pub fn rename_player(&mut self, player_id: &str, name: &str) -> Result<(), anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        self.scores.rename_player(player_id, name)?;
        self.storage.save_scores(&self.scores).map_err(Into::into)
    }

    /// Zero every score and persist the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be saved.
    pub fn reset_scores(&mut self) -> Result<(), S::Error> {
        self.scores.reset_scores();
        self.storage.save_scores(&self.scores)
    }

    /// Restore the default board and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be saved.
    pub fn reset_game(&mut self) -> Result<(), S::Error> {
        self.scores.reset_game();
        self.storage.save_scores(&self.scores)
    }

    /// Mark the game underway and persist the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be saved.
    pub fn start_game(&mut self) -> Result<(), S::Error> {
        self.scores.start_game();
        self.storage.save_scores(&self.scores)
    }

    /// Delete the persisted score board. The in-memory board is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn clear_saved_scores(&self) -> Result<(), S::Error> {
        self.storage.clear_scores()
    }
}
