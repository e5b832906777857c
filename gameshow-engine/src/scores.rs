//! Score board for the three-player companion game.
//!
//! Pure state plus total operations; persistence lives behind the storage
//! trait at the crate root. Scores are signed because operators subtract
//! points as freely as they award them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_PLAYER_COUNT, FIRST_ROUND};

/// Errors surfaced by score-board operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// No player carries the requested id.
    #[error("no player with id {id}")]
    UnknownPlayer { id: String },
}

/// One contestant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub score: i32,
}

/// Current standings, when there are any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leader {
    /// Exactly one player holds the highest score.
    Winner(Player),
    /// The highest score is positive and shared.
    Tie,
}

/// Scores, round counter, and the started flag for one game night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    players: Vec<Player>,
    round: u32,
    started: bool,
}

impl ScoreBoard {
    /// Fresh board: three default players with zero points, round one, not
    /// yet started.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: default_players(),
            round: FIRST_ROUND,
            started: false,
        }
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn started(&self) -> bool {
        self.started
    }

    /// Rename a player, keeping their score.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::UnknownPlayer`] when no player matches.
    pub fn rename_player(&mut self, id: &str, name: impl Into<String>) -> Result<(), ScoreError> {
        self.player_mut(id)?.name = name.into();
        Ok(())
    }

    /// Add `delta` points (negative to subtract) and return the new total.
    /// The total saturates instead of wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::UnknownPlayer`] when no player matches.
    pub fn adjust_score(&mut self, id: &str, delta: i32) -> Result<i32, ScoreError> {
        let player = self.player_mut(id)?;
        player.score = player.score.saturating_add(delta);
        Ok(player.score)
    }

    /// Overwrite a player's score.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::UnknownPlayer`] when no player matches.
    pub fn set_score(&mut self, id: &str, score: i32) -> Result<(), ScoreError> {
        self.player_mut(id)?.score = score;
        Ok(())
    }

    /// Zero every score. Names, round, and the started flag survive.
    pub fn reset_scores(&mut self) {
        for player in &mut self.players {
            player.score = 0;
        }
    }

    /// Restore the board to its fresh state.
    pub fn reset_game(&mut self) {
        *self = Self::new();
    }

    /// Mark the game underway.
    pub fn start_game(&mut self) {
        self.started = true;
    }

    /// Who is winning. A unique maximum names a winner outright; a shared
    /// maximum only counts as a tie once somebody has actually scored.
    #[must_use]
    pub fn leader(&self) -> Option<Leader> {
        let max = self.players.iter().map(|player| player.score).max()?;
        let mut at_max = self.players.iter().filter(|player| player.score == max);
        let first = at_max.next()?;
        if at_max.next().is_none() {
            Some(Leader::Winner(first.clone()))
        } else if max > 0 {
            Some(Leader::Tie)
        } else {
            None
        }
    }

    /// Name-to-score snapshot for display surfaces.
    #[must_use]
    pub fn summary(&self) -> HashMap<String, i32> {
        self.players
            .iter()
            .map(|player| (player.name.clone(), player.score))
            .collect()
    }

    /// Validate a board that arrived from storage. A wrong player count
    /// falls back to the fresh defaults rather than limping along.
    #[must_use]
    pub fn sanitize(self) -> Self {
        if self.players.len() == DEFAULT_PLAYER_COUNT {
            self
        } else {
            Self::new()
        }
    }

    fn player_mut(&mut self, id: &str) -> Result<&mut Player, ScoreError> {
        self.players
            .iter_mut()
            .find(|player| player.id == id)
            .ok_or_else(|| ScoreError::UnknownPlayer { id: id.to_string() })
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn default_players() -> Vec<Player> {
    (1..=DEFAULT_PLAYER_COUNT)
        .map(|n| Player {
            id: format!("player{n}"),
            name: format!("Player {n}"),
            score: 0,
        })
        .collect()
}
