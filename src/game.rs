//! Game configuration and the `Mancala` game object.

use thiserror::Error;

use crate::board::{Board, PlayerId};
use crate::constants::{DEFAULT_PITS_PER_PLAYER, DEFAULT_STONES_PER_PIT, MAX_TOTAL_STONES};
use crate::position::GameState;

/// Configuration errors, reported when a game is constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pits per player must be at least 1 (got {0})")]
    ZeroPits(usize),
    #[error("stones per pit must be at least 1 (got {0})")]
    ZeroStones(u32),
    #[error(
        "{pits_per_player} pits of {stones_per_pit} stones per player exceed the \
         limit of {MAX_TOTAL_STONES} stones on the board"
    )]
    TooManyStones {
        pits_per_player: usize,
        stones_per_pit: u32,
    },
}

/// Board dimensions for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub pits_per_player: usize,
    pub stones_per_pit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pits_per_player: DEFAULT_PITS_PER_PLAYER,
            stones_per_pit: DEFAULT_STONES_PER_PIT,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pits_per_player == 0 {
            return Err(ConfigError::ZeroPits(self.pits_per_player));
        }
        if self.stones_per_pit == 0 {
            return Err(ConfigError::ZeroStones(self.stones_per_pit));
        }
        self.total_stones()
            .filter(|&total| total <= MAX_TOTAL_STONES)
            .ok_or(ConfigError::TooManyStones {
                pits_per_player: self.pits_per_player,
                stones_per_pit: self.stones_per_pit,
            })?;
        Ok(())
    }

    /// Stones on a fresh board, or `None` if the count does not fit a `u32`.
    fn total_stones(&self) -> Option<u32> {
        let stones = usize::try_from(self.stones_per_pit).ok()?;
        let total = self.pits_per_player.checked_mul(stones)?.checked_mul(2)?;
        u32::try_from(total).ok()
    }
}

/// A configured game: its dimensions and the state every match starts from.
///
/// Player 1 always moves first.
#[derive(Debug, Clone)]
pub struct Mancala {
    config: GameConfig,
    initial: GameState,
}

impl Default for Mancala {
    fn default() -> Self {
        Self::build(GameConfig::default())
    }
}

impl Mancala {
    /// Create a new game with the given dimensions.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if either dimension is zero or the board would
    /// hold more than [`MAX_TOTAL_STONES`] stones.
    pub fn new(pits_per_player: usize, stones_per_pit: u32) -> Result<Self, ConfigError> {
        Self::from_config(GameConfig {
            pits_per_player,
            stones_per_pit,
        })
    }

    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let board = Board::new(config.pits_per_player, config.stones_per_pit);
        Self {
            config,
            initial: GameState::from_board(board, PlayerId::One),
        }
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The state every game starts from.
    #[inline]
    pub fn initial(&self) -> &GameState {
        &self.initial
    }

    /// The player who moves first.
    #[inline]
    pub fn starting_player(&self) -> PlayerId {
        self.initial.to_move
    }

    /// Number of stones in play; conserved by every move.
    pub fn total_stones(&self) -> u32 {
        self.initial.board.total()
    }
}
