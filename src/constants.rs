//! Default game dimensions, search parameters and score bounds.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default number of sowing pits on each side of the board.
pub const DEFAULT_PITS_PER_PLAYER: usize = 6;

/// Default number of stones placed in every sowing pit at the start of a game.
pub const DEFAULT_STONES_PER_PIT: u32 = 4;

/// Most stones a board may hold, so that every score stays below [`SCORE_INF`].
pub const MAX_TOTAL_STONES: u32 = (SCORE_INF - 1) as u32;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default ply depth for search-backed players.
pub const DEFAULT_PLIES: usize = 4;

/// Upper bound used as "infinity" by the search windows.
///
/// Any reachable score is bounded by the total number of stones, so this
/// can never be produced by an evaluation.
pub const SCORE_INF: i32 = i32::MAX;

// =============================================================================
// Simulation
// =============================================================================

/// Default number of games played by a batch simulation.
pub const DEFAULT_BATCH_GAMES: usize = 100;
