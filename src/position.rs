//! Game state and the rules engine.
//!
//! This module provides the core game logic for Mancala:
//! - Legal move generation
//! - Move application (sowing, skipping the opponent's store, captures)
//! - Terminal detection
//! - Scoring, including the end-of-game sweep
//!
//! States are values. Applying a move clones the board, sows into the clone
//! and packages a new state, so a state handed to a caller is never changed
//! behind its back. The one exception is [`utility`] on a terminal state,
//! which settles the board by sweeping leftover stones into the stores.

use std::fmt;

use thiserror::Error;

use crate::board::{Board, MoveId, PlayerId};

/// Signed score differential.
pub type Score = i32;

/// Rejected move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid move {mv}: legal moves are {legal:?}")]
    Illegal { mv: MoveId, legal: Vec<MoveId> },
}

/// A snapshot of the game before a move is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Player whose turn it is
    pub to_move: PlayerId,
    /// Pit and store contents
    pub board: Board,
    /// Legal moves for `to_move`, in board order
    pub moves: Vec<MoveId>,
    /// Settled score (for player 1) once a terminal state has been scored
    pub utility: Option<Score>,
}

impl GameState {
    /// Wrap an arbitrary board, computing the legal moves for `to_move`.
    pub fn from_board(board: Board, to_move: PlayerId) -> Self {
        let moves = legal_moves(&board, to_move);
        Self {
            to_move,
            board,
            moves,
            utility: None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move, legal moves {:?}", self.to_move, self.moves)
    }
}

/// Moves available to `player`: every pit on their side holding a stone.
pub fn legal_moves(board: &Board, player: PlayerId) -> Vec<MoveId> {
    board
        .pit_range(player)
        .filter(|&idx| board.get(idx) > 0)
        .map(|idx| board.move_id(player, idx))
        .collect()
}

/// Apply a move, reporting an illegal move to stderr.
///
/// An illegal move has no effect: a copy of `state` is returned unchanged.
/// Use [`try_apply_move`] to detect the failure instead.
pub fn apply_move(state: &GameState, mv: MoveId) -> GameState {
    match try_apply_move(state, mv) {
        Ok(next) => next,
        Err(err) => {
            eprintln!("{err}");
            state.clone()
        }
    }
}

/// Apply a move, producing the next state.
///
/// # Errors
/// Returns [`MoveError::Illegal`] if `mv` is not in `state.moves`.
pub fn try_apply_move(state: &GameState, mv: MoveId) -> Result<GameState, MoveError> {
    if !state.moves.contains(&mv) {
        return Err(MoveError::Illegal {
            mv,
            legal: state.moves.clone(),
        });
    }

    let mut board = state.board.clone();
    let player = state.to_move;
    let pit = board.pit_index(player, mv);
    let last_pit = sow(&mut board, player, pit);
    capture(&mut board, player, last_pit);

    Ok(GameState::from_board(board, player.other()))
}

/// Empty `pit` and distribute its stones one by one in board order,
/// never dropping a stone in the opponent's store.
///
/// Returns the index of the cell that received the last stone.
fn sow(board: &mut Board, player: PlayerId, pit: usize) -> usize {
    let skip = board.store_index(player.other());
    let len = board.len();
    let cells = board.cells_mut();

    let mut stones = std::mem::take(&mut cells[pit]);
    let mut next = pit;
    let mut last = pit;
    while stones > 0 {
        next = (next + 1) % len;
        if next == skip {
            continue;
        }
        cells[next] += 1;
        stones -= 1;
        last = next;
    }
    last
}

/// Capture rule: a last stone landing in an empty pit on the mover's own side
/// takes itself and the opposite pit's stones into the mover's store.
///
/// Returns the number of stones captured (0 if the rule did not fire).
fn capture(board: &mut Board, player: PlayerId, last_pit: usize) -> u32 {
    if !board.pit_range(player).contains(&last_pit) || board.get(last_pit) != 1 {
        return 0;
    }
    let opposite = board.opposite(last_pit);
    let store = board.store_index(player);
    let cells = board.cells_mut();

    let captured = cells[last_pit] + cells[opposite];
    cells[store] += captured;
    cells[last_pit] = 0;
    cells[opposite] = 0;
    captured
}

/// A state is terminal once either side has no stones left in its pits.
pub fn terminal_test(state: &GameState) -> bool {
    is_terminal_board(&state.board)
}

#[inline]
fn is_terminal_board(board: &Board) -> bool {
    board.side_total(PlayerId::One) == 0 || board.side_total(PlayerId::Two) == 0
}

/// Score `state` from `player`'s perspective.
///
/// Non-terminal: the store differential. Terminal: leftover pit stones are
/// swept into their owner's store first, the settled score (for player 1) is
/// recorded in `state.utility`, and the final store differential is returned.
/// Sweeping a settled board again changes nothing.
pub fn utility(state: &mut GameState, player: PlayerId) -> Score {
    if terminal_test(state) {
        sweep(&mut state.board);
        let settled = store_difference(&state.board);
        state.utility = Some(settled);
        return signed_for(settled, player);
    }
    signed_for(store_difference(&state.board), player)
}

/// The value [`utility`] would return, without touching the state.
pub fn score(state: &GameState, player: PlayerId) -> Score {
    let board = &state.board;
    let diff = if is_terminal_board(board) {
        let p1 = board.side_total(PlayerId::One) + board.store(PlayerId::One);
        let p2 = board.side_total(PlayerId::Two) + board.store(PlayerId::Two);
        p1 as Score - p2 as Score
    } else {
        store_difference(board)
    };
    signed_for(diff, player)
}

/// Move every pit's stones into its owner's store.
fn sweep(board: &mut Board) {
    for player in [PlayerId::One, PlayerId::Two] {
        let range = board.pit_range(player);
        let store = board.store_index(player);
        let cells = board.cells_mut();
        let left: u32 = cells[range.clone()].iter().sum();
        cells[range].fill(0);
        cells[store] += left;
    }
}

#[inline]
fn store_difference(board: &Board) -> Score {
    board.store(PlayerId::One) as Score - board.store(PlayerId::Two) as Score
}

#[inline]
fn signed_for(diff: Score, player: PlayerId) -> Score {
    match player {
        PlayerId::One => diff,
        PlayerId::Two => -diff,
    }
}
