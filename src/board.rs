//! Board layout: pits, stores and the player-relative move numbering.
//!
//! The board is a flat array of stone counts:
//!
//! ```text
//!             P1    [13]    P2
//!                 ---------
//!   [0]   1 ->   | 4 | 4 |   <- 6   [12]
//!   [1]   2 ->   | 4 | 4 |   <- 5   [11]
//!   ...
//!   [5]   6 ->   | 4 | 4 |   <- 1   [7]
//!                 ---------
//!                   [6]
//! ```
//!
//! Player 1 owns pits `0..n` and the store at `n`, player 2 owns pits
//! `n+1..2n+1` and the store at `2n+1`. Sowing runs in increasing index order.

use std::fmt;
use std::ops::Range;

use crate::constants::MAX_TOTAL_STONES;

/// A player-relative pit selector in `1..=pits_per_player`.
pub type MoveId = usize;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The opponent.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 1 or 2, for display.
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// 0 or 1, for indexing per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Stone counts for every pit and store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pits_per_player: usize,
    cells: Vec<u32>,
}

impl Board {
    /// A fresh board: every sowing pit holds `stones_per_pit`, both stores are empty.
    ///
    /// Callers keep the stone count within [`MAX_TOTAL_STONES`]; `Mancala`
    /// validates its dimensions before building one.
    pub(crate) fn new(pits_per_player: usize, stones_per_pit: u32) -> Self {
        let mut cells = vec![stones_per_pit; 2 * (pits_per_player + 1)];
        cells[pits_per_player] = 0;
        cells[2 * pits_per_player + 1] = 0;
        Self {
            pits_per_player,
            cells,
        }
    }

    /// Build a board from raw cell contents.
    ///
    /// Returns `None` unless the length is `2 * (n + 1)` for some `n >= 1`
    /// and the board holds at most [`MAX_TOTAL_STONES`] stones.
    pub fn from_cells(cells: Vec<u32>) -> Option<Self> {
        if cells.len() < 4 || cells.len() % 2 != 0 {
            return None;
        }
        cells
            .iter()
            .try_fold(0u32, |acc, &c| acc.checked_add(c))
            .filter(|&total| total <= MAX_TOTAL_STONES)?;
        Some(Self {
            pits_per_player: cells.len() / 2 - 1,
            cells,
        })
    }

    #[inline]
    pub fn pits_per_player(&self) -> usize {
        self.pits_per_player
    }

    /// Total number of cells (pits and stores).
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, idx: usize) -> u32 {
        self.cells[idx]
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [u32] {
        &mut self.cells
    }

    /// Absolute indices of a player's sowing pits.
    #[inline]
    pub fn pit_range(&self, player: PlayerId) -> Range<usize> {
        let n = self.pits_per_player;
        match player {
            PlayerId::One => 0..n,
            PlayerId::Two => n + 1..2 * n + 1,
        }
    }

    /// Absolute index of a player's store.
    #[inline]
    pub fn store_index(&self, player: PlayerId) -> usize {
        match player {
            PlayerId::One => self.pits_per_player,
            PlayerId::Two => 2 * self.pits_per_player + 1,
        }
    }

    #[inline]
    pub fn store(&self, player: PlayerId) -> u32 {
        self.cells[self.store_index(player)]
    }

    /// The player's sowing pits, in board order.
    pub fn pits(&self, player: PlayerId) -> &[u32] {
        &self.cells[self.pit_range(player)]
    }

    /// Stones left in the player's sowing pits (store excluded).
    pub fn side_total(&self, player: PlayerId) -> u32 {
        self.pits(player).iter().sum()
    }

    /// Every stone on the board, stores included.
    pub fn total(&self) -> u32 {
        self.cells.iter().sum()
    }

    /// Translate a player-relative move to an absolute pit index.
    ///
    /// `move_id` must be in `1..=pits_per_player`.
    #[inline]
    pub fn pit_index(&self, player: PlayerId, move_id: MoveId) -> usize {
        match player {
            PlayerId::One => move_id - 1,
            PlayerId::Two => move_id + self.pits_per_player,
        }
    }

    /// Translate an absolute pit index back to the owner's move id.
    #[inline]
    pub fn move_id(&self, player: PlayerId, idx: usize) -> MoveId {
        match player {
            PlayerId::One => idx + 1,
            PlayerId::Two => idx - self.pits_per_player,
        }
    }

    /// The pit directly across the board from a sowing pit.
    #[inline]
    pub fn opposite(&self, idx: usize) -> usize {
        2 * self.pits_per_player - idx
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.pits_per_player;
        let p1 = self.pits(PlayerId::One);
        let p2 = self.pits(PlayerId::Two);

        writeln!(f, "P1               P2")?;
        writeln!(f, "     ____{}____", self.store(PlayerId::Two))?;
        for i in 0..n {
            let (a, b) = (p1[i], p2[n - 1 - i]);
            if i == n - 1 {
                writeln!(f, "{} -> |_{a}_|_{b}_| <- {}", i + 1, n - i)?;
            } else {
                writeln!(f, "{} -> | {a} | {b} | <- {}", i + 1, n - i)?;
            }
        }
        writeln!(f, "         {}", self.store(PlayerId::One))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_layout() {
        let board = Board::new(6, 4);
        assert_eq!(board.len(), 14);
        assert_eq!(board.cells(), &[4, 4, 4, 4, 4, 4, 0, 4, 4, 4, 4, 4, 4, 0]);
        assert_eq!(board.store_index(PlayerId::One), 6);
        assert_eq!(board.store_index(PlayerId::Two), 13);
        assert_eq!(board.pit_range(PlayerId::One), 0..6);
        assert_eq!(board.pit_range(PlayerId::Two), 7..13);
        assert_eq!(board.total(), 48);
    }

    #[test]
    fn test_pit_index_roundtrip() {
        let board = Board::new(6, 4);
        for player in [PlayerId::One, PlayerId::Two] {
            for mv in 1..=6 {
                let idx = board.pit_index(player, mv);
                assert!(board.pit_range(player).contains(&idx));
                assert_eq!(board.move_id(player, idx), mv);
            }
        }
        assert_eq!(board.pit_index(PlayerId::One, 3), 2);
        assert_eq!(board.pit_index(PlayerId::Two, 1), 7);
    }

    #[test]
    fn test_opposite_pits() {
        let board = Board::new(6, 4);
        assert_eq!(board.opposite(0), 12);
        assert_eq!(board.opposite(1), 11);
        assert_eq!(board.opposite(5), 7);
        assert_eq!(board.opposite(7), 5);

        let small = Board::new(3, 1);
        assert_eq!(small.opposite(0), 6);
        assert_eq!(small.opposite(2), 4);
    }

    #[test]
    fn test_from_cells_rejects_bad_lengths() {
        assert!(Board::from_cells(vec![0; 3]).is_none());
        assert!(Board::from_cells(vec![0; 2]).is_none());
        assert!(Board::from_cells(vec![0; 7]).is_none());
        let board = Board::from_cells(vec![1, 2, 0, 3, 4, 0]).unwrap();
        assert_eq!(board.pits_per_player(), 2);
        assert_eq!(board.side_total(PlayerId::Two), 7);
    }

    #[test]
    fn test_from_cells_rejects_too_many_stones() {
        assert!(Board::from_cells(vec![u32::MAX, 0, 1, 0]).is_none());
        assert!(Board::from_cells(vec![0, MAX_TOTAL_STONES, 1, 0]).is_none());
        let board = Board::from_cells(vec![0, MAX_TOTAL_STONES, 0, 0]).unwrap();
        assert_eq!(board.total(), MAX_TOTAL_STONES);
    }

    #[test]
    fn test_display_columns() {
        let board = Board::from_cells(vec![1, 2, 3, 9, 4, 5, 6, 8]).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1].trim(), "____8____");
        // Player 2's pits are listed in reverse so opposite pits share a row.
        assert_eq!(lines[2], "1 -> | 1 | 6 | <- 3");
        assert_eq!(lines[4], "3 -> |_3_|_4_| <- 1");
        assert_eq!(lines[5].trim(), "9");
    }

    #[test]
    fn test_player_other() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other(), PlayerId::One);
        assert_eq!(PlayerId::Two.to_string(), "Player 2");
    }
}
