//! Full games and batch simulation.
//!
//! A game asks the strategy owning the current mover for a move, applies it
//! and stops once a side runs out of stones. The final score is the settled
//! utility from the starting player's perspective: positive means player 1
//! won, negative means player 2 won.
//!
//! Batch runs return their tallies in a [`BatchStats`] accumulator.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::board::PlayerId;
use crate::game::Mancala;
use crate::player::Strategy;
use crate::position::{GameState, MoveError, Score, terminal_test, try_apply_move, utility};

/// Why a game could not be finished.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("{player} made an illegal move")]
    IllegalMove {
        player: PlayerId,
        #[source]
        source: MoveError,
    },
    #[error("{player} did not choose a move")]
    NoMove { player: PlayerId },
}

/// Result of one finished game.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    /// Settled score for the starting player
    pub final_score: Score,
    /// `None` on a tie
    pub winner: Option<PlayerId>,
    /// Moves made by player 1 and player 2
    pub moves: [u32; 2],
    /// Terminal state after the sweep
    pub final_state: GameState,
}

/// Play one game from the initial state.
///
/// # Errors
/// Fails if a strategy returns no move or an illegal one.
pub fn play_game(
    game: &Mancala,
    p1: &mut dyn Strategy,
    p2: &mut dyn Strategy,
) -> Result<GameOutcome, GameError> {
    let mut strategies: [&mut dyn Strategy; 2] = [p1, p2];
    let mut state = game.initial().clone();
    let mut moves = [0u32; 2];

    while !terminal_test(&state) {
        let player = state.to_move;
        let mv = strategies[player.index()]
            .select_move(game, &state)
            .ok_or(GameError::NoMove { player })?;
        state = try_apply_move(&state, mv)
            .map_err(|source| GameError::IllegalMove { player, source })?;
        moves[player.index()] += 1;
    }

    let starting = game.starting_player();
    let final_score = utility(&mut state, starting);
    let winner = match final_score {
        s if s > 0 => Some(starting),
        s if s < 0 => Some(starting.other()),
        _ => None,
    };

    Ok(GameOutcome {
        final_score,
        winner,
        moves,
        final_state: state,
    })
}

/// Win/tie tallies over a batch of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    pub games: usize,
    pub wins: [usize; 2],
    pub ties: usize,
    /// Moves made by each player, summed over the games that player won
    pub winning_moves: [u64; 2],
    pub elapsed: Duration,
}

impl BatchStats {
    /// Fold one finished game into the tallies.
    pub fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        match outcome.winner {
            Some(player) => {
                let i = player.index();
                self.wins[i] += 1;
                self.winning_moves[i] += u64::from(outcome.moves[i]);
            }
            None => self.ties += 1,
        }
    }

    pub fn wins(&self, player: PlayerId) -> usize {
        self.wins[player.index()]
    }

    /// Percentage of games won by `player`.
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        percent(self.wins(player), self.games)
    }

    pub fn tie_rate(&self) -> f64 {
        percent(self.ties, self.games)
    }

    /// Average number of moves `player` needed in the games they won.
    pub fn average_moves_to_win(&self, player: PlayerId) -> Option<f64> {
        let wins = self.wins(player);
        (wins > 0).then(|| self.winning_moves[player.index()] as f64 / wins as f64)
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Elapsed time: {:.4} seconds", self.elapsed.as_secs_f64())?;
        for player in [PlayerId::One, PlayerId::Two] {
            writeln!(
                f,
                "{player} won {} games ({:.2}%).",
                self.wins(player),
                self.win_rate(player)
            )?;
            if let Some(avg) = self.average_moves_to_win(player) {
                writeln!(f, "{player} average move to win the game is {avg:.2}.")?;
            }
        }
        writeln!(f, "Tie count: {} times ({:.2}%).", self.ties, self.tie_rate())
    }
}

/// Play `games` games between the same two strategies.
///
/// # Errors
/// Stops at the first game that cannot be finished.
pub fn run_batch(
    game: &Mancala,
    p1: &mut dyn Strategy,
    p2: &mut dyn Strategy,
    games: usize,
) -> Result<BatchStats, GameError> {
    run_batch_with(game, p1, p2, games, |_, _| {})
}

/// Like [`run_batch`], calling `on_game(index, outcome)` after every game.
pub fn run_batch_with(
    game: &Mancala,
    p1: &mut dyn Strategy,
    p2: &mut dyn Strategy,
    games: usize,
    mut on_game: impl FnMut(usize, &GameOutcome),
) -> Result<BatchStats, GameError> {
    let start = Instant::now();
    let mut stats = BatchStats::default();
    for i in 0..games {
        let outcome = play_game(game, p1, p2)?;
        on_game(i, &outcome);
        stats.record(&outcome);
    }
    stats.elapsed = start.elapsed();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MoveId;
    use crate::player::{RandomPlayer, SearchPlayer};

    struct Fixed(Option<MoveId>);

    impl Strategy for Fixed {
        fn name(&self) -> String {
            "fixed".into()
        }

        fn select_move(&mut self, _game: &Mancala, _state: &GameState) -> Option<MoveId> {
            self.0
        }
    }

    #[test]
    fn test_random_game_finishes() {
        let game = Mancala::default();
        let mut p1 = RandomPlayer::with_seed(1);
        let mut p2 = RandomPlayer::with_seed(2);
        let outcome = play_game(&game, &mut p1, &mut p2).unwrap();

        let board = &outcome.final_state.board;
        assert_eq!(board.side_total(PlayerId::One), 0);
        assert_eq!(board.side_total(PlayerId::Two), 0);
        assert_eq!(
            board.store(PlayerId::One) + board.store(PlayerId::Two),
            game.total_stones()
        );
        assert_eq!(outcome.final_state.utility, Some(outcome.final_score));
        // Player 1 opens, so it has made either the same number of moves or one more.
        let [m1, m2] = outcome.moves;
        assert!(m1 == m2 || m1 == m2 + 1);
    }

    #[test]
    fn test_illegal_move_is_an_error() {
        let game = Mancala::default();
        let mut p1 = Fixed(Some(9));
        let mut p2 = RandomPlayer::with_seed(3);
        let err = play_game(&game, &mut p1, &mut p2).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove {
                player: PlayerId::One,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_move_is_an_error() {
        let game = Mancala::default();
        let mut p1 = RandomPlayer::with_seed(3);
        let mut p2 = Fixed(None);
        let err = play_game(&game, &mut p1, &mut p2).unwrap_err();
        assert!(matches!(err, GameError::NoMove { player: PlayerId::Two }));
        assert_eq!(err.to_string(), "Player 2 did not choose a move");
    }

    #[test]
    fn test_batch_tallies() {
        let game = Mancala::default();
        let mut p1 = RandomPlayer::with_seed(10);
        let mut p2 = RandomPlayer::with_seed(11);
        let mut seen = 0;
        let stats = run_batch_with(&game, &mut p1, &mut p2, 20, |i, _| {
            assert_eq!(i, seen);
            seen += 1;
        })
        .unwrap();
        assert_eq!(seen, 20);
        assert_eq!(stats.games, 20);
        assert_eq!(stats.wins[0] + stats.wins[1] + stats.ties, 20);
        let total = stats.win_rate(PlayerId::One) + stats.win_rate(PlayerId::Two) + stats.tie_rate();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_and_report() {
        let game = Mancala::default();
        let mut stats = BatchStats::default();
        let final_state = game.initial().clone();
        stats.record(&GameOutcome {
            final_score: 4,
            winner: Some(PlayerId::One),
            moves: [10, 9],
            final_state: final_state.clone(),
        });
        stats.record(&GameOutcome {
            final_score: 0,
            winner: None,
            moves: [7, 7],
            final_state,
        });
        assert_eq!(stats.average_moves_to_win(PlayerId::One), Some(10.0));
        assert_eq!(stats.average_moves_to_win(PlayerId::Two), None);
        assert_eq!(stats.win_rate(PlayerId::One), 50.0);

        let report = stats.to_string();
        assert!(report.contains("Player 1 won 1 games (50.00%)."));
        assert!(report.contains("Player 1 average move to win the game is 10.00."));
        assert!(!report.contains("Player 2 average"));
        assert!(report.contains("Tie count: 1 times (50.00%)."));
    }

    #[test]
    fn test_search_beats_random() {
        let game = Mancala::default();
        let mut p1 = SearchPlayer::alpha_beta(2);
        let mut p2 = RandomPlayer::with_seed(99);
        let stats = run_batch(&game, &mut p1, &mut p2, 10).unwrap();
        assert!(stats.wins(PlayerId::One) >= 6, "{stats}");
    }
}
