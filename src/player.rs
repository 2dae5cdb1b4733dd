//! Move-selection strategies the game loop treats uniformly.
//!
//! - [`RandomPlayer`] - uniform choice among the legal moves
//! - [`SearchPlayer`] - minimax or alpha-beta at a fixed ply depth
//! - [`InteractivePlayer`] - a human typing pit numbers

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::board::MoveId;
use crate::game::Mancala;
use crate::position::GameState;
use crate::search::{Algorithm, Searcher, dump_root};

/// Chooses a move for whoever is to move in `state`.
pub trait Strategy {
    /// Short label used in reports.
    fn name(&self) -> String;

    /// Pick a move, or `None` if this strategy cannot provide one.
    fn select_move(&mut self, game: &Mancala, state: &GameState) -> Option<MoveId>;
}

/// Plays a uniformly random legal move.
pub struct RandomPlayer {
    rng: fastrand::Rng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// A reproducible random player.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Strategy for RandomPlayer {
    fn name(&self) -> String {
        "random".into()
    }

    fn select_move(&mut self, _game: &Mancala, state: &GameState) -> Option<MoveId> {
        if state.moves.is_empty() {
            return None;
        }
        Some(state.moves[self.rng.usize(..state.moves.len())])
    }
}

/// Picks moves with a depth-bounded search.
pub struct SearchPlayer {
    algorithm: Algorithm,
    plies: usize,
    verbose: bool,
}

impl SearchPlayer {
    pub fn new(algorithm: Algorithm, plies: usize) -> Self {
        Self {
            algorithm,
            plies,
            verbose: false,
        }
    }

    pub fn minimax(plies: usize) -> Self {
        Self::new(Algorithm::Minimax, plies)
    }

    pub fn alpha_beta(plies: usize) -> Self {
        Self::new(Algorithm::AlphaBeta, plies)
    }

    /// Dump root move values to stderr after every search.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Strategy for SearchPlayer {
    fn name(&self) -> String {
        format!("{}({})", self.algorithm, self.plies)
    }

    fn select_move(&mut self, _game: &Mancala, state: &GameState) -> Option<MoveId> {
        let result = Searcher::new(self.plies).search(state, self.algorithm);
        if self.verbose {
            dump_root(&result);
        }
        result.best_move
    }
}

/// Asks a human for moves over a line-oriented reader/writer pair.
///
/// Blank lines and lines starting with `#` are ignored; anything that is not
/// a legal pit number is rejected and the prompt repeats. End of input (or an
/// I/O error) yields no move.
pub struct InteractivePlayer<R, W> {
    input: R,
    output: W,
}

impl InteractivePlayer<StdinLock<'static>, Stdout> {
    /// Read from stdin, prompt on stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect prompts in tests.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, state: &GameState) -> io::Result<Option<MoveId>> {
        write!(self.output, "\n{state}")?;
        loop {
            write!(self.output, "{}, choose a pit {:?}: ", state.to_move, state.moves)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.parse::<MoveId>() {
                Ok(mv) if state.moves.contains(&mv) => return Ok(Some(mv)),
                Ok(mv) => writeln!(self.output, "illegal move: {mv}")?,
                Err(_) => writeln!(self.output, "not a pit number: {line}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Strategy for InteractivePlayer<R, W> {
    fn name(&self) -> String {
        "human".into()
    }

    fn select_move(&mut self, _game: &Mancala, state: &GameState) -> Option<MoveId> {
        match self.prompt(state) {
            Ok(mv) => mv,
            Err(err) => {
                eprintln!("input error: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::apply_move;

    #[test]
    fn test_random_player_picks_legal_moves() {
        let game = Mancala::default();
        let state = apply_move(game.initial(), 3);
        let mut player = RandomPlayer::with_seed(7);
        for _ in 0..50 {
            let mv = player.select_move(&game, &state).unwrap();
            assert!(state.moves.contains(&mv));
        }
    }

    #[test]
    fn test_random_player_is_reproducible() {
        let game = Mancala::default();
        let mut a = RandomPlayer::with_seed(42);
        let mut b = RandomPlayer::with_seed(42);
        for _ in 0..20 {
            assert_eq!(
                a.select_move(&game, game.initial()),
                b.select_move(&game, game.initial())
            );
        }
    }

    #[test]
    fn test_search_player_names() {
        assert_eq!(SearchPlayer::minimax(4).name(), "minimax(4)");
        assert_eq!(SearchPlayer::alpha_beta(5).name(), "alpha-beta(5)");
    }

    #[test]
    fn test_search_players_agree() {
        let game = Mancala::default();
        let mut mm = SearchPlayer::minimax(2);
        let mut ab = SearchPlayer::alpha_beta(2);
        assert_eq!(
            mm.select_move(&game, game.initial()),
            ab.select_move(&game, game.initial())
        );
    }

    #[test]
    fn test_interactive_player_reprompts() {
        let game = Mancala::default();
        let state = apply_move(game.initial(), 3);
        let input = "\n# comment\nabc\n9\n2\n".as_bytes();
        let mut player = InteractivePlayer::new(input, Vec::new());
        assert_eq!(player.select_move(&game, &state), Some(2));

        let out = String::from_utf8(player.into_output()).unwrap();
        assert!(out.contains("not a pit number: abc"));
        assert!(out.contains("illegal move: 9"));
        assert_eq!(out.matches("choose a pit").count(), 5);
    }

    #[test]
    fn test_interactive_player_end_of_input() {
        let game = Mancala::default();
        let mut player = InteractivePlayer::new("".as_bytes(), Vec::new());
        assert_eq!(player.select_move(&game, game.initial()), None);
    }
}
