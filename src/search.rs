//! Depth-bounded adversarial search.
//!
//! Two interchangeable move-selection algorithms over the state graph
//! produced by [`apply_move`]:
//! - Bounded minimax: alternating max/min layers down to a cutoff
//! - Alpha-beta: the same search with alpha/beta window pruning
//!
//! Both explore moves in `state.moves` order and break ties at the root in
//! favour of the first move seen, so alpha-beta always picks the same move as
//! minimax while visiting a subset of its nodes.
//!
//! Depth counts from the root's children (depth 1). The default cutoff fires
//! when `depth > plies` or the state is terminal, so `plies = 0` scores the
//! root's immediate successors.
//!
//! # Example
//!
//! ```
//! use mancala_ai::game::Mancala;
//! use mancala_ai::search::{Algorithm, Searcher};
//!
//! let game = Mancala::default();
//! let mut searcher = Searcher::new(2);
//! let result = searcher.search(game.initial(), Algorithm::AlphaBeta);
//! assert!(result.best_move.is_some());
//! ```

use std::fmt;

use crate::board::{MoveId, PlayerId};
use crate::constants::SCORE_INF;
use crate::position::{GameState, Score, apply_move, score, terminal_test};

/// Cutoff predicate: `(state, depth) -> stop here`.
pub type CutoffFn<'a> = Box<dyn Fn(&GameState, usize) -> bool + 'a>;

/// Static evaluator: `(state, searching player) -> score`.
pub type EvalFn<'a> = Box<dyn Fn(&GameState, PlayerId) -> Score + 'a>;

/// Which search algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "minimax"),
            Algorithm::AlphaBeta => write!(f, "alpha-beta"),
        }
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen move, `None` if the root has no legal moves
    pub best_move: Option<MoveId>,
    /// Value of the chosen move for the searching player
    pub score: Score,
    /// States visited, root included
    pub nodes: u64,
    /// Value backed up for each root move. Under alpha-beta, moves that lose
    /// to an earlier one only carry an upper bound.
    pub root_values: Vec<(MoveId, Score)>,
}

/// A configurable minimax / alpha-beta searcher.
pub struct Searcher<'a> {
    plies: usize,
    cutoff: Option<CutoffFn<'a>>,
    eval: Option<EvalFn<'a>>,
    nodes: u64,
    path: Vec<MoveId>,
    trace: Option<Vec<Vec<MoveId>>>,
}

impl<'a> Searcher<'a> {
    /// A searcher with the default cutoff and evaluator.
    #[must_use]
    pub fn new(plies: usize) -> Self {
        Self {
            plies,
            cutoff: None,
            eval: None,
            nodes: 0,
            path: Vec::new(),
            trace: None,
        }
    }

    /// Replace the default cutoff (`depth > plies || terminal`).
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: impl Fn(&GameState, usize) -> bool + 'a) -> Self {
        self.cutoff = Some(Box::new(cutoff));
        self
    }

    /// Replace the default evaluator (the game score for the searching player).
    #[must_use]
    pub fn with_evaluator(mut self, eval: impl Fn(&GameState, PlayerId) -> Score + 'a) -> Self {
        self.eval = Some(Box::new(eval));
        self
    }

    /// Record the move path of every visited node.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    #[inline]
    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Paths of the nodes visited by the last search, in visit order.
    /// Empty unless tracing is enabled.
    pub fn visited(&self) -> &[Vec<MoveId>] {
        self.trace.as_deref().unwrap_or(&[])
    }

    /// Run the chosen algorithm from `state`.
    pub fn search(&mut self, state: &GameState, algorithm: Algorithm) -> SearchResult {
        match algorithm {
            Algorithm::Minimax => self.minimax(state),
            Algorithm::AlphaBeta => self.alpha_beta(state),
        }
    }

    /// Bounded minimax from `state`, maximizing for `state.to_move`.
    pub fn minimax(&mut self, state: &GameState) -> SearchResult {
        self.reset();
        let player = state.to_move;
        let mut best_move = None;
        let mut best = -SCORE_INF;
        let mut root_values = Vec::with_capacity(state.moves.len());

        for &mv in &state.moves {
            let child = apply_move(state, mv);
            self.enter(mv);
            let value = self.min_value(&child, player, 1);
            self.leave();

            root_values.push((mv, value));
            if best_move.is_none() || value > best {
                best = value;
                best_move = Some(mv);
            }
        }

        self.finish(state, player, best_move, best, root_values)
    }

    /// Alpha-beta search from `state`, maximizing for `state.to_move`.
    pub fn alpha_beta(&mut self, state: &GameState) -> SearchResult {
        self.reset();
        let player = state.to_move;
        let mut best_move = None;
        let mut best = -SCORE_INF;
        let beta = SCORE_INF;
        let mut root_values = Vec::with_capacity(state.moves.len());

        for &mv in &state.moves {
            let child = apply_move(state, mv);
            self.enter(mv);
            let value = self.ab_min_value(&child, player, best, beta, 1);
            self.leave();

            root_values.push((mv, value));
            if best_move.is_none() || value > best {
                best = value;
                best_move = Some(mv);
            }
        }

        self.finish(state, player, best_move, best, root_values)
    }

    fn max_value(&mut self, state: &GameState, player: PlayerId, depth: usize) -> Score {
        if self.is_leaf(state, depth) {
            return self.evaluate(state, player);
        }
        let mut v = -SCORE_INF;
        for &mv in &state.moves {
            let child = apply_move(state, mv);
            self.enter(mv);
            v = v.max(self.min_value(&child, player, depth + 1));
            self.leave();
        }
        v
    }

    fn min_value(&mut self, state: &GameState, player: PlayerId, depth: usize) -> Score {
        if self.is_leaf(state, depth) {
            return self.evaluate(state, player);
        }
        let mut v = SCORE_INF;
        for &mv in &state.moves {
            let child = apply_move(state, mv);
            self.enter(mv);
            v = v.min(self.max_value(&child, player, depth + 1));
            self.leave();
        }
        v
    }

    fn ab_max_value(
        &mut self,
        state: &GameState,
        player: PlayerId,
        mut alpha: Score,
        beta: Score,
        depth: usize,
    ) -> Score {
        if self.is_leaf(state, depth) {
            return self.evaluate(state, player);
        }
        let mut v = -SCORE_INF;
        for &mv in &state.moves {
            let child = apply_move(state, mv);
            self.enter(mv);
            v = v.max(self.ab_min_value(&child, player, alpha, beta, depth + 1));
            self.leave();
            if v >= beta {
                return v;
            }
            alpha = alpha.max(v);
        }
        v
    }

    fn ab_min_value(
        &mut self,
        state: &GameState,
        player: PlayerId,
        alpha: Score,
        mut beta: Score,
        depth: usize,
    ) -> Score {
        if self.is_leaf(state, depth) {
            return self.evaluate(state, player);
        }
        let mut v = SCORE_INF;
        for &mv in &state.moves {
            let child = apply_move(state, mv);
            self.enter(mv);
            v = v.min(self.ab_max_value(&child, player, alpha, beta, depth + 1));
            self.leave();
            if v <= alpha {
                return v;
            }
            beta = beta.min(v);
        }
        v
    }

    /// A state with no moves is scored even if a custom cutoff would go on.
    #[inline]
    fn is_leaf(&self, state: &GameState, depth: usize) -> bool {
        let cut = match &self.cutoff {
            Some(cutoff) => cutoff(state, depth),
            None => depth > self.plies || terminal_test(state),
        };
        cut || state.moves.is_empty()
    }

    #[inline]
    fn evaluate(&self, state: &GameState, player: PlayerId) -> Score {
        match &self.eval {
            Some(eval) => eval(state, player),
            None => score(state, player),
        }
    }

    fn reset(&mut self) {
        self.nodes = 1;
        self.path.clear();
        if let Some(trace) = &mut self.trace {
            trace.clear();
            trace.push(Vec::new());
        }
    }

    fn enter(&mut self, mv: MoveId) {
        self.nodes += 1;
        self.path.push(mv);
        if let Some(trace) = &mut self.trace {
            trace.push(self.path.clone());
        }
    }

    fn leave(&mut self) {
        self.path.pop();
    }

    fn finish(
        &self,
        state: &GameState,
        player: PlayerId,
        best_move: Option<MoveId>,
        best: Score,
        root_values: Vec<(MoveId, Score)>,
    ) -> SearchResult {
        let score = if best_move.is_some() {
            best
        } else {
            self.evaluate(state, player)
        };
        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            root_values,
        }
    }
}

/// Pick a move with bounded minimax and the default cutoff and evaluator.
pub fn minimax_decision(state: &GameState, plies: usize) -> Option<MoveId> {
    Searcher::new(plies).minimax(state).best_move
}

/// Pick a move with alpha-beta and the default cutoff and evaluator.
pub fn alpha_beta_search(state: &GameState, plies: usize) -> Option<MoveId> {
    Searcher::new(plies).alpha_beta(state).best_move
}

/// Print the backed-up value of every root move.
pub fn dump_root(result: &SearchResult) {
    for (mv, value) in &result.root_values {
        let mark = if Some(*mv) == result.best_move { " *" } else { "" };
        eprintln!("move {mv} value={value}{mark}");
    }
    eprintln!("nodes={}", result.nodes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::game::Mancala;

    fn state(cells: &[u32], to_move: PlayerId) -> GameState {
        GameState::from_board(Board::from_cells(cells.to_vec()).unwrap(), to_move)
    }

    #[test]
    fn test_zero_plies_scores_successors() {
        let game = Mancala::default();
        let result = Searcher::new(0).minimax(game.initial());
        assert_eq!(
            result.root_values,
            vec![(1, 0), (2, 0), (3, 1), (4, 1), (5, 1), (6, 1)]
        );
        // Ties go to the first move in board order.
        assert_eq!(result.best_move, Some(3));
        assert_eq!(result.score, 1);
        assert_eq!(result.nodes, 7);
    }

    #[test]
    fn test_one_ply_node_count() {
        let game = Mancala::default();
        let result = Searcher::new(1).minimax(game.initial());
        assert_eq!(result.nodes, 1 + 6 + 36);
    }

    #[test]
    fn test_prefers_larger_capture() {
        let s = state(&[1, 0, 2, 0, 0, 0, 0, 1, 0, 0, 0, 5, 0, 0], PlayerId::One);
        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let result = Searcher::new(0).search(&s, algorithm);
            assert_eq!(result.best_move, Some(1), "{algorithm}");
            assert_eq!(result.score, 6, "{algorithm}");
        }
    }

    #[test]
    fn test_searches_for_player_two() {
        let game = Mancala::default();
        let s = apply_move(game.initial(), 3);
        let mm = Searcher::new(2).minimax(&s);
        let ab = Searcher::new(2).alpha_beta(&s);
        assert_eq!(mm.best_move, ab.best_move);
        assert_eq!(mm.score, ab.score);
        assert!(s.moves.contains(&mm.best_move.unwrap()));
    }

    #[test]
    fn test_no_moves_returns_none() {
        let s = state(&[0, 0, 0, 6, 1, 2, 3, 0], PlayerId::One);
        assert!(s.moves.is_empty());
        let result = Searcher::new(3).alpha_beta(&s);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 6 - 6);
        assert_eq!(minimax_decision(&s, 3), None);
    }

    #[test]
    fn test_custom_evaluator_and_cutoff() {
        let game = Mancala::default();
        // Prefer keeping stones on our own side; look one move ahead only.
        let mut searcher = Searcher::new(10)
            .with_cutoff(|_, depth| depth >= 1)
            .with_evaluator(|s, p| s.board.side_total(p) as Score);
        let result = searcher.minimax(game.initial());
        assert_eq!(result.nodes, 7);
        // Moves 1 and 2 keep all four sown stones at home.
        assert_eq!(result.best_move, Some(1));
        assert_eq!(result.score, 24);
    }

    #[test]
    fn test_alpha_beta_prunes() {
        let game = Mancala::default();
        let mut mm = Searcher::new(3).with_trace();
        let mut ab = Searcher::new(3).with_trace();
        let r1 = mm.minimax(game.initial());
        let r2 = ab.alpha_beta(game.initial());
        assert_eq!(r1.best_move, r2.best_move);
        assert_eq!(r1.score, r2.score);
        assert!(r2.nodes < r1.nodes);
        assert_eq!(mm.visited().len() as u64, r1.nodes);
        assert_eq!(ab.visited().len() as u64, r2.nodes);
        assert!(mm.visited().iter().all(|p| p.len() <= 4));
    }

    #[test]
    fn test_free_functions_agree() {
        let game = Mancala::new(4, 3).unwrap();
        let s = game.initial();
        assert_eq!(minimax_decision(s, 2), alpha_beta_search(s, 2));
    }
}
