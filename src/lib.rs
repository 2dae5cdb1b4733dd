//! Mancala-AI: a Mancala rules engine with minimax and alpha-beta players.
//!
//! This crate implements single-row Mancala (sowing with captures, no extra
//! turns) and a depth-bounded adversarial search that picks moves for a
//! computer player.
//!
//! ## Modules
//!
//! - [`constants`] - Default dimensions and search parameters
//! - [`board`] - Pit/store layout and board rendering
//! - [`game`] - Game configuration and the initial state
//! - [`position`] - Game state and rules (sowing, captures, scoring)
//! - [`search`] - Bounded minimax and alpha-beta search
//! - [`player`] - Random, search-backed and interactive strategies
//! - [`playout`] - Full games and batch simulation
//!
//! ## Example
//!
//! ```
//! use mancala_ai::game::Mancala;
//! use mancala_ai::position::{apply_move, terminal_test};
//! use mancala_ai::search::alpha_beta_search;
//!
//! // Create a new game: 6 pits per side, 4 stones per pit
//! let game = Mancala::new(6, 4).unwrap();
//!
//! // Let the engine pick player 1's opening move
//! let mv = alpha_beta_search(game.initial(), 3).unwrap();
//! let state = apply_move(game.initial(), mv);
//! assert!(!terminal_test(&state));
//! println!("{state}");
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod player;
pub mod playout;
pub mod position;
pub mod search;
