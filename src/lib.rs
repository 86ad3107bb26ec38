//! Tic-tac-toe against a minimax opponent.
//!
//! [`tic_tac_toe`] holds the board and its rules, [`search`] the minimax and
//! alpha-beta search scored by [`eval`], and [`session`] runs a human-versus-AI
//! game on top of any [`move_source::MoveSource`].

pub mod error;
pub mod eval;
pub mod move_source;
pub mod search;
pub mod session;
pub mod tic_tac_toe;

pub use error::{MoveError, ParseBoardError};
pub use eval::Scoring;
pub use move_source::{MoveSource, RandomChoice, SearchEngine};
pub use search::{search, search_with, SearchConfig, SearchResult};
pub use session::{Outcome, Session};
pub use tic_tac_toe::{Board, Cell, GameState, Move, Player};
