use thiserror::Error;

use crate::tic_tac_toe::{Move, Player};

/// Reasons a move can be refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("({row}, {col}) is off the board, rows and columns run from 0 to 2")]
    OutOfRange { row: usize, col: usize },

    #[error("{0} is already taken")]
    Occupied(Move),

    #[error("it is {0}'s turn")]
    NotYourTurn(Player),

    #[error("the game is already over")]
    GameOver,

    #[error("no move available")]
    NoMoveAvailable,
}

/// Failure to read a board from its text form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("unexpected character {0:?}")]
    BadCell(char),

    #[error("expected 9 cells, found {0}")]
    WrongSize(usize),
}
