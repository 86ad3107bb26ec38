use std::fmt;
use std::str::FromStr;

use crate::error::{MoveError, ParseBoardError};

/// Side length of the board.
pub const SIZE: usize = 3;

/// Every winning line, rows first, then columns, then the two diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Player),
}

/// A board coordinate. Always on the board once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Result<Self, MoveError> {
        if row >= SIZE || col >= SIZE {
            return Err(MoveError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major position, 0 for the top-left cell and 8 for the bottom-right.
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    pub(crate) fn at(row: usize, col: usize) -> Self {
        debug_assert!(row < SIZE && col < SIZE);
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Result of inspecting a board for the end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Win(Player),
    Draw,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Ongoing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    spots: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mv: Move) -> Cell {
        self.spots[mv.row][mv.col]
    }

    /// Places `player`'s mark, leaving the board untouched if the cell is taken.
    pub fn apply(&mut self, mv: Move, player: Player) -> Result<(), MoveError> {
        match self.spots[mv.row][mv.col] {
            Cell::Empty => {
                self.spots[mv.row][mv.col] = Cell::Filled(player);
                Ok(())
            }
            Cell::Filled(_) => Err(MoveError::Occupied(mv)),
        }
    }

    // Search backtracking: callers only ever clear cells they just filled.
    pub(crate) fn place(&mut self, mv: Move, player: Player) {
        self.spots[mv.row][mv.col] = Cell::Filled(player);
    }

    pub(crate) fn clear(&mut self, mv: Move) {
        self.spots[mv.row][mv.col] = Cell::Empty;
    }

    /// Empty cells in row-major order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(SIZE * SIZE);
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.spots[row][col] == Cell::Empty {
                    moves.push(Move::at(row, col));
                }
            }
        }
        moves
    }

    pub fn is_full(&self) -> bool {
        self.spots.iter().flatten().all(|cell| *cell != Cell::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.spots.iter().flatten().all(|cell| *cell == Cell::Empty)
    }

    pub fn count(&self, player: Player) -> usize {
        self.spots
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Filled(player))
            .count()
    }

    pub fn line(&self, line: [(usize, usize); 3]) -> [Cell; 3] {
        line.map(|(row, col)| self.spots[row][col])
    }

    /// The first completed line and its owner, scanning rows, columns, then diagonals.
    pub fn winning_line(&self) -> Option<(Player, [(usize, usize); 3])> {
        LINES.iter().find_map(|line| match self.line(*line) {
            [Cell::Filled(player), b, c] if b == Cell::Filled(player) && c == b => {
                Some((player, *line))
            }
            _ => None,
        })
    }

    pub fn check_winner(&self) -> Option<Player> {
        self.winning_line().map(|(player, _)| player)
    }

    pub fn state(&self) -> GameState {
        if let Some(player) = self.check_winner() {
            GameState::Win(player)
        } else if self.is_full() {
            GameState::Draw
        } else {
            GameState::Ongoing
        }
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Reads rows of `X`, `O` and `_` (or `.`), with `/`, whitespace or newlines between rows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for c in s.chars() {
            match c {
                'X' | 'x' => cells.push(Cell::Filled(Player::X)),
                'O' | 'o' => cells.push(Cell::Filled(Player::O)),
                '_' | '.' => cells.push(Cell::Empty),
                '/' => {}
                c if c.is_whitespace() => {}
                c => return Err(ParseBoardError::BadCell(c)),
            }
        }
        if cells.len() != SIZE * SIZE {
            return Err(ParseBoardError::WrongSize(cells.len()));
        }

        let mut board = Board::new();
        for (i, cell) in cells.into_iter().enumerate() {
            board.spots[i / SIZE][i % SIZE] = cell;
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.spots {
            for spot in row {
                let symbol = match spot {
                    Cell::Empty => ".",
                    Cell::Filled(Player::X) => "X",
                    Cell::Filled(Player::O) => "O",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
