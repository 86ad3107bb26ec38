//! Leaf scoring for the search.
//!
//! All scores are from the point of view of the side the search is playing
//! for: positive is good for the AI, negative for its opponent.

use crate::tic_tac_toe::{Board, Cell, GameState, Player, LINES};

/// Magnitude of a win under [`Scoring::Heuristic`].
pub const HEURISTIC_WIN: i32 = 10;

/// Score of an immediate win under [`Scoring::DepthAdjusted`].
pub const DEPTH_ADJUSTED_WIN: i32 = 10;

/// How leaves of the search tree are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scoring {
    /// +1 win, -1 loss, 0 draw. Depth plays no part.
    #[default]
    Terminal,
    /// `10 - depth` for a win, `depth - 10` for a loss, so quicker wins and
    /// slower losses are preferred.
    DepthAdjusted,
    /// +-10 for a win or loss, otherwise the open-line count from
    /// [`heuristic`]. The only scoring that can rate an unfinished board.
    Heuristic,
}

impl Scoring {
    /// Scores a finished game found `depth` plies below the root.
    pub fn terminal(self, state: GameState, ai: Player, depth: u32) -> i32 {
        let sign = match state {
            GameState::Win(player) if player == ai => 1,
            GameState::Win(_) => -1,
            GameState::Draw | GameState::Ongoing => return 0,
        };
        match self {
            Scoring::Terminal => sign,
            Scoring::DepthAdjusted => sign * (DEPTH_ADJUSTED_WIN - depth as i32),
            Scoring::Heuristic => sign * HEURISTIC_WIN,
        }
    }

    /// Scores a board where the search stopped before the game ended.
    pub fn horizon(self, board: &Board, ai: Player) -> i32 {
        match self {
            Scoring::Heuristic => heuristic(board, ai),
            // Without a static evaluator an unfinished game is as good as a draw.
            Scoring::Terminal | Scoring::DepthAdjusted => 0,
        }
    }
}

/// Static evaluation of `board` for `ai`.
///
/// A won board is worth +-[`HEURISTIC_WIN`]. Otherwise every line holding
/// marks of only one player adds that player's mark count, positively for
/// `ai` and negatively for the opponent. Lines with both players' marks, and
/// empty lines, add nothing.
pub fn heuristic(board: &Board, ai: Player) -> i32 {
    match board.check_winner() {
        Some(player) if player == ai => return HEURISTIC_WIN,
        Some(_) => return -HEURISTIC_WIN,
        None => {}
    }

    LINES
        .iter()
        .map(|line| {
            let cells = board.line(*line);
            let mine = cells.iter().filter(|c| **c == Cell::Filled(ai)).count() as i32;
            let theirs = cells
                .iter()
                .filter(|c| **c == Cell::Filled(ai.opponent()))
                .count() as i32;
            match (mine, theirs) {
                (m, 0) => m,
                (0, t) => -t,
                _ => 0,
            }
        })
        .sum()
}
