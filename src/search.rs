//! Minimax search over the full game tree, with optional alpha-beta pruning.
//!
//! The search plays for one side (the AI) at the root and alternates with
//! its opponent below it. Hypothetical moves are made on a private copy of
//! the board and taken back after each child has been scored, so the caller's
//! board is never touched.

use crate::eval::Scoring;
use crate::tic_tac_toe::{Board, Move, Player};

/// How a search is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Skip siblings once `beta <= alpha`.
    pub pruning: bool,
    pub scoring: Scoring,
    /// Plies below the root after which unfinished boards are scored
    /// statically instead of searched. `None` searches to the end of the game.
    pub horizon: Option<u32>,
}

impl SearchConfig {
    /// Plain exhaustive minimax.
    pub fn minimax() -> Self {
        Self {
            pruning: false,
            scoring: Scoring::Terminal,
            horizon: None,
        }
    }

    /// Exhaustive minimax with alpha-beta pruning.
    pub fn alpha_beta() -> Self {
        Self {
            pruning: true,
            ..Self::minimax()
        }
    }

    /// Alpha-beta with the open-line heuristic, cut off `horizon` plies deep.
    pub fn heuristic(horizon: u32) -> Self {
        Self {
            pruning: true,
            scoring: Scoring::Heuristic,
            horizon: Some(horizon),
        }
    }

    pub fn with_scoring(self, scoring: Scoring) -> Self {
        Self { scoring, ..self }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::alpha_beta()
    }
}

/// The outcome of a search from a board with at least one move left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best: Move,
    /// Backed-up score of `best`, from the AI's point of view.
    pub score: i32,
    /// Number of positions visited, the root included.
    pub nodes: u64,
}

/// A position the search has finished scoring.
#[derive(Debug)]
pub struct NodeVisit<'a> {
    pub board: &'a Board,
    /// Plies below the root.
    pub depth: u32,
    pub to_move: Player,
    /// Exact for unpruned nodes; a bound when siblings were cut off below it.
    pub score: i32,
}

/// Receives every node the search scores.
pub trait SearchObserver {
    fn on_node(&mut self, visit: &NodeVisit<'_>);
}

impl<F> SearchObserver for F
where
    F: FnMut(&NodeVisit<'_>),
{
    fn on_node(&mut self, visit: &NodeVisit<'_>) {
        self(visit)
    }
}

/// Writes each visited node to the `trace` log level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl SearchObserver for LogTrace {
    fn on_node(&mut self, visit: &NodeVisit<'_>) {
        log::trace!(
            "depth {} ({} to move) score {}\n{}",
            visit.depth,
            visit.to_move,
            visit.score,
            visit.board
        );
    }
}

/// Searches for `ai`'s best move on `board`.
///
/// Returns `None` when the game on `board` is already over, which includes
/// every full board.
pub fn search(board: &Board, ai: Player, config: &SearchConfig) -> Option<SearchResult> {
    search_with(board, ai, config, &mut |_: &NodeVisit<'_>| {})
}

/// Like [`search`], reporting each scored node to `observer`.
pub fn search_with(
    board: &Board,
    ai: Player,
    config: &SearchConfig,
    observer: &mut dyn SearchObserver,
) -> Option<SearchResult> {
    if board.state().is_terminal() {
        return None;
    }
    let mut searcher = Searcher {
        board: *board,
        ai,
        config: *config,
        observer,
        nodes: 0,
    };
    searcher.root()
}

struct Searcher<'a> {
    board: Board,
    ai: Player,
    config: SearchConfig,
    observer: &'a mut dyn SearchObserver,
    nodes: u64,
}

impl Searcher<'_> {
    fn root(&mut self) -> Option<SearchResult> {
        self.nodes += 1;
        let mut alpha = i32::MIN;
        let mut best: Option<(Move, i32)> = None;

        for mv in self.board.legal_moves() {
            self.board.place(mv, self.ai);
            let score = self.minimax(1, false, alpha, i32::MAX);
            self.board.clear(mv);

            // Strictly better only, so ties go to the earliest move in row-major order.
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                alpha = alpha.max(score);
            }
        }

        let (best, score) = best?;
        self.observer.on_node(&NodeVisit {
            board: &self.board,
            depth: 0,
            to_move: self.ai,
            score,
        });
        Some(SearchResult {
            best,
            score,
            nodes: self.nodes,
        })
    }

    fn minimax(&mut self, depth: u32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        let to_move = if maximizing { self.ai } else { self.ai.opponent() };
        let state = self.board.state();

        let score = if state.is_terminal() {
            self.config.scoring.terminal(state, self.ai, depth)
        } else if self.config.horizon.is_some_and(|horizon| depth >= horizon) {
            self.config.scoring.horizon(&self.board, self.ai)
        } else {
            let mut best = if maximizing { i32::MIN } else { i32::MAX };
            for mv in self.board.legal_moves() {
                self.board.place(mv, to_move);
                let score = self.minimax(depth + 1, !maximizing, alpha, beta);
                self.board.clear(mv);

                if maximizing {
                    best = best.max(score);
                    alpha = alpha.max(best);
                } else {
                    best = best.min(score);
                    beta = beta.min(best);
                }
                if self.config.pruning && beta <= alpha {
                    break;
                }
            }
            best
        };

        self.observer.on_node(&NodeVisit {
            board: &self.board,
            depth,
            to_move,
            score,
        });
        score
    }
}
