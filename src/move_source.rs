use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::search::{search, search_with, LogTrace, SearchConfig, SearchResult};
use crate::tic_tac_toe::{Board, Move, Player};

/// Something that can pick a move for a player.
///
/// Returns `None` only when `board` has no move to offer.
pub trait MoveSource {
    fn select_move(&mut self, board: &Board, player: Player) -> Option<Move>;

    fn name(&self) -> &'static str;
}

/// Picks moves by game-tree search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine {
    config: SearchConfig,
    trace: bool,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            trace: false,
        }
    }

    /// Exhaustive minimax.
    pub fn full_search() -> Self {
        Self::new(SearchConfig::minimax())
    }

    /// Alpha-beta pruned minimax.
    pub fn pruned_search() -> Self {
        Self::new(SearchConfig::alpha_beta())
    }

    /// Log every explored node at `trace` level.
    pub fn with_trace(self, trace: bool) -> Self {
        Self { trace, ..self }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn search(&self, board: &Board, player: Player) -> Option<SearchResult> {
        if self.trace {
            search_with(board, player, &self.config, &mut LogTrace)
        } else {
            search(board, player, &self.config)
        }
    }
}

impl MoveSource for SearchEngine {
    fn select_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        let result = self.search(board, player)?;
        log::debug!(
            "{} picked {} for {} (score {}, {} nodes)",
            self.name(),
            result.best,
            player,
            result.score,
            result.nodes
        );
        Some(result.best)
    }

    fn name(&self) -> &'static str {
        match (self.config.pruning, self.config.horizon) {
            (_, Some(_)) => "heuristic search",
            (true, None) => "pruned search",
            (false, None) => "full search",
        }
    }
}

/// Picks a uniformly random empty cell.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    board.legal_moves().choose(rng).copied()
}

/// Plays uniformly random moves.
#[derive(Debug, Clone)]
pub struct RandomChoice<R = ThreadRng> {
    rng: R,
}

impl RandomChoice<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomChoice<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomChoice<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSource for RandomChoice<R> {
    fn select_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        let mv = random_move(board, &mut self.rng)?;
        log::debug!("{} picked {} for {}", self.name(), mv, player);
        Some(mv)
    }

    fn name(&self) -> &'static str {
        "random choice"
    }
}
