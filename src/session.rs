//! A single human-versus-AI game and its turn discipline.

use crate::error::MoveError;
use crate::move_source::MoveSource;
use crate::tic_tac_toe::{Board, GameState, Move, Player};

/// How a finished game ended, from the human's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AiWin,
    HumanWin,
    Draw,
}

/// Owns the board and alternates turns between the human and a [`MoveSource`].
///
/// The human plays `X` and the AI `O`. Either may open.
pub struct Session {
    board: Board,
    human: Player,
    first: Player,
    turn: Player,
    source: Box<dyn MoveSource>,
    render: Option<Box<dyn FnMut(&Board)>>,
}

impl Session {
    pub fn new(source: Box<dyn MoveSource>) -> Self {
        Self {
            board: Board::new(),
            human: Player::X,
            first: Player::X,
            turn: Player::X,
            source,
            render: None,
        }
    }

    /// Lets the AI make the first move of every game.
    pub fn with_ai_first(mut self, ai_first: bool) -> Self {
        self.first = if ai_first { self.ai() } else { self.human };
        self.turn = self.first;
        self
    }

    /// Called with the board after every move and after a reset.
    pub fn with_renderer(mut self, render: impl FnMut(&Board) + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human(&self) -> Player {
        self.human
    }

    pub fn ai(&self) -> Player {
        self.human.opponent()
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state() {
            GameState::Ongoing => None,
            GameState::Draw => Some(Outcome::Draw),
            GameState::Win(player) if player == self.ai() => Some(Outcome::AiWin),
            GameState::Win(_) => Some(Outcome::HumanWin),
        }
    }

    /// Applies the human's move. A refused move changes nothing.
    pub fn play_human(&mut self, mv: Move) -> Result<GameState, MoveError> {
        self.check_turn(self.human)?;
        self.commit(mv, self.human)
    }

    /// Asks the move source for the AI's move and applies it.
    pub fn play_ai(&mut self) -> Result<Move, MoveError> {
        let ai = self.ai();
        self.check_turn(ai)?;
        let mv = self
            .source
            .select_move(&self.board, ai)
            .ok_or(MoveError::NoMoveAvailable)?;
        self.commit(mv, ai)?;
        Ok(mv)
    }

    /// Clears the board for a new game.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = self.first;
        log::debug!("new game, {} to move", self.turn);
        self.render();
    }

    fn check_turn(&self, player: Player) -> Result<(), MoveError> {
        if self.state().is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.turn != player {
            return Err(MoveError::NotYourTurn(self.turn));
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move, player: Player) -> Result<GameState, MoveError> {
        self.board.apply(mv, player)?;
        self.turn = player.opponent();
        self.render();

        let state = self.state();
        if let Some(outcome) = self.outcome() {
            log::info!("game over after {} plays {}: {:?}", player, mv, outcome);
        }
        Ok(state)
    }

    fn render(&mut self) {
        if let Some(render) = self.render.as_mut() {
            render(&self.board);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell as StdCell, RefCell};
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::move_source::{random_move, RandomChoice, SearchEngine};

    /// Plays the first empty cell and counts how often it was asked.
    struct FirstEmpty(Rc<StdCell<usize>>);

    impl MoveSource for FirstEmpty {
        fn select_move(&mut self, board: &Board, _player: Player) -> Option<Move> {
            self.0.set(self.0.get() + 1);
            board.legal_moves().first().copied()
        }

        fn name(&self) -> &'static str {
            "first empty"
        }
    }

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = Session::new(Box::new(SearchEngine::pruned_search()));
        assert_eq!(session.turn(), Player::X);
        assert_eq!(session.play_ai(), Err(MoveError::NotYourTurn(Player::X)));

        session.play_human(mv(0, 0)).unwrap();
        assert_eq!(session.turn(), Player::O);
        assert_eq!(
            session.play_human(mv(0, 1)),
            Err(MoveError::NotYourTurn(Player::O))
        );

        let reply = session.play_ai().unwrap();
        assert_eq!(session.board().count(Player::O), 1);
        assert_ne!(reply, mv(0, 0));
        assert_eq!(session.turn(), Player::X);
    }

    #[test]
    fn test_occupied_cell_changes_nothing() {
        let mut session = Session::new(Box::new(SearchEngine::pruned_search()));
        session.play_human(mv(1, 1)).unwrap();
        session.play_ai().unwrap();

        let before = *session.board();
        let taken = mv(1, 1);
        assert_eq!(session.play_human(taken), Err(MoveError::Occupied(taken)));
        assert_eq!(*session.board(), before);
        assert_eq!(session.turn(), Player::X);
    }

    #[test]
    fn test_ai_never_asked_after_game_ends() {
        let asked = Rc::new(StdCell::new(0));
        let mut session = Session::new(Box::new(FirstEmpty(asked.clone())));

        // X fills the middle row while O fills the top row from the left.
        session.play_human(mv(1, 0)).unwrap();
        session.play_ai().unwrap(); // (0, 0)
        session.play_human(mv(1, 1)).unwrap();
        session.play_ai().unwrap(); // (0, 1)
        assert_eq!(session.play_human(mv(1, 2)).unwrap(), GameState::Win(Player::X));

        assert_eq!(session.outcome(), Some(Outcome::HumanWin));
        assert_eq!(session.play_ai(), Err(MoveError::GameOver));
        assert_eq!(session.play_human(mv(2, 2)), Err(MoveError::GameOver));
        assert_eq!(asked.get(), 2);
    }

    #[test]
    fn test_draw_stops_the_game() {
        let asked = Rc::new(StdCell::new(0));
        let mut session = Session::new(Box::new(FirstEmpty(asked.clone())));
        // O always takes the first empty cell; X steers the game to
        //   O O X
        //   X X O
        //   O X X
        for human in [mv(0, 2), mv(1, 0), mv(1, 1), mv(2, 1), mv(2, 2)] {
            if session.state().is_terminal() {
                break;
            }
            session.play_human(human).unwrap();
            if session.state().is_terminal() {
                break;
            }
            session.play_ai().unwrap();
        }
        assert!(session.board().is_full());
        assert_eq!(session.outcome(), Some(Outcome::Draw));
        assert_eq!(session.play_ai(), Err(MoveError::GameOver));
        assert_eq!(asked.get(), 4);
    }

    #[test]
    fn test_ai_first_and_reset() {
        let renders = Rc::new(RefCell::new(Vec::new()));
        let seen = renders.clone();
        let mut session = Session::new(Box::new(SearchEngine::pruned_search()))
            .with_ai_first(true)
            .with_renderer(move |board| seen.borrow_mut().push(*board));

        assert_eq!(session.turn(), Player::O);
        session.play_ai().unwrap();
        session.play_human(mv(2, 1)).unwrap();
        assert_eq!(renders.borrow().len(), 2);

        session.reset();
        assert!(session.board().is_empty());
        assert_eq!(session.turn(), Player::O);
        assert_eq!(renders.borrow().last(), Some(&Board::new()));
    }

    #[test]
    fn test_expert_never_loses_to_random_human() {
        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut session = Session::new(Box::new(SearchEngine::pruned_search()))
                .with_ai_first(seed % 2 == 0);

            while session.outcome().is_none() {
                if session.turn() == session.human() {
                    let human = random_move(session.board(), &mut rng).unwrap();
                    session.play_human(human).unwrap();
                } else {
                    session.play_ai().unwrap();
                }
            }
            assert_ne!(
                session.outcome(),
                Some(Outcome::HumanWin),
                "seed {}\n{}",
                seed,
                session.board()
            );
        }
    }

    #[test]
    fn test_easy_plays_legal_moves() {
        let rng = ChaCha8Rng::seed_from_u64(11);
        let mut session =
            Session::new(Box::new(RandomChoice::with_rng(rng))).with_ai_first(true);
        let mut plies = 0;
        while session.outcome().is_none() {
            if session.turn() == session.ai() {
                session.play_ai().unwrap();
            } else {
                let human = session.board().legal_moves()[0];
                session.play_human(human).unwrap();
            }
            plies += 1;
        }
        let board = session.board();
        assert_eq!(board.count(Player::X) + board.count(Player::O), plies);
        assert_eq!(session.source_name(), "random choice");
    }
}
