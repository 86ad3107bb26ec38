use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tictactoe_minimax::{
    Move, MoveSource, Outcome, RandomChoice, Scoring, SearchConfig, SearchEngine, Session,
};

#[derive(Debug, Parser)]
#[command(about = "Play tic-tac-toe against a minimax AI")]
pub struct Cli {
    /// How hard the AI tries
    #[arg(long, value_enum, default_value = "expert")]
    difficulty: Difficulty,

    /// Search used at expert difficulty
    #[arg(long, value_enum, default_value = "alpha-beta")]
    engine: Engine,

    /// Plies searched before the heuristic engine scores a board statically
    #[arg(long, default_value_t = 2)]
    horizon: u32,

    /// Leaf scoring for the minimax and alpha-beta engines
    #[arg(long, value_enum, default_value = "terminal")]
    scoring: ScoringArg,

    /// Let the AI open the game
    #[arg(long)]
    ai_first: bool,

    /// Seed for the easy AI [leave unspecified for a random seed]
    #[arg(long)]
    seed: Option<u64>,

    /// Log every searched position (needs RUST_LOG=trace)
    #[arg(long)]
    trace: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Difficulty {
    /// Random moves
    Easy,
    /// Game-tree search
    Expert,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Engine {
    Minimax,
    AlphaBeta,
    Heuristic,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ScoringArg {
    Terminal,
    DepthAdjusted,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let scoring = match self.scoring {
            ScoringArg::Terminal => Scoring::Terminal,
            ScoringArg::DepthAdjusted => Scoring::DepthAdjusted,
        };
        match self.engine {
            Engine::Minimax => SearchConfig::minimax().with_scoring(scoring),
            Engine::AlphaBeta => SearchConfig::alpha_beta().with_scoring(scoring),
            Engine::Heuristic => SearchConfig::heuristic(self.horizon),
        }
    }

    fn move_source(&self) -> Box<dyn MoveSource> {
        match (self.difficulty, self.seed) {
            (Difficulty::Easy, Some(seed)) => {
                Box::new(RandomChoice::with_rng(StdRng::seed_from_u64(seed)))
            }
            (Difficulty::Easy, None) => Box::new(RandomChoice::new()),
            (Difficulty::Expert, _) => {
                Box::new(SearchEngine::new(self.search_config()).with_trace(self.trace))
            }
        }
    }
}

fn parse_move(line: &str) -> anyhow::Result<Move> {
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected a row and a column, e.g. `1 2`");
    };
    let row: usize = row
        .parse()
        .with_context(|| format!("{row:?} is not a row number"))?;
    let col: usize = col
        .parse()
        .with_context(|| format!("{col:?} is not a column number"))?;
    Ok(Move::new(row, col)?)
}

fn prompt(text: &str) -> anyhow::Result<()> {
    print!("{text}");
    io::stdout().flush().context("failed to flush stdout")
}

pub(crate) fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let mut session = Session::new(cli.move_source())
        .with_ai_first(cli.ai_first)
        .with_renderer(|board| println!("{board}"));

    println!(
        "Welcome to Tic Tac Toe! You play {} against the {}.",
        session.human(),
        session.source_name()
    );
    println!("{}", session.board());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        while session.outcome().is_none() {
            if session.turn() == session.ai() {
                println!("AI's turn:");
                session.play_ai()?;
                continue;
            }

            prompt("Enter your move (row and column): ")?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line.context("failed to read move")?;
            let played = parse_move(&line)
                .and_then(|mv| session.play_human(mv).map_err(anyhow::Error::from));
            if let Err(err) = played {
                println!("Invalid move: {err:#}. Try again.");
            }
        }

        match session.outcome() {
            Some(Outcome::AiWin) => println!("AI wins!"),
            Some(Outcome::HumanWin) => println!("You win!"),
            Some(Outcome::Draw) | None => println!("It's a tie!"),
        }

        prompt("Play again? [y/N] ")?;
        match lines.next() {
            Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("y") => session.reset(),
            _ => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("1 2").unwrap(), Move::new(1, 2).unwrap());
        assert_eq!(parse_move("  0\t0 \n").unwrap(), Move::new(0, 0).unwrap());
        assert!(parse_move("").is_err());
        assert!(parse_move("1").is_err());
        assert!(parse_move("1 2 3").is_err());
        assert!(parse_move("a 2").is_err());
        assert!(parse_move("-1 2").is_err());
    }

    #[test]
    fn test_parse_move_out_of_range() {
        let err = parse_move("3 1").unwrap_err();
        assert_eq!(
            err.downcast_ref::<tictactoe_minimax::MoveError>(),
            Some(&tictactoe_minimax::MoveError::OutOfRange { row: 3, col: 1 })
        );
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tictactoe"]).unwrap();
        assert_eq!(cli.difficulty, Difficulty::Expert);
        assert_eq!(cli.search_config(), SearchConfig::alpha_beta());
        assert_eq!(cli.move_source().name(), "pruned search");
    }

    #[test]
    fn test_engine_selection() {
        let cli = Cli::try_parse_from(["tictactoe", "--engine", "heuristic", "--horizon", "3"])
            .unwrap();
        assert_eq!(cli.search_config(), SearchConfig::heuristic(3));

        let cli = Cli::try_parse_from([
            "tictactoe",
            "--engine",
            "minimax",
            "--scoring",
            "depth-adjusted",
        ])
        .unwrap();
        assert_eq!(
            cli.search_config(),
            SearchConfig::minimax().with_scoring(Scoring::DepthAdjusted)
        );
        assert_eq!(cli.move_source().name(), "full search");
    }

    #[test]
    fn test_easy_difficulty() {
        let cli =
            Cli::try_parse_from(["tictactoe", "--difficulty", "easy", "--seed", "9"]).unwrap();
        assert_eq!(cli.move_source().name(), "random choice");
        assert!(Cli::try_parse_from(["tictactoe", "--difficulty", "hard"]).is_err());
    }
}
