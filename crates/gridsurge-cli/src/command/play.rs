use std::{
    io::{self, BufRead as _, Write},
    path::PathBuf,
    str::FromStr,
};

use anyhow::Context as _;
use gridsurge_engine::{
    BOARD_SIZE, Cell, EngineConfig, GameSession, GameState, HighScoreStore, MemoryHighScore,
    Piece, PieceSeed, TurnError, TurnResult,
};

use crate::schema::high_score::JsonFileHighScore;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Seed for the piece sequence (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// File to keep the high score in; kept in memory only when omitted
    #[clap(long)]
    high_score_file: Option<PathBuf>,
}

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerInput {
    Place { slot: usize, x: i32, y: i32 },
    Restart,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
enum InputError {
    #[display("expected `<slot> <x> <y>`, `r` or `q`, got {input:?}")]
    Unrecognized { input: String },
    #[display("{token:?} is not a number")]
    InvalidNumber { token: String },
}

impl FromStr for PlayerInput {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn number<T: FromStr>(token: &str) -> Result<T, InputError> {
            token.parse().map_err(|_| InputError::InvalidNumber {
                token: token.to_owned(),
            })
        }

        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            ["q" | "quit"] => Ok(Self::Quit),
            ["r" | "restart"] => Ok(Self::Restart),
            [slot, x, y] => Ok(Self::Place {
                slot: number(slot)?,
                x: number(x)?,
                y: number(y)?,
            }),
            _ => Err(InputError::Unrecognized {
                input: s.trim().to_owned(),
            }),
        }
    }
}

fn high_score_store(path: Option<PathBuf>) -> Box<dyn HighScoreStore> {
    match path {
        Some(path) => Box::new(JsonFileHighScore::new(path)),
        None => Box::new(MemoryHighScore::default()),
    }
}

pub(crate) fn run(config: EngineConfig, arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg {
        seed,
        high_score_file,
    } = arg;

    let store = high_score_store(high_score_file.clone());
    let mut session = match seed {
        Some(seed) => GameSession::with_seed(config, store, *seed)?,
        None => GameSession::new(config, store)?,
    };
    session.restart();

    let mut out = io::stdout().lock();
    render(&mut out, session.state())?;
    prompt(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            prompt(&mut out)?;
            continue;
        }

        match line.parse::<PlayerInput>() {
            Ok(PlayerInput::Quit) => break,
            Ok(PlayerInput::Restart) => {
                session.restart();
                render(&mut out, session.state())?;
            }
            Ok(PlayerInput::Place { slot, x, y }) => {
                match session.propose_placement(slot, x, y) {
                    Ok(result) => {
                        report(&mut out, &result, session.state())?;
                        render(&mut out, session.state())?;
                    }
                    Err(e) => writeln!(out, "Rejected: {}", describe_rejection(&e))?,
                }
            }
            Err(e) => writeln!(out, "{e}")?,
        }
        prompt(&mut out)?;
    }

    Ok(())
}

fn describe_rejection(err: &TurnError) -> String {
    match err {
        TurnError::InvalidPlacement(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn report<W: Write>(out: &mut W, result: &TurnResult, state: &GameState) -> io::Result<()> {
    if let Some(event) = &result.clear_event {
        writeln!(
            out,
            "Cleared {} line(s), streak x{}",
            event.total_lines(),
            result.streak_after
        )?;
    } else if result.streak_ended {
        writeln!(out, "Streak lost")?;
    }
    writeln!(out, "+{} points", result.score_delta)?;

    if result.terminal {
        writeln!(out, "Game over! Final score: {}", state.score())?;
        if result.new_high_score {
            writeln!(out, "New high score!")?;
        }
        writeln!(out, "Type `r` to play again or `q` to quit")?;
    }
    Ok(())
}

fn render<W: Write>(out: &mut W, state: &GameState) -> io::Result<()> {
    writeln!(
        out,
        "Score: {}  High score: {}  Streak: {}",
        state.score(),
        state.high_score(),
        state.streak().count()
    )?;

    write!(out, "  ")?;
    for x in 0..BOARD_SIZE {
        write!(out, " {x}")?;
    }
    writeln!(out)?;
    for (y, row) in state.board().rows().enumerate() {
        write!(out, "{y} ")?;
        for cell in row.cells() {
            write!(out, " {}", cell.to_char())?;
        }
        writeln!(out)?;
    }

    for (slot, piece) in state.queue().iter().enumerate() {
        writeln!(out, "[{slot}]")?;
        for line in piece_lines(piece) {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

fn piece_lines(piece: &Piece) -> Vec<String> {
    let (width, height) = piece.bounds();
    let filled = Cell::Filled(piece.color()).to_char();
    let mut grid = vec![vec![Cell::Empty.to_char(); width]; height];
    for &(x, y) in piece.cells() {
        grid[usize::from(y)][usize::from(x)] = filled;
    }
    grid.into_iter()
        .map(|row| {
            let line: String = row.into_iter().flat_map(|c| [c, ' ']).collect();
            line.trim_end().to_owned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use gridsurge_engine::{Shape, ShapeCatalog};

    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(
            "1 3 4".parse::<PlayerInput>(),
            Ok(PlayerInput::Place { slot: 1, x: 3, y: 4 })
        );
        assert_eq!(
            "  0   -1 7 ".parse::<PlayerInput>(),
            Ok(PlayerInput::Place {
                slot: 0,
                x: -1,
                y: 7
            })
        );
        assert_eq!("q".parse::<PlayerInput>(), Ok(PlayerInput::Quit));
        assert_eq!("restart".parse::<PlayerInput>(), Ok(PlayerInput::Restart));
    }

    #[test]
    fn test_parse_input_errors() {
        assert_eq!(
            "1 a 4".parse::<PlayerInput>(),
            Err(InputError::InvalidNumber {
                token: "a".to_owned()
            })
        );
        assert_eq!(
            "-1 0 0".parse::<PlayerInput>(),
            Err(InputError::InvalidNumber {
                token: "-1".to_owned()
            })
        );
        assert!(matches!(
            "place it".parse::<PlayerInput>(),
            Err(InputError::Unrecognized { .. })
        ));
    }

    #[test]
    fn test_piece_lines() {
        let corner = Piece::new(vec![(0, 0), (0, 1), (1, 1)], 2);
        assert_eq!(piece_lines(&corner), vec!["2 .", "2 2"]);
    }

    #[test]
    fn test_render_shows_board_and_queue() {
        let config = EngineConfig {
            shapes: ShapeCatalog::new(vec![Shape::new(vec![(0, 0)], 1)]).unwrap(),
            color_count: 1,
            ..EngineConfig::default()
        };
        let mut session = GameSession::with_seed(
            config,
            Box::new(MemoryHighScore::new(50)),
            PieceSeed::from_u64(1),
        )
        .unwrap();
        session.restart();
        session.propose_placement(0, 2, 1).unwrap();

        let mut buf = Vec::new();
        render(&mut buf, session.state()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Score: 1  High score: 50  Streak: 0");
        assert_eq!(lines[1], "   0 1 2 3 4 5 6 7");
        assert_eq!(lines[3], "1  . . 0 . . . . .");
        assert_eq!(&lines[10..], ["[0]", "  0", "[1]", "  0"]);
    }
}
