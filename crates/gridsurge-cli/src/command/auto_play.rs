use std::path::{Path, PathBuf};

use chrono::Utc;
use gridsurge_engine::{
    ClearEvent, EngineConfig, GameSession, GameStats, HighScoreStore, MemoryHighScore, PieceSeed,
};
use serde::Serialize;

use crate::{
    planner::{Planner, Strategy},
    schema::{
        high_score::JsonFileHighScore,
        record::{RecordedGame, TurnRecord},
    },
    util::Output,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Number of games to play
    #[clap(long, default_value_t = 1)]
    games: u64,
    /// Game `i` is seeded with `base_seed + i`; random when omitted
    #[clap(long)]
    base_seed: Option<u64>,
    /// Placement strategy (Greedy or FirstFit)
    #[clap(long, default_value_t = Strategy::Greedy)]
    strategy: Strategy,
    /// Stop a game after this many placements
    #[clap(long, default_value_t = 10_000)]
    turn_limit: usize,
    /// Directory to save a recording of every game to
    #[clap(long)]
    record_dir: Option<PathBuf>,
    /// File to write the JSON summary to; stdout when omitted
    #[clap(long)]
    output: Option<PathBuf>,
    /// File to keep the high score in; kept in memory only when omitted
    #[clap(long)]
    high_score_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct AutoPlaySummary {
    strategy: String,
    games: Vec<GameSummary>,
    best_score: usize,
    mean_score: f64,
    high_score: usize,
}

#[derive(Debug, Clone, Serialize)]
struct GameSummary {
    seed: PieceSeed,
    stats: GameStats,
    max_streak: u32,
    reached_turn_limit: bool,
    new_high_score: bool,
}

/// Outcome of one automated game.
#[derive(Debug)]
struct PlayedGame {
    turns: Vec<TurnRecord>,
    reached_turn_limit: bool,
    new_high_score: bool,
}

pub(crate) fn run(config: EngineConfig, arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        games,
        base_seed,
        strategy,
        turn_limit,
        record_dir,
        output,
        high_score_file,
    } = arg;

    let base_seed = base_seed.unwrap_or_else(rand::random);
    let planner = Planner::new(*strategy);
    let mut best_in_memory = 0;
    let mut summaries = Vec::new();

    for i in 0..*games {
        let seed = PieceSeed::from_u64(base_seed.wrapping_add(i));
        let store: Box<dyn HighScoreStore> = match high_score_file {
            Some(path) => Box::new(JsonFileHighScore::new(path.clone())),
            None => Box::new(MemoryHighScore::new(best_in_memory)),
        };
        let mut session = GameSession::with_seed(config.clone(), store, seed)?;
        session.restart();

        let PlayedGame {
            turns,
            reached_turn_limit,
            new_high_score,
        } = play_game(&mut session, &planner, *turn_limit, record_dir.is_some());
        let state = session.state();
        tracing::info!(
            game = i,
            %seed,
            score = state.score(),
            reached_turn_limit,
            "finished game"
        );
        eprintln!(
            "Game {}/{}: score {} ({} blocks, {} lines)",
            i + 1,
            games,
            state.score(),
            state.stats().blocks_placed(),
            state.stats().lines_cleared()
        );

        if let Some(dir) = record_dir {
            save_recording(dir, planner.strategy(), seed, &session, turns, i)?;
        }

        best_in_memory = best_in_memory.max(state.high_score());
        summaries.push(GameSummary {
            seed,
            stats: state.stats().clone(),
            max_streak: state.streak().max().max(1),
            reached_turn_limit,
            new_high_score,
        });
    }

    let summary = summarize(planner.strategy(), summaries, best_in_memory);
    Output::save_json(&summary, output.clone())?;
    Ok(())
}

fn play_game(
    session: &mut GameSession,
    planner: &Planner,
    turn_limit: usize,
    record: bool,
) -> PlayedGame {
    let mut played = PlayedGame {
        turns: Vec::new(),
        reached_turn_limit: true,
        new_high_score: false,
    };

    for turn in 0..turn_limit {
        let state = session.state();
        let Some(plan) = planner.select_best_turn(state) else {
            played.reached_turn_limit = false;
            break;
        };
        let before = record.then(|| (state.board().clone(), state.queue()[plan.slot].clone()));

        let result = match session.propose_placement(plan.slot, plan.x, plan.y) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, ?plan, "planner proposed a rejected placement");
                played.reached_turn_limit = false;
                break;
            }
        };

        if let Some((before_placement, piece)) = before {
            played.turns.push(TurnRecord {
                turn,
                before_placement,
                slot: plan.slot,
                piece,
                origin: (plan.x, plan.y),
                lines_cleared: result
                    .clear_event
                    .as_ref()
                    .map_or(0, ClearEvent::total_lines),
                score_delta: result.score_delta,
            });
        }

        if result.terminal {
            played.reached_turn_limit = false;
            played.new_high_score = result.new_high_score;
            break;
        }
    }
    played
}

fn save_recording(
    record_dir: &Path,
    strategy: Strategy,
    seed: PieceSeed,
    session: &GameSession,
    turns: Vec<TurnRecord>,
    index: u64,
) -> anyhow::Result<()> {
    let timestamp = Utc::now();
    let filename = format!(
        "auto_{strategy}_{}_{index}.json",
        timestamp.format("%Y%m%d_%H%M%S")
    );
    let state = session.state();
    let data = RecordedGame {
        recorded_at: timestamp,
        seed,
        strategy: strategy.to_string(),
        final_stats: state.stats().clone(),
        max_streak: state.streak().max().max(1),
        turns,
    };

    let mut output = Output::open(record_dir.join(filename))?;
    output.write_json(&data)?;
    eprintln!("Saved recording to {}", output.display_path());
    Ok(())
}

fn summarize(strategy: Strategy, games: Vec<GameSummary>, high_score: usize) -> AutoPlaySummary {
    let best_score = games.iter().map(|g| g.stats.score()).max().unwrap_or(0);
    let total: usize = games.iter().map(|g| g.stats.score()).sum();
    #[expect(clippy::cast_precision_loss)]
    let mean_score = if games.is_empty() {
        0.0
    } else {
        total as f64 / games.len() as f64
    };
    AutoPlaySummary {
        strategy: strategy.to_string(),
        games,
        best_score,
        mean_score,
        high_score,
    }
}
