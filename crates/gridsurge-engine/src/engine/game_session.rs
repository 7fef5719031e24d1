use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{ClearEvent, ConfigurationError, EngineConfig, TurnError};

use super::{
    game_state::{GameState, SessionState},
    high_score::HighScoreStore,
    piece_generator::{PieceGenerator, PieceSeed},
};

/// Outcome of an accepted placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Rows and columns cleared by the placement, if any.
    pub clear_event: Option<ClearEvent>,
    /// Points added to the score by this placement.
    pub score_delta: usize,
    /// Streak value after the placement.
    pub streak_after: u32,
    /// The placement voided a running streak.
    pub streak_ended: bool,
    /// No queued piece fits anywhere: the session is now over.
    pub terminal: bool,
    /// The game ended above the previously stored high score.
    pub new_high_score: bool,
}

/// A single game, from start to game over, and its restarts.
///
/// Each call to [`propose_placement`](Self::propose_placement) runs one full turn:
///
/// 1. validate the referenced queue slot and the placement
/// 2. write the piece to the board and remove it from the queue
/// 3. detect full rows/columns, update streak and score, clear the lines
/// 4. rebuild the queue once it is empty
/// 5. end the game if no queued piece fits anywhere
///
/// A rejected proposal returns an error before anything is mutated.
///
/// # Example
///
/// ```
/// use gridsurge_engine::{EngineConfig, GameSession, MemoryHighScore, PieceSeed};
///
/// let mut session = GameSession::with_seed(
///     EngineConfig::default(),
///     Box::new(MemoryHighScore::default()),
///     PieceSeed::from_u64(7),
/// )
/// .unwrap();
/// session.restart();
///
/// let piece = session.state().queue()[0].clone();
/// let (x, y) = session.state().board().valid_origins(&piece).next().unwrap();
/// let result = session.propose_placement(0, x, y).unwrap();
/// assert_eq!(result.score_delta, piece.len());
/// ```
#[derive(Debug)]
pub struct GameSession<R = Pcg32> {
    config: EngineConfig,
    generator: PieceGenerator<R>,
    state: GameState,
    store: Box<dyn HighScoreStore>,
    seed: Option<PieceSeed>,
}

impl GameSession<Pcg32> {
    /// Creates a session with a random seed.
    pub fn new(
        config: EngineConfig,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_seed(config, store, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible piece sequence.
    pub fn with_seed(
        config: EngineConfig,
        store: Box<dyn HighScoreStore>,
        seed: PieceSeed,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let generator =
            PieceGenerator::with_seed(config.shapes.clone(), config.color_count, seed)?;
        let mut this = Self::from_parts(config, generator, store);
        this.seed = Some(seed);
        Ok(this)
    }
}

impl<R> GameSession<R>
where
    R: Rng,
{
    /// Creates a session drawing pieces from an arbitrary random source.
    pub fn with_rng(
        config: EngineConfig,
        store: Box<dyn HighScoreStore>,
        rng: R,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let generator = PieceGenerator::with_rng(config.shapes.clone(), config.color_count, rng)?;
        Ok(Self::from_parts(config, generator, store))
    }

    fn from_parts(
        config: EngineConfig,
        generator: PieceGenerator<R>,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let high_score = load_high_score(store.as_ref());
        let state = GameState::new(config.streak_leeway, high_score);
        Self {
            config,
            generator,
            state,
            store,
            seed: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seed the piece sequence was generated from, when the session was seeded.
    #[must_use]
    pub fn seed(&self) -> Option<PieceSeed> {
        self.seed
    }

    #[must_use]
    pub fn high_score_store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    /// Discards the current game and starts a fresh one.
    ///
    /// The board is emptied, score and streak reset, the stored high score re-read
    /// and a new batch of pieces drawn. Works from any state.
    ///
    /// The first batch always fits somewhere, since every catalog shape fits an empty
    /// board. Were it terminal, the game would end here without reporting a new high
    /// score, as the fresh score is 0.
    pub fn restart(&mut self) -> &GameState {
        let high_score = load_high_score(self.store.as_ref());
        self.state = GameState::new(self.config.streak_leeway, high_score);
        self.generator
            .fill_queue(&mut self.state.queue, self.config.queue_size);
        self.state.session_state = SessionState::Playing;
        tracing::info!(high_score, "game started");

        if self.state.board.is_terminal(&self.state.queue) {
            self.finish();
        }
        &self.state
    }

    /// Places the piece in queue slot `slot` with its origin at `(x, y)`.
    ///
    /// Returns an error and leaves the state untouched if the session is not
    /// playing, the slot is empty, or the piece does not fit.
    pub fn propose_placement(
        &mut self,
        slot: usize,
        x: i32,
        y: i32,
    ) -> Result<TurnResult, TurnError> {
        if !self.state.session_state.is_playing() {
            return Err(TurnError::NotPlaying);
        }
        let state = &mut self.state;
        let piece = state
            .queue
            .get(slot)
            .ok_or(TurnError::EmptyQueueReference {
                slot,
                len: state.queue.len(),
            })?;

        state.board.apply(piece, x, y)?;
        let piece = state.queue.remove(slot);

        let event = state.board.detect_full_lines();
        let lines = event.total_lines();
        let update = state.streak.record(lines);
        let score_delta = state
            .stats
            .record_placement(piece.len(), lines, update.streak);
        state.board.clear(&event);

        tracing::debug!(
            slot,
            x,
            y,
            cells = piece.len(),
            lines,
            score_delta,
            streak = update.streak,
            "placed piece"
        );
        if update.ended {
            tracing::debug!("streak ended");
        }

        if state.queue.is_empty() {
            self.generator
                .fill_queue(&mut state.queue, self.config.queue_size);
        }

        let terminal = state.board.is_terminal(&state.queue);
        let new_high_score = terminal && self.finish();

        Ok(TurnResult {
            clear_event: (lines > 0).then_some(event),
            score_delta,
            streak_after: update.streak,
            streak_ended: update.ended,
            terminal,
            new_high_score,
        })
    }

    /// Moves to `GameOver` and settles the high score. Returns whether it was beaten.
    fn finish(&mut self) -> bool {
        let state = &mut self.state;
        state.session_state = SessionState::GameOver;

        let score = state.stats.score();
        let new_high_score = score > state.high_score;
        if new_high_score {
            state.high_score = score;
            if let Err(e) = self.store.save(score) {
                tracing::warn!(error = %e, score, "failed to save high score");
            }
        }

        tracing::info!(
            score,
            lines_cleared = state.stats.lines_cleared(),
            blocks_placed = state.stats.blocks_placed(),
            max_streak = state.streak.max(),
            new_high_score,
            "game over"
        );
        new_high_score
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

fn load_high_score(store: &dyn HighScoreStore) -> usize {
    store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load high score, starting from 0");
        0
    })
}
