//! Placement selection for automated play.
//!
//! The planner looks one placement ahead: it enumerates every valid origin of every
//! queued piece, scores the result and proposes the best one. It never searches
//! deeper than the current turn.

use gridsurge_engine::{Board, Cell, GameState, Piece};

const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// How the planner ranks candidate placements.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display,
)]
pub enum Strategy {
    /// Most lines cleared, then tightest fit against walls and filled cells
    #[default]
    Greedy,
    /// First valid origin of the first piece that fits anywhere
    FirstFit,
}

/// Queue slot and origin to propose for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPlan {
    pub slot: usize,
    pub x: i32,
    pub y: i32,
}

/// Result of placing a piece on a scratch copy of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlacementAnalysis {
    /// Rows and columns the placement would clear
    pub lines_cleared: usize,
    /// Piece cell edges touching a wall or a filled cell
    pub contacts: usize,
}

impl PlacementAnalysis {
    /// Returns `None` if the piece does not fit at `(x, y)`.
    #[must_use]
    pub fn from_board(board: &Board, piece: &Piece, x: i32, y: i32) -> Option<Self> {
        let mut after = board.clone();
        after.apply(piece, x, y).ok()?;
        let lines_cleared = after.detect_full_lines().total_lines();

        let own: Vec<_> = piece.positions_at(x, y).collect();
        let contacts = own
            .iter()
            .flat_map(|&(px, py)| NEIGHBORS.iter().map(move |&(dx, dy)| (px + dx, py + dy)))
            .filter(|pos| !own.contains(pos))
            .filter(|&(nx, ny)| !matches!(board.cell(nx, ny), Some(Cell::Empty)))
            .count();

        Some(Self {
            lines_cleared,
            contacts,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    strategy: Strategy,
}

impl Planner {
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Picks the placement to propose, or `None` if no queued piece fits.
    #[must_use]
    pub fn select_best_turn(&self, state: &GameState) -> Option<TurnPlan> {
        let board = state.board();
        let mut candidates = state.queue().iter().enumerate().flat_map(|(slot, piece)| {
            board
                .valid_origins(piece)
                .map(move |(x, y)| (TurnPlan { slot, x, y }, piece))
        });

        match self.strategy {
            Strategy::FirstFit => candidates.next().map(|(plan, _)| plan),
            Strategy::Greedy => {
                let mut best: Option<(TurnPlan, PlacementAnalysis)> = None;
                for (plan, piece) in candidates {
                    let Some(analysis) = PlacementAnalysis::from_board(board, piece, plan.x, plan.y)
                    else {
                        continue;
                    };
                    if best.is_none_or(|(_, b)| analysis > b) {
                        best = Some((plan, analysis));
                    }
                }
                best.map(|(plan, _)| plan)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gridsurge_engine::{
        EngineConfig, GameSession, MemoryHighScore, PieceSeed, Shape, ShapeCatalog,
    };

    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_analysis_counts_lines_and_contacts() {
        let board = board("1111111./......../......../......../......../......../......../........");
        let single = Piece::new(vec![(0, 0)], 0);

        let corner = PlacementAnalysis::from_board(&board, &single, 7, 0).unwrap();
        assert_eq!(corner.lines_cleared, 1);
        // right wall, top wall, filled cell on the left
        assert_eq!(corner.contacts, 3);

        let middle = PlacementAnalysis::from_board(&board, &single, 3, 4).unwrap();
        assert_eq!(middle.lines_cleared, 0);
        assert_eq!(middle.contacts, 0);

        assert_eq!(PlacementAnalysis::from_board(&board, &single, 0, 0), None);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Greedy".parse::<Strategy>().unwrap(), Strategy::Greedy);
        assert_eq!("FirstFit".parse::<Strategy>().unwrap(), Strategy::FirstFit);
        assert!("Random".parse::<Strategy>().is_err());
    }

    fn singles_session() -> GameSession {
        let config = EngineConfig {
            shapes: ShapeCatalog::new(vec![Shape::new(vec![(0, 0)], 1)]).unwrap(),
            ..EngineConfig::default()
        };
        let mut session = GameSession::with_seed(
            config,
            Box::new(MemoryHighScore::default()),
            PieceSeed::from_u64(3),
        )
        .unwrap();
        session.restart();
        session
    }

    #[test]
    fn test_first_fit_takes_first_origin() {
        let session = singles_session();
        let plan = Planner::new(Strategy::FirstFit)
            .select_best_turn(session.state())
            .unwrap();
        assert_eq!(plan, TurnPlan { slot: 0, x: 0, y: 0 });
    }

    #[test]
    fn test_greedy_completes_lines() {
        let mut session = singles_session();
        for x in 0..7 {
            session.propose_placement(0, x, 5).unwrap();
        }
        let plan = Planner::new(Strategy::Greedy)
            .select_best_turn(session.state())
            .unwrap();
        assert_eq!((plan.x, plan.y), (7, 5));
    }

    #[test]
    fn test_greedy_plays_until_game_over() {
        let mut session = GameSession::with_seed(
            EngineConfig::default(),
            Box::new(MemoryHighScore::default()),
            PieceSeed::from_u64(11),
        )
        .unwrap();
        session.restart();

        let planner = Planner::default();
        for _ in 0..10_000 {
            let Some(plan) = planner.select_best_turn(session.state()) else {
                assert!(session.state().is_game_over());
                return;
            };
            session.propose_placement(plan.slot, plan.x, plan.y).unwrap();
        }
        panic!("game did not end within 10000 placements");
    }
}
