//! Round state machine and scoring
//!
//! The engine owns every piece of game data: the board, the round counter,
//! the score, the alternation flag and the lifecycle state. A presentation
//! layer drives it with discrete calls and reads it back through
//! [`Engine::snapshot`] or the individual queries.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{self, Board, Cell, Player, CELLS};
use crate::error::PlaceError;

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Created but not yet initialized
    AwaitingStart,
    /// Accepting marks
    InProgress,
    /// A win or draw has been recorded; waiting for the next round
    RoundOver,
}

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundResult {
    Won(Player),
    Draw,
}

impl RoundResult {
    pub fn winner(self) -> Option<Player> {
        match self {
            RoundResult::Won(player) => Some(player),
            RoundResult::Draw => None,
        }
    }
}

/// Rounds won by each player since the last score reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub o: u32,
    pub x: u32,
}

impl Score {
    pub fn points(&self, player: Player) -> u32 {
        match player {
            Player::O => self.o,
            Player::X => self.x,
        }
    }

    fn award(&mut self, player: Player) {
        match player {
            Player::O => self.o += 1,
            Player::X => self.x += 1,
        }
    }
}

/// An accepted placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub player: Player,
    pub col: usize,
    pub row: usize,
    /// Set when this mark ended the round
    pub result: Option<RoundResult>,
}

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub current_player: Player,
    pub state: GameState,
    pub score: Score,
    pub result: Option<RoundResult>,
    pub round: usize,
}

/// Tic-tac-toe round engine
///
/// # Example
///
/// ```rust
/// use tictactoe_core::{Engine, GameState, Player, RoundResult};
///
/// let mut engine = Engine::new();
/// engine.initialize_with_starter(Player::O);
///
/// for (col, row) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
///     engine.place_mark(col, row).unwrap();
/// }
///
/// assert_eq!(engine.state(), GameState::RoundOver);
/// assert_eq!(engine.result(), Some(RoundResult::Won(Player::O)));
/// assert_eq!(engine.score().o, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    /// Marks placed since the board was last cleared
    round: usize,
    score: Score,
    /// `false`: O moves on even rounds. `true`: X moves on even rounds.
    alternation: bool,
    state: GameState,
    result: Option<RoundResult>,
}

impl Engine {
    /// Create an engine waiting for [`Engine::initialize`]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            round: 0,
            score: Score::default(),
            alternation: false,
            state: GameState::AwaitingStart,
            result: None,
        }
    }

    /// Start a fresh game with the opening player derived from `seed`
    ///
    /// The seed parity picks the alternation flag, and loading the first
    /// round flips it: even seeds open with X, odd seeds with O.
    pub fn initialize(&mut self, seed: u64) {
        self.start(seed % 2 == 1);
    }

    /// Start a fresh game with a fixed opening player
    pub fn initialize_with_starter(&mut self, starter: Player) {
        self.start(starter == Player::O);
    }

    fn start(&mut self, alternation: bool) {
        self.state = GameState::AwaitingStart;
        self.alternation = alternation;
        self.load_round();
        self.reset_scores();
        info!(starter = %self.starting_player(), "game initialized");
    }

    /// Place the current player's mark at `(col, row)`
    ///
    /// Rejections never mutate the engine.
    pub fn place_mark(&mut self, col: usize, row: usize) -> Result<Placement, PlaceError> {
        if self.state != GameState::InProgress {
            return Err(PlaceError::WrongState(self.state));
        }
        let idx = board::index_of(col, row).ok_or(PlaceError::InvalidCoordinate { col, row })?;
        if !self.board.cells()[idx].is_empty() {
            return Err(PlaceError::CellOccupied { col, row });
        }

        let player = self.current_player();
        self.board.set(idx, Cell::from(player));
        self.round += 1;
        debug!(%player, col, row, round = self.round, "mark placed");

        self.evaluate_outcome();

        Ok(Placement {
            player,
            col,
            row,
            result: self.result,
        })
    }

    /// Close the round on a completed line or a full board
    ///
    /// Runs after `round` has been incremented, so a full board is
    /// `round == CELLS`.
    fn evaluate_outcome(&mut self) {
        let result = match self.board.winner() {
            Some(player) => {
                self.score.award(player);
                RoundResult::Won(player)
            }
            None if self.round >= CELLS => RoundResult::Draw,
            None => return,
        };

        self.state = GameState::RoundOver;
        self.result = Some(result);
        info!(?result, score_o = self.score.o, score_x = self.score.x, "round over");
    }

    /// Clear the board and hand the opening move to the other player
    ///
    /// Scores are kept. Accepted from any state.
    pub fn load_next_round(&mut self) {
        self.load_round();
        debug!(starter = %self.starting_player(), "next round loaded");
    }

    fn load_round(&mut self) {
        self.board.clear();
        self.round = 0;
        self.alternation = !self.alternation;
        self.result = None;
        self.state = GameState::InProgress;
    }

    /// Zero both scores without touching the board or state
    pub fn reset_scores(&mut self) {
        self.score = Score::default();
    }

    /// Start a new round and zero the scores
    pub fn restart(&mut self) {
        self.load_next_round();
        self.reset_scores();
        info!("game restarted");
    }

    /// Whose turn it is, from the round parity and the alternation flag
    pub fn current_player(&self) -> Player {
        if (self.round % 2 == 1) ^ self.alternation {
            Player::X
        } else {
            Player::O
        }
    }

    /// The player who opened the current round
    pub fn starting_player(&self) -> Player {
        if self.alternation {
            Player::X
        } else {
            Player::O
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    pub fn winner(&self) -> Option<Player> {
        self.result.and_then(RoundResult::winner)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            current_player: self.current_player(),
            state: self.state,
            score: self.score,
            result: self.result,
            round: self.round,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(starter: Player) -> Engine {
        let mut engine = Engine::new();
        engine.initialize_with_starter(starter);
        engine
    }

    fn play(engine: &mut Engine, moves: &[(usize, usize)]) {
        for &(col, row) in moves {
            engine.place_mark(col, row).unwrap();
        }
    }

    #[test]
    fn test_new_engine_awaits_start() {
        let engine = Engine::new();
        assert_eq!(engine.state(), GameState::AwaitingStart);
        assert_eq!(engine.round(), 0);
        assert_eq!(engine.score(), Score::default());
        assert_eq!(engine.result(), None);
    }

    #[test]
    fn test_place_rejected_before_initialize() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.place_mark(0, 0),
            Err(PlaceError::WrongState(GameState::AwaitingStart))
        );
        assert_eq!(engine.board().occupied(), 0);
    }

    #[test]
    fn test_initialize_seed_parity() {
        let mut engine = Engine::new();
        engine.initialize(42);
        assert_eq!(engine.state(), GameState::InProgress);
        assert_eq!(engine.current_player(), Player::X);

        engine.initialize(7);
        assert_eq!(engine.current_player(), Player::O);
    }

    #[test]
    fn test_initialize_clears_scores() {
        let mut engine = started(Player::O);
        play(&mut engine, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(engine.score().o, 1);

        engine.initialize(3);
        assert_eq!(engine.score(), Score::default());
        assert_eq!(engine.board().occupied(), 0);
    }

    #[test]
    fn test_turns_alternate_within_round() {
        let mut engine = started(Player::X);
        assert_eq!(engine.place_mark(1, 1).unwrap().player, Player::X);
        assert_eq!(engine.current_player(), Player::O);
        assert_eq!(engine.place_mark(0, 0).unwrap().player, Player::O);
        assert_eq!(engine.current_player(), Player::X);
    }

    #[test]
    fn test_o_wins_first_column() {
        let mut engine = started(Player::O);
        play(&mut engine, &[(0, 0), (1, 1), (0, 1), (2, 2)]);
        let placement = engine.place_mark(0, 2).unwrap();

        assert_eq!(placement.result, Some(RoundResult::Won(Player::O)));
        assert_eq!(engine.state(), GameState::RoundOver);
        assert_eq!(engine.winner(), Some(Player::O));
        assert_eq!(engine.score(), Score { o: 1, x: 0 });
    }

    #[test]
    fn test_x_wins_diagonal() {
        let mut engine = started(Player::X);
        play(&mut engine, &[(0, 0), (1, 0), (1, 1), (2, 0), (2, 2)]);
        assert_eq!(engine.result(), Some(RoundResult::Won(Player::X)));
        assert_eq!(engine.score(), Score { o: 0, x: 1 });
    }

    #[test]
    fn test_draw_on_full_board() {
        let mut engine = started(Player::O);
        // O X O / O X X / X O O, played as (col, row)
        play(&mut engine, &[
            (0, 0), (1, 0), (2, 0), (1, 1), (0, 1),
            (2, 1), (2, 2), (0, 2), (1, 2),
        ]);

        assert_eq!(engine.round(), CELLS);
        assert_eq!(engine.state(), GameState::RoundOver);
        assert_eq!(engine.result(), Some(RoundResult::Draw));
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.score(), Score::default());
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        let mut engine = started(Player::O);
        // Final O at (2, 2) completes the main diagonal on a full board
        play(&mut engine, &[
            (0, 0), (1, 0), (1, 1), (2, 0), (0, 2),
            (0, 1), (2, 1), (1, 2),
        ]);
        assert_eq!(engine.state(), GameState::InProgress);
        let placement = engine.place_mark(2, 2).unwrap();
        assert_eq!(placement.result, Some(RoundResult::Won(Player::O)));
        assert_eq!(engine.score().o, 1);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut engine = started(Player::O);
        engine.place_mark(1, 1).unwrap();
        let before = engine.snapshot();

        assert_eq!(
            engine.place_mark(1, 1),
            Err(PlaceError::CellOccupied { col: 1, row: 1 })
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut engine = started(Player::O);
        assert_eq!(
            engine.place_mark(3, 0),
            Err(PlaceError::InvalidCoordinate { col: 3, row: 0 })
        );
        assert_eq!(
            engine.place_mark(0, usize::MAX),
            Err(PlaceError::InvalidCoordinate { col: 0, row: usize::MAX })
        );
        assert_eq!(engine.round(), 0);
    }

    #[test]
    fn test_place_rejected_after_round_over() {
        let mut engine = started(Player::O);
        play(&mut engine, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
        assert_eq!(
            engine.place_mark(2, 0),
            Err(PlaceError::WrongState(GameState::RoundOver))
        );
        assert_eq!(engine.board().occupied(), 5);
    }

    #[test]
    fn test_next_round_alternates_starter_and_keeps_score() {
        let mut engine = started(Player::O);
        play(&mut engine, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);

        engine.load_next_round();
        assert_eq!(engine.state(), GameState::InProgress);
        assert_eq!(engine.round(), 0);
        assert_eq!(engine.board().occupied(), 0);
        assert_eq!(engine.result(), None);
        assert_eq!(engine.starting_player(), Player::X);
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(engine.score(), Score { o: 1, x: 0 });

        engine.load_next_round();
        assert_eq!(engine.starting_player(), Player::O);
    }

    #[test]
    fn test_reset_scores_only_touches_score() {
        let mut engine = started(Player::O);
        play(&mut engine, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
        let before = engine.snapshot();

        engine.reset_scores();
        let after = engine.snapshot();
        assert_eq!(after.score, Score::default());
        assert_eq!(after.board, before.board);
        assert_eq!(after.round, before.round);
        assert_eq!(after.state, before.state);
        assert_eq!(after.result, before.result);
    }

    #[test]
    fn test_restart_mid_round() {
        let mut engine = started(Player::X);
        play(&mut engine, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
        engine.load_next_round();
        engine.place_mark(1, 1).unwrap();

        engine.restart();
        assert_eq!(engine.state(), GameState::InProgress);
        assert_eq!(engine.board().occupied(), 0);
        assert_eq!(engine.score(), Score::default());
        assert_eq!(engine.starting_player(), Player::X);
    }

    #[test]
    fn test_snapshot_matches_queries() {
        let mut engine = started(Player::O);
        engine.place_mark(2, 1).unwrap();
        let snap = engine.snapshot();

        assert_eq!(snap.board.get(2, 1), Some(Cell::O));
        assert_eq!(snap.current_player, Player::X);
        assert_eq!(snap.state, GameState::InProgress);
        assert_eq!(snap.round, 1);
    }
}
