use std::collections::HashMap;

use log::{info, warn};
use thiserror::Error;

use chess_core::{Board, BoardState, Color, MoveHooks, Position};

/// Where a game stands. Every variant other than `InProgress` is terminal
/// and absorbing: no move leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Resignation { winner: Color },
    Stalemate,
    DrawByAgreement,
    DrawByRepetition,
    DrawByFiftyMove,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        *self != GameStatus::InProgress
    }
}

/// A draw a player may claim; the claim is verified against the session's
/// counters before and after the claimant's next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawClaim {
    ThreefoldRepetition,
    FiftyMove,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game has already ended")]
    GameOver,
    #[error("no piece of the moving player on {0}")]
    NotYourPiece(Position),
    #[error("moving from {0} to {1} would leave your own king in check")]
    ExposesKing(Position, Position),
    #[error("the piece on {0} cannot move to {1}")]
    IllegalDestination(Position, Position),
}

/// Positions repeat only when the side to move repeats with them.
type StateKey = (BoardState, Color);

/// One game session: the board, whose turn it is, the fingerprint counts
/// behind threefold-repetition claims, and any draw claim awaiting
/// verification.
pub struct Game {
    board: Board,
    current: Color,
    status: GameStatus,
    state_counts: HashMap<StateKey, u32>,
    pending_claim: Option<DrawClaim>,
}

impl Game {
    pub fn new() -> Self {
        let mut game = Self {
            board: Board::new(),
            current: Color::White,
            status: GameStatus::InProgress,
            state_counts: HashMap::new(),
            pending_claim: None,
        };
        game.record_state();
        game
    }

    /// Start over on the same session: fresh board, white to move, all
    /// counters cleared.
    pub fn reset(&mut self) {
        self.board.reset();
        self.current = Color::White;
        self.status = GameStatus::InProgress;
        self.state_counts.clear();
        self.pending_claim = None;
        self.record_state();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for position setup; the session's repetition
    /// counts only track moves played through `play_move`.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_player(&self) -> Color {
        self.current
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// How often the present position (with the present side to move) has
    /// occurred in this game.
    pub fn repetition_count(&self) -> u32 {
        *self
            .state_counts
            .get(&(self.board.state(), self.current))
            .unwrap_or(&0)
    }

    /// The current player resigns; their opponent wins.
    pub fn resign(&mut self) -> GameStatus {
        if !self.status.is_terminal() {
            self.status = GameStatus::Resignation {
                winner: self.current.opponent(),
            };
            info!("{:?} resigned", self.current);
        }
        self.status
    }

    /// Both players agreed to a draw. The offer/accept conversation is the
    /// caller's; the session records the outcome.
    pub fn agree_draw(&mut self) -> GameStatus {
        if !self.status.is_terminal() {
            self.status = GameStatus::DrawByAgreement;
        }
        self.status
    }

    /// Register a draw claim. It is verified right before the claimant's
    /// next move (the move is withheld if the claim holds) and once more
    /// after it; an unverified claim is dropped without error.
    pub fn claim_draw(&mut self, claim: DrawClaim) {
        self.pending_claim = Some(claim);
    }

    /// Validate and play one move for the current player, then work out
    /// the consequences: pending draw claims, checkmate, stalemate,
    /// impossibility of checkmate, and the turn change.
    pub fn play_move(
        &mut self,
        from: Position,
        to: Position,
        hooks: &mut dyn MoveHooks,
    ) -> Result<GameStatus, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if let Some(draw) = self.verified_claim() {
            self.status = draw;
            info!("draw claim verified before the move: {:?}", draw);
            return Ok(self.status);
        }

        let piece = self.board.piece_at(from);
        if piece.color != self.current {
            return Err(MoveError::NotYourPiece(from));
        }
        if !self.board.legal_moves(from).contains(&to) {
            if piece.geometric_moves(&self.board).contains(&to) {
                return Err(MoveError::ExposesKing(from, to));
            }
            return Err(MoveError::IllegalDestination(from, to));
        }

        self.board.execute_move(from, to, hooks);
        info!("{:?} played {} to {}", self.current, from, to);

        let opponent = self.current.opponent();
        if self.board.is_checkmate(opponent) {
            self.status = GameStatus::Checkmate {
                winner: self.current,
            };
        } else if self.board.is_stalemate(opponent) {
            self.status = GameStatus::Stalemate;
        } else if self.board.is_checkmate_impossible() {
            self.status = GameStatus::DrawByInsufficientMaterial;
        }
        if self.status.is_terminal() {
            info!("game over: {:?}", self.status);
            return Ok(self.status);
        }

        self.current = opponent;
        self.record_state();

        if let Some(draw) = self.verified_claim() {
            self.status = draw;
            info!("draw claim verified after the move: {:?}", draw);
        } else if self.pending_claim.take().is_some() {
            warn!("draw claim not verified; the game continues");
        }
        Ok(self.status)
    }

    fn verified_claim(&self) -> Option<GameStatus> {
        match self.pending_claim? {
            DrawClaim::ThreefoldRepetition if self.repetition_count() >= 3 => {
                Some(GameStatus::DrawByRepetition)
            }
            DrawClaim::FiftyMove if self.board.no_capture_or_pawn_moves() >= 100 => {
                Some(GameStatus::DrawByFiftyMove)
            }
            _ => None,
        }
    }

    fn record_state(&mut self) {
        *self
            .state_counts
            .entry((self.board.state(), self.current))
            .or_insert(0) += 1;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
