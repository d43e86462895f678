// Core chess rules modules
pub mod board;
pub mod moves;
pub mod piece;
pub mod position;

// Re-export main types for convenience
pub use board::{Board, BoardState, DefaultHooks, MoveHooks, Square, SquareShade};
pub use moves::CastleSide;
pub use piece::{Color, Piece, PieceKind, PROMOTION_KINDS};
pub use position::{Direction, Position, BOARD_SIZE};
