// Game session control: turn order, draw claims, end-of-game detection
pub mod session;

pub use session::{DrawClaim, Game, GameStatus, MoveError};
