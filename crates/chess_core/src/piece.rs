use crate::Position;

/// Piece color. `Clear` is the "color" of the sentinel piece that fills
/// empty squares; it is never a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
    Clear,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
            Color::Clear => Color::Clear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    /// Empty-square marker.
    Clear,
}

/// Kinds a pawn may be promoted to.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// One piece on the board. `position` always matches the square that holds
/// the piece; `Board::set_square` keeps the two in sync. `moved` gates
/// castling eligibility and the pawn double-step and is only meaningful for
/// King, Rook, and Pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Position,
    pub moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            position: Position { row: 0, col: 0 },
            moved: false,
        }
    }

    /// The sentinel that occupies empty squares.
    pub fn clear() -> Self {
        Self::new(PieceKind::Clear, Color::Clear)
    }

    pub fn is_clear(&self) -> bool {
        self.kind == PieceKind::Clear
    }

    /// One-character rendering: uppercase for white, lowercase for black,
    /// '.' for an empty square.
    pub fn symbol(&self) -> char {
        let symbol = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
            PieceKind::Clear => '.',
        };
        if self.color == Color::White {
            symbol.to_ascii_uppercase()
        } else {
            symbol
        }
    }
}
