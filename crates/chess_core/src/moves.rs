use crate::position::Direction;
use crate::{Board, Color, Piece, PieceKind, Position};

/// Which side of the board a king castles toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Queenside,
    Kingside,
}

impl CastleSide {
    fn step(self) -> i8 {
        match self {
            CastleSide::Queenside => -1,
            CastleSide::Kingside => 1,
        }
    }

    fn rook_home_col(self) -> u8 {
        match self {
            CastleSide::Queenside => 0,
            CastleSide::Kingside => 7,
        }
    }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

impl Piece {
    /// Every square this piece is geometrically eligible to move to,
    /// ignoring whether the move would expose its own king.
    /// `Board::legal_moves` narrows this set.
    pub fn geometric_moves(&self, board: &Board) -> Vec<Position> {
        self.geometric_moves_probed(board, false)
    }

    /// `castling_probe` suppresses castling generation for kings. Attack
    /// scans made while testing castling legality pass it so that two
    /// simultaneously castle-eligible kings cannot recurse into each
    /// other's castling checks forever.
    pub(crate) fn geometric_moves_probed(
        &self,
        board: &Board,
        castling_probe: bool,
    ) -> Vec<Position> {
        match self.kind {
            PieceKind::Bishop => self.slide(board, &Direction::DIAGONAL),
            PieceKind::Rook => self.slide(board, &Direction::ORTHOGONAL),
            PieceKind::Queen => self.slide(board, &Direction::ALL),
            PieceKind::Knight => self.knight_moves(board),
            PieceKind::King => self.king_moves(board, castling_probe),
            PieceKind::Pawn => self.pawn_moves(board),
            PieceKind::Clear => Vec::new(),
        }
    }

    /// Walk each ray one step at a time: through empty squares, stopping
    /// short of a friendly piece and on top of an enemy one.
    fn slide(&self, board: &Board, directions: &[Direction]) -> Vec<Position> {
        let mut positions = Vec::new();
        for &direction in directions {
            let mut next = self.position.offset(direction.delta());
            while let Some(pos) = next {
                match board.piece_at(pos).color {
                    Color::Clear => positions.push(pos),
                    color if color == self.color => break,
                    _ => {
                        positions.push(pos);
                        break;
                    }
                }
                next = pos.offset(direction.delta());
            }
        }
        positions
    }

    fn knight_moves(&self, board: &Board) -> Vec<Position> {
        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&delta| self.position.offset(delta))
            .filter(|&pos| board.piece_at(pos).color != self.color)
            .collect()
    }

    fn king_moves(&self, board: &Board, castling_probe: bool) -> Vec<Position> {
        let mut positions: Vec<Position> = Direction::ALL
            .iter()
            .filter_map(|direction| self.position.offset(direction.delta()))
            .filter(|&pos| board.piece_at(pos).color != self.color)
            .collect();
        if !castling_probe {
            for (_, destination) in self.castle_candidates(board) {
                positions.push(destination);
            }
        }
        positions
    }

    /// Castling destinations currently available to this king, paired with
    /// the side each belongs to. Empty unless the piece is an unmoved king.
    /// Eligibility per side: an unmoved rook on the home corner, the squares
    /// strictly between king and rook empty, and none of the squares the
    /// king stands on, passes through, or lands on attacked.
    pub fn castle_candidates(&self, board: &Board) -> Vec<(CastleSide, Position)> {
        let mut candidates = Vec::new();
        if self.kind != PieceKind::King || self.moved {
            return candidates;
        }
        let attacked = board.attacked_squares_probed(self.color.opponent(), true);
        for side in [CastleSide::Queenside, CastleSide::Kingside] {
            let corner = Position {
                row: self.position.row,
                col: side.rook_home_col(),
            };
            let rook = board.piece_at(corner);
            if rook.kind != PieceKind::Rook || rook.moved {
                continue;
            }
            let Some(path) = self.castle_path(side) else {
                continue;
            };
            if path.iter().any(|pos| attacked.contains(pos)) {
                continue;
            }
            let mut between = vec![path[1], path[2]];
            if side == CastleSide::Queenside {
                // The b-file square must also be empty, though the king
                // never crosses it.
                between.push(Position {
                    row: self.position.row,
                    col: 1,
                });
            }
            if between.iter().all(|&pos| board.piece_at(pos).is_clear()) {
                candidates.push((side, path[2]));
            }
        }
        candidates
    }

    /// The king's square plus the two it traverses castling to `side`.
    fn castle_path(&self, side: CastleSide) -> Option<[Position; 3]> {
        let pass = self.position.offset((0, side.step()))?;
        let end = pass.offset((0, side.step()))?;
        Some([self.position, pass, end])
    }

    fn pawn_moves(&self, board: &Board) -> Vec<Position> {
        let mut positions = Vec::new();
        let forward = if self.color == Color::White { -1 } else { 1 };

        if let Some(one) = self.position.offset((forward, 0)) {
            if board.piece_at(one).is_clear() {
                positions.push(one);
                if !self.moved {
                    if let Some(two) = one.offset((forward, 0)) {
                        if board.piece_at(two).is_clear() {
                            positions.push(two);
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            if let Some(diagonal) = self.position.offset((forward, side)) {
                if board.piece_at(diagonal).color == self.color.opponent()
                    || Some(diagonal) == board.en_passant_target()
                {
                    positions.push(diagonal);
                }
            }
        }

        positions
    }
}
