use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;

use crate::moves::CastleSide;
use crate::position::BOARD_SIZE;
use crate::{Color, Piece, PieceKind, Position, PROMOTION_KINDS};

/// Fixed checkerboard shade of a square, derived from coordinate parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareShade {
    Light,
    Dark,
}

/// One square of the grid. `piece` is never absent: empty squares hold the
/// `Clear` sentinel.
#[derive(Debug, Clone, Copy)]
pub struct Square {
    pub shade: SquareShade,
    pub position: Position,
    pub piece: Piece,
}

/// Canonical fingerprint of a board for repetition counting. Two boards
/// with equal state are rules-equivalent regardless of move history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    pieces: Vec<(Color, PieceKind, Position)>,
    en_passant: Option<Position>,
    /// Castle-eligibility directions, black king first.
    castle_directions: [Vec<CastleSide>; 2],
}

/// Callbacks `Board::execute_move` needs from its caller: a synchronous
/// promotion choice, plus optional narration of special moves. The board
/// never depends on the narration being consumed.
pub trait MoveHooks {
    fn choose_promotion(&mut self, _color: Color, _at: Position) -> PieceKind {
        PieceKind::Queen
    }

    fn castled(&mut self, _color: Color, _side: CastleSide) {}

    fn captured_en_passant(&mut self, _color: Color, _at: Position) {}
}

/// No-op hooks; always promotes to a queen.
pub struct DefaultHooks;

impl MoveHooks for DefaultHooks {}

/// The 8x8 grid and the per-game state that rides along with it: the
/// en-passant target square, the half-move clock behind the fifty-move
/// rule, and player display names used only for narration.
#[derive(Debug, Clone)]
pub struct Board {
    squares: [[Square; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    en_passant_target: Option<Position>,
    no_capture_or_pawn_moves: u32,
    players: HashMap<Color, String>,
}

impl Board {
    /// A board in the standard initial layout.
    pub fn new() -> Self {
        Self::with_players("White Player", "Black Player")
    }

    pub fn with_players(white: &str, black: &str) -> Self {
        let placeholder = Square {
            shade: SquareShade::Light,
            position: Position { row: 0, col: 0 },
            piece: Piece::clear(),
        };
        let mut squares = [[placeholder; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let position = Position { row, col };
                let shade = if (row + col) % 2 == 0 {
                    SquareShade::Light
                } else {
                    SquareShade::Dark
                };
                squares[row as usize][col as usize] = Square {
                    shade,
                    position,
                    piece: Piece::clear(),
                };
            }
        }
        let mut players = HashMap::new();
        players.insert(Color::White, white.to_string());
        players.insert(Color::Black, black.to_string());
        let mut board = Self {
            squares,
            en_passant_target: None,
            no_capture_or_pawn_moves: 0,
            players,
        };
        board.reset();
        board
    }

    /// Put every piece back on its starting square and clear the per-game
    /// state.
    pub fn reset(&mut self) {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for col in 0..BOARD_SIZE {
            self.set_square(
                Position { row: 0, col },
                Piece::new(BACK_RANK[col as usize], Color::Black),
            );
            self.set_square(
                Position { row: 1, col },
                Piece::new(PieceKind::Pawn, Color::Black),
            );
            for row in 2..6 {
                self.clear_square(Position { row, col });
            }
            self.set_square(
                Position { row: 6, col },
                Piece::new(PieceKind::Pawn, Color::White),
            );
            self.set_square(
                Position { row: 7, col },
                Piece::new(BACK_RANK[col as usize], Color::White),
            );
        }
        self.en_passant_target = None;
        self.no_capture_or_pawn_moves = 0;
    }

    pub fn square_at(&self, pos: Position) -> &Square {
        &self.squares[pos.row as usize][pos.col as usize]
    }

    pub fn piece_at(&self, pos: Position) -> Piece {
        self.square_at(pos).piece
    }

    /// Place a piece, updating its stored position to match the square so
    /// the two can never disagree.
    pub fn set_square(&mut self, pos: Position, mut piece: Piece) {
        piece.position = pos;
        self.squares[pos.row as usize][pos.col as usize].piece = piece;
    }

    pub fn clear_square(&mut self, pos: Position) {
        self.set_square(pos, Piece::clear());
    }

    /// All non-sentinel pieces of a color, in scan order.
    pub fn pieces_of(&self, color: Color) -> Vec<Piece> {
        self.squares
            .iter()
            .flatten()
            .map(|square| square.piece)
            .filter(|piece| piece.color == color)
            .collect()
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    /// Plies since the last capture or pawn move. 100 of them satisfy the
    /// fifty-move rule.
    pub fn no_capture_or_pawn_moves(&self) -> u32 {
        self.no_capture_or_pawn_moves
    }

    pub fn player_name(&self, color: Color) -> &str {
        self.players.get(&color).map(String::as_str).unwrap_or("?")
    }

    /// A board without a king for either player is a broken invariant, not
    /// a game state, so this fails fast.
    pub fn king_position(&self, color: Color) -> Position {
        self.pieces_of(color)
            .into_iter()
            .find(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.position)
            .expect("no king on the board")
    }

    /// Union of the geometric destinations of every piece of a color.
    pub fn attacked_squares(&self, by: Color) -> HashSet<Position> {
        self.attacked_squares_probed(by, false)
    }

    /// With `castling_probe` set, kings contribute only their plain
    /// adjacency moves; castling legality checks use this to keep the two
    /// kings from recursing into each other.
    pub(crate) fn attacked_squares_probed(
        &self,
        by: Color,
        castling_probe: bool,
    ) -> HashSet<Position> {
        let mut attacked = HashSet::new();
        for piece in self.pieces_of(by) {
            attacked.extend(piece.geometric_moves_probed(self, castling_probe));
        }
        attacked
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.attacked_squares(color.opponent())
            .contains(&self.king_position(color))
    }

    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.no_legal_move(color) && self.is_in_check(color)
    }

    pub fn is_stalemate(&mut self, color: Color) -> bool {
        self.no_legal_move(color) && !self.is_in_check(color)
    }

    fn no_legal_move(&mut self, color: Color) -> bool {
        self.pieces_of(color)
            .iter()
            .all(|piece| self.legal_moves(piece.position).is_empty())
    }

    /// The geometric moves of the piece at `at`, minus every move that
    /// would leave its own king in check.
    pub fn legal_moves(&mut self, at: Position) -> Vec<Position> {
        let piece = self.piece_at(at);
        if piece.is_clear() {
            return Vec::new();
        }
        piece
            .geometric_moves(self)
            .into_iter()
            .filter(|&to| !self.leaves_king_in_check(at, to))
            .collect()
    }

    /// Plays `from -> to` on the live board, reads the check status, then
    /// writes every touched square back exactly as it was, captured piece
    /// included. Simulations never overlap: this borrows the whole board
    /// mutably and restores it before returning.
    fn leaves_king_in_check(&mut self, from: Position, to: Position) -> bool {
        let mover = self.piece_at(from);
        let saved = [*self.square_at(from), *self.square_at(to)];
        let victim =
            (mover.kind == PieceKind::Pawn && Some(to) == self.en_passant_target).then(|| {
                let row = if to.row == 2 { 3 } else { 4 };
                Position { row, col: to.col }
            });
        let saved_victim = victim.map(|pos| *self.square_at(pos));

        self.set_square(to, mover);
        self.clear_square(from);
        if let Some(pos) = victim {
            self.clear_square(pos);
        }

        let in_check = self.is_in_check(mover.color);

        for square in saved {
            self.restore_square(square);
        }
        if let Some(square) = saved_victim {
            self.restore_square(square);
        }
        in_check
    }

    fn restore_square(&mut self, square: Square) {
        self.squares[square.position.row as usize][square.position.col as usize] = square;
    }

    /// Apply a validated move and all of its side effects. The caller must
    /// have confirmed legality through `legal_moves`; nothing is
    /// re-validated here.
    pub fn execute_move(&mut self, from: Position, to: Position, hooks: &mut dyn MoveHooks) {
        let captured = self.move_piece(from, to);
        self.mark_moved(to);
        if self.capture_en_passant(to, hooks) {
            return;
        }
        self.update_en_passant_target(from, to);
        self.update_no_capture_or_pawn_moves(captured, to);
        self.handle_promotion(to, hooks);
        self.complete_castling(from, to, hooks);
    }

    /// Move a piece between squares and hand back whatever occupied the
    /// destination.
    fn move_piece(&mut self, from: Position, to: Position) -> Piece {
        let captured = self.piece_at(to);
        let mover = self.piece_at(from);
        self.set_square(to, mover);
        self.clear_square(from);
        captured
    }

    /// Kings, rooks, and pawns each have a first-move-only privilege.
    fn mark_moved(&mut self, at: Position) {
        let piece = &mut self.squares[at.row as usize][at.col as usize].piece;
        if matches!(
            piece.kind,
            PieceKind::King | PieceKind::Rook | PieceKind::Pawn
        ) {
            piece.moved = true;
        }
    }

    /// En-passant capture ends the move: the bypassed pawn is removed, the
    /// clock and target reset, and no further side effects apply.
    fn capture_en_passant(&mut self, to: Position, hooks: &mut dyn MoveHooks) -> bool {
        if Some(to) != self.en_passant_target || self.piece_at(to).kind != PieceKind::Pawn {
            return false;
        }
        let victim_row = if to.row == 2 { 3 } else { 4 };
        self.clear_square(Position {
            row: victim_row,
            col: to.col,
        });
        let color = self.piece_at(to).color;
        debug!(
            "{} captured en passant on {}",
            self.player_name(color),
            to
        );
        hooks.captured_en_passant(color, to);
        self.en_passant_target = None;
        self.no_capture_or_pawn_moves = 0;
        true
    }

    /// A pawn double-step arms the square it jumped over; any other move
    /// disarms the target.
    fn update_en_passant_target(&mut self, from: Position, to: Position) {
        let double_step = self.piece_at(to).kind == PieceKind::Pawn
            && (from.row as i8 - to.row as i8).abs() == 2;
        self.en_passant_target = double_step.then(|| {
            let row = if to.row == 3 { 2 } else { 5 };
            Position { row, col: to.col }
        });
    }

    fn update_no_capture_or_pawn_moves(&mut self, captured: Piece, to: Position) {
        if !captured.is_clear() || self.piece_at(to).kind == PieceKind::Pawn {
            self.no_capture_or_pawn_moves = 0;
        } else {
            self.no_capture_or_pawn_moves += 1;
        }
    }

    /// A pawn on the farthest rank is replaced by a fresh piece of the kind
    /// the injected chooser picks.
    fn handle_promotion(&mut self, at: Position, hooks: &mut dyn MoveHooks) {
        let pawn = self.piece_at(at);
        if pawn.kind != PieceKind::Pawn || (at.row != 0 && at.row != 7) {
            return;
        }
        let kind = hooks.choose_promotion(pawn.color, at);
        debug_assert!(
            PROMOTION_KINDS.contains(&kind),
            "promotion to {kind:?} is not allowed"
        );
        debug!(
            "{} promoted a pawn to {:?} on {}",
            self.player_name(pawn.color),
            kind,
            at
        );
        self.set_square(at, Piece::new(kind, pawn.color));
    }

    /// A king that just moved two columns castled; relocate the rook on
    /// that side to complete the move.
    fn complete_castling(&mut self, from: Position, to: Position, hooks: &mut dyn MoveHooks) {
        if self.piece_at(to).kind != PieceKind::King
            || (from.col as i8 - to.col as i8).abs() != 2
        {
            return;
        }
        let (rook_from, rook_to, side) = if to.col == 2 {
            (0, 3, CastleSide::Queenside)
        } else {
            (7, 5, CastleSide::Kingside)
        };
        self.move_piece(
            Position {
                row: to.row,
                col: rook_from,
            },
            Position {
                row: to.row,
                col: rook_to,
            },
        );
        let color = self.piece_at(to).color;
        debug!(
            "{} castled {:?}",
            self.player_name(color),
            side
        );
        hooks.castled(color, side);
    }

    /// True when neither side can force mate: king vs king, king vs king
    /// and one knight, or kings with bishops that all stand on squares of
    /// one shade. Any other piece, or a second knight, disqualifies the
    /// condition.
    pub fn is_checkmate_impossible(&self) -> bool {
        let black = self.type_count(Color::Black);
        let white = self.type_count(Color::White);
        if black.other > 0 || white.other > 0 {
            return false;
        }
        if black.knights + white.knights > 1 {
            return false;
        }
        self.insufficient_material(&black, &white)
    }

    fn insufficient_material(&self, black: &TypeCount, white: &TypeCount) -> bool {
        let (b, w) = (black.total(), white.total());
        if b == 1 && w == 1 {
            true
        } else if (b == 1 && w == 2) || (w == 1 && b == 2) {
            true
        } else {
            self.bishops_on_one_shade()
        }
    }

    /// Do all bishops on the board, both colors, sit on one square shade?
    fn bishops_on_one_shade(&self) -> bool {
        let mut shades = self
            .squares
            .iter()
            .flatten()
            .filter(|square| square.piece.kind == PieceKind::Bishop)
            .map(|square| square.shade);
        match shades.next() {
            Some(first) => shades.all(|shade| shade == first),
            None => true,
        }
    }

    fn type_count(&self, color: Color) -> TypeCount {
        let mut count = TypeCount::default();
        for piece in self.pieces_of(color) {
            match piece.kind {
                PieceKind::Knight => count.knights += 1,
                PieceKind::Bishop => count.bishops += 1,
                PieceKind::King => count.kings += 1,
                _ => count.other += 1,
            }
        }
        count
    }

    /// Castling directions available to each king, black first. Part of
    /// the fingerprint: two otherwise-identical boards that differ in
    /// castle eligibility are not repetitions of one another.
    pub fn castle_directions(&self) -> [Vec<CastleSide>; 2] {
        [
            self.castle_directions_for(Color::Black),
            self.castle_directions_for(Color::White),
        ]
    }

    fn castle_directions_for(&self, color: Color) -> Vec<CastleSide> {
        self.piece_at(self.king_position(color))
            .castle_candidates(self)
            .into_iter()
            .map(|(side, _)| side)
            .collect()
    }

    /// The repetition fingerprint: every piece's color, kind, and position
    /// in scan order, the en-passant target, and both kings' castle
    /// eligibility.
    pub fn state(&self) -> BoardState {
        let pieces = self
            .squares
            .iter()
            .flatten()
            .filter(|square| !square.piece.is_clear())
            .map(|square| (square.piece.color, square.piece.kind, square.piece.position))
            .collect();
        BoardState {
            pieces,
            en_passant: self.en_passant_target,
            castle_directions: self.castle_directions(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            for square in row {
                write!(f, "{} ", square.piece.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct TypeCount {
    knights: u32,
    bishops: u32,
    kings: u32,
    other: u32,
}

impl TypeCount {
    fn total(&self) -> u32 {
        self.knights + self.bishops + self.kings + self.other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn empty_board() -> Board {
        let mut board = Board::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                board.clear_square(pos(row, col));
            }
        }
        board
    }

    fn place(board: &mut Board, kind: PieceKind, color: Color, row: u8, col: u8) -> Position {
        let at = pos(row, col);
        board.set_square(at, Piece::new(kind, color));
        at
    }

    struct PromoteTo(PieceKind);

    impl MoveHooks for PromoteTo {
        fn choose_promotion(&mut self, _color: Color, _at: Position) -> PieceKind {
            self.0
        }
    }

    #[test]
    fn initial_layout() {
        let board = Board::new();
        assert_eq!(board.piece_at(pos(7, 4)).kind, PieceKind::King);
        assert_eq!(board.piece_at(pos(7, 4)).color, Color::White);
        assert_eq!(board.piece_at(pos(0, 3)).kind, PieceKind::Queen);
        assert_eq!(board.piece_at(pos(0, 3)).color, Color::Black);
        for col in 0..BOARD_SIZE {
            assert_eq!(board.piece_at(pos(1, col)).kind, PieceKind::Pawn);
            assert_eq!(board.piece_at(pos(6, col)).kind, PieceKind::Pawn);
        }
        assert!(board.piece_at(pos(4, 4)).is_clear());
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(board.no_capture_or_pawn_moves(), 0);
        assert_eq!(board.pieces_of(Color::White).len(), 16);
        assert_eq!(board.pieces_of(Color::Black).len(), 16);
    }

    #[test]
    fn square_shades_alternate() {
        let board = Board::new();
        // a1 is a dark square, h1 and a8 are light.
        assert_eq!(board.square_at(pos(7, 0)).shade, SquareShade::Dark);
        assert_eq!(board.square_at(pos(7, 7)).shade, SquareShade::Light);
        assert_eq!(board.square_at(pos(0, 0)).shade, SquareShade::Light);
    }

    #[test]
    fn set_square_updates_piece_position() {
        let mut board = empty_board();
        let piece = Piece::new(PieceKind::Rook, Color::White);
        board.set_square(pos(3, 3), piece);
        assert_eq!(board.piece_at(pos(3, 3)).position, pos(3, 3));
    }

    #[test]
    fn starting_attacked_squares_cover_the_middle_ranks() {
        let board = Board::new();
        let expected_white: HashSet<Position> = (0..BOARD_SIZE)
            .flat_map(|col| [pos(4, col), pos(5, col)])
            .collect();
        assert_eq!(board.attacked_squares(Color::White), expected_white);

        let expected_black: HashSet<Position> = (0..BOARD_SIZE)
            .flat_map(|col| [pos(2, col), pos(3, col)])
            .collect();
        assert_eq!(board.attacked_squares(Color::Black), expected_black);
    }

    #[test]
    fn king_position_tracks_the_king() {
        let mut board = Board::new();
        assert_eq!(board.king_position(Color::White), pos(7, 4));
        board.execute_move(pos(6, 4), pos(4, 4), &mut DefaultHooks);
        board.execute_move(pos(7, 4), pos(6, 4), &mut DefaultHooks);
        assert_eq!(board.king_position(Color::White), pos(6, 4));
    }

    #[test]
    fn legal_moves_subset_of_geometric_and_never_self_check() {
        // A rook pinned on the e-file may not leave it.
        let mut pinned = empty_board();
        place(&mut pinned, PieceKind::King, Color::White, 7, 4);
        let rook = place(&mut pinned, PieceKind::Rook, Color::White, 5, 4);
        place(&mut pinned, PieceKind::Rook, Color::Black, 0, 4);
        place(&mut pinned, PieceKind::King, Color::Black, 0, 0);

        let geometric = pinned.piece_at(rook).geometric_moves(&pinned);
        let legal = pinned.legal_moves(rook);
        assert!(legal.iter().all(|to| geometric.contains(to)));
        assert!(!legal.is_empty());
        assert!(legal.iter().all(|to| to.col == 4));
        assert!(geometric.iter().any(|to| to.col != 4));

        // And on the fresh board every legal move is geometric too.
        let mut board = Board::new();
        for piece in board.pieces_of(Color::White) {
            let geometric = piece.geometric_moves(&board);
            for to in board.legal_moves(piece.position) {
                assert!(geometric.contains(&to));
            }
        }
    }

    #[test]
    fn legal_moves_leave_the_fingerprint_untouched() {
        let mut board = Board::new();
        let before = board.state();
        for color in [Color::White, Color::Black] {
            for piece in board.pieces_of(color) {
                board.legal_moves(piece.position);
            }
        }
        assert_eq!(board.state(), before);
    }

    #[test]
    fn simulation_restores_en_passant_victim() {
        let mut board = Board::new();
        place(&mut board, PieceKind::Pawn, Color::Black, 4, 4);
        board.execute_move(pos(6, 3), pos(4, 3), &mut DefaultHooks);
        assert_eq!(board.en_passant_target(), Some(pos(5, 3)));

        let before = board.state();
        let legal = board.legal_moves(pos(4, 4));
        assert!(legal.contains(&pos(5, 3)));
        assert_eq!(board.state(), before);
        assert_eq!(board.piece_at(pos(4, 3)).kind, PieceKind::Pawn);
    }

    #[test]
    fn en_passant_capture_removes_the_bypassed_pawn() {
        let mut board = Board::new();
        place(&mut board, PieceKind::Pawn, Color::Black, 4, 3);
        // White e2-e4 arms e3; the black d-pawn takes en passant.
        board.execute_move(pos(6, 4), pos(4, 4), &mut DefaultHooks);
        assert_eq!(board.en_passant_target(), Some(pos(5, 4)));

        board.execute_move(pos(4, 3), pos(5, 4), &mut DefaultHooks);
        assert_eq!(board.piece_at(pos(5, 4)).kind, PieceKind::Pawn);
        assert_eq!(board.piece_at(pos(5, 4)).color, Color::Black);
        // The captured pawn came off its own rank, not the target square.
        assert!(board.piece_at(pos(4, 4)).is_clear());
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(board.no_capture_or_pawn_moves(), 0);
    }

    #[test]
    fn double_step_arms_and_other_moves_disarm_the_target() {
        let mut board = Board::new();
        board.execute_move(pos(6, 4), pos(4, 4), &mut DefaultHooks);
        assert_eq!(board.en_passant_target(), Some(pos(5, 4)));
        board.execute_move(pos(0, 6), pos(2, 5), &mut DefaultHooks);
        assert_eq!(board.en_passant_target(), None);

        board.execute_move(pos(1, 0), pos(3, 0), &mut DefaultHooks);
        assert_eq!(board.en_passant_target(), Some(pos(2, 0)));
    }

    #[test]
    fn kingside_castle_relocates_the_rook() {
        let mut board = empty_board();
        let king = place(&mut board, PieceKind::King, Color::White, 7, 4);
        place(&mut board, PieceKind::Rook, Color::White, 7, 7);
        place(&mut board, PieceKind::Rook, Color::White, 7, 0);
        place(&mut board, PieceKind::King, Color::Black, 0, 4);

        let legal = board.legal_moves(king);
        assert!(legal.contains(&pos(7, 6)));
        assert!(legal.contains(&pos(7, 2)));

        board.execute_move(pos(7, 4), pos(7, 6), &mut DefaultHooks);
        assert_eq!(board.piece_at(pos(7, 6)).kind, PieceKind::King);
        assert_eq!(board.piece_at(pos(7, 5)).kind, PieceKind::Rook);
        assert!(board.piece_at(pos(7, 7)).is_clear());
        assert!(board.piece_at(pos(7, 4)).is_clear());
        assert!(board.piece_at(pos(7, 6)).moved);
    }

    #[test]
    fn queenside_castle_relocates_the_rook() {
        let mut board = empty_board();
        place(&mut board, PieceKind::King, Color::Black, 0, 4);
        place(&mut board, PieceKind::Rook, Color::Black, 0, 0);
        place(&mut board, PieceKind::King, Color::White, 7, 4);

        board.execute_move(pos(0, 4), pos(0, 2), &mut DefaultHooks);
        assert_eq!(board.piece_at(pos(0, 2)).kind, PieceKind::King);
        assert_eq!(board.piece_at(pos(0, 3)).kind, PieceKind::Rook);
        assert!(board.piece_at(pos(0, 0)).is_clear());
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let mut board = empty_board();
        place(&mut board, PieceKind::King, Color::White, 7, 4);
        place(&mut board, PieceKind::King, Color::Black, 0, 7);
        place(&mut board, PieceKind::Pawn, Color::White, 1, 0);

        board.execute_move(pos(1, 0), pos(0, 0), &mut PromoteTo(PieceKind::Knight));
        let promoted = board.piece_at(pos(0, 0));
        assert_eq!(promoted.kind, PieceKind::Knight);
        assert_eq!(promoted.color, Color::White);
    }

    #[test]
    fn default_hooks_promote_to_queen() {
        let mut board = empty_board();
        place(&mut board, PieceKind::King, Color::White, 7, 4);
        place(&mut board, PieceKind::King, Color::Black, 0, 7);
        place(&mut board, PieceKind::Pawn, Color::Black, 6, 2);

        board.execute_move(pos(6, 2), pos(7, 2), &mut DefaultHooks);
        assert_eq!(board.piece_at(pos(7, 2)).kind, PieceKind::Queen);
        assert_eq!(board.piece_at(pos(7, 2)).color, Color::Black);
    }

    #[test]
    fn halfmove_clock_counts_quiet_moves_only() {
        let mut board = Board::new();
        board.execute_move(pos(7, 6), pos(5, 5), &mut DefaultHooks);
        board.execute_move(pos(0, 6), pos(2, 5), &mut DefaultHooks);
        assert_eq!(board.no_capture_or_pawn_moves(), 2);

        // A pawn move resets the clock.
        board.execute_move(pos(6, 4), pos(4, 4), &mut DefaultHooks);
        assert_eq!(board.no_capture_or_pawn_moves(), 0);

        board.execute_move(pos(2, 5), pos(4, 4), &mut DefaultHooks);
        assert_eq!(board.no_capture_or_pawn_moves(), 0);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut board = Board::new();
        board.execute_move(pos(6, 5), pos(5, 5), &mut DefaultHooks);
        board.execute_move(pos(1, 4), pos(3, 4), &mut DefaultHooks);
        board.execute_move(pos(6, 6), pos(4, 6), &mut DefaultHooks);
        board.execute_move(pos(0, 3), pos(4, 7), &mut DefaultHooks);

        assert!(board.is_in_check(Color::White));
        assert!(board.is_checkmate(Color::White));
        assert!(!board.is_stalemate(Color::White));
        assert!(!board.is_checkmate(Color::Black));
    }

    #[test]
    fn cornered_king_stalemate() {
        let mut board = empty_board();
        place(&mut board, PieceKind::King, Color::Black, 0, 0);
        place(&mut board, PieceKind::King, Color::White, 2, 1);
        place(&mut board, PieceKind::Queen, Color::White, 1, 2);

        assert!(!board.is_in_check(Color::Black));
        assert!(board.is_stalemate(Color::Black));
        assert!(!board.is_checkmate(Color::Black));
    }

    #[test]
    fn insufficient_material_rule() {
        let mut board = empty_board();
        place(&mut board, PieceKind::King, Color::White, 7, 4);
        place(&mut board, PieceKind::King, Color::Black, 0, 4);
        assert!(board.is_checkmate_impossible());

        // One knight of either color keeps the condition.
        let knight = place(&mut board, PieceKind::Knight, Color::White, 4, 4);
        assert!(board.is_checkmate_impossible());
        board.clear_square(knight);

        // Same-shade bishops keep it; opposite shades break it.
        place(&mut board, PieceKind::Bishop, Color::White, 0, 2);
        place(&mut board, PieceKind::Bishop, Color::Black, 7, 3);
        assert!(board.is_checkmate_impossible());
        place(&mut board, PieceKind::Bishop, Color::Black, 7, 2);
        assert!(!board.is_checkmate_impossible());
    }

    #[test]
    fn majors_pawns_or_knight_pairs_disqualify_the_draw() {
        let mut board = empty_board();
        place(&mut board, PieceKind::King, Color::White, 7, 4);
        place(&mut board, PieceKind::King, Color::Black, 0, 4);
        let pawn = place(&mut board, PieceKind::Pawn, Color::White, 5, 0);
        assert!(!board.is_checkmate_impossible());
        board.clear_square(pawn);

        let queen = place(&mut board, PieceKind::Queen, Color::Black, 3, 3);
        assert!(!board.is_checkmate_impossible());
        board.clear_square(queen);

        place(&mut board, PieceKind::Knight, Color::White, 4, 4);
        place(&mut board, PieceKind::Knight, Color::Black, 3, 3);
        assert!(!board.is_checkmate_impossible());
    }

    #[test]
    fn fingerprint_tracks_castle_eligibility() {
        let mut board = empty_board();
        place(&mut board, PieceKind::King, Color::White, 7, 4);
        place(&mut board, PieceKind::Rook, Color::White, 7, 7);
        place(&mut board, PieceKind::King, Color::Black, 0, 4);

        let eligible = board.state();
        let directions = board.castle_directions();
        assert_eq!(directions[0], Vec::<CastleSide>::new());
        assert_eq!(directions[1], vec![CastleSide::Kingside]);

        // Shuttle the rook away and back: same placement, different rights.
        board.execute_move(pos(7, 7), pos(6, 7), &mut DefaultHooks);
        board.execute_move(pos(6, 7), pos(7, 7), &mut DefaultHooks);
        assert_eq!(board.castle_directions()[1], Vec::<CastleSide>::new());
        assert_ne!(board.state(), eligible);
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut board = Board::new();
        let initial = board.state();
        board.execute_move(pos(6, 4), pos(4, 4), &mut DefaultHooks);
        assert_ne!(board.state(), initial);
        board.reset();
        assert_eq!(board.state(), initial);
        assert_eq!(board.no_capture_or_pawn_moves(), 0);
    }

    #[test]
    fn display_renders_the_grid() {
        let board = Board::new();
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "r n b q k b n r ");
        assert_eq!(lines[7], "R N B Q K B N R ");
        assert_eq!(lines[4], ". . . . . . . . ");
    }
}
