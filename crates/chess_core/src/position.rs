use std::fmt;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 8;

/// A square coordinate. Row 0 is black's back rank (rank 8) and row 7 is
/// white's (rank 1); column 0 is file 'a'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Apply a (row, col) delta, returning `None` when the result would
    /// leave the board.
    pub fn offset(self, delta: (i8, i8)) -> Option<Self> {
        let row = self.row as i8 + delta.0;
        let col = self.col as i8 + delta.1;
        let range = 0..BOARD_SIZE as i8;
        if range.contains(&row) && range.contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE - self.row;
        write!(f, "{file}{rank}")
    }
}

/// The eight compass directions a piece can travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// (row, col) change for one step in this direction. North points
    /// toward row 0.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_bounds() {
        assert!(Position::new(0, 0).is_some());
        assert!(Position::new(7, 7).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.offset((1, 1)), Position::new(1, 1));
        assert_eq!(corner.offset((-1, 0)), None);
        assert_eq!(corner.offset((0, -1)), None);

        let other = Position::new(7, 7).unwrap();
        assert_eq!(other.offset((1, 0)), None);
        assert_eq!(other.offset((-2, -1)), Position::new(5, 6));
    }

    #[test]
    fn displays_algebraic_names() {
        assert_eq!(Position::new(7, 0).unwrap().to_string(), "a1");
        assert_eq!(Position::new(0, 7).unwrap().to_string(), "h8");
        assert_eq!(Position::new(4, 4).unwrap().to_string(), "e4");
    }

    #[test]
    fn direction_deltas_cancel_out() {
        let center = Position::new(4, 4).unwrap();
        for direction in Direction::ALL {
            let there = center.offset(direction.delta()).unwrap();
            assert_ne!(there, center);
            let delta = direction.delta();
            let back = there.offset((-delta.0, -delta.1)).unwrap();
            assert_eq!(back, center);
        }
    }
}
