use std::fmt;
use std::str::FromStr;

use shakmaty::{Color, File, Piece, Rank, Role, fen::Fen};
use thiserror::Error;

/// Board side length.
pub const BOARD_SIZE: u8 = 8;

/// A single board cell: a piece or nothing.
pub type Cell = Option<Piece>;

/// Error when loading a position from FEN.
#[derive(Debug, Error)]
#[error("invalid FEN: {0}")]
pub struct FenError(#[from] shakmaty::fen::ParseFenError);

/// Error when parsing an algebraic square name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseSquareError(String);

/// Board coordinate (row 0 = black back rank / rank 8, col 0 = file a).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Build a square from untrusted integer coordinates.
    pub fn from_coords(row: i64, col: i64) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Step by a signed delta, staying on the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    /// The same square seen from the other side of the horizontal midline.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self {
            row: BOARD_SIZE - 1 - self.row,
            col: self.col,
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        let file = File::new(u32::from(square.col));
        let rank = Rank::new(u32::from(BOARD_SIZE - 1 - square.row));
        shakmaty::Square::from_coords(file, rank)
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        Self {
            row: BOARD_SIZE - 1 - square.rank() as u8,
            col: square.file() as u8,
        }
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<shakmaty::Square>()
            .map(Square::from)
            .map_err(|_| ParseSquareError(s.to_string()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shakmaty::Square::from(*self))
    }
}

/// Color classification of a cell. `None` for an empty cell.
#[inline]
pub fn color_of(cell: Cell) -> Option<Color> {
    cell.map(|piece| piece.color)
}

const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// 8×8 grid of cells, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl Board {
    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard chess starting position.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (col, role) in BACK_RANK.into_iter().enumerate() {
            board.cells[0][col] = Some(role.of(Color::Black));
            board.cells[1][col] = Some(Role::Pawn.of(Color::Black));
            board.cells[6][col] = Some(Role::Pawn.of(Color::White));
            board.cells[7][col] = Some(role.of(Color::White));
        }
        board
    }

    /// Load the piece placement of a FEN string.
    ///
    /// Only the placement is used; no legality check is applied, so positions
    /// without kings are accepted.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_fen_with_turn(fen)?.0)
    }

    pub(crate) fn from_fen_with_turn(fen: &str) -> Result<(Self, Color), FenError> {
        let setup = fen.parse::<Fen>()?.into_setup();
        let mut board = Self::empty();
        for square in Square::all() {
            board.set_piece_at(square, setup.board.piece_at(square.into()));
        }
        Ok((board, setup.turn))
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Cell {
        self.cells[usize::from(square.row)][usize::from(square.col)]
    }

    #[inline]
    pub fn set_piece_at(&mut self, square: Square, cell: Cell) {
        self.cells[usize::from(square.row)][usize::from(square.col)] = cell;
    }

    #[inline]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Rows of the grid, row 0 first.
    #[inline]
    pub fn rows(&self) -> &[[Cell; 8]; 8] {
        &self.cells
    }

    /// Reflect across the horizontal midline and swap every piece's color.
    pub fn mirrored(&self) -> Self {
        let mut board = Self::empty();
        for square in Square::all() {
            let swapped = self.piece_at(square).map(|piece| Piece {
                color: piece.color.other(),
                role: piece.role,
            });
            board.set_piece_at(square.mirrored(), swapped);
        }
        board
    }
}
