/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::HashSet, fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use crate::{can_move_on_empty_board, Piece, PieceId};

use super::{Color, File, PieceKind, Race, Rank, Square, StartingPosition};

/// The live set of pieces.
///
/// Pieces are kept in a fixed iteration order, which is also the order they are ticked in.
/// That order decides who wins when two pieces race for the same square.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    pub(crate) pieces: Vec<Piece>,

    /// The id the next added piece receives.
    next_id: u64,
}

impl Board {
    /// Creates an empty [`Board`].
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets up one of the named starting positions.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Board, Race, StartingPosition};
    /// let board = Board::from_starting_position(StartingPosition::Standard, Race::Classic, Race::Classic);
    /// assert_eq!(board.len(), 32);
    /// ```
    pub fn from_starting_position(
        starting_position: StartingPosition,
        white_race: Race,
        black_race: Race,
    ) -> Self {
        let mut board = Self::new();
        for (color, kind, square) in starting_position.pieces() {
            let race = match color {
                Color::White => white_race,
                Color::Black => black_race,
            };
            board.add_piece(color, kind, square, race);
        }
        board
    }

    /// Places a new piece on `square` and returns its freshly minted id.
    ///
    /// The caller is responsible for `square` being empty.
    pub fn add_piece(&mut self, color: Color, kind: PieceKind, square: Square, race: Race) -> PieceId {
        debug_assert!(
            !self.is_piece_at(square),
            "Cannot place a {color} {kind} on occupied square {square}"
        );
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece::new(id, color, kind, square, race));
        id
    }

    /// All pieces, in iteration order.
    #[inline(always)]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Number of pieces on the board.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Removes every piece that has run out of health, returning how many were removed.
    pub(crate) fn remove_dead_pieces(&mut self) -> Vec<Piece> {
        let (alive, dead): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pieces)
            .into_iter()
            .partition(Piece::is_alive);
        self.pieces = alive;
        dead
    }

    /// Whether a living piece counts as standing on `square`.
    #[inline(always)]
    pub fn is_piece_at(&self, square: Square) -> bool {
        self.index_of_piece_at(square).is_some()
    }

    /// Whether a piece is drawn within `distance` of `(x, y)`, measured in squares.
    ///
    /// See [`Piece::location`] for the coordinate system.
    pub fn is_piece_near(&self, x: f64, y: f64, distance: f64) -> bool {
        self.pieces.iter().any(|piece| {
            let (px, py) = piece.location();
            (px - x).hypot(py - y) < distance
        })
    }

    pub(crate) fn index_of_piece_at(&self, square: Square) -> Option<usize> {
        self.pieces
            .iter()
            .position(|piece| piece.square == square && piece.is_alive())
    }

    /// The living piece on `square`, if any.
    #[inline(always)]
    pub fn get_piece_at(&self, square: Square) -> Option<&Piece> {
        self.index_of_piece_at(square).map(|i| &self.pieces[i])
    }

    #[inline(always)]
    pub(crate) fn get_piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.index_of_piece_at(square).map(|i| &mut self.pieces[i])
    }

    #[inline(always)]
    pub fn get_piece_with_id(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    /// `true` if no piece stands strictly between `from` and `to`.
    ///
    /// Squares that do not share a line have nothing between them.
    pub fn is_empty_between(&self, from: Square, to: Square) -> bool {
        from.squares_between(to)
            .into_iter()
            .all(|square| !self.is_piece_at(square))
    }

    #[inline(always)]
    pub fn has_king(&self, color: Color) -> bool {
        self.king_square(color).is_some()
    }

    /// Square of the king of `color`, if it is still on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.find_pieces(PieceKind::King, color)
            .next()
            .map(Piece::square)
    }

    /// Summed material value of the pieces of `color`. Kings are worth nothing.
    pub fn get_total_pieces_value(&self, color: Color) -> i32 {
        self.pieces
            .iter()
            .filter(|piece| piece.color() == color)
            .map(Piece::value)
            .sum()
    }

    /// All pieces of `kind` and `color`, in iteration order.
    pub fn find_pieces(&self, kind: PieceKind, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces
            .iter()
            .filter(move |piece| piece.kind() == kind && piece.color() == color)
    }

    /// Number of queued actions across all pieces, optionally restricted to one color.
    pub fn count_piece_actions(&self, color: Option<Color>) -> usize {
        self.pieces
            .iter()
            .filter(|piece| color.map_or(true, |c| piece.color() == c))
            .map(|piece| piece.actions().len())
            .sum()
    }

    /// `true` if no piece has anything left to do.
    #[inline(always)]
    pub fn is_idle(&self) -> bool {
        self.pieces.iter().all(Piece::is_idle)
    }

    /// Squares currently held by a piece, in iteration order.
    pub fn get_occupied_squares(&self) -> Vec<Square> {
        self.pieces.iter().map(Piece::square).collect()
    }

    /// `true` if no two pieces claim the same square.
    pub fn has_unique_squares(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.pieces.len());
        self.pieces.iter().all(|piece| seen.insert(piece.square))
    }

    /// Whether `piece` threatens `target` from where it stands.
    ///
    /// Pawns look one square diagonally forward. Knights jump over anything in their way;
    /// every other kind needs a clear line.
    pub fn is_piece_looking_at_square(&self, piece: &Piece, target: Square) -> bool {
        let from = piece.square();
        match piece.kind() {
            PieceKind::Pawn => {
                from.is_adjacent_diagonal(target) && from.is_forward(piece.color(), target)
            }
            PieceKind::Knight => from.is_knight_jump(target),
            kind => {
                can_move_on_empty_board(piece.color(), kind, from, target)
                    && self.is_empty_between(from, target)
            }
        }
    }

    /// Whether any piece of color `attacker` other than one on `square` itself is looking at `square`.
    pub fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        self.pieces.iter().any(|piece| {
            piece.color() == attacker
                && piece.square() != square
                && self.is_piece_looking_at_square(piece, square)
        })
    }

    /// Whether a piece of `color` other than the one on `square` defends that square.
    #[inline(always)]
    pub fn is_square_protected(&self, square: Square, color: Color) -> bool {
        self.is_square_attacked(square, color)
    }

    /// `true` if the king of `color` is present and an enemy piece is looking at it.
    pub fn is_king_under_attack(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|square| self.is_square_attacked(square, color.opponent()))
    }

    /// The placement field of a FEN string, rank 8 first.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Board, Race, StartingPosition};
    /// let board = Board::from_starting_position(StartingPosition::Standard, Race::Classic, Race::Classic);
    /// assert_eq!(board.to_fen_placement(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    /// ```
    pub fn to_fen_placement(&self) -> String {
        let mut placements: [String; Rank::COUNT] = Default::default();

        for rank in Rank::iter() {
            let mut empty_spaces = 0;
            for file in File::iter() {
                if let Some(piece) = self.get_piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        placements[rank.index()] += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    placements[rank.index()].push(piece.kind().to_fen_char(piece.color()));
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                placements[rank.index()] += &empty_spaces.to_string();
            }
        }
        placements.reverse();

        placements.join("/")
    }

    /// Builds a board of classic pieces from a FEN string.
    ///
    /// Only the placement field is read. Ids are handed out in the order pieces appear,
    /// from a8 to h1.
    pub fn from_fen(fen: &str) -> Result<Self> {
        Self::from_fen_with_races(fen, Race::Classic, Race::Classic)
    }

    /// Like [`Board::from_fen`], with the given race for each side.
    pub fn from_fen_with_races(fen: &str, white_race: Race, black_race: Race) -> Result<Self> {
        let mut board = Self::new();

        let placements = fen
            .split_whitespace()
            .next()
            .ok_or(anyhow!("FEN string must have piece placements."))?;

        if placements.matches('/').count() != Rank::COUNT - 1 {
            bail!("FEN must have piece placements for all 8 ranks. Got {placements:?}");
        }

        for (rank, row) in Rank::iter().rev().zip(placements.split('/')) {
            let mut file = 0u8;

            for piece_char in row.chars() {
                if let Some(empty) = piece_char.to_digit(10) {
                    file += empty as u8;
                    continue;
                }

                let kind = PieceKind::from_uci(piece_char)?;
                let color = Color::from_case(piece_char);
                let square = Square::new(File::new(file)?, rank);
                let race = match color {
                    Color::White => white_race,
                    Color::Black => black_race,
                };
                board.add_piece(color, kind, square, race);
                file += 1;
            }

            if file as usize != File::COUNT {
                bail!("FEN rank {rank} must describe exactly 8 squares. Got {row:?}");
            }
        }

        Ok(board)
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for rank in Rank::iter().rev() {
            board += &format!("{rank}| ");

            for file in File::iter() {
                let occupant = match self.get_piece_at(Square::new(file, rank)) {
                    Some(piece) => piece.kind().to_fen_char(piece.color()),
                    None => '.',
                };

                board += &format!("{occupant} ");
            }

            board += "\n"
        }
        board += " +";
        for _ in File::iter() {
            board += "--";
        }
        board += "\n   ";
        for file in File::iter() {
            board += &format!("{file} ");
        }

        write!(f, "{board}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Board {
        Board::from_starting_position(StartingPosition::Standard, Race::Classic, Race::Classic)
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let board = standard();
        let ids = board.pieces().iter().map(Piece::id).collect::<Vec<_>>();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(board.has_unique_squares());
    }

    #[test]
    fn test_lookups() {
        let board = standard();
        let king = board.get_piece_at(Square::E1).unwrap();
        assert_eq!(king.kind(), PieceKind::King);
        assert_eq!(board.get_piece_with_id(king.id()), Some(king));
        assert!(board.get_piece_at(Square::E4).is_none());
        assert!(board.is_piece_near(4.5, 0.6, 0.5));
        assert!(!board.is_piece_near(4.5, 3.5, 0.5));
    }

    #[test]
    fn test_material() {
        let board = standard();
        assert_eq!(board.get_total_pieces_value(Color::White), 39);
        assert_eq!(board.get_total_pieces_value(Color::Black), 39);
        assert_eq!(board.find_pieces(PieceKind::Pawn, Color::Black).count(), 8);
        assert!(board.has_king(Color::White));
        assert_eq!(board.count_piece_actions(None), 0);
    }

    #[test]
    fn test_empty_between() {
        let board = standard();
        assert!(!board.is_empty_between(Square::A1, Square::A8));
        assert!(board.is_empty_between(Square::A3, Square::H3));
        assert!(board.is_empty_between(Square::A2, Square::A3));
    }

    #[test]
    fn test_attacked_squares() {
        let board = standard();
        assert!(board.is_square_attacked(Square::F3, Color::White));
        assert!(board.is_square_attacked(Square::D6, Color::Black));
        assert!(!board.is_square_attacked(Square::E4, Color::White));
        assert!(board.is_square_protected(Square::E2, Color::White));
        assert!(!board.is_king_under_attack(Color::White));

        let board = Board::from_fen("8/8/8/8/8/4k3/4q3/4K3").unwrap();
        assert!(board.is_king_under_attack(Color::White));
        assert!(!board.is_king_under_attack(Color::Black));
        assert!(board.is_square_protected(Square::E2, Color::Black));
    }

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "8/8/8/8/8/4k3/4q3/4K3",
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR",
        ];
        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.to_fen_placement(), fen);
        }
    }

    #[test]
    fn test_bad_fens() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/7").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/7x").is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::from_fen("8/8/8/8/8/4k3/4q3/4K3").unwrap();
        let display = board.to_string();
        assert!(display.starts_with("8| . . . . . . . . \n"));
        assert!(display.contains("1| . . . . K . . . \n"));
    }
}
