/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::anyhow;

use super::{Color, File, PieceKind, Rank, Square};

use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};

const WHITE: Color = Color::White;
const BLACK: Color = Color::Black;

/// The pieces on a back rank, from the a-file to the h-file.
const BACK_RANK: [PieceKind; File::COUNT] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

/// A named position a game can start from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StartingPosition {
    /// The regular start of a chess game.
    #[default]
    Standard,
    KingsOnly,
    /// Both sides have pawns next to a square an enemy pawn is about to double step past.
    BeforeEnPassant,
    /// After move 24 of the 1999 game between Kasparov and Topalov.
    KasparovVsTopalov,
    /// All pawns have advanced to meet in the center.
    PawnAllOutAssault,
    PawnsAtPromotion,
    PawnsNearPromotion,
    PawnsNearlyNearPromotion,
    /// One move before White can mate with Qxf7.
    BeforeScholarsMate,
    BishopAndKnightEndGame,
    QueenEndGame,
    /// Kings and rooks only, all unmoved.
    ReadyToCastle,
    /// Kings and rooks unmoved, but enemy knights cover the squares the kings would pass.
    ReadyToNotCastle,
}

impl StartingPosition {
    /// All starting positions, in menu order.
    pub const fn all() -> [Self; 13] {
        [
            Self::Standard,
            Self::KingsOnly,
            Self::BeforeEnPassant,
            Self::KasparovVsTopalov,
            Self::PawnAllOutAssault,
            Self::PawnsAtPromotion,
            Self::PawnsNearPromotion,
            Self::PawnsNearlyNearPromotion,
            Self::BeforeScholarsMate,
            Self::BishopAndKnightEndGame,
            Self::QueenEndGame,
            Self::ReadyToCastle,
            Self::ReadyToNotCastle,
        ]
    }

    /// Snake-case name of this position, as accepted by [`StartingPosition::from_str`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::KingsOnly => "kings_only",
            Self::BeforeEnPassant => "before_en_passant",
            Self::KasparovVsTopalov => "kasparov_vs_topalov",
            Self::PawnAllOutAssault => "pawn_all_out_assault",
            Self::PawnsAtPromotion => "pawns_at_promotion",
            Self::PawnsNearPromotion => "pawns_near_promotion",
            Self::PawnsNearlyNearPromotion => "pawns_nearly_near_promotion",
            Self::BeforeScholarsMate => "before_scholars_mate",
            Self::BishopAndKnightEndGame => "bishop_and_knight_end_game",
            Self::QueenEndGame => "queen_end_game",
            Self::ReadyToCastle => "ready_to_castle",
            Self::ReadyToNotCastle => "ready_to_not_castle",
        }
    }

    /// The pieces of this position, in the order they will be ticked.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Color, PieceKind, Square, StartingPosition};
    /// let pieces = StartingPosition::KingsOnly.pieces();
    /// assert_eq!(pieces, vec![
    ///     (Color::White, PieceKind::King, Square::E1),
    ///     (Color::Black, PieceKind::King, Square::E8),
    /// ]);
    /// ```
    pub fn pieces(&self) -> Vec<(Color, PieceKind, Square)> {
        match self {
            Self::Standard => standard_pieces(Rank::TWO, Rank::SEVEN),
            Self::KingsOnly => vec![(WHITE, King, Square::E1), (BLACK, King, Square::E8)],
            Self::BeforeEnPassant => vec![
                (WHITE, King, Square::E1),
                (WHITE, Pawn, Square::A5),
                (WHITE, Pawn, Square::C5),
                (WHITE, Pawn, Square::G2),
                (BLACK, King, Square::E8),
                (BLACK, Pawn, Square::B7),
                (BLACK, Pawn, Square::F4),
                (BLACK, Pawn, Square::H4),
            ],
            Self::KasparovVsTopalov => vec![
                (WHITE, Rook, Square::B7),
                (WHITE, Queen, Square::F6),
                (WHITE, King, Square::B1),
                (WHITE, Bishop, Square::H3),
                (WHITE, Pawn, Square::A3),
                (WHITE, Pawn, Square::B4),
                (WHITE, Pawn, Square::C2),
                (WHITE, Pawn, Square::F3),
                (WHITE, Pawn, Square::G3),
                (WHITE, Pawn, Square::H2),
                (BLACK, Rook, Square::D8),
                (BLACK, Queen, Square::C4),
                (BLACK, King, Square::A4),
                (BLACK, Rook, Square::H8),
                (BLACK, Pawn, Square::A6),
                (BLACK, Pawn, Square::B5),
                (BLACK, Pawn, Square::F7),
                (BLACK, Pawn, Square::G6),
                (BLACK, Pawn, Square::H7),
            ],
            Self::PawnAllOutAssault => standard_pieces(Rank::FOUR, Rank::FIVE),
            Self::PawnsAtPromotion => kings_and_pawns(Square::A8, Square::H1),
            Self::PawnsNearPromotion => kings_and_pawns(Square::A7, Square::H2),
            Self::PawnsNearlyNearPromotion => kings_and_pawns(Square::A6, Square::H3),
            Self::BeforeScholarsMate => {
                let mut pieces = standard_pieces(Rank::TWO, Rank::SEVEN);
                for (from, to) in [
                    (Square::D1, Square::H5),
                    (Square::F1, Square::C4),
                    (Square::E2, Square::E4),
                    (Square::B8, Square::C6),
                    (Square::G8, Square::F6),
                    (Square::E7, Square::E5),
                ] {
                    if let Some(piece) = pieces.iter_mut().find(|(_, _, sq)| *sq == from) {
                        piece.2 = to;
                    }
                }
                pieces
            }
            Self::BishopAndKnightEndGame => vec![
                (WHITE, Knight, Square::C4),
                (WHITE, Bishop, Square::G4),
                (WHITE, King, Square::E6),
                (BLACK, King, Square::D2),
            ],
            Self::QueenEndGame => vec![
                (WHITE, Queen, Square::D1),
                (WHITE, King, Square::E1),
                (BLACK, Queen, Square::D8),
                (BLACK, King, Square::E8),
            ],
            Self::ReadyToCastle => vec![
                (WHITE, Rook, Square::A1),
                (WHITE, King, Square::E1),
                (WHITE, Rook, Square::H1),
                (BLACK, Rook, Square::A8),
                (BLACK, King, Square::E8),
                (BLACK, Rook, Square::H8),
            ],
            Self::ReadyToNotCastle => {
                let mut pieces = vec![
                    (WHITE, Rook, Square::A1),
                    (WHITE, Knight, Square::C6),
                    (WHITE, King, Square::E1),
                    (WHITE, Knight, Square::H6),
                    (WHITE, Rook, Square::H1),
                ];
                pieces.extend(File::iter().map(|f| (WHITE, Pawn, Square::new(f, Rank::TWO))));
                pieces.extend([
                    (BLACK, Rook, Square::A8),
                    (BLACK, Knight, Square::C3),
                    (BLACK, King, Square::E8),
                    (BLACK, Knight, Square::H3),
                    (BLACK, Rook, Square::H8),
                ]);
                pieces.extend(File::iter().map(|f| (BLACK, Pawn, Square::new(f, Rank::SEVEN))));
                pieces
            }
        }
    }
}

/// A full set of pieces, with the pawns of each side on the given ranks.
fn standard_pieces(white_pawns: Rank, black_pawns: Rank) -> Vec<(Color, PieceKind, Square)> {
    let mut pieces = Vec::with_capacity(32);
    for (color, pawn_rank) in [(WHITE, white_pawns), (BLACK, black_pawns)] {
        let back_rank = Rank::first(color);
        pieces.extend(
            File::iter()
                .zip(BACK_RANK)
                .map(|(file, kind)| (color, kind, Square::new(file, back_rank))),
        );
        pieces.extend(File::iter().map(|file| (color, Pawn, Square::new(file, pawn_rank))));
    }
    pieces
}

fn kings_and_pawns(white_pawn: Square, black_pawn: Square) -> Vec<(Color, PieceKind, Square)> {
    vec![
        (WHITE, King, Square::E1),
        (WHITE, Pawn, white_pawn),
        (BLACK, King, Square::E8),
        (BLACK, Pawn, black_pawn),
    ]
}

impl FromStr for StartingPosition {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace('-', "_");
        Self::all()
            .into_iter()
            .find(|position| position.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| anyhow!("Invalid str for StartingPosition: Got {s:?}"))
    }
}

impl fmt::Display for StartingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
