/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, PieceKind, Square};

/// What a piece has been ordered to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Walk to an empty square.
    Move,

    /// Damage the enemy piece on the target square until it dies.
    Attack,

    /// Damage the enemy pawn beside the mover, then step diagonally behind it.
    AttackEnPassant,

    /// King or rook half of a kingside castle.
    CastleKingside,

    /// King or rook half of a queenside castle.
    CastleQueenside,

    /// Turn a pawn on its last rank into another kind.
    Promote(PieceKind),

    Select,

    Unselect,
}

impl ActionKind {
    /// `true` for the kinds that physically carry a piece from one square to another over time.
    #[inline(always)]
    pub const fn is_travel(&self) -> bool {
        matches!(
            self,
            Self::Move | Self::CastleKingside | Self::CastleQueenside
        )
    }

    /// `true` for both attack kinds.
    #[inline(always)]
    pub const fn is_attack(&self) -> bool {
        matches!(self, Self::Attack | Self::AttackEnPassant)
    }

    /// `true` for the kinds that replace whatever a piece was doing.
    ///
    /// Selection is bookkeeping and is queued behind the current order instead.
    #[inline(always)]
    pub const fn supersedes(&self) -> bool {
        !matches!(self, Self::Select | Self::Unselect)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => write!(f, "move"),
            Self::Attack => write!(f, "attack"),
            Self::AttackEnPassant => write!(f, "attack en passant"),
            Self::CastleKingside => write!(f, "castle kingside"),
            Self::CastleQueenside => write!(f, "castle queenside"),
            Self::Promote(kind) => write!(f, "promote to {kind}"),
            Self::Select => write!(f, "select"),
            Self::Unselect => write!(f, "unselect"),
        }
    }
}

/// A single order given to a piece.
///
/// `from == to` only for promotion, selection and unselection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    color: Color,
    piece_kind: PieceKind,
    kind: ActionKind,
    from: Square,
    to: Square,
}

impl Action {
    /// Creates a new [`Action`] for a piece of `color` and `piece_kind`.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Action, ActionKind, Color, PieceKind, Square};
    /// let e4 = Action::new(Color::White, PieceKind::Pawn, ActionKind::Move, Square::E2, Square::E4);
    /// assert_eq!(e4.to_string(), "white pawn move from e2 to e4");
    /// ```
    #[inline(always)]
    pub const fn new(
        color: Color,
        piece_kind: PieceKind,
        kind: ActionKind,
        from: Square,
        to: Square,
    ) -> Self {
        Self {
            color,
            piece_kind,
            kind,
            from,
            to,
        }
    }

    /// Shorthand for a [`ActionKind::Move`].
    #[inline(always)]
    pub const fn movement(color: Color, piece_kind: PieceKind, from: Square, to: Square) -> Self {
        Self::new(color, piece_kind, ActionKind::Move, from, to)
    }

    /// Shorthand for a [`ActionKind::Attack`].
    #[inline(always)]
    pub const fn attack(color: Color, piece_kind: PieceKind, from: Square, to: Square) -> Self {
        Self::new(color, piece_kind, ActionKind::Attack, from, to)
    }

    /// Shorthand for promoting the pawn of `color` on `square` to `into`.
    #[inline(always)]
    pub const fn promotion(color: Color, square: Square, into: PieceKind) -> Self {
        Self::new(
            color,
            PieceKind::Pawn,
            ActionKind::Promote(into),
            square,
            square,
        )
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Kind of the piece carrying out this action.
    #[inline(always)]
    pub const fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }

    #[inline(always)]
    pub const fn kind(&self) -> ActionKind {
        self.kind
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The same journey, walked back as a plain move.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Action, ActionKind, Color, PieceKind, Square};
    /// let castle = Action::new(Color::White, PieceKind::King, ActionKind::CastleKingside, Square::E1, Square::G1);
    /// let back = castle.reversed();
    /// assert_eq!(back.kind(), ActionKind::Move);
    /// assert_eq!((back.from(), back.to()), (Square::G1, Square::E1));
    /// ```
    #[inline(always)]
    pub const fn reversed(&self) -> Self {
        Self::movement(self.color, self.piece_kind, self.to, self.from)
    }

    /// `true` if this is a pawn stepping two squares straight ahead.
    ///
    /// A pawn backing off from a blocked double step does not count.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Action, Color, PieceKind, Square};
    /// assert!(Action::movement(Color::Black, PieceKind::Pawn, Square::B7, Square::B5).is_double_move());
    /// assert!(!Action::movement(Color::Black, PieceKind::Rook, Square::B7, Square::B5).is_double_move());
    /// ```
    #[inline(always)]
    pub const fn is_double_move(&self) -> bool {
        matches!(self.kind, ActionKind::Move)
            && matches!(self.piece_kind, PieceKind::Pawn)
            && self.from.is_on_same_file(self.to)
            && self.from.distance_ranks(self.to) == 2
            && self.from.is_forward(self.color, self.to)
    }

    /// The square of the pawn captured by this en-passant attack.
    ///
    /// It sits beside the attacker, on the file the attacker lands on.
    #[inline(always)]
    pub const fn en_passant_victim(&self) -> Square {
        Square::new(self.to.file(), self.from.rank())
    }
}

impl fmt::Display for Action {
    /// Formats as `"<color> <piece kind> <action kind> from <square> to <square>"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} from {} to {}",
            self.color, self.piece_kind, self.kind, self.from, self.to
        )
    }
}

/// Something a piece wants the outside world to notice, usually with a sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Message {
    Select,
    Unselect,
    Cannot,
    StartMove,
    StartAttack,
    StartEnPassantAttack,
    StartCastlingKingside,
    StartCastlingQueenside,
    Done,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Select => "select",
            Self::Unselect => "unselect",
            Self::Cannot => "cannot",
            Self::StartMove => "start move",
            Self::StartAttack => "start attack",
            Self::StartEnPassantAttack => "start en passant attack",
            Self::StartCastlingKingside => "start castling kingside",
            Self::StartCastlingQueenside => "start castling queenside",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}
