/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use crate::{Action, Color, PieceId, Square};

/// Reasons an order can be refused before it ever reaches a piece's queue.
///
/// A refused order leaves the board untouched. The piece that was addressed, if any,
/// emits [`crate::Message::Cannot`].
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum ActionRejected {
    #[error("No piece stands on {0}")]
    NoPieceAt(Square),

    #[error("No piece has id {0}")]
    NoPieceWithId(PieceId),

    /// The piece on the origin square belongs to the other player.
    #[error("Expected a {expected} piece, found a {found} one")]
    WrongColor { expected: Color, found: Color },

    #[error("Illegal move: {0}")]
    IllegalMove(Action),

    /// Attacking an empty square, a friendly piece, or through a blocker.
    #[error("Illegal attack: {0}")]
    IllegalAttack(Action),

    #[error("Illegal en passant: {0}")]
    IllegalEnPassant(Action),

    #[error("Cannot castle: {0}")]
    CannotCastle(Action),

    #[error("Cannot promote: {0}")]
    CannotPromote(Action),

    #[error("Piece {0} is already selected")]
    AlreadySelected(PieceId),

    #[error("Piece {0} is not selected")]
    NotSelected(PieceId),

    #[error("The {0} player has nothing selected")]
    NothingSelected(Color),

    #[error("There is no action number {0}")]
    NoActionNumber(usize),

    #[error("The game is already over")]
    GameOver,
}

/// Result of handing an order to the game.
pub type OrderResult<T = ()> = Result<T, ActionRejected>;
