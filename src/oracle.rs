/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{Context, Result};
use tracing::warn;

use crate::{Board, Color, GameTime, PieceKind, Square};

/// The castling field of a FEN string for `board`, such as `"KQkq"`, or `"-"` if nobody may castle.
///
/// A right exists while the king and that corner's rook have never moved from their home squares.
pub fn castling_field(board: &Board) -> String {
    let unmoved = |square: Square, kind: PieceKind, color: Color| {
        board
            .get_piece_at(square)
            .is_some_and(|p| p.kind() == kind && p.color() == color && !p.has_moved())
    };

    let mut field = String::with_capacity(4);
    for color in Color::all() {
        if !unmoved(Square::king_start(color), PieceKind::King, color) {
            continue;
        }
        for (kingside, c) in [(true, 'K'), (false, 'Q')] {
            if unmoved(Square::rook_castle_origin(color, kingside), PieceKind::Rook, color) {
                field.push(match color {
                    Color::White => c,
                    Color::Black => c.to_ascii_lowercase(),
                });
            }
        }
    }

    if field.is_empty() {
        field.push('-');
    }
    field
}

/// A full FEN string for `board` at time `now`, with `active` to move.
///
/// There is never an en-passant target and the halfmove clock is always zero.
/// The fullmove number counts whole units of game time, starting at 1.
///
/// # Example
/// ```
/// # use tempo::{to_fen, Board, Color, GameTime};
/// let board = Board::from_fen("8/8/8/8/8/4k3/4q3/4K3").unwrap();
/// assert_eq!(to_fen(&board, Color::White, GameTime::new(2.5)), "8/8/8/8/8/4k3/4q3/4K3 w - - 0 3");
/// ```
pub fn to_fen(board: &Board, active: Color, now: GameTime) -> String {
    format!(
        "{} {} {} - 0 {}",
        board.to_fen_placement(),
        active.to_uci(),
        castling_field(board),
        now.whole_moves() + 1
    )
}

/// Asks the rules library whether the side to move in `fen` is checkmated.
///
/// # Example
/// ```
/// # use tempo::is_checkmate_fen;
/// assert!(is_checkmate_fen("8/8/8/8/8/4k3/4q3/4K3 w - - 0 1").unwrap());
/// ```
pub fn is_checkmate_fen(fen: &str) -> Result<bool> {
    let game = chessie::Game::from_fen(fen)
        .with_context(|| format!("Rules library rejected FEN {fen:?}"))?;
    Ok(game.is_in_check() && game.get_legal_moves().is_empty())
}

/// Whether the player of `color` is checkmated on `board` at `now`.
///
/// Without both kings there is nothing to mate. A position the rules library cannot
/// read counts as not mate.
pub fn is_checkmate(board: &Board, color: Color, now: GameTime) -> bool {
    if !board.has_king(Color::White) || !board.has_king(Color::Black) {
        return false;
    }

    let fen = to_fen(board, color, now);
    match is_checkmate_fen(&fen) {
        Ok(mate) => mate,
        Err(e) => {
            warn!("Could not decide checkmate for {color}: {e:#}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Race, StartingPosition};

    #[test]
    fn test_queen_mate() {
        let board = Board::from_fen("8/8/8/8/8/4k3/4q3/4K3").unwrap();
        assert!(is_checkmate(&board, Color::White, GameTime::ZERO));
        assert!(!is_checkmate(&board, Color::Black, GameTime::ZERO));
    }

    #[test]
    fn test_standard_is_not_mate() {
        let board =
            Board::from_starting_position(StartingPosition::Standard, Race::Classic, Race::Classic);
        assert!(!is_checkmate(&board, Color::White, GameTime::ZERO));
        assert!(!is_checkmate(&board, Color::Black, GameTime::ZERO));
    }

    #[test]
    fn test_castling_field() {
        let board =
            Board::from_starting_position(StartingPosition::Standard, Race::Classic, Race::Classic);
        assert_eq!(castling_field(&board), "KQkq");

        let board =
            Board::from_starting_position(StartingPosition::KingsOnly, Race::Classic, Race::Classic);
        assert_eq!(castling_field(&board), "-");
    }

    #[test]
    fn test_missing_king_is_never_mate() {
        let board = Board::from_fen("8/8/8/8/8/8/4q3/4K3").unwrap();
        assert!(!is_checkmate(&board, Color::White, GameTime::ZERO));
    }
}
