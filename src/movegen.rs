/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    Action, ActionKind, ActionRejected, Board, Color, File, GameTime, OrderResult, Piece,
    PieceKind, Rank, Square,
};

/// Whether a piece of `kind` could walk from `from` to `to` if the board were otherwise empty.
///
/// Standing still is always possible. Pawns only walk straight ahead: one square, or two from
/// their starting rank.
///
/// # Example
/// ```
/// # use tempo::{can_move_on_empty_board, Color, PieceKind, Square};
/// assert!(can_move_on_empty_board(Color::White, PieceKind::Pawn, Square::E2, Square::E4));
/// assert!(!can_move_on_empty_board(Color::White, PieceKind::Pawn, Square::E3, Square::E5));
/// assert!(can_move_on_empty_board(Color::Black, PieceKind::Knight, Square::G8, Square::F6));
/// ```
pub fn can_move_on_empty_board(color: Color, kind: PieceKind, from: Square, to: Square) -> bool {
    if from == to {
        return true;
    }
    match kind {
        PieceKind::King => from.is_adjacent(to),
        PieceKind::Knight => from.is_knight_jump(to),
        PieceKind::Bishop => from.is_on_same_diagonal(to),
        PieceKind::Rook => from.is_on_same_rank(to) || from.is_on_same_file(to),
        PieceKind::Queen => {
            from.is_on_same_diagonal(to) || from.is_on_same_rank(to) || from.is_on_same_file(to)
        }
        PieceKind::Pawn => {
            let max_steps = if from.rank() == Rank::second(color) { 2 } else { 1 };
            from.is_on_same_file(to)
                && from.is_forward(color, to)
                && from.distance_ranks(to) <= max_steps
        }
    }
}

/// Whether a piece of `kind` could attack `to` from `from` if the board were otherwise empty.
///
/// Pawns attack one square diagonally forward. Every other kind attacks the way it moves.
///
/// # Example
/// ```
/// # use tempo::{can_attack_on_empty_board, Color, PieceKind, Square};
/// assert!(can_attack_on_empty_board(Color::White, PieceKind::Pawn, Square::E4, Square::D5));
/// assert!(!can_attack_on_empty_board(Color::White, PieceKind::Pawn, Square::E4, Square::E5));
/// assert!(!can_attack_on_empty_board(Color::White, PieceKind::Queen, Square::D1, Square::D1));
/// ```
pub fn can_attack_on_empty_board(color: Color, kind: PieceKind, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    match kind {
        PieceKind::Pawn => from.is_adjacent_diagonal(to) && from.is_forward(color, to),
        kind => can_move_on_empty_board(color, kind, from, to),
    }
}

/// The living piece that is about to carry out `action`, if it really stands where the action starts.
fn actor<'a>(board: &'a Board, action: &Action) -> Option<&'a Piece> {
    board
        .get_piece_at(action.from())
        .filter(|piece| piece.color() == action.color() && piece.kind() == action.piece_kind())
}

/// Whether `action`, a plain move, can start right now.
pub fn can_do_move(board: &Board, action: &Action) -> bool {
    actor(board, action).is_some()
        && action.from() != action.to()
        && can_move_on_empty_board(action.color(), action.piece_kind(), action.from(), action.to())
        && !board.is_piece_at(action.to())
        && (action.piece_kind() == PieceKind::Knight
            || board.is_empty_between(action.from(), action.to()))
}

/// Whether `action`, a regular attack, may start or continue.
///
/// The target must hold an enemy piece and, unless the attacker is a knight, the line between
/// them must be clear.
pub fn can_do_attack(board: &Board, action: &Action) -> bool {
    actor(board, action).is_some()
        && can_attack_on_empty_board(action.color(), action.piece_kind(), action.from(), action.to())
        && board
            .get_piece_at(action.to())
            .is_some_and(|target| target.color() != action.color())
        && (action.piece_kind() == PieceKind::Knight
            || board.is_empty_between(action.from(), action.to()))
}

/// Whether `action`, an en-passant capture, is allowed at `when`.
///
/// The pawn must stand on its fifth rank and aim diagonally forward at an empty square,
/// behind an enemy pawn that double stepped within the capture window.
pub fn can_do_en_passant(board: &Board, action: &Action, when: GameTime) -> bool {
    if action.piece_kind() != PieceKind::Pawn || actor(board, action).is_none() {
        return false;
    }
    let color = action.color();
    action.from().rank() == Rank::fifth(color)
        && can_attack_on_empty_board(color, PieceKind::Pawn, action.from(), action.to())
        && !board.is_piece_at(action.to())
        && board
            .get_piece_at(action.en_passant_victim())
            .is_some_and(|victim| victim.color() != color && victim.is_en_passantable(when))
}

/// Whether the king of `color` may castle on the given side.
///
/// Both the king and the rook must stand unmoved on their home squares, with nothing between
/// them. The king may not stand on, pass through, or land on an attacked square.
///
/// # Example
/// ```
/// # use tempo::{can_castle, Board, Color, Race, StartingPosition};
/// let board = Board::from_starting_position(StartingPosition::ReadyToCastle, Race::Classic, Race::Classic);
/// assert!(can_castle(&board, Color::White, true));
///
/// let board = Board::from_starting_position(StartingPosition::ReadyToNotCastle, Race::Classic, Race::Classic);
/// assert!(!can_castle(&board, Color::White, true));
/// ```
pub fn can_castle(board: &Board, color: Color, kingside: bool) -> bool {
    let king_square = Square::king_start(color);
    let rook_square = Square::rook_castle_origin(color, kingside);

    let unmoved = |square: Square, kind: PieceKind| {
        board
            .get_piece_at(square)
            .is_some_and(|p| p.color() == color && p.kind() == kind && !p.has_moved())
    };
    if !unmoved(king_square, PieceKind::King) || !unmoved(rook_square, PieceKind::Rook) {
        return false;
    }
    if !board.is_empty_between(king_square, rook_square) {
        return false;
    }

    castling_path(color, kingside)
        .into_iter()
        .all(|square| !board.is_square_attacked(square, color.opponent()))
}

/// The squares that must be safe for a king of `color` to castle: its own and the ones it walks over.
///
/// Queenside also covers the b-file, which the rook passes.
fn castling_path(color: Color, kingside: bool) -> Vec<Square> {
    let files: &[File] = if kingside {
        &[File::E, File::F, File::G]
    } else {
        &[File::E, File::D, File::C, File::B]
    };
    files
        .iter()
        .map(|&file| Square::new(file, Rank::first(color)))
        .collect()
}

/// Whether the pawn on `square` stands on its last rank, ready to promote.
pub fn can_promote(board: &Board, square: Square) -> bool {
    board.get_piece_at(square).is_some_and(|piece| {
        piece.kind() == PieceKind::Pawn && square.rank() == Rank::eighth(piece.color())
    })
}

/// Checks whether `action` may be queued right now.
///
/// `now` is the current game time, used for the en-passant window.
pub fn validate_action(board: &Board, action: &Action, now: GameTime) -> OrderResult {
    let piece = board
        .get_piece_at(action.from())
        .ok_or(ActionRejected::NoPieceAt(action.from()))?;
    if piece.color() != action.color() {
        return Err(ActionRejected::WrongColor {
            expected: action.color(),
            found: piece.color(),
        });
    }

    let allowed = match action.kind() {
        ActionKind::Move => can_do_move(board, action),
        ActionKind::Attack => can_do_attack(board, action),
        ActionKind::AttackEnPassant => can_do_en_passant(board, action, now),
        ActionKind::CastleKingside | ActionKind::CastleQueenside => {
            is_castling_half(action) && can_castle(board, action.color(), is_kingside(action))
        }
        ActionKind::Promote(into) => {
            into != PieceKind::Pawn
                && into != PieceKind::King
                && action.from() == action.to()
                && can_promote(board, action.from())
        }
        ActionKind::Select => {
            if piece.will_be_selected() {
                return Err(ActionRejected::AlreadySelected(piece.id()));
            }
            true
        }
        ActionKind::Unselect => {
            if !piece.will_be_selected() {
                return Err(ActionRejected::NotSelected(piece.id()));
            }
            true
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(rejection_for(action))
    }
}

/// The rejection that matches a refused `action` of a given kind.
fn rejection_for(action: &Action) -> ActionRejected {
    let action = *action;
    match action.kind() {
        ActionKind::Move => ActionRejected::IllegalMove(action),
        ActionKind::Attack => ActionRejected::IllegalAttack(action),
        ActionKind::AttackEnPassant => ActionRejected::IllegalEnPassant(action),
        ActionKind::CastleKingside | ActionKind::CastleQueenside => {
            ActionRejected::CannotCastle(action)
        }
        ActionKind::Promote(_) => ActionRejected::CannotPromote(action),
        ActionKind::Select | ActionKind::Unselect => ActionRejected::IllegalMove(action),
    }
}

#[inline(always)]
fn is_kingside(action: &Action) -> bool {
    action.kind() == ActionKind::CastleKingside
}

/// Whether `action` is exactly the king's or the rook's walk of a castle.
fn is_castling_half(action: &Action) -> bool {
    let (color, kingside) = (action.color(), is_kingside(action));
    let journey = (action.from(), action.to());
    match action.piece_kind() {
        PieceKind::King => {
            journey == (Square::king_start(color), Square::king_castle_target(color, kingside))
        }
        PieceKind::Rook => {
            journey
                == (
                    Square::rook_castle_origin(color, kingside),
                    Square::rook_castle_target(color, kingside),
                )
        }
        _ => false,
    }
}

/// The king and rook halves of a castle by `color`.
pub fn castling_actions(color: Color, kingside: bool) -> [Action; 2] {
    let kind = if kingside {
        ActionKind::CastleKingside
    } else {
        ActionKind::CastleQueenside
    };
    [
        Action::new(
            color,
            PieceKind::King,
            kind,
            Square::king_start(color),
            Square::king_castle_target(color, kingside),
        ),
        Action::new(
            color,
            PieceKind::Rook,
            kind,
            Square::rook_castle_origin(color, kingside),
            Square::rook_castle_target(color, kingside),
        ),
    ]
}

/// Every action `piece` could start, ignoring whether it walks its king into danger.
///
/// Castles are offered to the king only.
fn pseudo_legal_actions(board: &Board, piece: &Piece, now: GameTime) -> Vec<Action> {
    let (color, kind, from) = (piece.color(), piece.kind(), piece.square());
    let mut actions = Vec::new();

    if kind == PieceKind::Pawn {
        pawn_actions(board, piece, now, &mut actions);
        return actions;
    }

    for ray in from.target_rays(color, kind) {
        for to in ray {
            match board.get_piece_at(to) {
                None => actions.push(Action::movement(color, kind, from, to)),
                Some(target) => {
                    if target.color() != color {
                        actions.push(Action::attack(color, kind, from, to));
                    }
                    break;
                }
            }
        }
    }

    if kind == PieceKind::King {
        for kingside in [true, false] {
            if can_castle(board, color, kingside) {
                actions.push(castling_actions(color, kingside)[0]);
            }
        }
    }

    actions
}

fn pawn_actions(board: &Board, piece: &Piece, now: GameTime, actions: &mut Vec<Action>) {
    let (color, from) = (piece.color(), piece.square());
    let kind = PieceKind::Pawn;

    if from.rank() == Rank::eighth(color) {
        actions.extend(
            PieceKind::promotions()
                .into_iter()
                .map(|into| Action::promotion(color, from, into)),
        );
        return;
    }

    let steps = if from.rank() == Rank::second(color) { 2 } else { 1 };
    for to in (1..=steps).filter_map(|n| from.forward_by(color, n)) {
        if board.is_piece_at(to) {
            break;
        }
        actions.push(Action::movement(color, kind, from, to));
    }

    let forward = color.negation_multiplier();
    for to in [-1, 1].into_iter().filter_map(|df| from.offset(df, forward)) {
        if board
            .get_piece_at(to)
            .is_some_and(|target| target.color() != color)
        {
            actions.push(Action::attack(color, kind, from, to));
        }
    }

    for to in [-1, 1].into_iter().filter_map(|df| from.offset(df, forward)) {
        let en_passant = Action::new(color, kind, ActionKind::AttackEnPassant, from, to);
        if can_do_en_passant(board, &en_passant, now) {
            actions.push(en_passant);
        }
    }
}

/// Drops king moves and king attacks that land on an attacked square, and castles through attacked squares.
///
/// Moves of other pieces that expose their own king are kept.
fn retain_king_safe(board: &Board, actions: &mut Vec<Action>) {
    actions.retain(|action| {
        let enemy = action.color().opponent();
        match action.kind() {
            ActionKind::Move | ActionKind::Attack if action.piece_kind() == PieceKind::King => {
                !board.is_square_attacked(action.to(), enemy)
            }
            ActionKind::CastleKingside | ActionKind::CastleQueenside => {
                castling_path(action.color(), is_kingside(action))
                    .into_iter()
                    .all(|square| !board.is_square_attacked(square, enemy))
            }
            _ => true,
        }
    });
}

/// Every legal action of every piece on the board, in piece iteration order.
pub fn collect_all_actions(board: &Board, now: GameTime) -> Vec<Action> {
    let mut actions = board
        .pieces()
        .iter()
        .flat_map(|piece| pseudo_legal_actions(board, piece, now))
        .collect();
    retain_king_safe(board, &mut actions);
    actions
}

/// Every legal action of the pieces of `color`.
pub fn collect_actions_for_color(board: &Board, color: Color, now: GameTime) -> Vec<Action> {
    let mut actions = board
        .pieces()
        .iter()
        .filter(|piece| piece.color() == color)
        .flat_map(|piece| pseudo_legal_actions(board, piece, now))
        .collect();
    retain_king_safe(board, &mut actions);
    actions
}

/// Every legal action of the piece on `square`. Empty if the square is empty.
pub fn collect_actions_at(board: &Board, square: Square, now: GameTime) -> Vec<Action> {
    let Some(piece) = board.get_piece_at(square) else {
        return Vec::new();
    };
    let mut actions = pseudo_legal_actions(board, piece, now);
    retain_king_safe(board, &mut actions);
    actions
}
