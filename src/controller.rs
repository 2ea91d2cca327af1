/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tracing::debug;

use crate::{
    castling_actions, validate_action, Action, ActionKind, ActionRejected, Color, Game,
    OrderResult, PieceId, PieceKind, Square, TimeDelta,
};

/// An abstract input from one player, already mapped from whatever device produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Put the player's cursor on a square.
    MoveCursor { color: Color, to: Square },

    /// Select the friendly piece under the cursor.
    Select { color: Color },

    /// Drop the current selection.
    Unselect { color: Color },

    /// Perform the `n`th entry of [`Controller::available_actions`], counting from zero.
    DoAction { color: Color, n: usize },

    /// Promote the selected pawn.
    Promote { color: Color, into: PieceKind },
}

impl PlayerCommand {
    /// The player who issued this command.
    pub const fn color(&self) -> Color {
        match *self {
            Self::MoveCursor { color, .. }
            | Self::Select { color }
            | Self::Unselect { color }
            | Self::DoAction { color, .. }
            | Self::Promote { color, .. } => color,
        }
    }
}

/// Per-player cursor and selection, turning [`PlayerCommand`]s into orders for a [`Game`].
#[derive(Clone, Debug, PartialEq)]
pub struct Controller {
    cursors: [Square; Color::COUNT],
    selected: [Option<PieceId>; Color::COUNT],
}

impl Controller {
    /// Each cursor starts on its player's king square, with nothing selected.
    pub fn new() -> Self {
        Self {
            cursors: [Square::king_start(Color::White), Square::king_start(Color::Black)],
            selected: [None, None],
        }
    }

    #[inline(always)]
    pub fn cursor(&self, color: Color) -> Square {
        self.cursors[color]
    }

    #[inline(always)]
    pub fn selected(&self, color: Color) -> Option<PieceId> {
        self.selected[color]
    }

    /// The selected piece of `color`, if it is still alive.
    fn selected_square(&self, game: &Game, color: Color) -> Option<Square> {
        self.selected[color]
            .and_then(|id| game.board().get_piece_with_id(id))
            .map(|piece| piece.square())
    }

    /// What the player of `color` could do right now, given their cursor and selection.
    ///
    /// The list is ordered: selecting or unselecting, attacking, attacking en passant, moving,
    /// castling kingside, castling queenside, and finally promoting.
    pub fn available_actions(&self, game: &Game, color: Color) -> Vec<Action> {
        let board = game.board();
        let cursor = self.cursors[color];
        let mut actions = Vec::new();

        let selected = self.selected_square(game, color);
        match board.get_piece_at(cursor) {
            Some(piece) if piece.color() == color && Some(cursor) == selected => {
                actions.push(Action::new(color, piece.kind(), ActionKind::Unselect, cursor, cursor))
            }
            Some(piece) if piece.color() == color => {
                actions.push(Action::new(color, piece.kind(), ActionKind::Select, cursor, cursor))
            }
            _ => {}
        }

        let Some(from) = selected else {
            return actions;
        };
        let Some(piece) = board.get_piece_at(from) else {
            return actions;
        };
        let kind = piece.kind();

        if from != cursor {
            let candidates = [
                Action::new(color, kind, ActionKind::Attack, from, cursor),
                Action::new(color, kind, ActionKind::AttackEnPassant, from, cursor),
                Action::new(color, kind, ActionKind::Move, from, cursor),
            ];
            actions.extend(
                candidates
                    .into_iter()
                    .filter(|action| validate_action(board, action, game.time()).is_ok()),
            );

            for kingside in [true, false] {
                let [king_half, _] = castling_actions(color, kingside);
                if king_half.from() == from
                    && king_half.to() == cursor
                    && validate_action(board, &king_half, game.time()).is_ok()
                {
                    actions.push(king_half);
                }
            }
        }

        actions.extend(
            PieceKind::promotions()
                .into_iter()
                .map(|into| Action::promotion(color, from, into))
                .filter(|action| validate_action(board, action, game.time()).is_ok()),
        );

        actions
    }

    /// Applies a single command to `game`.
    pub fn apply(&mut self, game: &mut Game, command: PlayerCommand) -> OrderResult {
        let color = command.color();
        match command {
            PlayerCommand::MoveCursor { to, .. } => {
                self.cursors[color] = to;
                Ok(())
            }
            PlayerCommand::Select { .. } => self.select_at_cursor(game, color),
            PlayerCommand::Unselect { .. } => self.unselect(game, color),
            PlayerCommand::DoAction { n, .. } => {
                let action = self
                    .available_actions(game, color)
                    .get(n)
                    .copied()
                    .ok_or(ActionRejected::NoActionNumber(n))?;
                self.perform(game, action)
            }
            PlayerCommand::Promote { into, .. } => {
                let square = self
                    .selected_square(game, color)
                    .ok_or(ActionRejected::NothingSelected(color))?;
                game.promote(square, into)
            }
        }
    }

    /// Applies every command in order, then advances the game by `dt`.
    ///
    /// A refused command does not stop the ones after it. The result of each command
    /// is returned in order.
    pub fn apply_and_tick(
        &mut self,
        game: &mut Game,
        commands: impl IntoIterator<Item = PlayerCommand>,
        dt: TimeDelta,
    ) -> Vec<OrderResult> {
        let results = commands
            .into_iter()
            .map(|command| {
                let result = self.apply(game, command);
                if let Err(e) = &result {
                    debug!("Command {command:?} was refused: {e}");
                }
                result
            })
            .collect();
        game.tick(dt);
        results
    }

    fn perform(&mut self, game: &mut Game, action: Action) -> OrderResult {
        let color = action.color();
        match action.kind() {
            ActionKind::Select => self.select_at_cursor(game, color),
            ActionKind::Unselect => self.unselect(game, color),
            kind if kind.is_travel() || kind.is_attack() => {
                game.do_action(action)?;
                // Pieces drop their selection once they set off.
                self.selected[color] = None;
                Ok(())
            }
            _ => game.do_action(action),
        }
    }

    fn select_at_cursor(&mut self, game: &mut Game, color: Color) -> OrderResult {
        let cursor = self.cursors[color];
        let piece = game
            .board()
            .get_piece_at(cursor)
            .ok_or(ActionRejected::NoPieceAt(cursor))?;
        if piece.color() != color {
            return Err(ActionRejected::WrongColor {
                expected: color,
                found: piece.color(),
            });
        }
        let id = piece.id();
        if self.selected[color] == Some(id) {
            return Err(ActionRejected::AlreadySelected(id));
        }

        game.set_selected(id, true)?;
        match self.selected[color].replace(id) {
            Some(previous) => release(game, previous),
            None => Ok(()),
        }
    }

    fn unselect(&mut self, game: &mut Game, color: Color) -> OrderResult {
        let id = self.selected[color]
            .take()
            .ok_or(ActionRejected::NothingSelected(color))?;
        release(game, id)
    }
}

/// Unselects the piece with `id`, unless it is gone or already on its way to being unselected.
fn release(game: &mut Game, id: PieceId) -> OrderResult {
    match game.board().get_piece_with_id(id) {
        Some(piece) if piece.will_be_selected() => game.set_selected(id, false),
        _ => Ok(()),
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, SimulationConfig, StartingPosition};

    fn cursor(color: Color, to: Square) -> PlayerCommand {
        PlayerCommand::MoveCursor { color, to }
    }

    #[test]
    fn test_select_then_move() {
        let mut game = Game::default();
        let mut controller = Controller::new();
        let white = Color::White;

        let results = controller.apply_and_tick(
            &mut game,
            [cursor(white, Square::E2), PlayerCommand::Select { color: white }],
            TimeDelta::new(0.1),
        );
        assert!(results.iter().all(Result::is_ok));
        assert!(controller.selected(white).is_some());
        assert!(game.board().get_piece_at(Square::E2).unwrap().is_selected());

        controller.apply(&mut game, cursor(white, Square::E4)).unwrap();
        let actions = controller.available_actions(&game, white);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind(), ActionKind::Move);

        controller
            .apply(&mut game, PlayerCommand::DoAction { color: white, n: 0 })
            .unwrap();
        assert!(controller.selected(white).is_none());
        game.tick_until_idle().unwrap();
        assert!(game.board().is_piece_at(Square::E4));
    }

    #[test]
    fn test_actions_are_ordered() {
        let config = SimulationConfig::default().with_starting_position(StartingPosition::ReadyToCastle);
        let mut game = Game::new(config);
        let mut controller = Controller::new();
        let white = Color::White;

        controller.apply(&mut game, PlayerCommand::Select { color: white }).unwrap();
        let actions = controller.available_actions(&game, white);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind(), ActionKind::Unselect);

        controller.apply(&mut game, cursor(white, Square::G1)).unwrap();
        let kinds = controller
            .available_actions(&game, white)
            .iter()
            .map(Action::kind)
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![ActionKind::CastleKingside]);
    }

    #[test]
    fn test_refused_commands_do_not_stop_the_batch() {
        let mut game = Game::default();
        let mut controller = Controller::new();
        let white = Color::White;

        let results = controller.apply_and_tick(
            &mut game,
            [
                PlayerCommand::DoAction { color: white, n: 3 },
                cursor(white, Square::E7),
                PlayerCommand::Select { color: white },
                cursor(white, Square::D2),
                PlayerCommand::Select { color: white },
            ],
            TimeDelta::new(0.25),
        );
        assert_eq!(results[0], Err(ActionRejected::NoActionNumber(3)));
        assert!(matches!(results[2], Err(ActionRejected::WrongColor { .. })));
        assert!(results[4].is_ok());
        assert_eq!(game.time().get(), 0.25);
    }

    #[test]
    fn test_refused_selection_keeps_the_old_one() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/r3K3", SimulationConfig::default()).unwrap();
        let mut controller = Controller::new();
        let black = Color::Black;

        controller.apply(&mut game, PlayerCommand::Select { color: black }).unwrap();
        let king = controller.selected(black);
        assert!(king.is_some());

        game.order(Square::A1, Square::E1).unwrap();
        game.tick_until_idle().unwrap();
        assert_eq!(game.winner(), Some(black));

        controller.apply(&mut game, cursor(black, Square::E1)).unwrap();
        assert_eq!(
            controller.apply(&mut game, PlayerCommand::Select { color: black }),
            Err(ActionRejected::GameOver)
        );
        assert_eq!(controller.selected(black), king);
    }

    #[test]
    fn test_switching_selection() {
        let mut game = Game::default();
        let mut controller = Controller::new();
        let white = Color::White;

        controller.apply(&mut game, cursor(white, Square::D2)).unwrap();
        controller.apply(&mut game, PlayerCommand::Select { color: white }).unwrap();
        controller.apply(&mut game, cursor(white, Square::E2)).unwrap();
        controller.apply(&mut game, PlayerCommand::Select { color: white }).unwrap();
        game.tick_until_idle().unwrap();

        let board = game.board();
        assert!(!board.get_piece_at(Square::D2).unwrap().is_selected());
        assert!(board.get_piece_at(Square::E2).unwrap().is_selected());
        assert_eq!(
            controller.selected(white),
            board.get_piece_at(Square::E2).map(Piece::id)
        );
    }

    #[test]
    fn test_promote_selected_pawn() {
        let config =
            SimulationConfig::default().with_starting_position(StartingPosition::PawnsAtPromotion);
        let mut game = Game::new(config);
        let mut controller = Controller::new();
        let white = Color::White;

        controller.apply(&mut game, cursor(white, Square::A8)).unwrap();
        controller.apply(&mut game, PlayerCommand::Select { color: white }).unwrap();
        let actions = controller.available_actions(&game, white);
        assert_eq!(actions.len(), 5);

        controller
            .apply(
                &mut game,
                PlayerCommand::Promote {
                    color: white,
                    into: PieceKind::Knight,
                },
            )
            .unwrap();
        game.tick_until_idle().unwrap();
        assert_eq!(
            game.board().get_piece_at(Square::A8).unwrap().kind(),
            PieceKind::Knight
        );
    }
}
