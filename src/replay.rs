/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tracing::warn;

use crate::{ActionHistory, Game, TimeDelta};

/// Plays a recorded [`ActionHistory`] back on a game, in step with the game clock.
///
/// Every entry is handed to its piece at the moment it was originally started, so a replay
/// started from the same position ends up where the recorded game did.
#[derive(Clone, Debug)]
pub struct Replay {
    history: ActionHistory,

    game: Game,

    /// Index of the next entry to hand out.
    index: usize,
}

impl Replay {
    /// Prepares to replay `history` on `game`, which should be in the position the history started from.
    pub fn new(history: ActionHistory, game: Game) -> Self {
        Self {
            history,
            game,
            index: 0,
        }
    }

    #[inline(always)]
    pub const fn history(&self) -> &ActionHistory {
        &self.history
    }

    #[inline(always)]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    #[inline(always)]
    pub fn into_game(self) -> Game {
        self.game
    }

    /// How many recorded actions have been handed out so far.
    #[inline(always)]
    pub const fn n_replayed(&self) -> usize {
        self.index
    }

    /// `true` once every recorded action has been handed out.
    ///
    /// The pieces may still be busy carrying out the last ones.
    #[inline(always)]
    pub fn is_done(&self) -> bool {
        self.index == self.history.len()
    }

    /// Advances the game by `dt`, starting every recorded action that falls due on the way.
    ///
    /// Once the replay is done, this only ticks the game.
    ///
    /// # Example
    /// ```
    /// # use tempo::*;
    /// let mut game = Game::default();
    /// game.order(Square::E2, Square::E4).unwrap();
    /// game.tick_until_idle().unwrap();
    ///
    /// let mut replay = Replay::new(game.history(), Game::default());
    /// replay.do_move(TimeDelta::ONE_MOVE);
    /// assert!(replay.is_done());
    /// assert!(replay.game().board().is_piece_at(Square::E4));
    /// ```
    pub fn do_move(&mut self, dt: TimeDelta) {
        let mut to_do = dt;

        while let Some(&(when, action)) = self.history.get(self.index) {
            let until_due = when - self.game.time();
            if until_due > to_do {
                break;
            }

            let forward = TimeDelta::new(until_due.get().max(0.0));
            self.tick(forward);
            to_do = to_do - forward;

            if let Err(e) = self.game.enqueue_recorded(action) {
                warn!("Could not replay {action} at {when}: {e}");
            }
            self.index += 1;
        }

        self.tick(to_do);
    }

    fn tick(&mut self, dt: TimeDelta) {
        if dt > TimeDelta::ZERO {
            self.game.tick(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceKind, SimulationConfig, Square, StartingPosition};

    #[test]
    fn test_actions_start_on_time() {
        let mut game = Game::default();
        game.order(Square::E2, Square::E4).unwrap();
        game.tick(TimeDelta::new(0.5));
        game.order(Square::G8, Square::F6).unwrap();
        game.tick_until_idle().unwrap();

        let history = game.history();
        assert_eq!(history.len(), 2);
        let mut replay = Replay::new(history, Game::default());

        replay.do_move(TimeDelta::new(0.25));
        assert_eq!(replay.n_replayed(), 1);
        assert!(!replay.game().board().get_piece_at(Square::E2).unwrap().is_idle());
        assert!(replay.game().board().get_piece_at(Square::G8).unwrap().is_idle());

        replay.do_move(TimeDelta::new(0.25));
        assert_eq!(replay.n_replayed(), 2);
        assert!(replay.is_done());
        assert!(!replay.game().board().get_piece_at(Square::G8).unwrap().is_idle());

        replay.do_move(TimeDelta::ONE_MOVE);
        let game = replay.into_game();
        assert!(game.board().is_idle());
        assert_eq!(
            game.board().get_piece_at(Square::F6).unwrap().kind(),
            PieceKind::Knight
        );
        assert!(game.board().is_piece_at(Square::E4));
    }

    #[test]
    fn test_empty_history_only_ticks() {
        let mut replay = Replay::new(ActionHistory::new(), Game::default());
        assert!(replay.is_done());
        replay.do_move(TimeDelta::new(0.5));
        assert_eq!(replay.game().time(), crate::GameTime::new(0.5));
    }

    #[test]
    fn test_replaying_a_castle() {
        let config = SimulationConfig::default().with_starting_position(StartingPosition::ReadyToCastle);
        let mut game = Game::new(config);
        game.castle(Color::White, false).unwrap();
        game.tick_until_idle().unwrap();

        let mut replay = Replay::new(game.history(), Game::new(config));
        replay.do_move(TimeDelta::new(2.0));
        assert!(replay.is_done());
        assert!(replay.game().board().is_idle());
        assert_eq!(
            replay.game().board().to_fen_placement(),
            game.board().to_fen_placement()
        );
        assert_eq!(replay.game().to_fen().split(' ').nth(2), Some("kq"));
    }

    #[test]
    fn test_replaying_a_collision() {
        let mut game = Game::default();
        game.order(Square::G1, Square::F3).unwrap();
        game.order(Square::F2, Square::F3).unwrap();
        game.tick_until_idle().unwrap();
        assert_eq!(game.history().len(), 3);

        let mut replay = Replay::new(game.history(), Game::default());
        while !replay.is_done() {
            replay.do_move(TimeDelta::new(0.1));
        }
        replay.do_move(TimeDelta::new(2.0));

        let board = replay.game().board();
        assert_eq!(board.get_piece_at(Square::F3).unwrap().kind(), PieceKind::Knight);
        assert_eq!(board.get_piece_at(Square::F2).unwrap().kind(), PieceKind::Pawn);
        assert!(board.is_idle());
    }
}
