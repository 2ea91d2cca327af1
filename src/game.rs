/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};
use tracing::{debug, trace, warn};

use crate::{
    castling_actions, collect_actions_at, collect_actions_for_color, collect_all_actions,
    is_checkmate, to_fen, validate_action, Action, ActionHistory, ActionKind, ActionRejected,
    Board, Color, GameStatistics, GameTime, Message, OrderResult, Piece, PieceId, PieceKind,
    SimulationConfig, Square, TimeDelta,
};

/// Step used by [`Game::tick_until_idle`].
const IDLE_STEP: TimeDelta = TimeDelta::new(0.1);

/// How many steps [`Game::tick_until_idle`] takes before giving up.
const MAX_IDLE_TICKS: usize = 1000;

/// A match in progress: the board, the clock that drives it, and the verdict once there is one.
///
/// The basic methods you're probably looking for are [`Game::do_action`] and [`Game::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    board: Board,

    /// The authoritative clock. Every piece's own clock must match it between ticks.
    time: GameTime,

    config: SimulationConfig,

    /// What the captured pieces did before they were removed.
    fallen: ActionHistory,

    /// Once set, never unset.
    winner: Option<Color>,
}

impl Game {
    /// Starts a new game from the position and races in `config`.
    pub fn new(config: SimulationConfig) -> Self {
        let board = Board::from_starting_position(
            config.starting_position,
            config.white_race,
            config.black_race,
        );
        Self::from_board(board, config)
    }

    /// Starts a game on an arbitrary board.
    ///
    /// The board may already be decided, for example when a king is missing.
    pub fn from_board(board: Board, config: SimulationConfig) -> Self {
        let mut game = Self {
            board,
            time: GameTime::ZERO,
            config,
            fallen: ActionHistory::new(),
            winner: None,
        };
        game.check_if_there_is_a_winner();
        game
    }

    /// Starts a game from the placement field of `fen`, using the races in `config`.
    pub fn from_fen(fen: &str, config: SimulationConfig) -> Result<Self> {
        let board = Board::from_fen_with_races(fen, config.white_race, config.black_race)?;
        Ok(Self::from_board(board, config))
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub const fn time(&self) -> GameTime {
        self.time
    }

    #[inline(always)]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline(always)]
    pub const fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// `true` once only two pieces or fewer remain.
    #[inline(always)]
    pub fn is_draw(&self) -> bool {
        self.board.len() <= 2
    }

    #[inline(always)]
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.is_draw()
    }

    /// The player whose turn it would be in regular chess.
    ///
    /// White during even whole units of game time, Black during odd ones.
    #[inline(always)]
    pub fn active_color(&self) -> Color {
        if self.time.whole_moves() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// A FEN string of the current position.
    pub fn to_fen(&self) -> String {
        to_fen(&self.board, self.active_color(), self.time)
    }

    /// Whether the player of `color` is currently checkmated.
    #[inline(always)]
    pub fn is_checkmate(&self, color: Color) -> bool {
        is_checkmate(&self.board, color, self.time)
    }

    /// Every legal action on the board right now.
    #[inline(always)]
    pub fn collect_all_actions(&self) -> Vec<Action> {
        collect_all_actions(&self.board, self.time)
    }

    #[inline(always)]
    pub fn collect_actions_for_color(&self, color: Color) -> Vec<Action> {
        collect_actions_for_color(&self.board, color, self.time)
    }

    #[inline(always)]
    pub fn collect_actions_at(&self, square: Square) -> Vec<Action> {
        collect_actions_at(&self.board, square, self.time)
    }

    /// Whether a point on the board, in square units, is close enough to a piece to touch it.
    ///
    /// "Close enough" is the configured click distance.
    #[inline(always)]
    pub fn is_piece_near(&self, x: f64, y: f64) -> bool {
        self.board.is_piece_near(x, y, self.config.click_distance)
    }

    /// How both players are doing right now.
    #[inline(always)]
    pub fn statistics(&self) -> GameStatistics {
        GameStatistics::new(&self.board)
    }

    /// The histories of every piece, captured ones included, merged into one time-ordered log.
    pub fn history(&self) -> ActionHistory {
        ActionHistory::merge(
            self.board
                .pieces()
                .iter()
                .map(Piece::history)
                .chain([&self.fallen]),
        )
    }

    /// Every unread message, tagged with the piece that emitted it, in piece iteration order.
    pub fn collect_messages(&self) -> Vec<(PieceId, Message)> {
        self.board
            .pieces()
            .iter()
            .flat_map(|piece| piece.messages().iter().map(move |m| (piece.id(), *m)))
            .collect()
    }

    pub fn clear_messages(&mut self) {
        self.board.pieces.iter_mut().for_each(Piece::clear_messages);
    }

    fn count_messages(&self) -> usize {
        self.board.pieces().iter().map(|p| p.messages().len()).sum()
    }

    /// Hands `action` to the piece standing on its origin square.
    ///
    /// Legal orders that supersede replace whatever the piece was doing; selection orders
    /// are queued behind it. Castling orders the rook as well as the king.
    /// A refused order changes nothing except that the addressed piece, if any, emits
    /// [`Message::Cannot`].
    pub fn do_action(&mut self, action: Action) -> OrderResult {
        if let Err(rejection) = self.check_action(&action) {
            debug!("Rejected {action}: {rejection}");
            if let Some(piece) = self.board.get_piece_at_mut(action.from()) {
                piece.emit(Message::Cannot);
            }
            return Err(rejection);
        }

        if matches!(
            action.kind(),
            ActionKind::CastleKingside | ActionKind::CastleQueenside
        ) {
            let kingside = action.kind() == ActionKind::CastleKingside;
            for half in castling_actions(action.color(), kingside) {
                self.enqueue(half);
            }
        } else {
            self.enqueue(action);
        }
        Ok(())
    }

    fn check_action(&self, action: &Action) -> OrderResult {
        if self.winner.is_some() {
            return Err(ActionRejected::GameOver);
        }
        validate_action(&self.board, action, self.time)?;

        if let ActionKind::CastleKingside | ActionKind::CastleQueenside = action.kind() {
            let kingside = action.kind() == ActionKind::CastleKingside;
            for half in castling_actions(action.color(), kingside) {
                validate_action(&self.board, &half, self.time)?;
            }
        }
        Ok(())
    }

    /// Queues an already validated `action` on the piece at its origin.
    fn enqueue(&mut self, action: Action) {
        let Some(piece) = self.board.get_piece_at_mut(action.from()) else {
            return;
        };
        let message = match action.kind() {
            ActionKind::Move => Some(Message::StartMove),
            ActionKind::Attack => Some(Message::StartAttack),
            ActionKind::AttackEnPassant => Some(Message::StartEnPassantAttack),
            ActionKind::CastleKingside => Some(Message::StartCastlingKingside),
            ActionKind::CastleQueenside => Some(Message::StartCastlingQueenside),
            ActionKind::Select => Some(Message::Select),
            ActionKind::Unselect => Some(Message::Unselect),
            ActionKind::Promote(_) => None,
        };
        debug!("Piece {} starts: {action}", piece.id());
        piece.enqueue(action);
        if let Some(message) = message {
            piece.emit(message);
        }
    }

    /// Queues `action` exactly as a history recorded it, without the checks of [`Game::do_action`].
    ///
    /// Nothing happens if some piece is already busy with `action`, as a bounced piece is
    /// after a collision.
    pub(crate) fn enqueue_recorded(&mut self, action: Action) -> OrderResult {
        if self
            .board
            .pieces()
            .iter()
            .any(|piece| piece.current_action() == Some(&action))
        {
            return Ok(());
        }
        if !self.board.is_piece_at(action.from()) {
            return Err(ActionRejected::NoPieceAt(action.from()));
        }
        self.enqueue(action);
        Ok(())
    }

    /// Orders the piece on `from` towards `to`, working out what kind of action that is.
    ///
    /// An enemy on `to` is attacked. A pawn stepping diagonally onto an empty square captures
    /// en passant. A king stepping two files from its home square castles. Anything else is a move.
    ///
    /// # Example
    /// ```
    /// # use tempo::{Game, SimulationConfig, Square};
    /// let mut game = Game::new(SimulationConfig::default());
    /// game.order(Square::E2, Square::E4).unwrap();
    /// game.tick_until_idle().unwrap();
    /// assert_eq!(game.board().get_piece_at(Square::E4).unwrap().to_string(), "white pawn on e4");
    /// ```
    pub fn order(&mut self, from: Square, to: Square) -> OrderResult {
        let piece = self
            .board
            .get_piece_at(from)
            .ok_or(ActionRejected::NoPieceAt(from))?;
        let (color, kind) = (piece.color(), piece.kind());

        let action_kind = if self
            .board
            .get_piece_at(to)
            .is_some_and(|target| target.color() != color)
        {
            ActionKind::Attack
        } else if kind == PieceKind::Pawn && from.is_adjacent_diagonal(to) {
            ActionKind::AttackEnPassant
        } else if kind == PieceKind::King
            && from == Square::king_start(color)
            && from.is_on_same_rank(to)
            && from.distance_files(to) == 2
        {
            if to == Square::king_castle_target(color, true) {
                ActionKind::CastleKingside
            } else {
                ActionKind::CastleQueenside
            }
        } else {
            ActionKind::Move
        };

        self.do_action(Action::new(color, kind, action_kind, from, to))
    }

    /// Orders the king and a rook of `color` to castle.
    pub fn castle(&mut self, color: Color, kingside: bool) -> OrderResult {
        let [king_half, _] = castling_actions(color, kingside);
        self.do_action(king_half)
    }

    /// Orders the pawn on `square` to promote.
    pub fn promote(&mut self, square: Square, into: PieceKind) -> OrderResult {
        let piece = self
            .board
            .get_piece_at(square)
            .ok_or(ActionRejected::NoPieceAt(square))?;
        let action = Action::promotion(piece.color(), square, into);
        self.do_action(action)
    }

    /// Queues a selection change on the piece with `id`.
    pub fn set_selected(&mut self, id: PieceId, selected: bool) -> OrderResult {
        let piece = self
            .board
            .get_piece_with_id(id)
            .ok_or(ActionRejected::NoPieceWithId(id))?;
        let kind = if selected {
            ActionKind::Select
        } else {
            ActionKind::Unselect
        };
        let square = piece.square();
        let action = Action::new(piece.color(), piece.kind(), kind, square, square);
        self.do_action(action)
    }

    /// Advances the game by `dt`, in steps no larger than the configured maximum tick.
    ///
    /// A negative or non-finite `dt` is ignored.
    pub fn tick(&mut self, dt: TimeDelta) {
        if !dt.is_valid() {
            warn!("Ignoring tick of invalid duration {}", dt.get());
            return;
        }
        for step in dt.chunks(self.config.max_tick()) {
            self.tick_impl(step);
        }
    }

    /// Ticks in small steps until no piece has anything left to do.
    ///
    /// Returns how many steps that took, or an error if the board is still busy after
    /// a thousand of them.
    pub fn tick_until_idle(&mut self) -> Result<usize> {
        let mut ticks = 0;
        while !self.board.is_idle() {
            if ticks >= MAX_IDLE_TICKS {
                bail!(
                    "Board is still busy after {ticks} ticks, with {} actions queued",
                    self.board.count_piece_actions(None)
                );
            }
            self.tick(IDLE_STEP);
            ticks += 1;
        }
        Ok(ticks)
    }

    fn tick_impl(&mut self, dt: TimeDelta) {
        debug_assert!(dt <= TimeDelta::MAX_TICK, "Tick of {dt} is too large");
        debug_assert!(self.clocks_agree(), "Piece clocks drifted from {}", self.time);
        debug_assert!(self.board.has_unique_squares(), "Two pieces share a square");
        debug_assert!(
            self.board.pieces().iter().all(Piece::is_alive),
            "Dead pieces left on the board"
        );
        trace!("Ticking {dt} at {}", self.time);

        let messages_before = self.count_messages();
        for index in 0..self.board.len() {
            self.board
                .tick_piece(index, dt, self.config.damage_per_chess_move);
        }
        let something_happened = self.count_messages() != messages_before;

        let removed = self.board.remove_dead_pieces();
        if !removed.is_empty() {
            self.fallen = ActionHistory::merge(
                [&self.fallen]
                    .into_iter()
                    .chain(removed.iter().map(Piece::history)),
            );
        }
        if something_happened || !removed.is_empty() {
            self.check_if_there_is_a_winner();
        }

        self.time += dt;

        debug_assert!(self.clocks_agree(), "Piece clocks drifted from {}", self.time);
        debug_assert!(self.board.has_unique_squares(), "Two pieces share a square");
    }

    /// Decides the game if a king is gone or mated. A decided game stays decided.
    fn check_if_there_is_a_winner(&mut self) {
        if self.winner.is_some() {
            return;
        }

        let winner = if !self.board.has_king(Color::White) {
            Some(Color::Black)
        } else if !self.board.has_king(Color::Black) {
            Some(Color::White)
        } else if self.is_checkmate(Color::White) {
            Some(Color::Black)
        } else if self.is_checkmate(Color::Black) {
            Some(Color::White)
        } else {
            None
        };

        if let Some(color) = winner {
            debug!("{color} wins at {}", self.time);
            self.winner = winner;
        }
    }

    fn clocks_agree(&self) -> bool {
        self.board
            .pieces()
            .iter()
            .all(|piece| (piece.clock().get() - self.time.get()).abs() < 1e-6)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time: {}", self.time)?;
        write!(f, "{}", self.board)
    }
}
