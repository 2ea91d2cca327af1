/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::VecDeque, fmt};

use tracing::debug;

use crate::{
    can_do_attack, can_do_en_passant, Action, ActionHistory, ActionKind, Board, Color, GameTime,
    Message, PieceKind, Race, Square, TimeDelta,
};

/// Slack for progress and health values that are summed from many small ticks.
pub(crate) const EPSILON: f64 = 1e-9;

/// Fraction of a travel action after which the mover claims its destination square.
const HALFWAY: f64 = 0.5;

/// Uniquely identifies a piece for the lifetime of a [`Board`].
///
/// Ids are handed out in increasing order and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PieceId(pub(crate) u64);

impl PieceId {
    #[inline(always)]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single unit on the board, together with everything it has been told to do.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    id: PieceId,
    color: Color,
    kind: PieceKind,
    race: Race,

    /// Where the piece counts as standing for every occupancy query.
    ///
    /// A traveling piece switches to its destination half way through the journey.
    pub(crate) square: Square,

    health: f64,
    max_health: f64,
    shield: f64,
    max_shield: f64,

    /// Pending orders. The front one is in progress.
    pub(crate) actions: VecDeque<Action>,

    /// How far the front action has come, in `[0, 1]`.
    pub(crate) progress: f64,

    /// Must agree with the game clock between ticks.
    pub(crate) clock: GameTime,

    pub(crate) has_moved: bool,
    pub(crate) is_selected: bool,
    kill_count: u32,
    history: ActionHistory,
    pub(crate) messages: Vec<Message>,
}

impl Piece {
    /// Creates a fresh, idle piece with full health for its race.
    pub fn new(id: PieceId, color: Color, kind: PieceKind, square: Square, race: Race) -> Self {
        Self {
            id,
            color,
            kind,
            race,
            square,
            health: race.max_health(),
            max_health: race.max_health(),
            shield: race.max_shield(),
            max_shield: race.max_shield(),
            actions: VecDeque::new(),
            progress: 0.0,
            clock: GameTime::ZERO,
            has_moved: false,
            is_selected: false,
            kill_count: 0,
            history: ActionHistory::new(),
            messages: Vec::new(),
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn race(&self) -> Race {
        self.race
    }

    #[inline(always)]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline(always)]
    pub const fn health(&self) -> f64 {
        self.health
    }

    #[inline(always)]
    pub const fn max_health(&self) -> f64 {
        self.max_health
    }

    #[inline(always)]
    pub const fn shield(&self) -> f64 {
        self.shield
    }

    #[inline(always)]
    pub const fn max_shield(&self) -> f64 {
        self.max_shield
    }

    #[inline(always)]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    #[inline(always)]
    pub const fn clock(&self) -> GameTime {
        self.clock
    }

    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    #[inline(always)]
    pub const fn is_selected(&self) -> bool {
        self.is_selected
    }

    #[inline(always)]
    pub const fn kill_count(&self) -> u32 {
        self.kill_count
    }

    #[inline(always)]
    pub const fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// Messages emitted since they were last cleared, oldest first.
    #[inline(always)]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Every queued action, the one in progress first.
    #[inline(always)]
    pub fn actions(&self) -> impl ExactSizeIterator<Item = &Action> + '_ {
        self.actions.iter()
    }

    /// Whether the piece will be selected once its queue has been worked through.
    ///
    /// Travel and attacks drop the selection; queued selection orders set it.
    pub fn will_be_selected(&self) -> bool {
        self.actions
            .iter()
            .rev()
            .find_map(|action| match action.kind() {
                ActionKind::Select => Some(true),
                ActionKind::Unselect => Some(false),
                ActionKind::Promote(_) => None,
                _ => Some(false),
            })
            .unwrap_or(self.is_selected)
    }

    #[inline(always)]
    pub fn current_action(&self) -> Option<&Action> {
        self.actions.front()
    }

    #[inline(always)]
    pub fn is_idle(&self) -> bool {
        self.actions.is_empty()
    }

    #[inline(always)]
    pub fn is_alive(&self) -> bool {
        self.health > EPSILON
    }

    /// `true` if this is a pawn whose two-square push may be captured en passant at `when`.
    #[inline(always)]
    pub fn is_en_passantable(&self, when: GameTime) -> bool {
        self.kind == PieceKind::Pawn && self.history.has_just_double_moved(when)
    }

    /// Material value of this piece.
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        self.kind.value()
    }

    /// Where the piece is drawn, in square units with `(0, 0)` the corner of a1.
    ///
    /// A traveling piece is interpolated between its origin and destination.
    pub fn location(&self) -> (f64, f64) {
        let center = |sq: Square| (sq.file().index() as f64 + 0.5, sq.rank().index() as f64 + 0.5);
        match self.current_action() {
            Some(action) if action.kind().is_travel() => {
                let (x0, y0) = center(action.from());
                let (x1, y1) = center(action.to());
                (
                    x0 + (x1 - x0) * self.progress,
                    y0 + (y1 - y0) * self.progress,
                )
            }
            _ => center(self.square),
        }
    }

    /// Takes `amount` of damage, draining the shield before health.
    pub fn receive_damage(&mut self, amount: f64) {
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        self.health -= amount - absorbed;
    }

    /// Queues `action`.
    ///
    /// Orders that supersede drop everything that was queued before them.
    pub(crate) fn enqueue(&mut self, action: Action) {
        if action.kind().supersedes() {
            self.actions.clear();
            self.progress = 0.0;
        }
        self.actions.push_back(action);
    }

    #[inline(always)]
    pub(crate) fn emit(&mut self, message: Message) {
        self.messages.push(message);
    }

    #[inline(always)]
    pub(crate) fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Logs the front action in the history, unless it is already the latest entry.
    fn record_current_action(&mut self) {
        let Some(&current) = self.actions.front() else {
            return;
        };
        if self.history.last_action() != Some(&current) {
            self.history.add_action(self.clock, current);
        }
    }

    /// Drops the front action, announcing when nothing is left to do.
    fn finish_current_action(&mut self) {
        self.actions.pop_front();
        self.progress = 0.0;
        if self.actions.is_empty() {
            self.emit(Message::Done);
        }
    }

    /// When the action in progress was started, by the piece's own clock.
    fn current_action_started_at(&self) -> GameTime {
        self.history
            .last()
            .map(|(when, _)| *when)
            .unwrap_or(self.clock)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind, self.square)
    }
}

impl Board {
    /// Advances the piece at `index` by `dt`.
    ///
    /// Travel progresses linearly, attacks drain their target, and bookkeeping orders
    /// resolve at once. The piece's clock always advances by `dt`.
    pub(crate) fn tick_piece(&mut self, index: usize, dt: TimeDelta, damage_per_chess_move: f64) {
        let piece = &mut self.pieces[index];
        let action = match piece.actions.front() {
            Some(&action) if piece.is_alive() => action,
            _ => {
                piece.clock += dt;
                return;
            }
        };

        piece.record_current_action();

        match action.kind() {
            ActionKind::Move | ActionKind::CastleKingside | ActionKind::CastleQueenside => {
                self.tick_travel(index, action, dt)
            }
            ActionKind::Attack | ActionKind::AttackEnPassant => {
                self.tick_attack(index, action, dt, damage_per_chess_move)
            }
            ActionKind::Promote(into) => {
                let piece = &mut self.pieces[index];
                debug!("Piece {} promoted to {into}", piece.id);
                piece.kind = into;
                piece.finish_current_action();
            }
            ActionKind::Select => {
                let piece = &mut self.pieces[index];
                piece.is_selected = true;
                piece.actions.pop_front();
            }
            ActionKind::Unselect => {
                let piece = &mut self.pieces[index];
                piece.is_selected = false;
                piece.actions.pop_front();
            }
        }

        self.pieces[index].clock += dt;
    }

    fn tick_travel(&mut self, index: usize, action: Action, dt: TimeDelta) {
        let piece = &mut self.pieces[index];
        piece.has_moved = true;
        piece.is_selected = false;

        let progress = piece.progress + dt.get();
        if progress >= 1.0 - EPSILON {
            piece.square = action.to();
            debug!("Piece {} finished: {action}", piece.id);
            piece.finish_current_action();
            return;
        }
        piece.progress = progress;
        let id = piece.id;

        match self.get_piece_at(action.to()).map(Piece::id) {
            Some(occupant) if occupant == id => {}
            Some(occupant) => {
                let piece = &mut self.pieces[index];
                debug!(
                    "Piece {id} found {} taken by piece {occupant} at progress {progress:.2}, backing off",
                    action.to()
                );
                piece.actions.clear();
                piece.actions.push_back(action.reversed());
                piece.progress = 1.0 - progress;
                piece.emit(Message::Cannot);
            }
            None if progress >= HALFWAY - EPSILON => self.pieces[index].square = action.to(),
            None => {}
        }
    }

    fn tick_attack(&mut self, index: usize, action: Action, dt: TimeDelta, damage_per_chess_move: f64) {
        let started_at = self.pieces[index].current_action_started_at();
        let (still_valid, victim_square) = match action.kind() {
            ActionKind::AttackEnPassant => (
                can_do_en_passant(self, &action, started_at),
                action.en_passant_victim(),
            ),
            _ => (can_do_attack(self, &action), action.to()),
        };

        let victim = still_valid
            .then(|| self.index_of_piece_at(victim_square))
            .flatten();
        let Some(victim) = victim else {
            let piece = &mut self.pieces[index];
            debug!("Piece {} can no longer do: {action}", piece.id);
            piece.emit(Message::Cannot);
            piece.actions.pop_front();
            piece.progress = 0.0;
            return;
        };

        self.pieces[victim].receive_damage(damage_per_chess_move * dt.get());
        if self.pieces[victim].is_alive() {
            return;
        }

        let victim_id = self.pieces[victim].id;
        let piece = &mut self.pieces[index];
        debug!("Piece {} captured piece {victim_id} on {victim_square}", piece.id);
        piece.kill_count += 1;
        piece.has_moved = true;
        piece.is_selected = false;
        piece.square = action.to();
        piece.finish_current_action();
    }
}
