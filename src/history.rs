/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref};

use crate::{Action, GameTime, TimeDelta};

/// Slack allowed when comparing clock readings that were summed from many small ticks.
const TIME_EPSILON: f64 = 1e-9;

/// A time-ordered log of every action a piece (or the whole board) has started.
///
/// Each entry is keyed by the clock reading at which the action became the piece's current action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionHistory(Vec<(GameTime, Action)>);

impl ActionHistory {
    /// Creates an empty history.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history from entries that are already sorted by time.
    pub fn from_timed_actions(timed_actions: Vec<(GameTime, Action)>) -> Self {
        debug_assert!(
            timed_actions.windows(2).all(|w| w[0].0 <= w[1].0),
            "Action history must be sorted by time"
        );
        Self(timed_actions)
    }

    /// Appends `action`, started at `when`.
    #[inline(always)]
    pub fn add_action(&mut self, when: GameTime, action: Action) {
        self.0.push((when, action));
    }

    /// The most recently started action, if any.
    #[inline(always)]
    pub fn last_action(&self) -> Option<&Action> {
        self.0.last().map(|(_, action)| action)
    }

    /// All actions started within `[from, to]`.
    pub fn actions_in_timespan(
        &self,
        from: GameTime,
        to: GameTime,
    ) -> impl Iterator<Item = &Action> + '_ {
        self.0
            .iter()
            .filter(move |(t, _)| t.get() >= from.get() - TIME_EPSILON && t.get() <= to.get() + TIME_EPSILON)
            .map(|(_, action)| action)
    }

    /// `true` if a two-square pawn push recorded here may still be answered en passant at `when`.
    ///
    /// A push takes one unit of time, and the window to capture it lasts one further unit,
    /// so the push must have started no earlier than `when - 2` and no later than `when - 1`.
    ///
    /// # Example
    /// ```
    /// # use tempo::*;
    /// let mut history = ActionHistory::new();
    /// let push = Action::movement(Color::Black, PieceKind::Pawn, Square::B7, Square::B5);
    /// history.add_action(GameTime::new(0.5), push);
    ///
    /// assert!(!history.has_just_double_moved(GameTime::new(1.0)));
    /// assert!(history.has_just_double_moved(GameTime::new(2.0)));
    /// assert!(!history.has_just_double_moved(GameTime::new(3.0)));
    /// ```
    pub fn has_just_double_moved(&self, when: GameTime) -> bool {
        let start_earliest = when - TimeDelta::ONE_MOVE - TimeDelta::ONE_MOVE;
        let start_latest = when - TimeDelta::ONE_MOVE;
        self.actions_in_timespan(start_earliest, start_latest)
            .any(Action::is_double_move)
    }

    /// Combines several histories into one board-wide history, sorted by time.
    ///
    /// Entries with equal times keep the order of `histories`.
    pub fn merge<'a>(histories: impl IntoIterator<Item = &'a ActionHistory>) -> Self {
        let mut timed_actions = histories
            .into_iter()
            .flat_map(|history| history.0.iter().copied())
            .collect::<Vec<_>>();
        timed_actions.sort_by(|lhs, rhs| lhs.0.get().total_cmp(&rhs.0.get()));
        Self(timed_actions)
    }

    /// Renders this history as a replay log, one line per entry.
    pub fn to_notation(&self) -> String {
        self.to_string()
    }
}

impl Deref for ActionHistory {
    type Target = [(GameTime, Action)];
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for ActionHistory {
    /// Each entry is written as `"<time>: <action>"` on its own line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (when, action) in &self.0 {
            writeln!(f, "{when}: {action}")?;
        }
        Ok(())
    }
}
