/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, Race, StartingPosition, TimeDelta};

/// Knobs that shape a single match.
///
/// Built once, handed to [`crate::Game::new`], and never mutated by the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Damage an attacker deals over one unit of game time.
    ///
    /// With the default of `1.0`, an attack on a classic piece takes exactly one move.
    pub damage_per_chess_move: f64,

    /// How close, in squares, a point must be to a piece's center to count as touching it.
    pub click_distance: f64,

    pub starting_position: StartingPosition,

    pub white_race: Race,

    pub black_race: Race,

    /// Largest step a single internal tick may take. Always in `(0, MAX_TICK]`.
    max_tick: TimeDelta,
}

impl SimulationConfig {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damage_per_chess_move(mut self, damage: f64) -> Self {
        self.damage_per_chess_move = damage;
        self
    }

    pub fn with_click_distance(mut self, distance: f64) -> Self {
        self.click_distance = distance;
        self
    }

    pub fn with_starting_position(mut self, starting_position: StartingPosition) -> Self {
        self.starting_position = starting_position;
        self
    }

    pub fn with_race(mut self, color: Color, race: Race) -> Self {
        match color {
            Color::White => self.white_race = race,
            Color::Black => self.black_race = race,
        }
        self
    }

    /// Steps larger than [`TimeDelta::MAX_TICK`], or ones that are not positive, fall back to it.
    pub fn with_max_tick(mut self, max_tick: TimeDelta) -> Self {
        self.max_tick = if max_tick.get() > 0.0 && max_tick <= TimeDelta::MAX_TICK {
            max_tick
        } else {
            TimeDelta::MAX_TICK
        };
        self
    }

    #[inline(always)]
    pub const fn max_tick(&self) -> TimeDelta {
        self.max_tick
    }

    /// The race playing `color`.
    #[inline(always)]
    pub const fn race(&self, color: Color) -> Race {
        match color {
            Color::White => self.white_race,
            Color::Black => self.black_race,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            damage_per_chess_move: 1.0,
            click_distance: 0.5,
            starting_position: StartingPosition::default(),
            white_race: Race::default(),
            black_race: Race::default(),
            max_tick: TimeDelta::MAX_TICK,
        }
    }
}
