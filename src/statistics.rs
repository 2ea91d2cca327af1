/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Board, Color, Piece, PieceKind};

/// One of the numbers [`GameStatistics`] keeps for each player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatistic {
    /// Remaining material, relative to a full set.
    Value,

    /// Share of pieces that have something queued.
    Activity,

    /// Share of pieces defended by a friendly piece.
    Protectedness,
}

impl GameStatistic {
    pub const COUNT: usize = 3;

    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Value, Self::Activity, Self::Protectedness]
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Activity => "activity",
            Self::Protectedness => "protectedness",
        }
    }
}

impl fmt::Display for GameStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A snapshot of how both players are doing, as fractions.
///
/// # Example
/// ```
/// # use tempo::*;
/// let stats = Game::default().statistics();
/// assert_eq!(stats.get(GameStatistic::Value, Color::White), 1.0);
/// assert_eq!(stats.get(GameStatistic::Activity, Color::Black), 0.0);
/// assert_eq!(stats.calc_relative(GameStatistic::Value), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameStatistics([[f64; Color::COUNT]; GameStatistic::COUNT]);

impl GameStatistics {
    /// Measures every statistic on `board`.
    pub fn new(board: &Board) -> Self {
        let mut values = [[0.0; Color::COUNT]; GameStatistic::COUNT];
        for color in Color::all() {
            values[GameStatistic::Value.index()][color] = fraction_value(board, color);
            values[GameStatistic::Activity.index()][color] = fraction_active(board, color);
            values[GameStatistic::Protectedness.index()][color] = fraction_protected(board, color);
        }
        Self(values)
    }

    #[inline(always)]
    pub fn get(&self, statistic: GameStatistic, color: Color) -> f64 {
        self.0[statistic.index()][color]
    }

    /// White's share of `statistic`, in `[0, 1]`.
    ///
    /// An even split is reported when neither player scores anything.
    pub fn calc_relative(&self, statistic: GameStatistic) -> f64 {
        let white = self.get(statistic, Color::White);
        let black = self.get(statistic, Color::Black);
        if white + black == 0.0 {
            0.5
        } else {
            white / (white + black)
        }
    }
}

impl fmt::Display for GameStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statistic in GameStatistic::all() {
            writeln!(
                f,
                "{statistic}: white {:.2}, black {:.2}, white share {:.2}",
                self.get(statistic, Color::White),
                self.get(statistic, Color::Black),
                self.calc_relative(statistic)
            )?;
        }
        Ok(())
    }
}

/// Material value of a full set of pieces.
fn max_pieces_value() -> i32 {
    use PieceKind::*;
    8 * Pawn.value() + 2 * (Knight.value() + Bishop.value() + Rook.value()) + Queen.value()
}

/// Material of `color` relative to a full set. Promotions can push this above `1.0`.
pub fn fraction_value(board: &Board, color: Color) -> f64 {
    board.get_total_pieces_value(color) as f64 / max_pieces_value() as f64
}

/// Share of the pieces of `color` that have an action queued, or `0.0` if there are none.
pub fn fraction_active(board: &Board, color: Color) -> f64 {
    fraction_of(board, color, |piece| !piece.is_idle())
}

/// Share of the pieces of `color` that a friendly piece defends, or `0.0` if there are none.
pub fn fraction_protected(board: &Board, color: Color) -> f64 {
    fraction_of(board, color, |piece| {
        board.is_square_protected(piece.square(), color)
    })
}

fn fraction_of(board: &Board, color: Color, predicate: impl Fn(&Piece) -> bool) -> f64 {
    let (total, matching) = board
        .pieces()
        .iter()
        .filter(|piece| piece.color() == color)
        .fold((0, 0), |(total, matching), piece| {
            (total + 1, matching + usize::from(predicate(piece)))
        });

    if total == 0 {
        0.0
    } else {
        matching as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Game, SimulationConfig, Square, StartingPosition};

    #[test]
    fn test_standard_position() {
        let board = Game::default().board().clone();
        assert_eq!(fraction_value(&board, Color::White), 1.0);
        assert_eq!(fraction_active(&board, Color::White), 0.0);

        // Only the two rooks stand undefended
        let protected = fraction_protected(&board, Color::White);
        assert_eq!(protected, 14.0 / 16.0);
        assert_eq!(fraction_protected(&board, Color::Black), protected);
    }

    #[test]
    fn test_activity_follows_orders() {
        let mut game = Game::default();
        game.order(Square::E2, Square::E4).unwrap();
        game.order(Square::G1, Square::F3).unwrap();

        let stats = game.statistics();
        assert_eq!(stats.get(GameStatistic::Activity, Color::White), 2.0 / 16.0);
        assert_eq!(stats.get(GameStatistic::Activity, Color::Black), 0.0);
        assert_eq!(stats.calc_relative(GameStatistic::Activity), 1.0);
        assert_eq!(stats.calc_relative(GameStatistic::Protectedness), 0.5);
    }

    #[test]
    fn test_relative_value_after_a_capture() {
        let config = SimulationConfig::default().with_starting_position(StartingPosition::QueenEndGame);
        let mut game = Game::new(config);
        let before = game.statistics();
        assert_eq!(before.calc_relative(GameStatistic::Value), 0.5);

        game.order(Square::D1, Square::D8).unwrap();
        game.tick_until_idle().unwrap();
        let after = game.statistics();
        assert_eq!(after.get(GameStatistic::Value, Color::Black), 0.0);
        assert_eq!(after.calc_relative(GameStatistic::Value), 1.0);
    }

    #[test]
    fn test_even_split_when_nobody_scores() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        let stats = GameStatistics::new(&board);
        assert_eq!(stats.get(GameStatistic::Value, Color::White), 0.0);
        assert_eq!(stats.calc_relative(GameStatistic::Value), 0.5);
        assert_eq!(stats.calc_relative(GameStatistic::Activity), 0.5);
    }
}
