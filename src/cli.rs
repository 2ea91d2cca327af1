/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::{builder::PossibleValue, Parser, ValueEnum};

use crate::{Color, PieceKind, Race, Square, StartingPosition, TimeDelta};

/// Options given on the command line when launching the engine.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Position the first game starts from.
    #[arg(short, long, default_value = "standard")]
    pub position: StartingPosition,

    #[arg(long, default_value = "classic")]
    pub white_race: Race,

    #[arg(long, default_value = "classic")]
    pub black_race: Race,

    /// Damage dealt per unit of game time by an attacking piece.
    #[arg(short, long, default_value = "1.0")]
    pub damage: f64,

    /// Commands to run before reading from stdin, separated by `;`.
    #[arg(short, long, value_delimiter = ';')]
    pub commands: Vec<String>,
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND>")
)]
pub enum EngineCommand {
    /// Start a new game, optionally from a named starting position.
    New {
        position: Option<StartingPosition>,

        /// Race of White's pieces.
        #[arg(short, long)]
        white: Option<Race>,

        /// Race of Black's pieces.
        #[arg(short, long)]
        black: Option<Race>,
    },

    /// Start a new game from the placement field of a FEN string.
    ///
    /// Only the first field is read. Every piece counts as unmoved.
    Position { placement: String },

    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Generate and print a FEN string for the current position.
    Fen,

    /// Shows all legal actions on the board, or for a specific piece.
    Moves {
        square: Option<Square>,

        /// If set, actions will be sorted in alphabetical order.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Order the piece on `from` towards `to`.
    ///
    /// Attacks, en passant and castling are inferred from the squares.
    #[command(alias = "go")]
    Order { from: Square, to: Square },

    /// Order the king of `color` to castle, together with its rook.
    Castle {
        color: Color,

        /// Castle queenside instead of kingside.
        #[arg(short, long, default_value = "false")]
        queenside: bool,
    },

    /// Promote the pawn standing on `square`.
    Promote { square: Square, into: PieceKind },

    /// Advance the game clock.
    #[command(alias = "t")]
    Tick {
        #[arg(default_value = "0.1")]
        dt: TimeDelta,
    },

    /// Advance the game clock until every piece is idle.
    Idle,

    /// Print every action taken so far, ordered by time.
    History,

    /// Print and clear all messages pieces have emitted.
    Messages,

    /// Print the winner, if there is one.
    Winner,

    /// Print material, activity and protectedness for both players.
    #[command(alias = "stats")]
    Statistics,

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a line of input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

impl ValueEnum for Race {
    fn value_variants<'a>() -> &'a [Self] {
        const ALL: [Race; 4] = Race::all();
        &ALL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cmd: EngineCommand = "order e2 e4".parse().unwrap();
        assert!(matches!(
            cmd,
            EngineCommand::Order {
                from: Square::E2,
                to: Square::E4
            }
        ));

        let cmd: EngineCommand = "new before-en-passant --white zerg".parse().unwrap();
        assert!(matches!(
            cmd,
            EngineCommand::New {
                position: Some(StartingPosition::BeforeEnPassant),
                white: Some(Race::Zerg),
                black: None,
            }
        ));

        let cmd: EngineCommand = "t".parse().unwrap();
        assert!(matches!(cmd, EngineCommand::Tick { dt } if dt == TimeDelta::new(0.1)));

        assert!("castle black -q".parse::<EngineCommand>().is_ok());
        assert!("promote a8 q".parse::<EngineCommand>().is_ok());
        assert!(matches!(
            "stats".parse::<EngineCommand>(),
            Ok(EngineCommand::Statistics)
        ));
        assert!("fly e2 e4".parse::<EngineCommand>().is_err());
    }

    #[test]
    fn test_launch_options() {
        let cli = Cli::try_parse_from(["tempo", "-p", "queen_end_game", "-c", "d;fen"]).unwrap();
        assert_eq!(cli.position, StartingPosition::QueenEndGame);
        assert_eq!(cli.white_race, Race::Classic);
        assert_eq!(cli.commands, vec!["d", "fen"]);
    }
}
