/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

use crate::{Action, EngineCommand, Game, SimulationConfig};

/// An interactive session around a single [`Game`].
///
/// Commands arrive over a channel, either from [`Engine::send_command`] or from a thread reading `stdin`,
/// and are executed one at a time in the order they were received.
#[derive(Debug)]
pub struct Engine {
    /// The game currently being played.
    ///
    /// Replaced whenever a new game is started.
    game: Game,

    /// Settings every new game starts with, unless a command overrides them.
    config: SimulationConfig,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new(config: SimulationConfig) -> Self {
        let (sender, receiver) = channel();

        Self {
            game: Game::new(config),
            config,
            sender,
            receiver,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    #[inline(always)]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) -> Result<()> {
        self.sender
            .send(command)
            .context("Engine is no longer receiving commands")
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                info!("Input handler thread stopping: {err}");
            }
        });

        while let Ok(cmd) = self.receiver.recv() {
            if matches!(cmd, EngineCommand::Exit) {
                break;
            }

            // Keep running, even on error
            if let Err(e) = self.execute(cmd) {
                error!("{e:#}");
            }
        }

        Ok(())
    }

    /// Executes a single command against the current game, printing its output to `stdout`.
    ///
    /// [`EngineCommand::Exit`] does nothing here; it only stops [`Engine::run`].
    pub fn execute(&mut self, cmd: EngineCommand) -> Result<()> {
        match cmd {
            EngineCommand::New {
                position,
                white,
                black,
            } => {
                let mut config = self.config;
                if let Some(position) = position {
                    config.starting_position = position;
                }
                if let Some(race) = white {
                    config.white_race = race;
                }
                if let Some(race) = black {
                    config.black_race = race;
                }
                self.game = Game::new(config);
            }

            EngineCommand::Position { placement } => {
                self.game = Game::from_fen(&placement, self.config)?;
            }

            EngineCommand::Display => println!("{}", self.game),

            EngineCommand::Fen => println!("{}", self.game.to_fen()),

            EngineCommand::Moves { square, sort } => {
                let mut actions = if let Some(square) = square {
                    self.game.collect_actions_at(square)
                } else {
                    self.game.collect_all_actions()
                };
                if sort {
                    actions.sort_by_cached_key(Action::to_string);
                }
                println!("{}", format_actions(&actions));
            }

            EngineCommand::Order { from, to } => self.game.order(from, to)?,

            EngineCommand::Castle { color, queenside } => self.game.castle(color, !queenside)?,

            EngineCommand::Promote { square, into } => self.game.promote(square, into)?,

            EngineCommand::Tick { dt } => {
                self.game.tick(dt);
                self.report_outcome();
            }

            EngineCommand::Idle => {
                let ticks = self.game.tick_until_idle()?;
                println!("Idle after {ticks} ticks at {}", self.game.time());
                self.report_outcome();
            }

            EngineCommand::History => print!("{}", self.game.history()),

            EngineCommand::Messages => {
                for (id, message) in self.game.collect_messages() {
                    println!("{id}: {message}");
                }
                self.game.clear_messages();
            }

            EngineCommand::Winner => match self.game.winner() {
                Some(color) => println!("{color} wins"),
                None if self.game.is_draw() => println!("draw"),
                None => println!("(none)"),
            },

            EngineCommand::Statistics => print!("{}", self.game.statistics()),

            EngineCommand::Exit => {}
        }

        Ok(())
    }

    fn report_outcome(&self) {
        if let Some(outcome) = describe_outcome(&self.game) {
            println!("{outcome}");
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

/// A line announcing how `game` ended, if it has.
fn describe_outcome(game: &Game) -> Option<String> {
    if let Some(color) = game.winner() {
        Some(format!("Game over at {}: {color} wins", game.time()))
    } else if game.is_draw() {
        Some(format!("Game drawn at {}", game.time()))
    } else {
        None
    }
}

/// Joins `actions` by comma-space, or returns `"(none)"` if there are none.
fn format_actions(actions: &[Action]) -> String {
    if actions.is_empty() {
        return String::from("(none)");
    }

    actions
        .iter()
        .map(Action::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line from stdin")?;

        // For ctrl + d
        if 0 == bytes {
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Engine received input of 0 bytes and is quitting");
        }

        let buf = buffer.trim();
        if buf.is_empty() {
            continue;
        }

        match buf.parse::<EngineCommand>() {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // An invalid command is not fatal, so print the error and keep reading
            Err(err) => warn!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Square, StartingPosition};

    #[test]
    fn test_execute_order_and_idle() {
        let mut engine = Engine::default();
        engine.execute("order e2 e4".parse().unwrap()).unwrap();
        engine.execute(EngineCommand::Idle).unwrap();

        let pawn = engine.game().board().get_piece_at(Square::E4).unwrap();
        assert_eq!(pawn.color(), Color::White);
        assert!(engine.execute("order e2 e3".parse().unwrap()).is_err());
    }

    #[test]
    fn test_new_game_overrides() {
        let mut engine = Engine::default();
        engine.execute("new kings_only --black protoss".parse().unwrap()).unwrap();

        let game = engine.game();
        assert_eq!(game.config().starting_position, StartingPosition::KingsOnly);
        assert_eq!(game.board().len(), 2);
        assert!(game.is_draw());
        assert_eq!(describe_outcome(game).unwrap(), "Game drawn at 0.00");
    }

    #[test]
    fn test_outcome_of_a_won_game() {
        let mut engine = Engine::default();
        engine
            .execute("new before_scholars_mate".parse().unwrap())
            .unwrap();
        assert!(describe_outcome(engine.game()).is_none());

        engine.execute("order h5 f7".parse().unwrap()).unwrap();
        engine.execute(EngineCommand::Idle).unwrap();
        assert_eq!(
            describe_outcome(engine.game()).unwrap(),
            "Game over at 1.00: white wins"
        );
    }

    #[test]
    fn test_format_actions() {
        assert_eq!(format_actions(&[]), "(none)");
    }
}
