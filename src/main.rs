/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::Parser;
use tempo::{Cli, Color, Engine, EngineCommand, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SimulationConfig::new()
        .with_starting_position(cli.position)
        .with_race(Color::White, cli.white_race)
        .with_race(Color::Black, cli.black_race)
        .with_damage_per_chess_move(cli.damage);

    let mut engine = Engine::new(config);

    for input in &cli.commands {
        match input.parse::<EngineCommand>() {
            Ok(cmd) => {
                if let Err(e) = engine.send_command(cmd) {
                    tracing::error!("{e:#}");
                }
            }
            Err(e) => eprintln!("ERROR on input {input:?}:\n{e}"),
        }
    }

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
    }
}
