/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tempo::*;

/// Plays `orders` one after another, letting the board settle after each.
fn play(game: &mut Game, orders: &[(Square, Square)]) {
    for &(from, to) in orders {
        game.order(from, to)
            .unwrap_or_else(|e| panic!("Order {from}{to} failed: {e}\n{game}"));
        game.tick_until_idle().unwrap();
    }
}

#[test]
fn test_scholars_mate() {
    let mut game = Game::default();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::D1, Square::H5),
            (Square::B8, Square::C6),
            (Square::F1, Square::C4),
            (Square::G8, Square::F6),
            (Square::H5, Square::F7),
        ],
    );

    let queen = game.board().get_piece_at(Square::F7).unwrap();
    assert_eq!(queen.kind(), PieceKind::Queen);
    assert_eq!(queen.color(), Color::White);
    assert_eq!(game.history().len(), 7);

    assert!(game.is_checkmate(Color::Black));
    assert_eq!(game.winner(), Some(Color::White));
    assert_eq!(game.order(Square::E8, Square::E7), Err(ActionRejected::GameOver));
}

#[test]
fn test_replaying_scholars_mate() {
    let mut game = Game::default();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::D1, Square::H5),
            (Square::B8, Square::C6),
            (Square::F1, Square::C4),
            (Square::G8, Square::F6),
            (Square::H5, Square::F7),
        ],
    );

    let mut replay = Replay::new(game.history(), Game::default());
    while !replay.is_done() {
        replay.do_move(TimeDelta::new(0.1));
    }
    assert_eq!(replay.n_replayed(), 7);
    replay.do_move(TimeDelta::new(2.0));

    let replayed = replay.game();
    assert!(replayed.board().is_idle());
    assert_eq!(
        replayed.board().to_fen_placement(),
        game.board().to_fen_placement()
    );
    assert_eq!(replayed.winner(), Some(Color::White));
    assert_eq!(replayed.history().to_notation(), game.history().to_notation());
}

#[test]
fn test_scholars_mate_from_its_starting_position() {
    let config = SimulationConfig::default().with_starting_position(StartingPosition::BeforeScholarsMate);
    let mut game = Game::new(config);
    assert!(game.winner().is_none());

    game.order(Square::H5, Square::F7).unwrap();
    game.tick(TimeDelta::new(0.75));
    assert!(game.winner().is_none());

    game.tick(TimeDelta::new(0.25));
    assert_eq!(game.winner(), Some(Color::White));
}

#[test]
fn test_simultaneous_play() {
    let mut game = Game::default();
    game.order(Square::E2, Square::E4).unwrap();
    game.order(Square::D7, Square::D5).unwrap();
    game.tick(TimeDelta::ONE_MOVE);

    // Both pawns may strike at each other at once; the first to be ticked wins
    game.order(Square::E4, Square::D5).unwrap();
    game.order(Square::D5, Square::E4).unwrap();
    game.tick_until_idle().unwrap();

    let survivor = game.board().get_piece_at(Square::D5).unwrap();
    assert_eq!(survivor.color(), Color::White);
    assert_eq!(survivor.kill_count(), 1);
    assert!(!game.board().is_piece_at(Square::E4));
    assert_eq!(game.board().len(), 31);
}

#[test]
fn test_castle_queenside() {
    let config = SimulationConfig::default().with_starting_position(StartingPosition::ReadyToCastle);
    let mut game = Game::new(config);
    game.order(Square::E8, Square::C8).unwrap();
    game.tick_until_idle().unwrap();

    let board = game.board();
    assert_eq!(board.get_piece_at(Square::C8).unwrap().kind(), PieceKind::King);
    assert_eq!(board.get_piece_at(Square::D8).unwrap().kind(), PieceKind::Rook);
    assert!(!board.is_piece_at(Square::A8));
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_king_keeps_away_from_attacked_squares() {
    let config =
        SimulationConfig::default().with_starting_position(StartingPosition::BishopAndKnightEndGame);
    let game = Game::new(config);
    assert!(game.winner().is_none());

    let targets = game
        .collect_actions_at(Square::D2)
        .iter()
        .map(Action::to)
        .collect::<Vec<_>>();
    assert!(targets.contains(&Square::C2));
    assert!(targets.contains(&Square::C3));
    // Covered by the knight and the bishop
    for covered in [Square::E3, Square::E2, Square::D1] {
        assert!(!targets.contains(&covered), "King may step onto {covered}");
    }
}

#[test]
fn test_race_slows_captures() {
    let config = SimulationConfig::default()
        .with_starting_position(StartingPosition::QueenEndGame)
        .with_race(Color::Black, Race::Protoss);
    let mut game = Game::new(config);
    game.order(Square::D1, Square::D8).unwrap();

    game.tick(TimeDelta::ONE_MOVE);
    assert_eq!(
        game.board().get_piece_at(Square::D8).unwrap().color(),
        Color::White
    );

    let config = config.with_damage_per_chess_move(0.5);
    let mut game = Game::new(config);
    game.order(Square::D1, Square::D8).unwrap();
    game.tick(TimeDelta::ONE_MOVE);
    assert_eq!(
        game.board().get_piece_at(Square::D8).unwrap().color(),
        Color::Black
    );
}

#[test]
fn test_capturing_down_to_two_pieces_is_a_draw() {
    let config = SimulationConfig::default().with_starting_position(StartingPosition::QueenEndGame);
    let mut game = Game::new(config);
    game.order(Square::D1, Square::D8).unwrap();
    game.tick_until_idle().unwrap();
    assert!(!game.is_draw());

    game.order(Square::E8, Square::D8).unwrap();
    game.tick_until_idle().unwrap();
    assert!(game.is_draw());
    assert!(game.is_over());
    assert!(game.winner().is_none());
}

#[test]
fn test_controller_plays_a_game() {
    let mut game = Game::default();
    let mut controller = Controller::new();
    let (white, black) = (Color::White, Color::Black);

    let results = controller.apply_and_tick(
        &mut game,
        [
            PlayerCommand::MoveCursor { color: white, to: Square::G1 },
            PlayerCommand::Select { color: white },
            PlayerCommand::MoveCursor { color: black, to: Square::B8 },
            PlayerCommand::Select { color: black },
        ],
        TimeDelta::new(0.1),
    );
    assert!(results.iter().all(Result::is_ok));

    let results = controller.apply_and_tick(
        &mut game,
        [
            PlayerCommand::MoveCursor { color: white, to: Square::F3 },
            PlayerCommand::DoAction { color: white, n: 0 },
            PlayerCommand::MoveCursor { color: black, to: Square::C6 },
            PlayerCommand::DoAction { color: black, n: 0 },
        ],
        TimeDelta::new(0.1),
    );
    assert!(results.iter().all(Result::is_ok));

    game.tick_until_idle().unwrap();
    assert_eq!(game.board().get_piece_at(Square::F3).unwrap().kind(), PieceKind::Knight);
    assert_eq!(game.board().get_piece_at(Square::C6).unwrap().kind(), PieceKind::Knight);
    assert!(controller.selected(white).is_none());
    assert!(controller.selected(black).is_none());
}

#[test]
fn test_every_starting_position_is_playable() {
    for position in StartingPosition::all() {
        let config = SimulationConfig::default().with_starting_position(position);
        let mut game = Game::new(config);
        assert!(game.board().has_unique_squares(), "{position}");
        assert!(game.board().has_king(Color::White), "{position}");
        assert!(game.board().has_king(Color::Black), "{position}");

        game.tick(TimeDelta::new(0.6));
        assert!((game.time().get() - 0.6).abs() < 1e-9);
        assert!(game
            .board()
            .pieces()
            .iter()
            .all(|piece| (piece.clock().get() - 0.6).abs() < 1e-9));
    }
}
