/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tempo::*;

fn game(position: StartingPosition) -> Game {
    Game::new(SimulationConfig::default().with_starting_position(position))
}

fn squares(game: &Game) -> Vec<Square> {
    let mut squares = game.board().get_occupied_squares();
    squares.sort_by_key(Square::index);
    squares
}

#[test]
fn test_squares_stay_unique_under_busy_play() {
    for position in StartingPosition::all() {
        let mut game = game(position);

        for _ in 0..12 {
            if game.is_over() {
                break;
            }
            for action in game.collect_all_actions() {
                // Later orders for the same piece replace earlier ones
                let _ = game.do_action(action);
            }
            game.tick(TimeDelta::new(0.25));
            assert!(
                game.board().has_unique_squares(),
                "Two pieces share a square in {position}:\n{game}"
            );
        }
    }
}

#[test]
fn test_tick_size_does_not_change_the_outcome() {
    let mut coarse = game(StartingPosition::Standard);
    let mut fine = game(StartingPosition::Standard);
    for game in [&mut coarse, &mut fine] {
        game.order(Square::G1, Square::F3).unwrap();
        game.order(Square::E7, Square::E5).unwrap();
    }

    coarse.tick(TimeDelta::new(2.0));
    for _ in 0..8 {
        fine.tick(TimeDelta::MAX_TICK);
    }

    assert_eq!(coarse, fine);
    assert_eq!(coarse.time(), GameTime::new(2.0));
}

#[test]
fn test_small_ticks_reach_the_same_squares() {
    let mut coarse = game(StartingPosition::Standard);
    let mut fine = game(StartingPosition::Standard);
    for game in [&mut coarse, &mut fine] {
        game.order(Square::B1, Square::C3).unwrap();
        game.order(Square::D7, Square::D5).unwrap();
    }

    coarse.tick(TimeDelta::new(1.0));
    fine.tick_until_idle().unwrap();

    assert_eq!(squares(&coarse), squares(&fine));
}

#[test]
fn test_en_passant_window() {
    let mut game = game(StartingPosition::BeforeEnPassant);
    game.order(Square::B7, Square::B5).unwrap();
    game.tick(TimeDelta::ONE_MOVE);
    assert!(game.board().is_piece_at(Square::B5));

    game.order(Square::A5, Square::B6).unwrap();
    game.tick(TimeDelta::ONE_MOVE);

    let pawn = game.board().get_piece_at(Square::B6).unwrap();
    assert_eq!(pawn.color(), Color::White);
    assert_eq!(pawn.kill_count(), 1);
    assert!(!game.board().is_piece_at(Square::B5));
}

#[test]
fn test_en_passant_window_closes() {
    let mut game = game(StartingPosition::BeforeEnPassant);
    game.order(Square::B7, Square::B5).unwrap();
    game.tick(TimeDelta::new(2.5));

    assert!(matches!(
        game.order(Square::A5, Square::B6),
        Err(ActionRejected::IllegalEnPassant(_))
    ));
    assert!(game.board().get_piece_at(Square::A5).unwrap().is_idle());
}

#[test]
fn test_single_step_cannot_be_taken_en_passant() {
    let mut game = game(StartingPosition::BeforeEnPassant);
    game.order(Square::B7, Square::B6).unwrap();
    game.tick(TimeDelta::ONE_MOVE);

    assert!(game
        .collect_actions_at(Square::A5)
        .iter()
        .all(|action| action.kind() != ActionKind::AttackEnPassant));
}

#[test]
fn test_collision_sends_the_later_piece_back() {
    let mut game = game(StartingPosition::Standard);
    game.order(Square::G1, Square::F3).unwrap();
    game.order(Square::F2, Square::F3).unwrap();
    game.clear_messages();

    game.tick_until_idle().unwrap();

    let knight = game.board().get_piece_at(Square::F3).unwrap();
    assert_eq!(knight.kind(), PieceKind::Knight);
    let pawn = game.board().get_piece_at(Square::F2).unwrap();
    assert_eq!(pawn.kind(), PieceKind::Pawn);
    assert!(pawn.messages().contains(&Message::Cannot));
    assert!(!game.board().is_piece_at(Square::G1));
}

#[test]
fn test_bounced_piece_spends_a_full_move() {
    let mut game = game(StartingPosition::Standard);
    game.order(Square::G1, Square::F3).unwrap();
    game.order(Square::F2, Square::F3).unwrap();

    for _ in 0..3 {
        game.tick(TimeDelta::MAX_TICK);
        assert!(!game.board().get_piece_at(Square::F2).unwrap().is_idle());
    }
    game.tick(TimeDelta::MAX_TICK);

    let pawn = game.board().get_piece_at(Square::F2).unwrap();
    assert!(pawn.is_idle());
    assert!(pawn.messages().contains(&Message::Cannot));
    assert!(game.board().is_idle());
    assert_eq!(game.time(), GameTime::new(1.0));
}

#[test]
fn test_every_kind_moves_one_square_in_one_unit() {
    let orders = [
        (StartingPosition::ReadyToCastle, Square::E1, Square::E2),
        (StartingPosition::Standard, Square::G1, Square::F3),
        (StartingPosition::Standard, Square::E2, Square::E3),
        (StartingPosition::ReadyToCastle, Square::H1, Square::G1),
    ];
    for (position, from, to) in orders {
        let mut game = game(position);
        game.order(from, to).unwrap();

        game.tick(TimeDelta::new(0.75));
        assert!(!game.board().is_idle(), "{from}{to} finished early");
        game.tick(TimeDelta::new(0.25));
        assert!(game.board().is_idle(), "{from}{to} is still going");
        assert!(game.board().is_piece_at(to));
        assert!(!game.board().is_piece_at(from));
    }
}

#[test]
fn test_illegal_attack_changes_nothing() {
    let mut game = game(StartingPosition::Standard);
    let before = game.board().clone();

    let attack = Action::attack(Color::White, PieceKind::Pawn, Square::E2, Square::E3);
    assert_eq!(
        game.do_action(attack),
        Err(ActionRejected::IllegalAttack(attack))
    );

    let pawn = game.board().get_piece_at(Square::E2).unwrap();
    assert_eq!(pawn.messages(), &[Message::Cannot]);
    assert!(pawn.is_idle());

    game.clear_messages();
    assert_eq!(game.board(), &before);
}

#[test]
fn test_wrong_color_is_refused() {
    let mut game = game(StartingPosition::Standard);
    let action = Action::movement(Color::Black, PieceKind::Pawn, Square::E2, Square::E4);
    assert_eq!(
        game.do_action(action),
        Err(ActionRejected::WrongColor {
            expected: Color::Black,
            found: Color::White
        })
    );
}

#[test]
fn test_checkmate_fens() {
    // Fool's mate
    assert!(is_checkmate_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap());
    // Back rank
    assert!(is_checkmate_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap());
    // In check, but the king can run
    assert!(!is_checkmate_fen("R5k1/5pp1/8/8/8/8/8/6K1 b - - 0 1").unwrap());
    assert!(!is_checkmate_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap());
    assert!(is_checkmate_fen("not a fen").is_err());
}

#[test]
fn test_fen_round_trip() {
    for placement in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        "r3k2r/8/8/8/8/8/8/R3K2R",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
    ] {
        let board = Board::from_fen(placement).unwrap();
        assert_eq!(board.to_fen_placement(), placement);
    }

    let game = game(StartingPosition::Standard);
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_moved_king_loses_castling_rights() {
    let mut game = game(StartingPosition::ReadyToCastle);
    game.order(Square::E1, Square::E2).unwrap();
    game.tick_until_idle().unwrap();
    game.order(Square::E2, Square::E1).unwrap();
    game.tick_until_idle().unwrap();

    assert!(game.to_fen().contains(" kq "));
    assert!(game.castle(Color::White, true).is_err());
    assert!(game.castle(Color::Black, false).is_ok());
}

#[test]
fn test_notation() {
    let mut game = game(StartingPosition::Standard);
    game.order(Square::E2, Square::E4).unwrap();
    game.tick(TimeDelta::ONE_MOVE);
    game.order(Square::G8, Square::F6).unwrap();
    game.tick(TimeDelta::ONE_MOVE);

    assert_eq!(
        game.history().to_notation(),
        "0.00: white pawn move from e2 to e4\n1.00: black knight move from g8 to f6\n"
    );
}
