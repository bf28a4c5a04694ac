//! Whole games played through the session API.

use chess_core::{Coord, MoveFlag, PieceKind, Player};
use chess_engine::rules::{self, is_in_check};
use chess_engine::{Board, Game, GameEvent, MoveError};

fn sq(name: &str) -> Coord {
    name.parse().unwrap()
}

fn play_all(game: &mut Game, moves: &[&str]) {
    for m in moves {
        let (from, to) = m.split_at(2);
        if let Err(e) = game.play(sq(from), sq(to)) {
            panic!("{m} rejected: {e}");
        }
    }
}

fn game_from(placement: &str, turn: Player) -> Game {
    Game::from_board(Board::from_placement(placement).unwrap(), turn)
}

#[test]
fn fools_mate_notifications() {
    let mut game = Game::new();
    let (_, events) = game.subscribe_channel();
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert_eq!(game.winner(), Some(Player::Black));
    let seen: Vec<GameEvent> = events.try_iter().collect();
    assert_eq!(
        seen,
        vec![
            GameEvent::TurnChanged { player: Player::Black },
            GameEvent::TurnChanged { player: Player::White },
            GameEvent::TurnChanged { player: Player::Black },
            GameEvent::GameOver { winner: Player::Black },
            GameEvent::TurnChanged { player: Player::White },
        ]
    );
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(game.winner(), Some(Player::White));
    assert_eq!(game.checked_player(), Some(Player::Black));
    assert_eq!(game.play(sq("e8"), sq("f7")), Err(MoveError::GameOver));
}

#[test]
fn check_must_be_answered() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "f7f6", "d1h5"]);
    assert_eq!(game.checked_player(), Some(Player::Black));

    // The queen on h5 checks along h5-e8; g7-g6 blocks the diagonal.
    assert!(matches!(
        game.play(sq("a7"), sq("a6")),
        Err(MoveError::Illegal { .. })
    ));
    assert_eq!(game.current_turn(), Player::Black);
    play_all(&mut game, &["g7g6"]);
    assert_eq!(game.checked_player(), None);
}

#[test]
fn kingside_castle_through_the_session() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
    assert!(game.possible_moves(sq("e1")).contains(&sq("g1")));

    let outcome = game.play(sq("e1"), sq("g1")).unwrap();
    assert_eq!(outcome.mov.flag, MoveFlag::CastleKingside);
    assert_eq!(game.piece_at(sq("g1")).unwrap().kind, PieceKind::King);
    assert_eq!(game.piece_at(sq("f1")).unwrap().kind, PieceKind::Rook);
    assert!(game.piece_at(sq("h1")).is_none());
    assert_eq!(game.current_turn(), Player::Black);
}

#[test]
fn queenside_castle_places_rook_beside_king() {
    let mut game = game_from("4k3/8/8/8/8/8/8/R3K3", Player::White);
    let outcome = game.play(sq("e1"), sq("c1")).unwrap();
    assert_eq!(outcome.mov.flag, MoveFlag::CastleQueenside);
    assert_eq!(game.piece_at(sq("d1")).unwrap().kind, PieceKind::Rook);
    assert_eq!(game.piece_at(sq("c1")).unwrap().kind, PieceKind::King);
    assert!(game.piece_at(sq("a1")).is_none());
}

#[test]
fn castling_is_lost_once_the_king_moves() {
    let mut game = game_from("4k3/8/8/8/8/8/8/R3K2R", Player::White);
    play_all(&mut game, &["e1f1", "e8d8", "f1e1", "d8e8"]);
    assert!(!game.possible_moves(sq("e1")).contains(&sq("g1")));
    assert!(!game.try_move(sq("e1"), sq("g1")));
    assert!(!game.try_move(sq("e1"), sq("c1")));
}

#[test]
fn white_promotes_to_knight() {
    let mut game = game_from("4k3/P7/8/8/8/8/8/4K3", Player::White);
    play_all(&mut game, &["a7a8"]);
    assert_eq!(game.promoting_piece(), Some(sq("a8")));
    assert!(!game.promote(sq("a8"), PieceKind::Pawn));
    assert!(game.promote(sq("a8"), PieceKind::Knight));

    let knight = game.piece_at(sq("a8")).unwrap();
    assert_eq!(knight.kind, PieceKind::Knight);
    assert_eq!(knight.owner, Player::White);
    assert_eq!(knight.position, sq("a8"));
    assert!(knight.has_moved);
    assert_eq!(game.checked_player(), None);
    assert_eq!(game.current_turn(), Player::Black);
}

#[test]
fn black_promotes_with_check() {
    let mut game = game_from("4k3/8/8/8/8/8/p7/4K3", Player::Black);
    play_all(&mut game, &["a2a1"]);
    assert!(game.promote(sq("a1"), PieceKind::Queen));
    assert_eq!(game.checked_player(), Some(Player::White));
    assert_eq!(game.winner(), None);
    assert!(is_in_check(game.board(), Player::White));
}

#[test]
fn capture_onto_last_rank_promotes() {
    let mut game = game_from("1r2k3/P7/8/8/8/8/8/4K3", Player::White);
    let outcome = game.play(sq("a7"), sq("b8")).unwrap();
    assert_eq!(outcome.captured.map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(game.promoting_piece(), Some(sq("b8")));
    assert!(!game.is_running());
}

#[test]
fn restart_after_checkmate() {
    let mut game = Game::new();
    let (_, events) = game.subscribe_channel();
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    game.restart();
    events.try_iter().for_each(drop);

    assert_eq!(game.board(), &Board::new());
    play_all(&mut game, &["e2e4"]);
    assert_eq!(
        events.try_recv().unwrap(),
        GameEvent::TurnChanged { player: Player::Black }
    );
}

#[test]
fn no_captures_in_the_opening_position() {
    let mut board = Board::new();
    for player in Player::BOTH {
        let origins: Vec<Coord> = board.pieces_of(player).map(|p| p.position).collect();
        for from in origins {
            for to in rules::possible_moves(&mut board, from) {
                assert!(board.piece_at(to).is_none(), "{from}{to} captures");
            }
        }
    }
}

#[test]
fn moved_piece_keeps_its_coordinates_in_sync() {
    let mut game = Game::new();
    play_all(&mut game, &["b1c3", "g8f6", "c3d5"]);
    let knight = game.piece_at(sq("d5")).unwrap();
    assert_eq!(knight.position, sq("d5"));
    assert!(knight.has_moved);
    assert!(game.piece_at(sq("b1")).is_none());
    assert!(game.piece_at(sq("c3")).is_none());
}
