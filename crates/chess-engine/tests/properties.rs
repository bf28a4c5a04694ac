//! Invariants checked over random playouts from the opening position.

use chess_core::{Coord, PieceKind, Player};
use chess_engine::rules::{self, is_in_check};
use chess_engine::{Board, Game};
use proptest::prelude::*;

/// Every legal `(from, to)` pair for the player to move.
fn legal_moves(game: &mut Game) -> Vec<(Coord, Coord)> {
    let turn = game.current_turn();
    let origins: Vec<Coord> = game
        .board()
        .pieces_of(turn)
        .map(|p| p.position)
        .collect();
    let mut moves = Vec::new();
    for from in origins {
        for to in game.possible_moves(from) {
            moves.push((from, to));
        }
    }
    moves
}

fn assert_board_consistent(board: &Board) {
    for player in Player::BOTH {
        let king = board.king(player).expect("both kings stay on the board");
        let piece = board.piece_at(king).expect("tracked king square is occupied");
        assert_eq!(piece.kind, PieceKind::King);
        assert_eq!(piece.owner, player);
    }
    for at in Coord::all() {
        if let Some(piece) = board.piece_at(at) {
            assert_eq!(piece.position, at);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_playouts_respect_the_rules(choices in prop::collection::vec(any::<u32>(), 1..40)) {
        let mut game = Game::new();

        for choice in choices {
            if game.is_game_over() {
                break;
            }
            let moves = legal_moves(&mut game);
            if moves.is_empty() {
                break;
            }
            let mover = game.current_turn();
            for &(_, to) in &moves {
                let occupant = game.piece_at(to);
                prop_assert!(occupant.map_or(true, |p| p.owner != mover));
            }

            let (from, to) = moves[choice as usize % moves.len()];
            let outcome = game.play(from, to);
            prop_assert!(outcome.is_ok(), "listed move {}{} was refused", from, to);

            if let Some(at) = game.promoting_piece() {
                let kind = PieceKind::PROMOTIONS[choice as usize % 4];
                prop_assert!(game.promote(at, kind));
            }

            let mated = rules::is_checkmate(&mut game.board().clone(), mover.opponent());
            let expected_winner = if mated { Some(mover) } else { None };
            prop_assert_eq!(game.winner(), expected_winner);

            let board = game.board();
            assert_board_consistent(board);
            prop_assert!(!is_in_check(board, mover));
            let moved = board.piece_at(to).expect("destination is occupied");
            prop_assert_eq!(moved.owner, mover);
            prop_assert!(moved.has_moved);
        }
    }

    #[test]
    fn apply_then_revert_restores_the_board(
        setup in prop::collection::vec(any::<u32>(), 0..12),
        pick in any::<u32>(),
    ) {
        let mut game = Game::new();
        for choice in setup {
            let moves = legal_moves(&mut game);
            if moves.is_empty() || game.is_game_over() {
                break;
            }
            let (from, to) = moves[choice as usize % moves.len()];
            game.play(from, to).unwrap();
            if let Some(at) = game.promoting_piece() {
                game.promote(at, PieceKind::Queen);
            }
        }

        let moves = legal_moves(&mut game);
        prop_assume!(!moves.is_empty());
        let (from, to) = moves[pick as usize % moves.len()];

        let mut board = game.board().clone();
        let before = board.clone();
        let record = board.apply_move(from, to).unwrap();
        prop_assert!(board.piece_at(from).is_none());
        board.revert_move(record);
        prop_assert_eq!(board, before);
    }

    #[test]
    fn look_ahead_never_disturbs_the_board(choices in prop::collection::vec(any::<u32>(), 0..20)) {
        let mut game = Game::new();
        for choice in choices {
            let moves = legal_moves(&mut game);
            if moves.is_empty() || game.is_game_over() {
                break;
            }
            let (from, to) = moves[choice as usize % moves.len()];
            game.play(from, to).unwrap();
            if let Some(at) = game.promoting_piece() {
                game.promote(at, PieceKind::Rook);
            }
        }

        let mut board = game.board().clone();
        let before = board.clone();
        for player in Player::BOTH {
            let _ = rules::is_checkmate(&mut board, player);
        }
        for at in Coord::all() {
            let _ = rules::possible_moves(&mut board, at);
        }
        prop_assert_eq!(board, before);
    }
}
