use chess::{get_file, get_rook_moves, Board, Color, Piece, EMPTY};

use crate::tapered::Tapered;

const OPEN_FILE: Tapered = Tapered::new(20, 15, 10);
const SEMI_OPEN_FILE: Tapered = Tapered::new(12, 10, 5);
const CONNECTED: Tapered = Tapered::new(12, 10, 10);

pub(crate) fn evaluate(board: &Board, color: Color) -> Tapered {
    let rooks = *board.pieces(Piece::Rook) & *board.color_combined(color);
    if rooks == EMPTY {
        return Tapered::default();
    }

    let our_pawns = *board.pieces(Piece::Pawn) & *board.color_combined(color);
    let their_pawns = *board.pieces(Piece::Pawn) & *board.color_combined(!color);

    let mut score = Tapered::default();

    for sq in rooks {
        let file_mask = get_file(sq.get_file());
        let own_clear = our_pawns & file_mask == EMPTY;
        let enemy_clear = their_pawns & file_mask == EMPTY;
        match (own_clear, enemy_clear) {
            (true, true) => score += OPEN_FILE,
            (true, false) => score += SEMI_OPEN_FILE,
            _ => {}
        }
    }

    // Connected rooks: one bonus if any pair defends each other through the
    // current occupancy.
    for sq in rooks {
        if get_rook_moves(sq, *board.combined()) & rooks != EMPTY {
            score += CONNECTED;
            break;
        }
    }

    score
}
