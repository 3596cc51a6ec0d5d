use chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves,
    BitBoard, Board, Color, Piece,
};

use crate::tapered::Tapered;

const MOBILITY: Tapered = Tapered::new(6, 4, 2);
const CENTER: Tapered = Tapered::new(6, 4, 2);

/// d4, e4, d5 and e5.
const CENTER_SQUARES: BitBoard = BitBoard(0x0000_0018_1800_0000);

/// Mobility (pseudo-legal destinations of the minor and major pieces) and
/// attacks on the four center squares, which every piece kind contributes to.
pub(crate) fn evaluate(board: &Board, color: Color) -> Tapered {
    let occupied = *board.combined();
    let ours = *board.color_combined(color);

    let mut reachable = 0i32;
    let mut central = 0i32;

    for sq in *board.pieces(Piece::Knight) & ours {
        let attacks = get_knight_moves(sq);
        reachable += (attacks & !ours).popcnt() as i32;
        central += (attacks & CENTER_SQUARES).popcnt() as i32;
    }
    for sq in *board.pieces(Piece::Bishop) & ours {
        let attacks = get_bishop_moves(sq, occupied);
        reachable += (attacks & !ours).popcnt() as i32;
        central += (attacks & CENTER_SQUARES).popcnt() as i32;
    }
    for sq in *board.pieces(Piece::Rook) & ours {
        let attacks = get_rook_moves(sq, occupied);
        reachable += (attacks & !ours).popcnt() as i32;
        central += (attacks & CENTER_SQUARES).popcnt() as i32;
    }
    for sq in *board.pieces(Piece::Queen) & ours {
        let attacks = get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied);
        reachable += (attacks & !ours).popcnt() as i32;
        central += (attacks & CENTER_SQUARES).popcnt() as i32;
    }

    // Pawns and the king count towards center control only.
    for sq in *board.pieces(Piece::Pawn) & ours {
        central += get_pawn_attacks(sq, color, CENTER_SQUARES).popcnt() as i32;
    }
    central += (get_king_moves(board.king_square(color)) & CENTER_SQUARES).popcnt() as i32;

    MOBILITY * reachable + CENTER * central
}
