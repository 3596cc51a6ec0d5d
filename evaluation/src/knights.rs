use chess::{Board, Color, Piece};

use crate::tapered::Tapered;

const RIM: Tapered = Tapered::new(-20, -15, -10);

/// "A knight on the rim is dim": penalize knights on the board edge.
pub(crate) fn evaluate(board: &Board, color: Color) -> Tapered {
    let mut score = Tapered::default();
    for sq in *board.pieces(Piece::Knight) & *board.color_combined(color) {
        let file = sq.get_file().to_index();
        let rank = sq.get_rank().to_index();
        if file == 0 || file == 7 || rank == 0 || rank == 7 {
            score += RIM;
        }
    }
    score
}
