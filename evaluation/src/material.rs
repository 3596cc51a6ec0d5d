use chess::{Board, Color, Piece, ALL_PIECES};

use crate::pst::{PST_EG, PST_MG, PST_OP};
use crate::tapered::Tapered;
use crate::values::{piece_index, VALUE_EG, VALUE_MG, VALUE_OP};

const BISHOP_PAIR: Tapered = Tapered::new(30, 30, 35);

/// Material and piece-square contributions for one side. White looks the
/// tables up by square index directly; black mirrors by rank.
pub(crate) fn evaluate(board: &Board, color: Color) -> Tapered {
    let ours = *board.color_combined(color);
    let mut score = Tapered::default();

    for piece in ALL_PIECES {
        let idx = piece_index(piece);
        for sq in *board.pieces(piece) & ours {
            let pst_sq = match color {
                Color::White => sq.to_index(),
                Color::Black => sq.to_index() ^ 56,
            };
            score += Tapered::new(
                i32::from(VALUE_OP[idx] + PST_OP[idx][pst_sq]),
                i32::from(VALUE_MG[idx] + PST_MG[idx][pst_sq]),
                i32::from(VALUE_EG[idx] + PST_EG[idx][pst_sq]),
            );
        }
    }

    if (*board.pieces(Piece::Bishop) & ours).popcnt() >= 2 {
        score += BISHOP_PAIR;
    }

    score
}
