use chess::{BitBoard, Board, Color, File, Piece, Rank, Square, EMPTY};

use crate::tapered::Tapered;

const MISSING_SHIELD: Tapered = Tapered::new(-20, -15, -5);
const FAR_SHIELD: Tapered = Tapered::new(-10, -8, -3);

/// Pawn-shield quality on the three files around the king. A pawn directly
/// in front costs nothing, one pushed a square ahead of that costs a little,
/// a missing or off-board shield file costs the most.
pub(crate) fn evaluate(board: &Board, color: Color) -> Tapered {
    let king = board.king_square(color);
    let our_pawns = *board.pieces(Piece::Pawn) & *board.color_combined(color);

    let king_file = king.get_file().to_index() as i32;
    let king_rank = king.get_rank().to_index() as i32;
    let forward: i32 = match color {
        Color::White => 1,
        Color::Black => -1,
    };

    let mut score = Tapered::default();

    for file in king_file - 1..=king_file + 1 {
        if !(0..8).contains(&file) {
            score += MISSING_SHIELD;
            continue;
        }
        if pawn_at(our_pawns, king_rank + forward, file) {
            continue;
        }
        if pawn_at(our_pawns, king_rank + 2 * forward, file) {
            score += FAR_SHIELD;
        } else {
            score += MISSING_SHIELD;
        }
    }

    score
}

fn pawn_at(pawns: BitBoard, rank: i32, file: i32) -> bool {
    if !(0..8).contains(&rank) {
        return false;
    }
    let sq = Square::make_square(
        Rank::from_index(rank as usize),
        File::from_index(file as usize),
    );
    pawns & BitBoard::from_square(sq) != EMPTY
}
