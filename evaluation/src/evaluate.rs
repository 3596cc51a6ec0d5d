use chess::{Board, Color, Piece};

use crate::cache::EvalCache;
use crate::tapered::Tapered;
use crate::{king, knights, material, mobility, pawns, rooks};

const TEMPO: Tapered = Tapered::new(8, 8, 8);

/// Static evaluator with a shared score cache. Cloning the `Arc` it lives in
/// is how searcher threads share it; the cache takes care of its own locking.
pub struct Evaluator {
    cache: EvalCache,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            cache: EvalCache::new(),
        }
    }

    /// Centipawn score from the side-to-move perspective.
    pub fn evaluate(&self, board: &Board) -> i16 {
        let hash = board.get_hash();
        if let Some(score) = self.cache.get(hash) {
            return score;
        }
        let score = evaluate_uncached(board);
        self.cache.insert(hash, score);
        score
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase index in [0, 24] from the remaining non-pawn material of both
/// sides: knight and bishop count 1, rook 2, queen 4.
pub fn game_phase(board: &Board) -> i32 {
    let knights = board.pieces(Piece::Knight).popcnt();
    let bishops = board.pieces(Piece::Bishop).popcnt();
    let rooks = board.pieces(Piece::Rook).popcnt();
    let queens = board.pieces(Piece::Queen).popcnt();

    (knights + bishops + 2 * rooks + 4 * queens).min(24) as i32
}

fn evaluate_uncached(board: &Board) -> i16 {
    let mut total = Tapered::default();

    for color in [Color::White, Color::Black] {
        let mut side = Tapered::default();
        side += material::evaluate(board, color);
        side += pawns::evaluate(board, color);
        side += knights::evaluate(board, color);
        side += rooks::evaluate(board, color);
        side += king::evaluate(board, color);
        side += mobility::evaluate(board, color);

        match color {
            Color::White => total += side,
            Color::Black => total -= side,
        }
    }

    match board.side_to_move() {
        Color::White => total += TEMPO,
        Color::Black => total -= TEMPO,
    }

    let white_score = total.blend(game_phase(board));
    match board.side_to_move() {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn board(fen: &str) -> Board {
        Board::from_str(fen).unwrap()
    }

    /// Swaps colors and mirrors ranks, producing the position as seen by the
    /// other side. Castling rights and en passant are dropped, which none of
    /// the evaluation terms look at.
    fn mirror_fen(fen: &str) -> String {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().unwrap();
        let side = fields.next().unwrap();

        let mirrored_placement = placement
            .split('/')
            .rev()
            .map(|rank| {
                rank.chars()
                    .map(|c| {
                        if c.is_ascii_alphabetic() {
                            if c.is_ascii_uppercase() {
                                c.to_ascii_lowercase()
                            } else {
                                c.to_ascii_uppercase()
                            }
                        } else {
                            c
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/");

        let mirrored_side = if side == "w" { "b" } else { "w" };
        format!("{} {} - - 0 1", mirrored_placement, mirrored_side)
    }

    const FENS: &[&str] = &[
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w - - 4 4",
        "8/2p2k2/3p4/1P5r/1R3p2/8/4PKP1/8 w - - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
        "6k1/5ppp/8/8/8/8/8/R6K w - - 0 1",
        "4k3/8/8/3q4/8/8/3P4/4K3 b - - 0 1",
    ];

    #[test]
    fn evaluation_is_symmetric_under_mirroring() {
        let evaluator = Evaluator::new();
        for fen in FENS {
            let original = evaluator.evaluate(&board(fen));
            let mirrored = evaluator.evaluate(&board(&mirror_fen(fen)));
            assert_eq!(original, mirrored, "asymmetric evaluation for {}", fen);
        }
    }

    #[test]
    fn score_follows_the_side_to_move() {
        let evaluator = Evaluator::new();
        // White is a queen up; the same position must flip sign with the
        // side to move.
        let white_to_move = board("4k3/8/8/8/8/8/8/QQQQK3 w - - 0 1");
        let black_to_move = board("4k3/8/8/8/8/8/8/QQQQK3 b - - 0 1");
        assert!(evaluator.evaluate(&white_to_move) > 0);
        assert!(evaluator.evaluate(&black_to_move) < 0);
    }

    #[test]
    fn starting_position_is_tempo_for_the_mover() {
        let evaluator = Evaluator::new();
        let score = evaluator.evaluate(&Board::default());
        // Every term cancels by symmetry except the tempo bonus.
        assert_eq!(score, 8);
    }

    #[test]
    fn cached_and_uncached_scores_agree() {
        let evaluator = Evaluator::new();
        for fen in FENS {
            let position = board(fen);
            let first = evaluator.evaluate(&position);
            let second = evaluator.evaluate(&position);
            assert_eq!(first, second);
            assert_eq!(first, evaluate_uncached(&position));
        }
    }

    #[test]
    fn full_phase_at_the_start_and_zero_when_bare() {
        assert_eq!(game_phase(&Board::default()), 24);
        assert_eq!(game_phase(&board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")), 0);
    }
}
