//! Move-ordering heuristics: MVV-LVA capture scoring, the quiet-move
//! history table, and per-ply killer moves.

use std::cmp::Reverse;

use arrayvec::ArrayVec;
use chess::{Board, ChessMove, MoveGen, Piece};
use evaluation::values::{piece_index, EXCHANGE_VALUES};

/// Search ply ceiling; also bounds the killer table.
pub const MAX_PLY: usize = 128;

/// No legal position has more moves than this.
pub const MAX_MOVES: usize = 256;

const TT_MOVE_SCORE: i32 = 30_000_000;
const CAPTURE_SCORE: i32 = 20_000_000;
const KILLER_SCORE: i32 = 15_000_000;
const QUIET_SCORE: i32 = 10_000_000;

const HISTORY_MAX: i32 = 30_000;

/// Quiet-move success scores indexed by (from, to), clamped so repeated
/// bonuses cannot overflow the i16 cells.
pub struct HistoryTable {
    scores: Box<[[i16; 64]; 64]>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            scores: Box::new([[0; 64]; 64]),
        }
    }

    pub fn clear(&mut self) {
        for row in self.scores.iter_mut() {
            row.fill(0);
        }
    }

    #[inline]
    pub fn get(&self, mv: ChessMove) -> i32 {
        i32::from(self.scores[mv.get_source().to_index()][mv.get_dest().to_index()])
    }

    #[inline]
    pub fn add(&mut self, mv: ChessMove, bonus: i32) {
        let cell = &mut self.scores[mv.get_source().to_index()][mv.get_dest().to_index()];
        *cell = (i32::from(*cell) + bonus).clamp(-HISTORY_MAX, HISTORY_MAX) as i16;
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Bonus for a quiet move that raised alpha.
#[inline]
pub fn alpha_bonus(depth: i32) -> i32 {
    (100 + depth * depth).min(2_000)
}

/// Bonus for a quiet move that caused a beta cutoff.
#[inline]
pub fn cutoff_bonus(depth: i32) -> i32 {
    (200 + depth * depth).min(4_000)
}

/// Two quiet cutoff moves per ply. A new killer displaces the older slot;
/// duplicates are refused.
pub struct Killers {
    moves: [[Option<ChessMove>; 2]; MAX_PLY],
}

impl Killers {
    pub fn new() -> Self {
        Self {
            moves: [[None; 2]; MAX_PLY],
        }
    }

    pub fn clear(&mut self) {
        self.moves = [[None; 2]; MAX_PLY];
    }

    #[inline]
    pub fn push(&mut self, ply: usize, mv: ChessMove) {
        let slot = &mut self.moves[ply];
        if slot[0] == Some(mv) || slot[1] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    #[inline]
    pub fn contains(&self, ply: usize, mv: ChessMove) -> bool {
        let slot = &self.moves[ply];
        slot[0] == Some(mv) || slot[1] == Some(mv)
    }
}

impl Default for Killers {
    fn default() -> Self {
        Self::new()
    }
}

/// True for ordinary captures and en passant (a pawn moving diagonally onto
/// an empty square).
#[inline]
pub fn is_capture(board: &Board, mv: ChessMove) -> bool {
    if board.piece_on(mv.get_dest()).is_some() {
        return true;
    }
    board.piece_on(mv.get_source()) == Some(Piece::Pawn)
        && mv.get_source().get_file() != mv.get_dest().get_file()
}

/// Quiet means neither capture nor promotion; only quiets feed the history
/// table and killer slots.
#[inline]
pub fn is_quiet(board: &Board, mv: ChessMove) -> bool {
    !is_capture(board, mv) && mv.get_promotion().is_none()
}

/// Most-valuable-victim / least-valuable-attacker. The en-passant victim is
/// the pawn behind the target square, so a missing piece on the destination
/// reads as a pawn.
#[inline]
pub fn mvv_lva(board: &Board, mv: ChessMove) -> i32 {
    let victim = board.piece_on(mv.get_dest()).unwrap_or(Piece::Pawn);
    let attacker = board.piece_on(mv.get_source()).unwrap_or(Piece::Pawn);
    i32::from(EXCHANGE_VALUES[piece_index(victim)]) * 16
        - i32::from(EXCHANGE_VALUES[piece_index(attacker)])
}

/// Generates the legal moves and sorts them best-first: the TT move, then
/// captures by MVV-LVA, then killers, then quiets by history. An illegal TT
/// move simply never matches a generated move.
pub fn ordered_moves(
    board: &Board,
    tt_move: Option<ChessMove>,
    killers: &Killers,
    history: &HistoryTable,
    ply: usize,
) -> ArrayVec<ChessMove, MAX_MOVES> {
    let mut scored: ArrayVec<(ChessMove, i32), MAX_MOVES> = ArrayVec::new();
    for mv in MoveGen::new_legal(board) {
        let score = if Some(mv) == tt_move {
            TT_MOVE_SCORE
        } else if is_capture(board, mv) {
            CAPTURE_SCORE + mvv_lva(board, mv)
        } else if killers.contains(ply, mv) {
            KILLER_SCORE
        } else {
            QUIET_SCORE + history.get(mv)
        };
        let _ = scored.try_push((mv, score));
    }

    scored.sort_unstable_by_key(|&(_, score)| Reverse(score));
    scored.into_iter().map(|(mv, _)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::Square;
    use std::str::FromStr;

    fn board(fen: &str) -> Board {
        Board::from_str(fen).unwrap()
    }

    #[test]
    fn captures_sort_before_quiets() {
        // White can take the d5 pawn with the e4 pawn or shuffle pieces.
        let position = board("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        let killers = Killers::new();
        let history = HistoryTable::new();

        let moves = ordered_moves(&position, None, &killers, &history, 0);
        let capture = ChessMove::new(Square::E4, Square::D5, None);
        assert_eq!(moves[0], capture);
    }

    #[test]
    fn the_tt_move_sorts_first() {
        let position = Board::default();
        let killers = Killers::new();
        let history = HistoryTable::new();

        let tt_move = ChessMove::new(Square::G1, Square::F3, None);
        let moves = ordered_moves(&position, Some(tt_move), &killers, &history, 0);
        assert_eq!(moves[0], tt_move);
    }

    #[test]
    fn an_illegal_tt_move_is_ignored() {
        let position = Board::default();
        let killers = Killers::new();
        let history = HistoryTable::new();

        let bogus = ChessMove::new(Square::A1, Square::H8, None);
        let moves = ordered_moves(&position, Some(bogus), &killers, &history, 0);
        assert_eq!(moves.len(), 20);
        assert!(!moves.contains(&bogus));
    }

    #[test]
    fn killers_outrank_plain_quiets() {
        let position = Board::default();
        let mut killers = Killers::new();
        let history = HistoryTable::new();

        let killer = ChessMove::new(Square::B1, Square::C3, None);
        killers.push(3, killer);

        let moves = ordered_moves(&position, None, &killers, &history, 3);
        assert_eq!(moves[0], killer);
        // The slot is per-ply.
        assert!(!killers.contains(4, killer));
    }

    #[test]
    fn history_steers_quiet_ordering() {
        let position = Board::default();
        let killers = Killers::new();
        let mut history = HistoryTable::new();

        let favored = ChessMove::new(Square::A2, Square::A3, None);
        history.add(favored, 500);

        let moves = ordered_moves(&position, None, &killers, &history, 0);
        assert_eq!(moves[0], favored);
    }

    #[test]
    fn ordering_is_idempotent() {
        let position = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let killers = Killers::new();
        let history = HistoryTable::new();

        let first = ordered_moves(&position, None, &killers, &history, 0);
        let second = ordered_moves(&position, None, &killers, &history, 0);
        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn mvv_lva_prefers_valuable_victims_and_cheap_attackers() {
        // Both the pawn and the knight can capture the d5 queen.
        let position = board("3k4/3p4/8/3q4/4PN2/8/8/3RK3 w - - 0 1");
        let pawn_takes_queen = ChessMove::new(Square::E4, Square::D5, None);
        let knight_takes_queen = ChessMove::new(Square::F4, Square::D5, None);

        assert!(mvv_lva(&position, pawn_takes_queen) > mvv_lva(&position, knight_takes_queen));
    }

    #[test]
    fn en_passant_counts_the_pawn_behind_the_target() {
        let position = board("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let en_passant = ChessMove::new(Square::E5, Square::F6, None);
        assert!(is_capture(&position, en_passant));
        // Pawn takes pawn: 100 * 16 - 100.
        assert_eq!(mvv_lva(&position, en_passant), 1_500);
    }

    #[test]
    fn history_saturates_at_the_clamp() {
        let mut history = HistoryTable::new();
        let mv = ChessMove::new(Square::A2, Square::A4, None);
        for _ in 0..100 {
            history.add(mv, 4_000);
        }
        assert_eq!(history.get(mv), HISTORY_MAX);

        for _ in 0..200 {
            history.add(mv, -4_000);
        }
        assert_eq!(history.get(mv), -HISTORY_MAX);
    }

    #[test]
    fn killers_refuse_duplicates_and_age_out() {
        let mut killers = Killers::new();
        let first = ChessMove::new(Square::A2, Square::A3, None);
        let second = ChessMove::new(Square::B2, Square::B3, None);
        let third = ChessMove::new(Square::C2, Square::C3, None);

        killers.push(0, first);
        killers.push(0, first);
        killers.push(0, second);
        assert!(killers.contains(0, first));
        assert!(killers.contains(0, second));

        killers.push(0, third);
        assert!(killers.contains(0, third));
        assert!(killers.contains(0, second));
        assert!(!killers.contains(0, first));
    }
}
