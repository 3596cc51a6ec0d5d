//! One search thread: iterative-deepening negamax with alpha-beta pruning,
//! quiescence, a check extension, conservative late-move reduction and
//! aspiration windows. The transposition table and evaluation cache are
//! shared across threads; history and killers are this thread's own.

use std::cmp::Reverse;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    mpsc::Sender,
    Arc,
};
use std::time::Instant;

use arrayvec::ArrayVec;
use chess::{Board, ChessMove, MoveGen};
use evaluation::scores::{self, INF, MATE};
use evaluation::Evaluator;
use uci::commands::{Info, Score};
use uci::UciOutput;

use crate::limits::SearchLimits;
use crate::move_order::{
    alpha_bonus, cutoff_bonus, is_capture, is_quiet, mvv_lva, ordered_moves, HistoryTable,
    Killers, MAX_MOVES, MAX_PLY,
};
use crate::tt::{pack_move, unpack_move, Bound, TranspositionTable};

/// Iteration ceiling when no depth cap was given.
const MAX_DEPTH: i32 = 64;
/// Principal variations longer than this are cut off.
const PV_MAX_LEN: usize = 64;
/// Half-width of the aspiration window around the previous score.
const ASPIRATION_WINDOW: i16 = 25;

// Clock polling intervals, as node-count masks.
const NEGAMAX_POLL_MASK: u64 = 2047;
const QSEARCH_POLL_MASK: u64 = 1023;

/// Outcome of one `go` on one thread. `best_move` is `None` only when the
/// root had no legal moves.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub best_score: i16,
}

pub struct Searcher {
    tt: Arc<TranspositionTable>,
    evaluator: Arc<Evaluator>,
    stop: Arc<AtomicBool>,
    total_nodes: Arc<AtomicU64>,

    history: HistoryTable,
    killers: Killers,

    nodes: u64,
    flushed_nodes: u64,
    limits: SearchLimits,
    started: Instant,
}

impl Searcher {
    pub fn new(
        tt: Arc<TranspositionTable>,
        evaluator: Arc<Evaluator>,
        stop: Arc<AtomicBool>,
        total_nodes: Arc<AtomicU64>,
    ) -> Self {
        Self {
            tt,
            evaluator,
            stop,
            total_nodes,
            history: HistoryTable::new(),
            killers: Killers::new(),
            nodes: 0,
            flushed_nodes: 0,
            limits: SearchLimits {
                time_ms: 0,
                depth: None,
                infinite: false,
            },
            started: Instant::now(),
        }
    }

    /// Clears the per-thread learning state at a game boundary.
    pub fn new_game(&mut self) {
        self.history.clear();
        self.killers.clear();
    }

    /// Iterative deepening from the given root. Emits an info line per
    /// completed iteration when an output sender is supplied (the primary
    /// thread); helper threads pass `None`.
    pub fn go(
        &mut self,
        root: &Board,
        limits: SearchLimits,
        output: Option<&Sender<UciOutput>>,
    ) -> SearchResult {
        self.limits = limits;
        self.started = Instant::now();
        self.nodes = 0;
        self.flushed_nodes = 0;

        let Some(first_legal) = MoveGen::new_legal(root).next() else {
            return SearchResult {
                best_move: None,
                best_score: 0,
            };
        };

        let depth_cap = self.limits.depth.map_or(MAX_DEPTH, i32::from);
        let mut best_move = first_legal;
        let mut best_score = 0i16;
        let mut prev_score = 0i16;

        for depth in 1..=depth_cap {
            if self.time_up() {
                break;
            }

            let score = if depth > 1 {
                let alpha = prev_score - ASPIRATION_WINDOW;
                let beta = prev_score + ASPIRATION_WINDOW;
                let score = self.negamax(root, depth, alpha, beta, 0);
                if !self.time_up() && (score <= alpha || score >= beta) {
                    // The narrow window missed; redo the iteration full width.
                    self.negamax(root, depth, -INF, INF, 0)
                } else {
                    score
                }
            } else {
                self.negamax(root, depth, -INF, INF, 0)
            };

            if self.time_up() {
                // The iteration was cut short; keep the previous one's move.
                break;
            }

            let pv = self.extract_pv(root);
            if let Some(&head) = pv.first() {
                best_move = head;
            }
            best_score = score;
            prev_score = score;

            self.flush_nodes();
            if let Some(output) = output {
                self.send_info(output, depth, score, &pv);
            }
        }

        self.flush_nodes();
        SearchResult {
            best_move: Some(best_move),
            best_score,
        }
    }

    fn negamax(&mut self, board: &Board, depth: i32, mut alpha: i16, mut beta: i16, ply: usize) -> i16 {
        self.nodes += 1;
        if self.nodes & NEGAMAX_POLL_MASK == 0 && self.time_up() {
            return self.evaluator.evaluate(board);
        }
        if ply >= MAX_PLY {
            return self.evaluator.evaluate(board);
        }

        let alpha_orig = alpha;
        let hash = board.get_hash();

        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            tt_move = unpack_move(entry.best_move);
            if i32::from(entry.depth) >= depth {
                let tt_score = scores::from_tt(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return tt_score,
                    Bound::Lower if tt_score > alpha => alpha = tt_score,
                    Bound::Upper if tt_score < beta => beta = tt_score,
                    _ => {}
                }
                if alpha >= beta {
                    return tt_score;
                }
            }
        }

        if depth <= 0 {
            return self.qsearch(board, alpha, beta, ply);
        }

        let in_check = board.checkers().popcnt() > 0;
        let moves = ordered_moves(board, tt_move, &self.killers, &self.history, ply);
        if moves.is_empty() {
            return if in_check {
                -scores::mate_score(ply)
            } else {
                0 // stalemate
            };
        }

        let depth = if in_check { depth + 1 } else { depth };

        let mut best = -INF;
        let mut best_move: Option<ChessMove> = None;

        for (searched, mv) in moves.iter().copied().enumerate() {
            let quiet = is_quiet(board, mv);

            // Late-move reduction: late quiets lose one extra ply of depth,
            // with no re-search if the reduced result raises alpha.
            let mut sub_depth = depth - 1;
            if sub_depth > 0 && searched >= 4 && quiet {
                sub_depth = depth - 2;
            }

            let child = board.make_move_new(mv);
            let score = -self.negamax(&child, sub_depth, -beta, -alpha, ply + 1);

            if score > best {
                best = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
                if quiet {
                    self.history.add(mv, alpha_bonus(depth));
                    self.killers.push(ply, mv);
                }
            }
            if alpha >= beta {
                if quiet {
                    self.history.add(mv, cutoff_bonus(depth));
                    self.killers.push(ply, mv);
                }
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(
            hash,
            pack_move(best_move),
            depth.min(127) as i8,
            scores::to_tt(best, ply),
            bound,
        );

        best
    }

    /// Resolves tactical noise past the horizon. In check this is a
    /// full-width node so mates are not missed; otherwise stand pat and try
    /// only captures and promotions, best victim first.
    fn qsearch(&mut self, board: &Board, mut alpha: i16, beta: i16, ply: usize) -> i16 {
        self.nodes += 1;
        if self.nodes & QSEARCH_POLL_MASK == 0 && self.time_up() {
            return self.evaluator.evaluate(board);
        }
        if ply >= MAX_PLY {
            return self.evaluator.evaluate(board);
        }

        let in_check = board.checkers().popcnt() > 0;
        if in_check {
            let evasions: ArrayVec<ChessMove, MAX_MOVES> = MoveGen::new_legal(board).collect();
            if evasions.is_empty() {
                return -scores::mate_score(ply);
            }

            let mut best = -INF;
            for mv in evasions {
                let child = board.make_move_new(mv);
                let score = -self.qsearch(&child, -beta, -alpha, ply + 1);
                if score > best {
                    best = score;
                }
                if best > alpha {
                    alpha = best;
                }
                if alpha >= beta {
                    break;
                }
            }
            return best;
        }

        let stand_pat = self.evaluator.evaluate(board);
        if stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut forcing: ArrayVec<(ChessMove, i32), MAX_MOVES> = MoveGen::new_legal(board)
            .filter(|&mv| is_capture(board, mv) || mv.get_promotion().is_some())
            .map(|mv| (mv, mvv_lva(board, mv)))
            .collect();
        forcing.sort_unstable_by_key(|&(_, score)| Reverse(score));

        let mut best = stand_pat;
        for (mv, _) in forcing {
            let child = board.make_move_new(mv);
            let score = -self.qsearch(&child, -beta, -alpha, ply + 1);
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Walks the table from the root, validating each stored move against
    /// the walked position. Stops at the first miss, sentinel, or move the
    /// table aliased in from a colliding position.
    fn extract_pv(&self, root: &Board) -> Vec<ChessMove> {
        let mut pv = Vec::new();
        let mut board = *root;

        for _ in 0..PV_MAX_LEN {
            let Some(entry) = self.tt.probe(board.get_hash()) else {
                break;
            };
            let Some(mv) = unpack_move(entry.best_move) else {
                break;
            };
            if !board.legal(mv) {
                break;
            }
            pv.push(mv);
            board = board.make_move_new(mv);
        }

        pv
    }

    /// True once the shared stop flag is raised or the clock has run out.
    /// Under `infinite`, only the flag terminates.
    fn time_up(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if self.limits.infinite {
            return false;
        }
        self.started.elapsed().as_millis() as u64 >= self.limits.time_ms
    }

    fn flush_nodes(&mut self) {
        let delta = self.nodes - self.flushed_nodes;
        if delta > 0 {
            self.total_nodes.fetch_add(delta, Ordering::Relaxed);
            self.flushed_nodes = self.nodes;
        }
    }

    fn send_info(&self, output: &Sender<UciOutput>, depth: i32, score: i16, pv: &[ChessMove]) {
        let elapsed = self.started.elapsed();
        let nodes = self.total_nodes.load(Ordering::Relaxed);
        let nps = (nodes as f64 / elapsed.as_secs_f64().max(0.001)) as u64;

        let _ = output.send(UciOutput::Info(Info {
            depth: depth as u8,
            nodes,
            nodes_per_second: nps,
            time: elapsed.as_millis() as u64,
            score: if scores::is_mate_score(score) {
                mate_in_moves(score)
            } else {
                Score::Centipawns(score)
            },
            pv: pv.to_vec(),
        }));
    }
}

/// Converts a mate score into the full-move count UCI expects, negative
/// when the engine is on the losing side.
fn mate_in_moves(score: i16) -> Score {
    let plies = MATE - score.abs();
    let moves = (plies + 1) / 2;
    Score::Mate(if score > 0 { moves } else { -moves })
}
