//! The engine: a pool of lazy-SMP searchers over one shared transposition
//! table and evaluation cache. Every searcher runs its own full iterative
//! deepening; the table is how they help each other. Only the primary
//! searcher reports info lines, and the best result across threads wins.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    mpsc::Sender,
    Arc,
};
use std::thread;

use chess::{Board, ChessMove, MoveGen};
use evaluation::Evaluator;
use log::debug;
use uci::commands::GoParams;
use uci::UciOutput;

use crate::config::EngineConfig;
use crate::limits::SearchLimits;
use crate::searcher::{SearchResult, Searcher};
use crate::tt::TranspositionTable;

pub struct Engine {
    config: EngineConfig,
    board: Board,
    stop: Arc<AtomicBool>,
    tt: Arc<TranspositionTable>,
    evaluator: Arc<Evaluator>,
    total_nodes: Arc<AtomicU64>,
    searchers: Vec<Searcher>,
}

impl Engine {
    /// The stop flag is shared with the caller so a `stop` command can
    /// interrupt a running search from another thread.
    pub fn new(config: &EngineConfig, stop: Arc<AtomicBool>) -> Self {
        let mut engine = Self {
            config: config.clone(),
            board: Board::default(),
            stop,
            tt: Arc::new(TranspositionTable::new(config.hash_mb)),
            evaluator: Arc::new(Evaluator::new()),
            total_nodes: Arc::new(AtomicU64::new(0)),
            searchers: Vec::new(),
        };
        engine.ensure_searchers();
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_position(&mut self, board: Board) {
        self.board = board;
    }

    /// Applies an option change. A new hash size replaces the shared table,
    /// which means rebuilding the searchers that hold it.
    pub fn configure(&mut self, config: &EngineConfig) {
        if config.hash_mb != self.config.hash_mb {
            self.tt = Arc::new(TranspositionTable::new(config.hash_mb));
            self.searchers.clear();
        }
        self.config = config.clone();
        self.ensure_searchers();
    }

    /// Game boundary: forget learned move ordering and cached evaluations,
    /// and age the transposition table rather than wiping it.
    pub fn new_game(&mut self) {
        self.tt.new_generation();
        self.evaluator.clear_cache();
        for searcher in &mut self.searchers {
            searcher.new_game();
        }
    }

    /// Runs one search over all threads and returns the aggregated best
    /// move and score. `None` means the root position has no legal moves.
    pub fn search(
        &mut self,
        params: &GoParams,
        output: Option<&Sender<UciOutput>>,
    ) -> Option<(ChessMove, i16)> {
        let limits = SearchLimits::from_go(params, &self.board);

        self.stop.store(false, Ordering::Relaxed);
        self.total_nodes.store(0, Ordering::Relaxed);
        self.ensure_searchers();

        let board = self.board;
        let mut results: Vec<SearchResult> = Vec::with_capacity(self.searchers.len());

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.searchers.len());
            for (index, searcher) in self.searchers.iter_mut().enumerate() {
                // Only the primary thread talks to the GUI.
                let thread_output = if index == 0 { output.cloned() } else { None };
                handles
                    .push(scope.spawn(move || searcher.go(&board, limits, thread_output.as_ref())));
            }
            for handle in handles {
                if let Ok(result) = handle.join() {
                    results.push(result);
                }
            }
        });

        let mut best: Option<SearchResult> = None;
        for result in results {
            let better = match (&best, result.best_move) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(current), Some(_)) => result.best_score > current.best_score,
            };
            if better {
                best = Some(result);
            }
        }

        match best {
            Some(SearchResult {
                best_move: Some(mv),
                best_score,
            }) => {
                debug!("search finished: {} ({})", mv, best_score);
                Some((mv, best_score))
            }
            // Every thread bailed out before finishing depth 1; any legal
            // move beats forfeiting on time.
            _ => MoveGen::new_legal(&self.board).next().map(|mv| (mv, 0)),
        }
    }

    fn ensure_searchers(&mut self) {
        let threads = self.config.threads.max(1);
        self.searchers.truncate(threads);
        while self.searchers.len() < threads {
            self.searchers.push(Searcher::new(
                Arc::clone(&self.tt),
                Arc::clone(&self.evaluator),
                Arc::clone(&self.stop),
                Arc::clone(&self.total_nodes),
            ));
        }
    }
}
