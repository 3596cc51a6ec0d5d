use std::sync::mpsc::{Receiver, Sender};

use chess::Board;
use search::{Engine, EngineConfig};
use uci::{UciOutput, NULL_MOVE};

/// Commands sent from the UCI thread to the engine worker.
pub enum EngineCommand {
    /// Update engine configuration.
    Configure(EngineConfig),
    /// Reset engine state for a new game.
    NewGame,
    /// Set the position to search from.
    SetPosition(Board),
    /// Start searching with the given parameters.
    Go(uci::commands::GoParams),
    /// Print the current position as an info string.
    Print,
    /// Shut down the worker thread.
    Quit,
}

/// Engine worker that processes commands on a dedicated thread.
///
/// Owns the engine and receives commands via channel from the main UCI
/// thread. Because commands are handled strictly in order, a `go` that is
/// still running has finished (and joined its searchers) before the next
/// command is picked up.
pub struct EngineWorker {
    engine: Engine,
    rx: Receiver<EngineCommand>,
    output: Sender<UciOutput>,
}

impl EngineWorker {
    pub fn new(engine: Engine, rx: Receiver<EngineCommand>, output: Sender<UciOutput>) -> Self {
        Self { engine, rx, output }
    }

    /// Main loop: process commands until Quit is received.
    pub fn run(mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::Go(params) => {
                    let result = self.engine.search(&params, Some(&self.output));

                    // UCI requires a bestmove for every "go", even in dead
                    // positions.
                    let best = result
                        .map(|(mv, _)| mv.to_string())
                        .unwrap_or_else(|| NULL_MOVE.to_string());
                    let _ = self.output.send(UciOutput::BestMove(best));
                }
                EngineCommand::SetPosition(board) => {
                    self.engine.set_position(board);
                }
                EngineCommand::NewGame => {
                    self.engine.new_game();
                }
                EngineCommand::Configure(config) => {
                    self.engine.configure(&config);
                }
                EngineCommand::Print => {
                    let _ = self
                        .output
                        .send(UciOutput::Raw(format!("info string FEN {}", self.engine.board())));
                }
                EngineCommand::Quit => break,
            }
        }
    }
}
