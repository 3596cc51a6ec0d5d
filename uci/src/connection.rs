use std::io::Write;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use super::commands::UciOutput;
use super::encoder::Encoder;

/// Owns the dedicated stdout writer thread. Both the UCI loop and the engine
/// worker print by sending [`UciOutput`] values through cloned senders, so
/// lines from different threads never interleave.
pub struct UciConnection {
    output_tx: Sender<UciOutput>,
}

impl UciConnection {
    pub fn new() -> Self {
        let (output_tx, output_rx) = channel();
        Self::spawn_writer(output_rx);
        Self { output_tx }
    }

    /// A sender for output messages; clone freely across threads.
    pub fn output_sender(&self) -> Sender<UciOutput> {
        self.output_tx.clone()
    }

    fn spawn_writer(output_rx: Receiver<UciOutput>) {
        thread::spawn(move || {
            let encoder = Encoder::default();
            let stdout = std::io::stdout();

            while let Ok(output) = output_rx.recv() {
                let mut handle = stdout.lock();
                // GUIs read line by line; flush so replies are never stuck
                // in the buffer.
                let _ = writeln!(handle, "{}", encoder.encode(&output));
                let _ = handle.flush();
            }
        });
    }
}

impl Default for UciConnection {
    fn default() -> Self {
        Self::new()
    }
}
