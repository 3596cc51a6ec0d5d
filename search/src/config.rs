use std::sync::mpsc::{SendError, Sender};

use uci::{SpinOption, UciOutput};

const THREADS: SpinOption = SpinOption {
    name: "Threads",
    min: 1,
    max: 256,
};

const HASH: SpinOption = SpinOption {
    name: "Hash",
    min: 1,
    max: 4096,
};

/// Engine options configurable over UCI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of lazy-SMP searcher threads.
    pub threads: usize,
    /// Transposition table size in megabytes.
    pub hash_mb: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            hash_mb: 64,
        }
    }
}

impl EngineConfig {
    pub fn update_from_uci(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "Threads" => {
                self.threads = THREADS.parse(value)? as usize;
                Ok(())
            }
            "Hash" => {
                self.hash_mb = HASH.parse(value)? as usize;
                Ok(())
            }
            _ => Err(format!("Unknown option: {}", name)),
        }
    }

    /// Declares the supported options in reply to `uci`.
    pub fn to_uci(&self, output: &Sender<UciOutput>) -> Result<(), SendError<UciOutput>> {
        output.send(UciOutput::Option(THREADS.declaration(self.threads)))?;
        output.send(UciOutput::Option(HASH.declaration(self.hash_mb)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_options_in_range() {
        let mut config = EngineConfig::default();
        config.update_from_uci("Threads", "8").unwrap();
        config.update_from_uci("Hash", "256").unwrap();
        assert_eq!(config.threads, 8);
        assert_eq!(config.hash_mb, 256);
    }

    #[test]
    fn rejects_unknown_names_and_bad_values() {
        let mut config = EngineConfig::default();
        assert!(config.update_from_uci("Ponder", "true").is_err());
        assert!(config.update_from_uci("Threads", "0").is_err());
        assert!(config.update_from_uci("Hash", "a lot").is_err());
        // Nothing changed.
        assert_eq!(config, EngineConfig::default());
    }
}
