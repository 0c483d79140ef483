//! Best-effort progress persistence
//!
//! The simulation records each round outcome through the `ProgressStore`
//! port and reads lifetime totals back at startup. A failing store must
//! never stall gameplay: every implementation here swallows its own errors
//! and logs at `warn`, leaving the in-memory counters authoritative.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Lifetime totals as seen by the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeTotals {
    pub total_wins: u64,
    pub total_fails: u64,
}

/// Persistence port for progress counters
pub trait ProgressStore {
    /// Totals recorded so far; `Default` when nothing was ever stored
    fn load(&self) -> LifetimeTotals;
    /// Record one successful round (best-effort)
    fn record_win(&mut self);
    /// Record one failed round (best-effort)
    fn record_failure(&mut self);
}

/// In-memory store, for tests and the headless demo
#[derive(Debug, Default)]
pub struct MemoryStore {
    totals: LifetimeTotals,
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> LifetimeTotals {
        self.totals
    }

    fn record_win(&mut self) {
        self.totals.total_wins += 1;
    }

    fn record_failure(&mut self) {
        self.totals.total_fails += 1;
    }
}

/// Store that discards everything
#[derive(Debug, Default)]
pub struct NullStore;

impl ProgressStore for NullStore {
    fn load(&self) -> LifetimeTotals {
        LifetimeTotals::default()
    }

    fn record_win(&mut self) {}

    fn record_failure(&mut self) {}
}

/// JSON-file-backed store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    totals: LifetimeTotals,
}

impl JsonFileStore {
    /// Open the store at `path`, reading existing totals if the file parses.
    /// A missing or corrupt file starts from zero.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let totals = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(totals) => {
                    log::info!("Loaded progress from {}", path.display());
                    totals
                }
                Err(err) => {
                    log::warn!("Corrupt progress file {}: {err}", path.display());
                    LifetimeTotals::default()
                }
            },
            Err(_) => {
                log::info!("No progress file at {}, starting fresh", path.display());
                LifetimeTotals::default()
            }
        };
        Self { path, totals }
    }

    fn flush(&self) {
        let json = match serde_json::to_string(&self.totals) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to serialize progress: {err}");
                return;
            }
        };
        let result = std::fs::File::create(&self.path)
            .and_then(|mut file| file.write_all(json.as_bytes()));
        if let Err(err) = result {
            log::warn!("Failed to write progress to {}: {err}", self.path.display());
        }
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> LifetimeTotals {
        self.totals
    }

    fn record_win(&mut self) {
        self.totals.total_wins += 1;
        self.flush();
    }

    fn record_failure(&mut self) {
        self.totals.total_fails += 1;
        self.flush();
    }
}
