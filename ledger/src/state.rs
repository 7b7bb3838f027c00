//! Thread-safe ledger handle

use std::sync::{Arc, Mutex, MutexGuard};

use shared::{PurchaseSummary, RoastSummary};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::services::{RecordPurchaseInput, RoastEngine, RoastInput};

/// Ledger state shared across threads
///
/// Every write runs under a single lock acquisition, so a roast's average
/// cost read, record append and depletion are never interleaved with
/// another writer.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
    engine: Arc<RoastEngine>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger, engine: RoastEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
            engine: Arc::new(engine),
        }
    }

    pub fn record_purchase(&self, input: RecordPurchaseInput) -> LedgerResult<PurchaseSummary> {
        self.lock()?.record_purchase(input)
    }

    pub fn roast(&self, input: RoastInput) -> LedgerResult<RoastSummary> {
        let mut ledger = self.lock()?;
        self.engine.roast(&mut ledger, input)
    }

    /// Run a read-only query against a consistent view of the ledger
    pub fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> LedgerResult<T> {
        let ledger = self.lock()?;
        Ok(f(&*ledger))
    }

    /// Clone of the current ledger
    pub fn snapshot(&self) -> LedgerResult<Ledger> {
        self.read(Ledger::clone)
    }

    pub fn engine(&self) -> &RoastEngine {
        &self.engine
    }

    fn lock(&self) -> LedgerResult<MutexGuard<'_, Ledger>> {
        self.inner.lock().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl Default for SharedLedger {
    fn default() -> Self {
        Self::new(Ledger::default(), RoastEngine::default())
    }
}
