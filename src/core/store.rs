use super::feedback::{aggregate, FeedbackSummary};
use super::model::{
    Candle, CandleId, CandleUpdate, FeedbackRecord, NewCandle, NewFeedback, ValidationError,
};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("candle `{0}` not found")]
    NotFound(CandleId),
    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Record access the pages need. Implementations are constructed by the
/// application and passed to whoever needs them.
pub trait CandleStore {
    fn candle(&self, id: &str) -> Result<Candle, StoreError>;
    /// All candles, newest first.
    fn candles(&self) -> Result<Vec<Candle>, StoreError>;
    /// Candles whose name or recipient contains `term` (any case), newest
    /// first. A blank term lists everything.
    fn search_candles(&self, term: &str) -> Result<Vec<Candle>, StoreError> {
        let mut found = self.candles()?;
        found.retain(|c| c.matches_search(term));
        Ok(found)
    }
    fn create_candle(&self, candle: NewCandle) -> Result<Candle, StoreError>;
    fn update_candle(&self, id: &str, update: CandleUpdate) -> Result<Candle, StoreError>;
    fn submit_feedback(&self, feedback: NewFeedback) -> Result<FeedbackRecord, StoreError>;
    /// Feedback for one candle, newest first.
    fn feedback_for(&self, candle_id: &str) -> Result<Vec<FeedbackRecord>, StoreError>;
}

/// Load and summarize a candle's feedback. `None` means the data is
/// unavailable; the error is logged.
pub fn load_feedback_summary<S: CandleStore + ?Sized>(
    store: &S,
    candle_id: &str,
) -> Option<FeedbackSummary> {
    match store.feedback_for(candle_id) {
        Ok(records) => Some(aggregate(&records)),
        Err(e) => {
            log::error!("[store] feedback for {candle_id}: {e}");
            None
        }
    }
}

/// In-process store used by tests and offline previews.
pub struct MemoryStore {
    candles: RefCell<Vec<Candle>>,
    feedback: RefCell<Vec<FeedbackRecord>>,
    rng: RefCell<StdRng>,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StdRng::from_entropy(), Box::new(Utc::now))
    }
}

impl MemoryStore {
    pub fn new(rng: StdRng, clock: Box<dyn Fn() -> DateTime<Utc>>) -> Self {
        Self {
            candles: RefCell::new(Vec::new()),
            feedback: RefCell::new(Vec::new()),
            rng: RefCell::new(rng),
            clock,
        }
    }

    fn next_id(&self) -> CandleId {
        format!("{:032x}", self.rng.borrow_mut().gen::<u128>())
    }
}

impl CandleStore for MemoryStore {
    fn candle(&self, id: &str) -> Result<Candle, StoreError> {
        self.candles
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn candles(&self) -> Result<Vec<Candle>, StoreError> {
        let mut all: Vec<Candle> = self.candles.borrow().iter().rev().cloned().collect();
        // stable: equal timestamps keep latest-inserted first
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    fn create_candle(&self, candle: NewCandle) -> Result<Candle, StoreError> {
        candle.validate()?;
        let created = candle.into_candle(self.next_id(), (self.clock)());
        log::info!("[store] created candle {} ({})", created.id, created.name);
        self.candles.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn update_candle(&self, id: &str, update: CandleUpdate) -> Result<Candle, StoreError> {
        update.validate()?;
        let mut candles = self.candles.borrow_mut();
        let slot = candles
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = update.into_candle(slot.id.clone(), slot.created_at);
        Ok(slot.clone())
    }

    fn submit_feedback(&self, feedback: NewFeedback) -> Result<FeedbackRecord, StoreError> {
        feedback.validate()?;
        if !self.candles.borrow().iter().any(|c| c.id == feedback.candle_id) {
            return Err(StoreError::NotFound(feedback.candle_id));
        }
        let record = feedback.into_record((self.clock)());
        self.feedback.borrow_mut().push(record.clone());
        Ok(record)
    }

    fn feedback_for(&self, candle_id: &str) -> Result<Vec<FeedbackRecord>, StoreError> {
        let mut records: Vec<FeedbackRecord> = self
            .feedback
            .borrow()
            .iter()
            .rev()
            .filter(|f| f.candle_id == candle_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
