//! History Buffer - recent predictions
//!
//! Bounded FIFO of the last N predictions with their original text. Owned
//! by the prediction service; append-and-trim happens under one lock so
//! concurrent requests keep ordering and the size bound.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_HISTORY_CAPACITY;
use crate::logic::model::{Label, PredictionResult, ScoreSource};

/// One recorded prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub label: Label,
    pub score: Option<u8>,
    pub source: ScoreSource,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(result: &PredictionResult, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: result.label,
            score: result.score,
            source: result.source,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Buffer status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferStatus {
    pub current_size: usize,
    pub capacity: usize,
    pub fill_percent: f32,
}

pub struct HistoryBuffer {
    entries: Mutex<VecDeque<HistoryEntry>>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Capacity is at least one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// Append, evicting the oldest entries beyond capacity
    pub fn push(&self, entry: HistoryEntry) {
        let mut entries = self.entries.lock();
        entries.push_back(entry);

        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Newest first, as shown to users
    pub fn recent_first(&self) -> Vec<HistoryEntry> {
        self.entries.lock().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn status(&self) -> BufferStatus {
        let current_size = self.len();
        BufferStatus {
            current_size,
            capacity: self.capacity,
            fill_percent: (current_size as f32 / self.capacity as f32 * 100.0).min(100.0),
        }
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(n: usize) -> HistoryEntry {
        let result = PredictionResult {
            label: Label::Safe,
            score: Some(0),
            source: ScoreSource::Heuristic,
        };
        HistoryEntry::new(&result, format!("email {}", n))
    }

    #[test]
    fn test_fifo_eviction() {
        let buffer = HistoryBuffer::new(20);
        for i in 1..=21 {
            buffer.push(entry(i));
        }

        let texts: Vec<String> = buffer.snapshot().into_iter().map(|e| e.text).collect();
        assert_eq!(texts.len(), 20);
        assert!(!texts.contains(&"email 1".to_string()));
        let expected: Vec<String> = (2..=21).map(|i| format!("email {}", i)).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_recent_first() {
        let buffer = HistoryBuffer::new(3);
        for i in 0..3 {
            buffer.push(entry(i));
        }
        let newest = buffer.recent_first();
        assert_eq!(newest[0].text, "email 2");
        assert_eq!(newest[2].text, "email 0");
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let buffer = HistoryBuffer::new(0);
        buffer.push(entry(1));
        buffer.push(entry(2));
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.snapshot()[0].text, "email 2");
    }

    #[test]
    fn test_huge_capacity_grows_lazily() {
        let buffer = HistoryBuffer::new(usize::MAX);
        buffer.push(entry(1));
        buffer.push(entry(2));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.capacity(), usize::MAX);
    }

    #[test]
    fn test_status_and_clear() {
        let buffer = HistoryBuffer::new(4);
        buffer.push(entry(1));
        assert_eq!(buffer.status().fill_percent, 25.0);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_concurrent_appends_stay_bounded() {
        let buffer = Arc::new(HistoryBuffer::new(20));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let buffer = Arc::clone(&buffer);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        buffer.push(entry(t * 100 + i));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(buffer.len(), 20);
    }
}
