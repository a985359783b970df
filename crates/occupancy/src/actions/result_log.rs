//! Bounded history of executed placement actions, oldest first.

use std::collections::VecDeque;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ActionResult, PlacementAction};
use crate::config::MAX_RESULT_LOG_ENTRIES;

/// One executed action. `seq` counts every action ever recorded, so gaps at
/// the front of the log show how many entries were dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLogEntry {
    pub seq: u64,
    pub action: PlacementAction,
    pub result: ActionResult,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PlacementResultLog {
    entries: VecDeque<ResultLogEntry>,
    next_seq: u64,
}

impl PlacementResultLog {
    /// Appends an entry and returns its sequence number. Once
    /// `MAX_RESULT_LOG_ENTRIES` are held, the oldest one is dropped.
    pub fn record(&mut self, action: PlacementAction, result: ActionResult) -> u64 {
        if self.entries.len() == MAX_RESULT_LOG_ENTRIES {
            self.entries.pop_front();
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(ResultLogEntry {
            seq,
            action,
            result,
        });
        seq
    }

    pub fn latest(&self) -> Option<&ResultLogEntry> {
        self.entries.back()
    }

    /// Up to `n` most recent entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ResultLogEntry> {
        self.entries
            .iter()
            .skip(self.entries.len().saturating_sub(n))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ResultLogEntry> {
        self.entries.iter().filter(|e| !e.result.is_success())
    }

    /// Total number of actions recorded, including dropped ones.
    pub fn total_recorded(&self) -> u64 {
        self.next_seq
    }

    /// Drops the held entries; sequence numbers keep counting.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlacementError;

    fn resize(width: i32) -> PlacementAction {
        PlacementAction::Resize { width, height: 1 }
    }

    #[test]
    fn test_record_and_latest() {
        let mut log = PlacementResultLog::default();
        assert!(log.latest().is_none());
        assert_eq!(log.record(PlacementAction::ClearAll, ActionResult::Success), 0);
        let seq = log.record(
            PlacementAction::Remove {
                id: "ghost".to_string(),
            },
            ActionResult::Error(PlacementError::NotFound),
        );
        assert_eq!(seq, 1);

        let latest = log.latest().unwrap();
        assert_eq!(latest.seq, 1);
        assert_eq!(latest.result, ActionResult::Error(PlacementError::NotFound));
        assert_eq!(log.recent(10).count(), 2);
        assert_eq!(log.failures().count(), 1);
    }

    #[test]
    fn test_drops_oldest_when_full() {
        let mut log = PlacementResultLog::default();
        let extra = 6;
        for i in 0..(MAX_RESULT_LOG_ENTRIES + extra) {
            log.record(resize(i as i32 + 1), ActionResult::Success);
        }
        assert_eq!(log.len(), MAX_RESULT_LOG_ENTRIES);
        assert_eq!(log.total_recorded(), (MAX_RESULT_LOG_ENTRIES + extra) as u64);

        // Held entries stay contiguous and in order after wrapping.
        let seqs: Vec<u64> = log.recent(MAX_RESULT_LOG_ENTRIES).map(|e| e.seq).collect();
        let expected: Vec<u64> = (extra as u64..(MAX_RESULT_LOG_ENTRIES + extra) as u64).collect();
        assert_eq!(seqs, expected);
        let oldest = log.recent(usize::MAX).next().unwrap();
        assert_eq!(oldest.action, resize(extra as i32 + 1));
        assert_eq!(
            log.latest().unwrap().action,
            resize((MAX_RESULT_LOG_ENTRIES + extra) as i32)
        );
    }

    #[test]
    fn test_recent_is_oldest_first() {
        let mut log = PlacementResultLog::default();
        for w in 1..=5 {
            log.record(resize(w), ActionResult::Success);
        }
        let widths: Vec<PlacementAction> = log.recent(3).map(|e| e.action.clone()).collect();
        assert_eq!(widths, vec![resize(3), resize(4), resize(5)]);
    }

    #[test]
    fn test_clear_keeps_sequence() {
        let mut log = PlacementResultLog::default();
        log.record(PlacementAction::ClearAll, ActionResult::Success);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.record(PlacementAction::ClearAll, ActionResult::Success), 1);
    }
}
